//! Client for the external user-agent enrichment service.
//!
//! The service turns a raw user-agent string into structured attributes. The
//! client fails open: any transport error, non-200 status or unexpected
//! payload shape yields `None`, and the failure is only logged.

use crate::knowledge::{BotsKnowledge, EnrichmentDefaults};
use anyhow::Result;
use moka::future::Cache;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Structured attributes reported for a user-agent string.
///
/// Fields missing from the service response are filled from the
/// knowledge-base fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentResult {
    pub is_restricted: bool,
    pub is_abusive: bool,
    pub is_spam: bool,
    pub is_weird: bool,
    pub software_type: String,
    pub hardware_type: String,
    pub software: String,
}

impl EnrichmentResult {
    fn from_parse(parse: &Value, defaults: &EnrichmentDefaults) -> Self {
        let string_field = |key: &str, fallback: &str| -> String {
            parse
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string()
        };
        let bool_field = |key: &str, fallback: bool| -> bool {
            parse.get(key).and_then(Value::as_bool).unwrap_or(fallback)
        };

        Self {
            is_restricted: bool_field("is_restricted", defaults.is_restricted),
            is_abusive: bool_field("is_abusive", defaults.is_abusive),
            is_spam: bool_field("is_spam", defaults.is_spam),
            is_weird: bool_field("is_weird", defaults.is_weird),
            software_type: string_field("software_type", &defaults.software_type),
            hardware_type: string_field("hardware_type", &defaults.hardware_type),
            software: string_field("software", &defaults.software),
        }
    }
}

/// Enrichment service client with a bounded TTL response cache.
pub struct EnrichmentClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    defaults: EnrichmentDefaults,
    cache: Cache<String, EnrichmentResult>,
}

impl EnrichmentClient {
    /// Create a client from the bots knowledge-base section.
    pub fn new(kb: &BotsKnowledge) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(kb.service.timeout_seconds))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(kb.cache.max_entries)
            .time_to_live(Duration::from_secs(kb.cache.ttl_seconds))
            .build();

        Ok(Self {
            http,
            url: format!("{}/user_agent_parse", kb.service.base_url.trim_end_matches('/')),
            api_key: kb.service.api_key.clone(),
            defaults: kb.defaults.clone(),
            cache,
        })
    }

    /// Classify a user-agent string.
    ///
    /// Returns `None` when the service is unreachable, answers with a
    /// non-200 status, or the payload has no `parse` object.
    pub async fn classify(&self, user_agent: &str) -> Option<EnrichmentResult> {
        if let Some(hit) = self.cache.get(user_agent).await {
            return Some(hit);
        }

        let body = json!({ "user_agent": user_agent, "parse_options": {} });
        let response = match self
            .http
            .post(&self.url)
            .header("X-API-KEY", &self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "user-agent enrichment request failed");
                return None;
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            warn!(status = %response.status(), "user-agent enrichment returned an error status");
            return None;
        }

        let payload: Value = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "user-agent enrichment response is not JSON");
                return None;
            }
        };

        // Some deployments double-encode the payload as a JSON string.
        let payload = match payload {
            Value::String(inner) => match serde_json::from_str(&inner) {
                Ok(decoded) => decoded,
                Err(e) => {
                    warn!(error = %e, "user-agent enrichment payload is a non-JSON string");
                    return None;
                }
            },
            other => other,
        };

        let parse = match payload.get("parse") {
            Some(parse) if parse.is_object() => parse,
            _ => {
                warn!("user-agent enrichment payload has no parse object");
                return None;
            }
        };

        let result = EnrichmentResult::from_parse(parse, &self.defaults);
        debug!(
            user_agent = user_agent,
            software = %result.software,
            software_type = %result.software_type,
            "user-agent enrichment complete"
        );
        self.cache
            .insert(user_agent.to_string(), result.clone())
            .await;
        Some(result)
    }
}
