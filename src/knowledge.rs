//! Knowledge-base configuration source.
//!
//! One [`KnowledgeBase`] value is constructed at startup (from a file or from
//! defaults) and injected into each detector at construction. There is no
//! ambient global lookup; a detector's `refresh()` re-merges from the
//! snapshot it was built with.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-detector-class configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBase {
    /// CSRF detector settings
    pub csrf: CsrfKnowledge,

    /// XSS detector settings
    pub xss: XssKnowledge,

    /// Bots detector settings
    pub bots: BotsKnowledge,
}

impl KnowledgeBase {
    /// Load from a JSON or YAML file, switching on the extension.
    ///
    /// Missing keys fall back to their documented defaults; absence of
    /// configuration is never fatal.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(serde_json::from_str(&content)?)
        }
    }
}

/// CSRF detector configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CsrfKnowledge {
    /// Paths that must never be reached cross-site
    pub forbidden: Vec<String>,
}

/// XSS detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct XssKnowledge {
    /// Seed patterns (literal substrings or regexes) scanned for in header
    /// and body content
    pub forbidden: Vec<String>,
}

impl Default for XssKnowledge {
    fn default() -> Self {
        Self {
            forbidden: vec![
                r"(?i)<script".to_string(),
                r"(?i)javascript:".to_string(),
                r"(?i)<iframe".to_string(),
                r"(?i)on(error|load|click|mouseover)\s*=".to_string(),
            ],
        }
    }
}

/// Bots detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotsKnowledge {
    /// Protected paths; the same list doubles as the enrichment category set
    /// checked at the strictest sensitivity tier
    pub forbidden: Vec<String>,

    /// Software names accepted as real browsers
    pub browsers: Vec<String>,

    /// Enrichment service endpoint settings
    pub service: EnrichmentServiceConfig,

    /// Fallback values for enrichment fields absent from a response
    pub defaults: EnrichmentDefaults,

    /// Enrichment response cache settings
    pub cache: EnrichmentCacheConfig,
}

impl Default for BotsKnowledge {
    fn default() -> Self {
        Self {
            forbidden: vec![
                "crawler".to_string(),
                "robot".to_string(),
                "spambot".to_string(),
                "server".to_string(),
            ],
            browsers: vec![
                "Chrome".to_string(),
                "Firefox".to_string(),
                "Safari".to_string(),
                "Edge".to_string(),
                "Opera".to_string(),
            ],
            service: EnrichmentServiceConfig::default(),
            defaults: EnrichmentDefaults::default(),
            cache: EnrichmentCacheConfig::default(),
        }
    }
}

/// Enrichment service endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentServiceConfig {
    /// Base URL; the `/user_agent_parse` endpoint is joined onto it
    pub base_url: String,

    /// API key sent as the `X-API-KEY` header
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for EnrichmentServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9009".to_string(),
            api_key: String::new(),
            timeout_seconds: 10,
        }
    }
}

/// Per-field fallbacks applied when the enrichment response omits a field.
///
/// The boolean fallbacks default to `false` so an incomplete response leans
/// toward "not an attack".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentDefaults {
    pub is_restricted: bool,
    pub is_abusive: bool,
    pub is_spam: bool,
    pub is_weird: bool,
    pub software_type: String,
    pub hardware_type: String,
    pub software: String,
}

/// Enrichment response cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentCacheConfig {
    /// Maximum cached user-agent entries
    pub max_entries: u64,

    /// Cache TTL in seconds
    pub ttl_seconds: u64,
}

impl Default for EnrichmentCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl_seconds: 3600,
        }
    }
}
