//! Automated-traffic detector.
//!
//! There is no absolute way to tell an automated client from a person; this
//! detector catches the sloppy ones through the User-Agent header, enriched
//! by an external classification service and fused with the sensitivity
//! tiers.

use super::{effective_set, pre_process, Detector, Overrides};
use crate::classification::{Classification, Sensitivity};
use crate::enrichment::{EnrichmentClient, EnrichmentResult};
use crate::knowledge::KnowledgeBase;
use crate::request::ParsedRequest;
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

/// Human-readable outcome of a "check this site" inspection.
///
/// Produced by [`BotsDetector::inspect`], a call path distinct from the
/// per-request detection loop.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BrowsingReport {
    /// Whether any signal fired
    pub detected: bool,
    /// One alert string per triggered signal
    pub alerts: Vec<String>,
}

/// Bots detector backed by the user-agent enrichment service.
pub struct BotsDetector {
    forbidden: Vec<String>,
    browsers: Vec<String>,
    enrichment: EnrichmentClient,
}

impl BotsDetector {
    /// Create a detector seeded from the knowledge base.
    ///
    /// Fails only if the enrichment HTTP client cannot be built.
    pub fn new(kb: &KnowledgeBase) -> Result<Self> {
        Ok(Self {
            forbidden: kb.bots.forbidden.clone(),
            browsers: kb.bots.browsers.clone(),
            enrichment: EnrichmentClient::new(&kb.bots)?,
        })
    }

    /// Apply the sensitivity tiers to an enrichment profile, short-circuiting
    /// as soon as a tier is satisfied. Each tier only adds conditions to the
    /// previous one.
    fn tier_verdict(
        &self,
        profile: &EnrichmentResult,
        sensitivity: Sensitivity,
        forbidden: &[String],
    ) -> bool {
        if profile.is_restricted || profile.is_abusive {
            return true;
        }
        if sensitivity == Sensitivity::Regular {
            return false;
        }
        if profile.is_spam || profile.is_weird {
            return true;
        }
        if sensitivity == Sensitivity::Sensitive {
            return false;
        }
        if forbidden.iter().any(|category| category == &profile.software_type) {
            return true;
        }
        if forbidden.iter().any(|category| category == &profile.hardware_type) {
            return true;
        }
        !self.is_known_browser(&profile.software)
    }

    fn is_known_browser(&self, software: &str) -> bool {
        let software = software.to_lowercase();
        self.browsers
            .iter()
            .any(|browser| software.contains(&browser.to_lowercase()))
    }

    /// Classify the request's user agent and explain every signal that fired.
    ///
    /// Enrichment unavailability yields an empty report (fail open).
    pub async fn inspect(&self, request: &ParsedRequest) -> BrowsingReport {
        let user_agent = match request.user_agent() {
            Some(user_agent) => user_agent,
            None => {
                return BrowsingReport {
                    detected: true,
                    alerts: vec![
                        "No User-Agent header is present; automated clients commonly omit it."
                            .to_string(),
                    ],
                }
            }
        };

        let profile = match self.enrichment.classify(user_agent).await {
            Some(profile) => profile,
            None => return BrowsingReport::default(),
        };

        let mut alerts = Vec::new();
        if profile.is_restricted {
            alerts.push("The user agent is classified as restricted.".to_string());
        }
        if profile.is_abusive {
            alerts.push("The user agent has a record of abusive traffic.".to_string());
        }
        if profile.is_spam {
            alerts.push("The user agent is associated with spam activity.".to_string());
        }
        if profile.is_weird {
            alerts.push("The user agent looks unusual or malformed.".to_string());
        }
        if self.forbidden.contains(&profile.software_type) {
            alerts.push(format!(
                "The software category \"{}\" is not allowed.",
                profile.software_type
            ));
        }
        if self.forbidden.contains(&profile.hardware_type) {
            alerts.push(format!(
                "The hardware category \"{}\" is not allowed.",
                profile.hardware_type
            ));
        }
        if !self.is_known_browser(&profile.software) {
            alerts.push(format!(
                "The software \"{}\" does not match any known browser.",
                profile.software
            ));
        }

        BrowsingReport {
            detected: !alerts.is_empty(),
            alerts,
        }
    }
}

#[async_trait]
impl Detector for BotsDetector {
    async fn detect(
        &self,
        request: &ParsedRequest,
        sensitivity: Sensitivity,
        overrides: Overrides<'_>,
    ) -> bool {
        let forbidden = effective_set(&self.forbidden, overrides);
        // Only a legitimate path exempts outright; a protected-path hit still
        // goes through user-agent analysis.
        let pre = pre_process(request, &forbidden, overrides.legitimate_entries());
        if pre == Classification::Clean {
            return false;
        }

        let user_agent = match request.user_agent() {
            Some(user_agent) => user_agent,
            None => {
                debug!(path = %request.path, "request without User-Agent header flagged as automated");
                return true;
            }
        };

        let profile = match self.enrichment.classify(user_agent).await {
            Some(profile) => profile,
            // enrichment unavailable: fail open
            None => return false,
        };

        let detected = self.tier_verdict(&profile, sensitivity, &forbidden);
        if detected {
            debug!(
                user_agent = user_agent,
                software = %profile.software,
                sensitivity = sensitivity.as_str(),
                "automated client flagged"
            );
        }
        detected
    }

    fn forbidden_list(&self) -> Vec<String> {
        self.forbidden.clone()
    }

    fn refresh(&self) {}

    fn name(&self) -> &'static str {
        "bots_detector"
    }
}
