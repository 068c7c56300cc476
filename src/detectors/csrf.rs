//! Cross-site request forgery detector.
//!
//! Flags cross-site requests that try to change server state, using the
//! `Sec-Fetch-Site` header and a sensitivity policy over the HTTP method.

use super::{effective_set, pre_process, Detector, Overrides};
use crate::classification::{Classification, Sensitivity};
use crate::knowledge::KnowledgeBase;
use crate::request::ParsedRequest;
use async_trait::async_trait;
use tracing::debug;

/// CSRF detector. Stateless: purely local, no external calls.
pub struct CsrfDetector {
    forbidden: Vec<String>,
}

impl CsrfDetector {
    /// Create a detector seeded from the knowledge base.
    pub fn new(kb: &KnowledgeBase) -> Self {
        Self {
            forbidden: kb.csrf.forbidden.clone(),
        }
    }
}

#[async_trait]
impl Detector for CsrfDetector {
    async fn detect(
        &self,
        request: &ParsedRequest,
        sensitivity: Sensitivity,
        overrides: Overrides<'_>,
    ) -> bool {
        let forbidden = effective_set(&self.forbidden, overrides);
        match pre_process(request, &forbidden, overrides.legitimate_entries()) {
            Classification::Detected => return true,
            Classification::Clean => return false,
            Classification::NoConclusion => {}
        }

        // Sec-Fetch-Site is written by the browser; non-browser clients can
        // forge it, so same-origin is taken at face value only.
        if request.header("sec-fetch-site") == Some("same-origin") {
            return false;
        }

        let method = request.method.to_ascii_uppercase();
        let detected = match sensitivity {
            Sensitivity::Regular => matches!(method.as_str(), "POST" | "DELETE" | "PUT"),
            Sensitivity::Sensitive => method != "GET",
            Sensitivity::VerySensitive => true,
        };

        if detected {
            debug!(
                method = %method,
                path = %request.path,
                sensitivity = sensitivity.as_str(),
                "cross-site state change flagged"
            );
        }
        detected
    }

    fn forbidden_list(&self) -> Vec<String> {
        self.forbidden.clone()
    }

    fn refresh(&self) {}

    fn name(&self) -> &'static str {
        "csrf_detector"
    }
}
