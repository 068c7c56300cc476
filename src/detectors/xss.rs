//! Cross-site scripting detector.
//!
//! Scans header and body content against a mutable set of forbidden
//! patterns loaded from the knowledge base and refreshable at runtime.

use super::{pre_process, Detector, Overrides};
use crate::classification::{Classification, Sensitivity};
use crate::knowledge::KnowledgeBase;
use crate::request::ParsedRequest;
use async_trait::async_trait;
use regex::Regex;
use std::sync::RwLock;
use tracing::debug;

/// One forbidden pattern. Sources that fail to compile stay listed but never
/// match; bad patterns are a data-quality issue, not a detector fault.
struct PatternEntry {
    source: String,
    regex: Option<Regex>,
}

impl PatternEntry {
    fn compile(source: String) -> Self {
        let regex = match Regex::new(&source) {
            Ok(regex) => Some(regex),
            Err(e) => {
                debug!(pattern = %source, error = %e, "forbidden pattern does not compile, skipping");
                None
            }
        };
        Self { source, regex }
    }
}

/// XSS detector with a lock-guarded persistent pattern set.
///
/// `detect` only reads the set; permanent changes go through
/// [`XssDetector::add_forbidden`], [`XssDetector::remove_forbidden`] and
/// `refresh`, so one instance can be shared across request handlers.
pub struct XssDetector {
    seed: Vec<String>,
    patterns: RwLock<Vec<PatternEntry>>,
}

impl XssDetector {
    /// Create a detector seeded from the knowledge base.
    pub fn new(kb: &KnowledgeBase) -> Self {
        let detector = Self {
            seed: kb.xss.forbidden.clone(),
            patterns: RwLock::new(Vec::new()),
        };
        detector.refresh();
        detector
    }

    /// Permanently add patterns to the persistent forbidden set.
    pub fn add_forbidden(&self, patterns: &[String]) {
        if let Ok(mut entries) = self.patterns.write() {
            for source in patterns {
                if !entries.iter().any(|entry| &entry.source == source) {
                    entries.push(PatternEntry::compile(source.clone()));
                }
            }
        }
    }

    /// Permanently remove patterns from the persistent forbidden set.
    pub fn remove_forbidden(&self, patterns: &[String]) {
        if let Ok(mut entries) = self.patterns.write() {
            entries.retain(|entry| !patterns.contains(&entry.source));
        }
    }
}

#[async_trait]
impl Detector for XssDetector {
    async fn detect(
        &self,
        request: &ParsedRequest,
        _sensitivity: Sensitivity,
        overrides: Overrides<'_>,
    ) -> bool {
        let entries = match self.patterns.read() {
            Ok(entries) => entries,
            Err(_) => return false,
        };

        // Per-call snapshot: the persistent set is never written back here.
        let exempt = overrides.legitimate_entries();
        let extra: Vec<PatternEntry> = overrides
            .forbidden
            .unwrap_or(&[])
            .iter()
            .filter(|source| !entries.iter().any(|entry| entry.source == **source))
            .map(|source| PatternEntry::compile(source.clone()))
            .collect();
        let effective: Vec<&PatternEntry> = entries
            .iter()
            .chain(extra.iter())
            .filter(|entry| !exempt.contains(&entry.source))
            .collect();

        // The forbidden entries here are content patterns, not paths, so
        // pre-processing is restricted to the legitimate-path exemption.
        if pre_process(request, &[], exempt) == Classification::Clean {
            return false;
        }

        let text = request.flattened();
        for entry in &effective {
            let Some(regex) = entry.regex.as_ref() else {
                continue;
            };
            if regex.is_match(&text) {
                debug!(
                    pattern = %entry.source,
                    path = %request.path,
                    "forbidden pattern matched request content"
                );
                return true;
            }
        }
        false
    }

    fn forbidden_list(&self) -> Vec<String> {
        self.patterns
            .read()
            .map(|entries| entries.iter().map(|entry| entry.source.clone()).collect())
            .unwrap_or_default()
    }

    /// Union the knowledge-base seed back into the persistent set.
    fn refresh(&self) {
        self.add_forbidden(&self.seed);
    }

    fn name(&self) -> &'static str {
        "xss_detector"
    }
}
