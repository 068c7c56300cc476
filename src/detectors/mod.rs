//! Attack detectors.
//!
//! Each detector classifies one attack class and shares the same contract:
//! path pre-processing over forbidden/legitimate lists, a sensitivity-tiered
//! decision policy, and a refreshable persistent forbidden set seeded from
//! the knowledge base.

pub mod bots;
pub mod csrf;
pub mod xss;

pub use bots::{BotsDetector, BrowsingReport};
pub use csrf::CsrfDetector;
pub use xss::XssDetector;

use crate::classification::{Classification, Sensitivity};
use crate::request::ParsedRequest;
use async_trait::async_trait;

/// Per-call additions to a detector's forbidden set and exemptions from it.
///
/// Overrides apply as a snapshot for the duration of one [`Detector::detect`]
/// call and are never written back into the persistent set; permanent changes
/// go through a detector's administrative operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides<'a> {
    /// Extra forbidden entries for this call
    pub forbidden: Option<&'a [String]>,
    /// Entries exempted from detection for this call
    pub legitimate: Option<&'a [String]>,
}

impl<'a> Overrides<'a> {
    /// No overrides; the persistent forbidden set applies as-is.
    pub fn none() -> Self {
        Self::default()
    }

    /// Extra forbidden entries for this call only.
    pub fn forbid(entries: &'a [String]) -> Self {
        Self {
            forbidden: Some(entries),
            legitimate: None,
        }
    }

    /// Entries exempted from detection for this call only.
    pub fn allow(entries: &'a [String]) -> Self {
        Self {
            forbidden: None,
            legitimate: Some(entries),
        }
    }

    pub(crate) fn legitimate_entries(&self) -> &'a [String] {
        self.legitimate.unwrap_or(&[])
    }
}

/// Common contract for all attack detectors.
#[async_trait]
pub trait Detector: Send + Sync {
    /// Classify one parsed request; `true` means the attack was detected.
    ///
    /// Never fails: malformed input counts as absence of the indicator being
    /// checked, and dependency failures resolve to `false`.
    async fn detect(
        &self,
        request: &ParsedRequest,
        sensitivity: Sensitivity,
        overrides: Overrides<'_>,
    ) -> bool;

    /// Current persistent forbidden set.
    fn forbidden_list(&self) -> Vec<String>;

    /// Reload the persistent forbidden set from the knowledge-base snapshot
    /// the detector was built with. No-op for stateless detectors.
    fn refresh(&self);

    /// Detector name, used in logs.
    fn name(&self) -> &'static str;
}

/// Effective forbidden set for a single call:
/// (persistent plus call-forbidden) minus call-legitimate.
pub(crate) fn effective_set(base: &[String], overrides: Overrides<'_>) -> Vec<String> {
    let mut set: Vec<String> = base.to_vec();
    if let Some(extra) = overrides.forbidden {
        for entry in extra {
            if !set.contains(entry) {
                set.push(entry.clone());
            }
        }
    }
    if let Some(exempt) = overrides.legitimate {
        set.retain(|entry| !exempt.contains(entry));
    }
    set
}

/// Shared pre-processing over the request path.
///
/// The path is compared slash-trimmed, by substring containment within each
/// list entry: `"login"` matches a legitimate entry `"api/login"`. A
/// legitimate match wins over a forbidden match.
pub(crate) fn pre_process(
    request: &ParsedRequest,
    forbidden: &[String],
    legitimate: &[String],
) -> Classification {
    let path = request.path.trim_matches('/');
    if legitimate.iter().any(|entry| entry.contains(path)) {
        return Classification::Clean;
    }
    if forbidden.iter().any(|entry| entry.contains(path)) {
        return Classification::Detected;
    }
    Classification::NoConclusion
}
