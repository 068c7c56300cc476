//! Shared classification vocabulary for all detectors.

use serde::{Deserialize, Serialize};

/// Strictness tier controlling how aggressively a detector flags ambiguous
/// signals.
///
/// Tiers are ordered: each tier only adds detection conditions on top of the
/// previous one, so anything flagged at `Regular` is also flagged at
/// `Sensitive` and `VerySensitive`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Sensitivity {
    /// Flag only unambiguous signals.
    #[default]
    Regular,
    /// Additionally flag signals that are merely suspicious.
    Sensitive,
    /// Flag everything that is not positively known to be benign.
    VerySensitive,
}

impl Sensitivity {
    /// Returns the tier as a string for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sensitivity::Regular => "regular",
            Sensitivity::Sensitive => "sensitive",
            Sensitivity::VerySensitive => "very_sensitive",
        }
    }
}

/// Outcome of a detector's pre-processing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Definitely not an attack; the main algorithm is skipped.
    Clean,
    /// Definitely an attack; the main algorithm is skipped.
    Detected,
    /// No determination; the detector's main algorithm decides.
    NoConclusion,
}
