//! Request-level attack classification for web traffic.
//!
//! Classifies parsed HTTP requests/responses as malicious or benign through
//! a family of detectors sharing one contract: path pre-processing over
//! forbidden/legitimate lists, a sensitivity-tiered decision policy, and a
//! refreshable forbidden set seeded from a knowledge base.
//!
//! # Detectors
//!
//! - **CSRF**: header- and method-based cross-site state check
//! - **XSS**: pattern scan over header and body content
//! - **Bots**: User-Agent classification through an external enrichment service
//!
//! # Example
//!
//! ```ignore
//! use webshield::{CsrfDetector, Detector, KnowledgeBase, Overrides, ParsedRequest, Sensitivity};
//!
//! let kb = KnowledgeBase::from_file("knowledge.yaml")?;
//! let detector = CsrfDetector::new(&kb);
//!
//! let request = ParsedRequest::new("POST", "/transfer")
//!     .with_header("Sec-Fetch-Site", "cross-site");
//! let detected = detector
//!     .detect(&request, Sensitivity::Regular, Overrides::none())
//!     .await;
//! ```

pub mod classification;
pub mod detectors;
pub mod enrichment;
pub mod knowledge;
pub mod request;

pub use classification::{Classification, Sensitivity};
pub use detectors::{BotsDetector, BrowsingReport, CsrfDetector, Detector, Overrides, XssDetector};
pub use enrichment::{EnrichmentClient, EnrichmentResult};
pub use knowledge::KnowledgeBase;
pub use request::ParsedRequest;
