//! Parsed request input contract.
//!
//! Detectors consume a [`ParsedRequest`] read-only; producing one from the
//! wire is the embedding application's concern.

use std::collections::HashMap;

/// Read-only view of a parsed HTTP request or response.
///
/// Header keys are stored lowercase so lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct ParsedRequest {
    /// Request headers (lowercase keys)
    pub headers: HashMap<String, Vec<String>>,
    /// HTTP method
    pub method: String,
    /// Request path
    pub path: String,
    /// Raw body content
    pub body: String,
}

impl ParsedRequest {
    /// Create a request with the given method and path.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            headers: HashMap::new(),
            method: method.into(),
            path: path.into(),
            body: String::new(),
        }
    }

    /// Add a header value. The key is lowercased on insert.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.into().to_lowercase())
            .or_default()
            .push(value.into());
        self
    }

    /// Set the raw body content.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a single header value (first if multiple).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|v| v.first())
            .map(|s| s.as_str())
    }

    /// Get the User-Agent header.
    pub fn user_agent(&self) -> Option<&str> {
        self.header("user-agent")
    }

    /// Header and body content concatenated into a fresh text buffer.
    ///
    /// Content scans run over the copy so the request itself is never
    /// touched.
    pub fn flattened(&self) -> String {
        let mut text = String::new();
        for (name, values) in &self.headers {
            for value in values {
                text.push_str(name);
                text.push_str(": ");
                text.push_str(value);
                text.push('\n');
            }
        }
        text.push_str(&self.body);
        text
    }
}
