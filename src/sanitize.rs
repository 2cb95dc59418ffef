// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Blocklist filter for free-text submission fields.
//!
//! This is a reject-only heuristic: input matching any XSS or SQL
//! injection indicator is refused outright, never cleaned or escaped.
//! Encoding obfuscation (URL-encoded payloads and the like) passes the
//! filter; downstream consumers must not treat accepted text as safe HTML.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// XSS indicator patterns, all case-insensitive.
    static ref XSS_PATTERNS: [Regex; 5] = [
        // Script tags
        Regex::new(r"(?i)<\s*script\b").unwrap(),
        // javascript: URIs
        Regex::new(r"(?i)javascript\s*:").unwrap(),
        // Inline event handler attributes (onclick=, onerror=, ...)
        Regex::new(r"(?i)\bon\w+\s*=").unwrap(),
        // Embedding tags
        Regex::new(r"(?i)<\s*(iframe|object|embed)\b").unwrap(),
        // data:text/html URIs
        Regex::new(r"(?i)data\s*:\s*text/html").unwrap(),
    ];

    /// SQL injection indicator patterns.
    static ref SQL_PATTERNS: [Regex; 3] = [
        // SQL keyword sandwiched by whitespace or string boundaries
        Regex::new(r"(?i)(^|\s)(select|insert|update|delete|drop|union|alter|create|truncate|exec)(\s|$)")
            .unwrap(),
        // Comment delimiters
        Regex::new(r"--|/\*|\*/").unwrap(),
        // Quote followed by a boolean operator (' OR '1'='1)
        Regex::new(r#"(?i)['"]\s*(or|and)\b"#).unwrap(),
    ];
}

/// Returns true if the text matches any XSS or SQL injection indicator.
pub fn contains_malicious_patterns(text: &str) -> bool {
    XSS_PATTERNS.iter().any(|pattern| pattern.is_match(text))
        || SQL_PATTERNS.iter().any(|pattern| pattern.is_match(text))
}
