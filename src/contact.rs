// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Contact form submission validation and notification content.
//!
//! Validation collects every field violation before returning so the
//! client-side form can in principle show them all; the HTTP layer
//! surfaces only the first. The blocklist sweep is the exception: the
//! first field matching a disallowed pattern short-circuits with one
//! generic error.

use crate::sanitize::contains_malicious_patterns;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 256;
const COMPANY_MAX: usize = 100;
const MESSAGE_MIN: usize = 10;
const MESSAGE_MAX: usize = 5000;

pub const DISALLOWED_PATTERNS_ERROR: &str = "Input contains disallowed patterns.";

lazy_static! {
    // Simple local@domain.tld shape; not an RFC 5322 validator.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Check the `local@domain.tld` shape shared by the contact form and the
/// newsletter subscribe endpoint.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.chars().count() <= EMAIL_MAX && EMAIL_REGEX.is_match(email)
}

/// Raw request body of `POST /api/contact`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub enquiry_type: String,
    pub company: Option<String>,
    pub message: String,
    pub meeting_scheduled: bool,
    pub meeting_date_time: Option<String>,
    pub calendly_event_id: Option<String>,
}

/// Normalized contact submission, valid by construction.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub enquiry_type: String,
    pub company: Option<String>,
    pub message: String,
    pub meeting_scheduled: bool,
    pub meeting_date_time: Option<String>,
    pub calendly_event_id: Option<String>,
}

/// Validate a raw contact request.
///
/// On success returns the normalized payload: fields trimmed, email
/// lower-cased, empty company coerced to `None`. On failure returns the
/// ordered list of human-readable violations.
pub fn validate(req: ContactRequest) -> Result<ContactSubmission, Vec<String>> {
    let mut errors = Vec::new();

    let name = req.name.trim();
    if name.chars().count() < NAME_MIN {
        errors.push(format!("Name must be at least {} characters.", NAME_MIN));
    } else if name.chars().count() > NAME_MAX {
        errors.push(format!("Name must be at most {} characters.", NAME_MAX));
    }

    let email = req.email.trim();
    if email.chars().count() > EMAIL_MAX {
        errors.push(format!("Email must be at most {} characters.", EMAIL_MAX));
    } else if !is_valid_email(email) {
        errors.push("A valid email address is required.".to_string());
    }

    let enquiry_type = req.enquiry_type.trim();
    if enquiry_type.is_empty() {
        // Selected from a closed set on the client; the server only
        // requires presence.
        errors.push("Please select an enquiry type.".to_string());
    }

    let company = req.company.as_deref().map(str::trim).unwrap_or("");
    if company.chars().count() > COMPANY_MAX {
        errors.push(format!("Company must be at most {} characters.", COMPANY_MAX));
    }

    let message = req.message.trim();
    if message.chars().count() < MESSAGE_MIN {
        errors.push(format!(
            "Message must be at least {} characters.",
            MESSAGE_MIN
        ));
    } else if message.chars().count() > MESSAGE_MAX {
        errors.push(format!("Message must be at most {} characters.", MESSAGE_MAX));
    }

    // Blocklist sweep over the raw values; first hit wins.
    let swept = [
        req.name.as_str(),
        req.email.as_str(),
        req.enquiry_type.as_str(),
        company,
        req.message.as_str(),
    ];
    if swept
        .iter()
        .any(|value| !value.is_empty() && contains_malicious_patterns(value))
    {
        errors.push(DISALLOWED_PATTERNS_ERROR.to_string());
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactSubmission {
        name: name.to_string(),
        email: email.to_lowercase(),
        enquiry_type: enquiry_type.to_string(),
        company: if company.is_empty() {
            None
        } else {
            Some(company.to_string())
        },
        message: message.to_string(),
        meeting_scheduled: req.meeting_scheduled,
        meeting_date_time: req.meeting_date_time,
        calendly_event_id: req.calendly_event_id,
    })
}

/// Escape HTML entities before interpolating user text into email bodies.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the admin-facing notification for a new enquiry.
pub fn admin_notification(submission: &ContactSubmission) -> (String, String) {
    let subject = format!("New enquiry from {}", submission.name);

    let mut html = format!(
        "<h2>New contact enquiry</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Enquiry type:</strong> {}</p>",
        escape_html(&submission.name),
        escape_html(&submission.email),
        escape_html(&submission.enquiry_type),
    );

    if let Some(company) = &submission.company {
        html.push_str(&format!(
            "<p><strong>Company:</strong> {}</p>",
            escape_html(company)
        ));
    }

    html.push_str(&format!(
        "<p><strong>Message:</strong></p><p>{}</p>",
        escape_html(&submission.message)
    ));

    if submission.meeting_scheduled {
        let when = submission
            .meeting_date_time
            .as_deref()
            .unwrap_or("time not provided");
        html.push_str(&format!(
            "<p><strong>Meeting scheduled:</strong> {}</p>",
            escape_html(when)
        ));
        if let Some(event_id) = &submission.calendly_event_id {
            html.push_str(&format!(
                "<p><strong>Calendly event:</strong> {}</p>",
                escape_html(event_id)
            ));
        }
    }

    (subject, html)
}

/// Build the auto-reply sent back to the submitter. Content branches on
/// whether a meeting was scheduled alongside the enquiry.
pub fn auto_reply(submission: &ContactSubmission) -> (String, String) {
    let subject = "Thanks for getting in touch".to_string();
    let name = escape_html(&submission.name);

    let html = if submission.meeting_scheduled {
        let when = submission
            .meeting_date_time
            .as_deref()
            .map(escape_html)
            .unwrap_or_else(|| "the scheduled time".to_string());
        format!(
            "<p>Hi {name},</p>\
             <p>Thanks for reaching out. Your meeting is confirmed for {when} \
             and a calendar invitation is on its way.</p>\
             <p>Talk soon.</p>"
        )
    } else {
        format!(
            "<p>Hi {name},</p>\
             <p>Thanks for reaching out. Your message has been received and \
             you can expect a reply within two working days.</p>"
        )
    };

    (subject, html)
}
