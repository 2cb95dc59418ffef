// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the portfolio contact/newsletter API.
//!
//! Every knob has a serde default so a partially specified config file or
//! environment still yields a runnable service.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Public base URL of the site, used to build unsubscribe links
    /// (default: https://localhost)
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Shared admin token compared against `X-NEWSLETTER-ADMIN-TOKEN`.
    /// Empty means unconfigured: every admin request is rejected.
    #[serde(default)]
    pub admin_token: String,

    /// Comma-separated CORS allow-list for browser clients
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,

    /// Contact-form rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Outbound email configuration
    #[serde(default)]
    pub email: EmailConfig,
}

/// Fixed-window rate limit parameters for the contact endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum submissions per client per window (default: 5)
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds (default: 3600)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

/// Outbound email provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Provider send endpoint (default: https://api.resend.com/emails)
    #[serde(default = "default_email_api_url")]
    pub api_url: String,

    /// Provider API token
    #[serde(default)]
    pub api_token: String,

    /// From address for every outbound message
    #[serde(default = "default_sender")]
    pub sender: String,

    /// Recipient of contact-form admin notifications
    #[serde(default = "default_admin_recipient")]
    pub admin_recipient: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_public_base_url() -> String {
    "https://localhost".to_string()
}

fn default_allowed_origins() -> String {
    "https://localhost".to_string()
}

fn default_max_requests() -> u32 {
    5
}

fn default_window_secs() -> u64 {
    3600 // one hour window
}

fn default_email_api_url() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_sender() -> String {
    "noreply@localhost".to_string()
}

fn default_admin_recipient() -> String {
    "admin@localhost".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            public_base_url: default_public_base_url(),
            admin_token: String::new(),
            allowed_origins: default_allowed_origins(),
            rate_limit: RateLimitConfig::default(),
            email: EmailConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: default_email_api_url(),
            api_token: String::new(),
            sender: default_sender(),
            admin_recipient: default_admin_recipient(),
        }
    }
}

impl RateLimitConfig {
    /// Get the window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| default_bind_addr()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| default_public_base_url()),
            admin_token: std::env::var("NEWSLETTER_ADMIN_TOKEN").unwrap_or_default(),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| default_allowed_origins()),
            rate_limit: RateLimitConfig {
                max_requests: std::env::var("CONTACT_MAX_REQUESTS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(default_max_requests),
                window_secs: std::env::var("CONTACT_WINDOW_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(default_window_secs),
            },
            email: EmailConfig {
                api_url: std::env::var("EMAIL_API_URL")
                    .unwrap_or_else(|_| default_email_api_url()),
                api_token: std::env::var("EMAIL_API_TOKEN").unwrap_or_default(),
                sender: std::env::var("EMAIL_SENDER").unwrap_or_else(|_| default_sender()),
                admin_recipient: std::env::var("CONTACT_ADMIN_RECIPIENT")
                    .unwrap_or_else(|_| default_admin_recipient()),
            },
        }
    }
}
