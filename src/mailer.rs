// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outbound email dispatch.
//!
//! All email leaves through the [`Mailer`] trait so the contact
//! notifications and the campaign loop can be exercised against test
//! doubles. The production implementation posts to an HTTP provider API.
//! Delivery is at-most-once and best-effort: no retry, no outbox.

use crate::config::EmailConfig;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::debug;

/// A sink for outbound email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message. Errors are for the caller to log or tally.
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()>;
}

/// Email provider client speaking the common JSON send API.
pub struct HttpMailer {
    config: EmailConfig,
    client: reqwest::Client,
}

impl HttpMailer {
    /// Create a new mailer from provider settings.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_token)
            .json(&serde_json::json!({
                "from": self.config.sender,
                "to": to,
                "subject": subject,
                "html": html,
            }))
            .send()
            .await?;

        if response.status().is_success() {
            debug!(%to, %subject, "Email accepted by provider");
            Ok(())
        } else {
            Err(anyhow!("Email provider error: {}", response.status()))
        }
    }
}
