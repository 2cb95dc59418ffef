// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Newsletter campaign send loop.
//!
//! Recipients are processed sequentially in store order. One recipient's
//! failure never aborts the batch; failures are tallied and the campaign
//! still ends `sent`. There is no retry, no per-send timeout, and no
//! concurrency toward the provider.

use crate::error::Result;
use crate::mailer::Mailer;
use crate::store::NewsletterStore;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

/// Outcome of a campaign send.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReport {
    pub success: bool,
    pub sent_count: u32,
    pub fail_count: u32,
    pub total: u32,
}

/// Build the personalized unsubscribe URL for a subscriber token.
pub fn unsubscribe_url(base_url: &str, token: &str) -> String {
    match Url::parse(base_url) {
        Ok(mut url) => {
            url.set_path("/api/newsletter/unsubscribe");
            url.set_query(Some(&format!("token={token}")));
            url.to_string()
        }
        Err(_) => format!("{base_url}/api/newsletter/unsubscribe?token={token}"),
    }
}

/// Append the fixed unsubscribe footer to the campaign HTML.
pub fn with_unsubscribe_footer(html: &str, base_url: &str, token: &str) -> String {
    let link = unsubscribe_url(base_url, token);
    format!(
        "{html}\
         <hr style=\"margin-top:32px;border:none;border-top:1px solid #ddd\">\
         <p style=\"font-size:12px;color:#888\">\
         You are receiving this email because you subscribed to the newsletter. \
         <a href=\"{link}\">Unsubscribe</a></p>"
    )
}

/// Send a campaign to every active subscriber.
///
/// The campaign is claimed (`draft -> sending`) before any email leaves,
/// and marked `sent` once the loop completes, partial failures included.
pub async fn send_campaign(
    store: &dyn NewsletterStore,
    mailer: &dyn Mailer,
    base_url: &str,
    campaign_id: Uuid,
) -> Result<SendReport> {
    let campaign = store.claim_for_sending(campaign_id).await?;
    info!(campaign_id = %campaign.id, slug = %campaign.slug, "Campaign send started");

    let subscribers = store.active_subscribers().await?;
    let total = subscribers.len() as u32;

    let mut sent_count = 0u32;
    let mut fail_count = 0u32;

    for subscriber in &subscribers {
        let html = with_unsubscribe_footer(&campaign.html, base_url, &subscriber.unsubscribe_token);
        match mailer.send(&subscriber.email, &campaign.subject, &html).await {
            Ok(()) => sent_count += 1,
            Err(err) => {
                warn!(campaign_id = %campaign.id, to = %subscriber.email, error = %err, "Campaign send failed for recipient");
                fail_count += 1;
            }
        }
    }

    store.mark_sent(campaign_id, Utc::now()).await?;
    info!(
        campaign_id = %campaign.id,
        sent_count,
        fail_count,
        total,
        "Campaign send finished"
    );

    Ok(SendReport {
        success: true,
        sent_count,
        fail_count,
        total,
    })
}
