// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact and newsletter endpoints.
//!
//! All domain errors are recovered here and rendered as the JSON error
//! envelope; only the first validation error is surfaced to the caller.

use crate::config::Config;
use crate::contact::{self, ContactRequest};
use crate::error::{AppError, Result};
use crate::limiter::{FixedWindowLimiter, RateLimitDecision};
use crate::mailer::Mailer;
use crate::newsletter::{self, SendReport};
use crate::sanitize::contains_malicious_patterns;
use crate::store::{Campaign, NewsletterStore, Subscriber};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Cap on the admin subscriber listing.
const SUBSCRIBER_PAGE_LIMIT: usize = 500;

const ADMIN_TOKEN_HEADER: &str = "x-newsletter-admin-token";

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub limiter: FixedWindowLimiter,
    pub store: Arc<dyn NewsletterStore>,
    pub mailer: Arc<dyn Mailer>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct SubscribersResponse {
    pub subscribers: Vec<Subscriber>,
}

#[derive(Debug, Serialize)]
pub struct CampaignsResponse {
    pub campaigns: Vec<Campaign>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsubscribeParams {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCampaignRequest {
    pub slug: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SendCampaignRequest {
    pub campaign_id: String,
}

/// Derive the rate-limit bucket key from proxy headers. Requests lacking
/// both headers share the `"unknown"` bucket.
pub fn client_id(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    "unknown".to_string()
}

/// Compare the admin header against the configured token. An empty
/// configured token means unconfigured: everything is rejected.
pub fn require_admin(config: &Config, headers: &HeaderMap) -> Result<()> {
    if config.admin_token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    match headers.get(ADMIN_TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        Some(token) if token == config.admin_token => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "portfolio-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /api/contact`
///
/// Validates the submission, then dispatches the admin notification and
/// the auto-reply fire-and-forget: once validation passes the client
/// always sees success, even if notification dispatch fails.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ContactRequest>,
) -> Result<Json<SuccessResponse>> {
    let client = client_id(&headers);

    if let RateLimitDecision::Limited { retry_after } = state.limiter.check(&client).await {
        return Err(AppError::RateLimited { retry_after });
    }

    let submission = contact::validate(request).map_err(|errors| {
        // Only the first violation reaches the caller.
        AppError::Validation(errors.into_iter().next().unwrap_or_default())
    })?;

    info!(
        client = %client,
        email = %submission.email,
        enquiry_type = %submission.enquiry_type,
        meeting_scheduled = submission.meeting_scheduled,
        "Contact submission accepted"
    );

    let mailer = state.mailer.clone();
    let admin_recipient = state.config.email.admin_recipient.clone();
    tokio::spawn(async move {
        let (subject, html) = contact::admin_notification(&submission);
        if let Err(err) = mailer.send(&admin_recipient, &subject, &html).await {
            warn!(error = %err, "Admin notification dispatch failed");
        }

        let (subject, html) = contact::auto_reply(&submission);
        if let Err(err) = mailer.send(&submission.email, &subject, &html).await {
            warn!(error = %err, to = %submission.email, "Auto-reply dispatch failed");
        }
    });

    Ok(Json(SuccessResponse { success: true }))
}

/// `POST /api/newsletter/subscribe`
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<SuccessResponse>> {
    let email = request.email.trim();
    if !contact::is_valid_email(email) || contains_malicious_patterns(email) {
        return Err(AppError::Validation(
            "A valid email address is required.".to_string(),
        ));
    }

    let subscriber = state.store.upsert_subscriber(email).await?;
    info!(email = %subscriber.email, "Newsletter subscription");
    Ok(Json(SuccessResponse { success: true }))
}

/// `GET /api/newsletter/unsubscribe?token=...`
///
/// Linked from every campaign footer, so this lands in a browser rather
/// than an API client and answers with a minimal HTML page.
pub async fn unsubscribe(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UnsubscribeParams>,
) -> Result<Html<&'static str>> {
    state.store.unsubscribe(&params.token).await?;
    info!("Newsletter unsubscribe");
    Ok(Html(
        "<html><body><p>You have been unsubscribed. You will not receive \
         further newsletters.</p></body></html>",
    ))
}

/// `GET /api/newsletter/subscribers` (admin)
pub async fn list_subscribers(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SubscribersResponse>> {
    require_admin(&state.config, &headers)?;

    let subscribers = state.store.recent_subscribers(SUBSCRIBER_PAGE_LIMIT).await?;
    Ok(Json(SubscribersResponse { subscribers }))
}

/// `GET /api/newsletter/campaigns` (admin)
pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<CampaignsResponse>> {
    require_admin(&state.config, &headers)?;

    let campaigns = state.store.list_campaigns().await?;
    Ok(Json(CampaignsResponse { campaigns }))
}

/// `POST /api/newsletter/campaigns` (admin)
pub async fn create_campaign(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<Json<Campaign>> {
    require_admin(&state.config, &headers)?;

    let slug = request.slug.trim();
    let subject = request.subject.trim();
    let html = request.html.trim();
    if slug.is_empty() {
        return Err(AppError::Validation("Slug is required.".to_string()));
    }
    if subject.is_empty() {
        return Err(AppError::Validation("Subject is required.".to_string()));
    }
    if html.is_empty() {
        return Err(AppError::Validation("Body HTML is required.".to_string()));
    }

    let campaign = state.store.create_campaign(slug, subject, html).await?;
    info!(campaign_id = %campaign.id, slug = %campaign.slug, "Campaign created");
    Ok(Json(campaign))
}

/// `POST /api/newsletter/send` (admin)
pub async fn send_campaign(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<SendCampaignRequest>,
) -> Result<Json<SendReport>> {
    require_admin(&state.config, &headers)?;

    let campaign_id = Uuid::parse_str(request.campaign_id.trim())
        .map_err(|_| AppError::Validation("A valid campaign id is required.".to_string()))?;

    let report = newsletter::send_campaign(
        state.store.as_ref(),
        state.mailer.as_ref(),
        &state.config.public_base_url,
        campaign_id,
    )
    .await?;

    Ok(Json(report))
}
