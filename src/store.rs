// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Subscriber and campaign storage seam.
//!
//! The HTTP layer and the send loop only ever see the [`NewsletterStore`]
//! trait; the backing store is an external collaborator. The in-memory
//! implementation here is the default wiring and the test substrate.

use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Newsletter subscriber row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: String,
    /// Opaque token used to build the unsubscribe URL.
    pub unsubscribe_token: String,
    pub is_subscribed: bool,
    pub subscribed_at: DateTime<Utc>,
}

/// Lifecycle status of a campaign. Transitions are monotonic:
/// `draft -> sending -> sent`. There is no partial-failure status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Sending,
    Sent,
}

/// Newsletter campaign row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub slug: String,
    pub subject: String,
    pub html: String,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

/// Query interface over the subscriber/campaign store.
#[async_trait]
pub trait NewsletterStore: Send + Sync {
    /// Subscribe an address. Re-subscribing an unsubscribed address
    /// reactivates it without rotating its token.
    async fn upsert_subscriber(&self, email: &str) -> Result<Subscriber>;

    /// Deactivate the subscriber owning `token`.
    async fn unsubscribe(&self, token: &str) -> Result<()>;

    /// Most recently subscribed first, at most `limit` rows.
    async fn recent_subscribers(&self, limit: usize) -> Result<Vec<Subscriber>>;

    /// All subscribers with `is_subscribed = true`, in insertion order.
    async fn active_subscribers(&self) -> Result<Vec<Subscriber>>;

    /// Create a campaign in `draft` status.
    async fn create_campaign(&self, slug: &str, subject: &str, html: &str) -> Result<Campaign>;

    /// All campaigns, newest first.
    async fn list_campaigns(&self) -> Result<Vec<Campaign>>;

    async fn get_campaign(&self, id: Uuid) -> Result<Option<Campaign>>;

    /// Atomically transition `draft -> sending`, rejecting campaigns that
    /// are absent, already sent, or mid-send. The check and the write
    /// share one critical section so two concurrent send requests cannot
    /// both pass.
    async fn claim_for_sending(&self, id: Uuid) -> Result<Campaign>;

    /// Transition `sending -> sent`, stamping `sent_at`.
    async fn mark_sent(&self, id: Uuid, at: DateTime<Utc>) -> Result<()>;
}

#[derive(Default)]
struct MemoryInner {
    subscribers: Vec<Subscriber>,
    campaigns: Vec<Campaign>,
}

/// In-memory store over `RwLock`-guarded rows.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsletterStore for MemoryStore {
    async fn upsert_subscriber(&self, email: &str) -> Result<Subscriber> {
        let email = email.trim().to_lowercase();
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.subscribers.iter_mut().find(|s| s.email == email) {
            existing.is_subscribed = true;
            return Ok(existing.clone());
        }

        let subscriber = Subscriber {
            email,
            unsubscribe_token: Uuid::new_v4().simple().to_string(),
            is_subscribed: true,
            subscribed_at: Utc::now(),
        };
        inner.subscribers.push(subscriber.clone());
        Ok(subscriber)
    }

    async fn unsubscribe(&self, token: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        match inner
            .subscribers
            .iter_mut()
            .find(|s| s.unsubscribe_token == token)
        {
            Some(subscriber) => {
                subscriber.is_subscribed = false;
                Ok(())
            }
            None => Err(AppError::UnknownUnsubscribeToken),
        }
    }

    async fn recent_subscribers(&self, limit: usize) -> Result<Vec<Subscriber>> {
        let inner = self.inner.read().await;
        Ok(inner
            .subscribers
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn active_subscribers(&self) -> Result<Vec<Subscriber>> {
        let inner = self.inner.read().await;
        Ok(inner
            .subscribers
            .iter()
            .filter(|s| s.is_subscribed)
            .cloned()
            .collect())
    }

    async fn create_campaign(&self, slug: &str, subject: &str, html: &str) -> Result<Campaign> {
        let campaign = Campaign {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
            status: CampaignStatus::Draft,
            created_at: Utc::now(),
            sent_at: None,
        };
        let mut inner = self.inner.write().await;
        inner.campaigns.push(campaign.clone());
        Ok(campaign)
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let inner = self.inner.read().await;
        Ok(inner.campaigns.iter().rev().cloned().collect())
    }

    async fn get_campaign(&self, id: Uuid) -> Result<Option<Campaign>> {
        let inner = self.inner.read().await;
        Ok(inner.campaigns.iter().find(|c| c.id == id).cloned())
    }

    async fn claim_for_sending(&self, id: Uuid) -> Result<Campaign> {
        let mut inner = self.inner.write().await;
        let campaign = inner
            .campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::CampaignNotFound)?;

        match campaign.status {
            CampaignStatus::Sent => Err(AppError::CampaignAlreadySent),
            CampaignStatus::Sending => Err(AppError::SendInProgress),
            CampaignStatus::Draft => {
                campaign.status = CampaignStatus::Sending;
                Ok(campaign.clone())
            }
        }
    }

    async fn mark_sent(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        let mut inner = self.inner.write().await;
        let campaign = inner
            .campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::CampaignNotFound)?;

        campaign.status = CampaignStatus::Sent;
        campaign.sent_at = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resubscribe_reactivates_without_rotating_token() {
        let store = MemoryStore::new();
        let first = store.upsert_subscriber("a@example.com").await.unwrap();
        store.unsubscribe(&first.unsubscribe_token).await.unwrap();

        assert!(store.active_subscribers().await.unwrap().is_empty());

        let again = store.upsert_subscriber("A@Example.com ").await.unwrap();
        assert_eq!(again.unsubscribe_token, first.unsubscribe_token);
        assert_eq!(store.active_subscribers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_token_is_an_error() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.unsubscribe("nope").await,
            Err(AppError::UnknownUnsubscribeToken)
        ));
    }

    #[tokio::test]
    async fn recent_subscribers_is_newest_first_and_capped() {
        let store = MemoryStore::new();
        for i in 0..4 {
            store
                .upsert_subscriber(&format!("s{i}@example.com"))
                .await
                .unwrap();
        }

        let recent = store.recent_subscribers(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].email, "s3@example.com");
        assert_eq!(recent[1].email, "s2@example.com");
    }

    #[tokio::test]
    async fn campaigns_list_newest_first() {
        let store = MemoryStore::new();
        store.create_campaign("one", "One", "<p>1</p>").await.unwrap();
        store.create_campaign("two", "Two", "<p>2</p>").await.unwrap();

        let campaigns = store.list_campaigns().await.unwrap();
        assert_eq!(campaigns[0].slug, "two");
        assert_eq!(campaigns[1].slug, "one");
        assert!(campaigns
            .iter()
            .all(|c| c.status == CampaignStatus::Draft && c.sent_at.is_none()));
    }

    #[tokio::test]
    async fn claim_rejects_sent_and_in_progress() {
        let store = MemoryStore::new();
        let campaign = store.create_campaign("c", "C", "<p>c</p>").await.unwrap();

        let claimed = store.claim_for_sending(campaign.id).await.unwrap();
        assert_eq!(claimed.status, CampaignStatus::Sending);

        assert!(matches!(
            store.claim_for_sending(campaign.id).await,
            Err(AppError::SendInProgress)
        ));

        store.mark_sent(campaign.id, Utc::now()).await.unwrap();
        assert!(matches!(
            store.claim_for_sending(campaign.id).await,
            Err(AppError::CampaignAlreadySent)
        ));
    }

    #[tokio::test]
    async fn claim_of_missing_campaign_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.claim_for_sending(Uuid::new_v4()).await,
            Err(AppError::CampaignNotFound)
        ));
    }
}
