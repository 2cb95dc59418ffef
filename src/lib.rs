// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Portfolio site contact & newsletter API
//!
//! This crate provides the dynamic backend of the portfolio site:
//!
//! - Contact form intake with blocklist sanitization and per-client
//!   fixed-window rate limiting
//! - Best-effort contact notifications (admin summary + auto-reply)
//! - Newsletter subscribe/unsubscribe with opaque per-subscriber tokens
//! - Token-gated campaign administration and the campaign send loop

pub mod config;
pub mod contact;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod mailer;
pub mod newsletter;
pub mod sanitize;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};
pub use limiter::{FixedWindowLimiter, RateLimitDecision};
pub use mailer::{HttpMailer, Mailer};
pub use store::{MemoryStore, NewsletterStore};
