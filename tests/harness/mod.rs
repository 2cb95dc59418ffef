// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for contact-form abuse simulation.
//!
//! Provides payload corpora and outcome tallying for sweeping hostile
//! input through the validator and flooding the rate limiter.

pub mod metrics;
pub mod payloads;
