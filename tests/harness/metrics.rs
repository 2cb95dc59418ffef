// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outcome tallying for abuse-simulation sweeps.

use std::collections::HashMap;

/// Possible outcomes for a simulated submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Accepted by validation and the rate limiter
    Accepted,
    /// Rejected by the blocklist sweep
    BlockedPattern,
    /// Rejected by an ordinary field rule
    BlockedField,
    /// Rejected by the rate limiter
    RateLimited,
}

/// Collects outcomes during a sweep.
#[derive(Debug, Default)]
pub struct SweepMetrics {
    outcomes: HashMap<Outcome, usize>,
    submissions_per_client: HashMap<String, usize>,
}

impl SweepMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one submission outcome.
    pub fn record(&mut self, outcome: Outcome, client: &str) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self
            .submissions_per_client
            .entry(client.to_string())
            .or_insert(0) += 1;
    }

    pub fn total(&self) -> usize {
        self.outcomes.values().sum()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Ratio of blocked submissions to total.
    pub fn block_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (total - self.count(Outcome::Accepted)) as f64 / total as f64
    }

    pub fn unique_clients(&self) -> usize {
        self.submissions_per_client.len()
    }

    pub fn report(&self) -> SweepReport {
        SweepReport {
            total: self.total(),
            accepted: self.count(Outcome::Accepted),
            blocked_pattern: self.count(Outcome::BlockedPattern),
            blocked_field: self.count(Outcome::BlockedField),
            rate_limited: self.count(Outcome::RateLimited),
            block_rate: self.block_rate(),
            unique_clients: self.unique_clients(),
        }
    }
}

/// Summary report of a sweep.
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub total: usize,
    pub accepted: usize,
    pub blocked_pattern: usize,
    pub blocked_field: usize,
    pub rate_limited: usize,
    pub block_rate: f64,
    pub unique_clients: usize,
}

impl std::fmt::Display for SweepReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Sweep Report ===")?;
        writeln!(f, "Total:            {}", self.total)?;
        writeln!(f, "Accepted:         {}", self.accepted)?;
        writeln!(f, "Blocked (pattern):{}", self.blocked_pattern)?;
        writeln!(f, "Blocked (field):  {}", self.blocked_field)?;
        writeln!(f, "Rate limited:     {}", self.rate_limited)?;
        writeln!(f, "Block rate:       {:.1}%", self.block_rate * 100.0)?;
        writeln!(f, "Unique clients:   {}", self.unique_clients)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_outcomes() {
        let mut metrics = SweepMetrics::new();
        metrics.record(Outcome::Accepted, "10.0.0.1");
        metrics.record(Outcome::BlockedPattern, "10.0.0.1");
        metrics.record(Outcome::RateLimited, "10.0.0.2");

        assert_eq!(metrics.total(), 3);
        assert_eq!(metrics.count(Outcome::BlockedPattern), 1);
        assert_eq!(metrics.unique_clients(), 2);
        assert!((metrics.block_rate() - 2.0 / 3.0).abs() < 0.01);
    }
}
