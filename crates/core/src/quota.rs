//! Quota tiers, billing-period keys, and usage snapshot math.
//!
//! The atomic increment itself lives in the db crate (`QuotaRepo`); this
//! module owns everything derivable: limits per tier, the calendar-month
//! period key that makes resets implicit, and the snapshot arithmetic.
//! `remaining` is always recomputed here and never stored, so it cannot
//! drift from `used`.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use ts_rs::TS;

use crate::types::Timestamp;

/// Sentinel reported as `limit` and `remaining` for unlimited tiers.
pub const UNLIMITED: i64 = -1;

/// Default monthly generation cap for the free tier (config override:
/// `FREE_TIER_MONTHLY_LIMIT`).
pub const DEFAULT_FREE_MONTHLY_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// Subscription tier governing quota limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Free,
    Pro,
}

impl Tier {
    /// Parse a tier name case-insensitively. Unknown names are rejected so
    /// a misconfigured gateway cannot silently grant unlimited quota.
    pub fn parse(raw: &str) -> Option<Tier> {
        match raw.trim().to_lowercase().as_str() {
            "free" => Some(Tier::Free),
            "pro" => Some(Tier::Pro),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Pro => "pro",
        }
    }

    pub fn is_pro(&self) -> bool {
        matches!(self, Tier::Pro)
    }
}

/// Monthly generation limit for a tier. `None` means unlimited.
pub fn monthly_limit(tier: Tier, free_limit: i64) -> Option<i64> {
    match tier {
        Tier::Free => Some(free_limit),
        Tier::Pro => None,
    }
}

// ---------------------------------------------------------------------------
// Billing periods
// ---------------------------------------------------------------------------

/// Period key for quota scoping: `"YYYY-MM"` of the current calendar month.
///
/// Scoping `used` by this key is what resets quota each month -- a new month
/// simply addresses a fresh counter row, no reset job required.
pub fn period_key(now: Timestamp) -> String {
    format!("{:04}-{:02}", now.year(), now.month())
}

/// Inclusive start and exclusive end of the calendar month containing `now`.
pub fn period_bounds(now: Timestamp) -> (Timestamp, Timestamp) {
    let start = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .expect("first day of a valid month")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc();

    let (next_year, next_month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first day of a valid month")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc();

    (start, end)
}

// ---------------------------------------------------------------------------
// Usage snapshots
// ---------------------------------------------------------------------------

/// Point-in-time view of a user's quota, attached to every generation
/// response and to quota rejections (the client renders "upgrade to Pro"
/// from this).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UsageSnapshot {
    pub used: i64,
    pub limit: i64,
    pub remaining: i64,
    pub is_pro: bool,
}

impl UsageSnapshot {
    /// Build a snapshot from the raw counter value.
    ///
    /// Pro always reports the `-1` sentinel for limit and remaining
    /// regardless of `used`; free clamps remaining at zero.
    pub fn new(tier: Tier, used: i64, free_limit: i64) -> Self {
        match monthly_limit(tier, free_limit) {
            None => Self {
                used,
                limit: UNLIMITED,
                remaining: UNLIMITED,
                is_pro: true,
            },
            Some(limit) => Self {
                used,
                limit,
                remaining: (limit - used).max(0),
                is_pro: false,
            },
        }
    }
}
