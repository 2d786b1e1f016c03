//! Wire DTO for the usage-stats endpoint.

use promptforge_core::quota::UsageSnapshot;
use promptforge_core::types::Timestamp;
use serde::Serialize;
use ts_rs::TS;

/// Response for `GET /usage-stats`: the current quota snapshot plus the
/// calendar-month bounds it is scoped to.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UsageStats {
    pub used: i64,
    pub limit: i64,
    pub remaining: i64,
    pub is_pro: bool,
    pub period_start: Timestamp,
    pub period_end: Timestamp,
}

impl UsageStats {
    pub fn new(snapshot: UsageSnapshot, period_start: Timestamp, period_end: Timestamp) -> Self {
        Self {
            used: snapshot.used,
            limit: snapshot.limit,
            remaining: snapshot.remaining,
            is_pro: snapshot.is_pro,
            period_start,
            period_end,
        }
    }
}
