//! Metric policy configuration.

use serde::{Deserialize, Serialize};

/// How trades without open/close timestamps enter hold-time statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoldTimePolicy {
    /// Count the trade with a zero-duration placeholder. This understates the
    /// average hold time when timestamps are often missing.
    #[default]
    ZeroDuration,
    /// Leave the trade out of hold-time totals and averages.
    Exclude,
}

/// Metric calculation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Hold-time treatment of trades with missing timestamps.
    #[serde(default)]
    pub hold_time_policy: HoldTimePolicy,
}
