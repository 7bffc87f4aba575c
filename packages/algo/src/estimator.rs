//! Forgetting Estimator
//!
//! Single-parameter exponential forgetting curve:
//!
//! ```text
//! P_forget = 1 - exp(-t / S)
//! ```
//!
//! where `t` is the number of days since the last answer and `S` the item's
//! stability. An item that was never answered is treated as learned one day
//! before `now`.

use crate::types::{HanziItem, MIN_READ_STABILITY_DAYS, MS_PER_DAY};

/// Days from `from_ms` to `to_ms`, floored at 0
pub fn days_between(from_ms: i64, to_ms: i64) -> f64 {
    ((to_ms as f64 - from_ms as f64) / MS_PER_DAY).max(0.0)
}

/// 遗忘概率，取值 [0, 1)
pub fn forgetting_prob(item: &HanziItem, now_ms: i64) -> f64 {
    let last = item
        .last_ts
        .unwrap_or_else(|| now_ms.saturating_sub(MS_PER_DAY as i64));
    let t = days_between(last, now_ms);
    let s = item.stability().max(MIN_READ_STABILITY_DAYS);
    let retention = (-t / s).exp();
    1.0 - retention
}
