//! Item Normalization
//!
//! Fills the numeric fields the memory model reads. Items that have never been
//! reviewed carry no stability or ease; they get the model defaults.

use crate::types::{HanziItem, DEFAULT_EASE, DEFAULT_STABILITY_DAYS};

/// 原地补齐默认值，并返回同一个引用以便链式调用
///
/// Only absent fields are touched, so applying it twice is the same as once.
pub fn ensure_defaults(item: &mut HanziItem) -> &mut HanziItem {
    if item.stability_days.is_none() {
        item.stability_days = Some(DEFAULT_STABILITY_DAYS);
    }
    if item.ease.is_none() {
        item.ease = Some(DEFAULT_EASE);
    }
    item
}

/// Normalized copy; the input is left as is.
pub fn normalized(item: &HanziItem) -> HanziItem {
    let mut copy = item.clone();
    ensure_defaults(&mut copy);
    copy
}
