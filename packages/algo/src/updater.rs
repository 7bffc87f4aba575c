//! Memory Updater
//!
//! Applies one answer to an item:
//! - correct: ease grows by 0.1, stability is multiplied by `1 + 0.15 * ease`
//! - wrong: ease drops by 0.2 (floor 1.3), stability is halved (floor 0.5 days)
//!
//! The item is mutated in place so its history keeps its identity; nothing is
//! persisted here.

use crate::normalize::ensure_defaults;
use crate::types::{
    HanziItem, ReviewRecord, EASE_STEP_DOWN, EASE_STEP_UP, LAPSE_STABILITY_FACTOR, MIN_EASE,
    MIN_LAPSE_STABILITY_DAYS, STABILITY_GROWTH_PER_EASE,
};

/// 答题后更新记忆参数
pub fn update_after_answer(item: &mut HanziItem, correct: bool, now_ms: i64) -> &mut HanziItem {
    ensure_defaults(item);
    let mut ease = item.ease_factor();
    let mut stability = item.stability();

    if correct {
        ease += EASE_STEP_UP;
        stability *= 1.0 + STABILITY_GROWTH_PER_EASE * ease;
    } else {
        ease = (ease - EASE_STEP_DOWN).max(MIN_EASE);
        stability = (stability * LAPSE_STABILITY_FACTOR).max(MIN_LAPSE_STABILITY_DAYS);
    }

    item.ease = Some(ease);
    item.stability_days = Some(stability);
    item.last_ts = Some(now_ms);
    item.history.push(ReviewRecord {
        ts: now_ms,
        correct,
    });
    item
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_two_correct_answers() {
        let mut item = HanziItem::new("1_1", "日", 1);

        update_after_answer(&mut item, true, NOW);
        assert!((item.ease_factor() - 2.1).abs() < 1e-12);
        assert!((item.stability() - 1.315).abs() < 1e-12);

        update_after_answer(&mut item, true, NOW + 1000);
        assert!((item.ease_factor() - 2.2).abs() < 1e-12);
        assert!((item.stability() - 1.315 * 1.33).abs() < 1e-12);
        assert!((item.stability() - 1.74895).abs() < 1e-9);

        assert_eq!(item.history.len(), 2);
        assert_eq!(item.last_ts, Some(NOW + 1000));
    }

    #[test]
    fn test_wrong_answer_halves_stability() {
        let mut item = HanziItem::new("1_1", "日", 1);
        item.stability_days = Some(4.0);
        item.ease = Some(2.5);

        update_after_answer(&mut item, false, NOW);
        assert!((item.ease_factor() - 2.3).abs() < 1e-12);
        assert_eq!(item.stability(), 2.0);
        assert_eq!(
            item.history.last(),
            Some(&ReviewRecord {
                ts: NOW,
                correct: false
            })
        );
    }

    #[test]
    fn test_wrong_answer_floors() {
        let mut item = HanziItem::new("1_1", "日", 1);
        item.stability_days = Some(0.6);
        item.ease = Some(1.4);

        update_after_answer(&mut item, false, NOW);
        assert_eq!(item.ease_factor(), MIN_EASE);
        assert_eq!(item.stability(), MIN_LAPSE_STABILITY_DAYS);

        update_after_answer(&mut item, false, NOW + 1);
        assert_eq!(item.ease_factor(), MIN_EASE);
        assert_eq!(item.stability(), MIN_LAPSE_STABILITY_DAYS);
    }

    #[test]
    fn test_wrong_answer_repairs_corrupted_stability() {
        let mut item = HanziItem::new("1_1", "日", 1);
        item.stability_days = Some(0.01);

        update_after_answer(&mut item, false, NOW);
        assert_eq!(item.stability(), MIN_LAPSE_STABILITY_DAYS);
    }

    #[test]
    fn test_lesson_and_id_untouched() {
        let mut item = HanziItem::new("3_7", "月", 3);
        update_after_answer(&mut item, true, NOW);
        update_after_answer(&mut item, false, NOW + 5);
        assert_eq!(item.lesson, 3);
        assert_eq!(item.id, "3_7");
        assert_eq!(item.character, "月");
    }

    #[test]
    fn test_returns_same_item() {
        let mut item = HanziItem::new("1_1", "日", 1);
        let history_len = update_after_answer(&mut item, true, NOW).history.len();
        assert_eq!(history_len, 1);
    }
}
