//! Property-Based Tests for the review scheduler
//!
//! Invariants covered:
//! - Forgetting probability stays in [0, 1), is 0 right after an answer and
//!   grows with elapsed time
//! - Normalization is idempotent
//! - Correct answers grow ease and stability; wrong answers respect the floors
//! - Sessions are capped, duplicate-free and start with the current lesson

use std::collections::HashSet;

use proptest::prelude::*;

use hanzi_algo::{
    ensure_defaults, forgetting_prob, normalized, select_for_session, update_after_answer,
    HanziItem, MAX_TOTAL_QUESTIONS, MIN_EASE, MIN_LAPSE_STABILITY_DAYS,
};

const NOW: i64 = 1_700_000_000_000;
const DAY: i64 = 86_400_000;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_item(lesson_max: u32) -> impl Strategy<Value = HanziItem> {
    (
        1u32..=lesson_max,
        0usize..40,
        proptest::option::of(0i64..=(30 * DAY)),
        proptest::option::of(0.01f64..=60.0),
        proptest::option::of(1.3f64..=4.0),
    )
        .prop_map(|(lesson, local, ago, stability, ease)| {
            let mut item = HanziItem::new(format!("{lesson}_{local}"), "字", lesson);
            item.last_ts = ago.map(|a| NOW - a);
            item.stability_days = stability;
            item.ease = ease;
            item
        })
}

fn arb_pool() -> impl Strategy<Value = Vec<HanziItem>> {
    proptest::collection::vec(arb_item(6), 0..80)
}

// ============================================================================
// Estimator
// ============================================================================

proptest! {
    #[test]
    fn forgetting_prob_in_unit_interval(
        item in arb_item(6),
        ago in proptest::option::of(0i64..=(5 * DAY)),
        offset in -(5 * DAY)..=(3 * DAY),
    ) {
        // Keep t / S small enough that 1 - exp(-t / S) is still below 1.0 in f64.
        let mut item = item;
        item.last_ts = ago.map(|a| NOW - a);
        let p = forgetting_prob(&item, NOW + offset);
        prop_assert!(p >= 0.0);
        prop_assert!(p < 1.0);
    }

    #[test]
    fn forgetting_prob_zero_at_last_answer(item in arb_item(6)) {
        let mut item = item;
        item.last_ts = Some(NOW);
        prop_assert_eq!(forgetting_prob(&item, NOW), 0.0);
    }

    #[test]
    fn forgetting_prob_increases_with_time(
        stability in 1.0f64..=30.0,
        early in 1i64..(10 * DAY),
        extra in (DAY / 24)..(10 * DAY),
    ) {
        let mut item = HanziItem::new("1_1", "字", 1);
        item.last_ts = Some(NOW);
        item.stability_days = Some(stability);
        let p_early = forgetting_prob(&item, NOW + early);
        let p_late = forgetting_prob(&item, NOW + early + extra);
        prop_assert!(p_late > p_early);
    }
}

// ============================================================================
// Normalizer / Updater
// ============================================================================

proptest! {
    #[test]
    fn normalize_idempotent(item in arb_item(6)) {
        let once = normalized(&item);
        let mut twice = once.clone();
        ensure_defaults(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn correct_answer_grows(item in arb_item(6), dt in 0i64..DAY) {
        let before = normalized(&item);
        let mut after = item.clone();
        update_after_answer(&mut after, true, NOW + dt);

        prop_assert!(after.ease_factor() > before.ease_factor());
        prop_assert!(after.stability() > before.stability());
        prop_assert_eq!(after.history.len(), before.history.len() + 1);
        prop_assert!(after.history.last().map(|r| r.correct).unwrap_or(false));
        prop_assert_eq!(after.last_ts, Some(NOW + dt));
    }

    #[test]
    fn wrong_answer_respects_floors(item in arb_item(6)) {
        let before = normalized(&item);
        let mut after = item.clone();
        update_after_answer(&mut after, false, NOW);

        prop_assert!(after.ease_factor() >= MIN_EASE);
        prop_assert!(after.ease_factor() <= before.ease_factor());
        prop_assert!(after.stability() >= MIN_LAPSE_STABILITY_DAYS);
        let halved = (before.stability() * 0.5).max(MIN_LAPSE_STABILITY_DAYS);
        prop_assert!((after.stability() - halved).abs() < 1e-12);
        prop_assert_eq!(after.history.len(), before.history.len() + 1);
        prop_assert_eq!(after.lesson, before.lesson);
    }
}

// ============================================================================
// Selector
// ============================================================================

fn dedup_pool(pool: Vec<HanziItem>) -> Vec<HanziItem> {
    let mut seen = HashSet::new();
    pool.into_iter().filter(|x| seen.insert(x.id.clone())).collect()
}

proptest! {
    #[test]
    fn session_capped_and_unique(pool in arb_pool(), lesson in 1u32..=7) {
        let result = select_for_session(&pool, lesson, NOW);
        prop_assert!(result.len() <= MAX_TOTAL_QUESTIONS);

        let ids: HashSet<&str> = result.iter().map(|x| x.id.as_str()).collect();
        prop_assert_eq!(ids.len(), result.len());
        prop_assert!(result.iter().all(|x| x.lesson <= lesson));
    }

    #[test]
    fn session_starts_with_current_lesson(pool in arb_pool(), lesson in 1u32..=7) {
        let pool = dedup_pool(pool);
        let current: Vec<&str> = pool
            .iter()
            .filter(|x| x.lesson == lesson)
            .take(5)
            .map(|x| x.id.as_str())
            .collect();

        let result = select_for_session(&pool, lesson, NOW);
        let head: Vec<&str> = result.iter().take(current.len()).map(|x| x.id.as_str()).collect();
        prop_assert_eq!(head, current);
    }
}
