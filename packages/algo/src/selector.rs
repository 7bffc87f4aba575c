//! Session Selector
//!
//! Picks the questions for one review session:
//!
//! 1. up to `current_lesson_quota` items of the current lesson, in pool order
//! 2. every older item whose forgetting probability reached the threshold,
//!    most forgotten first (uncapped)
//! 3. if slots remain, older items below the threshold, closest to the
//!    threshold first, at most `near_due_pick`
//! 4. dedupe by id (first occurrence wins), truncate to `max_total_questions`
//!
//! Mandatory items past the cap are dropped from the tail without re-ranking
//! against the current-lesson items; [`SessionPlan::dropped_mandatory`] counts
//! them.

use std::collections::HashSet;

use crate::estimator::forgetting_prob;
use crate::normalize::normalized;
use crate::types::{HanziItem, SchedulerParams, SelectionSource, SessionEntry, SessionPlan};

struct Scored {
    item: HanziItem,
    p: f64,
}

/// 选出本次测试的题目（默认参数）
pub fn select_for_session(all_items: &[HanziItem], current_lesson: u32, now_ms: i64) -> Vec<HanziItem> {
    plan_session(all_items, current_lesson, now_ms).into_items()
}

pub fn select_for_session_with(
    params: &SchedulerParams,
    all_items: &[HanziItem],
    current_lesson: u32,
    now_ms: i64,
) -> Vec<HanziItem> {
    plan_session_with(params, all_items, current_lesson, now_ms).into_items()
}

pub fn plan_session(all_items: &[HanziItem], current_lesson: u32, now_ms: i64) -> SessionPlan {
    plan_session_with(&SchedulerParams::default(), all_items, current_lesson, now_ms)
}

/// Plans a session and records why each item was chosen.
pub fn plan_session_with(
    params: &SchedulerParams,
    all_items: &[HanziItem],
    current_lesson: u32,
    now_ms: i64,
) -> SessionPlan {
    let items: Vec<HanziItem> = all_items.iter().map(normalized).collect();

    let current: Vec<SessionEntry> = items
        .iter()
        .filter(|x| x.lesson == current_lesson)
        .take(params.current_lesson_quota)
        .map(|x| SessionEntry {
            item: x.clone(),
            source: SelectionSource::Current,
            forget_prob: None,
        })
        .collect();

    let (mut must, mut near): (Vec<Scored>, Vec<Scored>) = items
        .into_iter()
        .filter(|x| x.lesson < current_lesson)
        .map(|x| {
            let p = forgetting_prob(&x, now_ms);
            Scored { item: x, p }
        })
        .partition(|s| s.p >= params.forget_threshold);

    // Stable sorts keep pool order among equal probabilities.
    must.sort_by(|a, b| b.p.total_cmp(&a.p));
    let mandatory_total = must.len();

    let mut picked: Vec<SessionEntry> = must
        .into_iter()
        .map(|s| entry(s, SelectionSource::Mandatory))
        .collect();

    if picked.len() + current.len() < params.max_total_questions {
        let remain = params.max_total_questions - current.len() - picked.len();
        near.sort_by(|a, b| b.p.total_cmp(&a.p));
        picked.extend(
            near.into_iter()
                .take(params.near_due_pick.min(remain))
                .map(|s| entry(s, SelectionSource::Fill)),
        );
    }

    let mut seen = HashSet::new();
    let mut entries: Vec<SessionEntry> = current
        .into_iter()
        .chain(picked)
        .filter(|e| seen.insert(e.item.id.clone()))
        .collect();

    let kept_mandatory = entries
        .iter()
        .take(params.max_total_questions)
        .filter(|e| e.source == SelectionSource::Mandatory)
        .count();
    let listed_mandatory = entries
        .iter()
        .filter(|e| e.source == SelectionSource::Mandatory)
        .count();
    entries.truncate(params.max_total_questions);

    SessionPlan {
        current_lesson,
        now_ms,
        entries,
        mandatory_total,
        dropped_mandatory: listed_mandatory - kept_mandatory,
    }
}

fn entry(scored: Scored, source: SelectionSource) -> SessionEntry {
    SessionEntry {
        item: scored.item,
        source,
        forget_prob: Some(scored.p),
    }
}
