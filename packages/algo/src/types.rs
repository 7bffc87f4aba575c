//! Common Types and Constants
//!
//! Shared data structures used across the scheduling modules.

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Forgetting probability at or above which an older item must be reviewed
pub const FORGET_THRESHOLD: f64 = 0.35;

/// Upper bound on questions in one session
pub const MAX_TOTAL_QUESTIONS: usize = 15;

/// Maximum number of below-threshold items used to fill spare slots
pub const NEAR_DUE_PICK: usize = 10;

/// Items of the current lesson that are always drilled
pub const CURRENT_LESSON_QUOTA: usize = 5;

/// Stability assigned to never-reviewed items (days)
pub const DEFAULT_STABILITY_DAYS: f64 = 1.0;

/// Ease assigned to never-reviewed items
pub const DEFAULT_EASE: f64 = 2.0;

/// Ease never drops below this after a failed answer
pub const MIN_EASE: f64 = 1.3;

/// Ease gained on a correct answer
pub const EASE_STEP_UP: f64 = 0.1;

/// Ease lost on a failed answer
pub const EASE_STEP_DOWN: f64 = 0.2;

/// Stability growth per unit of ease on a correct answer
pub const STABILITY_GROWTH_PER_EASE: f64 = 0.15;

/// Stability multiplier on a failed answer
pub const LAPSE_STABILITY_FACTOR: f64 = 0.5;

/// Stability floor after a failed answer (days)
pub const MIN_LAPSE_STABILITY_DAYS: f64 = 0.5;

/// Stability floor applied when the estimator reads an item (days)
pub const MIN_READ_STABILITY_DAYS: f64 = 0.25;

/// Milliseconds per day
pub const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

// ==================== Item Types ====================

/// One answer in an item's review history
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Answer time (epoch milliseconds)
    pub ts: i64,
    /// Whether the answer was correct
    pub correct: bool,
}

/// A character under spaced repetition
///
/// Numeric fields are optional because freshly imported records may not carry
/// them; [`crate::normalize::ensure_defaults`] fills them in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HanziItem {
    /// Unique id, `"{lesson}_{localId}"` for items created by the store
    pub id: String,
    /// Display glyph
    #[serde(rename = "char")]
    pub character: String,
    /// Lesson the item belongs to
    pub lesson: u32,
    /// Time of the most recent answer (epoch milliseconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_ts: Option<i64>,
    /// Memory stability in days
    #[serde(default)]
    pub stability_days: Option<f64>,
    /// Stability growth multiplier
    #[serde(default)]
    pub ease: Option<f64>,
    /// Chronological answer log
    #[serde(default)]
    pub history: Vec<ReviewRecord>,
}

impl HanziItem {
    /// New never-reviewed item without numeric fields
    pub fn new(id: impl Into<String>, character: impl Into<String>, lesson: u32) -> Self {
        Self {
            id: id.into(),
            character: character.into(),
            lesson,
            last_ts: None,
            stability_days: None,
            ease: None,
            history: Vec::new(),
        }
    }

    /// Stability, or the default for never-reviewed items
    pub fn stability(&self) -> f64 {
        self.stability_days.unwrap_or(DEFAULT_STABILITY_DAYS)
    }

    /// Ease, or the default for never-reviewed items
    pub fn ease_factor(&self) -> f64 {
        self.ease.unwrap_or(DEFAULT_EASE)
    }

    /// Whether the item has ever been answered
    pub fn is_untested(&self) -> bool {
        self.last_ts.is_none()
    }
}

// ==================== Scheduler Types ====================

/// Tunable quotas of the session selector
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulerParams {
    /// Forgetting probability at which an older item becomes mandatory
    pub forget_threshold: f64,
    /// Session size cap
    pub max_total_questions: usize,
    /// Cap on fill items
    pub near_due_pick: usize,
    /// Cap on current-lesson items
    pub current_lesson_quota: usize,
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            forget_threshold: FORGET_THRESHOLD,
            max_total_questions: MAX_TOTAL_QUESTIONS,
            near_due_pick: NEAR_DUE_PICK,
            current_lesson_quota: CURRENT_LESSON_QUOTA,
        }
    }
}

/// Why an item was picked for a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// Item of the lesson being studied
    Current,
    /// Older item at or past the forget threshold
    Mandatory,
    /// Older item below the threshold, used to fill spare slots
    Fill,
}

/// A selected item together with the reason it was chosen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub item: HanziItem,
    pub source: SelectionSource,
    /// Forgetting probability at planning time; `None` for current-lesson items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forget_prob: Option<f64>,
}

/// Result of planning one review session
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPlan {
    pub current_lesson: u32,
    pub now_ms: i64,
    /// Ordered, duplicate-free, at most `max_total_questions` long
    pub entries: Vec<SessionEntry>,
    /// Older items that crossed the threshold (before truncation)
    pub mandatory_total: usize,
    /// Mandatory items cut off by the session cap
    pub dropped_mandatory: usize,
}

impl SessionPlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, source: SelectionSource) -> usize {
        self.entries.iter().filter(|e| e.source == source).count()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.item.id.as_str()).collect()
    }

    pub fn into_items(self) -> Vec<HanziItem> {
        self.entries.into_iter().map(|e| e.item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserializes_without_numeric_fields() {
        let item: HanziItem =
            serde_json::from_str(r#"{"id":"1_3","char":"木","lesson":1}"#).unwrap();
        assert_eq!(item.character, "木");
        assert_eq!(item.last_ts, None);
        assert_eq!(item.stability_days, None);
        assert_eq!(item.ease, None);
        assert!(item.history.is_empty());
        assert!(item.is_untested());
    }

    #[test]
    fn test_item_wire_names() {
        let mut item = HanziItem::new("2_1", "山", 2);
        item.last_ts = Some(1_700_000_000_000);
        item.history.push(ReviewRecord {
            ts: 1_700_000_000_000,
            correct: true,
        });
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["char"], "山");
        assert_eq!(value["last_ts"], 1_700_000_000_000i64);
        assert_eq!(value["history"][0]["correct"], true);
        assert!(value.get("character").is_none());
    }

    #[test]
    fn test_accessors_fall_back_to_defaults() {
        let item = HanziItem::new("1_1", "人", 1);
        assert_eq!(item.stability(), DEFAULT_STABILITY_DAYS);
        assert_eq!(item.ease_factor(), DEFAULT_EASE);
    }

    #[test]
    fn test_default_params() {
        let params = SchedulerParams::default();
        assert_eq!(params.forget_threshold, 0.35);
        assert_eq!(params.max_total_questions, 15);
        assert_eq!(params.near_due_pick, 10);
        assert_eq!(params.current_lesson_quota, 5);
    }
}
