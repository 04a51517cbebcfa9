//! Reduces expenses into per-emotion statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::expense::Expense;

/// How often an emotion was recorded and how much was spent while feeling it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionSummary {
    /// The number of expenses recorded with the emotion.
    pub count: u64,
    /// The sum of the amounts of those expenses.
    pub total: f64,
}

/// Groups expenses by emotion and counts and sums each group.
///
/// Emotions are compared exactly, so `"Sad"` and `"sad"` are separate keys.
/// Emotions that do not appear in `expenses` are not included.
///
/// The expenses are visited in a canonical order (by emotion, then amount)
/// so that the floating point totals are the same for any ordering of the
/// input.
pub fn summarize_by_emotion(expenses: &[Expense]) -> BTreeMap<String, EmotionSummary> {
    let mut ordered: Vec<&Expense> = expenses.iter().collect();
    ordered.sort_by(|left, right| {
        left.emotion
            .cmp(&right.emotion)
            .then(left.amount.total_cmp(&right.amount))
    });

    let mut summaries: BTreeMap<String, EmotionSummary> = BTreeMap::new();

    for expense in ordered {
        let summary = summaries.entry(expense.emotion.clone()).or_default();
        summary.count += 1;
        summary.total += expense.amount;
    }

    summaries
}
