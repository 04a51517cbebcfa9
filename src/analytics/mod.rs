//! Statistics derived from the stored expenses.

mod aggregation;
mod handlers;

pub use aggregation::{EmotionSummary, summarize_by_emotion};
pub use handlers::get_emotion_analytics;
