//! The API endpoints URIs.

/// The route to create and list expenses.
pub const EXPENSES: &str = "/expenses";
/// The route for the per-emotion spending statistics.
pub const EMOTION_ANALYTICS: &str = "/analytics/emotions";
