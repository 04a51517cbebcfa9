//! HTTP handler for the emotion analytics endpoint.

use std::collections::BTreeMap;

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    analytics::aggregation::{EmotionSummary, summarize_by_emotion},
    expense::list_expenses,
};

/// A route handler for getting the count and total spent for each emotion.
///
/// The statistics are derived from every stored expense on each request.
/// Responds with an [Error::TotalOverflow] if a total does not fit in an `f64`,
/// since JSON has no representation for infinity.
pub async fn get_emotion_analytics(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, EmotionSummary>>, Error> {
    let expenses = {
        let connection = state.session()?;
        list_expenses(&connection).inspect_err(|error| {
            tracing::error!("could not get expenses for emotion analytics: {error}");
        })?
    };

    let summaries = summarize_by_emotion(&expenses);

    if let Some((emotion, summary)) = summaries
        .iter()
        .find(|(_, summary)| !summary.total.is_finite())
    {
        tracing::error!(
            "total for emotion {emotion:?} over {} expenses is {}",
            summary.count,
            summary.total
        );
        return Err(Error::TotalOverflow(emotion.clone()));
    }

    Ok(Json(summaries))
}
