//! Defines the endpoint for listing every expense.
use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    expense::{Expense, core::list_expenses},
};

/// A route handler for getting all expenses, most recent first.
pub async fn list_expenses_endpoint(
    State(state): State<AppState>,
) -> Result<Json<Vec<Expense>>, Error> {
    let connection = state.session()?;
    let expenses = list_expenses(&connection).inspect_err(|error| {
        tracing::error!("could not list expenses: {error}");
    })?;

    Ok(Json(expenses))
}
