//! Defines the endpoint for creating a new expense.
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    AppState, Error, ValidationError,
    expense::{Expense, NewExpense, core::create_expense},
};

/// The JSON body for creating an expense.
///
/// Every field is optional at this stage so that missing fields are reported
/// as a [ValidationError] rather than a generic parsing failure.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExpenseRequest {
    /// The amount of money spent, either a JSON number or a numeric string.
    #[serde(default)]
    pub amount: Option<Value>,
    /// The emotion felt while spending.
    #[serde(default)]
    pub emotion: Option<String>,
    /// Why the money was spent.
    #[serde(default)]
    pub reason: Option<String>,
}

impl TryFrom<ExpenseRequest> for NewExpense {
    type Error = ValidationError;

    fn try_from(request: ExpenseRequest) -> Result<Self, Self::Error> {
        let amount = parse_amount(request.amount)?;
        let emotion = request.emotion.ok_or(ValidationError::MissingEmotion)?;

        NewExpense::new(amount, emotion, request.reason)
    }
}

/// Interpret the `amount` field of a request.
///
/// Numeric strings such as `"12.50"` are accepted alongside JSON numbers.
fn parse_amount(amount: Option<Value>) -> Result<f64, ValidationError> {
    match amount {
        None | Some(Value::Null) => Err(ValidationError::MissingAmount),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| ValidationError::NonNumericAmount(number.to_string())),
        Some(Value::String(text)) => text
            .trim()
            .parse()
            .map_err(|_| ValidationError::NonNumericAmount(text)),
        Some(other) => Err(ValidationError::NonNumericAmount(other.to_string())),
    }
}

/// A route handler for creating a new expense, responds with the stored expense.
pub async fn create_expense_endpoint(
    State(state): State<AppState>,
    request: Result<Json<ExpenseRequest>, JsonRejection>,
) -> Result<Json<Expense>, Error> {
    let Json(request) =
        request.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;

    let new_expense = NewExpense::try_from(request).inspect_err(|error| {
        tracing::warn!("rejected invalid expense: {error}");
    })?;

    let connection = state.session()?;
    let expense = create_expense(new_expense, &connection).inspect_err(|error| {
        tracing::error!("could not create expense: {error}");
    })?;

    tracing::debug!("created expense {}", expense.id);

    Ok(Json(expense))
}
