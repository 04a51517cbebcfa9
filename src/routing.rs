//! Application router configuration.

use axum::{Router, middleware, routing::get};

use crate::{
    AppState, Error,
    analytics::get_emotion_analytics,
    endpoints,
    expense::{create_expense_endpoint, list_expenses_endpoint},
    logging_middleware,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(endpoints::EMOTION_ANALYTICS, get(get_emotion_analytics))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
