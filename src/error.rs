//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client sent an expense that cannot be stored.
    #[error("invalid expense: {0}")]
    Validation(#[from] ValidationError),

    /// The database could not complete a read or write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The total spent for an emotion is too large to be represented as a number.
    #[error("the total for the emotion \"{0}\" overflowed")]
    TotalOverflow(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

/// The reasons an expense may be rejected before it reaches the database.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// The `amount` field was absent or `null`.
    #[error("the field \"amount\" is required")]
    MissingAmount,

    /// The `amount` field could not be interpreted as a number.
    ///
    /// Holds the offending value as it appeared in the request.
    #[error("\"{0}\" is not a valid number for the field \"amount\"")]
    NonNumericAmount(String),

    /// The `amount` field was NaN or infinite.
    #[error("the field \"amount\" must be a finite number")]
    NonFiniteAmount,

    /// The `emotion` field was absent or `null`.
    #[error("the field \"emotion\" is required")]
    MissingEmotion,

    /// The `emotion` field was an empty string.
    #[error("the field \"emotion\" cannot be empty")]
    EmptyEmotion,

    /// The request body could not be parsed as an expense.
    #[error("could not parse the request body: {0}")]
    MalformedBody(String),
}

/// Failures of the underlying SQLite database.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StorageError {
    /// Another thread panicked while holding the database connection.
    #[error("could not acquire the database lock")]
    LockPoisoned,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    Sql(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::Storage(StorageError::Sql(value))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, detail) = match self {
            Error::Validation(error) => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()),
            Error::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_owned()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_owned(),
                )
            }
        };

        (status_code, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, StorageError, ValidationError};

    async fn get_detail(error: Error) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not read response body");
        let json: serde_json::Value =
            serde_json::from_slice(&body).expect("Could not parse response body as JSON");

        (status, json["detail"].as_str().unwrap().to_owned())
    }

    #[tokio::test]
    async fn validation_error_is_unprocessable_entity() {
        let (status, detail) = get_detail(ValidationError::EmptyEmotion.into()).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail, "the field \"emotion\" cannot be empty");
    }

    #[tokio::test]
    async fn storage_error_hides_details() {
        let error: Error = rusqlite::Error::InvalidQuery.into();

        let (status, detail) = get_detail(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail, "Internal Server Error");
    }

    #[tokio::test]
    async fn total_overflow_is_internal_server_error() {
        let (status, detail) = get_detail(Error::TotalOverflow("greedy".to_owned())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail, "Internal Server Error");
    }

    #[tokio::test]
    async fn lock_error_is_internal_server_error() {
        let (status, _) = get_detail(StorageError::LockPoisoned.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn sql_error_converts_to_storage_error() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(
            error,
            Error::Storage(StorageError::Sql(rusqlite::Error::QueryReturnedNoRows))
        );
    }
}
