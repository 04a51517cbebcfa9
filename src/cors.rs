//! Cross-origin resource sharing configuration.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// The origins allowed to call the API when none are configured.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Parse a comma separated list of origins.
///
/// Entries are trimmed and empty entries are skipped. Entries that are not
/// valid header values are logged and skipped.
pub fn parse_allowed_origins(origins: &str) -> Vec<HeaderValue> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!("ignoring invalid CORS origin {origin:?}: {error}");
                None
            }
        })
        .collect()
}

/// Build a CORS layer that lets browsers on `allowed_origins` call the API.
///
/// Credentials are allowed, so the request's method and headers are mirrored
/// back instead of answering with a wildcard. For the same reason an origin of
/// `*` mirrors the request's origin, allowing every origin.
pub fn cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    let allow_origin = if allowed_origins.iter().any(|origin| origin == "*") {
        tracing::warn!("CORS: wildcard origin configured - all origins allowed");
        AllowOrigin::mirror_request()
    } else {
        tracing::info!("CORS: allowing origins {allowed_origins:?}");
        AllowOrigin::list(allowed_origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
