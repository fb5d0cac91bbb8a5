//! HTTP error response mapping.

use std::error::Error as _;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use joinbridge_domain::error::BridgeError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Failures of an API request, mapped to a status code.
#[derive(Debug)]
pub enum ApiError {
    Bridge(BridgeError),
    /// The request body is not valid JSON.
    MalformedBody(serde_json::Error),
}

impl From<BridgeError> for ApiError {
    fn from(err: BridgeError) -> Self {
        Self::Bridge(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedBody(err)
    }
}

/// The error followed by its source, e.g. `invalid command argument: missing argument position`.
fn describe(err: &BridgeError) -> String {
    match err.source() {
        Some(source) => format!("{err}: {source}"),
        None => err.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Bridge(err) => {
                let status = match err {
                    BridgeError::InvalidArgument(_) | BridgeError::Validation(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    BridgeError::NotFound(_) => StatusCode::NOT_FOUND,
                    BridgeError::ConfigurationIncomplete(_) => StatusCode::CONFLICT,
                    BridgeError::GatewayUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                };
                (status, describe(err))
            }
            Self::MalformedBody(err) => (StatusCode::BAD_REQUEST, format!("malformed body: {err}")),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
