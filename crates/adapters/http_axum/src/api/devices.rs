//! JSON REST handlers for devices.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use joinbridge_app::ports::Gateway;
use joinbridge_domain::device::DeviceSnapshot;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<DeviceSnapshot>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and service endpoints.
pub enum SnapshotResponse {
    Ok(Json<DeviceSnapshot>),
}

impl IntoResponse for SnapshotResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<G>(State(state): State<AppState<G>>) -> ListResponse
where
    G: Gateway + 'static,
{
    ListResponse::Ok(Json(state.registry.list()))
}

/// `GET /api/devices/{name}`
pub async fn get<G>(
    State(state): State<AppState<G>>,
    Path(name): Path<String>,
) -> Result<SnapshotResponse, ApiError>
where
    G: Gateway + 'static,
{
    let snapshot = state.registry.get(&name)?;
    Ok(SnapshotResponse::Ok(Json(snapshot)))
}

/// `POST /api/devices/{name}/services/{service}`
///
/// The body is a JSON object of service arguments; an empty body means none.
/// Responds with the device snapshot once every write the service issues
/// has completed.
pub async fn call_service<G>(
    State(state): State<AppState<G>>,
    Path((name, service)): Path<(String, String)>,
    body: Bytes,
) -> Result<SnapshotResponse, ApiError>
where
    G: Gateway + 'static,
{
    let data = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)?
    };
    let snapshot = state
        .registry
        .handle_service_call(&name, &service, data)
        .await?;
    Ok(SnapshotResponse::Ok(Json(snapshot)))
}
