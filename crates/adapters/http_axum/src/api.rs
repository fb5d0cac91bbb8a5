//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
pub mod sse;

use axum::Router;
use axum::routing::{get, post};

use joinbridge_app::ports::Gateway;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<G>() -> Router<AppState<G>>
where
    G: Gateway + 'static,
{
    Router::new()
        .route("/devices", get(devices::list::<G>))
        .route("/devices/{name}", get(devices::get::<G>))
        .route(
            "/devices/{name}/services/{service}",
            post(devices::call_service::<G>),
        )
        .route("/events/stream", get(sse::stream::<G>))
}
