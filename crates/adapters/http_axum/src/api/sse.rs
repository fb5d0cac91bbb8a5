//! Server-Sent Events (SSE) stream of state invalidations.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use joinbridge_app::ports::Gateway;

use crate::state::AppState;

/// `GET /api/events/stream`: one `invalidated` event per invalidated device.
///
/// Each frame is the JSON-encoded invalidation (`device` plus the signal
/// change that caused it). Clients re-read the device to get its new state.
/// The stream continues until the client disconnects.
pub async fn stream<G>(
    State(state): State<AppState<G>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    G: Gateway + 'static,
{
    let rx = state.registry.subscribe();
    let events = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(invalidated) => match serde_json::to_string(&invalidated) {
            Ok(json) => Some(Ok(Event::default().event("invalidated").data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize invalidation for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "SSE subscriber lagged, some invalidations were dropped");
            None
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use joinbridge_adapter_virtual::InMemoryGateway;
    use joinbridge_app::services::device_registry::DeviceRegistry;
    use joinbridge_domain::device::DeviceConfig;
    use joinbridge_domain::device::button::ButtonConfig;
    use joinbridge_domain::join::DigitalJoin;
    use tower::ServiceExt;

    use crate::router::build;
    use crate::state::AppState;

    #[tokio::test]
    async fn should_open_event_stream() {
        let gateway = Arc::new(InMemoryGateway::default());
        let registry = DeviceRegistry::new(
            gateway,
            vec![DeviceConfig::Button(ButtonConfig {
                name: "Bell".to_string(),
                join: DigitalJoin::new(1),
            })],
        )
        .unwrap();

        let response = build(AppState::new(registry))
            .oneshot(
                Request::get("/api/events/stream")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );
    }

    #[tokio::test]
    async fn should_subscribe_to_invalidations_when_stream_created() {
        let gateway = Arc::new(InMemoryGateway::default());
        let registry = Arc::new(
            DeviceRegistry::new(
                Arc::clone(&gateway),
                vec![DeviceConfig::Button(ButtonConfig {
                    name: "Bell".to_string(),
                    join: DigitalJoin::new(1),
                })],
            )
            .unwrap(),
        );
        registry.attach();
        let mut rx = registry.subscribe();

        let _sse = super::stream(axum::extract::State(AppState::from_arc(Arc::clone(
            &registry,
        ))))
        .await;
        gateway.inject_digital(DigitalJoin::new(1), true);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.device, "Bell");
    }
}
