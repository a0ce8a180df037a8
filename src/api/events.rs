//! Server-sent change notifications
//!
//! Clients keep `/api/events` open and refetch the chart whenever a
//! `JobProgressUpdated` or `DataChanged` event arrives. A `Resync` event tells a
//! client it fell behind and should refetch everything.

use crate::{api::AppState, events::DashboardEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::{convert::Infallible, time::Duration};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

fn to_sse(event: &DashboardEvent) -> Option<Event> {
    match Event::default().event(event.name()).json_data(event) {
        Ok(sse) => Some(sse),
        Err(e) => {
            warn!("Failed to serialize {} for SSE: {}", event.name(), e);
            None
        }
    }
}

/// GET /api/events
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.events.subscribe();
    info!(
        subscribers = state.events.subscriber_count(),
        "New SSE client connected to dashboard events"
    );

    let stream = async_stream::stream! {
        yield Ok(Event::default().event("ConnectionStatus").data("connected"));

        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(sse) = to_sse(&event) {
                        yield Ok(sse);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "SSE client lagged behind dashboard events");
                    yield Ok(Event::default().event("Resync").data("lagged"));
                }
                Err(RecvError::Closed) => {
                    debug!("Event bus closed, ending SSE stream");
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
