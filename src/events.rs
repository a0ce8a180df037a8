//! Change notifications between the data layer and its presenters.
//!
//! Mutations publish a [`DashboardEvent`] on the [`EventBus`]; the SSE endpoint and
//! anything else that renders progress subscribes and refreshes. The bus wraps a
//! `tokio::sync::broadcast` channel, so publishing never blocks and a slow
//! subscriber only loses the events it lagged behind on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Default number of buffered events per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Which stored collection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Outcomes (QBOs)
    Outcomes,
    /// Outputs (PIs)
    Outputs,
    /// Jobs
    Jobs,
    /// Outcome–output mappings
    OutcomeOutputMappings,
    /// Job–output mappings
    JobOutputMappings,
}

/// Something upstream of the progress chart changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum DashboardEvent {
    /// A job was completed or reopened
    JobProgressUpdated {
        /// Job whose status changed
        job_id: String,
        /// New completion status
        is_done: bool,
        /// When the change was recorded
        timestamp: DateTime<Utc>,
    },

    /// Rows in a collection were created, edited or deleted
    DataChanged {
        /// Affected collection
        collection: Collection,
        /// When the change was recorded
        timestamp: DateTime<Utc>,
    },
}

impl DashboardEvent {
    /// Shorthand for a [`DashboardEvent::DataChanged`] stamped now.
    #[must_use]
    pub fn data_changed(collection: Collection) -> Self {
        Self::DataChanged {
            collection,
            timestamp: Utc::now(),
        }
    }

    /// SSE event name for this variant.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::JobProgressUpdated { .. } => "JobProgressUpdated",
            Self::DataChanged { .. } => "DataChanged",
        }
    }
}

/// Broadcast bus for [`DashboardEvent`]s.
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<DashboardEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per subscriber.
    ///
    /// A capacity of 0 is bumped to 1, the smallest the channel accepts.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribes to every event published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }

    /// Publishes an event. Having no subscribers is not an error.
    pub fn publish(&self, event: DashboardEvent) {
        match self.tx.send(event) {
            Ok(receivers) => trace!(receivers, "Published dashboard event"),
            Err(broadcast::error::SendError(event)) => {
                trace!(event = event.name(), "No subscribers for dashboard event");
            }
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured per-subscriber buffer size.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
