//! View change notifications over a `tokio::sync::broadcast` channel.
//!
//! State objects publish a [`ViewEvent`] after every mutation; any number of
//! views hold a receiver and re-render when one arrives. A view that
//! subscribes late only sees events published after it subscribed.

use chrono::{DateTime, Utc};
use medclinic_core::types::RecordId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Events buffered per receiver before a slow view starts lagging.
const DEFAULT_CAPACITY: usize = 256;

/// Something changed in the state behind a view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewEvent {
    /// One of the names in [`crate::event_types`].
    pub event_type: String,
    /// Owning view, e.g. `"reception"`. Set by the publishing store.
    pub view: Option<String>,
    pub record_id: Option<RecordId>,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl ViewEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            view: None,
            record_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn with_record(mut self, record_id: RecordId) -> Self {
        self.record_id = Some(record_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// `true` when the event concerns `view`. Events without a view concern
    /// every view.
    pub fn concerns(&self, view: &str) -> bool {
        self.view.as_deref().map_or(true, |v| v == view)
    }
}

/// Fan-out hub shared by the stores and the views, usually as
/// `Arc<EventBus>`.
///
/// ```rust
/// use medclinic_events::bus::{EventBus, ViewEvent};
///
/// let bus = EventBus::default();
/// let _rx = bus.subscribe();
/// assert_eq!(bus.publish(ViewEvent::new("queue.reordered")), 1);
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ViewEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Send `event` to every current receiver and return how many there
    /// were. With no receivers the event is dropped and `0` is returned.
    pub fn publish(&self, event: ViewEvent) -> usize {
        tracing::trace!(event_type = %event.event_type, "Publishing view event");
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
