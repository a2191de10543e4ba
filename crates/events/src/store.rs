//! Observable waiting-room state.
//!
//! [`QueueStore`] owns a [`WaitingQueue`] plus the view's [`FilterState`]
//! and publishes a [`ViewEvent`] on the shared [`EventBus`] after every
//! mutation that changed something. No-op calls (moving the first entry up,
//! toggling nothing) publish nothing.

use std::sync::Arc;

use medclinic_core::error::CoreError;
use medclinic_core::filter::{FilterCategory, FilterState};
use medclinic_core::queue::{QueueEntry, QueueStatus, QueueStatusCounts, WaitingQueue};
use medclinic_core::types::RecordId;

use crate::bus::{EventBus, ViewEvent};
use crate::event_types;

pub struct QueueStore {
    view: String,
    queue: WaitingQueue,
    filter: FilterState,
    bus: Arc<EventBus>,
}

impl QueueStore {
    pub fn new(view: impl Into<String>, queue: WaitingQueue, bus: Arc<EventBus>) -> Self {
        Self {
            view: view.into(),
            queue,
            filter: FilterState::new(),
            bus,
        }
    }

    pub fn queue(&self) -> &WaitingQueue {
        &self.queue
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Entries currently displayed, in queue order.
    pub fn visible(&self) -> Vec<&QueueEntry> {
        self.queue.view(&self.filter)
    }

    pub fn status_counts(&self) -> QueueStatusCounts {
        self.queue.status_counts()
    }

    pub fn average_waiting_minutes(&self) -> u32 {
        self.queue.average_waiting_minutes()
    }

    // -- filter --------------------------------------------------------------

    pub fn toggle_filter(&mut self, category: FilterCategory, value: &str) -> bool {
        let selected = self.filter.toggle(category, value);
        self.publish(ViewEvent::new(event_types::FILTER_CHANGED).with_payload(
            serde_json::json!({
                "category": category,
                "value": value,
                "selected": selected,
            }),
        ));
        selected
    }

    pub fn set_search(&mut self, query: &str) {
        let before = self.filter.query().map(str::to_owned);
        self.filter.set_query(query);
        if self.filter.query() != before.as_deref() {
            self.publish(
                ViewEvent::new(event_types::FILTER_CHANGED)
                    .with_payload(serde_json::json!({ "query": self.filter.query() })),
            );
        }
    }

    pub fn clear_filters(&mut self) {
        if self.filter.is_empty() {
            return;
        }
        self.filter.clear_all();
        self.publish(
            ViewEvent::new(event_types::FILTER_CHANGED)
                .with_payload(serde_json::json!({ "cleared": true })),
        );
    }

    // -- reordering ----------------------------------------------------------

    /// Move the entry at `view_index` of the displayed list up one place.
    pub fn move_up(&mut self, view_index: usize) -> bool {
        let id = self.visible_id(view_index);
        let moved = self.queue.move_up_in_view(&self.filter, view_index);
        self.publish_reorder(moved, id, "up");
        moved
    }

    /// Move the entry at `view_index` of the displayed list down one place.
    pub fn move_down(&mut self, view_index: usize) -> bool {
        let id = self.visible_id(view_index);
        let moved = self.queue.move_down_in_view(&self.filter, view_index);
        self.publish_reorder(moved, id, "down");
        moved
    }

    // -- membership / status -------------------------------------------------

    pub fn check_in(&mut self, entry: QueueEntry) -> Result<(), CoreError> {
        let id = entry.id;
        self.queue.check_in(entry)?;
        self.publish(ViewEvent::new(event_types::QUEUE_CHECKED_IN).with_record(id));
        Ok(())
    }

    pub fn remove(&mut self, id: RecordId) -> Result<QueueEntry, CoreError> {
        let removed = self.queue.remove(id)?;
        self.publish(ViewEvent::new(event_types::QUEUE_REMOVED).with_record(id));
        Ok(removed)
    }

    pub fn set_status(&mut self, id: RecordId, status: QueueStatus) -> Result<(), CoreError> {
        self.queue.set_status(id, status)?;
        self.publish_status(id, status);
        Ok(())
    }

    /// Call the next patient. Returns the called entry's id.
    pub fn call_next(&mut self) -> Option<RecordId> {
        let id = self.queue.call_next()?.id;
        self.publish_status(id, QueueStatus::InProgress);
        Some(id)
    }

    // -- helpers -------------------------------------------------------------

    fn visible_id(&self, view_index: usize) -> Option<RecordId> {
        self.visible().get(view_index).map(|e| e.id)
    }

    fn publish_reorder(&self, moved: bool, id: Option<RecordId>, direction: &str) {
        let (true, Some(id)) = (moved, id) else {
            return;
        };
        let position = self.queue.position_of(id);
        tracing::debug!(view = %self.view, id, direction, ?position, "Queue entry moved");
        self.publish(
            ViewEvent::new(event_types::QUEUE_REORDERED)
                .with_record(id)
                .with_payload(serde_json::json!({
                    "direction": direction,
                    "position": position,
                })),
        );
    }

    fn publish_status(&self, id: RecordId, status: QueueStatus) {
        self.publish(
            ViewEvent::new(event_types::QUEUE_STATUS_CHANGED)
                .with_record(id)
                .with_payload(serde_json::json!({ "status": status })),
        );
    }

    fn publish(&self, event: ViewEvent) {
        self.bus.publish(event.with_view(self.view.clone()));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
