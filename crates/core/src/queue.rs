//! Waiting-room queue: ordered entries with manual reordering.
//!
//! [`WaitingQueue`] stores the one canonical order of the queue. Views that
//! show a filtered projection reorder through [`WaitingQueue::move_up_in_view`]
//! and [`WaitingQueue::move_down_in_view`], which swap the canonical positions
//! of two *visible* neighbours and leave hidden entries where they are. With
//! no active filter they behave exactly like [`WaitingQueue::move_up`] and
//! [`WaitingQueue::move_down`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::filter::{FilterCategory, FilterState, Filterable};
use crate::metrics;
use crate::types::RecordId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueuePriority {
    Normal,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Waiting,
    Ready,
    InProgress,
}

impl QueueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStatus::Waiting => "waiting",
            QueueStatus::Ready => "ready",
            QueueStatus::InProgress => "in_progress",
        }
    }
}

// ---------------------------------------------------------------------------
// QueueEntry
// ---------------------------------------------------------------------------

/// A patient checked in to the waiting room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: RecordId,
    pub patient_name: String,
    pub service: String,
    pub professional: String,
    /// Display string, e.g. `"08:30"`.
    pub check_in_time: String,
    pub waiting_minutes: u32,
    pub priority: QueuePriority,
    pub status: QueueStatus,
}

impl Filterable for QueueEntry {
    fn category_value(&self, category: FilterCategory) -> Option<&str> {
        match category {
            FilterCategory::Professional => Some(&self.professional),
            FilterCategory::Service => Some(&self.service),
            FilterCategory::Status => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.patient_name, &self.service]
    }
}

/// Number of entries per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatusCounts {
    pub waiting: usize,
    pub ready: usize,
    pub in_progress: usize,
}

// ---------------------------------------------------------------------------
// WaitingQueue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingQueue {
    entries: Vec<QueueEntry>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from seed entries, rejecting duplicate ids.
    pub fn from_entries(entries: Vec<QueueEntry>) -> Result<Self, CoreError> {
        let mut queue = Self::new();
        for entry in entries {
            queue.check_in(entry)?;
        }
        Ok(queue)
    }

    /// Entries in canonical order.
    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&QueueEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Append a newly arrived patient to the end of the queue.
    pub fn check_in(&mut self, entry: QueueEntry) -> Result<(), CoreError> {
        if self.position_of(entry.id).is_some() {
            return Err(CoreError::Conflict(format!(
                "Queue already contains an entry with id {}",
                entry.id
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Remove an entry (patient discharged or left).
    pub fn remove(&mut self, id: RecordId) -> Result<QueueEntry, CoreError> {
        let index = self.index_or_not_found(id)?;
        Ok(self.entries.remove(index))
    }

    pub fn set_status(&mut self, id: RecordId, status: QueueStatus) -> Result<(), CoreError> {
        let index = self.index_or_not_found(id)?;
        self.entries[index].status = status;
        Ok(())
    }

    /// Call the next patient: the first `ready` entry, or the first `waiting`
    /// one when nobody is ready. The chosen entry becomes `in_progress`.
    pub fn call_next(&mut self) -> Option<&QueueEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.status == QueueStatus::Ready)
            .or_else(|| {
                self.entries
                    .iter()
                    .position(|e| e.status == QueueStatus::Waiting)
            })?;
        self.entries[index].status = QueueStatus::InProgress;
        Some(&self.entries[index])
    }

    // -- reordering ----------------------------------------------------------

    /// Swap the entry at `index` with its predecessor.
    ///
    /// No-op (returns `false`) for `index == 0` or an out-of-range index.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index - 1);
        true
    }

    /// Swap the entry at `index` with its successor.
    ///
    /// No-op (returns `false`) when `index` is the last position or out of
    /// range.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.entries.len().saturating_sub(1) {
            return false;
        }
        self.entries.swap(index, index + 1);
        true
    }

    /// Move the entry shown at `view_index` of the filtered projection one
    /// place up among the visible entries.
    pub fn move_up_in_view(&mut self, filter: &FilterState, view_index: usize) -> bool {
        if view_index == 0 {
            return false;
        }
        let visible = filter.matching_indices(&self.entries);
        match (visible.get(view_index - 1), visible.get(view_index)) {
            (Some(&above), Some(&current)) => {
                self.entries.swap(above, current);
                true
            }
            _ => false,
        }
    }

    /// Move the entry shown at `view_index` of the filtered projection one
    /// place down among the visible entries.
    pub fn move_down_in_view(&mut self, filter: &FilterState, view_index: usize) -> bool {
        let visible = filter.matching_indices(&self.entries);
        let next = view_index.checked_add(1).and_then(|i| visible.get(i));
        match (visible.get(view_index), next) {
            (Some(&current), Some(&below)) => {
                self.entries.swap(current, below);
                true
            }
            _ => false,
        }
    }

    /// The filtered projection, in canonical order.
    pub fn view(&self, filter: &FilterState) -> Vec<&QueueEntry> {
        filter.apply(&self.entries)
    }

    // -- aggregates ----------------------------------------------------------

    pub fn status_counts(&self) -> QueueStatusCounts {
        let mut counts = QueueStatusCounts::default();
        for entry in &self.entries {
            match entry.status {
                QueueStatus::Waiting => counts.waiting += 1,
                QueueStatus::Ready => counts.ready += 1,
                QueueStatus::InProgress => counts.in_progress += 1,
            }
        }
        counts
    }

    /// Average waiting time in whole minutes (rounded half-up). An empty
    /// queue averages to 0.
    pub fn average_waiting_minutes(&self) -> u32 {
        let values: Vec<u64> = self
            .entries
            .iter()
            .map(|e| u64::from(e.waiting_minutes))
            .collect();
        metrics::average_rounded(&values) as u32
    }

    fn index_or_not_found(&self, id: RecordId) -> Result<usize, CoreError> {
        self.position_of(id).ok_or(CoreError::NotFound {
            entity: "queue_entry",
            id,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
