//! Well-known [`ViewEvent`](crate::ViewEvent) names.

/// An entry changed position in the waiting-room queue.
pub const QUEUE_REORDERED: &str = "queue.reordered";

/// A patient was checked in.
pub const QUEUE_CHECKED_IN: &str = "queue.checked_in";

/// A patient left the queue.
pub const QUEUE_REMOVED: &str = "queue.removed";

/// An entry's status changed (including via "call next").
pub const QUEUE_STATUS_CHANGED: &str = "queue.status_changed";

/// The active filter of a view changed.
pub const FILTER_CHANGED: &str = "filter.changed";

/// A delayed feedback message completed.
pub const FEEDBACK_DELIVERED: &str = "feedback.delivered";
