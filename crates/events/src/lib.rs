//! MedClinic view events and simulated-latency feedback.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`; views subscribe to re-render on change.
//! - [`ViewEvent`]: the event envelope.
//! - [`QueueStore`]: observable waiting-room state that publishes a
//!   [`ViewEvent`] for every mutation.
//! - [`FeedbackScheduler`]: cancellable delayed feedback ("sending...",
//!   "processing payment...").

pub mod bus;
pub mod event_types;
pub mod feedback;
pub mod store;

pub use bus::{EventBus, ViewEvent};
pub use feedback::{Feedback, FeedbackError, FeedbackKind, FeedbackScheduler, PendingFeedback};
pub use store::QueueStore;
