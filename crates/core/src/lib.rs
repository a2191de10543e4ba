//! MedClinic list logic.
//!
//! Pure, synchronous building blocks used by the clinic's list and queue
//! views: filtering, ordered queues, selection sets and derived metrics.
//! This crate has no I/O and no internal dependencies; all state is owned
//! by the caller and passed in.

pub mod activity;
pub mod billing;
pub mod error;
pub mod filter;
pub mod medication;
pub mod metrics;
pub mod pipeline;
pub mod queue;
pub mod schedule;
pub mod search;
pub mod selection;
pub mod types;
pub mod validation;
