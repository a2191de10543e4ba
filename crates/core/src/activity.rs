//! Notification / audit activity records and their derived counters.

use serde::{Deserialize, Serialize};

use crate::filter::{FilterCategory, Filterable};
use crate::metrics;
use crate::types::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Sms,
    Whatsapp,
    Push,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Whatsapp => "whatsapp",
            Channel::Push => "push",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Delivered,
    Pending,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Failed => "failed",
        }
    }
}

/// One row of the notifications / history views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: RecordId,
    /// What was sent, e.g. `"Appointment reminder"`.
    pub kind: String,
    pub recipient: String,
    pub channel: Channel,
    pub status: DeliveryStatus,
    /// Display string, e.g. `"Today, 09:12"`.
    pub timestamp: String,
}

impl Filterable for ActivityRecord {
    fn category_value(&self, category: FilterCategory) -> Option<&str> {
        match category {
            FilterCategory::Channel => Some(self.channel.as_str()),
            FilterCategory::Status => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.recipient, &self.kind]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryCounts {
    pub delivered: usize,
    pub pending: usize,
    pub failed: usize,
}

pub fn delivery_counts(records: &[ActivityRecord]) -> DeliveryCounts {
    let mut counts = DeliveryCounts::default();
    for record in records {
        match record.status {
            DeliveryStatus::Delivered => counts.delivered += 1,
            DeliveryStatus::Pending => counts.pending += 1,
            DeliveryStatus::Failed => counts.failed += 1,
        }
    }
    counts
}

/// Percentage of records that reached the recipient. `0` for no records.
pub fn delivery_rate(records: &[ActivityRecord]) -> u32 {
    metrics::rate_of(records, |r| r.status == DeliveryStatus::Delivered)
}
