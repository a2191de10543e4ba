//! Medication dose log and adherence rate.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metrics;
use crate::types::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoseStatus {
    Taken,
    Missed,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseRecord {
    pub id: RecordId,
    pub medication: String,
    pub scheduled_for: NaiveDate,
    pub status: DoseStatus,
}

/// Share of doses marked taken, over every dose in `doses`.
pub fn adherence_rate(doses: &[DoseRecord]) -> u32 {
    metrics::rate_of(doses, |d| d.status == DoseStatus::Taken)
}

/// Adherence rate per medication name.
pub fn adherence_by_medication(doses: &[DoseRecord]) -> BTreeMap<String, u32> {
    let mut grouped: BTreeMap<&str, Vec<&DoseRecord>> = BTreeMap::new();
    for dose in doses {
        grouped.entry(dose.medication.as_str()).or_default().push(dose);
    }
    grouped
        .into_iter()
        .map(|(name, list)| {
            let taken = list.iter().filter(|d| d.status == DoseStatus::Taken).count();
            (name.to_string(), metrics::rate(taken, list.len()))
        })
        .collect()
}
