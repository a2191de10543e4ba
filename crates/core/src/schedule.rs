//! Appointments on the clinic schedule and the filters the agenda applies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::{FilterCategory, Filterable};
use crate::metrics;
use crate::types::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentMode {
    InPerson,
    Telemedicine,
}

impl AppointmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentMode::InPerson => "in_person",
            AppointmentMode::Telemedicine => "telemedicine",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: RecordId,
    pub patient_name: String,
    pub professional: String,
    pub service: String,
    pub mode: AppointmentMode,
    pub date: NaiveDate,
    /// Display string, e.g. `"14:30"`.
    pub time: String,
    pub status: AppointmentStatus,
}

impl Filterable for Appointment {
    fn category_value(&self, category: FilterCategory) -> Option<&str> {
        match category {
            FilterCategory::Professional => Some(&self.professional),
            FilterCategory::Service => Some(&self.service),
            FilterCategory::Mode => Some(self.mode.as_str()),
            FilterCategory::Status => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.patient_name, &self.professional]
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}

/// Completed appointments over every appointment that was due (completed or
/// no-show). Scheduled, confirmed and cancelled ones are ignored.
pub fn attendance_rate(appointments: &[Appointment]) -> u32 {
    let due: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| matches!(a.status, AppointmentStatus::Completed | AppointmentStatus::NoShow))
        .collect();
    let attended = due
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .count();
    metrics::rate(attended, due.len())
}

/// Share of appointments held by telemedicine.
pub fn telemedicine_share(appointments: &[Appointment]) -> u32 {
    metrics::rate_of(appointments, |a| a.mode == AppointmentMode::Telemedicine)
}
