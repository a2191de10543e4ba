//! Dashboard snapshot: the filtered lists and summary metrics each view
//! would render, gathered into one serializable report.
//!
//! Lists are filtered by the configured [`FilterState`]; summary cards
//! (counts, rates, averages) are computed over the full lists, matching what
//! the clinic's header widgets show regardless of the active filter.

use std::collections::BTreeMap;

use medclinic_core::activity::{self, ActivityRecord, DeliveryCounts};
use medclinic_core::billing;
use medclinic_core::filter::{FilterCategory, FilterState};
use medclinic_core::medication;
use medclinic_core::metrics::ScoreBucket;
use medclinic_core::pipeline::{self, Lead, Stage};
use medclinic_core::queue::{QueueEntry, QueueStatusCounts};
use medclinic_core::schedule::{self, Appointment};
use medclinic_core::selection;
use medclinic_core::types::RecordId;
use serde::Serialize;

use crate::config::CliConfig;
use crate::seed::SeedData;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub active_filters: usize,
    pub queue: QueueSection,
    pub activity: ActivitySection,
    pub leads: LeadSection,
    pub billing: BillingSection,
    pub adherence_rate: u32,
    pub schedule: ScheduleSection,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueueSection {
    pub entries: Vec<QueueEntry>,
    pub counts: QueueStatusCounts,
    pub average_waiting_minutes: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivitySection {
    pub records: Vec<ActivityRecord>,
    pub counts: DeliveryCounts,
    pub delivery_rate: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadCard {
    pub id: RecordId,
    pub name: String,
    pub stage: Stage,
    pub score: u8,
    pub bucket: ScoreBucket,
    pub progress: u32,
}

impl From<&Lead> for LeadCard {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id,
            name: lead.name.clone(),
            stage: lead.stage,
            score: lead.score,
            bucket: lead.bucket(),
            progress: lead.stage.progress(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadSection {
    pub cards: Vec<LeadCard>,
    pub win_rate: u32,
    pub value_by_stage: BTreeMap<Stage, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BillingSection {
    pub selected_codes: Vec<String>,
    pub total_cents: i64,
    pub total: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleSection {
    pub appointments: Vec<Appointment>,
    pub attendance_rate: u32,
    pub telemedicine_share: u32,
}

/// Search-only filter, for lists without a professional facet.
pub fn search_filter(config: &CliConfig) -> FilterState {
    let mut filter = FilterState::new();
    if let Some(query) = &config.search {
        filter.set_query(query);
    }
    filter
}

/// Search query plus professional selection.
pub fn base_filter(config: &CliConfig) -> FilterState {
    let mut filter = search_filter(config);
    filter.set_category(FilterCategory::Professional, config.professionals.iter().cloned());
    filter
}

pub fn build_report(config: &CliConfig, data: &SeedData) -> DashboardReport {
    let filter = base_filter(config);

    let mut lead_filter = filter.clone();
    lead_filter.set_score_range(Some(config.score_range));

    let queue = QueueSection {
        entries: data.queue.view(&filter).into_iter().cloned().collect(),
        counts: data.queue.status_counts(),
        average_waiting_minutes: data.queue.average_waiting_minutes(),
    };

    let activity = ActivitySection {
        records: search_filter(config)
            .apply(&data.activity)
            .into_iter()
            .cloned()
            .collect(),
        counts: activity::delivery_counts(&data.activity),
        delivery_rate: activity::delivery_rate(&data.activity),
    };

    let leads = LeadSection {
        cards: lead_filter
            .apply(&data.leads)
            .into_iter()
            .map(LeadCard::from)
            .collect(),
        win_rate: pipeline::win_rate(&data.leads),
        value_by_stage: pipeline::value_by_stage(&data.leads)
            .into_iter()
            .map(|(stage, cents)| (stage, billing::format_brl(cents)))
            .collect(),
    };

    let total_cents = billing::selected_total(&data.billing);
    let billing = BillingSection {
        selected_codes: selection::selected_keys(&data.billing)
            .into_iter()
            .map(str::to_string)
            .collect(),
        total_cents,
        total: billing::format_brl(total_cents),
    };

    let schedule = ScheduleSection {
        appointments: filter.apply(&data.appointments).into_iter().cloned().collect(),
        attendance_rate: schedule::attendance_rate(&data.appointments),
        telemedicine_share: schedule::telemedicine_share(&data.appointments),
    };

    DashboardReport {
        active_filters: lead_filter.active_filter_count(),
        queue,
        activity,
        leads,
        billing,
        adherence_rate: medication::adherence_rate(&data.doses),
        schedule,
    }
}
