//! Integration tests for the dashboard snapshot.
//!
//! Builds reports from the demo seed data under different filter
//! configurations and checks the lists and summary metrics a view would
//! render.

use assert_matches::assert_matches;
use medclinic_cli::config::CliConfig;
use medclinic_cli::report::build_report;
use medclinic_cli::seed::SeedData;
use medclinic_core::error::CoreError;
use medclinic_core::filter::ScoreRange;
use medclinic_core::types::RecordId;

fn seed() -> SeedData {
    SeedData::demo().expect("demo data should seed")
}

fn config_with(f: impl FnOnce(&mut CliConfig)) -> CliConfig {
    let mut config = CliConfig::default();
    f(&mut config);
    config
}

// ---------------------------------------------------------------------------
// Test: unfiltered snapshot
// ---------------------------------------------------------------------------

#[test]
fn default_config_shows_every_record() {
    let report = build_report(&CliConfig::default(), &seed());

    assert_eq!(report.active_filters, 0);
    assert_eq!(report.queue.entries.len(), 5);
    assert_eq!(report.activity.records.len(), 5);
    assert_eq!(report.leads.cards.len(), 5);
    assert_eq!(report.schedule.appointments.len(), 4);
}

#[test]
fn summary_metrics_from_demo_data() {
    let report = build_report(&CliConfig::default(), &seed());

    assert_eq!(report.queue.counts.waiting, 3);
    assert_eq!(report.queue.counts.ready, 1);
    assert_eq!(report.queue.counts.in_progress, 1);
    // (35 + 20 + 12 + 8 + 3) / 5 = 15.6
    assert_eq!(report.queue.average_waiting_minutes, 16);

    assert_eq!(report.activity.delivery_rate, 60);
    assert_eq!(report.leads.win_rate, 50);
    assert_eq!(report.adherence_rate, 70);
    assert_eq!(report.schedule.attendance_rate, 67);
    assert_eq!(report.schedule.telemedicine_share, 50);
}

#[test]
fn billing_total_covers_selected_items_only() {
    let report = build_report(&CliConfig::default(), &seed());

    assert_eq!(report.billing.selected_codes, vec!["10101012", "40301630", "40302040"]);
    assert_eq!(report.billing.total_cents, 25_000 + 1_850 + 2 * 990);
    assert_eq!(report.billing.total, "R$ 288,30");
}

// ---------------------------------------------------------------------------
// Test: filtered snapshots
// ---------------------------------------------------------------------------

#[test]
fn professional_filter_narrows_lists_with_that_facet() {
    let config = config_with(|c| c.professionals = vec!["Dr. Silva".to_string()]);
    let report = build_report(&config, &seed());

    let queue_ids: Vec<RecordId> = report.queue.entries.iter().map(|e| e.id).collect();
    let lead_ids: Vec<RecordId> = report.leads.cards.iter().map(|c| c.id).collect();
    let appt_ids: Vec<RecordId> = report.schedule.appointments.iter().map(|a| a.id).collect();

    assert_eq!(queue_ids, vec![1, 3]);
    assert_eq!(lead_ids, vec![1, 3]);
    assert_eq!(appt_ids, vec![1, 3]);
    // Activity has no professional facet and stays unfiltered.
    assert_eq!(report.activity.records.len(), 5);
    // Summary cards ignore the filter.
    assert_eq!(report.queue.counts.waiting, 3);
}

#[test]
fn search_applies_to_every_list() {
    let config = config_with(|c| c.search = Some("maria".to_string()));
    let report = build_report(&config, &seed());

    assert_eq!(report.queue.entries.len(), 1);
    assert_eq!(report.queue.entries[0].patient_name, "Maria Oliveira");
    assert_eq!(report.activity.records.len(), 1);
    assert_eq!(report.schedule.appointments.len(), 1);
    assert!(report.leads.cards.is_empty());
}

#[test]
fn score_range_filters_leads_inclusively() {
    let config = config_with(|c| c.score_range = ScoreRange::new(68, 97).unwrap());
    let report = build_report(&config, &seed());

    let ids: Vec<RecordId> = report.leads.cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 3, 4]);
    assert_eq!(report.active_filters, 1);
}

#[test]
fn lead_cards_carry_bucket_and_progress() {
    let report = build_report(&CliConfig::default(), &seed());

    let won = report.leads.cards.iter().find(|c| c.id == 4).unwrap();
    assert_eq!(won.progress, 100);
    let lost = report.leads.cards.iter().find(|c| c.id == 5).unwrap();
    assert_eq!(lost.progress, 0);
}

// ---------------------------------------------------------------------------
// Test: serialization
// ---------------------------------------------------------------------------

#[test]
fn report_serializes_with_snake_case_enums() {
    let report = build_report(&CliConfig::default(), &seed());
    let json = serde_json::to_value(&report).expect("report should serialize");

    assert_eq!(json["queue"]["entries"][2]["status"], "in_progress");
    assert_eq!(json["leads"]["cards"][3]["bucket"], "hot");
    assert_eq!(json["leads"]["value_by_stage"]["won"], "R$ 800,00");
    assert_eq!(json["activity"]["records"][0]["channel"], "whatsapp");
}

// ---------------------------------------------------------------------------
// Test: configuration
// ---------------------------------------------------------------------------

#[test]
fn config_rejects_score_above_hundred() {
    let result = CliConfig::from_lookup(|key| match key {
        "MEDCLINIC_MAX_SCORE" => Some("150".to_string()),
        _ => None,
    });
    assert_matches!(result, Err(CoreError::Validation(_)));
}
