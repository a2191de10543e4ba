//! Lead pipeline (CRM): scored records moving through ordered stages.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::activity::Channel;
use crate::error::CoreError;
use crate::filter::{FilterCategory, Filterable, MAX_SCORE};
use crate::metrics::{self, ScoreBucket};
use crate::types::{Cents, RecordId};

/// Pipeline stages. Variant order is pipeline order; `Lost` sits outside the
/// progress track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    New,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl Stage {
    /// The progress track shown on each lead card.
    pub const TRACK: [Stage; 6] = [
        Stage::New,
        Stage::Contacted,
        Stage::Qualified,
        Stage::Proposal,
        Stage::Negotiation,
        Stage::Won,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::New => "new",
            Stage::Contacted => "contacted",
            Stage::Qualified => "qualified",
            Stage::Proposal => "proposal",
            Stage::Negotiation => "negotiation",
            Stage::Won => "won",
            Stage::Lost => "lost",
        }
    }

    /// Index within [`Stage::TRACK`]; `None` for `Lost`.
    pub fn position(&self) -> Option<usize> {
        Self::TRACK.iter().position(|s| s == self)
    }

    /// Next stage on the track. `Won` and `Lost` have none.
    pub fn next(&self) -> Option<Stage> {
        self.position().and_then(|p| Self::TRACK.get(p + 1).copied())
    }

    /// Percentage of the track completed: `rate(position + 1, track_len)`.
    /// `Lost` shows 0.
    pub fn progress(&self) -> u32 {
        match self.position() {
            Some(p) => metrics::rate(p + 1, Self::TRACK.len()),
            None => 0,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Stage::Won | Stage::Lost)
    }
}

/// A prospective patient in the CRM pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: RecordId,
    pub name: String,
    pub source: Channel,
    pub professional: String,
    pub stage: Stage,
    /// 0-100 conversion likelihood. Checked by [`Lead::validate`]; a higher
    /// score never matches a score range.
    pub score: u8,
    pub estimated_value: Cents,
    pub created_on: NaiveDate,
}

impl Lead {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.score > MAX_SCORE {
            return Err(CoreError::Validation(format!(
                "Lead {} has score {} above {MAX_SCORE}",
                self.id, self.score
            )));
        }
        Ok(())
    }

    pub fn bucket(&self) -> ScoreBucket {
        ScoreBucket::from_score(self.score)
    }

    /// Move to the next stage on the track. Returns `false` for closed leads.
    pub fn advance(&mut self) -> bool {
        match self.stage.next() {
            Some(next) => {
                self.stage = next;
                true
            }
            None => false,
        }
    }

    pub fn mark_lost(&mut self) {
        self.stage = Stage::Lost;
    }
}

impl Filterable for Lead {
    fn category_value(&self, category: FilterCategory) -> Option<&str> {
        match category {
            FilterCategory::Stage => Some(self.stage.as_str()),
            FilterCategory::Channel => Some(self.source.as_str()),
            FilterCategory::Professional => Some(&self.professional),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }

    fn score(&self) -> Option<u8> {
        Some(self.score)
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.created_on)
    }
}

/// Sum of estimated values per stage.
pub fn value_by_stage(leads: &[Lead]) -> BTreeMap<Stage, Cents> {
    let mut totals = BTreeMap::new();
    for lead in leads {
        *totals.entry(lead.stage).or_insert(0) += lead.estimated_value;
    }
    totals
}

/// Won leads as a share of closed (won + lost) leads. `0` when nothing is
/// closed yet.
pub fn win_rate(leads: &[Lead]) -> u32 {
    let closed: Vec<&Lead> = leads.iter().filter(|l| l.stage.is_closed()).collect();
    let won = closed.iter().filter(|l| l.stage == Stage::Won).count();
    metrics::rate(won, closed.len())
}
