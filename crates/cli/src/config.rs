use std::time::Duration;

use medclinic_core::error::CoreError;
use medclinic_core::filter::ScoreRange;

/// Default simulated latency for feedback messages, in milliseconds.
const DEFAULT_FEEDBACK_DELAY_MS: u64 = 300;

/// Dashboard configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Free-text query applied to every list.
    pub search: Option<String>,
    /// Professionals to keep; empty means all.
    pub professionals: Vec<String>,
    /// Lead score bounds (inclusive).
    pub score_range: ScoreRange,
    /// Delay before the "snapshot ready" feedback fires.
    pub feedback_delay: Duration,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            search: None,
            professionals: Vec::new(),
            score_range: ScoreRange::FULL,
            feedback_delay: Duration::from_millis(DEFAULT_FEEDBACK_DELAY_MS),
        }
    }
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                       | Default |
    /// |-------------------------------|---------|
    /// | `MEDCLINIC_SEARCH`            | (none)  |
    /// | `MEDCLINIC_PROFESSIONALS`     | (none)  |
    /// | `MEDCLINIC_MIN_SCORE`         | `0`     |
    /// | `MEDCLINIC_MAX_SCORE`         | `100`   |
    /// | `MEDCLINIC_FEEDBACK_DELAY_MS` | `300`   |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let search = lookup("MEDCLINIC_SEARCH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let professionals: Vec<String> = lookup("MEDCLINIC_PROFESSIONALS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let min_score: u8 = parse_or(&lookup, "MEDCLINIC_MIN_SCORE", 0)?;
        let max_score: u8 = parse_or(&lookup, "MEDCLINIC_MAX_SCORE", 100)?;
        let score_range = ScoreRange::new(min_score, max_score)?;

        let delay_ms: u64 = parse_or(
            &lookup,
            "MEDCLINIC_FEEDBACK_DELAY_MS",
            DEFAULT_FEEDBACK_DELAY_MS,
        )?;

        Ok(Self {
            search,
            professionals,
            score_range,
            feedback_delay: Duration::from_millis(delay_ms),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, CoreError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            CoreError::Validation(format!("{key} must be a valid number, got '{raw}'"))
        }),
    }
}
