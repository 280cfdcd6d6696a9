//! Synthetic notification generator.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use boarding_core::config::NotificationsConfig;
use boarding_core::error::AppError;

use super::event::NotificationEvent;
use super::scenario::{default_scenarios, Scenario, TokenRanges};

/// Manufactures notifications by picking a scenario uniformly at random.
#[derive(Debug)]
pub struct ScenarioGenerator {
    /// Scenario table, never empty
    scenarios: Vec<Scenario>,
    /// Token bounds passed to builders
    ranges: TokenRanges,
    /// Random source
    rng: Mutex<StdRng>,
}

impl ScenarioGenerator {
    /// Create a generator over the given table, seeded from the OS.
    pub fn new(scenarios: Vec<Scenario>, ranges: TokenRanges) -> Result<Self, AppError> {
        Self::build(scenarios, ranges, StdRng::from_entropy())
    }

    /// Create a deterministic generator for tests and replays.
    pub fn with_seed(
        scenarios: Vec<Scenario>,
        ranges: TokenRanges,
        seed: u64,
    ) -> Result<Self, AppError> {
        Self::build(scenarios, ranges, StdRng::seed_from_u64(seed))
    }

    /// Default table with ranges from the notifications config section.
    pub fn from_config(config: &NotificationsConfig) -> Result<Self, AppError> {
        Self::new(default_scenarios(), TokenRanges::from_config(config)?)
    }

    fn build(scenarios: Vec<Scenario>, ranges: TokenRanges, rng: StdRng) -> Result<Self, AppError> {
        if scenarios.is_empty() {
            return Err(AppError::validation("Scenario table must not be empty"));
        }
        Ok(Self {
            scenarios,
            ranges,
            rng: Mutex::new(rng),
        })
    }

    /// Number of scenarios in the table.
    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    /// Produce one fresh unread event.
    pub fn next_event(&self) -> NotificationEvent {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let scenario = &self.scenarios[rng.gen_range(0..self.scenarios.len())];
        let draft = (scenario.build)(&mut *rng, &self.ranges);
        debug_assert_eq!(draft.detail.category(), scenario.category, "{}", scenario.title);

        NotificationEvent::new(scenario.title, draft.message, draft.subject, draft.detail)
    }
}

impl Default for ScenarioGenerator {
    fn default() -> Self {
        Self {
            scenarios: default_scenarios(),
            ranges: TokenRanges::default(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}
