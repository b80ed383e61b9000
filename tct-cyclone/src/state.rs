//! Scenario selection state and its mutation operations.
//!
//! `ScenarioState` is the single source of truth for one displayed
//! dataset. Every mutation validates against the scenario table, applies
//! completely or not at all, and is free of side effects: no fetching, no
//! rendering. UI callbacks reduce to "translate event, call operation";
//! reactions to the new state live with the caller.

use crate::scenario::{Scenario, ScenarioSelection, SstModel, StateError};
use crate::year_range::YearRange;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Selection plus year filter for a single displayed dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioState {
    pub selection: ScenarioSelection,
    pub years: YearRange,
}

impl ScenarioState {
    pub fn new(scenario: Scenario) -> Self {
        ScenarioState {
            selection: ScenarioSelection::new(scenario),
            years: YearRange::Unset,
        }
    }

    pub fn scenario(&self) -> Scenario {
        self.selection.scenario
    }

    /// Switch scenario by wire id.
    ///
    /// On success the ensemble is clamped into the new scenario's range
    /// (falling back to the first member when out of range), the year
    /// filter resets to the new scenario's full bounds, and the SST model
    /// is defaulted or dropped according to the new scenario's needs.
    pub fn set_scenario(&mut self, id: &str) -> Result<(), StateError> {
        let scenario = Scenario::from_str(id)?;
        let cfg = scenario.config();
        let ensemble = if scenario.ensemble_in_range(self.selection.ensemble) {
            self.selection.ensemble
        } else {
            cfg.ensemble_min
        };
        let sst = if scenario.requires_sst() {
            self.selection.sst.or(Some(SstModel::Cc))
        } else {
            None
        };
        self.selection = ScenarioSelection {
            scenario,
            ensemble,
            sst,
        };
        self.years = YearRange::Unset;
        Ok(())
    }

    pub fn set_ensemble(&mut self, ensemble: u32) -> Result<(), StateError> {
        let candidate = ScenarioSelection {
            ensemble,
            ..self.selection
        };
        candidate.validate()?;
        self.selection = candidate;
        Ok(())
    }

    /// Set the SST forcing model by wire id.
    ///
    /// A no-op (not an error) for scenarios without SST forcing; rejects
    /// ids outside the fixed six-model set otherwise.
    pub fn set_sst(&mut self, id: &str) -> Result<(), StateError> {
        if !self.selection.scenario.requires_sst() {
            return Ok(());
        }
        let sst = SstModel::from_str(id)?;
        self.selection.sst = Some(sst);
        Ok(())
    }

    /// Move the lower year bound. If it crosses the upper bound, the
    /// upper bound (not changed last) snaps down to match.
    pub fn set_year_min(&mut self, year: i32) {
        let (_, max) = self.years.effective_bounds(self.scenario());
        let max = max.max(year);
        self.years = YearRange::normalized(year, max, self.scenario());
    }

    /// Move the upper year bound. If it crosses the lower bound, the
    /// lower bound snaps up to match.
    pub fn set_year_max(&mut self, year: i32) {
        let (min, _) = self.years.effective_bounds(self.scenario());
        let min = min.min(year);
        self.years = YearRange::normalized(min, year, self.scenario());
    }

    /// Set both bounds at once. A crossed pair resolves as if the upper
    /// bound was entered last: the lower bound snaps up to it.
    pub fn set_year_range(&mut self, min: i32, max: i32) {
        let min = min.min(max);
        self.years = YearRange::normalized(min, max, self.scenario());
    }

    /// Drop year filtering back to the full scenario bounds.
    pub fn clear_year_range(&mut self) {
        self.years = YearRange::Unset;
    }

    /// Effective (min, max) year bounds for queries and display.
    pub fn year_bounds(&self) -> (i32, i32) {
        self.years.effective_bounds(self.scenario())
    }
}

impl Default for ScenarioState {
    fn default() -> Self {
        ScenarioState::new(Scenario::Current)
    }
}
