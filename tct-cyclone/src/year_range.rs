//! Year-range filtering for a scenario's simulated period.

use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};

/// An inclusive year filter over a scenario's simulated period.
///
/// `Unset` means the full scenario bounds with filtering disabled; an
/// explicit `Range` equal to the full bounds is always normalized back to
/// `Unset` so that display strings and the heatmap reset logic can rely
/// on the distinction. `Range { min, max }` with min == max is a valid
/// single-year filter and is NOT the same thing as `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum YearRange {
    #[default]
    Unset,
    Range {
        min: i32,
        max: i32,
    },
}

impl YearRange {
    /// Build a range clamped to the scenario bounds, normalizing a
    /// full-bounds range to `Unset`. Assumes min <= max; conflict
    /// resolution between the bounds happens in the state operations
    /// where the last-changed bound is known.
    pub fn normalized(min: i32, max: i32, scenario: Scenario) -> YearRange {
        let cfg = scenario.config();
        let min = min.clamp(cfg.year_min, cfg.year_max);
        let max = max.clamp(cfg.year_min, cfg.year_max);
        if min == cfg.year_min && max == cfg.year_max {
            YearRange::Unset
        } else {
            YearRange::Range { min, max }
        }
    }

    /// Effective (min, max) bounds under the given scenario.
    pub fn effective_bounds(&self, scenario: Scenario) -> (i32, i32) {
        let cfg = scenario.config();
        match *self {
            YearRange::Unset => (cfg.year_min, cfg.year_max),
            YearRange::Range { min, max } => (min, max),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, YearRange::Unset)
    }

    pub fn contains(&self, year: i32) -> bool {
        match *self {
            YearRange::Unset => true,
            YearRange::Range { min, max } => year >= min && year <= max,
        }
    }

    /// Display string: "All years", "1985", or "1951-2000".
    pub fn label(&self) -> String {
        match *self {
            YearRange::Unset => "All years".to_string(),
            YearRange::Range { min, max } if min == max => min.to_string(),
            YearRange::Range { min, max } => format!("{}-{}", min, max),
        }
    }
}
