//! Warming scenarios, SST forcing models, and the selection they form.
//!
//! The scenario table is static configuration: every mutation of the
//! application state validates against it, and nothing else is allowed to
//! invent ensemble ranges or year bounds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Validation errors for scenario/ensemble/SST mutations.
///
/// A rejected mutation leaves the previous state intact; callers surface
/// the message and move on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error("unknown scenario '{0}'")]
    InvalidScenario(String),
    #[error("ensemble {requested} out of range for {scenario} (valid {min}-{max})")]
    OutOfRangeEnsemble {
        scenario: Scenario,
        requested: u32,
        min: u32,
        max: u32,
    },
    #[error("unknown SST model '{0}'")]
    InvalidSstModel(String),
    #[error("heatmap overlays are not available in comparison mode")]
    HeatmapUnavailableInComparison,
}

/// A climate-warming scenario from the large-ensemble experiment set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// Historical climate simulation.
    Current,
    /// Counterfactual non-warming (natural forcing only) simulation.
    Nat,
    /// +2K warming projection, forced by one of six SST models.
    TwoK,
    /// +4K warming projection, forced by one of six SST models.
    FourK,
}

/// Static configuration for one scenario: display label, valid ensemble
/// member range, simulated year bounds, and whether an SST forcing model
/// must accompany it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioConfig {
    pub label: &'static str,
    pub ensemble_min: u32,
    pub ensemble_max: u32,
    pub year_min: i32,
    pub year_max: i32,
    pub requires_sst: bool,
}

const CURRENT_CONFIG: ScenarioConfig = ScenarioConfig {
    label: "Historical",
    ensemble_min: 1,
    ensemble_max: 100,
    year_min: 1951,
    year_max: 2011,
    requires_sst: false,
};

const NAT_CONFIG: ScenarioConfig = ScenarioConfig {
    label: "Non-warming",
    ensemble_min: 1,
    ensemble_max: 100,
    year_min: 1951,
    year_max: 2010,
    requires_sst: false,
};

const TWO_K_CONFIG: ScenarioConfig = ScenarioConfig {
    label: "+2K warming",
    ensemble_min: 1,
    ensemble_max: 9,
    year_min: 2031,
    year_max: 2090,
    requires_sst: true,
};

const FOUR_K_CONFIG: ScenarioConfig = ScenarioConfig {
    label: "+4K warming",
    ensemble_min: 1,
    ensemble_max: 15,
    year_min: 2051,
    year_max: 2110,
    requires_sst: true,
};

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Current,
        Scenario::Nat,
        Scenario::TwoK,
        Scenario::FourK,
    ];

    pub fn config(&self) -> &'static ScenarioConfig {
        match self {
            Scenario::Current => &CURRENT_CONFIG,
            Scenario::Nat => &NAT_CONFIG,
            Scenario::TwoK => &TWO_K_CONFIG,
            Scenario::FourK => &FOUR_K_CONFIG,
        }
    }

    /// Wire identifier used in API query parameters and cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Current => "current",
            Scenario::Nat => "nat",
            Scenario::TwoK => "2k",
            Scenario::FourK => "4k",
        }
    }

    pub fn label(&self) -> &'static str {
        self.config().label
    }

    pub fn requires_sst(&self) -> bool {
        self.config().requires_sst
    }

    pub fn ensemble_in_range(&self, ensemble: u32) -> bool {
        let cfg = self.config();
        ensemble >= cfg.ensemble_min && ensemble <= cfg.ensemble_max
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(Scenario::Current),
            "nat" => Ok(Scenario::Nat),
            "2k" => Ok(Scenario::TwoK),
            "4k" => Ok(Scenario::FourK),
            other => Err(StateError::InvalidScenario(other.to_string())),
        }
    }
}

/// Sea-surface-temperature forcing model used by the warming scenarios.
///
/// The +2K and +4K experiments are each run against six fixed SST
/// patterns; historical and non-warming runs carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SstModel {
    /// CCSM4
    Cc,
    /// GFDL-CM3
    Gf,
    /// HadGEM2-AO
    Ha,
    /// MIROC5
    Mi,
    /// MPI-ESM-MR
    Mp,
    /// MRI-CGCM3
    Mr,
}

impl SstModel {
    pub const ALL: [SstModel; 6] = [
        SstModel::Cc,
        SstModel::Gf,
        SstModel::Ha,
        SstModel::Mi,
        SstModel::Mp,
        SstModel::Mr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SstModel::Cc => "CC",
            SstModel::Gf => "GF",
            SstModel::Ha => "HA",
            SstModel::Mi => "MI",
            SstModel::Mp => "MP",
            SstModel::Mr => "MR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SstModel::Cc => "CCSM4",
            SstModel::Gf => "GFDL-CM3",
            SstModel::Ha => "HadGEM2-AO",
            SstModel::Mi => "MIROC5",
            SstModel::Mp => "MPI-ESM-MR",
            SstModel::Mr => "MRI-CGCM3",
        }
    }
}

impl fmt::Display for SstModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SstModel {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CC" => Ok(SstModel::Cc),
            "GF" => Ok(SstModel::Gf),
            "HA" => Ok(SstModel::Ha),
            "MI" => Ok(SstModel::Mi),
            "MP" => Ok(SstModel::Mp),
            "MR" => Ok(SstModel::Mr),
            other => Err(StateError::InvalidSstModel(other.to_string())),
        }
    }
}

/// What the user is looking at: a scenario, an ensemble member within its
/// range, and (for warming scenarios) an SST forcing model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSelection {
    pub scenario: Scenario,
    pub ensemble: u32,
    /// Present iff the scenario requires SST forcing.
    pub sst: Option<SstModel>,
}

impl ScenarioSelection {
    pub fn new(scenario: Scenario) -> Self {
        let sst = scenario.requires_sst().then_some(SstModel::Cc);
        ScenarioSelection {
            scenario,
            ensemble: scenario.config().ensemble_min,
            sst,
        }
    }

    /// Check the ensemble range and SST requirement.
    pub fn validate(&self) -> Result<(), StateError> {
        let cfg = self.scenario.config();
        if !self.scenario.ensemble_in_range(self.ensemble) {
            return Err(StateError::OutOfRangeEnsemble {
                scenario: self.scenario,
                requested: self.ensemble,
                min: cfg.ensemble_min,
                max: cfg.ensemble_max,
            });
        }
        Ok(())
    }

    /// Cache/dataset key: `scenario[:sst]:ensemble`.
    pub fn dataset_key(&self) -> String {
        match (self.scenario.requires_sst(), self.sst) {
            (true, Some(sst)) => {
                format!("{}:{}:{}", self.scenario.as_str(), sst.as_str(), self.ensemble)
            }
            _ => format!("{}:{}", self.scenario.as_str(), self.ensemble),
        }
    }

    /// Short human-readable description for panels and exports.
    pub fn describe(&self) -> String {
        match (self.scenario.requires_sst(), self.sst) {
            (true, Some(sst)) => format!(
                "{} / {} / member {}",
                self.scenario.label(),
                sst.label(),
                self.ensemble
            ),
            _ => format!("{} / member {}", self.scenario.label(), self.ensemble),
        }
    }
}

impl Default for ScenarioSelection {
    fn default() -> Self {
        ScenarioSelection::new(Scenario::Current)
    }
}
