//! Visualization mode flags and the whole-application state model.
//!
//! The mode set is a live toggle machine: track/genesis/intensity are
//! independent flags, the two heatmap overlays are mutually exclusive
//! with each other and with comparison mode, and every transition is
//! re-entered on each user action. No terminal state.

use crate::scenario::{Scenario, StateError};
use crate::state::ScenarioState;
use serde::{Deserialize, Serialize};

/// Which display layers are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VizModes {
    pub tracks: bool,
    pub genesis: bool,
    pub intensity: bool,
    pub severity_heatmap: bool,
    pub density_heatmap: bool,
    pub comparison: bool,
}

impl Default for VizModes {
    fn default() -> Self {
        VizModes {
            tracks: true,
            genesis: true,
            intensity: false,
            severity_heatmap: false,
            density_heatmap: false,
            comparison: false,
        }
    }
}

impl VizModes {
    pub fn heatmap_active(&self) -> bool {
        self.severity_heatmap || self.density_heatmap
    }
}

/// One side of an A/B comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSide {
    pub state: ScenarioState,
    pub visible: bool,
    /// Year bounds are initialized lazily on first render, so a side the
    /// user never opened carries no stale range.
    pub years_initialized: bool,
}

impl ComparisonSide {
    fn new(scenario: Scenario) -> Self {
        ComparisonSide {
            state: ScenarioState::new(scenario),
            visible: true,
            years_initialized: false,
        }
    }

    /// First-render initialization: the side's year filter starts at its
    /// scenario's full bounds (`Unset`) unless the user already set one.
    pub fn init_years(&mut self) {
        if !self.years_initialized {
            self.years_initialized = true;
        }
    }
}

/// The complete application state: one single-mode dataset selection,
/// two comparison sides, and the active mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub single: ScenarioState,
    pub side_a: ComparisonSide,
    pub side_b: ComparisonSide,
    pub modes: VizModes,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            single: ScenarioState::new(Scenario::Current),
            side_a: ComparisonSide::new(Scenario::Current),
            side_b: ComparisonSide::new(Scenario::FourK),
            modes: VizModes::default(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState::default()
    }

    /// Whether the single-mode year controls accept input. Heatmap
    /// overlays aggregate the full period, and comparison mode carries
    /// its own per-side ranges.
    pub fn year_controls_enabled(&self) -> bool {
        !self.modes.heatmap_active() && !self.modes.comparison
    }

    /// Enable a track-style layer flag. If a heatmap overlay is active it
    /// is switched off first and year controls come back; the heatmap
    /// never wins over an explicit track-layer request.
    pub fn set_track_flag(&mut self, flag: TrackFlag, on: bool) {
        if on && self.modes.heatmap_active() {
            self.modes.severity_heatmap = false;
            self.modes.density_heatmap = false;
        }
        match flag {
            TrackFlag::Tracks => self.modes.tracks = on,
            TrackFlag::Genesis => self.modes.genesis = on,
            TrackFlag::Intensity => self.modes.intensity = on,
        }
    }

    /// Toggle the severity (precomputed) heatmap overlay.
    ///
    /// Unavailable in comparison mode: the request is rejected with a
    /// notice rather than silently dropped. Enabling it turns off the
    /// density heatmap and resets the year filter to the full period.
    pub fn set_severity_heatmap(&mut self, on: bool) -> Result<(), StateError> {
        if on && self.modes.comparison {
            return Err(StateError::HeatmapUnavailableInComparison);
        }
        if on {
            self.modes.density_heatmap = false;
            self.single.clear_year_range();
        }
        self.modes.severity_heatmap = on;
        Ok(())
    }

    /// Toggle the client-computed density heatmap overlay. Same rules as
    /// the severity heatmap; the two are mutually exclusive.
    pub fn set_density_heatmap(&mut self, on: bool) -> Result<(), StateError> {
        if on && self.modes.comparison {
            return Err(StateError::HeatmapUnavailableInComparison);
        }
        if on {
            self.modes.severity_heatmap = false;
            self.single.clear_year_range();
        }
        self.modes.density_heatmap = on;
        Ok(())
    }

    /// Enter comparison mode. Idempotent; any active heatmap overlay is
    /// dropped and the per-side year ranges initialize lazily on first
    /// render.
    pub fn enter_comparison(&mut self) {
        if self.modes.comparison {
            return;
        }
        self.modes.severity_heatmap = false;
        self.modes.density_heatmap = false;
        self.modes.comparison = true;
    }

    /// Leave comparison mode. Idempotent; single-mode year controls are
    /// live again afterwards.
    pub fn exit_comparison(&mut self) {
        self.modes.comparison = false;
    }
}

/// The independently-togglable track-style layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFlag {
    Tracks,
    Genesis,
    Intensity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_range::YearRange;

    #[test]
    fn test_initial_state() {
        let app = AppState::new();
        assert!(app.modes.tracks);
        assert!(app.modes.genesis);
        assert!(!app.modes.intensity);
        assert!(!app.modes.heatmap_active());
        assert!(!app.modes.comparison);
        assert!(app.year_controls_enabled());
    }

    #[test]
    fn test_heatmaps_mutually_exclusive() {
        let mut app = AppState::new();
        app.set_severity_heatmap(true).unwrap();
        assert!(app.modes.severity_heatmap);

        app.set_density_heatmap(true).unwrap();
        assert!(app.modes.density_heatmap);
        assert!(!app.modes.severity_heatmap);

        app.set_severity_heatmap(true).unwrap();
        assert!(app.modes.severity_heatmap);
        assert!(!app.modes.density_heatmap);
    }

    #[test]
    fn test_heatmap_resets_year_filter() {
        let mut app = AppState::new();
        app.single.set_year_range(1960, 1980);
        app.set_density_heatmap(true).unwrap();
        assert!(app.single.years.is_unset());
        assert!(!app.year_controls_enabled());
    }

    #[test]
    fn test_track_flag_wins_over_heatmap() {
        let mut app = AppState::new();
        app.set_severity_heatmap(true).unwrap();
        app.set_track_flag(TrackFlag::Intensity, true);
        assert!(app.modes.intensity);
        assert!(!app.modes.heatmap_active());
        assert!(app.year_controls_enabled());
    }

    #[test]
    fn test_disabling_track_flag_leaves_heatmap_alone() {
        let mut app = AppState::new();
        app.set_density_heatmap(true).unwrap();
        app.set_track_flag(TrackFlag::Genesis, false);
        assert!(app.modes.density_heatmap);
        assert!(!app.modes.genesis);
    }

    #[test]
    fn test_heatmap_rejected_in_comparison() {
        let mut app = AppState::new();
        app.enter_comparison();
        assert_eq!(
            app.set_severity_heatmap(true),
            Err(StateError::HeatmapUnavailableInComparison)
        );
        assert_eq!(
            app.set_density_heatmap(true),
            Err(StateError::HeatmapUnavailableInComparison)
        );
        assert!(!app.modes.heatmap_active());
    }

    #[test]
    fn test_comparison_drops_heatmap() {
        let mut app = AppState::new();
        app.set_density_heatmap(true).unwrap();
        app.enter_comparison();
        assert!(!app.modes.heatmap_active());
        assert!(app.modes.comparison);
    }

    #[test]
    fn test_comparison_idempotent() {
        let mut app = AppState::new();
        app.enter_comparison();
        let snapshot = app;
        app.enter_comparison();
        assert_eq!(app, snapshot);

        app.exit_comparison();
        assert!(!app.modes.comparison);
        assert!(app.year_controls_enabled());
        app.exit_comparison();
        assert!(!app.modes.comparison);
    }

    #[test]
    fn test_side_years_initialize_once() {
        let mut side = ComparisonSide::new(Scenario::TwoK);
        assert!(!side.years_initialized);
        side.init_years();
        assert!(side.years_initialized);
        assert!(side.state.years.is_unset());

        // A user-set range survives later init calls
        side.state.set_year_range(2040, 2060);
        side.init_years();
        assert_eq!(side.state.years, YearRange::Range { min: 2040, max: 2060 });
    }
}
