//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided
//! via `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()`. The scenario/mode model itself is the
//! pure state machine from `tct-cyclone`; components mutate a copy
//! through its named operations and write it back, so every invariant
//! lives in one place.

use dioxus::prelude::*;
use std::collections::HashSet;
use tct_cyclone::density::GridCell;
use tct_cyclone::modes::AppState as AppModel;
use tct_cyclone::scenario::StateError;
use tct_cyclone::state::ScenarioState;
use tct_data::metrics::{CycloneMetrics, DensityMetrics};
use tct_db::Database;

/// Which dataset selection a control edits: the single-mode one or one
/// of the two comparison sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTarget {
    Single,
    SideA,
    SideB,
}

/// Shared application state for the cyclone map app.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Cyclone store (None until created on mount)
    pub db: Signal<Option<Database>>,
    /// Whether a fetch is in progress (drives the loading overlay)
    pub loading: Signal<bool>,
    /// User-visible error message, if any
    pub error_msg: Signal<Option<String>>,
    /// User-visible informational notice (e.g. a rejected mode toggle)
    pub notice_msg: Signal<Option<String>>,
    /// The scenario/year/mode model
    pub model: Signal<AppModel>,
    /// Parsed precomputed density cells for the active heatmap
    pub density_cells: Signal<Vec<GridCell>>,
    /// Monotonic heatmap request generation; stale completions bail out
    pub generation: Signal<u64>,
    /// Dataset keys with a fetch currently in flight
    pub in_flight: Signal<HashSet<String>>,
    /// Metrics for the single-mode filtered set
    pub metrics: Signal<Option<CycloneMetrics>>,
    /// Metrics per comparison side
    pub metrics_a: Signal<Option<CycloneMetrics>>,
    pub metrics_b: Signal<Option<CycloneMetrics>>,
    /// Metrics for the active heatmap overlay
    pub density_metrics: Signal<Option<DensityMetrics>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            db: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            notice_msg: Signal::new(None),
            model: Signal::new(AppModel::new()),
            density_cells: Signal::new(Vec::new()),
            generation: Signal::new(0),
            in_flight: Signal::new(HashSet::new()),
            metrics: Signal::new(None),
            metrics_a: Signal::new(None),
            metrics_b: Signal::new(None),
            density_metrics: Signal::new(None),
        }
    }

    /// Apply a model mutation, writing the result back only on success.
    ///
    /// Every rejection is logged and leaves the model untouched; only a
    /// rejected heatmap toggle surfaces a notice, since the controls that
    /// can raise plain validation errors re-render from the unchanged
    /// model anyway.
    pub fn apply<F>(&mut self, mutate: F)
    where
        F: FnOnce(&mut AppModel) -> Result<(), StateError>,
    {
        let mut model = (self.model)();
        match mutate(&mut model) {
            Ok(()) => {
                self.model.set(model);
                self.notice_msg.set(None);
            }
            Err(e) => {
                log::warn!("[TCT] state: rejected mutation: {}", e);
                if matches!(e, StateError::HeatmapUnavailableInComparison) {
                    self.notice_msg.set(Some(e.to_string()));
                }
            }
        }
    }

    /// Apply a mutation to the selection a control is bound to.
    pub fn apply_selection<F>(&mut self, target: StateTarget, mutate: F)
    where
        F: FnOnce(&mut ScenarioState) -> Result<(), StateError>,
    {
        self.apply(|model| {
            let scenario_state = match target {
                StateTarget::Single => &mut model.single,
                StateTarget::SideA => &mut model.side_a.state,
                StateTarget::SideB => &mut model.side_b.state,
            };
            mutate(scenario_state)
        });
    }

    /// Read the selection a control is bound to.
    pub fn selection_state(&self, target: StateTarget) -> ScenarioState {
        let model = (self.model)();
        match target {
            StateTarget::Single => model.single,
            StateTarget::SideA => model.side_a.state,
            StateTarget::SideB => model.side_b.state,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
