//! Numeric selector for the ensemble member.

use crate::state::{AppState, StateTarget};
use dioxus::prelude::*;

/// Ensemble member input, bounded by the active scenario's range.
#[component]
pub fn EnsembleSelector(target: StateTarget) -> Element {
    let mut state = use_context::<AppState>();
    let scenario_state = state.selection_state(target);
    let cfg = scenario_state.scenario().config();
    let current = scenario_state.selection.ensemble;

    let on_change = move |evt: Event<FormData>| {
        if let Ok(value) = evt.value().parse::<u32>() {
            state.apply_selection(target, |s| s.set_ensemble(value));
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                style: "font-weight: bold; margin-right: 8px;",
                "Member: "
            }
            input {
                r#type: "number",
                value: "{current}",
                min: "{cfg.ensemble_min}",
                max: "{cfg.ensemble_max}",
                style: "width: 70px;",
                onchange: on_change,
            }
            span {
                style: "margin-left: 6px; font-size: 12px; color: #666;",
                "(1-{cfg.ensemble_max})"
            }
        }
    }
}
