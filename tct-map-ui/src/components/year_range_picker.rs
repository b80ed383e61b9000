//! Year range picker with min and max inputs.

use crate::state::{AppState, StateTarget};
use dioxus::prelude::*;

/// Year range picker for filtering the displayed season years.
///
/// Disabled while a heatmap overlay is active (those aggregate the full
/// period); each bound snaps the other when they cross.
#[component]
pub fn YearRangePicker(target: StateTarget) -> Element {
    let mut state = use_context::<AppState>();
    let model = (state.model)();
    let scenario_state = state.selection_state(target);
    let (min, max) = scenario_state.year_bounds();
    let cfg = scenario_state.scenario().config();
    let range_label = scenario_state.years.label();
    let enabled = match target {
        StateTarget::Single => model.year_controls_enabled(),
        _ => true,
    };

    let on_min_change = move |evt: Event<FormData>| {
        if let Ok(year) = evt.value().parse::<i32>() {
            state.apply_selection(target, |s| {
                s.set_year_min(year);
                Ok(())
            });
        }
    };
    let on_max_change = move |evt: Event<FormData>| {
        if let Ok(year) = evt.value().parse::<i32>() {
            state.apply_selection(target, |s| {
                s.set_year_max(year);
                Ok(())
            });
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "From: "
                input {
                    r#type: "number",
                    value: "{min}",
                    min: "{cfg.year_min}",
                    max: "{cfg.year_max}",
                    disabled: !enabled,
                    style: "width: 80px;",
                    onchange: on_min_change,
                }
            }
            label {
                style: "font-weight: bold;",
                "To: "
                input {
                    r#type: "number",
                    value: "{max}",
                    min: "{cfg.year_min}",
                    max: "{cfg.year_max}",
                    disabled: !enabled,
                    style: "width: 80px;",
                    onchange: on_max_change,
                }
            }
            span {
                style: "font-size: 12px; color: #666;",
                "{range_label}"
            }
        }
    }
}
