//! Side-by-side controls for comparison mode.

use crate::components::{
    EnsembleSelector, MetricsPanel, ScenarioSelector, SstSelector, YearRangePicker,
};
use crate::state::{AppState, StateTarget};
use dioxus::prelude::*;

/// Controls and metrics for one comparison side (A or B).
#[component]
pub fn ComparisonPanel(target: StateTarget, label: String) -> Element {
    let mut state = use_context::<AppState>();
    let model = (state.model)();
    let side = match target {
        StateTarget::SideA => model.side_a,
        _ => model.side_b,
    };
    let metrics = match target {
        StateTarget::SideA => (state.metrics_a)(),
        _ => (state.metrics_b)(),
    };
    let description = side.state.selection.describe();

    let on_visible = move |evt: Event<FormData>| {
        state.apply(|m| {
            let side = match target {
                StateTarget::SideA => &mut m.side_a,
                _ => &mut m.side_b,
            };
            side.visible = evt.checked();
            Ok(())
        });
    };

    rsx! {
        div {
            style: "flex: 1; min-width: 280px; padding: 10px; border: 1px solid #E0E0E0; border-radius: 4px;",
            div {
                style: "display: flex; justify-content: space-between; align-items: center;",
                h3 {
                    style: "margin: 0; font-size: 15px;",
                    "{label}"
                }
                label {
                    style: "font-size: 13px;",
                    input {
                        r#type: "checkbox",
                        checked: side.visible,
                        onchange: on_visible,
                        style: "margin-right: 4px;",
                    }
                    "Show on map"
                }
            }
            ScenarioSelector { target }
            EnsembleSelector { target }
            SstSelector { target }
            YearRangePicker { target }
            MetricsPanel { title: description, metrics }
        }
    }
}
