//! Dropdown selector for the SST forcing model.

use crate::state::{AppState, StateTarget};
use dioxus::prelude::*;
use tct_cyclone::scenario::SstModel;

/// SST model dropdown; rendered only for warming scenarios.
#[component]
pub fn SstSelector(target: StateTarget) -> Element {
    let mut state = use_context::<AppState>();
    let scenario_state = state.selection_state(target);
    if !scenario_state.scenario().requires_sst() {
        return rsx! {};
    }
    let selected = scenario_state.selection.sst;
    let options: Vec<(&str, &str, bool)> = SstModel::ALL
        .iter()
        .map(|s| (s.as_str(), s.label(), Some(*s) == selected))
        .collect();

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        state.apply_selection(target, |s| s.set_sst(&value));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                style: "font-weight: bold; margin-right: 8px;",
                "SST model: "
            }
            select {
                onchange: on_change,
                for (value, label, is_selected) in options {
                    option {
                        value: "{value}",
                        selected: is_selected,
                        "{label}"
                    }
                }
            }
        }
    }
}
