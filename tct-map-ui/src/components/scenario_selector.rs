//! Dropdown selector for choosing a warming scenario.

use crate::state::{AppState, StateTarget};
use dioxus::prelude::*;
use tct_cyclone::scenario::Scenario;

/// Scenario dropdown selector.
/// Switching scenario clamps the ensemble member and resets the year
/// filter via the state operations; this component only forwards the id.
#[component]
pub fn ScenarioSelector(target: StateTarget) -> Element {
    let mut state = use_context::<AppState>();
    let selected = state.selection_state(target).selection.scenario;
    let options: Vec<(&str, &str, bool)> = Scenario::ALL
        .iter()
        .map(|s| (s.as_str(), s.label(), *s == selected))
        .collect();

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        state.apply_selection(target, |s| s.set_scenario(&value));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                style: "font-weight: bold; margin-right: 8px;",
                "Scenario: "
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
