//! Visualization mode toggles.
//!
//! Track/genesis/intensity are independent checkboxes; the two heatmap
//! toggles and the comparison switch go through the mode operations so
//! mutual exclusion is enforced in one place. A rejected heatmap toggle
//! (comparison active) surfaces as a notice, not a silent revert.

use crate::state::AppState;
use dioxus::prelude::*;
use tct_cyclone::modes::TrackFlag;

#[component]
pub fn ModeToggles() -> Element {
    let mut state = use_context::<AppState>();
    let modes = (state.model)().modes;

    let on_tracks = move |evt: Event<FormData>| {
        state.apply(|m| {
            m.set_track_flag(TrackFlag::Tracks, evt.checked());
            Ok(())
        });
    };
    let on_genesis = move |evt: Event<FormData>| {
        state.apply(|m| {
            m.set_track_flag(TrackFlag::Genesis, evt.checked());
            Ok(())
        });
    };
    let on_intensity = move |evt: Event<FormData>| {
        state.apply(|m| {
            m.set_track_flag(TrackFlag::Intensity, evt.checked());
            Ok(())
        });
    };
    let on_severity = move |evt: Event<FormData>| {
        state.apply(|m| m.set_severity_heatmap(evt.checked()));
    };
    let on_density = move |evt: Event<FormData>| {
        state.apply(|m| m.set_density_heatmap(evt.checked()));
    };
    let on_comparison = move |evt: Event<FormData>| {
        state.apply(|m| {
            if evt.checked() {
                m.enter_comparison();
            } else {
                m.exit_comparison();
            }
            Ok(())
        });
    };

    let checkbox_style = "margin-right: 4px;";
    let label_style = "margin-right: 14px;";

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; flex-wrap: wrap; align-items: center;",
            label {
                style: "{label_style}",
                input {
                    r#type: "checkbox",
                    style: "{checkbox_style}",
                    checked: modes.tracks,
                    onchange: on_tracks,
                }
                "Tracks"
            }
            label {
                style: "{label_style}",
                input {
                    r#type: "checkbox",
                    style: "{checkbox_style}",
                    checked: modes.genesis,
                    onchange: on_genesis,
                }
                "Genesis points"
            }
            label {
                style: "{label_style}",
                input {
                    r#type: "checkbox",
                    style: "{checkbox_style}",
                    checked: modes.intensity,
                    onchange: on_intensity,
                }
                "Intensity colors"
            }
            label {
                style: "{label_style}",
                input {
                    r#type: "checkbox",
                    style: "{checkbox_style}",
                    checked: modes.severity_heatmap,
                    disabled: modes.comparison,
                    onchange: on_severity,
                }
                "Severity heatmap"
            }
            label {
                style: "{label_style}",
                input {
                    r#type: "checkbox",
                    style: "{checkbox_style}",
                    checked: modes.density_heatmap,
                    disabled: modes.comparison,
                    onchange: on_density,
                }
                "Density heatmap"
            }
            label {
                style: "{label_style}",
                input {
                    r#type: "checkbox",
                    style: "{checkbox_style}",
                    checked: modes.comparison,
                    onchange: on_comparison,
                }
                "Compare scenarios"
            }
        }
    }
}
