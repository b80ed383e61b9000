//! CSV export button for the currently displayed cyclone set.

use crate::js_bridge;
use crate::state::{AppState, StateTarget};
use dioxus::prelude::*;
use tct_cyclone::export::export_cyclones_csv;

/// Exports the single-mode filtered cyclone set as CSV.
#[component]
pub fn ExportButton() -> Element {
    let state = use_context::<AppState>();

    let on_click = move |_| {
        let Some(db) = (state.db)() else {
            return;
        };
        let scenario_state = state.selection_state(StateTarget::Single);
        let key = scenario_state.selection.dataset_key();
        let cyclones = match db.query_cyclones_with_tracks(&key, &scenario_state.years) {
            Ok(cyclones) => cyclones,
            Err(e) => {
                log::error!("[TCT] export: query failed: {}", e);
                return;
            }
        };
        match export_cyclones_csv(&cyclones) {
            Ok(csv) => {
                let filename = format!("cyclones_{}.csv", key.replace(':', "_"));
                js_bridge::download_csv(&filename, &csv);
            }
            Err(e) => log::error!("[TCT] export: CSV build failed: {}", e),
        }
    };

    rsx! {
        button {
            style: "padding: 6px 14px; margin: 8px 0; cursor: pointer;",
            onclick: on_click,
            "Export CSV"
        }
    }
}
