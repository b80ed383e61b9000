//! Cyclone Track Explorer
//!
//! Interactive map of tropical-cyclone tracks from large-ensemble
//! climate simulations under historical, non-warming, +2K, and +4K
//! scenarios. Supports genesis points, intensity-colored segments,
//! precomputed severity heatmaps, client-computed density heatmaps,
//! A/B scenario comparison, year filtering, and CSV export.
//!
//! Data flow:
//! 1. On mount, the in-memory store and the Leaflet glue initialize.
//! 2. Every model change re-runs the render effect, which fetches the
//!    selected dataset into the store if needed (coalescing duplicate
//!    fetches) and redraws the layers for the active modes.
//! 3. Heatmap builds carry a request generation; a build that finishes
//!    after a newer one started is discarded.

use dioxus::prelude::*;
use tct_cyclone::modes::AppState as AppModel;
use tct_cyclone::scenario::ScenarioSelection;
use tct_data::aggregate::aggregate_tracks;
use tct_data::metrics::{
    cyclone_metrics, density_metrics_from_cells, density_metrics_from_grid,
};
use tct_db::Database;
use tct_map_ui::components::{
    ComparisonPanel, DensityMetricsPanel, EnsembleSelector, ErrorDisplay, ExportButton,
    LoadingSpinner, MapContainer, MetricsPanel, ModeToggles, NoticeDisplay, ScenarioSelector,
    SstSelector, YearRangePicker,
};
use tct_map_ui::layers;
use tct_map_ui::loader;
use tct_map_ui::state::{AppState, StateTarget};
use tct_map_ui::js_bridge;

/// Cyclone data API endpoint.
const API_ENDPOINT: &str = "api/get_cyclone_data.php";
/// Base path of the precomputed density resources.
const DENSITY_BASE_PATH: &str = "data/density";
/// Map container DOM element id.
const MAP_ID: &str = "cyclone-map";
/// Grid resolution in degrees for the client-computed density heatmap.
const DENSITY_RESOLUTION: f64 = 2.0;

/// Track colors for the two comparison sides.
const SIDE_A_COLOR: &str = "#1976D2";
const SIDE_B_COLOR: &str = "#D32F2F";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("cyclone-map-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Initialize the store and map glue on mount
    use_effect(move || {
        web_sys::console::log_1(&"[TCT Debug] App component mounted".into());
        js_bridge::init_map_scripts();
        js_bridge::init_map(MAP_ID, 20.0, 140.0, 3);
        match Database::new() {
            Ok(db) => {
                state.db.set(Some(db));
                state.loading.set(false);
            }
            Err(e) => {
                state
                    .error_msg
                    .set(Some(format!("Store initialization failed: {}", e)));
                state.loading.set(false);
            }
        }
    });

    // Re-render map layers whenever the model changes
    use_effect(move || {
        let model = (state.model)();
        if (state.db)().is_none() {
            return;
        }

        // Comparison side year bounds initialize lazily on first render
        if model.modes.comparison
            && (!model.side_a.years_initialized || !model.side_b.years_initialized)
        {
            state.apply(|m| {
                m.side_a.init_years();
                m.side_b.init_years();
                Ok(())
            });
            return;
        }

        spawn(async move {
            refresh_map(state, model).await;
        });
    });

    let loading = (state.loading)();
    let error = (state.error_msg)();
    let notice = (state.notice_msg)();
    let model = (state.model)();

    rsx! {
        div {
            style: "max-width: 1280px; margin: 0 auto; padding: 16px; font-family: sans-serif;",

            h1 {
                style: "margin: 0 0 4px 0; color: #2c3e50;",
                "Cyclone Track Explorer"
            }
            p {
                style: "margin: 0 0 12px 0; color: #666;",
                "Tropical-cyclone tracks from large-ensemble climate simulations"
            }

            if let Some(message) = error {
                ErrorDisplay { message }
            }
            if let Some(message) = notice {
                NoticeDisplay { message }
            }

            if (state.db)().is_none() {
                LoadingSpinner {}
            } else {
                ModeToggles {}

                if model.modes.comparison {
                    div {
                        style: "display: flex; gap: 16px; flex-wrap: wrap;",
                        ComparisonPanel { target: StateTarget::SideA, label: "Side A".to_string() }
                        ComparisonPanel { target: StateTarget::SideB, label: "Side B".to_string() }
                    }
                } else {
                    div {
                        style: "display: flex; gap: 16px; flex-wrap: wrap; align-items: flex-end;",
                        ScenarioSelector { target: StateTarget::Single }
                        EnsembleSelector { target: StateTarget::Single }
                        SstSelector { target: StateTarget::Single }
                        YearRangePicker { target: StateTarget::Single }
                        ExportButton {}
                    }
                    if model.modes.heatmap_active() {
                        DensityMetricsPanel { metrics: (state.density_metrics)() }
                    } else {
                        MetricsPanel {
                            title: model.single.selection.describe(),
                            metrics: (state.metrics)(),
                        }
                    }
                }
            }

            MapContainer { id: MAP_ID.to_string(), loading }
        }
    }
}

/// Redraw all map layers for the current model.
async fn refresh_map(mut state: AppState, model: AppModel) {
    if model.modes.comparison {
        // Heatmap overlays are off in comparison mode
        js_bridge::clear_overlay_layer(MAP_ID, "density");
        js_bridge::clear_overlay_layer(MAP_ID, "tracks");
        js_bridge::clear_overlay_layer(MAP_ID, "genesis");

        render_comparison_side(state, model, StateTarget::SideA).await;
        render_comparison_side(state, model, StateTarget::SideB).await;
        return;
    }

    js_bridge::clear_overlay_layer(MAP_ID, "tracks_a");
    js_bridge::clear_overlay_layer(MAP_ID, "tracks_b");

    let selection = model.single.selection;
    if !loader::ensure_dataset(state, API_ENDPOINT, selection).await {
        return;
    }
    let Some(db) = (state.db)() else {
        return;
    };

    let cyclones = match db.query_cyclones_with_tracks(&selection.dataset_key(), &model.single.years)
    {
        Ok(cyclones) => cyclones,
        Err(e) => {
            log::error!("[TCT] app: query failed: {}", e);
            return;
        }
    };
    state.metrics.set(Some(cyclone_metrics(&cyclones)));

    if model.modes.severity_heatmap {
        js_bridge::clear_overlay_layer(MAP_ID, "tracks");
        js_bridge::clear_overlay_layer(MAP_ID, "genesis");
        loader::load_density(state, DENSITY_BASE_PATH, selection).await;

        let cells = (state.density_cells)();
        web_sys::console::log_1(
            &format!("[TCT Debug] severity heatmap: {} cells", cells.len()).into(),
        );
        state
            .density_metrics
            .set(Some(density_metrics_from_cells(&cells)));
        let rects = layers::density_rects_from_cells(&cells);
        let max_count = cells.iter().map(|c| c.count).max().unwrap_or(1);
        render_density(&rects, max_count);
        return;
    }

    if model.modes.density_heatmap {
        js_bridge::clear_overlay_layer(MAP_ID, "tracks");
        js_bridge::clear_overlay_layer(MAP_ID, "genesis");

        // Tag the build so a rapid mode/selection change discards it
        let generation = (state.generation)() + 1;
        state.generation.set(generation);
        let grid = aggregate_tracks(&cyclones, DENSITY_RESOLUTION);
        if (state.generation)() != generation {
            log::info!("[TCT] app: discarding stale density grid");
            return;
        }
        let stats = grid.stats();
        web_sys::console::log_1(
            &format!("[TCT Debug] density heatmap: {} active cells", stats.active_cells).into(),
        );
        state.density_metrics.set(Some(density_metrics_from_grid(&grid)));
        let rects = layers::density_rects_from_grid(&grid);
        render_density(&rects, stats.max_count.max(1));
        return;
    }

    js_bridge::clear_overlay_layer(MAP_ID, "density");

    if model.modes.tracks || model.modes.intensity {
        let features = layers::track_features(&cyclones);
        let opts = serde_json::json!({
            "layer": "tracks",
            "intensity": model.modes.intensity,
            "color": "#555"
        });
        js_bridge::render_track_layer(
            MAP_ID,
            &serde_json::to_string(&features).unwrap_or_default(),
            &opts.to_string(),
        );
    } else {
        js_bridge::clear_overlay_layer(MAP_ID, "tracks");
    }

    if model.modes.genesis {
        let features = layers::genesis_features(&cyclones);
        let opts = serde_json::json!({ "layer": "genesis" });
        js_bridge::render_genesis_layer(
            MAP_ID,
            &serde_json::to_string(&features).unwrap_or_default(),
            &opts.to_string(),
        );
    } else {
        js_bridge::clear_overlay_layer(MAP_ID, "genesis");
    }
}

fn render_density(rects: &[layers::DensityRect], max_count: u32) {
    let opts = serde_json::json!({ "layer": "density", "max_count": max_count });
    js_bridge::render_density_layer(
        MAP_ID,
        &serde_json::to_string(rects).unwrap_or_default(),
        &opts.to_string(),
    );
}

/// Fetch, render, and summarize one comparison side.
async fn render_comparison_side(state: AppState, model: AppModel, target: StateTarget) {
    let (side, layer, color) = match target {
        StateTarget::SideA => (model.side_a, "tracks_a", SIDE_A_COLOR),
        _ => (model.side_b, "tracks_b", SIDE_B_COLOR),
    };
    let mut metrics_signal = match target {
        StateTarget::SideA => state.metrics_a,
        _ => state.metrics_b,
    };

    if !side.visible {
        js_bridge::clear_overlay_layer(MAP_ID, layer);
        metrics_signal.set(None);
        return;
    }

    let selection: ScenarioSelection = side.state.selection;
    if !loader::ensure_dataset(state, API_ENDPOINT, selection).await {
        return;
    }
    let Some(db) = (state.db)() else {
        return;
    };
    let cyclones =
        match db.query_cyclones_with_tracks(&selection.dataset_key(), &side.state.years) {
            Ok(cyclones) => cyclones,
            Err(e) => {
                log::error!("[TCT] app: comparison query failed: {}", e);
                return;
            }
        };
    metrics_signal.set(Some(cyclone_metrics(&cyclones)));

    let features = layers::track_features(&cyclones);
    let opts = serde_json::json!({
        "layer": layer,
        "intensity": false,
        "color": color
    });
    js_bridge::render_track_layer(
        MAP_ID,
        &serde_json::to_string(&features).unwrap_or_default(),
        &opts.to_string(),
    );
}
