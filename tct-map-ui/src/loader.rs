//! Async data loading with stale-result and coalescing guards.
//!
//! All fetches run on the single-threaded WASM event loop. Two guards
//! keep rapid control toggling sane:
//!
//! - same-key coalescing: a dataset fetch is skipped outright while an
//!   identical one is in flight (not queued, not duplicated);
//! - generation counter: each heatmap build bumps a request generation
//!   at start and re-checks it after every await, so an older build that
//!   completes late is discarded without touching any state.
//!
//! The loading flag is set before a fetch starts and cleared on every
//! exit path: success, failure, and stale abandonment.

use crate::state::AppState;
use dioxus::prelude::*;
use tct_cyclone::api::{cyclone_data_url, parse_cyclone_response, DataError};
use tct_cyclone::density::{density_resource_filename, parse_density_csv, GridCell};
use tct_cyclone::scenario::ScenarioSelection;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Fetch a URL and return the response body as text.
pub async fn fetch_text(url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("no window object")?;
    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch failed: {:?}", e))?;
    let response: web_sys::Response = response_value
        .dyn_into()
        .map_err(|_| "fetch returned a non-Response".to_string())?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    let text_promise = response
        .text()
        .map_err(|e| format!("body read failed: {:?}", e))?;
    let text_value = JsFuture::from(text_promise)
        .await
        .map_err(|e| format!("body read failed: {:?}", e))?;
    text_value
        .as_string()
        .ok_or_else(|| "response body was not text".to_string())
}

/// Ensure the cyclone dataset for a selection is present in the store.
///
/// Returns true when the dataset is available afterwards. A fetch
/// already in flight for the same key makes this a no-op returning
/// false; the first request's completion re-renders for both.
pub async fn ensure_dataset(mut state: AppState, endpoint: &str, selection: ScenarioSelection) -> bool {
    let key = selection.dataset_key();

    let db = match (state.db)() {
        Some(db) => db,
        None => return false,
    };
    match db.has_dataset(&key) {
        Ok(true) => return true,
        Ok(false) => {}
        Err(e) => {
            log::error!("[TCT] loader: store check failed: {}", e);
            return false;
        }
    }
    if state.in_flight.read().contains(&key) {
        log::info!("[TCT] loader: fetch for '{}' already in flight, skipping", key);
        return false;
    }

    state.in_flight.write().insert(key.clone());
    state.loading.set(true);

    let url = cyclone_data_url(endpoint, &selection, false);
    let outcome = fetch_text(&url).await;

    state.in_flight.write().remove(&key);
    state.loading.set(false);

    let body = match outcome {
        Ok(body) => body,
        Err(e) => {
            log::error!("[TCT] loader: {}", e);
            state
                .error_msg
                .set(Some(format!("Failed to load cyclone data: {}", e)));
            return false;
        }
    };
    let data = match parse_cyclone_response(&body) {
        Ok(data) => data,
        Err(e) => {
            log::error!("[TCT] loader: {}", e);
            state
                .error_msg
                .set(Some(format!("Failed to load cyclone data: {}", e)));
            return false;
        }
    };
    if let Err(e) = db.load_dataset(&key, &data.cyclones) {
        log::error!("[TCT] loader: store insert failed: {}", e);
        state
            .error_msg
            .set(Some(format!("Failed to cache cyclone data: {}", e)));
        return false;
    }
    state.error_msg.set(None);
    true
}

/// Decide what a completed density fetch is allowed to do.
///
/// `started` is the generation captured when the fetch began; `current`
/// is the generation now. A mismatch means a newer build superseded this
/// one and the result must be discarded without any state mutation. A
/// fetch failure becomes `DensityResourceUnavailable` - the heatmap
/// degrades to an empty overlay, never to client-side aggregation.
pub fn resolve_density_fetch(
    started: u64,
    current: u64,
    outcome: Result<String, String>,
) -> Result<Vec<GridCell>, DataError> {
    if started != current {
        return Err(DataError::Stale);
    }
    let body = outcome.map_err(DataError::DensityResourceUnavailable)?;
    parse_density_csv(&body)
}

/// Fetch and parse the precomputed density resource for a selection.
///
/// Bumps the heatmap request generation; a completion that finds a newer
/// generation discards its result. A missing or malformed resource
/// leaves the heatmap mode selected with an empty overlay and a warning.
pub async fn load_density(mut state: AppState, base_path: &str, selection: ScenarioSelection) {
    let generation = (state.generation)() + 1;
    state.generation.set(generation);
    state.loading.set(true);

    let url = format!("{}/{}", base_path, density_resource_filename(&selection));
    let outcome = fetch_text(&url).await;
    state.loading.set(false);

    match resolve_density_fetch(generation, (state.generation)(), outcome) {
        Ok(cells) => {
            log::info!("[TCT] loader: density resource yielded {} cells", cells.len());
            state.density_cells.set(cells);
        }
        Err(DataError::Stale) => {
            log::info!("[TCT] loader: discarding stale density result for {}", url);
        }
        Err(e) => {
            log::warn!("[TCT] loader: {}", e);
            state.density_cells.set(Vec::new());
            state.notice_msg.set(Some(
                "Precomputed density data is unavailable for this selection".to_string(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "ix,iy,count,lon_west,lon_east,lat_south,lat_north,lon_center,lat_center\n\
                        160,52,14,140.0,142.0,14.0,16.0,141.0,15.0\n";

    #[test]
    fn test_stale_completion_discarded() {
        // Build #1 starts at generation 1, build #2 bumps to 2 before #1
        // resolves: #1's completion must be dropped, #2's applied.
        let first = resolve_density_fetch(1, 2, Ok(BODY.to_string()));
        assert_eq!(first, Err(DataError::Stale));

        let second = resolve_density_fetch(2, 2, Ok(BODY.to_string()));
        let cells = second.unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].count, 14);
    }

    #[test]
    fn test_fetch_failure_is_unavailable_not_stale() {
        let result = resolve_density_fetch(3, 3, Err("HTTP 404".to_string()));
        assert!(matches!(
            result,
            Err(DataError::DensityResourceUnavailable(_))
        ));
    }
}
