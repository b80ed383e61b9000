//! Query result model structs for the cyclone store.
//!
//! All structs derive `Serialize` so they can be handed to the map
//! bridge as JSON from the Dioxus WASM frontend.

use serde::Serialize;

/// Cyclone summary row for list panels and metrics, without the track.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CycloneInfo {
    pub cyclone_id: String,
    pub name: String,
    /// Season year of the cyclone.
    pub year: i32,
    /// Peak Saffir-Simpson-style category over the track (0-5).
    pub max_category: u8,
    /// Peak sustained wind over the track (km/h).
    pub max_wind: f64,
    /// Minimum central pressure over the track (hPa).
    pub min_pressure: f64,
    pub genesis_lat: Option<f64>,
    pub genesis_lon: Option<f64>,
    pub landfall: bool,
    pub duration_days: f64,
}

/// One loaded dataset and its size.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetSummary {
    /// `scenario[:sst]:ensemble`
    pub dataset_key: String,
    pub cyclone_count: u32,
}
