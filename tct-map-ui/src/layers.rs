//! JSON layer payloads for the map bridge.
//!
//! The bridge takes flat JSON; these builders turn store query results
//! into exactly the shapes the glue scripts expect.

use serde::Serialize;
use tct_cyclone::density::GridCell;
use tct_cyclone::track::Cyclone;
use tct_data::aggregate::DensityGrid;

/// One renderable track: name/year for the tooltip plus
/// [lat, lon, category] triples.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrackFeature {
    pub id: String,
    pub name: String,
    pub year: i32,
    /// [lat, lon, category] per point
    pub points: Vec<(f64, f64, u8)>,
}

/// One genesis marker.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenesisFeature {
    pub lat: f64,
    pub lon: f64,
    pub category: u8,
}

/// One density rectangle in map coordinates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DensityRect {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub count: u32,
}

pub fn track_features(cyclones: &[Cyclone]) -> Vec<TrackFeature> {
    cyclones
        .iter()
        .filter(|c| !c.track.is_empty())
        .map(|c| TrackFeature {
            id: c.id.clone(),
            name: c.name.clone(),
            year: c.year,
            points: c
                .track
                .iter()
                .map(|p| (p.lat, p.lon, p.category))
                .collect(),
        })
        .collect()
}

pub fn genesis_features(cyclones: &[Cyclone]) -> Vec<GenesisFeature> {
    cyclones
        .iter()
        .filter_map(|c| {
            let lat = c.genesis_lat?;
            let lon = c.genesis_lon?;
            Some(GenesisFeature {
                lat,
                lon,
                category: c.max_category,
            })
        })
        .collect()
}

/// Rectangles from precomputed grid cells.
pub fn density_rects_from_cells(cells: &[GridCell]) -> Vec<DensityRect> {
    cells
        .iter()
        .map(|c| DensityRect {
            south: c.lat_south,
            west: c.lon_west,
            north: c.lat_north,
            east: c.lon_east,
            count: c.count,
        })
        .collect()
}

/// Rectangles from a client-computed grid (the density heatmap; the
/// severity heatmap renders precomputed cells instead).
pub fn density_rects_from_grid(grid: &DensityGrid) -> Vec<DensityRect> {
    grid.iter()
        .map(|(&key, &count)| {
            let (south, west) = grid.cell_sw(key);
            DensityRect {
                south,
                west,
                north: south + grid.resolution,
                east: west + grid.resolution,
                count,
            }
        })
        .collect()
}
