//! Track-density aggregation over the global grid.
//!
//! Counts, per cell, how many distinct cyclones touched that cell: each
//! cyclone contributes at most once per cell no matter how often its
//! track revisits it. Segments whose endpoints are more than
//! [`GAP_THRESHOLD_DEGREES`] apart in latitude or (wraparound-aware)
//! longitude are treated as teleports from missing data or date-line
//! artifacts and are not rasterized; only their endpoints are binned.
//!
//! This is a pragmatic track-density heuristic, not a physical measure;
//! the 20-degree threshold and 2x-per-cell sampling rate are part of the
//! output contract.

use crate::raster;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tct_cyclone::track::Cyclone;
use tct_utils::geo;

/// Segments spanning at least this many degrees on either axis are
/// treated as data gaps and skipped.
pub const GAP_THRESHOLD_DEGREES: f64 = 20.0;

/// A frequency grid over the globe at a fixed resolution.
///
/// Keys are (lat_index, lon_index) from the south-west origin. Built
/// fresh per aggregation pass; only accumulation mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    pub resolution: f64,
    cells: HashMap<(i32, i32), u32>,
}

/// Scalar summary of a density grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityStats {
    pub active_cells: usize,
    pub max_count: u32,
    pub total_count: u64,
    /// Mean count per active cell, one decimal; 0 when the grid is empty.
    pub mean_count: f64,
}

impl DensityGrid {
    pub fn new(resolution: f64) -> Self {
        DensityGrid {
            resolution,
            cells: HashMap::new(),
        }
    }

    pub fn count(&self, key: (i32, i32)) -> u32 {
        self.cells.get(&key).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(i32, i32), &u32)> {
        self.cells.iter()
    }

    fn increment(&mut self, key: (i32, i32)) {
        *self.cells.entry(key).or_insert(0) += 1;
    }

    pub fn stats(&self) -> DensityStats {
        let active_cells = self.cells.len();
        let max_count = self.cells.values().copied().max().unwrap_or(0);
        let total_count: u64 = self.cells.values().map(|&c| c as u64).sum();
        let mean_count = if active_cells == 0 {
            0.0
        } else {
            (total_count as f64 / active_cells as f64 * 10.0).round() / 10.0
        };
        DensityStats {
            active_cells,
            max_count,
            total_count,
            mean_count,
        }
    }

    /// South-west corner of a cell key, for rendering.
    pub fn cell_sw(&self, key: (i32, i32)) -> (f64, f64) {
        (
            geo::cell_origin(key.0, -90.0, self.resolution),
            geo::cell_origin(key.1, -180.0, self.resolution),
        )
    }
}

/// Aggregate a set of cyclone tracks into a density grid.
///
/// Pure function of its inputs: iteration order cannot affect the result
/// because per-cell counts are commutative sums of per-cyclone visits.
pub fn aggregate_tracks(cyclones: &[Cyclone], resolution: f64) -> DensityGrid {
    let mut grid = DensityGrid::new(resolution);

    for cyclone in cyclones {
        let mut visited: HashSet<(i32, i32)> = HashSet::new();

        for point in &cyclone.track {
            if let Some(key) = point_cell(point.lat, point.lon, resolution) {
                if visited.insert(key) {
                    grid.increment(key);
                }
            }
        }

        for pair in cyclone.track.windows(2) {
            let (p1, p2) = (&pair[0], &pair[1]);
            let lat_delta = (p2.lat - p1.lat).abs();
            let lon_delta = geo::lon_delta(p1.lon, p2.lon);
            if lat_delta >= GAP_THRESHOLD_DEGREES || lon_delta >= GAP_THRESHOLD_DEGREES {
                continue;
            }
            for key in raster::cells_crossed(
                (p1.lat, geo::normalize_lon(p1.lon)),
                (p2.lat, geo::normalize_lon(p2.lon)),
                resolution,
            ) {
                if visited.insert(key) {
                    grid.increment(key);
                }
            }
        }
    }

    log::debug!(
        "[TCT] aggregate: {} cyclones -> {} active cells at {} deg",
        cyclones.len(),
        grid.cells.len(),
        resolution
    );
    grid
}

/// Cell key for a single point, or None when the normalized coordinate
/// falls outside the grid domain.
fn point_cell(lat: f64, lon: f64, resolution: f64) -> Option<(i32, i32)> {
    let lon = geo::normalize_lon(lon);
    if !(-90.0..90.0).contains(&lat) || !(-180.0..180.0).contains(&lon) {
        return None;
    }
    Some((
        geo::cell_index(lat, -90.0, resolution),
        geo::cell_index(lon, -180.0, resolution),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tct_cyclone::track::CyclonePoint;

    fn point(lat: f64, lon: f64) -> CyclonePoint {
        CyclonePoint {
            lat,
            lon,
            date: "1980-08-01".to_string(),
            category: 1,
            wind_speed: 90.0,
            pressure: 990.0,
        }
    }

    fn cyclone(id: &str, points: Vec<CyclonePoint>) -> Cyclone {
        let mut c = Cyclone {
            id: id.to_string(),
            name: String::new(),
            year: 1980,
            track: points,
            max_category: 0,
            max_wind: 0.0,
            min_pressure: 0.0,
            genesis_lat: None,
            genesis_lon: None,
            landfall: false,
            duration_days: 0.0,
        };
        c.recompute_aggregates();
        c
    }

    fn grids_equal(a: &DensityGrid, b: &DensityGrid) -> bool {
        let mut av: Vec<_> = a.iter().map(|(k, v)| (*k, *v)).collect();
        let mut bv: Vec<_> = b.iter().map(|(k, v)| (*k, *v)).collect();
        av.sort();
        bv.sort();
        av == bv
    }

    #[test]
    fn test_idempotent() {
        let cyclones = vec![
            cyclone("a", vec![point(10.0, 140.0), point(12.0, 143.0)]),
            cyclone("b", vec![point(-8.0, 60.0), point(-9.0, 62.0)]),
        ];
        let g1 = aggregate_tracks(&cyclones, 2.0);
        let g2 = aggregate_tracks(&cyclones, 2.0);
        assert!(grids_equal(&g1, &g2));
    }

    #[test]
    fn test_commutative() {
        let a = cyclone("a", vec![point(10.0, 140.0), point(12.0, 143.0)]);
        let b = cyclone("b", vec![point(11.0, 141.0), point(13.0, 144.0)]);
        let g1 = aggregate_tracks(&[a.clone(), b.clone()], 2.0);
        let g2 = aggregate_tracks(&[b, a], 2.0);
        assert!(grids_equal(&g1, &g2));
    }

    #[test]
    fn test_once_per_cyclone() {
        // Track oscillates through the same cell five times
        let c = cyclone(
            "loop",
            vec![
                point(10.2, 140.2),
                point(10.8, 140.8),
                point(10.2, 140.2),
                point(10.8, 140.8),
                point(10.2, 140.2),
            ],
        );
        let grid = aggregate_tracks(&[c], 2.0);
        let key = (
            geo::cell_index(10.2, -90.0, 2.0),
            geo::cell_index(140.2, -180.0, 2.0),
        );
        assert_eq!(grid.count(key), 1);
    }

    #[test]
    fn test_two_cyclones_accumulate() {
        let a = cyclone("a", vec![point(10.2, 140.2)]);
        let b = cyclone("b", vec![point(10.8, 140.8)]);
        let grid = aggregate_tracks(&[a, b], 2.0);
        let key = (
            geo::cell_index(10.5, -90.0, 2.0),
            geo::cell_index(140.5, -180.0, 2.0),
        );
        assert_eq!(grid.count(key), 2);
    }

    #[test]
    fn test_gap_suppression() {
        // 25-degree longitude jump: only the endpoint cells are counted
        let c = cyclone("gap", vec![point(10.0, 100.0), point(10.0, 125.0)]);
        let grid = aggregate_tracks(&[c], 2.0);
        let stats = grid.stats();
        assert_eq!(stats.active_cells, 2);
        // A cell halfway along the would-be segment stays empty
        let mid = (
            geo::cell_index(10.0, -90.0, 2.0),
            geo::cell_index(112.0, -180.0, 2.0),
        );
        assert_eq!(grid.count(mid), 0);
    }

    #[test]
    fn test_wraparound_segment_rasterized() {
        let c = cyclone("seam", vec![point(0.5, 179.0), point(0.5, -179.0)]);
        let grid = aggregate_tracks(&[c], 2.0);
        // Both seam-adjacent columns are populated, nothing mid-ocean
        assert!(grid.count((45, 179)) >= 1);
        assert!(grid.count((45, 0)) >= 1);
        assert_eq!(grid.count((45, 90)), 0);
        assert!(grid.stats().active_cells < 8);
    }

    #[test]
    fn test_poleward_and_dateline_points_discarded() {
        // lat 90 is outside the half-open domain; lon 180 normalizes to -180
        let c = cyclone("edge", vec![point(90.0, 10.0), point(45.0, 180.0)]);
        let grid = aggregate_tracks(&[c], 2.0);
        let stats = grid.stats();
        // Only the normalized (45, -180) point lands; the pole point and
        // the 45-degree connecting jump are dropped
        assert_eq!(stats.active_cells, 1);
        assert_eq!(grid.count((67, 0)), 1);
    }

    #[test]
    fn test_stats_mean_rounding() {
        let a = cyclone("a", vec![point(10.2, 140.2)]);
        let b = cyclone("b", vec![point(10.8, 140.8), point(30.5, 60.5)]);
        let grid = aggregate_tracks(&[a, b], 2.0);
        let stats = grid.stats();
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.active_cells, 2);
        assert_eq!(stats.mean_count, 1.5);
        assert_eq!(stats.max_count, 2);
    }

    #[test]
    fn test_empty_input() {
        let grid = aggregate_tracks(&[], 2.0);
        assert!(grid.is_empty());
        let stats = grid.stats();
        assert_eq!(stats.active_cells, 0);
        assert_eq!(stats.mean_count, 0.0);
    }
}
