//! Summary statistics for comparison panels.
//!
//! Everything here is a pure function over an already-filtered input
//! set; the UI calls these per side when comparing scenarios. Divisions
//! guard against empty inputs and report 0.

use crate::aggregate::DensityGrid;
use serde::Serialize;
use tct_cyclone::density::GridCell;
use tct_cyclone::track::Cyclone;

/// Category at or above which a cyclone counts as severe.
pub const SEVERE_CATEGORY: u8 = 3;

/// Cell-count bucket thresholds for density summaries.
pub const CELL_SEVERE_MIN: u32 = 80;
pub const CELL_HIGH_MIN: u32 = 40;
pub const CELL_MODERATE_MIN: u32 = 10;

/// Summary of a filtered cyclone set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycloneMetrics {
    pub total_cyclones: usize,
    /// Cyclones reaching category 3 or higher.
    pub severe_cyclones: usize,
    /// Severe share of the total, one decimal (0 for an empty set).
    pub severe_percent: f64,
    /// Mean of per-cyclone max category, one decimal.
    pub mean_max_category: f64,
    pub max_wind: f64,
    pub landfall_count: usize,
}

/// Summary of a density grid, client-computed or precomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityMetrics {
    pub active_cells: usize,
    pub total_count: u64,
    pub max_count: u32,
    /// Mean count per active cell, one decimal.
    pub mean_count: f64,
    /// Cells with count >= 80.
    pub severe_cells: usize,
    /// Cells with count 40-79.
    pub high_cells: usize,
    /// Cells with count 10-39.
    pub moderate_cells: usize,
    /// Cells with count 1-9.
    pub low_cells: usize,
}

/// Compute summary metrics for a cyclone set.
pub fn cyclone_metrics(cyclones: &[Cyclone]) -> CycloneMetrics {
    let total = cyclones.len();
    let severe = cyclones
        .iter()
        .filter(|c| c.max_category >= SEVERE_CATEGORY)
        .count();
    let severe_percent = if total == 0 {
        0.0
    } else {
        round1(severe as f64 / total as f64 * 100.0)
    };
    let mean_max_category = if total == 0 {
        0.0
    } else {
        round1(cyclones.iter().map(|c| c.max_category as f64).sum::<f64>() / total as f64)
    };
    let max_wind = cyclones.iter().map(|c| c.max_wind).fold(0.0_f64, f64::max);
    let landfall_count = cyclones.iter().filter(|c| c.landfall).count();

    CycloneMetrics {
        total_cyclones: total,
        severe_cyclones: severe,
        severe_percent,
        mean_max_category,
        max_wind,
        landfall_count,
    }
}

/// Density metrics from a client-computed grid.
pub fn density_metrics_from_grid(grid: &DensityGrid) -> DensityMetrics {
    from_counts(grid.iter().map(|(_, &count)| count))
}

/// Density metrics from precomputed grid cells.
pub fn density_metrics_from_cells(cells: &[GridCell]) -> DensityMetrics {
    from_counts(cells.iter().map(|c| c.count))
}

fn from_counts(counts: impl Iterator<Item = u32>) -> DensityMetrics {
    let mut metrics = DensityMetrics {
        active_cells: 0,
        total_count: 0,
        max_count: 0,
        mean_count: 0.0,
        severe_cells: 0,
        high_cells: 0,
        moderate_cells: 0,
        low_cells: 0,
    };
    for count in counts {
        if count == 0 {
            continue;
        }
        metrics.active_cells += 1;
        metrics.total_count += count as u64;
        metrics.max_count = metrics.max_count.max(count);
        if count >= CELL_SEVERE_MIN {
            metrics.severe_cells += 1;
        } else if count >= CELL_HIGH_MIN {
            metrics.high_cells += 1;
        } else if count >= CELL_MODERATE_MIN {
            metrics.moderate_cells += 1;
        } else {
            metrics.low_cells += 1;
        }
    }
    if metrics.active_cells > 0 {
        metrics.mean_count = round1(metrics.total_count as f64 / metrics.active_cells as f64);
    }
    metrics
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tct_cyclone::track::CyclonePoint;

    fn cyclone(id: &str, max_category: u8, max_wind: f64, landfall: bool) -> Cyclone {
        Cyclone {
            id: id.to_string(),
            name: String::new(),
            year: 1980,
            track: Vec::<CyclonePoint>::new(),
            max_category,
            max_wind,
            min_pressure: 980.0,
            genesis_lat: None,
            genesis_lon: None,
            landfall,
            duration_days: 5.0,
        }
    }

    #[test]
    fn test_severe_percentage() {
        let mut cyclones: Vec<Cyclone> = (0..7)
            .map(|i| cyclone(&format!("w{}", i), 1, 80.0, false))
            .collect();
        cyclones.push(cyclone("s1", 3, 170.0, true));
        cyclones.push(cyclone("s2", 4, 200.0, false));
        cyclones.push(cyclone("s3", 5, 260.0, true));

        let metrics = cyclone_metrics(&cyclones);
        assert_eq!(metrics.total_cyclones, 10);
        assert_eq!(metrics.severe_cyclones, 3);
        assert_eq!(metrics.severe_percent, 30.0);
        assert_eq!(metrics.max_wind, 260.0);
        assert_eq!(metrics.landfall_count, 2);
        // (7*1 + 3 + 4 + 5) / 10 = 1.9
        assert_eq!(metrics.mean_max_category, 1.9);
    }

    #[test]
    fn test_empty_set_reports_zeroes() {
        let metrics = cyclone_metrics(&[]);
        assert_eq!(metrics.total_cyclones, 0);
        assert_eq!(metrics.severe_percent, 0.0);
        assert_eq!(metrics.mean_max_category, 0.0);
        assert_eq!(metrics.max_wind, 0.0);
    }

    #[test]
    fn test_density_buckets() {
        let cell = |count: u32| GridCell {
            ix: 0,
            iy: 0,
            count,
            lon_west: 0.0,
            lon_east: 2.0,
            lat_south: 0.0,
            lat_north: 2.0,
            lon_center: 1.0,
            lat_center: 1.0,
        };
        let cells = vec![
            cell(120),
            cell(80),
            cell(79),
            cell(40),
            cell(39),
            cell(10),
            cell(9),
            cell(1),
        ];
        let metrics = density_metrics_from_cells(&cells);
        assert_eq!(metrics.severe_cells, 2);
        assert_eq!(metrics.high_cells, 2);
        assert_eq!(metrics.moderate_cells, 2);
        assert_eq!(metrics.low_cells, 2);
        assert_eq!(metrics.active_cells, 8);
        assert_eq!(metrics.max_count, 120);
        assert_eq!(metrics.total_count, 378);
        // 378 / 8 = 47.25 -> 47.3 at one decimal
        assert_eq!(metrics.mean_count, 47.3);
    }

    #[test]
    fn test_zero_count_cells_ignored() {
        let cells: Vec<GridCell> = Vec::new();
        let metrics = density_metrics_from_cells(&cells);
        assert_eq!(metrics.active_cells, 0);
        assert_eq!(metrics.mean_count, 0.0);
    }
}
