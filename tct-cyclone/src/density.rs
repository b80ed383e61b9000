//! Precomputed density grid cells.
//!
//! Severity heatmaps are driven by precomputed plain-text resources, one
//! file per (scenario, SST, ensemble), with one row per occupied cell.
//! Rows with the wrong column count or untypable fields are skipped, not
//! fatal; an empty result is the caller's signal to warn and render
//! nothing.

use crate::api::DataError;
use crate::scenario::ScenarioSelection;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Expected column count of a density resource row.
pub const DENSITY_ROW_LENGTH: usize = 9;

/// One occupied cell of a precomputed density grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub ix: i32,
    pub iy: i32,
    pub count: u32,
    pub lon_west: f64,
    pub lon_east: f64,
    pub lat_south: f64,
    pub lat_north: f64,
    pub lon_center: f64,
    pub lat_center: f64,
}

/// Filename of the precomputed density resource for a selection:
/// `density_{scenario}[_{sst}]_{ensemble:03}.csv`.
pub fn density_resource_filename(selection: &ScenarioSelection) -> String {
    match (selection.scenario.requires_sst(), selection.sst) {
        (true, Some(sst)) => format!(
            "density_{}_{}_{:03}.csv",
            selection.scenario.as_str(),
            sst.as_str(),
            selection.ensemble
        ),
        _ => format!(
            "density_{}_{:03}.csv",
            selection.scenario.as_str(),
            selection.ensemble
        ),
    }
}

/// Parse a density resource body into grid cells.
///
/// Expected columns (with headers):
/// `ix,iy,count,lon_west,lon_east,lat_south,lat_north,lon_center,lat_center`
///
/// Malformed rows are skipped with a warning count. A body that yields
/// zero cells out of a non-empty file is treated as unavailable.
pub fn parse_density_csv(body: &str) -> Result<Vec<GridCell>, DataError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut cells: Vec<GridCell> = Vec::new();
    let mut skipped = 0u32;
    let mut saw_rows = false;
    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        saw_rows = true;
        if record.len() != DENSITY_ROW_LENGTH {
            skipped += 1;
            continue;
        }
        match parse_row(&record) {
            Some(cell) => cells.push(cell),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("[TCT] density: skipped {} malformed rows", skipped);
    }
    if cells.is_empty() && saw_rows {
        return Err(DataError::DensityResourceUnavailable(
            "no parseable rows in density resource".to_string(),
        ));
    }
    Ok(cells)
}

fn parse_row(record: &csv::StringRecord) -> Option<GridCell> {
    Some(GridCell {
        ix: record.get(0)?.trim().parse().ok()?,
        iy: record.get(1)?.trim().parse().ok()?,
        count: record.get(2)?.trim().parse().ok()?,
        lon_west: record.get(3)?.trim().parse().ok()?,
        lon_east: record.get(4)?.trim().parse().ok()?,
        lat_south: record.get(5)?.trim().parse().ok()?,
        lat_north: record.get(6)?.trim().parse().ok()?,
        lon_center: record.get(7)?.trim().parse().ok()?,
        lat_center: record.get(8)?.trim().parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Scenario, SstModel};

    const HEADER: &str = "ix,iy,count,lon_west,lon_east,lat_south,lat_north,lon_center,lat_center\n";

    #[test]
    fn test_parse_well_formed_rows() {
        let body = format!(
            "{}{}{}",
            HEADER,
            "160,52,14,140.0,142.0,14.0,16.0,141.0,15.0\n",
            "161,52,9,142.0,144.0,14.0,16.0,143.0,15.0\n"
        );
        let cells = parse_density_csv(&body).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].ix, 160);
        assert_eq!(cells[0].count, 14);
        assert_eq!(cells[1].lon_center, 143.0);
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let body = format!(
            "{}{}{}{}",
            HEADER,
            "160,52,14,140.0,142.0,14.0,16.0,141.0,15.0\n",
            "161,52,not_a_number,142.0,144.0,14.0,16.0,143.0,15.0\n",
            "162,52,5\n"
        );
        let cells = parse_density_csv(&body).unwrap();
        assert_eq!(cells.len(), 1);
    }

    #[test]
    fn test_all_rows_malformed_is_unavailable() {
        let body = format!("{}{}", HEADER, "a,b,c\nx,y\n");
        assert!(matches!(
            parse_density_csv(&body),
            Err(DataError::DensityResourceUnavailable(_))
        ));
    }

    #[test]
    fn test_empty_body_yields_empty_grid() {
        let cells = parse_density_csv(HEADER).unwrap();
        assert!(cells.is_empty());
    }

    #[test]
    fn test_resource_filename() {
        let current = ScenarioSelection {
            scenario: Scenario::Current,
            ensemble: 7,
            sst: None,
        };
        assert_eq!(density_resource_filename(&current), "density_current_007.csv");

        let four_k = ScenarioSelection {
            scenario: Scenario::FourK,
            ensemble: 12,
            sst: Some(SstModel::Ha),
        };
        assert_eq!(density_resource_filename(&four_k), "density_4k_HA_012.csv");
    }
}
