//! Density grid computation command.
//!
//! Writes the same column layout the map app consumes as a precomputed
//! resource, so a computed grid can be published directly:
//! `ix,iy,count,lon_west,lon_east,lat_south,lat_north,lon_center,lat_center`

use crate::fetch::read_cyclone_file;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;
use std::io::Write;
use tct_data::aggregate::{aggregate_tracks, DensityGrid};

/// Compute a density grid from a fetched cyclone JSON file and write it
/// as CSV (gzipped when the output path ends in .gz).
pub fn run_density(input: &str, resolution: f64, output: &str) -> anyhow::Result<()> {
    if resolution <= 0.0 {
        anyhow::bail!("resolution must be positive, got {}", resolution);
    }
    let cyclones = read_cyclone_file(input)?;
    info!(
        "Aggregating {} cyclones at {} degree resolution",
        cyclones.len(),
        resolution
    );

    let grid = aggregate_tracks(&cyclones, resolution);
    let stats = grid.stats();
    info!(
        "Grid: {} active cells, max {}, total {}, mean {}",
        stats.active_cells, stats.max_count, stats.total_count, stats.mean_count
    );

    let csv = grid_to_csv(&grid)?;
    if output.ends_with(".gz") {
        let file = std::fs::File::create(output)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(csv.as_bytes())?;
        encoder.finish()?;
    } else {
        std::fs::write(output, csv)?;
    }
    info!("Wrote {}", output);
    Ok(())
}

/// Serialize a grid in the precomputed-resource column layout, rows
/// ordered by (iy, ix) for stable diffs.
pub fn grid_to_csv(grid: &DensityGrid) -> anyhow::Result<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());
    wtr.write_record([
        "ix",
        "iy",
        "count",
        "lon_west",
        "lon_east",
        "lat_south",
        "lat_north",
        "lon_center",
        "lat_center",
    ])?;

    let mut keys: Vec<(i32, i32)> = grid.iter().map(|(&key, _)| key).collect();
    keys.sort();
    for key in keys {
        let (lat_index, lon_index) = key;
        let count = grid.count(key);
        let (lat_south, lon_west) = grid.cell_sw(key);
        let lat_north = lat_south + grid.resolution;
        let lon_east = lon_west + grid.resolution;
        wtr.write_record([
            lon_index.to_string(),
            lat_index.to_string(),
            count.to_string(),
            format!("{:.3}", lon_west),
            format!("{:.3}", lon_east),
            format!("{:.3}", lat_south),
            format!("{:.3}", lat_north),
            format!("{:.3}", (lon_west + lon_east) / 2.0),
            format!("{:.3}", (lat_south + lat_north) / 2.0),
        ])?;
    }
    let bytes = wtr.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tct_cyclone::density::parse_density_csv;
    use tct_cyclone::track::{Cyclone, CyclonePoint};

    fn cyclone_at(lat: f64, lon: f64) -> Cyclone {
        let mut c = Cyclone {
            id: format!("c_{}_{}", lat, lon),
            name: String::new(),
            year: 1980,
            track: vec![CyclonePoint {
                lat,
                lon,
                date: "1980-08-01".to_string(),
                category: 1,
                wind_speed: 90.0,
                pressure: 990.0,
            }],
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

    #[test]
    fn test_grid_csv_round_trips_through_app_parser() {
        let cyclones = vec![cyclone_at(10.5, 140.5), cyclone_at(10.5, 140.5)];
        let grid = aggregate_tracks(&cyclones, 2.0);
        let csv = grid_to_csv(&grid).unwrap();

        let cells = parse_density_csv(&csv).unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].count, 2);
        assert_eq!(cells[0].lon_west, 140.0);
        assert_eq!(cells[0].lat_south, 10.0);
        assert_eq!(cells[0].lat_center, 11.0);
    }
}
