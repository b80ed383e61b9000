//! Segment rasterization onto the global lat/lon grid.
//!
//! Given two consecutive track points, enumerate every grid cell the
//! straight segment between them crosses in cell space. Sampling alone
//! can hop over a cell corner, so each sample tests its full 3x3 cell
//! neighborhood with a slab-method segment/box intersection; missing a
//! crossed cell is worse than testing a few extra candidates.

use std::collections::HashSet;
use tct_utils::geo;

/// Samples per cell-space distance unit.
const SAMPLES_PER_CELL: f64 = 2.0;

/// Enumerate the grid cells crossed by the segment between two track
/// points, as (lat_index, lon_index) keys.
///
/// Longitude wraparound is resolved before conversion: when the raw
/// difference exceeds 180 degrees the second endpoint is shifted by
/// +-360 to take the shorter path. Cells whose origins fall outside
/// [-90,90) x [-180,180) after conversion back are dropped.
pub fn cells_crossed(
    (lat1, lon1): (f64, f64),
    (lat2, lon2): (f64, f64),
    resolution: f64,
) -> Vec<(i32, i32)> {
    // Shorter path across the antimeridian
    let mut lon2 = lon2;
    if (lon2 - lon1).abs() > 180.0 {
        if lon2 > lon1 {
            lon2 -= 360.0;
        } else {
            lon2 += 360.0;
        }
    }

    // Continuous cell-space coordinates
    let x1 = (lon1 + 180.0) / resolution;
    let y1 = (lat1 + 90.0) / resolution;
    let x2 = (lon2 + 180.0) / resolution;
    let y2 = (lat2 + 90.0) / resolution;

    let distance = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();
    let steps = ((distance * SAMPLES_PER_CELL).ceil() as i64).max(2);

    let mut seen: HashSet<(i64, i64)> = HashSet::new();
    let mut cells: Vec<(i32, i32)> = Vec::new();

    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let sx = x1 + (x2 - x1) * t;
        let sy = y1 + (y2 - y1) * t;
        let cx = sx.floor() as i64;
        let cy = sy.floor() as i64;

        for dy in -1..=1 {
            for dx in -1..=1 {
                let candidate = (cx + dx, cy + dy);
                if seen.contains(&candidate) {
                    continue;
                }
                let (bx, by) = (candidate.0 as f64, candidate.1 as f64);
                if !segment_intersects_box(x1, y1, x2, y2, bx, by, bx + 1.0, by + 1.0) {
                    continue;
                }
                seen.insert(candidate);

                let lat_origin = geo::cell_origin(candidate.1 as i32, -90.0, resolution);
                let lon_origin = geo::cell_origin(candidate.0 as i32, -180.0, resolution);
                if lat_origin >= -90.0
                    && lat_origin < 90.0
                    && lon_origin >= -180.0
                    && lon_origin < 180.0
                {
                    cells.push((candidate.1 as i32, candidate.0 as i32));
                }
            }
        }
    }
    cells
}

/// Slab-method intersection between the segment (x1,y1)->(x2,y2),
/// parameterized over t in [0,1], and an axis-aligned box.
fn segment_intersects_box(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    bx0: f64,
    by0: f64,
    bx1: f64,
    by1: f64,
) -> bool {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let mut t_min = 0.0_f64;
    let mut t_max = 1.0_f64;

    for (start, delta, lo, hi) in [(x1, dx, bx0, bx1), (y1, dy, by0, by1)] {
        if delta.abs() < 1e-12 {
            // Segment parallel to this axis: inside the slab or not at all
            if start < lo || start > hi {
                return false;
            }
        } else {
            let mut t0 = (lo - start) / delta;
            let mut t1 = (hi - start) / delta;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
    }
    true
}
