//! Shared utility functions for TCT crates.

/// Geographic coordinate helpers
pub mod geo {
    /// Normalize a longitude into the half-open interval [-180, 180).
    ///
    /// Track data mixes 0..360 and -180..180 conventions depending on the
    /// upstream model output; all binning happens in -180..180.
    pub fn normalize_lon(lon: f64) -> f64 {
        let mut lon = lon % 360.0;
        if lon >= 180.0 {
            lon -= 360.0;
        } else if lon < -180.0 {
            lon += 360.0;
        }
        lon
    }

    /// Shortest-path longitude difference between two points, in degrees.
    ///
    /// The result is always in [0, 180]; a track segment crossing the
    /// antimeridian from 179 to -179 has a delta of 2, not 358.
    pub fn lon_delta(lon1: f64, lon2: f64) -> f64 {
        let mut diff = (lon2 - lon1).abs() % 360.0;
        if diff > 180.0 {
            diff = 360.0 - diff;
        }
        diff
    }

    /// Grid cell index for a coordinate at the given resolution.
    ///
    /// `origin` is the lower bound of the axis (-90 for latitude,
    /// -180 for longitude).
    pub fn cell_index(value: f64, origin: f64, resolution: f64) -> i32 {
        ((value - origin) / resolution).floor() as i32
    }

    /// Lower-bound coordinate of the cell with the given index.
    pub fn cell_origin(index: i32, origin: f64, resolution: f64) -> f64 {
        origin + index as f64 * resolution
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_normalize_lon() {
            assert_eq!(normalize_lon(0.0), 0.0);
            assert_eq!(normalize_lon(190.0), -170.0);
            assert_eq!(normalize_lon(-190.0), 170.0);
            assert_eq!(normalize_lon(180.0), -180.0);
            assert_eq!(normalize_lon(360.0), 0.0);
            assert_eq!(normalize_lon(-180.0), -180.0);
        }

        #[test]
        fn test_lon_delta_wraparound() {
            assert_eq!(lon_delta(179.0, -179.0), 2.0);
            assert_eq!(lon_delta(-179.0, 179.0), 2.0);
            assert_eq!(lon_delta(10.0, 35.0), 25.0);
            assert_eq!(lon_delta(0.0, 180.0), 180.0);
        }

        #[test]
        fn test_cell_index_and_origin() {
            // 2-degree grid, longitude axis
            assert_eq!(cell_index(-180.0, -180.0, 2.0), 0);
            assert_eq!(cell_index(-179.1, -180.0, 2.0), 0);
            assert_eq!(cell_index(0.0, -180.0, 2.0), 90);
            assert_eq!(cell_origin(90, -180.0, 2.0), 0.0);
            assert_eq!(cell_origin(0, -90.0, 2.0), -90.0);
        }
    }
}

/// Date utility functions
pub mod dates {
    use chrono::{Datelike, NaiveDate};

    /// Parse a track point date string.
    ///
    /// Accepts "YYYY-MM-DD" and "YYYY-MM-DD HH:MM" (hour precision data
    /// from six-hourly model output keeps a time component).
    pub fn parse_track_date(s: &str) -> anyhow::Result<NaiveDate> {
        let date_part = s.split_whitespace().next().unwrap_or(s);
        Ok(NaiveDate::parse_from_str(date_part, "%Y-%m-%d")?)
    }

    /// Month (1-12) of a track point date string, or None if unparseable.
    pub fn month_of(s: &str) -> Option<u32> {
        parse_track_date(s).ok().map(|d| d.month())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_track_date() {
            let d = parse_track_date("1979-08-15").unwrap();
            assert_eq!(d, NaiveDate::from_ymd_opt(1979, 8, 15).unwrap());
            let d = parse_track_date("1979-08-15 06:00").unwrap();
            assert_eq!(d, NaiveDate::from_ymd_opt(1979, 8, 15).unwrap());
        }

        #[test]
        fn test_month_of() {
            assert_eq!(month_of("2055-09-01"), Some(9));
            assert_eq!(month_of("not a date"), None);
        }
    }
}

