//! Cyclone and track-point types.
//!
//! Records arrive as JSON from the data API and are immutable for the
//! session once parsed. The per-cyclone aggregates (max category, max
//! wind, min pressure, genesis position, duration) are recomputed from
//! the track on ingest so they can never drift from the points.

use crate::year_range::YearRange;
use serde::{Deserialize, Serialize};
use tct_utils::dates;

/// One six-hourly position along a cyclone track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclonePoint {
    pub lat: f64,
    pub lon: f64,
    /// "YYYY-MM-DD" or "YYYY-MM-DD HH:MM"
    pub date: String,
    pub category: u8,
    #[serde(alias = "windSpeed")]
    pub wind_speed: f64,
    pub pressure: f64,
}

/// A single cyclone: identity, season, ordered track, and aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cyclone {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub track: Vec<CyclonePoint>,
    #[serde(default, alias = "maxCategory")]
    pub max_category: u8,
    #[serde(default, alias = "maxWind")]
    pub max_wind: f64,
    #[serde(default, alias = "minPressure")]
    pub min_pressure: f64,
    #[serde(default, alias = "genesisLat")]
    pub genesis_lat: Option<f64>,
    #[serde(default, alias = "genesisLon")]
    pub genesis_lon: Option<f64>,
    #[serde(default)]
    pub landfall: bool,
    #[serde(default, alias = "durationDays", alias = "duration")]
    pub duration_days: f64,
}

impl Cyclone {
    /// Recompute aggregates from the track.
    ///
    /// A record without track points keeps its wire values; anything with
    /// a track gets max_category/max_wind/min_pressure/genesis/duration
    /// derived from the points.
    pub fn recompute_aggregates(&mut self) {
        if self.track.is_empty() {
            return;
        }
        self.max_category = self.track.iter().map(|p| p.category).max().unwrap_or(0);
        self.max_wind = self
            .track
            .iter()
            .map(|p| p.wind_speed)
            .fold(0.0_f64, f64::max);
        self.min_pressure = self
            .track
            .iter()
            .map(|p| p.pressure)
            .fold(f64::INFINITY, f64::min);
        let first = &self.track[0];
        self.genesis_lat = Some(first.lat);
        self.genesis_lon = Some(first.lon);
        self.duration_days = self.track_duration_days();
    }

    /// Days between the first and last track point; falls back to point
    /// count at six-hourly spacing when dates don't parse.
    fn track_duration_days(&self) -> f64 {
        let first = self.track.first().and_then(|p| dates::parse_track_date(&p.date).ok());
        let last = self.track.last().and_then(|p| dates::parse_track_date(&p.date).ok());
        match (first, last) {
            (Some(f), Some(l)) => (l - f).num_days() as f64,
            _ => (self.track.len().saturating_sub(1)) as f64 / 4.0,
        }
    }

    /// Month (1-12) of the genesis point, if the track has one.
    pub fn genesis_month(&self) -> Option<u32> {
        self.track.first().and_then(|p| dates::month_of(&p.date))
    }

    pub fn matches_year_range(&self, range: &YearRange) -> bool {
        range.contains(self.year)
    }
}

/// Filter a cyclone list by year range. `Unset` passes everything
/// through untouched.
pub fn filter_by_years(cyclones: &[Cyclone], range: &YearRange) -> Vec<Cyclone> {
    cyclones
        .iter()
        .filter(|c| c.matches_year_range(range))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_point(lat: f64, lon: f64, date: &str, category: u8) -> CyclonePoint {
        CyclonePoint {
            lat,
            lon,
            date: date.to_string(),
            category,
            wind_speed: 60.0 + category as f64 * 30.0,
            pressure: 1000.0 - category as f64 * 15.0,
        }
    }

    fn test_cyclone(id: &str, year: i32, points: Vec<CyclonePoint>) -> Cyclone {
        let mut cyclone = Cyclone {
            id: id.to_string(),
            name: format!("TC-{}", id),
            year,
            track: points,
            max_category: 0,
            max_wind: 0.0,
            min_pressure: 0.0,
            genesis_lat: None,
            genesis_lon: None,
            landfall: false,
            duration_days: 0.0,
        };
        cyclone.recompute_aggregates();
        cyclone
    }

    #[test]
    fn test_aggregates_follow_track() {
        let cyclone = test_cyclone(
            "c1",
            1980,
            vec![
                test_point(10.0, 140.0, "1980-08-01", 1),
                test_point(12.0, 138.0, "1980-08-02", 4),
                test_point(14.0, 136.0, "1980-08-05", 2),
            ],
        );
        assert_eq!(cyclone.max_category, 4);
        assert_eq!(cyclone.max_wind, 180.0);
        assert_eq!(cyclone.min_pressure, 940.0);
        assert_eq!(cyclone.genesis_lat, Some(10.0));
        assert_eq!(cyclone.genesis_lon, Some(140.0));
        assert_eq!(cyclone.duration_days, 4.0);
        assert_eq!(cyclone.genesis_month(), Some(8));
    }

    #[test]
    fn test_trackless_record_keeps_wire_values() {
        let mut cyclone = Cyclone {
            id: "c2".to_string(),
            name: String::new(),
            year: 1999,
            track: Vec::new(),
            max_category: 3,
            max_wind: 150.0,
            min_pressure: 955.0,
            genesis_lat: Some(18.0),
            genesis_lon: Some(130.0),
            landfall: true,
            duration_days: 6.5,
        };
        cyclone.recompute_aggregates();
        assert_eq!(cyclone.max_category, 3);
        assert_eq!(cyclone.min_pressure, 955.0);
    }

    #[test]
    fn test_filter_by_years() {
        let cyclones = vec![
            test_cyclone("a", 1960, vec![test_point(5.0, 150.0, "1960-07-01", 0)]),
            test_cyclone("b", 1975, vec![test_point(5.0, 150.0, "1975-07-01", 0)]),
            test_cyclone("c", 1990, vec![test_point(5.0, 150.0, "1990-07-01", 0)]),
        ];
        let filtered = filter_by_years(&cyclones, &YearRange::Range { min: 1970, max: 1980 });
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "b");

        // Unset returns the unfiltered full list
        let all = filter_by_years(&cyclones, &YearRange::Unset);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_camel_case_wire_fields_accepted() {
        let json = r#"{
            "id": "1951_current_001",
            "name": "ALPHA",
            "year": 1951,
            "maxCategory": 2,
            "maxWind": 130.5,
            "minPressure": 970.0,
            "landfall": true,
            "duration": 5.0,
            "track": [
                {"lat": 11.2, "lon": 142.7, "date": "1951-09-03", "category": 1,
                 "windSpeed": 95.0, "pressure": 985.0}
            ]
        }"#;
        let mut cyclone: Cyclone = serde_json::from_str(json).unwrap();
        cyclone.recompute_aggregates();
        assert_eq!(cyclone.max_category, 1);
        assert_eq!(cyclone.genesis_lon, Some(142.7));
        assert!(cyclone.landfall);
    }
}
