//! Typed query methods over the cyclone store.

use crate::models::{CycloneInfo, DatasetSummary};
use crate::Database;
use rusqlite::params;
use tct_cyclone::track::{Cyclone, CyclonePoint};
use tct_cyclone::year_range::YearRange;

impl Database {
    /// Whether a dataset has been loaded under the given key. Used to
    /// skip redundant fetches; an empty ensemble still counts as loaded.
    pub fn has_dataset(&self, dataset_key: &str) -> anyhow::Result<bool> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT 1 FROM datasets WHERE dataset_key = ?1")?;
        Ok(stmt.exists(params![dataset_key])?)
    }

    /// All loaded dataset keys with their cyclone counts.
    pub fn dataset_keys(&self) -> anyhow::Result<Vec<DatasetSummary>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT dataset_key, cyclone_count FROM datasets ORDER BY dataset_key",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DatasetSummary {
                    dataset_key: row.get(0)?,
                    cyclone_count: row.get::<_, i64>(1)? as u32,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Cyclone summaries for a dataset, filtered by year range, ordered
    /// by year then id. `YearRange::Unset` returns the full dataset.
    pub fn query_cyclone_infos(
        &self,
        dataset_key: &str,
        years: &YearRange,
    ) -> anyhow::Result<Vec<CycloneInfo>> {
        let conn = self.conn.borrow();
        let (year_min, year_max) = match *years {
            YearRange::Unset => (i32::MIN, i32::MAX),
            YearRange::Range { min, max } => (min, max),
        };
        let mut stmt = conn.prepare(
            "SELECT cyclone_id, name, year, max_category, max_wind, min_pressure,
                    genesis_lat, genesis_lon, landfall, duration_days
             FROM cyclones
             WHERE dataset_key = ?1 AND year >= ?2 AND year <= ?3
             ORDER BY year, cyclone_id",
        )?;
        let rows = stmt
            .query_map(params![dataset_key, year_min, year_max], |row| {
                Ok(CycloneInfo {
                    cyclone_id: row.get(0)?,
                    name: row.get(1)?,
                    year: row.get(2)?,
                    max_category: row.get::<_, i64>(3)? as u8,
                    max_wind: row.get(4)?,
                    min_pressure: row.get(5)?,
                    genesis_lat: row.get(6)?,
                    genesis_lon: row.get(7)?,
                    landfall: row.get::<_, i64>(8)? != 0,
                    duration_days: row.get(9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[TCT] query: {} cyclones for '{}' ({})",
            rows.len(),
            dataset_key,
            years.label()
        );
        Ok(rows)
    }

    /// Full cyclones with tracks for a dataset, filtered by year range.
    ///
    /// This is the input to track rendering and density aggregation; the
    /// track points come back in recorded order.
    pub fn query_cyclones_with_tracks(
        &self,
        dataset_key: &str,
        years: &YearRange,
    ) -> anyhow::Result<Vec<Cyclone>> {
        let infos = self.query_cyclone_infos(dataset_key, years)?;
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT lat, lon, date, category, wind_speed, pressure
             FROM track_points
             WHERE dataset_key = ?1 AND cyclone_id = ?2
             ORDER BY seq",
        )?;

        let mut cyclones = Vec::with_capacity(infos.len());
        for info in infos {
            let track = stmt
                .query_map(params![dataset_key, info.cyclone_id], |row| {
                    Ok(CyclonePoint {
                        lat: row.get(0)?,
                        lon: row.get(1)?,
                        date: row.get(2)?,
                        category: row.get::<_, i64>(3)? as u8,
                        wind_speed: row.get(4)?,
                        pressure: row.get(5)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            cyclones.push(Cyclone {
                id: info.cyclone_id,
                name: info.name,
                year: info.year,
                track,
                max_category: info.max_category,
                max_wind: info.max_wind,
                min_pressure: info.min_pressure,
                genesis_lat: info.genesis_lat,
                genesis_lon: info.genesis_lon,
                landfall: info.landfall,
                duration_days: info.duration_days,
            });
        }
        Ok(cyclones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tct_cyclone::api::parse_cyclone_response;

    fn sample_response(year_a: i32, year_b: i32) -> String {
        format!(
            r#"{{
                "success": true,
                "data": {{ "cyclones": [
                    {{"id": "a", "name": "ALPHA", "year": {year_a}, "landfall": true, "track": [
                        {{"lat": 10.0, "lon": 140.0, "date": "{year_a}-08-01",
                         "category": 2, "wind_speed": 130.0, "pressure": 970.0}},
                        {{"lat": 12.0, "lon": 138.5, "date": "{year_a}-08-02",
                         "category": 3, "wind_speed": 165.0, "pressure": 955.0}}
                    ]}},
                    {{"id": "b", "name": "BRAVO", "year": {year_b}, "track": [
                        {{"lat": -8.0, "lon": 70.0, "date": "{year_b}-01-10",
                         "category": 1, "wind_speed": 95.0, "pressure": 988.0}}
                    ]}}
                ]}}
            }}"#
        )
    }

    fn loaded_db() -> Database {
        let db = Database::new().unwrap();
        let data = parse_cyclone_response(&sample_response(1960, 1975)).unwrap();
        db.load_dataset("current:1", &data.cyclones).unwrap();
        db
    }

    #[test]
    fn test_round_trip_preserves_tracks() {
        let db = loaded_db();
        let cyclones = db
            .query_cyclones_with_tracks("current:1", &YearRange::Unset)
            .unwrap();
        assert_eq!(cyclones.len(), 2);
        assert_eq!(cyclones[0].id, "a");
        assert_eq!(cyclones[0].track.len(), 2);
        assert_eq!(cyclones[0].track[1].lat, 12.0);
        assert_eq!(cyclones[0].max_category, 3);
        assert!(cyclones[0].landfall);
        assert_eq!(cyclones[1].track.len(), 1);
    }

    #[test]
    fn test_year_filter() {
        let db = loaded_db();
        let infos = db
            .query_cyclone_infos("current:1", &YearRange::Range { min: 1970, max: 1980 })
            .unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].cyclone_id, "b");
    }

    #[test]
    fn test_unset_returns_everything() {
        let db = loaded_db();
        let infos = db
            .query_cyclone_infos("current:1", &YearRange::Unset)
            .unwrap();
        assert_eq!(infos.len(), 2);
    }

    #[test]
    fn test_reload_replaces_dataset() {
        let db = loaded_db();
        let data = parse_cyclone_response(&sample_response(1990, 1991)).unwrap();
        db.load_dataset("current:1", &data.cyclones).unwrap();
        let infos = db
            .query_cyclone_infos("current:1", &YearRange::Unset)
            .unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].year, 1990);
    }

    #[test]
    fn test_clear_scenario_prefix() {
        let db = loaded_db();
        let data = parse_cyclone_response(&sample_response(2060, 2070)).unwrap();
        db.load_dataset("4k:MI:3", &data.cyclones).unwrap();
        db.load_dataset("4k:MR:3", &data.cyclones).unwrap();

        let removed = db.clear_scenario("4k:").unwrap();
        assert_eq!(removed, 2);
        assert!(db.has_dataset("current:1").unwrap());
        assert!(!db.has_dataset("4k:MI:3").unwrap());

        db.clear_all().unwrap();
        assert!(!db.has_dataset("current:1").unwrap());
    }

    #[test]
    fn test_empty_dataset_counts_as_loaded() {
        let db = Database::new().unwrap();
        db.load_dataset("nat:7", &[]).unwrap();
        assert!(db.has_dataset("nat:7").unwrap());
        let keys = db.dataset_keys().unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].cyclone_count, 0);
    }
}
