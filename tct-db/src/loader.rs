//! Dataset loading into the in-memory store.
//!
//! A dataset is the parsed cyclone array of one API response, inserted
//! whole under its dataset key. Reloading an existing key replaces it.

use crate::Database;
use rusqlite::params;
use tct_cyclone::track::Cyclone;

impl Database {
    /// Load a parsed cyclone dataset under the given key.
    ///
    /// Replaces any prior content for the key. Cyclone aggregates are
    /// expected to be consistent already (`recompute_aggregates` runs at
    /// parse time).
    pub fn load_dataset(&self, dataset_key: &str, cyclones: &[Cyclone]) -> anyhow::Result<()> {
        let conn = self.conn.borrow();

        conn.execute(
            "DELETE FROM track_points WHERE dataset_key = ?1",
            params![dataset_key],
        )?;
        conn.execute(
            "DELETE FROM cyclones WHERE dataset_key = ?1",
            params![dataset_key],
        )?;

        for cyclone in cyclones {
            conn.execute(
                "INSERT OR REPLACE INTO cyclones
                 (dataset_key, cyclone_id, name, year, max_category, max_wind,
                  min_pressure, genesis_lat, genesis_lon, landfall, duration_days)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    dataset_key,
                    cyclone.id,
                    cyclone.name,
                    cyclone.year,
                    cyclone.max_category as i64,
                    cyclone.max_wind,
                    cyclone.min_pressure,
                    cyclone.genesis_lat,
                    cyclone.genesis_lon,
                    cyclone.landfall as i64,
                    cyclone.duration_days,
                ],
            )?;
            for (seq, point) in cyclone.track.iter().enumerate() {
                conn.execute(
                    "INSERT OR REPLACE INTO track_points
                     (dataset_key, cyclone_id, seq, lat, lon, date,
                      category, wind_speed, pressure)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        dataset_key,
                        cyclone.id,
                        seq as i64,
                        point.lat,
                        point.lon,
                        point.date,
                        point.category as i64,
                        point.wind_speed,
                        point.pressure,
                    ],
                )?;
            }
        }

        conn.execute(
            "INSERT OR REPLACE INTO datasets (dataset_key, cyclone_count) VALUES (?1, ?2)",
            params![dataset_key, cyclones.len() as i64],
        )?;

        log::info!(
            "[TCT] store: loaded {} cyclones under '{}'",
            cyclones.len(),
            dataset_key
        );
        Ok(())
    }

    /// Drop every loaded dataset.
    pub fn clear_all(&self) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        conn.execute("DELETE FROM track_points", [])?;
        conn.execute("DELETE FROM cyclones", [])?;
        conn.execute("DELETE FROM datasets", [])?;
        log::info!("[TCT] store: cleared all datasets");
        Ok(())
    }

    /// Drop every dataset whose key starts with the given scenario
    /// prefix (e.g. "4k:" after the precomputed 4K data is republished).
    pub fn clear_scenario(&self, scenario_prefix: &str) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        let pattern = format!("{}%", scenario_prefix);
        conn.execute(
            "DELETE FROM track_points WHERE dataset_key LIKE ?1",
            params![pattern],
        )?;
        conn.execute(
            "DELETE FROM cyclones WHERE dataset_key LIKE ?1",
            params![pattern],
        )?;
        let removed = conn.execute(
            "DELETE FROM datasets WHERE dataset_key LIKE ?1",
            params![pattern],
        )?;
        log::info!(
            "[TCT] store: cleared {} datasets under '{}'",
            removed,
            scenario_prefix
        );
        Ok(removed)
    }
}
