//! SQL schema for the in-memory cyclone store.

/// Returns the full SQL schema as a single batch string.
///
/// Three tables, all keyed by a dataset key of the form
/// `scenario[:sst]:ensemble`:
///
/// - `datasets` - one row per loaded dataset (an ensemble member can
///   legitimately contain zero cyclones, so presence is tracked here,
///   not inferred from cyclone rows)
/// - `cyclones` - one row per cyclone with its track-derived aggregates
/// - `track_points` - ordered positions for each cyclone
///
/// Year filtering and per-dataset invalidation run against these
/// directly; nothing is precomputed.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS datasets (
        dataset_key TEXT PRIMARY KEY,
        cyclone_count INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS cyclones (
        dataset_key TEXT NOT NULL,
        cyclone_id TEXT NOT NULL,
        name TEXT NOT NULL,
        year INTEGER NOT NULL,
        max_category INTEGER NOT NULL,
        max_wind REAL NOT NULL,
        min_pressure REAL NOT NULL,
        genesis_lat REAL,
        genesis_lon REAL,
        landfall INTEGER NOT NULL,
        duration_days REAL NOT NULL,
        PRIMARY KEY (dataset_key, cyclone_id)
    );
    CREATE INDEX IF NOT EXISTS idx_cyclones_year ON cyclones(dataset_key, year);

    CREATE TABLE IF NOT EXISTS track_points (
        dataset_key TEXT NOT NULL,
        cyclone_id TEXT NOT NULL,
        seq INTEGER NOT NULL,
        lat REAL NOT NULL,
        lon REAL NOT NULL,
        date TEXT NOT NULL,
        category INTEGER NOT NULL,
        wind_speed REAL NOT NULL,
        pressure REAL NOT NULL,
        PRIMARY KEY (dataset_key, cyclone_id, seq)
    );
    CREATE INDEX IF NOT EXISTS idx_track_points_cyclone
        ON track_points(dataset_key, cyclone_id);

    "#
}
