//! In-memory SQLite store for cyclone track datasets.
//!
//! Each fetched (scenario, ensemble, SST) dataset is loaded once under
//! its dataset key and is immutable afterwards; invalidation is
//! wholesale or per-scenario-prefix, never per cyclone. The store is the
//! session cache behind both the map layers and the comparison panels.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in
//!   single-threaded WASM
//! - In-memory SQLite via `rusqlite` (compiles to `wasm32-unknown-unknown`)
//! - Typed query methods returning serializable structs
//!
//! # Usage
//!
//! ```rust
//! use tct_db::Database;
//! use tct_cyclone::api::parse_cyclone_response;
//!
//! let db = Database::new().unwrap();
//! let data = parse_cyclone_response(r#"{
//!     "success": true,
//!     "data": { "cyclones": [
//!         {"id": "c1", "year": 1960, "track": [
//!             {"lat": 10.0, "lon": 140.0, "date": "1960-08-01",
//!              "category": 2, "wind_speed": 120.0, "pressure": 975.0}
//!         ]}
//!     ]}
//! }"#).unwrap();
//! db.load_dataset("current:1", &data.cyclones).unwrap();
//! assert!(db.has_dataset("current:1").unwrap());
//! ```

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database of cyclone track datasets.
///
/// Cheaply cloneable (via `Rc`) and suitable for sharing across Dioxus
/// components in a single-threaded WASM environment.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_dataset("current:1", &[]).unwrap();
        // Clone sees the same data via the shared Rc
        assert!(db2.has_dataset("current:1").unwrap());
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert!(db.dataset_keys().unwrap().is_empty());
        assert!(!db.has_dataset("current:1").unwrap());
    }
}
