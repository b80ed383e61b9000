//! Shared Dioxus components and Leaflet bridge for the cyclone map app.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for Leaflet layer functions via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals around the pure model
//! - `loader`: async data fetching with stale-result and coalescing guards
//! - `layers`: JSON layer payload builders for the bridge
//! - `components`: Reusable RSX components (selectors, panels, etc.)

pub mod components;
pub mod js_bridge;
pub mod layers;
pub mod loader;
pub mod state;
