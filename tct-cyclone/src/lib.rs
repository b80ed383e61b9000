pub mod api;
pub mod density;
pub mod export;
pub mod modes;
pub mod scenario;
pub mod state;
pub mod track;
pub mod year_range;
