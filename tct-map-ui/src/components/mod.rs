//! Reusable Dioxus RSX components for the cyclone map app.

mod comparison_panel;
mod density_metrics_panel;
mod ensemble_selector;
mod error_display;
mod export_button;
mod loading_spinner;
mod map_container;
mod metrics_panel;
mod mode_toggles;
mod notice_display;
mod scenario_selector;
mod sst_selector;
mod year_range_picker;

pub use comparison_panel::ComparisonPanel;
pub use density_metrics_panel::DensityMetricsPanel;
pub use ensemble_selector::EnsembleSelector;
pub use error_display::ErrorDisplay;
pub use export_button::ExportButton;
pub use loading_spinner::LoadingSpinner;
pub use map_container::MapContainer;
pub use metrics_panel::MetricsPanel;
pub use mode_toggles::ModeToggles;
pub use notice_display::NoticeDisplay;
pub use scenario_selector::ScenarioSelector;
pub use sst_selector::SstSelector;
pub use year_range_picker::YearRangePicker;
