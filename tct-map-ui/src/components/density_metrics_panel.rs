//! Summary metrics panel for the active heatmap overlay.

use dioxus::prelude::*;
use tct_data::metrics::DensityMetrics;

#[derive(Props, Clone, PartialEq)]
pub struct DensityMetricsPanelProps {
    pub metrics: Option<DensityMetrics>,
}

/// Displays density-grid statistics and severity buckets.
#[component]
pub fn DensityMetricsPanel(props: DensityMetricsPanelProps) -> Element {
    let Some(m) = props.metrics else {
        return rsx! {};
    };

    rsx! {
        div {
            style: "padding: 10px 14px; background: #FAFAFA; border: 1px solid #E0E0E0; border-radius: 4px; margin: 8px 0;",
            h4 {
                style: "margin: 0 0 6px 0; font-size: 14px;",
                "Density grid"
            }
            table {
                style: "font-size: 13px; border-collapse: collapse;",
                tr {
                    td { style: "padding-right: 12px;", "Active cells" }
                    td { style: "font-weight: bold;", "{m.active_cells}" }
                }
                tr {
                    td { style: "padding-right: 12px;", "Max / mean per cell" }
                    td { style: "font-weight: bold;", "{m.max_count} / {m.mean_count}" }
                }
                tr {
                    td { style: "padding-right: 12px;", "Severe (80+)" }
                    td { style: "font-weight: bold;", "{m.severe_cells}" }
                }
                tr {
                    td { style: "padding-right: 12px;", "High (40-79)" }
                    td { style: "font-weight: bold;", "{m.high_cells}" }
                }
                tr {
                    td { style: "padding-right: 12px;", "Moderate (10-39)" }
                    td { style: "font-weight: bold;", "{m.moderate_cells}" }
                }
                tr {
                    td { style: "padding-right: 12px;", "Low (1-9)" }
                    td { style: "font-weight: bold;", "{m.low_cells}" }
                }
            }
        }
    }
}
