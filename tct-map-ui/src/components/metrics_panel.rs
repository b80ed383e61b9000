//! Summary metrics panel for a filtered cyclone set.

use dioxus::prelude::*;
use tct_data::metrics::CycloneMetrics;

#[derive(Props, Clone, PartialEq)]
pub struct MetricsPanelProps {
    /// Panel heading (e.g. the selection description)
    pub title: String,
    pub metrics: Option<CycloneMetrics>,
}

/// Displays cyclone-set summary statistics in a compact grid.
#[component]
pub fn MetricsPanel(props: MetricsPanelProps) -> Element {
    let Some(m) = props.metrics else {
        return rsx! {
            div {
                style: "padding: 10px; color: #666;",
                "No data loaded"
            }
        };
    };

    rsx! {
        div {
            style: "padding: 10px 14px; background: #FAFAFA; border: 1px solid #E0E0E0; border-radius: 4px; margin: 8px 0;",
            h4 {
                style: "margin: 0 0 6px 0; font-size: 14px;",
                "{props.title}"
            }
            table {
                style: "font-size: 13px; border-collapse: collapse;",
                tr {
                    td { style: "padding-right: 12px;", "Cyclones" }
                    td { style: "font-weight: bold;", "{m.total_cyclones}" }
                }
                tr {
                    td { style: "padding-right: 12px;", "Severe (cat 3+)" }
                    td { style: "font-weight: bold;", "{m.severe_cyclones} ({m.severe_percent}%)" }
                }
                tr {
                    td { style: "padding-right: 12px;", "Mean max category" }
                    td { style: "font-weight: bold;", "{m.mean_max_category}" }
                }
                tr {
                    td { style: "padding-right: 12px;", "Max wind" }
                    td { style: "font-weight: bold;", "{m.max_wind} km/h" }
                }
                tr {
                    td { style: "padding-right: 12px;", "Landfalls" }
                    td { style: "font-weight: bold;", "{m.landfall_count}" }
                }
            }
        }
    }
}
