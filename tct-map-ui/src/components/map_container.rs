//! Map container component with loading overlay.

use dioxus::prelude::*;

/// Props for MapContainer
#[derive(Props, Clone, PartialEq)]
pub struct MapContainerProps {
    /// The DOM id for the map container (Leaflet renders into this)
    pub id: String,
    /// Whether data is still loading
    #[props(default = false)]
    pub loading: bool,
    /// Minimum height in pixels
    #[props(default = 520)]
    pub min_height: u32,
}

/// A container div for the Leaflet map with loading overlay.
#[component]
pub fn MapContainer(props: MapContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            if props.loading {
                div {
                    style: "position: absolute; top: 8px; left: 50%; transform: translateX(-50%); z-index: 1000; background: rgba(255,255,255,0.9); padding: 4px 12px; border-radius: 4px; color: #666;",
                    "Loading data..."
                }
            }
            div {
                id: "{props.id}",
                style: "width: 100%; height: {props.min_height}px;",
            }
        }
    }
}
