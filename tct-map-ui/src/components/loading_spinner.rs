//! Loading spinner component.

use dioxus::prelude::*;

/// Simple loading indicator shown while the store initializes.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 48px; color: #666;",
            "Loading cyclone data..."
        }
    }
}
