//! Informational notice component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct NoticeDisplayProps {
    pub message: String,
}

/// Displays a non-fatal notice (rejected toggle, missing density data).
#[component]
pub fn NoticeDisplay(props: NoticeDisplayProps) -> Element {
    rsx! {
        div {
            style: "padding: 10px 14px; margin: 8px 0; background: #FFF8E1; color: #8D6E63; border-radius: 4px; border: 1px solid #FFE082;",
            "{props.message}"
        }
    }
}
