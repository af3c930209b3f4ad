// gui/components/header.rs
use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    let version = env!("ADB_MANAGER_VERSION");
    rsx! {
        div { style: "background: rgba(255,255,255,0.08); padding:6px 10px; border-radius:10px; display:flex; align-items:center; gap:8px; border:1px solid rgba(255,255,255,0.15);",
            h1 { style: "font-size:1.05em; margin:0; font-weight:600; text-shadow:1px 1px 2px rgba(0,0,0,0.35);", "📱 ADB App Manager" }
            span { style: "margin-left:auto; font-size:0.65em; opacity:0.75;", "v{version}" }
        }
    }
}
