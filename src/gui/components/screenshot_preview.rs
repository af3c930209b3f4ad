// gui/components/screenshot_preview.rs
use dioxus::prelude::*;

#[component]
pub fn ScreenshotPreview(preview: Signal<Option<String>>) -> Element {
    let current = preview.read().clone();
    rsx! {
        div { style: "background: rgba(255,255,255,0.1); padding:10px; border-radius:12px; border:1px solid rgba(255,255,255,0.2); text-align:center;",
            if let Some(src) = current {
                img { style: "max-width:100%; max-height:360px; border:4px solid #4CAF50; border-radius:8px;", src: "{src}" }
            } else {
                p { style: "margin:6px 0; font-size:0.8em; opacity:0.7;", "📸 No screenshot yet" }
            }
        }
    }
}
