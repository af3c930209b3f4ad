// gui/components/progress_bar.rs
use dioxus::prelude::*;

#[component]
pub fn ProgressBar(progress: Signal<u8>) -> Element {
    let value = *progress.read();
    rsx! {
        div { style: "display:flex; align-items:center; gap:8px;",
            progress { style: "flex:1; height:14px;", max: "100", value: "{value}" }
            span { style: "font-size:0.75em; min-width:3em; text-align:right;", "{value}%" }
        }
    }
}
