use crate::config::Settings;
use crate::devices::DeviceSelection;
use crate::gui::INITIAL_STATUS;
use crate::gui::components::{
    actions::Actions, device_selector::DeviceSelector, header::Header, progress_bar::ProgressBar,
    screenshot_preview::ScreenshotPreview,
};
use crate::gui::hooks::{ActionSignals, DeviceSignals, use_device_poll};
use dioxus::prelude::*;

pub fn run_gui(settings: Settings) {
    use dioxus::desktop::{Config, WindowBuilder};
    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("ADB App Manager")
            .with_resizable(true)
            .with_inner_size(dioxus::desktop::LogicalSize::new(500, 300)),
    );
    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .with_context(settings)
        .launch(App);
}

#[component]
fn App() -> Element {
    let settings = use_context::<Settings>();
    let backend = use_signal(|| None);

    let device = DeviceSignals {
        selection: use_signal(DeviceSelection::default),
        manager: use_signal(|| None),
        status: use_signal(|| INITIAL_STATUS.to_string()),
    };
    let actions = ActionSignals {
        progress: use_signal(|| 0),
        busy: use_signal(|| false),
        preview: use_signal(|| None),
    };

    use_device_poll(settings.clone(), backend, device);
    let year = env!("ADB_MANAGER_BUILD_YEAR");

    rsx! {
        div { style: "height:97vh; overflow:auto; display:flex; flex-direction:column; gap:10px; padding:8px; background:linear-gradient(135deg,#667eea 0%,#764ba2 100%); color:white; font-family:sans-serif;",
            Header {}
            DeviceSelector { device, backend, busy: actions.busy, settings: settings.clone() }
            Actions { device, actions }
            ProgressBar { progress: actions.progress }
            ScreenshotPreview { preview: actions.preview }
            div { style: "margin-top:auto; text-align:left; font-size:0.7em; opacity:0.75; letter-spacing:0.5px;",
                "Built with Rust 🦀 and Dioxus ⚛️ · © {year}"
            }
        }
    }
}
