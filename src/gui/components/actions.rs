// gui/components/actions.rs
use crate::gui::NO_SELECTION_STATUS;
use crate::gui::hooks::types::{ActionSignals, DeviceSignals};
use crate::gui::util::screenshot_data_url;
use crate::manager::Outcome;
use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Connect,
    Install,
    Uninstall,
    Screenshot,
}

impl Action {
    const ALL: [Action; 4] = [
        Action::Connect,
        Action::Install,
        Action::Uninstall,
        Action::Screenshot,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::Connect => "🔌 Connect to Device",
            Action::Install => "📦 Install App",
            Action::Uninstall => "🗑️ Uninstall App",
            Action::Screenshot => "📸 Take Screenshot",
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ActionsProps {
    pub device: DeviceSignals,
    pub actions: ActionSignals,
}

#[component]
pub fn Actions(props: ActionsProps) -> Element {
    let device = props.device;
    let actions = props.actions;
    let busy = *actions.busy.read();
    let style = if busy {
        "background:linear-gradient(45deg,#ff6b35,#f7931e); color:white; padding:10px 16px; border:none; border-radius:8px; cursor:wait; font-weight:bold; min-width:120px;"
    } else {
        "background:linear-gradient(45deg,#28a745,#20c997); color:white; padding:10px 16px; border:none; border-radius:8px; cursor:pointer; font-weight:bold; min-width:120px;"
    };

    rsx! {
        div { style: "display:flex; gap:10px; flex-wrap:wrap; justify-content:center;",
            for action in Action::ALL {
                button { key: "{action:?}", style: style, disabled: busy,
                    onclick: move |_| start(action, device, actions),
                    {action.label()}
                }
            }
        }
    }
}

/// Runs one action against the selected device without blocking the UI.
fn start(action: Action, mut device: DeviceSignals, mut actions: ActionSignals) {
    if *actions.busy.read() {
        return;
    }
    let Some(manager) = device.manager.read().clone() else {
        device.status.set(NO_SELECTION_STATUS.to_string());
        return;
    };

    actions.busy.set(true);
    actions.progress.set(0);
    spawn(async move {
        let bar = actions.progress;
        let report = move |percent: u8| {
            let mut bar = bar;
            bar.set(percent);
        };

        let outcome = match action {
            Action::Connect => {
                let outcome = manager.connect(report).await;
                Outcome {
                    message: format!("Status: {}", outcome.message),
                    ..outcome
                }
            }
            Action::Install => manager.install_app(&manager.settings().apk_path, report).await,
            Action::Uninstall => {
                manager
                    .uninstall_app(&manager.settings().package_name, report)
                    .await
            }
            Action::Screenshot => manager.take_screenshot(report).await,
        };

        if let Some(path) = &outcome.path {
            match tokio::fs::read(path).await {
                Ok(bytes) => {
                    let format = manager.settings().screenshot_format;
                    actions.preview.set(Some(screenshot_data_url(format, &bytes)));
                }
                Err(e) => log::warn!("could not load preview {}: {e}", path.display()),
            }
        }
        if outcome.device_lost {
            device.manager.set(None);
            device.selection.with_mut(|selection| selection.clear());
        }
        if outcome.ok {
            log::info!("{action:?}: {}", outcome.message);
        } else {
            log::warn!("{action:?}: {}", outcome.message);
        }
        device.status.set(outcome.message);
        actions.busy.set(false);
    });
}
