// gui/components/device_selector.rs
use crate::config::Settings;
use crate::gui::DESELECTED_STATUS;
use crate::gui::hooks::types::{DeviceSignals, SharedBackend};
use crate::manager::AppManager;
use dioxus::prelude::*;
use std::sync::Arc;

#[derive(Props, PartialEq, Clone)]
pub struct DeviceSelectorProps {
    pub device: DeviceSignals,
    pub backend: SharedBackend,
    pub busy: Signal<bool>,
    pub settings: Settings,
}

#[component]
pub fn DeviceSelector(props: DeviceSelectorProps) -> Element {
    let mut device = props.device;
    let backend = props.backend;
    let settings = props.settings.clone();
    let busy = *props.busy.read();

    let (entries, current) = {
        let selection = device.selection.read();
        (selection.entries(), selection.current_entry().to_string())
    };
    let status = device.status.read().clone();

    rsx! {
        div { style: "background: rgba(255,255,255,0.1); padding:12px; border-radius:12px; border:1px solid rgba(255,255,255,0.2); display:flex; flex-direction:column; gap:8px;",
            select { style: "padding:6px; border-radius:6px; font-size:0.95em;",
                disabled: busy,
                onchange: move |evt| {
                    let entry = evt.value();
                    let chosen = device
                        .selection
                        .with_mut(|selection| selection.select(&entry).map(str::to_string));
                    let Some(serial) = chosen else {
                        device.manager.set(None);
                        device.status.set(DESELECTED_STATUS.to_string());
                        return;
                    };
                    let Some(client) = backend.read().clone() else {
                        log::warn!("device {serial} picked before the backend was ready");
                        return;
                    };
                    let manager = AppManager::for_device(client, settings.clone(), &serial);
                    log::info!("Device {serial} selected.");
                    device.manager.set(Some(Arc::new(manager)));
                    device.status.set(format!("Device {serial} selected."));
                },
                for entry in entries {
                    option { key: "{entry}", value: "{entry}", selected: entry == current, "{entry}" }
                }
            }
            p { style: "margin:0; font-size:0.85em; white-space:pre-line;", "{status}" }
        }
    }
}
