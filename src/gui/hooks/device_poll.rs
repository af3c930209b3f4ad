use crate::adb::{AdbBackend, AdbClient, types::ready_serials};
use crate::config::Settings;
use crate::devices::RefreshOutcome;
use crate::gui::DISCONNECTED_STATUS;
use crate::gui::hooks::types::*;
use dioxus::prelude::*;
use std::sync::Arc;

/// Opens the configured backend, then keeps the device drop-down in sync with
/// the ADB server. Losing the selected device drops its manager.
pub fn use_device_poll(settings: Settings, mut backend: SharedBackend, mut device: DeviceSignals) {
    use_future(move || {
        let settings = settings.clone();
        async move {
            let interval = settings.poll_interval();

            let client = loop {
                match AdbBackend::from_settings(&settings).await {
                    Ok(client) => {
                        log::info!("using {} ADB backend", client.impl_name());
                        break Arc::new(client);
                    }
                    Err(e) => {
                        log::warn!("ADB backend unavailable: {e}");
                        device.status.set(format!("Status: {e}"));
                        tokio::time::sleep(interval).await;
                    }
                }
            };
            backend.set(Some(client.clone()));

            loop {
                let serials = match client.list_devices().await {
                    Ok(devices) => ready_serials(&devices),
                    Err(e) => {
                        log::error!("Error getting device serials: {e}");
                        Vec::new()
                    }
                };

                match device.selection.with_mut(|selection| selection.refresh(serials)) {
                    RefreshOutcome::SelectionLost => {
                        log::info!("selected device went away");
                        device.manager.set(None);
                        device.status.set(DISCONNECTED_STATUS.to_string());
                    }
                    RefreshOutcome::Updated => {
                        log::debug!("device list: {:?}", device.selection.read().known());
                    }
                    RefreshOutcome::Unchanged => {}
                }

                tokio::time::sleep(interval).await;
            }
        }
    });
}
