// gui/mod.rs
// GUI module root for adb-app-manager

pub mod app;
pub mod util;
mod components {
    pub mod actions;
    pub mod device_selector;
    pub mod header;
    pub mod progress_bar;
    pub mod screenshot_preview;
}
mod hooks;

pub use app::run_gui;

pub const INITIAL_STATUS: &str = "Status: Not connected";
pub const NO_SELECTION_STATUS: &str = "Please select a device first.";
pub const DESELECTED_STATUS: &str = "No device selected.";
pub const DISCONNECTED_STATUS: &str = "Device disconnected. Please select a new one.";
