use crate::adb::AdbBackend;
use crate::devices::DeviceSelection;
use crate::manager::AppManager;
use dioxus::prelude::Signal;
use std::sync::Arc;

/// Backend opened once at startup, shared by the poll loop and every manager
pub type SharedBackend = Signal<Option<Arc<AdbBackend>>>;

/// Manager for the selected device; `None` until the user picks one
pub type SharedManager = Signal<Option<Arc<AppManager>>>;

// ============================================================================
// GROUPED SIGNAL STRUCTS - Reduce parameter explosion in function signatures
// ============================================================================

/// Device list, selection and the status line
#[derive(Clone, Copy, PartialEq)]
pub struct DeviceSignals {
    pub selection: Signal<DeviceSelection>,
    pub manager: SharedManager,
    pub status: Signal<String>,
}

/// State driven by the action buttons
#[derive(Clone, Copy, PartialEq)]
pub struct ActionSignals {
    pub progress: Signal<u8>,
    pub busy: Signal<bool>,
    /// Data URL of the last pulled screenshot
    pub preview: Signal<Option<String>>,
}
