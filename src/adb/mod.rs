// ADB module - device access through either the host `adb` binary or the
// ADB server socket (adb_client). Protocol and transport stay in those tools.

pub mod backend;
pub mod error;
pub mod rust_impl;
pub mod shell;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export the main types for easy access
pub use backend::AdbBackend;
pub use error::{AdbError, AdbResult};
pub use types::{AdbClient, Device, DeviceState};
