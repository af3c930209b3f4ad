use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// A specialized `Result` type for ADB operations.
pub type AdbResult<T> = Result<T, AdbError>;

/// The error type for all ADB-related operations.
#[derive(Debug, Error)]
pub enum AdbError {
    #[error(
        "'{program}' binary not found in PATH. Install Android Platform Tools (https://developer.android.com/tools/adb) or run with --impl=rust."
    )]
    AdbNotFound { program: String },

    #[error("Failed to invoke '{program}': {source}")]
    AdbSpawnFailed {
        program: String,
        source: std::io::Error,
    },

    #[error("'adb {command}' failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("ADB server error during {operation}: {source}")]
    Server {
        operation: String,
        source: adb_client::RustADBError,
    },

    #[error("Device '{serial}' not found. Check device connection and try again.")]
    DeviceNotFound { serial: String },

    #[error("Device '{serial}' is {state}, not ready for commands")]
    DeviceNotReady { serial: String, state: String },

    #[error("No device selected")]
    NoDeviceSelected,

    #[error("APK not found at {path:?}")]
    ApkNotFound { path: PathBuf },

    #[error("Operation timed out after {duration:?}: {description}")]
    Timeout {
        duration: Duration,
        description: String,
    },

    #[error("Task failed to complete: {source}")]
    JoinError {
        #[from]
        source: tokio::task::JoinError,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to convert screenshot: {source}")]
    Image {
        #[from]
        source: image::ImageError,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Could not parse '{what}' from: {output}")]
    UnexpectedOutput { what: String, output: String },
}

impl AdbError {
    pub fn server(operation: &str, source: adb_client::RustADBError) -> Self {
        AdbError::Server {
            operation: operation.to_string(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AdbError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the failure means the device went away rather than the command
    /// itself being rejected. The GUI uses this to drop its selection.
    pub fn is_device_gone(&self) -> bool {
        match self {
            AdbError::DeviceNotFound { .. } => true,
            AdbError::DeviceNotReady { state, .. } => state == "offline",
            AdbError::CommandFailed { stderr, .. } => mentions_missing_device(stderr),
            AdbError::Server { source, .. } => mentions_missing_device(&source.to_string()),
            _ => false,
        }
    }
}

// adb says "device 'X' not found", "device offline" or "no devices/emulators found"
fn mentions_missing_device(message: &str) -> bool {
    message.contains("device") && (message.contains("not found") || message.contains("offline"))
}
