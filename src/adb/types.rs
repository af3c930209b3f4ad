// Core ADB types and traits
use super::error::AdbResult;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Connection state reported by the ADB server for a serial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DeviceState {
    Device,
    Offline,
    Unauthorized,
    Other(String),
}

impl DeviceState {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "device" => DeviceState::Device,
            "offline" => DeviceState::Offline,
            "unauthorized" => DeviceState::Unauthorized,
            other => DeviceState::Other(other.to_string()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DeviceState::Device)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceState::Device => f.write_str("device"),
            DeviceState::Offline => f.write_str("offline"),
            DeviceState::Unauthorized => f.write_str("unauthorized"),
            DeviceState::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Clone)]
pub struct Device {
    pub serial: String,
    pub state: DeviceState,
    pub transport_id: Option<String>,
}

impl Device {
    pub fn ready(serial: &str) -> Self {
        Device {
            serial: serial.to_string(),
            state: DeviceState::Device,
            transport_id: None,
        }
    }
}

/// Serials of the devices that can take commands right now.
pub fn ready_serials(devices: &[Device]) -> Vec<String> {
    devices
        .iter()
        .filter(|d| d.state.is_ready())
        .map(|d| d.serial.clone())
        .collect()
}

/// `pm list packages <filter>` does substring matching, so only an exact
/// `package:<name>` line counts.
pub fn package_listed(pm_output: &str, package: &str) -> bool {
    pm_output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("package:"))
        .any(|name| name == package)
}

/// `pm install`/`pm uninstall` print `Success` on their last line when they work.
pub fn pm_succeeded(output: &str) -> bool {
    output.lines().any(|line| line.trim() == "Success")
}

// Trait defining ADB capabilities (shell or rust implementations).
// Every device-level call names its target serial; the client itself only
// knows how to reach the ADB server.
#[allow(async_fn_in_trait)]
pub trait AdbClient: Send + Sync {
    async fn list_devices(&self) -> AdbResult<Vec<Device>>;

    async fn server_version(&self) -> AdbResult<String>;

    /// Make sure `serial` is reachable and answering shell commands.
    async fn connect(&self, serial: &str) -> AdbResult<()>;

    async fn install(&self, serial: &str, apk: &Path) -> AdbResult<bool>;

    async fn uninstall(&self, serial: &str, package: &str) -> AdbResult<bool>;

    async fn shell(&self, serial: &str, command: &str) -> AdbResult<String>;

    async fn pull(&self, serial: &str, remote: &str, local: &Path) -> AdbResult<()>;

    async fn is_installed(&self, serial: &str, package: &str) -> AdbResult<bool> {
        let out = self
            .shell(serial, &format!("pm list packages {package}"))
            .await?;
        Ok(package_listed(&out, package))
    }

    async fn screencap(&self, serial: &str, remote: &str) -> AdbResult<()> {
        self.shell(serial, &format!("screencap -p {remote}"))
            .await
            .map(|_| ())
    }

    async fn remove_remote(&self, serial: &str, remote: &str) -> AdbResult<()> {
        self.shell(serial, &format!("rm -f {remote}")).await.map(|_| ())
    }
}
