//! Settings: defaults, optional TOML file, CLI overrides on top.

use crate::adb::{AdbError, AdbResult};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_APK_PATH: &str = "utilities/uptodown.apk";
pub const DEFAULT_PACKAGE_NAME: &str = "com.uptodown";
pub const DEFAULT_ADB_PORT: u16 = 5037;

/// Which ADB implementation backs device access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AdbImpl {
    /// adb_client talking to the ADB server socket
    #[default]
    Rust,
    /// The host `adb` binary
    Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScreenshotFormat {
    #[default]
    Png,
    Jpeg,
}

impl ScreenshotFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ScreenshotFormat::Png => "png",
            ScreenshotFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ScreenshotFormat::Png => "image/png",
            ScreenshotFormat::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: AdbImpl,
    /// Program used by the shell backend
    pub adb_path: String,
    pub adb_host: Ipv4Addr,
    pub adb_port: u16,
    pub apk_path: PathBuf,
    pub package_name: String,
    pub remote_screenshot_dir: String,
    pub local_screenshot_dir: PathBuf,
    pub screenshot_format: ScreenshotFormat,
    /// Leave the capture in the device's storage after pulling it
    pub keep_remote_screenshot: bool,
    pub poll_interval_secs: u64,
    pub command_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            backend: AdbImpl::Rust,
            adb_path: "adb".to_string(),
            adb_host: Ipv4Addr::LOCALHOST,
            adb_port: DEFAULT_ADB_PORT,
            apk_path: PathBuf::from(DEFAULT_APK_PATH),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            remote_screenshot_dir: "/sdcard".to_string(),
            local_screenshot_dir: PathBuf::from("screenshots"),
            screenshot_format: ScreenshotFormat::Png,
            keep_remote_screenshot: true,
            poll_interval_secs: 5,
            command_timeout_secs: 120,
        }
    }
}

impl Settings {
    /// `<home>/.config/adb-app-manager/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        homedir::my_home().ok().flatten().map(|home| {
            home.join(".config")
                .join("adb-app-manager")
                .join("config.toml")
        })
    }

    pub fn from_toml(text: &str, path: &Path) -> AdbResult<Self> {
        toml::from_str(text).map_err(|source| AdbError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> AdbResult<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => {
                    log::debug!("no config file, using defaults");
                    return Ok(Settings::default());
                }
            },
        };
        let text = std::fs::read_to_string(&path).map_err(|e| AdbError::io(&path, e))?;
        let settings = Self::from_toml(&text, &path)?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn server_address(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.adb_host, self.adb_port)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs.max(1))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}
