//! `AppManager`: the device actions both front ends call.
//!
//! Every action turns its result into a user-facing [`Outcome`] and reports
//! progress percentages through a callback; errors never escape as `Err`.

use crate::adb::{AdbBackend, AdbClient, AdbError, AdbResult};
use crate::config::Settings;
use crate::screenshot::{self, ScreenshotPaths};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub ok: bool,
    pub message: String,
    /// File produced by the action (screenshots)
    pub path: Option<PathBuf>,
    /// The failure means the device itself disappeared
    pub device_lost: bool,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Outcome {
            ok: true,
            message: message.into(),
            path: None,
            device_lost: false,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Outcome {
            ok: false,
            message: message.into(),
            path: None,
            device_lost: false,
        }
    }

    fn from_error(message: String, err: &AdbError) -> Self {
        Outcome {
            device_lost: err.is_device_gone(),
            ..Outcome::failure(message)
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub struct AppManager<C: AdbClient = AdbBackend> {
    client: Arc<C>,
    settings: Settings,
    /// Ready serials seen when the manager was built
    known: Vec<String>,
    serial: Option<String>,
}

impl AppManager<AdbBackend> {
    /// Opens the configured backend and targets `preferred` (or the first device).
    pub async fn open(settings: Settings, preferred: Option<&str>) -> AdbResult<Self> {
        let backend = AdbBackend::from_settings(&settings).await?;
        log::info!("using {} ADB backend", backend.impl_name());
        Ok(Self::new(Arc::new(backend), settings, preferred).await)
    }
}

impl<C: AdbClient> AppManager<C> {
    /// A failed device listing is logged and treated as "no devices".
    ///
    /// An explicit `preferred` serial is always the target, listed or not:
    /// `connect` may still reach it (`host:port`), every other action refuses
    /// it until it shows up as ready. Without one the first ready device is used.
    pub async fn new(client: Arc<C>, settings: Settings, preferred: Option<&str>) -> Self {
        let known = match client.list_devices().await {
            Ok(devices) => crate::adb::types::ready_serials(&devices),
            Err(e) => {
                log::error!("Error getting device serials: {e}");
                Vec::new()
            }
        };
        let serial = match preferred {
            Some(serial) => {
                if !known.iter().any(|k| k == serial) {
                    log::warn!("device {serial} is not connected and ready");
                }
                Some(serial.to_string())
            }
            None => known.first().cloned(),
        };
        match &serial {
            Some(serial) => log::debug!("selected device {serial}"),
            None => log::warn!("no device connected"),
        }
        AppManager {
            client,
            settings,
            known,
            serial,
        }
    }

    /// Manager bound to a serial the caller already saw listed as ready.
    pub fn for_device(client: Arc<C>, settings: Settings, serial: &str) -> Self {
        AppManager {
            client,
            settings,
            known: vec![serial.to_string()],
            serial: Some(serial.to_string()),
        }
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn device_serial(&self) -> Option<&str> {
        self.serial.as_deref()
    }

    pub fn device_serials(&self) -> &[String] {
        &self.known
    }

    /// The target must be one of the ready devices; it is never swapped for
    /// another one.
    fn require_serial(&self) -> AdbResult<&str> {
        let serial = self.device_serial().ok_or(AdbError::NoDeviceSelected)?;
        if !self.known.iter().any(|k| k == serial) {
            return Err(AdbError::DeviceNotFound {
                serial: serial.to_string(),
            });
        }
        Ok(serial)
    }

    pub async fn server_version(&self) -> Outcome {
        match self.client.server_version().await {
            Ok(v) => Outcome::success(format!("ADB server version: {v}")),
            Err(e) => Outcome::from_error(format!("Could not read ADB version: {e}"), &e),
        }
    }

    pub async fn connect(&self, progress: impl Fn(u8)) -> Outcome {
        let Some(serial) = self.device_serial() else {
            progress(0);
            return Outcome::failure("No device connected.");
        };
        match self.client.connect(serial).await {
            Ok(()) => {
                progress(100);
                Outcome::success(format!("Device is connected.\nSerial number: {serial}"))
            }
            Err(e) => {
                progress(0);
                Outcome::from_error(
                    format!(
                        "{e}\nDevice is not connected. Check device connection and try again."
                    ),
                    &e,
                )
            }
        }
    }

    pub async fn install_app(&self, apk: &Path, progress: impl Fn(u8)) -> Outcome {
        progress(50);
        match self.try_install(apk).await {
            Ok(true) => {
                progress(100);
                Outcome::success("App is installed.")
            }
            Ok(false) => {
                progress(0);
                Outcome::failure("App is not installed.")
            }
            Err(e) => {
                progress(0);
                log::error!("install {} failed: {e}", apk.display());
                Outcome::from_error(format!("App is not installed.\n{e}"), &e)
            }
        }
    }

    async fn try_install(&self, apk: &Path) -> AdbResult<bool> {
        let serial = self.require_serial()?;
        if !apk.is_file() {
            return Err(AdbError::ApkNotFound {
                path: apk.to_path_buf(),
            });
        }
        log::info!("installing {} on {serial}", apk.display());
        self.client.install(serial, apk).await
    }

    pub async fn app_is_installed(&self, package: &str) -> Outcome {
        let result = match self.require_serial() {
            Ok(serial) => self.client.is_installed(serial, package).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(true) => Outcome::success("App is already installed."),
            Ok(false) => Outcome::failure("App is not installed."),
            Err(e) => Outcome::from_error(format!("Could not check {package}: {e}"), &e),
        }
    }

    pub async fn uninstall_app(&self, package: &str, progress: impl Fn(u8)) -> Outcome {
        progress(50);
        let result = match self.require_serial() {
            Ok(serial) => {
                log::info!("uninstalling {package} from {serial}");
                self.client.uninstall(serial, package).await
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(true) => {
                progress(100);
                Outcome::success("App is uninstalled.")
            }
            Ok(false) => {
                progress(0);
                Outcome::failure("App is not uninstalled.")
            }
            Err(e) => {
                progress(0);
                log::error!("uninstall {package} failed: {e}");
                Outcome::from_error(format!("App is not uninstalled.\n{e}"), &e)
            }
        }
    }

    pub async fn run_shell(&self, command: &str) -> Outcome {
        let result = match self.require_serial() {
            Ok(serial) => self.client.shell(serial, command).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(out) => Outcome::success(out.trim_end().to_string()),
            Err(e) => Outcome::from_error(format!("Shell command failed: {e}"), &e),
        }
    }

    pub async fn take_screenshot(&self, progress: impl Fn(u8)) -> Outcome {
        let paths = ScreenshotPaths::new(&self.settings, chrono::Local::now());
        match self.capture_and_pull(&paths, &progress).await {
            Ok((w, h)) => {
                progress(100);
                log::info!("screenshot {w}x{h} saved to {}", paths.local.display());
                Outcome {
                    path: Some(paths.local.clone()),
                    ..Outcome::success(format!(
                        "Screenshot saved locally: {}",
                        paths.local.display()
                    ))
                }
            }
            Err(e) => {
                progress(0);
                Outcome::from_error(format!("Error while taking screenshot: {e}"), &e)
            }
        }
    }

    async fn capture_and_pull(
        &self,
        paths: &ScreenshotPaths,
        progress: &impl Fn(u8),
    ) -> AdbResult<(u32, u32)> {
        let serial = self.require_serial()?;

        progress(30);
        self.client.screencap(serial, &paths.remote).await?;
        screenshot::ensure_local_dir(&self.settings.local_screenshot_dir).await?;

        progress(60);
        self.client.pull(serial, &paths.remote, &paths.pulled).await?;
        if !self.settings.keep_remote_screenshot
            && let Err(e) = self.client.remove_remote(serial, &paths.remote).await
        {
            log::warn!("could not remove {} from device: {e}", paths.remote);
        }
        screenshot::finalize(paths).await
    }

    async fn ready_devices(&self) -> AdbResult<Vec<String>> {
        let devices = self.client.list_devices().await?;
        Ok(crate::adb::types::ready_serials(&devices))
    }

    /// Installs on every connected device, one outcome per serial.
    pub async fn install_all(&self, apk: &Path) -> AdbResult<Vec<(String, Outcome)>> {
        let mut results = Vec::new();
        for serial in self.ready_devices().await? {
            let manager = self.for_serial(&serial);
            let outcome = manager.install_app(apk, |_| {}).await;
            results.push((serial, outcome));
        }
        Ok(results)
    }

    pub async fn uninstall_all(&self, package: &str) -> AdbResult<Vec<(String, Outcome)>> {
        let mut results = Vec::new();
        for serial in self.ready_devices().await? {
            let manager = self.for_serial(&serial);
            let outcome = manager.uninstall_app(package, |_| {}).await;
            results.push((serial, outcome));
        }
        Ok(results)
    }

    pub async fn is_installed_all(&self, package: &str) -> AdbResult<Vec<(String, Outcome)>> {
        let mut results = Vec::new();
        for serial in self.ready_devices().await? {
            let outcome = self.for_serial(&serial).app_is_installed(package).await;
            results.push((serial, outcome));
        }
        Ok(results)
    }

    fn for_serial(&self, serial: &str) -> AppManager<C> {
        AppManager::for_device(Arc::clone(&self.client), self.settings.clone(), serial)
    }
}
