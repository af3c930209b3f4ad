// https://crates.io/crates/adb_client
use super::error::{AdbError, AdbResult};
use super::types::{AdbClient, Device, DeviceState, package_listed, pm_succeeded};
use adb_client::{ADBDeviceExt, ADBServer, ADBServerDevice};
use std::net::SocketAddrV4;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Backend that talks to the ADB server socket through `adb_client`.
pub struct RustAdb {
    address: SocketAddrV4,
    server: Arc<Mutex<ADBServer>>,
    timeout: Duration,
}

impl RustAdb {
    pub fn new(address: SocketAddrV4, timeout: Duration) -> Self {
        RustAdb {
            address,
            server: Arc::new(Mutex::new(ADBServer::new(address))),
            timeout,
        }
    }

    /// Runs a blocking `adb_client` call off the async runtime, bounded by the
    /// command timeout.
    async fn blocking<T, F>(&self, description: String, f: F) -> AdbResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut ADBServer) -> AdbResult<T> + Send + 'static,
    {
        let server = Arc::clone(&self.server);
        let task = tokio::task::spawn_blocking(move || {
            let mut server = server.blocking_lock();
            f(&mut server)
        });
        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join)) => Err(join.into()),
            Err(_) => Err(AdbError::Timeout {
                duration: self.timeout,
                description,
            }),
        }
    }

    async fn with_device<T, F>(&self, serial: &str, operation: &'static str, f: F) -> AdbResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut ADBServerDevice) -> AdbResult<T> + Send + 'static,
    {
        let name = serial.to_string();
        self.blocking(format!("{operation} on {serial}"), move |server| {
            let mut device = server
                .get_device_by_name(&name)
                .map_err(|_| AdbError::DeviceNotFound { serial: name })?;
            f(&mut device)
        })
        .await
    }

    async fn shell_words(&self, serial: &str, words: Vec<String>) -> AdbResult<String> {
        self.with_device(serial, "shell", move |device| {
            let args: Vec<&str> = words.iter().map(String::as_str).collect();
            let mut out: Vec<u8> = Vec::new();
            device
                .shell_command(&args, &mut out)
                .map_err(|e| AdbError::server("shell", e))?;
            Ok(String::from_utf8_lossy(&out).into_owned())
        })
        .await
    }
}

/// A failed pull must not leave an empty screenshot behind.
fn discard_partial(local: &Path) {
    if let Err(e) = std::fs::remove_file(local) {
        log::warn!("could not remove partial pull {}: {e}", local.display());
    }
}

impl AdbClient for RustAdb {
    async fn list_devices(&self) -> AdbResult<Vec<Device>> {
        self.blocking("list devices".into(), |server| {
            let devices = server
                .devices()
                .map_err(|e| AdbError::server("list devices", e))?;
            Ok(devices
                .into_iter()
                .map(|d| Device {
                    serial: d.identifier,
                    state: DeviceState::parse(&format!("{:?}", d.state)),
                    transport_id: None,
                })
                .collect())
        })
        .await
    }

    async fn server_version(&self) -> AdbResult<String> {
        self.blocking("server version".into(), |server| {
            let v = server
                .version()
                .map_err(|e| AdbError::server("server version", e))?;
            Ok(format!("{}.{}.{}", v.major, v.minor, v.revision))
        })
        .await
    }

    async fn connect(&self, serial: &str) -> AdbResult<()> {
        let mut devices = self.list_devices().await?;
        if !devices.iter().any(|d| d.serial == serial)
            && let Ok(address) = serial.parse::<SocketAddrV4>()
        {
            self.blocking(format!("connect {serial}"), move |server| {
                server
                    .connect_device(address)
                    .map_err(|e| AdbError::server("connect", e))
            })
            .await?;
            devices = self.list_devices().await?;
        }

        let device = devices
            .into_iter()
            .find(|d| d.serial == serial)
            .ok_or_else(|| AdbError::DeviceNotFound {
                serial: serial.to_string(),
            })?;
        if !device.state.is_ready() {
            return Err(AdbError::DeviceNotReady {
                serial: serial.to_string(),
                state: device.state.to_string(),
            });
        }

        // Test the connection with a simple command to ensure it's authorized
        let echo = self
            .shell_words(serial, vec!["echo".into(), "ok".into()])
            .await?;
        if echo.trim() != "ok" {
            return Err(AdbError::UnexpectedOutput {
                what: "connection check".into(),
                output: echo,
            });
        }
        log::debug!("rust backend: {serial} is answering via {}", self.address);
        Ok(())
    }

    async fn install(&self, serial: &str, apk: &Path) -> AdbResult<bool> {
        let apk: PathBuf = apk.to_path_buf();
        self.with_device(serial, "install", move |device| {
            device
                .install(&apk)
                .map_err(|e| AdbError::server("install", e))?;
            Ok(true)
        })
        .await
    }

    async fn uninstall(&self, serial: &str, package: &str) -> AdbResult<bool> {
        let out = self
            .shell_words(
                serial,
                vec!["pm".into(), "uninstall".into(), package.to_string()],
            )
            .await?;
        if !pm_succeeded(&out) {
            log::info!("uninstall {package} on {serial}: {}", out.trim());
        }
        Ok(pm_succeeded(&out))
    }

    async fn shell(&self, serial: &str, command: &str) -> AdbResult<String> {
        let words = command.split_whitespace().map(str::to_string).collect();
        self.shell_words(serial, words).await
    }

    async fn is_installed(&self, serial: &str, package: &str) -> AdbResult<bool> {
        let out = self
            .shell_words(
                serial,
                vec![
                    "pm".into(),
                    "list".into(),
                    "packages".into(),
                    package.to_string(),
                ],
            )
            .await?;
        Ok(package_listed(&out, package))
    }

    async fn pull(&self, serial: &str, remote: &str, local: &Path) -> AdbResult<()> {
        let remote = remote.to_string();
        let local = local.to_path_buf();
        self.with_device(serial, "pull", move |device| {
            let mut file = std::fs::File::create(&local).map_err(|e| AdbError::io(&local, e))?;
            let pulled = device.pull(&remote, &mut file);
            drop(file);
            pulled.map_err(|e| {
                discard_partial(&local);
                AdbError::server("pull", e)
            })
        })
        .await
    }
}
