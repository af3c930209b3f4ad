use super::error::{AdbError, AdbResult};
use super::types::{AdbClient, Device, DeviceState, pm_succeeded};
use std::path::Path;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Backend that drives the host `adb` binary.
pub struct AdbShell {
    program: String,
    timeout: Duration,
}

impl AdbShell {
    /// Fails early, with install guidance, when the binary can't be run.
    pub async fn new(program: &str, timeout: Duration) -> AdbResult<Self> {
        let shell = AdbShell {
            program: program.to_string(),
            timeout,
        };
        shell.run(&["version"]).await?;
        Ok(shell)
    }

    async fn run_raw(&self, args: &[&str]) -> AdbResult<Output> {
        log::debug!("{} {}", self.program, args.join(" "));
        let child = Command::new(&self.program)
            .args(args)
            .kill_on_drop(true)
            .output();
        match tokio::time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => Err(AdbError::AdbNotFound {
                program: self.program.clone(),
            }),
            Ok(Err(source)) => Err(AdbError::AdbSpawnFailed {
                program: self.program.clone(),
                source,
            }),
            Err(_) => Err(AdbError::Timeout {
                duration: self.timeout,
                description: format!("adb {}", args.join(" ")),
            }),
        }
    }

    async fn run(&self, args: &[&str]) -> AdbResult<String> {
        let output = self.run_raw(args).await?;
        if !output.status.success() {
            return Err(AdbError::CommandFailed {
                command: args.join(" "),
                stderr: failure_text(&output),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn run_on(&self, serial: &str, args: &[&str]) -> AdbResult<String> {
        let mut full = vec!["-s", serial];
        full.extend_from_slice(args);
        self.run(&full).await
    }

    /// Parses `adb devices [-l]`: skip the header, daemon banners and blank
    /// lines; first token is the serial, second the state.
    pub fn parse_devices(output: &str) -> Vec<Device> {
        output
            .lines()
            .filter(|line| {
                !line.trim().is_empty()
                    && !line.starts_with('*')
                    && !line.starts_with("List of devices")
            })
            .filter_map(|line| {
                let mut parts = line.split_whitespace();
                let serial = parts.next()?.to_string();
                let state = parts
                    .next()
                    .map(DeviceState::parse)
                    .unwrap_or_else(|| DeviceState::Other("unknown".into()));
                let transport_id = line.split_whitespace().find_map(|part| {
                    part.strip_prefix("transport_id:").map(str::to_string)
                });
                Some(Device {
                    serial,
                    state,
                    transport_id,
                })
            })
            .collect()
    }

    /// First line of `adb version` is `Android Debug Bridge version X.Y.Z`.
    pub fn parse_version(output: &str) -> Option<String> {
        output
            .lines()
            .find_map(|line| line.trim().strip_prefix("Android Debug Bridge version "))
            .map(|v| v.trim().to_string())
    }

    async fn tcp_connect(&self, address: &str) -> AdbResult<()> {
        let out = self.run(&["connect", address]).await?;
        if out.contains("connected to") {
            log::info!("adb connect {address}: {}", out.trim());
            Ok(())
        } else {
            Err(AdbError::CommandFailed {
                command: format!("connect {address}"),
                stderr: out.trim().to_string(),
            })
        }
    }
}

fn failure_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr.trim().to_string()
    }
}

impl AdbClient for AdbShell {
    async fn list_devices(&self) -> AdbResult<Vec<Device>> {
        let out = self.run(&["devices", "-l"]).await?;
        Ok(Self::parse_devices(&out))
    }

    async fn server_version(&self) -> AdbResult<String> {
        let out = self.run(&["version"]).await?;
        Self::parse_version(&out).ok_or_else(|| AdbError::UnexpectedOutput {
            what: "adb version".into(),
            output: out,
        })
    }

    async fn connect(&self, serial: &str) -> AdbResult<()> {
        let mut devices = self.list_devices().await?;
        if !devices.iter().any(|d| d.serial == serial) && serial.contains(':') {
            self.tcp_connect(serial).await?;
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
        let echo = self.run_on(serial, &["shell", "echo", "ok"]).await?;
        if echo.trim() != "ok" {
            return Err(AdbError::UnexpectedOutput {
                what: "connection check".into(),
                output: echo,
            });
        }
        log::debug!("shell backend: {serial} is answering");
        Ok(())
    }

    async fn install(&self, serial: &str, apk: &Path) -> AdbResult<bool> {
        let apk = apk.to_string_lossy();
        let out = self.run_on(serial, &["install", "-r", &apk]).await?;
        Ok(pm_succeeded(&out))
    }

    async fn uninstall(&self, serial: &str, package: &str) -> AdbResult<bool> {
        // A missing package exits non-zero with "Failure [...]"; that's a
        // clean "not uninstalled", not a transport error.
        let output = self.run_raw(&["-s", serial, "uninstall", package]).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        if pm_succeeded(&stdout) {
            return Ok(true);
        }
        let text = failure_text(&output);
        if stdout.contains("Failure") || text.contains("Failure") {
            log::info!("uninstall {package} on {serial}: {text}");
            return Ok(false);
        }
        Err(AdbError::CommandFailed {
            command: format!("-s {serial} uninstall {package}"),
            stderr: text,
        })
    }

    async fn shell(&self, serial: &str, command: &str) -> AdbResult<String> {
        self.run_on(serial, &["shell", command]).await
    }

    async fn pull(&self, serial: &str, remote: &str, local: &Path) -> AdbResult<()> {
        let local = local.to_string_lossy();
        self.run_on(serial, &["pull", remote, &local]).await.map(|_| ())
    }
}
