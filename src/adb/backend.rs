use super::error::AdbResult;
use super::rust_impl::RustAdb;
use super::shell::AdbShell;
use super::types::{AdbClient, Device};
use crate::config::{AdbImpl, Settings};
use std::path::Path;

pub enum AdbBackend {
    Shell(AdbShell),
    Rust(RustAdb),
}

impl AdbBackend {
    pub async fn from_settings(settings: &Settings) -> AdbResult<Self> {
        let timeout = settings.command_timeout();
        match settings.backend {
            AdbImpl::Shell => Ok(AdbBackend::Shell(
                AdbShell::new(&settings.adb_path, timeout).await?,
            )),
            AdbImpl::Rust => Ok(AdbBackend::Rust(RustAdb::new(
                settings.server_address(),
                timeout,
            ))),
        }
    }

    pub fn impl_name(&self) -> &'static str {
        match self {
            AdbBackend::Shell(_) => "shell",
            AdbBackend::Rust(_) => "rust",
        }
    }
}

impl AdbClient for AdbBackend {
    async fn list_devices(&self) -> AdbResult<Vec<Device>> {
        match self {
            AdbBackend::Shell(s) => s.list_devices().await,
            AdbBackend::Rust(r) => r.list_devices().await,
        }
    }

    async fn server_version(&self) -> AdbResult<String> {
        match self {
            AdbBackend::Shell(s) => s.server_version().await,
            AdbBackend::Rust(r) => r.server_version().await,
        }
    }

    async fn connect(&self, serial: &str) -> AdbResult<()> {
        match self {
            AdbBackend::Shell(s) => s.connect(serial).await,
            AdbBackend::Rust(r) => r.connect(serial).await,
        }
    }

    async fn install(&self, serial: &str, apk: &Path) -> AdbResult<bool> {
        match self {
            AdbBackend::Shell(s) => s.install(serial, apk).await,
            AdbBackend::Rust(r) => r.install(serial, apk).await,
        }
    }

    async fn uninstall(&self, serial: &str, package: &str) -> AdbResult<bool> {
        match self {
            AdbBackend::Shell(s) => s.uninstall(serial, package).await,
            AdbBackend::Rust(r) => r.uninstall(serial, package).await,
        }
    }

    async fn shell(&self, serial: &str, command: &str) -> AdbResult<String> {
        match self {
            AdbBackend::Shell(s) => s.shell(serial, command).await,
            AdbBackend::Rust(r) => r.shell(serial, command).await,
        }
    }

    async fn pull(&self, serial: &str, remote: &str, local: &Path) -> AdbResult<()> {
        match self {
            AdbBackend::Shell(s) => s.pull(serial, remote, local).await,
            AdbBackend::Rust(r) => r.pull(serial, remote, local).await,
        }
    }

    async fn is_installed(&self, serial: &str, package: &str) -> AdbResult<bool> {
        match self {
            AdbBackend::Shell(s) => s.is_installed(serial, package).await,
            AdbBackend::Rust(r) => r.is_installed(serial, package).await,
        }
    }
}
