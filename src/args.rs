use crate::config::{AdbImpl, ScreenshotFormat, Settings};
use clap::{Parser, Subcommand};
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Manage Android devices over ADB. Without a command the GUI starts.
#[derive(Debug, Parser)]
#[command(name = "adb-app-manager", version = env!("ADB_MANAGER_VERSION"))]
pub struct Cli {
    /// ADB implementation: rust (adb_client) or shell (host adb binary)
    #[arg(long = "impl", value_enum, global = true)]
    pub backend: Option<AdbImpl>,

    /// Device serial to act on, never swapped for another (defaults to the first ready device)
    #[arg(long, short = 's', global = true)]
    pub serial: Option<String>,

    /// ADB server host
    #[arg(long, global = true)]
    pub host: Option<Ipv4Addr>,

    /// ADB server port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Launch the graphical interface
    Gui,
    /// List connected devices
    Devices,
    /// Show the ADB server version
    Version,
    /// Connect to the selected device and confirm it answers
    Connect,
    /// Install an APK
    Install {
        /// APK to install (defaults to the configured apk_path)
        apk: Option<PathBuf>,
        /// Install on every connected device
        #[arg(long)]
        all: bool,
    },
    /// Uninstall a package
    Uninstall {
        /// Package name (defaults to the configured package_name)
        package: Option<String>,
        #[arg(long)]
        all: bool,
    },
    /// Check whether a package is installed
    IsInstalled {
        package: Option<String>,
        #[arg(long)]
        all: bool,
    },
    /// Run a shell command on the device
    Shell {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Capture the screen and pull it into the local screenshot folder
    Screenshot {
        #[arg(long, value_enum)]
        format: Option<ScreenshotFormat>,
    },
}

impl Cli {
    /// Command-line values win over the settings file.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(backend) = self.backend {
            settings.backend = backend;
        }
        if let Some(host) = self.host {
            settings.adb_host = host;
        }
        if let Some(port) = self.port {
            settings.adb_port = port;
        }
        if let Some(Command::Screenshot {
            format: Some(format),
        }) = &self.command
        {
            settings.screenshot_format = *format;
        }
    }
}
