//! Command-line actions. Each prints its outcome and reports success.

use crate::adb::{AdbBackend, AdbClient, AdbResult};
use crate::args::Command;
use crate::config::Settings;
use crate::manager::{AppManager, Outcome};

fn report(outcome: &Outcome) -> bool {
    if outcome.ok {
        println!("✅ {}", outcome.message);
    } else {
        println!("❌ {}", outcome.message);
    }
    outcome.ok
}

fn report_each(results: &[(String, Outcome)]) -> bool {
    if results.is_empty() {
        println!("❌ No devices connected.");
        return false;
    }
    let mut all_ok = true;
    for (serial, outcome) in results {
        let mark = if outcome.ok { "✅" } else { "❌" };
        println!("{mark} [{serial}] {}", outcome.message);
        all_ok &= outcome.ok;
    }
    all_ok
}

fn log_progress(percent: u8) {
    log::debug!("progress {percent}%");
}

/// Runs one non-GUI command against the configured backend.
pub async fn run(command: Command, settings: Settings, serial: Option<String>) -> AdbResult<bool> {
    let manager = AppManager::open(settings, serial.as_deref()).await?;

    let ok = match command {
        Command::Gui => {
            log::warn!("gui is not a command-line action");
            false
        }
        Command::Devices => list_devices(&manager).await?,
        Command::Version => report(&manager.server_version().await),
        Command::Connect => report(&manager.connect(log_progress).await),
        Command::Install { apk, all } => {
            let apk = apk.unwrap_or_else(|| manager.settings().apk_path.clone());
            if all {
                report_each(&manager.install_all(&apk).await?)
            } else {
                report(&manager.install_app(&apk, log_progress).await)
            }
        }
        Command::Uninstall { package, all } => {
            let package = package.unwrap_or_else(|| manager.settings().package_name.clone());
            if all {
                report_each(&manager.uninstall_all(&package).await?)
            } else {
                report(&manager.uninstall_app(&package, log_progress).await)
            }
        }
        Command::IsInstalled { package, all } => {
            let package = package.unwrap_or_else(|| manager.settings().package_name.clone());
            if all {
                report_each(&manager.is_installed_all(&package).await?)
            } else {
                report(&manager.app_is_installed(&package).await)
            }
        }
        Command::Shell { command } => {
            let outcome = manager.run_shell(&command.join(" ")).await;
            if outcome.ok {
                println!("{}", outcome.message);
            } else {
                println!("❌ {}", outcome.message);
            }
            outcome.ok
        }
        Command::Screenshot { .. } => {
            println!("📸 Taking screenshot...");
            report(&manager.take_screenshot(log_progress).await)
        }
    };
    Ok(ok)
}

async fn list_devices(manager: &AppManager<AdbBackend>) -> AdbResult<bool> {
    let devices = manager.client().list_devices().await?;
    if devices.is_empty() {
        println!("No devices connected.");
        return Ok(true);
    }
    println!("📱 Connected devices:");
    for device in &devices {
        let transport = device
            .transport_id
            .as_deref()
            .map(|t| format!(" (transport_id {t})"))
            .unwrap_or_default();
        println!("    {}\t{}{}", device.serial, device.state, transport);
    }
    Ok(true)
}
