//! Drives the shell backend against a scripted stand-in for the `adb` binary.
#![cfg(unix)]

mod common;

use adb_app_manager::adb::{AdbBackend, AdbClient, AdbError};
use adb_app_manager::config::{ScreenshotFormat, Settings};
use adb_app_manager::manager::AppManager;
use common::{fake_adb, shell_settings};
use std::path::Path;
use std::time::Duration;

async fn open_manager(local_dir: &Path) -> AppManager {
    AppManager::open(shell_settings(local_dir), None).await.unwrap()
}

#[tokio::test]
async fn only_ready_devices_are_selectable() {
    let dir = tempfile::tempdir().unwrap();
    let manager = open_manager(dir.path()).await;
    assert_eq!(manager.device_serials(), ["emulator-5554".to_string()]);
    assert_eq!(manager.device_serial(), Some("emulator-5554"));

    let devices = manager.client().list_devices().await.unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[1].transport_id.as_deref(), Some("2"));
}

#[tokio::test]
async fn unready_serial_is_never_retargeted() {
    let dir = tempfile::tempdir().unwrap();
    let manager = AppManager::open(shell_settings(dir.path()), Some("R58R6133MRL"))
        .await
        .unwrap();
    assert_eq!(manager.device_serial(), Some("R58R6133MRL"));

    let removed = manager.uninstall_app("com.example.pinned", |_| {}).await;
    assert!(!removed.ok);
    assert!(removed.message.contains("Device 'R58R6133MRL' not found"));
    assert!(!fake_adb().calls().contains("uninstall com.example.pinned"));

    let connected = manager.connect(|_| {}).await;
    assert!(!connected.ok);
    assert!(
        connected
            .message
            .starts_with("Device 'R58R6133MRL' is unauthorized, not ready for commands\n")
    );
}

#[tokio::test]
async fn version_and_connect() {
    let dir = tempfile::tempdir().unwrap();
    let manager = open_manager(dir.path()).await;

    let version = manager.server_version().await;
    assert!(version.ok);
    assert_eq!(version.message, "ADB server version: 1.0.41");

    let progress = std::sync::Mutex::new(Vec::new());
    let connected = manager.connect(|p| progress.lock().unwrap().push(p)).await;
    assert!(connected.ok, "{connected}");
    assert_eq!(connected.message, "Device is connected.\nSerial number: emulator-5554");
    assert_eq!(*progress.lock().unwrap(), [100]);
}

#[tokio::test]
async fn is_installed_needs_exact_package() {
    let dir = tempfile::tempdir().unwrap();
    let manager = open_manager(dir.path()).await;

    let installed = manager.app_is_installed("com.uptodown").await;
    assert!(installed.ok);
    assert_eq!(installed.message, "App is already installed.");

    let missing = manager.app_is_installed("com.upto").await;
    assert!(!missing.ok);
    assert_eq!(missing.message, "App is not installed.");
}

#[tokio::test]
async fn install_and_uninstall() {
    let dir = tempfile::tempdir().unwrap();
    let apk = dir.path().join("uptodown.apk");
    std::fs::write(&apk, b"PK\x03\x04").unwrap();
    let manager = open_manager(dir.path()).await;

    let installed = manager.install_app(&apk, |_| {}).await;
    assert!(installed.ok, "{installed}");
    assert_eq!(installed.message, "App is installed.");
    assert!(fake_adb().calls().contains(&format!("install -r {}", apk.display())));

    let removed = manager.uninstall_app("com.uptodown", |_| {}).await;
    assert!(removed.ok);
    assert_eq!(removed.message, "App is uninstalled.");

    let refused = manager.uninstall_app("com.example.absent", |_| {}).await;
    assert!(!refused.ok);
    assert_eq!(refused.message, "App is not uninstalled.");
}

#[tokio::test]
async fn missing_apk_never_reaches_adb() {
    let dir = tempfile::tempdir().unwrap();
    let apk = dir.path().join("nowhere.apk");
    let manager = open_manager(dir.path()).await;

    let outcome = manager.install_app(&apk, |_| {}).await;
    assert!(!outcome.ok);
    assert!(outcome.message.starts_with("App is not installed.\n"));
    assert!(!fake_adb().calls().contains("nowhere.apk"));
}

#[tokio::test]
async fn screenshot_is_pulled_and_remote_removed() {
    let dir = tempfile::tempdir().unwrap();
    let shots = dir.path().join("shots");
    let remote_dir = format!("/data/local/tmp/{}", std::process::id());
    let settings = Settings {
        remote_screenshot_dir: remote_dir.clone(),
        keep_remote_screenshot: false,
        screenshot_format: ScreenshotFormat::Jpeg,
        ..shell_settings(&shots)
    };
    let manager = AppManager::open(settings, None).await.unwrap();

    let outcome = manager.take_screenshot(|_| {}).await;
    assert!(outcome.ok, "{outcome}");
    let saved = outcome.path.expect("screenshot path");
    assert_eq!(saved.extension().and_then(|e| e.to_str()), Some("jpeg"));
    assert_eq!(image::image_dimensions(&saved).unwrap(), (6, 4));
    assert_eq!(
        outcome.message,
        format!("Screenshot saved locally: {}", saved.display())
    );

    let calls = fake_adb().calls();
    assert!(calls.contains(&format!("shell screencap -p {remote_dir}/screenshot_")));
    assert!(calls.contains(&format!("shell rm -f {remote_dir}/screenshot_")));
}

#[tokio::test]
async fn unknown_shell_command_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let manager = open_manager(dir.path()).await;

    let echoed = manager.run_shell("echo ok").await;
    assert!(echoed.ok);
    assert_eq!(echoed.message, "ok");

    let failed = manager.run_shell("frobnicate").await;
    assert!(!failed.ok);
    assert!(failed.message.starts_with("Shell command failed:"));
}

#[tokio::test]
async fn missing_binary_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        adb_path: dir.path().join("no-adb-here").to_string_lossy().into_owned(),
        ..shell_settings(dir.path())
    };
    let err = AdbBackend::from_settings(&settings).await.err().unwrap();
    assert!(matches!(err, AdbError::AdbNotFound { .. }), "{err}");
    assert_eq!(settings.command_timeout(), Duration::from_secs(10));
}
