//! Scripted stand-in for the host `adb` binary, shared by the shell backend tests.
#![allow(dead_code)]

use adb_app_manager::config::{AdbImpl, Settings};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

/// Network address the fake accepts for `adb connect`; any other address is refused.
pub const REACHABLE_ADDRESS: &str = "10.0.0.2:5555";

pub struct FakeAdb {
    dir: TempDir,
}

impl FakeAdb {
    pub fn program(&self) -> PathBuf {
        self.dir.path().join("adb")
    }

    /// Every invocation's arguments, one line each.
    pub fn calls(&self) -> String {
        std::fs::read_to_string(self.dir.path().join("calls.log")).unwrap_or_default()
    }
}

// Written once per test binary, before any test spawns a process, so exec
// never races an open write handle.
pub fn fake_adb() -> &'static FakeAdb {
    static FAKE: OnceLock<FakeAdb> = OnceLock::new();
    FAKE.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        let fixture = dir.path().join("screen.png");
        image::RgbaImage::from_pixel(6, 4, image::Rgba([200, 10, 10, 255]))
            .save(&fixture)
            .unwrap();
        let log = dir.path().join("calls.log");
        // `adb connect` leaves a marker; `adb devices` lists every marked address.
        let script = format!(
            r#"#!/bin/sh
echo "$*" >> '{log}'
if [ "$1" = "-s" ]; then shift 2; fi
case "$1" in
  version)
    echo "Android Debug Bridge version 1.0.41"
    echo "Version 35.0.2-12147458"
    ;;
  devices)
    echo "List of devices attached"
    echo "emulator-5554          device product:sdk_gphone64 transport_id:1"
    echo "R58R6133MRL            unauthorized usb:1-1 transport_id:2"
    for marker in '{dir}'/connected-*; do
      [ -e "$marker" ] && echo "${{marker##*/connected-}}       device transport_id:9"
    done
    echo ""
    ;;
  connect)
    if [ "$2" = "{reachable}" ]; then
      touch '{dir}/connected-'"$2"
      echo "connected to $2"
    else
      echo "failed to connect to '$2': Connection refused"
    fi
    ;;
  install)
    echo "Performing Streamed Install"
    echo "Success"
    ;;
  uninstall)
    if [ "$2" = "com.uptodown" ]; then
      echo "Success"
    else
      echo "Failure [DELETE_FAILED_INTERNAL_ERROR]"
      exit 1
    fi
    ;;
  pull)
    cp '{fixture}' "$3"
    echo "$2: 1 file pulled"
    ;;
  shell)
    shift
    case "$*" in
      "echo ok") echo ok ;;
      "pm list packages com.uptodown"*)
        echo "package:com.uptodown.lite"
        echo "package:com.uptodown"
        ;;
      "pm list packages"*) ;;
      "screencap -p "*|"rm -f "*) ;;
      *) echo "/system/bin/sh: $*: not found" >&2; exit 127 ;;
    esac
    ;;
  *)
    echo "unknown command $1" >&2
    exit 1
    ;;
esac
"#,
            log = log.display(),
            dir = dir.path().display(),
            fixture = fixture.display(),
            reachable = REACHABLE_ADDRESS,
        );
        let program = dir.path().join("adb");
        std::fs::write(&program, script).unwrap();
        std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();
        FakeAdb { dir }
    })
}

pub fn shell_settings(local_dir: &Path) -> Settings {
    Settings {
        backend: AdbImpl::Shell,
        adb_path: fake_adb().program().to_string_lossy().into_owned(),
        local_screenshot_dir: local_dir.to_path_buf(),
        command_timeout_secs: 10,
        ..Settings::default()
    }
}
