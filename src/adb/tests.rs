// Tests for the device-output parsing shared by both backends
// Focus: `adb devices` listing, version banner, pm output handling

#[cfg(test)]
mod parsing_tests {
    use super::super::shell::AdbShell;
    use super::super::types::{
        Device, DeviceState, package_listed, pm_succeeded, ready_serials,
    };

    // ============================================================
    // ADB DEVICES LISTING
    // ============================================================

    #[test]
    fn test_parse_devices_multiple() {
        let adb_output = "List of devices attached\n1d36d8f1               device usb:1-4 product:OnePlus6 model:ONEPLUS_A6000 device:OnePlus6 transport_id:2\noneplus6:5555          device product:OnePlus6 model:ONEPLUS_A6000 device:OnePlus6 transport_id:3\n";
        let devices = AdbShell::parse_devices(adb_output);
        assert_eq!(
            devices,
            vec![
                Device {
                    serial: "1d36d8f1".to_string(),
                    state: DeviceState::Device,
                    transport_id: Some("2".to_string())
                },
                Device {
                    serial: "oneplus6:5555".to_string(),
                    state: DeviceState::Device,
                    transport_id: Some("3".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_parse_devices_plain_listing() {
        // `adb devices` without -l: tab separated, no extra fields
        let adb_output = "List of devices attached\nR58R6133MRL\tdevice\nemulator-5554\toffline\n\n";
        let devices = AdbShell::parse_devices(adb_output);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].serial, "R58R6133MRL");
        assert_eq!(devices[0].transport_id, None);
        assert_eq!(devices[1].state, DeviceState::Offline);
        assert_eq!(ready_serials(&devices), vec!["R58R6133MRL".to_string()]);
    }

    #[test]
    fn test_parse_devices_skips_daemon_banner() {
        let adb_output = "* daemon not running; starting now at tcp:5037\n* daemon started successfully\nList of devices attached\nR58R6133MRL\tunauthorized\n";
        let devices = AdbShell::parse_devices(adb_output);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].state, DeviceState::Unauthorized);
        assert!(ready_serials(&devices).is_empty());
    }

    #[test]
    fn test_parse_devices_empty() {
        assert!(AdbShell::parse_devices("List of devices attached\n\n").is_empty());
        assert!(AdbShell::parse_devices("").is_empty());
    }

    #[test]
    fn test_device_state_roundtrip_display() {
        for raw in ["device", "offline", "unauthorized", "recovery"] {
            assert_eq!(DeviceState::parse(raw).to_string(), raw);
        }
        // adb_client reports states through Debug, e.g. "Device"
        assert_eq!(DeviceState::parse("Device"), DeviceState::Device);
    }

    // ============================================================
    // VERSION AND PACKAGE MANAGER OUTPUT
    // ============================================================

    #[test]
    fn test_parse_version() {
        let out = "Android Debug Bridge version 1.0.41\nVersion 34.0.5-10900879\nInstalled as /usr/bin/adb\n";
        assert_eq!(AdbShell::parse_version(out).as_deref(), Some("1.0.41"));
        assert_eq!(AdbShell::parse_version("garbage"), None);
    }

    #[test]
    fn test_package_listed_requires_exact_name() {
        let out = "package:com.uptodown\npackage:com.uptodown.installer\n";
        assert!(package_listed(out, "com.uptodown"));
        assert!(package_listed(out, "com.uptodown.installer"));
        assert!(!package_listed("package:com.uptodown.installer\n", "com.uptodown"));
        assert!(!package_listed("", "com.uptodown"));
    }

    #[test]
    fn test_pm_success_detection() {
        assert!(pm_succeeded("Performing Streamed Install\nSuccess\n"));
        assert!(pm_succeeded("Success\r\n"));
        assert!(!pm_succeeded("Failure [DELETE_FAILED_INTERNAL_ERROR]\n"));
        assert!(!pm_succeeded("adb: failed to install app.apk: Failure [INSTALL_FAILED_OLDER_SDK]"));
    }
}
