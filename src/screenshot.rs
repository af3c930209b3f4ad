//! Naming and post-processing of pulled screenshots.

use crate::adb::{AdbError, AdbResult};
use crate::config::{ScreenshotFormat, Settings};
use chrono::{DateTime, Local};
use image::ImageFormat;
use std::path::{Path, PathBuf};

/// Day first, then time with dashes so the name is valid on every filesystem.
pub const TIMESTAMP_FORMAT: &str = "%d_%m_%Y_%H-%M-%S";

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenshotPaths {
    pub timestamp: String,
    /// On-device capture target; `screencap -p` always writes PNG.
    pub remote: String,
    /// Where the pulled PNG lands before any re-encoding.
    pub pulled: PathBuf,
    /// Final file handed to the user.
    pub local: PathBuf,
    pub format: ScreenshotFormat,
}

impl ScreenshotPaths {
    pub fn new(settings: &Settings, now: DateTime<Local>) -> Self {
        Self::for_timestamp(settings, &now.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn for_timestamp(settings: &Settings, timestamp: &str) -> Self {
        let stem = format!("screenshot_{timestamp}");
        let remote_dir = settings.remote_screenshot_dir.trim_end_matches('/');
        let dir = &settings.local_screenshot_dir;
        let format = settings.screenshot_format;
        ScreenshotPaths {
            timestamp: timestamp.to_string(),
            remote: format!("{remote_dir}/{stem}.png"),
            pulled: dir.join(format!("{stem}.png")),
            local: dir.join(format!("{stem}.{}", format.extension())),
            format,
        }
    }
}

pub async fn ensure_local_dir(dir: &Path) -> AdbResult<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AdbError::io(dir, e))
}

/// Converts the pulled PNG into the configured format and returns the final
/// image dimensions.
pub async fn finalize(paths: &ScreenshotPaths) -> AdbResult<(u32, u32)> {
    let paths = paths.clone();
    tokio::task::spawn_blocking(move || finalize_blocking(&paths)).await?
}

fn finalize_blocking(paths: &ScreenshotPaths) -> AdbResult<(u32, u32)> {
    match paths.format {
        ScreenshotFormat::Png => Ok(image::image_dimensions(&paths.local)?),
        ScreenshotFormat::Jpeg => {
            let img = image::open(&paths.pulled)?;
            // JPEG has no alpha channel
            let rgb = img.to_rgb8();
            rgb.save_with_format(&paths.local, ImageFormat::Jpeg)?;
            std::fs::remove_file(&paths.pulled).map_err(|e| AdbError::io(&paths.pulled, e))?;
            log::debug!(
                "re-encoded {} as {}",
                paths.pulled.display(),
                paths.local.display()
            );
            Ok(rgb.dimensions())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn settings_in(dir: &Path, format: ScreenshotFormat) -> Settings {
        Settings {
            local_screenshot_dir: dir.to_path_buf(),
            screenshot_format: format,
            ..Settings::default()
        }
    }

    #[test]
    fn timestamp_is_day_first() {
        let now = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        let paths = ScreenshotPaths::new(&Settings::default(), now);
        assert_eq!(paths.timestamp, "07_03_2024_09-05-01");
        assert_eq!(paths.remote, "/sdcard/screenshot_07_03_2024_09-05-01.png");
        assert_eq!(
            paths.local,
            PathBuf::from("screenshots/screenshot_07_03_2024_09-05-01.png")
        );
        assert_eq!(paths.pulled, paths.local);
    }

    #[test]
    fn jpeg_keeps_png_pull_target() {
        let settings = Settings {
            remote_screenshot_dir: "/data/local/tmp/".into(),
            ..settings_in(Path::new("shots"), ScreenshotFormat::Jpeg)
        };
        let paths = ScreenshotPaths::for_timestamp(&settings, "ts");
        assert_eq!(paths.remote, "/data/local/tmp/screenshot_ts.png");
        assert_eq!(paths.pulled, PathBuf::from("shots/screenshot_ts.png"));
        assert_eq!(paths.local, PathBuf::from("shots/screenshot_ts.jpeg"));
    }

    #[tokio::test]
    async fn finalize_reencodes_to_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ScreenshotPaths::for_timestamp(
            &settings_in(dir.path(), ScreenshotFormat::Jpeg),
            "t",
        );
        image::RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]))
            .save(&paths.pulled)
            .unwrap();

        let dims = finalize(&paths).await.unwrap();
        assert_eq!(dims, (4, 3));
        assert!(paths.local.exists());
        assert!(!paths.pulled.exists());
    }

    #[tokio::test]
    async fn finalize_png_reports_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let paths =
            ScreenshotPaths::for_timestamp(&settings_in(dir.path(), ScreenshotFormat::Png), "t");
        image::RgbaImage::new(2, 5).save(&paths.local).unwrap();
        assert_eq!(finalize(&paths).await.unwrap(), (2, 5));
    }

    #[tokio::test]
    async fn ensure_local_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_local_dir(&nested).await.unwrap();
        ensure_local_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
