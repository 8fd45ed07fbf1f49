//! Saving reports to disk.

use super::Report;
use crate::error::ReportError;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// MIME type of a rendered report
pub const REPORT_MIME_TYPE: &str = "text/plain; charset=utf-8";

/// `face_comparison_report_<unix_timestamp>.txt`
pub fn report_file_name(unix_timestamp: i64) -> String {
    format!("face_comparison_report_{}.txt", unix_timestamp)
}

impl Report {
    /// Write the rendered report into `dir`, creating it if needed.
    ///
    /// Never replaces an existing file: a name already taken in the same
    /// second gets a `_1`, `_2`, ... suffix. Returns the path written.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        std::fs::create_dir_all(dir).map_err(|source| ReportError::CreateDirectory {
            path: dir.to_path_buf(),
            source,
        })?;

        let body = self.render();
        let base = self.file_name();
        let stem = base.trim_end_matches(".txt");

        let mut attempt = 0u32;
        loop {
            let path = if attempt == 0 {
                dir.join(&base)
            } else {
                dir.join(format!("{}_{}.txt", stem, attempt))
            };

            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    attempt += 1;
                    continue;
                }
                Err(source) => return Err(ReportError::Write { path, source }),
            };
            file.write_all(body.as_bytes())
                .map_err(|source| ReportError::Write {
                    path: path.clone(),
                    source,
                })?;

            tracing::info!(path = %path.display(), "Report saved");
            return Ok(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::comparison::ComparisonResult;
    use crate::core::intake::ImageAsset;
    use crate::core::reporter::ReportBuilder;
    use assert_fs::prelude::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use predicates::prelude::*;
    use std::io::Cursor;

    fn report() -> Report {
        let img = RgbImage::from_pixel(4, 4, Rgb([9, 9, 9]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        let asset = ImageAsset::from_bytes("same.png", out.into_inner()).unwrap();
        ReportBuilder::default().build("us-east-1", &asset, &asset, &ComparisonResult::default())
    }

    #[test]
    fn file_name_format() {
        assert_eq!(
            report_file_name(1_700_000_000),
            "face_comparison_report_1700000000.txt"
        );
    }

    #[test]
    fn writes_utf8_text_into_new_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let report = report();

        let path = report.write_to_dir(&temp.path().join("reports")).unwrap();

        temp.child("reports")
            .child(report.file_name())
            .assert(predicate::str::contains("Match count: 0"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), report.render());
    }

    #[test]
    fn same_second_reports_are_both_kept() {
        let temp = assert_fs::TempDir::new().unwrap();
        let first = report();
        let mut second = first.clone();
        second.match_count = 2;

        let first_path = first.write_to_dir(temp.path()).unwrap();
        let second_path = second.write_to_dir(temp.path()).unwrap();

        assert_ne!(first_path, second_path);
        assert_eq!(first_path.file_name().unwrap(), first.file_name().as_str());
        assert_eq!(
            second_path.file_name().unwrap().to_str().unwrap(),
            format!("face_comparison_report_{}_1.txt", first.generated_at.timestamp())
        );
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 2);
        temp.child(first.file_name())
            .assert(predicate::str::contains("Match count: 0"));
        assert_eq!(std::fs::read_to_string(second_path).unwrap(), second.render());
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let blocker = temp.child("not-a-dir");
        blocker.write_str("file in the way").unwrap();

        let err = report().write_to_dir(blocker.path()).unwrap_err();
        assert!(matches!(err, ReportError::CreateDirectory { .. }));
    }

    #[test]
    fn mime_type_is_plain_text() {
        assert!(REPORT_MIME_TYPE.starts_with("text/plain"));
    }
}
