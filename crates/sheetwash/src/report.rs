//! Human-readable cleaning report.

use std::fs;
use std::path::Path;

use crate::error::{Result, SheetwashError};

/// Format the two-line summary with percentages to two decimal places.
pub fn format_report(changed_pct: f64, removed_pct: f64) -> String {
    format!(
        "Percentage of changed data: {:.2}%\nPercentage of removed data: {:.2}%\n",
        changed_pct, removed_pct
    )
}

/// Write report text to `path`, replacing any existing content.
pub fn write_report(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| SheetwashError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::write(path, text).map_err(|e| SheetwashError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!("Report saved to file: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_report() {
        let text = format_report(66.666, 5.0);
        assert_eq!(
            text,
            "Percentage of changed data: 66.67%\nPercentage of removed data: 5.00%\n"
        );
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_write_report_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.txt");

        write_report(&path, "old content that is longer\n").unwrap();
        write_report(&path, &format_report(0.0, 0.0)).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, format_report(0.0, 0.0));
    }
}
