//! Timestamped JSON reports on disk

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::error::{GradeError, Result};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// File name `<prefix>_<YYYYmmdd_HHMMSS>.json` for the given instant
pub fn report_file_name(prefix: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.json", prefix, at.format(TIMESTAMP_FORMAT))
}

/// Write `value` as pretty JSON under `dir`, creating it, and return the path
pub fn save_report<T: Serialize + ?Sized>(dir: &Path, prefix: &str, value: &T) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| GradeError::io_operation("create report directory", dir.display(), e))?;

    let path = dir.join(report_file_name(prefix, Local::now()));
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&path, json)
        .map_err(|e| GradeError::io_operation("write report", path.display(), e))?;

    info!(path = %path.display(), "report saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_report_file_name() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            report_file_name("avaliacao", at),
            "avaliacao_20240309_070501.json"
        );
    }

    #[test]
    fn test_save_report_creates_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("relatorios/turma-a");

        let value = serde_json::json!({ "ana": { "Exibir o menu": "OK" } });
        let path = save_report(&target, "avaliacao", &value).unwrap();

        assert!(path.starts_with(&target));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("avaliacao_"));
        assert!(name.ends_with(".json"));

        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, value);
    }

    #[test]
    fn test_save_report_fails_on_file_target() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();

        let err = save_report(&file, "avaliacao", &serde_json::json!({})).unwrap_err();
        assert!(matches!(err, GradeError::FailedOperationWithTarget { .. }));
    }
}
