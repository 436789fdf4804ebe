//! Export file writers
//!
//! Completed items are rendered in memory and written to `<path>.partial`,
//! which is renamed over `<path>` only once the whole file is on disk. A failed
//! run never leaves a truncated export behind.
//!
//! - [`csv`] - one line per item, header first
//! - [`json`] - an array of string arrays, header first

pub mod csv;
pub mod json;

use crate::config::CycleTimeConfig;
use crate::domain::context::ResultExt;
use crate::domain::{CompletedItem, CycleTimeError, Result};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output file format, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Determine the format from the extension of `path`
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless the file ends in `.csv` or `.json`.
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .ok_or_else(|| {
                CycleTimeError::Configuration(format!(
                    "Output file {} must end in .csv or .json",
                    path.display()
                ))
            })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown output format {other}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Counts reported by a writer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Items written as rows
    pub written: usize,

    /// Items left out because no stage resolved a date
    pub skipped: usize,
}

impl ExportReport {
    fn count(&mut self, item: &CompletedItem) -> bool {
        if item.has_date() {
            self.written += 1;
            true
        } else {
            self.skipped += 1;
            false
        }
    }
}

/// Render `items` in `format`
pub fn render(
    format: OutputFormat,
    items: &[CompletedItem],
    config: &CycleTimeConfig,
) -> Result<(String, ExportReport)> {
    match format {
        OutputFormat::Csv => Ok(csv::render(items, &config.stages, &config.attributes)),
        OutputFormat::Json => json::render(
            items,
            &config.connection.domain,
            &config.stages,
            &config.attributes,
        ),
    }
}

/// Render `items` and atomically write them to `path`
///
/// # Errors
///
/// Returns an I/O error if the parent directory cannot be created or the file
/// cannot be written or renamed. Nothing is left at `path` in that case.
pub fn write_export(
    path: &Path,
    format: OutputFormat,
    items: &[CompletedItem],
    config: &CycleTimeConfig,
) -> Result<ExportReport> {
    let (body, report) = render(format, items, config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let partial = partial_path(path);
    fs::write(&partial, body)
        .with_context(|| format!("Failed to write {}", partial.display()))?;

    if let Err(e) = fs::rename(&partial, path) {
        let _ = fs::remove_file(&partial);
        return Err(e).with_context(|| format!("Failed to move export into {}", path.display()));
    }

    tracing::debug!(
        path = %path.display(),
        written = report.written,
        skipped = report.skipped,
        "Wrote export file"
    );

    Ok(report)
}

/// Temporary file used while an export is being written
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::domain::ItemId;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_case::test_case;

    fn config() -> CycleTimeConfig {
        parse_config(
            "Connection:\n    Domain: https://v1.example.com/Acme\n    Username: u\n    Password: p\nWorkflow:\n    Open: Future\n    Done: Done\n",
        )
        .unwrap()
    }

    fn item(id: &str, done: Option<NaiveDate>) -> CompletedItem {
        CompletedItem {
            id: ItemId::new(id).unwrap(),
            link: None,
            name: format!("Item {id}"),
            stage_dates: vec![None, done],
            attributes: vec![],
        }
    }

    #[test_case("data.csv", OutputFormat::Csv ; "csv")]
    #[test_case("out/data.JSON", OutputFormat::Json ; "json uppercase")]
    fn test_format_from_path(path: &str, expected: OutputFormat) {
        assert_eq!(OutputFormat::from_path(Path::new(path)).unwrap(), expected);
    }

    #[test_case("data.txt" ; "other extension")]
    #[test_case("data" ; "no extension")]
    fn test_format_from_path_rejects(path: &str) {
        let err = OutputFormat::from_path(Path::new(path)).unwrap_err();
        assert!(matches!(err, CycleTimeError::Configuration(_)));
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("out/data.csv")),
            PathBuf::from("out/data.csv.partial")
        );
    }

    #[test]
    fn test_write_export_counts_and_renames() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.csv");
        let items = vec![
            item("S-1", NaiveDate::from_ymd_opt(2024, 1, 4)),
            item("S-2", None),
        ];

        let report = write_export(&path, OutputFormat::Csv, &items, &config()).unwrap();

        assert_eq!(report, ExportReport { written: 1, skipped: 1 });
        assert!(path.exists());
        assert!(!partial_path(&path).exists());

        let body = fs::read_to_string(&path).unwrap();
        assert_eq!(body.lines().count(), 2);
    }

    #[test]
    fn test_write_export_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "stale").unwrap();

        write_export(&path, OutputFormat::Json, &[], &config()).unwrap();

        let body = fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("[[\"ID\""));
    }
}
