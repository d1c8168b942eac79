//! Loading profiles and workout logs exported from the external store
//!
//! Profiles are read from JSON or TOML documents. Logs are read from a JSON
//! array of records or from CSV with a header row; common column-name
//! variations are mapped onto the canonical field names.

use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ImportError, Result};
use crate::models::{Profile, WorkoutLogRecord};

/// A workout-log file format
pub trait LogImportFormat {
    /// Check if this importer can handle the given file
    fn can_import(&self, file_path: &Path) -> bool;

    /// Parse workout logs from file contents
    fn parse(&self, content: &str, file_path: &Path) -> Result<Vec<WorkoutLogRecord>>;

    /// Get the format name for this importer
    fn format_name(&self) -> &'static str;
}

fn has_extension(file_path: &Path, wanted: &str) -> bool {
    file_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

fn extension_of(file_path: &Path) -> String {
    file_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_string()
}

/// JSON array of log records
pub struct JsonLogImporter;

impl LogImportFormat for JsonLogImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "json")
    }

    fn parse(&self, content: &str, file_path: &Path) -> Result<Vec<WorkoutLogRecord>> {
        serde_json::from_str(content).map_err(|e| {
            ImportError::Parse {
                path: file_path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }
}

/// CSV importer with flexible column mapping
pub struct CsvLogImporter {
    column_mapping: HashMap<String, String>,
}

impl CsvLogImporter {
    pub fn new() -> Self {
        let mut column_mapping = HashMap::new();

        Self::add_mapping(&mut column_mapping, "date", &["date", "workout_date", "day", "log_date"]);
        Self::add_mapping(&mut column_mapping, "status", &["status", "state", "completion"]);
        Self::add_mapping(&mut column_mapping, "mood", &["mood", "feeling"]);
        Self::add_mapping(
            &mut column_mapping,
            "duration_minutes",
            &["duration_minutes", "duration", "minutes", "duration_min"],
        );

        Self { column_mapping }
    }

    fn add_mapping(mapping: &mut HashMap<String, String>, standard: &str, variations: &[&str]) {
        for variation in variations {
            mapping.insert(variation.to_lowercase(), standard.to_string());
        }
    }

    fn normalize_column_name(&self, name: &str) -> String {
        let normalized = name.trim().to_lowercase().replace([' ', '-'], "_");

        self.column_mapping
            .get(&normalized)
            .cloned()
            .unwrap_or(normalized)
    }
}

impl Default for CsvLogImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogImportFormat for CsvLogImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "csv")
    }

    fn parse(&self, content: &str, file_path: &Path) -> Result<Vec<WorkoutLogRecord>> {
        let parse_error = |reason: String| ImportError::Parse {
            path: file_path.to_path_buf(),
            reason,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| parse_error(e.to_string()))?
            .iter()
            .map(|h| self.normalize_column_name(h))
            .collect();
        let column = |name: &str| headers.iter().position(|h| h == name);

        let date_col = column("date").ok_or_else(|| ImportError::MissingColumn {
            column: "date".to_string(),
        })?;
        let status_col = column("status");
        let mood_col = column("mood");
        let duration_col = column("duration_minutes");

        let mut logs = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| parse_error(e.to_string()))?;
            let field = |col: Option<usize>| {
                col.and_then(|c| record.get(c))
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            };

            let duration_minutes = match field(duration_col) {
                Some(raw) => Some(raw.parse::<u32>().map_err(|_| {
                    parse_error(format!("row {}: invalid duration {:?}", row + 1, raw))
                })?),
                None => None,
            };

            logs.push(WorkoutLogRecord {
                date: field(Some(date_col)).unwrap_or_default(),
                status: field(status_col),
                mood: field(mood_col),
                duration_minutes,
            });
        }

        Ok(logs)
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

/// Coordinates the available log importers
pub struct ImportManager {
    importers: Vec<Box<dyn LogImportFormat>>,
}

impl ImportManager {
    pub fn new() -> Self {
        let importers: Vec<Box<dyn LogImportFormat>> =
            vec![Box::new(CsvLogImporter::new()), Box::new(JsonLogImporter)];

        Self { importers }
    }

    /// Import workout logs, picking the importer by file extension
    pub fn import_logs(&self, file_path: &Path) -> Result<Vec<WorkoutLogRecord>> {
        let importer = self
            .importers
            .iter()
            .find(|i| i.can_import(file_path))
            .ok_or_else(|| ImportError::UnsupportedFormat {
                format: extension_of(file_path),
            })?;

        let content = fs::read_to_string(file_path)?;
        let logs = importer.parse(&content, file_path)?;

        info!(
            file = %file_path.display(),
            format = importer.format_name(),
            count = logs.len(),
            "Imported workout logs"
        );
        Ok(logs)
    }

    /// Load a profile from a `.json` or `.toml` document
    pub fn import_profile(&self, file_path: &Path) -> Result<Profile> {
        let content = fs::read_to_string(file_path)?;
        let parse_error = |reason: String| ImportError::Parse {
            path: file_path.to_path_buf(),
            reason,
        };

        let profile: Profile = if has_extension(file_path, "json") {
            serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        } else if has_extension(file_path, "toml") {
            toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        } else {
            return Err(ImportError::UnsupportedFormat {
                format: extension_of(file_path),
            }
            .into());
        };

        debug!(file = %file_path.display(), "Loaded profile");
        Ok(profile)
    }
}

impl Default for ImportManager {
    fn default() -> Self {
        Self::new()
    }
}
