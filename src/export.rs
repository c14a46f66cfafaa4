//! Matrix export - delimited text and JSON, handed to a download sink.
//!
//! CSV layout: a `Feature,<tool names>` header, then per category a label row
//! followed by one row per feature. Cells use `Yes`/`No`/note/`N/A`.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Result};
use crate::matrix::{Cell, ComparisonMatrix};

/// Base name of exported files
pub const EXPORT_BASENAME: &str = "ai-tools-comparison";

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// Parse from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }

    /// Default download filename for this format
    pub fn filename(&self) -> String {
        format!("{}.{}", EXPORT_BASENAME, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Serialize the matrix as CSV
pub fn to_csv(matrix: &ComparisonMatrix) -> String {
    let mut out = String::new();

    let header: Vec<&str> = std::iter::once("Feature")
        .chain(matrix.columns.iter().map(|c| c.name.as_str()))
        .collect();
    push_record(&mut out, &header);

    for section in &matrix.sections {
        let mut label = vec![section.category.as_str()];
        label.extend(std::iter::repeat_n("", matrix.column_count()));
        push_record(&mut out, &label);

        for row in &section.rows {
            let record: Vec<&str> = std::iter::once(row.feature.as_str())
                .chain(row.cells.iter().map(|c| c.export_text()))
                .collect();
            push_record(&mut out, &record);
        }
    }

    out
}

fn push_record(out: &mut String, fields: &[&str]) {
    let line = fields.iter().map(|f| escape_field(f)).collect::<Vec<_>>().join(",");
    out.push_str(&line);
    out.push('\n');
}

/// Quote a field if it contains a delimiter, quote, or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// JSON export document
#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    title: &'a str,
    generated_at: DateTime<Utc>,
    tools: Vec<JsonTool<'a>>,
    categories: Vec<JsonCategory<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonTool<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonCategory<'a> {
    name: &'a str,
    features: Vec<JsonFeature<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonFeature<'a> {
    name: &'a str,
    /// Export text per tool, in column order
    values: Vec<&'a str>,
    cells: &'a [Cell],
}

/// Serialize the matrix as pretty-printed JSON
pub fn to_json(matrix: &ComparisonMatrix, generated_at: DateTime<Utc>) -> Result<String> {
    let doc = JsonExport {
        title: crate::share::SHARE_TITLE,
        generated_at,
        tools: matrix
            .columns
            .iter()
            .map(|c| JsonTool {
                id: &c.id,
                name: &c.name,
                category: &c.category,
            })
            .collect(),
        categories: matrix
            .sections
            .iter()
            .map(|s| JsonCategory {
                name: &s.category,
                features: s
                    .rows
                    .iter()
                    .map(|r| JsonFeature {
                        name: &r.feature,
                        values: r.cells.iter().map(|c| c.export_text()).collect(),
                        cells: &r.cells,
                    })
                    .collect(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Render the matrix in the given format
pub fn render(matrix: &ComparisonMatrix, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => Ok(to_csv(matrix)),
        ExportFormat::Json => to_json(matrix, Utc::now()),
    }
}

/// Destination for exported bytes
pub trait Download {
    /// Save bytes under the given filename. Returns where they landed.
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes downloads into a directory
#[derive(Debug, Clone)]
pub struct DirectoryDownload {
    dir: PathBuf,
}

impl DirectoryDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Use the platform download directory, falling back to the working directory
    pub fn platform_default() -> Self {
        Self::new(dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Download for DirectoryDownload {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(MatrixError::Export(format!("invalid export filename '{}'", filename)));
        }
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| MatrixError::Export(format!("Failed to create {}: {}", self.dir.display(), e)))?;
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes)
            .map_err(|e| MatrixError::Export(format!("Failed to write {}: {}", path.display(), e)))?;
        info!("Exported {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

/// Writes a download to an exact file path, ignoring the suggested filename
#[derive(Debug, Clone)]
pub struct FileDownload {
    path: PathBuf,
}

impl FileDownload {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Download for FileDownload {
    fn save(&self, _filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, bytes)
            .map_err(|e| MatrixError::Export(format!("Failed to write {}: {}", self.path.display(), e)))?;
        info!("Exported {} bytes to {}", bytes.len(), self.path.display());
        Ok(self.path.clone())
    }
}

/// Render the matrix and hand it to the sink under the format's default filename
pub fn export(matrix: &ComparisonMatrix, format: ExportFormat, sink: &dyn Download) -> Result<PathBuf> {
    let content = render(matrix, format)?;
    sink.save(&format.filename(), content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, FeatureCategory, SupportLevel, ToolDescriptor, ToolType};
    use tempfile::TempDir;

    fn matrix() -> ComparisonMatrix {
        let catalog = Catalog::from_parts(
            vec![
                FeatureCategory::new("Code Generation", &["Autocomplete", "Refactoring"]),
                FeatureCategory::new("Pricing", &["Free Tier"]),
            ],
            vec![
                ToolDescriptor::new("a", "Tool A", ToolType::DevelopmentTool)
                    .with_feature("Autocomplete", SupportLevel::Full)
                    .with_feature("Free Tier", SupportLevel::Partial("2,000 completions".to_string())),
                ToolDescriptor::new("b", "Tool B", ToolType::AiModel)
                    .with_feature("Refactoring", SupportLevel::Unsupported)
                    .with_feature("Free Tier", SupportLevel::Partial("Say \"hi\"".to_string())),
            ],
        )
        .unwrap();
        let tools: Vec<&ToolDescriptor> = ["a", "b"].iter().map(|id| catalog.get(id).unwrap()).collect();
        ComparisonMatrix::build(&catalog, &tools)
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(ExportFormat::from_str("CSV"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_str("json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_str("xlsx"), None);
    }

    #[test]
    fn test_format_filename() {
        assert_eq!(ExportFormat::Csv.filename(), "ai-tools-comparison.csv");
        assert_eq!(ExportFormat::Json.filename(), "ai-tools-comparison.json");
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_csv(&matrix());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Feature,Tool A,Tool B");
        assert_eq!(lines[1], "Code Generation,,");
        assert_eq!(lines[2], "Autocomplete,Yes,N/A");
        assert_eq!(lines[3], "Refactoring,N/A,No");
        assert_eq!(lines[4], "Pricing,,");
    }

    #[test]
    fn test_csv_row_count() {
        let m = matrix();
        let csv = to_csv(&m);
        // header + one label per category + one per feature
        assert_eq!(csv.lines().count(), 1 + m.sections.len() + m.row_count());
    }

    #[test]
    fn test_csv_quotes_special_fields() {
        let csv = to_csv(&matrix());
        let last = csv.lines().last().unwrap();
        assert_eq!(last, "Free Tier,\"2,000 completions\",\"Say \"\"hi\"\"\"");
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_json_export() {
        let generated_at = DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let json = to_json(&matrix(), generated_at).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "AI Tools Comparison");
        assert_eq!(value["tools"][1]["name"], "Tool B");
        assert_eq!(value["categories"][0]["name"], "Code Generation");
        assert_eq!(value["categories"][0]["features"][0]["values"][0], "Yes");
        assert_eq!(value["categories"][0]["features"][0]["cells"][1]["state"], "not_applicable");
        assert!(value["generated_at"].as_str().unwrap().starts_with("2025-06-01"));
    }

    #[test]
    fn test_directory_download_writes_file() {
        let temp = TempDir::new().unwrap();
        let sink = DirectoryDownload::new(temp.path().join("exports"));
        let path = export(&matrix(), ExportFormat::Csv, &sink).unwrap();

        assert_eq!(path, temp.path().join("exports").join("ai-tools-comparison.csv"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Feature,Tool A,Tool B\n"));
    }

    #[test]
    fn test_directory_download_rejects_path_filename() {
        let temp = TempDir::new().unwrap();
        let sink = DirectoryDownload::new(temp.path());
        let err = sink.save("../escape.csv", b"x").unwrap_err();
        assert!(matches!(err, MatrixError::Export(_)));
    }

    #[test]
    fn test_file_download_uses_exact_path() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("nested").join("mine.json");
        let sink = FileDownload::new(&target);
        let path = export(&matrix(), ExportFormat::Json, &sink).unwrap();
        assert_eq!(path, target);
        assert!(std::fs::read_to_string(&target).unwrap().contains("\"tools\""));
    }
}
