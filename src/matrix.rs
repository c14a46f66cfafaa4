//! Comparison matrix - categories x features x selected tools.
//!
//! Every cell resolves to exactly one of four states. Resolution is total:
//! a missing feature key or an inapplicable category is `NotApplicable`,
//! never an error.

use colored::*;
use serde::Serialize;

use crate::catalog::{Catalog, FeatureCategory, SupportLevel, ToolDescriptor, ToolType};
use crate::resolver::resolve_categories;

/// Rendered support state of one (category, feature, tool) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "note", rename_all = "snake_case")]
pub enum Cell {
    Full,
    Unsupported,
    Partial(String),
    NotApplicable,
}

impl Cell {
    /// Resolve the cell for one tool under one category and feature
    pub fn resolve(category: &FeatureCategory, feature: &str, tool: &ToolDescriptor) -> Self {
        if !category.applies_to(tool.tool_type) {
            return Cell::NotApplicable;
        }
        match tool.support(feature) {
            None => Cell::NotApplicable,
            Some(SupportLevel::Full) => Cell::Full,
            Some(SupportLevel::Unsupported) => Cell::Unsupported,
            Some(SupportLevel::Partial(note)) => Cell::Partial(note.clone()),
        }
    }

    /// Plain-text value used by the exporters
    pub fn export_text(&self) -> &str {
        match self {
            Cell::Full => "Yes",
            Cell::Unsupported => "No",
            Cell::Partial(note) => note,
            Cell::NotApplicable => "N/A",
        }
    }

    /// Single-glyph marker for terminal views
    pub fn symbol(&self) -> &'static str {
        match self {
            Cell::Full => "✓",
            Cell::Unsupported => "✗",
            Cell::Partial(_) => "⚠",
            Cell::NotApplicable => "–",
        }
    }

    /// Marker plus the partial-support note, if any
    pub fn display_text(&self) -> String {
        match self {
            Cell::Partial(note) => format!("{} {}", self.symbol(), note),
            _ => self.symbol().to_string(),
        }
    }

    pub fn is_applicable(&self) -> bool {
        !matches!(self, Cell::NotApplicable)
    }
}

/// Column header for one selected tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnHeader {
    pub id: String,
    pub name: String,
    /// Subtitle under the name (e.g., "AI-Native IDE")
    pub category: String,
    pub tool_type: ToolType,
}

impl From<&ToolDescriptor> for ColumnHeader {
    fn from(tool: &ToolDescriptor) -> Self {
        Self {
            id: tool.id.clone(),
            name: tool.name.clone(),
            category: tool.category.clone(),
            tool_type: tool.tool_type,
        }
    }
}

/// One feature row: a cell per selected tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub feature: String,
    pub cells: Vec<Cell>,
}

/// One relevant category and its feature rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixSection {
    pub category: String,
    pub rows: Vec<MatrixRow>,
}

/// Fully resolved comparison of the selected tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonMatrix {
    pub columns: Vec<ColumnHeader>,
    pub sections: Vec<MatrixSection>,
}

impl ComparisonMatrix {
    /// Build the matrix for the given tools, in the given order
    pub fn build(catalog: &Catalog, tools: &[&ToolDescriptor]) -> Self {
        let sections = resolve_categories(catalog, tools)
            .into_iter()
            .map(|category| MatrixSection {
                category: category.name.clone(),
                rows: category
                    .features
                    .iter()
                    .map(|feature| MatrixRow {
                        feature: feature.clone(),
                        cells: tools.iter().map(|tool| Cell::resolve(category, feature, tool)).collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            columns: tools.iter().map(|tool| ColumnHeader::from(*tool)).collect(),
            sections,
        }
    }

    /// Number of selected tools
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of feature rows across all sections
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    /// Find a section by category name
    pub fn section(&self, category: &str) -> Option<&MatrixSection> {
        self.sections.iter().find(|s| s.category == category)
    }

    /// Look up a cell by category, feature, and tool id
    pub fn cell(&self, category: &str, feature: &str, tool_id: &str) -> Option<&Cell> {
        let col = self.columns.iter().position(|c| c.id == tool_id)?;
        self.section(category)?
            .rows
            .iter()
            .find(|r| r.feature == feature)
            .and_then(|r| r.cells.get(col))
    }

    /// One-line summary, e.g. "Comparing 2 tools across 3 feature categories"
    pub fn summary(&self) -> String {
        format!(
            "Comparing {} tools across {} feature categories",
            self.column_count(),
            self.sections.len()
        )
    }

    /// Render as an aligned text table. `styled` enables terminal colors.
    pub fn render_table(&self, styled: bool) -> String {
        let feature_width = self
            .sections
            .iter()
            .flat_map(|s| s.rows.iter().map(|r| width(&r.feature)))
            .chain(self.sections.iter().map(|s| width(&s.category)))
            .chain(std::iter::once(width("Feature")))
            .max()
            .unwrap_or(0);

        let col_widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.sections
                    .iter()
                    .flat_map(|s| s.rows.iter().map(move |r| width(&r.cells[i].display_text())))
                    .chain([width(&col.name), width(&col.category)])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();

        let mut header = pad("Feature", feature_width);
        let mut subtitle = pad("", feature_width);
        for (col, w) in self.columns.iter().zip(&col_widths) {
            header.push_str(" │ ");
            header.push_str(&pad(&col.name, *w));
            subtitle.push_str(" │ ");
            subtitle.push_str(&pad(&col.category, *w));
        }
        if styled {
            out.push_str(&header.trim_end().bold().to_string());
            out.push('\n');
            out.push_str(&subtitle.trim_end().dimmed().to_string());
        } else {
            out.push_str(header.trim_end());
            out.push('\n');
            out.push_str(subtitle.trim_end());
        }
        out.push('\n');

        let rule_len = feature_width + col_widths.iter().map(|w| w + 3).sum::<usize>();
        out.push_str(&"─".repeat(rule_len));
        out.push('\n');

        for section in &self.sections {
            if styled {
                out.push_str(&section.category.cyan().bold().to_string());
            } else {
                out.push_str(&section.category);
            }
            out.push('\n');

            for row in &section.rows {
                let mut line = pad(&row.feature, feature_width);
                for (cell, w) in row.cells.iter().zip(&col_widths) {
                    line.push_str(" │ ");
                    let text = pad(&cell.display_text(), *w);
                    if styled {
                        line.push_str(&paint(cell, &text).to_string());
                    } else {
                        line.push_str(&text);
                    }
                }
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }

        out.push('\n');
        out.push_str(&legend(styled));
        out.push('\n');
        out
    }
}

/// Legend line explaining the cell markers
pub fn legend(styled: bool) -> String {
    let entries = [
        (Cell::Full, "Supported"),
        (Cell::Partial(String::new()), "Limited/Partial"),
        (Cell::Unsupported, "Not Available"),
        (Cell::NotApplicable, "Not Applicable"),
    ];
    entries
        .iter()
        .map(|(cell, label)| {
            let marker = if styled {
                paint(cell, cell.symbol()).to_string()
            } else {
                cell.symbol().to_string()
            };
            format!("{} {}", marker, label)
        })
        .collect::<Vec<_>>()
        .join("   ")
}

fn paint(cell: &Cell, text: &str) -> ColoredString {
    match cell {
        Cell::Full => text.green(),
        Cell::Unsupported => text.red(),
        Cell::Partial(_) => text.yellow(),
        Cell::NotApplicable => text.dimmed(),
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, w: usize) -> String {
    let fill = w.saturating_sub(width(s));
    format!("{}{}", s, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_parts(
            vec![
                FeatureCategory::new("Code Generation", &["Autocomplete", "Refactoring"]),
                FeatureCategory::new("AI Model Capabilities", &["Open Weights"]).for_types(&[ToolType::AiModel]),
            ],
            vec![
                ToolDescriptor::new("a", "Tool A", ToolType::DevelopmentTool)
                    .with_category("IDE Integration")
                    .with_feature("Autocomplete", SupportLevel::Full)
                    .with_feature("Refactoring", SupportLevel::Partial("Preview".to_string()))
                    .with_feature("Open Weights", SupportLevel::Full),
                ToolDescriptor::new("b", "Model B", ToolType::AiModel)
                    .with_category("AI Assistant")
                    .with_feature("Refactoring", SupportLevel::Unsupported)
                    .with_feature("Open Weights", SupportLevel::Full),
            ],
        )
        .unwrap()
    }

    fn build(catalog: &Catalog, ids: &[&str]) -> ComparisonMatrix {
        let tools: Vec<&ToolDescriptor> = ids.iter().map(|id| catalog.get(id).unwrap()).collect();
        ComparisonMatrix::build(catalog, &tools)
    }

    #[test]
    fn test_full_versus_missing_key() {
        let catalog = catalog();
        let matrix = build(&catalog, &["a", "b"]);
        assert_eq!(matrix.cell("Code Generation", "Autocomplete", "a"), Some(&Cell::Full));
        assert_eq!(
            matrix.cell("Code Generation", "Autocomplete", "b"),
            Some(&Cell::NotApplicable)
        );
    }

    #[test]
    fn test_partial_and_unsupported() {
        let catalog = catalog();
        let matrix = build(&catalog, &["a", "b"]);
        assert_eq!(
            matrix.cell("Code Generation", "Refactoring", "a"),
            Some(&Cell::Partial("Preview".to_string()))
        );
        assert_eq!(
            matrix.cell("Code Generation", "Refactoring", "b"),
            Some(&Cell::Unsupported)
        );
    }

    #[test]
    fn test_inapplicable_category_overrides_feature_value() {
        let catalog = catalog();
        let matrix = build(&catalog, &["a", "b"]);
        // Tool A carries the key, but the category is model-only
        assert_eq!(
            matrix.cell("AI Model Capabilities", "Open Weights", "a"),
            Some(&Cell::NotApplicable)
        );
        assert_eq!(matrix.cell("AI Model Capabilities", "Open Weights", "b"), Some(&Cell::Full));
    }

    #[test]
    fn test_irrelevant_category_is_dropped() {
        let catalog = catalog();
        let matrix = build(&catalog, &["a"]);
        assert!(matrix.section("AI Model Capabilities").is_none());
        assert_eq!(matrix.row_count(), 2);
    }

    #[test]
    fn test_dimensions() {
        let catalog = catalog();
        let matrix = build(&catalog, &["a", "b"]);
        assert_eq!(matrix.column_count(), 2);
        assert_eq!(matrix.row_count(), 3);
        for section in &matrix.sections {
            for row in &section.rows {
                assert_eq!(row.cells.len(), 2);
            }
        }
    }

    #[test]
    fn test_column_headers_follow_selection_order() {
        let catalog = catalog();
        let matrix = build(&catalog, &["b", "a"]);
        assert_eq!(matrix.columns[0].name, "Model B");
        assert_eq!(matrix.columns[0].category, "AI Assistant");
        assert_eq!(matrix.columns[1].id, "a");
    }

    #[test]
    fn test_cell_export_text() {
        assert_eq!(Cell::Full.export_text(), "Yes");
        assert_eq!(Cell::Unsupported.export_text(), "No");
        assert_eq!(Cell::Partial("Beta".to_string()).export_text(), "Beta");
        assert_eq!(Cell::NotApplicable.export_text(), "N/A");
    }

    #[test]
    fn test_cell_display_text() {
        assert_eq!(Cell::Full.display_text(), "✓");
        assert_eq!(Cell::Partial("Beta".to_string()).display_text(), "⚠ Beta");
        assert!(!Cell::NotApplicable.is_applicable());
        assert!(Cell::Unsupported.is_applicable());
    }

    #[test]
    fn test_cell_serializes_tagged() {
        let json = serde_json::to_value(Cell::Partial("Beta".to_string())).unwrap();
        assert_eq!(json["state"], "partial");
        assert_eq!(json["note"], "Beta");
        let json = serde_json::to_value(Cell::NotApplicable).unwrap();
        assert_eq!(json["state"], "not_applicable");
    }

    #[test]
    fn test_summary() {
        let catalog = catalog();
        let matrix = build(&catalog, &["a", "b"]);
        assert_eq!(matrix.summary(), "Comparing 2 tools across 2 feature categories");
    }

    #[test]
    fn test_render_table_plain() {
        let catalog = catalog();
        let matrix = build(&catalog, &["a", "b"]);
        let table = matrix.render_table(false);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("Feature"));
        assert!(lines[0].contains("Tool A"));
        assert!(lines[0].contains("Model B"));
        assert!(lines[1].contains("AI Assistant"));
        assert!(table.contains("⚠ Preview"));
        assert!(table.contains("Code Generation\n"));
        assert!(table.contains("Not Applicable"));
    }

    #[test]
    fn test_render_table_ends_with_single_legend() {
        let catalog = catalog();
        let matrix = build(&catalog, &["a", "b"]);
        let table = matrix.render_table(false);
        assert_eq!(table.matches("Not Applicable").count(), 1);
        assert_eq!(table.lines().last(), Some(legend(false).as_str()));
    }

    #[test]
    fn test_render_table_columns_align() {
        let catalog = catalog();
        let matrix = build(&catalog, &["a", "b"]);
        let table = matrix.render_table(false);
        let separators: Vec<usize> = table
            .lines()
            .filter(|l| l.starts_with("Autocomplete") || l.starts_with("Refactoring"))
            .map(|l| l.chars().position(|c| c == '│').unwrap())
            .collect();
        assert_eq!(separators.len(), 2);
        assert_eq!(separators[0], separators[1]);
    }
}
