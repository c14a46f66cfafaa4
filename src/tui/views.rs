//! TUI Views
//!
//! Rendering for the tool selector and the comparison matrix, plus the
//! shared header and footer.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell as TableCell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use super::app::App;
use super::colors;
use super::state::View;
use crate::catalog::ToolDescriptor;
use crate::matrix::{Cell, ComparisonMatrix, legend};

/// Width of the feature-name column in the comparison table
const FEATURE_COLUMN_WIDTH: u16 = 28;

/// Render the whole screen for the current view
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5), Constraint::Length(2)])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    match app.state().current_view {
        View::Selector => render_selector(app, frame, chunks[1]),
        View::Comparison => render_comparison(app, frame, chunks[1]),
    }
    render_footer(app, frame, chunks[2]);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.state();
    let line = Line::from(vec![
        Span::styled(
            " AI Development Tools ",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::raw(state.current_view.name()),
        Span::raw(" │ "),
        Span::styled(state.selection_counter(), Style::default().fg(colors::SELECTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Format a catalog entry for the selector list
fn format_tool(tool: &ToolDescriptor, selected: bool) -> ListItem<'static> {
    let (marker, marker_style) = if selected {
        ("[x] ", Style::default().fg(colors::SELECTED).add_modifier(Modifier::BOLD))
    } else {
        ("[ ] ", Style::default().fg(colors::DIM))
    };

    let line = Line::from(vec![
        Span::styled(marker, marker_style),
        Span::styled(tool.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(tool.category.clone(), Style::default().fg(colors::SUBTITLE)),
        Span::styled(format!("  {}", tool.description), Style::default().fg(colors::DIM)),
    ]);
    ListItem::new(line)
}

fn render_selector(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.state();
    let items: Vec<ListItem> = app
        .catalog()
        .tools()
        .iter()
        .map(|tool| format_tool(tool, state.selection.contains(&tool.id)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Tools ({}) ", app.catalog().len())),
        )
        .highlight_style(Style::default().bg(colors::HIGHLIGHT).add_modifier(Modifier::BOLD));

    let mut list_state = ListState::default().with_selected(Some(state.cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn cell_style(cell: &Cell) -> Style {
    let color = match cell {
        Cell::Full => colors::FULL,
        Cell::Unsupported => colors::UNSUPPORTED,
        Cell::Partial(_) => colors::PARTIAL,
        Cell::NotApplicable => colors::DIM,
    };
    Style::default().fg(color)
}

/// Table rows for the matrix, honoring collapsed categories, plus the
/// row index of the focused category header
fn comparison_rows<'a>(app: &App, matrix: &'a ComparisonMatrix) -> (Vec<Row<'a>>, Option<usize>) {
    let state = app.state();
    let mut rows = Vec::new();
    let mut focused = None;

    for (i, section) in matrix.sections.iter().enumerate() {
        let expanded = state.is_expanded(&section.category);
        let arrow = if expanded { "▼" } else { "▶" };
        let mut header_style = Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD);
        if i == state.category_cursor {
            header_style = header_style.bg(colors::HIGHLIGHT);
            focused = Some(rows.len());
        }

        let mut header_cells = vec![TableCell::from(format!("{} {}", arrow, section.category))];
        header_cells.push(TableCell::from(format!("{} features", section.rows.len())));
        rows.push(Row::new(header_cells).style(header_style));

        if !expanded {
            continue;
        }
        for row in &section.rows {
            let mut cells = vec![TableCell::from(format!("  {}", row.feature))];
            cells.extend(
                row.cells
                    .iter()
                    .map(|cell| TableCell::from(Span::styled(cell.display_text(), cell_style(cell)))),
            );
            rows.push(Row::new(cells));
        }
    }
    (rows, focused)
}

fn render_comparison(app: &App, frame: &mut Frame, area: Rect) {
    let Some(matrix) = app.matrix() else {
        let message = Paragraph::new("No comparison yet. Select at least 2 tools and press Enter.")
            .style(Style::default().fg(colors::DIM))
            .block(Block::default().borders(Borders::ALL).title(" Comparison "));
        frame.render_widget(message, area);
        return;
    };

    let header_cells = std::iter::once(TableCell::from("Features")).chain(matrix.columns.iter().map(|col| {
        TableCell::from(Text::from(vec![
            Line::styled(col.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Line::styled(col.category.clone(), Style::default().fg(colors::SUBTITLE)),
        ]))
    }));
    let header = Row::new(header_cells).height(2);

    let widths = std::iter::once(Constraint::Length(FEATURE_COLUMN_WIDTH))
        .chain(std::iter::repeat_n(Constraint::Fill(1), matrix.column_count()));

    let (rows, focused) = comparison_rows(app, &matrix);
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", matrix.summary())),
    );

    // Selecting the focused header keeps it scrolled into view
    let mut table_state = TableState::default().with_selected(focused);
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.state();
    let keys = match state.current_view {
        View::Selector => "j/k move  space toggle  x clear  enter compare  tab matrix  q quit",
        View::Comparison => "j/k category  enter fold  e export  s share  esc back  q quit",
    };

    let status = state.status_message.clone().unwrap_or_else(|| legend(false));
    let lines = vec![
        Line::from(vec![
            Span::raw(status),
            Span::styled(
                format!("   Last updated: {}", Local::now().format("%Y-%m-%d")),
                Style::default().fg(colors::DIM),
            ),
        ]),
        Line::styled(keys, Style::default().fg(colors::KEYBIND)),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
