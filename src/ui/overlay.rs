//! Overlay view rendering.
//!
//! One screen: a summary header, a table of interactions with their
//! latency and tier, and a status bar. The help box is drawn on top
//! when toggled.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};
use uxlatency_types::duration::format_latency;
use uxlatency_types::Tier;

use crate::app::App;

/// Minimum terminal size for a usable display.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 8;

/// Render the whole overlay into `area`.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Min(3),    // Interaction table
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if app.show_help {
        render_help(frame, app, area);
    }
}

fn render_too_small(frame: &mut Frame, area: Rect) {
    let msg = format!(
        "Terminal too small\n{}x{} (min {}x{})",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );
    let paragraph = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(ratatui::style::Color::Yellow));
    frame.render_widget(paragraph, area);
}

/// Render the header bar: counts, average, max and tier distribution.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(" UX LATENCY ", Style::default().add_modifier(Modifier::BOLD));

    let Some(summary) = app.summary() else {
        let line = Line::from(vec![title, Span::raw("| Loading...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let mut spans = vec![
        title,
        Span::raw("│ "),
        Span::styled(
            summary.total.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" interactions │ avg "),
        Span::raw(format_latency(Some(summary.average))),
        Span::raw(" │ max "),
        Span::raw(format_latency(Some(summary.max))),
        Span::raw(" │"),
    ];

    for tier in Tier::ALL {
        let count = summary.count(tier);
        let style = if count > 0 {
            app.theme.tier_style(tier)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("{} {}", count, tier.label()), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the interaction table.
pub fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let thresholds = app.thresholds();

    let header = Row::new(vec![
        Cell::from("Interaction"),
        Cell::from("Latency"),
        Cell::from("Tier"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = app
        .interactions()
        .iter()
        .map(|record| {
            let latency = record.latency();
            let tier = thresholds.classify(latency);
            let tier_style = app.theme.tier_style(tier);

            Row::new(vec![
                Cell::from(record.id.clone()),
                Cell::from(format_latency(latency)).style(tier_style),
                Cell::from(tier.label()).style(tier_style),
            ])
        })
        .collect();

    let empty = rows.is_empty();
    let title = format!(" Interactions ({}) ", rows.len());

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(14),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .row_highlight_style(app.theme.selected)
    .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !empty {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

/// Render the status bar at the bottom.
///
/// Shows a temporary status message if one is active, otherwise the
/// source, time since last update and the key controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | r:retry q:quit", err)
    } else if let Some(updated) = app.last_updated {
        format!(
            " {} | Updated {:.1}s ago | j/k:select r:reload e:export ?:help q:quit",
            app.source_description(),
            updated.elapsed().as_secs_f64(),
        )
    } else {
        format!(" {} | Loading... | q:quit", app.source_description())
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  ↑/↓ j/k     Select interaction"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  g/G         Jump to first/last"),
        Line::from("  r           Reload report"),
        Line::from("  e           Export to CSV"),
        Line::from("  ?           Toggle this help"),
        Line::from("  q/Esc       Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 38u16.min(area.width.saturating_sub(4));
    let help_height = 13u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
