use crate::tui::state::{Focus, ViewerState};
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

const SECTION_LIST_WIDTH: u16 = 20;

pub fn draw(f: &mut Frame, app: &ViewerState) {
    let theme = &app.theme;
    let full = f.size();

    // Clear and paint the full background to avoid artifacts after resizing.
    f.render_widget(Clear, full);
    f.render_widget(Block::default().style(Style::default().bg(theme.bg)), full);

    let header_height = app.headers.len() as u16 + 2;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(1),
        ])
        .split(full);

    render_header(f, app, layout[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SECTION_LIST_WIDTH), Constraint::Min(1)])
        .split(layout[1]);

    render_section_list(f, app, main[0]);
    render_content(f, app, main[1]);
}

/// Badge line plus one line per enabled report header.
fn render_header(f: &mut Frame, app: &ViewerState, area: Rect) {
    let theme = &app.theme;
    let mut lines = vec![Line::from(vec![
        Span::styled(
            " stopview ",
            Style::default()
                .bg(theme.accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            "Tab focus  ←/→ section  ↑/↓ scroll  q quit",
            Style::default().fg(theme.fg_dim),
        ),
    ])];
    for h in &app.headers {
        let line = match h.split_once(": ") {
            Some((label, rest)) => Line::from(vec![
                Span::styled(
                    format!("{}: ", label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(rest.to_string(), Style::default().fg(theme.accent)),
            ]),
            None => Line::from(h.clone()),
        };
        lines.push(line);
    }
    let para = Paragraph::new(lines)
        .style(Style::default().bg(theme.status_bg).fg(theme.status_fg))
        .block(theme.status_block());
    f.render_widget(para, area);
}

fn render_section_list(f: &mut Frame, app: &ViewerState, area: Rect) {
    let theme = &app.theme;
    let lines: Vec<Line> = app
        .sections
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let style = if i == app.selected {
                theme.list_selected
            } else if s.has_failure {
                theme.list_failed
            } else {
                theme.list_normal
            };
            let marker = if s.has_failure { "!" } else { " " };
            Line::from(Span::styled(format!("{} {}", marker, s.title), style))
        })
        .collect();
    let block = theme.panel_block_focus(" Sections ", app.focus == Focus::Sections);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_content(f: &mut Frame, app: &ViewerState, area: Rect) {
    let theme = &app.theme;
    let Some(section) = app.current() else {
        let block = theme.panel_block(" Report ");
        let para = Paragraph::new(Line::from(Span::styled(
            "nothing to display",
            theme.line_empty,
        )))
        .block(block);
        f.render_widget(para, area);
        return;
    };

    let lines: Vec<Line> = section
        .lines
        .iter()
        .map(|l| Line::from(Span::styled(l.text.clone(), theme.line_style(l.kind))))
        .collect();
    let title = format!(" {} ", section.title);
    let block = theme.panel_block_focus(&title, app.focus == Focus::Content);
    let para = Paragraph::new(lines)
        .block(block)
        .scroll((app.scroll_y, 0));
    f.render_widget(para, area);
}
