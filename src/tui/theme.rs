use crate::display::LineKind;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

#[derive(Clone, Debug)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub accent: Color,

    pub status_fg: Color,
    pub status_bg: Color,

    pub panel_border: Color,
    pub panel_title: Color,

    pub list_normal: Style,
    pub list_selected: Style,
    pub list_failed: Style,

    pub line_current: Style,
    pub line_failure: Style,
    pub line_empty: Style,
}

impl Theme {
    pub fn default() -> Self {
        let fg = Color::White;
        let bg = Color::Black;
        let list_normal = Style::default().fg(fg).bg(bg);
        let list_selected = list_normal.add_modifier(Modifier::REVERSED);

        Self {
            bg,
            fg,
            fg_dim: Color::DarkGray,
            accent: Color::Cyan,

            status_fg: fg,
            status_bg: bg,

            panel_border: Color::Gray,
            panel_title: Color::White,

            list_normal,
            list_selected,
            list_failed: Style::default().fg(Color::LightRed).bg(bg),

            line_current: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            line_failure: Style::default().fg(Color::LightRed),
            line_empty: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn line_style(&self, kind: LineKind) -> Style {
        match kind {
            LineKind::Plain => Style::default().fg(self.fg),
            LineKind::Current => self.line_current,
            LineKind::Failure => self.line_failure,
            LineKind::Empty => self.line_empty,
        }
    }

    pub fn panel_block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(self.panel_border))
            .style(Style::default().bg(self.bg))
            .title(title)
            .title_style(Style::default().fg(self.panel_title))
    }

    pub fn panel_block_focus<'a>(&self, title: &'a str, focused: bool) -> Block<'a> {
        let base = self.panel_block(title);
        if !focused {
            return base;
        }
        base.border_style(Style::default().fg(self.accent))
    }

    pub fn status_block(&self) -> Block<'_> {
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(self.panel_border))
    }
}
