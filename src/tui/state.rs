use crate::display::{Report, ReportLine, ReportSection};
use crate::tui::theme::Theme;

/// Which panel receives scroll keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Sections,
    Content,
}

#[derive(Clone, Debug)]
pub struct SectionView {
    pub title: String,
    pub lines: Vec<ReportLine>,
    pub has_failure: bool,
}

impl SectionView {
    fn from_section(section: &ReportSection) -> Self {
        Self {
            title: section.category.title().to_string(),
            lines: section.lines.clone(),
            has_failure: section.has_failure(),
        }
    }
}

/// A read-only snapshot of one report, browsed section by section.
#[derive(Debug)]
pub struct ViewerState {
    pub theme: Theme,
    pub focus: Focus,
    pub headers: Vec<String>,
    pub sections: Vec<SectionView>,
    pub selected: usize,
    pub scroll_y: u16,
}

impl ViewerState {
    pub fn from_report(report: &Report) -> Self {
        Self {
            theme: Theme::default(),
            focus: Focus::Sections,
            headers: report.headers.clone(),
            sections: report.sections.iter().map(SectionView::from_section).collect(),
            selected: 0,
            scroll_y: 0,
        }
    }

    pub fn current(&self) -> Option<&SectionView> {
        self.sections.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.sections.len();
        self.scroll_y = 0;
    }

    pub fn select_prev(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        self.selected = match self.selected {
            0 => self.sections.len() - 1,
            n => n - 1,
        };
        self.scroll_y = 0;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sections => Focus::Content,
            Focus::Content => Focus::Sections,
        };
    }

    /// Arrow keys move the selection in the section list and scroll otherwise.
    pub fn scroll(&mut self, delta: i16) {
        match self.focus {
            Focus::Sections => {
                if delta > 0 {
                    self.select_next();
                } else if delta < 0 {
                    self.select_prev();
                }
            }
            Focus::Content => {
                let max = self
                    .current()
                    .map(|s| s.lines.len().saturating_sub(1) as u16)
                    .unwrap_or(0);
                self.scroll_y = apply_scroll(self.scroll_y, delta, max);
            }
        }
    }
}

fn apply_scroll(current: u16, delta: i16, max: u16) -> u16 {
    let new_val = current as i32 + delta as i32;
    new_val.clamp(0, max as i32) as u16
}
