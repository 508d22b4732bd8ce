use crate::display::category::{Category, CATEGORY_COUNT};
use crate::display::error::{DisplayError, DisplayResult};
use strum::IntoEnumIterator;

const DEFAULT_ORDER: [Category; CATEGORY_COUNT] = [
    Category::Thread,
    Category::Backtrace,
    Category::Memory,
    Category::Source,
    Category::Assembly,
    Category::Registers,
    Category::Variables,
    Category::Commands,
];

/// Layout knobs for the multi-line categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub source_before: u32,
    pub source_after: u32,
    pub asm_before: u32,
    pub asm_after: u32,
    pub max_frames: u32,
    /// Width of the separator line between sections.
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            source_before: 5,
            source_after: 10,
            asm_before: 5,
            asm_after: 10,
            max_frames: 10,
            width: 80,
        }
    }
}

/// Which categories are shown, and in which order.
///
/// `order` is always a permutation of every category; `reorder` is the only
/// way to change it and is all-or-nothing.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    enabled: [bool; CATEGORY_COUNT],
    order: [Category; CATEGORY_COUNT],
    pub show_settings_header: bool,
    pub show_order_header: bool,
    pub options: RenderOptions,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let mut enabled = [false; CATEGORY_COUNT];
        enabled[Category::Thread.index()] = true;
        Self {
            enabled,
            order: DEFAULT_ORDER,
            show_settings_header: true,
            show_order_header: true,
            options: RenderOptions::default(),
        }
    }
}

impl DisplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.enabled[category.index()]
    }

    pub fn order(&self) -> &[Category] {
        &self.order
    }

    /// Flip a category and return its new state.
    pub fn toggle(&mut self, category: Category) -> bool {
        let slot = &mut self.enabled[category.index()];
        *slot = !*slot;
        *slot
    }

    pub fn enable(&mut self, category: Category) {
        self.enabled[category.index()] = true;
    }

    pub fn disable(&mut self, category: Category) {
        self.enabled[category.index()] = false;
    }

    pub fn set_enabled_many(&mut self, categories: &[Category], value: bool) {
        for c in categories {
            self.enabled[c.index()] = value;
        }
    }

    pub fn set_settings_header(&mut self, on: bool) {
        self.show_settings_header = on;
    }

    pub fn set_order_header(&mut self, on: bool) {
        self.show_order_header = on;
    }

    /// Replace the display order. The new sequence must name every category
    /// exactly once; otherwise nothing changes.
    pub fn reorder(&mut self, new_order: &[Category]) -> DisplayResult<()> {
        if new_order.len() != CATEGORY_COUNT {
            return Err(DisplayError::InvalidOrder(format!(
                "expected {} categories, got {}",
                CATEGORY_COUNT,
                new_order.len()
            )));
        }
        let mut seen = [false; CATEGORY_COUNT];
        for c in new_order {
            if seen[c.index()] {
                return Err(DisplayError::InvalidOrder(format!("duplicate {}", c)));
            }
            seen[c.index()] = true;
        }
        let mut order = DEFAULT_ORDER;
        order.copy_from_slice(new_order);
        self.order = order;
        Ok(())
    }

    /// Parse a comma-separated category list and reorder with it.
    pub fn reorder_from_str(&mut self, list: &str) -> DisplayResult<()> {
        let parsed = parse_category_list(list).map_err(|e| match e {
            DisplayError::InvalidArgument(msg) => DisplayError::InvalidOrder(msg),
            other => other,
        })?;
        if parsed.len() < CATEGORY_COUNT {
            let missing: Vec<Category> = Category::iter()
                .filter(|c| !parsed.contains(c))
                .collect();
            if !missing.is_empty() {
                return Err(DisplayError::missing_categories(&missing));
            }
        }
        self.reorder(&parsed)
    }

    pub fn set_source_window(&mut self, before: i64, after: i64) -> DisplayResult<()> {
        if before < 0 || after < 0 {
            return Err(DisplayError::InvalidArgument(
                "source line window must not be negative".to_string(),
            ));
        }
        self.options.source_before = clamp_u32(before);
        self.options.source_after = clamp_u32(after);
        Ok(())
    }

    /// `thread: on | registers: off | ...`, always in declaration order.
    pub fn settings_summary(&self) -> String {
        Category::iter()
            .map(|c| format!("{}: {}", c, on_off(self.is_enabled(c))))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// `thread -> backtrace -> ...` in the configured order.
    pub fn order_summary(&self) -> String {
        self.order
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Parse `a,b,c` into categories; an unknown name fails the whole list.
pub fn parse_category_list(list: &str) -> DisplayResult<Vec<Category>> {
    let mut out = Vec::new();
    for part in list.split(',') {
        let name = part.trim();
        if name.is_empty() {
            continue;
        }
        match Category::parse(name) {
            Some(c) => out.push(c),
            None => {
                return Err(DisplayError::InvalidArgument(format!(
                    "unknown category '{}'",
                    name
                )))
            }
        }
    }
    Ok(out)
}

pub fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

fn clamp_u32(v: i64) -> u32 {
    v.clamp(0, u32::MAX as i64) as u32
}
