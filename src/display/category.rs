use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Kind of debug information that can be shown on a stop.
///
/// Declaration order is significant: the settings header lists categories in
/// exactly this order, regardless of the configured display order.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Thread,
    Registers,
    Backtrace,
    Assembly,
    Source,
    Variables,
    Memory,
    Commands,
}

pub const CATEGORY_COUNT: usize = 8;

impl Category {
    /// Position in declaration order, used as a dense array index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Section title as printed above the section body.
    pub fn title(self) -> &'static str {
        match self {
            Category::Thread => "Thread",
            Category::Registers => "Registers",
            Category::Backtrace => "Backtrace",
            Category::Assembly => "Assembly",
            Category::Source => "Source",
            Category::Variables => "Variables",
            Category::Memory => "Memory",
            Category::Commands => "Commands",
        }
    }

    /// Noun used in status lines ("Register display enabled").
    pub fn status_noun(self) -> &'static str {
        match self {
            Category::Thread => "Thread",
            Category::Registers => "Register",
            Category::Backtrace => "Backtrace",
            Category::Assembly => "Assembly",
            Category::Source => "Source",
            Category::Variables => "Variable",
            Category::Memory => "Memory",
            Category::Commands => "Custom commands",
        }
    }

    /// Parse a trimmed, case-insensitive category name.
    pub fn parse(name: &str) -> Option<Category> {
        name.trim().parse().ok()
    }
}
