use crate::display::category::Category;

/// Failures of engine mutations. None of them are fatal: the dispatcher turns
/// each into a status line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    #[error("{kind} '{key}' not found in display list")]
    NotFound { kind: &'static str, key: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid order: {0}")]
    InvalidOrder(String),
    #[error("unknown command: '{0}'")]
    UnknownCommand(String),
}

impl DisplayError {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        DisplayError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn missing_categories(missing: &[Category]) -> Self {
        let names: Vec<&str> = missing.iter().map(|c| (*c).into()).collect();
        DisplayError::InvalidOrder(format!("missing {}", names.join(", ")))
    }
}

pub type DisplayResult<T> = Result<T, DisplayError>;
