pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone)]
pub struct StoppedLocation {
    pub func: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub reason: Option<String>,
    pub thread_id: Option<u32>,
}

impl StoppedLocation {
    /// The inferior is gone; no further stop reports are meaningful.
    pub fn is_exit(&self) -> bool {
        self.reason
            .as_deref()
            .map(|r| r.starts_with("exited"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct BreakpointInfo {
    pub number: u32,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub func: Option<String>,
}

/// Current frame position as reported by `-stack-info-frame`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePosition {
    pub fullname: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct MiResponse {
    pub status: MiStatus,
    pub result: String,
    pub oob: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiStatus {
    Done,
    Running,
    Error(String),
    Other(String),
}
