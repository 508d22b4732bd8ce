//! Capability interface over the inspector.
//!
//! The renderer only ever talks to the debugger through [`SourceQuery`], so a
//! live gdb session and a test fake are interchangeable.

/// The inspector could not produce data for one category or item.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct QueryFailed {
    pub reason: String,
}

impl QueryFailed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub type QueryResult<T> = Result<T, QueryFailed>;

/// One stack frame, innermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub level: u32,
    pub addr: Option<u64>,
    pub func: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub address: u64,
    /// `main+12` style symbolic location, when the inspector knows it.
    pub location: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: u32,
    pub text: String,
    pub is_current: bool,
}

pub trait SourceQuery {
    fn thread_id(&mut self) -> QueryResult<u32>;

    fn register_value(&mut self, name: &str) -> QueryResult<String>;

    fn variable_value(&mut self, expr: &str) -> QueryResult<String>;

    fn memory_bytes(&mut self, address: u64, size: u64) -> QueryResult<Vec<u8>>;

    fn backtrace(&mut self, max_frames: u32) -> QueryResult<Vec<Frame>>;

    fn program_counter(&mut self) -> QueryResult<u64>;

    fn disassembly_near(&mut self, pc: u64, before: u32, after: u32)
        -> QueryResult<Vec<Instruction>>;

    fn source_context(&mut self, before: u32, after: u32) -> QueryResult<Vec<SourceLine>>;

    /// Run an arbitrary inspector command and capture what it prints.
    fn run_command(&mut self, text: &str) -> QueryResult<String>;
}
