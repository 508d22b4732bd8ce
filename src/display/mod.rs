//! Stop-time display engine: what is watched, which categories are shown in
//! which order, and how one report is rendered from inspector answers.

pub mod category;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod query;
pub mod render;
pub mod watch;

pub use dispatch::{dispatch, DisplayState, Outcome};
pub use query::{Frame, Instruction, QueryFailed, QueryResult, SourceLine, SourceQuery};
pub use render::{LineKind, Report, ReportLine, ReportSection};
