pub mod models;
pub mod parser;
pub mod query;
pub mod session;

pub use models::{BreakpointInfo, Result, StoppedLocation};
pub use session::MiSession;
