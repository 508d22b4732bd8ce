use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
    sync::{Mutex, OnceLock},
};

/// Append-only diagnostic log. Nothing is written until `init` opens a file
/// or `init_stderr` is called, so the REPL output stays clean by default.
pub struct Logger {
    sink: Mutex<Option<Box<dyn Write + Send>>>,
    verbose: Mutex<bool>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("open", &self.is_open())
            .field("verbose", &self.is_verbose())
            .finish()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            sink: Mutex::new(None),
            verbose: Mutex::new(false),
        }
    }

    pub fn init<P: AsRef<Path>>(&self, path: P, verbose: bool) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.init_writer(Box::new(file), verbose);
        Ok(())
    }

    /// `-v` without a log file: debug lines go to stderr.
    pub fn init_stderr(&self) {
        self.init_writer(Box::new(io::stderr()), true);
    }

    pub fn init_writer(&self, sink: Box<dyn Write + Send>, verbose: bool) {
        if let Ok(mut guard) = self.sink.lock() {
            *guard = Some(sink);
        }
        if let Ok(mut v) = self.verbose.lock() {
            *v = verbose;
        }
    }

    pub fn is_open(&self) -> bool {
        self.sink.lock().map(|s| s.is_some()).unwrap_or(false)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.lock().map(|v| *v).unwrap_or(false)
    }

    pub fn log(&self, msg: &str) {
        if let Ok(mut guard) = self.sink.lock() {
            if let Some(w) = guard.as_mut() {
                let _ = writeln!(w, "{msg}");
            }
        }
    }

    /// Written only when the log was opened in verbose mode.
    pub fn debug(&self, msg: &str) {
        if self.is_verbose() {
            self.log(msg);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn global() -> &'static Logger {
    LOGGER.get_or_init(Logger::new)
}

/// Written only when the log was opened in verbose mode.
pub fn log_debug(msg: &str) {
    global().debug(msg);
}

pub fn log_warn(msg: &str) {
    global().log(&format!("[warn] {}", msg));
}
