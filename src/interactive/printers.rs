use crate::display::render::section_title;
use crate::display::{LineKind, Report};
use crate::mi::{BreakpointInfo, StoppedLocation};
use crossterm::style::Stylize;

/// Terminal output for the REPL. With `color` off every string is printed
/// exactly as the engine produced it.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub color: bool,
}

impl Printer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn status(&self, ok: bool, text: &str) {
        if !self.color {
            println!("{}", text);
        } else if ok {
            println!("{}", text.green());
        } else {
            println!("{}", text.red());
        }
    }

    pub fn error(&self, text: &str) {
        if self.color {
            eprintln!("{}", text.red());
        } else {
            eprintln!("{}", text);
        }
    }

    pub fn report(&self, report: &Report) {
        print!("{}", format_report(report, self.color));
    }

    pub fn help(&self, text: &str) {
        for line in text.lines() {
            let is_heading = !line.is_empty() && !line.starts_with(' ');
            if self.color && is_heading {
                println!("{}", line.cyan().bold());
            } else {
                println!("{}", line);
            }
        }
    }

    pub fn stopped(&self, loc: &StoppedLocation) {
        println!("{}", stop_line(loc));
    }

    pub fn breakpoint(&self, bp: &BreakpointInfo) {
        let loc = match (&bp.file, &bp.line, &bp.func) {
            (Some(f), Some(l), _) => format!("{}:{}", f, l),
            (_, _, Some(func)) => func.clone(),
            _ => "<unknown>".to_string(),
        };
        println!("breakpoint {} at {}", bp.number, loc);
    }
}

/// `stopped at file:line (func) | reason: ... | thread: N`
pub fn stop_line(loc: &StoppedLocation) -> String {
    let mut out = match (&loc.file, &loc.line, &loc.func) {
        (Some(f), Some(l), Some(func)) => format!("stopped at {}:{} ({})", f, l, func),
        (Some(f), Some(l), None) => format!("stopped at {}:{}", f, l),
        (_, _, Some(func)) => format!("stopped in {}", func),
        _ => "stopped (location unknown)".to_string(),
    };
    if let Some(reason) = &loc.reason {
        out.push_str(&format!(" | reason: {}", reason));
    }
    if let Some(tid) = loc.thread_id {
        out.push_str(&format!(" | thread: {}", tid));
    }
    out
}

/// Same layout as `Report::to_text`, with styling applied per line kind.
pub fn format_report(report: &Report, color: bool) -> String {
    if !color {
        return report.to_text();
    }
    let sep = report.separator();
    let mut out = String::new();
    for h in &report.headers {
        match h.split_once(": ") {
            Some((label, rest)) => {
                out.push_str(&format!("{} {}\n", format!("{}:", label).bold(), rest.cyan()))
            }
            None => out.push_str(&format!("{}\n", h)),
        }
    }
    if !report.headers.is_empty() {
        out.push_str(&sep);
        out.push('\n');
    }
    for section in &report.sections {
        if let Some(title) = section_title(section.category) {
            out.push_str(&format!("{}\n", title.bold()));
        }
        for line in &section.lines {
            let text = line.text.as_str();
            let styled = match line.kind {
                LineKind::Plain => text.to_string(),
                LineKind::Current => text.white().bold().to_string(),
                LineKind::Failure => text.red().to_string(),
                LineKind::Empty => text.dark_grey().to_string(),
            };
            out.push_str(&styled);
            out.push('\n');
        }
        out.push_str(&sep);
        out.push('\n');
    }
    if out.is_empty() {
        out.push('\n');
    }
    out
}
