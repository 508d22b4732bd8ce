mod display;
mod interactive;
mod logger;
mod mi;
mod tui;

use interactive::printers::Printer;
use mi::{MiSession, Result};
use std::io::IsTerminal;

const USAGE: &str =
    "usage: stopview [--verbose|-v] [--gdb <gdb-path>] [--log <path>] [--no-color] <target> [args]";

#[derive(Debug, PartialEq)]
struct CliArgs {
    gdb_bin: String,
    verbose: bool,
    log_path: Option<String>,
    no_color: bool,
    target: String,
    target_args: Vec<String>,
}

/// `gdb_default` and `log_default` come from `$GDB` and `$STOPVIEW_LOG`.
fn parse_args<I: IntoIterator<Item = String>>(
    args: I,
    gdb_default: Option<String>,
    log_default: Option<String>,
) -> std::result::Result<CliArgs, String> {
    let mut gdb_bin = gdb_default.unwrap_or_else(|| "gdb".to_string());
    let mut log_path = log_default;
    let mut verbose = false;
    let mut no_color = false;
    let mut target: Option<String> = None;
    let mut target_args: Vec<String> = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--gdb" => gdb_bin = iter.next().ok_or("--gdb needs a path")?,
            "--log" => log_path = Some(iter.next().ok_or("--log needs a path")?),
            "--verbose" | "-v" => verbose = true,
            "--no-color" => no_color = true,
            "--help" | "-h" => return Err(String::new()),
            _ => {
                target = Some(arg);
                target_args.extend(iter);
                break;
            }
        }
    }

    let target = target.ok_or("missing target")?;
    Ok(CliArgs {
        gdb_bin,
        verbose,
        log_path,
        no_color,
        target,
        target_args,
    })
}

#[derive(Debug, PartialEq)]
enum LogSink<'a> {
    File(&'a str),
    Stderr,
    Off,
}

/// A log path always wins; `-v` alone logs to stderr.
fn log_sink(args: &CliArgs) -> LogSink<'_> {
    match (&args.log_path, args.verbose) {
        (Some(path), _) => LogSink::File(path),
        (None, true) => LogSink::Stderr,
        (None, false) => LogSink::Off,
    }
}

fn main() -> Result<()> {
    let args = match parse_args(
        std::env::args().skip(1),
        std::env::var("GDB").ok(),
        std::env::var("STOPVIEW_LOG").ok(),
    ) {
        Ok(a) => a,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("{}", msg);
            }
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    if !std::path::Path::new(&args.target).exists() {
        eprintln!("target not found: {}", args.target);
        std::process::exit(1);
    }

    match log_sink(&args) {
        LogSink::File(path) => {
            if let Err(e) = logger::global().init(path, args.verbose) {
                eprintln!("cannot open log file {}: {}", path, e);
            }
        }
        LogSink::Stderr => logger::global().init_stderr(),
        LogSink::Off => {}
    }
    logger::log_debug(&format!(
        "[stopview] gdb: {} | target: {} {:?}",
        args.gdb_bin, args.target, args.target_args
    ));

    let color = !args.no_color && std::io::stdout().is_terminal();
    let printer = Printer::new(color);

    let mut session = MiSession::start(&args.gdb_bin, &args.target, &args.target_args)?;
    session.drain_initial_output()?;
    if let Err(e) = session.run_to_main() {
        printer.error(&format!("could not stop at main: {}", e));
        session.shutdown();
        return Err(e);
    }

    let result = interactive::repl(&mut session, printer);
    session.shutdown();
    result
}
