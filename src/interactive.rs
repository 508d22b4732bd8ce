mod commands;
pub mod printers;

use crate::display::config::RenderOptions;
use crate::display::DisplayState;
use crate::mi::{MiSession, Result, StoppedLocation};
use commands::{execute_command, CommandOutcome};
use printers::Printer;
use std::io::{self, Write};

/// Read commands until `quit` or EOF. The display state lives for the whole
/// session and is re-rendered after every stop.
pub fn repl(session: &mut MiSession, printer: Printer) -> Result<()> {
    let mut state = DisplayState::new();
    state.config.options.width = report_width(crossterm::terminal::size());
    println!("Type 'help' for commands.");
    if let Some(stop) = session.last_stop().cloned() {
        show_stop(&stop, session, &state, printer);
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("stopview> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        state.config.options.width = report_width(crossterm::terminal::size());
        let (cmd, rest) = split_command(input);
        match execute_command(input, cmd, rest, session, &mut state, printer)? {
            CommandOutcome::Continue => {}
            CommandOutcome::Quit => break,
        }
    }
    Ok(())
}

/// Separator width for the next report: the terminal's column count, or the
/// default when stdout is not a terminal.
pub(crate) fn report_width(size: io::Result<(u16, u16)>) -> usize {
    match size {
        Ok((cols, _)) if cols > 0 => cols as usize,
        _ => RenderOptions::default().width,
    }
}

/// Split off the verb and strip the optional `c-` prefix.
pub(crate) fn split_command(input: &str) -> (&str, &str) {
    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim();
    (cmd.strip_prefix("c-").unwrap_or(cmd), rest)
}

pub(crate) fn show_stop(
    stop: &StoppedLocation,
    session: &mut MiSession,
    state: &DisplayState,
    printer: Printer,
) {
    printer.stopped(stop);
    if stop.is_exit() {
        return;
    }
    let report = state.render(session);
    printer.report(&report);
}
