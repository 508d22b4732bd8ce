use super::printers::Printer;
use super::show_stop;
use crate::display::{dispatch, DisplayState, Outcome};
use crate::logger::log_warn;
use crate::mi::{MiSession, Result, StoppedLocation};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io;

pub enum CommandOutcome {
    Continue,
    Quit,
}

pub fn execute_command(
    input: &str,
    cmd: &str,
    rest: &str,
    session: &mut MiSession,
    state: &mut DisplayState,
    printer: Printer,
) -> Result<CommandOutcome> {
    match cmd {
        "quit" | "q" => return Ok(CommandOutcome::Quit),
        "clear" => clear_screen()?,
        "break" | "b" => {
            if rest.is_empty() {
                println!("usage: break <location>");
            } else {
                match session.break_insert(rest) {
                    Ok(info) => printer.breakpoint(&info),
                    Err(e) => {
                        log_warn(&format!("break {}: {}", rest, e));
                        printer.error(&format!("break error: {}", e))
                    }
                }
            }
        }
        "next" | "n" => {
            let stop = session.exec_next();
            after_exec("next", stop, session, state, printer);
        }
        "step" | "s" => {
            let stop = session.exec_step();
            after_exec("step", stop, session, state, printer);
        }
        "continue" | "c" => {
            let stop = session.exec_continue();
            after_exec("continue", stop, session, state, printer);
        }
        _ => match dispatch(state, session, cmd, rest) {
            Outcome::Status { ok, text } => printer.status(ok, &text),
            Outcome::Unknown(_) => printer.error(&format!("unknown command: '{}'", input)),
            Outcome::Report { report, clear } => {
                if clear {
                    clear_screen()?;
                }
                printer.report(&report);
            }
            Outcome::View(report) => {
                if let Err(e) = crate::tui::run_viewer(&report) {
                    printer.error(&format!("view error: {}", e));
                }
            }
            Outcome::Help(text) => printer.help(&text),
        },
    }
    Ok(CommandOutcome::Continue)
}

fn after_exec(
    what: &str,
    stop: Result<StoppedLocation>,
    session: &mut MiSession,
    state: &DisplayState,
    printer: Printer,
) {
    match stop {
        Ok(loc) => show_stop(&loc, session, state, printer),
        Err(e) => {
            log_warn(&format!("{} failed: {}", what, e));
            printer.error(&format!("{} error: {}", what, e))
        }
    }
}

fn clear_screen() -> Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}
