use crate::display::Report;
use anyhow::Result;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::Duration,
};

pub mod state;
pub mod theme;
pub mod ui;

use state::ViewerState;

const DEBUG_KEYS_ENV: &str = "STOPVIEW_TUI_DEBUG_KEYS";

/// Show one report full screen until the user quits. The terminal is restored
/// even when drawing fails.
pub fn run_viewer(report: &Report) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    enable_raw_mode()?;
    if let Err(e) = execute!(terminal.backend_mut(), EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(e.into());
    }
    let keyboard_enhanced = enable_keyboard_enhancement(terminal.backend_mut());

    let mut app = ViewerState::from_report(report);
    let result = event_loop(&mut terminal, &mut app);
    let cleanup_result = restore_terminal(&mut terminal, keyboard_enhanced);

    result.and(cleanup_result)
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    keyboard_enhanced: bool,
) -> Result<()> {
    disable_raw_mode()?;
    if keyboard_enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn enable_keyboard_enhancement(backend: &mut CrosstermBackend<Stdout>) -> bool {
    let debug_keys = std::env::var(DEBUG_KEYS_ENV).is_ok();
    match supports_keyboard_enhancement() {
        Ok(true) => {
            let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
            if execute!(backend, PushKeyboardEnhancementFlags(flags)).is_ok() {
                return true;
            }
            if debug_keys {
                eprintln!("[tui-keyboard] failed to push enhancement flags");
            }
        }
        Ok(false) => {
            if debug_keys {
                eprintln!("[tui-keyboard] keyboard enhancement not supported");
            }
        }
        Err(err) => {
            if debug_keys {
                eprintln!("[tui-keyboard] failed to query keyboard support: {err}");
            }
        }
    }
    false
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut ViewerState,
) -> Result<()> {
    let debug_keys = std::env::var(DEBUG_KEYS_ENV).is_ok();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if debug_keys {
                eprintln!("[tui-ev] {:?}", ev);
            }
            if let Event::Key(key_event) = ev {
                if handle_key(key_event, app) {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Returns true when the viewer should close.
fn handle_key(key: KeyEvent, app: &mut ViewerState) -> bool {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return false;
    }
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return true;
    }

    match key.code {
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Left | KeyCode::Char('h') => app.select_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll(1),
        KeyCode::PageUp => app.scroll(-8),
        KeyCode::PageDown => app.scroll(8),
        _ => {}
    }
    false
}
