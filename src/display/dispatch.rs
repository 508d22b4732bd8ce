use crate::display::category::Category;
use crate::display::config::{parse_category_list, DisplayConfig};
use crate::display::error::{DisplayError, DisplayResult};
use crate::display::query::SourceQuery;
use crate::display::render::{render, Report};
use crate::display::watch::{AddOutcome, WatchSet};
use crate::logger::log_debug;

/// Everything the engine keeps between stops.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    pub watch: WatchSet,
    pub config: DisplayConfig,
}

impl DisplayState {
    pub fn new() -> Self {
        Self {
            watch: WatchSet::new(),
            config: DisplayConfig::new(),
        }
    }

    pub fn render(&self, query: &mut dyn SourceQuery) -> Report {
        render(query, &self.watch, &self.config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    AddRegisters(Vec<String>),
    RemoveRegisters(Vec<String>),
    AddVariable(String),
    RemoveVariable(String),
    AddMemory { address: u64, size: u64 },
    RemoveMemory(u64),
    AddCommand(String),
    RemoveCommand(usize),
    Toggle(Category),
    Enable(Category),
    Disable(Category),
    SetEnabled(Vec<Category>, bool),
    SettingsHeader(bool),
    OrderHeader(bool),
    Reorder(String),
    SourceWindow { before: i64, after: i64 },
    Show { clear: bool },
    View,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Status { ok: bool, text: String },
    Report { report: Report, clear: bool },
    View(Report),
    Help(String),
    /// The verb matched nothing; the front end may still know it.
    Unknown(String),
}

impl Outcome {
    fn ok(text: impl Into<String>) -> Self {
        Outcome::Status {
            ok: true,
            text: text.into(),
        }
    }

    fn failed(text: impl Into<String>) -> Self {
        Outcome::Status {
            ok: false,
            text: text.into(),
        }
    }
}

const HELP_TEXT: &str = "\
Debug Information Management
  c-add-register <reg>...       - add register(s) to the display list (e.g. c-add-register ra sp)
  c-rm-register <reg>...        - remove register(s) from the display list
  c-add-variable <expr>         - add a variable expression
  c-rm-variable <expr>          - remove a variable expression
  c-add-memory <addr> <size>    - watch <size> bytes at <addr> (e.g. c-add-memory 0x80000000 64)
  c-rm-memory <addr>            - stop watching the block starting at <addr>
  c-add-command <cmd>           - run <cmd> on every stop (e.g. c-add-command info frame)
  c-rm-command <index>          - remove command #<index>

Display Control
  c-toggle-<category>           - flip a category on/off
  c-enable-<category>           - show a category
  c-disable-<category>          - hide a category
  c-reorder <list>              - set display order (comma separated, all categories)
  c-enable-display-settings     - show the settings header
  c-disable-display-settings    - hide the settings header
  c-enable-display-order        - show the order header
  c-disable-display-order       - hide the order header
  c-set enable|disable <list>   - show/hide several categories at once
  c-set order <list>            - same as c-reorder
  c-set source-line <before> <after>
                                - source window around the current line (e.g. c-set source-line -5 10)
  c-show [clear]                - render the report (optionally clearing the screen first)
  c-view                        - browse the report full-screen

Execution
  break <loc> | b, next | n, step | s, continue | c, quit | q

Categories: thread, registers, backtrace, assembly, source, variables, memory, commands
The c- prefix is optional.";

/// Static help followed by the live settings and order.
pub fn help_text(config: &DisplayConfig) -> String {
    format!(
        "{}\n\nCurrent Settings\n  Display Settings: {}\n  Display Order: {}",
        HELP_TEXT,
        config.settings_summary(),
        config.order_summary()
    )
}

/// Map a front-end verb (without its `c-` prefix) and argument string to an
/// operation.
pub fn parse_operation(verb: &str, rest: &str) -> DisplayResult<Operation> {
    let rest = rest.trim();
    let op = match verb {
        "add-register" => Operation::AddRegisters(words(rest, "add-register <reg>...")?),
        "rm-register" => Operation::RemoveRegisters(words(rest, "rm-register <reg>...")?),
        "add-variable" => Operation::AddVariable(required(rest, "add-variable <expr>")?),
        "rm-variable" => Operation::RemoveVariable(required(rest, "rm-variable <expr>")?),
        "add-memory" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            if parts.len() != 2 {
                return Err(usage("add-memory <start_addr> <size>"));
            }
            Operation::AddMemory {
                address: parse_address(parts[0])?,
                size: parse_size(parts[1])?,
            }
        }
        "rm-memory" => Operation::RemoveMemory(parse_address(&required(rest, "rm-memory <start_addr>")?)?),
        "add-command" => Operation::AddCommand(required(rest, "add-command <cmd>")?),
        "rm-command" => {
            let raw = required(rest, "rm-command <index>")?;
            let index = raw
                .parse::<usize>()
                .map_err(|_| DisplayError::InvalidArgument(format!("invalid index '{}'", raw)))?;
            Operation::RemoveCommand(index)
        }
        "enable-display-settings" => Operation::SettingsHeader(true),
        "disable-display-settings" => Operation::SettingsHeader(false),
        "enable-display-order" => Operation::OrderHeader(true),
        "disable-display-order" => Operation::OrderHeader(false),
        "reorder" => Operation::Reorder(required(rest, "reorder <list>")?),
        "show" => match rest {
            "" => Operation::Show { clear: false },
            "clear" => Operation::Show { clear: true },
            _ => return Err(usage("show [clear]")),
        },
        "view" => Operation::View,
        "help" => Operation::Help,
        "set" => parse_set(rest)?,
        _ => return parse_category_verb(verb),
    };
    Ok(op)
}

fn parse_category_verb(verb: &str) -> DisplayResult<Operation> {
    let unknown = || DisplayError::UnknownCommand(verb.to_string());
    let (action, name) = verb.split_once('-').ok_or_else(unknown)?;
    let category = Category::parse(name).ok_or_else(unknown)?;
    match action {
        "toggle" => Ok(Operation::Toggle(category)),
        "enable" => Ok(Operation::Enable(category)),
        "disable" => Ok(Operation::Disable(category)),
        _ => Err(unknown()),
    }
}

fn parse_set(rest: &str) -> DisplayResult<Operation> {
    let mut parts = rest.split_whitespace();
    let setting = parts.next().map(|s| s.to_ascii_lowercase());
    let args: Vec<&str> = parts.collect();
    match setting.as_deref() {
        Some("enable") | Some("disable") => {
            let on = setting.as_deref() == Some("enable");
            let list = args.join("");
            if list.is_empty() {
                return Err(usage("set enable|disable <list>"));
            }
            let categories = parse_category_list(&list)?;
            Ok(Operation::SetEnabled(categories, on))
        }
        Some("order") => {
            let list = args.join("");
            if list.is_empty() {
                return Err(usage("set order <list>"));
            }
            Ok(Operation::Reorder(list))
        }
        Some("source-line") => {
            if args.len() != 2 {
                return Err(usage("set source-line <before> <after>"));
            }
            let parse = |s: &str| {
                s.parse::<i64>()
                    .map_err(|_| DisplayError::InvalidArgument(format!("invalid line count '{}'", s)))
            };
            // The leading bound is conventionally written negative (-5 10).
            Ok(Operation::SourceWindow {
                before: parse(args[0])?.abs(),
                after: parse(args[1])?,
            })
        }
        Some(other) => Err(DisplayError::InvalidArgument(format!(
            "unknown setting '{}' (available: enable, disable, order, source-line)",
            other
        ))),
        None => Err(usage("set <enable|disable|order|source-line> ...")),
    }
}

/// Apply one operation. Never fails: every error becomes a status line.
pub fn execute(state: &mut DisplayState, query: &mut dyn SourceQuery, op: Operation) -> Outcome {
    log_debug(&format!("[dispatch] {:?}", op));
    match apply(state, query, op) {
        Ok(outcome) => outcome,
        Err(e) => Outcome::failed(e.to_string()),
    }
}

/// Parse and execute in one step, as the REPL does.
pub fn dispatch(
    state: &mut DisplayState,
    query: &mut dyn SourceQuery,
    verb: &str,
    rest: &str,
) -> Outcome {
    match parse_operation(verb, rest) {
        Ok(op) => execute(state, query, op),
        Err(DisplayError::UnknownCommand(verb)) => Outcome::Unknown(verb),
        Err(e) => Outcome::failed(e.to_string()),
    }
}

fn apply(
    state: &mut DisplayState,
    query: &mut dyn SourceQuery,
    op: Operation,
) -> DisplayResult<Outcome> {
    let watch = &mut state.watch;
    let config = &mut state.config;
    let outcome = match op {
        Operation::AddRegisters(names) => {
            let mut added = 0;
            let mut present = Vec::new();
            let mut failed = Vec::new();
            for name in &names {
                match watch.add_register(name) {
                    Ok(AddOutcome::AlreadyPresent) => present.push(name.as_str()),
                    Ok(_) => added += 1,
                    Err(_) => failed.push(name.as_str()),
                }
            }
            if !watch.registers().is_empty() {
                config.enable(Category::Registers);
            }
            let mut text = format!("Added {} register(s) to display list", added);
            if !present.is_empty() {
                text.push_str(&format!("; already present: {}", present.join(" ")));
            }
            if !failed.is_empty() {
                text.push_str(&format!("; failed: {}", failed.join(" ")));
            }
            Outcome::Status {
                ok: failed.is_empty(),
                text,
            }
        }
        Operation::RemoveRegisters(names) => {
            let mut removed = 0;
            let mut failed = Vec::new();
            for name in &names {
                match watch.remove_register(name) {
                    Ok(()) => removed += 1,
                    Err(_) => failed.push(name.as_str()),
                }
            }
            if watch.registers().is_empty() {
                config.disable(Category::Registers);
            }
            if failed.is_empty() {
                Outcome::ok(format!("Removed {} register(s) from display list", removed))
            } else {
                Outcome::failed(format!(
                    "Removed {} register(s); not in display list: {}",
                    removed,
                    failed.join(" ")
                ))
            }
        }
        Operation::AddVariable(expr) => {
            let added = watch.add_variable(&expr)?;
            config.enable(Category::Variables);
            match added {
                AddOutcome::AlreadyPresent => {
                    Outcome::ok(format!("Variable '{}' already in display list", expr.trim()))
                }
                _ => Outcome::ok(format!("Added variable '{}' to display list", expr.trim())),
            }
        }
        Operation::RemoveVariable(expr) => {
            watch.remove_variable(&expr)?;
            if watch.variables().is_empty() {
                config.disable(Category::Variables);
            }
            Outcome::ok(format!("Removed variable '{}' from display list", expr.trim()))
        }
        Operation::AddMemory { address, size } => {
            let added = watch.add_memory(address, size)?;
            config.enable(Category::Memory);
            match added {
                AddOutcome::Updated => Outcome::ok(format!(
                    "Updated memory block at 0x{:08x} to size {}",
                    address, size
                )),
                _ => Outcome::ok(format!(
                    "Added memory block at 0x{:08x} with size {}",
                    address, size
                )),
            }
        }
        Operation::RemoveMemory(address) => {
            watch.remove_memory(address)?;
            Outcome::ok(format!("Removed memory block at 0x{:08x}", address))
        }
        Operation::AddCommand(text) => {
            let index = watch.add_command(&text)?;
            config.enable(Category::Commands);
            Outcome::ok(format!("Added command #{} to display list", index))
        }
        Operation::RemoveCommand(index) => {
            watch.remove_command(index)?;
            Outcome::ok(format!("Removed command #{} from display list", index))
        }
        Operation::Toggle(category) => {
            let on = config.toggle(category);
            Outcome::ok(category_status(category, on))
        }
        Operation::Enable(category) => {
            config.enable(category);
            Outcome::ok(category_status(category, true))
        }
        Operation::Disable(category) => {
            config.disable(category);
            Outcome::ok(category_status(category, false))
        }
        Operation::SetEnabled(categories, on) => {
            if categories.is_empty() {
                return Err(DisplayError::InvalidArgument(
                    "no categories given".to_string(),
                ));
            }
            config.set_enabled_many(&categories, on);
            let names: Vec<String> = categories.iter().map(|c| c.to_string()).collect();
            Outcome::ok(format!("Display settings updated: {}", names.join(", ")))
        }
        Operation::SettingsHeader(on) => {
            config.set_settings_header(on);
            Outcome::ok(format!("Display settings header {}", enabled_word(on)))
        }
        Operation::OrderHeader(on) => {
            config.set_order_header(on);
            Outcome::ok(format!("Display order header {}", enabled_word(on)))
        }
        Operation::Reorder(list) => {
            config.reorder_from_str(&list)?;
            Outcome::ok(format!(
                "Display order updated: {}",
                config.order_summary()
            ))
        }
        Operation::SourceWindow { before, after } => {
            config.set_source_window(before, after)?;
            Outcome::ok(format!(
                "Source window set to {} line(s) before, {} after",
                before, after
            ))
        }
        Operation::Show { clear } => Outcome::Report {
            report: render(query, watch, config),
            clear,
        },
        Operation::View => Outcome::View(render(query, watch, config)),
        Operation::Help => Outcome::Help(help_text(config)),
    };
    Ok(outcome)
}

fn category_status(category: Category, on: bool) -> String {
    format!("{} display {}", category.status_noun(), enabled_word(on))
}

fn enabled_word(on: bool) -> &'static str {
    if on {
        "enabled"
    } else {
        "disabled"
    }
}

fn usage(text: &str) -> DisplayError {
    DisplayError::InvalidArgument(format!("usage: c-{}", text))
}

fn required(rest: &str, usage_text: &str) -> DisplayResult<String> {
    if rest.is_empty() {
        return Err(usage(usage_text));
    }
    Ok(rest.to_string())
}

fn words(rest: &str, usage_text: &str) -> DisplayResult<Vec<String>> {
    let out: Vec<String> = rest.split_whitespace().map(|s| s.to_string()).collect();
    if out.is_empty() {
        return Err(usage(usage_text));
    }
    Ok(out)
}

/// Accept `0x`-prefixed hex or plain decimal.
pub fn parse_address(s: &str) -> DisplayResult<u64> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|_| DisplayError::InvalidArgument(format!("malformed address '{}'", s)))
}

fn parse_size(s: &str) -> DisplayResult<u64> {
    let positive = || DisplayError::InvalidArgument(format!("size must be a positive integer, got '{}'", s));
    let size = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).map_err(|_| positive())?,
        None => s.parse::<i64>().map_err(|_| positive())?,
    };
    if size <= 0 {
        return Err(positive());
    }
    Ok(size as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::query::fake::FakeQuery;

    fn run(state: &mut DisplayState, line: &str) -> Outcome {
        let mut q = FakeQuery::default();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        dispatch(state, &mut q, verb, rest)
    }

    fn status(outcome: Outcome) -> (bool, String) {
        match outcome {
            Outcome::Status { ok, text } => (ok, text),
            other => panic!("expected status, got {:?}", other),
        }
    }

    #[test]
    fn category_verbs_map_to_operations() {
        assert_eq!(
            parse_operation("toggle-registers", "").unwrap(),
            Operation::Toggle(Category::Registers)
        );
        assert_eq!(
            parse_operation("enable-assembly", "").unwrap(),
            Operation::Enable(Category::Assembly)
        );
        assert_eq!(
            parse_operation("disable-thread", "").unwrap(),
            Operation::Disable(Category::Thread)
        );
        assert_eq!(
            parse_operation("enable-display-order", "").unwrap(),
            Operation::OrderHeader(true)
        );
        assert!(matches!(
            parse_operation("toggle-stack", ""),
            Err(DisplayError::UnknownCommand(_))
        ));
        assert!(matches!(
            parse_operation("frobnicate", ""),
            Err(DisplayError::UnknownCommand(_))
        ));
    }

    #[test]
    fn toggle_reports_new_state() {
        let mut state = DisplayState::new();
        assert_eq!(
            status(run(&mut state, "toggle-registers")),
            (true, "Register display enabled".to_string())
        );
        assert_eq!(
            status(run(&mut state, "toggle-registers")),
            (true, "Register display disabled".to_string())
        );
    }

    #[test]
    fn add_register_reports_counts() {
        let mut state = DisplayState::new();
        let (ok, text) = status(run(&mut state, "add-register ra sp"));
        assert!(ok);
        assert_eq!(text, "Added 2 register(s) to display list");
        let (ok, text) = status(run(&mut state, "add-register sp gp"));
        assert!(ok);
        assert_eq!(text, "Added 1 register(s) to display list; already present: sp");
        assert_eq!(state.watch.registers(), &["ra", "sp", "gp"]);

        let (ok, text) = status(run(&mut state, "rm-register gp t0"));
        assert!(!ok);
        assert_eq!(text, "Removed 1 register(s); not in display list: t0");
    }

    #[test]
    fn removing_unknown_variable_is_not_found() {
        let mut state = DisplayState::new();
        run(&mut state, "add-variable counter");
        let (ok, text) = status(run(&mut state, "rm-variable missing"));
        assert!(!ok);
        assert_eq!(text, "variable 'missing' not found in display list");
        assert_eq!(state.watch.variables(), &["counter"]);
    }

    #[test]
    fn memory_argument_validation() {
        let mut state = DisplayState::new();
        let (ok, text) = status(run(&mut state, "add-memory 0x1000 16"));
        assert!(ok);
        assert_eq!(text, "Added memory block at 0x00001000 with size 16");
        let (ok, _) = status(run(&mut state, "add-memory 0x2000 0"));
        assert!(!ok);
        let (ok, _) = status(run(&mut state, "add-memory 0x2000 -4"));
        assert!(!ok);
        let (ok, text) = status(run(&mut state, "add-memory 0xZZ 4"));
        assert!(!ok);
        assert_eq!(text, "invalid argument: malformed address '0xZZ'");
        let (ok, text) = status(run(&mut state, "add-memory 4096 32"));
        assert!(ok);
        assert_eq!(text, "Updated memory block at 0x00001000 to size 32");
        let (ok, _) = status(run(&mut state, "rm-memory 0x3000"));
        assert!(!ok);
        assert_eq!(state.watch.memory().len(), 1);
    }

    #[test]
    fn add_command_echoes_index_and_enables_category() {
        let mut state = DisplayState::new();
        assert!(!state.config.is_enabled(Category::Commands));
        let (_, text) = status(run(&mut state, "add-command info registers"));
        assert_eq!(text, "Added command #0 to display list");
        assert!(state.config.is_enabled(Category::Commands));
        assert_eq!(state.watch.commands()[0].text, "info registers");
        let (ok, _) = status(run(&mut state, "rm-command 0"));
        assert!(ok);
        let (ok, text) = status(run(&mut state, "rm-command 0"));
        assert!(!ok);
        assert_eq!(text, "command '#0' not found in display list");
        let (ok, _) = status(run(&mut state, "rm-command zero"));
        assert!(!ok);
    }

    #[test]
    fn invalid_reorder_keeps_previous_order() {
        let mut state = DisplayState::new();
        let before = state.config.order().to_vec();
        let (ok, text) = status(run(
            &mut state,
            "reorder thread,backtrace,memory,source,assembly,registers,variables",
        ));
        assert!(!ok);
        assert_eq!(text, "invalid order: missing commands");
        assert_eq!(state.config.order(), before.as_slice());

        let (ok, text) = status(run(
            &mut state,
            "set order commands,thread,backtrace,memory,source,assembly,registers,variables",
        ));
        assert!(ok);
        assert!(text.starts_with("Display order updated: commands -> thread"));
    }

    #[test]
    fn set_subcommands() {
        let mut state = DisplayState::new();
        let (ok, text) = status(run(&mut state, "set enable memory, source"));
        assert!(ok);
        assert_eq!(text, "Display settings updated: memory, source");
        assert!(state.config.is_enabled(Category::Memory));
        assert!(state.config.is_enabled(Category::Source));

        let (ok, _) = status(run(&mut state, "set disable memory,bogus"));
        assert!(!ok);
        assert!(state.config.is_enabled(Category::Memory));

        let (ok, _) = status(run(&mut state, "set source-line -3 8"));
        assert!(ok);
        assert_eq!(state.config.options.source_before, 3);
        assert_eq!(state.config.options.source_after, 8);

        let (ok, _) = status(run(&mut state, "set source-line 3"));
        assert!(!ok);
        let (ok, _) = status(run(&mut state, "set colour on"));
        assert!(!ok);
    }

    #[test]
    fn header_toggles() {
        let mut state = DisplayState::new();
        run(&mut state, "disable-display-settings");
        run(&mut state, "disable-display-order");
        assert!(!state.config.show_settings_header);
        assert!(!state.config.show_order_header);
        match run(&mut state, "show") {
            Outcome::Report { report, clear } => {
                assert!(!clear);
                assert!(report.headers.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn show_clear_and_help() {
        let mut state = DisplayState::new();
        assert!(matches!(
            run(&mut state, "show clear"),
            Outcome::Report { clear: true, .. }
        ));
        let (ok, _) = status(run(&mut state, "show everything"));
        assert!(!ok);
        assert!(matches!(run(&mut state, "help"), Outcome::Help(_)));
        assert!(matches!(run(&mut state, "view"), Outcome::View(_)));
    }

    #[test]
    fn address_parsing() {
        assert_eq!(parse_address("0x80000000").unwrap(), 0x8000_0000);
        assert_eq!(parse_address("4096").unwrap(), 4096);
        assert!(parse_address("").is_err());
        assert!(parse_address("-1").is_err());
    }

    #[test]
    fn watch_verbs_switch_their_category() {
        let mut state = DisplayState::new();
        run(&mut state, "add-register ra sp");
        run(&mut state, "add-variable x");
        run(&mut state, "add-memory 0x1000 16");
        run(&mut state, "add-command bt");
        for c in [
            Category::Registers,
            Category::Variables,
            Category::Memory,
            Category::Commands,
        ] {
            assert!(state.config.is_enabled(c), "{}", c);
        }

        let mut q = FakeQuery::default();
        let report = state.render(&mut q);
        let shown: Vec<Category> = report.sections.iter().map(|s| s.category).collect();
        assert_eq!(
            shown,
            vec![
                Category::Thread,
                Category::Memory,
                Category::Registers,
                Category::Variables,
                Category::Commands,
            ]
        );

        run(&mut state, "rm-register ra");
        assert!(state.config.is_enabled(Category::Registers));
        run(&mut state, "rm-register sp");
        assert!(!state.config.is_enabled(Category::Registers));
        run(&mut state, "rm-variable x");
        assert!(!state.config.is_enabled(Category::Variables));
    }

    #[test]
    fn failed_add_leaves_category_off() {
        let mut state = DisplayState::new();
        run(&mut state, "add-memory 0x1000 0");
        assert!(!state.config.is_enabled(Category::Memory));
        run(&mut state, "add-variable");
        assert!(!state.config.is_enabled(Category::Variables));
        run(&mut state, "rm-variable ghost");
        assert!(!state.config.is_enabled(Category::Variables));
    }

    #[test]
    fn unknown_verb_is_its_own_outcome() {
        let mut state = DisplayState::new();
        assert_eq!(
            run(&mut state, "frobnicate now"),
            Outcome::Unknown("frobnicate".to_string())
        );
        assert_eq!(
            run(&mut state, "toggle-stack"),
            Outcome::Unknown("toggle-stack".to_string())
        );
        let (ok, _) = status(run(&mut state, "add-memory"));
        assert!(!ok);
    }

    #[test]
    fn help_ends_with_current_settings() {
        let mut state = DisplayState::new();
        run(&mut state, "enable-memory");
        let text = match run(&mut state, "help") {
            Outcome::Help(text) => text,
            other => panic!("unexpected {:?}", other),
        };
        assert!(text.starts_with("Debug Information Management"));
        assert!(text.contains("Display Settings: thread: on | registers: off"));
        assert!(text.contains("memory: on"));
        assert!(text.ends_with(&format!(
            "Display Order: {}",
            state.config.order_summary()
        )));
    }

    #[test]
    fn size_accepts_either_hex_prefix() {
        assert_eq!(parse_size("0x40").unwrap(), 64);
        assert_eq!(parse_size("0X40").unwrap(), 64);
        assert_eq!(parse_size("16").unwrap(), 16);
        assert!(parse_size("0X").is_err());
    }
}
