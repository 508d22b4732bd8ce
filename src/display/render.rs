use crate::display::category::Category;
use crate::display::config::{DisplayConfig, RenderOptions};
use crate::display::query::{Frame, Instruction, QueryFailed, SourceLine, SourceQuery};
use crate::display::watch::WatchSet;
use crate::logger::log_debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Plain,
    /// The line the program is stopped at (source or assembly).
    Current,
    Failure,
    /// Placeholder for a category with nothing to show.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub kind: LineKind,
    pub text: String,
}

impl ReportLine {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Plain,
            text: text.into(),
        }
    }

    fn current(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Current,
            text: text.into(),
        }
    }

    fn failure(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Failure,
            text: text.into(),
        }
    }

    fn empty(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Empty,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub category: Category,
    pub lines: Vec<ReportLine>,
}

impl ReportSection {
    pub fn has_failure(&self) -> bool {
        self.lines.iter().any(|l| l.kind == LineKind::Failure)
    }
}

/// One render pass: header lines followed by sections in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub headers: Vec<String>,
    pub sections: Vec<ReportSection>,
    pub width: usize,
}

impl Report {
    pub fn separator(&self) -> String {
        "-".repeat(self.width)
    }

    /// Canonical text form. Identical inputs always give identical bytes.
    pub fn to_text(&self) -> String {
        let sep = self.separator();
        let mut out = String::new();
        for h in &self.headers {
            out.push_str(h);
            out.push('\n');
        }
        if !self.headers.is_empty() {
            out.push_str(&sep);
            out.push('\n');
        }
        for section in &self.sections {
            if let Some(title) = section_title(section.category) {
                out.push_str(&title);
                out.push('\n');
            }
            for line in &section.lines {
                out.push_str(&line.text);
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
}

/// Title printed above a section; the thread line is self-describing.
pub fn section_title(category: Category) -> Option<String> {
    match category {
        Category::Thread => None,
        other => Some(format!("{}:", other.title())),
    }
}

pub fn failure_text(err: &QueryFailed) -> String {
    format!("error: {}", err.reason)
}

/// Produce the report for the current stop.
///
/// Every enabled category is queried once, in `config.order()`. A failing
/// query only degrades its own section (or its own item within a section).
pub fn render(query: &mut dyn SourceQuery, watch: &WatchSet, config: &DisplayConfig) -> Report {
    let mut headers = Vec::new();
    if config.show_settings_header {
        headers.push(format!("Display Settings: {}", config.settings_summary()));
    }
    if config.show_order_header {
        headers.push(format!("Display Order: {}", config.order_summary()));
    }

    let opts = &config.options;
    let sections = config
        .order()
        .iter()
        .copied()
        .filter(|c| config.is_enabled(*c))
        .map(|category| ReportSection {
            category,
            lines: render_category(category, query, watch, opts),
        })
        .collect();

    Report {
        headers,
        sections,
        width: opts.width,
    }
}

fn render_category(
    category: Category,
    query: &mut dyn SourceQuery,
    watch: &WatchSet,
    opts: &RenderOptions,
) -> Vec<ReportLine> {
    match category {
        Category::Thread => vec![thread_line(query)],
        Category::Registers => register_lines(query, watch),
        Category::Variables => variable_lines(query, watch),
        Category::Memory => memory_lines(query, watch),
        Category::Backtrace => block_or_failure(
            Category::Backtrace,
            query.backtrace(opts.max_frames),
            |frames| frames.iter().map(|f| ReportLine::plain(format_frame(f))).collect(),
        ),
        Category::Assembly => {
            let insns = query
                .program_counter()
                .and_then(|pc| {
                    query
                        .disassembly_near(pc, opts.asm_before, opts.asm_after)
                        .map(|insns| (pc, insns))
                });
            block_or_failure(Category::Assembly, insns, |(pc, insns)| {
                insns.iter().map(|i| format_instruction(i, *pc)).collect()
            })
        }
        Category::Source => block_or_failure(
            Category::Source,
            query.source_context(opts.source_before, opts.source_after),
            |lines| lines.iter().map(format_source_line).collect(),
        ),
        Category::Commands => command_lines(query, watch),
    }
}

fn thread_line(query: &mut dyn SourceQuery) -> ReportLine {
    match query.thread_id() {
        Ok(id) => ReportLine::plain(format!("Thread ID: {}", id)),
        Err(e) => {
            log_debug(&format!("[render] thread query failed: {}", e));
            ReportLine::failure(format!("Thread ID: {}", failure_text(&e)))
        }
    }
}

fn register_lines(query: &mut dyn SourceQuery, watch: &WatchSet) -> Vec<ReportLine> {
    if watch.registers().is_empty() {
        return vec![ReportLine::empty("no registers configured")];
    }
    watch
        .registers()
        .iter()
        .map(|name| match query.register_value(name) {
            Ok(v) => ReportLine::plain(format!("{}: {}", name, v)),
            Err(e) => item_failure(name, &e),
        })
        .collect()
}

fn variable_lines(query: &mut dyn SourceQuery, watch: &WatchSet) -> Vec<ReportLine> {
    if watch.variables().is_empty() {
        return vec![ReportLine::empty("no variables configured")];
    }
    let mut lines = Vec::new();
    for expr in watch.variables() {
        match query.variable_value(expr) {
            Ok(v) => {
                let mut value_lines = v.trim_end().lines();
                let first = value_lines.next().unwrap_or("");
                lines.push(ReportLine::plain(format!("{} = {}", expr, first)));
                lines.extend(value_lines.map(|l| ReportLine::plain(format!("  {}", l))));
            }
            Err(e) => lines.push(item_failure(expr, &e)),
        }
    }
    lines
}

fn memory_lines(query: &mut dyn SourceQuery, watch: &WatchSet) -> Vec<ReportLine> {
    if watch.memory().is_empty() {
        return vec![ReportLine::empty("no memory blocks configured")];
    }
    watch
        .memory()
        .iter()
        .map(|block| {
            let label = format!("0x{:08x}", block.address);
            match query.memory_bytes(block.address, block.size) {
                Ok(bytes) if bytes.is_empty() => {
                    ReportLine::plain(format!("{} [{}]: (no bytes read)", label, block.size))
                }
                Ok(bytes) => ReportLine::plain(format!(
                    "{} [{}]: {} |{}|",
                    label,
                    block.size,
                    hex_bytes(&bytes),
                    ascii_repr(&bytes)
                )),
                Err(e) => item_failure(&label, &e),
            }
        })
        .collect()
}

fn command_lines(query: &mut dyn SourceQuery, watch: &WatchSet) -> Vec<ReportLine> {
    if watch.commands().is_empty() {
        return vec![ReportLine::empty("no commands configured")];
    }
    let mut lines = Vec::new();
    for cmd in watch.commands() {
        lines.push(ReportLine::plain(format!("[{}] {}", cmd.index, cmd.text)));
        match query.run_command(&cmd.text) {
            Ok(out) => {
                let body = out.trim_end();
                if body.is_empty() {
                    lines.push(ReportLine::empty("  (no output)"));
                } else {
                    lines.extend(body.lines().map(|l| ReportLine::plain(format!("  {}", l))));
                }
            }
            Err(e) => {
                log_debug(&format!("[render] command #{} failed: {}", cmd.index, e));
                lines.push(ReportLine::failure(format!("  {}", failure_text(&e))));
            }
        }
    }
    lines
}

fn block_or_failure<T>(
    category: Category,
    result: Result<T, QueryFailed>,
    format: impl FnOnce(&T) -> Vec<ReportLine>,
) -> Vec<ReportLine> {
    match result {
        Ok(payload) => {
            let lines = format(&payload);
            if lines.is_empty() {
                vec![ReportLine::empty(format!("no {} available", category))]
            } else {
                lines
            }
        }
        Err(e) => {
            log_debug(&format!("[render] {} query failed: {}", category, e));
            vec![ReportLine::failure(failure_text(&e))]
        }
    }
}

fn item_failure(name: &str, err: &QueryFailed) -> ReportLine {
    log_debug(&format!("[render] '{}' query failed: {}", name, err));
    ReportLine::failure(format!("{}: {}", name, failure_text(err)))
}

fn format_frame(f: &Frame) -> String {
    let mut s = format!("#{:<2} ", f.level);
    if let Some(addr) = f.addr {
        s.push_str(&format!("0x{:016x} in ", addr));
    }
    s.push_str(&f.func);
    match (&f.file, f.line) {
        (Some(file), Some(line)) => s.push_str(&format!(" at {}:{}", file, line)),
        (Some(file), None) => s.push_str(&format!(" at {}", file)),
        _ => {}
    }
    s
}

fn format_instruction(insn: &Instruction, pc: u64) -> ReportLine {
    let loc = insn
        .location
        .as_deref()
        .map(|l| format!(" <{}>", l))
        .unwrap_or_default();
    let body = format!("0x{:016x}{}: {}", insn.address, loc, insn.text);
    if insn.address == pc {
        ReportLine::current(format!("=> {}", body))
    } else {
        ReportLine::plain(format!("   {}", body))
    }
}

fn format_source_line(line: &SourceLine) -> ReportLine {
    if line.is_current {
        ReportLine::current(format!("{:>4} => {}", line.number, line.text))
    } else {
        ReportLine::plain(format!("{:>4}    {}", line.number, line.text))
    }
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn ascii_repr(bytes: &[u8]) -> String {
    // Printable ASCII range is shown verbatim; everything else becomes '.'.
    bytes
        .iter()
        .map(|b| {
            if (0x20..=0x7e).contains(b) {
                *b as char
            } else {
                '.'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::query::fake::FakeQuery;
    use strum::IntoEnumIterator;

    fn section(report: &Report, category: Category) -> Option<&ReportSection> {
        report.sections.iter().find(|s| s.category == category)
    }

    fn texts(section: &ReportSection) -> Vec<&str> {
        section.lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn default_config_renders_headers_and_thread() {
        let mut q = FakeQuery::default();
        let report = render(&mut q, &WatchSet::new(), &DisplayConfig::new());
        assert_eq!(
            report.headers,
            vec![
                "Display Settings: thread: on | registers: off | backtrace: off | assembly: off | source: off | variables: off | memory: off | commands: off".to_string(),
                "Display Order: thread -> backtrace -> memory -> source -> assembly -> registers -> variables -> commands".to_string(),
            ]
        );
        assert_eq!(report.sections.len(), 1);
        assert_eq!(texts(&report.sections[0]), vec!["Thread ID: 1"]);
        let sep = "-".repeat(80);
        assert_eq!(
            report.to_text(),
            format!(
                "{}\n{}\n{}\nThread ID: 1\n{}\n",
                report.headers[0], report.headers[1], sep, sep
            )
        );
    }

    #[test]
    fn headers_can_be_turned_off() {
        let mut q = FakeQuery::default();
        let mut cfg = DisplayConfig::new();
        cfg.set_settings_header(false);
        let report = render(&mut q, &WatchSet::new(), &cfg);
        assert_eq!(report.headers.len(), 1);
        assert!(report.headers[0].starts_with("Display Order: "));
        cfg.set_order_header(false);
        let report = render(&mut q, &WatchSet::new(), &cfg);
        assert!(report.headers.is_empty());
        assert!(report.to_text().starts_with("Thread ID: 1\n"));
    }

    #[test]
    fn memory_failure_renders_one_line_for_the_block() {
        let mut q = FakeQuery::default();
        let mut watch = WatchSet::new();
        watch.add_memory(0x1000, 16).unwrap();
        let mut cfg = DisplayConfig::new();
        cfg.enable(Category::Memory);

        let report = render(&mut q, &watch, &cfg);
        let mem = section(&report, Category::Memory).unwrap();
        assert_eq!(mem.lines.len(), 1);
        assert_eq!(mem.lines[0].kind, LineKind::Failure);
        assert!(mem.lines[0].text.starts_with("0x00001000: error: "));
    }

    #[test]
    fn memory_success_shows_hex_and_ascii() {
        let mut q = FakeQuery::default();
        q.memory.insert(0x2000, Ok(vec![0x41, 0x42, 0x00, 0xff]));
        let mut watch = WatchSet::new();
        watch.add_memory(0x2000, 4).unwrap();
        let mut cfg = DisplayConfig::new();
        cfg.enable(Category::Memory);
        let report = render(&mut q, &watch, &cfg);
        assert_eq!(
            texts(section(&report, Category::Memory).unwrap()),
            vec!["0x00002000 [4]: 41 42 00 ff |AB..|"]
        );
    }

    #[test]
    fn one_failing_register_does_not_abort_the_category() {
        let mut q = FakeQuery::default();
        q.registers.insert("pc".into(), Ok("0x80000000".into()));
        q.registers.insert("sp".into(), Ok("0x80001000".into()));
        let mut watch = WatchSet::new();
        for r in ["pc", "bogus", "sp"] {
            watch.add_register(r).unwrap();
        }
        let mut cfg = DisplayConfig::new();
        cfg.enable(Category::Registers);
        let report = render(&mut q, &watch, &cfg);
        let regs = section(&report, Category::Registers).unwrap();
        assert_eq!(regs.lines[0].text, "pc: 0x80000000");
        assert_eq!(
            regs.lines[1].text,
            "bogus: error: No symbol \"bogus\" in current context."
        );
        assert_eq!(regs.lines[2].text, "sp: 0x80001000");
    }

    #[test]
    fn duplicate_register_renders_once() {
        let mut q = FakeQuery::default();
        q.registers.insert("ra".into(), Ok("0x10".into()));
        let mut watch = WatchSet::new();
        watch.add_register("ra").unwrap();
        watch.add_register("ra").unwrap();
        let mut cfg = DisplayConfig::new();
        cfg.enable(Category::Registers);
        let report = render(&mut q, &watch, &cfg);
        assert_eq!(
            texts(section(&report, Category::Registers).unwrap()),
            vec!["ra: 0x10"]
        );
    }

    #[test]
    fn commands_keep_indices_after_removal() {
        let mut q = FakeQuery::default();
        q.commands.insert("info registers".into(), Ok("ra 0x0\nsp 0x8\n".into()));
        q.commands.insert("p x".into(), Ok("$1 = 3\n".into()));
        let mut watch = WatchSet::new();
        watch.add_command("info registers").unwrap();
        watch.add_command("bt").unwrap();
        watch.add_command("p x").unwrap();
        watch.remove_command(1).unwrap();
        let mut cfg = DisplayConfig::new();
        cfg.enable(Category::Commands);

        let report = render(&mut q, &watch, &cfg);
        assert_eq!(
            texts(section(&report, Category::Commands).unwrap()),
            vec![
                "[0] info registers",
                "  ra 0x0",
                "  sp 0x8",
                "[2] p x",
                "  $1 = 3"
            ]
        );

        assert_eq!(watch.add_command("info frame").unwrap(), 3);
        let report = render(&mut q, &watch, &cfg);
        let cmds = section(&report, Category::Commands).unwrap();
        assert!(!cmds.lines.iter().any(|l| l.text.starts_with("[1]")));
        assert_eq!(cmds.lines.last().unwrap().text, "  error: Undefined command: \"info frame\".");
        assert!(cmds.lines.iter().any(|l| l.text == "[3] info frame"));
    }

    #[test]
    fn failing_command_does_not_block_later_ones() {
        let mut q = FakeQuery::default();
        q.commands.insert("ok".into(), Ok("fine".into()));
        let mut watch = WatchSet::new();
        watch.add_command("broken").unwrap();
        watch.add_command("ok").unwrap();
        let mut cfg = DisplayConfig::new();
        cfg.enable(Category::Commands);
        let report = render(&mut q, &watch, &cfg);
        let cmds = section(&report, Category::Commands).unwrap();
        assert_eq!(cmds.lines[1].kind, LineKind::Failure);
        assert_eq!(cmds.lines[3].text, "  fine");
    }

    #[test]
    fn sections_follow_configured_order_and_skip_disabled() {
        let mut q = FakeQuery::default();
        let mut cfg = DisplayConfig::new();
        cfg.enable(Category::Source);
        cfg.enable(Category::Backtrace);
        cfg.reorder_from_str("source,thread,backtrace,memory,assembly,registers,variables,commands")
            .unwrap();
        let report = render(&mut q, &WatchSet::new(), &cfg);
        let order: Vec<Category> = report.sections.iter().map(|s| s.category).collect();
        assert_eq!(
            order,
            vec![Category::Source, Category::Thread, Category::Backtrace]
        );
        assert_eq!(
            texts(section(&report, Category::Source).unwrap()),
            vec!["no source available"]
        );
        // Disabled categories are never queried.
        assert!(!q.calls.iter().any(|c| c.starts_with("mem") || c == "pc"));
    }

    #[test]
    fn disable_then_enable_restores_section() {
        let mut q = FakeQuery::default();
        q.variables.insert("x".into(), Ok("42".into()));
        let mut watch = WatchSet::new();
        watch.add_variable("x").unwrap();
        let mut cfg = DisplayConfig::new();
        cfg.enable(Category::Variables);
        let first = render(&mut q, &watch, &cfg);

        cfg.disable(Category::Variables);
        let hidden = render(&mut q, &watch, &cfg);
        assert!(section(&hidden, Category::Variables).is_none());
        assert_eq!(watch.variables(), &["x"]);

        cfg.enable(Category::Variables);
        let again = render(&mut q, &watch, &cfg);
        assert_eq!(
            section(&again, Category::Variables),
            section(&first, Category::Variables)
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut watch = WatchSet::new();
        watch.add_register("pc").unwrap();
        watch.add_variable("node").unwrap();
        watch.add_memory(0x10, 2).unwrap();
        watch.add_command("info frame").unwrap();
        let mut cfg = DisplayConfig::new();
        for c in Category::iter() {
            cfg.enable(c);
        }
        let make = || {
            let mut q = FakeQuery::default();
            q.registers.insert("pc".into(), Ok("0x4".into()));
            q.variables.insert("node".into(), Ok("{\n  id = 1,\n  next = 0x0\n}".into()));
            q.memory.insert(0x10, Ok(vec![1, 2]));
            q.pc = Ok(0x4);
            q.asm = Ok(vec![
                Instruction {
                    address: 0x0,
                    location: Some("main".into()),
                    text: "addi sp,sp,-16".into(),
                },
                Instruction {
                    address: 0x4,
                    location: Some("main+4".into()),
                    text: "sd ra,8(sp)".into(),
                },
            ]);
            q
        };
        let a = render(&mut make(), &watch, &cfg).to_text();
        let b = render(&mut make(), &watch, &cfg).to_text();
        assert_eq!(a, b);
        assert!(a.contains("Variables:\nnode = {\n    id = 1,\n    next = 0x0\n  }\n"));
        assert!(a.contains("=> 0x0000000000000004 <main+4>: sd ra,8(sp)\n"));
        assert!(a.contains("   0x0000000000000000 <main>: addi sp,sp,-16\n"));
    }

    #[test]
    fn backtrace_and_source_formatting() {
        let mut q = FakeQuery::default();
        q.frames = Ok(vec![
            Frame {
                level: 0,
                addr: Some(0x8000_0010),
                func: "main".into(),
                file: Some("main.c".into()),
                line: Some(12),
            },
            Frame {
                level: 1,
                addr: None,
                func: "_start".into(),
                file: None,
                line: None,
            },
        ]);
        q.source = Ok(vec![
            SourceLine {
                number: 11,
                text: "int x = 1;".into(),
                is_current: false,
            },
            SourceLine {
                number: 12,
                text: "x++;".into(),
                is_current: true,
            },
        ]);
        let mut cfg = DisplayConfig::new();
        cfg.enable(Category::Backtrace);
        cfg.enable(Category::Source);
        let report = render(&mut q, &WatchSet::new(), &cfg);
        assert_eq!(
            texts(section(&report, Category::Backtrace).unwrap()),
            vec![
                "#0  0x0000000080000010 in main at main.c:12",
                "#1  _start"
            ]
        );
        let src = section(&report, Category::Source).unwrap();
        assert_eq!(texts(src), vec!["  11    int x = 1;", "  12 => x++;"]);
        assert_eq!(src.lines[1].kind, LineKind::Current);
    }

    #[test]
    fn whole_block_failure_is_a_single_line() {
        let mut q = FakeQuery::default();
        q.frames = Err(QueryFailed::new("No stack."));
        q.thread = Err(QueryFailed::new("No thread selected."));
        let mut cfg = DisplayConfig::new();
        cfg.enable(Category::Backtrace);
        cfg.enable(Category::Assembly);
        let report = render(&mut q, &WatchSet::new(), &cfg);
        assert_eq!(
            texts(section(&report, Category::Thread).unwrap()),
            vec!["Thread ID: error: No thread selected."]
        );
        assert_eq!(
            texts(section(&report, Category::Backtrace).unwrap()),
            vec!["error: No stack."]
        );
        assert_eq!(
            texts(section(&report, Category::Assembly).unwrap()),
            vec!["error: no pc"]
        );
    }

    #[test]
    fn empty_watch_lists_render_placeholders() {
        let mut q = FakeQuery::default();
        let mut cfg = DisplayConfig::new();
        cfg.enable(Category::Registers);
        cfg.enable(Category::Commands);
        let report = render(&mut q, &WatchSet::new(), &cfg);
        let regs = section(&report, Category::Registers).unwrap();
        assert_eq!(regs.lines[0].kind, LineKind::Empty);
        assert_eq!(regs.lines[0].text, "no registers configured");
        assert_eq!(
            texts(section(&report, Category::Commands).unwrap()),
            vec!["no commands configured"]
        );
    }

    #[test]
    fn empty_report_is_a_single_newline() {
        let mut q = FakeQuery::default();
        let mut cfg = DisplayConfig::new();
        cfg.disable(Category::Thread);
        cfg.set_settings_header(false);
        cfg.set_order_header(false);
        let report = render(&mut q, &WatchSet::new(), &cfg);
        assert!(report.sections.is_empty());
        assert_eq!(report.to_text(), "\n");
        assert!(q.calls.is_empty());
    }
}
