use crate::display::{Frame, Instruction};
use crate::mi::models::{BreakpointInfo, FramePosition, MiStatus, Result, StoppedLocation};
use regex::Regex;

pub(crate) fn parse_status(line: &str) -> MiStatus {
    if line.starts_with("^done") {
        MiStatus::Done
    } else if line.starts_with("^running") {
        MiStatus::Running
    } else if line.starts_with("^error") {
        let msg = parse_msg_field(line).unwrap_or_else(|| line.to_string());
        MiStatus::Error(msg)
    } else {
        MiStatus::Other(line.to_string())
    }
}

pub(crate) fn parse_msg_field(s: &str) -> Option<String> {
    Regex::new(r#"msg="((?:\\.|[^"])*)""#)
        .ok()
        .and_then(|re| re.captures(s).map(|c| unescape_value(&c[1])))
}

pub(crate) fn parse_value_field(s: &str) -> Option<String> {
    // Handles escaped quotes/newlines in MI `value="..."`.
    Regex::new(r#"value="((?:\\.|[^"])*)""#)
        .ok()
        .and_then(|re| re.captures(s).map(|c| unescape_value(&c[1])))
}

/// Extract a simple `key="value"` field. `key` must be preceded by a record
/// boundary so `file` does not match inside `fullname`.
pub(crate) fn parse_field(s: &str, key: &str) -> Option<String> {
    let pattern = format!(r#"(?:^|[,{{\[]){}="((?:\\.|[^"])*)""#, regex::escape(key));
    Regex::new(&pattern)
        .ok()
        .and_then(|re| re.captures(s).map(|c| unescape_value(&c[1])))
}

pub(crate) fn parse_memory_contents(s: &str) -> Result<Vec<u8>> {
    // Preferred MI form: memory=[{...,contents="aabbcc"}]
    if let Some(caps) = Regex::new(r#"contents="([0-9a-fA-F]*)""#)?.captures(s) {
        return hex_str_to_bytes(&caps[1]);
    }
    // Some gdb builds emit bytes="aabbcc" instead.
    if let Some(caps) = Regex::new(r#"bytes="([0-9a-fA-F]+)""#)?.captures(s) {
        return hex_str_to_bytes(&caps[1]);
    }
    // Legacy list form: contents=["0xaa","0xbb",...]
    if let Some(caps) = Regex::new(r#"contents=\[([^\]]+)\]"#)?.captures(s) {
        return Ok(parse_hex_list(&caps[1]));
    }
    Err("no memory contents found".into())
}

fn parse_hex_list(list: &str) -> Vec<u8> {
    list.split(',').filter_map(parse_hex_byte).collect()
}

pub(crate) fn parse_hex_byte(raw: &str) -> Option<u8> {
    let trimmed = raw.trim().trim_matches('"');
    if trimmed.is_empty() {
        return None;
    }
    let num = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    u8::from_str_radix(num, 16).ok()
}

pub(crate) fn hex_str_to_bytes(s: &str) -> Result<Vec<u8>> {
    if s.len() % 2 != 0 {
        return Err("odd-length hex string in memory contents".into());
    }
    let mut out = Vec::with_capacity(s.len() / 2);
    let mut i = 0;
    while i < s.len() {
        let byte = &s[i..i + 2];
        let b = u8::from_str_radix(byte, 16)
            .map_err(|_| format!("invalid hex byte '{}' in memory contents", byte))?;
        out.push(b);
        i += 2;
    }
    Ok(out)
}

/// Pull a number out of an evaluated value such as `42`, `0x1f` or
/// `(void (*)()) 0x80000010 <main+4>`.
pub(crate) fn parse_u64_value(s: &str) -> Option<u64> {
    let trimmed = s.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v as u64);
    }
    // First hex token wins; gdb appends `<symbol+off>` after code addresses.
    let re = Regex::new(r"0[xX]([0-9a-fA-F]+)").ok()?;
    let caps = re.captures(trimmed)?;
    u64::from_str_radix(&caps[1], 16).ok()
}

/// Integer register values are shown in hex; anything else (vector or
/// floating-point registers) is passed through unchanged.
pub(crate) fn format_register_value(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(v) => format!("0x{:x}", v as u64),
        Err(_) => trimmed.to_string(),
    }
}

pub(crate) fn parse_current_thread_id(s: &str) -> Option<u32> {
    Regex::new(r#"current-thread-id="([0-9]+)""#)
        .ok()
        .and_then(|re| re.captures(s).and_then(|c| c[1].parse::<u32>().ok()))
}

/// Parse the `stack=[frame={...},...]` payload of `-stack-list-frames`.
pub(crate) fn parse_frames(s: &str) -> Vec<Frame> {
    let Ok(frame_re) = Regex::new(r"frame=\{([^}]*)\}") else {
        return Vec::new();
    };
    frame_re
        .captures_iter(s)
        .filter_map(|caps| {
            let body = format!("{{{}", &caps[1]);
            let level = parse_field(&body, "level")?.parse::<u32>().ok()?;
            let func = parse_field(&body, "func")
                .or_else(|| parse_field(&body, "from"))
                .unwrap_or_else(|| "??".to_string());
            Some(Frame {
                level,
                addr: parse_field(&body, "addr").and_then(|a| parse_u64_value(&a)),
                func,
                file: parse_field(&body, "file"),
                line: parse_field(&body, "line").and_then(|l| l.parse::<u32>().ok()),
            })
        })
        .collect()
}

/// Parse the `asm_insns=[{address=...,inst=...},...]` payload of
/// `-data-disassemble ... -- 0`.
pub(crate) fn parse_disassembly(s: &str) -> Vec<Instruction> {
    let Ok(re) = Regex::new(
        r#"address="(0x[0-9a-fA-F]+)"(?:,func-name="([^"]*)")?(?:,offset="([0-9]+)")?(?:,opcodes="[^"]*")?,inst="((?:\\.|[^"])*)""#,
    ) else {
        return Vec::new();
    };
    re.captures_iter(s)
        .filter_map(|caps| {
            let address = parse_u64_value(&caps[1])?;
            let location = caps.get(2).map(|func| match caps.get(3) {
                Some(off) if off.as_str() != "0" => format!("{}+{}", func.as_str(), off.as_str()),
                _ => func.as_str().to_string(),
            });
            Some(Instruction {
                address,
                location,
                text: unescape_value(&caps[4]),
            })
        })
        .collect()
}

pub(crate) fn parse_frame_position(s: &str) -> FramePosition {
    FramePosition {
        fullname: parse_field(s, "fullname"),
        file: parse_field(s, "file"),
        line: parse_field(s, "line").and_then(|l| l.parse::<u32>().ok()),
    }
}

/// Join the `~"..."` console stream records of a response into plain text.
pub(crate) fn collect_console_output(oob: &[String]) -> String {
    let mut out = String::new();
    for line in oob {
        if let Some(stripped) = line.strip_prefix("~\"") {
            let inner = stripped.strip_suffix('"').unwrap_or(stripped);
            out.push_str(&unescape_value(inner));
        }
    }
    out
}

pub(crate) fn unescape_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.peek() {
                let replacement = match *next {
                    '\\' => Some('\\'),
                    '"' => Some('"'),
                    'n' => Some('\n'),
                    't' => Some('\t'),
                    _ => None,
                };
                if let Some(r) = replacement {
                    out.push(r);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

pub(crate) fn mi_escape(expr: &str) -> String {
    // Wrap an expression in MI-friendly quotes, escaping characters gdb/MI would treat specially.
    let mut out = String::with_capacity(expr.len() + 2);
    out.push('"');
    for ch in expr.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

pub(crate) fn parse_stopped(line: &str) -> StoppedLocation {
    StoppedLocation {
        func: parse_field(line, "func"),
        file: parse_field(line, "file"),
        line: parse_field(line, "line").and_then(|l| l.parse::<u32>().ok()),
        reason: parse_field(line, "reason"),
        thread_id: parse_field(line, "thread-id").and_then(|t| t.parse::<u32>().ok()),
    }
}

pub(crate) fn parse_breakpoint(res: &str) -> BreakpointInfo {
    BreakpointInfo {
        number: parse_field(res, "number")
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(0),
        file: parse_field(res, "file"),
        line: parse_field(res, "line").and_then(|l| l.parse::<u32>().ok()),
        func: parse_field(res, "func"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_value_handles_common_sequences() {
        assert_eq!(unescape_value("foo\\nbar"), "foo\nbar");
        assert_eq!(unescape_value("foo\\\"bar"), "foo\"bar");
        assert_eq!(unescape_value("foo\\\\bar"), "foo\\bar");
    }

    #[test]
    fn test_status_and_error_message() {
        assert_eq!(parse_status("^done,value=\"1\""), MiStatus::Done);
        assert_eq!(
            parse_status(r#"^error,msg="No symbol \"y\" in current context.""#),
            MiStatus::Error("No symbol \"y\" in current context.".to_string())
        );
    }

    #[test]
    fn test_hex_parsing_variants() {
        let a = parse_memory_contents(r#"memory=[{begin="0x1000",offset="0x0",end="0x1003",contents="aabbcc"}]"#)
            .unwrap();
        assert_eq!(a, vec![0xaa, 0xbb, 0xcc]);

        let c = parse_memory_contents(r#"contents=["0xaa","0xbb","0xcc"]"#).unwrap();
        assert_eq!(c, vec![0xaa, 0xbb, 0xcc]);

        assert!(parse_memory_contents("^done").is_err());
    }

    #[test]
    fn test_field_does_not_match_inside_longer_key() {
        let s = r#"frame={level="0",fullname="/src/a.c",file="a.c",line="7"}"#;
        assert_eq!(parse_field(s, "file").as_deref(), Some("a.c"));
        assert_eq!(parse_field(s, "fullname").as_deref(), Some("/src/a.c"));
        let pos = parse_frame_position(s);
        assert_eq!(pos.line, Some(7));
    }

    #[test]
    fn test_numbers_and_register_values() {
        assert_eq!(parse_u64_value("0x1f"), Some(0x1f));
        assert_eq!(parse_u64_value("42"), Some(42));
        assert_eq!(
            parse_u64_value("(void (*)()) 0x80000010 <main+4>"),
            Some(0x8000_0010)
        );
        assert_eq!(parse_u64_value("0x80000010 <main+4>"), Some(0x8000_0010));
        assert_eq!(parse_u64_value("0X2A"), Some(42));
        assert_eq!(parse_u64_value("{v4_float = {0, 0}}"), None);
        assert_eq!(format_register_value("255"), "0xff");
        assert_eq!(format_register_value("-1"), "0xffffffffffffffff");
        assert_eq!(format_register_value("0x80000010 <main+4>"), "0x80000010 <main+4>");
    }

    #[test]
    fn test_thread_info() {
        let s = r#"^done,threads=[{id="1",target-id="process 42",state="stopped"}],current-thread-id="1""#;
        assert_eq!(parse_current_thread_id(s), Some(1));
        assert_eq!(parse_current_thread_id("^done,threads=[]"), None);
    }

    #[test]
    fn test_parse_frames() {
        let s = r#"^done,stack=[frame={level="0",addr="0x0000000000401136",func="leaf",file="t.c",fullname="/tmp/t.c",line="4",arch="i386:x86-64"},frame={level="1",addr="0x00007ffff7dbd083",func="__libc_start_main",from="/lib/libc.so.6",arch="i386:x86-64"}]"#;
        let frames = parse_frames(s);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].func, "leaf");
        assert_eq!(frames[0].file.as_deref(), Some("t.c"));
        assert_eq!(frames[0].line, Some(4));
        assert_eq!(frames[0].addr, Some(0x401136));
        assert_eq!(frames[1].level, 1);
        assert_eq!(frames[1].file, None);
    }

    #[test]
    fn test_parse_disassembly() {
        let s = r#"^done,asm_insns=[{address="0x0000000000401126",func-name="main",offset="0",inst="push   %rbp"},{address="0x000000000040112a",func-name="main",offset="4",inst="movl   $0x0,-0x4(%rbp)"},{address="0x00010000",inst="push {r7, lr}"}]"#;
        let insns = parse_disassembly(s);
        assert_eq!(insns.len(), 3);
        assert_eq!(insns[0].location.as_deref(), Some("main"));
        assert_eq!(insns[1].location.as_deref(), Some("main+4"));
        assert_eq!(insns[1].address, 0x40112a);
        assert_eq!(insns[2].text, "push {r7, lr}");
        assert_eq!(insns[2].location, None);
    }

    #[test]
    fn test_console_stream() {
        let oob = vec![
            r#"&"info frame\n""#.to_string(),
            r#"~"Stack level 0, frame at 0x7ffe:\n""#.to_string(),
            r#"~" rip = 0x401136 in leaf (t.c:4);\n""#.to_string(),
        ];
        assert_eq!(
            collect_console_output(&oob),
            "Stack level 0, frame at 0x7ffe:\n rip = 0x401136 in leaf (t.c:4);\n"
        );
    }

    #[test]
    fn test_parse_stopped_and_breakpoint() {
        let stop = parse_stopped(
            r#"*stopped,reason="breakpoint-hit",disp="keep",bkptno="1",frame={addr="0x401136",func="main",args=[],file="t.c",fullname="/tmp/t.c",line="9"},thread-id="1",stopped-threads="all""#,
        );
        assert_eq!(stop.reason.as_deref(), Some("breakpoint-hit"));
        assert_eq!(stop.func.as_deref(), Some("main"));
        assert_eq!(stop.line, Some(9));
        assert_eq!(stop.thread_id, Some(1));
        assert!(!stop.is_exit());
        assert!(parse_stopped(r#"*stopped,reason="exited-normally""#).is_exit());

        let bp = parse_breakpoint(
            r#"^done,bkpt={number="2",type="breakpoint",func="leaf",file="t.c",fullname="/tmp/t.c",line="4"}"#,
        );
        assert_eq!(bp.number, 2);
        assert_eq!(bp.func.as_deref(), Some("leaf"));
    }
}
