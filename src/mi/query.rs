use crate::display::{Frame, Instruction, QueryFailed, QueryResult, SourceLine, SourceQuery};
use crate::mi::parser::{
    format_register_value, parse_current_thread_id, parse_disassembly, parse_frames,
    parse_u64_value,
};
use crate::mi::session::MiSession;
use std::path::Path;

// Fixed-width estimate used to size the disassembly range around the pc.
const INSN_BYTES: u64 = 4;

fn failed<E: std::fmt::Display>(e: E) -> QueryFailed {
    QueryFailed::new(e.to_string())
}

impl SourceQuery for MiSession {
    fn thread_id(&mut self) -> QueryResult<u32> {
        let resp = self.exec_checked("-thread-info").map_err(failed)?;
        parse_current_thread_id(&resp.result)
            .ok_or_else(|| QueryFailed::new("No thread selected."))
    }

    fn register_value(&mut self, name: &str) -> QueryResult<String> {
        let reg = name.trim_start_matches('$');
        self.evaluate_expression(&format!("${}", reg))
            .map(|raw| format_register_value(&raw))
            .map_err(failed)
    }

    fn variable_value(&mut self, expr: &str) -> QueryResult<String> {
        self.evaluate_expression(expr).map_err(failed)
    }

    fn memory_bytes(&mut self, address: u64, size: u64) -> QueryResult<Vec<u8>> {
        self.read_memory_bytes(address, size).map_err(failed)
    }

    fn backtrace(&mut self, max_frames: u32) -> QueryResult<Vec<Frame>> {
        if max_frames == 0 {
            return Ok(Vec::new());
        }
        let cmd = format!("-stack-list-frames 0 {}", max_frames - 1);
        let resp = self.exec_checked(&cmd).map_err(failed)?;
        Ok(parse_frames(&resp.result))
    }

    fn program_counter(&mut self) -> QueryResult<u64> {
        let raw = self.evaluate_expression("$pc").map_err(failed)?;
        parse_u64_value(&raw).ok_or_else(|| QueryFailed::new(format!("unreadable pc '{}'", raw)))
    }

    fn disassembly_near(
        &mut self,
        pc: u64,
        before: u32,
        after: u32,
    ) -> QueryResult<Vec<Instruction>> {
        let start = pc.saturating_sub(before as u64 * INSN_BYTES);
        let end = pc.saturating_add((after as u64 + 1) * INSN_BYTES);
        let cmd = format!("-data-disassemble -s 0x{:x} -e 0x{:x} -- 0", start, end);
        let resp = self.exec_checked(&cmd).map_err(failed)?;
        Ok(parse_disassembly(&resp.result))
    }

    fn source_context(&mut self, before: u32, after: u32) -> QueryResult<Vec<SourceLine>> {
        let pos = self.frame_position().map_err(failed)?;
        let line = pos
            .line
            .ok_or_else(|| QueryFailed::new("No source information available"))?;
        let path = pos
            .fullname
            .or(pos.file)
            .ok_or_else(|| QueryFailed::new("No source information available"))?;
        read_source_window(Path::new(&path), line, before, after)
    }

    fn run_command(&mut self, text: &str) -> QueryResult<String> {
        self.console_command(text).map_err(failed)
    }
}

/// Lines `current - before ..= current + after` of a source file, clamped to
/// the file bounds.
pub(crate) fn read_source_window(
    path: &Path,
    current: u32,
    before: u32,
    after: u32,
) -> QueryResult<Vec<SourceLine>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| QueryFailed::new(format!("{}: {}", path.display(), e)))?;
    let first = current.saturating_sub(before).max(1);
    let last = current.saturating_add(after);
    Ok(text
        .lines()
        .enumerate()
        .map(|(i, l)| (i as u32 + 1, l))
        .filter(|(n, _)| *n >= first && *n <= last)
        .map(|(number, l)| SourceLine {
            number,
            text: l.trim_end().to_string(),
            is_current: number == current,
        })
        .collect())
}
