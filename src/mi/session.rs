use crate::logger::log_debug;
use crate::mi::models::{
    BreakpointInfo, FramePosition, MiResponse, MiStatus, Result, StoppedLocation,
};
use crate::mi::parser::{
    collect_console_output, mi_escape, parse_breakpoint, parse_frame_position,
    parse_memory_contents, parse_status, parse_stopped, parse_value_field,
};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// A gdb process driven over the MI interpreter, one request at a time.
#[derive(Debug)]
pub struct MiSession {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    last_stop: Option<StoppedLocation>,
}

impl MiSession {
    pub fn start(gdb_bin: &str, target: &str, args: &[String]) -> Result<Self> {
        // Spawn gdb in MI mode (`-i=mi`) with quiet banner. Target args are passed as-is.
        let mut cmd = Command::new(gdb_bin);
        cmd.arg("-q").arg("-i=mi").arg("--args").arg(target);
        for a in args {
            cmd.arg(a);
        }
        let mut child = match cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(c) => c,
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    return Err(format!(
                        "gdb binary '{}' not found. Install gdb or pass --gdb <path>",
                        gdb_bin
                    )
                    .into());
                } else {
                    return Err(format!("failed to launch gdb '{}': {}", gdb_bin, e).into());
                }
            }
        };

        let stdin = child.stdin.take().ok_or("failed to open gdb stdin")?;
        let stdout = child.stdout.take().ok_or("failed to open gdb stdout")?;

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            last_stop: None,
        })
    }

    /// Skip the banner up to the first prompt. Each record is already logged.
    pub fn drain_initial_output(&mut self) -> Result<()> {
        let banner = self.read_until_prompt()?;
        log_debug(&format!("[mi] skipped {} banner record(s)", banner.len()));
        Ok(())
    }

    pub fn last_stop(&self) -> Option<&StoppedLocation> {
        self.last_stop.as_ref()
    }

    /// Send a raw MI command (no added token) and collect the response until the prompt.
    pub fn exec_command(&mut self, cmd: &str) -> Result<MiResponse> {
        self.send_line(cmd)?;
        self.read_response()
    }

    /// Like `exec_command`, but an `^error` record becomes an `Err` carrying gdb's message.
    pub fn exec_checked(&mut self, cmd: &str) -> Result<MiResponse> {
        let resp = self.exec_command(cmd)?;
        if let MiStatus::Error(msg) = &resp.status {
            return Err(msg.clone().into());
        }
        Ok(resp)
    }

    /// Insert breakpoint at main, run, and wait until it stops. Returns the stop location.
    pub fn run_to_main(&mut self) -> Result<StoppedLocation> {
        let resp = self.exec_command("-break-insert main")?;
        if let MiStatus::Error(msg) = resp.status {
            return Err(format!("failed to set breakpoint: {}", msg).into());
        }

        let resp = self.exec_command("-exec-run")?;
        if let MiStatus::Error(msg) = resp.status {
            return Err(format!("failed to run: {}", msg).into());
        }
        if let Some(line) = resp.oob.iter().find(|l| l.starts_with("*stopped")) {
            let stop = parse_stopped(line);
            self.last_stop = Some(stop.clone());
            return Ok(stop);
        }
        self.wait_for_stop_capture()
    }

    /// Evaluate arbitrary expression and return value string.
    pub fn evaluate_expression(&mut self, expr: &str) -> Result<String> {
        let cmd = format!("-data-evaluate-expression {}", mi_escape(expr));
        let resp = self.exec_checked(&cmd)?;
        parse_value_field(&resp.result).ok_or_else(|| "value not found in MI response".into())
    }

    /// Read memory bytes from an address using `-data-read-memory-bytes`.
    pub fn read_memory_bytes(&mut self, address: u64, bytes: u64) -> Result<Vec<u8>> {
        let cmd = format!("-data-read-memory-bytes 0x{:x} {}", address, bytes);
        let resp = self.exec_checked(&cmd)?;
        let raw = format!("{} {}", resp.result, resp.oob.join(" "));
        parse_memory_contents(&raw)
    }

    /// Run a CLI command through the console interpreter and capture its output.
    pub fn console_command(&mut self, text: &str) -> Result<String> {
        let cmd = format!("-interpreter-exec console {}", mi_escape(text));
        let resp = self.exec_checked(&cmd)?;
        Ok(collect_console_output(&resp.oob))
    }

    /// Where the selected frame is, per `-stack-info-frame`.
    pub fn frame_position(&mut self) -> Result<FramePosition> {
        let resp = self.exec_checked("-stack-info-frame")?;
        Ok(parse_frame_position(&resp.result))
    }

    /// Continue execution until next stop.
    pub fn exec_continue(&mut self) -> Result<StoppedLocation> {
        self.exec_until_stop("-exec-continue", "continue")
    }

    /// Step over.
    pub fn exec_next(&mut self) -> Result<StoppedLocation> {
        self.exec_until_stop("-exec-next", "next")
    }

    /// Step into.
    pub fn exec_step(&mut self) -> Result<StoppedLocation> {
        self.exec_until_stop("-exec-step", "step")
    }

    /// Insert a breakpoint at given location string.
    pub fn break_insert(&mut self, location: &str) -> Result<BreakpointInfo> {
        let cmd = format!("-break-insert {}", location);
        let resp = self.exec_command(&cmd)?;
        if let MiStatus::Error(msg) = resp.status {
            return Err(format!("break insert failed: {}", msg).into());
        }
        Ok(parse_breakpoint(&resp.result))
    }

    fn exec_until_stop(&mut self, cmd: &str, what: &str) -> Result<StoppedLocation> {
        let resp = self.exec_command(cmd)?;
        if let MiStatus::Error(msg) = resp.status {
            return Err(format!("{} failed: {}", what, msg).into());
        }
        self.wait_for_stop_capture()
    }

    /// Consume records until a `*stopped` has been seen and the prompt follows it.
    fn wait_for_stop_capture(&mut self) -> Result<StoppedLocation> {
        let mut stop: Option<StoppedLocation> = None;
        loop {
            match self.next_record()? {
                Record::Prompt => {
                    if let Some(loc) = stop.take() {
                        self.last_stop = Some(loc.clone());
                        return Ok(loc);
                    }
                }
                Record::Line(l) if l.starts_with("*stopped") => stop = Some(parse_stopped(&l)),
                Record::Line(l) if l.starts_with("^error") => {
                    return Err(format!("gdb error: {}", l).into())
                }
                Record::Line(_) => {}
            }
        }
    }

    /// Attempt to shut down gdb cleanly.
    pub fn shutdown(&mut self) {
        let _ = self.send_line("-gdb-exit");
        let _ = self.child.wait();
    }

    fn send_line(&mut self, cmd: &str) -> Result<()> {
        let mut line = cmd.to_string();
        line.push('\n');
        log_debug(&format!("[mi->] {}", cmd));
        self.stdin.write_all(line.as_bytes())?;
        self.stdin.flush()?;
        Ok(())
    }

    /// One `^` result record plus the async and stream records around it, up to
    /// the prompt that closes the exchange.
    fn read_response(&mut self) -> Result<MiResponse> {
        let mut oob = Vec::new();
        let mut result_line: Option<String> = None;
        let mut saw_prompt = false;
        loop {
            match self.next_record()? {
                Record::Prompt => {
                    saw_prompt = true;
                    if result_line.is_some() {
                        break;
                    }
                }
                Record::Line(l) if l.starts_with('^') => {
                    result_line = Some(l);
                    if saw_prompt {
                        break;
                    }
                }
                Record::Line(l) => oob.push(l),
            }
        }
        let result = result_line.unwrap_or_else(|| String::from("^error,msg=\"missing result\""));
        Ok(MiResponse {
            status: parse_status(&result),
            result,
            oob,
        })
    }

    fn read_until_prompt(&mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        while let Record::Line(l) = self.next_record()? {
            lines.push(l);
        }
        Ok(lines)
    }

    /// Next non-blank line from gdb. EOF means gdb went away.
    fn next_record(&mut self) -> Result<Record> {
        loop {
            let mut line = String::new();
            if self.stdout.read_line(&mut line)? == 0 {
                return Err("gdb exited unexpectedly".into());
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            log_debug(&format!("[mi<-] {}", trimmed));
            if trimmed == "(gdb)" {
                return Ok(Record::Prompt);
            }
            return Ok(Record::Line(trimmed.to_string()));
        }
    }
}

enum Record {
    Prompt,
    Line(String),
}
