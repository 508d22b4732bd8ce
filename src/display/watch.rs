use crate::display::error::{DisplayError, DisplayResult};

/// A tracked memory range, keyed by its start address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryWatch {
    pub address: u64,
    pub size: u64,
}

/// A tracked inspector command. `index` is assigned once and never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandWatch {
    pub index: usize,
    pub text: String,
}

/// Outcome of an add that may hit an existing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    Updated,
}

/// The user-configured things to observe on every stop.
///
/// Each list keeps first-seen order; removals never reorder what remains.
#[derive(Debug, Clone, Default)]
pub struct WatchSet {
    registers: Vec<String>,
    variables: Vec<String>,
    memory: Vec<MemoryWatch>,
    commands: Vec<CommandWatch>,
    next_command_index: usize,
}

impl WatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registers(&self) -> &[String] {
        &self.registers
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn memory(&self) -> &[MemoryWatch] {
        &self.memory
    }

    pub fn commands(&self) -> &[CommandWatch] {
        &self.commands
    }

    pub fn add_register(&mut self, name: &str) -> DisplayResult<AddOutcome> {
        let name = non_blank(name, "register name")?;
        Ok(push_unique(&mut self.registers, name))
    }

    pub fn remove_register(&mut self, name: &str) -> DisplayResult<()> {
        remove_named(&mut self.registers, name.trim(), "register")
    }

    /// `expr` is opaque here; only the inspector decides whether it evaluates.
    pub fn add_variable(&mut self, expr: &str) -> DisplayResult<AddOutcome> {
        let expr = non_blank(expr, "variable expression")?;
        Ok(push_unique(&mut self.variables, expr))
    }

    pub fn remove_variable(&mut self, expr: &str) -> DisplayResult<()> {
        remove_named(&mut self.variables, expr.trim(), "variable")
    }

    /// Track `size` bytes at `address`. Re-adding a known address only updates
    /// the size and keeps the entry where it was.
    pub fn add_memory(&mut self, address: u64, size: u64) -> DisplayResult<AddOutcome> {
        if size == 0 {
            return Err(DisplayError::InvalidArgument(
                "memory size must be a positive integer".to_string(),
            ));
        }
        if let Some(block) = self.memory.iter_mut().find(|m| m.address == address) {
            block.size = size;
            return Ok(AddOutcome::Updated);
        }
        self.memory.push(MemoryWatch { address, size });
        Ok(AddOutcome::Added)
    }

    pub fn remove_memory(&mut self, address: u64) -> DisplayResult<()> {
        match self.memory.iter().position(|m| m.address == address) {
            Some(pos) => {
                self.memory.remove(pos);
                Ok(())
            }
            None => Err(DisplayError::not_found(
                "memory block",
                format!("0x{:08x}", address),
            )),
        }
    }

    /// Append a command and return the index it will be known by.
    pub fn add_command(&mut self, text: &str) -> DisplayResult<usize> {
        let text = non_blank(text, "command text")?;
        let index = self.next_command_index;
        self.next_command_index += 1;
        self.commands.push(CommandWatch { index, text });
        Ok(index)
    }

    pub fn remove_command(&mut self, index: usize) -> DisplayResult<()> {
        match self.commands.iter().position(|c| c.index == index) {
            Some(pos) => {
                self.commands.remove(pos);
                Ok(())
            }
            None => Err(DisplayError::not_found("command", format!("#{}", index))),
        }
    }
}

fn non_blank(s: &str, what: &str) -> DisplayResult<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(DisplayError::InvalidArgument(format!("{} is empty", what)));
    }
    Ok(trimmed.to_string())
}

fn push_unique(list: &mut Vec<String>, item: String) -> AddOutcome {
    if list.contains(&item) {
        return AddOutcome::AlreadyPresent;
    }
    list.push(item);
    AddOutcome::Added
}

fn remove_named(list: &mut Vec<String>, key: &str, kind: &'static str) -> DisplayResult<()> {
    match list.iter().position(|x| x == key) {
        Some(pos) => {
            list.remove(pos);
            Ok(())
        }
        None => Err(DisplayError::not_found(kind, key)),
    }
}
