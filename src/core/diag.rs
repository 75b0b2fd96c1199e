//! core::diag
//!
//! Diagnostic sink the core writes its trace to.
//!
//! # Design
//!
//! Discovery, extraction, and resolution never print. They receive a
//! `&dyn Diagnostics` and write lines to it; the CLI decides where those
//! lines go (see [`crate::ui::output::TerminalDiagnostics`]). Tests capture
//! them with [`MemoryDiagnostics`].

use std::cell::RefCell;

/// A sink for diagnostic lines.
pub trait Diagnostics {
    /// Record a trace line describing what the core is doing.
    fn trace(&self, message: &str);

    /// Record a non-fatal problem. The run continues with a fallback.
    fn warn(&self, message: &str);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn trace(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}

/// Level of a recorded line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Trace,
    Warn,
}

/// Records every line in memory.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    lines: RefCell<Vec<(Level, String)>>,
}

impl MemoryDiagnostics {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines, in order.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.borrow().clone()
    }

    /// Recorded warning messages, in order.
    pub fn warnings(&self) -> Vec<String> {
        self.messages(Level::Warn)
    }

    /// Recorded trace messages, in order.
    pub fn traces(&self) -> Vec<String> {
        self.messages(Level::Trace)
    }

    /// Whether any recorded line (of either level) contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(_, line)| line.contains(needle))
    }

    fn messages(&self, level: Level) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line.clone())
            .collect()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn trace(&self, message: &str) {
        self.lines
            .borrow_mut()
            .push((Level::Trace, message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.lines
            .borrow_mut()
            .push((Level::Warn, message.to_string()));
    }
}
