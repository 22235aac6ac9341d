//! `TerminalReporter`, the `ProgressReporter` used by the binary.

use std::cell::Cell;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Numbers each step as it starts; outcomes print beneath it.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    steps: Cell<usize>,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            steps: Cell::new(0),
        }
    }

    /// Steps started so far.
    #[must_use]
    pub fn steps_started(&self) -> usize {
        self.steps.get()
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        let index = self.steps.get() + 1;
        self.steps.set(index);
        self.ctx.progress(index, message);
    }

    fn success(&self, message: &str) {
        self.ctx.done(message);
    }

    fn warn(&self, message: &str) {
        self.ctx.caution(message);
    }
}
