use std::error::Error;
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Progress hooks for [`run_with_retries`](super::run_with_retries).
pub trait RetryObserver {
    fn attempt_started(&mut self, attempt: u32, limit: u32);
    fn attempt_failed(&mut self, attempt: u32, error: &dyn Error);
    fn retry_scheduled(&mut self, attempt: u32, delay: Duration);
}

/// Prints `Attempt N...`, `Error: ...` and `Retrying...` lines.
pub struct TerminalObserver<W: Write = Stdout> {
    out: W,
}

impl TerminalObserver<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// Terminal output is best effort; a closed stdout must not fail the task.
impl<W: Write> RetryObserver for TerminalObserver<W> {
    fn attempt_started(&mut self, attempt: u32, _limit: u32) {
        let _ = writeln!(self.out, "Attempt {attempt}...");
        let _ = self.out.flush();
    }

    fn attempt_failed(&mut self, _attempt: u32, error: &dyn Error) {
        let _ = writeln!(self.out, "Error: {error}");
    }

    fn retry_scheduled(&mut self, _attempt: u32, _delay: Duration) {
        let _ = writeln!(self.out, "Retrying...\n");
        let _ = self.out.flush();
    }
}
