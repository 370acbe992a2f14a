use anyhow::{Context, Result};
use std::io::Write;
use tracing::error;

pub trait LineSink {
    fn info(&mut self, text: &str) -> Result<()>;
}

/// Last-resort channel for a failed run. Delivery problems are logged, not
/// returned, since there is nowhere left to send them.
pub trait FailureSink {
    fn report(&mut self, text: &str);
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn info(&mut self, text: &str) -> Result<()> {
        (**self).info(text)
    }
}

impl<T: FailureSink + ?Sized> FailureSink for &mut T {
    fn report(&mut self, text: &str) {
        (**self).report(text)
    }
}

/// Writes each line verbatim. Both hosts read the step log from stdout.
pub struct PlainLog<W: Write> {
    out: W,
}

impl<W: Write> PlainLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LineSink for PlainLog<W> {
    fn info(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text).context("failed to write log line")?;
        self.out.flush().context("failed to flush log output")?;
        Ok(())
    }
}

/// Emits `::error::` workflow commands, which annotate the step as failed.
pub struct ActionsFailure<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> ActionsFailure<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FailureSink for ActionsFailure<W> {
    fn report(&mut self, text: &str) {
        self.failed = true;

        let command = format!("::error::{}", escape_command_data(text));
        let written = writeln!(self.out, "{}", command).and_then(|_| self.out.flush());
        if let Err(e) = written {
            error!("Could not deliver failure command ({}): {}", e, text);
        }
    }
}

/// Escapes a workflow command payload so it stays on a single line.
pub fn escape_command_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Writes the failure message as a plain line, for runs outside a CI runner.
pub struct PlainFailure<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> PlainFailure<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FailureSink for PlainFailure<W> {
    fn report(&mut self, text: &str) {
        self.failed = true;

        let written = writeln!(self.out, "{}", text).and_then(|_| self.out.flush());
        if let Err(e) = written {
            error!("Could not deliver failure message ({}): {}", e, text);
        }
    }
}
