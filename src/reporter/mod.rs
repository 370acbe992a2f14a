use anyhow::Result;
use tracing::debug;

use crate::sink::{FailureSink, LineSink};
use crate::snapshot::EnvSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded { lines: usize },
    Failed { message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }
}

pub fn format_line(name: &str, value: &str) -> String {
    format!("{}={}", name, value)
}

pub fn failure_message(err: &anyhow::Error) -> String {
    format!("Failure: {:#}", err)
}

pub struct EnvironmentReporter<L, F> {
    lines: L,
    failures: F,
}

impl<L: LineSink, F: FailureSink> EnvironmentReporter<L, F> {
    pub fn new(lines: L, failures: F) -> Self {
        Self { lines, failures }
    }

    pub fn into_sinks(self) -> (L, F) {
        (self.lines, self.failures)
    }

    /// Writes one `NAME=VALUE` line per entry. Stops at the first sink error;
    /// lines already written stay written.
    pub fn emit(&mut self, snapshot: &EnvSnapshot) -> Result<usize> {
        let mut written = 0;
        for (name, value) in snapshot {
            self.lines.info(&format_line(name, value))?;
            written += 1;
        }
        Ok(written)
    }

    pub fn report(&mut self, snapshot: &EnvSnapshot) -> Outcome {
        let result = self.emit(snapshot);
        self.settle(result)
    }

    pub fn report_from<G>(&mut self, obtain: G) -> Outcome
    where
        G: FnOnce() -> Result<EnvSnapshot>,
    {
        let result = obtain().and_then(|snapshot| self.emit(&snapshot));
        self.settle(result)
    }

    fn settle(&mut self, result: Result<usize>) -> Outcome {
        match result {
            Ok(lines) => {
                debug!("Reported {} environment variables", lines);
                Outcome::Succeeded { lines }
            }
            Err(e) => {
                let message = failure_message(&e);
                self.failures.report(&message);
                Outcome::Failed { message }
            }
        }
    }
}
