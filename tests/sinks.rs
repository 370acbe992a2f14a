use env_report::host::{Host, ResolvedHost};
use env_report::reporter::{EnvironmentReporter, Outcome};
use env_report::sink::{
    escape_command_data, ActionsFailure, FailureSink, LineSink, PlainFailure, PlainLog,
};
use env_report::snapshot::EnvSnapshot;
use std::ffi::OsStr;
use std::io::{self, Write};

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_plain_log_writes_lines_verbatim() {
    let mut log = PlainLog::new(Vec::new());
    log.info("PATH=/usr/bin:/bin").unwrap();
    log.info("HOME=/root").unwrap();
    log.info("COLOR=\u{1b}[31mred").unwrap();

    let out = String::from_utf8(log.into_inner()).unwrap();
    assert_eq!(out, "PATH=/usr/bin:/bin\nHOME=/root\nCOLOR=\u{1b}[31mred\n");
}

#[test]
fn test_actions_failure_writes_error_command() {
    let mut failure = ActionsFailure::new(Vec::new());
    assert!(!failure.failed());

    failure.report("Failure: disk 100% full\nretry later");

    assert!(failure.failed());
    let out = String::from_utf8(failure.into_inner()).unwrap();
    assert_eq!(out, "::error::Failure: disk 100%25 full%0Aretry later\n");
}

#[test]
fn test_escape_command_data() {
    assert_eq!(escape_command_data("plain"), "plain");
    assert_eq!(escape_command_data("a%b\r\nc"), "a%25b%0D%0Ac");
}

#[test]
fn test_broken_log_output_fails_the_run() {
    let snapshot = EnvSnapshot::from_pairs([("A", "1")]).unwrap();
    let mut reporter =
        EnvironmentReporter::new(PlainLog::new(BrokenPipe), ActionsFailure::new(Vec::new()));

    let outcome = reporter.report(&snapshot);

    match outcome {
        Outcome::Failed { message } => {
            assert!(message.starts_with("Failure: failed to write log line"));
            assert!(message.contains("pipe closed"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    let (_, failure) = reporter.into_sinks();
    assert!(failure.failed());
    let out = String::from_utf8(failure.into_inner()).unwrap();
    assert!(out.starts_with("::error::Failure: "));
}

#[test]
fn test_broken_failure_output_does_not_panic() {
    let mut failure = ActionsFailure::new(BrokenPipe);
    failure.report("Failure: anything");
    assert!(failure.failed());
}

#[test]
fn test_plain_failure_writes_message() {
    let mut failure = PlainFailure::new(Vec::new());
    assert!(!failure.failed());

    failure.report("Failure: disk 100% full");

    assert!(failure.failed());
    let out = String::from_utf8(failure.into_inner()).unwrap();
    assert_eq!(out, "Failure: disk 100% full\n");
}

#[test]
fn test_host_resolution() {
    assert_eq!(Host::Auto.resolve(Some(OsStr::new("true"))), ResolvedHost::Actions);
    assert_eq!(Host::Auto.resolve(Some(OsStr::new("false"))), ResolvedHost::Local);
    assert_eq!(Host::Auto.resolve(None), ResolvedHost::Local);
    assert_eq!(Host::Local.resolve(Some(OsStr::new("true"))), ResolvedHost::Local);
    assert_eq!(Host::Actions.resolve(None), ResolvedHost::Actions);
}
