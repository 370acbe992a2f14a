use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use env_report::host::{Host, ResolvedHost};
use env_report::reporter::{EnvironmentReporter, Outcome};
use env_report::sink::{ActionsFailure, PlainFailure, PlainLog};
use env_report::snapshot::EnvSnapshot;

#[derive(Parser)]
#[command(name = "env-report")]
#[command(about = "Print every environment variable of a CI step as NAME=VALUE", long_about = None)]
struct Cli {
    #[arg(long, value_enum, env = "ENV_REPORT_HOST", default_value_t = Host::Auto, help = "Where log lines and failures are sent")]
    host: Host,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let host = cli.host.resolve(std::env::var_os("GITHUB_ACTIONS").as_deref());
    debug!("Reporting environment for host {:?}", host);

    let snapshot = EnvSnapshot::from_process();
    let outcome = match host {
        ResolvedHost::Actions => {
            let mut reporter = EnvironmentReporter::new(
                PlainLog::new(io::stdout()),
                ActionsFailure::new(io::stdout()),
            );
            reporter.report(&snapshot)
        }
        ResolvedHost::Local => {
            let mut reporter = EnvironmentReporter::new(
                PlainLog::new(io::stdout()),
                PlainFailure::new(io::stderr()),
            );
            reporter.report(&snapshot)
        }
    };

    match outcome {
        Outcome::Succeeded { .. } => ExitCode::SUCCESS,
        Outcome::Failed { .. } => ExitCode::FAILURE,
    }
}
