use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use outguard_check::addr::IdentPolicy;
use outguard_core::{config, loader, orchestrator};
use outguard_diagnostics::report;

/// Build a long version string: "0.2.0 (abc12345)"
fn long_version() -> &'static str {
    // Use Box::leak to get a 'static str — fine for a one-time allocation
    let s = format!("{} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH"));
    Box::leak(s.into_boxed_str())
}

#[derive(Parser)]
#[command(name = "outguard")]
#[command(about = "Out-parameter checker for Go — flags call sites that forget '&'")]
#[command(version, long_version = long_version())]
struct Cli {
    /// JSON rule configuration, or '@' followed by the path of a JSON file
    /// (e.g. '{"encoding/json.Unmarshal": [1]}' or @rules.json)
    #[arg(short, long, default_value = "")]
    config: String,

    /// Also accept identifiers whose static type is a pointer
    #[arg(long)]
    accept_pointer_idents: bool,

    /// Unit files emitted by the front-end bridge, or directories scanned
    /// recursively for *.json
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Log to stderr so stdout stays clean for violation output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let rules = config::load_rules(&cli.config)?;
    let units = loader::load_units(&cli.paths)?;

    let policy = if cli.accept_pointer_idents {
        IdentPolicy::AcceptPointerTyped
    } else {
        IdentPolicy::TraceAssignment
    };

    let output = orchestrator::analyze_units(&units, &rules, policy);
    tracing::debug!(
        units = output.summary.units_analyzed,
        skipped = output.summary.units_skipped,
        violations = output.summary.total,
        "analysis complete"
    );

    if output.violations.is_empty() {
        return Ok(());
    }

    let mut violations = output.violations;
    print!("{}", report::render(&mut violations));
    anyhow::bail!("{}", report::summary_message(violations.len()))
}
