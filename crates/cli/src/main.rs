//! `preflightctl` – pre-flight verification harness.
//!
//! Runs the checks declared in a YAML manifest against the local
//! environment, prints a human-readable report (or JSON), and exits 0 only
//! if every check passed – suitable for gating an application launch from
//! a script or CI job.

use clap::{Args, Parser, Subcommand};
use preflight_engine::{manifest, report, ProbeContext};
use std::path::PathBuf;
use std::sync::Arc;

/// Exit code for harness-level configuration errors (the report never
/// existed, as opposed to a report containing failures).
const EXIT_USAGE: i32 = 2;
/// Exit code when the run is interrupted before completing.
const EXIT_INTERRUPTED: i32 = 130;

// ===========================================================================
// CLI definition
// ===========================================================================

#[derive(Parser)]
#[command(
    name = "preflightctl",
    version,
    about = "Run pre-flight environment checks before the app starts",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every check in the manifest (the default when no subcommand is
    /// given).
    Run(RunArgs),

    /// List the checks a manifest declares without running them.
    List {
        /// Path to the suite manifest.
        #[arg(long, default_value = "preflight.yaml")]
        manifest: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Path to the suite manifest.
    #[arg(long, default_value = "preflight.yaml")]
    manifest: PathBuf,

    /// Output the report as JSON instead of human-readable text.
    #[arg(long)]
    json: bool,

    /// Also write the report JSON to this path.
    #[arg(long)]
    out: Option<PathBuf>,
}

// ===========================================================================
// Main
// ===========================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Checks run sequentially on a blocking thread; an interrupt terminates
    // immediately without producing a partial report.
    let code = tokio::select! {
        code = dispatch(cli) => code,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("preflightctl: interrupted, no report produced");
            EXIT_INTERRUPTED
        }
    };
    std::process::exit(code);
}

async fn dispatch(cli: Cli) -> i32 {
    match cli.command {
        Some(Commands::Run(args)) => cmd_run(args).await,
        Some(Commands::List { manifest }) => cmd_list(&manifest),
        None => cmd_run(cli.run).await,
    }
}

// ===========================================================================
// Subcommand implementations
// ===========================================================================

async fn cmd_run(args: RunArgs) -> i32 {
    let loaded = match manifest::load_manifest_file(&args.manifest) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {}", e);
            return EXIT_USAGE;
        }
    };

    if let Some(ref name) = loaded.name {
        tracing::info!(suite = %name, checks = loaded.checks.len(), "starting pre-flight run");
    }

    let ctx = Arc::new(ProbeContext::default_platform());
    let (suite, hints) = manifest::build_suite(&loaded, ctx);

    let json = args.json;
    let joined = tokio::task::spawn_blocking(move || {
        if json {
            // Keep machine output clean: no interleaved progress lines.
            suite.run_all()
        } else {
            let mut stdout = std::io::stdout();
            suite.run_all_with_progress(&mut stdout)
        }
    })
    .await;

    let run_report = match joined {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: check execution failed: {}", e);
            return EXIT_USAGE;
        }
    };

    if args.json {
        let j = serde_json::to_string_pretty(&run_report).unwrap_or_default();
        println!("{}", j);
    } else {
        print!("{}", report::render(&run_report, &hints));
    }

    if let Some(ref path) = args.out {
        let j = serde_json::to_string_pretty(&run_report).unwrap_or_default();
        if let Err(e) = std::fs::write(path, j) {
            eprintln!("warning: failed to write report to {}: {}", path.display(), e);
        }
    }

    report::exit_code(&run_report)
}

fn cmd_list(path: &PathBuf) -> i32 {
    let loaded = match manifest::load_manifest_file(path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {}", e);
            return EXIT_USAGE;
        }
    };

    if let Some(ref name) = loaded.name {
        println!("{}", name);
    }
    for spec in &loaded.checks {
        println!("  {}", spec.display_name());
    }
    0
}
