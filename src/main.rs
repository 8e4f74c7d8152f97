//! Rollcall main entry point
//!
//! This is the command-line interface for the rollcall profile enumerator.

use clap::Parser;
use rollcall::auth::{login, Credentials, Session};
use rollcall::config::{load_config, Config, ScanConfig};
use rollcall::ConfigError;
use rollcall::report::{print_statistics, write_reports, ScanStatistics};
use rollcall::scan::run_scan;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the login secret
///
/// The secret deliberately has no CLI flag and no config key: process
/// listings and config files outlive a shell session, the environment of
/// this process does not. It is read once and never printed.
const PASSWORD_ENV: &str = "ROLLCALL_PASSWORD";

/// Rollcall: a concurrent profile enumerator for Moodle-style platforms
///
/// Rollcall walks a numeric range of user-profile IDs over an
/// authenticated session, extracts the visible profile fields, and
/// writes aggregated reports. Scan parameters come from the command
/// line; target, authentication, and output settings come from the TOML
/// configuration file.
#[derive(Parser, Debug)]
#[command(name = "rollcall")]
#[command(version = "0.3.0")]
#[command(about = "A concurrent profile enumerator", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// First user ID to probe (inclusive)
    #[arg(long, default_value_t = 750)]
    start: u32,

    /// Last user ID to probe (inclusive)
    #[arg(long, default_value_t = 1000)]
    end: u32,

    /// Maximum number of profile fetches in flight at once
    #[arg(long, default_value_t = 5)]
    concurrency: usize,

    /// Baseline delay before each request, in seconds
    #[arg(long, default_value_t = 0.5)]
    delay: f64,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let scan = ScanConfig::new(cli.start, cli.end, cli.concurrency, cli.delay)?;

    handle_scan(config, scan).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("rollcall=info,warn"),
            1 => EnvFilter::new("rollcall=debug,info"),
            2 => EnvFilter::new("rollcall=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the authenticated session from the configured mode
///
/// Cookie mode attaches the pre-captured cookie as-is. Login mode reads
/// the account secret from the environment and performs the form login
/// before the scan starts; a rejected login aborts the run.
async fn establish_session(config: &Config) -> anyhow::Result<Session> {
    if let Some(cookie) = &config.auth.session_cookie {
        tracing::info!("Using pre-captured session cookie");
        return Ok(Session::with_cookie(&config.target, cookie)?);
    }

    if let Some(username) = &config.auth.username {
        let secret = std::env::var(PASSWORD_ENV).map_err(|_| {
            ConfigError::MissingCredential(format!(
                "login mode requires the {} environment variable",
                PASSWORD_ENV
            ))
        })?;
        let credentials = Credentials::new(username.clone(), secret);

        tracing::info!("Logging in as {}", username);
        return Ok(login(&config.target, &credentials).await?);
    }

    // Config validation guarantees one mode is set
    anyhow::bail!("no authentication mode configured")
}

/// Handles the main scan operation: authenticate, scan, write reports
async fn handle_scan(config: Config, scan: ScanConfig) -> anyhow::Result<()> {
    let session = establish_session(&config).await?;

    let result = match run_scan(config.target.clone(), scan, session).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Scan failed: {}", e);
            return Err(e.into());
        }
    };

    let run_dir = write_reports(&result, Path::new(&config.output.results_root))?;
    let stats = ScanStatistics::from_result(&result);

    println!();
    print_statistics(&stats);
    println!("\nResults saved in: {}", run_dir.display());
    if result.error_count() > 0 {
        println!(
            "Encountered {} errors. Check errors.log",
            result.error_count()
        );
    }

    Ok(())
}
