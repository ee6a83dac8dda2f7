use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::LevelFilter;
use webfuzz::{run_checks, CheckRegistry, Report, RunOptions};

mod http_driver;
mod reporters;
mod settings;

use http_driver::{HttpSession, SessionAuth};
use reporters::ReporterKind;

#[derive(Parser)]
#[command(name = "webfuzz")]
#[command(about = "Property-based fuzz testing for web applications", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Trials per check
    #[arg(short = 'n', long)]
    num_runs: Option<usize>,

    /// Master seed, for deterministic replay
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run only the named check
    #[arg(long)]
    check: Option<String>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReporterKind::Console)]
    reporter: ReporterKind,

    /// Write the rendered report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Bearer token sent with every request
    #[arg(long)]
    bearer_token: Option<String>,

    /// Cookie header value sent with every request
    #[arg(long)]
    cookie: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Write a starter config file and exit
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    if cli.init {
        let path = Path::new(settings::DEFAULT_CONFIG_FILE);
        settings::init(path)?;
        println!("wrote {}", path.display());
        return Ok(true);
    }

    let explicit = cli.config.is_some();
    let path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(settings::DEFAULT_CONFIG_FILE));
    let mut config = settings::load(&path, explicit)?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
        config = settings::validated(config)?;
    }

    let registry = CheckRegistry::builtin();
    let mut session = HttpSession::with_auth(SessionAuth {
        bearer_token: cli.bearer_token,
        cookie: cli.cookie,
    })?;
    let options = RunOptions {
        seed: cli.seed,
        num_runs: cli.num_runs,
        check: cli.check,
        max_shrink_attempts: None,
    };

    match run_checks(&registry, &mut session, &config, &options).await {
        Ok(report) => {
            emit(cli.reporter, cli.output.as_deref(), &report)?;
            Ok(report.passed())
        }
        Err(fatal) => {
            // The partial report still gets rendered before the abort is
            // surfaced.
            emit(cli.reporter, cli.output.as_deref(), &fatal.report)?;
            Err(anyhow::Error::new(fatal.error).context("run aborted"))
        }
    }
}

fn emit(kind: ReporterKind, output: Option<&Path>, report: &Report) -> Result<()> {
    let rendered = match kind {
        ReporterKind::Console => {
            reporters::console::print(report);
            return Ok(());
        }
        ReporterKind::Json => reporters::json::render(report)?,
        ReporterKind::Html => reporters::html::render(report),
    };

    match output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write report to {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}
