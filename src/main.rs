//! lqs-tools: Listing Quality Score engine and snapshot version resolver
//!
//! Scores generated product listings on six weighted dimensions and picks the
//! latest snapshot of each product from a directory of dated files.

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use lqs_tools::{
    cli,
    config::{AppConfig, ConfigPreset},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with scoring info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nScoring dimensions (weight):",
        "\n  Keyword Optimization 0.25, USP Effectiveness 0.20,",
        "\n  Readability 0.15, Competitive Position 0.15,",
        "\n  Customer Alignment 0.15, Compliance 0.10",
        "\n\nOutput Formats:",
        "\n  summary, table, json"
    )
}

#[derive(Parser)]
#[command(name = "lqs-tools")]
#[command(version, long_version = build_long_version())]
#[command(about = "Listing Quality Score engine and snapshot version resolver", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  A listing scored below --min-score
    3  Error occurred

EXAMPLES:
    # Score one listing document
    lqs-tools score B0123ABCDE_2024-03-10.json

    # Score the latest snapshot of every product, fail below 70
    lqs-tools score snapshots/ --min-score 70 -o table

    # Save a batch report and summarize it later
    lqs-tools score snapshots/ -o json -O batch.json
    lqs-tools stats batch.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "LQS_TOOLS_CONFIG")]
    config: Option<PathBuf>,

    /// Start from a named preset (default, ci-cd, audit) before applying the config file
    #[arg(long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `score` subcommand
#[derive(Parser)]
struct ScoreArgs {
    /// Listing documents or directories of snapshots
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if any listing scores below this total
    #[arg(long)]
    min_score: Option<f64>,

    /// Append aggregate statistics to batch reports
    #[arg(long)]
    stats: bool,

    /// List every dimension flag
    #[arg(long)]
    flags: bool,

    /// Score every snapshot in a directory, not only the latest per product
    #[arg(long)]
    all_versions: bool,
}

/// Arguments for the `versions` subcommand
#[derive(Parser)]
struct VersionsArgs {
    /// Directory of listing snapshots
    dir: PathBuf,

    /// Only show the latest version of each product
    #[arg(long)]
    latest_only: bool,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `stats` subcommand
#[derive(Parser)]
struct StatsArgs {
    /// Saved JSON batch report (or list of scores)
    input: PathBuf,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score listing documents
    Score(ScoreArgs),

    /// Show the version history of listing snapshots
    Versions(VersionsArgs),

    /// Aggregate statistics over a saved JSON report
    Stats(StatsArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .lqs-tools.yaml in the current directory
    Init,
}

/// Resolve the effective configuration: preset, then file, then CLI overrides.
fn effective_config(cli: &Cli, overrides: &AppConfig) -> Result<AppConfig> {
    let Some(name) = cli.preset.as_deref() else {
        let (config, _) = AppConfig::from_file_with_overrides(cli.config.as_deref(), overrides);
        return Ok(config);
    };

    let preset = ConfigPreset::parse(name)?;
    let mut config = AppConfig::from_preset(preset);
    let (file_config, loaded_from) = lqs_tools::config::load_or_default(cli.config.as_deref());
    if loaded_from.is_some() {
        config.merge(&file_config);
    }
    config.merge(overrides);
    Ok(config)
}

fn output_overrides(
    cli: &Cli,
    format: Option<ReportFormat>,
    file: Option<PathBuf>,
) -> lqs_tools::config::AppConfigBuilder {
    AppConfig::builder()
        .output_format(format.unwrap_or_default())
        .output_file(file)
        .no_color(cli.no_color)
        .quiet(cli.quiet)
}

fn exit_with(code: i32) -> Result<()> {
    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let result = dispatch(&cli);
    if let Err(e) = &result {
        tracing::error!("{e:#}");
        std::process::exit(exit_codes::ERROR);
    }
    result
}

fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Score(args) => {
            let overrides = output_overrides(cli, args.output, args.output_file.clone())
                .min_score(args.min_score)
                .show_flags(args.flags)
                .include_statistics(args.stats)
                .all_versions(args.all_versions)
                .build();
            let config = effective_config(cli, &overrides)?;
            exit_with(cli::run_score(&args.paths, &config)?)
        }

        Commands::Versions(args) => {
            let overrides = output_overrides(cli, args.output, args.output_file.clone()).build();
            let config = effective_config(cli, &overrides)?;
            exit_with(cli::run_versions(&args.dir, args.latest_only, &config)?)
        }

        Commands::Stats(args) => {
            let overrides = output_overrides(cli, args.output, args.output_file.clone()).build();
            let config = effective_config(cli, &overrides)?;
            exit_with(cli::run_stats(&args.input, &config)?)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "lqs-tools", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = lqs_tools::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = effective_config(cli, &AppConfig::default())?;
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let cwd = std::env::current_dir().ok();
                let search_paths = [
                    cwd.clone(),
                    cwd.as_deref().and_then(lqs_tools::config::file::find_git_root),
                    dirs::config_dir().map(|p| p.join("lqs-tools")),
                    dirs::home_dir(),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.iter().flatten() {
                    eprintln!("  {}", path.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in lqs_tools::config::file::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match lqs_tools::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".lqs-tools.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = lqs_tools::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
