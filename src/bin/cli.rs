use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tabled::{Table, settings::Style};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tabdrift::{Comparator, DimensionDelta, HistoryTableRow, IntegrityConfig, Severity, TabDriftError, VersionRecord, VersionStore};

#[derive(Parser)]
#[command(name = "tabdrift")]
#[command(about = "Inspect and compare recorded dataset audit versions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding per-source version histories (defaults to ~/.tabdrift/versions)
    #[arg(short, long, env = "TABDRIFT_STORE")]
    store: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List tracked sources
    Sources,

    /// Show the stored version history of a source
    History {
        /// Source identifier (file path, table name, ...)
        source: String,

        /// Output format: table, yaml, json
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// Show the latest stored version of a source
    Latest {
        source: String,

        #[arg(short, long, default_value = "json")]
        output: OutputFormat,
    },

    /// Print overall scores in recorded order
    Trend {
        source: String,
    },

    /// Compare two stored versions of a source (scores only, no drift)
    Diff {
        source: String,

        /// Baseline version id (defaults to the one before --to)
        #[arg(long)]
        from: Option<String>,

        /// Current version id (defaults to the latest)
        #[arg(long)]
        to: Option<String>,

        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Yaml,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("tabdrift=debug,info")
    } else {
        EnvFilter::new("tabdrift=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(e);
            ExitCode::FAILURE
        }
    }
}

fn print_error(err: Box<dyn std::error::Error>) {
    if let Some(TabDriftError::CorruptHistory { source_id, path, reason }) = err.downcast_ref::<TabDriftError>() {
        eprintln!("\n\x1b[31m✗ Corrupt history for '{}'\x1b[0m", source_id);
        eprintln!("  file:   {}", path.display());
        eprintln!("  reason: {}", reason);
        eprintln!("\n\x1b[33mSuggestion:\x1b[0m");
        eprintln!("  Inspect or move the file aside; other sources are unaffected.");
        eprintln!();
        return;
    }

    eprintln!("\x1b[31m✗ Error:\x1b[0m {}", err);
}

fn default_store_root() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let home = dirs::home_dir().ok_or("Could not determine home directory; pass --store or set TABDRIFT_STORE")?;
    Ok(home.join(".tabdrift").join("versions"))
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let root = match cli.store {
        Some(root) => root,
        None => default_store_root()?,
    };
    info!("Using version store at {}", root.display());
    let store = VersionStore::new(root);

    match cli.command {
        Commands::Sources => cmd_sources(&store)?,
        Commands::History { source, output } => cmd_history(&store, &source, output)?,
        Commands::Latest { source, output } => cmd_latest(&store, &source, output)?,
        Commands::Trend { source } => cmd_trend(&store, &source)?,
        Commands::Diff { source, from, to, output } => {
            cmd_diff(&store, &source, from.as_deref(), to.as_deref(), output)?
        }
    }

    Ok(())
}

fn cmd_sources(store: &VersionStore) -> Result<(), Box<dyn std::error::Error>> {
    let sources = store.list_sources()?;
    if sources.is_empty() {
        println!("No sources tracked in {}", store.root().display());
        return Ok(());
    }
    for source in sources {
        println!("{}", source);
    }
    Ok(())
}

fn cmd_history(store: &VersionStore, source: &str, output: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let history = store.load_history(source)?;
    if history.is_empty() {
        println!("No versions stored for '{}'", source);
        return Ok(());
    }

    match output {
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&history)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&history)?),
        OutputFormat::Table => {
            println!("\nVersion history for {}\n", source);
            let mut table = Table::new(HistoryTableRow::from_history(&history));
            table.with(Style::markdown());
            println!("{}", table);
            println!("\n{} version(s)", history.len());
        }
    }
    Ok(())
}

fn cmd_latest(store: &VersionStore, source: &str, output: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let Some(latest) = store.load_latest(source)? else {
        println!("No versions stored for '{}'", source);
        return Ok(());
    };

    match output {
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&latest)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&latest)?),
        OutputFormat::Table => {
            let mut table = Table::new(vec![HistoryTableRow::new(1, &latest)]);
            table.with(Style::markdown());
            println!("{}", table);
        }
    }
    Ok(())
}

fn cmd_trend(store: &VersionStore, source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let trend = store.score_trend(source)?;
    if trend.is_empty() {
        println!("No versions stored for '{}'", source);
        return Ok(());
    }
    let rendered: Vec<String> = trend.iter().map(|s| format!("{:.2}", s)).collect();
    println!("{}", rendered.join(" → "));
    Ok(())
}

fn pick_versions(
    history: &[VersionRecord],
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(VersionRecord, VersionRecord), TabDriftError> {
    let position = |id: &str| {
        history
            .iter()
            .position(|v| v.version_id() == id)
            .ok_or_else(|| TabDriftError::VersionNotFound(id.to_string()))
    };

    let to_idx = match to {
        Some(id) => position(id)?,
        None => history
            .len()
            .checked_sub(1)
            .ok_or_else(|| TabDriftError::VersionNotFound("latest".to_string()))?,
    };
    let from_idx = match from {
        Some(id) => position(id)?,
        None => to_idx
            .checked_sub(1)
            .ok_or_else(|| TabDriftError::VersionNotFound("previous".to_string()))?,
    };

    Ok((history[from_idx].clone(), history[to_idx].clone()))
}

fn cmd_diff(
    store: &VersionStore,
    source: &str,
    from: Option<&str>,
    to: Option<&str>,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let history = store.load_history(source)?;
    if history.len() < 2 && from.is_none() {
        println!("Only {} version(s) stored for '{}', nothing to compare", history.len(), source);
        return Ok(());
    }

    let (previous, current) = pick_versions(&history, from, to)?;
    let comparator = Comparator::new(&IntegrityConfig::default())?;
    let details = comparator.compare_records(&previous, &current);
    let report = &details.report;

    match output {
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(report)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            println!("\nComparison for {}\n", source);
            println!("  Baseline version : {}", report.baseline_version_id.bright_black());
            println!("  Current version  : {}", report.current_version_id.bright_black());
            println!(
                "  Score            : {:.2} → {:.2}  ({:+.4})  {}",
                details.previous_score,
                details.current_score,
                report.score_delta,
                severity_label(report.severity)
            );

            if !report.dimension_deltas.is_empty() {
                println!("\n  Dimensions:");
                for (name, delta) in &report.dimension_deltas {
                    match delta {
                        DimensionDelta::Change(v) => println!("    {:<16} {:+.4}", name, v),
                        DimensionDelta::Unavailable => println!("    {:<16} {}", name, "unavailable".dimmed()),
                    }
                }
            }
            println!("\n  Drift analysis requires row data and is not available for stored versions.");
        }
    }
    Ok(())
}

fn severity_label(severity: Severity) -> String {
    let label = format!("{} {}", severity.symbol(), severity.as_str().to_uppercase());
    match severity {
        Severity::Stable => label.green().bold().to_string(),
        Severity::Minor => label.yellow().bold().to_string(),
        Severity::Moderate => label.bright_red().bold().to_string(),
        Severity::Critical => label.red().bold().to_string(),
    }
}
