use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use genea::{
    config::{GeneaConfig, OutputFormat},
    reports::{QueryReport, ReportGenerator},
    FileSnapshotSource, Genea,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "genea")]
#[command(about = "Ancestry queries over a genealogical record snapshot")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Snapshot document to load (overrides configuration)
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Log level (overrides configuration)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the root people of the snapshot
    Roots,

    /// Show a person and their immediate relations
    Person {
        /// Person id
        id: String,
    },

    /// List every ancestral partnership and ancestor of a person
    Ancestors {
        /// Person id
        id: String,
    },

    /// Find the closest partnerships shared by two people
    Common {
        /// First person id
        first: String,
        /// Second person id
        second: String,
    },

    /// Check whether one person descends from another
    Descends {
        /// Descendant person id
        descendant: String,
        /// Ancestor person id
        ancestor: String,
    },

    /// Show record counts for the snapshot
    Stats,

    /// Initialize configuration file
    Init {
        /// Configuration file path
        #[arg(short, long, default_value = "genea.yml")]
        config_file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref()).await?;
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_tracing(&log_level)?;

    debug!("Effective configuration: {:?}", config);

    if let Commands::Init { config_file, force } = &cli.command {
        return init_config(config_file, *force).await;
    }

    let snapshot_path = cli
        .snapshot
        .clone()
        .or_else(|| config.snapshot.path.clone())
        .context("No snapshot given; pass --snapshot or set snapshot.path in the configuration")?;
    let format = cli.format.unwrap_or(config.output.format);

    let genea = Genea::new();
    let source = FileSnapshotSource::new(&snapshot_path);
    genea
        .populate_from(&source)
        .await
        .with_context(|| format!("Failed to load snapshot from {:?}", snapshot_path))?;

    let report = run_query(&genea, &cli.command)?;
    let output = ReportGenerator::new().generate(&report, format)?;
    print!("{}", output);

    Ok(())
}

/// Initialize tracing with the specified log level
fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))
        .context("Failed to create env filter")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(env_filter)
        .init();

    Ok(())
}

/// Defaults, overlaid by the configuration file, overlaid by the environment
async fn load_config(config_path: Option<&PathBuf>) -> Result<GeneaConfig> {
    let mut config = GeneaConfig::default();

    if let Some(path) = config_path {
        if path.exists() {
            let from_file = GeneaConfig::load_from_file(path)
                .await
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            config.merge_with(from_file);
        } else {
            eprintln!("Configuration file not found: {:?}. Using defaults.", path);
        }
    }

    let overrides = GeneaConfig::load_from_env().context("Invalid environment configuration")?;
    config.apply_overrides(overrides);
    config.validate()?;

    Ok(config)
}

fn run_query(genea: &Genea, command: &Commands) -> Result<QueryReport> {
    let report = match command {
        Commands::Roots => QueryReport::roots(genea)?,
        Commands::Person { id } => QueryReport::person(&genea.person(id)?)?,
        Commands::Ancestors { id } => {
            info!("Collecting ancestors of {}", id);
            QueryReport::ancestors(&genea.person(id)?)?
        }
        Commands::Common { first, second } => {
            info!("Searching common ancestry of {} and {}", first, second);
            QueryReport::common(&genea.person(first)?, &genea.person(second)?)?
        }
        Commands::Descends {
            descendant,
            ancestor,
        } => QueryReport::descends(&genea.person(descendant)?, &genea.person(ancestor)?)?,
        Commands::Stats => QueryReport::statistics(genea)?,
        Commands::Init { .. } => anyhow::bail!("init does not query the snapshot"),
    };
    Ok(report)
}

/// Write a default configuration file
async fn init_config(config_file: &Path, force: bool) -> Result<()> {
    info!("Initializing configuration file: {:?}", config_file);

    if config_file.exists() && !force {
        warn!("Configuration file already exists: {:?}", config_file);
        anyhow::bail!(
            "config already exists at {} (use --force to overwrite)",
            config_file.display()
        );
    }

    GeneaConfig::default()
        .save_to_file(config_file)
        .await
        .with_context(|| format!("Failed to write configuration file: {:?}", config_file))?;

    info!("Configuration file created successfully: {:?}", config_file);
    println!("Configuration file created: {:?}", config_file);

    Ok(())
}
