//! LearnSphere CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use learnsphere::commands::{format_demo, run_demo};
use learnsphere::output::{format_analysis, format_backlinks, to_json};
use learnsphere::{LearnSphere, OutputFormat, analyze_file, backlinks_in_dir};
use learnsphere_core::{AppConfig, ConfigProfile};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// LearnSphere - markdown study notes with backlinks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML, TOML or JSON) layered over the profile
    #[arg(short, long, env = "LEARNSPHERE_CONFIG_FILE", global = true)]
    config: Option<PathBuf>,

    /// Configuration profile to start from (development, production, testing)
    #[arg(short, long, default_value = "development", global = true)]
    profile: String,

    /// Log output format (human, json)
    #[arg(long, default_value = "human", global = true)]
    log_format: String,

    /// Print results as JSON
    #[arg(long, global = true, action = clap::ArgAction::SetTrue)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summary, tags, outline, references and reading time of a markdown file
    Analyze {
        file: PathBuf,
    },
    /// Notes in a directory that reference `title` as [[title]]
    Backlinks {
        title: String,
        dir: PathBuf,
    },
    /// Sign in as the demo user, list the sample notes and ask the assistant
    Demo,
    /// Print the effective configuration as YAML
    Config,
}

fn init_logging(level: &str, format: OutputFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match format {
        OutputFormat::Json => builder.json().try_init(),
        OutputFormat::Human => builder.try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let profile: ConfigProfile = args.profile.parse()?;
    let config = AppConfig::load_layered(profile.create_config(), args.config.as_deref())
        .context("Failed to load configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_format: OutputFormat = args
        .log_format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let config = load_config(&args)?;
    init_logging(&config.log_level, log_format)?;

    log::info!("LearnSphere v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Profile: {} | Log format: {}", config.profile, log_format);

    let output = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match &args.command {
        Command::Analyze { file } => {
            let analysis = analyze_file(file, &config.documents)
                .with_context(|| format!("Failed to analyze {}", file.display()))?;
            match output {
                OutputFormat::Json => println!("{}", to_json(&analysis)?),
                OutputFormat::Human => {
                    print!("{}", format_analysis(&file.display().to_string(), &analysis))
                }
            }
        }
        Command::Backlinks { title, dir } => {
            let report = backlinks_in_dir(title, dir)
                .with_context(|| format!("Failed to scan {}", dir.display()))?;
            match output {
                OutputFormat::Json => println!("{}", to_json(&report)?),
                OutputFormat::Human => print!("{}", format_backlinks(title, &report.links)),
            }
        }
        Command::Demo => {
            let app = LearnSphere::new(config)?;
            let report = run_demo(&app).await?;
            match output {
                OutputFormat::Json => println!("{}", to_json(&report)?),
                OutputFormat::Human => print!("{}", format_demo(&report)),
            }
        }
        Command::Config => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}
