use std::path::PathBuf;

use caliper_cli::commands::{self, GenerateOptions};
use caliper_cli::config::{self, CaliperConfig};
use caliper_core::models::report::DetailLevel;
use clap::{Parser, Subcommand};
use eyre::Result;

#[derive(Parser)]
#[command(name = "caliper")]
#[command(about = "Clinical assessment analysis and narrative report generation")]
struct Cli {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, env = "CALIPER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyse an assessment offline and print the findings
    Analyze {
        /// Assessment JSON file
        input: PathBuf,

        /// brief, standard or detailed
        #[arg(long)]
        level: Option<DetailLevel>,

        /// Print the raw analysis as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Generate the narrative report section by section through Bedrock
    Generate {
        /// Assessment JSON file
        input: PathBuf,

        #[arg(long)]
        level: Option<DetailLevel>,

        #[arg(long, env = "AWS_REGION")]
        region: Option<String>,

        #[arg(long)]
        model_id: Option<String>,

        /// Write the plain-text report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also export the report as DOCX
        #[arg(long)]
        docx: Option<PathBuf>,

        #[arg(long, default_value = "Functional Capacity Report")]
        title: String,
    },
    /// Manage the config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a default config file
    Init {
        #[arg(long)]
        region: Option<String>,

        #[arg(long)]
        model_id: Option<String>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };

    match cli.command {
        Command::Analyze { input, level, json } => {
            let config = config::load_or_default(&config_path)?;
            let assessment = commands::read_assessment(&input)?;
            let text = commands::analyze(&assessment, level.unwrap_or(config.detail_level), json)?;
            println!("{text}");
        }
        Command::Generate {
            input,
            level,
            region,
            model_id,
            output,
            docx,
            title,
        } => {
            let mut config = config::load_or_default(&config_path)?;
            if let Some(region) = region {
                config.region = region;
            }
            if let Some(model_id) = model_id {
                config.model_id = model_id;
            }
            config.validate()?;

            let assessment = commands::read_assessment(&input)?;
            let report = commands::generate(
                &config,
                &assessment,
                GenerateOptions {
                    level: level.unwrap_or(config.detail_level),
                    title: &title,
                    docx: docx.as_deref(),
                },
            )
            .await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, report.to_text())?;
                    tracing::info!(path = %path.display(), "wrote report");
                }
                None => print!("{report}"),
            }
        }
        Command::Config(ConfigCommand::Init {
            region,
            model_id,
            force,
        }) => {
            if config_path.exists() && !force {
                return Err(eyre::eyre!(
                    "config already exists at {} (use --force to overwrite)",
                    config_path.display()
                ));
            }
            let mut config = CaliperConfig::default();
            if let Some(region) = region {
                config.region = region;
            }
            if let Some(model_id) = model_id {
                config.model_id = model_id;
            }
            config::save_config(&config, &config_path)?;
            println!("{}", config_path.display());
        }
        Command::Config(ConfigCommand::Show) => {
            let config = config::load_or_default(&config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
