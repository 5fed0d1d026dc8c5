use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use harvest::commands::validators;
use harvest::config::PruneMode;
use harvest::git::SystemGit;
use harvest::sanitize::{CleanupOption, split_pattern_list};
use harvest::ui::DialoguerUI;
use harvest::{commands::*, config::Config, constants, logging, summary::RunSummary};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "harvest")]
#[command(about = "Clone repositories from a manifest and strip them down to plain source trees")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone every active repository listed in a manifest
    Clone {
        /// Manifest file (defaults to `default_csv_file` from the config)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        config: String,

        /// Report what would happen without cloning or deleting anything
        #[arg(long)]
        dry_run: bool,

        /// Execute clones in parallel
        #[arg(short, long)]
        parallel: bool,

        /// Whether the pruning patterns name what to keep or what to delete
        #[arg(long)]
        prune_mode: Option<PruneMode>,

        /// Output the summary in JSON format for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Delete everything in a directory that does not match the kept patterns
    Clean {
        /// Directory to clean
        #[arg(default_value = ".")]
        directory: PathBuf,

        /// Configuration file path
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        config: String,

        /// Report what would be deleted without deleting anything
        #[arg(long)]
        dry_run: bool,

        /// Comma-separated patterns that replace the configured defaults
        #[arg(long)]
        patterns: Option<String>,

        /// Comma-separated cleanup options (logs, temp, custom, none)
        #[arg(long, default_value = "custom")]
        options: String,

        /// Output the summary in JSON format for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Interactive menu (the default when no command is given)
    Menu {
        /// Configuration file path
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Menu {
        config: constants::config::DEFAULT_CONFIG_FILE.to_string(),
    });

    let mut summary = RunSummary::new();

    match command {
        Commands::Clone {
            manifest,
            config,
            dry_run,
            parallel,
            prune_mode,
            json,
        } => {
            validators::validate_manifest_path(&manifest)?;

            let mut config = load_config(&config)?;
            if let Some(mode) = prune_mode {
                config.prune_mode = mode;
            }

            let context = CommandContext {
                dry_run,
                parallel,
                ..build_context(config)
            };
            CloneCommand { manifest }
                .execute(&context, &mut summary)
                .await?;
            ReportCommand { json }.execute(&context, &mut summary).await?;
        }
        Commands::Clean {
            directory,
            config,
            dry_run,
            patterns,
            options,
            json,
        } => {
            let patterns = patterns.map(|p| split_pattern_list(&p));
            validators::validate_clean_directory(&directory)?;
            validators::validate_pattern_override(&patterns)?;
            let options = CleanupOption::parse_list(&options).map_err(|e| anyhow::anyhow!(e))?;

            let config = load_config(&config)?;
            let context = CommandContext {
                dry_run,
                ..build_context(config)
            };
            CleanCommand {
                directory,
                options,
                patterns,
            }
            .execute(&context, &mut summary)
            .await?;
            ReportCommand { json }.execute(&context, &mut summary).await?;
        }
        Commands::Menu { config } => {
            let config = load_config(&config)?;
            let context = build_context(config);
            run_menu(&DialoguerUI, &context, &mut summary).await?;
        }
    }

    Ok(())
}

/// Load the config, start file logging, and report a missing config file
fn load_config(path: &str) -> Result<Config> {
    let (config, missing) = Config::load_or_default(path)?;
    logging::init(&config)?;

    if let Some(warning) = missing {
        tracing::warn!("{warning}");
        eprintln!("{}", format!("Warning: {warning}").yellow());
    }
    tracing::info!("Harvest started with configuration from '{path}'");

    Ok(config)
}

fn build_context(config: Config) -> CommandContext {
    let git = Arc::new(SystemGit::with_timeout(config.command_timeout()));
    CommandContext::new(config, git)
}
