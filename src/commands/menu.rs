//! Interactive menu
//!
//! A linear loop over four actions. One [`RunSummary`] is shared by every
//! action until the user exits.

use super::{CleanCommand, CloneCommand, Command, CommandContext, ReportCommand};
use crate::sanitize::{CleanupOption, split_pattern_list};
use crate::summary::RunSummary;
use crate::ui::UserInterface;
use anyhow::Result;
use colored::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Clean,
    Clone,
    Report,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [
        MenuAction::Clean,
        MenuAction::Clone,
        MenuAction::Report,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Clean => "Clean files and folders",
            MenuAction::Clone => "Clone repositories from manifest",
            MenuAction::Report => "Generate summary report",
            MenuAction::Exit => "Exit",
        }
    }
}

/// Run the menu until the user picks Exit
///
/// Errors from an action are printed and the loop continues; errors from the
/// interface itself (for example a cancelled prompt) end the menu.
pub async fn run_menu(
    ui: &dyn UserInterface,
    context: &CommandContext,
    summary: &mut RunSummary,
) -> Result<()> {
    let items: Vec<String> = MenuAction::ALL
        .iter()
        .enumerate()
        .map(|(i, action)| format!("{}. {}", i + 1, action.label()))
        .collect();

    loop {
        println!("\n{}", "=== Harvest ===".bold());
        let action = MenuAction::ALL[ui.select("Select an option", &items)?];

        let result = match action {
            MenuAction::Clean => clean_interactively(ui, context, summary).await,
            MenuAction::Clone => clone_interactively(ui, context, summary).await,
            MenuAction::Report => ReportCommand { json: false }.execute(context, summary).await,
            MenuAction::Exit => {
                println!("Exiting the program.");
                return Ok(());
            }
        };

        if let Err(e) = result {
            tracing::error!("{e:#}");
            eprintln!("{}", format!("Error: {e:#}").red());
        }
    }
}

async fn clean_interactively(
    ui: &dyn UserInterface,
    context: &CommandContext,
    summary: &mut RunSummary,
) -> Result<()> {
    let directory = ui.input_with_default(
        "Directory to clean",
        &context.config.clean_directory,
    )?;
    let dry_run = ui.confirm_with_default("Enable dry run mode?", false)?;

    let patterns_input = ui.input("File patterns to keep (comma-separated, empty for defaults)")?;
    let patterns = Some(split_pattern_list(&patterns_input)).filter(|p| !p.is_empty());

    let options_input = ui.input("Cleanup options (logs, temp, custom, none), comma-separated")?;
    let options = CleanupOption::parse_list(&options_input).map_err(|e| anyhow::anyhow!(e))?;

    let command = CleanCommand {
        directory: PathBuf::from(directory.trim()),
        options,
        patterns,
    };
    let context = CommandContext {
        dry_run,
        ..context.clone()
    };
    command.execute(&context, summary).await
}

async fn clone_interactively(
    ui: &dyn UserInterface,
    context: &CommandContext,
    summary: &mut RunSummary,
) -> Result<()> {
    let default_manifest = &context.config.default_csv_file;
    let input = ui.input_with_default("Path to the manifest file", default_manifest)?;
    let manifest = resolve_manifest(input.trim(), default_manifest);

    let dry_run = ui.confirm_with_default("Enable dry run mode?", false)?;
    let parallel = ui.confirm_with_default("Clone in parallel?", false)?;

    let context = CommandContext {
        dry_run,
        parallel,
        ..context.clone()
    };
    CloneCommand {
        manifest: Some(manifest),
    }
    .execute(&context, summary)
    .await
}

/// Fall back to the configured manifest when the given one does not exist
fn resolve_manifest(input: &str, default_manifest: &str) -> PathBuf {
    if input.is_empty() {
        return PathBuf::from(default_manifest);
    }
    let path = Path::new(input);
    if path.exists() {
        return path.to_path_buf();
    }
    tracing::error!(
        "The specified manifest '{}' does not exist. Using default manifest.",
        input
    );
    eprintln!(
        "{}",
        format!("Manifest '{input}' does not exist, using '{default_manifest}'").yellow()
    );
    PathBuf::from(default_manifest)
}
