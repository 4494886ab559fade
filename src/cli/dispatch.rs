// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use crate::config::ConfigDocument;
use crate::error::{CmlintError, CommitError, ConfigError, LintError, Result, ResultExt};
use crate::rules::{LintReport, RuleEngine};

use super::args::{Cli, Commands, HooksAction, HooksArgs, InitArgs, LintArgs, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command.clone() {
        Commands::Lint(args) => run_lint(&cli, load_config(&cli)?, args),
        Commands::PrintConfig => run_print_config(&cli, load_config(&cli)?),
        Commands::Init(args) => run_init(args),
        Commands::Hooks(args) => run_hooks(args),
        Commands::Version => run_version(),
    }
}

fn load_config(cli: &Cli) -> Result<ConfigDocument> {
    match &cli.config {
        Some(path) => ConfigDocument::load_from(path),
        None => ConfigDocument::load(),
    }
}

/// Run the lint command.
fn run_lint(cli: &Cli, config: ConfigDocument, args: LintArgs) -> Result<()> {
    tracing::debug!("Running lint command with args: {:?}", args);

    let engine = RuleEngine::new(config);

    let reports = if let Some(edit) = args.edit {
        let path = edit.unwrap_or_else(crate::git::commit_editmsg_path);
        vec![engine.lint(&read_message_file(&path)?)?]
    } else if let Some(from) = args.from {
        let to = args.to.unwrap_or_else(|| "HEAD".to_string());
        engine.check_range(&from, &to)?
    } else if args.last {
        vec![engine.check_commit("HEAD")?]
    } else if let Some(message) = args.message {
        vec![engine.lint(&message)?]
    } else {
        vec![engine.lint(&read_stdin()?)?]
    };

    let errors: usize = reports.iter().map(|r| r.errors.len()).sum();
    let warnings: usize = reports.iter().map(|r| r.warnings.len()).sum();

    print_reports(&reports, cli.format, engine.help_url());

    if errors > 0 || (args.strict && warnings > 0) {
        Err(CmlintError::Lint(LintError::Failed { errors, warnings }))
    } else {
        Ok(())
    }
}

fn print_reports(reports: &[LintReport], format: Option<OutputFormat>, help_url: Option<&str>) {
    match format {
        Some(OutputFormat::Json) => {
            let json: Vec<_> = reports.iter().map(LintReport::to_json).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
        _ => {
            for report in reports {
                report.print(format, help_url);
            }
        }
    }
}

fn read_message_file(path: &Path) -> Result<String> {
    tracing::debug!("Reading commit message from {:?}", path);
    std::fs::read_to_string(path).map_err(|e| {
        CmlintError::Commit(CommitError::ReadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    })
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(CmlintError::Lint(LintError::NoInput));
    }

    let mut message = String::new();
    stdin.read_to_string(&mut message)?;
    if message.trim().is_empty() {
        return Err(CmlintError::Lint(LintError::NoInput));
    }
    Ok(message)
}

/// Run the print-config command.
fn run_print_config(cli: &Cli, config: ConfigDocument) -> Result<()> {
    let output = match cli.format {
        Some(OutputFormat::Json) => {
            serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?
        }
        _ => toml::to_string_pretty(&config).context("Failed to serialize configuration")?,
    };
    println!("{}", output);
    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::{example_config, example_config_json};

    tracing::debug!("Running init command with args: {:?}", args);

    let (config_path, content) = if args.json {
        (PathBuf::from(".commitlintrc.json"), example_config_json()?)
    } else {
        (PathBuf::from("cmlint.toml"), example_config().to_string())
    };

    if config_path.exists() && !args.force {
        return Err(CmlintError::Config(ConfigError::AlreadyExists { path: config_path }));
    }

    std::fs::write(&config_path, content).map_err(|e| CmlintError::WithContext {
        context: "init".to_string(),
        message: format!("Failed to write configuration: {}", e),
    })?;

    println!("✓ Created {}", config_path.display());

    Ok(())
}

/// Run the hooks command.
fn run_hooks(args: HooksArgs) -> Result<()> {
    use crate::hooks::HookManager;

    tracing::debug!("Running hooks command");

    let manager = HookManager::new()?;

    match args.action {
        HooksAction::Install { hook, force } => {
            if let Some(hook_name) = hook {
                manager.install_hook(&hook_name, force)?;
                println!("✓ Installed {} hook", hook_name);
            } else {
                manager.install_all(force)?;
                println!("✓ Installed all hooks");
            }
        }
        HooksAction::Uninstall { hook } => {
            if let Some(hook_name) = hook {
                manager.uninstall_hook(&hook_name)?;
                println!("✓ Uninstalled {} hook", hook_name);
            } else {
                manager.uninstall_all()?;
                println!("✓ Uninstalled all hooks");
            }
        }
        HooksAction::Status => {
            for (hook, installed) in manager.status() {
                let icon = if installed { "✓" } else { "✗" };
                println!("{} {}", icon, hook);
            }
        }
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("cmlint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}
