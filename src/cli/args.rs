// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cmlint - Conventional commit message linter
///
/// Lints commit messages against a declarative rule document.
#[derive(Parser, Debug)]
#[command(name = "cmlint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Conventional commit message linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lint commit messages
    Lint(LintArgs),

    /// Print the resolved rule document
    PrintConfig,

    /// Write a rule document into the current directory
    Init(InitArgs),

    /// Manage git hooks
    Hooks(HooksArgs),

    /// Print version information
    Version,
}

/// Arguments for the lint command.
#[derive(Parser, Debug, Default, Clone)]
pub struct LintArgs {
    /// Read the message from a file (default: .git/COMMIT_EDITMSG)
    #[arg(short, long, value_name = "FILE")]
    #[allow(clippy::option_option)]
    pub edit: Option<Option<PathBuf>>,

    /// Lint commits after this reference
    #[arg(long, value_name = "REF")]
    pub from: Option<String>,

    /// Lint commits up to this reference (default: HEAD)
    #[arg(long, value_name = "REF", requires = "from")]
    pub to: Option<String>,

    /// Lint the last commit
    #[arg(short, long, conflicts_with_all = ["edit", "from"])]
    pub last: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Message to lint (default: read from stdin)
    #[arg(conflicts_with_all = ["edit", "from", "last"])]
    pub message: Option<String>,
}

/// Arguments for the hooks command.
#[derive(Parser, Debug, Clone)]
pub struct HooksArgs {
    /// Hook action to perform
    #[command(subcommand)]
    pub action: HooksAction,
}

/// Hook actions.
#[derive(Subcommand, Debug, Clone)]
pub enum HooksAction {
    /// Install git hooks
    Install {
        /// Specific hook to install
        #[arg(value_name = "HOOK")]
        hook: Option<String>,

        /// Force overwrite existing hooks
        #[arg(short, long)]
        force: bool,
    },

    /// Uninstall git hooks
    Uninstall {
        /// Specific hook to uninstall
        #[arg(value_name = "HOOK")]
        hook: Option<String>,
    },

    /// Show hook status
    Status,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone, Default)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Write .commitlintrc.json instead of cmlint.toml
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lint_edit_default() {
        let args = Cli::parse_from(["cmlint", "lint", "--edit"]);
        match args.command {
            Commands::Lint(lint) => assert_eq!(lint.edit, Some(None)),
            _ => panic!("Expected Lint command"),
        }
    }

    #[test]
    fn test_parse_lint_edit_file() {
        let args = Cli::parse_from(["cmlint", "lint", "--edit", ".git/COMMIT_EDITMSG"]);
        match args.command {
            Commands::Lint(lint) => {
                assert_eq!(lint.edit, Some(Some(PathBuf::from(".git/COMMIT_EDITMSG"))))
            }
            _ => panic!("Expected Lint command"),
        }
    }

    #[test]
    fn test_parse_lint_range() {
        let args = Cli::parse_from(["cmlint", "lint", "--from", "HEAD~3", "--strict"]);
        match args.command {
            Commands::Lint(lint) => {
                assert_eq!(lint.from.as_deref(), Some("HEAD~3"));
                assert!(lint.to.is_none());
                assert!(lint.strict);
            }
            _ => panic!("Expected Lint command"),
        }
    }

    #[test]
    fn test_to_requires_from() {
        assert!(Cli::try_parse_from(["cmlint", "lint", "--to", "HEAD"]).is_err());
    }

    #[test]
    fn test_message_conflicts_with_last() {
        assert!(Cli::try_parse_from(["cmlint", "lint", "--last", "feat: x"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["cmlint", "print-config", "--format", "json", "-c", "x.toml"]);
        assert!(matches!(args.command, Commands::PrintConfig));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_parse_hooks() {
        let args = Cli::parse_from(["cmlint", "hooks", "install", "--force"]);
        assert!(matches!(args.command, Commands::Hooks(_)));
    }
}
