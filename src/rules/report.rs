// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Lint result types.

use crate::cli::args::OutputFormat;
use crate::config::Severity;
use console::{style, Style};

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Rule name, e.g. `subject-full-stop`.
    pub rule: String,
    /// Level the rule is configured at.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
}

impl LintIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the issue for terminal output.
    pub fn format(&self) -> String {
        let (prefix, code_style) = if self.is_error() {
            (style("✖").red().bold(), Style::new().red())
        } else {
            (style("⚠").yellow().bold(), Style::new().yellow())
        };

        format!(
            "{}   {} {}",
            prefix,
            self.message,
            code_style.apply_to(format!("[{}]", self.rule))
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.rule,
            "level": self.severity.level(),
            "message": self.message,
        })
    }
}

/// Result of linting one commit message.
#[derive(Debug, Clone)]
pub struct LintReport {
    /// The linted message.
    pub input: String,
    /// Commit SHA when linting an existing commit.
    pub commit_sha: Option<String>,
    /// Whether the message matched an ignore pattern and was skipped.
    pub ignored: bool,
    /// Failed error-level rules.
    pub errors: Vec<LintIssue>,
    /// Failed warning-level rules.
    pub warnings: Vec<LintIssue>,
}

impl LintReport {
    /// Create an empty report.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            commit_sha: None,
            ignored: false,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Valid when no error-level rule failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Whether the named rule failed.
    pub fn failed(&self, rule: &str) -> bool {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .any(|issue| issue.rule == rule)
    }

    /// Print the result to stdout.
    pub fn print(&self, format: Option<OutputFormat>, help_url: Option<&str>) {
        match format {
            Some(OutputFormat::Json) => println!(
                "{}",
                serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
            ),
            _ => print!("{}", self.render_text(help_url)),
        }
    }

    /// Render the report as terminal text.
    pub fn render_text(&self, help_url: Option<&str>) -> String {
        let mut output = String::new();
        let header = self.input.lines().next().unwrap_or("");

        match self.commit_sha {
            Some(ref sha) => {
                let short_sha = &sha[..7.min(sha.len())];
                output.push_str(&format!(
                    "{}   input: {} {}\n",
                    style("⧗").dim(),
                    style(short_sha).cyan(),
                    header
                ));
            }
            None => {
                output.push_str(&format!("{}   input: {}\n", style("⧗").dim(), header));
            }
        }

        for issue in self.errors.iter().chain(self.warnings.iter()) {
            output.push_str(&issue.format());
            output.push('\n');
        }

        if self.issue_count() > 0 {
            let status = if self.is_valid() {
                style("⚠").yellow().bold()
            } else {
                style("✖").red().bold()
            };
            output.push('\n');
            output.push_str(&format!(
                "{}   found {} problems, {} warnings\n",
                status,
                self.errors.len(),
                self.warnings.len()
            ));
            if let Some(url) = help_url {
                output.push_str(&format!("{}   Get help: {}\n", style("ⓘ").blue(), url));
            }
        }

        output
    }

    /// Machine-readable form.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "ignored": self.ignored,
            "commit": self.commit_sha,
            "input": self.input,
            "errors": self.errors.iter().map(LintIssue::to_json).collect::<Vec<_>>(),
            "warnings": self.warnings.iter().map(LintIssue::to_json).collect::<Vec<_>>(),
        })
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.ignored {
            "Ignored".to_string()
        } else if self.is_valid() {
            if self.warnings.is_empty() {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", self.warnings.len())
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}
