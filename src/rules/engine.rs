// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use crate::commit::{strip_comments, CommitMessage};
use crate::config::{ConfigDocument, Severity};
use crate::error::{CmlintError, CommitError, Result};
use crate::git;
use lazy_static::lazy_static;
use regex::Regex;

use super::builtin::{find_rule, Rule};
use super::report::{LintIssue, LintReport};

lazy_static! {
    /// Messages generated by git tooling that are never linted.
    static ref IGNORED_MESSAGES: Vec<Regex> = [
        r"(?m)^((Merge pull request)|(Merge (.*?) into (.*?)|(Merge branch (.*?)))(?:\r?\n)*$)",
        r"(?m)^(Merge tag (.*?))(?:\r?\n)*$",
        r"^(R|r)evert (.*)",
        r"^(amend|fixup|squash)!",
        r"^(Merged (.*?)(in|into) (.*)|Merged PR (.*): (.*))",
        r"^Merge remote-tracking branch(\s*)(.*)",
        r"^Automatic merge(.*)",
        r"^Auto-merged (.*?) into (.*)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
}

/// Whether a message is exempt from linting.
///
/// Git comment lines are dropped first, so the template git writes for
/// `git merge` is recognised.
pub fn is_ignored(message: &str) -> bool {
    let message = strip_comments(message);
    IGNORED_MESSAGES.iter().any(|regex| regex.is_match(&message))
}

/// Rule engine for validating commit messages.
#[derive(Debug)]
pub struct RuleEngine {
    config: ConfigDocument,
}

impl RuleEngine {
    /// Create a new rule engine for a resolved rule document.
    pub fn new(config: ConfigDocument) -> Self {
        Self { config }
    }

    /// Help link to show when linting fails.
    pub fn help_url(&self) -> Option<&str> {
        self.config.help_url.as_deref()
    }

    /// Lint a raw commit message.
    pub fn lint(&self, message: &str) -> Result<LintReport> {
        if is_ignored(message) {
            tracing::debug!("Ignoring message: {:?}", message.lines().next());
            let mut report = LintReport::new(message.trim());
            report.ignored = true;
            return Ok(report);
        }

        let parsed = CommitMessage::parse(message, self.config.parser_options())?;
        Ok(self.lint_message(&parsed))
    }

    /// Apply every enabled rule to a parsed message.
    pub fn lint_message(&self, message: &CommitMessage) -> LintReport {
        let mut report = LintReport::new(message.raw.clone());

        for (name, entry) in &self.config.rules {
            if !entry.is_enabled() {
                continue;
            }

            let Some(rule) = find_rule(name) else {
                tracing::warn!("Unknown rule '{}' skipped", name);
                continue;
            };

            let outcome = rule.check(message, entry.applicability, entry.parameter.as_ref());
            tracing::debug!("{}: valid={}", name, outcome.valid);
            if outcome.valid {
                continue;
            }

            let issue = LintIssue {
                rule: name.clone(),
                severity: entry.severity,
                message: outcome.message,
            };
            match entry.severity {
                Severity::Error => report.errors.push(issue),
                Severity::Warn => report.warnings.push(issue),
                Severity::Off => {}
            }
        }

        report
    }

    /// Lint the message of a recorded commit.
    ///
    /// A commit without text is reported against the emptiness rules
    /// instead of failing.
    fn lint_recorded(&self, sha: String, message: &str) -> Result<LintReport> {
        let mut report = match self.lint(message) {
            Err(CmlintError::Commit(CommitError::EmptyMessage)) => {
                tracing::debug!("Commit {} has an empty message", sha);
                self.lint_message(&CommitMessage::empty())
            }
            other => other?,
        };
        report.commit_sha = Some(sha);
        Ok(report)
    }

    /// Lint a specific commit by reference.
    pub fn check_commit(&self, reference: &str) -> Result<LintReport> {
        let (sha, message) = git::get_commit(reference)?;
        self.lint_recorded(sha, &message)
    }

    /// Lint every commit in `from..to`.
    pub fn check_range(&self, from: &str, to: &str) -> Result<Vec<LintReport>> {
        self.lint_history(git::get_commit_range(from, to)?)
    }

    /// Lint `(sha, message)` pairs in order.
    pub fn lint_history(&self, commits: Vec<(String, String)>) -> Result<Vec<LintReport>> {
        commits
            .into_iter()
            .map(|(sha, message)| self.lint_recorded(sha, &message))
            .collect()
    }
}
