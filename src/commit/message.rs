// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use crate::config::ParserOptions;
use crate::error::{CmlintError, CommitError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Conventional header: `type(scope)!: subject`.
    static ref HEADER_REGEX: Regex = Regex::new(
        r"^(?P<type>\w*)(?:\((?P<scope>[^()\r\n]*)\))?(?P<breaking>!)?: (?P<subject>.*)$"
    ).unwrap();

    /// Git trailers that open the footer.
    static ref TRAILER_REGEX: Regex = Regex::new(concat!(
        r"(?i)^(?:signed-off-by|co-authored-by|reviewed-by|acked-by|tested-by|reported-by",
        r"|refs?|see-also|change-id): "
    ))
    .unwrap();

    /// Git's scissors line; everything below it is discarded.
    static ref SCISSORS_REGEX: Regex = Regex::new(r"^# -+ >8 -+$").unwrap();
}

/// An issue reference found in the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Action keyword preceding the reference, e.g. `Closes`.
    pub action: Option<String>,
    /// The matched issue prefix, e.g. `#` or `PROJ-`.
    pub prefix: String,
    /// The issue identifier after the prefix.
    pub issue: String,
    /// The full matched text.
    pub raw: String,
}

/// A footer note such as `BREAKING CHANGE: ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub text: String,
}

/// A parsed commit message.
///
/// Header fields are `None` when the header does not follow the
/// conventional format; rules decide whether that is a problem.
#[derive(Debug, Clone)]
pub struct CommitMessage {
    /// Message text after comment stripping.
    pub raw: String,
    /// First line.
    pub header: String,
    /// Commit type (feat, fix, etc.).
    pub commit_type: Option<String>,
    /// Optional scope.
    pub scope: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Optional body.
    pub body: Option<String>,
    /// Optional footer (references, breaking changes, trailers).
    pub footer: Option<String>,
    /// Issue references across the whole message.
    pub references: Vec<Reference>,
    /// Footer notes.
    pub notes: Vec<Note>,
    /// Whether this is a breaking change.
    pub is_breaking: bool,
    lines: Vec<String>,
    body_start: Option<usize>,
    footer_start: Option<usize>,
}

impl CommitMessage {
    /// Parse a commit message using the given parser options.
    pub fn parse(message: &str, options: &ParserOptions) -> Result<Self> {
        let lines = clean_lines(message);

        if lines.is_empty() {
            return Err(CmlintError::Commit(CommitError::EmptyMessage));
        }

        let header = lines[0].clone();
        let (commit_type, scope, subject, header_breaking) = parse_header(&header);

        let references_pattern = reference_regex(options);
        let footer_start = (1..lines.len())
            .find(|&i| starts_footer(&lines[i], options, references_pattern.as_ref()));
        let body_end = footer_start.unwrap_or(lines.len());
        let body_start = (1..body_end).find(|&i| !lines[i].trim().is_empty());

        let body = body_start.and_then(|start| join_section(&lines[start..body_end]));
        let footer = footer_start.and_then(|start| join_section(&lines[start..]));

        let notes = footer
            .as_deref()
            .map(|f| parse_notes(f, options))
            .unwrap_or_default();

        let raw = lines.join("\n");
        let references = parse_references(&raw, references_pattern.as_ref());
        let is_breaking = header_breaking || !notes.is_empty();

        Ok(Self {
            raw,
            header,
            commit_type,
            scope,
            subject,
            body,
            footer,
            references,
            notes,
            is_breaking,
            lines,
            body_start,
            footer_start,
        })
    }

    /// The message git records for a commit with no text.
    ///
    /// Every section is absent, so emptiness rules report it.
    pub fn empty() -> Self {
        Self {
            raw: String::new(),
            header: String::new(),
            commit_type: None,
            scope: None,
            subject: None,
            body: None,
            footer: None,
            references: Vec::new(),
            notes: Vec::new(),
            is_breaking: false,
            lines: vec![String::new()],
            body_start: None,
            footer_start: None,
        }
    }

    /// Parse with the default parser options.
    pub fn parse_default(message: &str) -> Result<Self> {
        Self::parse(message, &ParserOptions::default())
    }

    /// The cleaned message split into lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the body is separated from the header by a blank line.
    ///
    /// True when there is no body.
    pub fn body_leading_blank(&self) -> bool {
        match self.body_start {
            Some(start) => is_blank(&self.lines[start - 1]),
            None => true,
        }
    }

    /// Whether the footer is preceded by a blank line.
    ///
    /// True when there is no footer.
    pub fn footer_leading_blank(&self) -> bool {
        match self.footer_start {
            Some(start) => is_blank(&self.lines[start - 1]),
            None => true,
        }
    }
}

/// Message text without git comment lines or anything below a scissors line.
pub fn strip_comments(message: &str) -> String {
    clean_lines(message).join("\n")
}

/// Drop git comment lines and everything below a scissors line, then trim
/// surrounding blank lines.
fn clean_lines(message: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for line in message.lines() {
        if SCISSORS_REGEX.is_match(line) {
            break;
        }
        if line.starts_with('#') {
            continue;
        }
        lines.push(line.trim_end_matches('\r').to_string());
    }

    while lines.last().is_some_and(|l| is_blank(l)) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| is_blank(l)).count();
    lines.drain(..leading);

    lines
}

fn parse_header(header: &str) -> (Option<String>, Option<String>, Option<String>, bool) {
    match HEADER_REGEX.captures(header) {
        Some(captures) => {
            let non_empty = |name: &str| {
                captures
                    .name(name)
                    .map(|m| m.as_str().to_string())
                    .filter(|s| !s.is_empty())
            };
            (
                non_empty("type"),
                non_empty("scope"),
                non_empty("subject"),
                captures.name("breaking").is_some(),
            )
        }
        None => (None, None, None, false),
    }
}

fn join_section(lines: &[String]) -> Option<String> {
    let text = lines.join("\n");
    let trimmed = text.trim_matches(|c: char| c == '\n' || c == ' ');
    if trimmed.trim().is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_notes(footer: &str, options: &ParserOptions) -> Vec<Note> {
    let mut notes = Vec::new();

    for line in footer.lines() {
        for keyword in options.note_keywords() {
            if let Some(rest) = line.strip_prefix(keyword) {
                if let Some(text) = rest.strip_prefix(':') {
                    notes.push(Note {
                        title: keyword.to_string(),
                        text: text.trim().to_string(),
                    });
                    break;
                }
            }
        }
    }

    notes
}

/// Reference pattern built from the configured prefixes and actions.
fn reference_regex(options: &ParserOptions) -> Option<Regex> {
    let prefixes = options
        .issue_prefixes()
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>();
    if prefixes.is_empty() {
        return None;
    }

    let actions = options
        .reference_actions()
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");

    let pattern = format!(
        r"(?:\b(?P<action>(?i:{}))\s+)?(?P<prefix>{})(?P<issue>[\w-]*\d+)",
        actions,
        prefixes.join("|")
    );

    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!("Invalid reference pattern: {}", e);
            None
        }
    }
}

/// A footer opens at a note, a known git trailer, or a line led by an
/// action reference such as `Closes #12`.
fn starts_footer(line: &str, options: &ParserOptions, references: Option<&Regex>) -> bool {
    let is_note = options
        .note_keywords()
        .into_iter()
        .any(|keyword| line.strip_prefix(keyword).is_some_and(|rest| rest.starts_with(':')));
    if is_note || TRAILER_REGEX.is_match(line) {
        return true;
    }

    let Some(captures) = references.and_then(|regex| regex.captures(line)) else {
        return false;
    };
    captures.name("action").is_some_and(|action| action.start() == 0)
}

fn parse_references(text: &str, regex: Option<&Regex>) -> Vec<Reference> {
    let Some(regex) = regex else {
        return Vec::new();
    };

    regex
        .captures_iter(text)
        .map(|c| Reference {
            action: c.name("action").map(|m| m.as_str().to_string()),
            prefix: c["prefix"].to_string(),
            issue: c["issue"].to_string(),
            raw: c[0].to_string(),
        })
        .collect()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_options() -> ParserOptions {
        ParserOptions::with_issue_prefixes(["#", "PROJ-"])
    }

    #[test]
    fn test_parse_header() {
        let msg = CommitMessage::parse_default("feat(core): add new feature").unwrap();
        assert_eq!(msg.commit_type.as_deref(), Some("feat"));
        assert_eq!(msg.scope.as_deref(), Some("core"));
        assert_eq!(msg.subject.as_deref(), Some("add new feature"));
        assert!(msg.body.is_none());
        assert!(msg.footer.is_none());
        assert!(!msg.is_breaking);
    }

    #[test]
    fn test_parse_breaking_header() {
        let msg = CommitMessage::parse_default("feat!: drop legacy api").unwrap();
        assert!(msg.is_breaking);
        assert_eq!(msg.commit_type.as_deref(), Some("feat"));
    }

    #[test]
    fn test_parse_non_conventional_header() {
        let msg = CommitMessage::parse_default("just some text").unwrap();
        assert!(msg.commit_type.is_none());
        assert!(msg.subject.is_none());
        assert_eq!(msg.header, "just some text");
    }

    #[test]
    fn test_parse_empty_message() {
        assert!(matches!(
            CommitMessage::parse_default("\n# comment only\n\n"),
            Err(CmlintError::Commit(CommitError::EmptyMessage))
        ));
    }

    #[test]
    fn test_parse_body_and_footer() {
        let text = "fix(api): handle timeouts\n\nRetry once before giving up.\nLog the failure.\n\nCloses #42\nRefs: PROJ-7";
        let msg = CommitMessage::parse(text, &project_options()).unwrap();

        assert_eq!(
            msg.body.as_deref(),
            Some("Retry once before giving up.\nLog the failure.")
        );
        assert_eq!(msg.footer.as_deref(), Some("Closes #42\nRefs: PROJ-7"));
        assert!(msg.body_leading_blank());
        assert!(msg.footer_leading_blank());

        assert_eq!(msg.references.len(), 2);
        assert_eq!(msg.references[0].action.as_deref(), Some("Closes"));
        assert_eq!(msg.references[0].prefix, "#");
        assert_eq!(msg.references[0].issue, "42");
        assert_eq!(msg.references[1].prefix, "PROJ-");
        assert_eq!(msg.references[1].issue, "7");
    }

    #[test]
    fn test_missing_leading_blanks() {
        let msg = CommitMessage::parse_default("fix: a\nbody line\nSigned-off-by: Dev <d@x>").unwrap();
        assert_eq!(msg.body.as_deref(), Some("body line"));
        assert!(!msg.body_leading_blank());
        assert!(!msg.footer_leading_blank());
    }

    #[test]
    fn test_colon_in_body_is_not_footer() {
        let text = "fix(api): handle timeouts\n\nRetry once before giving up.\nReason: the upstream service flakes.";
        let msg = CommitMessage::parse(text, &project_options()).unwrap();
        assert!(msg.footer.is_none());
        assert_eq!(
            msg.body.as_deref(),
            Some("Retry once before giving up.\nReason: the upstream service flakes.")
        );
        assert!(msg.footer_leading_blank());
    }

    #[test]
    fn test_mid_line_reference_stays_in_body() {
        let text = "fix: retry\n\nThis fixes #12 by retrying.";
        let msg = CommitMessage::parse(text, &project_options()).unwrap();
        assert!(msg.footer.is_none());
        assert_eq!(msg.references.len(), 1);
        assert_eq!(msg.references[0].action.as_deref(), Some("fixes"));
    }

    #[test]
    fn test_footer_opens_at_note_or_action_reference() {
        let msg = CommitMessage::parse_default("feat: x\n\nbody\n\nresolves #3").unwrap();
        assert_eq!(msg.footer.as_deref(), Some("resolves #3"));

        let msg = CommitMessage::parse_default("feat: x\n\nbody\n\nBREAKING-CHANGE: gone").unwrap();
        assert_eq!(msg.footer.as_deref(), Some("BREAKING-CHANGE: gone"));
        assert!(msg.is_breaking);
    }

    #[test]
    fn test_breaking_change_note() {
        let msg =
            CommitMessage::parse_default("feat: new config\n\nBREAKING CHANGE: old keys removed")
                .unwrap();
        assert!(msg.is_breaking);
        assert!(msg.body.is_none());
        assert_eq!(msg.notes.len(), 1);
        assert_eq!(msg.notes[0].title, "BREAKING CHANGE");
        assert_eq!(msg.notes[0].text, "old keys removed");
    }

    #[test]
    fn test_strips_comments_and_scissors() {
        let text = "docs: update readme\n# Please enter the commit message\n\n# ------------------------ >8 ------------------------\ndiff --git a b";
        let msg = CommitMessage::parse_default(text).unwrap();
        assert_eq!(msg.raw, "docs: update readme");
        assert!(msg.body.is_none());
    }

    #[test]
    fn test_reference_prefix_only_when_configured() {
        let msg = CommitMessage::parse_default("fix: thing\n\nSee PROJ-12").unwrap();
        assert!(msg.references.is_empty());

        let msg = CommitMessage::parse("fix: thing\n\nSee PROJ-12", &project_options()).unwrap();
        assert_eq!(msg.references.len(), 1);
        assert!(msg.references[0].action.is_none());
    }
}
