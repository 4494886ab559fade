// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.
//!
//! Each rule receives the parsed message, the entry's applicability and
//! its parameter, and reports whether the message satisfies it. Rules on
//! an absent section (no scope, no body, ...) pass unless the rule is
//! about emptiness itself.

use crate::commit::CommitMessage;
use crate::config::{Applicability, RuleParameter};

use super::case::Case;

/// Outcome of a single rule check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub valid: bool,
    /// Description of what the rule requires.
    pub message: String,
}

impl RuleOutcome {
    pub fn new(valid: bool, message: impl Into<String>) -> Self {
        Self {
            valid,
            message: message.into(),
        }
    }

    fn pass() -> Self {
        Self::new(true, "")
    }
}

/// A named check applied to a parsed message.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Get the rule name.
    fn name(&self) -> &str;

    /// Check the commit message against the rule.
    fn check(
        &self,
        message: &CommitMessage,
        applicability: Applicability,
        parameter: Option<&RuleParameter>,
    ) -> RuleOutcome;
}

/// The parameter shape a rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// No parameter.
    Flag,
    /// A positive integer bound.
    Length,
    /// An optional string.
    Text,
    /// A non-empty list of allowed values.
    Enum,
    /// A case name or list of case names.
    Case,
}

type CheckFn = fn(&CommitMessage, Applicability, Option<&RuleParameter>) -> RuleOutcome;

/// A built-in rule definition.
pub struct RuleDef {
    pub name: &'static str,
    pub kind: RuleKind,
    check: CheckFn,
}

impl std::fmt::Debug for RuleDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Rule for RuleDef {
    fn name(&self) -> &str {
        self.name
    }

    fn check(
        &self,
        message: &CommitMessage,
        applicability: Applicability,
        parameter: Option<&RuleParameter>,
    ) -> RuleOutcome {
        (self.check)(message, applicability, parameter)
    }
}

macro_rules! rule {
    ($name:literal, $kind:ident, $check:expr) => {
        RuleDef {
            name: $name,
            kind: RuleKind::$kind,
            check: $check,
        }
    };
}

/// Message part a generic rule reads.
#[derive(Debug, Clone, Copy)]
enum Section {
    Type,
    Scope,
    Subject,
    Header,
    Body,
    Footer,
}

impl Section {
    fn name(self) -> &'static str {
        match self {
            Section::Type => "type",
            Section::Scope => "scope",
            Section::Subject => "subject",
            Section::Header => "header",
            Section::Body => "body",
            Section::Footer => "footer",
        }
    }

    fn value(self, message: &CommitMessage) -> Option<&str> {
        match self {
            Section::Type => message.commit_type.as_deref(),
            Section::Scope => message.scope.as_deref(),
            Section::Subject => message.subject.as_deref(),
            Section::Header => Some(message.header.as_str()),
            Section::Body => message.body.as_deref(),
            Section::Footer => message.footer.as_deref(),
        }
    }
}

static BUILTIN_RULES: &[RuleDef] = &[
    // Type
    rule!("type-enum", Enum, type_enum),
    rule!("type-case", Case, |m, w, p| case_rule(Section::Type, m, w, p)),
    rule!("type-empty", Flag, |m, w, _| empty_rule(Section::Type, m, w)),
    rule!("type-max-length", Length, |m, _, p| max_length_rule(Section::Type, m, p)),
    rule!("type-min-length", Length, |m, _, p| min_length_rule(Section::Type, m, p)),
    // Scope
    rule!("scope-enum", Enum, scope_enum),
    rule!("scope-case", Case, scope_case),
    rule!("scope-empty", Flag, |m, w, _| empty_rule(Section::Scope, m, w)),
    rule!("scope-max-length", Length, |m, _, p| max_length_rule(Section::Scope, m, p)),
    rule!("scope-min-length", Length, |m, _, p| min_length_rule(Section::Scope, m, p)),
    // Subject
    rule!("subject-case", Case, subject_case),
    rule!("subject-empty", Flag, |m, w, _| empty_rule(Section::Subject, m, w)),
    rule!("subject-full-stop", Text, |m, w, p| full_stop_rule(Section::Subject, m, w, p)),
    rule!("subject-max-length", Length, |m, _, p| max_length_rule(Section::Subject, m, p)),
    rule!("subject-min-length", Length, |m, _, p| min_length_rule(Section::Subject, m, p)),
    rule!("subject-exclamation-mark", Flag, subject_exclamation_mark),
    // Header
    rule!("header-case", Case, |m, w, p| case_rule(Section::Header, m, w, p)),
    rule!("header-full-stop", Text, |m, w, p| full_stop_rule(Section::Header, m, w, p)),
    rule!("header-max-length", Length, |m, _, p| max_length_rule(Section::Header, m, p)),
    rule!("header-min-length", Length, |m, _, p| min_length_rule(Section::Header, m, p)),
    rule!("header-trim", Flag, header_trim),
    // Body
    rule!("body-case", Case, |m, w, p| case_rule(Section::Body, m, w, p)),
    rule!("body-empty", Flag, |m, w, _| empty_rule(Section::Body, m, w)),
    rule!("body-full-stop", Text, |m, w, p| full_stop_rule(Section::Body, m, w, p)),
    rule!("body-leading-blank", Flag, body_leading_blank),
    rule!("body-max-length", Length, |m, _, p| max_length_rule(Section::Body, m, p)),
    rule!("body-max-line-length", Length, |m, _, p| line_length_rule(Section::Body, m, p)),
    rule!("body-min-length", Length, |m, _, p| min_length_rule(Section::Body, m, p)),
    // Footer
    rule!("footer-empty", Flag, |m, w, _| empty_rule(Section::Footer, m, w)),
    rule!("footer-leading-blank", Flag, footer_leading_blank),
    rule!("footer-max-length", Length, |m, _, p| max_length_rule(Section::Footer, m, p)),
    rule!("footer-max-line-length", Length, |m, _, p| line_length_rule(Section::Footer, m, p)),
    rule!("footer-min-length", Length, |m, _, p| min_length_rule(Section::Footer, m, p)),
    // Other
    rule!("references-empty", Flag, references_empty),
    rule!("signed-off-by", Text, signed_off_by),
];

/// Look up a built-in rule by name.
pub fn find_rule(name: &str) -> Option<&'static RuleDef> {
    BUILTIN_RULES.iter().find(|r| r.name == name)
}

/// All built-in rules.
pub fn builtin_rules() -> &'static [RuleDef] {
    BUILTIN_RULES
}

fn must(applicability: Applicability) -> &'static str {
    if applicability.is_never() {
        "may not"
    } else {
        "must"
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn length_param(parameter: Option<&RuleParameter>) -> Option<usize> {
    parameter.and_then(RuleParameter::as_length)
}

fn empty_rule(
    section: Section,
    message: &CommitMessage,
    applicability: Applicability,
) -> RuleOutcome {
    let empty = section.value(message).map_or(true, |v| v.trim().is_empty());
    let valid = if applicability.is_never() { !empty } else { empty };
    RuleOutcome::new(
        valid,
        format!("{} {} be empty", section.name(), must(applicability)),
    )
}

fn max_length_rule(
    section: Section,
    message: &CommitMessage,
    parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    let (Some(value), Some(max)) = (section.value(message), length_param(parameter)) else {
        return RuleOutcome::pass();
    };
    let len = char_len(value);
    RuleOutcome::new(
        len <= max,
        format!(
            "{} must not be longer than {} characters, current length is {}",
            section.name(),
            max,
            len
        ),
    )
}

fn min_length_rule(
    section: Section,
    message: &CommitMessage,
    parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    let (Some(value), Some(min)) = (section.value(message), length_param(parameter)) else {
        return RuleOutcome::pass();
    };
    let len = char_len(value);
    RuleOutcome::new(
        len >= min,
        format!(
            "{} must not be shorter than {} characters, current length is {}",
            section.name(),
            min,
            len
        ),
    )
}

fn line_length_rule(
    section: Section,
    message: &CommitMessage,
    parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    let (Some(value), Some(max)) = (section.value(message), length_param(parameter)) else {
        return RuleOutcome::pass();
    };
    let valid = value.lines().all(|line| char_len(line) <= max);
    RuleOutcome::new(
        valid,
        format!(
            "{}'s lines must not be longer than {} characters",
            section.name(),
            max
        ),
    )
}

fn type_enum(
    message: &CommitMessage,
    applicability: Applicability,
    parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    let Some(value) = message.commit_type.as_deref() else {
        return RuleOutcome::pass();
    };
    let allowed = parameter.and_then(RuleParameter::as_list).unwrap_or(&[]);
    let included = allowed.iter().any(|a| a == value);
    let valid = if applicability.is_never() { !included } else { included };

    RuleOutcome::new(
        valid,
        format!(
            "type {} be one of [{}]",
            must(applicability),
            allowed.join(", ")
        ),
    )
}

/// Case names carried by a case rule's parameter.
fn case_targets(parameter: Option<&RuleParameter>) -> Vec<Case> {
    let names: Vec<&str> = match parameter {
        Some(RuleParameter::Text(name)) => vec![name.as_str()],
        Some(RuleParameter::List(names)) => names.iter().map(String::as_str).collect(),
        _ => Vec::new(),
    };
    names.into_iter().filter_map(|n| n.parse().ok()).collect()
}

fn case_list(cases: &[Case]) -> String {
    cases
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn case_rule(
    section: Section,
    message: &CommitMessage,
    applicability: Applicability,
    parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    match section.value(message) {
        Some(value) => case_check(section.name(), value, applicability, parameter),
        None => RuleOutcome::pass(),
    }
}

fn case_check(
    field: &str,
    value: &str,
    applicability: Applicability,
    parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    let cases = case_targets(parameter);
    let any = cases.iter().any(|c| c.matches(value));
    let valid = if applicability.is_never() { !any } else { any };

    RuleOutcome::new(
        valid,
        format!("{} {} be {}", field, must(applicability), case_list(&cases)),
    )
}

fn subject_case(
    message: &CommitMessage,
    applicability: Applicability,
    parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    // Subjects not starting with a letter cannot be judged by case
    match message.subject.as_deref() {
        Some(subject) if subject.starts_with(|c: char| c.is_ascii_alphabetic()) => {
            case_check("subject", subject, applicability, parameter)
        }
        _ => RuleOutcome::pass(),
    }
}

/// Split a scope on the delimiters used for multiple scopes.
fn scope_segments(scope: &str) -> Vec<&str> {
    scope
        .split(['/', '\\', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn scope_enum(
    message: &CommitMessage,
    applicability: Applicability,
    parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    let allowed = parameter.and_then(RuleParameter::as_list).unwrap_or(&[]);
    let Some(scope) = message.scope.as_deref() else {
        return RuleOutcome::pass();
    };
    if allowed.is_empty() {
        return RuleOutcome::pass();
    }

    let segments = scope_segments(scope);
    let is_allowed = |s: &&str| allowed.iter().any(|a| a == s);
    let valid = if applicability.is_never() {
        !segments.iter().any(is_allowed)
    } else {
        segments.iter().all(is_allowed)
    };

    RuleOutcome::new(
        valid,
        format!(
            "scope {} be one of [{}]",
            must(applicability),
            allowed.join(", ")
        ),
    )
}

fn scope_case(
    message: &CommitMessage,
    applicability: Applicability,
    parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    let Some(scope) = message.scope.as_deref() else {
        return RuleOutcome::pass();
    };
    let cases = case_targets(parameter);
    let all = scope_segments(scope)
        .iter()
        .all(|segment| cases.iter().any(|c| c.matches(segment)));
    let valid = if applicability.is_never() { !all } else { all };

    RuleOutcome::new(
        valid,
        format!("scope {} be {}", must(applicability), case_list(&cases)),
    )
}

fn full_stop_rule(
    section: Section,
    message: &CommitMessage,
    applicability: Applicability,
    parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    let Some(value) = section.value(message) else {
        return RuleOutcome::pass();
    };
    let stop = parameter.and_then(RuleParameter::as_text).unwrap_or(".");
    let trimmed = value.trim_end();

    // An ellipsis is not a full stop
    let has_stop = trimmed.ends_with(stop) && !(stop == "." && trimmed.ends_with("..."));
    let valid = if applicability.is_never() { !has_stop } else { has_stop };

    RuleOutcome::new(
        valid,
        format!("{} {} end with full stop", section.name(), must(applicability)),
    )
}

fn body_leading_blank(
    message: &CommitMessage,
    applicability: Applicability,
    _parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    leading_blank_rule(
        "body",
        message.body.is_some(),
        message.body_leading_blank(),
        applicability,
    )
}

fn footer_leading_blank(
    message: &CommitMessage,
    applicability: Applicability,
    _parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    leading_blank_rule(
        "footer",
        message.footer.is_some(),
        message.footer_leading_blank(),
        applicability,
    )
}

fn leading_blank_rule(
    field: &str,
    present: bool,
    leading_blank: bool,
    applicability: Applicability,
) -> RuleOutcome {
    if !present {
        return RuleOutcome::pass();
    }
    let valid = if applicability.is_never() {
        !leading_blank
    } else {
        leading_blank
    };
    RuleOutcome::new(
        valid,
        format!("{} {} have leading blank line", field, must(applicability)),
    )
}

fn subject_exclamation_mark(
    message: &CommitMessage,
    applicability: Applicability,
    _parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    let has_mark = message.header.contains("!:");
    let valid = if applicability.is_never() { !has_mark } else { has_mark };
    RuleOutcome::new(
        valid,
        format!(
            "subject {} have an exclamation mark in the subject to identify a breaking change",
            must(applicability)
        ),
    )
}

fn header_trim(
    message: &CommitMessage,
    _applicability: Applicability,
    _parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    let header = message.header.as_str();
    let leading = header.len() != header.trim_start().len();
    let trailing = header.len() != header.trim_end().len();

    match (leading, trailing) {
        (true, true) => RuleOutcome::new(false, "header must not be surrounded by whitespace"),
        (true, false) => RuleOutcome::new(false, "header must not start with whitespace"),
        (false, true) => RuleOutcome::new(false, "header must not end with whitespace"),
        (false, false) => RuleOutcome::pass(),
    }
}

fn references_empty(
    message: &CommitMessage,
    applicability: Applicability,
    _parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    let empty = message.references.is_empty();
    let valid = if applicability.is_never() { !empty } else { empty };
    RuleOutcome::new(
        valid,
        format!("references {} be empty", must(applicability)),
    )
}

fn signed_off_by(
    message: &CommitMessage,
    applicability: Applicability,
    parameter: Option<&RuleParameter>,
) -> RuleOutcome {
    let trailer = parameter
        .and_then(RuleParameter::as_text)
        .unwrap_or("Signed-off-by:");
    let last = message
        .lines()
        .iter()
        .rev()
        .find(|l| !l.trim().is_empty())
        .map(String::as_str)
        .unwrap_or("");
    let signed = last.starts_with(trailer);
    let valid = if applicability.is_never() { !signed } else { signed };

    RuleOutcome::new(
        valid,
        format!("message {} be signed off", must(applicability)),
    )
}
