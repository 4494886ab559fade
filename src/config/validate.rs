// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Well-formedness checks for rule documents.

use std::collections::HashSet;
use std::fmt;

use crate::rules::{find_rule, Case, RuleKind};

use super::schema::{ConfigDocument, RuleEntry, RuleParameter, Severity};

/// A single problem found in a rule document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigProblem {
    /// Dotted path of the offending key.
    pub key: String,
    pub message: String,
}

impl fmt::Display for ConfigProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Check a document and return every problem found.
///
/// Disabled rules (`[0]`) are checked for a known name only, so that a
/// base rule can be switched off without restating its parameter.
pub fn validate_document(document: &ConfigDocument) -> Vec<ConfigProblem> {
    let mut problems = Vec::new();

    for (name, entry) in &document.rules {
        let key = format!("rules.{}", name);

        let Some(def) = find_rule(name) else {
            problems.push(ConfigProblem {
                key,
                message: "unknown rule".to_string(),
            });
            continue;
        };

        if entry.severity == Severity::Off {
            continue;
        }

        if let Err(message) = check_parameter(def.kind, entry) {
            problems.push(ConfigProblem { key, message });
        }
    }

    for (i, prefix) in document.parser_options().issue_prefixes.iter().enumerate() {
        if prefix.is_empty() {
            problems.push(ConfigProblem {
                key: format!("parserPreset.parserOpts.issuePrefixes[{}]", i),
                message: "issue prefix must not be empty".to_string(),
            });
        }
    }

    problems
}

fn check_parameter(kind: RuleKind, entry: &RuleEntry) -> Result<(), String> {
    let parameter = entry.parameter.as_ref();

    match kind {
        RuleKind::Flag => match parameter {
            None => Ok(()),
            Some(p) => Err(format!("takes no parameter, got {}", p.kind_name())),
        },
        RuleKind::Length => match parameter {
            Some(RuleParameter::Number(n)) if *n > 0 => Ok(()),
            Some(RuleParameter::Number(_)) => Err("length must be positive".to_string()),
            Some(p) => Err(format!("expected an integer, got {}", p.kind_name())),
            None => Err("missing length parameter".to_string()),
        },
        RuleKind::Text => match parameter {
            None | Some(RuleParameter::Text(_)) => Ok(()),
            Some(p) => Err(format!("expected a string, got {}", p.kind_name())),
        },
        RuleKind::Enum => match parameter {
            Some(RuleParameter::List(items)) => check_enum_values(items),
            Some(p) => Err(format!("expected a list of strings, got {}", p.kind_name())),
            None => Err("missing list of allowed values".to_string()),
        },
        RuleKind::Case => match parameter {
            Some(RuleParameter::Text(name)) => check_case_name(name),
            Some(RuleParameter::List(names)) if !names.is_empty() => {
                names.iter().try_for_each(|name| check_case_name(name))
            }
            Some(RuleParameter::List(_)) => Err("case list must not be empty".to_string()),
            Some(p) => Err(format!("expected a case name, got {}", p.kind_name())),
            None => Err("missing case parameter".to_string()),
        },
    }
}

fn check_enum_values(items: &[String]) -> Result<(), String> {
    if items.is_empty() {
        return Err("list of allowed values must not be empty".to_string());
    }

    let mut seen = HashSet::new();
    for item in items {
        if item.is_empty() {
            return Err("allowed values must not be empty strings".to_string());
        }
        if !seen.insert(item.as_str()) {
            return Err(format!("duplicate value '{}'", item));
        }
    }
    Ok(())
}

fn check_case_name(name: &str) -> Result<(), String> {
    name.parse::<Case>()
        .map(|_| ())
        .map_err(|_| format!("unknown case '{}'", name))
}
