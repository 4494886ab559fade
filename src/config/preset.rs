// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in rule documents.
//!
//! Base configurations are resolved by name from `extends`. The project
//! template is the document `cmlint init` writes and the one used when no
//! configuration file is found.

use std::collections::BTreeMap;

use super::schema::{
    Applicability::{Always, Never},
    ConfigDocument, ParserOptions, ParserPreset, RuleEntry, RuleParameter,
};

/// Identifier of the conventional-commits base configuration.
pub const CONFIG_CONVENTIONAL: &str = "@commitlint/config-conventional";

/// Help link carried by the project template.
pub const CONVENTIONAL_COMMITS_URL: &str = "https://www.conventionalcommits.org/";

/// Commit types accepted by the project template.
pub const PROJECT_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "test", "build", "ci", "perf", "chore", "revert",
];

/// Case styles a subject must not use.
pub const FORBIDDEN_SUBJECT_CASES: &[&str] =
    &["sentence-case", "start-case", "pascal-case", "upper-case"];

/// Look up a base configuration by its `extends` identifier.
pub fn base_config(name: &str) -> Option<ConfigDocument> {
    match name {
        CONFIG_CONVENTIONAL => Some(config_conventional()),
        _ => None,
    }
}

/// The conventional-commits base rules.
pub fn config_conventional() -> ConfigDocument {
    let mut rules: BTreeMap<String, RuleEntry> = BTreeMap::new();
    rules.insert("body-leading-blank".into(), RuleEntry::warn(Always));
    rules.insert(
        "body-max-line-length".into(),
        RuleEntry::error(Always).with_parameter(100u64),
    );
    rules.insert("footer-leading-blank".into(), RuleEntry::warn(Always));
    rules.insert(
        "footer-max-line-length".into(),
        RuleEntry::error(Always).with_parameter(100u64),
    );
    rules.insert(
        "header-max-length".into(),
        RuleEntry::error(Always).with_parameter(100u64),
    );
    rules.insert("header-trim".into(), RuleEntry::error(Always));
    rules.insert(
        "subject-case".into(),
        RuleEntry::error(Never).with_parameter(RuleParameter::list(FORBIDDEN_SUBJECT_CASES)),
    );
    rules.insert("subject-empty".into(), RuleEntry::error(Never));
    rules.insert(
        "subject-full-stop".into(),
        RuleEntry::error(Never).with_parameter("."),
    );
    rules.insert(
        "type-case".into(),
        RuleEntry::error(Always).with_parameter("lower-case"),
    );
    rules.insert("type-empty".into(), RuleEntry::error(Never));
    rules.insert(
        "type-enum".into(),
        RuleEntry::error(Always).with_parameter(RuleParameter::list(&[
            "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style",
            "test",
        ])),
    );

    ConfigDocument {
        rules,
        ..ConfigDocument::default()
    }
}

/// The project rule document.
///
/// Extends the conventional base and tightens the length limits to 50
/// for subjects and 72 for headers, body lines and footer lines.
pub fn project_template() -> ConfigDocument {
    let mut rules: BTreeMap<String, RuleEntry> = BTreeMap::new();

    // Type
    rules.insert(
        "type-enum".into(),
        RuleEntry::error(Always).with_parameter(RuleParameter::list(PROJECT_TYPES)),
    );
    rules.insert(
        "type-case".into(),
        RuleEntry::error(Always).with_parameter("lower-case"),
    );
    rules.insert("type-empty".into(), RuleEntry::error(Never));

    // Scope
    rules.insert(
        "scope-case".into(),
        RuleEntry::error(Always).with_parameter("lower-case"),
    );

    // Subject
    rules.insert(
        "subject-case".into(),
        RuleEntry::error(Never).with_parameter(RuleParameter::list(FORBIDDEN_SUBJECT_CASES)),
    );
    rules.insert("subject-empty".into(), RuleEntry::error(Never));
    rules.insert(
        "subject-full-stop".into(),
        RuleEntry::error(Never).with_parameter("."),
    );
    rules.insert(
        "subject-max-length".into(),
        RuleEntry::error(Always).with_parameter(50u64),
    );

    // Header
    rules.insert(
        "header-max-length".into(),
        RuleEntry::error(Always).with_parameter(72u64),
    );

    // Body
    rules.insert("body-leading-blank".into(), RuleEntry::error(Always));
    rules.insert(
        "body-max-line-length".into(),
        RuleEntry::error(Always).with_parameter(72u64),
    );

    // Footer
    rules.insert("footer-leading-blank".into(), RuleEntry::error(Always));
    rules.insert(
        "footer-max-line-length".into(),
        RuleEntry::error(Always).with_parameter(72u64),
    );

    ConfigDocument {
        extends: vec![CONFIG_CONVENTIONAL.to_string()],
        help_url: Some(CONVENTIONAL_COMMITS_URL.to_string()),
        rules,
        parser_preset: ParserPreset {
            parser_opts: ParserOptions::with_issue_prefixes(["#", "PROJ-"]),
        },
    }
}
