// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! A rule document has the same shape in TOML and JSON:
//!
//! ```toml
//! extends = ["@commitlint/config-conventional"]
//! helpUrl = "https://www.conventionalcommits.org/"
//!
//! [rules]
//! subject-max-length = [2, "always", 50]
//!
//! [parserPreset.parserOpts]
//! issuePrefixes = ["#", "PROJ-"]
//! ```

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The rule configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigDocument {
    /// Base configurations to inherit from, applied in order.
    pub extends: Vec<String>,

    /// Informational link printed when linting fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,

    /// Rule name to rule entry.
    #[serde(deserialize_with = "deserialize_unique_rules")]
    pub rules: BTreeMap<String, RuleEntry>,

    /// Commit message parser settings.
    pub parser_preset: ParserPreset,
}

impl ConfigDocument {
    /// Load and resolve the document from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load and resolve the document from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Look up a rule entry by name.
    pub fn rule(&self, name: &str) -> Option<&RuleEntry> {
        self.rules.get(name)
    }

    /// Insert or replace a rule entry.
    pub fn set_rule(&mut self, name: impl Into<String>, entry: RuleEntry) {
        self.rules.insert(name.into(), entry);
    }

    /// Parser options in effect.
    pub fn parser_options(&self) -> &ParserOptions {
        &self.parser_preset.parser_opts
    }
}

/// Wrapper matching the `parserPreset.parserOpts` nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserPreset {
    pub parser_opts: ParserOptions,
}

/// Options for recognising references and notes in commit text.
///
/// Empty lists mean "inherit": the base document's value is kept on merge,
/// and the conventional defaults are used when nothing sets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserOptions {
    /// Prefixes marking issue references, e.g. `#` in `#123`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issue_prefixes: Vec<String>,

    /// Keywords that may precede a reference, e.g. `closes`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reference_actions: Vec<String>,

    /// Footer keywords that introduce a note.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note_keywords: Vec<String>,
}

const DEFAULT_ISSUE_PREFIXES: &[&str] = &["#"];

const DEFAULT_REFERENCE_ACTIONS: &[&str] = &[
    "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves", "resolved",
];

const DEFAULT_NOTE_KEYWORDS: &[&str] = &["BREAKING CHANGE", "BREAKING-CHANGE"];

impl ParserOptions {
    /// Options with the given issue prefixes and default keywords.
    pub fn with_issue_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            issue_prefixes: prefixes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Issue prefixes in effect.
    pub fn issue_prefixes(&self) -> Vec<&str> {
        effective(&self.issue_prefixes, DEFAULT_ISSUE_PREFIXES)
    }

    /// Reference action keywords in effect.
    pub fn reference_actions(&self) -> Vec<&str> {
        effective(&self.reference_actions, DEFAULT_REFERENCE_ACTIONS)
    }

    /// Note keywords in effect.
    pub fn note_keywords(&self) -> Vec<&str> {
        effective(&self.note_keywords, DEFAULT_NOTE_KEYWORDS)
    }
}

fn effective<'a>(configured: &'a [String], defaults: &'a [&'a str]) -> Vec<&'a str> {
    if configured.is_empty() {
        defaults.to_vec()
    } else {
        configured.iter().map(String::as_str).collect()
    }
}

/// Enforcement level of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Off,
    Warn,
    Error,
}

impl Severity {
    /// Numeric level used in rule tuples.
    pub fn level(self) -> u8 {
        match self {
            Severity::Off => 0,
            Severity::Warn => 1,
            Severity::Error => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warning",
            Severity::Error => "error",
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, String> {
        match level {
            0 => Ok(Severity::Off),
            1 => Ok(Severity::Warn),
            2 => Ok(Severity::Error),
            other => Err(format!("severity must be 0, 1 or 2, got {}", other)),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let level = u8::deserialize(deserializer)?;
        Severity::try_from(level).map_err(de::Error::custom)
    }
}

/// Whether a rule's condition must hold or must not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    #[default]
    Always,
    Never,
}

impl Applicability {
    pub fn is_never(self) -> bool {
        self == Applicability::Never
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Applicability::Always => "always",
            Applicability::Never => "never",
        }
    }
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule-specific value carried in the third tuple slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleParameter {
    Number(u64),
    Text(String),
    List(Vec<String>),
}

impl RuleParameter {
    /// Build a list parameter from string slices.
    pub fn list(items: &[&str]) -> Self {
        RuleParameter::List(items.iter().map(|s| s.to_string()).collect())
    }

    pub fn as_length(&self) -> Option<usize> {
        match self {
            RuleParameter::Number(n) => usize::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleParameter::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            RuleParameter::List(items) => Some(items),
            _ => None,
        }
    }

    /// Name of the parameter's shape, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RuleParameter::Number(_) => "integer",
            RuleParameter::Text(_) => "string",
            RuleParameter::List(_) => "list",
        }
    }
}

impl From<u64> for RuleParameter {
    fn from(n: u64) -> Self {
        RuleParameter::Number(n)
    }
}

impl From<&str> for RuleParameter {
    fn from(s: &str) -> Self {
        RuleParameter::Text(s.to_string())
    }
}

impl fmt::Display for RuleParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleParameter::Number(n) => write!(f, "{}", n),
            RuleParameter::Text(s) => write!(f, "\"{}\"", s),
            RuleParameter::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// A single rule tuple: `[severity, applicability, parameter]`.
///
/// Applicability and parameter may be omitted; applicability then
/// defaults to `always`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    pub severity: Severity,
    pub applicability: Applicability,
    pub parameter: Option<RuleParameter>,
}

impl RuleEntry {
    pub fn new(severity: Severity, applicability: Applicability) -> Self {
        Self {
            severity,
            applicability,
            parameter: None,
        }
    }

    /// An error-level entry.
    pub fn error(applicability: Applicability) -> Self {
        Self::new(Severity::Error, applicability)
    }

    /// A warning-level entry.
    pub fn warn(applicability: Applicability) -> Self {
        Self::new(Severity::Warn, applicability)
    }

    /// Set the parameter.
    pub fn with_parameter(mut self, parameter: impl Into<RuleParameter>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.severity != Severity::Off
    }
}

impl Serialize for RuleEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.parameter.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.severity)?;
        seq.serialize_element(&self.applicability)?;
        if let Some(ref parameter) = self.parameter {
            seq.serialize_element(parameter)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RuleEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RuleEntryVisitor)
    }
}

struct RuleEntryVisitor;

impl<'de> Visitor<'de> for RuleEntryVisitor {
    type Value = RuleEntry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a rule tuple [severity, applicability?, parameter?]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RuleEntry, A::Error> {
        let severity: Severity = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let applicability: Applicability = seq.next_element()?.unwrap_or_default();
        let parameter: Option<RuleParameter> = seq.next_element::<Option<RuleParameter>>()?.flatten();

        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(4, &self));
        }

        Ok(RuleEntry {
            severity,
            applicability,
            parameter,
        })
    }
}

/// Deserialize the rules table, rejecting repeated rule names.
///
/// TOML already refuses duplicate keys; JSON readers would otherwise keep
/// the last one silently.
fn deserialize_unique_rules<'de, D>(deserializer: D) -> Result<BTreeMap<String, RuleEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RulesVisitor;

    impl<'de> Visitor<'de> for RulesVisitor {
        type Value = BTreeMap<String, RuleEntry>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of rule names to rule tuples")
        }

        fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
            let mut rules = BTreeMap::new();
            while let Some((name, entry)) = map.next_entry::<String, RuleEntry>()? {
                if rules.contains_key(&name) {
                    return Err(de::Error::custom(format!("duplicate rule '{}'", name)));
                }
                rules.insert(name, entry);
            }
            Ok(rules)
        }
    }

    deserializer.deserialize_map(RulesVisitor)
}
