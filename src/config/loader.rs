// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading, `extends` resolution and merging.

use crate::error::{CmlintError, ConfigError, Result};
use std::path::{Path, PathBuf};

use super::preset;
use super::schema::{ConfigDocument, ParserOptions, ParserPreset};
use super::validate::validate_document;

/// Configuration file names to search for, in order of priority.
pub const CONFIG_FILES: &[&str] = &[
    "cmlint.toml",
    ".cmlint.toml",
    ".commitlintrc.toml",
    ".commitlintrc.json",
    ".commitlintrc",
];

/// On-disk format of a rule document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file name.
    ///
    /// `.json` files and the extensionless `.commitlintrc` are JSON.
    pub fn from_path(path: &Path) -> Self {
        let is_json = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.eq_ignore_ascii_case("json"),
            None => path.file_name().and_then(|n| n.to_str()) == Some(".commitlintrc"),
        };
        if is_json {
            ConfigFormat::Json
        } else {
            ConfigFormat::Toml
        }
    }
}

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    // XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("cmlint").join("config.toml");
        if user_config.is_file() {
            return Some(user_config);
        }
    }

    None
}

/// Load configuration from the default locations.
///
/// Falls back to the built-in project template when no file is found.
pub fn load_config() -> Result<ConfigDocument> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using the project template");
            finalize(preset::project_template())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<ConfigDocument> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(CmlintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        CmlintError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    let document = parse_config(&content, ConfigFormat::from_path(path))?;
    finalize(document)
}

/// Parse a rule document without resolving `extends`.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<ConfigDocument> {
    match format {
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| {
            CmlintError::Config(ConfigError::ParseError {
                message: format!("Failed to parse TOML: {}", e),
            })
        }),
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| {
            CmlintError::Config(ConfigError::ParseError {
                message: format!("Failed to parse JSON: {}", e),
            })
        }),
    }
}

/// Resolve `extends` against the built-in bases, then validate.
pub fn finalize(document: ConfigDocument) -> Result<ConfigDocument> {
    let resolved = resolve_extends(document)?;

    let problems = validate_document(&resolved);
    if let Some(first) = problems.first() {
        for problem in &problems {
            tracing::debug!("Configuration problem: {}", problem);
        }
        return Err(CmlintError::Config(ConfigError::InvalidValue {
            key: first.key.clone(),
            message: if problems.len() > 1 {
                format!("{} (and {} more)", first.message, problems.len() - 1)
            } else {
                first.message.clone()
            },
        }));
    }

    Ok(resolved)
}

/// Resolve `extends` using the built-in base configurations.
pub fn resolve_extends(document: ConfigDocument) -> Result<ConfigDocument> {
    resolve_with(document, &preset::base_config)
}

/// Resolve `extends` with a custom base lookup.
///
/// Bases are applied in list order, each resolved recursively, and the
/// document itself is overlaid last.
pub fn resolve_with(
    document: ConfigDocument,
    lookup: &dyn Fn(&str) -> Option<ConfigDocument>,
) -> Result<ConfigDocument> {
    let mut chain = Vec::new();
    resolve_chain(document, lookup, &mut chain)
}

fn resolve_chain(
    document: ConfigDocument,
    lookup: &dyn Fn(&str) -> Option<ConfigDocument>,
    chain: &mut Vec<String>,
) -> Result<ConfigDocument> {
    let mut resolved = ConfigDocument::default();

    for name in &document.extends {
        if chain.contains(name) {
            let mut cycle = chain.clone();
            cycle.push(name.clone());
            return Err(CmlintError::Config(ConfigError::CircularExtends {
                chain: cycle.join(" -> "),
            }));
        }

        let base = lookup(name).ok_or_else(|| {
            CmlintError::Config(ConfigError::UnknownBase { name: name.clone() })
        })?;
        tracing::debug!("Resolving base configuration: {}", name);

        chain.push(name.clone());
        let base = resolve_chain(base, lookup, chain)?;
        chain.pop();

        resolved = merge_documents(resolved, base);
    }

    Ok(merge_documents(resolved, document))
}

/// Merge two documents, with the overlay taking precedence.
///
/// Rules overlay key by key. Parser lists and the help URL are replaced
/// only when the overlay sets them. `extends` is taken from the overlay.
pub fn merge_documents(base: ConfigDocument, overlay: ConfigDocument) -> ConfigDocument {
    let mut rules = base.rules;
    rules.extend(overlay.rules);

    ConfigDocument {
        extends: overlay.extends,
        help_url: overlay.help_url.or(base.help_url),
        rules,
        parser_preset: ParserPreset {
            parser_opts: merge_parser_options(
                base.parser_preset.parser_opts,
                overlay.parser_preset.parser_opts,
            ),
        },
    }
}

fn merge_parser_options(base: ParserOptions, overlay: ParserOptions) -> ParserOptions {
    fn pick(base: Vec<String>, overlay: Vec<String>) -> Vec<String> {
        if overlay.is_empty() {
            base
        } else {
            overlay
        }
    }

    ParserOptions {
        issue_prefixes: pick(base.issue_prefixes, overlay.issue_prefixes),
        reference_actions: pick(base.reference_actions, overlay.reference_actions),
        note_keywords: pick(base.note_keywords, overlay.note_keywords),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{Applicability, RuleEntry, Severity};
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config() {
        let doc = parse_config("", ConfigFormat::Toml).unwrap();
        assert!(doc.rules.is_empty());
    }

    #[test]
    fn test_toml_and_json_agree() {
        let toml_doc = parse_config(
            r##"
extends = ["@commitlint/config-conventional"]
helpUrl = "https://www.conventionalcommits.org/"

[rules]
type-enum = [2, "always", ["feat", "fix"]]
subject-max-length = [2, "always", 50]
body-leading-blank = [1, "always"]

[parserPreset.parserOpts]
issuePrefixes = ["#", "PROJ-"]
"##,
            ConfigFormat::Toml,
        )
        .unwrap();

        let json_doc = parse_config(
            r##"{
  "extends": ["@commitlint/config-conventional"],
  "helpUrl": "https://www.conventionalcommits.org/",
  "rules": {
    "type-enum": [2, "always", ["feat", "fix"]],
    "subject-max-length": [2, "always", 50],
    "body-leading-blank": [1, "always"]
  },
  "parserPreset": { "parserOpts": { "issuePrefixes": ["#", "PROJ-"] } }
}"##,
            ConfigFormat::Json,
        )
        .unwrap();

        assert_eq!(toml_doc, json_doc);
    }

    #[test]
    fn test_overlay_takes_precedence() {
        let doc = parse_config(
            r#"
extends = ["@commitlint/config-conventional"]

[rules]
header-max-length = [2, "always", 72]
"#,
            ConfigFormat::Toml,
        )
        .unwrap();

        let resolved = resolve_extends(doc).unwrap();
        let header = resolved.rule("header-max-length").unwrap();
        assert_eq!(header.parameter.as_ref().and_then(|p| p.as_length()), Some(72));

        // Inherited from the base
        let trim = resolved.rule("header-trim").unwrap();
        assert_eq!(trim.severity, Severity::Error);
        let leading = resolved.rule("body-leading-blank").unwrap();
        assert_eq!(leading.severity, Severity::Warn);
    }

    #[test]
    fn test_template_overrides_base_leading_blank() {
        let resolved = finalize(preset::project_template()).unwrap();
        assert_eq!(
            resolved.rule("body-leading-blank").unwrap().severity,
            Severity::Error
        );
        assert_eq!(
            resolved
                .rule("body-max-line-length")
                .and_then(|e| e.parameter.as_ref())
                .and_then(|p| p.as_length()),
            Some(72)
        );
        assert!(resolved.rule("header-trim").is_some());
    }

    #[test]
    fn test_unknown_base_rejected() {
        let doc = parse_config(r#"extends = ["@acme/commitlint"]"#, ConfigFormat::Toml).unwrap();
        let err = resolve_extends(doc).unwrap_err();
        assert!(matches!(
            err,
            CmlintError::Config(ConfigError::UnknownBase { ref name }) if name == "@acme/commitlint"
        ));
    }

    #[test]
    fn test_circular_extends_rejected() {
        let lookup = |name: &str| -> Option<ConfigDocument> {
            let next = if name == "a" { "b" } else { "a" };
            Some(ConfigDocument {
                extends: vec![next.to_string()],
                ..ConfigDocument::default()
            })
        };
        let doc = ConfigDocument {
            extends: vec!["a".to_string()],
            ..ConfigDocument::default()
        };

        let err = resolve_with(doc, &lookup).unwrap_err();
        assert!(matches!(
            err,
            CmlintError::Config(ConfigError::CircularExtends { .. })
        ));
    }

    #[test]
    fn test_merge_keeps_base_parser_options() {
        let base = preset::project_template();
        let mut overlay = ConfigDocument::default();
        overlay.set_rule("scope-empty", RuleEntry::error(Applicability::Never));

        let merged = merge_documents(base, overlay);
        assert_eq!(merged.parser_options().issue_prefixes(), vec!["#", "PROJ-"]);
        assert!(merged.help_url.is_some());
        assert!(merged.rule("scope-empty").is_some());
    }

    #[test]
    fn test_finalize_rejects_invalid_parameter() {
        let doc = parse_config(
            r#"
[rules]
subject-max-length = [2, "always", "fifty"]
"#,
            ConfigFormat::Toml,
        )
        .unwrap();

        let err = finalize(doc).unwrap_err();
        assert!(err.to_string().contains("subject-max-length"));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".commitlintrc.json");
        std::fs::write(
            &path,
            r#"{"extends": ["@commitlint/config-conventional"], "rules": {"subject-max-length": [2, "always", 60]}}"#,
        )
        .unwrap();

        let doc = load_config_from(&path).unwrap();
        assert!(doc.rule("type-enum").is_some());
        assert_eq!(
            doc.rule("subject-max-length")
                .and_then(|e| e.parameter.as_ref())
                .and_then(|p| p.as_length()),
            Some(60)
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config_from(Path::new("/nonexistent/cmlint.toml")).unwrap_err();
        assert!(matches!(err, CmlintError::Config(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("cmlint.toml"), "").unwrap();

        let found = find_config_file_from(&nested).unwrap();
        assert_eq!(found, dir.path().join("cmlint.toml"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("cmlint.toml")), ConfigFormat::Toml);
        assert_eq!(
            ConfigFormat::from_path(Path::new(".commitlintrc.json")),
            ConfigFormat::Json
        );
        assert_eq!(ConfigFormat::from_path(Path::new(".commitlintrc")), ConfigFormat::Json);
    }
}
