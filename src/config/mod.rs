// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for cmlint.
//!
//! This module handles the rule document: its schema, the built-in base
//! configurations, loading from TOML or JSON files, `extends` resolution
//! and well-formedness checks.

pub mod default;
mod loader;
pub mod preset;
mod schema;
mod validate;

pub use loader::{
    find_config_file, find_config_file_from, finalize, load_config, load_config_from,
    merge_documents, parse_config, resolve_extends, resolve_with, ConfigFormat, CONFIG_FILES,
};
pub use schema::*;
pub use validate::{validate_document, ConfigProblem};
