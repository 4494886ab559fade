// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Embeds git metadata for `cmlint version`.

use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    // Without git metadata vergen warns and emits placeholder values.
    EmitBuilder::builder()
        .git_sha(true)
        .git_commit_date()
        .emit()?;
    Ok(())
}
