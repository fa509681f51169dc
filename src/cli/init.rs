//! artmark init command implementation
//!
//! Creates the data directory and a default `.artmark.toml`.

use std::path::PathBuf;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;

#[derive(serde::Serialize)]
struct InitReport {
    data_dir: PathBuf,
    config: PathBuf,
    created: bool,
}

pub fn run(data_dir: Option<PathBuf>, json: bool, quiet: bool) -> Result<()> {
    let storage = Storage::resolve(data_dir)?;
    let created = storage.init()?;

    let report = InitReport {
        data_dir: storage.root().to_path_buf(),
        config: storage.config_file(),
        created,
    };

    let header = if created {
        format!("artmark init: initialized {}", storage.root().display())
    } else {
        format!("artmark init: already initialized at {}", storage.root().display())
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("config", storage.config_file().display().to_string());
    human.push_next_step("artmark fav toggle <artwork>");
    human.push_next_step("artmark task add <artwork> <text> --due <when>");

    emit_success(
        OutputOptions { json, quiet },
        "init",
        &report,
        Some(&human),
    )?;

    Ok(())
}
