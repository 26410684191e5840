use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use nmap2json::model::NmapRun;
use record_mapping_core::derive_mapping;

use crate::cli::MappingArgs;

pub fn run_mapping(args: MappingArgs) -> Result<()> {
    write_mapping(args.output.as_deref(), args.pretty)
}

/// Derive the scan record mapping and write it to `output` or stdout.
pub fn write_mapping(output: Option<&Path>, pretty: bool) -> Result<()> {
    let mapping =
        derive_mapping::<NmapRun>().context("failed to derive scan record mapping")?;
    let json = if pretty {
        mapping.to_json_pretty()?
    } else {
        mapping.to_json()?
    };

    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write mapping {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
