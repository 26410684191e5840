use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use nmap2json::parser::parse_scan_file;

use crate::cli::ConvertArgs;
use crate::mapping_cmd;

pub fn run_convert(args: ConvertArgs) -> Result<()> {
    fs::create_dir_all(&args.outdir).with_context(|| {
        format!(
            "failed to create output directory {}",
            args.outdir.display()
        )
    })?;

    let mut failed = 0usize;
    for file in &args.files {
        if let Err(err) = convert_file(file, &args.outdir, args.pretty) {
            eprintln!("{} {}: {err:#}", "error:".red().bold(), file.display());
            failed += 1;
        }
    }

    if let Some(path) = args.mapping_out.as_deref() {
        mapping_cmd::write_mapping(Some(path), args.pretty)?;
    }

    if failed > 0 {
        bail!("{failed} of {} inputs failed", args.files.len());
    }
    Ok(())
}

fn convert_file(file: &Path, outdir: &Path, pretty: bool) -> Result<()> {
    let out_path = output_path(file, outdir)?;
    ensure_output_not_input(&out_path, file)?;

    let scan = parse_scan_file(file)
        .with_context(|| format!("failed to parse {}", file.display()))?;
    let bytes = if pretty {
        serde_json::to_vec_pretty(&scan)?
    } else {
        serde_json::to_vec(&scan)?
    };
    fs::write(&out_path, bytes)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}

/// Output file: `<outdir>/<input stem>.json`.
fn output_path(file: &Path, outdir: &Path) -> Result<PathBuf> {
    let stem = file
        .file_stem()
        .with_context(|| format!("input {} has no file name", file.display()))?;
    let mut name = stem.to_os_string();
    name.push(".json");
    Ok(outdir.join(name))
}

fn ensure_output_not_input(output: &Path, input: &Path) -> Result<()> {
    if normalize_for_compare(output)? == normalize_for_compare(input)? {
        bail!(
            "refusing to overwrite source file: output {} matches input",
            output.display()
        );
    }
    Ok(())
}

fn normalize_for_compare(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    // A not-yet-existing output file cannot be canonicalized; best-effort
    // join with cwd. `..` sequences are not resolved here.
    let base = if path.is_absolute() {
        PathBuf::new()
    } else {
        std::env::current_dir().context("current_dir")?
    };
    Ok(base.join(path))
}
