use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "nmap2json")]
#[command(about = "Convert Nmap XML scan reports to JSON")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Convert one or more Nmap XML reports to JSON files.
    Convert(ConvertArgs),
    /// Emit the index mapping document for scan records.
    Mapping(MappingArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Nmap XML report files to convert.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Output directory for converted JSON files.
    #[arg(long, default_value = ".")]
    pub outdir: PathBuf,
    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,
    /// Also write the scan record mapping document to this path.
    #[arg(long)]
    pub mapping_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct MappingArgs {
    /// Write the mapping to this path instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,
}
