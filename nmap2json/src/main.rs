use anyhow::Result;
use clap::Parser;

mod cli;
mod convert;
mod mapping_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert(args) => convert::run_convert(args),
        Command::Mapping(args) => mapping_cmd::run_mapping(args),
    }
}
