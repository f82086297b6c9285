//! emx-paste CLI
//!
//! Merge lines of files (similar to the paste command).

use anyhow::Result;
use clap::Parser;
use emx_paste::{PasteConfig, Paster, Stream, DEFAULT_DELIMITERS};
use std::io::{self, BufWriter};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "emx-paste")]
#[command(author = "nzinfo <li.monan@gmail.com>")]
#[command(version)]
#[command(about = "Merge corresponding or subsequent lines of files")]
struct Cli {
    /// Paste one file at a time instead of in parallel
    #[arg(short = 's', long)]
    serial: bool,

    /// Reuse characters from LIST instead of TABs (escapes: \\ \a \b \f \n \r \t \v)
    #[arg(short = 'd', long = "delimiters", value_name = "LIST", default_value = DEFAULT_DELIMITERS, allow_hyphen_values = true)]
    delimiters: String,

    /// Files to merge; "-" reads standard input
    #[arg(required = true, value_name = "FILE")]
    files: Vec<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("emx-paste: {}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = PasteConfig::new()
        .serial(cli.serial)
        .with_delimiters(cli.delimiters);

    // Reject bad delimiters and unreadable files before writing anything
    let paster = Paster::from_config(&config)?;
    let mut streams = Stream::open_all(&cli.files)?;
    log::debug!("merging {} input(s)", streams.len());

    let stdout = io::stdout();
    paster.run(&mut streams, BufWriter::new(stdout.lock()))?;
    Ok(())
}
