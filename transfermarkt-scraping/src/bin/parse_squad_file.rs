use std::path::PathBuf;

use clap::Parser;
use scraper::Html;

#[derive(Parser)]
struct Opts {
    input_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::parse();
    let html = Html::parse_document(&fs_err::read_to_string(opts.input_file)?);

    let players = transfermarkt_scraping::parser::squad::parse(&html)?;
    eprintln!("Extracted {} players", players.len());
    println!("{}", serde_json::to_string_pretty(&players)?);

    Ok(())
}
