use std::{path::PathBuf, time::Duration};

use clap::Parser;
use log::info;
use transfermarkt_scraping::{
    api::{SquadClient, SquadClientOptions},
    fs_json_util::write_json,
};

#[derive(Parser)]
struct Opts {
    /// Numeric club id as used in the roster page path.
    club_id: String,
    /// Write the extracted players to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::parse();
    let client = SquadClient::new(SquadClientOptions {
        timeout: Duration::from_secs(opts.timeout_secs),
        ..Default::default()
    })?;
    let players = client.fetch_squad(&opts.club_id).await?;
    info!("Extracted {} players for club {}", players.len(), opts.club_id);

    match &opts.output {
        Some(path) => write_json(path, &players)?,
        None => println!("{}", serde_json::to_string_pretty(&players)?),
    }
    Ok(())
}
