use std::time::Duration;

use anyhow::{bail, Context};
use log::{debug, info};
use scraper::Html;
use url::Url;

use crate::parser::squad;
use crate::schema::Player;

pub const DEFAULT_BASE_URL: &str = "https://www.transfermarkt.com.br";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:126.0) Gecko/20100101 Firefox/126.0";

#[derive(Clone, Debug)]
pub struct SquadClientOptions {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for SquadClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct SquadClient {
    client: reqwest::Client,
    base_url: Url,
}

impl SquadClient {
    pub fn new(options: SquadClientOptions) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(options.timeout)
            .build()?;
        let base_url = Url::parse(&options.base_url)
            .with_context(|| format!("Invalid base url: {:?}", options.base_url))?;
        Ok(Self { client, base_url })
    }

    pub fn with_defaults() -> anyhow::Result<Self> {
        Self::new(SquadClientOptions::default())
    }

    /// Fetches page 1 of the club's roster view and extracts its players.
    pub async fn fetch_squad(&self, club_id: &str) -> anyhow::Result<Vec<Player>> {
        let url = self.squad_url(club_id)?;
        info!("Fetching squad page: {url}");
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            bail!(
                "Squad page request failed: server returned {:?}",
                response.status()
            );
        }
        let document = Html::parse_document(&response.text().await?);
        let players = squad::parse(&document)
            .with_context(|| format!("While parsing the squad page of club {club_id}"))?;
        debug!("Extracted {} players for club {club_id}", players.len());
        Ok(players)
    }

    fn squad_url(&self, club_id: &str) -> anyhow::Result<Url> {
        Ok(self
            .base_url
            .join(&format!("/club/kader/verein/{club_id}/plus/1"))?)
    }
}
