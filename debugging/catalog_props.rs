//! Query the book catalog and print the processed view models.
//! Usage:
//!   cargo run --bin catalog_props -- search <query words...>
//!   cargo run --bin catalog_props -- volume <volume_id>
//! Honors CATALOG_BASE_URL from the environment (.env supported).

use anyhow::{anyhow, Context, Result};
use bookfinder::catalog::{self, CatalogApi, GoogleBooksClient};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Search,
    Volume,
}

impl FromStr for Mode {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "search" => Ok(Mode::Search),
            "volume" => Ok(Mode::Volume),
            _ => Err(anyhow!("mode must be 'search' or 'volume'")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let mut args = env::args().skip(1);
    let mode: Mode = args
        .next()
        .context("usage: catalog_props <search|volume> <query-or-id>")?
        .parse()?;
    let rest = args.collect::<Vec<_>>().join(" ");
    if rest.trim().is_empty() {
        return Err(anyhow!("missing query or volume id"));
    }

    let client = GoogleBooksClient::from_env()?;
    match mode {
        Mode::Search => {
            let items = client.search(&rest, catalog::MAX_RESULTS).await?;
            println!("raw hits: {}", items.len());
            let books = catalog::dedupe_and_cap(&items);
            println!("{}", serde_json::to_string_pretty(&books)?);
        }
        Mode::Volume => {
            let volume = client
                .fetch_volume(rest.trim())
                .await?
                .ok_or_else(|| anyhow!("volume '{}' has no volumeInfo", rest.trim()))?;
            let book = catalog::display_book(volume)
                .ok_or_else(|| anyhow!("volume '{}' has no title", rest.trim()))?;
            println!("{}", serde_json::to_string_pretty(&book)?);
        }
    }

    Ok(())
}
