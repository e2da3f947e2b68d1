use anyhow::Result;
use async_trait::async_trait;

use crate::models::{RawVolume, VolumeItem};

mod client;
mod map;

pub use client::{GoogleBooksClient, DEFAULT_CATALOG_BASE};
pub use map::{dedupe_and_cap, display_book, preferred_isbn, MAX_RESULTS, UNKNOWN_AUTHOR};

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<VolumeItem>>;
    // Ok(None) when the response carries no `volumeInfo`.
    async fn fetch_volume(&self, id: &str) -> Result<Option<RawVolume>>;
}
