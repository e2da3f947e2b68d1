use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use tracing::debug;

use super::CatalogApi;
use crate::models::{RawVolume, VolumeItem};

pub const DEFAULT_CATALOG_BASE: &str = "https://www.googleapis.com/books/v1";

#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<VolumeItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeResponse {
    volume_info: Option<RawVolume>,
}

impl GoogleBooksClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("bookfinder/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build catalog HTTP client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(anyhow!("Catalog base URL must be http(s): '{}'", base_url));
        }
        Ok(Self { client, base_url })
    }

    pub fn from_env() -> Result<Self> {
        let base_url = env::var("CATALOG_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG_BASE.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let res = self
            .client
            .get(url)
            .send()
            .await
            .context("catalog request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading catalog body failed")?;
        if !status.is_success() {
            return Err(anyhow!("{} -> {} {}", url, status, text));
        }
        let parsed: T = serde_json::from_str(&text).context("catalog JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl CatalogApi for GoogleBooksClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<VolumeItem>> {
        let url = search_url(&self.base_url, query, max_results);
        let data: SearchResponse = self.get_json(&url).await?;
        Ok(data.items)
    }

    async fn fetch_volume(&self, id: &str) -> Result<Option<RawVolume>> {
        let url = volume_url(&self.base_url, id);
        let data: VolumeResponse = self.get_json(&url).await?;
        Ok(data.volume_info)
    }
}

fn search_url(base: &str, query: &str, max_results: usize) -> String {
    format!(
        "{base}/volumes?q={}&maxResults={max_results}",
        urlencoding::encode(query)
    )
}

fn volume_url(base: &str, id: &str) -> String {
    format!("{base}/volumes/{}", urlencoding::encode(id))
}
