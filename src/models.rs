use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVolume {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub authors: Option<Vec<String>>,
    pub published_date: Option<String>,
    pub categories: Option<Vec<String>>,
    pub image_links: Option<ImageLinks>,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeItem {
    pub id: String,
    pub volume_info: Option<RawVolume>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayBook {
    pub title: String,
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
    pub publish_date: Option<String>,
    pub categories: Vec<String>,
    pub cover_url: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    pub isbn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub thumbnail: Option<String>,
    pub isbn: Option<String>,
}
