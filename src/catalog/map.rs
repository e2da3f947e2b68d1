use std::collections::HashSet;
use tracing::debug;

use crate::models::{DisplayBook, IndustryIdentifier, RawVolume, SearchResultItem, VolumeItem};
use crate::text::{normalize_title, process_categories, sanitize_html};

pub const MAX_RESULTS: usize = 9;
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

// A volume without a title is treated as not found.
pub fn display_book(volume: RawVolume) -> Option<DisplayBook> {
    let title = volume.title.as_deref()?;
    let isbn = preferred_isbn(&volume.industry_identifiers);
    let categories = process_categories(volume.categories.as_deref());
    Some(DisplayBook {
        title: normalize_title(title),
        subtitle: non_empty(volume.subtitle).map(|s| normalize_title(&s)),
        authors: authors_or_placeholder(volume.authors),
        publish_date: non_empty(volume.published_date),
        categories,
        cover_url: volume.image_links.and_then(|l| l.thumbnail),
        description: non_empty(volume.description).map(|d| sanitize_html(&d)),
        page_count: volume.page_count,
        isbn,
    })
}

pub fn dedupe_and_cap(items: &[VolumeItem]) -> Vec<SearchResultItem> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::with_capacity(MAX_RESULTS.min(items.len()));
    for item in items {
        if out.len() >= MAX_RESULTS {
            break;
        }
        let Some(volume) = item.volume_info.as_ref() else {
            debug!("Skipping search hit {} without volumeInfo", item.id);
            continue;
        };
        let Some(title) = volume.title.as_deref() else {
            debug!("Skipping search hit {} without title", item.id);
            continue;
        };
        if !seen.insert(title) {
            continue;
        }
        out.push(SearchResultItem {
            id: item.id.clone(),
            title: title.to_string(),
            authors: authors_or_placeholder(volume.authors.clone()),
            thumbnail: volume.image_links.as_ref().and_then(|l| l.thumbnail.clone()),
            isbn: preferred_isbn(&volume.industry_identifiers),
        });
    }
    out
}

pub fn preferred_isbn(identifiers: &[IndustryIdentifier]) -> Option<String> {
    let find = |kind: &str| {
        identifiers
            .iter()
            .find(|id| id.kind == kind)
            .map(|id| id.identifier.clone())
    };
    find("ISBN_13").or_else(|| find("ISBN_10"))
}

fn authors_or_placeholder(authors: Option<Vec<String>>) -> Vec<String> {
    match authors {
        Some(list) if !list.is_empty() => list,
        _ => vec![UNKNOWN_AUTHOR.to_string()],
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
