//! Records handed to the host: one series, its chapters, and each chapter's pages.
//!
//! All source operations produce these shapes; the CLI serializes them as JSON.

use serde::{Deserialize, Serialize};

/// Publication status of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesStatus {
    Unknown,
    Ongoing,
    Completed,
}

/// Series metadata. `url` is relative to the source's base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub url: String,
    pub title: String,
    pub author: String,
    pub artist: String,
    pub status: SeriesStatus,
    pub description: String,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,
}

/// One chapter (a single strip for webcomic sources).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Relative URL, always starting with `/`.
    pub url: String,
    pub name: String,
    /// Upload time in milliseconds since the Unix epoch (UTC).
    #[serde(rename = "dateUpload")]
    pub date_upload: i64,
}

/// One image in a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub index: u32,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl Page {
    pub fn new(index: u32, image_url: impl Into<String>) -> Self {
        Self {
            index,
            image_url: image_url.into(),
        }
    }
}

/// A page of series results from a listing or search hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPage {
    pub series: Vec<Series>,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}

impl SeriesPage {
    pub fn empty() -> Self {
        Self {
            series: Vec::new(),
            has_next_page: false,
        }
    }
}
