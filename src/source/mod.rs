//! Content sources. The narrow [Source] trait, its capability flags, and the
//! [HostAdapter] that answers the host's full hook set.

mod error;

pub mod alt_text;
pub mod date;
pub mod smbc;

pub use alt_text::{is_text_a_date, AltTextStyle};
pub use error::SourceError;
pub use smbc::Smbc;

use crate::model::{Chapter, Page, Series, SeriesPage};
use scraper::{Html, Selector};
use url::Url;

/// Parse a CSS selector or return an error (avoids panics from Selector::parse).
pub(crate) fn parse_selector(sel: &str) -> Result<Selector, SourceError> {
    Selector::parse(sel).map_err(|e| SourceError::InvalidSelector {
        selector: sel.to_string(),
        reason: e.to_string(),
    })
}

/// Resolve `path` against `base`.
pub fn absolute_url(base: &str, path: &str) -> Result<String, SourceError> {
    let base_url = Url::parse(base).map_err(|e| SourceError::InvalidUrl {
        input: base.to_string(),
        reason: e.to_string(),
    })?;
    base_url
        .join(path)
        .map(|u| u.to_string())
        .map_err(|e| SourceError::InvalidUrl {
            input: path.to_string(),
            reason: e.to_string(),
        })
}

/// Identity of a source as shown by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SourceInfo {
    pub name: &'static str,
    #[serde(rename = "baseUrl")]
    pub base_url: &'static str,
    pub lang: &'static str,
}

/// What the host may ask of a source. Hooks outside these flags are answered
/// with [SourceError::Unsupported].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub supports_details: bool,
    pub supports_chapter_list: bool,
    pub supports_multi_image_pages: bool,
    pub supports_search: bool,
    pub supports_latest: bool,
}

/// Operations a source actually implements. Documents are fetched and parsed by
/// the host; every method is a pure function of its input.
pub trait Source {
    fn info(&self) -> SourceInfo;

    fn capabilities(&self) -> Capabilities;

    /// Metadata for the source's series.
    fn series(&self) -> Series;

    /// Chapters from the listing document, oldest first.
    fn chapter_list(&self, listing: &Html) -> Result<Vec<Chapter>, SourceError>;

    /// Ordered pages for one chapter document.
    fn page_list(&self, chapter: &Html) -> Result<Vec<Page>, SourceError>;
}

/// Host-facing layer over a [Source]: maps every host hook either to a source
/// operation, a fixed answer, or [SourceError::Unsupported].
pub struct HostAdapter<S> {
    source: S,
}

impl<S: Source> HostAdapter<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Single-series sources list just their series, with no further pages.
    pub fn popular_series(&self, _page: u32) -> SeriesPage {
        SeriesPage {
            series: vec![self.source.series()],
            has_next_page: false,
        }
    }

    pub fn search_series(&self, _page: u32, query: &str) -> SeriesPage {
        if !self.source.capabilities().supports_search {
            log::debug!("search for {:?} ignored: source has no search", query);
        }
        SeriesPage::empty()
    }

    pub fn latest_updates(&self, _page: u32) -> Result<SeriesPage, SourceError> {
        if !self.source.capabilities().supports_latest {
            return Err(SourceError::Unsupported {
                operation: "latest updates",
            });
        }
        Ok(self.popular_series(1))
    }

    pub fn series_details(&self) -> Result<Series, SourceError> {
        if !self.source.capabilities().supports_details {
            return Err(SourceError::Unsupported {
                operation: "series details",
            });
        }
        Ok(self.source.series())
    }

    pub fn chapter_list(&self, listing: &Html) -> Result<Vec<Chapter>, SourceError> {
        if !self.source.capabilities().supports_chapter_list {
            return Err(SourceError::Unsupported {
                operation: "chapter list",
            });
        }
        self.source.chapter_list(listing)
    }

    pub fn page_list(&self, chapter: &Html) -> Result<Vec<Page>, SourceError> {
        self.source.page_list(chapter)
    }

    /// Page lists already carry final image URLs, so there is no per-page
    /// document to resolve.
    pub fn image_url(&self, _page_document: &Html) -> Result<String, SourceError> {
        Err(SourceError::Unsupported {
            operation: "image url from page document",
        })
    }

    /// Absolute URL of the document [Source::chapter_list] expects.
    pub fn chapter_list_url(&self) -> Result<String, SourceError> {
        absolute_url(self.source.info().base_url, &self.source.series().url)
    }

    /// Absolute URL of the document [Source::page_list] expects for `chapter`.
    pub fn chapter_url(&self, chapter: &Chapter) -> Result<String, SourceError> {
        absolute_url(self.source.info().base_url, &chapter.url)
    }
}
