//! SMBC adapter. Archive page → chapters (one per strip), strip page → up to three pages:
//! the comic, the bonus "votey" panel, and the hover text rendered as an image.

use crate::model::{Chapter, Page, Series, SeriesStatus};
use crate::source::alt_text::{is_text_a_date, AltTextStyle};
use crate::source::date::parse_listing_date;
use crate::source::{parse_selector, Capabilities, Source, SourceError, SourceInfo};
use scraper::{ElementRef, Html};

const SMBC_BASE: &str = "https://www.smbc-comics.com";
const ARCHIVE_PATH: &str = "/comic/archive/";
const THUMBNAIL_URL: &str = "https://s3.amazonaws.com/tachiyomi.kj800x.com/smbc/cover.png";
const DESCRIPTION: &str = "Saturday Morning Breakfast Cereal is a webcomic by Zach Weinersmith. It features few recurring characters or storylines, and has no set format; some strips may be a single panel, while others may go on for ten panels or more. Recurring themes in SMBC include atheism, God, superheroes, romance, dating, science, research, parenting and the meaning of life.";

const CHAPTER_OPTION_SELECTOR: &str = "select[name='comic'] option";
const COMIC_IMAGE_SELECTOR: &str = "#cc-comicbody img";
const AFTER_COMIC_IMAGE_SELECTOR: &str = "#aftercomic img";

/// Separator between the date and the title in archive option text.
const TITLE_SEPARATOR: &str = " - ";

const COMIC_PAGE: u32 = 0;
const AFTER_COMIC_PAGE: u32 = 1;
const ALT_TEXT_PAGE: u32 = 2;

/// Saturday Morning Breakfast Cereal.
#[derive(Debug, Clone, Default)]
pub struct Smbc {
    alt_text_style: AltTextStyle,
}

impl Smbc {
    pub fn new(alt_text_style: AltTextStyle) -> Self {
        Self { alt_text_style }
    }

    pub fn alt_text_style(&self) -> &AltTextStyle {
        &self.alt_text_style
    }

    /// Rendering URL for a strip's hover text.
    pub fn build_alt_text_url(&self, alt_text: &str) -> String {
        self.alt_text_style.build_alt_text_url(alt_text)
    }
}

/// One archive `<option>`: `value="comic/slug"`, text `September 3, 2020 - Title`.
/// Returns None for anything that does not fit that shape.
fn parse_chapter_option(option: &ElementRef<'_>) -> Option<Chapter> {
    let text = option.text().collect::<String>();
    let text = text.trim();
    let (date, name) = text.split_once(TITLE_SEPARATOR)?;
    let date_upload = parse_listing_date(date)?;

    let value = option.value().attr("value")?.trim().trim_start_matches('/');
    if value.is_empty() {
        return None;
    }

    Some(Chapter {
        url: format!("/{}", value),
        name: name.trim().to_string(),
        date_upload,
    })
}

impl Source for Smbc {
    fn info(&self) -> SourceInfo {
        SourceInfo {
            name: "SMBC",
            base_url: SMBC_BASE,
            lang: "en",
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            supports_details: true,
            supports_chapter_list: true,
            supports_multi_image_pages: true,
            supports_search: false,
            supports_latest: false,
        }
    }

    fn series(&self) -> Series {
        Series {
            url: ARCHIVE_PATH.to_string(),
            title: "SMBC".to_string(),
            author: "Zach Weinersmith".to_string(),
            artist: "Zach Weinersmith".to_string(),
            status: SeriesStatus::Ongoing,
            description: DESCRIPTION.to_string(),
            thumbnail_url: THUMBNAIL_URL.to_string(),
        }
    }

    fn chapter_list(&self, listing: &Html) -> Result<Vec<Chapter>, SourceError> {
        let option_sel = parse_selector(CHAPTER_OPTION_SELECTOR)?;
        let options: Vec<ElementRef<'_>> = listing.select(&option_sel).collect();
        let total = options.len();

        // The archive lists newest first.
        let chapters: Vec<Chapter> = options
            .iter()
            .rev()
            .filter_map(|option| {
                let chapter = parse_chapter_option(option);
                if chapter.is_none() {
                    log::debug!(
                        "skipping archive entry {:?}",
                        option.text().collect::<String>().trim()
                    );
                }
                chapter
            })
            .collect();

        if chapters.len() < total {
            log::debug!("archive: kept {} of {} entries", chapters.len(), total);
        }
        Ok(chapters)
    }

    fn page_list(&self, chapter: &Html) -> Result<Vec<Page>, SourceError> {
        let comic_sel = parse_selector(COMIC_IMAGE_SELECTOR)?;
        let after_sel = parse_selector(AFTER_COMIC_IMAGE_SELECTOR)?;

        let comic = chapter.select(&comic_sel).next();
        let src = comic
            .and_then(|img| img.value().attr("src"))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SourceError::MissingComicImage {
                selector: COMIC_IMAGE_SELECTOR.to_string(),
            })?;

        let mut pages = vec![Page::new(COMIC_PAGE, src)];

        match chapter
            .select(&after_sel)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(after_src) => pages.push(Page::new(AFTER_COMIC_PAGE, after_src)),
            None => log::debug!("no after-comic image"),
        }

        let alt_text = comic
            .and_then(|img| img.value().attr("title"))
            .map(str::trim)
            .filter(|s| !s.is_empty() && !is_text_a_date(s));
        match alt_text {
            Some(text) => pages.push(Page::new(ALT_TEXT_PAGE, self.build_alt_text_url(text))),
            None => log::debug!("no usable alt text"),
        }

        Ok(pages)
    }
}
