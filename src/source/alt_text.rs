//! Alt-text pages: the strip's hover text rendered as an image by an external
//! text-to-image service. Only the URL is built here; the host's image loader
//! fetches it like any other page.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens per rendered line.
const WORDS_PER_LINE: usize = 7;
const LINE_BREAK: &str = "%0A";

static DATE_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Canvas and typeface passed to the rendering service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltTextStyle {
    pub width: u32,
    pub height: u32,
    /// Background color, hex without `#`.
    pub background: String,
    /// Text color, hex without `#`.
    pub foreground: String,
    pub font: String,
    pub font_size: u32,
}

impl Default for AltTextStyle {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 2126,
            background: "ffffff".to_string(),
            foreground: "000000".to_string(),
            font: "museo".to_string(),
            font_size: 42,
        }
    }
}

impl AltTextStyle {
    /// Service URL up to and including the `text=` parameter.
    pub fn base_url(&self) -> String {
        format!(
            "https://fakeimg.pl/{}x{}/{}/{}/?font_size={}&font={}&text=",
            self.width,
            self.height,
            self.background,
            self.foreground,
            self.font_size,
            urlencoding::encode(&self.font)
        )
    }

    /// Build the rendering URL for `alt_text`.
    ///
    /// Words are joined with `+`, a line break is inserted before every eighth,
    /// fifteenth, ... word, and two line breaks close the text.
    pub fn build_alt_text_url(&self, alt_text: &str) -> String {
        let mut text = String::with_capacity(alt_text.len() * 2);
        for (count, word) in alt_text.split_whitespace().enumerate() {
            if count != 0 && count % WORDS_PER_LINE == 0 {
                text.push_str(LINE_BREAK);
            }
            text.push_str(&urlencoding::encode(word));
            text.push('+');
        }
        text.push_str(LINE_BREAK);
        text.push_str(LINE_BREAK);
        format!("{}{}", self.base_url(), text)
    }
}

/// True when the text is exactly a `YYYY-MM-DD` date, which the site uses as
/// placeholder hover text.
pub fn is_text_a_date(text: &str) -> bool {
    DATE_TEXT.is_match(text)
}
