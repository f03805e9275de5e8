//! CLI parsing and orchestration. Reads a saved SMBC page (file or stdin), runs one
//! source operation, and prints the records as JSON or text. Maps errors to exit codes.

use crate::config;
use crate::model::{Chapter, Page, Series};
use crate::source::{AltTextStyle, HostAdapter, Smbc, Source, SourceError};
use clap::{Parser, Subcommand};
use scraper::Html;
use std::io::{Read, Write};
use std::path::PathBuf;
use thiserror::Error;

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Cannot read input {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) | CliRunError::Input { .. } => 1,
            CliRunError::Source(_) => 2,
            CliRunError::Json(_) | CliRunError::Write(_) => 3,
        }
    }
}

/// Output format selector for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "smbc-source")]
#[command(about = "Parse saved SMBC pages into series, chapter, and page records")]
#[command(
    after_help = "Config file keys (alt_text_width, alt_text_height, alt_text_background, alt_text_foreground, alt_text_font, alt_text_font_size) are read from ./smbc-source.toml or the user config directory. CLI flags override config."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output format: json or text.
    #[arg(long, global = true, default_value = "text", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Alt-text font (overrides config).
    #[arg(long, global = true)]
    pub font: Option<String>,

    /// Alt-text font size (overrides config).
    #[arg(long, global = true)]
    pub font_size: Option<u32>,

    /// Debug logging and full error chain.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show source name, base URL, language, and capabilities.
    Info,
    /// Show the series record.
    Series,
    /// Parse a saved archive page into chapters (oldest first). Use - for stdin.
    Chapters { input: String },
    /// Parse a saved strip page into pages. Use - for stdin.
    Pages { input: String },
    /// Print the rendering URL for a piece of alt text.
    AltText { text: String },
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "text" | "txt" => Ok(OutputFormat::Text),
        _ => Err(format!("Invalid --format value: '{}'. Use json or text.", s)),
    }
}

/// Config file style with --font / --font-size applied on top.
fn resolve_style(args: &Args) -> Result<AltTextStyle, CliRunError> {
    let config = config::load_config().map_err(CliRunError::InvalidInput)?;
    let mut style = config.map(|c| c.alt_text_style()).unwrap_or_default();
    if let Some(font) = &args.font {
        if font.trim().is_empty() {
            return Err(CliRunError::InvalidInput(
                "Invalid --font: must not be empty.".to_string(),
            ));
        }
        style.font = font.clone();
    }
    if let Some(size) = args.font_size {
        if size == 0 {
            return Err(CliRunError::InvalidInput(
                "Invalid --font-size: must be greater than 0.".to_string(),
            ));
        }
        style.font_size = size;
    }
    Ok(style)
}

fn read_input(input: &str) -> Result<String, CliRunError> {
    if input == "-" {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .map_err(|e| CliRunError::Input {
                path: PathBuf::from("<stdin>"),
                source: e,
            })?;
        return Ok(s);
    }
    let path = PathBuf::from(input);
    std::fs::read_to_string(&path).map_err(|e| CliRunError::Input { path, source: e })
}

fn format_date(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn series_text(series: &Series) -> String {
    let status = serde_json::to_value(series.status)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_default();
    format!(
        "Title: {}\nAuthor: {}\nArtist: {}\nStatus: {}\nURL: {}\nThumbnail: {}\n\n{}\n",
        series.title,
        series.author,
        series.artist,
        status,
        series.url,
        series.thumbnail_url,
        series.description
    )
}

fn chapters_text(chapters: &[Chapter]) -> String {
    chapters
        .iter()
        .map(|c| format!("{}\t{}\t{}\n", format_date(c.date_upload), c.url, c.name))
        .collect()
}

fn pages_text(pages: &[Page]) -> String {
    pages
        .iter()
        .map(|p| format!("{}\t{}\n", p.index, p.image_url))
        .collect()
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

/// Run one command against `adapter`, writing the result to `out`.
fn execute<W: Write>(
    command: &Command,
    format: OutputFormat,
    adapter: &HostAdapter<Smbc>,
    out: &mut W,
) -> Result<(), CliRunError> {
    let rendered = match command {
        Command::Info => {
            let info = adapter.source().info();
            let caps = adapter.source().capabilities();
            match format {
                OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                    "info": info,
                    "capabilities": caps,
                }))?,
                OutputFormat::Text => format!(
                    "Name: {}\nBase URL: {}\nLanguage: {}\nDetails: {}\nChapter list: {}\nMulti-image pages: {}\nSearch: {}\nLatest: {}",
                    info.name,
                    info.base_url,
                    info.lang,
                    yes_no(caps.supports_details),
                    yes_no(caps.supports_chapter_list),
                    yes_no(caps.supports_multi_image_pages),
                    yes_no(caps.supports_search),
                    yes_no(caps.supports_latest)
                ),
            }
        }
        Command::Series => {
            let series = adapter.series_details()?;
            match format {
                OutputFormat::Json => serde_json::to_string_pretty(&series)?,
                OutputFormat::Text => series_text(&series),
            }
        }
        Command::Chapters { input } => {
            let doc = Html::parse_document(&read_input(input)?);
            let chapters = adapter.chapter_list(&doc)?;
            log::info!("parsed {} chapters from {}", chapters.len(), input);
            match format {
                OutputFormat::Json => serde_json::to_string_pretty(&chapters)?,
                OutputFormat::Text => chapters_text(&chapters),
            }
        }
        Command::Pages { input } => {
            let doc = Html::parse_document(&read_input(input)?);
            let pages = adapter.page_list(&doc)?;
            match format {
                OutputFormat::Json => serde_json::to_string_pretty(&pages)?,
                OutputFormat::Text => pages_text(&pages),
            }
        }
        Command::AltText { text } => {
            if text.trim().is_empty() {
                return Err(CliRunError::InvalidInput(
                    "Alt text must not be empty.".to_string(),
                ));
            }
            let url = adapter.source().build_alt_text_url(text);
            match format {
                OutputFormat::Json => {
                    serde_json::to_string_pretty(&serde_json::json!({ "url": url }))?
                }
                OutputFormat::Text => url,
            }
        }
    };
    writeln!(out, "{}", rendered.trim_end())?;
    Ok(())
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    let style = resolve_style(args)?;
    let adapter = HostAdapter::new(Smbc::new(style));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&args.command, args.format, &adapter, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(command: Command, format: OutputFormat) -> Result<String, CliRunError> {
        let adapter = HostAdapter::new(Smbc::default());
        let mut out = Vec::new();
        execute(&command, format, &adapter, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn temp_html(name: &str, html: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "smbc_source_cli_{}_{}.html",
            name,
            std::process::id()
        ));
        std::fs::write(&path, html).unwrap();
        path
    }

    #[test]
    fn parse_format_all() {
        assert_eq!(parse_format("json").unwrap(), OutputFormat::Json);
        assert_eq!(parse_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_format("text").unwrap(), OutputFormat::Text);
        assert_eq!(parse_format("txt").unwrap(), OutputFormat::Text);
    }

    #[test]
    fn parse_format_invalid() {
        assert!(parse_format("epub").is_err());
    }

    #[test]
    fn args_parse_subcommands() {
        let args = Args::try_parse_from(["smbc-source", "--format", "json", "pages", "-"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(
            args.command,
            Command::Pages {
                input: "-".to_string()
            }
        );
        let args = Args::try_parse_from(["smbc-source", "alt-text", "hello there", "--font-size", "30"])
            .unwrap();
        assert_eq!(args.font_size, Some(30));
        assert_eq!(args.format, OutputFormat::Text);
        assert!(Args::try_parse_from(["smbc-source", "search", "x"]).is_err());
    }

    #[test]
    fn series_json() -> Result<(), Box<dyn std::error::Error>> {
        let out = run_to_string(Command::Series, OutputFormat::Json)?;
        let value: serde_json::Value = serde_json::from_str(&out)?;
        assert_eq!(value["title"].as_str(), Some("SMBC"));
        assert_eq!(value["status"].as_str(), Some("ongoing"));
        assert_eq!(value["url"].as_str(), Some("/comic/archive/"));
        Ok(())
    }

    #[test]
    fn series_text_lists_fields() -> Result<(), CliRunError> {
        let out = run_to_string(Command::Series, OutputFormat::Text)?;
        assert!(out.starts_with("Title: SMBC\n"));
        assert!(out.contains("Status: ongoing\n"));
        Ok(())
    }

    #[test]
    fn info_text_reports_capabilities() -> Result<(), CliRunError> {
        let out = run_to_string(Command::Info, OutputFormat::Text)?;
        assert!(out.contains("Base URL: https://www.smbc-comics.com\n"));
        assert!(out.contains("Search: no\n"));
        assert!(out.ends_with("Latest: no\n"));
        Ok(())
    }

    #[test]
    fn chapters_from_file() -> Result<(), CliRunError> {
        let path = temp_html(
            "chapters",
            r#"<select name="comic"><option value="comic/b">September 4, 2020 - B</option><option value="comic/a">September 3, 2020 - A</option><option value="x">junk</option></select>"#,
        );
        let out = run_to_string(
            Command::Chapters {
                input: path.display().to_string(),
            },
            OutputFormat::Text,
        );
        std::fs::remove_file(&path).ok();
        assert_eq!(out?, "2020-09-03\t/comic/a\tA\n2020-09-04\t/comic/b\tB\n");
        Ok(())
    }

    #[test]
    fn pages_json_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let path = temp_html(
            "pages",
            r#"<div id="cc-comicbody"><img src="/c.png" title="joke"></div>"#,
        );
        let out = run_to_string(
            Command::Pages {
                input: path.display().to_string(),
            },
            OutputFormat::Json,
        );
        std::fs::remove_file(&path).ok();
        let value: serde_json::Value = serde_json::from_str(&out?)?;
        let pages = value.as_array().ok_or("expected array")?;
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0]["imageUrl"].as_str(), Some("/c.png"));
        assert_eq!(pages[1]["index"].as_u64(), Some(2));
        Ok(())
    }

    #[test]
    fn pages_without_comic_image_is_source_error() {
        let path = temp_html("nocomic", "<html><body><p>gone</p></body></html>");
        let result = run_to_string(
            Command::Pages {
                input: path.display().to_string(),
            },
            OutputFormat::Text,
        );
        std::fs::remove_file(&path).ok();
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            CliRunError::Source(SourceError::MissingComicImage { .. })
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_input_file_is_input_error() {
        let err = run_to_string(
            Command::Chapters {
                input: "/nonexistent_dir_smbc_source_xyz/archive.html".to_string(),
            },
            OutputFormat::Text,
        )
        .unwrap_err();
        assert!(matches!(err, CliRunError::Input { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn alt_text_prints_url() -> Result<(), CliRunError> {
        let out = run_to_string(
            Command::AltText {
                text: "A B".to_string(),
            },
            OutputFormat::Text,
        )?;
        assert_eq!(
            out,
            "https://fakeimg.pl/1500x2126/ffffff/000000/?font_size=42&font=museo&text=A+B+%0A%0A\n"
        );
        Ok(())
    }

    #[test]
    fn blank_alt_text_is_invalid_input() {
        let err = run_to_string(
            Command::AltText {
                text: "  ".to_string(),
            },
            OutputFormat::Text,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn format_date_is_utc_day() {
        assert_eq!(format_date(1_599_091_200_000), "2020-09-03");
        assert_eq!(format_date(0), "1970-01-01");
    }

    #[test]
    fn cli_run_error_exit_codes() {
        assert_eq!(CliRunError::InvalidInput("x".into()).exit_code(), 1);
        assert_eq!(
            CliRunError::Source(SourceError::Unsupported {
                operation: "latest updates"
            })
            .exit_code(),
            2
        );
        assert_eq!(
            CliRunError::Write(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "x"))
                .exit_code(),
            3
        );
    }
}
