//! smbc-source: content source for the SMBC webcomic. Maps archive and strip pages
//! into series, chapter, and page records for a comic reader host.

pub mod cli;
pub mod config;
pub mod model;
pub mod source;

// Re-exports for the CLI and hosts.
pub use model::{Chapter, Page, Series, SeriesPage, SeriesStatus};
pub use source::{
    is_text_a_date, AltTextStyle, Capabilities, HostAdapter, Smbc, Source, SourceError,
    SourceInfo,
};
