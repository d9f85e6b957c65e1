//! Core link indexing functionality
//!
//! This module contains the error types, link file I/O, chromosome name
//! handling, the per-chromosome interval index and region queries.

mod chrom;
mod error;
mod index;
pub mod io;
mod query;

pub use chrom::{alternate_chrom_name, Region};
pub use error::{
    ConfigError, ConfigResult, LinkParseError, LinksTrackError, ParseResult, Result,
};
pub use index::{
    IndexedInterval, KeyMode, LinkIndex, LinkIndexBuilder, LinkPayload, MAX_COORDINATE,
};
pub use io::{detect_compression, open_link_reader, CompressionFormat, LineIterator};
pub use query::{links_in_region, resolve_chrom, warn_missing_chrom};
