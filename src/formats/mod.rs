//! File format adapters
//!
//! Readers for pairwise interaction (link) files.

pub mod links;

pub use links::{
    is_link_file, parse_link_bytes, parse_link_file, parse_link_line, parse_link_reader,
    LineOutcome, LinkFile, LinkRecord, ParseOptions, ParseStats, ScoreField, ScoreRange,
    SkipReason, SUPPORTED_ENDINGS,
};
