//! Error types for LinksTrack
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for LinksTrack operations
#[derive(Debug, Error)]
pub enum LinksTrackError {
    /// Link file parsing errors
    #[error("Link parse error: {0}")]
    Parse(#[from] LinkParseError),

    /// Track configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Fatal errors raised while reading a link file
///
/// Any of these aborts the whole parse.
#[derive(Debug, Error)]
pub enum LinkParseError {
    /// Fewer than the six mandatory columns
    #[error(
        "Line {line}: expected at least 6 tab-separated fields \
         (chrom1 start1 end1 chrom2 start2 end2), got {found}"
    )]
    TooFewFields { line: usize, found: usize },

    /// A coordinate column is not an integer
    #[error("Line {line}: field {field} is not an integer: '{value}'")]
    InvalidInteger {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// A coordinate too large for the index key space
    #[error("Line {line}: field {field} = {value} exceeds the largest supported coordinate ({max})")]
    CoordinateOutOfRange {
        line: usize,
        field: &'static str,
        value: u64,
        max: u64,
    },

    /// A locus whose start lies after its end
    #[error("Line {line}: end{locus} ({end}) is smaller than start{locus} ({start})")]
    InvalidLocus {
        line: usize,
        locus: u8,
        start: u64,
        end: u64,
    },

    /// Link file not found
    #[error("Link file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LinkParseError {
    /// Line number the error points at, if any
    pub fn line_number(&self) -> Option<usize> {
        match self {
            LinkParseError::TooFewFields { line, .. }
            | LinkParseError::InvalidInteger { line, .. }
            | LinkParseError::CoordinateOutOfRange { line, .. }
            | LinkParseError::InvalidLocus { line, .. } => Some(*line),
            LinkParseError::FileNotFound(_) | LinkParseError::Io(_) => None,
        }
    }
}

/// Errors in the track options
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Unknown keyword for an enumerated option
    #[error("Invalid value '{value}' for {option}, expected one of: {expected}")]
    InvalidChoice {
        option: String,
        value: String,
        expected: &'static str,
    },

    /// Value could not be read as a number or boolean
    #[error("Invalid value '{value}' for {option}: {message}")]
    InvalidValue {
        option: String,
        value: String,
        message: String,
    },

    /// Numeric value outside the accepted range
    #[error("{option} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        option: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Option name not recognized by the links track
    #[error("Unknown option: {0}")]
    UnknownOption(String),
}

/// Result type alias for LinksTrack operations
pub type Result<T> = std::result::Result<T, LinksTrackError>;

/// Result type alias for link parsing operations
pub type ParseResult<T> = std::result::Result<T, LinkParseError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
