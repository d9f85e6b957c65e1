//! LinksTrack - genomic interaction links for genome browser tracks
//!
//! Indexes pairwise interaction files (`.links`, `.arcs`, `.bedpe`) per
//! chromosome and turns the links visible in a window into arcs, triangles
//! or loop outlines for a drawing surface.
//!
//! # Features
//!
//! - Interval index per chromosome with O(log n + k) window queries
//! - Span or locus-midpoint keys
//! - Three height compaction levels for arcs and triangles
//! - Fixed colors or score colormaps
//! - Support for compressed link files (gzip, bzip2)
//!
//! # Example
//!
//! ```ignore
//! use links_track::{LinksTrack, RecordingSurface, TrackConfig};
//!
//! let config = TrackConfig::from_pairs([("links_type", "triangles"), ("color", "viridis")])?;
//! let track = LinksTrack::from_path("contacts.links".as_ref(), config, None)?;
//!
//! let mut surface = RecordingSurface::new();
//! let summary = track.plot(&mut surface, "chr1", 1_000_000, 2_000_000);
//! ```

pub mod config;
pub mod core;
pub mod formats;
pub mod render;

// Re-export commonly used types
pub use config::{CompactLevel, LineStyle, LinksType, Orientation, TrackConfig};
pub use core::{
    ConfigError, IndexedInterval, KeyMode, LinkIndex, LinkParseError, LinkPayload,
    LinksTrackError, Region, Result,
};
pub use formats::{parse_link_file, LinkFile, ParseOptions, ScoreRange};
pub use render::{DrawingSurface, LinkShape, LinksTrack, RecordingSurface, RenderSummary};
