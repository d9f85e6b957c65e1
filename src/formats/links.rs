//! Link file parser
//!
//! Reads tab-separated pairwise interaction files (`.links`, `.arcs`,
//! `.bedpe`, ...) into a per-chromosome [`LinkIndex`].
//!
//! ```text
//! chrom1  start1  end1  chrom2  start2  end2  [score  ...]
//! ```
//!
//! Lines starting with `#`, `track` or `browser` are headers. Columns after
//! the score are ignored. Links between two chromosomes are skipped.

use crate::core::{
    alternate_chrom_name, open_link_reader, KeyMode, LineIterator, LinkIndex, LinkIndexBuilder,
    LinkParseError, LinkPayload, ParseResult, Region, MAX_COORDINATE,
};
use std::collections::HashSet;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// File endings recognized as link files
pub const SUPPORTED_ENDINGS: [&str; 5] = [".arcs", ".arc", ".link", ".links", ".bedpe"];

/// Check whether a file name carries one of the link file endings
///
/// A trailing `.gz` or `.bz2` is ignored.
pub fn is_link_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();
    let name = name
        .strip_suffix(".gz")
        .or_else(|| name.strip_suffix(".bz2"))
        .unwrap_or(&name);
    SUPPORTED_ENDINGS.iter().any(|ending| name.ends_with(ending))
}

/// One interaction record as read from the file
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRecord {
    pub chrom1: String,
    pub start1: u64,
    pub end1: u64,
    pub chrom2: String,
    pub start2: u64,
    pub end2: u64,
    pub score: Option<f64>,
}

impl LinkRecord {
    /// Payload stored in the index, loci ordered by start
    pub fn payload(&self) -> LinkPayload {
        LinkPayload::new(self.start1, self.end1, self.start2, self.end2, self.score)
    }
}

/// State of the optional score column
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreField {
    /// Only six columns
    Absent,
    /// Seventh column present but not a number
    Invalid(String),
    Value(f64),
}

impl ScoreField {
    fn parse(field: Option<&str>) -> Self {
        match field {
            None => ScoreField::Absent,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(v) => ScoreField::Value(v),
                Err(_) => ScoreField::Invalid(raw.to_string()),
            },
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            ScoreField::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// Why a line produced no link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty line
    Blank,
    /// `#`, `track` or `browser` line
    Header,
    /// The two loci lie on different chromosomes
    CrossChromosome { chrom1: String, chrom2: String },
}

/// Non-fatal outcome of parsing one line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Link { record: LinkRecord, score: ScoreField },
    Skipped(SkipReason),
}

/// Check if a line is a header or comment
pub fn is_header_line(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("track") || line.starts_with("browser")
}

/// Coordinate column names and their positions
const COORD_FIELDS: [(&str, usize); 4] = [("start1", 1), ("end1", 2), ("start2", 4), ("end2", 5)];

/// Parse a single line of a link file
///
/// Returns `Err` for the fatal cases: fewer than six columns, a coordinate
/// that is not an integer or exceeds [`MAX_COORDINATE`], or a locus with
/// start > end.
pub fn parse_link_line(line: &str, line_number: usize) -> ParseResult<LineOutcome> {
    if is_header_line(line) {
        return Ok(LineOutcome::Skipped(SkipReason::Header));
    }
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(LineOutcome::Skipped(SkipReason::Blank));
    }

    let fields: Vec<&str> = trimmed.split('\t').collect();
    if fields.len() < 6 {
        return Err(LinkParseError::TooFewFields {
            line: line_number,
            found: fields.len(),
        });
    }

    let chrom1 = fields[0];
    let chrom2 = fields[3];
    if chrom1 != chrom2 {
        return Ok(LineOutcome::Skipped(SkipReason::CrossChromosome {
            chrom1: chrom1.to_string(),
            chrom2: chrom2.to_string(),
        }));
    }

    let mut coords = [0u64; 4];
    for (slot, &(name, idx)) in coords.iter_mut().zip(COORD_FIELDS.iter()) {
        let raw = fields[idx].trim();
        *slot = raw.parse::<u64>().map_err(|_| LinkParseError::InvalidInteger {
            line: line_number,
            field: name,
            value: raw.to_string(),
        })?;
        if *slot > MAX_COORDINATE {
            return Err(LinkParseError::CoordinateOutOfRange {
                line: line_number,
                field: name,
                value: *slot,
                max: MAX_COORDINATE,
            });
        }
    }
    let [start1, end1, start2, end2] = coords;

    if start1 > end1 {
        return Err(LinkParseError::InvalidLocus {
            line: line_number,
            locus: 1,
            start: start1,
            end: end1,
        });
    }
    if start2 > end2 {
        return Err(LinkParseError::InvalidLocus {
            line: line_number,
            locus: 2,
            start: start2,
            end: end2,
        });
    }

    let score = ScoreField::parse(fields.get(6).copied());
    let record = LinkRecord {
        chrom1: chrom1.to_string(),
        start1,
        end1,
        chrom2: chrom2.to_string(),
        start2,
        end2,
        score: score.value(),
    };
    Ok(LineOutcome::Link { record, score })
}

/// Observed score bounds and whether every link carried a usable score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    bounds: Option<(f64, f64)>,
    pub has_score: bool,
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self {
            bounds: None,
            has_score: true,
        }
    }
}

impl ScoreRange {
    /// Fold one score into the bounds; NaN never moves them
    pub fn observe(&mut self, score: f64) {
        if score.is_nan() {
            return;
        }
        self.bounds = Some(match self.bounds {
            None => (score, score),
            Some((min, max)) => (min.min(score), max.max(score)),
        });
    }

    /// Mark the whole file as lacking scores
    pub fn disable(&mut self) {
        self.has_score = false;
    }

    pub fn min_score(&self) -> Option<f64> {
        self.bounds.map(|(min, _)| min)
    }

    pub fn max_score(&self) -> Option<f64> {
        self.bounds.map(|(_, max)| max)
    }
}

/// Counters collected while parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub headers: usize,
    pub blank: usize,
    pub links: usize,
    pub cross_chrom: usize,
    pub filtered: usize,
    pub missing_scores: usize,
    pub invalid_scores: usize,
}

/// Result of parsing a whole link file
#[derive(Debug)]
pub struct LinkFile {
    pub index: LinkIndex,
    pub scores: ScoreRange,
    pub stats: ParseStats,
}

/// Options controlling how a link file is indexed
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub key_mode: KeyMode,
    /// Keep only links on these chromosomes (either spelling)
    pub chroms: Option<HashSet<String>>,
}

impl ParseOptions {
    pub fn new(key_mode: KeyMode) -> Self {
        Self {
            key_mode,
            chroms: None,
        }
    }

    /// Restrict parsing to the chromosomes of the given regions
    ///
    /// Whole chromosomes are kept, not just the windows, so links leaving
    /// a window are not lost.
    pub fn with_regions(mut self, regions: &[Region]) -> Self {
        let mut chroms = HashSet::new();
        for region in regions {
            chroms.insert(region.chrom.clone());
            chroms.insert(alternate_chrom_name(&region.chrom));
        }
        self.chroms = Some(chroms);
        self
    }

    fn keeps(&self, line: &str) -> bool {
        match &self.chroms {
            None => true,
            Some(chroms) => {
                let chrom = line.split('\t').next().unwrap_or("");
                chroms.contains(chrom)
            }
        }
    }
}

/// Parse link lines from a buffered reader
pub fn parse_link_reader<R: BufRead>(reader: R, options: &ParseOptions) -> ParseResult<LinkFile> {
    let mut lines = LineIterator::new(reader);
    let mut builder = LinkIndexBuilder::new(options.key_mode);
    let mut scores = ScoreRange::default();
    let mut stats = ParseStats::default();
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line() {
        let line = line?;
        line_number += 1;
        stats.lines += 1;

        if !is_header_line(line) && !line.trim().is_empty() && !options.keeps(line) {
            stats.filtered += 1;
            continue;
        }

        match parse_link_line(line, line_number)? {
            LineOutcome::Skipped(SkipReason::Header) => stats.headers += 1,
            LineOutcome::Skipped(SkipReason::Blank) => stats.blank += 1,
            LineOutcome::Skipped(SkipReason::CrossChromosome { chrom1, chrom2 }) => {
                log::warn!(
                    "Only links in same chromosome are used. Skipping line {} ({} vs {})",
                    line_number,
                    chrom1,
                    chrom2
                );
                stats.cross_chrom += 1;
            }
            LineOutcome::Link { record, score } => {
                match score {
                    ScoreField::Value(v) => scores.observe(v),
                    ScoreField::Absent => {
                        stats.missing_scores += 1;
                        scores.disable();
                    }
                    ScoreField::Invalid(raw) => {
                        log::warn!(
                            "Line {}: the score '{}' is not valid and will not be used",
                            line_number,
                            raw
                        );
                        stats.invalid_scores += 1;
                        scores.disable();
                    }
                }
                builder.insert(&record.chrom1, record.payload());
                stats.links += 1;
            }
        }
    }

    if stats.links == 0 {
        log::warn!("No valid intervals were found in the link file");
    }
    log::debug!(
        "Indexed {} links ({} cross-chromosome skipped, {} filtered)",
        stats.links,
        stats.cross_chrom,
        stats.filtered
    );

    Ok(LinkFile {
        index: builder.build(),
        scores,
        stats,
    })
}

/// Parse a link file from disk, handling gzip and bzip2 compression
pub fn parse_link_file(path: &Path, options: &ParseOptions) -> ParseResult<LinkFile> {
    if !path.exists() {
        return Err(LinkParseError::FileNotFound(path.to_path_buf()));
    }
    let reader = open_link_reader(path)?;
    parse_link_reader(reader, options)
}

/// Parse link data from bytes (for testing)
pub fn parse_link_bytes(data: &[u8], options: &ParseOptions) -> ParseResult<LinkFile> {
    parse_link_reader(BufReader::new(data), options)
}
