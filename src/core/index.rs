//! Per-chromosome interval index of links
//!
//! Uses rust-lapper for O(log n + k) overlap queries. Keys are stored in
//! half-base units so that locus midpoints (use-middle mode) stay integral.

use rust_lapper::{Interval, Lapper};
use std::collections::HashMap;

/// Largest coordinate that still fits the doubled key space
pub const MAX_COORDINATE: u64 = u64::MAX / 2;

/// Window bound in half-base units, saturating for out-of-range bounds
fn half(pos: u64) -> u64 {
    pos.saturating_mul(2)
}

/// How the index key of a link is derived from its two loci
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// From the first start to the second end
    #[default]
    Span,
    /// From the midpoint of the first locus to the midpoint of the second
    Middle,
}

impl KeyMode {
    pub fn from_use_middle(use_middle: bool) -> Self {
        if use_middle {
            KeyMode::Middle
        } else {
            KeyMode::Span
        }
    }
}

/// Coordinates of both loci plus the optional score
///
/// After construction through [`LinkPayload::new`] the locus with the
/// smaller start always comes first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkPayload {
    pub start1: u64,
    pub end1: u64,
    pub start2: u64,
    pub end2: u64,
    pub score: Option<f64>,
}

impl LinkPayload {
    /// Build a payload, swapping the loci if the second one starts first
    pub fn new(start1: u64, end1: u64, start2: u64, end2: u64, score: Option<f64>) -> Self {
        if start2 < start1 {
            Self {
                start1: start2,
                end1: end2,
                start2: start1,
                end2: end1,
                score,
            }
        } else {
            Self {
                start1,
                end1,
                start2,
                end2,
                score,
            }
        }
    }
}

/// A link as stored in the index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedInterval {
    half_begin: u64,
    half_end: u64,
    pub payload: LinkPayload,
}

impl IndexedInterval {
    /// Derive the key of a link
    ///
    /// Midpoint keys are ordered, so a locus nested inside the other still
    /// gives `key_begin <= key_end`.
    pub fn new(payload: LinkPayload, mode: KeyMode) -> Self {
        let (half_begin, half_end) = match mode {
            KeyMode::Span => (half(payload.start1), half(payload.end2)),
            KeyMode::Middle => {
                let mid1 = payload.start1.saturating_add(payload.end1);
                let mid2 = payload.start2.saturating_add(payload.end2);
                (mid1.min(mid2), mid1.max(mid2))
            }
        };
        Self {
            half_begin,
            half_end,
            payload,
        }
    }

    /// Start of the index key, in bp
    pub fn key_begin(&self) -> f64 {
        self.half_begin as f64 / 2.0
    }

    /// End of the index key, in bp
    pub fn key_end(&self) -> f64 {
        self.half_end as f64 / 2.0
    }

    /// Key length, in bp
    pub fn key_width(&self) -> f64 {
        self.half_end.saturating_sub(self.half_begin) as f64 / 2.0
    }

    /// True when the key starts before `start` and ends after `end`
    pub fn engulfs(&self, start: u64, end: u64) -> bool {
        self.half_begin < half(start) && self.half_end > half(end)
    }

    fn sort_key(&self) -> (u64, u64) {
        (self.half_begin, self.half_end)
    }
}

/// Links of one chromosome
struct ChromLinks {
    /// Interval value is the position in `intervals`
    lapper: Lapper<u64, usize>,
    intervals: Vec<IndexedInterval>,
}

impl ChromLinks {
    fn new(intervals: Vec<IndexedInterval>) -> Self {
        let lapper = Lapper::new(
            intervals
                .iter()
                .enumerate()
                .map(|(i, iv)| Interval {
                    start: iv.half_begin,
                    stop: iv.half_end,
                    val: i,
                })
                .collect(),
        );
        Self { lapper, intervals }
    }
}

/// Collects links per chromosome and freezes them into a [`LinkIndex`]
#[derive(Debug, Default)]
pub struct LinkIndexBuilder {
    mode: KeyMode,
    pending: HashMap<String, Vec<IndexedInterval>>,
}

impl LinkIndexBuilder {
    pub fn new(mode: KeyMode) -> Self {
        Self {
            mode,
            pending: HashMap::new(),
        }
    }

    /// Add one link; the chromosome entry is created on first use
    pub fn insert(&mut self, chrom: &str, payload: LinkPayload) {
        let interval = IndexedInterval::new(payload, self.mode);
        match self.pending.get_mut(chrom) {
            Some(list) => list.push(interval),
            None => {
                self.pending.insert(chrom.to_string(), vec![interval]);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn build(self) -> LinkIndex {
        let maps = self
            .pending
            .into_iter()
            .map(|(chrom, intervals)| (chrom, ChromLinks::new(intervals)))
            .collect();
        LinkIndex {
            maps,
            mode: self.mode,
        }
    }
}

/// Immutable link index organized by chromosome
///
/// Read-only after construction, so it can be shared between render passes
/// running on different threads.
pub struct LinkIndex {
    maps: HashMap<String, ChromLinks>,
    mode: KeyMode,
}

impl LinkIndex {
    /// Index with no chromosomes
    pub fn empty(mode: KeyMode) -> Self {
        LinkIndexBuilder::new(mode).build()
    }

    pub fn key_mode(&self) -> KeyMode {
        self.mode
    }

    /// Intervals of `chrom` overlapping `[start, end)`, sorted by key
    ///
    /// Exact chromosome name only; see [`crate::core::links_in_region`]
    /// for the lookup with alternate spellings.
    pub fn query_overlaps(&self, chrom: &str, start: u64, end: u64) -> Vec<&IndexedInterval> {
        let Some(links) = self.maps.get(chrom) else {
            return vec![];
        };

        let mut hits: Vec<(usize, &IndexedInterval)> = links
            .lapper
            .find(half(start), half(end))
            .map(|iv| (iv.val, &links.intervals[iv.val]))
            .collect();
        // Insertion order breaks ties so repeated queries agree
        hits.sort_by_key(|(i, iv)| (iv.sort_key(), *i));
        hits.into_iter().map(|(_, iv)| iv).collect()
    }

    /// Check if a chromosome exists in the index (exact name)
    pub fn has_chrom(&self, chrom: &str) -> bool {
        self.maps.contains_key(chrom)
    }

    /// Stored name of `chrom`, if present (exact name)
    pub fn chrom_key(&self, chrom: &str) -> Option<&str> {
        self.maps.get_key_value(chrom).map(|(name, _)| name.as_str())
    }

    /// All chromosome names
    pub fn chroms(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(|s| s.as_str())
    }

    /// All intervals of a chromosome in insertion order
    pub fn intervals(&self, chrom: &str) -> &[IndexedInterval] {
        self.maps
            .get(chrom)
            .map(|l| l.intervals.as_slice())
            .unwrap_or(&[])
    }

    /// Get the number of intervals for a chromosome
    pub fn interval_count(&self, chrom: &str) -> usize {
        self.intervals(chrom).len()
    }

    /// Get total number of intervals across all chromosomes
    pub fn total_intervals(&self) -> usize {
        self.maps.values().map(|l| l.intervals.len()).sum()
    }
}

impl std::fmt::Debug for LinkIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkIndex")
            .field("mode", &self.mode)
            .field("chroms", &self.maps.len())
            .field("intervals", &self.total_intervals())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_index(mode: KeyMode) -> LinkIndex {
        let mut builder = LinkIndexBuilder::new(mode);
        builder.insert("chr1", LinkPayload::new(100, 200, 250, 300, Some(0.5)));
        builder.insert("chr1", LinkPayload::new(1000, 1100, 400, 500, Some(2.0)));
        builder.insert("chr1", LinkPayload::new(5000, 5010, 9000, 9010, None));
        builder.insert("chr2", LinkPayload::new(0, 10, 20, 30, Some(1.0)));
        builder.build()
    }

    #[test]
    fn test_payload_swaps_loci() {
        let p = LinkPayload::new(1000, 1100, 400, 500, None);
        assert_eq!((p.start1, p.end1, p.start2, p.end2), (400, 500, 1000, 1100));
    }

    #[test]
    fn test_span_keys() {
        let iv = IndexedInterval::new(LinkPayload::new(100, 200, 250, 300, Some(0.5)), KeyMode::Span);
        assert_eq!(iv.key_begin(), 100.0);
        assert_eq!(iv.key_end(), 300.0);
        assert_eq!(iv.key_width(), 200.0);
    }

    #[test]
    fn test_middle_keys() {
        let iv = IndexedInterval::new(LinkPayload::new(100, 200, 250, 300, Some(0.5)), KeyMode::Middle);
        assert_eq!(iv.key_begin(), 150.0);
        assert_eq!(iv.key_end(), 275.0);

        let odd = IndexedInterval::new(LinkPayload::new(0, 1, 10, 13, None), KeyMode::Middle);
        assert_eq!(odd.key_begin(), 0.5);
        assert_eq!(odd.key_end(), 11.5);
    }

    #[test]
    fn test_middle_keys_nested_loci() {
        // Midpoints 550 and 250: the key is ordered, not reversed
        let iv = IndexedInterval::new(LinkPayload::new(100, 1000, 200, 300, None), KeyMode::Middle);
        assert_eq!(iv.key_begin(), 250.0);
        assert_eq!(iv.key_end(), 550.0);
        assert_eq!(iv.key_width(), 300.0);
    }

    #[test]
    fn test_huge_window_bounds() {
        let index = create_test_index(KeyMode::Span);
        assert_eq!(index.query_overlaps("chr1", 0, u64::MAX).len(), 3);
        assert!(index.query_overlaps("chr1", u64::MAX - 1, u64::MAX).is_empty());
    }

    #[test]
    fn test_chrom_key() {
        let index = create_test_index(KeyMode::Span);
        assert_eq!(index.chrom_key("chr2"), Some("chr2"));
        assert_eq!(index.chrom_key("2"), None);
    }

    #[test]
    fn test_index_creation() {
        let index = create_test_index(KeyMode::Span);
        assert!(index.has_chrom("chr1"));
        assert!(index.has_chrom("chr2"));
        assert!(!index.has_chrom("chr3"));
        assert_eq!(index.interval_count("chr1"), 3);
        assert_eq!(index.total_intervals(), 4);
    }

    #[test]
    fn test_query_sorted_by_key() {
        let index = create_test_index(KeyMode::Span);
        let hits = index.query_overlaps("chr1", 0, 2000);
        let begins: Vec<f64> = hits.iter().map(|iv| iv.key_begin()).collect();
        assert_eq!(begins, vec![100.0, 400.0]);
    }

    #[test]
    fn test_query_half_open() {
        let index = create_test_index(KeyMode::Span);
        // key [100, 300) does not touch [300, 400)
        let hits = index.query_overlaps("chr1", 300, 400);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key_begin(), 400.0);
        assert!(index.query_overlaps("chr1", 0, 100).is_empty());
    }

    #[test]
    fn test_query_unknown_chrom() {
        let index = create_test_index(KeyMode::Span);
        assert!(index.query_overlaps("chrX", 0, 1_000_000).is_empty());
    }

    #[test]
    fn test_engulfs() {
        let iv = IndexedInterval::new(LinkPayload::new(100, 200, 250, 300, None), KeyMode::Span);
        assert!(iv.engulfs(150, 250));
        assert!(!iv.engulfs(100, 300));
        assert!(!iv.engulfs(100, 250));
    }
}
