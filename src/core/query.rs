//! Region queries against a [`LinkIndex`]

use crate::core::chrom::alternate_chrom_name;
use crate::core::index::{IndexedInterval, LinkIndex};

/// Resolve the chromosome name used by the index
///
/// Tries the name as given, then its alternate spelling (`chr1` / `1`).
pub fn resolve_chrom<'a>(index: &'a LinkIndex, chrom: &str) -> Option<&'a str> {
    index
        .chrom_key(chrom)
        .or_else(|| index.chrom_key(&alternate_chrom_name(chrom)))
}

/// Warn that neither spelling of `chrom` is in the index
pub fn warn_missing_chrom(chrom: &str) {
    log::warn!(
        "Neither {} nor {} exists as a chromosome name inside the link file. \
         This will generate an empty track",
        chrom,
        alternate_chrom_name(chrom)
    );
}

/// Links to draw for the window `[start, end)` of `chrom`
///
/// Results are sorted by key begin. Links whose key starts before the
/// window and ends after it are dropped. An unknown chromosome yields an
/// empty list and a warning.
pub fn links_in_region<'a>(
    index: &'a LinkIndex,
    chrom: &str,
    start: u64,
    end: u64,
) -> Vec<&'a IndexedInterval> {
    let Some(resolved) = resolve_chrom(index, chrom) else {
        warn_missing_chrom(chrom);
        return vec![];
    };

    index
        .query_overlaps(resolved, start, end)
        .into_iter()
        .filter(|iv| !iv.engulfs(start, end))
        .collect()
}
