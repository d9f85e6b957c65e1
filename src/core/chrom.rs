//! Chromosome names and genomic regions

use std::fmt;
use std::str::FromStr;

/// Toggle between the UCSC (`chr1`, `chrM`) and Ensembl (`1`, `MT`) spellings
///
/// # Examples
/// ```
/// use links_track::core::alternate_chrom_name;
///
/// assert_eq!(alternate_chrom_name("chr1"), "1");
/// assert_eq!(alternate_chrom_name("X"), "chrX");
/// assert_eq!(alternate_chrom_name("chrM"), "MT");
/// assert_eq!(alternate_chrom_name("MT"), "chrM");
/// ```
pub fn alternate_chrom_name(chrom: &str) -> String {
    match chrom.strip_prefix("chr") {
        Some("M") => "MT".to_string(),
        Some(rest) => rest.to_string(),
        None if chrom == "MT" => "chrM".to_string(),
        None => format!("chr{}", chrom),
    }
}

/// A half-open genomic window `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl Region {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// Parse `chrom:start-end`; thousands separators (`,`) are accepted
impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chrom, range) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("region '{}' is not of the form chrom:start-end", s))?;
        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| format!("region '{}' is not of the form chrom:start-end", s))?;

        let parse = |v: &str| -> Result<u64, String> {
            v.replace(',', "")
                .parse::<u64>()
                .map_err(|_| format!("invalid coordinate '{}' in region '{}'", v, s))
        };
        let start = parse(start)?;
        let end = parse(end)?;

        if chrom.is_empty() {
            return Err(format!("region '{}' has no chromosome", s));
        }
        if start > end {
            return Err(format!("region '{}' has start > end", s));
        }
        Ok(Region::new(chrom, start, end))
    }
}
