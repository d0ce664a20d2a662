use std::fmt;

use crate::error::{PatError, Result};
use crate::UNKNOWN;

/// Methylation pattern of a read (or read pair) anchored at the CpG index of its first site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRecord {
    pub chrom: String,
    pub start: u64,
    pub pattern: Vec<u8>,
}

pub fn pack(chrom: &str, start: u64, pattern: Vec<u8>) -> PatternRecord {
    PatternRecord {
        chrom: chrom.to_string(),
        start,
        pattern,
    }
}

/// Removes trailing and then leading UNKNOWN symbols, e.g. `..CT.C...` -> `CT.C`.
/// Returns the number of leading symbols removed, or `None` if nothing informative is left.
pub fn strip_pattern(pattern: &mut Vec<u8>) -> Option<usize> {
    let end = match pattern.iter().rposition(|&b| b != UNKNOWN) {
        Some(idx) => idx + 1,
        None => {
            pattern.clear();
            return None;
        }
    };
    pattern.truncate(end);

    let shift = pattern.iter().position(|&b| b != UNKNOWN).unwrap_or(0);
    pattern.drain(..shift);
    Some(shift)
}

impl PatternRecord {
    /// Parses `chrom`, `start` and `pattern` from the first three tokens.
    pub fn from_tokens(tokens: &[&str]) -> Result<PatternRecord> {
        if tokens.len() < 3 {
            return Err(PatError::InvalidRecord(format!(
                "expected chrom, start and pattern, got {} fields",
                tokens.len()
            )));
        }
        let start = tokens[1]
            .parse::<u64>()
            .map_err(|_| PatError::InvalidNumber(tokens[1].to_string()))?;
        let record = pack(tokens[0], start, tokens[2].as_bytes().to_vec());
        record.end()?;
        Ok(record)
    }

    /// Strips the pattern and moves `start` accordingly.
    /// `None` when the pattern holds no call at all.
    pub fn into_stripped(mut self) -> Option<PatternRecord> {
        let shift = strip_pattern(&mut self.pattern)?;
        // shift < len, so this only saturates for records whose end() fails.
        self.start = self.start.saturating_add(shift as u64);
        Some(self)
    }

    /// CpG index one past the last site.
    pub fn end(&self) -> Result<u64> {
        self.start
            .checked_add(self.pattern.len() as u64)
            .ok_or_else(|| {
                PatError::InvalidRecord(format!(
                    "pattern of {} sites at {} overflows the CpG index",
                    self.pattern.len(),
                    self.start
                ))
            })
    }

    /// Number of sites holding a call.
    pub fn informative_sites(&self) -> usize {
        self.pattern.iter().filter(|&&b| b != UNKNOWN).count()
    }
}

impl fmt::Display for PatternRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.chrom,
            self.start,
            String::from_utf8_lossy(&self.pattern)
        )
    }
}
