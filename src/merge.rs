use std::cmp::max;

use log::debug;

use crate::error::{PatError, Result};
use crate::pattern::{strip_pattern, PatternRecord};
use crate::UNKNOWN;

pub const DEFAULT_MAX_MERGED_PATTERN_LENGTH: usize = 300;
pub const DEFAULT_MIN_CPG: usize = 1;

#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Merges spanning more CpG sites than this are rejected as invalid pairings.
    pub max_merged_pattern_length: usize,
    /// Records with fewer informative sites are not written.
    pub min_cpg: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            max_merged_pattern_length: DEFAULT_MAX_MERGED_PATTERN_LENGTH,
            min_cpg: DEFAULT_MIN_CPG,
        }
    }
}

/// Merges the patterns of two mates into a single record.
/// Either mate may be missing, in which case the other one is returned.
/// Sites where both mates have a call but disagree become UNKNOWN.
/// Returns `Ok(None)` if the merged pattern has no call left.
pub fn merge_paired(
    record_1: Option<PatternRecord>,
    record_2: Option<PatternRecord>,
    config: &MergeConfig,
) -> Result<Option<PatternRecord>> {
    let (first, second) = match (record_1, record_2) {
        (None, other) | (other, None) => return Ok(other),
        (Some(r1), Some(r2)) => {
            if r1.start > r2.start {
                (r2, r1)
            } else {
                (r1, r2)
            }
        }
    };

    let last_site = max(first.end()?, second.end()?);
    let length = last_site - first.start;
    let max_length = config.max_merged_pattern_length as u64;
    if length > max_length {
        return Err(PatError::MergedPatternTooLong {
            length,
            max: max_length,
        });
    }

    let mut merged = vec![UNKNOWN; length as usize];
    merged[..first.pattern.len()].copy_from_slice(&first.pattern);

    let offset = (second.start - first.start) as usize;
    for (site, &call) in merged[offset..].iter_mut().zip(second.pattern.iter()) {
        if *site == UNKNOWN {
            *site = call;
        } else if call != UNKNOWN && *site != call {
            *site = UNKNOWN;
        }
    }

    let shift = match strip_pattern(&mut merged) {
        Some(shift) => shift,
        None => {
            debug!(
                "merged pair at {}:{} has no informative site",
                first.chrom, first.start
            );
            return Ok(None);
        }
    };

    Ok(Some(PatternRecord {
        chrom: first.chrom,
        start: first.start + shift as u64,
        pattern: merged,
    }))
}
