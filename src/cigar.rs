use rust_htslib::bam::record::Cigar;

use crate::error::{PatError, Result};

/// Filler base emitted for each reference position deleted from the read.
pub const DELETION_FILLER: u8 = b'N';

/// Parses a textual CIGAR such as `2S9M1D3M` into its operations.
/// Only M, I, D, S and H are accepted.
pub fn parse_cigar(cigar: &str) -> Result<Vec<Cigar>> {
    let invalid = |reason: String| PatError::InvalidCigar {
        cigar: cigar.to_string(),
        reason,
    };

    let mut ops = Vec::new();
    let mut len: Option<u32> = None;
    for c in cigar.chars() {
        if let Some(digit) = c.to_digit(10) {
            let n = len
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit))
                .ok_or_else(|| invalid("operation length overflows".to_string()))?;
            len = Some(n);
            continue;
        }

        let n = match len.take() {
            Some(n) => n,
            None => return Err(invalid(format!("missing length before {}", c))),
        };
        let op = match c {
            'M' => Cigar::Match(n),
            'I' => Cigar::Ins(n),
            'D' => Cigar::Del(n),
            'S' => Cigar::SoftClip(n),
            'H' => Cigar::HardClip(n),
            _ => return Err(PatError::UnknownCigarOperation(c)),
        };
        ops.push(op);
    }

    if len.is_some() {
        return Err(invalid("length without operation".to_string()));
    }
    Ok(ops)
}

/// Adjusts a read sequence so that it is comparable to the reference.
/// Matches (M) are copied, deletions (D) are filled with N,
/// insertions (I) and soft-clips (S) are dropped from the read and
/// hard-clips (H) are ignored since they are not part of the sequence.
/// A single deletion longer than the whole read is rejected.
pub fn adjust_sequence(seq: &[u8], cigar: &[Cigar]) -> Result<Vec<u8>> {
    let mut adjusted = Vec::with_capacity(seq.len());
    let mut rest = seq;
    for c in cigar.iter() {
        match *c {
            Cigar::Match(len) => {
                let (head, tail) = take(rest, len, seq.len())?;
                adjusted.extend_from_slice(head);
                rest = tail;
            }
            Cigar::Del(len) => {
                if len as usize > seq.len() {
                    return Err(PatError::DeletionTooLong {
                        length: len,
                        read_length: seq.len(),
                    });
                }
                adjusted.resize(adjusted.len() + len as usize, DELETION_FILLER);
            }
            Cigar::Ins(len) | Cigar::SoftClip(len) => {
                let (_, tail) = take(rest, len, seq.len())?;
                rest = tail;
            }
            Cigar::HardClip(_) => {}
            _ => return Err(PatError::UnknownCigarOperation(c.char())),
        }
    }
    Ok(adjusted)
}

/// Parses `cigar` and applies it to `seq`.
pub fn reference_aligned(seq: &[u8], cigar: &str) -> Result<Vec<u8>> {
    let cigar = parse_cigar(cigar)?;
    adjust_sequence(seq, &cigar)
}

fn take(rest: &[u8], len: u32, seq_len: usize) -> Result<(&[u8], &[u8])> {
    let len = len as usize;
    if len > rest.len() {
        return Err(PatError::CigarLengthMismatch {
            consumed: seq_len - rest.len() + len,
            length: seq_len,
        });
    }
    Ok(rest.split_at(len))
}
