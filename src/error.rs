use thiserror::Error;

/// Coarse classification of failures, used by callers to decide whether
/// to abort the run or skip a single pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    PairingGeometry,
    UnsupportedSymbol,
}

#[derive(Debug, Error, PartialEq)]
pub enum PatError {
    #[error("unknown CIGAR operation {0}")]
    UnknownCigarOperation(char),

    #[error("invalid CIGAR '{cigar}': {reason}")]
    InvalidCigar { cigar: String, reason: String },

    #[error("CIGAR length mismatch: operations consume {consumed} bases but sequence has {length}")]
    CigarLengthMismatch { consumed: usize, length: usize },

    #[error("deletion of {length} bases is longer than the read ({read_length} bases)")]
    DeletionTooLong { length: u32, read_length: usize },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("invalid pairing: merged read spans {length} sites (max {max})")]
    MergedPatternTooLong { length: u64, max: u64 },

    #[error("unsupported base '{0}'")]
    UnsupportedBase(char),
}

impl PatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PatError::UnknownCigarOperation(_)
            | PatError::InvalidCigar { .. }
            | PatError::CigarLengthMismatch { .. }
            | PatError::DeletionTooLong { .. }
            | PatError::InvalidNumber(_)
            | PatError::InvalidRecord(_) => ErrorKind::MalformedInput,
            PatError::MergedPatternTooLong { .. } => ErrorKind::PairingGeometry,
            PatError::UnsupportedBase(_) => ErrorKind::UnsupportedSymbol,
        }
    }
}

pub type Result<T> = std::result::Result<T, PatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(
            PatError::UnknownCigarOperation('N').kind(),
            ErrorKind::MalformedInput
        );
        assert_eq!(
            PatError::CigarLengthMismatch {
                consumed: 10,
                length: 5
            }
            .kind(),
            ErrorKind::MalformedInput
        );
        assert_eq!(
            PatError::DeletionTooLong {
                length: 500,
                read_length: 100
            }
            .kind(),
            ErrorKind::MalformedInput
        );
        assert_eq!(
            PatError::MergedPatternTooLong { length: 301, max: 300 }.kind(),
            ErrorKind::PairingGeometry
        );
        assert_eq!(
            PatError::UnsupportedBase('N').kind(),
            ErrorKind::UnsupportedSymbol
        );
    }

    #[test]
    fn messages() {
        assert_eq!(
            PatError::UnknownCigarOperation('X').to_string(),
            "unknown CIGAR operation X"
        );
        assert_eq!(
            PatError::MergedPatternTooLong { length: 301, max: 300 }.to_string(),
            "invalid pairing: merged read spans 301 sites (max 300)"
        );
    }
}
