pub mod cigar;
pub mod error;
pub mod io;
pub mod merge;
pub mod pattern;
pub mod utils;

pub use error::{ErrorKind, PatError, Result};
pub use merge::{merge_paired, MergeConfig};
pub use pattern::{pack, strip_pattern, PatternRecord};

/// Symbol for a CpG site without an informative call.
pub const UNKNOWN: u8 = b'.';

/// Breaks a line into its tab separated fields.
/// An empty line has no fields and a single trailing tab adds no empty field.
pub fn line_to_tokens(line: &str) -> Vec<&str> {
    let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
    if line.is_empty() {
        return Vec::new();
    }
    let line = line.strip_suffix('\t').unwrap_or(line);
    line.split('\t').collect()
}

/// Two reads are mates when both are non-empty and share the read name (first field).
pub fn are_paired(tokens_1: &[&str], tokens_2: &[&str]) -> bool {
    match (tokens_1.first(), tokens_2.first()) {
        (Some(name_1), Some(name_2)) => name_1 == name_2,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens() {
        assert_eq!(
            line_to_tokens("read1\tchr1\t10\tCC.T\n"),
            vec!["read1", "chr1", "10", "CC.T"]
        );
        assert_eq!(line_to_tokens("read1\t\tx"), vec!["read1", "", "x"]);
        assert_eq!(line_to_tokens("read1\t"), vec!["read1"]);
        assert!(line_to_tokens("").is_empty());
        assert!(line_to_tokens("\r\n").is_empty());
    }

    #[test]
    fn paired() {
        let read_1 = line_to_tokens("SRR1.1\tchr1\t10\tCC");
        let read_2 = line_to_tokens("SRR1.1\tchr1\t11\tTC");
        let other = line_to_tokens("SRR1.2\tchr1\t11\tTC");
        let empty = line_to_tokens("");

        assert!(are_paired(&read_1, &read_2));
        assert!(are_paired(&read_2, &read_1));
        assert!(!are_paired(&read_1, &other));
        assert!(!are_paired(&read_1, &empty));
        assert!(!are_paired(&empty, &read_1));
        assert!(!are_paired(&empty, &empty));
    }
}
