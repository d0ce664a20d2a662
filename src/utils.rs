use bio::alphabets::dna;

use crate::error::{PatError, Result};

/// Reverse complement of a sequence over A, C, G and T.
/// Any other base, including N, is rejected.
pub fn reverse_comp(seq: &[u8]) -> Result<Vec<u8>> {
    if let Some(&b) = seq
        .iter()
        .find(|&&b| !matches!(b, b'A' | b'C' | b'G' | b'T'))
    {
        return Err(PatError::UnsupportedBase(b as char));
    }
    Ok(dna::revcomp(seq))
}

/// Formats an integer with thousands separators, e.g. 1234567 -> "1,234,567".
pub fn add_commas(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Parses a comma separated list of integers such as `3,0,2,`.
/// Trailing separators are tolerated.
pub fn split_by_comma(line: &str) -> Result<Vec<i64>> {
    let line = line.trim().trim_end_matches(',');
    if line.is_empty() {
        return Ok(Vec::new());
    }
    line.split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<i64>()
                .map_err(|_| PatError::InvalidNumber(token.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn revcomp() {
        assert_eq!(reverse_comp(b"AACG").unwrap(), b"CGTT");
        assert_eq!(reverse_comp(b"").unwrap(), b"");
        assert_eq!(reverse_comp(b"GATTACA").unwrap(), b"TGTAATC");
    }

    #[test]
    fn revcomp_rejects_ambiguous_bases() {
        assert_eq!(reverse_comp(b"ACNT"), Err(PatError::UnsupportedBase('N')));
        assert_eq!(reverse_comp(b"acgt"), Err(PatError::UnsupportedBase('a')));
    }

    #[test]
    fn commas() {
        assert_eq!(add_commas(0), "0");
        assert_eq!(add_commas(999), "999");
        assert_eq!(add_commas(1000), "1,000");
        assert_eq!(add_commas(123456), "123,456");
        assert_eq!(add_commas(1234567), "1,234,567");
    }

    #[test]
    fn comma_list() {
        assert_eq!(split_by_comma("3,0,12").unwrap(), vec![3, 0, 12]);
        assert_eq!(split_by_comma("3,0,12,").unwrap(), vec![3, 0, 12]);
        assert_eq!(split_by_comma(" 1, 2 ,3,,\n").unwrap(), vec![1, 2, 3]);
        assert!(split_by_comma("").unwrap().is_empty());
    }

    #[test]
    fn comma_list_rejects_non_numeric() {
        assert_eq!(
            split_by_comma("1,two,3"),
            Err(PatError::InvalidNumber("two".to_string()))
        );
        assert!(split_by_comma("1,,3").is_err());
    }

    proptest! {
        #[test]
        fn prop_revcomp_roundtrip(seq in "[ACGT]{0,200}") {
            let once = reverse_comp(seq.as_bytes()).unwrap();
            let twice = reverse_comp(&once).unwrap();
            prop_assert_eq!(twice, seq.as_bytes().to_vec());
        }
    }
}
