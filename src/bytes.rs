//! Byte-level helpers for the token-line reader

use atoi::FromRadix10Checked;
use memchr::{memchr, memchr2, memchr_iter};

pub const FIELD_COUNT: usize = 10;

/// Shape of an ID field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// Plain integer id of a syntactic word
    Word(usize),
    /// Multiword token range (`1-2`) or empty node (`2.1`)
    Skipped,
    Invalid,
}

/// Classify an ID field without allocating
#[inline]
pub fn classify_id(bytes: &[u8]) -> IdKind {
    if memchr2(b'-', b'.', bytes).is_some() {
        return IdKind::Skipped;
    }
    match bs_atoi(bytes) {
        Some(id) if id > 0 => IdKind::Word(id),
        _ => IdKind::Invalid,
    }
}

/// Parse an unsigned integer field; empty or non-digit input is `None`
#[inline]
pub fn bs_atoi(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() {
        return None;
    }
    match <usize as FromRadix10Checked>::from_radix_10_checked(bytes) {
        (Some(n), used) if used == bytes.len() => Some(n),
        _ => None,
    }
}

/// Split a line on tabs into at most `FIELD_COUNT + 1` fields
///
/// Returning one extra slot lets the caller report over-long lines.
pub fn split_fields(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut start = 0;
    for tab in memchr_iter(b'\t', bytes) {
        fields.push(&line[start..tab]);
        start = tab + 1;
        if fields.len() == FIELD_COUNT {
            break;
        }
    }
    fields.push(&line[start..]);
    fields
}

/// Line is a `#` comment
#[inline]
pub fn is_comment(line: &str) -> bool {
    memchr(b'#', line.as_bytes()) == Some(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_id() {
        assert_eq!(classify_id(b"1"), IdKind::Word(1));
        assert_eq!(classify_id(b"42"), IdKind::Word(42));
        assert_eq!(classify_id(b"1-2"), IdKind::Skipped);
        assert_eq!(classify_id(b"2.1"), IdKind::Skipped);
        assert_eq!(classify_id(b"x"), IdKind::Invalid);
        assert_eq!(classify_id(b"0"), IdKind::Invalid);
        assert_eq!(classify_id(b""), IdKind::Invalid);
    }

    #[test]
    fn test_bs_atoi() {
        assert_eq!(bs_atoi(b"0"), Some(0));
        assert_eq!(bs_atoi(b"17"), Some(17));
        assert_eq!(bs_atoi(b"_"), None);
        assert_eq!(bs_atoi(b"3a"), None);
        assert_eq!(bs_atoi(b""), None);
        assert_eq!(bs_atoi(b"99999999999999999999999999"), None);
    }

    #[test]
    fn test_split_fields() {
        let line = "1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_";
        let fields = split_fields(line);
        assert_eq!(fields.len(), 10);
        assert_eq!(fields[1], "The");
        assert_eq!(fields[9], "_");

        assert_eq!(split_fields("1\tThe\tthe").len(), 3);
        assert_eq!(split_fields("a\tb\tc\td\te\tf\tg\th\ti\tj\tk\tl").len(), 11);
    }

    #[test]
    fn test_is_comment() {
        assert!(is_comment("# sent_id = 1"));
        assert!(!is_comment("1\t#\t#\tSYM\t_\t_\t0\troot\t_\t_"));
    }
}
