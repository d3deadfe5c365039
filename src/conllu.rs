//! CoNLL-U sentence segmentation
//!
//! Turns a token-per-line stream into [`SentenceTree`]s. Blank lines end a
//! sentence, `#` lines are comments, multiword ranges and empty nodes are
//! skipped. Degenerate sentences are dropped and counted in
//! [`SegmentStats`] rather than returned.
//!
//! CoNLL-U format: https://universaldependencies.org/format.html

use crate::bytes::{FIELD_COUNT, IdKind, bs_atoi, classify_id, is_comment, split_fields};
use crate::tree::{SentenceTree, Token};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use thiserror::Error;

/// Error during CoNLL-U parsing
#[derive(Debug, Error)]
#[error("Parse error at line {line_num}: {message}")]
pub struct ParseError {
    pub line_num: usize,
    pub message: String,
}

/// Which sentences the segmenter keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPolicy {
    /// Sentences with fewer tokens are dropped as short
    pub min_len: usize,
    /// Also drop sentences tagged only PUNCT and NUM
    pub strict_punct_num: bool,
}

impl Default for SegmentPolicy {
    fn default() -> Self {
        Self {
            min_len: 2,
            strict_punct_num: true,
        }
    }
}

/// Counts of sentences dropped by the segmenter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentStats {
    pub kept: usize,
    /// All-PUNCT sentences, plus PUNCT+NUM-only ones under the strict policy
    pub bad: usize,
    pub short: usize,
}

impl SegmentStats {
    pub fn merge(&mut self, other: SegmentStats) {
        self.kept += other.kept;
        self.bad += other.bad;
        self.short += other.short;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Keep,
    Bad,
    Short,
}

impl SegmentPolicy {
    fn judge(&self, tokens: &[Token]) -> Verdict {
        let mut punct_only = true;
        let mut punct_num_only = true;
        for token in tokens {
            let upos = token.upos.as_str();
            punct_only &= upos == "PUNCT";
            punct_num_only &= upos == "PUNCT" || upos == "NUM";
        }
        if punct_only || (self.strict_punct_num && punct_num_only) {
            Verdict::Bad
        } else if tokens.len() < self.min_len {
            Verdict::Short
        } else {
            Verdict::Keep
        }
    }
}

/// Reader that yields the sentences kept by a [`SegmentPolicy`]
pub struct SentenceReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
    policy: SegmentPolicy,
    stats: SegmentStats,
}

impl<R: BufRead> SentenceReader<R> {
    pub fn new(reader: R, policy: SegmentPolicy) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
            policy,
            stats: SegmentStats::default(),
        }
    }

    /// Drop statistics for the sentences read so far
    pub fn stats(&self) -> SegmentStats {
        self.stats
    }

    /// Read the next raw sentence, kept or not
    fn next_tokens(&mut self) -> Option<Result<Vec<Token>, ParseError>> {
        let mut tokens = Vec::new();
        let mut seen_line = false;

        loop {
            self.line_num += 1;
            match self.lines.next() {
                None => {
                    return if seen_line { Some(Ok(tokens)) } else { None };
                }
                Some(Err(e)) => {
                    return Some(Err(ParseError {
                        line_num: self.line_num,
                        message: format!("IO error: {}", e),
                    }));
                }
                Some(Ok(line)) => {
                    let line = line.trim_end_matches(['\r', '\n']);

                    if line.trim().is_empty() {
                        if seen_line {
                            return Some(Ok(tokens));
                        }
                        continue;
                    }

                    if is_comment(line.trim_start()) {
                        continue;
                    }

                    seen_line = true;
                    match parse_line(line, self.line_num) {
                        Ok(Some(token)) => tokens.push(token),
                        Ok(None) => continue,
                        Err(e) => return Some(Err(e)),
                    }
                }
            }
        }
    }
}

impl SentenceReader<BufReader<std::io::Cursor<String>>> {
    /// Create a reader from a string
    pub fn from_str(text: &str, policy: SegmentPolicy) -> Self {
        let cursor = std::io::Cursor::new(text.to_string());
        Self::new(BufReader::new(cursor), policy)
    }
}

impl SentenceReader<Box<dyn BufRead + Send>> {
    /// Create a reader from a file path, decompressing `*.gz` files
    pub fn from_file(path: &Path, policy: SegmentPolicy) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let reader: Box<dyn BufRead + Send> =
            if path.extension().is_some_and(|ext| ext == "gz") {
                Box::new(BufReader::new(MultiGzDecoder::new(file)))
            } else {
                Box::new(BufReader::new(file))
            };
        Ok(Self::new(reader, policy))
    }
}

impl<R: BufRead> Iterator for SentenceReader<R> {
    type Item = Result<SentenceTree, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let tokens = match self.next_tokens()? {
                Ok(tokens) => tokens,
                Err(e) => return Some(Err(e)),
            };
            // a block of nothing but skipped ids
            if tokens.is_empty() {
                continue;
            }
            match self.policy.judge(&tokens) {
                Verdict::Keep => {
                    self.stats.kept += 1;
                    return Some(Ok(SentenceTree::new(tokens)));
                }
                Verdict::Bad => self.stats.bad += 1,
                Verdict::Short => self.stats.short += 1,
            }
        }
    }
}

/// Segment a whole text at once
pub fn segment(
    text: &str,
    policy: SegmentPolicy,
) -> Result<(Vec<SentenceTree>, SegmentStats), ParseError> {
    let mut reader = SentenceReader::from_str(text, policy);
    let trees = reader.by_ref().collect::<Result<Vec<_>, _>>()?;
    Ok((trees, reader.stats()))
}

/// Parse a single token line
///
/// Returns `None` for multiword tokens and empty nodes.
fn parse_line(line: &str, line_num: usize) -> Result<Option<Token>, ParseError> {
    let fields = split_fields(line);

    if fields.len() != FIELD_COUNT {
        return Err(ParseError {
            line_num,
            message: format!("Expected 10 fields, found {}", fields.len()),
        });
    }

    let id = match classify_id(fields[0].as_bytes()) {
        IdKind::Word(id) => id,
        IdKind::Skipped => return Ok(None),
        IdKind::Invalid => {
            return Err(ParseError {
                line_num,
                message: format!("Invalid ID: {}", fields[0]),
            });
        }
    };

    let head = bs_atoi(fields[6].as_bytes()).ok_or_else(|| ParseError {
        line_num,
        message: format!("Invalid HEAD: {}", fields[6]),
    })?;

    Ok(Some(Token::new(
        id, fields[1], fields[2], fields[3], fields[4], fields[5], head, fields[7],
    )))
}
