//! Pairwise similarity scores.
//!
//! A [`ScoreTable`] is the only input the clusterer needs besides the item
//! list. It is symmetric, immutable once built, and answers `0` for any pair
//! it has never seen.
//!
//! ## Report format
//!
//! Comparison tools emit one line per compared pair, e.g.
//!
//! ```text
//! sub1_3.c and sub2_7.c: 45%
//! ```
//!
//! The first `:` and the first `%` are dropped, then the line is split on
//! whitespace: token 0 is the first item, token 2 the second, token 3 the
//! integer score. Token 1 is a connective and is ignored.

use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;
use tracing::warn;

/// Symmetric lookup of similarity scores between items.
#[derive(Clone, Debug, Default)]
pub struct ScoreTable {
    scores: HashMap<String, HashMap<String, u32>>,
    pairs: usize,
}

impl ScoreTable {
    /// Build a table from `(a, b, score)` triples.
    ///
    /// Both orientations are stored. Later triples for the same pair replace
    /// earlier ones. Triples pairing an item with itself are dropped.
    pub fn from_triples<I, A, B>(triples: I) -> Self
    where
        I: IntoIterator<Item = (A, B, u32)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut table = Self::default();
        for (a, b, score) in triples {
            table.insert(a.into(), b.into(), score);
        }
        table
    }

    /// Parse a full comparison report.
    ///
    /// Blank lines are skipped. Any other line that does not parse aborts the
    /// whole table: a silently missing score would read as `0` later.
    pub fn from_report(report: &str) -> Result<Self> {
        let mut table = Self::default();
        for (idx, line) in report.lines().enumerate() {
            if let Some((a, b, score)) = Self::parse_numbered(idx + 1, line)? {
                table.insert(a, b, score);
            }
        }
        Ok(table)
    }

    /// Parse a comparison report from a reader, line by line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::default();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some((a, b, score)) = Self::parse_numbered(idx + 1, &line)? {
                table.insert(a, b, score);
            }
        }
        Ok(table)
    }

    /// Parse a single report line into a score triple.
    ///
    /// Returns `Ok(None)` for blank lines. Errors report line number 1; use
    /// [`ScoreTable::from_report`] for positioned errors.
    pub fn parse_line(line: &str) -> Result<Option<(String, String, u32)>> {
        Self::parse_numbered(1, line)
    }

    fn parse_numbered(line_no: usize, line: &str) -> Result<Option<(String, String, u32)>> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let cleaned = line.replacen(':', "", 1).replacen('%', "", 1);
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();

        let fail = |reason| Error::Parse {
            line: line_no,
            content: line.to_string(),
            reason,
        };

        if tokens.len() != 4 {
            return Err(fail("expected 4 tokens: <item> <sep> <item> <score>"));
        }
        // `u32::from_str` also takes a leading `+`; only plain digits are scores.
        if !tokens[3].bytes().all(|b| b.is_ascii_digit()) {
            return Err(fail("score is not a non-negative integer"));
        }
        let score: u32 = tokens[3]
            .parse()
            .map_err(|_| fail("score does not fit in 32 bits"))?;

        Ok(Some((tokens[0].to_string(), tokens[2].to_string(), score)))
    }

    fn insert(&mut self, a: String, b: String, score: u32) {
        if a == b {
            warn!(item = %a, score, "ignoring self-comparison");
            return;
        }
        self.scores
            .entry(b.clone())
            .or_default()
            .insert(a.clone(), score);
        let previous = self.scores.entry(a).or_default().insert(b, score);
        if previous.is_none() {
            self.pairs += 1;
        }
    }

    /// Score between `a` and `b`, or `0` if the pair was never recorded.
    #[inline]
    pub fn lookup(&self, a: &str, b: &str) -> u32 {
        self.scores
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct unordered pairs stored.
    pub fn len(&self) -> usize {
        self.pairs
    }

    /// True if no pair has been recorded.
    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    /// Every item mentioned in at least one stored pair, sorted.
    pub fn items(&self) -> BTreeSet<&str> {
        self.scores.keys().map(String::as_str).collect()
    }
}
