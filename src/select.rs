//! Choosing one representative item per cluster.
//!
//! Two policies are provided:
//!
//! - [`Centroid`]: the member with the greatest total similarity to the rest
//!   of its cluster.
//! - [`LastBySuffix`]: the member with the greatest sequence number, read
//!   from the identifier by a pluggable extractor. With the default
//!   [`underscore_sequence`] extractor, `sub3_12.c` has sequence number 12,
//!   so the latest submission in each group wins.
//!
//! [`WithFallback`] chains two policies, so a cluster whose identifiers do
//! not carry sequence numbers can still be resolved by its centroid.
//!
//! Ties in either policy go to the lexicographically smallest item.

use crate::cluster::{Cluster, Partition};
use crate::error::{Error, Result};
use crate::score::ScoreTable;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Policy reducing a cluster to a single member.
pub trait RepresentativeSelector {
    /// Pick one member of `cluster`. Never mutates the cluster.
    fn select<'a>(&self, cluster: &'a Cluster, scores: &ScoreTable) -> Result<&'a str>;
}

/// Pick the member maximizing `Σ score(item, other)` over its cluster.
#[derive(Debug, Clone, Copy, Default)]
pub struct Centroid;

impl RepresentativeSelector for Centroid {
    fn select<'a>(&self, cluster: &'a Cluster, scores: &ScoreTable) -> Result<&'a str> {
        let mut best: Option<(&'a str, u64)> = None;
        for item in cluster.members() {
            // The self term looks up (item, item), which is never stored.
            let total: u64 = cluster
                .members()
                .map(|other| u64::from(scores.lookup(item, other)))
                .sum();
            if best.map_or(true, |(_, t)| total > t) {
                best = Some((item, total));
            }
        }
        best.map(|(item, _)| item).ok_or(Error::EmptyCluster)
    }
}

/// Read the sequence number from a `name_number...` identifier.
///
/// Takes the second `_`-separated token and parses its leading digits, so
/// `"sub1_12.c"` and `"sub1_12_95.0_.cpp"` both give `12`. Digit runs too
/// long for `u64` saturate to `u64::MAX`. Returns `None` when there is no
/// second token or it does not start with a digit.
pub fn underscore_sequence(item: &str) -> Option<u64> {
    let token = item.split('_').nth(1)?;
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let digits = &token[..end];
    if digits.is_empty() {
        return None;
    }
    // Only overflow can fail on a non-empty run of ASCII digits.
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Pick the member with the greatest sequence number.
#[derive(Clone, Copy)]
pub struct LastBySuffix<F = fn(&str) -> Option<u64>> {
    extract: F,
}

impl LastBySuffix {
    /// Use [`underscore_sequence`] as the extractor.
    pub fn new() -> Self {
        Self {
            extract: underscore_sequence,
        }
    }
}

impl Default for LastBySuffix {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> LastBySuffix<F>
where
    F: Fn(&str) -> Option<u64>,
{
    /// Use a custom sequence-number extractor.
    pub fn with_extractor(extract: F) -> Self {
        Self { extract }
    }
}

impl<F> fmt::Debug for LastBySuffix<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LastBySuffix").finish_non_exhaustive()
    }
}

impl<F> RepresentativeSelector for LastBySuffix<F>
where
    F: Fn(&str) -> Option<u64>,
{
    fn select<'a>(&self, cluster: &'a Cluster, _scores: &ScoreTable) -> Result<&'a str> {
        let mut best: Option<(&'a str, u64)> = None;
        for item in cluster.members() {
            let seq = (self.extract)(item).ok_or_else(|| Error::Selection {
                item: item.to_string(),
            })?;
            if best.map_or(true, |(_, s)| seq > s) {
                best = Some((item, seq));
            }
        }
        best.map(|(item, _)| item).ok_or(Error::EmptyCluster)
    }
}

/// Try `primary`; if it cannot read the identifiers, use `secondary`.
///
/// Only [`Error::Selection`] triggers the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithFallback<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> WithFallback<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P, S> RepresentativeSelector for WithFallback<P, S>
where
    P: RepresentativeSelector,
    S: RepresentativeSelector,
{
    fn select<'a>(&self, cluster: &'a Cluster, scores: &ScoreTable) -> Result<&'a str> {
        match self.primary.select(cluster, scores) {
            Err(Error::Selection { item }) => {
                warn!(%item, first = cluster.first(), "falling back to secondary selector");
                self.secondary.select(cluster, scores)
            }
            other => other,
        }
    }
}

/// Selection policy chosen by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// [`Centroid`].
    Centroid,
    /// [`LastBySuffix`] with the default extractor.
    #[default]
    Last,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "centroid" | "best" => Ok(Strategy::Centroid),
            "last" => Ok(Strategy::Last),
            _ => Err(Error::InvalidParameter {
                name: "strategy",
                message: "expected `last` or `centroid`",
            }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Centroid => f.write_str("centroid"),
            Strategy::Last => f.write_str("last"),
        }
    }
}

impl RepresentativeSelector for Strategy {
    fn select<'a>(&self, cluster: &'a Cluster, scores: &ScoreTable) -> Result<&'a str> {
        match self {
            Strategy::Centroid => Centroid.select(cluster, scores),
            Strategy::Last => LastBySuffix::new().select(cluster, scores),
        }
    }
}

/// One representative per cluster, in partition order.
///
/// Stops at the first cluster the selector cannot resolve.
pub fn representatives<'a, R>(
    partition: &'a Partition,
    scores: &ScoreTable,
    selector: &R,
) -> Result<Vec<&'a str>>
where
    R: RepresentativeSelector + ?Sized,
{
    partition
        .clusters()
        .iter()
        .map(|cluster| selector.select(cluster, scores))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> ScoreTable {
        ScoreTable::from_triples([
            ("a_1", "a_2", 30),
            ("a_1", "a_3", 10),
            ("a_2", "a_3", 25),
        ])
    }

    #[test]
    fn test_centroid_picks_max_row_sum() {
        // Sums: a_1 = 40, a_2 = 55, a_3 = 35.
        let cluster = Cluster::new(["a_1", "a_2", "a_3"]).unwrap();
        assert_eq!(Centroid.select(&cluster, &scores()).unwrap(), "a_2");
    }

    #[test]
    fn test_centroid_tie_goes_to_smallest() {
        let cluster = Cluster::new(["z", "m", "b"]).unwrap();
        assert_eq!(Centroid.select(&cluster, &ScoreTable::default()).unwrap(), "b");
    }

    #[test]
    fn test_centroid_singleton() {
        let cluster = Cluster::new(["solo"]).unwrap();
        assert_eq!(Centroid.select(&cluster, &scores()).unwrap(), "solo");
    }

    #[test]
    fn test_underscore_sequence() {
        assert_eq!(underscore_sequence("a_2"), Some(2));
        assert_eq!(underscore_sequence("sub1_12.c"), Some(12));
        assert_eq!(underscore_sequence("sub77_8_95.0_.cpp"), Some(8));
        assert_eq!(underscore_sequence("plain.c"), None);
        assert_eq!(underscore_sequence("sub_x.c"), None);
        assert_eq!(underscore_sequence("sub_.c"), None);
        assert_eq!(underscore_sequence("sub_+3.c"), None);
    }

    #[test]
    fn test_underscore_sequence_saturates() {
        assert_eq!(
            underscore_sequence("s_99999999999999999999999.c"),
            Some(u64::MAX)
        );
        let cluster = Cluster::new(["s_99999999999999999999999.c", "s_7.c"]).unwrap();
        let rep = LastBySuffix::new().select(&cluster, &ScoreTable::default()).unwrap();
        assert_eq!(rep, "s_99999999999999999999999.c");
    }

    #[test]
    fn test_last_by_suffix_numeric_not_lexicographic() {
        let cluster = Cluster::new(["s_9.c", "s_10.c", "s_2.c"]).unwrap();
        let rep = LastBySuffix::new().select(&cluster, &ScoreTable::default()).unwrap();
        assert_eq!(rep, "s_10.c");
    }

    #[test]
    fn test_last_by_suffix_tie_goes_to_smallest() {
        let cluster = Cluster::new(["b_4.c", "a_4.cpp"]).unwrap();
        let rep = LastBySuffix::new().select(&cluster, &ScoreTable::default()).unwrap();
        assert_eq!(rep, "a_4.cpp");
    }

    #[test]
    fn test_last_by_suffix_rejects_bad_name() {
        let cluster = Cluster::new(["s_1.c", "readme.c"]).unwrap();
        match LastBySuffix::new().select(&cluster, &ScoreTable::default()) {
            Err(Error::Selection { item }) => assert_eq!(item, "readme.c"),
            other => panic!("expected selection error, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_extractor() {
        // Sequence number as the trailing digits before the extension.
        let trailing = |item: &str| -> Option<u64> {
            let stem = item.split('.').next()?;
            stem.trim_start_matches(|c: char| !c.is_ascii_digit())
                .parse()
                .ok()
        };
        let cluster = Cluster::new(["run7.c", "run12.c", "run3.c"]).unwrap();
        let rep = LastBySuffix::with_extractor(trailing)
            .select(&cluster, &ScoreTable::default())
            .unwrap();
        assert_eq!(rep, "run12.c");
    }

    #[test]
    fn test_fallback_on_bad_names() {
        let table = ScoreTable::from_triples([("x.c", "y.c", 40), ("y.c", "z.c", 40)]);
        let cluster = Cluster::new(["x.c", "y.c", "z.c"]).unwrap();
        let selector = WithFallback::new(LastBySuffix::new(), Centroid);
        assert_eq!(selector.select(&cluster, &table).unwrap(), "y.c");
    }

    #[test]
    fn test_fallback_unused_when_primary_succeeds() {
        let cluster = Cluster::new(["a_1", "a_2", "a_3"]).unwrap();
        let selector = WithFallback::new(LastBySuffix::new(), Centroid);
        assert_eq!(selector.select(&cluster, &scores()).unwrap(), "a_3");
    }

    #[test]
    fn test_strategy_by_name() {
        assert_eq!("last".parse::<Strategy>().unwrap(), Strategy::Last);
        assert_eq!("centroid".parse::<Strategy>().unwrap(), Strategy::Centroid);
        assert!("median".parse::<Strategy>().is_err());
        assert_eq!(Strategy::default().to_string(), "last");

        let cluster = Cluster::new(["a_1", "a_2", "a_3"]).unwrap();
        assert_eq!(Strategy::Centroid.select(&cluster, &scores()).unwrap(), "a_2");
        assert_eq!(Strategy::Last.select(&cluster, &scores()).unwrap(), "a_3");
    }
}
