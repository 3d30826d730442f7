//! Threshold-stopped agglomerative clustering over similarity scores.
//!
//! # The Algorithm
//!
//! Every item starts as its own cluster. Each round, the pair of clusters
//! with the greatest **link** is merged, until no pair reaches the
//! threshold.
//!
//! The link between two clusters is the *maximum* score between any item of
//! one and any item of the other. Scores are similarities (higher is
//! closer), so this is single linkage expressed over similarity instead of
//! distance.
//!
//! ## Link Updates
//!
//! Recomputing each link from the items costs `|A| × |B|` lookups. Single
//! linkage admits the exact update
//!
//! ```text
//! link(A ∪ B, K) = max(link(A, K), link(B, K))
//! ```
//!
//! so a cluster-by-cluster link matrix is seeded once from the score table
//! and then folded on every merge.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) per round for the pair scan, at most `n − 1` rounds.
//! - **Space**: O(n²) for the link matrix.
//!
//! This is meant for batches of a few hundred items, not for large corpora.
//!
//! ## Tie-breaking
//!
//! Clusters are kept ordered by their smallest member. Pairs `(i, j)` with
//! `i < j` are scanned in that order and only a strictly greater link
//! replaces the current best, so the earliest pair wins a tie. The result
//! does not depend on the order items were supplied in.

use super::partition::{Cluster, Merge, Partition};
use super::traits::Clustering;
use crate::score::ScoreTable;
use tracing::{debug, info, warn};

/// Default minimum link required to merge two clusters.
pub const DEFAULT_THRESHOLD: u32 = 20;

/// Agglomerative clusterer that stops at a similarity threshold.
#[derive(Debug, Clone)]
pub struct Agglomerative {
    /// Minimum link score required to merge two clusters.
    threshold: u32,
}

/// A live cluster and its node id in the merge history.
struct Active {
    cluster: Cluster,
    node: usize,
}

impl Agglomerative {
    /// Create a clusterer with [`DEFAULT_THRESHOLD`].
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Set the minimum link score required to merge.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Partition `items` using the scores in `scores`.
    ///
    /// Duplicate identifiers are collapsed. An empty item list yields an
    /// empty partition.
    pub fn fit<S: AsRef<str>>(&self, items: &[S], scores: &ScoreTable) -> Partition {
        let mut sorted: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != items.len() {
            warn!(
                supplied = items.len(),
                distinct = sorted.len(),
                "duplicate items collapsed"
            );
        }

        let n = sorted.len();
        let mut active: Vec<Active> = sorted
            .iter()
            .enumerate()
            .map(|(node, item)| Active {
                cluster: Cluster::singleton(item),
                node,
            })
            .collect();

        let mut links: Vec<Vec<u32>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 0 } else { scores.lookup(sorted[i], sorted[j]) })
                    .collect()
            })
            .collect();

        let mut merges: Vec<Merge> = Vec::new();

        while let Some((i, j, best)) = strongest_pair(&links) {
            if best < self.threshold {
                break;
            }

            // Folded row for the merged cluster, indexed like the matrix
            // after rows/columns i and j are removed.
            let folded: Vec<u32> = (0..links.len())
                .filter(|&k| k != i && k != j)
                .map(|k| links[i][k].max(links[j][k]))
                .collect();

            // j > i, so remove j first to keep i valid.
            for idx in [j, i] {
                links.remove(idx);
                for row in links.iter_mut() {
                    row.remove(idx);
                }
            }
            let right = active.remove(j);
            let left = active.remove(i);

            let cluster = left.cluster.absorb(right.cluster);
            let merge = Merge {
                left: left.node,
                right: right.node,
                link: best,
                size: cluster.len(),
            };
            debug!(
                left = merge.left,
                right = merge.right,
                link = merge.link,
                size = merge.size,
                "merged clusters"
            );

            let pos = active.partition_point(|a| a.cluster.first() < cluster.first());
            for (row, &value) in links.iter_mut().zip(&folded) {
                row.insert(pos, value);
            }
            let mut own = folded;
            own.insert(pos, 0);
            links.insert(pos, own);

            active.insert(
                pos,
                Active {
                    cluster,
                    node: n + merges.len(),
                },
            );
            merges.push(merge);
        }

        info!(
            items = n,
            clusters = active.len(),
            merges = merges.len(),
            threshold = self.threshold,
            "clustering finished"
        );

        Partition {
            clusters: active.into_iter().map(|a| a.cluster).collect(),
            merges,
        }
    }
}

impl Default for Agglomerative {
    fn default() -> Self {
        Self::new()
    }
}

impl Clustering for Agglomerative {
    fn fit_partition(&self, items: &[&str], scores: &ScoreTable) -> Partition {
        self.fit(items, scores)
    }
}

/// First pair `(i, j)`, `i < j`, holding the strictly greatest link.
///
/// `None` when fewer than two clusters remain.
fn strongest_pair(links: &[Vec<u32>]) -> Option<(usize, usize, u32)> {
    let mut best: Option<(usize, usize, u32)> = None;
    for i in 0..links.len() {
        for j in (i + 1)..links.len() {
            let l = links[i][j];
            if best.map_or(true, |(_, _, b)| l > b) {
                best = Some((i, j, l));
            }
        }
    }
    best
}

/// Maximum score between any member of `a` and any member of `b`.
pub fn link(a: &Cluster, b: &Cluster, scores: &ScoreTable) -> u32 {
    a.members()
        .flat_map(|x| b.members().map(move |y| scores.lookup(x, y)))
        .max()
        .unwrap_or(0)
}
