use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// A non-empty set of items that were judged mutually similar.
///
/// Members are kept sorted, so iteration order is lexicographic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    members: BTreeSet<String>,
}

impl Cluster {
    /// Build a cluster from explicit members.
    ///
    /// Returns [`Error::EmptyCluster`] if `items` yields nothing.
    pub fn new<I, S>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members: BTreeSet<String> = items.into_iter().map(Into::into).collect();
        if members.is_empty() {
            return Err(Error::EmptyCluster);
        }
        Ok(Self { members })
    }

    pub(crate) fn singleton(item: &str) -> Self {
        let mut members = BTreeSet::new();
        members.insert(item.to_string());
        Self { members }
    }

    /// Union of two disjoint clusters.
    pub(crate) fn absorb(mut self, mut other: Cluster) -> Self {
        debug_assert!(self.members.is_disjoint(&other.members));
        self.members.append(&mut other.members);
        self
    }

    /// Members in lexicographic order.
    pub fn members(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(String::as_str)
    }

    /// Smallest member; clusters are ordered by it.
    pub fn first(&self) -> &str {
        self.members
            .iter()
            .next()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.members.contains(item)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One step of the merge history.
///
/// Node ids follow the usual dendrogram convention: items are leaves
/// `0..n` in sorted order, and merge `i` creates node `n + i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Merge {
    /// Node id of the cluster that sorted first.
    pub left: usize,
    /// Node id of the other cluster.
    pub right: usize,
    /// Link value at which the two were merged.
    pub link: u32,
    /// Number of items in the merged cluster.
    pub size: usize,
}

/// Final clusters plus the merges that produced them.
#[derive(Clone, Debug, Default)]
pub struct Partition {
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) merges: Vec<Merge>,
}

impl Partition {
    /// Clusters ordered by their smallest member.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Merges in the order they were applied.
    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Total number of distinct items across all clusters.
    pub fn n_items(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }

    /// Index of the cluster holding `item`.
    pub fn label_of(&self, item: &str) -> Option<usize> {
        self.clusters.iter().position(|c| c.contains(item))
    }

    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_rejects_empty() {
        let items: Vec<String> = Vec::new();
        assert!(matches!(Cluster::new(items), Err(Error::EmptyCluster)));
    }

    #[test]
    fn test_cluster_members_sorted() {
        let c = Cluster::new(["b_2", "a_9", "c_1"]).unwrap();
        assert_eq!(c.members().collect::<Vec<_>>(), ["a_9", "b_2", "c_1"]);
        assert_eq!(c.first(), "a_9");
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_absorb_unions() {
        let c = Cluster::singleton("x").absorb(Cluster::singleton("a"));
        assert_eq!(c.first(), "a");
        assert!(c.contains("x"));
        assert_eq!(c.len(), 2);
    }
}
