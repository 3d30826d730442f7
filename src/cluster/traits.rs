use super::partition::Partition;
use crate::score::ScoreTable;

/// Common interface for clusterers that partition items from pairwise scores.
pub trait Clustering {
    /// Partition `items` into disjoint clusters.
    fn fit_partition(&self, items: &[&str], scores: &ScoreTable) -> Partition;

    /// Return one cluster label per input item, in input order.
    ///
    /// Labels index into [`Partition::clusters`].
    fn fit_predict(&self, items: &[&str], scores: &ScoreTable) -> Vec<usize> {
        let partition = self.fit_partition(items, scores);
        items
            .iter()
            .map(|item| {
                partition
                    .label_of(item)
                    .expect("every input item is in the partition")
            })
            .collect()
    }
}
