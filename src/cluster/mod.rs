//! Grouping items into clusters of mutually similar items.
//!
//! ## Hard clustering over similarity
//!
//! Every item ends up in exactly one cluster. The input is not a set of
//! vectors but a [`ScoreTable`](crate::score::ScoreTable) of pairwise
//! similarities, typically produced by a plagiarism or clone detector.
//! Higher scores mean more alike; pairs the table never saw score `0`.
//!
//! ## Algorithms (implemented)
//!
//! ### Agglomerative (threshold-stopped)
//!
//! Bottom-up: start with each item as its own cluster, repeatedly merge the
//! two clusters with the greatest link, and stop as soon as the greatest
//! link falls below a threshold. The link is the maximum cross-cluster
//! score (single linkage over similarity).
//!
//! Unlike the usual dendrogram-then-cut approach, the number of clusters is
//! never chosen up front: the threshold decides it. The merge history is
//! still returned, with dendrogram-style node ids.
//!
//! **When to use**: collapsing near-duplicates, where "similar enough" has
//! a natural score cutoff and the batch is small.
//!
//! ## Usage
//!
//! ```rust
//! use collapse::cluster::{Agglomerative, Clustering};
//! use collapse::ScoreTable;
//!
//! let scores = ScoreTable::from_triples([
//!     ("a_1.c", "a_2.c", 30),
//!     ("a_1.c", "b_1.c", 5),
//!     ("a_2.c", "b_1.c", 5),
//! ]);
//!
//! let labels = Agglomerative::new()
//!     .with_threshold(20)
//!     .fit_predict(&["a_1.c", "a_2.c", "b_1.c"], &scores);
//! assert_eq!(labels[0], labels[1]);  // The two a's merged
//! assert_ne!(labels[0], labels[2]);  // b stays alone
//! ```

mod agglomerative;
mod partition;
mod traits;

pub use agglomerative::{link, Agglomerative, DEFAULT_THRESHOLD};
pub use partition::{Cluster, Merge, Partition};
pub use traits::Clustering;
