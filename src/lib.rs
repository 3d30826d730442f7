//! Near-duplicate collapsing from pairwise similarity scores.
//!
//! `collapse` groups items (typically source files) into clusters of mutually
//! similar items, then keeps one representative per cluster. Scores come from
//! an external comparison tool; this crate only reads them.
//!
//! The pipeline:
//! - [`ScoreTable`]: symmetric pairwise scores, parsed from a comparison report
//! - [`cluster::Agglomerative`]: threshold-stopped single-link merging
//! - [`select`]: representative policies (centroid, last-by-suffix)
//!
//! ```rust
//! use collapse::{representatives, Agglomerative, LastBySuffix, ScoreTable};
//!
//! let report = "a_1.c and a_2.c: 30%\na_1.c and b_1.c: 5%\na_2.c and b_1.c: 5%\n";
//! let scores = ScoreTable::from_report(report).unwrap();
//!
//! let partition = Agglomerative::new().fit(&["a_1.c", "a_2.c", "b_1.c"], &scores);
//! let reps = representatives(&partition, &scores, &LastBySuffix::new()).unwrap();
//! assert_eq!(reps, ["a_2.c", "b_1.c"]);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod score;
pub mod select;

pub use cluster::{Agglomerative, Cluster, Clustering, Merge, Partition, DEFAULT_THRESHOLD};
pub use error::{Error, Result};
pub use score::ScoreTable;
pub use select::{
    representatives, underscore_sequence, Centroid, LastBySuffix, RepresentativeSelector,
    Strategy, WithFallback,
};
