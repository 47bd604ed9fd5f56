//! Parallel processing support for ferro-describe
//!
//! This module describes many sequence pairs at once using rayon. Enable with
//! the `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_describe::extractor::{Describer, DescriberConfig, Molecule};
//! use ferro_describe::parallel::describe_parallel;
//!
//! let pairs = vec![("ATGC", "ATAC"), ("ATGC", "ATGC")];
//! let describer = Describer::new(DescriberConfig::default());
//!
//! let alleles: Vec<_> = describe_parallel(&describer, &pairs, Molecule::Dna)
//!     .into_iter()
//!     .filter_map(|r| r.ok())
//!     .collect();
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::error::DescribeError;
use crate::extractor::{Allele, Describer, Molecule, SequenceDiffer};

/// Describe multiple sequence pairs in parallel
///
/// Returns a vector of results, one for each pair.
/// Order is preserved.
pub fn describe_parallel<D, S>(
    describer: &Describer<D>,
    pairs: &[(S, S)],
    molecule: Molecule,
) -> Vec<Result<Allele, DescribeError>>
where
    D: SequenceDiffer + Sync,
    S: AsRef<str> + Sync,
{
    pairs
        .par_iter()
        .map(|(reference, observed)| {
            describer.describe(reference.as_ref(), observed.as_ref(), molecule)
        })
        .collect()
}

/// Describe multiple sequence pairs in parallel, filtering errors
///
/// Returns only the alleles that could be described; failures are logged.
pub fn describe_parallel_ok<D, S>(
    describer: &Describer<D>,
    pairs: &[(S, S)],
    molecule: Molecule,
) -> Vec<Allele>
where
    D: SequenceDiffer + Sync,
    S: AsRef<str> + Sync,
{
    pairs
        .par_iter()
        .filter_map(|(reference, observed)| {
            describer
                .describe(reference.as_ref(), observed.as_ref(), molecule)
                .map_err(|e| log::warn!("Skipping sequence pair: {}", e))
                .ok()
        })
        .collect()
}

/// Statistics from parallel processing
#[derive(Debug, Clone, Default)]
pub struct ParallelStats {
    /// Total items processed
    pub total: usize,
    /// Successfully processed
    pub success: usize,
    /// Failed to process
    pub errors: usize,
}

impl ParallelStats {
    /// Tally a batch of results.
    pub fn from_results<T>(results: &[Result<T, DescribeError>]) -> Self {
        let success = results.iter().filter(|r| r.is_ok()).count();
        Self {
            total: results.len(),
            success,
            errors: results.len() - success,
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }
}
