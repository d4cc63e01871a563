pub use dense::DenseEri;
pub use sparse::SparseEri;
pub use symmetry::{expand_sparse, symmetry_equivalents};

mod dense;
mod sparse;
mod symmetry;

use std::fmt;

/// Failures of the dense expansion. All of them are terminal for the
/// current call, there is no partial result to recover.
#[derive(Debug, Clone, PartialEq)]
pub enum EriError {
    /// The n_orbs^4 buffer could not be obtained, either because the element
    /// count overflows usize or because the reservation itself failed.
    Allocation { n_orbs: usize },
    /// A sparse entry carries an orbital index outside [0, n_orbs). The
    /// whole expansion is aborted, no entry is skipped.
    IndexOutOfRange {
        entry: usize,
        indices: [i32; 4],
        n_orbs: usize,
    },
    /// Two sparse entries resolve to the same tensor slot with values that
    /// disagree beyond the configured tolerance. This points at a corrupt
    /// source dataset rather than a programming error.
    SymmetryConflict {
        indices: [usize; 4],
        first_entry: usize,
        first_value: f64,
        second_entry: usize,
        second_value: f64,
    },
}

impl fmt::Display for EriError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            EriError::Allocation { n_orbs } => {
                write!(
                    f,
                    "could not allocate the dense ERI tensor for {0} orbitals \
                     ({0}^4 doubles)",
                    n_orbs
                )
            }
            EriError::IndexOutOfRange {
                entry,
                indices,
                n_orbs,
            } => {
                write!(
                    f,
                    "sparse ERI entry {} has indices ({}, {}, {}, {}) outside \
                     the orbital range [0, {})",
                    entry, indices[0], indices[1], indices[2], indices[3], n_orbs
                )
            }
            EriError::SymmetryConflict {
                indices,
                first_entry,
                first_value,
                second_entry,
                second_value,
            } => {
                write!(
                    f,
                    "sparse ERI entries {} and {} both map to the tensor slot \
                     ({}, {}, {}, {}) but carry different values ({:e} vs {:e})",
                    first_entry,
                    second_entry,
                    indices[0],
                    indices[1],
                    indices[2],
                    indices[3],
                    first_value,
                    second_value
                )
            }
        }
    }
}

impl std::error::Error for EriError {}
