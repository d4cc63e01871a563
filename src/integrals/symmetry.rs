use crate::integrals::{DenseEri, EriError, SparseEri};
use hashbrown::HashMap;

/// The eight index quadruples that carry the same value as ⟨pq|rs⟩ for
/// real-valued orbitals:
///     ⟨pq|rs⟩ = ⟨rq|ps⟩ = ⟨ps|rq⟩ = ⟨rs|pq⟩
///             = ⟨qp|sr⟩ = ⟨sp|qr⟩ = ⟨qr|sp⟩ = ⟨sr|qp⟩
/// Coinciding orbital indices collapse some of the eight onto the same slot.
pub fn symmetry_equivalents(p: usize, q: usize, r: usize, s: usize) -> [[usize; 4]; 8] {
    [
        [p, q, r, s],
        [r, q, p, s],
        [p, s, r, q],
        [r, s, p, q],
        [q, p, s, r],
        [s, p, q, r],
        [q, r, s, p],
        [s, r, q, p],
    ]
}

/// Expands the sparse, symmetry-compressed integral list into the dense
/// n_orbs^4 tensor. Every slot reachable from a stored entry through the
/// eight-fold permutational symmetry receives that entry's value unchanged,
/// all remaining slots stay zero.
///
/// Every orbital index is validated against [0, n_orbs) before the tensor
/// is allocated; an offending entry aborts the whole expansion. When two
/// entries resolve to the same slot their values must agree within
/// `tolerance`, the value written first is kept. Disagreement beyond the
/// tolerance is reported as a symmetry conflict with both entries.
///
/// Runs in O(M) time for M entries and O(n_orbs^4) space.
pub fn expand_sparse(
    n_orbs: usize,
    sparse: &SparseEri,
    tolerance: f64,
) -> Result<DenseEri, EriError> {
    for (entry, (indices, _value)) in sparse.iter().enumerate() {
        for &index in indices.iter() {
            if index < 0 || index as usize >= n_orbs {
                return Err(EriError::IndexOutOfRange {
                    entry,
                    indices,
                    n_orbs,
                });
            }
        }
    }
    let mut dense: DenseEri = DenseEri::zeros(n_orbs)?;
    // flat offset -> (entry that wrote it, its value)
    let mut written: HashMap<usize, (usize, f64)> = HashMap::new();
    for (entry, (indices, value)) in sparse.iter().enumerate() {
        let p: usize = indices[0] as usize;
        let q: usize = indices[1] as usize;
        let r: usize = indices[2] as usize;
        let s: usize = indices[3] as usize;
        // entries that share one slot share the entire symmetry orbit, so a
        // single representative decides between skip and conflict
        if let Some(&(first_entry, first_value)) = written.get(&dense.flat_index(p, q, r, s)) {
            if (value - first_value).abs() > tolerance {
                return Err(EriError::SymmetryConflict {
                    indices: [p, q, r, s],
                    first_entry,
                    first_value,
                    second_entry: entry,
                    second_value: value,
                });
            }
            continue;
        }
        for &[a, b, c, d] in symmetry_equivalents(p, q, r, s).iter() {
            written.insert(dense.flat_index(a, b, c, d), (entry, value));
            dense.set(a, b, c, d, value);
        }
    }
    Ok(dense)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::SYMMETRY_TOLERANCE;
    use approx::assert_abs_diff_eq;
    use itertools::iproduct;

    fn sparse_from(entries: &[(i32, i32, i32, i32, f64)]) -> SparseEri {
        let mut sparse: SparseEri = SparseEri::with_capacity(entries.len());
        for &(p, q, r, s, value) in entries.iter() {
            sparse.push(p, q, r, s, value);
        }
        sparse
    }

    #[test]
    fn empty_input_leaves_the_tensor_zero() {
        let dense: DenseEri =
            expand_sparse(3, &SparseEri::new(), SYMMETRY_TOLERANCE).unwrap();
        assert_eq!(dense.len(), 81);
        assert!(dense.as_slice().iter().all(|value| *value == 0.0));
    }

    #[test]
    fn empty_input_with_zero_orbitals_gives_the_empty_tensor() {
        let dense: DenseEri =
            expand_sparse(0, &SparseEri::new(), SYMMETRY_TOLERANCE).unwrap();
        assert_eq!(dense.len(), 0);
    }

    #[test]
    fn all_eight_permutations_carry_the_value() {
        let sparse: SparseEri = sparse_from(&[(0, 1, 2, 3, 0.125)]);
        let dense: DenseEri = expand_sparse(4, &sparse, SYMMETRY_TOLERANCE).unwrap();
        for &[p, q, r, s] in symmetry_equivalents(0, 1, 2, 3).iter() {
            assert_eq!(dense.get(p, q, r, s), 0.125);
        }
        // all indices distinct, the orbit has the full eight members
        let nonzero: usize = dense
            .as_slice()
            .iter()
            .filter(|value| **value != 0.0)
            .count();
        assert_eq!(nonzero, 8);
    }

    #[test]
    fn coinciding_indices_collapse_the_orbit() {
        let sparse: SparseEri = sparse_from(&[(0, 0, 1, 0, 0.25)]);
        let dense: DenseEri = expand_sparse(2, &sparse, SYMMETRY_TOLERANCE).unwrap();
        // the orbit of (0,0,1,0) has four distinct members
        for &[p, q, r, s] in [[0, 0, 1, 0], [1, 0, 0, 0], [0, 0, 0, 1], [0, 1, 0, 0]].iter() {
            assert_eq!(dense.get(p, q, r, s), 0.25);
        }
        for (p, q, r, s) in iproduct!(0..2, 0..2, 0..2, 0..2) {
            let in_orbit: bool = symmetry_equivalents(0, 0, 1, 0)
                .iter()
                .any(|other| *other == [p, q, r, s]);
            if !in_orbit {
                assert_eq!(dense.get(p, q, r, s), 0.0);
            }
        }
    }

    #[test]
    fn single_orbital_tensor_has_one_element() {
        let sparse: SparseEri = sparse_from(&[(0, 0, 0, 0, 3.5)]);
        let dense: DenseEri = expand_sparse(1, &sparse, SYMMETRY_TOLERANCE).unwrap();
        assert_eq!(dense.len(), 1);
        assert_eq!(dense.get(0, 0, 0, 0), 3.5);
    }

    #[test]
    fn expansion_is_independent_of_the_entry_order() {
        let entries: [(i32, i32, i32, i32, f64); 3] = [
            (0, 0, 0, 0, 0.625),
            (0, 0, 1, 0, 0.196),
            (1, 1, 2, 1, -0.044),
        ];
        let reversed: Vec<(i32, i32, i32, i32, f64)> =
            entries.iter().rev().copied().collect();
        let forward: DenseEri =
            expand_sparse(3, &sparse_from(&entries), SYMMETRY_TOLERANCE).unwrap();
        let backward: DenseEri =
            expand_sparse(3, &sparse_from(&reversed), SYMMETRY_TOLERANCE).unwrap();
        assert_eq!(forward.into_array(), backward.into_array());
    }

    #[test]
    fn index_at_the_orbital_count_is_rejected() {
        let sparse: SparseEri = sparse_from(&[(0, 0, 2, 0, 1.0)]);
        let result: Result<DenseEri, EriError> =
            expand_sparse(2, &sparse, SYMMETRY_TOLERANCE);
        assert_eq!(
            result.err(),
            Some(EriError::IndexOutOfRange {
                entry: 0,
                indices: [0, 0, 2, 0],
                n_orbs: 2,
            })
        );
    }

    #[test]
    fn negative_index_is_rejected() {
        let sparse: SparseEri = sparse_from(&[(0, 0, 0, 0, 1.0), (0, -1, 0, 0, 1.0)]);
        let result: Result<DenseEri, EriError> =
            expand_sparse(2, &sparse, SYMMETRY_TOLERANCE);
        assert_eq!(
            result.err(),
            Some(EriError::IndexOutOfRange {
                entry: 1,
                indices: [0, -1, 0, 0],
                n_orbs: 2,
            })
        );
    }

    #[test]
    fn any_entry_is_out_of_range_for_zero_orbitals() {
        let sparse: SparseEri = sparse_from(&[(0, 0, 0, 0, 1.0)]);
        let result: Result<DenseEri, EriError> =
            expand_sparse(0, &sparse, SYMMETRY_TOLERANCE);
        assert_eq!(
            result.err(),
            Some(EriError::IndexOutOfRange {
                entry: 0,
                indices: [0, 0, 0, 0],
                n_orbs: 0,
            })
        );
    }

    #[test]
    fn overlapping_entries_with_equal_values_are_accepted() {
        // (0,1,0,0) and (0,0,0,1) lie on the same symmetry orbit
        let sparse: SparseEri = sparse_from(&[(0, 1, 0, 0, 0.5), (0, 0, 0, 1, 0.5)]);
        let dense: DenseEri = expand_sparse(2, &sparse, SYMMETRY_TOLERANCE).unwrap();
        assert_eq!(dense.get(0, 1, 0, 0), 0.5);
        assert_eq!(dense.get(0, 0, 0, 1), 0.5);
        assert_eq!(dense.get(1, 0, 0, 0), 0.5);
        assert_eq!(dense.get(0, 0, 1, 0), 0.5);
    }

    #[test]
    fn overlapping_entries_within_the_tolerance_keep_the_first_value() {
        let first: f64 = 0.5;
        let second: f64 = 0.5 + 1.0e-12;
        let sparse: SparseEri =
            sparse_from(&[(0, 1, 0, 0, first), (0, 0, 0, 1, second)]);
        let dense: DenseEri = expand_sparse(2, &sparse, SYMMETRY_TOLERANCE).unwrap();
        assert_eq!(dense.get(0, 0, 0, 1), first);
        assert_abs_diff_eq!(dense.get(0, 0, 0, 1), second, epsilon = 1.0e-11);
    }

    #[test]
    fn conflicting_overlapping_entries_are_reported() {
        let sparse: SparseEri = sparse_from(&[(0, 1, 0, 0, 0.5), (0, 0, 0, 1, 9.9)]);
        let result: Result<DenseEri, EriError> =
            expand_sparse(2, &sparse, SYMMETRY_TOLERANCE);
        assert_eq!(
            result.err(),
            Some(EriError::SymmetryConflict {
                indices: [0, 0, 0, 1],
                first_entry: 0,
                first_value: 0.5,
                second_entry: 1,
                second_value: 9.9,
            })
        );
    }

    #[test]
    fn rewriting_a_slot_with_the_same_value_is_harmless() {
        // the literal duplicate of an entry is not a conflict
        let sparse: SparseEri = sparse_from(&[(0, 0, 1, 0, 0.25), (0, 0, 1, 0, 0.25)]);
        let dense: DenseEri = expand_sparse(2, &sparse, SYMMETRY_TOLERANCE).unwrap();
        assert_eq!(dense.get(0, 0, 1, 0), 0.25);
    }
}
