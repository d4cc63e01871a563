use crate::integrals::EriError;
use ndarray::{Array, Array4, ArrayView4};
use std::mem;

/// Dense two-electron-integral tensor in the MO basis. All n_orbs^4 slots of
/// ⟨pq|rs⟩ are materialized, trading memory (fourth power of the orbital
/// count) for constant-time lookup in the consumers.
///
/// The backing array is in standard row-major layout with p slowest-varying,
/// so the flat offset of (p, q, r, s) is ((p*N + q)*N + r)*N + s. Writers
/// and readers of the flat view share this convention.
pub struct DenseEri {
    n_orbs: usize,
    data: Array4<f64>,
}

impl DenseEri {
    /// Allocates the zero-initialized tensor for `n_orbs` orbitals. The
    /// element count is computed with checked arithmetic and the buffer is
    /// reserved fallibly, so an oversized orbital count surfaces as
    /// `EriError::Allocation` instead of aborting the process.
    pub fn zeros(n_orbs: usize) -> Result<Self, EriError> {
        let n_elements: usize = n_orbs
            .checked_pow(4)
            .ok_or(EriError::Allocation { n_orbs })?;
        let mut buffer: Vec<f64> = Vec::new();
        if buffer.try_reserve_exact(n_elements).is_err() {
            return Err(EriError::Allocation { n_orbs });
        }
        buffer.resize(n_elements, 0.0);
        let data: Array4<f64> =
            Array::from_shape_vec((n_orbs, n_orbs, n_orbs, n_orbs), buffer)
                .map_err(|_| EriError::Allocation { n_orbs })?;
        Ok(DenseEri { n_orbs, data })
    }

    /// Memory footprint of a dense expansion for `n_orbs` orbitals in bytes.
    /// None if the element count does not fit into the checked arithmetic.
    pub fn required_bytes(n_orbs: usize) -> Option<u128> {
        (n_orbs as u128)
            .checked_pow(4)?
            .checked_mul(mem::size_of::<f64>() as u128)
    }

    pub fn n_orbs(&self) -> usize {
        self.n_orbs
    }

    /// Total number of elements, n_orbs^4.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, p: usize, q: usize, r: usize, s: usize) -> f64 {
        self.data[[p, q, r, s]]
    }

    pub(crate) fn set(&mut self, p: usize, q: usize, r: usize, s: usize, value: f64) {
        self.data[[p, q, r, s]] = value;
    }

    /// Row-major flat offset of (p, q, r, s), see the type-level convention.
    pub fn flat_index(&self, p: usize, q: usize, r: usize, s: usize) -> usize {
        ((p * self.n_orbs + q) * self.n_orbs + r) * self.n_orbs + s
    }

    pub fn view(&self) -> ArrayView4<f64> {
        self.data.view()
    }

    /// Read-only flat view, addressed through `flat_index`. The backing
    /// array is constructed contiguously in standard layout.
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice().unwrap()
    }

    pub fn into_array(self) -> Array4<f64> {
        self.data
    }
}

#[test]
fn flat_offsets_are_row_major() {
    let mut dense: DenseEri = DenseEri::zeros(3).unwrap();
    assert_eq!(dense.flat_index(0, 0, 0, 0), 0);
    assert_eq!(dense.flat_index(0, 0, 0, 2), 2);
    assert_eq!(dense.flat_index(0, 0, 1, 0), 3);
    assert_eq!(dense.flat_index(0, 1, 0, 0), 9);
    assert_eq!(dense.flat_index(1, 0, 0, 0), 27);
    assert_eq!(dense.flat_index(2, 1, 0, 2), 2 * 27 + 9 + 2);
    dense.set(2, 1, 0, 2, -0.5);
    assert_eq!(dense.as_slice()[dense.flat_index(2, 1, 0, 2)], -0.5);
}

#[test]
fn tensor_has_fourth_power_size() {
    assert_eq!(DenseEri::zeros(0).unwrap().len(), 0);
    assert_eq!(DenseEri::zeros(1).unwrap().len(), 1);
    assert_eq!(DenseEri::zeros(3).unwrap().len(), 81);
    assert!(DenseEri::zeros(0).unwrap().is_empty());
}

#[test]
fn oversized_orbital_count_is_rejected() {
    // 65536^4 overflows the 64-bit element count
    let result: Result<DenseEri, EriError> = DenseEri::zeros(65536);
    assert_eq!(result.err(), Some(EriError::Allocation { n_orbs: 65536 }));
}

#[test]
fn memory_footprint_is_reported() {
    assert_eq!(DenseEri::required_bytes(0), Some(0));
    assert_eq!(DenseEri::required_bytes(2), Some(128));
    assert_eq!(DenseEri::required_bytes(100), Some(800_000_000));
}
