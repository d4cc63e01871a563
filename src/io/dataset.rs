use crate::integrals::SparseEri;
use ndarray::{Array0, Array1, Array2};
use ndarray_npy::NpzReader;
use std::fmt;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

/// Everything the integral archive provides: the nuclear repulsion energy,
/// the orbital counts, the dense core Hamiltonian h[p,q] and the sparse
/// two-electron-integral list. No integral semantics live here, the dense
/// expansion consumes the sparse list through its own boundary.
pub struct IntegralDataset {
    pub e_nn: f64,
    pub mo_num: usize,
    pub n_occ: usize,
    pub core_hamiltonian: Array2<f64>,
    pub eri: SparseEri,
}

/// Translation of the archive-library status codes into typed errors, one
/// variant per failure class so a broken path, a missing member and a
/// malformed member are distinguishable in the report.
#[derive(Debug)]
pub enum DatasetError {
    FileOpen(String),
    Scalar(String),
    Array(String),
    Shape(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatasetError::FileOpen(msg) => write!(f, "dataset open failed: {}", msg),
            DatasetError::Scalar(msg) => write!(f, "dataset scalar read failed: {}", msg),
            DatasetError::Array(msg) => write!(f, "dataset array read failed: {}", msg),
            DatasetError::Shape(msg) => write!(f, "dataset shape mismatch: {}", msg),
        }
    }
}

impl std::error::Error for DatasetError {}

fn read_scalar_f64<R: Read + Seek>(
    npz: &mut NpzReader<R>,
    name: &str,
) -> Result<f64, DatasetError> {
    let value: Array0<f64> = npz
        .by_name(&format!("{}.npy", name))
        .map_err(|err| DatasetError::Scalar(format!("could not read '{}': {}", name, err)))?;
    Ok(value.into_scalar())
}

fn read_scalar_i32<R: Read + Seek>(
    npz: &mut NpzReader<R>,
    name: &str,
) -> Result<i32, DatasetError> {
    let value: Array0<i32> = npz
        .by_name(&format!("{}.npy", name))
        .map_err(|err| DatasetError::Scalar(format!("could not read '{}': {}", name, err)))?;
    Ok(value.into_scalar())
}

fn read_count<R: Read + Seek>(
    npz: &mut NpzReader<R>,
    name: &str,
) -> Result<usize, DatasetError> {
    let value: i32 = read_scalar_i32(npz, name)?;
    if value < 0 {
        return Err(DatasetError::Scalar(format!(
            "'{}' must be non-negative, got {}",
            name, value
        )));
    }
    Ok(value as usize)
}

/// Reads the integral archive. The member layout follows the MO sections of
/// the source data: scalars `nucleus_repulsion`, `mo_num`,
/// `electron_up_num`, the dense matrix `mo_1e_int_core_hamiltonian` and the
/// sparse pair `mo_2e_int_eri_index` (M x 4) / `mo_2e_int_eri_value` (M).
pub fn read_dataset(path: &Path) -> Result<IntegralDataset, DatasetError> {
    let file: File = File::open(path).map_err(|err| {
        DatasetError::FileOpen(format!("could not open '{}': {}", path.display(), err))
    })?;
    let mut npz: NpzReader<File> = NpzReader::new(file).map_err(|err| {
        DatasetError::FileOpen(format!(
            "'{}' is not a readable npz archive: {}",
            path.display(),
            err
        ))
    })?;

    let e_nn: f64 = read_scalar_f64(&mut npz, "nucleus_repulsion")?;
    let mo_num: usize = read_count(&mut npz, "mo_num")?;
    let n_occ: usize = read_count(&mut npz, "electron_up_num")?;

    let core_hamiltonian: Array2<f64> = npz
        .by_name("mo_1e_int_core_hamiltonian.npy")
        .map_err(|err| {
            DatasetError::Array(format!(
                "could not read 'mo_1e_int_core_hamiltonian': {}",
                err
            ))
        })?;
    if core_hamiltonian.nrows() != mo_num || core_hamiltonian.ncols() != mo_num {
        return Err(DatasetError::Shape(format!(
            "core hamiltonian has shape {:?}, expected [{}, {}]",
            core_hamiltonian.shape(),
            mo_num,
            mo_num
        )));
    }

    let eri_index: Array2<i32> = npz.by_name("mo_2e_int_eri_index.npy").map_err(|err| {
        DatasetError::Array(format!("could not read 'mo_2e_int_eri_index': {}", err))
    })?;
    let eri_value: Array1<f64> = npz.by_name("mo_2e_int_eri_value.npy").map_err(|err| {
        DatasetError::Array(format!("could not read 'mo_2e_int_eri_value': {}", err))
    })?;
    if eri_index.ncols() != 4 {
        return Err(DatasetError::Shape(format!(
            "ERI index list has {} columns, expected 4",
            eri_index.ncols()
        )));
    }
    if eri_index.nrows() != eri_value.len() {
        return Err(DatasetError::Shape(format!(
            "{} ERI index quadruples but {} values",
            eri_index.nrows(),
            eri_value.len()
        )));
    }

    let mut eri: SparseEri = SparseEri::with_capacity(eri_value.len());
    for (row, value) in eri_index.outer_iter().zip(eri_value.iter()) {
        eri.push(row[0], row[1], row[2], row[3], *value);
    }

    Ok(IntegralDataset {
        e_nn,
        mo_num,
        n_occ,
        core_hamiltonian,
        eri,
    })
}
