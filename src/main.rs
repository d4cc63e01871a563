mod defaults;
mod integrals;
mod io;
mod utils;

use crate::defaults::DENSE_MEMORY_WARNING;
use crate::integrals::{expand_sparse, DenseEri};
use crate::io::{read_dataset, write_header, Configuration, IntegralDataset};
use crate::utils::Timer;
use anyhow::Context;
use clap::{crate_version, App, Arg};
use itertools::iproduct;
use log::{error, info, warn, LevelFilter};
use std::io::Write;
use std::path::Path;
use std::process;

fn main() {
    let matches = App::new("moints")
        .version(crate_version!())
        .about("Reads a molecular-orbital integral dataset and expands the sparse two-electron integrals into the dense tensor")
        .arg(
            Arg::new("dataset-file")
                .about("npz archive with the integral data in the MO basis")
                .required(true)
                .index(1),
        )
        .get_matches();
    let config: Configuration = Configuration::new();
    init_logger(config.verbose);
    write_header();
    let timer: Timer = Timer::start("total run time:");
    let dataset_file: &str = matches.value_of("dataset-file").unwrap();
    if let Err(err) = run(Path::new(dataset_file), &config) {
        error!("{:#}", err);
        process::exit(1);
    }
    info!("{}", timer);
}

fn run(dataset_file: &Path, config: &Configuration) -> anyhow::Result<()> {
    let dataset: IntegralDataset = read_dataset(dataset_file)
        .with_context(|| format!("failed to read integral dataset '{}'", dataset_file.display()))?;
    info!("{:<22} {}", "dataset:", dataset_file.display());
    info!("{:<22} {:.10}", "E_nn:", dataset.e_nn);
    info!("{:<22} {}", "mo_num:", dataset.mo_num);
    info!("{:<22} {}", "nocc:", dataset.n_occ);
    info!("{:<22} {}", "sparse ERI entries:", dataset.eri.len());
    info!("");
    print_core_hamiltonian_samples(&dataset, config.print.sample_orbitals);

    report_dense_footprint(dataset.mo_num);
    let dense: DenseEri = expand_sparse(
        dataset.mo_num,
        &dataset.eri,
        config.expansion.symmetry_tolerance,
    )
    .context("dense expansion of the two-electron integrals failed")?;
    print_eri_samples(&dense, config.print.sample_orbitals);
    Ok(())
}

// The dense tensor trades memory for constant-time lookup; its footprint
// grows with the fourth power of the orbital count and is reported before
// the allocation happens.
fn report_dense_footprint(n_orbs: usize) {
    const GIB: f64 = 1073741824.0;
    if let Some(bytes) = DenseEri::required_bytes(n_orbs) {
        info!(
            "dense tensor: {0}^4 = {1} elements ({2:.3} GiB)",
            n_orbs,
            (n_orbs as u128).pow(4),
            bytes as f64 / GIB
        );
        if bytes > DENSE_MEMORY_WARNING {
            warn!(
                "the dense tensor grows with the fourth power of mo_num, \
                 {} orbitals need {:.1} GiB",
                n_orbs,
                bytes as f64 / GIB
            );
        }
    }
}

fn print_core_hamiltonian_samples(dataset: &IntegralDataset, sample_orbitals: usize) {
    let n_samples: usize = sample_orbitals.min(dataset.mo_num);
    for (p, q) in iproduct!(0..n_samples, 0..n_samples) {
        info!("h({},{}) = {:.10}", p, q, dataset.core_hamiltonian[[p, q]]);
    }
}

fn print_eri_samples(dense: &DenseEri, sample_orbitals: usize) {
    let n_samples: usize = sample_orbitals.min(dense.n_orbs());
    for (p, q, r, s) in iproduct!(0..n_samples, 0..n_samples, 0..n_samples, 0..n_samples) {
        info!("g({},{},{},{}) = {:.10}", p, q, r, s, dense.get(p, q, r, s));
    }
}

fn init_logger(verbose: i8) {
    let level: LevelFilter = match verbose {
        v if v > 0 => LevelFilter::Trace,
        0 => LevelFilter::Info,
        _ => LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .filter(None, level)
        .init();
}
