// GENERAL SETTINGS
// config file
pub const CONFIG_FILE_NAME: &str = "moints.toml";
// verbosity of the console output
pub const VERBOSE: i8 = 0;

// DENSE EXPANSION
// two sparse entries that resolve to the same tensor slot through the
// permutational symmetry must agree within this absolute tolerance
pub const SYMMETRY_TOLERANCE: f64 = 1.0e-10;
// the dense tensor holds mo_num^4 doubles; warn above this size in bytes
pub const DENSE_MEMORY_WARNING: u128 = 8 * 1024 * 1024 * 1024;

// CONSOLE REPORT
// number of leading orbitals for which sample integrals are printed
pub const SAMPLE_ORBITALS: usize = 2;
