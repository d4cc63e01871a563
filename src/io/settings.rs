use crate::defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_verbose() -> i8 {
    VERBOSE
}
fn default_symmetry_tolerance() -> f64 {
    SYMMETRY_TOLERANCE
}
fn default_sample_orbitals() -> usize {
    SAMPLE_ORBITALS
}
fn default_expansion_config() -> ExpansionConfig {
    let expansion_config: ExpansionConfig = toml::from_str("").unwrap();
    return expansion_config;
}
fn default_print_config() -> PrintConfig {
    let print_config: PrintConfig = toml::from_str("").unwrap();
    return print_config;
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Configuration {
    #[serde(default = "default_verbose")]
    pub verbose: i8,
    #[serde(default = "default_expansion_config")]
    pub expansion: ExpansionConfig,
    #[serde(default = "default_print_config")]
    pub print: PrintConfig,
}

impl Configuration {
    pub fn new() -> Self {
        // read the moints configuration file, if it does not exist in the
        // directory the program initializes the default settings and writes
        // a configuration file to the directory
        let config_file_path: &Path = Path::new(CONFIG_FILE_NAME);
        let mut config_string: String = if config_file_path.exists() {
            fs::read_to_string(config_file_path).expect("Unable to read config file")
        } else {
            String::from("")
        };
        // load the configuration settings
        let config: Self = toml::from_str(&config_string).unwrap();
        // save the configuration file if it does not exist already so that
        // the user can see all the used options
        if config_file_path.exists() == false {
            config_string = toml::to_string(&config).unwrap();
            fs::write(config_file_path, config_string).expect("Unable to write config file");
        }
        return config;
    }
}

#[derive(Serialize, Deserialize, Clone, Copy)]
pub struct ExpansionConfig {
    // two entries landing on the same tensor slot must agree within this
    #[serde(default = "default_symmetry_tolerance")]
    pub symmetry_tolerance: f64,
}

#[derive(Serialize, Deserialize, Clone, Copy)]
pub struct PrintConfig {
    #[serde(default = "default_sample_orbitals")]
    pub sample_orbitals: usize,
}

#[test]
fn empty_configuration_falls_back_to_the_defaults() {
    let config: Configuration = toml::from_str("").unwrap();
    assert_eq!(config.verbose, VERBOSE);
    assert_eq!(config.expansion.symmetry_tolerance, SYMMETRY_TOLERANCE);
    assert_eq!(config.print.sample_orbitals, SAMPLE_ORBITALS);
}

#[test]
fn partial_configuration_keeps_the_remaining_defaults() {
    let config: Configuration =
        toml::from_str("[expansion]\nsymmetry_tolerance = 1.0e-8\n").unwrap();
    assert_eq!(config.expansion.symmetry_tolerance, 1.0e-8);
    assert_eq!(config.print.sample_orbitals, SAMPLE_ORBITALS);
}
