mod dataset;
mod imprint;
pub(crate) mod settings;

pub use dataset::{read_dataset, DatasetError, IntegralDataset};
pub use imprint::write_header;
pub use settings::{Configuration, ExpansionConfig, PrintConfig};
