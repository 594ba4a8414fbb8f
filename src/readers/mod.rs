pub mod heatwatch_reader;

pub use heatwatch_reader::{discover_input_files, HeatwatchReader};
