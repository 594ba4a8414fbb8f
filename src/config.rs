use crate::error::Result;
use crate::utils::constants::{
    COMPRESSION_SNAPPY, DEFAULT_CONFIG_FILE, DEFAULT_INPUT_EXTENSION, DEFAULT_OUTPUT_FOLDER,
    DEFAULT_ROW_GROUP_SIZE, ENV_PREFIX,
};
use crate::writers::parquet_writer::parse_compression;
use crate::writers::OutputDriver;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use validator::Validate;

/// Defaults for a processing run, layered from file and environment
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct ProcessorConfig {
    #[validate(length(min = 1))]
    pub output_folder: String,

    pub ogr_driver: OutputDriver,

    pub convert_tz: bool,

    pub convert_imperial: bool,

    pub merge_files: bool,

    #[validate(length(min = 1))]
    pub input_extension: String,

    pub parquet_compression: String,

    #[validate(range(min = 1))]
    pub parquet_row_group_size: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            output_folder: DEFAULT_OUTPUT_FOLDER.to_string(),
            ogr_driver: OutputDriver::Csv,
            convert_tz: false,
            convert_imperial: false,
            merge_files: false,
            input_extension: DEFAULT_INPUT_EXTENSION.to_string(),
            parquet_compression: COMPRESSION_SNAPPY.to_string(),
            parquet_row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }
}

impl ProcessorConfig {
    /// Load defaults, then `path` (or `heatwatch.toml` if present), then `HEATWATCH_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_source = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("output_folder", DEFAULT_OUTPUT_FOLDER)?
            .set_default("ogr_driver", OutputDriver::Csv.name())?
            .set_default("convert_tz", false)?
            .set_default("convert_imperial", false)?
            .set_default("merge_files", false)?
            .set_default("input_extension", DEFAULT_INPUT_EXTENSION)?
            .set_default("parquet_compression", COMPRESSION_SNAPPY)?
            .set_default("parquet_row_group_size", DEFAULT_ROW_GROUP_SIZE as i64)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ProcessorConfig = settings.try_deserialize()?;
        config.check()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Field validation plus a compression name the Parquet writer accepts
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        parse_compression(&self.parquet_compression)?;
        Ok(())
    }
}
