use crate::cli::args::Cli;
use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::processors::{FileOutcome, FilePipeline, FolderPipeline, OutputMode, PipelineOptions};
use crate::utils::ProgressReporter;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// CLI flags layered over the loaded configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub options: PipelineOptions,
    pub merge_files: bool,
    /// Only an explicit `--merge_files` on a single file earns a warning
    pub merge_flag_given: bool,
    pub input_extension: String,
}

impl RunSettings {
    pub fn resolve(cli: &Cli, config: &ProcessorConfig) -> Self {
        let output_folder = cli
            .output_folder
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output_folder));

        Self {
            options: PipelineOptions {
                output_dir: resolve_output_dir(&cli.input_files, &output_folder),
                driver: cli.ogr_driver.unwrap_or(config.ogr_driver),
                convert_tz: cli.convert_tz || config.convert_tz,
                convert_imperial: cli.convert_imperial || config.convert_imperial,
                parquet_compression: config.parquet_compression.clone(),
                parquet_row_group_size: config.parquet_row_group_size,
                quiet: cli.quiet,
            },
            merge_files: cli.merge_files || config.merge_files,
            merge_flag_given: cli.merge_files,
            input_extension: config.input_extension.clone(),
        }
    }
}

/// A relative output folder is placed inside a folder input rather than the working directory
pub fn resolve_output_dir(input: &Path, output_folder: &Path) -> PathBuf {
    if input.is_dir() && output_folder.is_relative() {
        input.join(output_folder)
    } else {
        output_folder.to_path_buf()
    }
}

/// Structured logging to stderr, or to `--log_file` when given
pub fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("heatwatch_processor={}", log_level)));

    if let Some(ref path) = cli.log_file {
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

pub fn run(cli: Cli) -> Result<()> {
    let config = ProcessorConfig::load(cli.config.as_deref())?;
    let settings = RunSettings::resolve(&cli, &config);
    debug!("Run settings: {:?}", settings);

    let input = cli.input_files.as_path();
    let reporter = ProgressReporter::plain(cli.quiet);

    if input.is_dir() {
        let folder = FolderPipeline::new(settings.options, &settings.input_extension);
        folder.run(input, settings.merge_files)?;
    } else if input.is_file() {
        if settings.merge_flag_given {
            reporter.println("Warning: --merge_files option ignored for single file input");
        }

        let pipeline = FilePipeline::new(settings.options);
        match pipeline.run(input, OutputMode::Export, &reporter) {
            Ok(FileOutcome::Exported { path, rows, .. }) => {
                reporter.println(&format!("Saved {} rows to: {}", rows, path.display()));
            }
            Ok(_) => {}
            Err(e) => {
                reporter.println(&format!("Error processing {}: {}", input.display(), e));
            }
        }
    } else {
        reporter.println("Input path is neither a file nor a folder. Please check.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writers::OutputDriver;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_relative_output_follows_folder_input() -> Result<()> {
        let dir = TempDir::new()?;
        assert_eq!(
            resolve_output_dir(dir.path(), Path::new("formatted")),
            dir.path().join("formatted")
        );
        assert_eq!(
            resolve_output_dir(dir.path(), Path::new("/tmp/out")),
            PathBuf::from("/tmp/out")
        );

        let file = dir.path().join("CAPA1_a.csv");
        std::fs::write(&file, "")?;
        assert_eq!(
            resolve_output_dir(&file, Path::new("formatted")),
            PathBuf::from("formatted")
        );
        Ok(())
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "heatwatch-processor",
            "--input_files",
            "/no/such/input.csv",
            "--ogr_driver",
            "gpkg",
            "--output_folder",
            "out",
        ]);
        let config = ProcessorConfig {
            ogr_driver: OutputDriver::GeoJson,
            convert_imperial: true,
            ..Default::default()
        };

        let settings = RunSettings::resolve(&cli, &config);
        assert_eq!(settings.options.driver, OutputDriver::Gpkg);
        assert_eq!(settings.options.output_dir, PathBuf::from("out"));
        assert!(settings.options.convert_imperial);
        assert!(!settings.options.convert_tz);
        assert!(!settings.merge_files);
    }

    #[test]
    fn test_configured_merge_does_not_count_as_flag() {
        let config = ProcessorConfig {
            merge_files: true,
            ..Default::default()
        };

        let cli = Cli::parse_from(["heatwatch-processor", "--input_files", "CAPA1_a.csv"]);
        let settings = RunSettings::resolve(&cli, &config);
        assert!(settings.merge_files);
        assert!(!settings.merge_flag_given);

        let cli = Cli::parse_from([
            "heatwatch-processor",
            "--input_files",
            "CAPA1_a.csv",
            "--merge_files",
        ]);
        let settings = RunSettings::resolve(&cli, &ProcessorConfig::default());
        assert!(settings.merge_files);
        assert!(settings.merge_flag_given);
    }
}
