use crate::error::Result;
use crate::models::{CleanedTable, FormattedTable};
use crate::processors::{
    CoordinateDecoder, RecordFormatter, TimestampReconstructor, UnitConverter,
};
use crate::readers::HeatwatchReader;
use crate::utils::coordinates::mean_position;
use crate::utils::{output_path_for_file, ProgressReporter, TimezoneResolver};
use crate::writers::{export_table, OutputDriver};
use chrono_tz::Tz;
use std::cell::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use validator::Validate;

/// Options shared by every file of a run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub output_dir: PathBuf,
    pub driver: OutputDriver,
    pub convert_tz: bool,
    pub convert_imperial: bool,
    pub parquet_compression: String,
    pub parquet_row_group_size: usize,
    pub quiet: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(crate::utils::DEFAULT_OUTPUT_FOLDER),
            driver: OutputDriver::Csv,
            convert_tz: false,
            convert_imperial: false,
            parquet_compression: crate::utils::COMPRESSION_SNAPPY.to_string(),
            parquet_row_group_size: crate::utils::DEFAULT_ROW_GROUP_SIZE,
            quiet: false,
        }
    }
}

/// Whether a cleaned table is written to disk or handed back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Export,
    Return,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyInput,
    NoValidRows { dropped: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyInput => write!(f, "Input dataframe is empty, skipping file"),
            SkipReason::NoValidRows { dropped } => write!(
                f,
                "No valid rows remain after dropping {} rows, skipping file",
                dropped
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Exported {
        path: PathBuf,
        rows: usize,
        dropped: usize,
    },
    Returned {
        table: FormattedTable,
        dropped: usize,
    },
    Skipped(SkipReason),
}

/// load -> decode -> timestamp -> convert -> format -> export/return for one file
pub struct FilePipeline {
    options: PipelineOptions,
    reader: HeatwatchReader,
    decoder: CoordinateDecoder,
    converter: UnitConverter,
    formatter: RecordFormatter,
    resolver: OnceCell<TimezoneResolver>,
}

impl FilePipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            reader: HeatwatchReader::new(),
            decoder: CoordinateDecoder::new(),
            converter: UnitConverter::new(),
            formatter: RecordFormatter::new(),
            resolver: OnceCell::new(),
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn run(
        &self,
        input: &Path,
        mode: OutputMode,
        reporter: &ProgressReporter,
    ) -> Result<FileOutcome> {
        reporter.println(&format!("Processing file: {}", input.display()));

        let raw = self.reader.read_records(input)?;
        if raw.is_empty() {
            let reason = SkipReason::EmptyInput;
            reporter.println(&format!("Warning: {}", reason));
            return Ok(FileOutcome::Skipped(reason));
        }

        let report = self.decoder.decode(raw);
        let dropped = report.dropped;
        if dropped > 0 {
            reporter.println(&format!("Dropping {} rows with invalid data", dropped));
        }
        if report.records.is_empty() {
            let reason = SkipReason::NoValidRows { dropped };
            reporter.println(&format!("Warning: {}", reason));
            return Ok(FileOutcome::Skipped(reason));
        }

        let timezone = if self.options.convert_tz {
            let mean = mean_position(report.records.iter().map(|r| (r.latitude, r.longitude)));
            self.local_timezone(mean, reporter)
        } else {
            Tz::UTC
        };

        let reconstructor = TimestampReconstructor::new(timezone, self.options.convert_tz);
        let mut table = CleanedTable::new(reconstructor.reconstruct(report.records));
        debug!(
            "{}: {} rows timestamped in {}",
            input.display(),
            table.len(),
            reconstructor.display_zone()
        );

        let out_of_range = table.records.iter().filter(|r| r.validate().is_err()).count();
        if out_of_range > 0 {
            warn!(
                "{}: {} rows have coordinates outside WGS84 bounds",
                input.display(),
                out_of_range
            );
        }

        if self.options.convert_imperial {
            self.converter.to_imperial(&mut table);
        }

        let formatted = self.formatter.format_table(table);

        match mode {
            OutputMode::Return => Ok(FileOutcome::Returned {
                table: formatted,
                dropped,
            }),
            OutputMode::Export => {
                let path = output_path_for_file(input, &self.options.output_dir, self.options.driver);
                export_table(
                    &formatted,
                    &path,
                    self.options.driver,
                    &self.options.parquet_compression,
                    self.options.parquet_row_group_size,
                )?;
                info!("Wrote {} rows to {}", formatted.len(), path.display());
                Ok(FileOutcome::Exported {
                    path,
                    rows: formatted.len(),
                    dropped,
                })
            }
        }
    }

    /// Timezone at the file's mean position, UTC when it cannot be resolved
    fn local_timezone(&self, mean: Option<(f64, f64)>, reporter: &ProgressReporter) -> Tz {
        let Some((lat, lon)) = mean else {
            return Tz::UTC;
        };

        let resolver = self.resolver.get_or_init(TimezoneResolver::new);
        match resolver.resolve(lat, lon) {
            Ok(tz) => tz,
            Err(e) => {
                reporter.println(&format!("Warning: {}; keeping UTC", e));
                Tz::UTC
            }
        }
    }
}
