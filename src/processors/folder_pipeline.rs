use crate::error::Result;
use crate::models::{FormattedTable, UnitSystem};
use crate::processors::file_pipeline::{FileOutcome, FilePipeline, OutputMode, PipelineOptions};
use crate::readers::discover_input_files;
use crate::utils::{combined_output_path, ProgressReporter};
use crate::writers::export_table;
use std::path::{Path, PathBuf};
use tracing::info;

/// Counts for one folder run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderSummary {
    pub files_found: usize,
    pub exported: usize,
    pub skipped: usize,
    pub failed: usize,
    pub rows_dropped: usize,
    pub combined_output: Option<PathBuf>,
    pub combined_rows: usize,
}

impl FolderSummary {
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Processed {} file(s): {} exported, {} skipped, {} failed",
            self.files_found, self.exported, self.skipped, self.failed
        );
        if let Some(ref path) = self.combined_output {
            text.push_str(&format!(
                "\nCombined {} rows into {}",
                self.combined_rows,
                path.display()
            ));
        }
        text
    }
}

/// Runs the file pipeline over every input file of a directory
pub struct FolderPipeline {
    pipeline: FilePipeline,
    input_extension: String,
}

impl FolderPipeline {
    pub fn new(options: PipelineOptions, input_extension: &str) -> Self {
        Self {
            pipeline: FilePipeline::new(options),
            input_extension: input_extension.to_string(),
        }
    }

    pub fn run(&self, folder: &Path, merge_files: bool) -> Result<FolderSummary> {
        let files = discover_input_files(folder, &self.input_extension)?;
        let quiet = self.pipeline.options().quiet;

        if files.is_empty() {
            ProgressReporter::plain(quiet).println(&format!(
                "No {} files found in the specified folder",
                self.input_extension.to_uppercase()
            ));
            return Ok(FolderSummary::default());
        }

        let reporter = ProgressReporter::new(files.len() as u64, "Processing files...", quiet);
        let summary = if merge_files {
            self.run_merged(folder, &files, &reporter)?
        } else {
            self.run_individually(&files, &reporter)
        };
        reporter.finish_with_message(&summary.summary());
        Ok(summary)
    }

    fn run_individually(&self, files: &[PathBuf], reporter: &ProgressReporter) -> FolderSummary {
        let mut summary = FolderSummary {
            files_found: files.len(),
            ..Default::default()
        };

        for file in files {
            match self.pipeline.run(file, OutputMode::Export, reporter) {
                Ok(FileOutcome::Exported { dropped, .. }) => {
                    summary.exported += 1;
                    summary.rows_dropped += dropped;
                }
                Ok(FileOutcome::Skipped(_)) => summary.skipped += 1,
                Ok(FileOutcome::Returned { .. }) => {}
                Err(e) => {
                    reporter.println(&format!("Error processing {}: {}", file.display(), e));
                    summary.failed += 1;
                }
            }
            reporter.increment(1);
        }

        summary
    }

    fn run_merged(
        &self,
        folder: &Path,
        files: &[PathBuf],
        reporter: &ProgressReporter,
    ) -> Result<FolderSummary> {
        let options = self.pipeline.options();
        let mut summary = FolderSummary {
            files_found: files.len(),
            ..Default::default()
        };

        reporter.println(&format!(
            "Grouping {} {} files into a single output",
            files.len(),
            self.input_extension.to_uppercase()
        ));

        let mut combined = FormattedTable {
            units: if options.convert_imperial {
                UnitSystem::Imperial
            } else {
                UnitSystem::Metric
            },
            records: Vec::new(),
        };

        for file in files {
            match self.pipeline.run(file, OutputMode::Return, reporter) {
                Ok(FileOutcome::Returned { table, dropped }) => {
                    summary.rows_dropped += dropped;
                    combined.extend(table);
                }
                Ok(FileOutcome::Skipped(_)) => summary.skipped += 1,
                Ok(FileOutcome::Exported { .. }) => {}
                Err(e) => {
                    reporter.println(&format!("Error processing {}: {}", file.display(), e));
                    summary.failed += 1;
                }
            }
            reporter.increment(1);
        }

        if combined.is_empty() {
            reporter.println(&format!(
                "No valid data found in any {} files",
                self.input_extension.to_uppercase()
            ));
            return Ok(summary);
        }

        let path = combined_output_path(folder, &options.output_dir, options.driver);
        export_table(
            &combined,
            &path,
            options.driver,
            &options.parquet_compression,
            options.parquet_row_group_size,
        )?;
        reporter.println(&format!("Combined output saved to: {}", path.display()));
        info!("Merged {} rows from {} files", combined.len(), files.len());

        summary.exported = 1;
        summary.combined_rows = combined.len();
        summary.combined_output = Some(path);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writers::OutputDriver;
    use tempfile::TempDir;

    const HEADER: &str =
        "gpslock,satellites,date,time,lat,lon,altitude,course,speedkmhr,humidity,temperature,battery";

    fn write_input(dir: &Path, name: &str, rows: &[&str]) {
        let mut content = format!("{}\n", HEADER);
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        std::fs::write(dir.join(name), content).unwrap();
    }

    fn options(output_dir: PathBuf) -> PipelineOptions {
        PipelineOptions {
            output_dir,
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_individual_outputs() -> Result<()> {
        let dir = TempDir::new()?;
        let out = dir.path().join("formatted");
        write_input(
            dir.path(),
            "CAPA1_a.csv",
            &["1,8,101023,091500,4807.0372N,01131.5000E,1,1,1,1,1,1"],
        );
        write_input(dir.path(), "CAPA2_b.csv", &[]);
        write_input(dir.path(), "CAPA3_c.csv", &["1,eight,101023,091500,x,y,1,1,1,1,1,1"]);

        let summary = FolderPipeline::new(options(out.clone()), "csv").run(dir.path(), false)?;
        assert_eq!(summary.files_found, 3);
        assert_eq!(summary.exported, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert!(out.join("CAPA1_a.csv").exists());
        assert!(!out.join("CAPA2_b.csv").exists());
        Ok(())
    }

    #[test]
    fn test_merged_output_preserves_order() -> Result<()> {
        let dir = TempDir::new()?;
        let data = dir.path().join("july");
        std::fs::create_dir(&data)?;
        let out = data.join("formatted");

        write_input(
            &data,
            "CAPA1_a.csv",
            &[
                "1,8,101023,091500,4807.0372N,01131.5000E,1,1,1,1,1,1",
                "1,8,101023,091501,bad,01131.5000E,1,1,1,1,1,1",
                "1,8,101023,091502,4807.0372N,01131.5000E,1,1,1,1,1,1",
            ],
        );
        write_input(
            &data,
            "CAPA2_b.csv",
            &["1,8,101023,091503,4807.0372N,01131.5000E,1,1,1,1,1,1"],
        );

        let summary = FolderPipeline::new(options(out.clone()), "csv").run(&data, true)?;
        let combined = out.join("july_combined.csv");
        assert_eq!(summary.combined_output.as_deref(), Some(combined.as_path()));
        assert_eq!(summary.combined_rows, 3);
        assert_eq!(summary.rows_dropped, 1);

        let content = std::fs::read_to_string(&combined)?;
        let times: Vec<&str> = content
            .lines()
            .skip(1)
            .map(|line| line.rsplit(',').next().unwrap())
            .collect();
        assert_eq!(
            times,
            vec![
                "2023-10-10 09:15:00+00:00",
                "2023-10-10 09:15:02+00:00",
                "2023-10-10 09:15:03+00:00"
            ]
        );
        assert!(!out.join("CAPA1_a.csv").exists());
        Ok(())
    }

    #[test]
    fn test_merge_with_no_valid_rows_writes_nothing() -> Result<()> {
        let dir = TempDir::new()?;
        let out = dir.path().join("formatted");
        write_input(
            dir.path(),
            "CAPA1_a.csv",
            &["1,8,101023,091500,bad,01131.5000E,1,1,1,1,1,1"],
        );

        let summary = FolderPipeline::new(
            PipelineOptions {
                driver: OutputDriver::GeoJson,
                ..options(out.clone())
            },
            "csv",
        )
        .run(dir.path(), true)?;
        assert_eq!(summary.combined_output, None);
        assert_eq!(summary.skipped, 1);
        assert!(!out.exists());
        Ok(())
    }

    #[test]
    fn test_empty_folder() -> Result<()> {
        let dir = TempDir::new()?;
        let summary =
            FolderPipeline::new(options(dir.path().join("formatted")), "csv").run(dir.path(), true)?;
        assert_eq!(summary, FolderSummary::default());
        Ok(())
    }
}
