use crate::writers::OutputDriver;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "heatwatch-processor")]
#[command(about = "Process Heatwatch CSV file(s).")]
#[command(version)]
pub struct Cli {
    #[arg(long = "input_files", help = "Input CSV file or folder path")]
    pub input_files: PathBuf,

    #[arg(
        long = "output_folder",
        help = "Output folder path [default: formatted, relative to a folder input]"
    )]
    pub output_folder: Option<PathBuf>,

    #[arg(
        long = "ogr_driver",
        help = "File format for export: CSV, GeoJSON, GPKG or Parquet [default: CSV]"
    )]
    pub ogr_driver: Option<OutputDriver>,

    #[arg(
        long = "convert_tz",
        help = "Convert to local timezone instead of leaving timestamps in UTC"
    )]
    pub convert_tz: bool,

    #[arg(
        long = "convert_imperial",
        help = "Convert to imperial units instead of leaving them metric"
    )]
    pub convert_imperial: bool,

    #[arg(
        long = "merge_files",
        help = "Merge all CSV files in a folder into a single output (folder input only)"
    )]
    pub merge_files: bool,

    #[arg(long, help = "Configuration file [default: heatwatch.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, help = "Suppress progress output")]
    pub quiet: bool,

    #[arg(long = "log_file", help = "Log file path")]
    pub log_file: Option<PathBuf>,
}
