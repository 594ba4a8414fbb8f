pub mod csv_writer;
pub mod driver;
pub mod geojson_writer;
pub mod geometry;
pub mod gpkg_writer;
pub mod parquet_writer;

pub use csv_writer::CsvWriter;
pub use driver::OutputDriver;
pub use geojson_writer::GeoJsonWriter;
pub use gpkg_writer::GpkgWriter;
pub use parquet_writer::ParquetWriter;

use crate::error::Result;
use crate::models::FormattedTable;
use std::path::Path;

/// Persists a formatted table to `path`
pub trait TableWriter {
    fn write_table(&self, table: &FormattedTable, path: &Path) -> Result<()>;
}

/// Writer for `driver`; Parquet output uses `parquet_compression` and `parquet_row_group_size`
pub fn writer_for(
    driver: OutputDriver,
    parquet_compression: &str,
    parquet_row_group_size: usize,
) -> Result<Box<dyn TableWriter>> {
    Ok(match driver {
        OutputDriver::Csv => Box::new(CsvWriter::new()),
        OutputDriver::GeoJson => Box::new(GeoJsonWriter::new()),
        OutputDriver::Gpkg => Box::new(GpkgWriter::new()),
        OutputDriver::Parquet => {
            Box::new(
                ParquetWriter::new()
                    .with_compression(parquet_compression)?
                    .with_row_group_size(parquet_row_group_size),
            )
        }
    })
}

/// Create the parent directory of `path` and write `table` with `driver`
pub fn export_table(
    table: &FormattedTable,
    path: &Path,
    driver: OutputDriver,
    parquet_compression: &str,
    parquet_row_group_size: usize,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    writer_for(driver, parquet_compression, parquet_row_group_size)?.write_table(table, path)
}
