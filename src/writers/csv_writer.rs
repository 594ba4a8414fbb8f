use crate::error::Result;
use crate::models::FormattedTable;
use crate::writers::TableWriter;
use csv::WriterBuilder;
use std::path::Path;

/// Plain delimited text with a header row
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableWriter for CsvWriter {
    fn write_table(&self, table: &FormattedTable, path: &Path) -> Result<()> {
        let mut writer = WriterBuilder::new().from_path(path)?;
        writer.write_record(table.headers())?;

        for record in &table.records {
            let cells = record.cells();
            writer.write_record(cells.iter().map(|c| c.as_deref().unwrap_or("")))?;
        }

        writer.flush()?;
        Ok(())
    }
}
