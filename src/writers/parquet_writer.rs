use crate::error::{ProcessingError, Result};
use crate::models::{FormattedRecord, FormattedTable};
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE,
};
use crate::writers::geometry::point_wkb;
use crate::writers::TableWriter;
use arrow::array::{ArrayRef, BinaryArray, BooleanArray, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::metadata::KeyValue;
use parquet::file::properties::WriterProperties;
use serde_json::json;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// GeoParquet output: formatted columns plus a WKB `geometry` column
pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = parse_compression(compression)?;
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Arrow schema for `table`
    fn create_schema(&self, table: &FormattedTable) -> Arc<Schema> {
        let mut fields: Vec<Field> = table
            .headers()
            .iter()
            .map(|name| match *name {
                "gpslock" => Field::new(*name, DataType::Boolean, false),
                "satellites" => Field::new(*name, DataType::UInt32, false),
                "lat" | "lon" => Field::new(*name, DataType::Utf8, false),
                _ => Field::new(*name, DataType::Utf8, true),
            })
            .collect();
        fields.push(Field::new("geometry", DataType::Binary, false));

        Arc::new(Schema::new(fields))
    }

    /// GeoParquet file metadata stored under the `geo` key
    fn geo_metadata(&self, table: &FormattedTable) -> Result<KeyValue> {
        let geo = json!({
            "version": "1.1.0",
            "primary_column": "geometry",
            "columns": {
                "geometry": {
                    "encoding": "WKB",
                    "geometry_types": ["Point"],
                    "bbox": table.bounds(),
                }
            }
        });
        Ok(KeyValue::new("geo".to_string(), serde_json::to_string(&geo)?))
    }

    fn records_to_batch(
        &self,
        records: &[FormattedRecord],
        schema: Arc<Schema>,
    ) -> Result<RecordBatch> {
        let geometries = records
            .iter()
            .map(|r| {
                r.point().map(|(x, y)| point_wkb(x, y)).ok_or_else(|| {
                    ProcessingError::InvalidFormat(format!(
                        "Cannot build point from lat '{}', lon '{}'",
                        r.latitude, r.longitude
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let columns: Vec<ArrayRef> = vec![
            Arc::new(BooleanArray::from(
                records.iter().map(|r| r.gps_lock).collect::<Vec<_>>(),
            )),
            Arc::new(UInt32Array::from(
                records.iter().map(|r| r.satellites).collect::<Vec<_>>(),
            )),
            text_column(records, |r| Some(r.latitude.as_str())),
            text_column(records, |r| Some(r.longitude.as_str())),
            text_column(records, |r| r.altitude.as_deref()),
            text_column(records, |r| r.course.as_deref()),
            text_column(records, |r| r.speed.as_deref()),
            text_column(records, |r| r.humidity.as_deref()),
            text_column(records, |r| r.temperature.as_deref()),
            text_column(records, |r| r.battery.as_deref()),
            text_column(records, |r| r.sensor_id.as_deref()),
            text_column(records, |r| r.timestamp.as_deref()),
            Arc::new(BinaryArray::from_iter_values(geometries.iter())),
        ];

        Ok(RecordBatch::try_new(schema, columns)?)
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableWriter for ParquetWriter {
    fn write_table(&self, table: &FormattedTable, path: &Path) -> Result<()> {
        let schema = self.create_schema(table);
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .set_key_value_metadata(Some(vec![self.geo_metadata(table)?]))
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;
        for chunk in table.records.chunks(self.row_group_size.max(1)) {
            let batch = self.records_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }
        writer.close()?;
        Ok(())
    }
}

fn text_column<'a, F>(records: &'a [FormattedRecord], value: F) -> ArrayRef
where
    F: Fn(&'a FormattedRecord) -> Option<&'a str>,
{
    Arc::new(records.iter().map(value).collect::<StringArray>())
}

pub fn parse_compression(compression: &str) -> Result<Compression> {
    match compression.to_lowercase().as_str() {
        COMPRESSION_SNAPPY => Ok(Compression::SNAPPY),
        COMPRESSION_GZIP => Ok(Compression::GZIP(GzipLevel::default())),
        COMPRESSION_LZ4 => Ok(Compression::LZ4),
        COMPRESSION_ZSTD => Ok(Compression::ZSTD(parquet::basic::ZstdLevel::default())),
        COMPRESSION_NONE => Ok(Compression::UNCOMPRESSED),
        _ => Err(ProcessingError::Config(format!(
            "Unsupported compression: {}",
            compression
        ))),
    }
}
