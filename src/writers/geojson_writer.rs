use crate::error::{ProcessingError, Result};
use crate::models::{FormattedRecord, FormattedTable};
use crate::utils::filename::layer_name;
use crate::writers::TableWriter;
use serde_json::{json, Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// GDAL-style GeoJSON FeatureCollection of lon/lat points, with a CRS84 `crs` member
pub struct GeoJsonWriter;

impl GeoJsonWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn build_collection(&self, table: &FormattedTable, name: &str) -> Result<Value> {
        let headers = table.headers();
        let features = table
            .records
            .iter()
            .map(|record| feature(record, &headers))
            .collect::<Result<Vec<_>>>()?;

        Ok(json!({
            "type": "FeatureCollection",
            "name": name,
            "crs": {
                "type": "name",
                "properties": { "name": "urn:ogc:def:crs:OGC:1.3:CRS84" }
            },
            "features": features,
        }))
    }
}

fn feature(record: &FormattedRecord, headers: &[&'static str; 12]) -> Result<Value> {
    let (lon, lat) = record.point().ok_or_else(|| {
        ProcessingError::InvalidFormat(format!(
            "Cannot build point from lat '{}', lon '{}'",
            record.latitude, record.longitude
        ))
    })?;

    let mut properties = Map::new();
    for (header, cell) in headers.iter().zip(record.cells()) {
        let value = match *header {
            "gpslock" => Value::Bool(record.gps_lock),
            "satellites" => Value::from(record.satellites),
            _ => cell.map(Value::String).unwrap_or(Value::Null),
        };
        properties.insert(header.to_string(), value);
    }

    Ok(json!({
        "type": "Feature",
        "properties": properties,
        "geometry": { "type": "Point", "coordinates": [lon, lat] },
    }))
}

impl Default for GeoJsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableWriter for GeoJsonWriter {
    fn write_table(&self, table: &FormattedTable, path: &Path) -> Result<()> {
        let collection = self.build_collection(table, &layer_name(path))?;
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, &collection)?;
        writer.flush()?;
        Ok(())
    }
}
