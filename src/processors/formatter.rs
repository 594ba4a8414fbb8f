use crate::models::{CleanedRecord, CleanedTable, FormattedRecord, FormattedTable};
use crate::utils::constants::{COORDINATE_DECIMALS, MEASUREMENT_DECIMALS};

/// Timestamp rendering, e.g. `2023-10-10 09:15:00+00:00`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

pub fn format_coordinate(value: f64) -> String {
    format!("{:.*}", COORDINATE_DECIMALS, value)
}

pub fn format_measurement(value: f64) -> String {
    format!("{:.*}", MEASUREMENT_DECIMALS, value)
}

/// Renders cleaned tables to fixed-precision output rows
pub struct RecordFormatter;

impl RecordFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_table(&self, table: CleanedTable) -> FormattedTable {
        FormattedTable {
            units: table.units,
            records: table
                .records
                .into_iter()
                .map(|r| self.format_record(r))
                .collect(),
        }
    }

    pub fn format_record(&self, record: CleanedRecord) -> FormattedRecord {
        let measurement = |value: Option<f64>| value.map(format_measurement);

        FormattedRecord {
            gps_lock: record.gps_lock,
            satellites: record.satellites,
            latitude: format_coordinate(record.latitude),
            longitude: format_coordinate(record.longitude),
            altitude: measurement(record.altitude),
            course: measurement(record.course),
            speed: measurement(record.speed),
            humidity: measurement(record.humidity),
            temperature: measurement(record.temperature),
            battery: measurement(record.battery),
            sensor_id: record.sensor_id,
            timestamp: record
                .timestamp
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

impl Default for RecordFormatter {
    fn default() -> Self {
        Self::new()
    }
}
