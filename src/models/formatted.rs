use serde::Serialize;

use crate::models::UnitSystem;

/// A cleaned record with every floating-point field rendered to fixed precision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedRecord {
    pub gps_lock: bool,
    pub satellites: u32,
    pub latitude: String,
    pub longitude: String,
    pub altitude: Option<String>,
    pub course: Option<String>,
    pub speed: Option<String>,
    pub humidity: Option<String>,
    pub temperature: Option<String>,
    pub battery: Option<String>,
    pub sensor_id: Option<String>,
    pub timestamp: Option<String>,
}

impl FormattedRecord {
    /// `(lon, lat)` point built from the formatted coordinate strings
    pub fn point(&self) -> Option<(f64, f64)> {
        let lon = self.longitude.parse::<f64>().ok()?;
        let lat = self.latitude.parse::<f64>().ok()?;
        Some((lon, lat))
    }

    /// Cell values in output column order, `None` for null cells
    pub fn cells(&self) -> Vec<Option<String>> {
        vec![
            Some(bool_text(self.gps_lock).to_string()),
            Some(self.satellites.to_string()),
            Some(self.latitude.clone()),
            Some(self.longitude.clone()),
            self.altitude.clone(),
            self.course.clone(),
            self.speed.clone(),
            self.humidity.clone(),
            self.temperature.clone(),
            self.battery.clone(),
            self.sensor_id.clone(),
            self.timestamp.clone(),
        ]
    }
}

pub fn bool_text(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Output table ready for export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormattedTable {
    pub units: UnitSystem,
    pub records: Vec<FormattedRecord>,
}

impl FormattedTable {
    pub fn headers(&self) -> [&'static str; 12] {
        [
            "gpslock",
            "satellites",
            "lat",
            "lon",
            "altitude",
            "course",
            self.units.speed_column(),
            "humidity",
            "temperature",
            "battery",
            "sensor_number",
            "datetime",
        ]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append another table's rows after this table's rows
    pub fn extend(&mut self, other: FormattedTable) {
        self.records.extend(other.records);
    }

    /// `[min_x, min_y, max_x, max_y]` over all parseable points
    pub fn bounds(&self) -> Option<[f64; 4]> {
        self.records
            .iter()
            .filter_map(FormattedRecord::point)
            .fold(None, |acc, (x, y)| match acc {
                None => Some([x, y, x, y]),
                Some([min_x, min_y, max_x, max_y]) => {
                    Some([min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)])
                }
            })
    }
}
