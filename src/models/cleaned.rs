use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::RawRecord;

/// Measurement system of the speed, altitude and temperature columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn speed_column(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "speedkmhr",
            UnitSystem::Imperial => "speedmph",
        }
    }
}

/// A raw record whose coordinate text has been decoded to decimal degrees
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub raw: RawRecord,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CleanedRecord {
    pub gps_lock: bool,
    pub satellites: u32,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub altitude: Option<f64>,
    pub course: Option<f64>,
    pub speed: Option<f64>,
    pub humidity: Option<f64>,
    pub temperature: Option<f64>,
    pub battery: Option<f64>,
    pub sensor_id: Option<String>,
    pub timestamp: Option<DateTime<Tz>>,
}

/// The cleaned rows of one input file
#[derive(Debug, Clone, Default)]
pub struct CleanedTable {
    pub units: UnitSystem,
    pub records: Vec<CleanedRecord>,
}

impl CleanedTable {
    pub fn new(records: Vec<CleanedRecord>) -> Self {
        Self {
            units: UnitSystem::Metric,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
