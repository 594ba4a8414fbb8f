use crate::models::{CleanedRecord, CleanedTable, UnitSystem};
use crate::utils::constants::{
    CELSIUS_TO_FAHRENHEIT_OFFSET, CELSIUS_TO_FAHRENHEIT_SCALE, KMH_TO_MPH, METRES_TO_FEET,
};

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * CELSIUS_TO_FAHRENHEIT_SCALE + CELSIUS_TO_FAHRENHEIT_OFFSET
}

pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh * KMH_TO_MPH
}

pub fn metres_to_feet(metres: f64) -> f64 {
    metres * METRES_TO_FEET
}

/// Metric to imperial conversion of temperature, speed and altitude
pub struct UnitConverter;

impl UnitConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert a metric table in place; an already-imperial table is left as is
    pub fn to_imperial(&self, table: &mut CleanedTable) {
        if table.units == UnitSystem::Imperial {
            return;
        }
        table.records.iter_mut().for_each(|r| self.convert_record(r));
        table.units = UnitSystem::Imperial;
    }

    fn convert_record(&self, record: &mut CleanedRecord) {
        record.temperature = record.temperature.map(celsius_to_fahrenheit);
        record.speed = record.speed.map(kmh_to_mph);
        record.altitude = record.altitude.map(metres_to_feet);
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new()
    }
}
