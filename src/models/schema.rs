/// Semantic type of a positional input column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Bool,
    Integer,
    Text,
    Float,
}

impl ColumnKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ColumnKind::Bool => "boolean",
            ColumnKind::Integer => "integer",
            ColumnKind::Text => "text",
            ColumnKind::Float => "float",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub index: usize,
}

impl ColumnSpec {
    const fn new(name: &'static str, kind: ColumnKind, index: usize) -> Self {
        Self { name, kind, index }
    }
}

pub const GPS_LOCK: ColumnSpec = ColumnSpec::new("gpslock", ColumnKind::Bool, 0);
pub const SATELLITES: ColumnSpec = ColumnSpec::new("satellites", ColumnKind::Integer, 1);
pub const DATE: ColumnSpec = ColumnSpec::new("date", ColumnKind::Text, 2);
pub const TIME: ColumnSpec = ColumnSpec::new("time", ColumnKind::Text, 3);
pub const LATITUDE: ColumnSpec = ColumnSpec::new("lat", ColumnKind::Text, 4);
pub const LONGITUDE: ColumnSpec = ColumnSpec::new("lon", ColumnKind::Text, 5);
pub const ALTITUDE: ColumnSpec = ColumnSpec::new("altitude", ColumnKind::Float, 6);
pub const COURSE: ColumnSpec = ColumnSpec::new("course", ColumnKind::Float, 7);
pub const SPEED: ColumnSpec = ColumnSpec::new("speedkmhr", ColumnKind::Float, 8);
pub const HUMIDITY: ColumnSpec = ColumnSpec::new("humidity", ColumnKind::Float, 9);
pub const TEMPERATURE: ColumnSpec = ColumnSpec::new("temperature", ColumnKind::Float, 10);
pub const BATTERY: ColumnSpec = ColumnSpec::new("battery", ColumnKind::Float, 11);

/// Positional layout of a Heatwatch logger export
pub const HEATWATCH_SCHEMA: [ColumnSpec; 12] = [
    GPS_LOCK,
    SATELLITES,
    DATE,
    TIME,
    LATITUDE,
    LONGITUDE,
    ALTITUDE,
    COURSE,
    SPEED,
    HUMIDITY,
    TEMPERATURE,
    BATTERY,
];

pub const HEATWATCH_COLUMN_COUNT: usize = HEATWATCH_SCHEMA.len();
