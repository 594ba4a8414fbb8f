use serde::{Deserialize, Serialize};

/// One row of a Heatwatch export as read from disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub gps_lock: bool,
    pub satellites: u32,
    pub date: Option<String>,
    pub time: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub altitude: Option<f64>,
    pub course: Option<f64>,
    pub speed: Option<f64>,
    pub humidity: Option<f64>,
    pub temperature: Option<f64>,
    pub battery: Option<f64>,
    pub sensor_id: Option<String>,
}

impl RawRecord {
    /// Minimal record carrying only the text fields the decoders look at
    pub fn from_fields(date: &str, time: &str, latitude: &str, longitude: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            gps_lock: true,
            satellites: 0,
            date: non_empty(date),
            time: non_empty(time),
            latitude: non_empty(latitude),
            longitude: non_empty(longitude),
            altitude: None,
            course: None,
            speed: None,
            humidity: None,
            temperature: None,
            battery: None,
            sensor_id: None,
        }
    }
}
