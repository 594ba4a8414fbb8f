use crate::error::{ProcessingError, Result};
use chrono_tz::Tz;
use tracing::debug;
use tzf_rs::DefaultFinder;

/// Resolves the IANA timezone containing a point, using offline boundary data
pub struct TimezoneResolver {
    finder: DefaultFinder,
}

impl TimezoneResolver {
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }

    /// Timezone name at `(lat, lon)`, `None` when no boundary contains the point
    pub fn timezone_name(&self, latitude: f64, longitude: f64) -> Option<String> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        let name = self.finder.get_tz_name(longitude, latitude);
        (!name.is_empty()).then(|| name.to_string())
    }

    /// Resolve and parse the timezone at `(lat, lon)`
    pub fn resolve(&self, latitude: f64, longitude: f64) -> Result<Tz> {
        let name = self.timezone_name(latitude, longitude).ok_or_else(|| {
            ProcessingError::Timezone(format!(
                "No timezone found at ({:.6}, {:.6})",
                latitude, longitude
            ))
        })?;
        debug!("Resolved timezone {} at ({}, {})", name, latitude, longitude);
        parse_timezone(&name)
    }
}

impl Default for TimezoneResolver {
    fn default() -> Self {
        Self::new()
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| ProcessingError::Timezone(format!("Unknown timezone '{}': {}", name, e)))
}
