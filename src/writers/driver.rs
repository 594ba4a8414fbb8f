use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputDriver {
    #[default]
    #[serde(rename = "CSV", alias = "csv")]
    Csv,
    #[serde(rename = "GeoJSON", alias = "geojson")]
    GeoJson,
    #[serde(rename = "GPKG", alias = "gpkg")]
    Gpkg,
    #[serde(rename = "Parquet", alias = "parquet")]
    Parquet,
}

impl OutputDriver {
    pub fn name(&self) -> &'static str {
        match self {
            OutputDriver::Csv => "CSV",
            OutputDriver::GeoJson => "GeoJSON",
            OutputDriver::Gpkg => "GPKG",
            OutputDriver::Parquet => "Parquet",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputDriver::Csv => "csv",
            OutputDriver::GeoJson => "geojson",
            OutputDriver::Gpkg => "gpkg",
            OutputDriver::Parquet => "parquet",
        }
    }
}

impl FromStr for OutputDriver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputDriver::Csv),
            "geojson" => Ok(OutputDriver::GeoJson),
            "gpkg" => Ok(OutputDriver::Gpkg),
            "parquet" | "geoparquet" => Ok(OutputDriver::Parquet),
            _ => Err(format!(
                "unsupported driver '{}' (expected CSV, GeoJSON, GPKG or Parquet)",
                s
            )),
        }
    }
}

impl fmt::Display for OutputDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
