/// Input discovery
pub const DEFAULT_INPUT_EXTENSION: &str = "csv";
pub const DEFAULT_OUTPUT_FOLDER: &str = "formatted";
pub const DEFAULT_CONFIG_FILE: &str = "heatwatch.toml";
pub const ENV_PREFIX: &str = "HEATWATCH";

/// Suffix appended to the folder name for merged output
pub const COMBINED_SUFFIX: &str = "_combined";

/// Raw coordinate field lengths
pub const LATITUDE_LEN: usize = 10;
pub const SHORT_LONGITUDE_LEN: usize = 10;
pub const LONG_LONGITUDE_LEN: usize = 11;

/// Raw date/time field lengths
pub const DATE_LEN: usize = 6;
pub const SHORT_DATE_LEN: usize = 5;
pub const TIME_LEN: usize = 6;

/// Output precision
pub const COORDINATE_DECIMALS: usize = 6;
pub const MEASUREMENT_DECIMALS: usize = 2;

/// Unit conversion factors
pub const CELSIUS_TO_FAHRENHEIT_SCALE: f64 = 1.8;
pub const CELSIUS_TO_FAHRENHEIT_OFFSET: f64 = 32.0;
pub const KMH_TO_MPH: f64 = 0.621371;
pub const METRES_TO_FEET: f64 = 3.28084;

/// Spatial reference of all geospatial output
pub const WGS84_SRS_ID: i32 = 4326;

/// Processing defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
