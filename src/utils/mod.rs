pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;
pub mod timezone;

pub use constants::*;
pub use coordinates::{decode_coordinate_pair, CoordinateRejection, LongitudeForm};
pub use filename::{combined_output_path, extract_sensor_id, output_path_for_file};
pub use progress::ProgressReporter;
pub use timezone::TimezoneResolver;
