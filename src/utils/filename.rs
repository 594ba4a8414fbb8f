use crate::utils::constants::COMBINED_SUFFIX;
use crate::writers::OutputDriver;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static SENSOR_FILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CAPA([0-9]+)_").expect("sensor file pattern"));

/// Extract the sensor number from names like `CAPA12_20230710.csv` -> `12`
pub fn extract_sensor_id(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    SENSOR_FILE_PATTERN
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Give `file_name` the driver's extension unless it already carries it
pub fn with_driver_extension(file_name: &str, driver: OutputDriver) -> String {
    let extension = driver.extension();
    if file_name
        .to_lowercase()
        .ends_with(&format!(".{}", extension))
    {
        return file_name.to_string();
    }

    Path::new(file_name)
        .with_extension(extension)
        .to_string_lossy()
        .into_owned()
}

/// Output path for a single processed input file
pub fn output_path_for_file(input: &Path, output_dir: &Path, driver: OutputDriver) -> PathBuf {
    let base_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(with_driver_extension(&base_name, driver))
}

/// Output path for the merged table of a folder: `<folder>_combined.<ext>`
pub fn combined_output_path(folder: &Path, output_dir: &Path, driver: OutputDriver) -> PathBuf {
    let folder_name = folder
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .or_else(|| {
            folder
                .canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| "heatwatch".to_string());

    let base_name = format!("{}{}.{}", folder_name, COMBINED_SUFFIX, driver.extension());
    output_dir.join(base_name)
}

/// Layer/collection name used inside geospatial outputs
pub fn layer_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "heatwatch".to_string())
}
