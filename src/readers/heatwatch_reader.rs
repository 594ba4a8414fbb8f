use crate::error::{ProcessingError, Result};
use crate::models::schema::{
    ALTITUDE, BATTERY, COURSE, DATE, GPS_LOCK, HUMIDITY, LATITUDE, LONGITUDE, SATELLITES, SPEED,
    TEMPERATURE, TIME,
};
use crate::models::{ColumnKind, ColumnSpec, RawRecord, HEATWATCH_COLUMN_COUNT};
use crate::utils::extract_sensor_id;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads Heatwatch logger exports against the fixed positional schema
pub struct HeatwatchReader;

impl HeatwatchReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every row of `path`, tagging rows with the sensor number from the file name
    pub fn read_records(&self, path: &Path) -> Result<Vec<RawRecord>> {
        if !path.exists() {
            return Err(ProcessingError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path)?;
        let text = decode_text(&bytes);
        let sensor_id = extract_sensor_id(path);

        let records = self.parse_records(text.as_bytes(), path, sensor_id.as_deref())?;
        debug!("Read {} rows from {}", records.len(), path.display());
        Ok(records)
    }

    fn parse_records(
        &self,
        data: &[u8],
        path: &Path,
        sensor_id: Option<&str>,
    ) -> Result<Vec<RawRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::None)
            .from_reader(data);

        let headers = reader.headers()?;
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if headers.len() != HEATWATCH_COLUMN_COUNT {
            return Err(ProcessingError::SchemaMismatch {
                path: path.to_path_buf(),
                line: 1,
                expected: HEATWATCH_COLUMN_COUNT,
                found: headers.len(),
            });
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            let parser = RowParser::new(&row, path);
            records.push(parser.parse(sensor_id)?);
        }

        Ok(records)
    }
}

impl Default for HeatwatchReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode file bytes as UTF-8 (BOM aware), falling back to Windows-1252
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if !had_errors {
        return text;
    }
    debug!("Input is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text
}

struct RowParser<'a> {
    row: &'a StringRecord,
    path: &'a Path,
    line: u64,
}

impl<'a> RowParser<'a> {
    fn new(row: &'a StringRecord, path: &'a Path) -> Self {
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        Self { row, path, line }
    }

    fn parse(&self, sensor_id: Option<&str>) -> Result<RawRecord> {
        if self.row.len() != HEATWATCH_COLUMN_COUNT {
            return Err(ProcessingError::SchemaMismatch {
                path: self.path.to_path_buf(),
                line: self.line,
                expected: HEATWATCH_COLUMN_COUNT,
                found: self.row.len(),
            });
        }

        Ok(RawRecord {
            gps_lock: self.bool_field(GPS_LOCK)?,
            satellites: self.integer_field(SATELLITES)?,
            date: self.text_field(DATE),
            time: self.text_field(TIME),
            latitude: self.text_field(LATITUDE),
            longitude: self.text_field(LONGITUDE),
            altitude: self.float_field(ALTITUDE)?,
            course: self.float_field(COURSE)?,
            speed: self.float_field(SPEED)?,
            humidity: self.float_field(HUMIDITY)?,
            temperature: self.float_field(TEMPERATURE)?,
            battery: self.float_field(BATTERY)?,
            sensor_id: sensor_id.map(str::to_string),
        })
    }

    fn raw(&self, column: ColumnSpec) -> &'a str {
        self.row.get(column.index).unwrap_or("")
    }

    fn coercion_error(&self, column: ColumnSpec) -> ProcessingError {
        ProcessingError::FieldCoercion {
            path: self.path.to_path_buf(),
            line: self.line,
            column: column.name,
            value: self.raw(column).to_string(),
            expected: column.kind.describe(),
        }
    }

    fn text_field(&self, column: ColumnSpec) -> Option<String> {
        debug_assert_eq!(column.kind, ColumnKind::Text);
        let value = self.raw(column);
        (!value.is_empty()).then(|| value.to_string())
    }

    fn bool_field(&self, column: ColumnSpec) -> Result<bool> {
        match self.raw(column).trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(self.coercion_error(column)),
        }
    }

    fn integer_field(&self, column: ColumnSpec) -> Result<u32> {
        self.raw(column)
            .trim()
            .parse::<u32>()
            .map_err(|_| self.coercion_error(column))
    }

    fn float_field(&self, column: ColumnSpec) -> Result<Option<f64>> {
        let value = self.raw(column).trim();
        if value.is_empty() || value.eq_ignore_ascii_case("nan") {
            return Ok(None);
        }
        value
            .parse::<f64>()
            .map(Some)
            .map_err(|_| self.coercion_error(column))
    }
}

/// Heatwatch files under `folder` whose extension matches `extension`, in name order
pub fn discover_input_files(folder: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&folder.to_string_lossy());
    let pattern = Path::new(&escaped).join(format!("*.{}", extension));
    let pattern = pattern.to_string_lossy();

    let entries = glob::glob(&pattern)
        .map_err(|e| ProcessingError::InvalidFormat(format!("Invalid search pattern: {}", e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ProcessingError::Io(e.into_error()))?;
        if path.is_file() {
            files.push(path);
        }
    }

    debug!("Found {} input files in {}", files.len(), folder.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str =
        "gpslock,satellites,date,time,lat,lon,altitude,course,speedkmhr,humidity,temperature,battery";

    fn write_file(dir: &TempDir, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn test_read_records() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_file(
            &dir,
            "CAPA12_20230710.csv",
            &[
                HEADER,
                "True,8,100723,91500,3545.1230N,07838.2290W,95.5,180.0,22.4,55.0,31.2,3.9",
                "0,3,100723,091501,,07838.2290W,,,,,,",
            ],
        );

        let records = HeatwatchReader::new().read_records(&path)?;
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert!(first.gps_lock);
        assert_eq!(first.satellites, 8);
        assert_eq!(first.date.as_deref(), Some("100723"));
        assert_eq!(first.time.as_deref(), Some("91500"));
        assert_eq!(first.latitude.as_deref(), Some("3545.1230N"));
        assert_eq!(first.temperature, Some(31.2));
        assert_eq!(first.sensor_id.as_deref(), Some("12"));

        let second = &records[1];
        assert!(!second.gps_lock);
        assert_eq!(second.latitude, None);
        assert_eq!(second.altitude, None);
        Ok(())
    }

    #[test]
    fn test_sensor_id_absent_for_unmatched_name() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_file(
            &dir,
            "route.csv",
            &[
                HEADER,
                "1,8,100723,091500,3545.1230N,07838.2290W,1,1,1,1,1,1",
            ],
        );
        let records = HeatwatchReader::new().read_records(&path)?;
        assert_eq!(records[0].sensor_id, None);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = HeatwatchReader::new().read_records(Path::new("/no/such/CAPA1_x.csv"));
        assert!(matches!(result, Err(ProcessingError::InputNotFound { .. })));
    }

    #[test]
    fn test_column_count_mismatch() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_file(&dir, "short.csv", &[HEADER, "1,8,100723,091500,3545.1230N"]);
        let result = HeatwatchReader::new().read_records(&path);
        assert!(matches!(
            result,
            Err(ProcessingError::SchemaMismatch {
                expected: 12,
                found: 5,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn test_type_coercion_failure() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_file(
            &dir,
            "bad.csv",
            &[
                HEADER,
                "1,eight,100723,091500,3545.1230N,07838.2290W,1,1,1,1,1,1",
            ],
        );
        match HeatwatchReader::new().read_records(&path) {
            Err(ProcessingError::FieldCoercion { column, value, .. }) => {
                assert_eq!(column, "satellites");
                assert_eq!(value, "eight");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_zero_byte_file_is_empty() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_file(&dir, "blank.csv", &[]);
        assert!(HeatwatchReader::new().read_records(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_all_empty_row_is_a_coercion_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_file(
            &dir,
            "CAPA3_gap.csv",
            &[
                HEADER,
                ",,,,,,,,,,,",
                "1,8,100723,091500,3545.1230N,07838.2290W,1,1,1,1,1,1",
            ],
        );
        match HeatwatchReader::new().read_records(&path) {
            Err(ProcessingError::FieldCoercion { column, line, .. }) => {
                assert_eq!(column, "gpslock");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_blank_lines_are_ignored() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_file(
            &dir,
            "CAPA3_blank.csv",
            &[
                HEADER,
                "",
                "1,8,100723,091500,3545.1230N,07838.2290W,1,1,1,1,1,1",
            ],
        );
        assert_eq!(HeatwatchReader::new().read_records(&path)?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_header_only_file_is_empty() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_file(&dir, "empty.csv", &[HEADER]);
        assert!(HeatwatchReader::new().read_records(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_utf8_bom_is_stripped() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("bom.csv");
        let content = format!(
            "\u{feff}{}\n1,8,100723,091500,3545.1230N,07838.2290W,1,1,1,1,1,1\n",
            HEADER
        );
        std::fs::write(&path, content)?;
        assert_eq!(HeatwatchReader::new().read_records(&path)?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_discover_input_files() -> Result<()> {
        let dir = TempDir::new()?;
        write_file(&dir, "CAPA2_b.csv", &[HEADER]);
        write_file(&dir, "CAPA1_a.csv", &[HEADER]);
        write_file(&dir, "notes.txt", &["hello"]);

        let files = discover_input_files(dir.path(), "csv")?;
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["CAPA1_a.csv", "CAPA2_b.csv"]);
        Ok(())
    }

    #[test]
    fn test_discover_in_folder_with_glob_characters() -> Result<()> {
        let dir = TempDir::new()?;
        let folder = dir.path().join("runs[1]");
        std::fs::create_dir(&folder)?;
        std::fs::write(folder.join("CAPA1_a.csv"), HEADER)?;

        let files = discover_input_files(&folder, "csv")?;
        assert_eq!(files, vec![folder.join("CAPA1_a.csv")]);
        Ok(())
    }
}
