use crate::error::{ProcessingError, Result};
use crate::models::FormattedTable;
use crate::utils::constants::WGS84_SRS_ID;
use crate::utils::filename::layer_name;
use crate::writers::geometry::gpkg_point_blob;
use crate::writers::TableWriter;
use rusqlite::{params, params_from_iter, types::Value, Connection};
use std::path::Path;
use tracing::debug;

const GPKG_APPLICATION_ID: i32 = 0x4750_4B47; // "GPKG"
const GPKG_USER_VERSION: i32 = 10300;

const WGS84_DEFINITION: &str = "GEOGCS[\"WGS 84\",DATUM[\"WGS_1984\",SPHEROID[\"WGS 84\",6378137,298.257223563,AUTHORITY[\"EPSG\",\"7030\"]],AUTHORITY[\"EPSG\",\"6326\"]],PRIMEM[\"Greenwich\",0,AUTHORITY[\"EPSG\",\"8901\"]],UNIT[\"degree\",0.0174532925199433,AUTHORITY[\"EPSG\",\"9122\"]],AXIS[\"Latitude\",NORTH],AXIS[\"Longitude\",EAST],AUTHORITY[\"EPSG\",\"4326\"]]";

const CORE_TABLES: &str = "
CREATE TABLE gpkg_spatial_ref_sys (
    srs_name TEXT NOT NULL,
    srs_id INTEGER NOT NULL PRIMARY KEY,
    organization TEXT NOT NULL,
    organization_coordsys_id INTEGER NOT NULL,
    definition TEXT NOT NULL,
    description TEXT
);
CREATE TABLE gpkg_contents (
    table_name TEXT NOT NULL PRIMARY KEY,
    data_type TEXT NOT NULL,
    identifier TEXT UNIQUE,
    description TEXT DEFAULT '',
    last_change DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
    min_x DOUBLE,
    min_y DOUBLE,
    max_x DOUBLE,
    max_y DOUBLE,
    srs_id INTEGER,
    CONSTRAINT fk_gc_r_srs_id FOREIGN KEY (srs_id) REFERENCES gpkg_spatial_ref_sys(srs_id)
);
CREATE TABLE gpkg_geometry_columns (
    table_name TEXT NOT NULL,
    column_name TEXT NOT NULL,
    geometry_type_name TEXT NOT NULL,
    srs_id INTEGER NOT NULL,
    z TINYINT NOT NULL,
    m TINYINT NOT NULL,
    CONSTRAINT pk_geom_cols PRIMARY KEY (table_name, column_name),
    CONSTRAINT fk_gc_tn FOREIGN KEY (table_name) REFERENCES gpkg_contents(table_name),
    CONSTRAINT fk_gc_srs FOREIGN KEY (srs_id) REFERENCES gpkg_spatial_ref_sys(srs_id)
);
INSERT INTO gpkg_spatial_ref_sys VALUES
    ('Undefined cartesian SRS', -1, 'NONE', -1, 'undefined', 'undefined cartesian coordinate reference system'),
    ('Undefined geographic SRS', 0, 'NONE', 0, 'undefined', 'undefined geographic coordinate reference system');
";

/// GeoPackage 1.3 file with one point feature table
pub struct GpkgWriter;

impl GpkgWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GpkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_type(header: &str) -> &'static str {
    match header {
        "gpslock" => "BOOLEAN",
        "satellites" => "INTEGER",
        _ => "TEXT",
    }
}

impl TableWriter for GpkgWriter {
    fn write_table(&self, table: &FormattedTable, path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }

        let layer = layer_name(path);
        let headers = table.headers();
        let mut conn = Connection::open(path)?;

        conn.pragma_update(None, "application_id", GPKG_APPLICATION_ID)?;
        conn.pragma_update(None, "user_version", GPKG_USER_VERSION)?;

        let tx = conn.transaction()?;
        tx.execute_batch(CORE_TABLES)?;
        tx.execute(
            "INSERT INTO gpkg_spatial_ref_sys VALUES ('WGS 84 geodetic', ?1, 'EPSG', ?1, ?2, 'longitude/latitude coordinates in decimal degrees on the WGS 84 spheroid')",
            params![WGS84_SRS_ID, WGS84_DEFINITION],
        )?;

        let column_defs: Vec<String> = headers
            .iter()
            .map(|h| format!("{} {}", quote_identifier(h), column_type(h)))
            .collect();
        tx.execute_batch(&format!(
            "CREATE TABLE {} (fid INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, geom POINT, {});",
            quote_identifier(&layer),
            column_defs.join(", ")
        ))?;

        let [min_x, min_y, max_x, max_y] = match table.bounds() {
            Some(bounds) => bounds.map(Some),
            None => [None; 4],
        };
        tx.execute(
            "INSERT INTO gpkg_contents (table_name, data_type, identifier, min_x, min_y, max_x, max_y, srs_id) VALUES (?1, 'features', ?1, ?2, ?3, ?4, ?5, ?6)",
            params![layer, min_x, min_y, max_x, max_y, WGS84_SRS_ID],
        )?;
        tx.execute(
            "INSERT INTO gpkg_geometry_columns VALUES (?1, 'geom', 'POINT', ?2, 0, 0)",
            params![layer, WGS84_SRS_ID],
        )?;

        {
            let column_names: Vec<String> = headers.iter().map(|h| quote_identifier(h)).collect();
            let placeholders: Vec<String> =
                (2..=headers.len() + 1).map(|i| format!("?{}", i)).collect();
            let mut insert = tx.prepare(&format!(
                "INSERT INTO {} (geom, {}) VALUES (?1, {})",
                quote_identifier(&layer),
                column_names.join(", "),
                placeholders.join(", ")
            ))?;

            for record in &table.records {
                let (x, y) = record.point().ok_or_else(|| {
                    ProcessingError::InvalidFormat(format!(
                        "Cannot build point from lat '{}', lon '{}'",
                        record.latitude, record.longitude
                    ))
                })?;

                let mut values = vec![Value::Blob(gpkg_point_blob(WGS84_SRS_ID, x, y))];
                for (header, cell) in headers.iter().zip(record.cells()) {
                    values.push(match *header {
                        "gpslock" => Value::Integer(i64::from(record.gps_lock)),
                        "satellites" => Value::Integer(i64::from(record.satellites)),
                        _ => cell.map(Value::Text).unwrap_or(Value::Null),
                    });
                }
                insert.execute(params_from_iter(values))?;
            }
        }

        tx.commit()?;
        debug!(
            "Wrote {} features to layer '{}' in {}",
            table.len(),
            layer,
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FormattedRecord, UnitSystem};
    use tempfile::TempDir;

    fn record(lat: &str, lon: &str, timestamp: Option<&str>) -> FormattedRecord {
        FormattedRecord {
            gps_lock: true,
            satellites: 9,
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            altitude: Some("100.00".to_string()),
            course: Some("45.00".to_string()),
            speed: Some("3.00".to_string()),
            humidity: Some("60.00".to_string()),
            temperature: Some("25.00".to_string()),
            battery: Some("3.80".to_string()),
            sensor_id: Some("3".to_string()),
            timestamp: timestamp.map(str::to_string),
        }
    }

    #[test]
    fn test_write_gpkg() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("CAPA3_run.gpkg");
        let table = FormattedTable {
            units: UnitSystem::Metric,
            records: vec![
                record("35.752050", "-78.637150", Some("2023-07-10 09:15:00+00:00")),
                record("35.762050", "-78.627150", None),
            ],
        };

        GpkgWriter::new().write_table(&table, &path)?;
        // a second write replaces the file
        GpkgWriter::new().write_table(&table, &path)?;

        let conn = Connection::open(&path)?;
        let app_id: i32 = conn.query_row("PRAGMA application_id", [], |r| r.get(0))?;
        assert_eq!(app_id, GPKG_APPLICATION_ID);

        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM \"CAPA3_run\"", [], |r| r.get(0))?;
        assert_eq!(count, 2);

        let (lat, datetime): (String, Option<String>) = conn.query_row(
            "SELECT lat, datetime FROM \"CAPA3_run\" ORDER BY fid DESC LIMIT 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;
        assert_eq!(lat, "35.762050");
        assert_eq!(datetime, None);

        let geom: Vec<u8> =
            conn.query_row("SELECT geom FROM \"CAPA3_run\" WHERE fid = 1", [], |r| {
                r.get(0)
            })?;
        assert_eq!(geom, gpkg_point_blob(4326, -78.63715, 35.75205));

        let (min_x, max_y): (f64, f64) = conn.query_row(
            "SELECT min_x, max_y FROM gpkg_contents WHERE table_name = 'CAPA3_run'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;
        assert_eq!(min_x, -78.63715);
        assert_eq!(max_y, 35.76205);

        let srs: i64 = conn.query_row(
            "SELECT srs_id FROM gpkg_geometry_columns WHERE table_name = 'CAPA3_run'",
            [],
            |r| r.get(0),
        )?;
        assert_eq!(srs, 4326);
        Ok(())
    }
}
