use crate::models::{DecodedRecord, RawRecord};
use crate::utils::coordinates::{decode_coordinate_pair, CoordinateRejection};
use std::collections::HashMap;
use tracing::debug;

/// Result of decoding one file's coordinates
#[derive(Debug, Clone, Default)]
pub struct DecodeReport {
    pub records: Vec<DecodedRecord>,
    pub dropped: usize,
    pub rejections: HashMap<CoordinateRejection, usize>,
}

impl DecodeReport {
    pub fn summary(&self) -> String {
        let mut reasons: Vec<_> = self
            .rejections
            .iter()
            .map(|(reason, count)| format!("{}: {}", reason, count))
            .collect();
        reasons.sort();
        format!(
            "{} rows decoded, {} dropped ({})",
            self.records.len(),
            self.dropped,
            reasons.join(", ")
        )
    }
}

/// Replaces raw degree/minute text with decimal degrees, dropping malformed rows
pub struct CoordinateDecoder;

impl CoordinateDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, records: Vec<RawRecord>) -> DecodeReport {
        let mut report = DecodeReport {
            records: Vec::with_capacity(records.len()),
            ..Default::default()
        };

        for raw in records {
            match decode_coordinate_pair(raw.latitude.as_deref(), raw.longitude.as_deref()) {
                Ok((latitude, longitude)) => report.records.push(DecodedRecord {
                    latitude,
                    longitude,
                    raw,
                }),
                Err(reason) => {
                    report.dropped += 1;
                    *report.rejections.entry(reason).or_default() += 1;
                }
            }
        }

        if report.dropped > 0 {
            debug!("{}", report.summary());
        }
        report
    }
}

impl Default for CoordinateDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_drops_malformed_rows_and_keeps_order() {
        let records = vec![
            RawRecord::from_fields("100723", "091500", "4807.0372N", "01131.5000E"),
            RawRecord::from_fields("100723", "091501", "", "01131.5000E"),
            RawRecord::from_fields("100723", "091502", "4807.0372X", "01131.5000E"),
            RawRecord::from_fields("100723", "091503", "807.0372S", "7830.0000W"),
        ];

        let report = CoordinateDecoder::new().decode(records);

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.dropped, 2);
        assert_eq!(report.rejections[&CoordinateRejection::MissingLatitude], 1);
        assert_eq!(report.rejections[&CoordinateRejection::LatitudeFormat], 1);

        assert_eq!(report.records[0].raw.time.as_deref(), Some("091500"));
        assert_eq!(report.records[1].raw.time.as_deref(), Some("091503"));
        assert!(report.records[1].latitude < 0.0);
        assert!((report.records[1].longitude - -78.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_is_valid() {
        let report = CoordinateDecoder::new().decode(Vec::new());
        assert!(report.records.is_empty());
        assert_eq!(report.dropped, 0);
    }
}
