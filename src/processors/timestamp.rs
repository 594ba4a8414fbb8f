use crate::models::{CleanedRecord, DecodedRecord};
use crate::utils::constants::{DATE_LEN, SHORT_DATE_LEN, TIME_LEN};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use std::borrow::Cow;

/// Restore the dropped leading zero of a 5-digit `DMMYY` date
pub fn pad_date(date: &str) -> Cow<'_, str> {
    if date.chars().count() == SHORT_DATE_LEN {
        Cow::Owned(format!("0{}", date))
    } else {
        Cow::Borrowed(date)
    }
}

/// Left-pad a time to `HHMMSS`; longer values are left untouched
pub fn pad_time(time: &str) -> Cow<'_, str> {
    if time.chars().count() < TIME_LEN {
        Cow::Owned(format!("{:0>width$}", time, width = TIME_LEN))
    } else {
        Cow::Borrowed(time)
    }
}

fn is_fixed_digits(text: &str, len: usize) -> bool {
    text.len() == len && text.bytes().all(|b| b.is_ascii_digit())
}

/// Combine raw `DDMMYY` and `HHMMSS` fields into a UTC instant
///
/// Returns `None` when either field is missing or does not parse after padding.
///
/// # Examples
/// ```
/// use heatwatch_processor::processors::timestamp::parse_utc_timestamp;
///
/// let short = parse_utc_timestamp(Some("10923"), Some("91500"));
/// let full = parse_utc_timestamp(Some("010923"), Some("091500"));
/// assert!(short.is_some());
/// assert_eq!(short, full);
/// ```
pub fn parse_utc_timestamp(date: Option<&str>, time: Option<&str>) -> Option<DateTime<Utc>> {
    let date = pad_date(date?);
    let time = pad_time(time?);

    if !is_fixed_digits(&date, DATE_LEN) || !is_fixed_digits(&time, TIME_LEN) {
        return None;
    }

    let date = NaiveDate::parse_from_str(&date, "%d%m%y").ok()?;
    let time = NaiveTime::parse_from_str(&time, "%H%M%S").ok()?;
    Some(date.and_time(time).and_utc())
}

/// Replaces raw date/time text with a single timestamp
pub struct TimestampReconstructor {
    display_zone: Tz,
}

impl TimestampReconstructor {
    /// Keep timestamps in UTC
    pub fn utc() -> Self {
        Self {
            display_zone: Tz::UTC,
        }
    }

    /// Express timestamps in `timezone` when `convert_tz` is set, otherwise UTC
    pub fn new(timezone: Tz, convert_tz: bool) -> Self {
        if convert_tz {
            Self {
                display_zone: timezone,
            }
        } else {
            Self::utc()
        }
    }

    pub fn display_zone(&self) -> Tz {
        self.display_zone
    }

    pub fn reconstruct(&self, records: Vec<DecodedRecord>) -> Vec<CleanedRecord> {
        records
            .into_iter()
            .map(|decoded| self.reconstruct_record(decoded))
            .collect()
    }

    fn reconstruct_record(&self, decoded: DecodedRecord) -> CleanedRecord {
        let DecodedRecord {
            latitude,
            longitude,
            raw,
        } = decoded;

        let timestamp = parse_utc_timestamp(raw.date.as_deref(), raw.time.as_deref())
            .map(|utc| utc.with_timezone(&self.display_zone));

        CleanedRecord {
            gps_lock: raw.gps_lock,
            satellites: raw.satellites,
            latitude,
            longitude,
            altitude: raw.altitude,
            course: raw.course,
            speed: raw.speed,
            humidity: raw.humidity,
            temperature: raw.temperature,
            battery: raw.battery,
            sensor_id: raw.sensor_id,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRecord;
    use chrono::{Datelike, TimeZone, Timelike};

    fn decoded(date: &str, time: &str) -> DecodedRecord {
        DecodedRecord {
            latitude: 48.0,
            longitude: 11.0,
            raw: RawRecord::from_fields(date, time, "4800.0000N", "01100.0000E"),
        }
    }

    #[test]
    fn test_padding_rules() {
        assert_eq!(pad_date("10923"), "010923");
        assert_eq!(pad_date("101023"), "101023");
        assert_eq!(pad_date("1023"), "1023");
        assert_eq!(pad_time("91500"), "091500");
        assert_eq!(pad_time("5"), "000005");
        assert_eq!(pad_time("1234567"), "1234567");
    }

    #[test]
    fn test_short_fields_match_full_fields() {
        let short = parse_utc_timestamp(Some("10923"), Some("91500"));
        let full = parse_utc_timestamp(Some("010923"), Some("091500"));
        assert_eq!(short, full);
        assert_eq!(
            full,
            Some(Utc.with_ymd_and_hms(2023, 9, 1, 9, 15, 0).unwrap())
        );
    }

    #[test]
    fn test_day_month_year_order() {
        let ts = parse_utc_timestamp(Some("101023"), Some("091500")).unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2023, 10, 10));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (9, 15, 0));
    }

    #[test]
    fn test_unparseable_fields_give_none() {
        assert_eq!(parse_utc_timestamp(Some("321323"), Some("091500")), None);
        assert_eq!(parse_utc_timestamp(Some("1023"), Some("091500")), None);
        assert_eq!(parse_utc_timestamp(Some("101023"), Some("256000")), None);
        assert_eq!(parse_utc_timestamp(Some("101023"), Some("1234567")), None);
        assert_eq!(parse_utc_timestamp(Some("10-023"), Some("091500")), None);
        assert_eq!(parse_utc_timestamp(None, Some("091500")), None);
        assert_eq!(parse_utc_timestamp(Some("101023"), None), None);
    }

    #[test]
    fn test_malformed_rows_are_kept_with_null_timestamp() {
        let cleaned = TimestampReconstructor::utc()
            .reconstruct(vec![decoded("101023", "091500"), decoded("xx", "091500")]);

        assert_eq!(cleaned.len(), 2);
        assert!(cleaned[0].timestamp.is_some());
        assert!(cleaned[1].timestamp.is_none());
    }

    #[test]
    fn test_conversion_keeps_instant() {
        let utc = TimestampReconstructor::new(Tz::Europe__Berlin, false)
            .reconstruct(vec![decoded("101023", "091500")]);
        let local = TimestampReconstructor::new(Tz::Europe__Berlin, true)
            .reconstruct(vec![decoded("101023", "091500")]);

        let utc_ts = utc[0].timestamp.unwrap();
        let local_ts = local[0].timestamp.unwrap();

        assert_eq!(utc_ts.timezone(), Tz::UTC);
        assert_eq!(local_ts.timezone(), Tz::Europe__Berlin);
        assert_eq!(utc_ts, local_ts);
        assert_eq!(local_ts.hour(), 11);
    }
}
