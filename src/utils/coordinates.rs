use crate::utils::constants::{LATITUDE_LEN, LONG_LONGITUDE_LEN, SHORT_LONGITUDE_LEN};
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

static LATITUDE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}\.[0-9]{4}[NS]$").expect("latitude pattern"));
static SHORT_LONGITUDE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}\.[0-9]{4}[EW]$").expect("longitude pattern"));
static LONG_LONGITUDE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}\.[0-9]{4}[EW]$").expect("longitude pattern"));

/// Why a coordinate pair was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateRejection {
    MissingLatitude,
    MissingLongitude,
    LatitudeLength,
    LongitudeLength,
    LatitudeFormat,
    LongitudeFormat,
}

impl fmt::Display for CoordinateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CoordinateRejection::MissingLatitude => "missing latitude",
            CoordinateRejection::MissingLongitude => "missing longitude",
            CoordinateRejection::LatitudeLength => "latitude length",
            CoordinateRejection::LongitudeLength => "longitude length",
            CoordinateRejection::LatitudeFormat => "latitude format",
            CoordinateRejection::LongitudeFormat => "longitude format",
        };
        f.write_str(text)
    }
}

/// Layout of a degree/decimal-minute field: `D{n}MM.MMMM` followed by a hemisphere letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldLayout {
    degree_digits: usize,
    negative_hemisphere: char,
}

const LATITUDE_LAYOUT: FieldLayout = FieldLayout {
    degree_digits: 2,
    negative_hemisphere: 'S',
};

/// The two accepted longitude widths, selected by field length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongitudeForm {
    /// `DDMM.MMMM[EW]`
    Short,
    /// `DDDMM.MMMM[EW]`
    Long,
}

impl LongitudeForm {
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            SHORT_LONGITUDE_LEN => Some(LongitudeForm::Short),
            LONG_LONGITUDE_LEN => Some(LongitudeForm::Long),
            _ => None,
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            LongitudeForm::Short => &SHORT_LONGITUDE_PATTERN,
            LongitudeForm::Long => &LONG_LONGITUDE_PATTERN,
        }
    }

    fn layout(&self) -> FieldLayout {
        let degree_digits = match self {
            LongitudeForm::Short => 2,
            LongitudeForm::Long => 3,
        };
        FieldLayout {
            degree_digits,
            negative_hemisphere: 'W',
        }
    }
}

/// Restore the leading zero some loggers drop from 9-character latitudes
pub fn pad_latitude(latitude: &str) -> Cow<'_, str> {
    if latitude.chars().count() == LATITUDE_LEN - 1 {
        Cow::Owned(format!("0{}", latitude))
    } else {
        Cow::Borrowed(latitude)
    }
}

/// Decode a raw latitude/longitude pair into signed decimal degrees
///
/// # Examples
/// ```
/// use heatwatch_processor::utils::coordinates::decode_coordinate_pair;
///
/// let (lat, lon) = decode_coordinate_pair(Some("4807.0372N"), Some("01131.5000E")).unwrap();
/// assert!((lat - 48.11729).abs() < 0.00001);
/// assert!((lon - 11.525).abs() < 0.00001);
/// ```
pub fn decode_coordinate_pair(
    latitude: Option<&str>,
    longitude: Option<&str>,
) -> Result<(f64, f64), CoordinateRejection> {
    let latitude = latitude.map(pad_latitude);
    let latitude = latitude.as_deref().ok_or(CoordinateRejection::MissingLatitude)?;
    let longitude = longitude.ok_or(CoordinateRejection::MissingLongitude)?;

    if latitude.chars().count() != LATITUDE_LEN {
        return Err(CoordinateRejection::LatitudeLength);
    }
    let form = LongitudeForm::from_len(longitude.chars().count())
        .ok_or(CoordinateRejection::LongitudeLength)?;

    if !LATITUDE_PATTERN.is_match(latitude) {
        return Err(CoordinateRejection::LatitudeFormat);
    }
    if !form.pattern().is_match(longitude) {
        return Err(CoordinateRejection::LongitudeFormat);
    }

    let lat = decode_degree_minutes(latitude, LATITUDE_LAYOUT)
        .ok_or(CoordinateRejection::LatitudeFormat)?;
    let lon = decode_degree_minutes(longitude, form.layout())
        .ok_or(CoordinateRejection::LongitudeFormat)?;

    Ok((lat, lon))
}

/// Split a pattern-checked field into degrees, minutes and hemisphere and combine them
fn decode_degree_minutes(field: &str, layout: FieldLayout) -> Option<f64> {
    let (degree_text, rest) = field.split_at(layout.degree_digits);
    let hemisphere = rest.chars().last()?;
    let minute_text = &rest[..rest.len() - hemisphere.len_utf8()];

    let mut degrees = degree_text.parse::<f64>().ok()?;
    let mut minutes = minute_text.parse::<f64>().ok()?;

    if hemisphere == layout.negative_hemisphere {
        degrees = -degrees;
        minutes = -minutes;
    }

    Some(degrees + minutes / 60.0)
}

/// Arithmetic mean of a set of `(lat, lon)` pairs, `None` when empty
pub fn mean_position<I>(positions: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (count, lat_sum, lon_sum) = positions
        .into_iter()
        .fold((0usize, 0.0, 0.0), |(n, lat, lon), (y, x)| {
            (n + 1, lat + y, lon + x)
        });

    (count > 0).then(|| (lat_sum / count as f64, lon_sum / count as f64))
}
