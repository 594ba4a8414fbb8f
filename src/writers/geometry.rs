/// Little-endian WKB encoding of a 2D point
pub fn point_wkb(x: f64, y: f64) -> Vec<u8> {
    let mut wkb = Vec::with_capacity(21);
    wkb.push(1u8); // little endian
    wkb.extend_from_slice(&1u32.to_le_bytes()); // wkbPoint
    wkb.extend_from_slice(&x.to_le_bytes());
    wkb.extend_from_slice(&y.to_le_bytes());
    wkb
}

/// GeoPackage binary geometry: `GP` header without envelope, followed by WKB
pub fn gpkg_point_blob(srs_id: i32, x: f64, y: f64) -> Vec<u8> {
    let mut blob = Vec::with_capacity(29);
    blob.extend_from_slice(b"GP");
    blob.push(0); // version 1
    blob.push(0b0000_0001); // little endian, no envelope, not empty
    blob.extend_from_slice(&srs_id.to_le_bytes());
    blob.extend_from_slice(&point_wkb(x, y));
    blob
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_wkb_layout() {
        let wkb = point_wkb(11.5, 48.25);
        assert_eq!(wkb.len(), 21);
        assert_eq!(wkb[0], 1);
        assert_eq!(&wkb[1..5], &[1, 0, 0, 0]);
        assert_eq!(f64::from_le_bytes(wkb[5..13].try_into().unwrap()), 11.5);
        assert_eq!(f64::from_le_bytes(wkb[13..21].try_into().unwrap()), 48.25);
    }

    #[test]
    fn test_gpkg_header() {
        let blob = gpkg_point_blob(4326, 1.0, 2.0);
        assert_eq!(&blob[0..2], b"GP");
        assert_eq!(blob[3], 1);
        assert_eq!(i32::from_le_bytes(blob[4..8].try_into().unwrap()), 4326);
        assert_eq!(&blob[8..], point_wkb(1.0, 2.0).as_slice());
    }
}
