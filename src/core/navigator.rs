//! Great-circle helpers on a spherical Earth.
//!
//! Results are used to compare candidate alternates against each other, so the spherical
//! approximation (no WGS84 ellipsoid) is acceptable. Not for certified navigation.

use crate::utils::error::Result;
use crate::utils::validation::{validate_latitude, validate_longitude};

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

fn validate_pair(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<()> {
    validate_latitude("from.latitude_deg", lat1)?;
    validate_longitude("from.longitude_deg", lon1)?;
    validate_latitude("to.latitude_deg", lat2)?;
    validate_longitude("to.longitude_deg", lon2)
}

/// Haversine distance in nautical miles.
pub fn distance_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64> {
    validate_pair(lat1, lon1, lat2, lon2)?;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // 浮點誤差可能讓 a 略大於 1
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    Ok(EARTH_RADIUS_NM * c)
}

/// Initial true course from point 1 toward point 2, in `[0, 360)`.
pub fn initial_course_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64> {
    validate_pair(lat1, lon1, lat2, lon2)?;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let x = delta_lon.sin() * lat2_rad.cos();
    let y = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    Ok(normalize_degrees(x.atan2(y).to_degrees()))
}

/// Wraps any finite angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid 對極小負值可能回傳 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
