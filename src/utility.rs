use std::f64::consts::PI;

use crate::Error;

pub(crate) mod dms {
    /// Degrees per quarter turn
    pub const QD: f64 = 90.;
    /// Degrees per half turn
    pub const HD: f64 = 2. * QD;
    /// Degrees per turn
    pub const TD: f64 = 2. * HD;
}

/// Converts an angle in degrees to radians.
///
/// ```
/// use wgs84_util::degrees_to_radians;
///
/// assert_eq!(degrees_to_radians(90.0), std::f64::consts::PI / 2.0);
/// ```
pub fn degrees_to_radians(deg: f64) -> f64 {
    deg * (PI / dms::HD)
}

/// Converts an angle in radians to degrees.
///
/// ```
/// use wgs84_util::radians_to_degrees;
///
/// assert_eq!(radians_to_degrees(std::f64::consts::PI / 2.0), 90.0);
/// ```
pub fn radians_to_degrees(rad: f64) -> f64 {
    dms::HD * (rad / PI)
}

/// Rounds `value` to `decimals` decimal places, halves away from zero.
///
/// ```
/// use wgs84_util::utility::round_to;
///
/// assert_eq!(round_to(555_253.570_7, 1), 555_253.6);
/// assert_eq!(round_to(-122.373_893_268_9, 8), -122.373_893_27);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Parses a user-supplied number such as a distance or bearing.
///
/// Empty, non-numeric and non-finite text is rejected instead of being
/// coerced into `NaN`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] naming `what` when `text` isn't a
/// finite number.
///
/// ```
/// use wgs84_util::utility::parse_number;
///
/// assert_eq!(parse_number(" 59200 ", "distance").unwrap(), 59200.0);
/// assert!(parse_number("", "distance").is_err());
/// assert!(parse_number("12km", "distance").is_err());
/// assert!(parse_number("NaN", "distance").is_err());
/// ```
pub fn parse_number(text: &str, what: &str) -> Result<f64, Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument(format!("{what} is empty")));
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| Error::InvalidArgument(format!("{what} `{trimmed}` is not a number")))?;

    check_finite(value, what)
}

pub(crate) fn check_finite(value: f64, what: &str) -> Result<f64, Error> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidArgument(format!("{what} must be a finite number, got {value}")))
    }
}

pub(crate) trait GeoMath {
    fn is_zero(&self) -> bool;
    fn bearing_degrees(&self) -> Self;
    fn longitude_normalize(&self) -> Self;
}

impl GeoMath for f64 {
    fn is_zero(&self) -> bool {
        self.abs() < f64::EPSILON
    }

    /// Azimuth in radians mapped onto [0, 360) degrees
    fn bearing_degrees(&self) -> f64 {
        let deg = radians_to_degrees((*self + 2. * PI) % (2. * PI));
        // (-tiny + 2pi) % 2pi can land on 360 after conversion
        if deg >= dms::TD { 0. } else { deg }
    }

    /// Longitude in radians wrapped onto [-pi, pi]
    fn longitude_normalize(&self) -> f64 {
        (*self + 3. * PI) % (2. * PI) - PI
    }
}
