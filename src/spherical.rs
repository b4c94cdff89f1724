//! Great-circle approximations on a sphere with the WGS84 equatorial radius.
//!
//! Cheaper than [`crate::geodesic`] and never fails, but off by up to ~0.5%
//! against the ellipsoidal result.

use crate::{
    constants::WGS84_A,
    geodesic::DESTINATION_DECIMALS,
    latlon::LatLon,
    utility::{check_finite, degrees_to_radians, radians_to_degrees, round_to, GeoMath},
    Error,
};

/// Sphere radius used by this module, meters
pub const RADIUS: f64 = WGS84_A;

/// Distance in meters between two points using the
/// [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula)
/// (R. W. Sinnott, "Virtues of the Haversine", Sky and Telescope 68 (2), 1984).
///
/// ```
/// use wgs84_util::{spherical, LatLon};
///
/// let a = LatLon::create(40.0, -70.0).unwrap();
/// let b = LatLon::create(40.7419, -73.9930).unwrap();
///
/// assert!((spherical::haversine(&a, &b) - 348_538.722_320_978_7).abs() < 1e-6);
/// ```
pub fn haversine(point_a: &LatLon, point_b: &LatLon) -> f64 {
    let lat1 = degrees_to_radians(point_a.latitude);
    let lat2 = degrees_to_radians(point_b.latitude);
    let d_lat = lat2 - lat1;
    let d_lon = degrees_to_radians(point_b.longitude) - degrees_to_radians(point_a.longitude);

    // Rounding can push h just past 1 for antipodal pairs
    let h = ((d_lat / 2.).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.).sin().powi(2))
        .clamp(0., 1.);

    RADIUS * 2. * h.sqrt().atan2((1. - h).sqrt())
}

/// Point reached from `origin` after `distance` meters along the great
/// circle with initial `bearing` (degrees from north). The result is rounded
/// to 10 decimals with its longitude wrapped into [-180, 180].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for a non-finite bearing or distance.
///
/// ```
/// use wgs84_util::{spherical, LatLon};
///
/// let sfo = LatLon::create(37.6194847, -122.3738936).unwrap();
/// let dest = spherical::destination(&sfo, 45.333333333333336, 59_200.0).unwrap();
///
/// assert!((dest.latitude() - 37.9923622446).abs() < 1e-9);
/// assert!((dest.longitude() + 121.8939734865).abs() < 1e-9);
/// ```
pub fn destination(origin: &LatLon, bearing: f64, distance: f64) -> Result<LatLon, Error> {
    let bearing = degrees_to_radians(check_finite(bearing, "bearing")?);
    // Angular distance
    let delta = check_finite(distance, "distance")? / RADIUS;

    let lat1 = degrees_to_radians(origin.latitude);
    let lon1 = degrees_to_radians(origin.longitude);

    let sin_lat2 = lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos();
    // Paths ending on a pole can round just outside [-1, 1]
    let lat2 = sin_lat2.clamp(-1., 1.).asin();
    let lon2 = lon1 + (bearing.sin() * delta.sin() * lat1.cos())
        .atan2(delta.cos() - lat1.sin() * lat2.sin());

    Ok(LatLon::new(
        round_to(radians_to_degrees(lat2), DESTINATION_DECIMALS),
        round_to(radians_to_degrees(lon2.longitude_normalize()), DESTINATION_DECIMALS),
    ))
}
