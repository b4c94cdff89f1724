//! Vincenty's inverse and direct solutions of the geodesic problem on the
//! WGS84 ellipsoid.
//!
//! T. Vincenty, "Direct and Inverse Solutions of Geodesics on the Ellipsoid
//! with application of nested equations", Survey Review XXIII (176), 1975.

use tracing::{debug, trace};

use crate::{
    constants::{
        CONVERGENCE_TOLERANCE, DIRECT_MAX_ITERATIONS, INVERSE_MAX_ITERATIONS, WGS84_A, WGS84_B,
        WGS84_F,
    },
    latlon::LatLon,
    utility::{check_finite, degrees_to_radians, radians_to_degrees, round_to, GeoMath},
    Error,
};

/// Decimals kept on inverse distances (0.1 mm).
pub const DISTANCE_DECIMALS: i32 = 4;
/// Decimals kept on direct destination coordinates.
pub const DESTINATION_DECIMALS: i32 = 10;

/// Result of the inverse problem.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeodesicSolution {
    /// Ellipsoidal distance in meters
    pub distance: f64,
    /// Forward azimuth at the first point, degrees in [0, 360)
    pub initial_bearing: f64,
    /// Forward azimuth at the second point, degrees in [0, 360)
    pub final_bearing: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bearings {
    pub initial_bearing: f64,
    pub final_bearing: f64,
}

/// Result of the direct problem.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectResult {
    pub destination: LatLon,
    /// Forward azimuth at the destination, degrees in [0, 360)
    pub final_bearing: f64,
}

/// Sine and cosine of the reduced latitude `U`, `tan U = (1 - f) tan(lat)`.
fn reduced_latitude(lat: f64) -> (f64, f64) {
    let tan_u = (1. - WGS84_F) * degrees_to_radians(lat).tan();
    let cos_u = 1. / (1. + tan_u * tan_u).sqrt();
    (tan_u * cos_u, cos_u)
}

/// Vincenty's `A` and `B` coefficients for `u² = cos²α (a² - b²) / b²`.
fn series_coefficients(cos_sq_alpha: f64) -> (f64, f64) {
    let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
    let a = 1. + u_sq / 16384. * (4096. + u_sq * (-768. + u_sq * (320. - 175. * u_sq)));
    let b = u_sq / 1024. * (256. + u_sq * (-128. + u_sq * (74. - 47. * u_sq)));
    (a, b)
}

fn delta_sigma(b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
    let cos2_sq = cos_2sigma_m * cos_2sigma_m;
    b * sin_sigma * (
        cos_2sigma_m + b / 4. * (
            cos_sigma * (-1. + 2. * cos2_sq)
            - b / 6. * cos_2sigma_m * (-3. + 4. * sin_sigma * sin_sigma) * (-3. + 4. * cos2_sq)
        )
    )
}

fn lambda_correction(cos_sq_alpha: f64) -> f64 {
    WGS84_F / 16. * cos_sq_alpha * (4. + WGS84_F * (4. - 3. * cos_sq_alpha))
}

/// Solves the inverse problem: distance and forward azimuths between two
/// points.
///
/// Coincident points give a distance of 0 with both bearings reported as 0,
/// since the azimuth is undefined there.
///
/// # Errors
///
/// Returns [`Error::Convergence`] if λ doesn't settle within 100 iterations,
/// which happens for antipodal and nearly antipodal points.
///
/// ```
/// use wgs84_util::{geodesic, LatLon};
///
/// let a = LatLon::create(40.0, -70.0).unwrap();
/// let b = LatLon::create(40.7419, -73.9930).unwrap();
///
/// let solution = geodesic::inverse(&a, &b).unwrap();
/// assert_eq!(solution.distance, 348_952.9915);
/// ```
#[allow(clippy::similar_names, clippy::many_single_char_names, clippy::float_cmp)]
pub fn inverse(point_a: &LatLon, point_b: &LatLon) -> Result<GeodesicSolution, Error> {
    let l = degrees_to_radians(point_b.longitude) - degrees_to_radians(point_a.longitude);

    let (sin_u1, cos_u1) = reduced_latitude(point_a.latitude);
    let (sin_u2, cos_u2) = reduced_latitude(point_b.latitude);

    let mut lambda = l;

    for iteration in 1..=INVERSE_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        let cross = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2) + cross.powi(2)).sqrt();

        if sin_sigma == 0. {
            trace!(iteration, "coincident points");
            return Ok(GeodesicSolution {
                distance: 0.,
                initial_bearing: 0.,
                final_bearing: 0.,
            });
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1. - sin_alpha * sin_alpha;

        // Equatorial line: cos²α = 0
        let cos_2sigma_m = if cos_sq_alpha.is_zero() {
            0.
        } else {
            cos_sigma - 2. * sin_u1 * sin_u2 / cos_sq_alpha
        };

        let c = lambda_correction(cos_sq_alpha);
        let lambda_prev = lambda;
        lambda = l + (1. - c) * WGS84_F * sin_alpha * (
            sigma + c * sin_sigma * (
                cos_2sigma_m + c * cos_sigma * (-1. + 2. * cos_2sigma_m * cos_2sigma_m)
            )
        );

        if (lambda - lambda_prev).abs() > CONVERGENCE_TOLERANCE {
            continue;
        }

        trace!(iteration, "inverse geodesic converged");

        let (a, b) = series_coefficients(cos_sq_alpha);
        let distance = WGS84_B * a * (sigma - delta_sigma(b, sin_sigma, cos_sigma, cos_2sigma_m));

        let alpha1 = (cos_u2 * sin_lambda).atan2(cross);
        let alpha2 = (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda);

        return Ok(GeodesicSolution {
            distance: round_to(distance, DISTANCE_DECIMALS),
            initial_bearing: alpha1.bearing_degrees(),
            final_bearing: alpha2.bearing_degrees(),
        });
    }

    debug!(
        from = %point_a,
        to = %point_b,
        iterations = INVERSE_MAX_ITERATIONS,
        "inverse geodesic failed to converge"
    );

    Err(Error::Convergence { iterations: INVERSE_MAX_ITERATIONS })
}

/// Ellipsoidal distance in meters between two points, without bearings.
///
/// # Errors
///
/// See [`inverse`].
pub fn distance(point_a: &LatLon, point_b: &LatLon) -> Result<f64, Error> {
    inverse(point_a, point_b).map(|solution| solution.distance)
}

/// Initial and final bearings between two points.
///
/// # Errors
///
/// See [`inverse`].
pub fn bearings(point_a: &LatLon, point_b: &LatLon) -> Result<Bearings, Error> {
    inverse(point_a, point_b).map(|solution| Bearings {
        initial_bearing: solution.initial_bearing,
        final_bearing: solution.final_bearing,
    })
}

/// Solves the direct problem: the point reached after travelling `distance`
/// meters from `origin` on the initial `bearing` (degrees from north).
///
/// The destination is rounded to 10 decimals and its longitude wrapped
/// into [-180, 180].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for a non-finite bearing or distance,
/// and [`Error::Convergence`] if σ doesn't settle within 200 iterations.
/// The 200-iteration guard lives in `iterate_sigma`; see the
/// `sigma_iteration_budget_is_enforced` test for the failure path.
///
/// ```
/// use wgs84_util::{geodesic, LatLon};
///
/// let sfo = LatLon::create(37.6194847, -122.3738936).unwrap();
/// let result = geodesic::direct(&sfo, 45.333333333333336, 59_200.0).unwrap();
///
/// assert!((result.destination.latitude() - 37.9934609028).abs() < 1e-9);
/// assert!((result.destination.longitude() + 121.8945754093).abs() < 1e-9);
/// ```
#[allow(clippy::similar_names, clippy::many_single_char_names)]
pub fn direct(origin: &LatLon, bearing: f64, distance: f64) -> Result<DirectResult, Error> {
    let bearing = check_finite(bearing, "bearing")?;
    let s = check_finite(distance, "distance")?;

    let alpha1 = degrees_to_radians(bearing);
    let (sin_alpha1, cos_alpha1) = alpha1.sin_cos();

    let (sin_u1, cos_u1) = reduced_latitude(origin.latitude);
    let tan_u1 = sin_u1 / cos_u1;

    let sigma1 = tan_u1.atan2(cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = 1. - sin_alpha * sin_alpha;
    let (a, b) = series_coefficients(cos_sq_alpha);

    let sigma0 = s / (WGS84_B * a);
    let (sigma, sin_sigma, cos_sigma, cos_2sigma_m) = iterate_sigma(sigma0, sigma1, b, DIRECT_MAX_ITERATIONS)?;

    let x = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
    let phi2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
        .atan2((1. - WGS84_F) * (sin_alpha * sin_alpha + x * x).sqrt());
    let lambda = (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);

    let c = lambda_correction(cos_sq_alpha);
    let l = lambda - (1. - c) * WGS84_F * sin_alpha * (
        sigma + c * sin_sigma * (
            cos_2sigma_m + c * cos_sigma * (-1. + 2. * cos_2sigma_m * cos_2sigma_m)
        )
    );

    let lambda2 = (degrees_to_radians(origin.longitude) + l).longitude_normalize();
    let alpha2 = sin_alpha.atan2(-x);

    Ok(DirectResult {
        destination: LatLon::new(
            round_to(radians_to_degrees(phi2), DESTINATION_DECIMALS),
            round_to(radians_to_degrees(lambda2), DESTINATION_DECIMALS),
        ),
        final_bearing: alpha2.bearing_degrees(),
    })
}

/// Iterates the angular distance σ of the direct problem, returning
/// `(σ, sin σ, cos σ, cos 2σm)` from the last pass.
fn iterate_sigma(
    sigma0: f64,
    sigma1: f64,
    b: f64,
    max_iterations: usize,
) -> Result<(f64, f64, f64, f64), Error> {
    let mut sigma = sigma0;

    for iteration in 1..=max_iterations {
        let cos_2sigma_m = (2. * sigma1 + sigma).cos();
        let (sin_sigma, cos_sigma) = sigma.sin_cos();

        let sigma_prev = sigma;
        sigma = sigma0 + delta_sigma(b, sin_sigma, cos_sigma, cos_2sigma_m);

        if (sigma - sigma_prev).abs() <= CONVERGENCE_TOLERANCE {
            trace!(iteration, "direct geodesic converged");
            return Ok((sigma, sin_sigma, cos_sigma, cos_2sigma_m));
        }
    }

    debug!(iterations = max_iterations, "direct geodesic failed to converge");

    Err(Error::Convergence { iterations: max_iterations })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> LatLon {
        LatLon::create(lat, lon).unwrap()
    }

    #[test]
    fn inverse_new_york() {
        let solution = inverse(&point(40., -70.), &point(40.7419, -73.9930)).unwrap();
        assert_eq!(solution.distance, 348_952.9915);
        assert!((solution.initial_bearing - 284.942_177_863_717_2).abs() < 1e-9);
        assert!((solution.final_bearing - 282.355_112_743_104_14).abs() < 1e-9);
    }

    #[test]
    fn inverse_along_equator() {
        // cos²α is exactly 0 along the equator
        let solution = inverse(&point(0., 0.), &point(0., 10.)).unwrap();
        assert_eq!(solution.distance, 1_113_194.9079);
        assert!(solution.distance.is_finite());
        assert!((solution.initial_bearing - 90.).abs() < 1e-9);
        assert!((solution.final_bearing - 90.).abs() < 1e-9);
    }

    #[test]
    fn inverse_coincident_points() {
        let p = point(10., 20.);
        let solution = inverse(&p, &p).unwrap();
        assert_eq!(solution.distance, 0.);
        assert_eq!(solution.initial_bearing, 0.);
        assert_eq!(solution.final_bearing, 0.);
    }

    #[test]
    fn inverse_antipodal_fails() {
        assert_eq!(
            inverse(&point(0., 0.), &point(0., 180.)),
            Err(Error::Convergence { iterations: 100 })
        );
        assert_eq!(
            distance(&point(0., 0.), &point(0.5, 179.7)),
            Err(Error::Convergence { iterations: 100 })
        );
    }

    #[test]
    fn bearings_match_inverse() {
        let a = point(40., -70.);
        let b = point(40.7419, -73.9930);
        let solution = inverse(&a, &b).unwrap();
        let bearings = bearings(&a, &b).unwrap();
        assert_eq!(bearings.initial_bearing, solution.initial_bearing);
        assert_eq!(bearings.final_bearing, solution.final_bearing);
        assert_eq!(distance(&a, &b), Ok(solution.distance));
    }

    #[test]
    fn direct_sfo() {
        let result = direct(&point(37.619_484_7, -122.373_893_6), 45.333_333_333_333_336, 59_200.).unwrap();
        assert!((result.destination.latitude() - 37.993_460_902_8).abs() < 1e-9);
        assert!((result.destination.longitude() + 121.894_575_409_3).abs() < 1e-9);
        assert!((result.final_bearing - 45.627_156_261_158_36).abs() < 1e-9);
    }

    #[test]
    fn direct_due_north() {
        let result = direct(&point(-33.986_429_95, 151.000_318_39), 0., 59_200.).unwrap();
        assert!((result.destination.latitude() + 33.452_699_127_2).abs() < 1e-9);
        assert_eq!(result.destination.longitude(), 151.000_318_39);
        assert!(result.final_bearing.abs() < 1e-9);
    }

    #[test]
    fn direct_inverts_inverse() {
        let a = point(37.619_484_7, -122.373_893_6);
        let b = point(37.992_362_244_6, -121.893_973_486_5);
        let solution = inverse(&a, &b).unwrap();
        let result = direct(&a, solution.initial_bearing, solution.distance).unwrap();

        assert!((result.destination.latitude() - b.latitude()).abs() < 1e-8);
        assert!((result.destination.longitude() - b.longitude()).abs() < 1e-8);
        assert!((result.final_bearing - solution.final_bearing).abs() < 1e-6);
    }

    #[test]
    fn direct_wraps_longitude() {
        let result = direct(&point(0., 179.9), 90., 50_000.).unwrap();
        let lon = result.destination.longitude();
        assert!((-180.0..=180.0).contains(&lon));
        assert!(lon < -179.);
    }

    #[test]
    fn direct_rejects_non_finite_input() {
        let origin = point(0., 0.);
        assert!(matches!(direct(&origin, f64::NAN, 10.), Err(Error::InvalidArgument(_))));
        assert!(matches!(direct(&origin, 0., f64::INFINITY), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn sigma_iteration_budget_is_enforced() {
        // A single pass can't satisfy the tolerance once B is non-trivial
        let (_, b) = series_coefficients(1.);
        assert_eq!(
            iterate_sigma(1., 0.3, b, 1),
            Err(Error::Convergence { iterations: 1 })
        );
        assert!(iterate_sigma(1., 0.3, b, DIRECT_MAX_ITERATIONS).is_ok());
    }
}
