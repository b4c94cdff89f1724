#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

use thiserror::Error;

pub mod geodesic;
pub mod latlon;
pub mod spherical;
pub mod utm;
pub mod utility;

pub use geodesic::{Bearings, DirectResult, GeodesicSolution};
pub use latlon::LatLon;
pub use utility::{degrees_to_radians, radians_to_degrees};
pub use utm::{BoundingBox, Hemisphere, Utm};

pub(crate) mod projections {
    pub mod transverse_mercator;
}

pub(crate) mod constants;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Coordinate parameters are not valid: {0}")]
    InvalidCoord(String),
    #[error("UTM coords are invalid: {0}")]
    InvalidUtmCoords(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Formula failed to converge after {iterations} iterations")]
    Convergence {
        iterations: usize,
    },
}

pub trait ParseCoord {
    fn parse_coord(value: &str) -> Result<Self, Error>
    where Self: Sized;
}

/// Parses any coordinate type implementing [`ParseCoord`].
///
/// ```
/// use wgs84_util::{LatLon, Utm};
///
/// let coord: LatLon = wgs84_util::from_str("37.6194847 -122.3738936").unwrap();
/// assert_eq!(coord.latitude(), 37.6194847);
///
/// let utm: Utm = wgs84_util::from_str("10N 555253.6 4163781.7").unwrap();
/// assert_eq!(utm.zone(), 10);
/// ```
pub fn from_str<S, T>(value: S) -> Result<T, Error>
where
    S: AsRef<str>,
    T: ParseCoord
{
    T::parse_coord(value.as_ref())
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }
}
