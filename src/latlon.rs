use std::fmt::Display;

use crate::{
    geodesic::{self, DirectResult, GeodesicSolution},
    spherical,
    utm::Utm,
    utility::dms,
    Error, ParseCoord,
};

/// A WGS84 geographic point in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub(crate) latitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lon", alias = "lng"))]
    pub(crate) longitude: f64,
}

impl LatLon {
    /// Internal-only constructor that doesn't check the bounds of lat/lon
    pub(crate) fn new(lat: f64, lon: f64) -> LatLon {
        Self {
            latitude: lat,
            longitude: lon,
        }
    }

    /// Tries to create a `LatLon` point from a lat/lon pair. First checks if the
    /// values are valid:
    /// * Latitude must be in range [-90, 90]
    /// * Longitude must be in range [-180, 180]
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either latitude or longitude are invalid.
    ///
    /// # Usage
    ///
    /// ```
    /// use wgs84_util::LatLon;
    ///
    /// let coord = LatLon::create(37.6194847, -122.3738936);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.latitude(), 37.6194847);
    /// assert_eq!(coord.longitude(), -122.3738936);
    ///
    /// assert!(LatLon::create(100.0, 0.0).is_err());
    /// assert!(LatLon::create(0.0, -200.0).is_err());
    /// assert!(LatLon::create(f64::NAN, 0.0).is_err());
    /// assert!(LatLon::create(0.0, 180.0).is_ok());
    /// ```
    pub fn create(lat: f64, lon: f64) -> Result<LatLon, Error> {
        if !(-dms::QD..=dms::QD).contains(&lat) {
            Err(Error::InvalidCoord(format!("Latitude {lat} outside of valid range [-90, 90].")))
        } else if !(-dms::HD..=dms::HD).contains(&lon) {
            Err(Error::InvalidCoord(format!("Longitude {lon} outside of valid range [-180, 180].")))
        } else {
            Ok(LatLon::new(lat, lon))
        }
    }

    /// Returns the latitude value.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude value.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns whether the current point is in the northern hemisphere.
    /// The equator counts as north.
    pub fn is_north(&self) -> bool {
        self.latitude >= 0.
    }

    /// Spherical distance in meters, see [`spherical::haversine`].
    pub fn haversine(&self, other: &LatLon) -> f64 {
        spherical::haversine(self, other)
    }

    /// Ellipsoidal distance and bearings, see [`geodesic::inverse`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convergence`] for (nearly) antipodal points.
    pub fn geodesic_to(&self, other: &LatLon) -> Result<GeodesicSolution, Error> {
        geodesic::inverse(self, other)
    }

    /// Ellipsoidal destination point, see [`geodesic::direct`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a non-finite bearing or distance
    /// and [`Error::Convergence`] if the iteration doesn't settle.
    pub fn destination(&self, bearing: f64, distance: f64) -> Result<DirectResult, Error> {
        geodesic::direct(self, bearing, distance)
    }

    /// Converts from [`Utm`] to [`LatLon`]. Returns `None` when the zone is
    /// outside `[0, 60]`.
    ///
    /// # Usage
    ///
    /// ```
    /// use wgs84_util::{Hemisphere, LatLon, Utm};
    ///
    /// let utm = Utm::create(10, Hemisphere::North, 555_253.6, 4_163_781.7).unwrap();
    /// let coord = LatLon::from_utm(&utm).unwrap();
    ///
    /// assert_eq!(coord.latitude(), 37.61948461);
    /// assert_eq!(coord.longitude(), -122.37389327);
    /// ```
    pub fn from_utm(value: &Utm) -> Option<LatLon> {
        value.to_latlon()
    }

    /// Converts from [`LatLon`] to [`Utm`]
    ///
    /// # Usage
    ///
    /// ```
    /// use wgs84_util::{Hemisphere, LatLon};
    ///
    /// let coord = LatLon::create(37.6194847, -122.3738936).unwrap();
    /// let utm = coord.to_utm();
    ///
    /// assert_eq!(utm.zone(), 10);
    /// assert_eq!(utm.hemisphere(), Hemisphere::North);
    /// assert_eq!(utm.easting(), 555_253.6);
    /// assert_eq!(utm.northing(), 4_163_781.7);
    /// ```
    pub fn to_utm(&self) -> Utm {
        Utm::from_latlon(self)
    }
}

impl ParseCoord for LatLon {
    /// Parses `"<lat> <lon>"`, separated by whitespace and/or a comma.
    fn parse_coord(value: &str) -> Result<Self, Error> {
        let mut pieces = value
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|piece| !piece.is_empty());

        let mut next_value = |what: &str| -> Result<f64, Error> {
            let piece = pieces
                .next()
                .ok_or_else(|| Error::InvalidCoord(format!("Missing {what} in `{value}`")))?;
            piece
                .parse::<f64>()
                .map_err(|_| Error::InvalidCoord(format!("{what} `{piece}` is not a number")))
        };

        let lat = next_value("latitude")?;
        let lon = next_value("longitude")?;

        if pieces.next().is_some() {
            return Err(Error::InvalidCoord(format!("Unexpected trailing values in `{value}`")));
        }

        LatLon::create(lat, lon)
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let lat = buf.format(self.latitude);
        let mut buf = ryu::Buffer::new();
        let lon = buf.format(self.longitude);
        write!(
            f,
            "{lat} {lon}",
        )
    }
}
