use std::fmt::Display;

use crate::{
    constants::{UTM_FALSE_EASTING, UTM_FALSE_NORTHING},
    latlon::LatLon,
    projections::transverse_mercator::TransverseMercator,
    utility::{check_finite, dms, round_to},
    Error, ParseCoord, ThisOrThat,
};

pub(crate) mod zonespec {
    pub(crate) const MINZONE: i32 = 0;
    pub(crate) const MAXZONE: i32 = 60;
}

/// Decimals kept on projected eastings/northings (0.1 m).
pub const UTM_DECIMALS: i32 = 1;
/// Decimals kept on latitudes/longitudes recovered from UTM.
pub const LATLON_DECIMALS: i32 = 8;

/// Hemisphere flag of a UTM coordinate, written `N` or `S` after the zone.
/// This is not an MGRS latitude band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub fn letter(self) -> char {
        (self == Hemisphere::North).ternary('N', 'S')
    }
}

impl TryFrom<char> for Hemisphere {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'N' => Ok(Hemisphere::North),
            'S' => Ok(Hemisphere::South),
            _ => Err(Error::InvalidUtmCoords(format!("Zone letter `{value}` is not N or S"))),
        }
    }
}

/// Representation of a WGS84
/// [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
/// point. Polar (UPS) regions aren't handled; points there are still
/// projected into the ordinary zone grid.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Utm {
    #[cfg_attr(feature = "serde", serde(alias = "zone_number"))]
    pub(crate) zone: i32,
    #[cfg_attr(feature = "serde", serde(alias = "zone_letter"))]
    pub(crate) hemisphere: Hemisphere,
    pub(crate) easting: f64,
    pub(crate) northing: f64,
}

/// Extent covered by an imprecise UTM reference, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Utm {
    /// Internal-only constructor that doesn't check the coordinate
    pub(crate) fn new(zone: i32, hemisphere: Hemisphere, easting: f64, northing: f64) -> Utm {
        Self {
            zone,
            hemisphere,
            easting,
            northing,
        }
    }

    /// Creates a UTM point. Easting and northing must be finite.
    ///
    /// The zone number isn't range-checked here: a zone outside `[0, 60]`
    /// makes [`Utm::to_latlon`] return `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUtmCoords`] for a non-finite easting or northing.
    pub fn create(zone: i32, hemisphere: Hemisphere, easting: f64, northing: f64) -> Result<Utm, Error> {
        if !easting.is_finite() {
            return Err(Error::InvalidUtmCoords(format!("Easting {easting} is not a finite number")));
        }
        if !northing.is_finite() {
            return Err(Error::InvalidUtmCoords(format!("Northing {northing} is not a finite number")));
        }

        Ok(Utm::new(zone, hemisphere, easting, northing))
    }

    pub fn zone(&self) -> i32 {
        self.zone
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn zone_letter(&self) -> char {
        self.hemisphere.letter()
    }

    pub fn is_north(&self) -> bool {
        self.hemisphere == Hemisphere::North
    }

    pub fn easting(&self) -> f64 {
        self.easting
    }

    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Projects a geographic point into its UTM zone. Easting and northing
    /// are rounded to 0.1 m.
    ///
    /// ```
    /// use wgs84_util::{Hemisphere, LatLon, Utm};
    ///
    /// let sydney = LatLon::create(-34.0, 151.0).unwrap();
    /// let utm = Utm::from_latlon(&sydney);
    ///
    /// assert_eq!(utm.zone(), 56);
    /// assert_eq!(utm.hemisphere(), Hemisphere::South);
    /// assert_eq!(utm.easting(), 315_290.2);
    /// assert_eq!(utm.northing(), 6_236_040.9);
    /// ```
    pub fn from_latlon(value: &LatLon) -> Utm {
        let zone = standard_zone(value.latitude, value.longitude);
        let lon0 = central_meridian(zone);

        let (x, mut y) = TransverseMercator::utm().from_latlon(lon0, value.latitude, value.longitude);

        let hemisphere = if value.latitude < 0. {
            y += UTM_FALSE_NORTHING;
            Hemisphere::South
        } else {
            Hemisphere::North
        };

        Utm {
            zone,
            hemisphere,
            easting: round_to(x + UTM_FALSE_EASTING, UTM_DECIMALS),
            northing: round_to(y, UTM_DECIMALS),
        }
    }

    /// Converts back to latitude/longitude, rounded to 8 decimals. Longitudes
    /// falling past the antimeridian (zone 0, or far outside zone 1 or 60)
    /// are wrapped back into [-180, 180].
    ///
    /// Returns `None` if the zone number is outside `[0, 60]`.
    ///
    /// ```
    /// use wgs84_util::{Hemisphere, Utm};
    ///
    /// let utm = Utm::create(56, Hemisphere::South, 315_290.2, 6_237_546.4).unwrap();
    /// let coord = utm.to_latlon().unwrap();
    ///
    /// assert_eq!(coord.latitude(), -33.98642995);
    /// assert_eq!(coord.longitude(), 151.00031839);
    ///
    /// let invalid = Utm::create(61, Hemisphere::North, 500_000.0, 0.0).unwrap();
    /// assert!(invalid.to_latlon().is_none());
    /// ```
    pub fn to_latlon(&self) -> Option<LatLon> {
        if !(zonespec::MINZONE..=zonespec::MAXZONE).contains(&self.zone) {
            return None;
        }

        let x = self.easting - UTM_FALSE_EASTING;
        let y = (self.hemisphere == Hemisphere::South).ternary(
            self.northing - UTM_FALSE_NORTHING,
            self.northing,
        );

        let (lat, lon) = TransverseMercator::utm().to_latlon(central_meridian(self.zone), x, y);
        let lon = wrap_longitude(lon);

        Some(LatLon::new(
            round_to(lat, LATLON_DECIMALS),
            round_to(lon, LATLON_DECIMALS),
        ))
    }

    /// Area covered by this reference when it's only known to within
    /// `accuracy` meters, e.g. an MGRS reference with truncated digits.
    /// The point itself is the south-west corner; the north-east corner is
    /// offset by `accuracy` in both easting and northing.
    ///
    /// Returns `Ok(None)` if the zone number is outside `[0, 60]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] unless `accuracy` is finite and
    /// positive.
    ///
    /// ```
    /// use wgs84_util::{Hemisphere, Utm};
    ///
    /// let utm = Utm::create(10, Hemisphere::North, 555_253.6, 4_163_781.7).unwrap();
    /// let bbox = utm.to_bounding_box(10.0).unwrap().unwrap();
    ///
    /// assert_eq!(bbox.bottom, 37.61948461);
    /// assert_eq!(bbox.left, -122.37389327);
    /// assert_eq!(bbox.top, 37.61957414);
    /// assert_eq!(bbox.right, -122.3737792);
    /// ```
    pub fn to_bounding_box(&self, accuracy: f64) -> Result<Option<BoundingBox>, Error> {
        let accuracy = check_finite(accuracy, "accuracy")?;
        if accuracy <= 0. {
            return Err(Error::InvalidArgument(format!("accuracy must be positive, got {accuracy}")));
        }

        let shifted = Utm::new(
            self.zone,
            self.hemisphere,
            self.easting + accuracy,
            self.northing + accuracy,
        );

        let bbox = self.to_latlon()
            .zip(shifted.to_latlon())
            .map(|(bottom_left, top_right)| BoundingBox {
                top: top_right.latitude,
                right: top_right.longitude,
                bottom: bottom_left.latitude,
                left: bottom_left.longitude,
            });

        Ok(bbox)
    }
}

/// Brings a longitude in degrees back into [-180, 180], leaving values
/// already inside untouched.
fn wrap_longitude(lon: f64) -> f64 {
    if lon < -dms::HD {
        lon + dms::TD
    } else if lon > dms::HD {
        lon - dms::TD
    } else {
        lon
    }
}

/// Longitude of the central meridian of `zone`, in degrees.
pub(crate) fn central_meridian(zone: i32) -> f64 {
    f64::from((zone - 1) * 6 - 180 + 3)
}

/// Map lat/lon to a UTM zone, honoring the Norway and Svalbard exceptions.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub(crate) fn standard_zone(lat: f64, lon: f64) -> i32 {
    // Longitude 180 belongs to the last zone rather than a 61st
    let mut zone = if lon == 180. {
        zonespec::MAXZONE
    } else {
        ((lon + 180.) / 6.).floor() as i32 + 1
    };

    // The Norway exception
    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        zone = 32;
    }

    // The Svalbard exception
    if (72.0..84.0).contains(&lat) {
        if (0.0..9.0).contains(&lon) {
            zone = 31;
        } else if (9.0..21.0).contains(&lon) {
            zone = 33;
        } else if (21.0..33.0).contains(&lon) {
            zone = 35;
        } else if (33.0..42.0).contains(&lon) {
            zone = 37;
        }
    }

    zone
}

impl ParseCoord for Utm {
    /// Parses `"<zone><N|S> <easting> <northing>"`, e.g. `"10N 555253.6 4163781.7"`.
    fn parse_coord(value: &str) -> Result<Self, Error> {
        let invalid = Error::InvalidUtmCoords;

        let mut pieces = value.split_whitespace();
        let zone_str = pieces
            .next()
            .ok_or_else(|| invalid(format!("Missing zone in `{value}`")))?;

        let letter = zone_str
            .chars()
            .last()
            .ok_or_else(|| invalid(format!("Missing zone in `{value}`")))?;
        let hemisphere = Hemisphere::try_from(letter)?;

        let number = &zone_str[..zone_str.len() - letter.len_utf8()];
        let zone = number
            .parse::<i32>()
            .map_err(|_| invalid(format!("Zone number `{number}` is not an integer")))?;
        if !(zonespec::MINZONE..=zonespec::MAXZONE).contains(&zone) {
            return Err(invalid(format!("Zone {zone} not in range [0, 60]")));
        }

        let mut next_value = |what: &str| -> Result<f64, Error> {
            let piece = pieces
                .next()
                .ok_or_else(|| invalid(format!("Missing {what} in `{value}`")))?;
            piece
                .parse::<f64>()
                .map_err(|_| invalid(format!("{what} `{piece}` is not a number")))
        };

        let easting = next_value("easting")?;
        let northing = next_value("northing")?;

        if pieces.next().is_some() {
            return Err(invalid(format!("Unexpected trailing values in `{value}`")));
        }

        Utm::create(zone, hemisphere, easting, northing)
    }
}

impl Display for Utm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let easting = buf.format(self.easting);
        let mut buf = ryu::Buffer::new();
        let northing = buf.format(self.northing);
        write!(
            f,
            "{}{} {easting} {northing}",
            self.zone,
            self.hemisphere.letter(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::from_str;

    use super::*;

    fn utm(lat: f64, lon: f64) -> Utm {
        LatLon::create(lat, lon).unwrap().to_utm()
    }

    #[test]
    fn sfo_forward() {
        let sfo = utm(37.619_484_7, -122.373_893_6);
        assert_eq!(sfo.zone(), 10);
        assert_eq!(sfo.zone_letter(), 'N');
        assert_eq!(sfo.easting(), 555_253.6);
        assert_eq!(sfo.northing(), 4_163_781.7);
    }

    #[test]
    fn sydney_forward() {
        let sydney = utm(-34., 151.);
        assert_eq!(sydney.zone(), 56);
        assert_eq!(sydney.zone_letter(), 'S');
        assert_eq!(sydney.easting(), 315_290.2);
        assert_eq!(sydney.northing(), 6_236_040.9);
    }

    #[test]
    fn origin_of_zone_31() {
        let origin = utm(0., 0.);
        assert_eq!(origin.zone(), 31);
        assert!(origin.is_north());
        assert_eq!(origin.easting(), 166_021.4);
        assert_eq!(origin.northing(), 0.);
    }

    #[test]
    fn sfo_inverse() {
        let sfo = Utm::create(10, Hemisphere::North, 555_253.6, 4_163_781.7).unwrap();
        let coord = sfo.to_latlon().unwrap();
        assert_eq!(coord.latitude(), 37.619_484_61);
        assert_eq!(coord.longitude(), -122.373_893_27);
    }

    #[test]
    fn sydney_inverse() {
        let sydney = Utm::create(56, Hemisphere::South, 315_290.2, 6_237_546.4).unwrap();
        let coord = sydney.to_latlon().unwrap();
        assert_eq!(coord.latitude(), -33.986_429_95);
        assert_eq!(coord.longitude(), 151.000_318_39);
    }

    #[test]
    fn invalid_zone_is_none() {
        for zone in [-1, 61, 100] {
            let point = Utm::create(zone, Hemisphere::North, 500_000., 4_000_000.).unwrap();
            assert!(point.to_latlon().is_none());
            assert_eq!(point.to_bounding_box(10.), Ok(None));
        }

        // Zone 0 is accepted; its central meridian at -183 wraps to 177
        let zero = Utm::create(0, Hemisphere::North, 500_000., 0.).unwrap();
        let coord = zero.to_latlon().unwrap();
        assert_eq!(coord.latitude(), 0.);
        assert_eq!(coord.longitude(), 177.);
        assert!(LatLon::create(coord.latitude(), coord.longitude()).is_ok());
    }

    #[test]
    fn wrap_longitude_keeps_range() {
        assert_eq!(wrap_longitude(-183.), 177.);
        assert_eq!(wrap_longitude(181.5), -178.5);
        assert_eq!(wrap_longitude(180.), 180.);
        assert_eq!(wrap_longitude(-180.), -180.);
        assert_eq!(wrap_longitude(-122.5), -122.5);
    }

    #[test]
    fn create_rejects_non_finite() {
        assert!(matches!(
            Utm::create(10, Hemisphere::North, f64::NAN, 0.),
            Err(Error::InvalidUtmCoords(_))
        ));
        assert!(matches!(
            Utm::create(10, Hemisphere::North, 0., f64::INFINITY),
            Err(Error::InvalidUtmCoords(_))
        ));
    }

    #[test]
    fn longitude_180_is_zone_60() {
        assert_eq!(standard_zone(10., 180.), 60);
        assert_eq!(standard_zone(-45., 180.), 60);
        assert_eq!(standard_zone(10., 179.999), 60);
        assert_eq!(standard_zone(10., -180.), 1);

        let point = utm(10., 180.);
        assert_eq!(point.zone(), 60);
        assert_eq!(point.easting(), 828_928.7);
        assert_eq!(point.northing(), 1_106_908.9);
    }

    #[test]
    fn norway_exception() {
        assert_eq!(standard_zone(60., 5.), 32);
        assert_eq!(standard_zone(56., 3.), 32);
        assert_eq!(standard_zone(63.999, 11.999), 32);
        // Just outside the box
        assert_eq!(standard_zone(64., 5.), 31);
        assert_eq!(standard_zone(55.999, 5.), 31);
        assert_eq!(standard_zone(60., 2.999), 31);
        assert_eq!(standard_zone(60., 12.), 33);

        let point = utm(60., 5.);
        assert_eq!(point.zone(), 32);
        assert_eq!(point.easting(), 276_979.9);
        assert_eq!(point.northing(), 6_658_157.2);
    }

    #[test]
    fn svalbard_exception() {
        assert_eq!(standard_zone(75., 5.), 31);
        assert_eq!(standard_zone(75., 10.), 33);
        assert_eq!(standard_zone(75., 25.), 35);
        assert_eq!(standard_zone(75., 40.), 37);
        // Outside the band of special zones
        assert_eq!(standard_zone(75., 42.), 38);
        assert_eq!(standard_zone(75., -1.), 30);
        assert_eq!(standard_zone(84., 10.), 32);
        assert_eq!(standard_zone(71.999, 10.), 32);

        let point = utm(75., 10.);
        assert_eq!(point.zone(), 33);
        assert_eq!(point.easting(), 355_706.6);
        assert_eq!(point.northing(), 8_329_692.7);

        let point = utm(75., 40.);
        assert_eq!(point.zone(), 37);
        assert_eq!(point.easting(), 528_889.2);
        assert_eq!(point.northing(), 8_323_850.3);
    }

    #[test]
    fn bounding_box_contains_point() {
        let sydney = Utm::create(56, Hemisphere::South, 315_290.2, 6_236_040.9).unwrap();
        let bbox = sydney.to_bounding_box(100.).unwrap().unwrap();
        let point = sydney.to_latlon().unwrap();

        assert_eq!(bbox.bottom, point.latitude());
        assert_eq!(bbox.left, point.longitude());
        assert!(bbox.top > bbox.bottom);
        assert!(bbox.right > bbox.left);
    }

    #[test]
    fn bounding_box_rejects_bad_accuracy() {
        let sfo = Utm::create(10, Hemisphere::North, 555_253.6, 4_163_781.7).unwrap();
        for accuracy in [0., -5., f64::NAN] {
            assert!(matches!(sfo.to_bounding_box(accuracy), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn hemisphere_letters() {
        assert_eq!(Hemisphere::try_from('n'), Ok(Hemisphere::North));
        assert_eq!(Hemisphere::try_from('S'), Ok(Hemisphere::South));
        assert!(Hemisphere::try_from('T').is_err());
        assert_eq!(Hemisphere::South.letter(), 'S');
    }

    #[test]
    fn parse_and_display() {
        let sfo: Utm = from_str("10N 555253.6 4163781.7").unwrap();
        assert_eq!(sfo, Utm::new(10, Hemisphere::North, 555_253.6, 4_163_781.7));
        assert_eq!(sfo.to_string(), "10N 555253.6 4163781.7");

        let sydney: Utm = from_str("56s 315290.2 6236040.9").unwrap();
        assert_eq!(sydney.hemisphere(), Hemisphere::South);
        assert_eq!(sydney.to_string(), "56S 315290.2 6236040.9");

        assert!(from_str::<_, Utm>("").is_err());
        assert!(from_str::<_, Utm>("10X 555253.6 4163781.7").is_err());
        assert!(from_str::<_, Utm>("61N 555253.6 4163781.7").is_err());
        assert!(from_str::<_, Utm>("N 555253.6 4163781.7").is_err());
        assert!(from_str::<_, Utm>("10N 555253.6").is_err());
        assert!(from_str::<_, Utm>("10N east 4163781.7").is_err());
        assert!(from_str::<_, Utm>("10N 1 2 3").is_err());
    }
}
