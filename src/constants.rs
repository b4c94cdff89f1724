// Semi-major axis a
pub(crate) const WGS84_A: f64 = 6_378_137.;
// Semi-minor axis b
pub(crate) const WGS84_B: f64 = 6_356_752.314_245;
// Flattening
#[allow(clippy::unreadable_literal)]
pub(crate) const WGS84_F: f64 = 1.0 / 298.257223563;
// First eccentricity squared
#[allow(clippy::unreadable_literal)]
pub(crate) const WGS84_E2: f64 = 0.006694380004260827;
// Second eccentricity squared
pub(crate) const WGS84_EP2: f64 = WGS84_E2 / (1. - WGS84_E2);

// UTM central scale factor
pub(crate) const UTM_K0: f64 = 9996.0 / 10_000.;
pub(crate) const UTM_FALSE_EASTING: f64 = 500_000.;
// Added to southern hemisphere northings
pub(crate) const UTM_FALSE_NORTHING: f64 = 10_000_000.;

// Vincenty iteration budgets and tolerance
pub(crate) const INVERSE_MAX_ITERATIONS: usize = 100;
pub(crate) const DIRECT_MAX_ITERATIONS: usize = 200;
pub(crate) const CONVERGENCE_TOLERANCE: f64 = 1e-12;
