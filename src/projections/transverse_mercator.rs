use crate::{
    constants::{UTM_K0, WGS84_A, WGS84_E2, WGS84_EP2},
    utility::{degrees_to_radians, radians_to_degrees},
};

// ================================
// Meridional arc series (Snyder 3-21)
// ================================

const E4: f64 = WGS84_E2 * WGS84_E2;
const E6: f64 = E4 * WGS84_E2;

const M1: f64 = 1. - WGS84_E2 / 4. - 3. * E4 / 64. - 5. * E6 / 256.;
const M2: f64 = 3. * WGS84_E2 / 8. + 3. * E4 / 32. + 45. * E6 / 1024.;
const M3: f64 = 15. * E4 / 256. + 45. * E6 / 1024.;
const M4: f64 = 35. * E6 / 3072.;

/// Transverse Mercator on the WGS84 ellipsoid using Snyder's series
/// ("Map Projections: A Working Manual", eqs. 8-9 to 8-10 and 8-17 to 8-25).
///
/// Works in plain projected meters relative to the central meridian and the
/// equator; false easting/northing belong to the caller.
pub(crate) struct TransverseMercator {
    a: f64,
    k0: f64,
    e2: f64,
    ep2: f64,
    // e1 of the footpoint latitude series
    e1: f64,
}

impl TransverseMercator {
    pub fn utm() -> TransverseMercator {
        let e2m_sqrt = (1. - WGS84_E2).sqrt();

        Self {
            a: WGS84_A,
            k0: UTM_K0,
            e2: WGS84_E2,
            ep2: WGS84_EP2,
            e1: (1. - e2m_sqrt) / (1. + e2m_sqrt),
        }
    }

    /// Length of the meridian arc from the equator to `phi` (radians)
    fn meridional_arc(&self, phi: f64) -> f64 {
        self.a * (
            M1 * phi
            - M2 * (2. * phi).sin()
            + M3 * (4. * phi).sin()
            - M4 * (6. * phi).sin()
        )
    }

    /// Projects `lat`/`lon` (degrees) against the central meridian `lon0`,
    /// returning `(x, y)` in meters.
    #[allow(clippy::similar_names)]
    pub fn from_latlon(&self, lon0: f64, lat: f64, lon: f64) -> (f64, f64) {
        let phi = degrees_to_radians(lat);
        let lam = degrees_to_radians(lon);
        let lam0 = degrees_to_radians(lon0);

        let (sin_phi, cos_phi) = phi.sin_cos();
        let tan_phi = phi.tan();

        let n = self.a / (1. - self.e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = self.ep2 * cos_phi * cos_phi;
        let a = cos_phi * (lam - lam0);
        let m = self.meridional_arc(phi);

        let x = self.k0 * n * (
            a
            + (1. - t + c) * a.powi(3) / 6.
            + (5. - 18. * t + t * t + 72. * c - 58. * self.ep2) * a.powi(5) / 120.
        );

        let y = self.k0 * (
            m + n * tan_phi * (
                a * a / 2.
                + (5. - t + 9. * c + 4. * c * c) * a.powi(4) / 24.
                + (61. - 58. * t + t * t + 600. * c - 330. * self.ep2) * a.powi(6) / 720.
            )
        );

        (x, y)
    }

    /// Inverse of [`TransverseMercator::from_latlon`], returning
    /// `(lat, lon)` in degrees.
    #[allow(clippy::similar_names)]
    pub fn to_latlon(&self, lon0: f64, x: f64, y: f64) -> (f64, f64) {
        let e1 = self.e1;

        let m = y / self.k0;
        let mu = m / (self.a * M1);

        // Footpoint latitude
        let phi1 = mu
            + (3. * e1 / 2. - 27. * e1.powi(3) / 32.) * (2. * mu).sin()
            + (21. * e1 * e1 / 16. - 55. * e1.powi(4) / 32.) * (4. * mu).sin()
            + (151. * e1.powi(3) / 96.) * (6. * mu).sin();

        let (sin_phi1, cos_phi1) = phi1.sin_cos();
        let tan_phi1 = phi1.tan();
        let w = 1. - self.e2 * sin_phi1 * sin_phi1;

        let n1 = self.a / w.sqrt();
        let t1 = tan_phi1 * tan_phi1;
        let c1 = self.ep2 * cos_phi1 * cos_phi1;
        let r1 = self.a * (1. - self.e2) / w.powf(1.5);
        let d = x / (n1 * self.k0);

        let lat = phi1 - (n1 * tan_phi1 / r1) * (
            d * d / 2.
            - (5. + 3. * t1 + 10. * c1 - 4. * c1 * c1 - 9. * self.ep2) * d.powi(4) / 24.
            + (61. + 90. * t1 + 298. * c1 + 45. * t1 * t1 - 252. * self.ep2 - 3. * c1 * c1)
                * d.powi(6) / 720.
        );

        let lon = (
            d
            - (1. + 2. * t1 + c1) * d.powi(3) / 6.
            + (5. - 2. * c1 + 28. * t1 - 3. * c1 * c1 + 8. * self.ep2 + 24. * t1 * t1)
                * d.powi(5) / 120.
        ) / cos_phi1;

        (radians_to_degrees(lat), lon0 + radians_to_degrees(lon))
    }
}
