//! Hue arithmetic. Hues live on a circle, so the naive difference of two hues is often the long way
//! around: 350° and 10° are 20° apart, not 340°. These functions always take the short way. The
//! modulus is configurable because hue composition H runs from 0 to 400 rather than 0 to 360.

use std::f64::consts::PI;

/// The unit a hue correlate is measured in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HueUnit {
    /// The hue angle h, 0 to 360.
    Degrees,
    /// Hue composition H, 0 to 400, with the unique hues red, yellow, green and blue at 0, 100, 200
    /// and 300.
    Gons,
}

impl HueUnit {
    /// The length of a full turn in this unit.
    pub fn modulus(&self) -> f64 {
        match *self {
            HueUnit::Degrees => 360.0,
            HueUnit::Gons => 400.0,
        }
    }
    /// Radians per unit.
    pub fn radians(&self) -> f64 {
        2.0 * PI / self.modulus()
    }
}

/// The signed smallest difference from `hue1` to `hue2`, in degrees: negative values mean `hue2`
/// is closer going in the negative direction. The result is between -180 and 180, and `hue1` plus
/// the result is always `hue2` modulo 360.
/// # Example
/// ```
/// # use percept::hue::hue_difference;
/// assert!((hue_difference(5., 0.) + 5.).abs() <= 1e-10);
/// assert!((hue_difference(350., 10.) - 20.).abs() <= 1e-10);
/// ```
pub fn hue_difference(hue1: f64, hue2: f64) -> f64 {
    hue_difference_mod(hue1, hue2, 360.0)
}

/// [`hue_difference`] on an arbitrary modulus.
pub fn hue_difference_mod(hue1: f64, hue2: f64, modulus: f64) -> f64 {
    let half = modulus / 2.0;
    let mut difference = (hue2 - hue1) % modulus;
    if difference > half {
        difference -= modulus;
    }
    if difference < -half {
        difference += modulus;
    }
    difference
}

/// The unsigned smallest difference between two hues in degrees, between 0 and 180.
pub fn hue_distance(hue1: f64, hue2: f64) -> f64 {
    hue_difference(hue1, hue2).abs()
}

/// [`hue_distance`] on an arbitrary modulus.
pub fn hue_distance_mod(hue1: f64, hue2: f64, modulus: f64) -> f64 {
    hue_difference_mod(hue1, hue2, modulus).abs()
}

/// Brings any hue into the range [0, modulus).
pub fn normalize(hue: f64, modulus: f64) -> f64 {
    let h = hue % modulus;
    if h < 0.0 {
        h + modulus
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    fn congruent(a: f64, b: f64, modulus: f64) -> bool {
        let d = normalize(a - b, modulus);
        d <= 1e-9 || (modulus - d) <= 1e-9
    }

    #[test]
    fn test_difference_laws() {
        let hues = [-725.5, -180., -90.3, 0., 0.5, 90., 179.9, 180., 181., 270., 359.99, 360., 1234.5];
        for &h1 in hues.iter() {
            for &h2 in hues.iter() {
                let diff = hue_difference(h1, h2);
                assert!(diff >= -180. && diff <= 180.);
                assert!(congruent(h1 + diff, h2, 360.));
                let dist = hue_distance(h1, h2);
                assert!(dist >= 0. && dist <= 180.);
                assert!((dist - hue_distance(h2, h1)).abs() <= 1e-9);
            }
        }
    }

    #[test]
    fn test_gons() {
        assert!((hue_difference_mod(390., 10., 400.) - 20.).abs() <= 1e-10);
        assert!((hue_distance_mod(0., 250., 400.) - 150.).abs() <= 1e-10);
        assert!((HueUnit::Gons.radians() * 100. - PI / 2.).abs() <= 1e-12);
    }

    #[test]
    fn test_normalize() {
        assert!((normalize(-30., 360.) - 330.).abs() <= 1e-10);
        assert!((normalize(725., 360.) - 5.).abs() <= 1e-10);
    }
}
