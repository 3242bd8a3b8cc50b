//! This module provides an enum of the illuminants Percept knows the white points of. Daylight values
//! are the tabulated ones from CIE 15; the fluorescent ones are derived from their published
//! chromaticity coordinates. Every white point is normalized so that the Y (luminance) value is 100,
//! which is the scale [`ViewingConditions`] expects.
//!
//! [`ViewingConditions`]: ../viewing/struct.ViewingConditions.html

/// A listing of supported CIE standard illuminants. D50 and D65 are the ones almost every display
/// standard refers to; E is the equal-energy illuminant, and F2, F7 and F11 are common fluorescent
/// office lights.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum Illuminant {
    /// Horizon daylight, the reference white of print and of ICC profile connection spaces.
    D50,
    /// Noon daylight, the reference white of sRGB and Adobe RGB.
    D65,
    /// The equal-energy illuminant.
    E,
    /// Cool white fluorescent.
    F2,
    /// Broadband daylight fluorescent.
    F7,
    /// Narrow tri-band fluorescent.
    F11,
    /// Represents a light of any given hue, as an array [X, Y, Z] in CIE 1931 space. The white
    /// point is rescaled so that Y is 100.
    Custom([f64; 3]),
}

/// An array of the named illuminants, in the same order as the enum definition.
pub static ILLUMINANTS: [Illuminant; 6] = [
    Illuminant::D50,
    Illuminant::D65,
    Illuminant::E,
    Illuminant::F2,
    Illuminant::F7,
    Illuminant::F11,
];

/// Chromaticities (x, y) of the fluorescent illuminants, for the 2° observer.
static FLUORESCENT_CHROMATICITIES: [(f64, f64); 3] =
    [(0.37208, 0.37529), (0.31292, 0.32933), (0.38052, 0.37713)];

/// Converts chromaticity coordinates (x, y) and a luminance Y into XYZ.
/// # Example
/// ```
/// # use percept::illuminants::xyy_to_xyz;
/// let xyz = xyy_to_xyz(0.3127, 0.3290, 100.);
/// assert!((xyz[0] - 95.046).abs() <= 1e-3);
/// assert!((xyz[2] - 108.906).abs() <= 1e-3);
/// ```
pub fn xyy_to_xyz(x: f64, y: f64, big_y: f64) -> [f64; 3] {
    [x * big_y / y, big_y, (1.0 - x - y) * big_y / y]
}

impl Illuminant {
    /// Gets the XYZ coordinates of the white point of the illuminant, scaled so Y is 100.
    pub fn white_point(&self) -> [f64; 3] {
        match *self {
            Illuminant::D50 => [96.422, 100.0, 82.521],
            Illuminant::D65 => [95.047, 100.0, 108.883],
            Illuminant::E => [100.0, 100.0, 100.0],
            Illuminant::F2 => fluorescent(0),
            Illuminant::F7 => fluorescent(1),
            Illuminant::F11 => fluorescent(2),
            Illuminant::Custom(xyz) => [xyz[0] * 100.0 / xyz[1], 100.0, xyz[2] * 100.0 / xyz[1]],
        }
    }

    /// A white point between two illuminants: `weight` 0 gives `self`, 1 gives `other`. Useful for
    /// rooms lit by a mix of daylight and artificial light.
    /// # Example
    /// ```
    /// # use percept::illuminants::Illuminant;
    /// let office = Illuminant::D65.mixed(Illuminant::F2, 0.5);
    /// let wp = office.white_point();
    /// assert!((wp[1] - 100.).abs() <= 1e-10);
    /// assert!(wp[0] > 95.047 && wp[0] < Illuminant::F2.white_point()[0]);
    /// ```
    pub fn mixed(&self, other: Illuminant, weight: f64) -> Illuminant {
        let a = self.white_point();
        let b = other.white_point();
        Illuminant::Custom([
            a[0] + (b[0] - a[0]) * weight,
            100.0,
            a[2] + (b[2] - a[2]) * weight,
        ])
    }
}

fn fluorescent(i: usize) -> [f64; 3] {
    let (x, y) = FLUORESCENT_CHROMATICITIES[i];
    xyy_to_xyz(x, y, 100.0)
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_white_points_normalized() {
        for illuminant in ILLUMINANTS.iter() {
            let wp = illuminant.white_point();
            assert!((wp[1] - 100.).abs() <= 1e-10);
            assert!(wp[0] > 0. && wp[2] > 0.);
        }
    }

    #[test]
    fn test_custom_rescaled() {
        let wp = Illuminant::Custom([0.9642, 1.0, 0.8252]).white_point();
        assert!((wp[0] - 96.42).abs() <= 1e-10);
        assert!((wp[2] - 82.52).abs() <= 1e-10);
    }

    #[test]
    fn test_f2_from_chromaticity() {
        let wp = Illuminant::F2.white_point();
        assert!((wp[0] - 99.145).abs() <= 1e-2);
        assert!((wp[2] - 67.316).abs() <= 1e-2);
    }
}
