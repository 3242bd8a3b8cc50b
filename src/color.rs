//! This file defines [`Color`], the tagged union of every kind of color Percept works with: plain
//! CIE XYZ stimuli, linear-light sRGB values, and appearance colors. Each variant carries what it
//! needs to be interpreted, and [`convert`] moves between them by matching on the tags. Linear sRGB
//! here uses the D65 primaries with white at (1, 1, 1) and XYZ with Y = 1 for white, so an sRGB
//! color converts to a stimulus the appearance model can take directly.

use std::fmt;

use appearance::{AppearanceColor, AppearanceSpace};
use consts::{apply, STANDARD_RGB_TRANSFORM, STANDARD_RGB_TRANSFORM_INV};
use error::ColorError;

/// A description of where a color lives, without any particular color in it.
#[derive(Debug, Clone, PartialEq)]
pub enum Space {
    /// CIE 1931 XYZ, with Y = 1 for a perfect white diffuser.
    Xyz,
    /// sRGB primaries without the transfer function: values are proportional to light.
    LinearRgb,
    /// A CIECAM02 appearance space.
    Appearance(AppearanceSpace),
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Space::Xyz => write!(f, "CIE XYZ"),
            Space::LinearRgb => write!(f, "linear sRGB"),
            Space::Appearance(ref space) => write!(f, "{}", space),
        }
    }
}

/// A color in any of the spaces Percept understands, always with an alpha value.
/// # Example
/// ```
/// # use percept::prelude::*;
/// let red = Color::from_srgb(1., 0., 0.);
/// let jch = red.convert(&Space::Appearance(DEFAULT_JCH_SPACE.clone())).unwrap();
/// let back = jch.convert(&Space::LinearRgb).unwrap();
/// if let Color::LinearRgb { rgb, .. } = back {
///     assert!((rgb[0] - 1.).abs() <= 1e-9);
///     assert!(rgb[1].abs() <= 1e-9);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// A stimulus.
    Xyz {
        /// X, Y and Z, with Y = 1 for white.
        xyz: [f64; 3],
        /// Opacity.
        alpha: f64,
    },
    /// Linear-light sRGB.
    LinearRgb {
        /// Red, green and blue, 0 to 1 inside the gamut.
        rgb: [f64; 3],
        /// Opacity.
        alpha: f64,
    },
    /// An appearance color.
    Appearance(AppearanceColor),
}

impl Color {
    /// An opaque color from gamma-encoded sRGB components between 0 and 1, as found in CSS and most
    /// image files.
    pub fn from_srgb(r: f64, g: f64, b: f64) -> Color {
        Color::LinearRgb {
            rgb: [srgb_decode(r), srgb_decode(g), srgb_decode(b)],
            alpha: 1.0,
        }
    }

    /// The space this color is in.
    pub fn space(&self) -> Space {
        match *self {
            Color::Xyz { .. } => Space::Xyz,
            Color::LinearRgb { .. } => Space::LinearRgb,
            Color::Appearance(ref color) => Space::Appearance(color.space().clone()),
        }
    }

    /// Opacity, 0 to 1.
    pub fn alpha(&self) -> f64 {
        match *self {
            Color::Xyz { alpha, .. } | Color::LinearRgb { alpha, .. } => alpha,
            Color::Appearance(ref color) => color.alpha(),
        }
    }

    /// The stimulus of this color.
    /// # Errors
    /// Fails only for appearance colors whose correlates cannot be inverted.
    pub fn to_xyz(&self) -> Result<[f64; 3], ColorError> {
        match *self {
            Color::Xyz { xyz, .. } => Ok(xyz),
            Color::LinearRgb { rgb, .. } => Ok(linear_srgb_to_xyz(rgb)),
            Color::Appearance(ref color) => color.to_stimulus(),
        }
    }

    /// Converts to another space. See [`convert`].
    pub fn convert(&self, target: &Space) -> Result<Color, ColorError> {
        convert(self, target)
    }

    /// The appearance color this is, if it is one.
    pub fn as_appearance(&self) -> Option<&AppearanceColor> {
        match *self {
            Color::Appearance(ref color) => Some(color),
            _ => None,
        }
    }
}

impl From<AppearanceColor> for Color {
    fn from(color: AppearanceColor) -> Color {
        Color::Appearance(color)
    }
}

/// Converts a color into another space, going through XYZ. Appearance colors converted into another
/// appearance space are re-derived from their stimulus, so the result is a full color-constancy
/// solve rather than the shortcut [`transpose`] takes.
/// # Errors
/// Propagates reverse-model failures of appearance colors.
pub fn convert(color: &Color, target: &Space) -> Result<Color, ColorError> {
    if color.space() == *target {
        return Ok(color.clone());
    }
    let xyz = color.to_xyz()?;
    let alpha = color.alpha();
    Ok(match *target {
        Space::Xyz => Color::Xyz { xyz, alpha },
        Space::LinearRgb => Color::LinearRgb {
            rgb: xyz_to_linear_srgb(xyz),
            alpha,
        },
        Space::Appearance(ref space) => {
            Color::Appearance(AppearanceColor::from_stimulus_alpha(xyz, alpha, space)?)
        }
    })
}

/// Reinterprets an appearance color under a target space's viewing conditions and configuration
/// without going back to a stimulus. See [`AppearanceColor::transpose`].
/// # Errors
/// Returns `ColorError::UnsupportedTarget` if the target is not an appearance space, and
/// `ColorError::IncompleteConfiguration` if reconfiguration fails.
///
/// [`AppearanceColor::transpose`]: ../appearance/struct.AppearanceColor.html#method.transpose
pub fn transpose(color: &AppearanceColor, target: &Space) -> Result<AppearanceColor, ColorError> {
    match *target {
        Space::Appearance(ref space) => color.transpose(space),
        ref other => Err(ColorError::UnsupportedTarget(other.to_string())),
    }
}

/// Linear sRGB from XYZ, with no clipping.
pub fn xyz_to_linear_srgb(xyz: [f64; 3]) -> [f64; 3] {
    apply(&STANDARD_RGB_TRANSFORM, xyz)
}

/// XYZ from linear sRGB.
pub fn linear_srgb_to_xyz(rgb: [f64; 3]) -> [f64; 3] {
    apply(&STANDARD_RGB_TRANSFORM_INV, rgb)
}

/// The sRGB transfer function: linear light to encoded value.
pub fn srgb_encode(c: f64) -> f64 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// The inverse sRGB transfer function: encoded value to linear light.
pub fn srgb_decode(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use appearance::DEFAULT_JCH_SPACE;
    use correlate::Correlate;

    #[test]
    fn test_srgb_white_is_d65() {
        let xyz = Color::from_srgb(1., 1., 1.).to_xyz().unwrap();
        assert!((xyz[0] - 0.95047).abs() <= 1e-4);
        assert!((xyz[1] - 1.).abs() <= 1e-6);
        assert!((xyz[2] - 1.08883).abs() <= 1e-4);
    }

    #[test]
    fn test_srgb_white_looks_white() {
        let target = Space::Appearance(DEFAULT_JCH_SPACE.clone());
        let white = Color::from_srgb(1., 1., 1.).convert(&target).unwrap();
        let jch = white.as_appearance().unwrap();
        assert!((jch.components()[0] - 100.).abs() <= 1e-4);
        // incomplete adaptation to D65 leaves some chroma
        assert!(jch.correlate(Correlate::Chroma).unwrap() <= 2.);
    }

    #[test]
    fn test_transfer_function() {
        for &c in [0., 0.002, 0.04045, 0.2, 0.5, 1.].iter() {
            assert!((srgb_encode(srgb_decode(c)) - c).abs() <= 1e-12);
        }
    }

    #[test]
    fn test_conversions_keep_alpha() {
        let xyz = Color::Xyz {
            xyz: [0.2, 0.3, 0.4],
            alpha: 0.25,
        };
        let target = Space::Appearance(DEFAULT_JCH_SPACE.clone());
        let jch = xyz.convert(&target).unwrap();
        assert_eq!(jch.alpha(), 0.25);
        let back = jch.convert(&Space::Xyz).unwrap();
        match back {
            Color::Xyz { xyz, alpha } => {
                assert_eq!(alpha, 0.25);
                assert!((xyz[0] - 0.2).abs() <= 1e-9);
                assert!((xyz[2] - 0.4).abs() <= 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_transpose_rejects_non_appearance_target() {
        let color = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [40., 20., 30.], 1.);
        match transpose(&color, &Space::LinearRgb) {
            Err(ColorError::UnsupportedTarget(name)) => assert_eq!(name, "linear sRGB"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(transpose(&color, &Space::Appearance(DEFAULT_JCH_SPACE.clone())).is_ok());
    }
}
