//! Blending appearance colors. Mixing, in this context, is moving along the straight line between two
//! colors in their own space: if A blended with B at weight 0 gives A, and at weight 1 gives B, and
//! colors in between should look in between.
//!
//! Note that this differs depending on the space being used. A polar color blends its lightness
//! and chroma linearly and its hue the short way around the circle, while the same colors in
//! Cartesian form blend through the gray axis if they are opposite each other. For this reason two
//! colors can only be blended if they share a space: otherwise `a.blend(b)` and `b.blend(a)` could
//! disagree, which is error-prone and unintuitive.
//!
//! Especially note that blending as one thinks of with paints will not agree with this, because
//! pigments mix subtractively.

use appearance::{AppearanceColor, Form};
use coord::Coord;
use error::ColorError;
use hue::{hue_difference_mod, normalize};

/// Describes a color that can be blended with other colors of its own space.
pub trait Mix: Sized {
    /// Moves from `self` towards `other` by `weight`: 0 gives `self` and 1 gives `other`. Weights
    /// outside that range are clamped to it.
    /// # Errors
    /// Fails if the colors cannot be blended, such as when they are in different spaces.
    fn blend(&self, other: &Self, weight: f64) -> Result<Self, ColorError>;

    /// The midpoint of two colors.
    fn mix(&self, other: &Self) -> Result<Self, ColorError> {
        self.blend(other, 0.5)
    }
}

impl Mix for AppearanceColor {
    /// Polar colors interpolate hue along the shorter arc; Cartesian colors interpolate each
    /// component. Alpha is blended the same way in both.
    /// # Example
    /// ```
    /// # use percept::prelude::*;
    /// let a = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [40., 30., 350.], 1.);
    /// let b = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [60., 10., 30.], 0.5);
    /// let mid = a.mix(&b).unwrap();
    /// let [j, c, h] = mid.components();
    /// assert!((j - 50.).abs() <= 1e-9);
    /// assert!((c - 20.).abs() <= 1e-9);
    /// assert!((h - 10.).abs() <= 1e-9);
    /// assert!((mid.alpha() - 0.75).abs() <= 1e-9);
    /// ```
    fn blend(&self, other: &AppearanceColor, weight: f64) -> Result<AppearanceColor, ColorError> {
        if self.space() != other.space() {
            return Err(ColorError::MismatchedConfiguration);
        }
        if weight <= 0.0 {
            return Ok(self.clone());
        }
        if weight >= 1.0 {
            return Ok(other.clone());
        }
        let a = self.coord();
        let b = other.coord();
        let mut blended = a.lerp(&b, weight);
        if self.space().form == Form::Polar {
            let modulus = self.configuration().hue_unit().modulus();
            blended.z = normalize(a.z + hue_difference_mod(a.z, b.z, modulus) * weight, modulus);
        }
        let alpha = self.alpha() + (other.alpha() - self.alpha()) * weight;
        Ok(AppearanceColor::new(
            self.space().clone(),
            blended.to_array(),
            alpha,
        ))
    }
}

/// The weighted mean of some colors in a shared space, taken in Cartesian form and returned in the
/// form of the first color. Without weights every color counts equally.
/// # Errors
/// Returns `ColorError::ComponentCountMismatch` if there are no colors or the number of weights
/// differs from the number of colors, and `ColorError::MismatchedConfiguration` if the colors are
/// in different spaces.
/// # Example
/// ```
/// # use percept::prelude::*;
/// # use percept::mix::average;
/// let space = DEFAULT_JMH_LAB_SPACE.clone();
/// let colors = [
///     AppearanceColor::new(space.clone(), [20., 10., 0.], 1.),
///     AppearanceColor::new(space.clone(), [60., -10., 4.], 1.),
/// ];
/// let avg = average(&colors, Some(&[3., 1.])).unwrap();
/// assert_eq!(avg.components(), [30., 5., 1.]);
/// ```
pub fn average(
    colors: &[AppearanceColor],
    weights: Option<&[f64]>,
) -> Result<AppearanceColor, ColorError> {
    let first = match colors.first() {
        Some(first) => first,
        None => {
            return Err(ColorError::ComponentCountMismatch {
                expected: 1,
                found: 0,
            })
        }
    };
    let equal = vec![1.0; colors.len()];
    let weights = weights.unwrap_or(&equal[..]);
    if weights.len() != colors.len() {
        return Err(ColorError::ComponentCountMismatch {
            expected: colors.len(),
            found: weights.len(),
        });
    }
    if colors.iter().any(|c| c.space() != first.space()) {
        return Err(ColorError::MismatchedConfiguration);
    }
    let points: Vec<Coord> = colors
        .iter()
        .map(|c| Coord::from(c.cartesian_components()))
        .collect();
    let mean = Coord::weighted_average(&points, weights);
    let total: f64 = weights.iter().sum();
    let alpha = colors
        .iter()
        .zip(weights.iter())
        .map(|(c, w)| c.alpha() * w)
        .sum::<f64>()
        / total;
    let cartesian = AppearanceColor::new(first.space().with_form(Form::Cartesian), mean.to_array(), alpha);
    Ok(match first.space().form {
        Form::Cartesian => cartesian,
        Form::Polar => cartesian.to_polar(),
    })
}
