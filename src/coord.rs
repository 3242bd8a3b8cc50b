//! This module contains a struct, [`Coord`](coord::Coord), that models a point in a 3D appearance
//! space and supports the limited math colors need: componentwise addition and subtraction,
//! scaling, interpolation and weighted distances. Appearance colors store their three components as
//! a `Coord` so that blending and distance code is written once for every configuration.

use std::f64;
use std::ops::{Add, Div, Mul, Sub};

use num;
use num::{Num, NumCast};

/// Represents a scalar value that can be easily converted, described using the common numeric traits
/// in [`num`]. Anything that falls under this category can be multiplied by a [`Coord`] to scale
/// it.
pub trait Scalar: NumCast + Num {}

impl<T: NumCast + Num> Scalar for T {}

fn to_f64<U: Scalar>(s: U) -> f64 {
    num::cast(s).unwrap_or(f64::NAN)
}

/// A point in 3D space. In Percept the axes follow the component order of the color's
/// configuration: for a JCh color `x` is lightness, `y` chroma and `z` hue, and for its Cartesian
/// form `y` and `z` are the a and b opponent axes.
///
/// # Example
/// ```
/// # use percept::coord::Coord;
/// let point_1 = Coord{x: 1., y: 8., z: 7.};
/// let point_2 = Coord{x: 7., y: 2., z: 3.};
/// let sum = point_1 + point_2;  // (8, 10, 10)
/// let diff = point_1 - point_2;  // (-6, 6, 4)
/// // scalars only go on the right
/// let prod = point_1 * 2u8; // (2, 16, 14)
/// let quot = point_1 / 2.; // (0.5, 4, 3.5)
/// assert_eq!(sum, Coord{x: 8., y: 10., z: 10.});
/// assert_eq!(prod - diff, Coord{x: 8., y: 10., z: 10.});
/// assert_eq!(quot.z, 3.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coord {
    /// The first axis.
    pub x: f64,
    /// The second axis.
    pub y: f64,
    /// The third axis.
    pub z: f64,
}

impl Add for Coord {
    type Output = Coord;
    fn add(self, rhs: Coord) -> Coord {
        Coord {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Coord {
    type Output = Coord;
    fn sub(self, rhs: Coord) -> Coord {
        Coord {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl<U: Scalar> Mul<U> for Coord {
    type Output = Coord;
    fn mul(self, rhs: U) -> Coord {
        let r = to_f64(rhs);
        Coord {
            x: self.x * r,
            y: self.y * r,
            z: self.z * r,
        }
    }
}

// dividing by zero gives infinities, the same as for plain floats
impl<U: Scalar> Div<U> for Coord {
    type Output = Coord;
    fn div(self, rhs: U) -> Coord {
        let r = to_f64(rhs);
        Coord {
            x: self.x / r,
            y: self.y / r,
            z: self.z / r,
        }
    }
}

impl From<[f64; 3]> for Coord {
    fn from(arr: [f64; 3]) -> Coord {
        Coord {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl From<Coord> for [f64; 3] {
    fn from(c: Coord) -> [f64; 3] {
        [c.x, c.y, c.z]
    }
}

impl Coord {
    /// The components as an array, in axis order.
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Linear interpolation: `weight` 0 gives `self`, 1 gives `other`.
    /// # Example
    /// ```
    /// # use percept::coord::Coord;
    /// let point1 = Coord{x: 0.2, y: 0., z: 1.};
    /// let point2 = Coord{x: 1., y: 0.8, z: 1.};
    /// let mid = point1.lerp(&point2, 0.25);
    /// assert!((mid.x - 0.4).abs() <= 1e-10);
    /// assert!((mid.y - 0.2).abs() <= 1e-10);
    /// assert!((mid.z - 1.).abs() <= 1e-10);
    /// ```
    pub fn lerp(&self, other: &Coord, weight: f64) -> Coord {
        *self + (*other - *self) * weight
    }

    /// The Euclidean distance between two points. Only perceptually meaningful in a space built
    /// for it, such as CAM02-UCS.
    /// # Example
    /// ```
    /// # use percept::coord::Coord;
    /// let point1 = Coord{x: 0., y: 0., z: -1.};
    /// let point2 = Coord{x: 2., y: 3., z: 5.};
    /// assert!((point1.euclidean_distance(&point2) - 7.).abs() <= 1e-10);
    /// ```
    pub fn euclidean_distance(&self, other: &Coord) -> f64 {
        self.weighted_distance(other, [1.0; 3])
    }

    /// Euclidean distance with each axis difference scaled by a weight before squaring.
    pub fn weighted_distance(&self, other: &Coord, weights: [f64; 3]) -> f64 {
        let d = *self - *other;
        ((d.x * weights[0]).powi(2) + (d.y * weights[1]).powi(2) + (d.z * weights[2]).powi(2))
            .sqrt()
    }

    /// The weighted mean of some points. Weights are normalized to sum to 1, and a zero total weight
    /// gives NaN components.
    pub fn weighted_average(points: &[Coord], weights: &[f64]) -> Coord {
        let total: f64 = weights.iter().sum();
        points
            .iter()
            .zip(weights.iter())
            .fold(Coord::from([0.0; 3]), |acc, (p, w)| acc + *p * *w)
            / total
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_weighted_distance() {
        let a = Coord::from([1., 2., 3.]);
        let b = Coord::from([4., 6., 3.]);
        assert!((a.euclidean_distance(&b) - 5.).abs() <= 1e-12);
        assert!((a.weighted_distance(&b, [0., 0.5, 1.]) - 2.).abs() <= 1e-12);
    }

    #[test]
    fn test_weighted_average() {
        let points = [Coord::from([0., 0., 0.]), Coord::from([4., 8., -4.])];
        let avg = Coord::weighted_average(&points, &[3., 1.]);
        assert_eq!(avg.to_array(), [1., 2., -1.]);
        let arr: [f64; 3] = avg.into();
        assert_eq!(arr, [1., 2., -1.]);
    }
}
