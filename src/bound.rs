//! This module describes the Bound trait, which allows for a description of what colors a gamut
//! supports, and the binary search that finds where a gamut ends. For example, the sRGB gamut only
//! supports linear RGB values from 0 to 1, which is a small part of what appearance spaces can
//! describe: most high-chroma appearance colors cannot be shown on a typical monitor.

use appearance::AppearanceColor;
use color::xyz_to_linear_srgb;
use distance::ucs;
use error::ColorError;

/// The recursion limit [`find_boundary`] uses.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Decides whether a color belongs to some set, usually a display gamut. Any closure taking an
/// appearance color and returning a `bool` is a `Bound`.
/// # Example
/// ```
/// # use percept::prelude::*;
/// let dark = |c: &AppearanceColor| c.components()[0] < 50.;
/// let color = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [20., 10., 0.], 1.);
/// assert!(dark.contains(&color));
/// ```
pub trait Bound {
    /// Returns `true` if the color is inside.
    fn contains(&self, color: &AppearanceColor) -> bool;
}

impl<F: Fn(&AppearanceColor) -> bool> Bound for F {
    fn contains(&self, color: &AppearanceColor) -> bool {
        self(color)
    }
}

/// The sRGB display gamut: a color is inside if its stimulus maps to linear sRGB components
/// between 0 and 1, give or take `tolerance`. Colors that cannot be inverted at all are outside.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SrgbGamut {
    /// How far outside [0, 1] a component may go and still count as inside.
    pub tolerance: f64,
}

impl Default for SrgbGamut {
    fn default() -> SrgbGamut {
        SrgbGamut { tolerance: 0.0 }
    }
}

impl Bound for SrgbGamut {
    fn contains(&self, color: &AppearanceColor) -> bool {
        match color.to_stimulus() {
            Ok(xyz) => xyz_to_linear_srgb(xyz)
                .iter()
                .all(|&c| c >= -self.tolerance && c <= 1.0 + self.tolerance),
            Err(_) => false,
        }
    }
}

/// Finds how far one component of a color can go before leaving a bound. The component `channel`
/// (0, 1 or 2, in the color's own order) is bisected between `lower`, where the color must be
/// inside, and `upper`, where it may be outside. The search stops once the best color found so far
/// is within `epsilon` of the nearest value known to fail, measured in CAM02-UCS, and returns that
/// best color: it is always inside the bound, and the boundary is within `epsilon` of it.
/// # Errors
/// Returns `ColorError::ComponentCountMismatch` for a channel past 2, and propagates failures to
/// measure distance.
/// # Example
/// ```
/// # use percept::prelude::*;
/// # use percept::bound::{find_boundary, SrgbGamut};
/// let green = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [50., 0., 120.], 1.);
/// let vivid = find_boundary(&green, 1, 0., 150., 0.01, &SrgbGamut::default()).unwrap();
/// assert!(vivid.components()[1] > 50.);
/// assert!(!SrgbGamut::default().contains(&vivid.with_component(1, vivid.components()[1] + 0.5).unwrap()));
/// ```
pub fn find_boundary<B: Bound + ?Sized>(
    color: &AppearanceColor,
    channel: usize,
    lower: f64,
    upper: f64,
    epsilon: f64,
    bound: &B,
) -> Result<AppearanceColor, ColorError> {
    find_boundary_with_depth(color, channel, lower, upper, epsilon, bound, DEFAULT_MAX_DEPTH)
}

/// [`find_boundary`] with an explicit limit on the number of bisections. When the limit is
/// reached the best color so far is returned.
pub fn find_boundary_with_depth<B: Bound + ?Sized>(
    color: &AppearanceColor,
    channel: usize,
    lower: f64,
    upper: f64,
    epsilon: f64,
    bound: &B,
    max_depth: u32,
) -> Result<AppearanceColor, ColorError> {
    let inside = color.with_component(channel, lower)?;
    bisect(&inside, channel, lower, upper, epsilon, bound, max_depth)
}

fn bisect<B: Bound + ?Sized>(
    best: &AppearanceColor,
    channel: usize,
    lower: f64,
    upper: f64,
    epsilon: f64,
    bound: &B,
    depth: u32,
) -> Result<AppearanceColor, ColorError> {
    let outside = best.with_component(channel, upper)?;
    let gap = ucs(best, &outside)?;
    trace!(channel, lower, upper, gap, depth, "boundary search");
    if depth == 0 || gap <= epsilon {
        return Ok(best.clone());
    }
    let middle = (lower + upper) / 2.0;
    let probe = best.with_component(channel, middle)?;
    if bound.contains(&probe) {
        bisect(&probe, channel, middle, upper, epsilon, bound, depth - 1)
    } else {
        bisect(best, channel, lower, middle, epsilon, bound, depth - 1)
    }
}
