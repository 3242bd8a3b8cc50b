//! Perceptual distance between appearance colors. Distances only make sense between colors tagged
//! with the same viewing conditions and configuration, so every function here checks the tags first
//! and returns `ColorError::MismatchedConfiguration` otherwise.
//!
//! For general use, [`ucs`] is the one to reach for: CAM02-UCS (Luo, Cui and Li, 2006) rescales
//! lightness and colorfulness so that Euclidean distance tracks perceived difference, with a
//! distance of about 1 being just noticeable.

use appearance::{AppearanceColor, AppearanceSpace, Form};
use coord::Coord;
use correlate::Correlate;
use error::ColorError;
use hue::hue_distance_mod;

fn check_tags(a: &AppearanceColor, b: &AppearanceColor) -> Result<(), ColorError> {
    if a.space() == b.space() {
        Ok(())
    } else {
        Err(ColorError::MismatchedConfiguration)
    }
}

// weights scaled so the largest is 1
fn normalize_weights(weights: [f64; 3], fallback: f64) -> [f64; 3] {
    let max = weights.iter().cloned().fold(::std::f64::NEG_INFINITY, f64::max);
    if max > 0.0 {
        [weights[0] / max, weights[1] / max, weights[2] / max]
    } else {
        [fallback; 3]
    }
}

/// Euclidean distance between the Cartesian forms of two colors. Polar colors are projected onto
/// their hue axes first.
/// # Errors
/// Returns `ColorError::MismatchedConfiguration` if the colors are tagged differently.
pub fn euclidean(a: &AppearanceColor, b: &AppearanceColor) -> Result<f64, ColorError> {
    weighted_euclidean(a, b, [1.0; 3])
}

/// Like [`euclidean`], with each component difference weighted. Weights are normalized so the
/// largest is 1; if none is positive, every color is at distance 0.
pub fn weighted_euclidean(
    a: &AppearanceColor,
    b: &AppearanceColor,
    weights: [f64; 3],
) -> Result<f64, ColorError> {
    check_tags(a, b)?;
    let p1 = Coord::from(a.cartesian_components());
    let p2 = Coord::from(b.cartesian_components());
    Ok(p1.weighted_distance(&p2, normalize_weights(weights, 0.0)))
}

/// A weighted distance directly on polar components. Each weight is normalized by the largest
/// weight (all 1 if none is positive) and divided by the nominal maximum of its correlate, so the
/// terms are comparable; the hue term uses the shorter way around the circle.
/// # Errors
/// Returns `ColorError::MismatchedConfiguration` if the colors are tagged differently.
pub fn polar(a: &AppearanceColor, b: &AppearanceColor, weights: [f64; 3]) -> Result<f64, ColorError> {
    check_tags(a, b)?;
    let config = a.configuration();
    let correlates = config.correlates();
    let w = normalize_weights(weights, 1.0);
    let p1 = a.polar_components();
    let p2 = b.polar_components();
    let modulus = config.hue_unit().modulus();
    let diffs = [
        p1[0] - p2[0],
        p1[1] - p2[1],
        hue_distance_mod(p1[2], p2[2], modulus),
    ];
    let mut total = 0.0;
    for i in 0..3 {
        total += (diffs[i] * w[i] / correlates[i].max_value()).powi(2);
    }
    Ok(total.sqrt())
}

/// The CAM02-UCS coordinates (J', a', b') of a color, from its lightness, colorfulness and hue angle.
/// # Errors
/// Returns `ColorError::IncompleteConfiguration` if those correlates cannot be derived.
pub fn ucs_coordinates(color: &AppearanceColor) -> Result<Coord, ColorError> {
    let wanted = [
        Correlate::Lightness,
        Correlate::Colorfulness,
        Correlate::HueAngle,
    ];
    let vector = color
        .configuration()
        .expand(color.polar_components())
        .completed(color.conditions());
    match (
        vector.get(wanted[0]),
        vector.get(wanted[1]),
        vector.get(wanted[2]),
    ) {
        (Some(j), Some(m), Some(h)) => {
            let j_p = (1.0 + 100.0 * 0.007) * j / (1.0 + 0.007 * j);
            let m_p = (1.0 + 0.0228 * m).ln() / 0.0228;
            let (sin, cos) = h.to_radians().sin_cos();
            Ok(Coord {
                x: j_p,
                y: m_p * cos,
                z: m_p * sin,
            })
        }
        _ => Err(ColorError::IncompleteConfiguration {
            missing: vector.missing(&wanted),
        }),
    }
}

/// CAM02-UCS distance between two colors.
/// # Errors
/// Returns `ColorError::MismatchedConfiguration` if the colors are tagged differently.
/// # Example
/// ```
/// # use percept::prelude::*;
/// # use percept::distance;
/// let a = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [50., 20., 30.], 1.);
/// let b = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [52., 20., 30.], 1.);
/// let d = distance::ucs(&a, &b).unwrap();
/// assert!(d > 1.5 && d < 2.);
/// assert!((d - distance::ucs(&b, &a).unwrap()).abs() <= 1e-12);
/// ```
pub fn ucs(a: &AppearanceColor, b: &AppearanceColor) -> Result<f64, ColorError> {
    weighted_ucs(a, b, 1.0, 1.0)
}

/// Like [`ucs`], weighting the lightness difference (J') and the colorfulness difference (a' and b'
/// together, so the distance does not depend on hue). Weights are normalized so the larger is 1;
/// if neither is positive, every color is at distance 0.
pub fn weighted_ucs(
    a: &AppearanceColor,
    b: &AppearanceColor,
    lightness_weight: f64,
    colorfulness_weight: f64,
) -> Result<f64, ColorError> {
    check_tags(a, b)?;
    let p1 = ucs_coordinates(a)?;
    let p2 = ucs_coordinates(b)?;
    let weights = normalize_weights(
        [lightness_weight, colorfulness_weight, colorfulness_weight],
        0.0,
    );
    Ok(p1.weighted_distance(&p2, weights))
}

/// The distance that fits the colors' form: [`euclidean`] for Cartesian colors, unweighted
/// [`polar`] otherwise.
pub fn distance(a: &AppearanceColor, b: &AppearanceColor) -> Result<f64, ColorError> {
    match a.space().form {
        Form::Cartesian => euclidean(a, b),
        Form::Polar => polar(a, b, [1.0; 3]),
    }
}

/// CAM02-UCS distance between any two colors, after converting both into `space`. This is the way
/// to compare colors that come from different spaces or viewing conditions.
/// # Errors
/// Propagates conversion failures.
pub fn perceptual_difference(
    a: &::color::Color,
    b: &::color::Color,
    space: &AppearanceSpace,
) -> Result<f64, ColorError> {
    let target = ::color::Space::Appearance(space.clone());
    let ca = a.convert(&target)?;
    let cb = b.convert(&target)?;
    match (ca.as_appearance(), cb.as_appearance()) {
        (Some(x), Some(y)) => ucs(x, y),
        _ => Err(ColorError::UnsupportedTarget(target.to_string())),
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use appearance::{DEFAULT_JCH_SPACE, DEFAULT_JMH_LAB_SPACE};
    use color::Color;
    use correlate::CorrelateConfiguration;

    fn jch(j: f64, c: f64, h: f64) -> AppearanceColor {
        AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [j, c, h], 1.)
    }

    #[test]
    fn test_metric_properties() {
        let colors = [jch(50., 20., 30.), jch(80., 5., 350.), jch(20., 60., 250.), jch(50., 20., 31.)];
        for a in colors.iter() {
            assert!(ucs(a, a).unwrap().abs() <= 1e-12);
            assert!(euclidean(a, a).unwrap().abs() <= 1e-12);
            for b in colors.iter() {
                let d = ucs(a, b).unwrap();
                assert!((d - ucs(b, a).unwrap()).abs() <= 1e-12);
                for c in colors.iter() {
                    assert!(d <= ucs(a, c).unwrap() + ucs(c, b).unwrap() + 1e-9);
                }
            }
        }
        assert!(ucs(&colors[0], &colors[3]).unwrap() > 0.);
    }

    #[test]
    fn test_mismatched_tags() {
        let a = jch(50., 20., 30.);
        let b = a.to_cartesian();
        assert_eq!(ucs(&a, &b), Err(ColorError::MismatchedConfiguration));
        assert_eq!(polar(&a, &b, [1.; 3]), Err(ColorError::MismatchedConfiguration));
        let c = a.reconfigure(CorrelateConfiguration::JMh).unwrap();
        assert_eq!(euclidean(&a, &c), Err(ColorError::MismatchedConfiguration));
    }

    #[test]
    fn test_ucs_lightness_only() {
        // with no colorfulness the distance is the J' difference
        let d = ucs(&jch(40., 0., 0.), &jch(60., 0., 0.)).unwrap();
        let jp = |j: f64| 1.7 * j / (1. + 0.007 * j);
        assert!((d - (jp(60.) - jp(40.))).abs() <= 1e-9);
    }

    #[test]
    fn test_weights() {
        let a = jch(50., 20., 30.);
        let b = jch(60., 20., 30.);
        // weights are relative
        let d1 = weighted_ucs(&a, &b, 2., 2.).unwrap();
        let d2 = ucs(&a, &b).unwrap();
        assert!((d1 - d2).abs() <= 1e-12);
        assert_eq!(weighted_ucs(&a, &b, 0., 0.).unwrap(), 0.);
        assert_eq!(weighted_euclidean(&a, &b, [-1., 0., 0.]).unwrap(), 0.);
        assert!(weighted_ucs(&a, &b, 0., 1.).unwrap() <= 1e-9);
        assert!((weighted_ucs(&a, &b, 1., 0.).unwrap() - d2).abs() <= 1e-9);
    }

    #[test]
    fn test_weighted_ucs_ignores_hue() {
        // the same colorfulness step counts the same at every hue
        let step = |h: f64, weights: (f64, f64)| {
            weighted_ucs(&jch(50., 20., h), &jch(50., 30., h), weights.0, weights.1).unwrap()
        };
        for &weights in [(1., 1.), (1., 0.5), (0.2, 1.)].iter() {
            let reference = step(0., weights);
            assert!(reference > 1.);
            for &h in [45., 90., 200., 310.].iter() {
                assert!((step(h, weights) - reference).abs() <= 1e-9);
            }
        }
        assert!(step(90., (1., 0.)) <= 1e-9);
    }

    #[test]
    fn test_polar_distance() {
        let a = jch(50., 20., 350.);
        let b = jch(50., 20., 10.);
        // 20 degrees of hue out of 360
        assert!((polar(&a, &b, [1.; 3]).unwrap() - 20. / 360.).abs() <= 1e-12);
        assert!((distance(&a, &b).unwrap() - 20. / 360.).abs() <= 1e-12);
        // non-positive weights fall back to equal weighting
        assert!((polar(&a, &b, [0.; 3]).unwrap() - 20. / 360.).abs() <= 1e-12);
        assert!(polar(&a, &b, [1., 1., 0.]).unwrap() <= 1e-12);
    }

    #[test]
    fn test_cartesian_distance() {
        let a = AppearanceColor::new(DEFAULT_JMH_LAB_SPACE.clone(), [50., 3., 4.], 1.);
        let b = AppearanceColor::new(DEFAULT_JMH_LAB_SPACE.clone(), [50., 0., 0.], 1.);
        assert!((euclidean(&a, &b).unwrap() - 5.).abs() <= 1e-12);
        assert!((distance(&a, &b).unwrap() - 5.).abs() <= 1e-12);
    }

    #[test]
    fn test_perceptual_difference_across_spaces() {
        let red = Color::from_srgb(1., 0., 0.);
        let orange = Color::from_srgb(1., 0.5, 0.);
        let d = perceptual_difference(&red, &orange, &DEFAULT_JMH_LAB_SPACE).unwrap();
        assert!(d > 10.);
        let same = perceptual_difference(&red, &red, &DEFAULT_JCH_SPACE).unwrap();
        assert!(same <= 1e-9);
    }
}
