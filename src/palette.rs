//! Helpers for building sets of colors: evenly blended gradients, and palettes whose members are
//! as easy to tell apart as possible. Distinctness is judged by CAM02-UCS distance, so every color
//! involved must share one appearance space.

use appearance::AppearanceColor;
use bound::Bound;
use distance::ucs;
use error::ColorError;
use mix::Mix;

/// `steps` colors evenly spaced from `start` to `end`, both included, blended in their shared
/// space. One step gives just `start`.
/// # Errors
/// Returns `ColorError::MismatchedConfiguration` if the colors are in different spaces.
/// # Example
/// ```
/// # use percept::prelude::*;
/// # use percept::palette::gradient;
/// let black = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [0., 0., 0.], 1.);
/// let white = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [100., 0., 0.], 1.);
/// let ramp = gradient(&black, &white, 5).unwrap();
/// assert_eq!(ramp.len(), 5);
/// assert_eq!(ramp[2].components()[0], 50.);
/// ```
pub fn gradient(
    start: &AppearanceColor,
    end: &AppearanceColor,
    steps: usize,
) -> Result<Vec<AppearanceColor>, ColorError> {
    if start.space() != end.space() {
        return Err(ColorError::MismatchedConfiguration);
    }
    match steps {
        0 => Ok(vec![]),
        1 => Ok(vec![start.clone()]),
        _ => (0..steps)
            .map(|i| start.blend(end, i as f64 / (steps - 1) as f64))
            .collect(),
    }
}

// smallest UCS distance from color to any of others, infinite if there are none
fn min_distance(color: &AppearanceColor, others: &[AppearanceColor]) -> Result<f64, ColorError> {
    let mut min = ::std::f64::INFINITY;
    for other in others {
        min = min.min(ucs(color, other)?);
    }
    Ok(min)
}

/// The candidate farthest from its nearest occupied color, or `None` if there are no candidates.
/// With nothing occupied the first candidate is returned. Ties go to the earlier candidate.
/// # Errors
/// Returns `ColorError::MismatchedConfiguration` if any two colors are in different spaces.
pub fn most_distinct(
    candidates: &[AppearanceColor],
    occupied: &[AppearanceColor],
) -> Result<Option<AppearanceColor>, ColorError> {
    let mut best: Option<(f64, &AppearanceColor)> = None;
    for candidate in candidates {
        let d = min_distance(candidate, occupied)?;
        let better = match best {
            Some((best_d, _)) => d > best_d,
            None => true,
        };
        if better {
            best = Some((d, candidate));
        }
    }
    Ok(best.map(|(_, c)| c.clone()))
}

/// Greedily picks up to `n` new palette colors from `candidates`, each the most distinct from the
/// occupied colors and the ones already picked. Fewer are returned if the candidates run out.
/// # Errors
/// Returns `ColorError::MismatchedConfiguration` if any two colors are in different spaces.
pub fn extend_palette(
    candidates: &[AppearanceColor],
    occupied: &[AppearanceColor],
    n: usize,
) -> Result<Vec<AppearanceColor>, ColorError> {
    let mut remaining = candidates.to_vec();
    let mut taken = occupied.to_vec();
    let mut picked = Vec::with_capacity(n);
    while picked.len() < n {
        let choice = match most_distinct(&remaining, &taken)? {
            Some(choice) => choice,
            None => break,
        };
        debug!(picked = picked.len(), color = ?choice.components(), "palette color");
        remaining.retain(|c| c != &choice);
        taken.push(choice.clone());
        picked.push(choice);
    }
    Ok(picked)
}

/// A regular grid of candidate colors in `template`'s space: `steps[i]` evenly spaced values of
/// component `i` from `min[i]` to `max[i]` inclusive, keeping only those inside `bound`. The alpha
/// of `template` is kept.
/// # Example
/// ```
/// # use percept::prelude::*;
/// # use percept::bound::SrgbGamut;
/// # use percept::palette::{candidate_grid, extend_palette};
/// let template = AppearanceColor::default();
/// let grid = candidate_grid(&template, [30., 0., 0.], [80., 60., 330.], [3, 4, 12], &SrgbGamut::default());
/// let palette = extend_palette(&grid, &[], 4).unwrap();
/// assert_eq!(palette.len(), 4);
/// ```
pub fn candidate_grid<B: Bound + ?Sized>(
    template: &AppearanceColor,
    min: [f64; 3],
    max: [f64; 3],
    steps: [usize; 3],
    bound: &B,
) -> Vec<AppearanceColor> {
    let axis = |i: usize| -> Vec<f64> {
        match steps[i] {
            0 => vec![],
            1 => vec![min[i]],
            n => (0..n)
                .map(|k| min[i] + (max[i] - min[i]) * k as f64 / (n - 1) as f64)
                .collect(),
        }
    };
    let (xs, ys, zs) = (axis(0), axis(1), axis(2));
    let mut grid = vec![];
    for &x in &xs {
        for &y in &ys {
            for &z in &zs {
                let color = AppearanceColor::new(template.space().clone(), [x, y, z], template.alpha());
                if bound.contains(&color) {
                    grid.push(color);
                }
            }
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use appearance::DEFAULT_JCH_SPACE;

    fn jch(j: f64, c: f64, h: f64) -> AppearanceColor {
        AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [j, c, h], 1.)
    }

    #[test]
    fn test_gradient() {
        let a = jch(20., 40., 300.);
        let b = jch(60., 0., 20.);
        assert!(gradient(&a, &b, 0).unwrap().is_empty());
        assert_eq!(gradient(&a, &b, 1).unwrap(), vec![a.clone()]);
        let ramp = gradient(&a, &b, 3).unwrap();
        assert_eq!(ramp[0], a);
        assert_eq!(ramp[2], b);
        let [j, c, h] = ramp[1].components();
        assert!((j - 40.).abs() <= 1e-9);
        assert!((c - 20.).abs() <= 1e-9);
        assert!((h - 340.).abs() <= 1e-9);
        assert!(gradient(&a, &b.to_cartesian(), 3).is_err());
    }

    #[test]
    fn test_most_distinct() {
        let occupied = [jch(50., 0., 0.)];
        let candidates = [jch(52., 0., 0.), jch(90., 0., 0.), jch(55., 5., 40.)];
        let best = most_distinct(&candidates, &occupied).unwrap().unwrap();
        assert_eq!(best, candidates[1]);
        assert_eq!(most_distinct(&[], &occupied).unwrap(), None);
        assert_eq!(most_distinct(&candidates, &[]).unwrap().unwrap(), candidates[0]);
    }

    #[test]
    fn test_extend_palette() {
        let occupied = [jch(50., 0., 0.)];
        let candidates = [jch(52., 0., 0.), jch(90., 0., 0.), jch(10., 0., 0.), jch(88., 0., 0.)];
        let picked = extend_palette(&candidates, &occupied, 2).unwrap();
        // the dark gray is farther from the occupied mid gray than the light one
        assert_eq!(picked, vec![candidates[2].clone(), candidates[1].clone()]);
        let all = extend_palette(&candidates, &occupied, 10).unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_candidate_grid() {
        let everything = |_: &AppearanceColor| true;
        let grid = candidate_grid(&jch(0., 0., 0.), [0., 0., 0.], [100., 50., 300.], [3, 2, 1], &everything);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[5].components(), [100., 50., 0.]);
        let light = |c: &AppearanceColor| c.components()[0] > 60.;
        let grid = candidate_grid(&jch(0., 0., 0.), [0., 0., 0.], [100., 50., 300.], [3, 2, 1], &light);
        assert_eq!(grid.len(), 2);
    }
}
