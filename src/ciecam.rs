//! The CIECAM02 color appearance model itself: the forward transform from a stimulus to the seven
//! appearance correlates, the reverse transform back, and the small formulas that relate the
//! correlates to each other. The model and every constant here follow CIE 159:2004.
//!
//! Stimuli are CIE XYZ with the luminance of a perfect diffuser at 1, while the white point of the
//! [`ViewingConditions`] is on the 0-100 scale. Stimuli are scaled by 100 internally.
//!
//! [`ViewingConditions`]: ../viewing/struct.ViewingConditions.html

use std::f64::consts::PI;

use consts::{apply, CAT02, CAT02_INV, CAT02_TO_HPE, HPE_TO_CAT02};
use correlate::{AppearanceVector, Correlate};
use error::ColorError;
use hue::normalize;
use viewing::ViewingConditions;

// hue quadrature data: unique hue angles and eccentricities, with red repeated at the end
const HUE_ANGLES: [f64; 5] = [20.14, 90.0, 164.25, 237.53, 380.14];
const ECCENTRICITIES: [f64; 5] = [0.8, 0.7, 1.0, 1.2, 0.8];

/// The nonlinear response compression of the cone fundamentals. The function is odd around the 0.1
/// offset: negative inputs compress as their magnitude does, mirrored.
pub(crate) fn compress(v: f64, f_l: f64) -> f64 {
    let n = (f_l * v.abs() / 100.0).powf(0.42);
    let scaled = 400.0 * n / (n + 27.13);
    if v >= 0.0 {
        scaled + 0.1
    } else {
        -scaled + 0.1
    }
}

/// The inverse of [`compress`].
pub(crate) fn decompress(v: f64, f_l: f64) -> f64 {
    let n = v - 0.1;
    if n == 0.0 {
        return 0.0;
    }
    let k = n.abs();
    n.signum() * (100.0 / f_l) * (27.13 * k / (400.0 - k)).powf(1.0 / 0.42)
}

/// Takes a stimulus through chromatic adaptation and into the compressed cone responses R'_a, G'_a
/// and B'_a.
fn adapted_responses(stimulus: [f64; 3], vc: &ViewingConditions) -> [f64; 3] {
    let xyz = [stimulus[0] * 100.0, stimulus[1] * 100.0, stimulus[2] * 100.0];
    let rgb = apply(&CAT02, xyz);
    let gains = vc.adaptation_gains();
    let rgb_c = [gains[0] * rgb[0], gains[1] * rgb[1], gains[2] * rgb[2]];
    let hpe = apply(&CAT02_TO_HPE, rgb_c);
    let f_l = vc.f_l();
    [compress(hpe[0], f_l), compress(hpe[1], f_l), compress(hpe[2], f_l)]
}

/// The inverse of [`adapted_responses`].
fn stimulus_from_responses(responses: [f64; 3], vc: &ViewingConditions) -> [f64; 3] {
    let f_l = vc.f_l();
    let hpe = [
        decompress(responses[0], f_l),
        decompress(responses[1], f_l),
        decompress(responses[2], f_l),
    ];
    let rgb_c = apply(&HPE_TO_CAT02, hpe);
    let gains = vc.adaptation_gains();
    let rgb = [rgb_c[0] / gains[0], rgb_c[1] / gains[1], rgb_c[2] / gains[2]];
    let xyz = apply(&CAT02_INV, rgb);
    [xyz[0] / 100.0, xyz[1] / 100.0, xyz[2] / 100.0]
}

fn achromatic_response(r: [f64; 3], vc: &ViewingConditions) -> f64 {
    (2.0 * r[0] + r[1] + r[2] / 20.0 - 0.305) * vc.n_bb()
}

fn opponent(r: [f64; 3]) -> (f64, f64) {
    (r[0] + (-12.0 * r[1] + r[2]) / 11.0, (r[0] + r[1] - 2.0 * r[2]) / 9.0)
}

// exponent of the lightness power law
fn cz(vc: &ViewingConditions) -> f64 {
    vc.surround().c() * vc.z()
}

fn lightness(a: f64, vc: &ViewingConditions) -> f64 {
    100.0 * (a / vc.a_w()).powf(cz(vc))
}

fn achromatic_from_lightness(j: f64, vc: &ViewingConditions) -> f64 {
    vc.a_w() * (j / 100.0).powf(1.0 / cz(vc))
}

// (1.64 - 0.29^n)^0.73, the background dependence of chroma
fn chroma_induction(vc: &ViewingConditions) -> f64 {
    (1.64 - 0.29f64.powf(vc.n())).powf(0.73)
}

/// The hue angle in degrees, in [0, 360), of opponent coordinates a and b.
pub fn hue_angle(a: f64, b: f64) -> f64 {
    let h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// The eccentricity factor e_t for a hue angle, including the N_c and N_cb scaling.
pub fn eccentricity(h: f64, vc: &ViewingConditions) -> f64 {
    (12500.0 / 13.0) * vc.surround().n_c() * vc.n_cb() * ((h.to_radians() + 2.0).cos() + 3.8)
}

/// Brightness Q from lightness J.
pub fn brightness(j: f64, vc: &ViewingConditions) -> f64 {
    (4.0 / vc.surround().c()) * (j / 100.0).sqrt() * (vc.a_w() + 4.0) * vc.f_l().powf(0.25)
}

/// Lightness J from brightness Q.
pub fn lightness_from_brightness(q: f64, vc: &ViewingConditions) -> f64 {
    6.25 * (vc.surround().c() * q / ((vc.a_w() + 4.0) * vc.f_l().powf(0.25))).powi(2)
}

/// Colorfulness M from chroma C.
pub fn colorfulness(c: f64, vc: &ViewingConditions) -> f64 {
    c * vc.f_l().powf(0.25)
}

/// Chroma C from colorfulness M.
pub fn chroma_from_colorfulness(m: f64, vc: &ViewingConditions) -> f64 {
    m / vc.f_l().powf(0.25)
}

/// Chroma C from saturation s and brightness Q.
pub fn chroma_from_saturation(s: f64, q: f64, vc: &ViewingConditions) -> f64 {
    (s / 100.0).powi(2) * q / vc.f_l().powf(0.25)
}

/// Saturation s from colorfulness M and brightness Q.
pub fn saturation(m: f64, q: f64) -> f64 {
    100.0 * (m / q).sqrt()
}

/// Hue composition H, from 0 to 400, for a hue angle h. Angles outside [0, 360) are wrapped.
/// # Example
/// ```
/// # use percept::ciecam::hue_composition;
/// // the unique hues land on multiples of 100
/// assert!((hue_composition(90.) - 100.).abs() <= 1e-10);
/// assert!((hue_composition(237.53) - 300.).abs() <= 1e-10);
/// ```
pub fn hue_composition(h: f64) -> f64 {
    let h = normalize(h, 360.0);
    // hues below unique red wrap around to the last quadrant
    let h_p = if h < HUE_ANGLES[0] { h + 360.0 } else { h };
    let mut i = 0;
    while i < 3 && h_p >= HUE_ANGLES[i + 1] {
        i += 1;
    }
    let near = (h_p - HUE_ANGLES[i]) / ECCENTRICITIES[i];
    let far = (HUE_ANGLES[i + 1] - h_p) / ECCENTRICITIES[i + 1];
    100.0 * i as f64 + 100.0 * near / (near + far)
}

/// The inverse of [`hue_composition`]: the hue angle h for a hue composition H. Compositions
/// outside [0, 400) are wrapped.
pub fn hue_angle_from_composition(big_h: f64) -> f64 {
    let big_h = normalize(big_h, 400.0);
    let i = ((big_h / 100.0).floor().max(0.0) as usize).min(3);
    let p = big_h - 100.0 * i as f64;
    let (e1, e2) = (ECCENTRICITIES[i], ECCENTRICITIES[i + 1]);
    let (h1, h2) = (HUE_ANGLES[i], HUE_ANGLES[i + 1]);
    let h = (p * (e2 * h1 - e1 * h2) - 100.0 * h1 * e2) / (p * (e2 - e1) - 100.0 * e2);
    if h > 360.0 {
        h - 360.0
    } else {
        h
    }
}

/// Runs the forward model, producing all seven correlates of a stimulus under the given viewing
/// conditions. Slots whose value comes out non-finite (the hue of a perfectly black stimulus under
/// some conditions, for instance) are left unset.
/// # Example
/// The CIE 159:2004 worked example.
///
/// ```
/// # use percept::prelude::*;
/// # use percept::ciecam::forward;
/// let vc = ViewingConditions::new([98.88, 90., 32.03], 200., 18., Surround::Average).unwrap();
/// let correlates = forward([0.1931, 0.2393, 0.1014], &vc);
/// let j = correlates.get(Correlate::Lightness).unwrap();
/// let h = correlates.get(Correlate::HueAngle).unwrap();
/// assert!((j - 48.0314).abs() <= 5e-5);
/// assert!((h - 191.0452).abs() <= 5e-5);
/// ```
pub fn forward(stimulus: [f64; 3], vc: &ViewingConditions) -> AppearanceVector {
    let r = adapted_responses(stimulus, vc);

    let j = lightness(achromatic_response(r, vc), vc);
    let q = brightness(j, vc);

    let (a, b) = opponent(r);
    let h = hue_angle(a, b);
    let big_h = hue_composition(h);

    let e = eccentricity(h, vc);
    let t = e * a.hypot(b) / (r[0] + r[1] + 1.05 * r[2]);
    let c = t.signum() * t.abs().powf(0.9) * (j / 100.0).sqrt() * chroma_induction(vc);
    let m = colorfulness(c, vc);
    let s = saturation(m, q);

    AppearanceVector::from_correlates([j, q, c, m, s, big_h, h])
}

/// Runs the reverse model, turning correlates back into a stimulus. The vector may be partial: any
/// lightness, chroma and hue correlates that reconfiguration can bridge to J, C and h are enough.
/// # Errors
/// Returns `ColorError::IncompleteConfiguration` if J, C or h cannot be derived.
pub fn reverse(vector: &AppearanceVector, vc: &ViewingConditions) -> Result<[f64; 3], ColorError> {
    let full = vector.completed(vc);
    let needed = [Correlate::Lightness, Correlate::Chroma, Correlate::HueAngle];
    match (
        full.get(needed[0]),
        full.get(needed[1]),
        full.get(needed[2]),
    ) {
        (Some(j), Some(c), Some(h)) => Ok(reverse_jch(j, c, h, vc)),
        _ => Err(ColorError::IncompleteConfiguration {
            missing: full.missing(&needed),
        }),
    }
}

/// The reverse model from lightness, chroma and hue angle.
pub fn reverse_jch(j: f64, c: f64, h: f64, vc: &ViewingConditions) -> [f64; 3] {
    let induction = (j / 100.0).sqrt() * chroma_induction(vc);
    // achromatic colors would otherwise take 0^(1/0.9) below
    let t = if induction == 0.0 {
        0.0
    } else {
        (c / induction).powf(1.0 / 0.9)
    };
    let p2 = achromatic_from_lightness(j, vc) / vc.n_bb() + 0.305;
    let (a, b) = if t == 0.0 {
        (0.0, 0.0)
    } else {
        opponent_from_hue(h, eccentricity(h, vc) / t, p2)
    };
    stimulus_from_responses(responses_from_opponent(a, b, p2), vc)
}

// Solves for a and b given the hue, p1 = e/t and p2. Whichever of sin h and cos h is larger in
// magnitude is used as the pivot, so the division never blows up near the axes.
fn opponent_from_hue(h: f64, p1: f64, p2: f64) -> (f64, f64) {
    let p3 = 1.05;
    let (sin, cos) = (h * PI / 180.0).sin_cos();
    let scale = p2 * (2.0 + p3) * (460.0 / 1403.0);
    if sin.abs() >= cos.abs() {
        let ratio = cos / sin;
        let p4 = p1 / sin;
        let b = scale
            / (p4 + (2.0 + p3) * (220.0 / 1403.0) * ratio - 27.0 / 1403.0
                + p3 * (6300.0 / 1403.0));
        (b * ratio, b)
    } else {
        let ratio = sin / cos;
        let p5 = p1 / cos;
        let a = scale
            / (p5 + (2.0 + p3) * (220.0 / 1403.0)
                - (27.0 / 1403.0 - p3 * (6300.0 / 1403.0)) * ratio);
        (a, a * ratio)
    }
}

fn responses_from_opponent(a: f64, b: f64, p2: f64) -> [f64; 3] {
    [
        (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0,
        (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0,
        (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0,
    ]
}

/// The model's own opponent space: lightness J with the raw red-green and yellow-blue opponent
/// values a and b, before any chroma scaling.
pub fn to_opponent(stimulus: [f64; 3], vc: &ViewingConditions) -> [f64; 3] {
    let r = adapted_responses(stimulus, vc);
    let (a, b) = opponent(r);
    [lightness(achromatic_response(r, vc), vc), a, b]
}

/// The inverse of [`to_opponent`].
pub fn from_opponent(jab: [f64; 3], vc: &ViewingConditions) -> [f64; 3] {
    let p2 = achromatic_from_lightness(jab[0], vc) / vc.n_bb() + 0.305;
    stimulus_from_responses(responses_from_opponent(jab[1], jab[2], p2), vc)
}
