//! This module describes the viewing environment the appearance model is evaluated in. The same
//! stimulus looks very different on a phone outdoors and on a monitor in a dark room: CIECAM02 takes
//! four inputs describing the surroundings and derives from them every constant the forward and
//! reverse transforms need. [`ViewingConditions`] computes those constants exactly once, at
//! construction, and is immutable afterwards.

use std::convert::TryFrom;
use std::fmt;

use consts::{apply, CAT02, CAT02_TO_HPE};
use ciecam::compress;
use error::ColorError;
use illuminants::Illuminant;

/// The qualitative surround of the viewing field, fixing the degree-of-adaptation factor F, the
/// impact of surround c and the chromatic induction factor N_c.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surround {
    /// Surface colors viewed under typical lighting: a print on a desk.
    Average,
    /// A television or monitor in a dimly lit room.
    Dim,
    /// Projection in a darkened room.
    Dark,
}

impl Surround {
    /// The maximum degree of adaptation, F.
    pub fn f(&self) -> f64 {
        match *self {
            Surround::Average => 1.0,
            Surround::Dim => 0.9,
            Surround::Dark => 0.8,
        }
    }
    /// The exponential nonlinearity, c.
    pub fn c(&self) -> f64 {
        match *self {
            Surround::Average => 0.69,
            Surround::Dim => 0.59,
            Surround::Dark => 0.525,
        }
    }
    /// The chromatic induction factor, N_c.
    pub fn n_c(&self) -> f64 {
        match *self {
            Surround::Average => 1.0,
            Surround::Dim => 0.95,
            Surround::Dark => 0.8,
        }
    }
}

/// How completely the observer is assumed to have adapted to the white point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Adaptation {
    /// The degree of adaptation D is derived from the adapting luminance and the surround, as CIE
    /// 159:2004 recommends.
    Partial,
    /// Complete adaptation, D = 1: the adopted white is always perfectly achromatic.
    Full,
}

impl Default for Adaptation {
    fn default() -> Adaptation {
        Adaptation::Partial
    }
}

/// The plain inputs of a [`ViewingConditions`], which is also the form it is serialized in.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewingParameters {
    /// The adopted white point, XYZ scaled so that a perfect diffuser has Y = 100.
    pub white: [f64; 3],
    /// The adapting luminance L_A, in cd/m².
    pub adapting_luminance: f64,
    /// The relative luminance of the background, Y_b, on the same scale as the white point.
    pub background_luminance: f64,
    /// The surround class.
    pub surround: Surround,
    /// The adaptation mode.
    #[serde(default)]
    pub adaptation: Adaptation,
}

/// A viewing environment, along with every constant CIECAM02 derives from it. Two
/// `ViewingConditions` are equal exactly when their inputs are equal.
/// # Example
/// The worked example from CIE 159:2004.
///
/// ```
/// # use percept::viewing::{Surround, ViewingConditions};
/// let vc = ViewingConditions::new([98.88, 90.0, 32.03], 200.0, 18.0, Surround::Average).unwrap();
/// assert!((vc.f_l() - 1.0).abs() <= 1e-3);
/// assert!((vc.z() - 1.9272).abs() <= 1e-4);
/// // luminances must be positive
/// assert!(ViewingConditions::new([98.88, 90.0, 32.03], 0.0, 18.0, Surround::Average).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ViewingParameters", into = "ViewingParameters")]
pub struct ViewingConditions {
    params: ViewingParameters,
    // everything below is derived from params
    d: f64,
    d_rgb: [f64; 3],
    f_l: f64,
    n: f64,
    z: f64,
    n_bb: f64,
    n_cb: f64,
    a_w: f64,
}

lazy_static! {
    /// D65, L_A = 64 cd/m², Y_b = 20, average surround.
    pub static ref DEFAULT_CONDITIONS: ViewingConditions =
        ViewingConditions::derive(params(Illuminant::D65, 64.0, 20.0, Surround::Average));
    /// The reference environment sRGB is encoded for: D50, 64 cd/m², a dim surround.
    pub static ref SRGB_ENCODING_CONDITIONS: ViewingConditions =
        ViewingConditions::derive(params(Illuminant::D50, 64.0, 64.0 / 5.0, Surround::Dim));
    /// A typical office environment for sRGB displays.
    pub static ref SRGB_TYPICAL_CONDITIONS: ViewingConditions =
        ViewingConditions::derive(params(Illuminant::D50, 200.0, 200.0 / 5.0, Surround::Average));
    /// The reference environment of Adobe RGB (1998).
    pub static ref ADOBE_RGB_CONDITIONS: ViewingConditions =
        ViewingConditions::derive(params(Illuminant::D65, 160.0, 160.0 / 5.0, Surround::Average));
}

fn params(illuminant: Illuminant, l_a: f64, y_b: f64, surround: Surround) -> ViewingParameters {
    ViewingParameters {
        white: illuminant.white_point(),
        adapting_luminance: l_a,
        background_luminance: y_b,
        surround,
        adaptation: Adaptation::Partial,
    }
}

impl ViewingConditions {
    /// Builds viewing conditions with partial adaptation from a white point (Y = 100 scale), the
    /// adapting luminance L_A and the background luminance Y_b.
    /// # Errors
    /// Returns `ColorError::InvalidViewingConditions` if either luminance is not a positive finite
    /// number or if the white point has a non-positive or non-finite component.
    pub fn new(
        white: [f64; 3],
        l_a: f64,
        y_b: f64,
        surround: Surround,
    ) -> Result<ViewingConditions, ColorError> {
        ViewingConditions::with_adaptation(white, l_a, y_b, surround, Adaptation::Partial)
    }

    /// Like [`new`](#method.new), but with an explicit adaptation mode.
    pub fn with_adaptation(
        white: [f64; 3],
        l_a: f64,
        y_b: f64,
        surround: Surround,
        adaptation: Adaptation,
    ) -> Result<ViewingConditions, ColorError> {
        ViewingConditions::try_from(ViewingParameters {
            white,
            adapting_luminance: l_a,
            background_luminance: y_b,
            surround,
            adaptation,
        })
    }

    /// Builds viewing conditions from a standard illuminant's white point.
    /// # Example
    /// ```
    /// # use percept::prelude::*;
    /// let office = ViewingConditions::from_illuminant(Illuminant::D50, 200., 40., Surround::Average);
    /// assert_eq!(office.unwrap(), *SRGB_TYPICAL_CONDITIONS);
    /// ```
    pub fn from_illuminant(
        illuminant: Illuminant,
        l_a: f64,
        y_b: f64,
        surround: Surround,
    ) -> Result<ViewingConditions, ColorError> {
        ViewingConditions::new(illuminant.white_point(), l_a, y_b, surround)
    }

    // Computes every derived constant. Inputs must already be validated.
    fn derive(params: ViewingParameters) -> ViewingConditions {
        let white = params.white;
        let l_a = params.adapting_luminance;
        let surround = params.surround;
        let rgb_w = apply(&CAT02, white);

        let d = match params.adaptation {
            Adaptation::Full => 1.0,
            Adaptation::Partial => {
                let raw = surround.f() * (1.0 - (1.0 / 3.6) * ((-l_a - 42.0) / 92.0).exp());
                raw.max(0.0).min(1.0)
            }
        };
        let mut d_rgb = [0.0; 3];
        for i in 0..3 {
            d_rgb[i] = d * white[1] / rgb_w[i] + 1.0 - d;
        }

        let l_a5 = 5.0 * l_a;
        let k4 = (1.0 / (l_a5 + 1.0)).powi(4);
        let f_l = 0.2 * k4 * l_a5 + 0.1 * (1.0 - k4).powi(2) * l_a5.cbrt();

        let n = params.background_luminance / white[1];
        let z = 1.48 + n.sqrt();
        let n_bb = 0.725 * (1.0 / n).powf(0.2);
        let n_cb = n_bb;

        // the white goes through the same chain as any stimulus
        let rgb_wc = [d_rgb[0] * rgb_w[0], d_rgb[1] * rgb_w[1], d_rgb[2] * rgb_w[2]];
        let hpe_w = apply(&CAT02_TO_HPE, rgb_wc);
        let aw = [
            compress(hpe_w[0], f_l),
            compress(hpe_w[1], f_l),
            compress(hpe_w[2], f_l),
        ];
        let a_w = (2.0 * aw[0] + aw[1] + aw[2] / 20.0 - 0.305) * n_bb;

        debug!(l_a, d, f_l, n, z, n_bb, a_w, "derived viewing conditions");
        ViewingConditions {
            params,
            d,
            d_rgb,
            f_l,
            n,
            z,
            n_bb,
            n_cb,
            a_w,
        }
    }

    /// The adopted white point, with Y = 100 for a perfect diffuser.
    pub fn white(&self) -> [f64; 3] {
        self.params.white
    }
    /// The adapting luminance L_A.
    pub fn adapting_luminance(&self) -> f64 {
        self.params.adapting_luminance
    }
    /// The background luminance Y_b.
    pub fn background_luminance(&self) -> f64 {
        self.params.background_luminance
    }
    /// The surround class.
    pub fn surround(&self) -> Surround {
        self.params.surround
    }
    /// The adaptation mode.
    pub fn adaptation(&self) -> Adaptation {
        self.params.adaptation
    }
    /// The plain inputs these conditions were built from.
    pub fn parameters(&self) -> ViewingParameters {
        self.params
    }
    /// The degree of adaptation D, between 0 and 1.
    pub fn degree_of_adaptation(&self) -> f64 {
        self.d
    }
    /// Per-channel chromatic adaptation gains applied to CAT02 responses.
    pub fn adaptation_gains(&self) -> [f64; 3] {
        self.d_rgb
    }
    /// The luminance-level adaptation factor F_L.
    pub fn f_l(&self) -> f64 {
        self.f_l
    }
    /// The background induction factor n = Y_b / Y_w.
    pub fn n(&self) -> f64 {
        self.n
    }
    /// The base exponential nonlinearity z.
    pub fn z(&self) -> f64 {
        self.z
    }
    /// The brightness induction factor N_bb.
    pub fn n_bb(&self) -> f64 {
        self.n_bb
    }
    /// The chromatic induction factor N_cb.
    pub fn n_cb(&self) -> f64 {
        self.n_cb
    }
    /// The achromatic response to the adopted white, A_w.
    pub fn a_w(&self) -> f64 {
        self.a_w
    }
}

impl TryFrom<ViewingParameters> for ViewingConditions {
    type Error = ColorError;

    fn try_from(params: ViewingParameters) -> Result<ViewingConditions, ColorError> {
        let l_a = params.adapting_luminance;
        let y_b = params.background_luminance;
        if !(l_a.is_finite() && l_a > 0.0) {
            return Err(ColorError::InvalidViewingConditions(format!(
                "adapting luminance must be positive, got {}",
                l_a
            )));
        }
        if !(y_b.is_finite() && y_b > 0.0) {
            return Err(ColorError::InvalidViewingConditions(format!(
                "background luminance must be positive, got {}",
                y_b
            )));
        }
        if params.white.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(ColorError::InvalidViewingConditions(format!(
                "malformed white point {:?}",
                params.white
            )));
        }
        Ok(ViewingConditions::derive(params))
    }
}

impl From<ViewingConditions> for ViewingParameters {
    fn from(vc: ViewingConditions) -> ViewingParameters {
        vc.params
    }
}

impl PartialEq for ViewingConditions {
    fn eq(&self, other: &ViewingConditions) -> bool {
        self.params == other.params
    }
}

impl Default for ViewingConditions {
    fn default() -> ViewingConditions {
        DEFAULT_CONDITIONS.clone()
    }
}

impl fmt::Display for ViewingConditions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "white {:?}, L_A {}, Y_b {}, {:?} surround",
            self.params.white,
            self.params.adapting_luminance,
            self.params.background_luminance,
            self.params.surround
        )
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    fn worked_example(l_a: f64) -> ViewingConditions {
        ViewingConditions::new([98.88, 90.0, 32.03], l_a, 18.0, Surround::Average).unwrap()
    }

    #[test]
    fn test_worked_example_constants() {
        let vc = worked_example(200.);
        assert!((vc.n() - 0.2).abs() <= 1e-10);
        assert!((vc.n_bb() - 1.0003).abs() <= 1e-4);
        assert!((vc.degree_of_adaptation() - 0.9800).abs() <= 1e-4);
        let vc = worked_example(20.);
        assert!((vc.degree_of_adaptation() - 0.8584).abs() <= 1e-4);
        assert!((vc.f_l() - 0.4642).abs() <= 1e-4);
    }

    #[test]
    fn test_full_adaptation() {
        let vc = ViewingConditions::with_adaptation(
            Illuminant::D65.white_point(),
            20.,
            20.,
            Surround::Dark,
            Adaptation::Full,
        ).unwrap();
        assert_eq!(vc.degree_of_adaptation(), 1.0);
        let partial =
            ViewingConditions::from_illuminant(Illuminant::D65, 20., 20., Surround::Dark).unwrap();
        assert!(partial.degree_of_adaptation() < 1.0);
        assert!(partial != vc);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let wp = Illuminant::D65.white_point();
        assert!(ViewingConditions::new(wp, -1., 20., Surround::Average).is_err());
        assert!(ViewingConditions::new(wp, 64., 0., Surround::Average).is_err());
        assert!(ViewingConditions::new(wp, ::std::f64::NAN, 20., Surround::Average).is_err());
        assert!(ViewingConditions::new([95., 0., 108.], 64., 20., Surround::Average).is_err());
        match ViewingConditions::new(wp, 0., 20., Surround::Average) {
            Err(ColorError::InvalidViewingConditions(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_equality_on_inputs() {
        let a = ViewingConditions::from_illuminant(Illuminant::D65, 64., 20., Surround::Average);
        assert_eq!(a.unwrap(), *DEFAULT_CONDITIONS);
        assert_eq!(ViewingConditions::default(), *DEFAULT_CONDITIONS);
        assert!(*SRGB_ENCODING_CONDITIONS != *SRGB_TYPICAL_CONDITIONS);
        assert!((SRGB_ENCODING_CONDITIONS.background_luminance() - 12.8).abs() <= 1e-12);
    }
}
