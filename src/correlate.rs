//! Correlate configurations. CIECAM02 predicts seven correlates, but any color is pinned down by
//! three of them: one of lightness J or brightness Q, one of chroma C, colorfulness M or
//! saturation s, and one of hue angle h or hue composition H. That gives twelve ways of describing
//! an appearance, the [`CorrelateConfiguration`]s, and this module moves between them directly,
//! without going back to a stimulus.
//!
//! Reconfiguration expands the three known correlates into an [`AppearanceVector`] with four unknown
//! slots, then fills the unknowns from the known ones: a forward pass (J and Q from each other, C
//! from M or from s and Q, M from C, s from M and Q, H from h), a reverse pass (h from H), and a
//! second forward pass for whatever the reverse pass unlocked.

use std::fmt;
use std::str::FromStr;

use ciecam::{
    brightness, chroma_from_colorfulness, chroma_from_saturation, colorfulness, hue_angle,
    hue_angle_from_composition, hue_composition, lightness_from_brightness, saturation,
};
use error::ColorError;
use hue::{normalize, HueUnit};
use viewing::ViewingConditions;

/// One of the seven appearance correlates of CIECAM02.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Correlate {
    /// Lightness J: brightness relative to the white, 0 to 100.
    Lightness,
    /// Brightness Q: absolute, grows with the luminance of the scene.
    Brightness,
    /// Chroma C: colorfulness relative to the brightness of the white.
    Chroma,
    /// Colorfulness M: absolute, grows with the luminance of the scene.
    Colorfulness,
    /// Saturation s: colorfulness relative to the color's own brightness.
    Saturation,
    /// Hue composition H, 0 to 400, anchored on the four unique hues.
    HueComposition,
    /// Hue angle h, in degrees.
    HueAngle,
}

impl Correlate {
    /// All seven correlates, in slot order.
    pub const ALL: [Correlate; 7] = [
        Correlate::Lightness,
        Correlate::Brightness,
        Correlate::Chroma,
        Correlate::Colorfulness,
        Correlate::Saturation,
        Correlate::HueComposition,
        Correlate::HueAngle,
    ];

    /// The slot of this correlate in an [`AppearanceVector`].
    pub fn index(self) -> usize {
        match self {
            Correlate::Lightness => 0,
            Correlate::Brightness => 1,
            Correlate::Chroma => 2,
            Correlate::Colorfulness => 3,
            Correlate::Saturation => 4,
            Correlate::HueComposition => 5,
            Correlate::HueAngle => 6,
        }
    }

    /// The conventional one-letter name.
    pub fn symbol(self) -> &'static str {
        match self {
            Correlate::Lightness => "J",
            Correlate::Brightness => "Q",
            Correlate::Chroma => "C",
            Correlate::Colorfulness => "M",
            Correlate::Saturation => "s",
            Correlate::HueComposition => "H",
            Correlate::HueAngle => "h",
        }
    }

    /// A nominal upper end of the range of this correlate for surface colors, used to put
    /// correlates on a comparable scale. Brightness, colorfulness and chroma can exceed it.
    pub fn max_value(self) -> f64 {
        match self {
            Correlate::Lightness => 100.0,
            Correlate::Brightness => 200.0,
            Correlate::Chroma => 120.0,
            Correlate::Colorfulness => 120.0,
            Correlate::Saturation => 100.0,
            Correlate::HueComposition => 400.0,
            Correlate::HueAngle => 360.0,
        }
    }

    fn from_symbol(c: char) -> Option<Correlate> {
        Correlate::ALL
            .iter()
            .cloned()
            .find(|corr| corr.symbol().starts_with(c))
    }
}

/// The seven correlates of one color, any of which may be unknown.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct AppearanceVector {
    slots: [Option<f64>; 7],
}

impl AppearanceVector {
    /// A vector with every slot unset.
    pub fn new() -> AppearanceVector {
        AppearanceVector::default()
    }

    /// A vector from all seven correlates, in slot order. Non-finite values are left unset.
    pub fn from_correlates(values: [f64; 7]) -> AppearanceVector {
        let mut v = AppearanceVector::new();
        for (correlate, value) in Correlate::ALL.iter().zip(values.iter()) {
            v.set(*correlate, *value);
        }
        v
    }

    /// The value of a correlate, if known.
    pub fn get(&self, correlate: Correlate) -> Option<f64> {
        self.slots[correlate.index()]
    }

    /// Sets a correlate. Setting a NaN or infinite value leaves the slot unset, so a failed
    /// derivation never masquerades as a known correlate.
    pub fn set(&mut self, correlate: Correlate, value: f64) {
        self.slots[correlate.index()] = if value.is_finite() { Some(value) } else { None };
    }

    /// Whether a correlate is known.
    pub fn is_set(&self, correlate: Correlate) -> bool {
        self.get(correlate).is_some()
    }

    /// The correlates among `wanted` that are still unknown.
    pub fn missing(&self, wanted: &[Correlate]) -> Vec<Correlate> {
        wanted.iter().cloned().filter(|c| !self.is_set(*c)).collect()
    }

    /// Derives every unknown slot that can be computed from known ones without inverting the hue
    /// composition.
    pub fn fill_forward(&mut self, vc: &ViewingConditions) {
        use self::Correlate::*;
        match (self.get(Lightness), self.get(Brightness)) {
            (Some(j), None) => self.set(Brightness, brightness(j, vc)),
            (None, Some(q)) => self.set(Lightness, lightness_from_brightness(q, vc)),
            _ => {}
        }
        if !self.is_set(Chroma) {
            if let Some(m) = self.get(Colorfulness) {
                self.set(Chroma, chroma_from_colorfulness(m, vc));
            } else if let (Some(s), Some(q)) = (self.get(Saturation), self.get(Brightness)) {
                self.set(Chroma, chroma_from_saturation(s, q, vc));
            }
        }
        if let (None, Some(c)) = (self.get(Colorfulness), self.get(Chroma)) {
            self.set(Colorfulness, colorfulness(c, vc));
        }
        if let (None, Some(m), Some(q)) = (
            self.get(Saturation),
            self.get(Colorfulness),
            self.get(Brightness),
        ) {
            self.set(Saturation, saturation(m, q));
        }
        if let (None, Some(h)) = (self.get(HueComposition), self.get(HueAngle)) {
            self.set(HueComposition, hue_composition(h));
        }
    }

    /// Derives the hue angle from the hue composition, if only the latter is known.
    pub fn fill_reverse(&mut self) {
        if let (None, Some(big_h)) = (
            self.get(Correlate::HueAngle),
            self.get(Correlate::HueComposition),
        ) {
            self.set(Correlate::HueAngle, hue_angle_from_composition(big_h));
        }
    }

    /// A copy with every derivable slot filled in.
    pub fn completed(&self, vc: &ViewingConditions) -> AppearanceVector {
        let mut v = *self;
        v.fill_forward(vc);
        v.fill_reverse();
        v.fill_forward(vc);
        v
    }
}

/// A choice of one lightness, one chroma and one hue correlate that together describe a color.
/// # Example
/// ```
/// # use percept::correlate::CorrelateConfiguration;
/// let jmh: CorrelateConfiguration = "JMh".parse().unwrap();
/// assert_eq!(jmh, CorrelateConfiguration::JMh);
/// assert!("JQh".parse::<CorrelateConfiguration>().is_err());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelateConfiguration {
    lightness: Correlate,
    chroma: Correlate,
    hue: Correlate,
}

macro_rules! configuration {
    ($name:ident, $doc:expr, $l:ident, $c:ident, $h:ident) => {
        #[doc = $doc]
        #[allow(non_upper_case_globals)]
        pub const $name: CorrelateConfiguration = CorrelateConfiguration {
            lightness: Correlate::$l,
            chroma: Correlate::$c,
            hue: Correlate::$h,
        };
    };
}

impl CorrelateConfiguration {
    configuration!(JCh, "Lightness, chroma and hue angle.", Lightness, Chroma, HueAngle);
    configuration!(JCH, "Lightness, chroma and hue composition.", Lightness, Chroma, HueComposition);
    configuration!(JMh, "Lightness, colorfulness and hue angle.", Lightness, Colorfulness, HueAngle);
    configuration!(JMH, "Lightness, colorfulness and hue composition.", Lightness, Colorfulness, HueComposition);
    configuration!(Jsh, "Lightness, saturation and hue angle.", Lightness, Saturation, HueAngle);
    configuration!(JsH, "Lightness, saturation and hue composition.", Lightness, Saturation, HueComposition);
    configuration!(QCh, "Brightness, chroma and hue angle.", Brightness, Chroma, HueAngle);
    configuration!(QCH, "Brightness, chroma and hue composition.", Brightness, Chroma, HueComposition);
    configuration!(QMh, "Brightness, colorfulness and hue angle.", Brightness, Colorfulness, HueAngle);
    configuration!(QMH, "Brightness, colorfulness and hue composition.", Brightness, Colorfulness, HueComposition);
    configuration!(Qsh, "Brightness, saturation and hue angle.", Brightness, Saturation, HueAngle);
    configuration!(QsH, "Brightness, saturation and hue composition.", Brightness, Saturation, HueComposition);

    /// Every valid configuration.
    pub const ALL: [CorrelateConfiguration; 12] = [
        CorrelateConfiguration::JCh,
        CorrelateConfiguration::JCH,
        CorrelateConfiguration::JMh,
        CorrelateConfiguration::JMH,
        CorrelateConfiguration::Jsh,
        CorrelateConfiguration::JsH,
        CorrelateConfiguration::QCh,
        CorrelateConfiguration::QCH,
        CorrelateConfiguration::QMh,
        CorrelateConfiguration::QMH,
        CorrelateConfiguration::Qsh,
        CorrelateConfiguration::QsH,
    ];

    /// Builds a configuration, checking that each correlate comes from the right family.
    /// # Errors
    /// Returns `ColorError::InvalidConfiguration` for anything outside {J, Q} × {C, M, s} × {h, H}.
    pub fn new(
        lightness: Correlate,
        chroma: Correlate,
        hue: Correlate,
    ) -> Result<CorrelateConfiguration, ColorError> {
        let config = CorrelateConfiguration {
            lightness,
            chroma,
            hue,
        };
        if CorrelateConfiguration::ALL.contains(&config) {
            Ok(config)
        } else {
            Err(ColorError::InvalidConfiguration(format!(
                "{}{}{}",
                lightness.symbol(),
                chroma.symbol(),
                hue.symbol()
            )))
        }
    }

    /// The three correlates, in component order.
    pub fn correlates(&self) -> [Correlate; 3] {
        [self.lightness, self.chroma, self.hue]
    }
    /// The lightness-family correlate, J or Q.
    pub fn lightness(&self) -> Correlate {
        self.lightness
    }
    /// The chroma-family correlate, C, M or s.
    pub fn chroma(&self) -> Correlate {
        self.chroma
    }
    /// The hue-family correlate, h or H.
    pub fn hue(&self) -> Correlate {
        self.hue
    }

    /// Degrees for a hue angle, gons for hue composition.
    pub fn hue_unit(&self) -> HueUnit {
        match self.hue {
            Correlate::HueComposition => HueUnit::Gons,
            _ => HueUnit::Degrees,
        }
    }

    /// Puts three components in this configuration into their slots, leaving the rest unset.
    pub fn expand(&self, components: [f64; 3]) -> AppearanceVector {
        let mut v = AppearanceVector::new();
        for (correlate, value) in self.correlates().iter().zip(components.iter()) {
            v.set(*correlate, *value);
        }
        v
    }

    /// Picks this configuration's three components out of a vector.
    /// # Errors
    /// Returns `ColorError::IncompleteConfiguration` if any of them is unset.
    pub fn project(&self, vector: &AppearanceVector) -> Result<[f64; 3], ColorError> {
        match (
            vector.get(self.lightness),
            vector.get(self.chroma),
            vector.get(self.hue),
        ) {
            (Some(l), Some(c), Some(h)) => Ok([l, c, h]),
            _ => Err(ColorError::IncompleteConfiguration {
                missing: vector.missing(&self.correlates()),
            }),
        }
    }

    /// Converts components in this configuration into the `target` configuration under the given
    /// viewing conditions.
    /// # Errors
    /// Returns `ColorError::IncompleteConfiguration` if the target correlates cannot all be derived,
    /// which happens when the components are non-finite or produce non-finite intermediates.
    /// # Example
    /// ```
    /// # use percept::prelude::*;
    /// let vc = ViewingConditions::default();
    /// let qsh = CorrelateConfiguration::JCh
    ///     .reconfigure([50., 30., 120.], &CorrelateConfiguration::QsH, &vc)
    ///     .unwrap();
    /// let jch = CorrelateConfiguration::QsH
    ///     .reconfigure(qsh, &CorrelateConfiguration::JCh, &vc)
    ///     .unwrap();
    /// assert!((jch[0] - 50.).abs() <= 1e-9);
    /// assert!((jch[1] - 30.).abs() <= 1e-9);
    /// assert!((jch[2] - 120.).abs() <= 1e-9);
    /// ```
    pub fn reconfigure(
        &self,
        components: [f64; 3],
        target: &CorrelateConfiguration,
        vc: &ViewingConditions,
    ) -> Result<[f64; 3], ColorError> {
        let completed = self.expand(components).completed(vc);
        let result = target.project(&completed);
        trace!(source = %self, target = %target, ok = result.is_ok(), "reconfigure");
        result
    }

    /// Turns polar components (lightness, radius, hue) into Cartesian ones (lightness, a, b), with the
    /// hue measured in this configuration's hue unit.
    pub fn to_cartesian(&self, components: [f64; 3]) -> [f64; 3] {
        let angle = components[2] * self.hue_unit().radians();
        let (sin, cos) = angle.sin_cos();
        [components[0], components[1] * cos, components[1] * sin]
    }

    /// The inverse of [`to_cartesian`](#method.to_cartesian).
    pub fn to_polar(&self, components: [f64; 3]) -> [f64; 3] {
        let unit = self.hue_unit();
        let radius = components[1].hypot(components[2]);
        let hue = match unit {
            HueUnit::Degrees => hue_angle(components[1], components[2]),
            HueUnit::Gons => {
                let angle = components[2].atan2(components[1]) / unit.radians();
                normalize(angle, unit.modulus())
            }
        };
        [components[0], radius, hue]
    }
}

impl fmt::Display for CorrelateConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.lightness.symbol(),
            self.chroma.symbol(),
            self.hue.symbol()
        )
    }
}

impl FromStr for CorrelateConfiguration {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<CorrelateConfiguration, ColorError> {
        let parsed: Vec<Option<Correlate>> = s.chars().map(Correlate::from_symbol).collect();
        match parsed.as_slice() {
            [Some(l), Some(c), Some(h)] => CorrelateConfiguration::new(*l, *c, *h),
            _ => Err(ColorError::InvalidConfiguration(s.to_string())),
        }
    }
}

impl Default for CorrelateConfiguration {
    fn default() -> CorrelateConfiguration {
        CorrelateConfiguration::JCh
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use ciecam::{forward, reverse};
    use consts::TEST_PRECISION;
    use hue::hue_distance_mod;
    use illuminants::Illuminant;
    use viewing::Surround;

    fn close(a: [f64; 3], b: [f64; 3], config: &CorrelateConfiguration, tol: f64) -> bool {
        let modulus = config.hue_unit().modulus();
        (a[0] - b[0]).abs() <= tol
            && (a[1] - b[1]).abs() <= tol
            && hue_distance_mod(a[2], b[2], modulus) <= tol
    }

    #[test]
    fn test_all_pairs_match_stimulus_round_trip() {
        let conditions = [
            ViewingConditions::default(),
            ViewingConditions::from_illuminant(Illuminant::D50, 200., 40., Surround::Dim).unwrap(),
        ];
        // a saturated violet and a dark olive
        let stimuli = [[0.3419, 0.1981, 0.7747], [0.0541, 0.0651, 0.0148]];
        for vc in conditions.iter() {
            for stimulus in stimuli.iter() {
                let full = forward(*stimulus, vc);
                for source in CorrelateConfiguration::ALL.iter() {
                    let components = source.project(&full).unwrap();
                    for target in CorrelateConfiguration::ALL.iter() {
                        let direct = source.reconfigure(components, target, vc).unwrap();
                        let expected = target.project(&full).unwrap();
                        assert!(
                            close(direct, expected, target, 1e-5),
                            "{} -> {}: {:?} vs {:?}",
                            source,
                            target,
                            direct,
                            expected
                        );
                        // and back through the reverse model
                        let back = reverse(&target.expand(direct), vc).unwrap();
                        for i in 0..3 {
                            assert!((back[i] - stimulus[i]).abs() <= TEST_PRECISION);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_hues_past_one_turn() {
        let vc = ViewingConditions::default();
        let full = forward([0.3419, 0.1981, 0.7747], &vc);
        for source in CorrelateConfiguration::ALL.iter() {
            let modulus = source.hue_unit().modulus();
            let components = source.project(&full).unwrap();
            for &turns in [-2., -1., 1., 3.].iter() {
                let wound = [components[0], components[1], components[2] + turns * modulus];
                for target in CorrelateConfiguration::ALL.iter() {
                    let direct = source.reconfigure(wound, target, &vc).unwrap();
                    let expected = target.project(&full).unwrap();
                    assert!(
                        close(direct, expected, target, 1e-5),
                        "{} -> {} at {} turns: {:?} vs {:?}",
                        source,
                        target,
                        turns,
                        direct,
                        expected
                    );
                }
            }
        }
    }

    #[test]
    fn test_incomplete_vector() {
        let vc = ViewingConditions::default();
        let mut v = AppearanceVector::new();
        v.set(Correlate::Lightness, 50.);
        v.set(Correlate::HueComposition, 250.);
        let done = v.completed(&vc);
        assert!(done.is_set(Correlate::Brightness));
        assert!(done.is_set(Correlate::HueAngle));
        match CorrelateConfiguration::JCh.project(&done) {
            Err(ColorError::IncompleteConfiguration { missing }) => {
                assert_eq!(missing, vec![Correlate::Chroma]);
            }
            other => panic!("unexpected {:?}", other),
        }
        let nan = CorrelateConfiguration::JCh.reconfigure(
            [50., ::std::f64::NAN, 20.],
            &CorrelateConfiguration::QMh,
            &vc,
        );
        assert!(nan.is_err());
    }

    #[test]
    fn test_nan_never_stored() {
        let mut v = AppearanceVector::new();
        v.set(Correlate::Chroma, ::std::f64::NAN);
        v.set(Correlate::Saturation, ::std::f64::INFINITY);
        assert!(!v.is_set(Correlate::Chroma));
        assert!(!v.is_set(Correlate::Saturation));
    }

    #[test]
    fn test_names() {
        for config in CorrelateConfiguration::ALL.iter() {
            let parsed: CorrelateConfiguration = config.to_string().parse().unwrap();
            assert_eq!(parsed, *config);
        }
        assert!(CorrelateConfiguration::new(
            Correlate::Chroma,
            Correlate::Lightness,
            Correlate::HueAngle
        ).is_err());
        assert!("JC".parse::<CorrelateConfiguration>().is_err());
        assert_eq!(CorrelateConfiguration::QsH.hue_unit(), HueUnit::Gons);
    }

    #[test]
    fn test_cartesian_round_trip() {
        for config in [CorrelateConfiguration::JMh, CorrelateConfiguration::JMH].iter() {
            for &hue in [0., 45., 130., 200., 299.9, 359.].iter() {
                let polar = [40., 25., hue];
                let back = config.to_polar(config.to_cartesian(polar));
                assert!(close(back, polar, config, 1e-9));
            }
        }
        // a quarter turn is 90 degrees but 100 gons
        let lab = CorrelateConfiguration::JCH.to_cartesian([10., 2., 100.]);
        assert!(lab[1].abs() <= 1e-12 && (lab[2] - 2.).abs() <= 1e-12);
    }
}
