//! Appearance spaces and the colors that live in them. An [`AppearanceSpace`] is a viewing
//! environment, a [`CorrelateConfiguration`] and a choice between the polar form (lightness,
//! chroma-like radius, hue) and the Cartesian form (lightness, a, b). An [`AppearanceColor`] is three
//! components and an alpha value tagged with the space that gives them meaning. Colors are values:
//! every operation returns a new color.
//!
//! [`CorrelateConfiguration`]: ../correlate/struct.CorrelateConfiguration.html

use std::fmt;

use ciecam::{forward, reverse};
use coord::Coord;
use correlate::{Correlate, CorrelateConfiguration};
use error::ColorError;
use hue::hue_distance_mod;
use viewing::{ViewingConditions, DEFAULT_CONDITIONS};

// below this lightness a stimulus with no defined hue is treated as black
const BLACK_LIGHTNESS: f64 = 1e-6;

/// Whether a space keeps its hue as an angle or expands it into two opponent axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Form {
    /// (lightness, radius, hue), for instance J, C, h.
    Polar,
    /// (lightness, a, b), where a and b are the radius projected onto the hue axes.
    Cartesian,
}

/// The interpretation of a triple of appearance components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceSpace {
    /// The viewing environment the correlates were computed for.
    pub conditions: ViewingConditions,
    /// Which three correlates the components are.
    pub configuration: CorrelateConfiguration,
    /// Polar or Cartesian.
    pub form: Form,
}

lazy_static! {
    /// JCh under the default viewing conditions.
    pub static ref DEFAULT_JCH_SPACE: AppearanceSpace =
        AppearanceSpace::polar(DEFAULT_CONDITIONS.clone(), CorrelateConfiguration::JCh);
    /// The Cartesian form of JMh under the default viewing conditions: J, a_M, b_M.
    pub static ref DEFAULT_JMH_LAB_SPACE: AppearanceSpace =
        AppearanceSpace::cartesian(DEFAULT_CONDITIONS.clone(), CorrelateConfiguration::JMh);
}

impl AppearanceSpace {
    /// A polar space.
    pub fn polar(conditions: ViewingConditions, configuration: CorrelateConfiguration) -> AppearanceSpace {
        AppearanceSpace {
            conditions,
            configuration,
            form: Form::Polar,
        }
    }

    /// A Cartesian space.
    pub fn cartesian(
        conditions: ViewingConditions,
        configuration: CorrelateConfiguration,
    ) -> AppearanceSpace {
        AppearanceSpace {
            conditions,
            configuration,
            form: Form::Cartesian,
        }
    }

    /// The names of the three components, e.g. `["J", "a", "b"]`.
    pub fn component_names(&self) -> [&'static str; 3] {
        let c = self.configuration.correlates();
        match self.form {
            Form::Polar => [c[0].symbol(), c[1].symbol(), c[2].symbol()],
            Form::Cartesian => [c[0].symbol(), "a", "b"],
        }
    }

    /// The same correlates in the other form.
    pub fn with_form(&self, form: Form) -> AppearanceSpace {
        AppearanceSpace {
            form,
            ..self.clone()
        }
    }
}

impl fmt::Display for AppearanceSpace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names = self.component_names();
        write!(f, "{}{}{} ({})", names[0], names[1], names[2], self.conditions)
    }
}

/// A color described by appearance correlates.
/// # Example
/// ```
/// # use percept::prelude::*;
/// let vc = ViewingConditions::default();
/// let space = AppearanceSpace::polar(vc, CorrelateConfiguration::JCh);
/// let color = AppearanceColor::from_stimulus([0.2, 0.15, 0.6], &space).unwrap();
/// let stimulus = color.to_stimulus().unwrap();
/// assert!((stimulus[1] - 0.15).abs() <= 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceColor {
    space: AppearanceSpace,
    components: Coord,
    alpha: f64,
}

impl AppearanceColor {
    /// Builds a color directly from components in the given space.
    pub fn new(space: AppearanceSpace, components: [f64; 3], alpha: f64) -> AppearanceColor {
        AppearanceColor {
            space,
            components: Coord::from(components),
            alpha,
        }
    }

    /// Builds a color from a slice of three components, or four with alpha last. Alpha defaults to
    /// fully opaque.
    /// # Errors
    /// Returns `ColorError::ComponentCountMismatch` for any other length.
    pub fn from_slice(space: AppearanceSpace, values: &[f64]) -> Result<AppearanceColor, ColorError> {
        match *values {
            [a, b, c] => Ok(AppearanceColor::new(space, [a, b, c], 1.0)),
            [a, b, c, alpha] => Ok(AppearanceColor::new(space, [a, b, c], alpha)),
            _ => Err(ColorError::ComponentCountMismatch {
                expected: 3,
                found: values.len(),
            }),
        }
    }

    /// Runs the forward model on an XYZ stimulus (Y = 1 for a perfect diffuser) and describes the
    /// result in the given space.
    /// # Errors
    /// Returns `ColorError::IncompleteConfiguration` if the model cannot give the space's correlates
    /// for this stimulus, as happens with negative stimuli. Black, whose hue is undefined, is
    /// described as lightness 0 with chroma and hue 0.
    pub fn from_stimulus(
        stimulus: [f64; 3],
        space: &AppearanceSpace,
    ) -> Result<AppearanceColor, ColorError> {
        AppearanceColor::from_stimulus_alpha(stimulus, 1.0, space)
    }

    pub(crate) fn from_stimulus_alpha(
        stimulus: [f64; 3],
        alpha: f64,
        space: &AppearanceSpace,
    ) -> Result<AppearanceColor, ColorError> {
        let full = forward(stimulus, &space.conditions);
        let config = space.configuration;
        let polar = match config.project(&full) {
            Ok(polar) => polar,
            Err(e) => match full.get(config.lightness()) {
                Some(l) if l.abs() <= BLACK_LIGHTNESS => [l, 0.0, 0.0],
                _ => return Err(e),
            },
        };
        let components = match space.form {
            Form::Polar => polar,
            Form::Cartesian => config.to_cartesian(polar),
        };
        Ok(AppearanceColor::new(space.clone(), components, alpha))
    }

    /// Runs the reverse model, giving the XYZ stimulus that produces this appearance.
    /// # Errors
    /// Returns `ColorError::IncompleteConfiguration` if the components are not finite.
    pub fn to_stimulus(&self) -> Result<[f64; 3], ColorError> {
        let vector = self.space.configuration.expand(self.polar_components());
        reverse(&vector, &self.space.conditions)
    }

    /// The space this color is described in.
    pub fn space(&self) -> &AppearanceSpace {
        &self.space
    }
    /// The viewing conditions this color is described under.
    pub fn conditions(&self) -> &ViewingConditions {
        &self.space.conditions
    }
    /// The correlate configuration of this color.
    pub fn configuration(&self) -> CorrelateConfiguration {
        self.space.configuration
    }
    /// The three components, in the space's order.
    pub fn components(&self) -> [f64; 3] {
        self.components.to_array()
    }
    /// The components as a point.
    pub fn coord(&self) -> Coord {
        self.components
    }
    /// Opacity, 0 to 1.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// A copy with one component replaced.
    pub fn with_component(&self, index: usize, value: f64) -> Result<AppearanceColor, ColorError> {
        if index >= 3 {
            return Err(ColorError::ComponentCountMismatch {
                expected: 3,
                found: index + 1,
            });
        }
        let mut components = self.components();
        components[index] = value;
        Ok(AppearanceColor::new(self.space.clone(), components, self.alpha))
    }

    /// The components in polar form, whatever form the color is stored in.
    pub fn polar_components(&self) -> [f64; 3] {
        match self.space.form {
            Form::Polar => self.components(),
            Form::Cartesian => self.space.configuration.to_polar(self.components()),
        }
    }

    /// The components in Cartesian form, whatever form the color is stored in.
    pub fn cartesian_components(&self) -> [f64; 3] {
        match self.space.form {
            Form::Polar => self.space.configuration.to_cartesian(self.components()),
            Form::Cartesian => self.components(),
        }
    }

    /// The value of one of the seven correlates, derived from this color's components.
    pub fn correlate(&self, correlate: Correlate) -> Option<f64> {
        self.space
            .configuration
            .expand(self.polar_components())
            .completed(&self.space.conditions)
            .get(correlate)
    }

    /// The same color in polar form.
    pub fn to_polar(&self) -> AppearanceColor {
        AppearanceColor::new(self.space.with_form(Form::Polar), self.polar_components(), self.alpha)
    }

    /// The same color in Cartesian form.
    pub fn to_cartesian(&self) -> AppearanceColor {
        AppearanceColor::new(
            self.space.with_form(Form::Cartesian),
            self.cartesian_components(),
            self.alpha,
        )
    }

    /// Re-expresses this color in another correlate configuration under the same conditions,
    /// keeping its form.
    /// # Errors
    /// Returns `ColorError::IncompleteConfiguration` if the target correlates cannot be derived.
    /// # Example
    /// ```
    /// # use percept::prelude::*;
    /// let jch = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [60., 40., 250.], 1.);
    /// let qmh = jch.reconfigure(CorrelateConfiguration::QMH).unwrap();
    /// assert_eq!(qmh.configuration(), CorrelateConfiguration::QMH);
    /// let back = qmh.reconfigure(CorrelateConfiguration::JCh).unwrap();
    /// assert!(back.approx_equal(&jch));
    /// ```
    pub fn reconfigure(&self, target: CorrelateConfiguration) -> Result<AppearanceColor, ColorError> {
        let space = AppearanceSpace {
            configuration: target,
            ..self.space.clone()
        };
        let polar = self.space.configuration.reconfigure(
            self.polar_components(),
            &target,
            &self.space.conditions,
        )?;
        let components = match space.form {
            Form::Polar => polar,
            Form::Cartesian => target.to_cartesian(polar),
        };
        Ok(AppearanceColor::new(space, components, self.alpha))
    }

    /// Reinterprets this color in another appearance space. The correlates are first reconfigured
    /// to the target's configuration under this color's own conditions, then taken as-is under the
    /// target's conditions, converting to Cartesian form if the target uses it. This assumes the
    /// color keeps its appearance across the two environments; it does not solve for it.
    /// # Errors
    /// Returns `ColorError::IncompleteConfiguration` if reconfiguration fails.
    pub fn transpose(&self, target: &AppearanceSpace) -> Result<AppearanceColor, ColorError> {
        let polar = self.space.configuration.reconfigure(
            self.polar_components(),
            &target.configuration,
            &self.space.conditions,
        )?;
        let components = match target.form {
            Form::Polar => polar,
            Form::Cartesian => target.configuration.to_cartesian(polar),
        };
        trace!(from = %self.space, to = %target, "transpose");
        Ok(AppearanceColor::new(target.clone(), components, self.alpha))
    }

    /// [`transpose`](#method.transpose) into the same configuration and form under other conditions.
    pub fn transpose_to(&self, conditions: &ViewingConditions) -> Result<AppearanceColor, ColorError> {
        let target = AppearanceSpace {
            conditions: conditions.clone(),
            ..self.space.clone()
        };
        self.transpose(&target)
    }

    /// Whether two colors are in the same space and their components and alpha agree to within a
    /// small tolerance. Hues are compared around the circle.
    pub fn approx_equal(&self, other: &AppearanceColor) -> bool {
        if self.space != other.space {
            return false;
        }
        let eps = 1e-6;
        let a = self.components();
        let b = other.components();
        let hue_ok = match self.space.form {
            Form::Polar => {
                let modulus = self.space.configuration.hue_unit().modulus();
                hue_distance_mod(a[2], b[2], modulus) <= eps
            }
            Form::Cartesian => approx_eq!(f64, a[2], b[2], epsilon = eps),
        };
        hue_ok
            && approx_eq!(f64, a[0], b[0], epsilon = eps)
            && approx_eq!(f64, a[1], b[1], epsilon = eps)
            && approx_eq!(f64, self.alpha, other.alpha, epsilon = eps)
    }
}

impl Default for AppearanceColor {
    fn default() -> AppearanceColor {
        AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [0.0; 3], 1.0)
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use consts::TEST_PRECISION;
    use illuminants::Illuminant;
    use viewing::Surround;

    fn office() -> ViewingConditions {
        ViewingConditions::from_illuminant(Illuminant::D50, 200., 40., Surround::Average).unwrap()
    }

    #[test]
    fn test_slice_arity() {
        let space = DEFAULT_JCH_SPACE.clone();
        assert!(AppearanceColor::from_slice(space.clone(), &[50., 20., 10.]).is_ok());
        let with_alpha = AppearanceColor::from_slice(space.clone(), &[50., 20., 10., 0.5]).unwrap();
        assert_eq!(with_alpha.alpha(), 0.5);
        match AppearanceColor::from_slice(space, &[1., 2.]) {
            Err(ColorError::ComponentCountMismatch { expected, found }) => {
                assert_eq!((expected, found), (3, 2));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_cartesian_round_trip_through_stimulus() {
        let stimulus = [0.3, 0.22, 0.09];
        let lab = AppearanceColor::from_stimulus(stimulus, &DEFAULT_JMH_LAB_SPACE).unwrap();
        let polar = lab.to_polar();
        assert_eq!(polar.space().form, Form::Polar);
        assert!(polar.to_cartesian().approx_equal(&lab));
        let back = lab.to_stimulus().unwrap();
        for i in 0..3 {
            assert!((back[i] - stimulus[i]).abs() <= TEST_PRECISION);
        }
        let m = polar.correlate(Correlate::Colorfulness).unwrap();
        assert!((m - polar.components()[1]).abs() <= 1e-12);
    }

    #[test]
    fn test_from_stimulus_failures() {
        let black = AppearanceColor::from_stimulus([0., 0., 0.], &DEFAULT_JCH_SPACE).unwrap();
        assert!(black.components()[0].abs() <= 1e-9);
        // a negative stimulus has no lightness, so it is an error rather than a gray
        match AppearanceColor::from_stimulus([-0.5, -0.5, -0.5], &DEFAULT_JCH_SPACE) {
            Err(ColorError::IncompleteConfiguration { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_reconfigure_keeps_form() {
        let lab = AppearanceColor::from_stimulus([0.3, 0.22, 0.09], &DEFAULT_JMH_LAB_SPACE).unwrap();
        let qch = lab.reconfigure(CorrelateConfiguration::QCH).unwrap();
        assert_eq!(qch.space().form, Form::Cartesian);
        let expected = AppearanceColor::from_stimulus(
            [0.3, 0.22, 0.09],
            &AppearanceSpace::cartesian(ViewingConditions::default(), CorrelateConfiguration::QCH),
        )
        .unwrap();
        assert!(qch.approx_equal(&expected));
    }

    #[test]
    fn test_transpose_keeps_numbers() {
        let color = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [55., 30., 140.], 0.8);
        let moved = color.transpose_to(&office()).unwrap();
        assert_eq!(moved.components(), color.components());
        assert_eq!(moved.conditions(), &office());
        assert_eq!(moved.alpha(), 0.8);
        // but the stimulus that looks like that differs
        let s1 = color.to_stimulus().unwrap();
        let s2 = moved.to_stimulus().unwrap();
        assert!((s1[0] - s2[0]).abs() > 1e-3 || (s1[2] - s2[2]).abs() > 1e-3);
    }

    #[test]
    fn test_transpose_into_cartesian() {
        let color = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [55., 30., 90.], 1.);
        let target = AppearanceSpace::cartesian(office(), CorrelateConfiguration::JCh);
        let lab = color.transpose(&target).unwrap();
        let c = lab.components();
        assert!((c[0] - 55.).abs() <= 1e-12);
        assert!(c[1].abs() <= 1e-9);
        assert!((c[2] - 30.).abs() <= 1e-9);
    }

    #[test]
    fn test_approx_equal_wraps_hue() {
        let a = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [50., 10., 359.9999999], 1.);
        let b = AppearanceColor::new(DEFAULT_JCH_SPACE.clone(), [50., 10., 0.], 1.);
        assert!(a.approx_equal(&b));
        let c = AppearanceColor::new(DEFAULT_JMH_LAB_SPACE.clone(), [50., 10., 0.], 1.);
        assert!(!b.approx_equal(&c));
    }
}
