//! The error type shared by every fallible operation in Percept. All of these are local and
//! deterministic: retrying a failed call with the same inputs fails the same way.

use std::error::Error;
use std::fmt;

use correlate::Correlate;

/// Everything that can go wrong when building viewing conditions or working with appearance colors.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorError {
    /// Non-positive or non-finite luminances, or a malformed white point, given when building
    /// [`ViewingConditions`](../viewing/struct.ViewingConditions.html).
    InvalidViewingConditions(String),
    /// A correlate triple that is not one lightness, one chroma and one hue correlate.
    InvalidConfiguration(String),
    /// The wrong number of components for the space a color is being built in.
    ComponentCountMismatch {
        /// The number of components the space needs.
        expected: usize,
        /// The number of components that were actually given.
        found: usize,
    },
    /// Reconfiguration could not derive every correlate the target needs from the ones it was
    /// given.
    IncompleteConfiguration {
        /// The correlates that stayed unknown.
        missing: Vec<Correlate>,
    },
    /// The requested target is not something this operation can produce, such as transposing into
    /// a space that isn't based on the appearance model.
    UnsupportedTarget(String),
    /// Two colors tagged with different viewing conditions or configurations were combined without
    /// converting one of them first.
    MismatchedConfiguration,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ColorError::InvalidViewingConditions(ref msg) => {
                write!(f, "invalid viewing conditions: {}", msg)
            }
            ColorError::InvalidConfiguration(ref msg) => {
                write!(f, "invalid correlate configuration: {}", msg)
            }
            ColorError::ComponentCountMismatch { expected, found } => write!(
                f,
                "expected {} components, found {}",
                expected, found
            ),
            ColorError::IncompleteConfiguration { ref missing } => {
                let names: Vec<&str> = missing.iter().map(|c| c.symbol()).collect();
                write!(f, "could not derive correlates {}", names.join(", "))
            }
            ColorError::UnsupportedTarget(ref target) => {
                write!(f, "unsupported target space: {}", target)
            }
            ColorError::MismatchedConfiguration => write!(
                f,
                "colors are tagged with different viewing conditions or configurations"
            ),
        }
    }
}

impl Error for ColorError {}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_display_lists_missing_correlates() {
        let err = ColorError::IncompleteConfiguration {
            missing: vec![Correlate::Chroma, Correlate::HueAngle],
        };
        assert_eq!(err.to_string(), "could not derive correlates C, h");
        let err = ColorError::ComponentCountMismatch {
            expected: 3,
            found: 5,
        };
        assert_eq!(err.to_string(), "expected 3 components, found 5");
    }
}
