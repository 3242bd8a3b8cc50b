//! This module simply brings the most common Percept functionality under a single namespace, to
//! prevent excessive imports. It includes every trait in Percept, the color and space types, the
//! viewing-condition types with their standard environments, and the error type. The free
//! functions of the [`distance`](../distance/index.html), [`palette`](../palette/index.html) and
//! [`ciecam`](../ciecam/index.html) modules are not included.

pub use appearance::{
    AppearanceColor, AppearanceSpace, Form, DEFAULT_JCH_SPACE, DEFAULT_JMH_LAB_SPACE,
};
pub use bound::{Bound, SrgbGamut};
pub use color::{Color, Space};
pub use correlate::{Correlate, CorrelateConfiguration};
pub use error::ColorError;
pub use illuminants::Illuminant;
pub use mix::Mix;
pub use viewing::{
    Adaptation, Surround, ViewingConditions, ADOBE_RGB_CONDITIONS, DEFAULT_CONDITIONS,
    SRGB_ENCODING_CONDITIONS, SRGB_TYPICAL_CONDITIONS,
};
