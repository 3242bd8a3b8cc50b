//! Percept is a library for working with colors the way people see them. It implements the CIECAM02
//! color appearance model: given a stimulus and a description of the viewing environment, it
//! computes how light, colorful and what hue the color looks, and back again. Everything else is
//! built on that: colors described by any of twelve combinations of appearance correlates,
//! reinterpretation under different viewing conditions, perceptual distances (CAM02-UCS among
//! them), blending, gamut boundary search and palette building.
//!
//! Operations that are unreliable on device values such as RGB become straightforward once colors
//! are in an appearance space, and the model's viewing conditions make explicit what RGB leaves
//! implicit: a color does not have one appearance, it has one appearance *in a given environment*.
//!
//! # Example
//! ```
//! # use percept::prelude::*;
//! let red = Color::from_srgb(1., 0., 0.);
//! let space = Space::Appearance(DEFAULT_JCH_SPACE.clone());
//! let jch = red.convert(&space).unwrap();
//! let jch = jch.as_appearance().unwrap();
//! let hue = jch.components()[2];
//! assert!(hue > 20. && hue < 40.);
//! ```

#![doc(html_root_url = "https://docs.rs/percept/0.3.0")]
// we don't mess around with documentation
#![deny(missing_docs)]
// Clippy doesn't like long decimals, but adding separators in decimals isn't any more readable
// compare -0.96924 with -0.96_924
#![allow(clippy::unreadable_literal)]

#[macro_use]
extern crate float_cmp;
#[macro_use]
extern crate lazy_static;
extern crate num;
extern crate rulinalg;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate tracing;

pub mod appearance;
pub mod bound;
pub mod ciecam;
pub mod color;
mod consts;
pub mod coord;
pub mod correlate;
pub mod distance;
pub mod error;
pub mod hue;
pub mod illuminants;
pub mod mix;
pub mod palette;
pub mod prelude;
pub mod viewing;
