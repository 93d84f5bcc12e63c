//! okcolor provides color primitives and conversions between the sRGB color
//! space and the Okhsl/Okhsv cylindrical forms of the Oklab perceptual color
//! space.

#![deny(missing_docs)]

mod color;
mod convert;
mod gamut;
mod hsl;
mod hsv;
mod interpolate;
mod lab;
mod math;
mod rgb;

pub use color::{Color, Component, Components, HasSpace, Model, Space};
pub use hsl::Okhsl;
pub use hsv::Okhsv;
pub use lab::Oklab;
pub use rgb::{LinearSrgb, Srgb};
