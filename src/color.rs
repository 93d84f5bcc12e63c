//! A [`Color`] represents a color that was specified in any of the supported
//! color spaces and forms.

#[cfg(not(feature = "f64"))]
/// A 32-bit floating point value that all components are stored as.
pub type Component = f32;

#[cfg(feature = "f64")]
/// A 64-bit floating point value that all components are stored as.
pub type Component = f64;

/// Represent the three components that describe any color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Components(pub Component, pub Component, pub Component);

impl Components {
    /// Return new components with each component mapped with the given
    /// function.
    pub fn map(&self, f: impl Fn(Component) -> Component) -> Self {
        Self(f(self.0), f(self.1), f(self.2))
    }
}

/// The color spaces and forms supported by the crate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(u8)]
pub enum Space {
    /// The sRGB color space with the standard transfer function applied.
    Srgb = 0,
    /// The sRGB color space with no gamma encoding.
    LinearSrgb = 1,
    /// The Oklab perceptual color space in its rectangular orthogonal form.
    Oklab = 2,
    /// The Okhsl (hue, saturation, lightness) cylindrical form of Oklab,
    /// gamut fitted to sRGB.
    Okhsl = 3,
    /// The Okhsv (hue, saturation, value) cylindrical form of Oklab, gamut
    /// fitted to sRGB.
    Okhsv = 4,
}

/// Implemented by color models that belong to a single fixed color space.
pub trait HasSpace {
    /// The color space the model's components are in.
    const SPACE: Space;
}

/// Implemented by color models to expose their components as a generic
/// triple.
pub trait Model {
    /// This model's components, in the model's field order.
    fn components(&self) -> Components;
}

/// Struct that can hold a color of any supported color space.
#[derive(Clone, Debug, PartialEq)]
pub struct Color {
    /// The three components that make up any color.
    pub components: Components,
    /// The alpha component of the color.
    pub alpha: Component,
    /// The color space in which the components are set.
    pub space: Space,
}

impl Color {
    /// Create a new [`Color`] with the given components in the given color
    /// space.
    pub fn new(
        space: Space,
        c0: Component,
        c1: Component,
        c2: Component,
        alpha: Component,
    ) -> Self {
        Self {
            components: Components(c0, c1, c2),
            alpha,
            space,
        }
    }
}
