//! Model a color in the sRGB color space.

use crate::color::{Component, HasSpace, Space};

okcolor_macros::gen_model! {
    /// A color specified in the sRGB color space, with the standard sRGB
    /// transfer function applied to its components.
    pub struct Srgb {
        /// The red component of the color.
        pub red: Component,
        /// The green component of the color.
        pub green: Component,
        /// The blue component of the color.
        pub blue: Component,
    }
}

impl HasSpace for Srgb {
    const SPACE: Space = Space::Srgb;
}

impl Srgb {
    /// Convert this model from gamma encoded to linear light.
    pub fn to_linear_light(&self) -> LinearSrgb {
        let components = self.to_components().map(|value| {
            let abs = value.abs();

            if abs < 0.04045 {
                value / 12.92
            } else {
                value.signum() * ((abs + 0.055) / 1.055).powf(2.4)
            }
        });
        LinearSrgb::from(components)
    }
}

okcolor_macros::gen_model! {
    /// A color specified in the sRGB color space with no gamma encoding.
    pub struct LinearSrgb {
        /// The red component of the color.
        pub red: Component,
        /// The green component of the color.
        pub green: Component,
        /// The blue component of the color.
        pub blue: Component,
    }
}

impl HasSpace for LinearSrgb {
    const SPACE: Space = Space::LinearSrgb;
}

impl LinearSrgb {
    /// Convert this model from linear light to gamma encoded.
    pub fn to_gamma_encoded(&self) -> Srgb {
        let components = self.to_components().map(|value| {
            let abs = value.abs();

            if abs > 0.0031308 {
                value.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
            } else {
                12.92 * value
            }
        });
        Srgb::from(components)
    }
}
