//! Model a color with the Okhsl form of the Oklab color space.

use crate::color::{Component, HasSpace, Space};

okcolor_macros::gen_model! {
    /// A color specified with hue, saturation and lightness in the Okhsl
    /// form of the Oklab color space.
    pub struct Okhsl {
        /// The hue component of the color, as a fraction of a full turn in
        /// [0, 1).
        pub hue: Component,
        /// The saturation component of the color.
        pub saturation: Component,
        /// The lightness component of the color.
        pub lightness: Component,
    }
}

impl HasSpace for Okhsl {
    const SPACE: Space = Space::Okhsl;
}
