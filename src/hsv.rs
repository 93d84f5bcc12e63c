//! Model a color with the Okhsv form of the Oklab color space.

use crate::color::{Component, HasSpace, Space};

okcolor_macros::gen_model! {
    /// A color specified with hue, saturation and value in the Okhsv form of
    /// the Oklab color space.
    pub struct Okhsv {
        /// The hue component of the color, as a fraction of a full turn in
        /// [0, 1).
        pub hue: Component,
        /// The saturation component of the color.
        pub saturation: Component,
        /// The value component of the color.
        pub value: Component,
    }
}

impl HasSpace for Okhsv {
    const SPACE: Space = Space::Okhsv;
}
