//! Model a color in the Oklab perceptual color space.

use crate::color::{Component, HasSpace, Space};
use crate::math::{transform, transform_3x3, Transform};
use crate::rgb::LinearSrgb;

okcolor_macros::gen_model! {
    /// A color specified in the Oklab color space with the rectangular
    /// orthogonal form.
    pub struct Oklab {
        /// The perceived lightness component.
        pub lightness: Component,
        /// The green/red chroma axis.
        pub a: Component,
        /// The blue/yellow chroma axis.
        pub b: Component,
    }
}

impl HasSpace for Oklab {
    const SPACE: Space = Space::Oklab;
}

impl From<LinearSrgb> for Oklab {
    fn from(value: LinearSrgb) -> Self {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const LINEAR_SRGB_TO_LMS: Transform = transform_3x3(
            0.4122214708, 0.2119034982, 0.0883024619,
            0.5363325363, 0.6806995451, 0.2817188376,
            0.0514459929, 0.1073969566, 0.6299787005,
        );

        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const LMS_TO_OKLAB: Transform = transform_3x3(
             0.2104542553,  1.9779984951,  0.0259040371,
             0.7936177850, -2.4285922050,  0.7827717662,
            -0.0040720468,  0.4505937099, -0.8086757660,
        );

        let lms = transform(&LINEAR_SRGB_TO_LMS, value.to_components());
        let lms = lms.map(|v| v.cbrt());
        transform(&LMS_TO_OKLAB, lms).into()
    }
}

impl Oklab {
    /// Convert this color to linear light sRGB. The result is outside the
    /// sRGB cube for strongly chromatic colors.
    pub fn to_linear_srgb(&self) -> LinearSrgb {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const OKLAB_TO_LMS: Transform = transform_3x3(
            1.0,           1.0,           1.0,
            0.3963377774, -0.1055613458, -0.0894841775,
            0.2158037573, -0.0638541728, -1.2914855480,
        );

        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const LMS_TO_LINEAR_SRGB: Transform = transform_3x3(
             4.0767416621, -1.2684380046, -0.0041960863,
            -3.3077115913,  2.6097574011, -0.7034186147,
             0.2309699292, -0.3413193965,  1.7076147010,
        );

        let lms = transform(&OKLAB_TO_LMS, self.to_components());
        let lms = lms.map(|v| v * v * v);
        transform(&LMS_TO_LINEAR_SRGB, lms).into()
    }
}
