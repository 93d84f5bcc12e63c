//! Each color space/form is modeled with its own type. Conversions are only
//! implemented on relevant models, making conversion paths accurate and
//! performant.
//!
//! Conversions only operate on the 3 color components; the alpha component
//! is carried through untouched.
//!
//! ```rust
//! use okcolor::{Okhsl, Srgb};
//! let hsl: Okhsl = Srgb::new(0.25, 0.5, 0.75).to_okhsl();
//! let back: Srgb = hsl.to_srgb();
//! ```

use crate::color::{Color, Component, HasSpace, Model, Space};
use crate::hsl::Okhsl;
use crate::hsv::Okhsv;
use crate::lab::Oklab;
use crate::rgb::{LinearSrgb, Srgb};

impl Color {
    /// Convert this color from its current color space/form to the
    /// specified color space/form.
    pub fn to_space(&self, space: Space) -> Self {
        use Space as S;

        if self.space == space {
            return self.clone();
        }

        // All conversion paths are routed through gamma encoded sRGB, the
        // space the cylindrical forms are defined against.
        let srgb = match self.space {
            S::Srgb => Srgb::from(self.components),
            S::LinearSrgb => LinearSrgb::from(self.components).to_gamma_encoded(),
            S::Oklab => Oklab::from(self.components)
                .to_linear_srgb()
                .to_gamma_encoded(),
            S::Okhsl => Okhsl::from(self.components).to_srgb(),
            S::Okhsv => Okhsv::from(self.components).to_srgb(),
        };

        match space {
            S::Srgb => to_color(&srgb, self.alpha),
            S::LinearSrgb => to_color(&srgb.to_linear_light(), self.alpha),
            S::Oklab => to_color(&Oklab::from(srgb.to_linear_light()), self.alpha),
            S::Okhsl => to_color(&srgb.to_okhsl(), self.alpha),
            S::Okhsv => to_color(&srgb.to_okhsv(), self.alpha),
        }
    }
}

fn to_color<M: Model + HasSpace>(model: &M, alpha: Component) -> Color {
    let components = model.components();
    Color::new(M::SPACE, components.0, components.1, components.2, alpha)
}

impl Srgb {
    /// Convert a color specified in the sRGB color space to the Okhsl form.
    pub fn to_okhsl(&self) -> Okhsl {
        util::srgb_to_okhsl(self)
    }

    /// Convert a color specified in the sRGB color space to the Okhsv form.
    pub fn to_okhsv(&self) -> Okhsv {
        util::srgb_to_okhsv(self)
    }
}

impl Okhsl {
    /// Convert this color from the Okhsl form to the sRGB color space.
    pub fn to_srgb(&self) -> Srgb {
        util::okhsl_to_srgb(self)
    }
}

impl Okhsv {
    /// Convert this color from the Okhsv form to the sRGB color space.
    pub fn to_srgb(&self) -> Srgb {
        util::okhsv_to_srgb(self)
    }
}

mod util {
    use crate::color::Component;
    use crate::gamut::{find_cusp, find_gamut_intersection, St};
    use crate::hsl::Okhsl;
    use crate::hsv::Okhsv;
    use crate::lab::Oklab;
    use crate::math::normalize_hue;
    use crate::rgb::Srgb;

    // Constants of the toe function from the published Okhsl/Okhsv
    // reference. These are fitted values and must not be re-derived.
    const K_1: Component = 0.206;
    const K_2: Component = 0.03;
    const K_3: Component = (1.0 + K_1) / (1.0 + K_2);

    // Saturation is interpolated in two segments that meet at this point.
    const MID: Component = 0.8;
    const MID_INV: Component = 1.25;

    // Below this chroma a color is treated as achromatic, where the hue is
    // mathematically undefined and set to zero by convention.
    const CHROMA_EPSILON: Component = 1.0e-5;

    /// Remap Oklab lightness to the perceptually more even Okhsl/Okhsv
    /// lightness estimate.
    pub fn toe(x: Component) -> Component {
        0.5 * (K_3 * x - K_1 + ((K_3 * x - K_1) * (K_3 * x - K_1) + 4.0 * K_2 * K_3 * x).sqrt())
    }

    /// Inverse of [`toe`].
    pub fn toe_inv(x: Component) -> Component {
        (x * x + K_1 * x) / (K_3 * (x + K_2))
    }

    /// The chroma envelope of the sRGB gamut for a single hue and lightness.
    /// `zero` is a hue independent lower bound, `mid` a smooth approximation
    /// below the true maximum and `max` the chroma on the gamut boundary.
    struct ChromaLevels {
        zero: Component,
        mid: Component,
        max: Component,
    }

    /// A smooth approximation of the location of the cusp, fitted so that
    /// its `s` and `t` stay below the true maxima for every hue.
    fn st_mid(a_: Component, b_: Component) -> St {
        #[allow(clippy::excessive_precision)]
        let s = 0.11516993
            + 1.0
                / (7.44778970
                    + 4.15901240 * b_
                    + a_ * (-2.19557347
                        + 1.75198401 * b_
                        + a_ * (-2.13704948 - 10.02301043 * b_
                            + a_ * (-4.24894561 + 5.38770819 * b_ + 4.69891013 * a_))));

        #[allow(clippy::excessive_precision)]
        let t = 0.11239642
            + 1.0
                / (1.61320320 - 0.68124379 * b_
                    + a_ * (0.40370612
                        + 0.90148123 * b_
                        + a_ * (-0.27087943
                            + 0.61223990 * b_
                            + a_ * (0.00299215 - 0.45399568 * b_ - 0.14661872 * a_))));

        St { s, t }
    }

    fn chroma_levels(lightness: Component, a_: Component, b_: Component) -> ChromaLevels {
        let cusp = find_cusp(a_, b_);

        let max = find_gamut_intersection(a_, b_, lightness, 1.0, lightness, &cusp);
        let st_max = cusp.to_st();

        // Scale factor to compensate for the curved part of the gamut shape.
        let k = max / (lightness * st_max.s).min((1.0 - lightness) * st_max.t);

        let mid = {
            let st_mid = st_mid(a_, b_);

            // A soft minimum instead of the sharp triangle shape gives a
            // smooth chroma value.
            let c_a = lightness * st_mid.s;
            let c_b = (1.0 - lightness) * st_mid.t;
            0.9 * k
                * (1.0 / (1.0 / (c_a * c_a * c_a * c_a) + 1.0 / (c_b * c_b * c_b * c_b)))
                    .sqrt()
                    .sqrt()
        };

        let zero = {
            // This shape is independent of hue, so the constants are picked
            // to roughly be the average over all hues.
            let c_a = lightness * 0.4;
            let c_b = (1.0 - lightness) * 0.8;

            (1.0 / (1.0 / (c_a * c_a) + 1.0 / (c_b * c_b))).sqrt()
        };

        ChromaLevels { zero, mid, max }
    }

    /// Split the chroma axes of an Oklab color into a hue fraction in
    /// [0, 1), the chroma and the normalized hue direction. Achromatic
    /// colors get the fixed convention of hue zero along the `a` axis.
    fn hue_and_chroma(lab: &Oklab) -> (Component, Component, Component, Component) {
        let chroma = (lab.a * lab.a + lab.b * lab.b).sqrt();
        if chroma < CHROMA_EPSILON {
            (0.0, 0.0, 1.0, 0.0)
        } else {
            let hue = normalize_hue(lab.b.atan2(lab.a).to_degrees()) / 360.0;
            (hue, chroma, lab.a / chroma, lab.b / chroma)
        }
    }

    /// The normalized direction in the Oklab chroma plane for a hue
    /// fraction in [0, 1).
    fn hue_direction(hue: Component) -> (Component, Component) {
        let radians = (hue * 360.0).to_radians();
        (radians.cos(), radians.sin())
    }

    pub fn srgb_to_okhsl(rgb: &Srgb) -> Okhsl {
        let lab = Oklab::from(rgb.to_linear_light());
        let (hue, chroma, a_, b_) = hue_and_chroma(&lab);

        if chroma == 0.0 {
            return Okhsl::new(hue, 0.0, toe(lab.lightness));
        }

        let levels = chroma_levels(lab.lightness, a_, b_);

        // Inverse of the two segment interpolation in `okhsl_to_srgb`.
        let saturation = if chroma < levels.mid {
            let k_1 = MID * levels.zero;
            let k_2 = 1.0 - k_1 / levels.mid;

            let t = chroma / (k_1 + k_2 * chroma);
            t * MID
        } else {
            let k_0 = levels.mid;
            let k_1 = (1.0 - MID) * levels.mid * levels.mid * MID_INV * MID_INV / levels.zero;
            let k_2 = 1.0 - k_1 / (levels.max - levels.mid);

            let t = (chroma - k_0) / (k_1 + k_2 * (chroma - k_0));
            MID + (1.0 - MID) * t
        };

        Okhsl::new(hue, saturation, toe(lab.lightness))
    }

    pub fn okhsl_to_srgb(hsl: &Okhsl) -> Srgb {
        if hsl.lightness >= 1.0 {
            return Srgb::new(1.0, 1.0, 1.0);
        } else if hsl.lightness <= 0.0 {
            return Srgb::new(0.0, 0.0, 0.0);
        }

        let (a_, b_) = hue_direction(hsl.hue);
        let lightness = toe_inv(hsl.lightness);

        let levels = chroma_levels(lightness, a_, b_);

        let chroma = if hsl.saturation < MID {
            let t = MID_INV * hsl.saturation;

            let k_1 = MID * levels.zero;
            let k_2 = 1.0 - k_1 / levels.mid;

            t * k_1 / (1.0 - k_2 * t)
        } else {
            let t = (hsl.saturation - MID) / (1.0 - MID);

            let k_0 = levels.mid;
            let k_1 = (1.0 - MID) * levels.mid * levels.mid * MID_INV * MID_INV / levels.zero;
            let k_2 = 1.0 - k_1 / (levels.max - levels.mid);

            k_0 + t * k_1 / (1.0 - k_2 * t)
        };

        Oklab::new(lightness, chroma * a_, chroma * b_)
            .to_linear_srgb()
            .to_gamma_encoded()
    }

    pub fn srgb_to_okhsv(rgb: &Srgb) -> Okhsv {
        let lab = Oklab::from(rgb.to_linear_light());
        let (hue, chroma, a_, b_) = hue_and_chroma(&lab);

        if chroma == 0.0 {
            return Okhsv::new(hue, 0.0, toe(lab.lightness));
        }

        let cusp = find_cusp(a_, b_);
        let St { s: s_max, t: t_max } = cusp.to_st();
        let s_0 = 0.5;
        let k = 1.0 - s_0 / s_max;

        // Find the lightness and chroma the color would have at value one,
        // as if the gamut were a perfect triangle.
        let t = t_max / (chroma + lab.lightness * t_max);
        let l_v = t * lab.lightness;
        let c_v = t * chroma;

        // Then undo the compensation for the toe and the curved top of the
        // triangle.
        let l_vt = toe_inv(l_v);
        let c_vt = c_v * l_vt / l_v;

        let rgb_scale = Oklab::new(l_vt, a_ * c_vt, b_ * c_vt).to_linear_srgb();
        let scale_l = (1.0
            / rgb_scale
                .red
                .max(rgb_scale.green)
                .max(rgb_scale.blue.max(0.0)))
        .cbrt();

        let lightness = toe(lab.lightness / scale_l);

        let value = lightness / l_v;
        let saturation = (s_0 + t_max) * c_v / ((t_max * s_0) + t_max * k * c_v);

        Okhsv::new(hue, saturation, value)
    }

    pub fn okhsv_to_srgb(hsv: &Okhsv) -> Srgb {
        if hsv.value <= 0.0 {
            return Srgb::new(0.0, 0.0, 0.0);
        }

        let (a_, b_) = hue_direction(hsv.hue);

        let cusp = find_cusp(a_, b_);
        let St { s: s_max, t: t_max } = cusp.to_st();
        let s_0 = 0.5;
        let k = 1.0 - s_0 / s_max;

        // Lightness and chroma as if the gamut were a perfect triangle,
        // first at value one, then for the requested value.
        let l_v = 1.0 - hsv.saturation * s_0 / (s_0 + t_max - t_max * k * hsv.saturation);
        let c_v = hsv.saturation * t_max * s_0 / (s_0 + t_max - t_max * k * hsv.saturation);

        let mut lightness = hsv.value * l_v;
        let mut chroma = hsv.value * c_v;

        // Compensate for both the toe and the curved top of the triangle.
        let l_vt = toe_inv(l_v);
        let c_vt = c_v * l_vt / l_v;

        let l_new = toe_inv(lightness);
        chroma = chroma * l_new / lightness;
        lightness = l_new;

        let rgb_scale = Oklab::new(l_vt, a_ * c_vt, b_ * c_vt).to_linear_srgb();
        let scale_l = (1.0
            / rgb_scale
                .red
                .max(rgb_scale.green)
                .max(rgb_scale.blue.max(0.0)))
        .cbrt();

        lightness *= scale_l;
        chroma *= scale_l;

        Oklab::new(lightness, chroma * a_, chroma * b_)
            .to_linear_srgb()
            .to_gamma_encoded()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::assert_component_eq;

        #[test]
        fn toe_round_trips() {
            for value in [0.0, 0.25, 0.5, 0.75, 1.0] {
                assert_component_eq!(toe_inv(toe(value)), value);
                assert_component_eq!(toe(toe_inv(value)), value);
            }
        }

        #[test]
        fn toe_keeps_the_end_points() {
            assert_component_eq!(toe(0.0), 0.0);
            assert_component_eq!(toe(1.0), 1.0);
            assert_component_eq!(toe_inv(1.0), 1.0);
        }

        #[test]
        fn hue_direction_is_normalized() {
            for hue in [0.0, 0.15, 0.4, 0.75, 0.99] {
                let (a_, b_) = hue_direction(hue);
                assert_component_eq!(a_ * a_ + b_ * b_, 1.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: Component = 1.0e-3;

    #[test]
    fn okhsl_round_trips_in_gamut_colors() {
        for red in [0.1, 0.35, 0.65, 0.9] {
            for green in [0.1, 0.35, 0.65, 0.9] {
                for blue in [0.1, 0.35, 0.65, 0.9] {
                    let back = Srgb::new(red, green, blue).to_okhsl().to_srgb();
                    assert_abs_diff_eq!(back.red, red, epsilon = EPSILON);
                    assert_abs_diff_eq!(back.green, green, epsilon = EPSILON);
                    assert_abs_diff_eq!(back.blue, blue, epsilon = EPSILON);
                }
            }
        }
    }

    #[test]
    fn okhsv_round_trips_in_gamut_colors() {
        for red in [0.1, 0.35, 0.65, 0.9] {
            for green in [0.1, 0.35, 0.65, 0.9] {
                for blue in [0.1, 0.35, 0.65, 0.9] {
                    let back = Srgb::new(red, green, blue).to_okhsv().to_srgb();
                    assert_abs_diff_eq!(back.red, red, epsilon = EPSILON);
                    assert_abs_diff_eq!(back.green, green, epsilon = EPSILON);
                    assert_abs_diff_eq!(back.blue, blue, epsilon = EPSILON);
                }
            }
        }
    }

    #[test]
    fn black_maps_to_zero_lightness() {
        let hsl = Srgb::new(0.0, 0.0, 0.0).to_okhsl();
        assert_eq!(hsl.hue, 0.0);
        assert_eq!(hsl.saturation, 0.0);
        assert_abs_diff_eq!(hsl.lightness, 0.0, epsilon = 1.0e-4);

        let back = hsl.to_srgb();
        assert_abs_diff_eq!(back.red, 0.0, epsilon = 1.0e-4);
        assert_abs_diff_eq!(back.green, 0.0, epsilon = 1.0e-4);
        assert_abs_diff_eq!(back.blue, 0.0, epsilon = 1.0e-4);
    }

    #[test]
    fn white_maps_to_unit_lightness() {
        let hsl = Srgb::new(1.0, 1.0, 1.0).to_okhsl();
        assert_eq!(hsl.saturation, 0.0);
        assert_abs_diff_eq!(hsl.lightness, 1.0, epsilon = 1.0e-4);

        let back = hsl.to_srgb();
        assert_abs_diff_eq!(back.red, 1.0, epsilon = 1.0e-4);
        assert_abs_diff_eq!(back.green, 1.0, epsilon = 1.0e-4);
        assert_abs_diff_eq!(back.blue, 1.0, epsilon = 1.0e-4);
    }

    #[test]
    fn exact_lightness_end_points_are_pinned() {
        let white = Okhsl::new(0.3, 0.7, 1.0).to_srgb();
        assert_eq!(white.red, 1.0);
        assert_eq!(white.green, 1.0);
        assert_eq!(white.blue, 1.0);

        let black = Okhsl::new(0.3, 0.7, 0.0).to_srgb();
        assert_eq!(black.red, 0.0);
        assert_eq!(black.green, 0.0);
        assert_eq!(black.blue, 0.0);

        let black = Okhsv::new(0.3, 0.7, 0.0).to_srgb();
        assert_eq!(black.red, 0.0);
        assert_eq!(black.green, 0.0);
        assert_eq!(black.blue, 0.0);
    }

    #[test]
    fn full_saturation_lands_on_the_gamut_boundary() {
        for hue in [0.0, 0.2, 0.4, 0.6, 0.8] {
            for lightness in [0.3, 0.5, 0.7] {
                let linear = Okhsl::new(hue, 1.0, lightness).to_srgb().to_linear_light();
                let min = linear.red.min(linear.green).min(linear.blue);
                let max = linear.red.max(linear.green).max(linear.blue);
                assert!(
                    min < 5.0e-3 || max > 1.0 - 5.0e-3,
                    "hue {} lightness {} is not on the boundary: {:?}",
                    hue,
                    lightness,
                    linear
                );
            }
        }
    }

    #[test]
    fn achromatic_colors_have_no_saturation() {
        for gray in [0.125, 0.25, 0.5, 0.75, 1.0] {
            let srgb = Srgb::new(gray, gray, gray);
            assert_eq!(srgb.to_okhsl().saturation, 0.0);
            assert_eq!(srgb.to_okhsv().saturation, 0.0);
        }
    }

    #[test]
    fn pure_red_in_okhsv() {
        let hsv = Srgb::new(1.0, 0.0, 0.0).to_okhsv();
        assert_abs_diff_eq!(hsv.hue, 0.0812, epsilon = 2.0e-2);
        assert_abs_diff_eq!(hsv.saturation, 1.0, epsilon = 1.0e-2);
        assert_abs_diff_eq!(hsv.value, 1.0, epsilon = 1.0e-2);

        let back = hsv.to_srgb();
        assert_abs_diff_eq!(back.red, 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(back.green, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(back.blue, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn every_in_range_triple_is_displayable() {
        for hue in [0.0, 0.25, 0.5, 0.75] {
            for saturation in [0.0, 0.5, 1.0] {
                for third in [0.1, 0.5, 0.9] {
                    let rgb = Okhsl::new(hue, saturation, third).to_srgb();
                    for component in [rgb.red, rgb.green, rgb.blue] {
                        assert!(component > -1.0e-2 && component < 1.0 + 1.0e-2);
                    }

                    let rgb = Okhsv::new(hue, saturation, third).to_srgb();
                    for component in [rgb.red, rgb.green, rgb.blue] {
                        assert!(component > -1.0e-2 && component < 1.0 + 1.0e-2);
                    }
                }
            }
        }
    }

    #[test]
    fn extracted_hue_stays_within_a_single_turn() {
        // Exercise hue directions in all four quadrants of the chroma plane.
        for (red, green, blue) in [
            (1.0, 0.0, 0.0),
            (1.0, 1.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 1.0, 1.0),
            (0.0, 0.0, 1.0),
            (1.0, 0.0, 1.0),
            (0.3, 0.6, 0.2),
        ] {
            let srgb = Srgb::new(red, green, blue);

            let hue = srgb.to_okhsl().hue;
            assert!(
                (0.0..1.0).contains(&hue),
                "okhsl hue {} for ({}, {}, {}) is out of range",
                hue,
                red,
                green,
                blue
            );

            let hue = srgb.to_okhsv().hue;
            assert!(
                (0.0..1.0).contains(&hue),
                "okhsv hue {} for ({}, {}, {}) is out of range",
                hue,
                red,
                green,
                blue
            );
        }
    }

    #[test]
    fn conversions_are_deterministic() {
        let srgb = Srgb::new(0.3, 0.6, 0.2);
        let first = srgb.to_okhsl();
        let second = srgb.to_okhsl();
        assert_eq!(first.hue, second.hue);
        assert_eq!(first.saturation, second.saturation);
        assert_eq!(first.lightness, second.lightness);
    }

    #[test]
    fn to_space_round_trips_between_all_spaces() {
        let source = Color::new(Space::Srgb, 0.8, 0.4, 0.2, 1.0);

        for space in [
            Space::Srgb,
            Space::LinearSrgb,
            Space::Oklab,
            Space::Okhsl,
            Space::Okhsv,
        ] {
            let there = source.to_space(space);
            assert_eq!(there.space, space);

            let back = there.to_space(Space::Srgb);
            assert_abs_diff_eq!(back.components.0, 0.8, epsilon = EPSILON);
            assert_abs_diff_eq!(back.components.1, 0.4, epsilon = EPSILON);
            assert_abs_diff_eq!(back.components.2, 0.2, epsilon = EPSILON);
        }
    }

    #[test]
    fn to_space_with_the_same_space_is_a_clone() {
        let source = Color::new(Space::Okhsl, 0.1, 0.2, 0.3, 0.4);
        assert_eq!(source.to_space(Space::Okhsl), source);
    }

    #[test]
    fn converting_a_color_should_maintain_source_alpha() {
        let hsl = Color::new(Space::Okhsl, 0.5, 0.4, 0.4, 0.25);
        let srgb = hsl.to_space(Space::Srgb);
        assert_eq!(srgb.alpha, 0.25);
    }

    #[test]
    fn out_of_range_inputs_do_not_crash() {
        // Best effort output only; just make sure nothing panics.
        let _ = Srgb::new(1.5, -0.5, 2.0).to_okhsl();
        let _ = Srgb::new(1.5, -0.5, 2.0).to_okhsv();
        let _ = Okhsl::new(1.5, 2.0, 0.5).to_srgb();
        let _ = Okhsv::new(-0.25, 0.5, 1.5).to_srgb();
    }
}
