//! Finding the boundary of the sRGB gamut in Oklab and mapping colors that
//! fall outside of it back in.
//! <https://bottosson.github.io/posts/gamutclipping/>

use crate::color::{Color, Component, Space};
use crate::lab::Oklab;

#[allow(clippy::manual_range_contains)]
fn in_zero_to_one(value: Component) -> bool {
    value >= 0.0 && value <= 1.0
}

/// The point of maximum chroma on the sRGB gamut boundary for a single hue.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cusp {
    /// The lightness of the cusp.
    pub lightness: Component,
    /// The chroma of the cusp.
    pub chroma: Component,
}

/// Alternative representation of the cusp, with `s = C / L` and
/// `t = C / (1 - L)`. The maximum chroma of the triangular gamut
/// approximation at a lightness L is then `min(s * L, t * (1 - L))`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct St {
    pub s: Component,
    pub t: Component,
}

impl Cusp {
    /// Convert the cusp into its [`St`] representation.
    pub fn to_st(&self) -> St {
        St {
            s: self.chroma / self.lightness,
            t: self.chroma / (1.0 - self.lightness),
        }
    }
}

/// Find the maximum saturation `S = C / L` possible for a given hue that
/// still fits in the sRGB gamut. The hue direction must be normalized so
/// that `a * a + b * b == 1`.
pub(crate) fn max_saturation(a: Component, b: Component) -> Component {
    // Max saturation is reached when one of the r, g or b channels goes
    // below zero. Select the coefficients of a polynomial approximation
    // depending on which channel that is.
    #[allow(clippy::excessive_precision)]
    let (k0, k1, k2, k3, k4, wl, wm, ws) = if -1.88170328 * a - 0.80936493 * b > 1.0 {
        // Red channel.
        (
            1.19086277,
            1.76576728,
            0.59662641,
            0.75515197,
            0.56771245,
            4.0767416621,
            -3.3077115913,
            0.2309699292,
        )
    } else if 1.81444104 * a - 1.19445276 * b > 1.0 {
        // Green channel.
        (
            0.73956515,
            -0.45954404,
            0.08285427,
            0.12541070,
            0.14503204,
            -1.2684380046,
            2.6097574011,
            -0.3413193965,
        )
    } else {
        // Blue channel.
        (
            1.35733652,
            -0.00915799,
            -1.15130210,
            -0.50559606,
            0.00692167,
            -0.0041960863,
            -0.7034186147,
            1.7076147010,
        )
    };

    let mut saturation = k0 + k1 * a + k2 * b + k3 * a * a + k4 * a * b;

    // One step of Halley's method to refine the approximation. The error is
    // below 1e-6 for all but a few blue hues, which is sufficient here.
    #[allow(clippy::excessive_precision)]
    let k_l = 0.3963377774 * a + 0.2158037573 * b;
    #[allow(clippy::excessive_precision)]
    let k_m = -0.1055613458 * a - 0.0638541728 * b;
    #[allow(clippy::excessive_precision)]
    let k_s = -0.0894841775 * a - 1.2914855480 * b;

    {
        let l_ = 1.0 + saturation * k_l;
        let m_ = 1.0 + saturation * k_m;
        let s_ = 1.0 + saturation * k_s;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        let l_ds = 3.0 * k_l * l_ * l_;
        let m_ds = 3.0 * k_m * m_ * m_;
        let s_ds = 3.0 * k_s * s_ * s_;

        let l_ds2 = 6.0 * k_l * k_l * l_;
        let m_ds2 = 6.0 * k_m * k_m * m_;
        let s_ds2 = 6.0 * k_s * k_s * s_;

        let f = wl * l + wm * m + ws * s;
        let f1 = wl * l_ds + wm * m_ds + ws * s_ds;
        let f2 = wl * l_ds2 + wm * m_ds2 + ws * s_ds2;

        saturation -= f * f1 / (f1 * f1 - 0.5 * f * f2);
    }

    saturation
}

/// Find the cusp of the sRGB gamut for the given normalized hue direction.
pub(crate) fn find_cusp(a: Component, b: Component) -> Cusp {
    let s_cusp = max_saturation(a, b);

    // Convert to linear sRGB to find the first point where at least one of
    // the r, g or b channels reaches 1.
    let rgb_at_max = Oklab::new(1.0, s_cusp * a, s_cusp * b).to_linear_srgb();
    let lightness = (1.0 / rgb_at_max.red.max(rgb_at_max.green).max(rgb_at_max.blue)).cbrt();

    Cusp {
        lightness,
        chroma: lightness * s_cusp,
    }
}

/// Find the intersection of the sRGB gamut boundary with the line defined
/// by `L = l0 * (1 - t) + t * l1` and `C = t * c1`, for the given
/// normalized hue direction and its precomputed cusp.
pub(crate) fn find_gamut_intersection(
    a: Component,
    b: Component,
    l1: Component,
    c1: Component,
    l0: Component,
    cusp: &Cusp,
) -> Component {
    // The intersections with the lower and upper halves of the gamut
    // triangle are found separately.
    if (l1 - l0) * cusp.chroma - (cusp.lightness - l0) * c1 <= 0.0 {
        // Lower half.
        return cusp.chroma * l0 / (c1 * cusp.lightness + cusp.chroma * (l0 - l1));
    }

    // Upper half. First intersect with the triangle, then refine with one
    // step of Halley's method against the actual curved boundary.
    let mut t = cusp.chroma * (l0 - 1.0) / (c1 * (cusp.lightness - 1.0) + cusp.chroma * (l0 - l1));

    {
        let dl = l1 - l0;
        let dc = c1;

        #[allow(clippy::excessive_precision)]
        let k_l = 0.3963377774 * a + 0.2158037573 * b;
        #[allow(clippy::excessive_precision)]
        let k_m = -0.1055613458 * a - 0.0638541728 * b;
        #[allow(clippy::excessive_precision)]
        let k_s = -0.0894841775 * a - 1.2914855480 * b;

        let l_dt = dl + dc * k_l;
        let m_dt = dl + dc * k_m;
        let s_dt = dl + dc * k_s;

        let lightness = l0 * (1.0 - t) + t * l1;
        let chroma = t * c1;

        let l_ = lightness + chroma * k_l;
        let m_ = lightness + chroma * k_m;
        let s_ = lightness + chroma * k_s;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        let ldt = 3.0 * l_dt * l_ * l_;
        let mdt = 3.0 * m_dt * m_ * m_;
        let sdt = 3.0 * s_dt * s_ * s_;

        let ldt2 = 6.0 * l_dt * l_dt * l_;
        let mdt2 = 6.0 * m_dt * m_dt * m_;
        let sdt2 = 6.0 * s_dt * s_dt * s_;

        #[allow(clippy::excessive_precision)]
        let r = 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s - 1.0;
        #[allow(clippy::excessive_precision)]
        let r1 = 4.0767416621 * ldt - 3.3077115913 * mdt + 0.2309699292 * sdt;
        #[allow(clippy::excessive_precision)]
        let r2 = 4.0767416621 * ldt2 - 3.3077115913 * mdt2 + 0.2309699292 * sdt2;

        let u_r = r1 / (r1 * r1 - 0.5 * r * r2);
        let t_r = -r * u_r;

        #[allow(clippy::excessive_precision)]
        let g = -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s - 1.0;
        #[allow(clippy::excessive_precision)]
        let g1 = -1.2684380046 * ldt + 2.6097574011 * mdt - 0.3413193965 * sdt;
        #[allow(clippy::excessive_precision)]
        let g2 = -1.2684380046 * ldt2 + 2.6097574011 * mdt2 - 0.3413193965 * sdt2;

        let u_g = g1 / (g1 * g1 - 0.5 * g * g2);
        let t_g = -g * u_g;

        #[allow(clippy::excessive_precision)]
        let b_ = -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s - 1.0;
        #[allow(clippy::excessive_precision)]
        let b1 = -0.0041960863 * ldt - 0.7034186147 * mdt + 1.7076147010 * sdt;
        #[allow(clippy::excessive_precision)]
        let b2 = -0.0041960863 * ldt2 - 0.7034186147 * mdt2 + 1.7076147010 * sdt2;

        let u_b = b1 / (b1 * b1 - 0.5 * b_ * b2);
        let t_b = -b_ * u_b;

        let t_r = if u_r >= 0.0 { t_r } else { Component::MAX };
        let t_g = if u_g >= 0.0 { t_g } else { Component::MAX };
        let t_b = if u_b >= 0.0 { t_b } else { Component::MAX };

        t += t_r.min(t_g).min(t_b);
    }

    t
}

impl Color {
    /// Returns true if the color is within its gamut limits.
    ///
    /// RGB based colors check their components to be inside [0..1], the
    /// cylindrical forms check against the unit cylinder, and
    /// [`Space::Oklab`] colors are converted to [`Space::LinearSrgb`] before
    /// being checked.
    pub fn in_gamut(&self) -> bool {
        match self.space {
            Space::Srgb | Space::LinearSrgb | Space::Okhsl | Space::Okhsv => {
                in_zero_to_one(self.components.0)
                    && in_zero_to_one(self.components.1)
                    && in_zero_to_one(self.components.2)
            }
            Space::Oklab => self.to_space(Space::LinearSrgb).in_gamut(),
        }
    }

    /// Return a color with each of the components clipped (clamped to
    /// [0..1]).
    /// NOTE: This is a lossy operation.
    pub fn clip(&self) -> Color {
        Color::new(
            self.space,
            self.components.0.clamp(0.0, 1.0),
            self.components.1.clamp(0.0, 1.0),
            self.components.2.clamp(0.0, 1.0),
            self.alpha,
        )
    }

    /// If this color is not within the gamut limits of its color space,
    /// project it onto the sRGB gamut boundary in Oklab, keeping the
    /// lightness constant and reducing chroma as little as possible.
    pub fn map_into_gamut_limits(&self) -> Self {
        if self.in_gamut() {
            return self.clone();
        }

        // The cylindrical forms are bounded by their own unit cylinder, not
        // by the gamut shape.
        if matches!(self.space, Space::Okhsl | Space::Okhsv) {
            return self.clip();
        }

        const EPSILON: Component = 1.0e-5;

        let lab = Oklab::from(self.to_space(Space::Oklab).components);

        let lightness = lab.lightness;
        let chroma = (lab.a * lab.a + lab.b * lab.b).sqrt().max(EPSILON);
        let a_ = lab.a / chroma;
        let b_ = lab.b / chroma;

        let l0 = lightness.clamp(0.0, 1.0);

        let cusp = find_cusp(a_, b_);
        let t = find_gamut_intersection(a_, b_, lightness, chroma, l0, &cusp);

        let l_clipped = l0 * (1.0 - t) + t * lightness;
        let c_clipped = t * chroma;

        Color::new(
            Space::Oklab,
            l_clipped,
            c_clipped * a_,
            c_clipped * b_,
            self.alpha,
        )
        .to_space(self.space)
    }
}
