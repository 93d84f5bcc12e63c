use num_traits::Float;

use crate::{Color, Component, Space};

fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Interpolate two hue fractions along the shorter arc of the hue circle.
fn lerp_hue(a: Component, b: Component, t: Component) -> Component {
    let delta = b - a;
    let delta = if delta > 0.5 {
        delta - 1.0
    } else if delta < -0.5 {
        delta + 1.0
    } else {
        delta
    };
    (a + delta * t).rem_euclid(1.0)
}

impl Color {
    /// Linearly interpolate from this color to another in the color space
    /// specified using `t` as the progress between them. In the cylindrical
    /// forms the hue component takes the shorter arc around the hue circle.
    pub fn interpolate(&self, other: &Self, t: Component, space: Space) -> Color {
        let left = self.to_space(space);
        let right = other.to_space(space);

        let first = match space {
            Space::Okhsl | Space::Okhsv => lerp_hue(left.components.0, right.components.0, t),
            _ => lerp(left.components.0, right.components.0, t),
        };

        Color::new(
            space,
            first,
            lerp(left.components.1, right.components.1, t),
            lerp(left.components.2, right.components.2, t),
            lerp(left.alpha, right.alpha, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;
    use approx::assert_abs_diff_eq;

    #[test]
    fn basic() {
        let left = Color::new(Space::Srgb, 0.1, 0.2, 0.3, 1.0);
        let right = Color::new(Space::Srgb, 0.5, 0.6, 0.7, 1.0);
        let mixed = left.interpolate(&right, 0.5, Space::Srgb);
        assert_component_eq!(mixed.components.0, 0.3);
        assert_component_eq!(mixed.components.1, 0.4);
        assert_component_eq!(mixed.components.2, 0.5);
        assert_eq!(mixed.alpha, 1.0);
        assert_eq!(mixed.space, Space::Srgb);
    }

    #[test]
    fn hue_takes_the_shorter_arc() {
        let left = Color::new(Space::Okhsl, 0.95, 0.5, 0.5, 1.0);
        let right = Color::new(Space::Okhsl, 0.05, 0.5, 0.5, 1.0);
        let mixed = left.interpolate(&right, 0.5, Space::Okhsl);
        assert_abs_diff_eq!(mixed.components.0, 0.0, epsilon = 1.0e-6);
    }

    #[test]
    fn hue_stays_in_range_after_wrapping() {
        let left = Color::new(Space::Okhsv, 0.9, 0.5, 0.5, 1.0);
        let right = Color::new(Space::Okhsv, 0.1, 0.5, 0.5, 1.0);
        let mixed = left.interpolate(&right, 0.75, Space::Okhsv);
        assert_abs_diff_eq!(mixed.components.0, 0.05, epsilon = 1.0e-6);
        assert!(mixed.components.0 >= 0.0 && mixed.components.0 < 1.0);
    }
}
