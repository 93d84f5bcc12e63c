//! Math utility functions.

use euclid::default::{Transform3D, Vector3D};

use crate::color::{Component, Components};

/// A 3D transform used to hold the 3x3 matrices of the color conversions.
pub type Transform = Transform3D<Component>;

type Vector = Vector3D<Component>;

/// Multiply the given matrix in `transform` with the 3 components.
pub fn transform(transform: &Transform, components: Components) -> Components {
    let Vector { x, y, z, .. } = transform.transform_vector3d(Vector::new(
        components.0,
        components.1,
        components.2,
    ));
    Components(x, y, z)
}

/// Create a [`Transform`] from a 3x3 matrix. The arguments are given a
/// column of the matrix at a time.
#[allow(clippy::too_many_arguments)]
pub const fn transform_3x3(
    m11: Component,
    m12: Component,
    m13: Component,
    m21: Component,
    m22: Component,
    m23: Component,
    m31: Component,
    m32: Component,
    m33: Component,
) -> Transform {
    Transform::new(
        m11, m12, m13, 0.0, //
        m21, m22, m23, 0.0, //
        m31, m32, m33, 0.0, //
        0.0, 0.0, 0.0, 1.0, //
    )
}

/// Normalize a hue angle in degrees into the range [0, 360).
pub fn normalize_hue(hue: Component) -> Component {
    hue.rem_euclid(360.0)
}
