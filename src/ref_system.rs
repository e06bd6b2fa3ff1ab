use nalgebra::{Matrix3, Matrix4, Rotation3, Vector3};
use once_cell::sync::Lazy;

use crate::constants::{Radian, DPI, J2000_OBLIQUITY_DEG, VSOP87_POLE_DRIFT_DEG};

/// Reference frames linked together by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefFrame {
    /// Local horizon of the observer (z toward the zenith)
    AltAz,
    /// Equator of date of the home body
    Equatorial,
    /// Mean equator and equinox of J2000.0, precession free
    J2000,
    /// Heliocentric ecliptic frame of the VSOP87 planetary theory
    HeliocentricEcliptic,
    /// Eye (view) frame: x to the right, y up, looking toward -z
    Eye,
}

/// Principal axes used by [`rotmt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotation from the J2000 equatorial frame to the VSOP87 ecliptic frame.
///
/// This is a process-wide constant: the fixed J2000 obliquity tilts the equator onto the
/// ecliptic, and a tiny drift of the ecliptic pole aligns the VSOP87 equinox.
pub static MAT_J2000_TO_VSOP87: Lazy<Matrix4<f64>> = Lazy::new(|| {
    (rotmt(-J2000_OBLIQUITY_DEG.to_radians(), Axis::X)
        * rotmt(VSOP87_POLE_DRIFT_DEG.to_radians(), Axis::Z))
    .to_homogeneous()
});

/// Rotation from the VSOP87 ecliptic frame to the J2000 equatorial frame
pub static MAT_VSOP87_TO_J2000: Lazy<Matrix4<f64>> =
    Lazy::new(|| MAT_J2000_TO_VSOP87.transpose());

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes (X, Y, or Z).
///
/// This function builds a [`nalgebra::Matrix3`] representing an **active rotation**
/// of a 3D vector by an angle `alpha` around the chosen axis.
/// The rotation follows the **direct (positive/trigonometric)** sense:
/// counter-clockwise when looking **along the axis toward the origin**.
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians** (positive = direct/trigonometric sense).
/// * `axis` - Axis of rotation.
///
/// # Returns
///
/// A 3×3 rotation matrix `R` such that the rotated vector is `x' = R · x`.
///
/// # Remarks
///
/// * This function uses [`nalgebra::Rotation3::from_axis_angle`] internally,
///   which ensures orthonormality and numerical stability.
/// * The returned matrix is **orthonormal** and satisfies `R.transpose() == R.inverse()`.
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Homogeneous 4×4 translation by `v`
pub fn translation(v: &Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new_translation(v)
}

/// Upper-left 3×3 block of a homogeneous matrix applied to `v` (translation ignored).
pub fn rotate(m: &Matrix4<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    m.fixed_view::<3, 3>(0, 0) * v
}

/// Convert a 3D Cartesian direction to spherical longitude and latitude.
///
/// Returns
/// --------
/// * Tuple `(λ, β)` in radians, `λ ∈ [0, 2π)`, `β ∈ [−π/2, π/2]`.
///   A zero vector yields `(0, 0)`.
pub fn cartesian_to_spherical(v: &Vector3<f64>) -> (Radian, Radian) {
    let norm = v.norm();
    if norm == 0.0 {
        return (0.0, 0.0);
    }
    let lat = (v.z / norm).clamp(-1.0, 1.0).asin();
    let lon = v.y.atan2(v.x).rem_euclid(DPI);
    (lon, lat)
}
