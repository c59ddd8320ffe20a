// Math utilities and helper functions

use glam::{Quat, Vec3};

/// Below this squared length of the vector part a quaternion is treated as the identity rotation
pub const ROTATION_EPSILON: f32 = 1.0e-12;

/// Lift a planar rotation (radians about +Z) into a unit quaternion
pub fn planar_quat(angle: f32) -> Quat {
    Quat::from_rotation_z(angle)
}

/// Split a unit quaternion into an angle in `[0, 2π]` and a unit axis.
///
/// When the vector part vanishes the axis is undefined, so the identity case
/// returns a zero angle and a zero axis instead of dividing by zero. The
/// half angle comes from `atan2` on the vector part, which keeps small
/// rotations exact where `acos(w)` would round them away.
pub fn axis_angle(rotation: Quat) -> (f32, Vec3) {
    let imaginary = Vec3::new(rotation.x, rotation.y, rotation.z);
    let sin_sq = imaginary.length_squared();
    if sin_sq <= ROTATION_EPSILON {
        return (0.0, Vec3::ZERO);
    }

    let sin_half = sin_sq.sqrt();
    (2.0 * sin_half.atan2(rotation.w), imaginary / sin_half)
}
