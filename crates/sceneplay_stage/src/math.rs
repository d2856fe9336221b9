// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interpolation and quaternion helpers.
//!
//! Vectors are `[f32; 3]`, quaternions are `[f32; 4]` in `(x, y, z, w)`
//! order. Rotations follow the yaw-pitch-roll euler convention the original
//! authoring data uses (applied Z, then X, then Y).

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two floats
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Interpolate Vec3
    pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
        [
            Self::lerp(a[0], b[0], t),
            Self::lerp(a[1], b[1], t),
            Self::lerp(a[2], b[2], t),
        ]
    }

    /// Spherical linear interpolation for quaternions
    pub fn slerp(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
        let mut dot = a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3];

        // Handle opposite quaternions
        let mut b = b;
        if dot < 0.0 {
            b = [-b[0], -b[1], -b[2], -b[3]];
            dot = -dot;
        }

        // Use lerp for very close quaternions
        if dot > 0.9995 {
            let lerped = [
                Self::lerp(a[0], b[0], t),
                Self::lerp(a[1], b[1], t),
                Self::lerp(a[2], b[2], t),
                Self::lerp(a[3], b[3], t),
            ];
            return normalize(lerped);
        }

        let theta_0 = dot.acos();
        let theta = theta_0 * t;
        let sin_theta = theta.sin();
        let sin_theta_0 = theta_0.sin();

        let s0 = (theta_0 - theta).cos() - dot * sin_theta / sin_theta_0;
        let s1 = sin_theta / sin_theta_0;

        [
            a[0] * s0 + b[0] * s1,
            a[1] * s0 + b[1] * s1,
            a[2] * s0 + b[2] * s1,
            a[3] * s0 + b[3] * s1,
        ]
    }
}

/// The identity quaternion
pub const QUAT_IDENTITY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Normalize a quaternion. Returns identity for a zero-length input.
pub fn normalize(q: [f32; 4]) -> [f32; 4] {
    let len = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
    if len <= f32::EPSILON {
        return QUAT_IDENTITY;
    }
    [q[0] / len, q[1] / len, q[2] / len, q[3] / len]
}

/// Hamilton product `a * b` (apply `b`, then `a`)
pub fn quat_mul(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    [
        a[3] * b[0] + a[0] * b[3] + a[1] * b[2] - a[2] * b[1],
        a[3] * b[1] - a[0] * b[2] + a[1] * b[3] + a[2] * b[0],
        a[3] * b[2] + a[0] * b[1] - a[1] * b[0] + a[2] * b[3],
        a[3] * b[3] - a[0] * b[0] - a[1] * b[1] - a[2] * b[2],
    ]
}

/// Quaternion for a rotation of `degrees` about `axis`
pub fn quat_about_axis(axis: [f32; 3], degrees: f32) -> [f32; 4] {
    let len = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
    if len <= f32::EPSILON {
        return QUAT_IDENTITY;
    }
    let half = degrees.to_radians() * 0.5;
    let s = half.sin() / len;
    [axis[0] * s, axis[1] * s, axis[2] * s, half.cos()]
}

/// Quaternion from euler angles in degrees (Z, then X, then Y)
pub fn quat_from_euler(euler: [f32; 3]) -> [f32; 4] {
    let qx = quat_about_axis([1.0, 0.0, 0.0], euler[0]);
    let qy = quat_about_axis([0.0, 1.0, 0.0], euler[1]);
    let qz = quat_about_axis([0.0, 0.0, 1.0], euler[2]);
    quat_mul(quat_mul(qy, qx), qz)
}

/// Angle in degrees between two unit quaternions
pub fn quat_angle(a: [f32; 4], b: [f32; 4]) -> f32 {
    let dot = (a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]).abs();
    2.0 * dot.clamp(0.0, 1.0).acos().to_degrees()
}

/// Euclidean distance between two points
pub fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slerp_hits_endpoints() {
        let a = QUAT_IDENTITY;
        let b = quat_about_axis([0.0, 1.0, 0.0], 90.0);
        let start = Interpolation::slerp(a, b, 0.0);
        let end = Interpolation::slerp(a, b, 1.0);
        assert!(quat_angle(start, a) < 1e-3);
        assert!(quat_angle(end, b) < 1e-3);
    }

    #[test]
    fn angle_between_rotations() {
        let a = quat_about_axis([0.0, 1.0, 0.0], 10.0);
        let b = quat_about_axis([0.0, 1.0, 0.0], 55.0);
        assert!((quat_angle(a, b) - 45.0).abs() < 1e-3);
    }

    #[test]
    fn euler_roundtrips_against_axis_rotation() {
        let from_euler = quat_from_euler([0.0, 90.0, 0.0]);
        let about_axis = quat_about_axis([0.0, 1.0, 0.0], 90.0);
        assert!(quat_angle(from_euler, about_axis) < 1e-3);
    }

    #[test]
    fn incremental_rotation_accumulates() {
        let step = quat_about_axis([0.0, 1.0, 0.0], 30.0);
        let mut q = QUAT_IDENTITY;
        for _ in 0..3 {
            q = normalize(quat_mul(q, step));
        }
        let target = quat_about_axis([0.0, 1.0, 0.0], 90.0);
        assert!(quat_angle(q, target) < 1e-2);
    }
}
