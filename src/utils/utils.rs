//! Helper functions

use crate::kinematic_traits::{DOF, Joints};
use nalgebra::{Isometry3, UnitQuaternion, Vector6};
use std::f64::consts::PI;

/// Converts ```nalgebra::Vector6<f64>``` to Joints ([f64; 6])
pub fn vector6_to_joints(v: Vector6<f64>) -> Joints {
    [v[0], v[1], v[2], v[3], v[4], v[5]]
}

/// Converts ```Joints ([f64; 6])``` to a ```Vector6<f64>```
pub fn joints_to_vector6(j: Joints) -> Vector6<f64> {
    Vector6::new(j[0], j[1], j[2], j[3], j[4], j[5])
}

/// Builds a joint configuration from a possibly shorter slice, padding the
/// missing trailing angles with zero. Extra entries are ignored. This keeps
/// the permissive behavior some callers depend on; prefer passing `Joints`
/// directly so the length cannot mismatch in the first place.
pub fn joints_from_slice(angles: &[f64]) -> Joints {
    std::array::from_fn(|i| if i < angles.len() { angles[i] } else { 0.0 })
}

/// Normalizes an angle into the half-open interval (-π, π].
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(2.0 * PI);
    if wrapped > PI { wrapped - 2.0 * PI } else { wrapped }
}

/// Normalizes every joint angle into (-π, π].
pub fn normalize_joints(joints: &Joints) -> Joints {
    std::array::from_fn(|i| normalize_angle(joints[i]))
}

/// Print joint values, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_joints(joints: &Joints) {
    let mut row_str = String::new();
    for joint_idx in 0..DOF {
        let computed = joints[joint_idx];
        row_str.push_str(&format!("{:5.2} ", computed.to_degrees()));
    }
    println!("[{}]", row_str.trim_end());
}

pub fn dump_pose(isometry: &Isometry3<f64>) {
    let translation = isometry.translation.vector;
    let rotation: UnitQuaternion<f64> = isometry.rotation;
    println!(
        "x: {:.5}, y: {:.5}, z: {:.5},  quat: {:.5},{:.5},{:.5},{:.5}",
        translation.x, translation.y, translation.z, rotation.i, rotation.j, rotation.k, rotation.w
    );
}
