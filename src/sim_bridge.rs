//! Bridge between the kinematic model's joint convention and an external
//! simulator's. The two disagree on rotation direction and zero reference
//! for some joints; the remap is a fixed, stateless, invertible affine
//! transform per joint. Actuator dispatch and simulation stepping stay on
//! the simulator side, this module only translates joint vectors.

use crate::kinematic_traits::{DOF, Joints};
use std::f64::consts::{FRAC_PI_2, PI};

/// Per-joint sign flips and angular offsets:
/// `simulated = model * sign + offset`.
#[derive(Debug, Clone, Copy)]
pub struct JointMapping {
    pub signs: [f64; 6],
    pub offsets: [f64; 6],
}

impl Default for JointMapping {
    /// Mapping between the UR3 DH model and its PyBullet description: axes
    /// 2 and 3 spin the other way, axes 4 and 5 are zeroed elsewhere.
    fn default() -> Self {
        JointMapping {
            signs: [1.0, -1.0, -1.0, 1.0, 1.0, 1.0],
            offsets: [0.0, 0.0, 0.0, -FRAC_PI_2, PI, 0.0],
        }
    }
}

impl JointMapping {
    /// Model convention to simulator convention.
    pub fn to_simulation(&self, joints: &Joints) -> Joints {
        std::array::from_fn(|i| joints[i] * self.signs[i] + self.offsets[i])
    }

    /// Simulator convention back to model convention.
    pub fn from_simulation(&self, joints: &Joints) -> Joints {
        std::array::from_fn(|i| (joints[i] - self.offsets[i]) * self.signs[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_is_identity() {
        let mapping = JointMapping::default();
        let joints: Joints = [0.3, -1.2, 0.7, 2.0, -0.4, 1.5];
        let back = mapping.from_simulation(&mapping.to_simulation(&joints));
        for i in 0..DOF {
            assert!((back[i] - joints[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_known_pair() {
        // A fixed model/simulator pair, worked out by hand from the sign and
        // offset table.
        let mapping = JointMapping::default();
        let model: Joints = [0.0, -FRAC_PI_2, FRAC_PI_2, -FRAC_PI_2, PI, 0.0];
        let simulated = mapping.to_simulation(&model);
        let expected: Joints = [0.0, FRAC_PI_2, -FRAC_PI_2, -PI, 2.0 * PI, 0.0];
        for i in 0..DOF {
            assert!(
                (simulated[i] - expected[i]).abs() < 1e-12,
                "joint {}: {} != {}",
                i + 1,
                simulated[i],
                expected[i]
            );
        }
    }
}
