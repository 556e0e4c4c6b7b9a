//! Parameter tables of concrete robot models.

use crate::parameters::dh_kinematics::Parameters;
use std::f64::consts::{FRAC_PI_2, PI};

impl Parameters {
    /// Universal Robots UR3, dimensions in meters. The angular offsets place
    /// the zero configuration with the arm horizontal along the base y axis.
    pub fn ur3() -> Self {
        // Shoulder, upper arm, forearm and wrist dimensions.
        let r1 = 0.152;
        let r2 = 0.120;
        let a2 = 0.244;
        let a3 = 0.213;
        let r4 = 0.010;
        let r5 = 0.083;
        let r6 = 0.082;

        Parameters {
            a: [0.0, 0.0, a2, a3, 0.0, 0.0],
            alpha: [0.0, FRAC_PI_2, 0.0, 0.0, FRAC_PI_2, -FRAC_PI_2],
            r: [r1, -r2, 0.0, r4, r5, r6],
            offsets: [FRAC_PI_2, 0.0, 0.0, FRAC_PI_2, 0.0, -FRAC_PI_2],
        }
    }

    /// The posture used to seed trajectory generation: elbow bent, wrist
    /// pointing down, well away from singular configurations.
    pub fn ur3_reference_posture() -> [f64; 6] {
        [0.0, FRAC_PI_2, -PI / 4.0, 0.0, -FRAC_PI_2, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ur3_matches_slices_constructor() {
        let ur3 = Parameters::ur3();
        let rebuilt = Parameters::from_slices(&ur3.a, &ur3.alpha, &ur3.r, &ur3.offsets)
            .expect("UR3 table is well formed");
        assert_eq!(rebuilt.r, ur3.r);
        assert_eq!(rebuilt.offsets, ur3.offsets);
    }
}
