//! Implements the transform chain and forward kinematics for manipulators
//! described by a modified Denavit-Hartenberg parameter table.

use crate::ik::IkSolver;
use crate::kinematic_traits::{DOF, Frames, Joints, Kinematics, Pose};
use crate::parameters::dh_kinematics::Parameters;
use nalgebra::{Matrix3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};

/// Kinematic model driven directly by the DH parameter table. All methods are
/// pure: transforms are produced fresh per call and composed, never mutated,
/// so no stale state can leak between configurations.
pub struct DHKinematics {
    parameters: Parameters,
}

impl DHKinematics {
    /// Creates a new `DHKinematics` instance with the given parameters.
    pub fn new(parameters: Parameters) -> Self {
        DHKinematics { parameters }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The transform T(i-1→i) between two consecutive joints. The total
    /// rotation angle is the joint angle plus the angular offset of the
    /// model; the link parameters are taken at index i-1 and the joint
    /// offset distance at index i, per the modified DH convention.
    pub fn joint_transform(&self, joint: usize, angle: f64) -> Pose {
        let p = &self.parameters;
        let theta = angle + p.offsets[joint];
        let (s_t, c_t) = theta.sin_cos();
        let (s_a, c_a) = p.alpha[joint].sin_cos();
        let r = p.r[joint];

        let rotation = Matrix3::new(
            c_t, -s_t, 0.0,
            s_t * c_a, c_t * c_a, -s_a,
            s_t * s_a, c_t * s_a, c_a,
        );
        let translation = Vector3::new(p.a[joint], -r * s_a, r * c_a);

        Pose::from_parts(
            Translation3::from(translation),
            UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation)),
        )
    }

    /// The per-joint transforms T(0→1), T(1→2), .. T(5→6) for the given
    /// configuration.
    pub fn local_transforms(&self, qs: &Joints) -> [Pose; 6] {
        std::array::from_fn(|i| self.joint_transform(i, qs[i]))
    }

    /// Tool position (translation column of the tool pose).
    pub fn tool_position(&self, qs: &Joints) -> Point3<f64> {
        Point3::from(self.forward(qs).translation.vector)
    }
}

impl Kinematics for DHKinematics {
    fn forward(&self, qs: &Joints) -> Pose {
        let mut cumulative = Pose::identity();
        for i in 0..DOF {
            cumulative *= self.joint_transform(i, qs[i]);
        }
        cumulative
    }

    fn frames(&self, qs: &Joints) -> Frames {
        let mut frames = [Pose::identity(); 6];
        let mut cumulative = Pose::identity();
        for i in 0..DOF {
            cumulative *= self.joint_transform(i, qs[i]);
            frames[i] = cumulative;
        }
        frames
    }

    fn inverse(&self, target: &Point3<f64>, previous: &Joints) -> Option<Joints> {
        IkSolver::default().solve(self, target, previous)
    }
}
