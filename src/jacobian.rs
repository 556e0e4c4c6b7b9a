//! Geometric Jacobian and the direct/inverse differential velocity mappings.

extern crate nalgebra as na;
use crate::kinematic_traits::{DOF, Frames, Joints, Kinematics};
use crate::utils::{joints_to_vector6, vector6_to_joints};
use na::linalg::SVD;
use na::{Matrix3x6, Matrix6, Vector3, Vector6};

/// Singular values below this are treated as zero when the pseudo-inverse is
/// computed.
const PSEUDO_INVERSE_EPSILON: f64 = 1e-10;

/// The 6x6 geometric Jacobian at one joint configuration.
///
/// Column i maps the angular velocity of joint i to the tool velocity,
/// stacked as \[linear(3); angular(3)\]. The matrix depends on the
/// configuration, so it is recomputed fresh every time and never cached
/// across configurations.
pub struct Jacobian {
    matrix: Matrix6<f64>,
}

impl Jacobian {
    /// Computes the Jacobian for the given robot and joint configuration.
    pub fn new(robot: &dyn Kinematics, qs: &Joints) -> Self {
        Self::from_frames(&robot.frames(qs))
    }

    /// Builds the Jacobian geometrically from the cumulative transform chain.
    ///
    /// With modified DH parameters, joint i rotates about the z axis of its
    /// own absolute frame T(0→i), not the previous one; using the previous
    /// frame here breaks the finite-difference law by orders of magnitude.
    /// Column i is \[z_i × (p_tool − o_i); z_i\] where z_i and o_i come from
    /// the rotation and translation of T(0→i), and p_tool is the origin of
    /// the tool frame.
    pub fn from_frames(frames: &Frames) -> Self {
        let tool = frames[5].translation.vector;
        let mut matrix = Matrix6::zeros();

        for i in 0..DOF {
            let z: Vector3<f64> = frames[i].rotation * Vector3::z();
            let origin = frames[i].translation.vector;

            let linear = z.cross(&(tool - origin));
            matrix.fixed_view_mut::<3, 1>(0, i).copy_from(&linear);
            matrix.fixed_view_mut::<3, 1>(3, i).copy_from(&z);
        }

        Self { matrix }
    }

    pub fn matrix(&self) -> &Matrix6<f64> {
        &self.matrix
    }

    /// The position sub-Jacobian: the top 3 rows, mapping joint velocities to
    /// the linear tool velocity only.
    pub fn position_part(&self) -> Matrix3x6<f64> {
        self.matrix.fixed_view::<3, 6>(0, 0).into_owned()
    }

    /// Direct differential mapping: tool velocity J·dq for the given joint
    /// velocities, stacked as \[linear(3); angular(3)\].
    pub fn tool_velocity(&self, joint_velocities: &Joints) -> Vector6<f64> {
        self.matrix * joints_to_vector6(*joint_velocities)
    }

    /// Inverse differential mapping: the joint velocities producing the
    /// desired 6D tool velocity.
    ///
    /// Always goes through the Moore-Penrose pseudo-inverse: at a full-rank
    /// configuration this is the exact inverse, at or near a kinematic
    /// singularity it degrades gracefully to the least-squares minimum-norm
    /// solution instead of raising an error.
    pub fn joint_velocities(
        &self,
        tool_velocity: &Vector6<f64>,
    ) -> Result<Joints, &'static str> {
        let svd = SVD::new(self.matrix, true, true);
        let pseudo_inverse = svd.pseudo_inverse(PSEUDO_INVERSE_EPSILON)?;
        Ok(vector6_to_joints(pseudo_inverse * tool_velocity))
    }

    /// Inverse differential mapping through the position sub-Jacobian only:
    /// the minimum-norm joint velocities producing the desired linear tool
    /// velocity, leaving the 3 redundant degrees of freedom unconstrained.
    pub fn joint_velocities_linear(
        &self,
        linear_velocity: &Vector3<f64>,
    ) -> Result<Joints, &'static str> {
        let svd = SVD::new(self.position_part(), true, true);
        let pseudo_inverse = svd.pseudo_inverse(PSEUDO_INVERSE_EPSILON)?;
        Ok(vector6_to_joints(pseudo_inverse * linear_velocity))
    }
}
