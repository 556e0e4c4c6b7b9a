//! Defines the common data types and the kinematics trait all models implement.

extern crate nalgebra as na;

use na::{Isometry3, Point3};

/// Number of degrees of freedom of the manipulators this crate works with.
pub const DOF: usize = 6;

/// Joint configuration: the rotation angles of the 6 joints, in radians.
/// No joint limits are enforced at this level.
pub type Joints = [f64; 6];

/// Pose of the robot tool (tool center point). Contains both the Cartesian
/// position and the rotation, together forming an element of SE(3).
pub type Pose = Isometry3<f64>;

/// Cumulative base-to-frame transforms T(0→1) .. T(0→6) of the kinematic
/// chain. Frame 0 is the fixed base and is always the identity, so it is not
/// stored; the last entry is the tool pose.
pub type Frames = [Pose; 6];

pub trait Kinematics: Send + Sync {
    /// Tool pose for the given joint configuration (forward kinematics).
    fn forward(&self, qs: &Joints) -> Pose;

    /// The cumulative transforms of the whole chain for the given joint
    /// configuration. The geometric Jacobian is built from these, so this
    /// method exists separately from `forward` (that only returns the last
    /// frame).
    fn frames(&self, qs: &Joints) -> Frames;

    /// Joint configuration placing the tool at the given Cartesian position,
    /// searched numerically starting from `previous`. Orientation is not
    /// constrained. Returns `None` if the solver does not converge; callers
    /// must check for this explicitly.
    fn inverse(&self, target: &Point3<f64>, previous: &Joints) -> Option<Joints>;
}
