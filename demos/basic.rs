use anyhow::{Context, Result};
use nalgebra::Vector3;
use rs_dh_kinematics::jacobian::Jacobian;
use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics};
use rs_dh_kinematics::kinematics_impl::DHKinematics;
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::utils::{dump_joints, dump_pose};

/// Forward kinematics, Jacobian velocity mappings, and a position
/// inverse-kinematics round trip on the UR3 model.
fn main() -> Result<()> {
    let robot = DHKinematics::new(Parameters::ur3());

    let joints: Joints = [0.1, -0.5, 0.8, -0.2, 0.5, 0.1];
    println!("Joint configuration:");
    dump_joints(&joints);

    let pose = robot.forward(&joints);
    println!("Tool pose:");
    dump_pose(&pose);

    // Map a joint velocity to the tool velocity and back.
    let jacobian = Jacobian::new(&robot, &joints);
    let dq: Joints = [1.0, 0.5, -0.2, 0.0, 0.0, 0.1];
    let tool_velocity = jacobian.tool_velocity(&dq);
    println!("Tool velocity for dq {:?}: {:.4}", dq, tool_velocity);

    let recovered = jacobian
        .joint_velocities(&tool_velocity)
        .ok()
        .context("Jacobian pseudo-inverse failed")?;
    println!("Recovered joint velocities: {:?}", recovered);

    // Minimum-norm joint velocities for a pure linear tool velocity.
    let linear = Vector3::new(0.0, 0.05, 0.0);
    let minimum_norm = jacobian
        .joint_velocities_linear(&linear)
        .ok()
        .context("position sub-Jacobian pseudo-inverse failed")?;
    println!("Minimum-norm joint velocities for {:?} m/s: {:?}", linear, minimum_norm);

    // Inverse kinematics back to the forward-kinematics position.
    let target = robot.tool_position(&joints);
    // The all-zero posture is close to singular and makes a poor start.
    let seed: Joints = [0.1; 6];
    let solution = robot
        .inverse(&target, &seed)
        .context("inverse kinematics did not converge")?;
    println!("Inverse kinematics solution:");
    dump_joints(&solution);
    println!("Re-verified position error: {:.2e} m",
             (robot.tool_position(&solution) - target).norm());

    Ok(())
}
