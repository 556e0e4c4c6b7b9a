use anyhow::Result;
use nalgebra::Point3;
use rs_dh_kinematics::kinematics_impl::DHKinematics;
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::trajectory::{CircularPath, TrajectoryGenerator};
use std::sync::Arc;

/// Generates a complete joint-space trajectory along a circle in front of
/// the robot and prints a short report.
fn main() -> Result<()> {
    let generator = TrajectoryGenerator::new(
        Arc::new(DHKinematics::new(Parameters::ur3())),
        Parameters::ur3_reference_posture(),
    );

    let path = CircularPath {
        center: Point3::new(0.25, -0.15, 0.5),
        radius: 0.1,
    };
    let speed = 0.05;

    let trajectory = generator.generate(&path, speed);
    let (t1, t2, tf) = trajectory.switching_times;

    println!("Samples:          {}", trajectory.samples.len());
    println!("Switching times:  t1 = {:.3} s, t2 = {:.3} s, tf = {:.3} s", t1, t2, tf);
    println!("IK fallbacks:     {}", trajectory.fallback_count());

    for sample in trajectory.samples.iter().step_by(400) {
        println!(
            "t = {:6.2} s  s = {:.4} m  tool = ({:6.3}, {:6.3}, {:6.3})  q1..q3 = ({:6.3}, {:6.3}, {:6.3})",
            sample.time,
            sample.s,
            sample.position.x,
            sample.position.y,
            sample.position.z,
            sample.joints[0],
            sample.joints[1],
            sample.joints[2],
        );
    }

    Ok(())
}
