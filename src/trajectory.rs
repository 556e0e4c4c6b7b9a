//! Multi-stage trajectory generation: a trapezoidal time law over the path
//! length, a circular operational-space path, and the joint-space scan that
//! drives the inverse kinematics solver sample by sample.

use crate::ik::IkSolver;
use crate::jacobian::Jacobian;
use crate::kinematic_traits::{DOF, Joints, Kinematics};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;
use std::sync::Arc;
use tracing::warn;

/// Trapezoidal speed profile of the path parameter s along one full turn of
/// a circle: a quarter-turn acceleration phase, a quarter-turn phase at the
/// target speed, and a half-turn deceleration phase.
#[derive(Debug, Clone, Copy)]
pub struct MotionLaw {
    /// Cruise speed reached at the end of the acceleration phase, in m/s.
    pub target_speed: f64,

    /// Total path length (the circumference), in meters.
    pub path_length: f64,

    /// Constant acceleration of the first phase.
    pub acceleration: f64,

    /// Constant deceleration magnitude of the last phase.
    pub deceleration: f64,

    /// End of the acceleration phase.
    pub t1: f64,

    /// End of the constant-speed phase.
    pub t2: f64,

    /// End of the motion.
    pub tf: f64,
}

impl MotionLaw {
    /// Computes the phase boundaries from the circle radius and the target
    /// speed. The acceleration is whatever brings the speed from zero to
    /// `speed` over a quarter turn; the deceleration brings it back to zero
    /// over the final half turn.
    pub fn trapezoidal(radius: f64, speed: f64) -> Self {
        let quarter_turn = PI * radius / 2.0;
        let half_turn = PI * radius;

        let acceleration = speed * speed / (2.0 * quarter_turn);
        let t1 = speed / acceleration;

        let t2 = t1 + quarter_turn / speed;

        let deceleration = speed * speed / (2.0 * half_turn);
        let tf = t2 + speed / deceleration;

        MotionLaw {
            target_speed: speed,
            path_length: 2.0 * PI * radius,
            acceleration,
            deceleration,
            t1,
            t2,
            tf,
        }
    }

    pub fn switching_times(&self) -> (f64, f64, f64) {
        (self.t1, self.t2, self.tf)
    }

    /// Path parameter and its first two time derivatives at time `t`,
    /// following the constant-acceleration equations of the active phase.
    /// The speed is clamped into [0, target_speed] and the position into
    /// [0, path_length] to absorb floating-point overshoot at the phase
    /// boundaries and the final samples.
    pub fn sample(&self, t: f64) -> (f64, f64, f64) {
        let quarter_turn = self.path_length / 4.0;

        let (s, s_dot, s_ddot) = if t <= self.t1 {
            (
                0.5 * self.acceleration * t * t,
                self.acceleration * t,
                self.acceleration,
            )
        } else if t <= self.t2 {
            (
                quarter_turn + self.target_speed * (t - self.t1),
                self.target_speed,
                0.0,
            )
        } else {
            let t_rel = t - self.t2;
            (
                2.0 * quarter_turn + self.target_speed * t_rel
                    - 0.5 * self.deceleration * t_rel * t_rel,
                self.target_speed - self.deceleration * t_rel,
                -self.deceleration,
            )
        };

        (
            s.clamp(0.0, self.path_length),
            s_dot.clamp(0.0, self.target_speed),
            s_ddot,
        )
    }

    /// Uniform time grid of the given step over [0, tf].
    pub fn time_grid(&self, time_step: f64) -> Vec<f64> {
        let count = (self.tf / time_step) as usize + 1;
        if count < 2 {
            return vec![0.0];
        }
        (0..count)
            .map(|k| self.tf * k as f64 / (count - 1) as f64)
            .collect()
    }
}

/// Circular path of given center and radius lying in the XZ plane
/// (y stays at the center's y). The path starts at the top of the circle
/// and closes on itself after one circumference.
#[derive(Debug, Clone, Copy)]
pub struct CircularPath {
    pub center: Point3<f64>,
    pub radius: f64,
}

impl CircularPath {
    /// Tool position at path parameter `s`.
    pub fn position(&self, s: f64) -> Point3<f64> {
        let u = s / self.radius;
        Point3::new(
            self.center.x - self.radius * u.sin(),
            self.center.y,
            self.center.z + self.radius * u.cos(),
        )
    }

    /// Tool velocity by the chain rule from ds/dt.
    pub fn velocity(&self, s: f64, s_dot: f64) -> Vector3<f64> {
        let u = s / self.radius;
        Vector3::new(-s_dot * u.cos(), 0.0, -s_dot * u.sin())
    }

    /// Tool acceleration: the tangential term from d²s/dt² plus the
    /// centripetal term from (ds/dt)².
    pub fn acceleration(&self, s: f64, s_dot: f64, s_ddot: f64) -> Vector3<f64> {
        let u = s / self.radius;
        let centripetal = s_dot * s_dot / self.radius;
        Vector3::new(
            -s_ddot * u.cos() + centripetal * u.sin(),
            0.0,
            -s_ddot * u.sin() - centripetal * u.cos(),
        )
    }
}

/// Outcome of the per-sample inverse kinematics solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IkStatus {
    /// The solver converged for this sample's target position.
    Converged,

    /// The solver did not converge; the previous sample's configuration was
    /// reused and the commanded path is not tracked at this instant.
    ReusedPrevious,
}

/// One time sample of the generated trajectory.
#[derive(Debug, Clone, Copy)]
pub struct TrajectorySample {
    pub time: f64,

    /// Path parameter and its first two time derivatives.
    pub s: f64,
    pub s_dot: f64,
    pub s_ddot: f64,

    /// Operational-space reference: tool position, velocity, acceleration.
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    pub acceleration: Vector3<f64>,

    /// Joint-space result.
    pub joints: Joints,
    pub joint_velocities: Joints,
    pub joint_accelerations: Joints,

    /// Whether this sample's configuration was actually solved or carried
    /// over from the previous sample.
    pub ik: IkStatus,
}

/// A complete generated trajectory, in increasing time order.
pub struct Trajectory {
    pub samples: Vec<TrajectorySample>,
    pub switching_times: (f64, f64, f64),
}

impl Trajectory {
    /// Number of samples where the solver fell back to the previous
    /// configuration.
    pub fn fallback_count(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.ik == IkStatus::ReusedPrevious)
            .count()
    }
}

/// Generates joint-space trajectories along operational-space paths.
///
/// Joint-space generation is an inherently sequential scan: each sample's
/// solve is warm-started from the previous sample's solution so consecutive
/// samples stay on the same solution branch.
pub struct TrajectoryGenerator {
    pub robot: Arc<dyn Kinematics>,

    /// Per-sample solver. The default is tighter and shorter than the
    /// standalone solver default: warm-started solves need few iterations.
    pub solver: IkSolver,

    /// Time grid step in seconds.
    pub time_step: f64,

    /// Joint configuration seeding the first sample's solve.
    pub reference_posture: Joints,
}

impl TrajectoryGenerator {
    pub fn new(robot: Arc<dyn Kinematics>, reference_posture: Joints) -> Self {
        TrajectoryGenerator {
            robot,
            solver: IkSolver {
                max_iter: 20,
                tolerance: 1e-5,
                damping: 0.8,
            },
            time_step: 0.005,
            reference_posture,
        }
    }

    /// Produces the full time-parameterized joint-space trajectory for one
    /// turn along `path` at the given target speed.
    ///
    /// Stages: the trapezoidal time law fixes s(t) on a uniform grid, the
    /// circular path maps it to tool position/velocity/acceleration, and the
    /// sequential scan solves the inverse kinematics per sample (seeded by
    /// the previous solution) and maps the reference tool velocity to joint
    /// velocities through the position sub-Jacobian. Joint accelerations are
    /// derived at the end by differentiating the complete joint-velocity
    /// sequence, so the whole trajectory is produced at once, not streamed.
    ///
    /// A sample whose solve does not converge reuses the previous
    /// configuration; this is recorded in the sample's `ik` status and logged,
    /// never substituted silently.
    pub fn generate(&self, path: &CircularPath, speed: f64) -> Trajectory {
        let law = MotionLaw::trapezoidal(path.radius, speed);
        let times = law.time_grid(self.time_step);

        let mut samples: Vec<TrajectorySample> = Vec::with_capacity(times.len());
        let mut previous = self.reference_posture;

        for &t in &times {
            let (s, s_dot, s_ddot) = law.sample(t);
            let position = path.position(s);
            let velocity = path.velocity(s, s_dot);
            let acceleration = path.acceleration(s, s_dot, s_ddot);

            let (joints, ik) = match self.solver.solve(self.robot.as_ref(), &position, &previous)
            {
                Some(solved) => (solved, IkStatus::Converged),
                None => {
                    warn!(
                        time = t,
                        "inverse kinematics did not converge, reusing previous configuration"
                    );
                    (previous, IkStatus::ReusedPrevious)
                }
            };

            let jacobian = Jacobian::new(self.robot.as_ref(), &joints);
            let joint_velocities = match jacobian.joint_velocities_linear(&velocity) {
                Ok(dq) => dq,
                Err(reason) => {
                    warn!(time = t, reason, "velocity mapping failed, zeroing sample");
                    [0.0; 6]
                }
            };

            previous = joints;
            samples.push(TrajectorySample {
                time: t,
                s,
                s_dot,
                s_ddot,
                position,
                velocity,
                acceleration,
                joints,
                joint_velocities,
                joint_accelerations: [0.0; 6],
                ik,
            });
        }

        differentiate_joint_velocities(&mut samples);

        Trajectory {
            samples,
            switching_times: law.switching_times(),
        }
    }
}

/// Fills the joint accelerations by numerically differentiating the complete
/// joint-velocity sequence: central differences inside, one-sided at both
/// ends. Needs the whole sequence, which is why it runs after the scan.
fn differentiate_joint_velocities(samples: &mut [TrajectorySample]) {
    let count = samples.len();
    if count < 2 {
        return;
    }
    let dt = samples[1].time - samples[0].time;

    for index in 0..count {
        let mut qpp = [0.0; 6];
        for joint in 0..DOF {
            qpp[joint] = if index == 0 {
                (samples[1].joint_velocities[joint] - samples[0].joint_velocities[joint]) / dt
            } else if index == count - 1 {
                (samples[count - 1].joint_velocities[joint]
                    - samples[count - 2].joint_velocities[joint])
                    / dt
            } else {
                (samples[index + 1].joint_velocities[joint]
                    - samples[index - 1].joint_velocities[joint])
                    / (2.0 * dt)
            };
        }
        samples[index].joint_accelerations = qpp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics_impl::DHKinematics;
    use crate::parameters::dh_kinematics::Parameters;
    use crate::utils::joints_to_vector6;

    const RADIUS: f64 = 0.1;
    const SPEED: f64 = 0.05;

    fn law() -> MotionLaw {
        MotionLaw::trapezoidal(RADIUS, SPEED)
    }

    fn circle() -> CircularPath {
        CircularPath {
            center: Point3::new(0.25, -0.15, 0.5),
            radius: RADIUS,
        }
    }

    fn generator() -> TrajectoryGenerator {
        TrajectoryGenerator::new(
            Arc::new(DHKinematics::new(Parameters::ur3())),
            Parameters::ur3_reference_posture(),
        )
    }

    #[test]
    fn test_switching_times() {
        // Quarter turn to reach V, quarter turn cruising, half turn braking:
        // t1 = piR/V, t2 = t1 + piR/(2V), tf = t2 + 2piR/V.
        let law = law();
        assert!((law.t1 - 2.0 * PI).abs() < 1e-9);
        assert!((law.t2 - 3.0 * PI).abs() < 1e-9);
        assert!((law.tf - 7.0 * PI).abs() < 1e-9);
        assert!((law.path_length - 2.0 * PI * RADIUS).abs() < 1e-12);
    }

    #[test]
    fn test_time_law_continuity_at_phase_boundaries() {
        // s and ds/dt must be continuous at t1 and t2. d2s/dt2 jumps there:
        // that is the trapezoidal profile, not a defect.
        let law = law();
        let eps = 1e-9;
        for boundary in [law.t1, law.t2] {
            let (s_before, v_before, _) = law.sample(boundary - eps);
            let (s_after, v_after, _) = law.sample(boundary + eps);
            assert!((s_after - s_before).abs() < 1e-6);
            assert!((v_after - v_before).abs() < 1e-6);
        }
    }

    #[test]
    fn test_speed_bounded_and_reaches_target() {
        let law = law();
        for &t in law.time_grid(0.005).iter() {
            let (s, s_dot, _) = law.sample(t);
            assert!(s_dot <= SPEED + 1e-12, "speed {} above target at {}", s_dot, t);
            assert!(s_dot >= 0.0);
            assert!((0.0..=law.path_length + 1e-12).contains(&s));
        }
        // Exactly V over the whole cruise phase.
        let middle = 0.5 * (law.t1 + law.t2);
        let (_, cruise, cruise_acc) = law.sample(middle);
        assert_eq!(cruise, SPEED);
        assert_eq!(cruise_acc, 0.0);
    }

    #[test]
    fn test_motion_ends_at_full_circumference_at_rest() {
        let law = law();
        let (s, s_dot, _) = law.sample(law.tf);
        assert!((s - law.path_length).abs() < 1e-12);
        assert!(s_dot.abs() < 1e-12);
    }

    #[test]
    fn test_path_closure() {
        // One full motion law duration must bring the tool back to the start.
        let law = law();
        let path = circle();
        let start = path.position(law.sample(0.0).0);
        let end = path.position(law.sample(law.tf).0);
        assert!((end - start).norm() < 1e-9);
    }

    #[test]
    fn test_path_velocity_matches_geometric_derivative() {
        let path = circle();
        let s = 0.237;
        let s_dot = 0.04;
        let h = 1e-6;
        let numeric = (path.position(s + h) - path.position(s - h)) / (2.0 * h) * s_dot;
        let analytic = path.velocity(s, s_dot);
        assert!((numeric - analytic).norm() < 1e-8);
    }

    #[test]
    fn test_generated_trajectory_solves_every_sample() {
        let trajectory = generator().generate(&circle(), SPEED);

        // One grid point every 5 ms over [0, 7pi].
        assert_eq!(trajectory.samples.len(), 4399);
        assert_eq!(trajectory.fallback_count(), 0);

        // Strictly increasing time.
        for pair in trajectory.samples.windows(2) {
            assert!(pair[1].time > pair[0].time);
        }

        // Every solved configuration actually reaches its reference position.
        for sample in trajectory.samples.iter().step_by(500) {
            let robot = DHKinematics::new(Parameters::ur3());
            let reached = robot.tool_position(&sample.joints);
            assert!(
                (reached - sample.position).norm() < 1e-4,
                "tracking error at t = {}",
                sample.time
            );
        }
    }

    #[test]
    fn test_joint_velocities_track_reference_velocity() {
        let trajectory = generator().generate(&circle(), SPEED);
        let robot = DHKinematics::new(Parameters::ur3());

        for sample in trajectory.samples.iter().step_by(700) {
            let jacobian = Jacobian::new(&robot, &sample.joints);
            let reproduced =
                jacobian.position_part() * joints_to_vector6(sample.joint_velocities);
            assert!(
                (reproduced - sample.velocity).norm() < 1e-9,
                "velocity mismatch at t = {}",
                sample.time
            );
        }
    }

    #[test]
    fn test_joint_accelerations_differentiate_velocities() {
        let trajectory = generator().generate(&circle(), SPEED);
        let samples = &trajectory.samples;
        let dt = samples[1].time - samples[0].time;

        for index in [1usize, 1000, 2500, samples.len() - 2] {
            for joint in 0..DOF {
                let expected = (samples[index + 1].joint_velocities[joint]
                    - samples[index - 1].joint_velocities[joint])
                    / (2.0 * dt);
                assert!(
                    (samples[index].joint_accelerations[joint] - expected).abs() < 1e-12
                );
            }
        }
    }

    #[test]
    fn test_first_sample_stays_near_reference_posture() {
        // The first target is directly solvable from the reference posture;
        // the warm-started scan must not jump to a distant branch.
        let generator = generator();
        let trajectory = generator.generate(&circle(), SPEED);
        let first = &trajectory.samples[0];
        let drift: f64 = (0..DOF)
            .map(|i| (first.joints[i] - generator.reference_posture[i]).powi(2))
            .sum::<f64>()
            .sqrt();
        assert!(drift < 1.0, "first sample drifted {} from the reference", drift);
    }
}
