//! Forward, inverse and differential kinematics for 6 axis serial robots
//! described in the modified (Khalil/Craig) Denavit-Hartenberg convention,
//! plus joint-space trajectory generation along operational-space paths.
//!
//! # Features
//!
//! - Forward kinematics through the DH transform chain, with the full set of
//!   cumulative base-to-frame transforms exposed for reuse.
//! - Geometric 6x6 Jacobian built from the transform chain, with direct and
//!   pseudo-inverse differential velocity mappings. The pseudo-inverse keeps
//!   the mappings well defined at and near kinematic singularities (the
//!   minimum-norm least-squares solution is returned instead of an error).
//! - Damped Newton-Raphson numerical inverse kinematics on the tool position,
//!   with an explicit no-solution outcome instead of approximate results.
//! - Multi-stage trajectory generation: trapezoidal motion law along the path
//!   length, circular operational-space path, and a warm-started sequential
//!   joint-space scan with per-sample solver status.
//! - Convention bridging for handing joint vectors to an external simulator
//!   and reading them back.
//!
//! # Parameters
//!
//! The kinematic model is an immutable table of per-joint DH parameters
//! (link offset, link twist, joint offset distance, angular offset), passed
//! explicitly to every solver so different manipulators can be swapped in
//! without touching solver or generator logic. A ready-made UR3 table is
//! provided.
//!
//! ## Examples
//!
//! - **basic.rs**: forward kinematics, Jacobian, velocity mappings and a
//!   position inverse-kinematics round trip.
//! - **trajectory.rs**: generating a complete circular joint-space trajectory.

pub mod parameters;
pub mod parameters_robots;

pub mod parameter_error;

#[path = "utils/utils.rs"]
pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod jacobian;

pub mod ik;

pub mod trajectory;

pub mod sim_bridge;
