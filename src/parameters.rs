//! Defines the DH parameter data structure

pub mod dh_kinematics {
    use crate::kinematic_traits::DOF;
    use crate::parameter_error::ParameterError;

    /// Geometric parameters of a 6 axis serial manipulator in the modified
    /// (Khalil/Craig) Denavit-Hartenberg convention. Link parameters `a` and
    /// `alpha` are indexed at i-1, the joint offset distance `r` and the
    /// angular offset at i. See [parameters_robots.rs](parameters_robots.rs)
    /// for examples of concrete robot models.
    ///
    /// This is an immutable value type: it is filled once when the model is
    /// constructed and passed explicitly wherever the geometry is needed, so
    /// the same solvers work with any manipulator.
    #[derive(Debug, Clone, Copy)]
    pub struct Parameters {
        /// Link offsets a[i-1] along the previous x axis, in meters.
        pub a: [f64; 6],

        /// Link twists alpha[i-1] about the previous x axis, in radians.
        pub alpha: [f64; 6],

        /// Joint offset distances r[i] along the joint z axis, in meters.
        pub r: [f64; 6],

        /// Angular offsets added to each joint angle to adjust the reference
        /// zero position, in radians.
        pub offsets: [f64; 6],
    }

    impl Parameters {
        /// Builds the parameter table from four equal-length sequences, one
        /// entry per joint. The sequences must all have exactly 6 entries of
        /// finite values; anything else is reported as an error rather than
        /// silently padded.
        pub fn from_slices(
            a: &[f64],
            alpha: &[f64],
            r: &[f64],
            offsets: &[f64],
        ) -> Result<Self, ParameterError> {
            for column in [a, alpha, r, offsets] {
                if column.len() != DOF {
                    return Err(ParameterError::InvalidLength {
                        expected: DOF,
                        found: column.len(),
                    });
                }
            }
            for (name, column) in [("a", a), ("alpha", alpha), ("r", r), ("offsets", offsets)] {
                if !column.iter().all(|x| x.is_finite()) {
                    return Err(ParameterError::NotFinite(name.to_string()));
                }
            }
            let mut parameters = Parameters {
                a: [0.0; 6],
                alpha: [0.0; 6],
                r: [0.0; 6],
                offsets: [0.0; 6],
            };
            parameters.a.copy_from_slice(a);
            parameters.alpha.copy_from_slice(alpha);
            parameters.r.copy_from_slice(r);
            parameters.offsets.copy_from_slice(offsets);
            Ok(parameters)
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            fn row(values: &[f64; 6]) -> String {
                values
                    .iter()
                    .map(|x| format!("{}", x))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
            format!(
                "dh_kinematics_parameters:\n  \
              a: [{}]\n  \
              alpha: [{}]\n  \
              r: [{}]\n  \
              offsets: [{}]\n",
                row(&self.a),
                row(&self.alpha),
                row(&self.r),
                row(&self.offsets),
            )
        }
    }
}
