//! Error handling for kinematic model construction

/// Reports failures while populating the DH parameter table from caller
/// supplied sequences.
#[derive(Debug)]
pub enum ParameterError {
    InvalidLength { expected: usize, found: usize },
    NotFinite(String),
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ParameterError::InvalidLength { expected, found } =>
                write!(f, "Invalid Length: expected {}, found {}", expected, found),
            ParameterError::NotFinite(ref field) =>
                write!(f, "Non-finite value in: {}", field),
        }
    }
}

impl std::error::Error for ParameterError {}
