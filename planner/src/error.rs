//! Error taxonomy (§7).
//!
//! Recoverable conditions (bad input, an unsupported configuration, running
//! out of the search budget) are returned as `Err(PlannerError)` and surface
//! as a CLI exit code. Invariant violations are programmer errors and panic
//! instead, by design (§7: "never mix the two").

#[derive(thiserror::Error, Debug)]
pub enum PlannerError {
    #[error("invalid problem: {0}")]
    InputValidation(String),

    #[error("unsupported configuration: {0}")]
    UnsupportedFeature(String),

    #[error("search exhausted its timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error(transparent)]
    TaskBuild(#[from] crate::problem::TaskBuildError),
}

impl PlannerError {
    /// CLI exit code for this error, per §6.
    pub fn exit_code(&self) -> i32 {
        match self {
            PlannerError::InputValidation(_) | PlannerError::TaskBuild(_) => 1,
            PlannerError::UnsupportedFeature(_) => 1,
            PlannerError::Timeout(_) => 2,
        }
    }
}
