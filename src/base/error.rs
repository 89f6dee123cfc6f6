use crate::StrError;
use thiserror::Error;

/// Holds the errors reported by the material models and the material state
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MaterialError {
    /// Invalid construction parameters (non-physical elastic constants, negative moduli, ...)
    #[error("invalid configuration: {0}")]
    Configuration(StrError),

    /// The local Newton-Raphson iterations did not converge
    #[error("return mapping did not converge after {iterations} iterations (residual: {residual:.2e})")]
    NonConvergence { iterations: usize, residual: f64 },

    /// The local Jacobian cannot be inverted (e.g., at a vertex of the yield surface)
    #[error("singular local Jacobian: {0}")]
    SingularJacobian(StrError),

    /// The converged plastic multiplier is negative
    #[error("negative plastic multiplier Λ = {0:e}")]
    NegativeMultiplier(f64),

    /// The commit/trial protocol has been violated
    #[error("invalid state: {0}")]
    InvalidState(StrError),
}

/// Defines a convenience alias for `Result<T, MaterialError>`
pub type MaterialResult<T> = Result<T, MaterialError>;

impl MaterialError {
    /// Indicates that the caller may recover by sub-stepping the strain increment
    pub fn allows_substepping(&self) -> bool {
        matches!(
            self,
            MaterialError::NonConvergence { .. } | MaterialError::SingularJacobian(_)
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::MaterialError;

    #[test]
    fn display_works() {
        let err = MaterialError::Configuration("Young's modulus must be positive");
        assert_eq!(
            format!("{}", err),
            "invalid configuration: Young's modulus must be positive"
        );
        let err = MaterialError::NonConvergence {
            iterations: 50,
            residual: 1.5e-3,
        };
        assert_eq!(
            format!("{}", err),
            "return mapping did not converge after 50 iterations (residual: 1.50e-3)"
        );
        let err = MaterialError::InvalidState("there is no trial state to commit");
        assert_eq!(format!("{}", err), "invalid state: there is no trial state to commit");
    }

    #[test]
    fn allows_substepping_works() {
        assert!(MaterialError::SingularJacobian("apex").allows_substepping());
        assert!(MaterialError::NonConvergence {
            iterations: 1,
            residual: 1.0
        }
        .allows_substepping());
        assert!(!MaterialError::NegativeMultiplier(-1.0).allows_substepping());
        assert!(!MaterialError::InvalidState("none").allows_substepping());
    }
}
