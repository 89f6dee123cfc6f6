//! Plastmat -- implicit integration of small-strain elastoplasticity at a material point
//!
//! The crate implements a generic backward-Euler return-mapping engine parameterized
//! by an elasticity law, a yield function, a plastic flow direction and a set of
//! internal (hardening) variables. A [material::MaterialState] wraps the engine with
//! the commit/revert protocol used by finite element solvers.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod material;
pub mod prelude;
pub mod util;
