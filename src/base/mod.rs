//! Implements the base structures: parameters, errors and samples

mod error;
mod parameters;
mod sample_params;
pub use crate::base::error::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_params::*;
