//! Makes available common structures needed to drive a material point
//!
//! You may write `use plastmat::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{MaterialError, ParamMaterial, ParamReturnMapping, ParamStressStrain, SampleParams};
pub use crate::material::{LocalState, MaterialRecord, MaterialState, MaterialStates, StrainPath};
pub use crate::material::{StressStrainModel, StressStrainTrait};
