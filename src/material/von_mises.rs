use super::{LinearHardening, LinearIsotropic, ReturnMapping, VonMisesFlow, VonMisesYield};
use crate::base::{MaterialError, ParamReturnMapping};

/// Implements the von Mises plasticity model with linear kinematic and isotropic hardening
///
/// ```text
/// f = √(3/2 ξ:ξ) - k    with    ξ = dev(σ) - α
/// m = df/dσ = 3/2 ξ/q
/// ```
///
/// The flow is associated; hence, the consistent tangent is symmetric.
pub type VonMisesLinearHardening = ReturnMapping<LinearIsotropic, VonMisesYield, VonMisesFlow, LinearHardening>;

impl VonMisesLinearHardening {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `young` -- Young's modulus
    /// * `poisson` -- Poisson's coefficient
    /// * `z0` -- initial size of the yield surface (von Mises stress at first yield)
    /// * `hh_kin` -- kinematic hardening modulus Hα
    /// * `hh_iso` -- isotropic hardening modulus Hk
    /// * `param` -- parameters for the local iterations
    pub fn new(
        young: f64,
        poisson: f64,
        z0: f64,
        hh_kin: f64,
        hh_iso: f64,
        param: ParamReturnMapping,
    ) -> Result<Self, MaterialError> {
        let elasticity = LinearIsotropic::new(young, poisson).map_err(MaterialError::Configuration)?;
        Ok(ReturnMapping::assemble(
            elasticity,
            VonMisesYield::new(),
            VonMisesFlow::new(),
            LinearHardening::new(hh_kin, hh_iso, z0),
            param,
        ))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
