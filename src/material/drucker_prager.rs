use super::{DruckerPragerFlow, DruckerPragerYield, LinearHardening, LinearIsotropic, ReturnMapping};
use crate::base::{MaterialError, ParamReturnMapping};

/// Implements the Drucker-Prager plasticity model with linear hardening and non-associated flow
///
/// ```text
/// f = q + M σm - k
/// m = 3/2 ξ/q + Mg/3 I
/// ```
///
/// Tension is positive. The apex of the cone (q = 0) is not handled and yields
/// a singular Jacobian error.
pub type DruckerPragerLinearHardening =
    ReturnMapping<LinearIsotropic, DruckerPragerYield, DruckerPragerFlow, LinearHardening>;

impl DruckerPragerLinearHardening {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `young` -- Young's modulus
    /// * `poisson` -- Poisson's coefficient
    /// * `z0` -- initial size of the yield surface at zero mean stress
    /// * `mm` -- slope M of the yield surface
    /// * `mm_dil` -- slope Mg of the plastic potential (dilatancy)
    /// * `hh_kin` -- kinematic hardening modulus Hα
    /// * `hh_iso` -- isotropic hardening modulus Hk
    /// * `param` -- parameters for the local iterations
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        young: f64,
        poisson: f64,
        z0: f64,
        mm: f64,
        mm_dil: f64,
        hh_kin: f64,
        hh_iso: f64,
        param: ParamReturnMapping,
    ) -> Result<Self, MaterialError> {
        let elasticity = LinearIsotropic::new(young, poisson).map_err(MaterialError::Configuration)?;
        Ok(ReturnMapping::assemble(
            elasticity,
            DruckerPragerYield::new(mm),
            DruckerPragerFlow::new(mm_dil, mm),
            LinearHardening::new(hh_kin, hh_iso, z0),
            param,
        ))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
