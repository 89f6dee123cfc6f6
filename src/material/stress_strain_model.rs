use super::{DruckerPragerLinearHardening, LinearElastic, LocalState, VonMisesLinearHardening};
use crate::base::{MaterialError, ParamMaterial, ParamStressStrain};
use russell_tensor::{Tensor2, Tensor4};
use std::sync::Arc;

/// Specifies the essential functions for stress-strain models
pub trait StressStrainTrait: Send + Sync {
    /// Indicates that the stiffness matrix is symmetric
    fn symmetric_stiffness(&self) -> bool;

    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize;

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), MaterialError>;

    /// Computes the consistent tangent stiffness
    fn stiffness(&self, dd: &mut Tensor4, state: &LocalState) -> Result<(), MaterialError>;

    /// Updates the stress tensor for the total strain already stored in the state
    ///
    /// The stress is integrated from the plastic strain and internal values of the state.
    /// The state is left in an undefined condition if an error occurs.
    fn integrate_stress(&self, state: &mut LocalState) -> Result<(), MaterialError>;

    /// Updates the stress tensor given the strain increment tensor
    fn update_stress(&self, state: &mut LocalState, delta_strain: &Tensor2) -> Result<(), MaterialError> {
        state.update_strain(1.0, delta_strain);
        self.integrate_stress(state)
    }

    /// Recomputes the stress of a restored state and checks that the state is admissible
    fn restore_state(&self, state: &mut LocalState) -> Result<(), MaterialError>;

    /// Calculates the yield function value, if the model has one
    fn yield_function(&self, state: &LocalState) -> Result<Option<f64>, MaterialError>;
}

/// Holds the actual stress-strain model implementation
///
/// The model carries no per-point state and is shared among clones.
#[derive(Clone)]
pub struct StressStrainModel {
    /// Holds the actual model implementation
    pub actual: Arc<dyn StressStrainTrait>,
}

impl StressStrainModel {
    /// Allocates a new instance
    pub fn new(param: &ParamMaterial) -> Result<Self, MaterialError> {
        param.validate()?;
        let rm = param.return_mapping();
        let actual: Arc<dyn StressStrainTrait> = match param.stress_strain {
            // Linear elastic model
            ParamStressStrain::LinearElastic { young, poisson } => Arc::new(LinearElastic::new(young, poisson)?),

            // von Mises plasticity model
            ParamStressStrain::VonMises {
                young,
                poisson,
                z0,
                hh_kin,
                hh_iso,
            } => Arc::new(VonMisesLinearHardening::new(young, poisson, z0, hh_kin, hh_iso, rm)?),

            // Drucker-Prager plasticity model
            ParamStressStrain::DruckerPrager {
                young,
                poisson,
                z0,
                mm,
                mm_dil,
                hh_kin,
                hh_iso,
            } => Arc::new(DruckerPragerLinearHardening::new(
                young, poisson, z0, mm, mm_dil, hh_kin, hh_iso, rm,
            )?),
        };
        Ok(StressStrainModel { actual })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
