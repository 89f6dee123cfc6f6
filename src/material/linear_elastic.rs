use super::mandel::MANDEL;
use super::{ElasticityLaw, LinearIsotropic, LocalState, StressStrainTrait};
use crate::base::MaterialError;
use russell_tensor::{Tensor2, Tensor4};

/// Implements a linear elastic model
pub struct LinearElastic {
    pub elasticity: LinearIsotropic,
}

impl LinearElastic {
    /// Allocates a new instance
    pub fn new(young: f64, poisson: f64) -> Result<Self, MaterialError> {
        Ok(LinearElastic {
            elasticity: LinearIsotropic::new(young, poisson).map_err(MaterialError::Configuration)?,
        })
    }
}

impl StressStrainTrait for LinearElastic {
    /// Indicates that the stiffness matrix is symmetric and constant
    fn symmetric_stiffness(&self) -> bool {
        true
    }

    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize {
        0
    }

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, _state: &mut LocalState) -> Result<(), MaterialError> {
        Ok(())
    }

    /// Computes the consistent tangent stiffness
    fn stiffness(&self, dd: &mut Tensor4, _state: &LocalState) -> Result<(), MaterialError> {
        dd.set_tensor(1.0, self.elasticity.get_modulus());
        Ok(())
    }

    /// Updates the stress tensor for the total strain stored in the state
    fn integrate_stress(&self, state: &mut LocalState) -> Result<(), MaterialError> {
        state.reset_algorithmic_variables();
        let mut eps_e = Tensor2::new(MANDEL);
        state.elastic_strain(&mut eps_e);
        self.elasticity.calc_stress(&mut state.stress, &eps_e); // σ = D : (ε - εᵖ)
        Ok(())
    }

    /// Recomputes the stress of a restored state
    fn restore_state(&self, state: &mut LocalState) -> Result<(), MaterialError> {
        state.recompute_stress(&self.elasticity)
    }

    /// Returns None because there is no yield surface
    fn yield_function(&self, _state: &LocalState) -> Result<Option<f64>, MaterialError> {
        Ok(None)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
