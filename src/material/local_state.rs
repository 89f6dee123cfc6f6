use super::mandel::{components, norm, MANDEL};
use super::ElasticityLaw;
use crate::base::MaterialError;
use russell_lab::Vector;
use russell_tensor::Tensor2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the relative tolerance to accept a stored stress as the image of the elastic strain
const STRESS_TOL: f64 = 1e-10;

/// Holds the local state of a material point (e.g., a Gauss point)
///
/// The stress is always the image of the elastic strain `ε - εᵖ` via the elasticity law.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalState {
    /// Holds the internal values z
    pub internal_values: Vector,

    /// Holds the stress tensor σ
    pub stress: Tensor2,

    /// Holds the total strain tensor ε
    pub strain: Tensor2,

    /// Holds the plastic strain tensor εᵖ
    pub plastic_strain: Tensor2,

    /// Holds the elastic (vs elastoplastic) flag of the last update
    pub elastic: bool,

    /// Holds the algorithmic lagrange multiplier (Λ) of the last update
    pub algo_lagrange: f64,

    /// Holds the number of local iterations of the last update
    pub n_iterations: usize,

    /// Holds the yield function value f(σ, z), if the model has one
    pub yield_value: Option<f64>,
}

impl LocalState {
    /// Allocates a new instance at the ground state (zero stress and strain)
    pub fn new(n_internal_values: usize) -> Self {
        LocalState {
            internal_values: Vector::new(n_internal_values),
            stress: Tensor2::new(MANDEL),
            strain: Tensor2::new(MANDEL),
            plastic_strain: Tensor2::new(MANDEL),
            elastic: true,
            algo_lagrange: 0.0,
            n_iterations: 0,
            yield_value: None,
        }
    }

    /// Updates the strain tensor given Δε
    ///
    /// ```text
    /// ε += α Δε
    /// ```
    pub fn update_strain(&mut self, alpha: f64, delta_strain: &Tensor2) {
        let eps = self.strain.vector_mut();
        for i in 0..eps.dim() {
            eps[i] += alpha * delta_strain.vector()[i];
        }
    }

    /// Calculates the elastic strain εᵉ = ε - εᵖ
    pub fn elastic_strain(&self, eps_e: &mut Tensor2) {
        let (eps, eps_p) = (self.strain.vector(), self.plastic_strain.vector());
        let e = eps_e.vector_mut();
        for i in 0..e.dim() {
            e[i] = eps[i] - eps_p[i];
        }
    }

    /// Replaces the stress by the image of the elastic strain σ = D : (ε - εᵖ)
    ///
    /// Returns an error if the stored stress deviates from the recomputed one by
    /// more than a relative tolerance (the state is then left unchanged).
    pub fn recompute_stress<E>(&mut self, elasticity: &E) -> Result<(), MaterialError>
    where
        E: ElasticityLaw + ?Sized,
    {
        let mut eps_e = Tensor2::new(MANDEL);
        let mut sigma = Tensor2::new(MANDEL);
        self.elastic_strain(&mut eps_e);
        elasticity.calc_stress(&mut sigma, &eps_e);
        let mut diff = 0.0;
        let (a, b) = (sigma.vector(), self.stress.vector());
        for i in 0..a.dim() {
            diff += (a[i] - b[i]) * (a[i] - b[i]);
        }
        if !(f64::sqrt(diff) <= STRESS_TOL * (1.0 + norm(&sigma))) {
            return Err(MaterialError::Configuration("the stress does not match the elastic strain"));
        }
        self.stress = sigma;
        Ok(())
    }

    /// Resets the algorithmic variables (Λ, iteration counter, elastic flag)
    pub fn reset_algorithmic_variables(&mut self) {
        self.elastic = true;
        self.algo_lagrange = 0.0;
        self.n_iterations = 0;
    }
}

impl fmt::Display for LocalState {
    /// Returns a nicely formatted string representing the local state
    ///
    /// Tensors are printed as `[xx, yy, zz, xy, yz, xz]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "σ = {:?}", components(&self.stress))?;
        writeln!(f, "ε = {:?}", components(&self.strain))?;
        writeln!(f, "εᵖ = {:?}", components(&self.plastic_strain))?;
        writeln!(f, "z = {:?}", self.internal_values.as_data())?;
        writeln!(f, "elastic = {}", self.elastic)?;
        write!(f, "algo_lagrange = {:?}", self.algo_lagrange)?;
        if let Some(v) = self.yield_value {
            write!(f, "\nyield_value = {:?}", v)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
