use super::mandel::MANDEL;
use crate::StrError;
use russell_tensor::{t4_ddot_t2, LinElasticity, Tensor2, Tensor4};

/// Specifies the stress-strain relation of the elastic part of the deformation
///
/// Implementations are stateless: all results depend on the elastic strain (or stress)
/// and on constant parameters only.
pub trait ElasticityLaw: Send + Sync {
    /// Calculates the stress from the elastic strain
    ///
    /// ```text
    /// σ = σ(εᵉ)
    /// ```
    fn calc_stress(&self, sigma: &mut Tensor2, eps_e: &Tensor2);

    /// Calculates the elastic strain from the stress (inverse relation)
    ///
    /// ```text
    /// εᵉ = εᵉ(σ)
    /// ```
    fn calc_elastic_strain(&self, eps_e: &mut Tensor2, sigma: &Tensor2);

    /// Calculates the elastic rigidity modulus Dₑ = dσ/dεᵉ
    fn calc_dde(&self, dde: &mut Tensor4, eps_e: &Tensor2);

    /// Calculates the elastic compliance modulus Cₑ = dεᵉ/dσ
    fn calc_cce(&self, cce: &mut Tensor4, sigma: &Tensor2);
}

/// Implements the linear isotropic elasticity law
///
/// ```text
/// σ = Dₑ : εᵉ    with    Dₑ = 3K Psph + 2G Psymdev
/// ```
pub struct LinearIsotropic {
    /// Linear elasticity
    lin_elasticity: LinElasticity,

    /// Elastic compliance modulus Cₑ = Dₑ⁻¹
    cce: Tensor4,

    /// Young's modulus
    young: f64,

    /// Poisson's coefficient
    poisson: f64,
}

impl LinearIsotropic {
    /// Allocates a new instance
    pub fn new(young: f64, poisson: f64) -> Result<Self, StrError> {
        if young <= 0.0 {
            return Err("Young's modulus must be positive");
        }
        if poisson <= -1.0 || poisson >= 0.5 {
            return Err("Poisson's coefficient must satisfy -1 < ν < 0.5");
        }
        let lin_elasticity = LinElasticity::new(young, poisson, false, false);
        let mut cce = Tensor4::new(MANDEL);
        lin_elasticity.calc_compliance(&mut cce)?;
        Ok(LinearIsotropic {
            lin_elasticity,
            cce,
            young,
            poisson,
        })
    }

    /// Returns the bulk (K) and shear (G) moduli
    pub fn get_bulk_shear(&self) -> (f64, f64) {
        self.lin_elasticity.get_bulk_shear()
    }

    /// Returns Young's modulus and Poisson's coefficient
    pub fn get_young_poisson(&self) -> (f64, f64) {
        (self.young, self.poisson)
    }

    /// Returns an access to the (constant) elastic rigidity modulus
    pub fn get_modulus(&self) -> &Tensor4 {
        self.lin_elasticity.get_modulus()
    }
}

impl ElasticityLaw for LinearIsotropic {
    fn calc_stress(&self, sigma: &mut Tensor2, eps_e: &Tensor2) {
        t4_ddot_t2(sigma, 1.0, self.lin_elasticity.get_modulus(), eps_e); // σ = Dₑ : εᵉ
    }

    fn calc_elastic_strain(&self, eps_e: &mut Tensor2, sigma: &Tensor2) {
        t4_ddot_t2(eps_e, 1.0, &self.cce, sigma); // εᵉ = Cₑ : σ
    }

    fn calc_dde(&self, dde: &mut Tensor4, _eps_e: &Tensor2) {
        dde.set_tensor(1.0, self.lin_elasticity.get_modulus());
    }

    fn calc_cce(&self, cce: &mut Tensor4, _sigma: &Tensor2) {
        cce.set_tensor(1.0, &self.cce);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ElasticityLaw, LinearIsotropic};
    use crate::material::mandel::{components, new_symmetric, MANDEL, NSIG};
    use russell_lab::approx_eq;
    use russell_tensor::{Tensor2, Tensor4};

    // returns max |Cₑ : Dₑ - I|
    fn compliance_times_rigidity_error(law: &dyn ElasticityLaw) -> f64 {
        let zero = Tensor2::new(MANDEL);
        let mut dde = Tensor4::new(MANDEL);
        let mut cce = Tensor4::new(MANDEL);
        law.calc_dde(&mut dde, &zero);
        law.calc_cce(&mut cce, &zero);
        let (d, c) = (dde.matrix(), cce.matrix());
        let mut err: f64 = 0.0;
        for i in 0..NSIG {
            for j in 0..NSIG {
                let mut sum = 0.0;
                for k in 0..NSIG {
                    sum += c.get(i, k) * d.get(k, j);
                }
                let delta = if i == j { 1.0 } else { 0.0 };
                err = err.max(f64::abs(sum - delta));
            }
        }
        err
    }

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            LinearIsotropic::new(0.0, 0.25).err(),
            Some("Young's modulus must be positive")
        );
        assert_eq!(
            LinearIsotropic::new(1000.0, 0.5).err(),
            Some("Poisson's coefficient must satisfy -1 < ν < 0.5")
        );
    }

    #[test]
    fn moduli_work() {
        let law = LinearIsotropic::new(30000.0, 0.25).unwrap();
        let (kk, gg) = law.get_bulk_shear();
        approx_eq(kk, 20000.0, 1e-10);
        approx_eq(gg, 12000.0, 1e-10);
        assert!(compliance_times_rigidity_error(&law) < 1e-14);
    }

    #[test]
    fn stress_and_inverse_work() {
        let law = LinearIsotropic::new(30000.0, 0.25).unwrap();

        // uniaxial strain: σxx = (K + 4G/3) ε, σyy = σzz = (K - 2G/3) ε
        let eps = new_symmetric(&[1e-3, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let mut sigma = Tensor2::new(MANDEL);
        law.calc_stress(&mut sigma, &eps);
        let s = components(&sigma);
        approx_eq(s[0], 36.0, 1e-12);
        approx_eq(s[1], 12.0, 1e-12);
        approx_eq(s[2], 12.0, 1e-12);

        // shear: σxy = 2G εxy
        let eps = new_symmetric(&[0.0, 0.0, 0.0, 1e-3, 0.0, 0.0]);
        law.calc_stress(&mut sigma, &eps);
        approx_eq(components(&sigma)[3], 24.0, 1e-12);

        // inverse
        let eps = new_symmetric(&[1e-3, -2e-4, 3e-4, 5e-4, -1e-4, 2e-4]);
        law.calc_stress(&mut sigma, &eps);
        let mut eps_back = Tensor2::new(MANDEL);
        law.calc_elastic_strain(&mut eps_back, &sigma);
        for i in 0..6 {
            approx_eq(eps_back.vector()[i], eps.vector()[i], 1e-15);
        }
    }
}
