use super::internal_variables::ALPHA0;
use super::mandel::{IDENTITY, MANDEL, NSIG};
use super::yield_function::deviatoric_normal;
use crate::StrError;
use russell_lab::{Matrix, Vector};
use russell_tensor::{Tensor2, Tensor4, P_SYMDEV};

/// Specifies the direction of the plastic strain increment
///
/// ```text
/// Δεᵖ = Λ m(σ, z)
/// ```
///
/// The direction is not assumed to coincide with df/dσ (non-associated flow is allowed).
pub trait PlasticFlow: Send + Sync {
    /// Indicates that the concrete model sets m = df/dσ (associated flow)
    fn associated(&self) -> bool;

    /// Calculates the flow direction m
    fn direction(&self, m: &mut Tensor2, sigma: &Tensor2, z: &Vector) -> Result<(), StrError>;

    /// Calculates the derivative of the flow direction w.r.t stress: dm/dσ
    fn dm_dsigma(&self, dm_dsigma: &mut Tensor4, sigma: &Tensor2, z: &Vector) -> Result<(), StrError>;

    /// Calculates the derivative of the flow direction w.r.t internal values: dm/dz (6 × n_internal_values)
    fn dm_dz(&self, dm_dz: &mut Matrix, sigma: &Tensor2, z: &Vector) -> Result<(), StrError>;
}

/// Calculates the derivatives of the unit-equivalent normal n = 3/2 ξ/q
///
/// ```text
/// dn/dσ =  3/(2q) (Psymdev - 2/3 n ⊗ n)
/// dn/dα = -3/(2q) (I - 2/3 n ⊗ n)
/// ```
fn deviatoric_normal_derivatives(
    dn_dsigma: &mut Tensor4,
    dn_dz: &mut Matrix,
    sigma: &Tensor2,
    z: &Vector,
) -> Result<(), StrError> {
    let mut nn = Tensor2::new(MANDEL);
    let q = deviatoric_normal(&mut nn, sigma, z)?;
    let n = nn.vector();
    let c = 1.5 / q;
    let mat = dn_dsigma.matrix_mut();
    dn_dz.fill(0.0);
    for i in 0..NSIG {
        for j in 0..NSIG {
            let nn_ij = 2.0 * n[i] * n[j] / 3.0;
            let delta = if i == j { 1.0 } else { 0.0 };
            mat.set(i, j, c * (P_SYMDEV[i][j] - nn_ij));
            dn_dz.set(i, ALPHA0 + j, -c * (delta - nn_ij));
        }
    }
    Ok(())
}

/// Implements the (deviatoric) von Mises flow direction
///
/// ```text
/// m = 3/2 ξ/q    with    ξ = dev(σ) - α
/// ```
#[derive(Clone, Copy, Debug)]
pub struct VonMisesFlow {}

impl VonMisesFlow {
    /// Allocates a new instance
    pub fn new() -> Self {
        VonMisesFlow {}
    }
}

impl PlasticFlow for VonMisesFlow {
    fn associated(&self) -> bool {
        true
    }

    fn direction(&self, m: &mut Tensor2, sigma: &Tensor2, z: &Vector) -> Result<(), StrError> {
        deviatoric_normal(m, sigma, z)?;
        Ok(())
    }

    fn dm_dsigma(&self, dm_dsigma: &mut Tensor4, sigma: &Tensor2, z: &Vector) -> Result<(), StrError> {
        let mut dm_dz = Matrix::new(NSIG, z.dim());
        deviatoric_normal_derivatives(dm_dsigma, &mut dm_dz, sigma, z)
    }

    fn dm_dz(&self, dm_dz: &mut Matrix, sigma: &Tensor2, z: &Vector) -> Result<(), StrError> {
        let mut dm_dsigma = Tensor4::new(MANDEL);
        deviatoric_normal_derivatives(&mut dm_dsigma, dm_dz, sigma, z)
    }
}

/// Implements the Drucker-Prager flow direction with dilatancy
///
/// ```text
/// m = 3/2 ξ/q + Mg/3 I
/// ```
///
/// The flow is associated only if Mg equals the slope M of the yield function.
#[derive(Clone, Copy, Debug)]
pub struct DruckerPragerFlow {
    /// Slope of the plastic potential (dilatancy)
    mm_dil: f64,

    /// Indicates that Mg = M
    associated: bool,
}

impl DruckerPragerFlow {
    /// Allocates a new instance
    ///
    /// * `mm_dil` -- slope of the plastic potential Mg
    /// * `mm` -- slope of the yield function M (only used to flag associated flow)
    pub fn new(mm_dil: f64, mm: f64) -> Self {
        DruckerPragerFlow {
            mm_dil,
            associated: mm_dil == mm,
        }
    }
}

impl PlasticFlow for DruckerPragerFlow {
    fn associated(&self) -> bool {
        self.associated
    }

    fn direction(&self, m: &mut Tensor2, sigma: &Tensor2, z: &Vector) -> Result<(), StrError> {
        deviatoric_normal(m, sigma, z)?;
        let v = m.vector_mut();
        for i in 0..NSIG {
            v[i] += self.mm_dil * IDENTITY[i] / 3.0;
        }
        Ok(())
    }

    fn dm_dsigma(&self, dm_dsigma: &mut Tensor4, sigma: &Tensor2, z: &Vector) -> Result<(), StrError> {
        let mut dm_dz = Matrix::new(NSIG, z.dim());
        deviatoric_normal_derivatives(dm_dsigma, &mut dm_dz, sigma, z)
    }

    fn dm_dz(&self, dm_dz: &mut Matrix, sigma: &Tensor2, z: &Vector) -> Result<(), StrError> {
        let mut dm_dsigma = Tensor4::new(MANDEL);
        deviatoric_normal_derivatives(&mut dm_dsigma, dm_dz, sigma, z)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
