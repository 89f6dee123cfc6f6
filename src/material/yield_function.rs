use super::internal_variables::{ALPHA0, KK};
use super::mandel::{ddot, deviator, mean, norm, IDENTITY, MANDEL, NSIG};
use crate::StrError;
use russell_lab::Vector;
use russell_tensor::Tensor2;

/// Specifies the yield function f(σ, z) defining the admissible region f ≤ 0
///
/// The internal values z are passed as a read-only argument at each call; the
/// implementations never hold a reference to them.
pub trait YieldFunction: Send + Sync {
    /// Calculates the yield function f
    fn f(&self, sigma: &Tensor2, z: &Vector) -> Result<f64, StrError>;

    /// Calculates the derivative of the yield function w.r.t stress
    fn df_dsigma(&self, df_dsigma: &mut Tensor2, sigma: &Tensor2, z: &Vector) -> Result<(), StrError>;

    /// Calculates the derivative of the yield function w.r.t internal variables
    fn df_dz(&self, df_dz: &mut Vector, sigma: &Tensor2, z: &Vector) -> Result<(), StrError>;
}

/// Holds the relative value of q below which the stress is regarded as hydrostatic
const Q_HYDROSTATIC: f64 = 1e-12;

/// Calculates the relative deviatoric stress ξ = dev(σ) - α and returns q = √(3/2 ξ:ξ)
pub(crate) fn relative_deviator(xi: &mut Tensor2, sigma: &Tensor2, z: &Vector) -> f64 {
    deviator(xi, sigma);
    let x = xi.vector_mut();
    for i in 0..NSIG {
        x[i] -= z[ALPHA0 + i];
    }
    f64::sqrt(1.5 * ddot(xi, xi))
}

/// Calculates the unit-equivalent normal n = 3/2 ξ/q (deviatoric; √(2/3 n:n) = 1)
pub(crate) fn deviatoric_normal(nn: &mut Tensor2, sigma: &Tensor2, z: &Vector) -> Result<f64, StrError> {
    let mut xi = Tensor2::new(MANDEL);
    let q = relative_deviator(&mut xi, sigma, z);
    if q <= Q_HYDROSTATIC * (1.0 + norm(sigma)) {
        return Err("cannot compute the normal to the yield surface at the hydrostatic axis");
    }
    let (x, n) = (xi.vector(), nn.vector_mut());
    for i in 0..NSIG {
        n[i] = 1.5 * x[i] / q;
    }
    Ok(q)
}

/// Implements the von Mises yield function with kinematic and isotropic hardening
///
/// ```text
/// f = q - k    with    q = √(3/2 ξ:ξ)  and  ξ = dev(σ) - α
/// ```
#[derive(Clone, Copy, Debug)]
pub struct VonMisesYield {}

impl VonMisesYield {
    /// Allocates a new instance
    pub fn new() -> Self {
        VonMisesYield {}
    }
}

impl YieldFunction for VonMisesYield {
    fn f(&self, sigma: &Tensor2, z: &Vector) -> Result<f64, StrError> {
        let mut xi = Tensor2::new(MANDEL);
        let q = relative_deviator(&mut xi, sigma, z);
        Ok(q - z[KK])
    }

    fn df_dsigma(&self, df_dsigma: &mut Tensor2, sigma: &Tensor2, z: &Vector) -> Result<(), StrError> {
        deviatoric_normal(df_dsigma, sigma, z)?; // df/dσ = n
        Ok(())
    }

    fn df_dz(&self, df_dz: &mut Vector, sigma: &Tensor2, z: &Vector) -> Result<(), StrError> {
        let mut nn = Tensor2::new(MANDEL);
        deviatoric_normal(&mut nn, sigma, z)?;
        for i in 0..NSIG {
            df_dz[ALPHA0 + i] = -nn.vector()[i]; // df/dα = -n
        }
        df_dz[KK] = -1.0;
        Ok(())
    }
}

/// Implements the Drucker-Prager yield function with kinematic and isotropic hardening
///
/// Tensile stresses are positive; thus compression (σm < 0) enlarges the admissible q.
///
/// ```text
/// f = q + M σm - k
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DruckerPragerYield {
    /// Slope of the yield surface in the (σm, q) plane
    mm: f64,
}

impl DruckerPragerYield {
    /// Allocates a new instance
    pub fn new(mm: f64) -> Self {
        DruckerPragerYield { mm }
    }
}

impl YieldFunction for DruckerPragerYield {
    fn f(&self, sigma: &Tensor2, z: &Vector) -> Result<f64, StrError> {
        let mut xi = Tensor2::new(MANDEL);
        let q = relative_deviator(&mut xi, sigma, z);
        Ok(q + self.mm * mean(sigma) - z[KK])
    }

    fn df_dsigma(&self, df_dsigma: &mut Tensor2, sigma: &Tensor2, z: &Vector) -> Result<(), StrError> {
        deviatoric_normal(df_dsigma, sigma, z)?;
        let d = df_dsigma.vector_mut();
        for i in 0..NSIG {
            d[i] += self.mm * IDENTITY[i] / 3.0; // df/dσ = n + M/3 I
        }
        Ok(())
    }

    fn df_dz(&self, df_dz: &mut Vector, sigma: &Tensor2, z: &Vector) -> Result<(), StrError> {
        let mut nn = Tensor2::new(MANDEL);
        deviatoric_normal(&mut nn, sigma, z)?;
        for i in 0..NSIG {
            df_dz[ALPHA0 + i] = -nn.vector()[i];
        }
        df_dz[KK] = -1.0;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{DruckerPragerYield, VonMisesYield, YieldFunction};
    use crate::material::mandel::{new_symmetric, MANDEL, NSIG};
    use russell_lab::{approx_eq, Vector};
    use russell_tensor::Tensor2;

    fn check_derivatives(yf: &dyn YieldFunction, sigma: &Tensor2, z: &Vector) {
        let h = 1e-6;
        let mut df_dsigma = Tensor2::new(MANDEL);
        yf.df_dsigma(&mut df_dsigma, sigma, z).unwrap();
        for j in 0..NSIG {
            let mut s_p = sigma.clone();
            let mut s_m = sigma.clone();
            s_p.vector_mut()[j] += h;
            s_m.vector_mut()[j] -= h;
            let num = (yf.f(&s_p, z).unwrap() - yf.f(&s_m, z).unwrap()) / (2.0 * h);
            approx_eq(df_dsigma.vector()[j], num, 1e-7);
        }
        let nz = z.dim();
        let mut df_dz = Vector::new(nz);
        yf.df_dz(&mut df_dz, sigma, z).unwrap();
        for j in 0..nz {
            let mut z_p = z.clone();
            let mut z_m = z.clone();
            z_p[j] += h;
            z_m[j] -= h;
            let num = (yf.f(sigma, &z_p).unwrap() - yf.f(sigma, &z_m).unwrap()) / (2.0 * h);
            approx_eq(df_dz[j], num, 1e-7);
        }
    }

    #[test]
    fn von_mises_works() {
        let yf = VonMisesYield::new();
        let z = Vector::from(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0]);

        // uniaxial stress: q = |σxx|
        let sigma = new_symmetric(&[12.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        approx_eq(yf.f(&sigma, &z).unwrap(), 2.0, 1e-14);

        // hydrostatic stresses do not affect f
        let sigma = new_symmetric(&[7.0, 7.0, 7.0, 0.0, 0.0, 0.0]);
        approx_eq(yf.f(&sigma, &z).unwrap(), -10.0, 1e-14);

        // the backstress shifts the center of the yield surface
        let z = Vector::from(&[2.0, -1.0, -1.0, 0.0, 0.0, 0.0, 10.0]);
        let sigma = new_symmetric(&[3.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        approx_eq(yf.f(&sigma, &z).unwrap(), -10.0, 1e-14);

        let sigma = new_symmetric(&[20.0, 5.0, -3.0, 4.0, -2.0, 1.0]);
        check_derivatives(&yf, &sigma, &z);
    }

    #[test]
    fn von_mises_captures_singularity() {
        let yf = VonMisesYield::new();
        let z = Vector::from(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0]);
        let sigma = new_symmetric(&[7.0, 7.0, 7.0, 0.0, 0.0, 0.0]);
        let mut df_dsigma = Tensor2::new(MANDEL);
        assert_eq!(
            yf.df_dsigma(&mut df_dsigma, &sigma, &z).err(),
            Some("cannot compute the normal to the yield surface at the hydrostatic axis")
        );
    }

    #[test]
    fn drucker_prager_works() {
        let yf = DruckerPragerYield::new(0.6);
        let z = Vector::from(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0]);

        // compression enlarges the admissible region
        let sigma = new_symmetric(&[-10.0, -10.0, -10.0, 0.0, 0.0, 0.0]);
        approx_eq(yf.f(&sigma, &z).unwrap(), -16.0, 1e-14);

        // uniaxial tension: q = 12, σm = 4
        let sigma = new_symmetric(&[12.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        approx_eq(yf.f(&sigma, &z).unwrap(), 12.0 + 0.6 * 4.0 - 10.0, 1e-14);

        let z = Vector::from(&[1.0, -0.5, -0.5, 0.3, 0.0, 0.0, 8.0]);
        let sigma = new_symmetric(&[-20.0, 5.0, -3.0, 4.0, -2.0, 1.0]);
        check_derivatives(&yf, &sigma, &z);
    }
}
