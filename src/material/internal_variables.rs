use super::mandel::{ddot, NSIG};
use russell_lab::{Matrix, Vector};
use russell_tensor::{Tensor2, P_SYMDEV};

/// Specifies the internal (hardening) variables and their evolution law
///
/// The values are stored in a flat vector z owned by the local state; this trait only
/// declares the layout and the evolution law. The increments are driven by the
/// plastic multiplier Λ and the flow direction m:
///
/// ```text
/// Δz = Λ h(m, z)
/// ```
pub trait InternalVariables: Send + Sync {
    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize;

    /// Sets the internal values corresponding to the ground state
    fn initialize(&self, z: &mut Vector);

    /// Calculates the hardening function h(m, z)
    fn hardening(&self, hh: &mut Vector, m: &Tensor2, z: &Vector);

    /// Calculates the derivative of h w.r.t the flow direction: dh/dm (n_internal_values × 6)
    fn dh_dm(&self, dh_dm: &mut Matrix, m: &Tensor2, z: &Vector);

    /// Calculates the derivative of h w.r.t the internal values: dh/dz (n_internal_values × n_internal_values)
    fn dh_dz(&self, dh_dz: &mut Matrix, m: &Tensor2, z: &Vector);
}

/// Holds the index of the first component of the backstress α
pub const ALPHA0: usize = 0;

/// Holds the index of the size of the yield surface k
pub const KK: usize = NSIG;

/// Implements linear kinematic (Prager) and linear isotropic hardening
///
/// The internal values are `z = {α₀, α₁, α₂, α₃, α₄, α₅, k}` where α is the (deviatoric)
/// backstress in Mandel basis and k is the size of the yield surface.
///
/// ```text
/// Δα = Λ (2/3) Hα dev(m)
/// Δk = Λ Hk √(2/3 m:m)
/// ```
///
/// Thus, `√(2/3 m:m) Λ` is the increment of equivalent plastic strain.
#[derive(Clone, Copy, Debug)]
pub struct LinearHardening {
    /// Kinematic hardening modulus Hα
    hh_kin: f64,

    /// Isotropic hardening modulus Hk
    hh_iso: f64,

    /// Initial size of the yield surface
    z0: f64,
}

impl LinearHardening {
    /// Allocates a new instance
    pub fn new(hh_kin: f64, hh_iso: f64, z0: f64) -> Self {
        LinearHardening { hh_kin, hh_iso, z0 }
    }

    /// Copies the backstress α out of the internal values
    pub fn backstress(alpha: &mut Tensor2, z: &Vector) {
        let a = alpha.vector_mut();
        for i in 0..NSIG {
            a[i] = z[ALPHA0 + i];
        }
    }
}

impl InternalVariables for LinearHardening {
    fn n_internal_values(&self) -> usize {
        NSIG + 1 // [α, k]
    }

    fn initialize(&self, z: &mut Vector) {
        z.fill(0.0);
        z[KK] = self.z0;
    }

    fn hardening(&self, hh: &mut Vector, m: &Tensor2, _z: &Vector) {
        let mv = m.vector();
        for i in 0..NSIG {
            let mut dev_m = 0.0;
            for j in 0..NSIG {
                dev_m += P_SYMDEV[i][j] * mv[j];
            }
            hh[ALPHA0 + i] = 2.0 * self.hh_kin * dev_m / 3.0;
        }
        hh[KK] = self.hh_iso * f64::sqrt(2.0 * ddot(m, m) / 3.0);
    }

    fn dh_dm(&self, dh_dm: &mut Matrix, m: &Tensor2, _z: &Vector) {
        for i in 0..NSIG {
            for j in 0..NSIG {
                dh_dm.set(ALPHA0 + i, j, 2.0 * self.hh_kin * P_SYMDEV[i][j] / 3.0);
            }
        }
        // d√(2/3 m:m)/dm = (2/3) m / √(2/3 m:m)
        let norm_m = f64::sqrt(2.0 * ddot(m, m) / 3.0);
        let mv = m.vector();
        for j in 0..NSIG {
            let value = if norm_m > 0.0 {
                self.hh_iso * 2.0 * mv[j] / (3.0 * norm_m)
            } else {
                0.0
            };
            dh_dm.set(KK, j, value);
        }
    }

    fn dh_dz(&self, dh_dz: &mut Matrix, _m: &Tensor2, _z: &Vector) {
        dh_dz.fill(0.0);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{InternalVariables, LinearHardening, ALPHA0, KK};
    use crate::material::mandel::{components, new_symmetric, MANDEL, NSIG};
    use russell_lab::{approx_eq, Matrix, Vector};
    use russell_tensor::Tensor2;

    #[test]
    fn initialize_works() {
        let vars = LinearHardening::new(600.0, 400.0, 10.0);
        assert_eq!(vars.n_internal_values(), 7);
        let mut z = Vector::from(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        vars.initialize(&mut z);
        assert_eq!(z.as_data(), &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0]);
    }

    #[test]
    fn hardening_works() {
        let vars = LinearHardening::new(600.0, 400.0, 10.0);
        let z = Vector::new(7);
        let mut hh = Vector::new(7);

        // deviatoric unit-equivalent direction: m = diag(1, -1/2, -1/2)  =>  √(2/3 m:m) = 1
        let m = new_symmetric(&[1.0, -0.5, -0.5, 0.0, 0.0, 0.0]);
        vars.hardening(&mut hh, &m, &z);
        approx_eq(hh[KK], 400.0, 1e-12);
        approx_eq(hh[ALPHA0], 400.0, 1e-12); // (2/3) 600
        approx_eq(hh[ALPHA0 + 1], -200.0, 1e-12);

        // the backstress stays deviatoric even if m has a volumetric part
        let m = new_symmetric(&[1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        vars.hardening(&mut hh, &m, &z);
        approx_eq(hh[ALPHA0] + hh[ALPHA0 + 1] + hh[ALPHA0 + 2], 0.0, 1e-14);

        let mut alpha = Tensor2::new(MANDEL);
        let z = Vector::from(&[1.0, -0.5, -0.5, 0.0, 0.0, 0.0, 10.0]);
        LinearHardening::backstress(&mut alpha, &z);
        approx_eq(components(&alpha)[1], -0.5, 1e-15);
    }

    #[test]
    fn dh_dm_matches_finite_differences() {
        let vars = LinearHardening::new(600.0, 400.0, 10.0);
        let z = Vector::new(7);
        let m = new_symmetric(&[0.8, -0.3, -0.1, 0.2, -0.4, 0.1]);
        let mut dh_dm = Matrix::new(7, NSIG);
        vars.dh_dm(&mut dh_dm, &m, &z);

        let h = 1e-6;
        let mut hh_p = Vector::new(7);
        let mut hh_m = Vector::new(7);
        for j in 0..NSIG {
            let mut m_p = m.clone();
            let mut m_m = m.clone();
            m_p.vector_mut()[j] += h;
            m_m.vector_mut()[j] -= h;
            vars.hardening(&mut hh_p, &m_p, &z);
            vars.hardening(&mut hh_m, &m_m, &z);
            for i in 0..7 {
                let num = (hh_p[i] - hh_m[i]) / (2.0 * h);
                approx_eq(dh_dm.get(i, j), num, 1e-6);
            }
        }

        let mut dh_dz = Matrix::new(7, 7);
        vars.dh_dz(&mut dh_dz, &m, &z);
        for i in 0..7 {
            for j in 0..7 {
                assert_eq!(dh_dz.get(i, j), 0.0);
            }
        }
    }
}
