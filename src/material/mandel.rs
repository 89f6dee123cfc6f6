//! Auxiliary functions for symmetric second-order tensors in the 3D Mandel basis
//!
//! The Mandel vector of a symmetric tensor T is:
//!
//! ```text
//! {T} = { T00, T11, T22, √2 T01, √2 T12, √2 T02 }
//! ```
//!
//! Thus, the double contraction `A : B` is the dot product of the Mandel vectors.

use russell_lab::vec_inner;
use russell_tensor::{Mandel, Tensor2};
use std::f64::consts::SQRT_2;

/// Holds the number of components of a symmetric tensor in 3D
pub const NSIG: usize = 6;

/// Holds the Mandel representation used throughout the crate
pub const MANDEL: Mandel = Mandel::Symmetric;

/// Holds the Mandel vector of the second-order identity tensor
pub const IDENTITY: [f64; NSIG] = [1.0, 1.0, 1.0, 0.0, 0.0, 0.0];

/// Allocates a symmetric tensor from its standard components
///
/// The components are ordered as `[T00, T11, T22, T01, T12, T02]`.
pub fn new_symmetric(components: &[f64; NSIG]) -> Tensor2 {
    let mut tt = Tensor2::new(MANDEL);
    let v = tt.vector_mut();
    v[0] = components[0];
    v[1] = components[1];
    v[2] = components[2];
    v[3] = SQRT_2 * components[3];
    v[4] = SQRT_2 * components[4];
    v[5] = SQRT_2 * components[5];
    tt
}

/// Returns the standard components `[T00, T11, T22, T01, T12, T02]` of a symmetric tensor
pub fn components(tt: &Tensor2) -> [f64; NSIG] {
    let v = tt.vector();
    [v[0], v[1], v[2], v[3] / SQRT_2, v[4] / SQRT_2, v[5] / SQRT_2]
}

/// Returns the double contraction A : B
pub fn ddot(a: &Tensor2, b: &Tensor2) -> f64 {
    vec_inner(a.vector(), b.vector())
}

/// Returns the Frobenius norm ‖T‖
pub fn norm(tt: &Tensor2) -> f64 {
    f64::sqrt(ddot(tt, tt))
}

/// Returns the mean value tr(T)/3 (e.g., the mean stress σm)
pub fn mean(tt: &Tensor2) -> f64 {
    let v = tt.vector();
    (v[0] + v[1] + v[2]) / 3.0
}

/// Calculates the deviator `dev(T) = T - tr(T)/3 I`
pub fn deviator(dev: &mut Tensor2, tt: &Tensor2) {
    let m = mean(tt);
    let v = tt.vector();
    let d = dev.vector_mut();
    for i in 0..NSIG {
        d[i] = v[i] - m * IDENTITY[i];
    }
}

/// Returns the von Mises equivalent value `√(3/2 dev(T):dev(T))` (e.g., σd)
pub fn von_mises(tt: &Tensor2) -> f64 {
    let mut s = Tensor2::new(MANDEL);
    deviator(&mut s, tt);
    f64::sqrt(1.5 * ddot(&s, &s))
}

/// Returns the equivalent strain `√(2/3 E:E)` (e.g., the equivalent plastic strain of a radial path)
pub fn equivalent_strain(ee: &Tensor2) -> f64 {
    f64::sqrt(2.0 * ddot(ee, ee) / 3.0)
}

/// Calculates `C = A + β B`
pub fn add_scaled(cc: &mut Tensor2, a: &Tensor2, beta: f64, b: &Tensor2) {
    let (u, v) = (a.vector(), b.vector());
    let w = cc.vector_mut();
    for i in 0..NSIG {
        w[i] = u[i] + beta * v[i];
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use russell_lab::approx_eq;

    #[test]
    fn new_symmetric_and_components_work() {
        let tt = new_symmetric(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        approx_eq(tt.vector()[3], 4.0 * SQRT_2, 1e-15);
        let c = components(&tt);
        for i in 0..NSIG {
            approx_eq(c[i], (i + 1) as f64, 1e-15);
        }
    }

    #[test]
    fn invariants_work() {
        // T = [[1,4,0],[4,2,0],[0,0,3]]  =>  T:T = 1 + 4 + 9 + 2*16 = 46
        let tt = new_symmetric(&[1.0, 2.0, 3.0, 4.0, 0.0, 0.0]);
        approx_eq(ddot(&tt, &tt), 46.0, 1e-13);
        approx_eq(norm(&tt), f64::sqrt(46.0), 1e-14);
        approx_eq(mean(&tt), 2.0, 1e-15);

        let mut s = Tensor2::new(MANDEL);
        deviator(&mut s, &tt);
        approx_eq(mean(&s), 0.0, 1e-15);
        let c = components(&s);
        approx_eq(c[0], -1.0, 1e-15);
        approx_eq(c[1], 0.0, 1e-15);
        approx_eq(c[2], 1.0, 1e-15);
        approx_eq(c[3], 4.0, 1e-15);

        // uniaxial: σ = diag(10, 0, 0)  =>  σd = 10
        let sig = new_symmetric(&[10.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        approx_eq(von_mises(&sig), 10.0, 1e-14);

        // pure shear: τ = 1  =>  σd = √3
        let sig = new_symmetric(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        approx_eq(von_mises(&sig), f64::sqrt(3.0), 1e-14);

        // isochoric uniaxial strain: ε = diag(1, -1/2, -1/2)  =>  εd = 1
        let eps = new_symmetric(&[1.0, -0.5, -0.5, 0.0, 0.0, 0.0]);
        approx_eq(equivalent_strain(&eps), 1.0, 1e-15);
    }

    #[test]
    fn add_scaled_works() {
        let a = new_symmetric(&[1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        let b = new_symmetric(&[1.0, 2.0, 3.0, 1.0, 0.0, 0.0]);
        let mut c = Tensor2::new(MANDEL);
        add_scaled(&mut c, &a, -2.0, &b);
        let comps = components(&c);
        approx_eq(comps[0], -1.0, 1e-15);
        approx_eq(comps[1], -3.0, 1e-15);
        approx_eq(comps[2], -5.0, 1e-15);
        approx_eq(comps[3], -2.0, 1e-15);
    }
}
