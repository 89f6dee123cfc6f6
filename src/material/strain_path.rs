use super::mandel::{new_symmetric, MANDEL, NSIG};
use super::{LocalState, MaterialState};
use crate::base::MaterialError;
use russell_tensor::Tensor2;

/// Holds a sequence of total strains driving a material point
pub struct StrainPath {
    /// Holds the total strain tensors (Mandel basis)
    pub strains: Vec<Tensor2>,
}

impl StrainPath {
    /// Allocates an empty path
    pub fn new() -> Self {
        StrainPath { strains: Vec::new() }
    }

    /// Generates a monotonic uniaxial-strain path
    ///
    /// ```text
    /// ε = diag(εxx, 0, 0)    with    εxx = (i+1) eps_max / n_increments
    /// ```
    pub fn new_uniaxial_strain(eps_max: f64, n_increments: usize) -> Self {
        let mut path = StrainPath::new();
        for i in 0..n_increments {
            let e = eps_max * ((i + 1) as f64) / (n_increments as f64);
            path.push_components(&[e, 0.0, 0.0, 0.0, 0.0, 0.0]);
        }
        path
    }

    /// Generates a monotonic isochoric path with uniaxial (axisymmetric) deviatoric strain
    ///
    /// ```text
    /// ε = diag(εxx, -εxx/2, -εxx/2)
    /// ```
    ///
    /// This path gives the uniaxial stress response of incompressible plastic flow.
    pub fn new_isochoric(eps_max: f64, n_increments: usize) -> Self {
        let mut path = StrainPath::new();
        for i in 0..n_increments {
            let e = eps_max * ((i + 1) as f64) / (n_increments as f64);
            path.push_components(&[e, -e / 2.0, -e / 2.0, 0.0, 0.0, 0.0]);
        }
        path
    }

    /// Pushes a new total strain
    pub fn push_strain(&mut self, strain: &Tensor2) -> &mut Self {
        self.strains.push(strain.clone());
        self
    }

    /// Pushes a new total strain given its tensor components (xx, yy, zz, xy, yz, xz)
    pub fn push_components(&mut self, components: &[f64; NSIG]) -> &mut Self {
        self.strains.push(new_symmetric(components));
        self
    }

    /// Drives the material point along the path, committing each step
    ///
    /// Returns the committed states: the initial one followed by one per strain.
    ///
    /// If a step fails with an error allowing sub-stepping, the increment is
    /// split into 2, 4, 8, ... sub-increments up to `max_substeps`.
    pub fn follow(&self, material: &mut MaterialState, max_substeps: usize) -> Result<Vec<LocalState>, MaterialError> {
        let mut history = Vec::with_capacity(self.strains.len() + 1);
        history.push(material.committed().clone());
        for strain in &self.strains {
            step(material, strain, max_substeps)?;
            history.push(material.committed().clone());
        }
        Ok(history)
    }
}

/// Applies one committed step, sub-stepping on recoverable errors
fn step(material: &mut MaterialState, strain: &Tensor2, max_substeps: usize) -> Result<(), MaterialError> {
    let err = match material.set_trial_strain(strain) {
        Ok(()) => return material.commit_state(),
        Err(e) => e,
    };
    if !err.allows_substepping() {
        return Err(err);
    }
    let backup = material.get_copy();
    let eps_n = backup.committed().strain.clone();
    let mut last_err = err;
    let mut n_sub = 2;
    while n_sub <= max_substeps {
        log::debug!("strain path: {}; trying {} sub-steps", last_err, n_sub);
        match substeps(material, &eps_n, strain, n_sub) {
            Ok(()) => return Ok(()),
            Err(e) if e.allows_substepping() => {
                *material = backup.clone();
                last_err = e;
                n_sub *= 2;
            }
            Err(e) => {
                *material = backup;
                return Err(e);
            }
        }
    }
    *material = backup;
    Err(last_err)
}

/// Applies n_sub committed sub-steps from eps_n to the target strain
fn substeps(
    material: &mut MaterialState,
    eps_n: &Tensor2,
    target: &Tensor2,
    n_sub: usize,
) -> Result<(), MaterialError> {
    let mut eps = Tensor2::new(MANDEL);
    for k in 1..=n_sub {
        if k == n_sub {
            material.set_trial_strain(target)?;
        } else {
            let t = (k as f64) / (n_sub as f64);
            let (a, b) = (eps_n.vector(), target.vector());
            let e = eps.vector_mut();
            for i in 0..NSIG {
                e[i] = a[i] + t * (b[i] - a[i]);
            }
            material.set_trial_strain(&eps)?;
        }
        material.commit_state()?;
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
