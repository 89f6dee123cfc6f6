use plastmat::material::mandel::new_symmetric;
use plastmat::prelude::*;
use russell_tensor::Tensor2;

// Consistent tangent versus finite differences
//
// TEST GOAL
//
// Verifies that the tangent returned by the material point equals the
// derivative dσ/dε of the converged return mapping, computed by central
// differences of set_trial_strain around a plastic trial strain.
//
// Both an associated model (von Mises, mixed hardening) and a non-associated
// model (Drucker-Prager with Mg ≠ M) are checked; the latter gives an
// unsymmetric tangent.

fn check_tangent(param: &ParamMaterial, committed: &[f64; 6], trial: &[f64; 6]) -> Result<(), MaterialError> {
    let mut material = MaterialState::new(param)?;
    material.set_trial_strain(&new_symmetric(committed))?;
    material.commit_state()?;

    let strain = new_symmetric(trial);
    material.set_trial_strain(&strain)?;
    assert!(!material.current().elastic);
    let dd = material.get_tangent().clone();

    let h = 1e-7;
    let tol = 1e-5 * 60000.0;
    for j in 0..6 {
        let mut sigma: Vec<Tensor2> = Vec::new();
        for sign in [-1.0, 1.0] {
            let mut perturbed = strain.clone();
            perturbed.vector_mut()[j] += sign * h;
            material.set_trial_strain(&perturbed)?;
            assert!(!material.current().elastic);
            sigma.push(material.get_stress().clone());
        }
        for i in 0..6 {
            let num = (sigma[1].vector()[i] - sigma[0].vector()[i]) / (2.0 * h);
            let ana = dd.matrix().get(i, j);
            assert!(
                f64::abs(num - ana) < tol,
                "D[{}][{}]: numerical = {}, analytical = {}",
                i,
                j,
                num,
                ana
            );
        }
    }
    material.revert_to_last_commit()
}

#[test]
fn test_tangent_von_mises_mixed() -> Result<(), MaterialError> {
    let param = SampleParams::param_von_mises_mixed();
    check_tangent(
        &param,
        &[8e-4, -3e-4, -2e-4, 1e-4, 0.0, 0.0],
        &[1.1e-3, -4e-4, -1e-4, 3e-4, -1e-4, 1e-4],
    )
}

#[test]
fn test_tangent_drucker_prager_non_associated() -> Result<(), MaterialError> {
    let param = SampleParams::param_drucker_prager();
    check_tangent(
        &param,
        &[4e-4, -6e-4, -6e-4, 1e-4, 0.0, 0.0],
        &[9e-4, -7e-4, -6e-4, 3e-4, -1e-4, 1e-4],
    )?;

    // unsymmetric tangent
    let mut material = MaterialState::new(&param)?;
    assert!(!material.symmetric_stiffness());
    material.set_trial_strain(&new_symmetric(&[9e-4, -7e-4, -6e-4, 3e-4, -1e-4, 1e-4]))?;
    let dd = material.get_tangent().matrix();
    let mut max_diff: f64 = 0.0;
    for i in 0..6 {
        for j in 0..6 {
            max_diff = max_diff.max(f64::abs(dd.get(i, j) - dd.get(j, i)));
        }
    }
    assert!(max_diff > 1.0);
    Ok(())
}

#[test]
fn test_tangent_elastic_state() -> Result<(), MaterialError> {
    let param = SampleParams::param_drucker_prager();
    let mut material = MaterialState::new(&param)?;
    material.set_trial_strain(&new_symmetric(&[1e-5, 0.0, 0.0, 0.0, 0.0, 0.0]))?;
    assert!(material.current().elastic);
    let dd = material.get_tangent().matrix();
    // K + 4G/3 and 2G
    assert!(f64::abs(dd.get(0, 0) - 36000.0) < 1e-9);
    assert!(f64::abs(dd.get(3, 3) - 24000.0) < 1e-9);
    Ok(())
}
