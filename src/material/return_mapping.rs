use super::mandel::{norm, MANDEL, NSIG};
use super::{ElasticityLaw, InternalVariables, LocalState, PlasticFlow, StressStrainTrait, YieldFunction};
use crate::base::{MaterialError, ParamReturnMapping};
use russell_lab::{mat_inverse, solve_lin_sys, vec_norm, Matrix, Norm, Vector};
use russell_tensor::{t4_ddot_t2, Tensor2, Tensor4};

/// Implements the implicit (backward Euler) return mapping for small-strain elastoplasticity
///
/// The engine is parameterized by the elasticity law `E`, the yield function `Y`,
/// the plastic flow direction `P`, and the internal variables `V`.
///
/// # Local system
///
/// The unknowns are `x = {σ, z, Λ}` and the residuals are:
///
/// ```text
/// rε = εᵉ(σ) - εᵉ_trial + Λ m(σ, z)
/// rz = z - z_n - Λ h(m, z)
/// rf = f(σ, z)
/// ```
///
/// where `εᵉ_trial = ε_{n+1} - εᵖ_n`. The system is solved by Newton-Raphson
/// starting from the elastic trial state (Λ = 0).
///
/// # Consistent tangent
///
/// Since `∂r/∂ε = {-I, 0, 0}`, the algorithmic tangent `dσ/dε` is the upper-left
/// 6×6 block of the inverse of the local Jacobian at the converged state.
pub struct ReturnMapping<E, Y, P, V> {
    /// Elasticity law
    pub elasticity: E,

    /// Yield function
    pub yield_function: Y,

    /// Plastic flow direction
    pub flow: P,

    /// Internal variables and evolution law
    pub variables: V,

    /// Parameters for the local iterations
    param: ParamReturnMapping,
}

/// Holds auxiliary arrays for the local iterations
struct Workspace {
    /// Elastic strain εᵉ(σ)
    eps_e: Tensor2,

    /// Flow direction m
    m: Tensor2,

    /// df/dσ
    df_dsigma: Tensor2,

    /// Elastic compliance Cₑ
    cce: Tensor4,

    /// dm/dσ
    dm_dsigma: Tensor4,

    /// df/dz
    df_dz: Vector,

    /// Hardening function h
    hh: Vector,

    /// dm/dz (6 × nz)
    dm_dz: Matrix,

    /// dh/dm (nz × 6)
    dh_dm: Matrix,

    /// dh/dz (nz × nz)
    dh_dz: Matrix,

    /// Local Jacobian J = ∂r/∂x
    jj: Matrix,

    /// Local residual r
    rr: Vector,
}

impl Workspace {
    fn new(nz: usize) -> Self {
        let n = NSIG + nz + 1;
        Workspace {
            eps_e: Tensor2::new(MANDEL),
            m: Tensor2::new(MANDEL),
            df_dsigma: Tensor2::new(MANDEL),
            cce: Tensor4::new(MANDEL),
            dm_dsigma: Tensor4::new(MANDEL),
            df_dz: Vector::new(nz),
            hh: Vector::new(nz),
            dm_dz: Matrix::new(NSIG, nz),
            dh_dm: Matrix::new(nz, NSIG),
            dh_dz: Matrix::new(nz, nz),
            jj: Matrix::new(n, n),
            rr: Vector::new(n),
        }
    }
}

impl<E, Y, P, V> ReturnMapping<E, Y, P, V>
where
    E: ElasticityLaw,
    Y: YieldFunction,
    P: PlasticFlow,
    V: InternalVariables,
{
    /// Assembles the engine from its components
    pub fn assemble(elasticity: E, yield_function: Y, flow: P, variables: V, param: ParamReturnMapping) -> Self {
        ReturnMapping {
            elasticity,
            yield_function,
            flow,
            variables,
            param,
        }
    }

    /// Returns the parameters of the local iterations
    pub fn param(&self) -> &ParamReturnMapping {
        &self.param
    }

    /// Calculates the local residual vector (and the flow direction and hardening at x)
    fn calc_residual(
        &self,
        ws: &mut Workspace,
        sigma: &Tensor2,
        z: &Vector,
        lambda: f64,
        eps_e_trial: &Tensor2,
        z_n: &Vector,
    ) -> Result<(), MaterialError> {
        let nz = z.dim();
        self.flow
            .direction(&mut ws.m, sigma, z)
            .map_err(MaterialError::SingularJacobian)?;
        self.variables.hardening(&mut ws.hh, &ws.m, z);
        self.elasticity.calc_elastic_strain(&mut ws.eps_e, sigma);
        let f = self
            .yield_function
            .f(sigma, z)
            .map_err(MaterialError::SingularJacobian)?;
        let (eps_e, eps_e_trial, m) = (ws.eps_e.vector(), eps_e_trial.vector(), ws.m.vector());
        for i in 0..NSIG {
            ws.rr[i] = eps_e[i] - eps_e_trial[i] + lambda * m[i];
        }
        for a in 0..nz {
            ws.rr[NSIG + a] = z[a] - z_n[a] - lambda * ws.hh[a];
        }
        ws.rr[NSIG + nz] = f;
        Ok(())
    }

    /// Calculates the local Jacobian J = ∂r/∂x at x = {σ, z, Λ}
    fn calc_jacobian(&self, ws: &mut Workspace, sigma: &Tensor2, z: &Vector, lambda: f64) -> Result<(), MaterialError> {
        let nz = z.dim();
        let n = NSIG + nz + 1;

        // gradients
        self.flow
            .direction(&mut ws.m, sigma, z)
            .map_err(MaterialError::SingularJacobian)?;
        self.flow
            .dm_dsigma(&mut ws.dm_dsigma, sigma, z)
            .map_err(MaterialError::SingularJacobian)?;
        self.flow
            .dm_dz(&mut ws.dm_dz, sigma, z)
            .map_err(MaterialError::SingularJacobian)?;
        self.yield_function
            .df_dsigma(&mut ws.df_dsigma, sigma, z)
            .map_err(MaterialError::SingularJacobian)?;
        self.yield_function
            .df_dz(&mut ws.df_dz, sigma, z)
            .map_err(MaterialError::SingularJacobian)?;
        self.elasticity.calc_cce(&mut ws.cce, sigma);
        self.variables.hardening(&mut ws.hh, &ws.m, z);
        self.variables.dh_dm(&mut ws.dh_dm, &ws.m, z);
        self.variables.dh_dz(&mut ws.dh_dz, &ws.m, z);

        let cce = ws.cce.matrix();
        let dm_dsigma = ws.dm_dsigma.matrix();
        let m = ws.m.vector();
        ws.jj.fill(0.0);

        // ∂rε/∂σ = Cₑ + Λ dm/dσ,  ∂rε/∂z = Λ dm/dz,  ∂rε/∂Λ = m
        for i in 0..NSIG {
            for j in 0..NSIG {
                ws.jj.set(i, j, cce.get(i, j) + lambda * dm_dsigma.get(i, j));
            }
            for b in 0..nz {
                ws.jj.set(i, NSIG + b, lambda * ws.dm_dz.get(i, b));
            }
            ws.jj.set(i, n - 1, m[i]);
        }

        // ∂rz/∂σ = -Λ dh/dm · dm/dσ,  ∂rz/∂z = I - Λ (dh/dz + dh/dm · dm/dz),  ∂rz/∂Λ = -h
        for a in 0..nz {
            for j in 0..NSIG {
                let mut dh_dsigma = 0.0;
                for k in 0..NSIG {
                    dh_dsigma += ws.dh_dm.get(a, k) * dm_dsigma.get(k, j);
                }
                ws.jj.set(NSIG + a, j, -lambda * dh_dsigma);
            }
            for b in 0..nz {
                let mut dh_dz = ws.dh_dz.get(a, b);
                for k in 0..NSIG {
                    dh_dz += ws.dh_dm.get(a, k) * ws.dm_dz.get(k, b);
                }
                let delta = if a == b { 1.0 } else { 0.0 };
                ws.jj.set(NSIG + a, NSIG + b, delta - lambda * dh_dz);
            }
            ws.jj.set(NSIG + a, n - 1, -ws.hh[a]);
        }

        // ∂rf/∂σ = df/dσ,  ∂rf/∂z = df/dz,  ∂rf/∂Λ = 0
        for j in 0..NSIG {
            ws.jj.set(n - 1, j, ws.df_dsigma.vector()[j]);
        }
        for b in 0..nz {
            ws.jj.set(n - 1, NSIG + b, ws.df_dz[b]);
        }
        Ok(())
    }

    /// Returns the largest scaled residual
    ///
    /// The strain residual is converted to stress units with Dₑ.
    fn scaled_error(&self, rr: &Vector, dde: &Tensor4, scale_sigma: f64, scale_z: f64) -> f64 {
        let n = rr.dim();
        let nz = n - NSIG - 1;
        let mut r_eps = Tensor2::new(MANDEL);
        let mut r_sig = Tensor2::new(MANDEL);
        for i in 0..NSIG {
            r_eps.vector_mut()[i] = rr[i];
        }
        t4_ddot_t2(&mut r_sig, 1.0, dde, &r_eps);
        let mut sum_z = 0.0;
        for a in 0..nz {
            sum_z += rr[NSIG + a] * rr[NSIG + a];
        }
        let err_eps = norm(&r_sig) / scale_sigma;
        let err_z = f64::sqrt(sum_z) / scale_z;
        let err_f = f64::abs(rr[n - 1]) / scale_sigma;
        err_eps.max(err_z).max(err_f)
    }

    /// Runs the local Newton-Raphson iterations
    ///
    /// Returns `(σ, z, Λ, m, iterations)` at convergence.
    fn solve_local(
        &self,
        sigma_trial: &Tensor2,
        eps_e_trial: &Tensor2,
        z_n: &Vector,
    ) -> Result<(Tensor2, Vector, f64, Tensor2, usize), MaterialError> {
        let nz = z_n.dim();
        let n = NSIG + nz + 1;

        // scales for the convergence check
        let mut dde = Tensor4::new(MANDEL);
        self.elasticity.calc_dde(&mut dde, eps_e_trial);
        let scale_sigma = 1.0 + norm(sigma_trial);
        let scale_z = 1.0 + vec_norm(z_n, Norm::Euc);

        // initial values
        let mut ws = Workspace::new(nz);
        let mut sigma = sigma_trial.clone();
        let mut z = z_n.clone();
        let mut lambda = 0.0;
        let mut dx = Vector::new(n);

        // iterations
        let max_iterations = self.param.max_iterations;
        let mut it = 0;
        loop {
            // check convergence
            self.calc_residual(&mut ws, &sigma, &z, lambda, eps_e_trial, z_n)?;
            let error = self.scaled_error(&ws.rr, &dde, scale_sigma, scale_z);
            log::trace!("return mapping: it = {:>2}, Λ = {:>15.8e}, error = {:>10.3e}", it, lambda, error);
            if error <= self.param.res_tol {
                return Ok((sigma, z, lambda, ws.m, it));
            }
            if it == max_iterations {
                log::debug!("return mapping failed after {} iterations; error = {:e}", it, error);
                return Err(MaterialError::NonConvergence {
                    iterations: it,
                    residual: error,
                });
            }

            // solve J δx = -r
            self.calc_jacobian(&mut ws, &sigma, &z, lambda)?;
            for i in 0..n {
                dx[i] = -ws.rr[i];
            }
            solve_lin_sys(&mut dx, &mut ws.jj)
                .map_err(|_| MaterialError::SingularJacobian("cannot solve the local linear system"))?;
            if dx.as_data().iter().any(|v| !v.is_finite()) {
                return Err(MaterialError::SingularJacobian("the local Jacobian is ill-conditioned"));
            }

            // update x
            let s = sigma.vector_mut();
            for i in 0..NSIG {
                s[i] += dx[i];
            }
            for a in 0..nz {
                z[a] += dx[NSIG + a];
            }
            lambda += dx[n - 1];
            it += 1;
        }
    }
}

impl<E, Y, P, V> StressStrainTrait for ReturnMapping<E, Y, P, V>
where
    E: ElasticityLaw,
    Y: YieldFunction,
    P: PlasticFlow,
    V: InternalVariables,
{
    /// Indicates that the stiffness matrix is symmetric (associated flow)
    fn symmetric_stiffness(&self) -> bool {
        self.flow.associated()
    }

    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize {
        self.variables.n_internal_values()
    }

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), MaterialError> {
        self.variables.initialize(&mut state.internal_values);
        let f = self
            .yield_function
            .f(&state.stress, &state.internal_values)
            .map_err(MaterialError::Configuration)?;
        if f > self.param.yf_tol {
            return Err(MaterialError::Configuration("stress is outside the yield surface"));
        }
        state.yield_value = Some(f);
        Ok(())
    }

    /// Computes the consistent tangent stiffness
    fn stiffness(&self, dd: &mut Tensor4, state: &LocalState) -> Result<(), MaterialError> {
        if state.elastic {
            let mut eps_e = Tensor2::new(MANDEL);
            state.elastic_strain(&mut eps_e);
            self.elasticity.calc_dde(dd, &eps_e);
            return Ok(());
        }
        let nz = self.variables.n_internal_values();
        let n = NSIG + nz + 1;
        let mut ws = Workspace::new(nz);
        self.calc_jacobian(&mut ws, &state.stress, &state.internal_values, state.algo_lagrange)?;

        // J dx/dε = {I, 0, 0}  ⇒  dσ/dε = (J⁻¹)[0..6, 0..6]
        let mut jj_inv = Matrix::new(n, n);
        mat_inverse(&mut jj_inv, &ws.jj)
            .map_err(|_| MaterialError::SingularJacobian("cannot compute the consistent tangent"))?;
        let mat = dd.matrix_mut();
        for i in 0..NSIG {
            for j in 0..NSIG {
                let v = jj_inv.get(i, j);
                if !v.is_finite() {
                    return Err(MaterialError::SingularJacobian("cannot compute the consistent tangent"));
                }
                mat.set(i, j, v);
            }
        }
        Ok(())
    }

    /// Updates the stress tensor for the total strain stored in the state
    ///
    /// The state is left in an undefined condition if an error occurs.
    fn integrate_stress(&self, state: &mut LocalState) -> Result<(), MaterialError> {
        state.reset_algorithmic_variables();

        // elastic trial: σ_trial = σ(ε - εᵖ)
        let mut eps_e_trial = Tensor2::new(MANDEL);
        state.elastic_strain(&mut eps_e_trial);
        self.elasticity.calc_stress(&mut state.stress, &eps_e_trial);
        let f_trial = self
            .yield_function
            .f(&state.stress, &state.internal_values)
            .map_err(MaterialError::SingularJacobian)?;
        if f_trial <= self.param.yf_tol {
            state.yield_value = Some(f_trial);
            return Ok(());
        }

        // plastic correction
        let (sigma, z, lambda, m, iterations) = self.solve_local(&state.stress, &eps_e_trial, &state.internal_values)?;
        if lambda < 0.0 {
            log::debug!("return mapping: negative Λ = {:e}", lambda);
            return Err(MaterialError::NegativeMultiplier(lambda));
        }

        // εᵖ += Λ m and σ = σ(ε - εᵖ)
        let eps_p = state.plastic_strain.vector_mut();
        for i in 0..NSIG {
            eps_p[i] += lambda * m.vector()[i];
        }
        state.internal_values = z;
        let mut eps_e = Tensor2::new(MANDEL);
        state.elastic_strain(&mut eps_e);
        self.elasticity.calc_stress(&mut state.stress, &eps_e);

        // admissibility
        let f = self
            .yield_function
            .f(&state.stress, &state.internal_values)
            .map_err(MaterialError::SingularJacobian)?;
        let tol_f = self.param.yf_tol + 10.0 * self.param.res_tol * (1.0 + norm(&sigma));
        if f > tol_f {
            return Err(MaterialError::NonConvergence {
                iterations,
                residual: f,
            });
        }
        state.elastic = false;
        state.algo_lagrange = lambda;
        state.n_iterations = iterations;
        state.yield_value = Some(f);
        log::debug!(
            "return mapping: converged in {} iterations; Λ = {:e}, f = {:e}",
            iterations,
            lambda,
            f
        );
        Ok(())
    }

    /// Recomputes the stress of a restored state and checks the yield condition
    fn restore_state(&self, state: &mut LocalState) -> Result<(), MaterialError> {
        state.recompute_stress(&self.elasticity)?;
        let f = self
            .yield_function
            .f(&state.stress, &state.internal_values)
            .map_err(MaterialError::Configuration)?;
        let tol_f = self.param.yf_tol + 10.0 * self.param.res_tol * (1.0 + norm(&state.stress));
        if f > tol_f {
            return Err(MaterialError::Configuration("the state is outside the yield surface"));
        }
        state.yield_value = Some(f);
        Ok(())
    }

    /// Calculates the yield function value at the state
    fn yield_function(&self, state: &LocalState) -> Result<Option<f64>, MaterialError> {
        let f = self
            .yield_function
            .f(&state.stress, &state.internal_values)
            .map_err(MaterialError::SingularJacobian)?;
        Ok(Some(f))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
