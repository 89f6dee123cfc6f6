use super::mandel::MANDEL;
use super::{LocalState, StressStrainModel};
use crate::base::{MaterialError, ParamMaterial};
use russell_lab::Vector;
use russell_tensor::{Tensor2, Tensor4};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the state of a single material point with the commit/trial protocol
///
/// The committed state is only replaced by [MaterialState::commit_state]. Trial
/// evaluations always start from the committed state. The model (parameters and
/// constitutive functions) is immutable and shared among copies; the local states
/// are owned by each instance.
#[derive(Clone)]
pub struct MaterialState {
    /// Material definition
    param: ParamMaterial,

    /// Stress-strain model (shared, read-only)
    model: StressStrainModel,

    /// Last committed state
    committed: LocalState,

    /// Trial state (not yet committed)
    trial: Option<LocalState>,

    /// Consistent tangent at the committed state
    committed_tangent: Tensor4,

    /// Consistent tangent at the trial state
    trial_tangent: Tensor4,
}

/// Holds the persistent data of a material point
///
/// The record stores the Mandel components of the committed state; thus,
/// [MaterialState::from_record] reproduces the committed values bit-for-bit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Material definition (tag, density, elastic and hardening parameters)
    pub param: ParamMaterial,

    /// Committed state
    pub state: LocalState,
}

impl MaterialState {
    /// Allocates a new instance at the ground state
    pub fn new(param: &ParamMaterial) -> Result<Self, MaterialError> {
        let model = StressStrainModel::new(param)?;
        let committed = ground_state(&model)?;
        let mut committed_tangent = Tensor4::new(MANDEL);
        model.actual.stiffness(&mut committed_tangent, &committed)?;
        let trial_tangent = committed_tangent.clone();
        Ok(MaterialState {
            param: *param,
            model,
            committed,
            trial: None,
            committed_tangent,
            trial_tangent,
        })
    }

    /// Sets the trial (total) strain and integrates the stress from the committed state
    ///
    /// Repeated calls before [MaterialState::commit_state] always restart from the
    /// committed state. On failure, the trial state is cleared.
    pub fn set_trial_strain(&mut self, strain: &Tensor2) -> Result<(), MaterialError> {
        self.trial = None;
        let mut trial = self.committed.clone();
        let (eps, eps_trial) = (strain.vector(), trial.strain.vector_mut());
        for i in 0..eps_trial.dim() {
            eps_trial[i] = eps[i];
        }
        self.integrate_trial(trial)
    }

    /// Sets the trial strain as the committed strain plus an increment
    pub fn set_trial_strain_increment(&mut self, delta_strain: &Tensor2) -> Result<(), MaterialError> {
        self.trial = None;
        let mut trial = self.committed.clone();
        trial.update_strain(1.0, delta_strain);
        self.integrate_trial(trial)
    }

    /// Integrates the stress of a trial state (whose strain is already set) and stores it
    fn integrate_trial(&mut self, mut trial: LocalState) -> Result<(), MaterialError> {
        self.model.actual.integrate_stress(&mut trial)?;
        self.model.actual.stiffness(&mut self.trial_tangent, &trial)?;
        self.trial = Some(trial);
        Ok(())
    }

    /// Accepts the trial state
    pub fn commit_state(&mut self) -> Result<(), MaterialError> {
        match self.trial.take() {
            Some(trial) => {
                self.committed = trial;
                self.committed_tangent.set_tensor(1.0, &self.trial_tangent);
                Ok(())
            }
            None => Err(MaterialError::InvalidState("there is no trial state to commit")),
        }
    }

    /// Discards the trial state
    pub fn revert_to_last_commit(&mut self) -> Result<(), MaterialError> {
        match self.trial.take() {
            Some(_) => Ok(()),
            None => Err(MaterialError::InvalidState("there is no trial state to revert")),
        }
    }

    /// Resets the material point to the ground state
    pub fn revert_to_start(&mut self) -> Result<(), MaterialError> {
        self.committed = ground_state(&self.model)?;
        self.trial = None;
        self.model.actual.stiffness(&mut self.committed_tangent, &self.committed)?;
        Ok(())
    }

    /// Returns an independent copy (the local states are deep-copied)
    pub fn get_copy(&self) -> Self {
        self.clone()
    }

    /// Returns the identification tag
    pub fn tag(&self) -> i32 {
        self.param.tag
    }

    /// Returns the mass density
    pub fn density(&self) -> f64 {
        self.param.density
    }

    /// Returns the material definition
    pub fn param(&self) -> &ParamMaterial {
        &self.param
    }

    /// Indicates that the tangent is symmetric
    pub fn symmetric_stiffness(&self) -> bool {
        self.model.actual.symmetric_stiffness()
    }

    /// Returns the current state (trial if available; otherwise committed)
    pub fn current(&self) -> &LocalState {
        self.trial.as_ref().unwrap_or(&self.committed)
    }

    /// Returns the committed state
    pub fn committed(&self) -> &LocalState {
        &self.committed
    }

    /// Returns the trial state, if any
    pub fn trial(&self) -> Option<&LocalState> {
        self.trial.as_ref()
    }

    /// Returns the current stress
    pub fn get_stress(&self) -> &Tensor2 {
        &self.current().stress
    }

    /// Returns the current strain
    pub fn get_strain(&self) -> &Tensor2 {
        &self.current().strain
    }

    /// Returns the current plastic strain
    pub fn get_plastic_strain(&self) -> &Tensor2 {
        &self.current().plastic_strain
    }

    /// Returns the current internal values
    pub fn get_internal_values(&self) -> &Vector {
        &self.current().internal_values
    }

    /// Returns the current consistent tangent
    pub fn get_tangent(&self) -> &Tensor4 {
        match self.trial {
            Some(_) => &self.trial_tangent,
            None => &self.committed_tangent,
        }
    }

    /// Returns the current yield function value (None if the model is elastic)
    pub fn yield_value(&self) -> Option<f64> {
        self.current().yield_value
    }

    /// Writes diagnostic information
    pub fn print(&self, buffer: &mut dyn fmt::Write, verbose: bool) -> fmt::Result {
        writeln!(
            buffer,
            "{}: tag = {}, density = {:?}",
            self.param.stress_strain.name(),
            self.param.tag,
            self.param.density
        )?;
        if verbose {
            writeln!(buffer, "parameters = {:?}", self.param.stress_strain)?;
            writeln!(buffer, "return mapping = {:?}", self.param.return_mapping())?;
            writeln!(buffer, "committed state:\n{}", self.committed)?;
            if let Some(trial) = &self.trial {
                writeln!(buffer, "trial state:\n{}", trial)?;
            }
        }
        Ok(())
    }

    /// Logs a summary of the material point (call after construction)
    pub fn log_summary(&self) {
        log::info!(
            "material {}: {} (density = {:?}, {} internal values)",
            self.param.tag,
            self.param.stress_strain.name(),
            self.param.density,
            self.model.actual.n_internal_values()
        );
    }

    /// Returns the persistent data of the committed state
    pub fn to_record(&self) -> MaterialRecord {
        MaterialRecord {
            param: self.param,
            state: self.committed.clone(),
        }
    }

    /// Allocates a new instance from persistent data
    ///
    /// The stress is recomputed from the elastic strain; records whose stress does not
    /// match the elastic strain or whose state lies outside the yield surface are rejected.
    pub fn from_record(record: &MaterialRecord) -> Result<Self, MaterialError> {
        let mut material = MaterialState::new(&record.param)?;
        if record.state.internal_values.dim() != material.model.actual.n_internal_values() {
            return Err(MaterialError::Configuration(
                "the record has an incorrect number of internal values",
            ));
        }
        let mut committed = record.state.clone();
        material.model.actual.restore_state(&mut committed)?;
        material.committed = committed;
        material
            .model
            .actual
            .stiffness(&mut material.committed_tangent, &material.committed)?;
        Ok(material)
    }
}

/// Returns the ground state of a model
fn ground_state(model: &StressStrainModel) -> Result<LocalState, MaterialError> {
    let mut state = LocalState::new(model.actual.n_internal_values());
    model.actual.initialize_internal_values(&mut state)?;
    Ok(state)
}

impl fmt::Display for MaterialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f, true)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
