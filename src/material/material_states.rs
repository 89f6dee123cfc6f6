use super::MaterialState;
use crate::base::{MaterialError, ParamMaterial};
use rayon::prelude::*;
use russell_tensor::Tensor2;

/// Holds the material states of a set of integration points (e.g., of an element)
///
/// The states are independent from each other; thus, the trial evaluations run in parallel.
#[derive(Clone)]
pub struct MaterialStates {
    /// Holds all material states
    pub all: Vec<MaterialState>,
}

impl MaterialStates {
    /// Allocates a new instance with all points at the ground state
    pub fn new(param: &ParamMaterial, n_points: usize) -> Result<Self, MaterialError> {
        let state = MaterialState::new(param)?;
        Ok(MaterialStates {
            all: vec![state; n_points],
        })
    }

    /// Returns the number of material points
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Indicates that there are no material points
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Sets the trial strains of all points (one strain per point)
    ///
    /// All points are evaluated. If any point fails, the trial states of all points
    /// are discarded and the first error (in point order) is returned.
    pub fn set_trial_strains(&mut self, strains: &[Tensor2]) -> Result<(), MaterialError> {
        if strains.len() != self.all.len() {
            return Err(MaterialError::InvalidState(
                "the number of strains must equal the number of material points",
            ));
        }
        let results: Vec<Result<(), MaterialError>> = self
            .all
            .par_iter_mut()
            .zip(strains.par_iter())
            .map(|(state, strain)| state.set_trial_strain(strain))
            .collect();
        if let Some(err) = results.into_iter().find_map(|r| r.err()) {
            for state in self.all.iter_mut() {
                if state.trial().is_some() {
                    state.revert_to_last_commit()?;
                }
            }
            log::debug!("material states: all trial states discarded; {}", err);
            return Err(err);
        }
        Ok(())
    }

    /// Commits the trial states of all points
    ///
    /// Nothing is committed unless every point holds a trial state.
    pub fn commit_all(&mut self) -> Result<(), MaterialError> {
        if self.all.iter().any(|state| state.trial().is_none()) {
            return Err(MaterialError::InvalidState("there is no trial state to commit"));
        }
        self.all.iter_mut().try_for_each(|state| state.commit_state())
    }

    /// Discards the trial states of all points
    ///
    /// Nothing is reverted unless every point holds a trial state.
    pub fn revert_all(&mut self) -> Result<(), MaterialError> {
        if self.all.iter().any(|state| state.trial().is_none()) {
            return Err(MaterialError::InvalidState("there is no trial state to revert"));
        }
        self.all.iter_mut().try_for_each(|state| state.revert_to_last_commit())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
