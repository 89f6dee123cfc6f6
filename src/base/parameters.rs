use super::MaterialError;
use serde::{Deserialize, Serialize};

/// Holds parameters for stress-strain relations
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamStressStrain {
    /// Linear elastic model
    LinearElastic {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,
    },

    /// von Mises plasticity model with linear kinematic and isotropic hardening
    VonMises {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,

        /// Initial size of the yield surface
        ///
        /// This value corresponds to the von Mises stress:
        ///
        /// ```text
        /// f = √(3/2 ξ:ξ) - z    with    ξ = dev(σ) - α
        /// ```
        z0: f64,

        /// Kinematic hardening modulus Hα (backstress evolution)
        hh_kin: f64,

        /// Isotropic hardening modulus Hk (yield surface expansion)
        hh_iso: f64,
    },

    /// Drucker-Prager plasticity model with (possibly) non-associated flow
    DruckerPrager {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,

        /// Initial size of the yield surface at zero mean stress
        z0: f64,

        /// Slope of the yield surface in the (σm, σd) plane
        mm: f64,

        /// Slope of the plastic potential (dilatancy); `mm_dil = mm` renders associated flow
        mm_dil: f64,

        /// Kinematic hardening modulus Hα
        hh_kin: f64,

        /// Isotropic hardening modulus Hk
        hh_iso: f64,
    },
}

/// Holds parameters controlling the implicit stress update
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamReturnMapping {
    /// Tolerance of the yield function value below which the trial state is regarded as elastic
    pub yf_tol: f64,

    /// Relative tolerance of the local residuals
    pub res_tol: f64,

    /// Maximum number of local Newton-Raphson iterations
    pub max_iterations: usize,
}

/// Holds the material definition of a material point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamMaterial {
    /// Identification tag
    pub tag: i32,

    /// Mass density
    pub density: f64,

    /// Parameters for the stress-strain model
    pub stress_strain: ParamStressStrain,

    /// Options for the return mapping algorithm
    pub return_mapping: Option<ParamReturnMapping>,
}

impl ParamReturnMapping {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        ParamReturnMapping {
            yf_tol: 1e-8,
            res_tol: 1e-10,
            max_iterations: 50,
        }
    }

    /// Checks the values
    pub fn validate(&self) -> Result<(), MaterialError> {
        if !(self.yf_tol.is_finite() && self.yf_tol >= 0.0) {
            return Err(MaterialError::Configuration("yf_tol must be finite and non-negative"));
        }
        if !(self.res_tol.is_finite() && self.res_tol > 0.0) {
            return Err(MaterialError::Configuration("res_tol must be finite and positive"));
        }
        if self.max_iterations < 1 {
            return Err(MaterialError::Configuration("max_iterations must be at least 1"));
        }
        Ok(())
    }
}

impl ParamStressStrain {
    /// Returns the elastic parameters (Young's modulus, Poisson's coefficient)
    pub fn elastic(&self) -> (f64, f64) {
        match *self {
            ParamStressStrain::LinearElastic { young, poisson } => (young, poisson),
            ParamStressStrain::VonMises { young, poisson, .. } => (young, poisson),
            ParamStressStrain::DruckerPrager { young, poisson, .. } => (young, poisson),
        }
    }

    /// Returns the name of the model
    pub fn name(&self) -> &'static str {
        match self {
            ParamStressStrain::LinearElastic { .. } => "LinearElastic",
            ParamStressStrain::VonMises { .. } => "VonMisesLinearHardening",
            ParamStressStrain::DruckerPrager { .. } => "DruckerPragerLinearHardening",
        }
    }

    /// Checks the values
    pub fn validate(&self) -> Result<(), MaterialError> {
        let (young, poisson) = self.elastic();
        validate_elastic(young, poisson)?;
        match *self {
            ParamStressStrain::LinearElastic { .. } => Ok(()),
            ParamStressStrain::VonMises {
                z0, hh_kin, hh_iso, ..
            } => validate_hardening(z0, hh_kin, hh_iso),
            ParamStressStrain::DruckerPrager {
                z0,
                mm,
                mm_dil,
                hh_kin,
                hh_iso,
                ..
            } => {
                validate_hardening(z0, hh_kin, hh_iso)?;
                if !(mm.is_finite() && mm >= 0.0) {
                    return Err(MaterialError::Configuration("mm must be finite and non-negative"));
                }
                if !(mm_dil.is_finite() && mm_dil >= 0.0) {
                    return Err(MaterialError::Configuration("mm_dil must be finite and non-negative"));
                }
                Ok(())
            }
        }
    }
}

impl ParamMaterial {
    /// Returns the parameters for the return mapping algorithm (or the default ones)
    pub fn return_mapping(&self) -> ParamReturnMapping {
        match self.return_mapping {
            Some(p) => p,
            None => ParamReturnMapping::new(),
        }
    }

    /// Checks all values
    pub fn validate(&self) -> Result<(), MaterialError> {
        if !(self.density.is_finite() && self.density >= 0.0) {
            return Err(MaterialError::Configuration("density must be finite and non-negative"));
        }
        self.stress_strain.validate()?;
        if let Some(p) = self.return_mapping {
            p.validate()?;
        }
        Ok(())
    }
}

/// Checks the elastic constants
fn validate_elastic(young: f64, poisson: f64) -> Result<(), MaterialError> {
    if !(young.is_finite() && young > 0.0) {
        return Err(MaterialError::Configuration("Young's modulus must be finite and positive"));
    }
    if !(poisson.is_finite() && poisson > -1.0 && poisson < 0.5) {
        return Err(MaterialError::Configuration(
            "Poisson's coefficient must satisfy -1 < ν < 0.5",
        ));
    }
    Ok(())
}

/// Checks the initial yield threshold and hardening moduli
fn validate_hardening(z0: f64, hh_kin: f64, hh_iso: f64) -> Result<(), MaterialError> {
    if !(z0.is_finite() && z0 >= 0.0) {
        return Err(MaterialError::Configuration("z0 must be finite and non-negative"));
    }
    if !(hh_kin.is_finite() && hh_kin >= 0.0) {
        return Err(MaterialError::Configuration("hh_kin must be finite and non-negative"));
    }
    if !(hh_iso.is_finite() && hh_iso >= 0.0) {
        return Err(MaterialError::Configuration("hh_iso must be finite and non-negative"));
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ParamMaterial, ParamReturnMapping, ParamStressStrain};
    use crate::base::{MaterialError, SampleParams};

    #[test]
    fn derive_works() {
        let p = ParamStressStrain::LinearElastic {
            young: 1000.0,
            poisson: 0.2,
        };
        let q = p.clone();
        let correct = "LinearElastic { young: 1000.0, poisson: 0.2 }";
        assert_eq!(format!("{:?}", q), correct);
        let r = ParamReturnMapping::new();
        assert_eq!(r.max_iterations, 50);
    }

    #[test]
    fn serialize_works() {
        let param = SampleParams::param_von_mises();
        let json = serde_json::to_string(&param).unwrap();
        let read: ParamMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(read, param);
    }

    #[test]
    fn validate_captures_errors() {
        let mut param = SampleParams::param_von_mises();
        assert_eq!(param.validate(), Ok(()));

        param.density = f64::NAN;
        assert_eq!(
            param.validate(),
            Err(MaterialError::Configuration("density must be finite and non-negative"))
        );
        param.density = 1.0;

        param.stress_strain = ParamStressStrain::VonMises {
            young: 0.0,
            poisson: 0.25,
            z0: 10.0,
            hh_kin: 0.0,
            hh_iso: 1000.0,
        };
        assert_eq!(
            param.validate(),
            Err(MaterialError::Configuration("Young's modulus must be finite and positive"))
        );

        param.stress_strain = ParamStressStrain::VonMises {
            young: 30000.0,
            poisson: 0.5,
            z0: 10.0,
            hh_kin: 0.0,
            hh_iso: 1000.0,
        };
        assert_eq!(
            param.validate(),
            Err(MaterialError::Configuration(
                "Poisson's coefficient must satisfy -1 < ν < 0.5"
            ))
        );

        param.stress_strain = ParamStressStrain::VonMises {
            young: 30000.0,
            poisson: 0.25,
            z0: 10.0,
            hh_kin: -1.0,
            hh_iso: 1000.0,
        };
        assert_eq!(
            param.validate(),
            Err(MaterialError::Configuration("hh_kin must be finite and non-negative"))
        );

        param.stress_strain = ParamStressStrain::VonMises {
            young: 30000.0,
            poisson: 0.25,
            z0: f64::INFINITY,
            hh_kin: 0.0,
            hh_iso: 1000.0,
        };
        assert_eq!(
            param.validate(),
            Err(MaterialError::Configuration("z0 must be finite and non-negative"))
        );

        let mut param = SampleParams::param_drucker_prager();
        assert_eq!(param.validate(), Ok(()));
        param.stress_strain = ParamStressStrain::DruckerPrager {
            young: 30000.0,
            poisson: 0.25,
            z0: 10.0,
            mm: 0.5,
            mm_dil: -0.1,
            hh_kin: 0.0,
            hh_iso: 0.0,
        };
        assert_eq!(
            param.validate(),
            Err(MaterialError::Configuration("mm_dil must be finite and non-negative"))
        );

        let mut param = SampleParams::param_von_mises();
        param.return_mapping = Some(ParamReturnMapping {
            yf_tol: 1e-8,
            res_tol: 0.0,
            max_iterations: 10,
        });
        assert_eq!(
            param.validate(),
            Err(MaterialError::Configuration("res_tol must be finite and positive"))
        );
        param.return_mapping = Some(ParamReturnMapping {
            yf_tol: 1e-8,
            res_tol: 1e-10,
            max_iterations: 0,
        });
        assert_eq!(
            param.validate(),
            Err(MaterialError::Configuration("max_iterations must be at least 1"))
        );
    }
}
