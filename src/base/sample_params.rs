use super::{ParamMaterial, ParamStressStrain};

/// Holds samples of material parameters
pub struct SampleParams {}

impl SampleParams {
    /// Returns sample parameters for a linear-elastic material
    pub fn param_linear_elastic() -> ParamMaterial {
        ParamMaterial {
            tag: 1,
            density: 1.0,
            stress_strain: ParamStressStrain::LinearElastic {
                young: 30000.0,
                poisson: 0.25,
            },
            return_mapping: None,
        }
    }

    /// Returns sample parameters for the von Mises model with linear isotropic hardening
    ///
    /// ```text
    /// E = 30000, ν = 0.25, ρ = 1, z0 = 10, Hα = 0, Hk = 1000
    /// ```
    pub fn param_von_mises() -> ParamMaterial {
        ParamMaterial {
            tag: 2,
            density: 1.0,
            stress_strain: ParamStressStrain::VonMises {
                young: 30000.0,
                poisson: 0.25,
                z0: 10.0,
                hh_kin: 0.0,
                hh_iso: 1000.0,
            },
            return_mapping: None,
        }
    }

    /// Returns sample parameters for the von Mises model with mixed (kinematic and isotropic) hardening
    pub fn param_von_mises_mixed() -> ParamMaterial {
        ParamMaterial {
            tag: 3,
            density: 1.0,
            stress_strain: ParamStressStrain::VonMises {
                young: 30000.0,
                poisson: 0.25,
                z0: 10.0,
                hh_kin: 600.0,
                hh_iso: 400.0,
            },
            return_mapping: None,
        }
    }

    /// Returns sample parameters for the Drucker-Prager model with non-associated flow
    pub fn param_drucker_prager() -> ParamMaterial {
        ParamMaterial {
            tag: 4,
            density: 2.0,
            stress_strain: ParamStressStrain::DruckerPrager {
                young: 30000.0,
                poisson: 0.25,
                z0: 10.0,
                mm: 0.6,
                mm_dil: 0.2,
                hh_kin: 0.0,
                hh_iso: 500.0,
            },
            return_mapping: None,
        }
    }
}
