use crate::base::{MaterialError, ParamMaterial};
use crate::material::mandel::components;
use crate::material::{LocalState, MaterialState, StrainPath};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the input of a strain-driven material point simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathInput {
    /// Material definition
    pub material: ParamMaterial,

    /// Total strains (xx, yy, zz, xy, yz, xz)
    pub strains: Vec<[f64; 6]>,

    /// Maximum number of sub-steps on recoverable failures
    #[serde(default = "default_max_substeps")]
    pub max_substeps: usize,
}

/// Holds one committed state of the results (tensor components)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathPoint {
    /// Total strain ε
    pub strain: [f64; 6],

    /// Stress σ
    pub stress: [f64; 6],

    /// Plastic strain εᵖ
    pub plastic_strain: [f64; 6],

    /// Internal values z
    pub internal_values: Vec<f64>,

    /// Elastic (vs elastoplastic) flag of the step
    pub elastic: bool,

    /// Yield function value (None for elastic models)
    pub yield_value: Option<f64>,
}

/// Holds the results of a strain-driven material point simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathOutput {
    /// Identification tag of the material
    pub tag: i32,

    /// Name of the stress-strain model
    pub model: String,

    /// Committed states (the first one is the initial state)
    pub points: Vec<PathPoint>,
}

fn default_max_substeps() -> usize {
    1
}

impl PathInput {
    /// Reads a JSON file with the input data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(&path).map_err(|_| "file not found")?;
        let reader = BufReader::new(file);
        let data = serde_json::from_reader(reader).map_err(|_| "deserialize failed")?;
        Ok(data)
    }

    /// Drives a material point along the strains
    pub fn run(&self) -> Result<PathOutput, MaterialError> {
        let mut material = MaterialState::new(&self.material)?;
        material.log_summary();
        let mut path = StrainPath::new();
        for strain in &self.strains {
            path.push_components(strain);
        }
        let history = path.follow(&mut material, self.max_substeps)?;
        Ok(PathOutput {
            tag: self.material.tag,
            model: self.material.stress_strain.name().to_string(),
            points: history.iter().map(PathPoint::new).collect(),
        })
    }
}

impl PathPoint {
    /// Allocates a new instance from a local state
    pub fn new(state: &LocalState) -> Self {
        PathPoint {
            strain: components(&state.strain),
            stress: components(&state.stress),
            plastic_strain: components(&state.plastic_strain),
            internal_values: state.internal_values.as_data().clone(),
            elastic: state.elastic,
            yield_value: state.yield_value,
        }
    }
}

impl PathOutput {
    /// Writes a JSON file with the results
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer_pretty(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
