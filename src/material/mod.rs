//! Implements the return mapping engine and the state of material points

mod drucker_prager;
mod elasticity;
mod internal_variables;
mod linear_elastic;
mod local_state;
pub mod mandel;
mod material_state;
mod material_states;
mod plastic_flow;
mod return_mapping;
mod strain_path;
mod stress_strain_model;
mod von_mises;
mod yield_function;
pub use crate::material::drucker_prager::*;
pub use crate::material::elasticity::*;
pub use crate::material::internal_variables::*;
pub use crate::material::linear_elastic::*;
pub use crate::material::local_state::*;
pub use crate::material::material_state::*;
pub use crate::material::material_states::*;
pub use crate::material::plastic_flow::*;
pub use crate::material::return_mapping::*;
pub use crate::material::strain_path::*;
pub use crate::material::stress_strain_model::*;
pub use crate::material::von_mises::*;
pub use crate::material::yield_function::*;
