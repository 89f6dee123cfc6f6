//! Implements utilities for running and saving material point simulations

mod path_data;
pub use crate::util::path_data::*;
