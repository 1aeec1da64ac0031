//! Domain models for the Meteo Prediction service

mod features;
mod observation;
mod prediction;

pub use features::*;
pub use observation::*;
pub use prediction::*;
