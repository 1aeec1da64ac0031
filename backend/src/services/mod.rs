//! Business logic services for the Meteo Prediction service

pub mod prediction;

pub use prediction::PredictionService;
