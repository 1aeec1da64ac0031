//! Shared types and feature engineering for the Meteo Prediction service
//!
//! This crate contains the pure, I/O-free parts of the prediction pipeline.
//! It is used by the backend server and by the browser client (via WASM),
//! so both sides build exactly the same feature vectors.

pub mod encoding;
pub mod models;
pub mod types;
pub mod validation;

pub use encoding::*;
pub use models::*;
pub use types::*;
pub use validation::*;
