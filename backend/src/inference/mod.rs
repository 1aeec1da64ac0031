//! Trained model backends
//!
//! The prediction service only sees the [`Classifier`] and [`Regressor`]
//! traits. Models are loaded once at startup and shared read-only between
//! all requests.

pub mod artifact;

use std::sync::Arc;

use shared::{PrecipFeatureVector, RainFeatureVector};
use thiserror::Error;

use crate::config::ModelsConfig;

pub use artifact::{BoundModel, ModelArtifact};

/// Model loading and inference errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to load model artifact {path}: {message}")]
    Load { path: String, message: String },

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("{0}")]
    Evaluation(String),
}

/// Binary classifier over a feature row in schema order
pub trait Classifier: Send + Sync {
    fn predict(&self, row: &[f64]) -> Result<bool, ModelError>;

    /// Probability of the positive class, if the backend exposes one
    fn predict_probability(&self, _row: &[f64]) -> Result<Option<f64>, ModelError> {
        Ok(None)
    }
}

/// Scalar regressor over a feature row in schema order
pub trait Regressor: Send + Sync {
    fn predict(&self, row: &[f64]) -> Result<f64, ModelError>;
}

/// The two trained models the service exposes
#[derive(Clone)]
pub struct Models {
    pub rain: Arc<dyn Classifier>,
    pub precipitation: Arc<dyn Regressor>,
}

impl Models {
    pub fn new(rain: Arc<dyn Classifier>, precipitation: Arc<dyn Regressor>) -> Self {
        Self {
            rain,
            precipitation,
        }
    }

    /// Load both artifacts, binding each to its feature schema
    pub fn load(config: &ModelsConfig) -> Result<Self, ModelError> {
        let rain = BoundModel::load::<RainFeatureVector>(&config.rain_path)?;
        let precipitation = BoundModel::load::<PrecipFeatureVector>(&config.precipitation_path)?;

        Ok(Self::new(Arc::new(rain), Arc::new(precipitation)))
    }
}
