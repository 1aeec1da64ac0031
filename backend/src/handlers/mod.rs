//! HTTP request handlers

pub mod health;
pub mod prediction;

pub use health::{health_check, overview};
pub use prediction::{
    predict_precipitation, predict_precipitation_manual, predict_rain, predict_rain_manual,
};
