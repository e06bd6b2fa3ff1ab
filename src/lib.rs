pub mod bodies;
pub mod config;
pub mod constants;
mod kepler;
pub mod navigator;
pub mod navigator_errors;
pub mod observers;
pub mod ref_system;
pub mod time;
pub mod time_model;
