//! Build and runtime configuration.

pub mod capabilities;

pub use capabilities::{capabilities, BackendCapabilities};
