//! CLI command implementations.

pub mod config;
pub mod curve;

pub use config::ConfigArgs;
pub use curve::CurveArgs;
