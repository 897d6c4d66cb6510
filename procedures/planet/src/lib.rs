pub mod config;
pub mod noise;
pub mod sampler;

pub use config::{DensityConfig, DensityConfigError, AMPLITUDE_RANGE, FREQUENCY_RANGE};
pub use sampler::{DensitySampler, BASE_RADIUS};
