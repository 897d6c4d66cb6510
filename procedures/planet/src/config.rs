use bevy::prelude::*;
use std::ops::RangeInclusive;

pub const AMPLITUDE_RANGE: RangeInclusive<f32> = 0.0..=128.0;
pub const FREQUENCY_RANGE: RangeInclusive<f32> = 0.0..=1.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DensityConfigError {
	#[error("{field} must be finite")]
	NonFinite { field: &'static str },
	#[error("{field} = {value} is outside [{min}, {max}]")]
	OutOfRange { field: &'static str, value: f32, min: f32, max: f32 },
}

/// Parameters of the planet density field.
///
/// Values are validated on construction so a chunk never starts sampling with a field it
/// cannot represent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityConfig {
	center: Vec3,
	amplitude: f32,
	frequency: f32,
	seed: u32,
}

impl Default for DensityConfig {
	fn default() -> Self {
		Self { center: Vec3::ZERO, amplitude: 4.0, frequency: 0.1, seed: 0 }
	}
}

impl DensityConfig {
	pub fn new(center: Vec3, amplitude: f32, frequency: f32) -> Result<Self, DensityConfigError> {
		Self::default().with_center(center)?.with_amplitude(amplitude)?.with_frequency(frequency)
	}

	pub fn with_center(mut self, center: Vec3) -> Result<Self, DensityConfigError> {
		if !center.is_finite() {
			return Err(DensityConfigError::NonFinite { field: "center" });
		}
		self.center = center;
		Ok(self)
	}

	pub fn with_amplitude(mut self, amplitude: f32) -> Result<Self, DensityConfigError> {
		self.amplitude = checked("amplitude", amplitude, AMPLITUDE_RANGE)?;
		Ok(self)
	}

	pub fn with_frequency(mut self, frequency: f32) -> Result<Self, DensityConfigError> {
		self.frequency = checked("frequency", frequency, FREQUENCY_RANGE)?;
		Ok(self)
	}

	pub fn with_seed(mut self, seed: u32) -> Self {
		self.seed = seed;
		self
	}

	pub fn center(&self) -> Vec3 {
		self.center
	}

	pub fn amplitude(&self) -> f32 {
		self.amplitude
	}

	pub fn frequency(&self) -> f32 {
		self.frequency
	}

	pub fn seed(&self) -> u32 {
		self.seed
	}
}

fn checked(
	field: &'static str,
	value: f32,
	range: RangeInclusive<f32>,
) -> Result<f32, DensityConfigError> {
	if !value.is_finite() {
		return Err(DensityConfigError::NonFinite { field });
	}
	if !range.contains(&value) {
		return Err(DensityConfigError::OutOfRange {
			field,
			value,
			min: *range.start(),
			max: *range.end(),
		});
	}
	Ok(value)
}
