use bevy::prelude::*;
use noise::{NoiseFn, Seedable, Simplex};
use std::fmt::Debug;

/// A 3D gradient noise source with a frequency and amplitude.
#[derive(Clone)]
pub struct NoiseConfig<N: NoiseFn<f64, 3> + Seedable = Simplex> {
	pub noise: N,
	pub frequency: f32,
	pub amplitude: f32,
}

impl<N: NoiseFn<f64, 3> + Seedable> Debug for NoiseConfig<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"NoiseConfig<{}> {{ frequency: {}, amplitude: {}, seed: {} }}",
			std::any::type_name::<N>(),
			self.frequency,
			self.amplitude,
			self.noise.seed()
		)
	}
}

impl<N: NoiseFn<f64, 3> + Seedable + Default> Default for NoiseConfig<N> {
	fn default() -> Self {
		Self { frequency: 0.1, amplitude: 1.0, noise: N::default() }
	}
}

impl<N: NoiseFn<f64, 3> + Seedable> PartialEq for NoiseConfig<N> {
	fn eq(&self, other: &Self) -> bool {
		self.frequency == other.frequency
			&& self.amplitude == other.amplitude
			&& self.noise.seed() == other.noise.seed()
	}
}

impl<N: NoiseFn<f64, 3> + Seedable> NoiseConfig<N> {
	pub fn new(noise: N, frequency: f32, amplitude: f32) -> Self {
		Self { noise, frequency, amplitude }
	}

	pub fn with_frequency(mut self, frequency: f32) -> Self {
		self.frequency = frequency;
		self
	}

	pub fn with_amplitude(mut self, amplitude: f32) -> Self {
		self.amplitude = amplitude;
		self
	}

	pub fn with_seed(mut self, seed: u32) -> Self {
		self.noise = self.noise.set_seed(seed);
		self
	}

	/// Raw noise in [-1, 1] with only the frequency applied
	pub fn sample(&self, position: Vec3) -> f64 {
		self.noise.get([
			position.x as f64 * self.frequency as f64,
			position.y as f64 * self.frequency as f64,
			position.z as f64 * self.frequency as f64,
		])
	}

	/// Noise remapped onto the unit interval
	pub fn sample_on_unit(&self, position: Vec3) -> f64 {
		(self.sample(position) + 1.0) / 2.0
	}

	/// Unit-interval noise scaled by the amplitude
	pub fn sample_amp(&self, position: Vec3) -> f64 {
		self.sample_on_unit(position) * self.amplitude as f64
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_seed_changes_the_field() {
		let p = Vec3::new(3.3, -1.7, 12.1);
		let a = NoiseConfig::<Simplex>::default().with_seed(1);
		let b = NoiseConfig::<Simplex>::default().with_seed(1);
		let c = NoiseConfig::<Simplex>::default().with_seed(2);
		assert_eq!(a, b);
		assert_ne!(a, c);
		assert_eq!(a.sample(p), b.sample(p));
	}

	#[test]
	fn test_amplitude_scales_the_unit_sample() {
		let config = NoiseConfig::<Simplex>::default().with_amplitude(8.0).with_frequency(0.37);
		for i in 0..64 {
			let p = Vec3::new(i as f32 * 1.3, i as f32 * -0.7, i as f32 * 2.1);
			let unit = config.sample_on_unit(p);
			assert!(unit.is_finite(), "non-finite noise at {:?}", p);
			assert_eq!(config.sample_amp(p), unit * 8.0);
			assert_eq!(unit, (config.sample(p) + 1.0) / 2.0);
		}
	}

	#[test]
	fn test_zero_frequency_samples_the_origin() {
		let config = NoiseConfig::<Simplex>::default().with_frequency(0.0);
		assert_eq!(config.sample(Vec3::splat(100.0)), config.sample(Vec3::ZERO));
	}
}
