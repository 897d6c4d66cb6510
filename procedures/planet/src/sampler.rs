use crate::config::DensityConfig;
use crate::noise::config::NoiseConfig;
use bevy::prelude::*;
use noise::Simplex;
use sdf::{CuboidSdf, Sdf};
use voxel::ChunkGrid;

/// Radius of the undisplaced reference planet.
pub const BASE_RADIUS: f32 = 16.0;

/// Classifies world positions as solid or empty.
///
/// The planet is a cube of half extent `BASE_RADIUS - amplitude` around the configured center
/// whose surface is pushed outwards per direction by up to `amplitude`. The push is the noise
/// sampled on the undisplaced surface point in the direction of the sample, so every sample
/// along one ray from the center sees the same displacement.
///
/// The displacement grows the cube's half extent; the sample point itself is never shifted.
#[derive(Debug, Clone)]
pub struct DensitySampler {
	config: DensityConfig,
	noise: NoiseConfig<Simplex>,
}

impl DensitySampler {
	pub fn new(config: DensityConfig) -> Self {
		let noise =
			NoiseConfig::new(Simplex::new(config.seed()), config.frequency(), config.amplitude());
		Self { config, noise }
	}

	pub fn config(&self) -> &DensityConfig {
		&self.config
	}

	/// Half extent of the undisplaced surface.
	pub fn half_extent(&self) -> f32 {
		BASE_RADIUS - self.config.amplitude()
	}

	/// Unit direction from the center to `world`. The center itself maps to `+Y`.
	pub fn direction(&self, world: Vec3) -> Vec3 {
		(world - self.config.center()).try_normalize().unwrap_or(Vec3::Y)
	}

	/// Outward surface displacement in `[0, amplitude]` for the direction of `world`.
	pub fn displacement(&self, world: Vec3) -> f32 {
		let surface = self.config.center() + self.direction(world) * self.half_extent();
		self.noise.sample_amp(surface) as f32
	}

	pub fn distance(&self, world: Vec3) -> f32 {
		CuboidSdf::cube(self.config.center(), self.half_extent() + self.displacement(world))
			.distance(world)
	}

	/// `1 - floor(clamp(distance, 0, 1))`: 1 for solid, 0 for empty.
	pub fn material(&self, world: Vec3) -> u8 {
		1 - self.distance(world).clamp(0.0, 1.0) as u8
	}

	/// World position of a padded local grid position. Local `(1, 1, 1)` is the chunk origin.
	pub fn world_position(origin: Vec3, local: UVec3) -> Vec3 {
		origin + local.as_vec3() - Vec3::ONE
	}

	/// Samples every cell of the grid, padding included.
	pub fn fill(&self, grid: &mut ChunkGrid, origin: Vec3) {
		let start_time = std::time::Instant::now();
		grid.fill_with(|local| self.material(Self::world_position(origin, local)));
		log::debug!(
			"Density sampling time for {} cells at {:?}: {:?}",
			grid.len(),
			origin,
			start_time.elapsed()
		);
	}
}
