use crate::error::MeshError;
use crate::geometry::{self, ChunkGeometry};
use crate::surface::MeshSurface;
use crate::visibility;
use bevy::prelude::*;
use planet_density::{DensityConfig, DensityConfigError, DensitySampler};
use voxel::{ChunkGrid, CHUNK_EDGE};

/// Construction-time parameters of one chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkConfig {
	edge: u32,
	origin: Vec3,
	density: DensityConfig,
}

impl Default for ChunkConfig {
	fn default() -> Self {
		Self { edge: CHUNK_EDGE, origin: Vec3::ZERO, density: DensityConfig::default() }
	}
}

impl ChunkConfig {
	/// Rejects edges whose padded grid a voxel record cannot address and non-finite origins.
	pub fn new(edge: u32, origin: Vec3, density: DensityConfig) -> Result<Self, MeshError> {
		ChunkGrid::padded_size(edge)?;
		if !origin.is_finite() {
			return Err(DensityConfigError::NonFinite { field: "origin" }.into());
		}
		Ok(Self { edge, origin, density })
	}

	pub fn edge(&self) -> u32 {
		self.edge
	}

	/// World position of the chunk's first non-padding voxel.
	pub fn origin(&self) -> Vec3 {
		self.origin
	}

	pub fn density(&self) -> &DensityConfig {
		&self.density
	}
}

/// Totals of one rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshStats {
	pub faces: u32,
	pub vertices: u32,
	pub indices: u32,
	/// Whether the rebuild had to sample the density field.
	pub resampled: bool,
}

/// Owns a chunk's voxel grid and runs the meshing stages over it.
///
/// The grid is allocated and sampled on the first build and reused afterwards. Edits write
/// into it directly; only a density change makes the next build sample it again.
#[derive(Debug)]
pub struct Chunk {
	config: ChunkConfig,
	sampler: DensitySampler,
	grid: Option<ChunkGrid>,
	needs_sampling: bool,
}

impl Chunk {
	pub fn new(config: ChunkConfig) -> Self {
		Self { config, sampler: DensitySampler::new(config.density), grid: None, needs_sampling: true }
	}

	pub fn config(&self) -> &ChunkConfig {
		&self.config
	}

	pub fn grid(&self) -> Option<&ChunkGrid> {
		self.grid.as_ref()
	}

	pub fn has_grid(&self) -> bool {
		self.grid.is_some()
	}

	pub fn needs_sampling(&self) -> bool {
		self.needs_sampling
	}

	/// Swaps the density field. The grid keeps its allocation and is resampled on the next build.
	pub fn set_density(&mut self, density: DensityConfig) {
		self.config.density = density;
		self.sampler = DensitySampler::new(density);
		self.needs_sampling = true;
	}

	/// Sets the material of the voxel at a padded local position.
	pub fn edit(&mut self, position: UVec3, material: u8) -> Result<(), MeshError> {
		let (grid, _) = self.sampled_grid()?;
		grid.set_material(position, material)?;
		Ok(())
	}

	/// Runs face analysis and geometry building over the grid, sampling it first if needed.
	pub fn mesh(&mut self) -> Result<(ChunkGeometry, MeshStats), MeshError> {
		let (grid, resampled) = self.sampled_grid()?;
		let grid = &*grid;

		let analysis = visibility::analyze(grid)?;
		let geometry = geometry::build(grid, &analysis)?;
		let stats = MeshStats {
			faces: analysis.counts.faces,
			vertices: analysis.counts.vertices,
			indices: analysis.counts.indices,
			resampled,
		};
		Ok((geometry, stats))
	}

	/// Rebuilds the mesh and publishes it. On error the surface is left as it was.
	pub fn rebuild<S: MeshSurface>(&mut self, surface: &mut S) -> Result<MeshStats, MeshError> {
		let start_time = std::time::Instant::now();
		let (geometry, stats) = self.mesh()?;
		surface.publish(geometry);

		log::info!(
			"Rebuilt chunk at {:?} in {:?}: {} faces, {} vertices, {} indices{}",
			self.config.origin,
			start_time.elapsed(),
			stats.faces,
			stats.vertices,
			stats.indices,
			if stats.resampled { " (resampled)" } else { "" }
		);
		Ok(stats)
	}

	fn sampled_grid(&mut self) -> Result<(&mut ChunkGrid, bool), MeshError> {
		let grid = match self.grid.take() {
			Some(grid) => grid,
			None => {
				self.needs_sampling = true;
				ChunkGrid::padded(self.config.edge)?
			}
		};
		let grid = self.grid.insert(grid);

		let resampled = self.needs_sampling;
		if resampled {
			self.sampler.fill(grid, self.config.origin);
			self.needs_sampling = false;
		}
		Ok((grid, resampled))
	}
}
