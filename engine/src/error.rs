use planet_density::DensityConfigError;
use voxel::GridError;

#[derive(Debug, thiserror::Error)]
pub enum MeshError {
	#[error(transparent)]
	Grid(#[from] GridError),
	#[error(transparent)]
	Density(#[from] DensityConfigError),
	#[error("failed to allocate {len} {what}")]
	Allocation { what: &'static str, len: usize },
	#[error("{faces} exposed faces do not fit 32-bit vertex indices")]
	CountOverflow { faces: usize },
}
