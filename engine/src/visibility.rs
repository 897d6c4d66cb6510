use crate::error::MeshError;
use rayon::prelude::*;
use voxel::{ChunkGrid, Face, FaceMask};

/// Output offsets pre-assigned to one voxel that may emit geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryDescriptor {
	/// Index of the source voxel in the grid.
	pub voxel: usize,
	/// Exposed faces emitted by all voxels before this one in raster order.
	pub face_slot: u32,
	pub vertex_offset: u32,
	pub index_offset: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryCounts {
	pub faces: u32,
	pub vertices: u32,
	pub indices: u32,
}

impl GeometryCounts {
	fn from_faces(faces: u32) -> Self {
		Self { faces, vertices: faces * 4, indices: faces * 6 }
	}
}

/// Per-cell descriptors of a grid plus the totals needed to size the output buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceAnalysis {
	/// One entry per grid cell. `None` marks cells that never emit geometry: padding and air.
	pub descriptors: Vec<Option<GeometryDescriptor>>,
	pub counts: GeometryCounts,
}

impl FaceAnalysis {
	/// Non-sentinel descriptors in raster order, including enclosed voxels with no faces.
	pub fn assigned(&self) -> impl Iterator<Item = &GeometryDescriptor> {
		self.descriptors.iter().flatten()
	}
}

/// Faces of the voxel at `index` that border air.
///
/// Returns `None` for air voxels and for voxels in the padding layer, which never emit
/// geometry. A solid voxel enclosed on all sides yields an empty mask.
pub fn exposed_faces(grid: &ChunkGrid, index: usize) -> Option<FaceMask> {
	let record = grid.cells()[index];
	if record.is_air() || grid.is_border(record.position()) {
		return None;
	}

	let cells = grid.cells();
	Some(
		Face::ALL
			.into_iter()
			.filter(|face| cells[grid.neighbour_index(index, *face)].is_air())
			.collect(),
	)
}

/// Assigns every exposed face a slot in the output buffers.
///
/// Face masks are computed in parallel; slots are then assigned by an exclusive scan in
/// raster order, so the result does not depend on how the first pass was scheduled.
pub fn analyze(grid: &ChunkGrid) -> Result<FaceAnalysis, MeshError> {
	let start_time = std::time::Instant::now();

	let masks: Vec<Option<FaceMask>> =
		(0..grid.len()).into_par_iter().map(|index| exposed_faces(grid, index)).collect();

	let faces: usize = masks.iter().flatten().map(|mask| mask.count() as usize).sum();
	if faces.checked_mul(6).and_then(|indices| u32::try_from(indices).ok()).is_none() {
		return Err(MeshError::CountOverflow { faces });
	}

	let mut descriptors = Vec::new();
	descriptors
		.try_reserve_exact(masks.len())
		.map_err(|_| MeshError::Allocation { what: "geometry descriptors", len: masks.len() })?;

	let mut face_slot = 0u32;
	descriptors.extend(masks.iter().enumerate().map(|(voxel, mask)| {
		mask.map(|mask| {
			let descriptor = GeometryDescriptor {
				voxel,
				face_slot,
				vertex_offset: face_slot * 4,
				index_offset: face_slot * 6,
			};
			face_slot += mask.count();
			descriptor
		})
	}));

	let counts = GeometryCounts::from_faces(face_slot);
	log::debug!("Face analysis time: {:?}, {:?}", start_time.elapsed(), counts);

	Ok(FaceAnalysis { descriptors, counts })
}
