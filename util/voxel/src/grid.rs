use crate::face::Face;
use crate::record::{encode_position, VoxelRecord, AIR};
use bevy::prelude::*;
use rayon::prelude::*;

/// Nominal chunk edge length.
pub const CHUNK_EDGE: u32 = 32;

/// One layer of neighbour data on every side of the chunk.
pub const PADDING: u32 = 2;

/// Largest padded axis a [`VoxelRecord`] position field can address.
pub const MAX_AXIS: u32 = 64;

#[derive(Debug, thiserror::Error)]
pub enum GridError {
	#[error("grid dimensions must be non-zero, got {size}")]
	EmptyDimensions { size: UVec3 },
	#[error("grid axis of {size} exceeds the {max} cells a voxel record can address")]
	DimensionsTooLarge { size: UVec3, max: u32 },
	#[error("failed to allocate {cells} voxel cells")]
	Allocation { cells: usize },
	#[error("position {position} lies outside a grid of {size}")]
	OutOfBounds { position: UVec3, size: UVec3 },
}

/// Flat, row-major voxel grid: `x + y * size.x + z * size.x * size.y`.
///
/// Every cell carries its own local position in its record, so
/// `grid.cells()[i].position() == grid.position(i)` holds for all cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkGrid {
	size: UVec3,
	cells: Vec<VoxelRecord>,
}

impl ChunkGrid {
	/// Allocates a grid of empty voxels.
	pub fn new(size: UVec3) -> Result<Self, GridError> {
		if size.min_element() == 0 {
			return Err(GridError::EmptyDimensions { size });
		}
		if size.max_element() > MAX_AXIS {
			return Err(GridError::DimensionsTooLarge { size, max: MAX_AXIS });
		}

		let len = size.element_product() as usize;
		let mut cells = Vec::new();
		cells.try_reserve_exact(len).map_err(|_| GridError::Allocation { cells: len })?;
		cells.extend((0..len).map(|index| {
			let p = position_of(index, size);
			encode_position(p.x, p.y, p.z)
		}));

		log::debug!("Allocated voxel grid of {} ({} cells)", size, len);
		Ok(Self { size, cells })
	}

	/// Allocates a cubic grid for a chunk of the given edge plus its padding layer.
	pub fn padded(edge: u32) -> Result<Self, GridError> {
		Self::new(Self::padded_size(edge)?)
	}

	/// Padded dimensions for a chunk edge, validated against the record layout.
	pub fn padded_size(edge: u32) -> Result<UVec3, GridError> {
		let size = UVec3::splat(edge.saturating_add(PADDING));
		if edge == 0 {
			return Err(GridError::EmptyDimensions { size: UVec3::ZERO });
		}
		if size.x > MAX_AXIS {
			return Err(GridError::DimensionsTooLarge { size, max: MAX_AXIS });
		}
		Ok(size)
	}

	pub fn size(&self) -> UVec3 {
		self.size
	}

	pub fn len(&self) -> usize {
		self.cells.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}

	pub fn cells(&self) -> &[VoxelRecord] {
		&self.cells
	}

	pub fn index(&self, position: UVec3) -> usize {
		(position.x + position.y * self.size.x + position.z * self.size.x * self.size.y) as usize
	}

	pub fn position(&self, index: usize) -> UVec3 {
		position_of(index, self.size)
	}

	pub fn contains(&self, position: UVec3) -> bool {
		position.cmplt(self.size).all()
	}

	/// Whether the position lies in the padding layer.
	pub fn is_border(&self, position: UVec3) -> bool {
		position.cmpeq(UVec3::ZERO).any() || position.cmpge(self.size - UVec3::ONE).any()
	}

	pub fn get(&self, position: UVec3) -> Option<VoxelRecord> {
		self.contains(position).then(|| self.cells[self.index(position)])
	}

	/// Index of the neighbour across `face`. Only meaningful for non-border cells.
	pub fn neighbour_index(&self, index: usize, face: Face) -> usize {
		let offset = face.offset();
		let stride = offset.x
			+ offset.y * self.size.x as i32
			+ offset.z * (self.size.x * self.size.y) as i32;
		index.wrapping_add_signed(stride as isize)
	}

	pub fn set_material(&mut self, position: UVec3, material: u8) -> Result<(), GridError> {
		if !self.contains(position) {
			return Err(GridError::OutOfBounds { position, size: self.size });
		}
		let index = self.index(position);
		self.cells[index] = self.cells[index].replace_material(material);
		Ok(())
	}

	/// Rewrites every cell's material in parallel. Each cell is written only by its own
	/// invocation, which receives the cell's local position.
	pub fn fill_with<F>(&mut self, material: F)
	where
		F: Fn(UVec3) -> u8 + Send + Sync,
	{
		let size = self.size;
		self.cells.par_iter_mut().enumerate().for_each(|(index, cell)| {
			let p = position_of(index, size);
			*cell = encode_position(p.x, p.y, p.z).with_material(material(p) as u32);
		});
	}

	/// Number of non-air cells.
	pub fn solid_count(&self) -> usize {
		self.cells.iter().filter(|cell| cell.material() != AIR).count()
	}
}

fn position_of(index: usize, size: UVec3) -> UVec3 {
	let index = index as u32;
	UVec3::new(index % size.x, (index / size.x) % size.y, index / (size.x * size.y))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_records_match_their_index() {
		let grid = ChunkGrid::new(UVec3::new(3, 4, 5)).unwrap();
		assert_eq!(grid.len(), 60);
		for (index, cell) in grid.cells().iter().enumerate() {
			assert_eq!(cell.position(), grid.position(index));
			assert_eq!(grid.index(cell.position()), index);
			assert!(cell.is_air());
		}
	}

	#[test]
	fn test_padded_size_validation() {
		assert_eq!(ChunkGrid::padded_size(CHUNK_EDGE).unwrap(), UVec3::splat(34));
		assert_eq!(ChunkGrid::padded_size(62).unwrap(), UVec3::splat(64));
		assert!(matches!(ChunkGrid::padded_size(0), Err(GridError::EmptyDimensions { .. })));
		assert!(matches!(
			ChunkGrid::padded_size(63),
			Err(GridError::DimensionsTooLarge { max: 64, .. })
		));
		assert!(ChunkGrid::new(UVec3::new(4, 0, 4)).is_err());
	}

	#[test]
	fn test_border_detection() {
		let grid = ChunkGrid::new(UVec3::splat(4)).unwrap();
		assert!(grid.is_border(UVec3::new(0, 1, 1)));
		assert!(grid.is_border(UVec3::new(1, 3, 1)));
		assert!(grid.is_border(UVec3::new(1, 1, 3)));
		assert!(!grid.is_border(UVec3::new(1, 2, 2)));
	}

	#[test]
	fn test_neighbour_index_follows_face_offsets() {
		let grid = ChunkGrid::new(UVec3::new(4, 5, 6)).unwrap();
		let center = UVec3::new(2, 2, 3);
		let index = grid.index(center);
		for face in Face::ALL {
			let expected = (center.as_ivec3() + face.offset()).as_uvec3();
			assert_eq!(grid.neighbour_index(index, face), grid.index(expected));
		}
	}

	#[test]
	fn test_set_material_and_fill() {
		let mut grid = ChunkGrid::new(UVec3::splat(4)).unwrap();
		grid.set_material(UVec3::ONE, 9).unwrap();
		assert_eq!(grid.get(UVec3::ONE).unwrap().material(), 9);
		assert_eq!(grid.solid_count(), 1);
		assert!(matches!(
			grid.set_material(UVec3::splat(4), 1),
			Err(GridError::OutOfBounds { .. })
		));

		grid.fill_with(|p| (p.y >= 2) as u8);
		assert_eq!(grid.solid_count(), 32);
		for (index, cell) in grid.cells().iter().enumerate() {
			assert_eq!(cell.position(), grid.position(index));
		}
	}
}
