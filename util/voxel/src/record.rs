use bevy::prelude::*;
use bytemuck::{Pod, Zeroable};
use std::ops::BitOr;

/// Width of each local position field.
pub const POSITION_BITS: u32 = 6;
pub const POSITION_MASK: u32 = (1 << POSITION_BITS) - 1;
pub const X_SHIFT: u32 = 0;
pub const Y_SHIFT: u32 = X_SHIFT + POSITION_BITS;
pub const Z_SHIFT: u32 = Y_SHIFT + POSITION_BITS;

pub const MATERIAL_MASK: u32 = 0xFF;
pub const MATERIAL_SHIFT: u32 = 0x12;

/// Material id of empty space.
pub const AIR: u8 = 0;
/// Material id written by the density sampler for solid voxels.
pub const SOLID: u8 = 1;

/// One voxel packed into a 32-bit word.
///
/// | field    | bits | shift |
/// |----------|------|-------|
/// | x        | 6    | 0     |
/// | y        | 6    | 6     |
/// | z        | 6    | 12    |
/// | material | 8    | 18    |
///
/// The remaining 6 high bits are unused. Encoding is OR-based, so a position record and a
/// material record can be combined with `|`. Every value is masked to its field width before
/// insertion: out-of-range input keeps its low bits (x = 70 encodes as x = 6), it is never an
/// error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct VoxelRecord(u32);

impl VoxelRecord {
	pub const fn from_bits(bits: u32) -> Self {
		Self(bits)
	}

	pub const fn bits(self) -> u32 {
		self.0
	}

	pub fn with_x(self, x: u32) -> Self {
		Self(self.0 | (x & POSITION_MASK) << X_SHIFT)
	}

	pub fn with_y(self, y: u32) -> Self {
		Self(self.0 | (y & POSITION_MASK) << Y_SHIFT)
	}

	pub fn with_z(self, z: u32) -> Self {
		Self(self.0 | (z & POSITION_MASK) << Z_SHIFT)
	}

	pub fn with_material(self, material: u32) -> Self {
		Self(self.0 | (material & MATERIAL_MASK) << MATERIAL_SHIFT)
	}

	pub fn x(self) -> u32 {
		(self.0 >> X_SHIFT) & POSITION_MASK
	}

	pub fn y(self) -> u32 {
		(self.0 >> Y_SHIFT) & POSITION_MASK
	}

	pub fn z(self) -> u32 {
		(self.0 >> Z_SHIFT) & POSITION_MASK
	}

	pub fn position(self) -> UVec3 {
		UVec3::new(self.x(), self.y(), self.z())
	}

	pub fn material(self) -> u8 {
		((self.0 >> MATERIAL_SHIFT) & MATERIAL_MASK) as u8
	}

	pub fn is_air(self) -> bool {
		self.material() == AIR
	}

	/// Replaces the material field, keeping the position.
	pub fn replace_material(self, material: u8) -> Self {
		Self(self.0 & !(MATERIAL_MASK << MATERIAL_SHIFT)).with_material(material as u32)
	}
}

impl BitOr for VoxelRecord {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self {
		Self(self.0 | rhs.0)
	}
}

pub fn encode_position(x: u32, y: u32, z: u32) -> VoxelRecord {
	VoxelRecord::default().with_x(x).with_y(y).with_z(z)
}

pub fn decode_position(record: VoxelRecord) -> UVec3 {
	record.position()
}

/// Encodes only x and y, for planar grids sharing the same layout.
pub fn encode_position_xy(x: u32, y: u32) -> VoxelRecord {
	VoxelRecord::default().with_x(x).with_y(y)
}

pub fn decode_position_xy(record: VoxelRecord) -> UVec2 {
	UVec2::new(record.x(), record.y())
}

pub fn encode_material(material: u32) -> VoxelRecord {
	VoxelRecord::default().with_material(material)
}

pub fn decode_material(record: VoxelRecord) -> u8 {
	record.material()
}
