use bevy::prelude::*;

/// Corners of a unit cube centered on the voxel position.
pub const CUBE_CORNERS: [Vec3; 8] = [
	Vec3::new(-0.5, -0.5, -0.5),
	Vec3::new(-0.5, 0.5, -0.5),
	Vec3::new(0.5, 0.5, -0.5),
	Vec3::new(0.5, -0.5, -0.5),
	Vec3::new(-0.5, -0.5, 0.5),
	Vec3::new(-0.5, 0.5, 0.5),
	Vec3::new(0.5, 0.5, 0.5),
	Vec3::new(0.5, -0.5, 0.5),
];

/// The four [`CUBE_CORNERS`] of each face, in [`Face::ALL`] order.
pub const FACE_CORNERS: [[usize; 4]; 6] = [
	[0, 1, 2, 3], // z-
	[3, 2, 6, 7], // x+
	[7, 6, 5, 4], // z+
	[4, 5, 1, 0], // x-
	[1, 5, 6, 2], // y+
	[4, 0, 3, 7], // y-
];

/// Two counter-clockwise triangles over a quad's four vertices.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

pub const QUAD_VERTEX_COUNT: usize = 4;
pub const QUAD_INDEX_COUNT: usize = 6;

/// Axis-aligned voxel faces.
///
/// The declaration order is the emission order shared by face analysis and geometry
/// construction; slot offsets depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
	Back,
	Right,
	Front,
	Left,
	Top,
	Bottom,
}

impl Face {
	pub const ALL: [Face; 6] =
		[Face::Back, Face::Right, Face::Front, Face::Left, Face::Top, Face::Bottom];

	/// Offset to the neighbour across this face.
	pub fn offset(self) -> IVec3 {
		match self {
			Face::Back => IVec3::NEG_Z,
			Face::Right => IVec3::X,
			Face::Front => IVec3::Z,
			Face::Left => IVec3::NEG_X,
			Face::Top => IVec3::Y,
			Face::Bottom => IVec3::NEG_Y,
		}
	}

	pub fn normal(self) -> Vec3 {
		self.offset().as_vec3()
	}

	pub fn corners(self) -> [Vec3; 4] {
		FACE_CORNERS[self as usize].map(|corner| CUBE_CORNERS[corner])
	}

	fn bit(self) -> u8 {
		1 << self as u8
	}
}

/// Set of exposed faces of one voxel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FaceMask(u8);

impl FaceMask {
	pub const EMPTY: FaceMask = FaceMask(0);
	pub const FULL: FaceMask = FaceMask(0b11_1111);

	pub fn insert(&mut self, face: Face) {
		self.0 |= face.bit();
	}

	pub fn contains(self, face: Face) -> bool {
		self.0 & face.bit() != 0
	}

	pub fn count(self) -> u32 {
		self.0.count_ones()
	}

	pub fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Faces in emission order.
	pub fn iter(self) -> impl Iterator<Item = Face> {
		Face::ALL.into_iter().filter(move |face| self.contains(*face))
	}
}

impl FromIterator<Face> for FaceMask {
	fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
		let mut mask = FaceMask::EMPTY;
		for face in iter {
			mask.insert(face);
		}
		mask
	}
}
