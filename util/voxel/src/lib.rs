pub mod face;
pub mod grid;
pub mod record;

pub use face::{
	Face, FaceMask, CUBE_CORNERS, FACE_CORNERS, QUAD_INDEX_COUNT, QUAD_INDICES, QUAD_VERTEX_COUNT,
};
pub use grid::{ChunkGrid, GridError, CHUNK_EDGE, MAX_AXIS, PADDING};
pub use record::{
	decode_material, decode_position, decode_position_xy, encode_material, encode_position,
	encode_position_xy, VoxelRecord, AIR, SOLID,
};
