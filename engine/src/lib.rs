pub mod chunk;
pub mod error;
pub mod geometry;
pub mod plugin;
pub mod surface;
pub mod visibility;

pub use chunk::{Chunk, ChunkConfig, MeshStats};
pub use error::MeshError;
pub use geometry::{build, ChunkGeometry};
pub use plugin::{rebuild_chunks, spawn_voxel_chunk, RebuildChunk, VoxelChunk, VoxelChunkPlugin};
pub use surface::MeshSurface;
pub use visibility::{analyze, exposed_faces, FaceAnalysis, GeometryCounts, GeometryDescriptor};
