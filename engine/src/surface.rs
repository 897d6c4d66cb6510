use crate::geometry::ChunkGeometry;
use bevy::mesh::Indices;
use bevy::prelude::*;

/// Rendering target a chunk publishes its geometry to.
pub trait MeshSurface {
	fn clear(&mut self);

	fn set_vertices(&mut self, vertices: Vec<[f32; 3]>);

	fn set_indices(&mut self, indices: Vec<u32>);

	fn recompute_normals(&mut self);

	/// Replaces the surface contents with `geometry`.
	fn publish(&mut self, geometry: ChunkGeometry) {
		self.clear();
		self.set_vertices(geometry.vertices);
		self.set_indices(geometry.indices);
		self.recompute_normals();
	}
}

impl MeshSurface for Mesh {
	fn clear(&mut self) {
		self.remove_attribute(Mesh::ATTRIBUTE_POSITION);
		self.remove_attribute(Mesh::ATTRIBUTE_NORMAL);
		self.remove_indices();
	}

	fn set_vertices(&mut self, vertices: Vec<[f32; 3]>) {
		self.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
	}

	fn set_indices(&mut self, indices: Vec<u32>) {
		self.insert_indices(Indices::U32(indices));
	}

	fn recompute_normals(&mut self) {
		// an empty chunk has nothing to shade
		if self.count_vertices() > 0 {
			self.compute_normals();
		}
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use bevy::asset::RenderAssetUsages;
	use bevy::mesh::{PrimitiveTopology, VertexAttributeValues};

	#[derive(Debug, Clone, PartialEq)]
	pub(crate) enum SurfaceCall {
		Clear,
		Vertices(usize),
		Indices(usize),
		Normals,
	}

	/// Keeps the last published buffers and every call made on it.
	#[derive(Debug, Default)]
	pub(crate) struct RecordingSurface {
		pub calls: Vec<SurfaceCall>,
		pub vertices: Vec<[f32; 3]>,
		pub indices: Vec<u32>,
	}

	impl MeshSurface for RecordingSurface {
		fn clear(&mut self) {
			self.calls.push(SurfaceCall::Clear);
			self.vertices.clear();
			self.indices.clear();
		}

		fn set_vertices(&mut self, vertices: Vec<[f32; 3]>) {
			self.calls.push(SurfaceCall::Vertices(vertices.len()));
			self.vertices = vertices;
		}

		fn set_indices(&mut self, indices: Vec<u32>) {
			self.calls.push(SurfaceCall::Indices(indices.len()));
			self.indices = indices;
		}

		fn recompute_normals(&mut self) {
			self.calls.push(SurfaceCall::Normals);
		}
	}

	fn quad() -> ChunkGeometry {
		ChunkGeometry {
			vertices: vec![[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
			indices: vec![0, 1, 2, 0, 2, 3],
		}
	}

	#[test]
	fn test_publish_runs_in_order() {
		let mut surface = RecordingSurface::default();
		surface.publish(quad());
		assert_eq!(
			surface.calls,
			vec![
				SurfaceCall::Clear,
				SurfaceCall::Vertices(4),
				SurfaceCall::Indices(6),
				SurfaceCall::Normals
			]
		);
		assert_eq!(surface.indices, quad().indices);
	}

	#[test]
	fn test_bevy_mesh_takes_the_geometry() {
		let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
		mesh.publish(quad());

		assert_eq!(mesh.count_vertices(), 4);
		assert_eq!(mesh.indices().map(|indices| indices.len()), Some(6));
		let Some(VertexAttributeValues::Float32x3(normals)) = mesh.attribute(Mesh::ATTRIBUTE_NORMAL)
		else {
			panic!("normals were not computed");
		};
		assert_eq!(normals.len(), 4);

		// republishing an empty chunk leaves nothing behind
		mesh.publish(ChunkGeometry::default());
		assert_eq!(mesh.count_vertices(), 0);
		assert_eq!(mesh.indices().map(|indices| indices.len()), Some(0));
		assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_none());
	}
}
