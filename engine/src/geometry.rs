use crate::error::MeshError;
use crate::visibility::{exposed_faces, FaceAnalysis, GeometryDescriptor};
use rayon::prelude::*;
use voxel::{ChunkGrid, QUAD_INDEX_COUNT, QUAD_INDICES, QUAD_VERTEX_COUNT};

/// Vertex and triangle-index buffers of one chunk.
///
/// Every exposed face contributes one quad: 4 consecutive vertices and 6 consecutive indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkGeometry {
	pub vertices: Vec<[f32; 3]>,
	pub indices: Vec<u32>,
}

impl ChunkGeometry {
	pub fn face_count(&self) -> usize {
		self.vertices.len() / QUAD_VERTEX_COUNT
	}

	pub fn is_empty(&self) -> bool {
		self.indices.is_empty()
	}
}

/// One voxel's disjoint share of the output buffers.
struct QuadWrite<'a> {
	descriptor: &'a GeometryDescriptor,
	vertices: &'a mut [[f32; 3]],
	indices: &'a mut [u32],
}

/// Writes the quads of every exposed face into buffers sized exactly to `analysis.counts`.
///
/// # Panics
///
/// When `analysis` was not produced from `grid`.
pub fn build(grid: &ChunkGrid, analysis: &FaceAnalysis) -> Result<ChunkGeometry, MeshError> {
	assert_eq!(
		analysis.descriptors.len(),
		grid.len(),
		"face analysis does not describe this grid"
	);
	let start_time = std::time::Instant::now();

	let mut vertices = zeroed(analysis.counts.vertices as usize, "vertices")?;
	let mut indices = zeroed(analysis.counts.indices as usize, "indices")?;

	// carve the buffers into per-voxel ranges; a voxel's range ends where the next one starts
	let assigned: Vec<&GeometryDescriptor> = analysis.assigned().collect();
	let mut writes = Vec::with_capacity(assigned.len());
	let mut vertex_rest: &mut [[f32; 3]] = &mut vertices;
	let mut index_rest: &mut [u32] = &mut indices;
	for (k, descriptor) in assigned.iter().enumerate() {
		let end = assigned.get(k + 1).map_or(analysis.counts.faces, |next| next.face_slot);
		let faces = (end - descriptor.face_slot) as usize;
		if faces == 0 {
			continue;
		}

		let (voxel_vertices, rest) =
			std::mem::take(&mut vertex_rest).split_at_mut(faces * QUAD_VERTEX_COUNT);
		vertex_rest = rest;
		let (voxel_indices, rest) =
			std::mem::take(&mut index_rest).split_at_mut(faces * QUAD_INDEX_COUNT);
		index_rest = rest;

		writes.push(QuadWrite { descriptor, vertices: voxel_vertices, indices: voxel_indices });
	}

	writes.into_par_iter().for_each(|write| write_quads(grid, write));

	log::debug!(
		"Geometry build time: {:?}, {} vertices, {} indices",
		start_time.elapsed(),
		vertices.len(),
		indices.len()
	);
	Ok(ChunkGeometry { vertices, indices })
}

fn write_quads(grid: &ChunkGrid, write: QuadWrite<'_>) {
	let QuadWrite { descriptor, vertices, indices } = write;
	let faces = exposed_faces(grid, descriptor.voxel).unwrap_or_default();
	assert_eq!(
		faces.count() as usize * QUAD_VERTEX_COUNT,
		vertices.len(),
		"voxel {} does not match its face slots",
		descriptor.voxel
	);

	let position = grid.cells()[descriptor.voxel].position().as_vec3();
	for (slot, face) in faces.iter().enumerate() {
		let quad_vertices = &mut vertices[slot * QUAD_VERTEX_COUNT..][..QUAD_VERTEX_COUNT];
		for (vertex, corner) in quad_vertices.iter_mut().zip(face.corners()) {
			*vertex = (corner + position).to_array();
		}

		let base = descriptor.vertex_offset + (slot * QUAD_VERTEX_COUNT) as u32;
		let quad_indices = &mut indices[slot * QUAD_INDEX_COUNT..][..QUAD_INDEX_COUNT];
		for (index, offset) in quad_indices.iter_mut().zip(QUAD_INDICES) {
			*index = base + offset;
		}
	}
}

fn zeroed<T: Default + Clone>(len: usize, what: &'static str) -> Result<Vec<T>, MeshError> {
	let mut buffer = Vec::new();
	buffer.try_reserve_exact(len).map_err(|_| MeshError::Allocation { what, len })?;
	buffer.resize(len, T::default());
	Ok(buffer)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::visibility::analyze;
	use bevy::prelude::*;
	use voxel::Face;

	fn mesh(grid: &ChunkGrid) -> ChunkGeometry {
		build(grid, &analyze(grid).unwrap()).unwrap()
	}

	fn triangle_normal(geometry: &ChunkGeometry, triangle: &[u32]) -> Vec3 {
		let [a, b, c] = [0, 1, 2].map(|k| Vec3::from(geometry.vertices[triangle[k] as usize]));
		(b - a).cross(c - a).normalize()
	}

	#[test]
	fn test_single_voxel_cube() {
		let mut grid = ChunkGrid::new(UVec3::splat(4)).unwrap();
		grid.set_material(UVec3::ONE, 1).unwrap();
		let geometry = mesh(&grid);

		assert_eq!(geometry.vertices.len(), 24);
		assert_eq!(geometry.indices.len(), 36);
		assert_eq!(geometry.face_count(), 6);
		assert_eq!(&geometry.indices[..12], &[0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);

		// back face first, centered on the voxel's local position
		assert_eq!(
			&geometry.vertices[..4],
			&[[0.5, 0.5, 0.5], [0.5, 1.5, 0.5], [1.5, 1.5, 0.5], [1.5, 0.5, 0.5]]
		);
		for vertex in &geometry.vertices {
			assert!(vertex.iter().all(|c| *c == 0.5 || *c == 1.5));
		}
	}

	#[test]
	fn test_faces_wind_outward_in_emission_order() {
		let mut grid = ChunkGrid::new(UVec3::splat(4)).unwrap();
		grid.set_material(UVec3::new(2, 1, 2), 1).unwrap();
		let geometry = mesh(&grid);

		for (face, quad) in Face::ALL.into_iter().zip(geometry.indices.chunks(6)) {
			for triangle in quad.chunks(3) {
				let normal = triangle_normal(&geometry, triangle);
				assert!(normal.abs_diff_eq(face.normal(), 1e-6), "{:?} faces {:?}", face, normal);
			}
		}
	}

	#[test]
	fn test_buffers_match_counts_and_reference_only_their_quad() {
		let mut grid = ChunkGrid::padded(10).unwrap();
		grid.fill_with(|p| ((p.x + 2 * p.y + 3 * p.z) % 5 < 2) as u8);
		let analysis = analyze(&grid).unwrap();
		let geometry = build(&grid, &analysis).unwrap();

		assert_eq!(geometry.vertices.len(), analysis.counts.vertices as usize);
		assert_eq!(geometry.indices.len(), analysis.counts.indices as usize);
		for (quad, indices) in geometry.indices.chunks(6).enumerate() {
			let base = (quad * 4) as u32;
			for index in indices {
				assert!((base..base + 4).contains(index));
			}
		}
	}

	#[test]
	fn test_solid_block_is_watertight() {
		let mut grid = ChunkGrid::padded(3).unwrap();
		grid.fill_with(|p| (!p.cmpeq(UVec3::ZERO).any() && !p.cmpeq(UVec3::splat(4)).any()) as u8);
		let geometry = mesh(&grid);

		assert_eq!(geometry.face_count(), 6 * 9);
		// every vertex lies on the outer surface of the 3x3x3 block
		for vertex in &geometry.vertices {
			let v = Vec3::from(*vertex);
			assert!(v.cmpeq(Vec3::splat(0.5)).any() || v.cmpeq(Vec3::splat(3.5)).any());
		}
	}

	#[test]
	fn test_repeat_builds_are_identical() {
		let mut grid = ChunkGrid::padded(16).unwrap();
		grid.fill_with(|p| (p.as_vec3().distance(Vec3::splat(8.5)) < 6.0) as u8);
		let first = mesh(&grid);
		let second = mesh(&grid);

		assert!(!first.is_empty());
		assert_eq!(bit_patterns(&first.vertices), bit_patterns(&second.vertices));
		assert_eq!(first.indices, second.indices);
	}

	fn bit_patterns(vertices: &[[f32; 3]]) -> Vec<u32> {
		vertices.iter().flatten().map(|c| c.to_bits()).collect()
	}

	#[test]
	fn test_output_does_not_depend_on_thread_count() {
		let mut grid = ChunkGrid::padded(24).unwrap();
		grid.fill_with(|p| ((p.x * 5 + p.y * 11 + p.z * 3) % 7 < 3 && p.y < 18) as u8);

		let mesh_with = |threads: usize| {
			let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build().unwrap();
			pool.install(|| mesh(&grid))
		};
		let single = mesh_with(1);
		assert!(!single.is_empty());
		for threads in [2, 4, 8] {
			let parallel = mesh_with(threads);
			assert_eq!(bit_patterns(&single.vertices), bit_patterns(&parallel.vertices));
			assert_eq!(single.indices, parallel.indices);
		}
	}

	#[test]
	#[should_panic(expected = "face analysis does not describe this grid")]
	fn test_rejects_analysis_of_another_grid() {
		let small = ChunkGrid::padded(2).unwrap();
		let large = ChunkGrid::padded(3).unwrap();
		let _ = build(&large, &analyze(&small).unwrap());
	}
}
