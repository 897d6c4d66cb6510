use crate::chunk::Chunk;
use bevy::prelude::*;

/// A chunk entity; its mesh lives in the entity's `Mesh3d` asset.
#[derive(Component, Debug)]
pub struct VoxelChunk {
	pub chunk: Chunk,
}

/// Marks a chunk for rebuilding on the next update. Removed once the rebuild ran.
#[derive(Component, Debug, Default)]
pub struct RebuildChunk;

pub struct VoxelChunkPlugin;

impl Plugin for VoxelChunkPlugin {
	fn build(&self, app: &mut App) {
		app.add_systems(Update, rebuild_chunks);
	}
}

/// Spawns a chunk with an empty mesh, placed so padded local vertices land in world space.
///
/// The chunk is meshed on the next update.
pub fn spawn_voxel_chunk(
	commands: &mut Commands,
	meshes: &mut Assets<Mesh>,
	material: Handle<StandardMaterial>,
	chunk: Chunk,
) -> Entity {
	let mesh = Mesh::new(
		bevy::mesh::PrimitiveTopology::TriangleList,
		bevy::asset::RenderAssetUsages::default(),
	);
	let translation = chunk.config().origin() - Vec3::ONE;

	let entity = commands
		.spawn((
			VoxelChunk { chunk },
			RebuildChunk,
			Mesh3d(meshes.add(mesh)),
			MeshMaterial3d(material),
			Transform::from_translation(translation),
		))
		.id();

	log::debug!("Spawned voxel chunk {:?} at {:?}", entity, translation);
	entity
}

/// Rebuilds every marked chunk into its mesh asset.
pub fn rebuild_chunks(
	mut commands: Commands,
	mut chunks: Query<(Entity, &mut VoxelChunk, &Mesh3d), With<RebuildChunk>>,
	mut meshes: ResMut<Assets<Mesh>>,
) {
	for (entity, mut voxel_chunk, mesh3d) in chunks.iter_mut() {
		commands.entity(entity).remove::<RebuildChunk>();

		let Some(mesh) = meshes.get_mut(&mesh3d.0) else {
			log::warn!("Chunk {:?} has no mesh asset to rebuild into", entity);
			continue;
		};

		if let Err(e) = voxel_chunk.chunk.rebuild(&mut *mesh) {
			log::error!("Failed to rebuild chunk {:?}: {}", entity, e);
		}
	}
}
