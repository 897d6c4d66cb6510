use bevy::prelude::*;
use engine::{spawn_voxel_chunk, Chunk, ChunkConfig, RebuildChunk, VoxelChunk, VoxelChunkPlugin};
use std::f32::consts::PI;

pub struct PlanetPlugin {
	pub config: ChunkConfig,
}

#[derive(Resource, Clone, Copy)]
struct PlanetChunk(ChunkConfig);

impl Plugin for PlanetPlugin {
	fn build(&self, app: &mut App) {
		app.add_plugins(VoxelChunkPlugin)
			.insert_resource(PlanetChunk(self.config))
			.insert_resource(ClearColor(Color::hsla(201.0, 0.69, 0.62, 1.0)))
			.add_systems(Startup, (setup_camera, setup_lighting, spawn_planet))
			.add_systems(Update, (request_rebuild, reseed_planet));
	}
}

fn setup_camera(mut commands: Commands, planet: Res<PlanetChunk>) {
	let edge = planet.0.edge() as f32;
	let camera_pos = Vec3::new(edge, edge, edge * 1.5);
	let look_at = planet.0.origin() + Vec3::splat(edge / 2.0);

	log::info!("Setting up camera at position: {:?}, looking at: {:?}", camera_pos, look_at);

	commands.spawn((
		Camera3d::default(),
		Transform::from_translation(camera_pos).looking_at(look_at, Vec3::Y),
	));
}

fn setup_lighting(mut commands: Commands) {
	commands.insert_resource(AmbientLight {
		color: Color::WHITE,
		brightness: 500.0,
		affects_lightmapped_meshes: true,
	});

	commands.spawn((
		DirectionalLight { illuminance: 10000.0, shadows_enabled: true, ..default() },
		Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -PI / 4.0, PI / 4.0, 0.0)),
	));
}

fn spawn_planet(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
	planet: Res<PlanetChunk>,
) {
	let material = materials.add(StandardMaterial::from(Color::srgb(0.89, 0.886, 0.604)));
	spawn_voxel_chunk(&mut commands, &mut meshes, material, Chunk::new(planet.0));
}

/// Space rebuilds every chunk from its current grid.
fn request_rebuild(
	mut commands: Commands,
	keyboard_input: Res<ButtonInput<KeyCode>>,
	chunks: Query<Entity, With<VoxelChunk>>,
) {
	if !keyboard_input.just_pressed(KeyCode::Space) {
		return;
	}
	for entity in chunks.iter() {
		commands.entity(entity).insert(RebuildChunk);
	}
}

/// R moves every chunk to the next noise seed.
fn reseed_planet(
	mut commands: Commands,
	keyboard_input: Res<ButtonInput<KeyCode>>,
	mut chunks: Query<(Entity, &mut VoxelChunk)>,
) {
	if !keyboard_input.just_pressed(KeyCode::KeyR) {
		return;
	}
	for (entity, mut voxel_chunk) in chunks.iter_mut() {
		let density = *voxel_chunk.chunk.config().density();
		let density = density.with_seed(density.seed().wrapping_add(1));
		log::info!("Reseeding chunk {:?} with seed {}", entity, density.seed());

		voxel_chunk.chunk.set_density(density);
		commands.entity(entity).insert(RebuildChunk);
	}
}
