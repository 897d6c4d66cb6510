use bevy::prelude::*;
use clap::Parser;
use engine::ChunkConfig;
use planet_density::DensityConfig;
use planet_playground::PlanetPlugin;

#[derive(Parser)]
#[command(name = "planet-playground", about = "Meshes one voxel chunk of a noisy cube planet")]
struct Cli {
	/// Noise displacement of the planet surface (0-128)
	#[arg(long, default_value_t = 4.0)]
	amplitude: f32,
	/// Noise frequency (0-1)
	#[arg(long, default_value_t = 0.1)]
	frequency: f32,
	#[arg(long, default_value_t = 0)]
	seed: u32,
	/// Chunk edge in voxels, excluding padding
	#[arg(long, default_value_t = voxel::CHUNK_EDGE)]
	edge: u32,
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let density =
		DensityConfig::new(Vec3::ZERO, cli.amplitude, cli.frequency)?.with_seed(cli.seed);
	// center the chunk on the planet
	let origin = Vec3::splat(-(cli.edge as f32) / 2.0);
	let config = ChunkConfig::new(cli.edge, origin, density)?;

	println!("Starting planet viewer with seed: {}", cli.seed);

	App::new()
		.add_plugins(DefaultPlugins.set(WindowPlugin {
			primary_window: Some(Window {
				title: "Planet Viewer".to_string(),
				resolution: (1280, 720).into(),
				..default()
			}),
			..default()
		}))
		.add_plugins(PlanetPlugin { config })
		.run();

	Ok(())
}
