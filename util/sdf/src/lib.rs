pub mod cuboid;

pub use cuboid::CuboidSdf;

use bevy::prelude::*;

/// Trait for Signed Distance Fields
/// Returns the signed distance from a point to the surface:
/// - Negative: inside the solid
/// - Zero: on the surface
/// - Positive: outside the solid
pub trait Sdf: Send + Sync {
	fn distance(&self, p: Vec3) -> f32;

	/// Whether the point lies inside or on the surface.
	fn contains(&self, p: Vec3) -> bool {
		self.distance(p) <= 0.0
	}
}
