use crate::Sdf;
use bevy::prelude::*;

/// An axis-aligned box SDF
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuboidSdf {
	pub center: Vec3,
	pub half_extents: Vec3,
}

impl CuboidSdf {
	pub fn new(center: Vec3, half_extents: Vec3) -> Self {
		Self { center, half_extents }
	}

	/// A cube with the same half extent on every axis.
	pub fn cube(center: Vec3, half_extent: f32) -> Self {
		Self::new(center, Vec3::splat(half_extent))
	}
}

impl Sdf for CuboidSdf {
	fn distance(&self, p: Vec3) -> f32 {
		let q = (p - self.center).abs() - self.half_extents;
		// exterior distance plus the (non-positive) interior distance
		q.max(Vec3::ZERO).length() + q.max_element().min(0.0)
	}
}
