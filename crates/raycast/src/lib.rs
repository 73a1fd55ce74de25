//! Raycasting: per-column DDA wall march over a tile grid.
//!
//! Once per frame the caller hands the engine a [`Pose`](gridcast_common::Pose)
//! and a [`GridMap`](gridcast_common::GridMap); the engine writes one
//! [`HitRecord`] and one depth per screen column into buffers it owns.
//!
//! # Invariants
//! - Exactly one record per column; every cast overwrites every slot.
//! - Buffers are allocated at construction and never resized.
//! - Reported distances are perpendicular (fisheye-corrected), finite, and
//!   at least [`MIN_DISTANCE`].
//! - `texture_u` lies in `[0, 1)`.
//! - A cast never fails; out-of-bounds cells read as walls with texture id 1
//!   and each walk is capped at `width + height` steps.

mod engine;
mod hit;
mod stats;

pub use engine::{
    ConfigError, EngineConfig, MIN_DISTANCE, PARALLEL_EPSILON, PARALLEL_SENTINEL, RaycastEngine,
    camera_x,
};
pub use hit::{HitRecord, Side};
pub use stats::{CastStats, FrameTimer};

pub fn crate_info() -> &'static str {
    "gridcast-raycast v0.1.0"
}
