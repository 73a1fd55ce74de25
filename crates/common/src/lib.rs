//! Shared data for the gridcast raycaster: tile grids, viewer poses, level files.
//!
//! # Invariants
//! - Grid maps are rectangular; construction rejects ragged input.
//! - Anything outside a map reads as a wall with texture id 1.
//! - Poses and maps are produced outside the raycaster and only borrowed by it.

pub mod grid;
pub mod level;
pub mod types;

pub use grid::{GridMap, MapError, OUT_OF_BOUNDS_TEXTURE};
pub use level::{Level, LevelError, LevelFile, Spawn};
pub use types::{CellCoord, Pose};

pub fn crate_info() -> &'static str {
    "gridcast-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
