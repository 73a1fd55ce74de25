use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Integer cell coordinate in map space. Signed so that cells beyond the
/// map edge (e.g. `y = -1`) can be named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell whose unit square `[x, x+1) x [y, y+1)` contains `pos`.
    pub fn containing(pos: DVec2) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
        }
    }
}

/// Viewer pose: position, facing direction, and camera plane.
///
/// The plane is orthogonal to the direction; its length relative to the
/// direction's length sets the horizontal field of view. Poses are produced
/// by whatever moves the camera and are read-only to the raycaster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec2,
    pub direction: DVec2,
    pub plane: DVec2,
}

impl Default for Pose {
    fn default() -> Self {
        Self::from_angle(DVec2::new(1.5, 1.5), 0.0, 66.0_f64.to_radians())
    }
}

impl Pose {
    pub fn new(position: DVec2, direction: DVec2, plane: DVec2) -> Self {
        Self {
            position,
            direction,
            plane,
        }
    }

    /// Build a pose from a heading angle (radians, 0 = +X, increasing toward
    /// +Y) and a horizontal field of view in radians.
    ///
    /// The direction is unit length and the plane is `tan(fov / 2)` long,
    /// pointing to the viewer's right so that column 0 is the left edge.
    pub fn from_angle(position: DVec2, angle: f64, fov: f64) -> Self {
        let direction = DVec2::from_angle(angle);
        let plane = direction.perp() * (fov * 0.5).tan();
        Self {
            position,
            direction,
            plane,
        }
    }

    /// Horizontal field of view in radians: `2 * atan(|plane| / |dir|)`.
    pub fn fov(&self) -> f64 {
        let dir_len = self.direction.length();
        if dir_len == 0.0 {
            return 0.0;
        }
        2.0 * (self.plane.length() / dir_len).atan()
    }

    /// Heading angle of the direction vector in radians.
    pub fn angle(&self) -> f64 {
        self.direction.y.atan2(self.direction.x)
    }

    /// The map cell the viewer stands in.
    pub fn cell(&self) -> CellCoord {
        CellCoord::containing(self.position)
    }

    /// This pose turned by `angle` radians; direction and plane rotate together.
    pub fn rotated(&self, angle: f64) -> Self {
        let rot = DVec2::from_angle(angle);
        Self {
            position: self.position,
            direction: rot.rotate(self.direction),
            plane: rot.rotate(self.plane),
        }
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.direction.is_finite() && self.plane.is_finite()
    }
}
