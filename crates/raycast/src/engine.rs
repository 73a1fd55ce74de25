use std::time::Instant;

use glam::DVec2;
use gridcast_common::{GridMap, OUT_OF_BOUNDS_TEXTURE, Pose};
use serde::{Deserialize, Serialize};

use crate::hit::{HitRecord, Side};
use crate::stats::CastStats;

/// Ray components smaller than this (in magnitude) are treated as parallel
/// to the grid axis.
pub const PARALLEL_EPSILON: f64 = 1e-12;

/// Per-cell crossing distance substituted for an axis the ray runs parallel to.
pub const PARALLEL_SENTINEL: f64 = 1e30;

/// Smallest perpendicular distance ever reported. Renderers divide by it.
pub const MIN_DISTANCE: f64 = 1e-4;

/// Errors from engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("column count must be at least 1")]
    ZeroColumns,
}

/// Construction-time engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Screen columns cast per frame; fixes the size of both output buffers.
    pub column_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { column_count: 320 }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.column_count == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        Ok(())
    }
}

/// Camera-space offset of column `x` out of `columns`: -1 at the left edge,
/// just under +1 at the right edge.
#[inline]
pub fn camera_x(x: usize, columns: usize) -> f64 {
    2.0 * x as f64 / columns as f64 - 1.0
}

/// Per-column grid raycaster.
///
/// Owns one [`HitRecord`] and one depth value per screen column. Both
/// buffers are sized once at construction and overwritten in place by every
/// cast; readers borrow them between casts.
#[derive(Debug)]
pub struct RaycastEngine {
    records: Vec<HitRecord>,
    depths: Vec<f64>,
    stats: CastStats,
}

impl RaycastEngine {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(column_count = config.column_count, "raycast engine created");
        Ok(Self {
            records: vec![HitRecord::UNCAST; config.column_count],
            depths: vec![f64::INFINITY; config.column_count],
            stats: CastStats::default(),
        })
    }

    pub fn with_columns(column_count: usize) -> Result<Self, ConfigError> {
        Self::new(&EngineConfig { column_count })
    }

    pub fn column_count(&self) -> usize {
        self.records.len()
    }

    /// Cast every column and return the depth buffer.
    ///
    /// `column_count` must equal the count the engine was built with; a
    /// mismatch is a caller bug and panics.
    pub fn cast_rays(&mut self, pose: &Pose, map: &GridMap, column_count: usize) -> &[f64] {
        assert_eq!(
            column_count,
            self.records.len(),
            "cast_rays called with {column_count} columns on an engine sized for {}",
            self.records.len()
        );
        self.cast(pose, map)
    }

    /// Cast every configured column and return the depth buffer.
    pub fn cast(&mut self, pose: &Pose, map: &GridMap) -> &[f64] {
        let columns = self.records.len();
        let _span = tracing::trace_span!("cast_rays", columns).entered();
        let start = Instant::now();

        // Every step enters a new cell, so a walk that starts inside the map
        // leaves it within this many steps.
        let step_cap = map.width() + map.height();
        let mut stats = CastStats {
            columns,
            ..CastStats::default()
        };

        for (x, (record, depth)) in self
            .records
            .iter_mut()
            .zip(self.depths.iter_mut())
            .enumerate()
        {
            let walk = cast_column(pose, map, camera_x(x, columns), step_cap);
            *record = walk.hit;
            *depth = walk.hit.distance;

            stats.total_steps += walk.steps;
            stats.max_steps = stats.max_steps.max(walk.steps);
            if walk.out_of_bounds {
                stats.out_of_bounds += 1;
            }
            if walk.capped {
                stats.capped += 1;
                tracing::debug!(column = x, steps = walk.steps, "ray walk reached step cap");
            }
        }

        stats.elapsed = start.elapsed();
        tracing::trace!(
            columns,
            steps = stats.total_steps,
            out_of_bounds = stats.out_of_bounds,
            capped = stats.capped,
            "cast complete"
        );
        self.stats = stats;
        &self.depths
    }

    /// Hit records from the last cast, indexed by column.
    pub fn records(&self) -> &[HitRecord] {
        &self.records
    }

    /// Hit record for one column, or `None` past the last column.
    pub fn record(&self, x: usize) -> Option<&HitRecord> {
        self.records.get(x)
    }

    /// Perpendicular distances from the last cast, indexed by column.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Counters from the last cast.
    pub fn stats(&self) -> &CastStats {
        &self.stats
    }
}

/// Outcome of walking one ray through the grid.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnWalk {
    pub hit: HitRecord,
    pub steps: usize,
    pub out_of_bounds: bool,
    pub capped: bool,
}

/// Step direction and distance to the first grid-line crossing on one axis.
#[inline]
fn first_crossing(pos: f64, cell: i32, component: f64, delta: f64) -> (i32, f64) {
    if component.abs() < PARALLEL_EPSILON {
        // Never crossed ahead of the other axis.
        let step = if component < 0.0 { -1 } else { 1 };
        (step, PARALLEL_SENTINEL)
    } else if component < 0.0 {
        (-1, (pos - cell as f64) * delta)
    } else {
        (1, (cell as f64 + 1.0 - pos) * delta)
    }
}

/// Ray length needed to cross one whole cell along an axis.
#[inline]
fn cell_delta(component: f64) -> f64 {
    if component.abs() < PARALLEL_EPSILON {
        PARALLEL_SENTINEL
    } else {
        1.0 / component.abs()
    }
}

/// DDA walk for a single column at camera-space offset `camera_x`.
pub(crate) fn cast_column(pose: &Pose, map: &GridMap, camera_x: f64, step_cap: usize) -> ColumnWalk {
    let ray: DVec2 = pose.direction + pose.plane * camera_x;
    let origin = pose.position;
    let start = pose.cell();
    let (mut map_x, mut map_y) = (start.x, start.y);

    let delta_x = cell_delta(ray.x);
    let delta_y = cell_delta(ray.y);
    let (step_x, mut side_x) = first_crossing(origin.x, map_x, ray.x, delta_x);
    let (step_y, mut side_y) = first_crossing(origin.y, map_y, ray.y, delta_y);

    let mut side = Side::X;
    let mut steps = 0;
    let mut out_of_bounds = !map.contains(map_x, map_y);
    let mut hit = out_of_bounds;

    while !hit && steps < step_cap {
        // Ties go to X.
        if side_x <= side_y {
            side_x += delta_x;
            map_x += step_x;
            side = Side::X;
        } else {
            side_y += delta_y;
            map_y += step_y;
            side = Side::Y;
        }
        steps += 1;

        match map.get(map_x, map_y) {
            None => {
                out_of_bounds = true;
                hit = true;
            }
            Some(0) => {}
            Some(_) => hit = true,
        }
    }

    // Undo the last increment to get the ray parameter at the crossed line.
    let travelled = if steps == 0 {
        0.0
    } else {
        match side {
            Side::X => side_x - delta_x,
            Side::Y => side_y - delta_y,
        }
    };
    let distance = travelled.max(MIN_DISTANCE);

    let strike = match side {
        Side::X => origin.y + travelled * ray.y,
        Side::Y => origin.x + travelled * ray.x,
    };
    let mut texture_u = strike - strike.floor();
    if (side == Side::X && ray.x > 0.0) || (side == Side::Y && ray.y < 0.0) {
        texture_u = 1.0 - texture_u;
    }
    if !(0.0..1.0).contains(&texture_u) {
        texture_u = 0.0;
    }

    let texture_id = if out_of_bounds {
        OUT_OF_BOUNDS_TEXTURE
    } else {
        map.texture_at(map_x, map_y)
    };

    ColumnWalk {
        hit: HitRecord {
            distance,
            texture_id,
            texture_u,
            side,
            map_x,
            map_y,
        },
        steps,
        out_of_bounds,
        capped: !hit,
    }
}
