use serde::{Serialize, Serializer};

/// Which family of grid lines the ray crossed to reach its hit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Side {
    /// Crossed a vertical grid line (a column boundary): north/south-facing wall.
    #[default]
    X = 0,
    /// Crossed a horizontal grid line (a row boundary): east/west-facing wall.
    Y = 1,
}

impl Side {
    /// Numeric side flag: 0 for [`Side::X`], 1 for [`Side::Y`].
    #[inline]
    pub fn flag(self) -> u8 {
        self as u8
    }
}

impl Serialize for Side {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.flag())
    }
}

/// Result of casting one screen column.
///
/// Six logical fields per column, stored by value in a contiguous slice owned
/// by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitRecord {
    /// Distance along the camera's forward axis (not Euclidean ray length).
    ///
    /// This reading assumes a unit-length pose direction. The value is the
    /// ray parameter at the hit, so a direction of length `k` reports the
    /// forward distance divided by `k`.
    pub distance: f64,
    /// Grid value of the hit cell; 1 when the ray left the map.
    pub texture_id: u32,
    /// Where along the wall face the ray struck, in `[0, 1)`.
    pub texture_u: f64,
    pub side: Side,
    pub map_x: i32,
    pub map_y: i32,
}

impl HitRecord {
    /// Logical fields per record, as written by `Serialize`.
    pub const FIELD_COUNT: usize = 6;

    /// Slot contents before the first cast: no wall, infinitely far away.
    pub const UNCAST: HitRecord = HitRecord {
        distance: f64::INFINITY,
        texture_id: 0,
        texture_u: 0.0,
        side: Side::X,
        map_x: 0,
        map_y: 0,
    };

    /// Texel column for a texture `texture_width` pixels wide.
    #[inline]
    pub fn texel_column(&self, texture_width: u32) -> u32 {
        if texture_width == 0 {
            return 0;
        }
        ((self.texture_u * texture_width as f64) as u32).min(texture_width - 1)
    }
}

impl Default for HitRecord {
    fn default() -> Self {
        Self::UNCAST
    }
}

impl std::fmt::Display for HitRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "dist={:.4} tex={} u={:.4} side={} cell=({}, {})",
            self.distance,
            self.texture_id,
            self.texture_u,
            self.side.flag(),
            self.map_x,
            self.map_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(texture_u: f64) -> HitRecord {
        HitRecord {
            distance: 2.0,
            texture_id: 3,
            texture_u,
            side: Side::Y,
            map_x: 4,
            map_y: -1,
        }
    }

    #[test]
    fn side_flags() {
        assert_eq!(Side::X.flag(), 0);
        assert_eq!(Side::Y.flag(), 1);
    }

    #[test]
    fn texel_column_stays_in_range() {
        assert_eq!(hit(0.0).texel_column(64), 0);
        assert_eq!(hit(0.5).texel_column(64), 32);
        assert_eq!(hit(0.999_999_9).texel_column(64), 63);
        assert_eq!(hit(0.5).texel_column(0), 0);
    }

    #[test]
    fn display_uses_numeric_side() {
        let s = hit(0.25).to_string();
        assert!(s.contains("side=1"));
        assert!(s.contains("cell=(4, -1)"));
    }

    #[test]
    fn uncast_slot_is_far_away() {
        let slot = HitRecord::default();
        assert!(slot.distance.is_infinite());
        assert_eq!(slot.texture_id, 0);
    }

    #[test]
    fn serialized_record_has_field_count_entries() {
        let value = serde_json::to_value(hit(0.25)).unwrap();
        let fields = value.as_object().unwrap();
        assert_eq!(fields.len(), HitRecord::FIELD_COUNT);
        assert_eq!(fields["side"], 1);
        assert_eq!(fields["map_y"], -1);
    }
}
