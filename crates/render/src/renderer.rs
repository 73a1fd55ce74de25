use gridcast_raycast::{HitRecord, Side};

/// Screen-space settings for turning hit records into wall slices.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Output height in rows.
    pub rows: usize,
    /// Wall height multiplier; a wall at distance 1 fills `rows * wall_scale` rows.
    pub wall_scale: f64,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            rows: 24,
            wall_scale: 1.0,
        }
    }
}

impl RenderView {
    /// Top (inclusive) and bottom (exclusive) rows of the wall slice for a
    /// hit, clamped to the screen.
    pub fn slice_rows(&self, hit: &HitRecord) -> (usize, usize) {
        let screen = self.rows as f64;
        let height = (screen * self.wall_scale / hit.distance).min(screen);
        let top = ((screen - height) * 0.5).round().max(0.0) as usize;
        let bottom = (top + height.round() as usize).min(self.rows);
        (top, bottom)
    }
}

/// Renderer-agnostic interface over a frame's hit records.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the engine's per-column records.
    fn render(&self, hits: &[HitRecord], view: &RenderView) -> Self::Output;
}

/// Text renderer: one character per column, one line per row.
///
/// Walls are drawn with a glyph picked by side and distance band, the
/// ceiling is blank and the floor is dotted.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

const X_SIDE_GLYPHS: [char; 4] = ['#', '%', '+', '-'];
const Y_SIDE_GLYPHS: [char; 4] = ['@', '=', ':', '~'];

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }

    fn glyph(hit: &HitRecord) -> char {
        let band = ((hit.distance / 2.0) as usize).min(3);
        match hit.side {
            Side::X => X_SIDE_GLYPHS[band],
            Side::Y => Y_SIDE_GLYPHS[band],
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, hits: &[HitRecord], view: &RenderView) -> String {
        let _span = tracing::debug_span!("debug_text_render", columns = hits.len()).entered();
        let slices: Vec<(usize, usize, char)> = hits
            .iter()
            .map(|h| {
                let (top, bottom) = view.slice_rows(h);
                (top, bottom, Self::glyph(h))
            })
            .collect();

        let mut out = String::with_capacity((hits.len() + 1) * view.rows);
        for row in 0..view.rows {
            for &(top, bottom, glyph) in &slices {
                let ch = if (top..bottom).contains(&row) {
                    glyph
                } else if row < view.rows / 2 {
                    ' '
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use gridcast_common::{GridMap, Pose};
    use gridcast_raycast::RaycastEngine;

    fn hit(distance: f64, side: Side) -> HitRecord {
        HitRecord {
            distance,
            texture_id: 1,
            texture_u: 0.0,
            side,
            map_x: 0,
            map_y: 0,
        }
    }

    #[test]
    fn near_walls_fill_the_column() {
        let view = RenderView {
            rows: 10,
            wall_scale: 1.0,
        };
        assert_eq!(view.slice_rows(&hit(0.5, Side::X)), (0, 10));
        assert_eq!(view.slice_rows(&hit(2.0, Side::X)), (3, 8));
    }

    #[test]
    fn output_has_one_line_per_row() {
        let hits = vec![hit(1.0, Side::X), hit(4.0, Side::Y), hit(9.0, Side::Y)];
        let view = RenderView {
            rows: 8,
            wall_scale: 1.0,
        };
        let frame = DebugTextRenderer::new().render(&hits, &view);
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines.iter().all(|l| l.chars().count() == 3));
        // Column 0 is a full-height near wall.
        assert!(lines.iter().all(|l| l.starts_with('#')));
        // Far columns show ceiling at the top and floor at the bottom.
        assert_eq!(lines[0].chars().nth(2), Some(' '));
        assert_eq!(lines[7].chars().nth(2), Some('.'));
    }

    #[test]
    fn renders_engine_output() {
        let map = GridMap::parse(&["#####", "#...#", "#...#", "#...#", "#####"]).unwrap();
        let mut engine = RaycastEngine::with_columns(20).unwrap();
        let pose = Pose::from_angle(DVec2::new(2.5, 2.5), 0.0, 66f64.to_radians());
        engine.cast(&pose, &map);

        let frame = DebugTextRenderer::new().render(engine.records(), &RenderView::default());
        assert_eq!(frame.lines().count(), 24);
        assert!(frame.lines().all(|l| l.chars().count() == 20));
        assert!(frame.contains('#'));
    }
}
