use serde::Serialize;

use crate::types::CellCoord;

/// Texture id reported for any cell outside the map.
pub const OUT_OF_BOUNDS_TEXTURE: u32 = 1;

/// Errors from building a grid map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("cell buffer has {found} entries, expected {expected}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("unrecognized cell {ch:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },
}

/// Rectangular tile grid, stored row-major.
///
/// `0` is open floor; any other value is a wall whose value is its texture
/// id. Everything outside `[0, width) x [0, height)` reads as a wall with
/// texture id [`OUT_OF_BOUNDS_TEXTURE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl GridMap {
    /// Build a map from a row-major cell buffer of exactly `width * height` entries.
    pub fn new(width: usize, height: usize, cells: Vec<u32>) -> Result<Self, MapError> {
        let expected = width * height;
        if cells.len() != expected {
            return Err(MapError::SizeMismatch {
                expected,
                found: cells.len(),
            });
        }
        // A map with no columns has no rows either.
        let (width, height) = if expected == 0 { (0, 0) } else { (width, height) };
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// A map with no cells. Every lookup is out of bounds.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a map from rows; every row must have the same length.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, MapError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, cols) in rows.iter().enumerate() {
            let cols = cols.as_ref();
            if cols.len() != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            cells.extend_from_slice(cols);
        }
        Self::new(width, rows.len(), cells)
    }

    /// Parse text rows: `.`, space and `0` are open floor, `1`-`9` are
    /// texture ids, `#` is texture id 1.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let mut parsed = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let cols = line
                .as_ref()
                .chars()
                .enumerate()
                .map(|(col, ch)| match ch {
                    '.' | ' ' => Ok(0),
                    '#' => Ok(1),
                    c if c.is_ascii_digit() => Ok(c as u32 - '0' as u32),
                    ch => Err(MapError::InvalidCell { row, col, ch }),
                })
                .collect::<Result<Vec<u32>, MapError>>()?;
            parsed.push(cols);
        }
        Self::from_rows(&parsed)
    }

    /// Square test arena of side `size`: a solid border plus a pillar on
    /// every third cell, textured 1-4 in a diagonal pattern.
    ///
    /// Cell `(1, 1)` is open whenever `size >= 3`.
    pub fn arena(size: usize) -> Self {
        let mut cells = vec![0; size * size];
        for y in 0..size {
            for x in 0..size {
                let border = x == 0 || y == 0 || x == size - 1 || y == size - 1;
                let pillar = x % 3 == 0 && y % 3 == 0;
                if border || pillar {
                    cells[y * size + x] = 1 + ((x + y) % 4) as u32;
                }
            }
        }
        Self {
            width: size,
            height: size,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major cell values.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Whether `(x, y)` lies inside the map.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell value at `(x, y)`, or `None` outside the map.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if self.contains(x, y) {
            Some(self.cells[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// Texture id at `(x, y)`; out-of-bounds cells read as [`OUT_OF_BOUNDS_TEXTURE`].
    #[inline]
    pub fn texture_at(&self, x: i32, y: i32) -> u32 {
        self.get(x, y).unwrap_or(OUT_OF_BOUNDS_TEXTURE)
    }

    /// Whether `(x, y)` blocks rays. Out-of-bounds cells are walls.
    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none_or(|v| v != 0)
    }

    /// Overwrite an in-bounds cell. Returns the previous value, or `None`
    /// (and changes nothing) when `cell` is outside the map.
    pub fn set(&mut self, cell: CellCoord, value: u32) -> Option<u32> {
        if !self.contains(cell.x, cell.y) {
            return None;
        }
        let idx = cell.y as usize * self.width + cell.x as usize;
        Some(std::mem::replace(&mut self.cells[idx], value))
    }
}
