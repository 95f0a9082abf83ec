//! Static tile geometry: grounded probing, per-axis resolution and grid raycasts.

use glam::DVec2;

use crate::api::NarrowphaseApi;
use crate::body::Body;
use crate::error::PhysicsError;
use crate::narrowphase::{Aabb, Narrowphase};
use crate::types::{Axis, Layer, RaycastHit};

pub const EMPTY: u8 = 0;
pub const SOLID: u8 = 1;

/// Inclusive cell range `(col0, col1, row0, row1)`, already clamped to the grid.
type CellRange = (i32, i32, i32, i32);

/// Row-major grid of cell codes with a uniform square cell size.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    cells: Vec<u8>,
    cols: usize,
    rows: usize,
    cell_size: f64,
}

impl TileGrid {
    /// Empty grid of `cols` x `rows` cells.
    pub fn new(cols: usize, rows: usize, cell_size: f64) -> Result<Self, PhysicsError> {
        Self::check_cell_size(cell_size)?;
        Ok(Self { cells: vec![EMPTY; cols * rows], cols, rows, cell_size })
    }

    /// Build from rows of cell codes as a level loader hands them over.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R], cell_size: f64) -> Result<Self, PhysicsError> {
        Self::check_cell_size(cell_size)?;
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(cols * rows.len());
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(PhysicsError::InvalidTileGrid(format!(
                    "row {i} has {} cells, expected {cols}",
                    row.len()
                )));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { cells, cols, rows: rows.len(), cell_size })
    }

    fn check_cell_size(cell_size: f64) -> Result<(), PhysicsError> {
        if cell_size.is_finite() && cell_size > 0.0 {
            Ok(())
        } else {
            Err(PhysicsError::InvalidTileGrid(format!("cell size {cell_size} must be positive")))
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Write one cell while building a grid. Out-of-range writes are ignored.
    pub fn set_cell(&mut self, col: usize, row: usize, code: u8) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = code;
        }
    }

    /// Fill a rectangle of cells; handy for floors and walls.
    pub fn fill(&mut self, cols: std::ops::RangeInclusive<usize>, rows: std::ops::RangeInclusive<usize>, code: u8) {
        for row in rows {
            for col in cols.clone() {
                self.set_cell(col, row, code);
            }
        }
    }

    pub fn cell(&self, col: i32, row: i32) -> Option<u8> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// Out-of-bounds cells are never solid.
    #[inline]
    pub fn is_solid_at(&self, col: i32, row: i32) -> bool {
        self.cell(col, row) == Some(SOLID)
    }

    /// Grid coordinates of the cell containing a world point.
    #[inline]
    pub fn cell_at(&self, x: f64, y: f64) -> (i32, i32) {
        ((x / self.cell_size).floor() as i32, (y / self.cell_size).floor() as i32)
    }

    /// World-space box of a cell.
    pub fn cell_bounds(&self, col: i32, row: i32) -> Aabb {
        let cs = self.cell_size;
        let min = DVec2::new(col as f64 * cs, row as f64 * cs);
        Aabb { min, max: min + DVec2::splat(cs) }
    }

    pub fn is_point_solid(&self, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let (col, row) = self.cell_at(x, y);
        self.is_solid_at(col, row)
    }

    /// Cells covered by `[min, max)` along one axis. A box whose far edge lies
    /// exactly on a grid line does not cover the next cell.
    fn span(&self, min: f64, max: f64) -> (i32, i32) {
        let first = (min / self.cell_size).floor() as i32;
        let last = ((max / self.cell_size).ceil() as i32).saturating_sub(1).max(first);
        (first, last)
    }

    fn cell_range(&self, b: &Aabb) -> Option<CellRange> {
        if self.cols == 0 || self.rows == 0 {
            return None;
        }
        let (c0, c1) = self.span(b.min.x, b.max.x);
        let (r0, r1) = self.span(b.min.y, b.max.y);
        let c0 = c0.max(0);
        let r0 = r0.max(0);
        let c1 = c1.min(self.cols as i32 - 1);
        let r1 = r1.min(self.rows as i32 - 1);
        (c0 <= c1 && r0 <= r1).then_some((c0, c1, r0, r1))
    }

    /// True if any solid cell lies in the one-unit band just below the body's feet.
    pub fn probe_ground(&self, body: &Body) -> bool {
        let top = body.pos.y + body.size.y + 1.0;
        let band = Aabb {
            min: DVec2::new(body.pos.x, top),
            max: DVec2::new(body.pos.x + body.size.x, top + 1.0),
        };
        let Some((c0, c1, r0, r1)) = self.cell_range(&band) else {
            return false;
        };
        (r0..=r1).any(|row| (c0..=c1).any(|col| self.is_solid_at(col, row)))
    }

    /// Push a body that just moved along `axis` out of every solid cell it
    /// overlaps, scanning row-major. Only `axis` is touched: position snaps
    /// flush to the tile's near face and that velocity component is zeroed.
    /// Returns the number of resolutions performed.
    pub fn resolve(&self, body: &mut Body, axis: Axis) -> usize {
        if body.layer == Layer::Tile {
            return 0;
        }
        // Direction is taken before the scan; the first hit zeroes the velocity.
        let dir = match axis {
            Axis::Horizontal => body.vel.x,
            Axis::Vertical => body.vel.y,
        };
        if dir == 0.0 {
            return 0;
        }
        let Some((c0, c1, r0, r1)) = self.cell_range(&body.aabb()) else {
            return 0;
        };

        let mut hits = 0;
        for row in r0..=r1 {
            for col in c0..=c1 {
                if !self.is_solid_at(col, row) {
                    continue;
                }
                let tile = self.cell_bounds(col, row);
                if !Narrowphase::overlap_aabb_aabb(&body.aabb(), &tile) {
                    continue;
                }
                match axis {
                    Axis::Horizontal => {
                        body.pos.x = if dir > 0.0 { tile.min.x - body.size.x } else { tile.max.x };
                        body.vel.x = 0.0;
                    }
                    Axis::Vertical => {
                        if dir > 0.0 {
                            body.pos.y = tile.min.y - body.size.y;
                            body.grounded = true;
                        } else {
                            body.pos.y = tile.max.y;
                        }
                        body.vel.y = 0.0;
                    }
                }
                hits += 1;
            }
        }
        hits
    }

    /// World-space extent of the grid.
    pub fn bounds(&self) -> Aabb {
        let max = DVec2::new(self.cols as f64, self.rows as f64) * self.cell_size;
        Aabb { min: DVec2::ZERO, max }
    }

    /// Liang-Barsky clip of a segment against the grid bounds. `None` when the
    /// segment never enters the grid.
    fn clip_segment(&self, from: DVec2, to: DVec2) -> Option<(DVec2, DVec2)> {
        let b = self.bounds();
        let d = to - from;
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for (p, q) in [(-d.x, from.x - b.min.x), (d.x, b.max.x - from.x), (-d.y, from.y - b.min.y), (d.y, b.max.y - from.y)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
        // Interpolate from both ends so huge coordinates do not overflow `d`.
        let at = |t: f64| from * (1.0 - t) + to * t;
        let (a, z) = (at(t0), at(t1));
        (a.is_finite() && z.is_finite()).then(|| (a.clamp(b.min, b.max), z.clamp(b.min, b.max)))
    }

    /// Walk the cells on the line between two world points (Bresenham) and
    /// return the first solid one. The segment is clipped to the grid first,
    /// so only cells inside it are visited.
    pub fn raycast(&self, from: DVec2, to: DVec2) -> Option<RaycastHit> {
        if !from.is_finite() || !to.is_finite() {
            return None;
        }
        let (from, to) = self.clip_segment(from, to)?;
        let (c0, r0) = self.cell_at(from.x, from.y);
        let (c1, r1) = self.cell_at(to.x, to.y);
        let (mut x, mut y) = (c0 as i64, r0 as i64);
        let (x1, y1) = (c1 as i64, r1 as i64);

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            let (col, row) = (x as i32, y as i32);
            if let Some(tile) = self.cell(col, row).filter(|&c| c == SOLID) {
                let corner = self.cell_bounds(col, row).min;
                return Some(RaycastHit { x: corner.x, y: corner.y, col, row, tile });
            }
            if x == x1 && y == y1 {
                return None;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
