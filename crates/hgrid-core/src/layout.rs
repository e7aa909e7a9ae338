#![forbid(unsafe_code)]

//! Fitting a dot grid into a view.
//!
//! Each dot is drawn at a preferred diameter, shrunk if the view cannot hold
//! `cols × rows` of them with their padding. A cell is the dot plus its
//! padding on every side, so cells tile the grid block without gaps and every
//! point inside the block belongs to exactly one cell. The block is centered
//! in the view.

use crate::config::GridConfig;
use crate::geometry::{CellBounds, GridPoint, Point, Rect, Size};

/// Resolved placement of every cell of a grid inside a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    rows: u16,
    cols: u16,
    dot_size: f64,
    padding: f64,
    origin: Point,
}

impl GridLayout {
    /// Fit `config`'s grid into `view`.
    ///
    /// An empty view produces zero-size cells, which contain no points.
    #[must_use]
    pub fn fit(view: Size, config: &GridConfig) -> Self {
        let rows = config.rows;
        let cols = config.cols;
        if view.is_empty() || rows == 0 || cols == 0 {
            return Self {
                rows,
                cols,
                dot_size: 0.0,
                padding: 0.0,
                origin: Point::default(),
            };
        }

        let padding = config.dot_padding;
        let dot_size = ideal_dot_size(view, config);
        let pitch = dot_size + 2.0 * padding;
        let block = Size::new(f64::from(cols) * pitch, f64::from(rows) * pitch);
        let origin = Point::new(
            (view.width - block.width) / 2.0,
            (view.height - block.height) / 2.0,
        );
        Self {
            rows,
            cols,
            dot_size,
            padding,
            origin,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Diameter actually used for each dot.
    #[must_use]
    pub const fn dot_size(&self) -> f64 {
        self.dot_size
    }

    /// Distance between neighbouring cell origins.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.dot_size + 2.0 * self.padding
    }

    /// Top-left corner of the grid block.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Rectangle of the whole grid block.
    #[must_use]
    pub fn block(&self) -> Rect {
        let pitch = self.pitch();
        Rect::new(
            self.origin.x,
            self.origin.y,
            f64::from(self.cols) * pitch,
            f64::from(self.rows) * pitch,
        )
    }

    /// Hit rectangle of a cell (dot plus padding).
    #[must_use]
    pub fn cell_rect(&self, point: GridPoint) -> Rect {
        let pitch = self.pitch();
        Rect::square(
            self.origin.x + f64::from(point.x) * pitch,
            self.origin.y + f64::from(point.y) * pitch,
            pitch,
        )
    }

    /// Drawn rectangle of a dot.
    #[must_use]
    pub fn dot_rect(&self, point: GridPoint) -> Rect {
        let cell = self.cell_rect(point);
        Rect::square(cell.x + self.padding, cell.y + self.padding, self.dot_size)
    }

    /// Cell under `location`, computed arithmetically.
    #[must_use]
    pub fn cell_at(&self, location: Point) -> Option<GridPoint> {
        let pitch = self.pitch();
        if pitch <= 0.0 || !self.block().contains(location) {
            return None;
        }
        let col = ((location.x - self.origin.x) / pitch).floor();
        let row = ((location.y - self.origin.y) / pitch).floor();
        // Float rounding at the far edge can land one past the last cell.
        let col = (col as u16).min(self.cols - 1);
        let row = (row as u16).min(self.rows - 1);
        Some(GridPoint::new(col, row))
    }

    /// Bounds of every cell, row by row.
    #[must_use]
    pub fn cell_bounds(&self) -> Vec<CellBounds> {
        let mut out = Vec::with_capacity(usize::from(self.rows) * usize::from(self.cols));
        for row in 0..self.rows {
            for col in 0..self.cols {
                let point = GridPoint::new(col, row);
                out.push(CellBounds::new(point, self.cell_rect(point)));
            }
        }
        out
    }
}

/// Largest dot diameter, up to the preferred size, that fits the view.
#[must_use]
pub fn ideal_dot_size(view: Size, config: &GridConfig) -> f64 {
    if view.is_empty() || config.rows == 0 || config.cols == 0 {
        return 0.0;
    }
    let cols = f64::from(config.cols);
    let rows = f64::from(config.rows);
    let pad = config.dot_padding;
    let ideal_width = config.dot_size.min((view.width - cols * pad * 2.0) / cols);
    let ideal_height = config.dot_size.min((view.height - rows * pad * 2.0) / rows);
    ideal_width.min(ideal_height).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: u16, cols: u16, dot: f64, pad: f64) -> GridConfig {
        GridConfig {
            rows,
            cols,
            dot_size: dot,
            dot_padding: pad,
            ..GridConfig::default()
        }
    }

    #[test]
    fn preferred_size_used_when_it_fits() {
        let layout = GridLayout::fit(Size::new(1000.0, 1000.0), &config(10, 10, 25.0, 0.0));
        assert_eq!(layout.dot_size(), 25.0);
        assert_eq!(layout.block(), Rect::new(375.0, 375.0, 250.0, 250.0));
    }

    #[test]
    fn shrinks_to_fit_narrow_view() {
        // (100 − 10·2·1) / 10 = 8
        let layout = GridLayout::fit(Size::new(100.0, 1000.0), &config(10, 10, 25.0, 1.0));
        assert_eq!(layout.dot_size(), 8.0);
        assert_eq!(layout.pitch(), 10.0);
        assert_eq!(layout.origin().x, 0.0);
    }

    #[test]
    fn padding_larger_than_view_gives_zero_dots() {
        let size = ideal_dot_size(Size::new(10.0, 10.0), &config(10, 10, 25.0, 5.0));
        assert_eq!(size, 0.0);
    }

    #[test]
    fn empty_view_has_no_hits() {
        let layout = GridLayout::fit(Size::new(0.0, 0.0), &config(5, 5, 10.0, 2.0));
        assert_eq!(layout.pitch(), 0.0);
        assert_eq!(layout.cell_at(Point::new(0.0, 0.0)), None);
        assert!(layout.cell_bounds().iter().all(|c| c.rect.is_empty()));
    }

    #[test]
    fn cell_bounds_tile_the_block() {
        let layout = GridLayout::fit(Size::new(100.0, 100.0), &config(10, 10, 10.0, 0.0));
        let cells = layout.cell_bounds();
        assert_eq!(cells.len(), 100);
        assert_eq!(cells[12].point, GridPoint::new(2, 1));
        assert_eq!(cells[12].rect, Rect::new(20.0, 10.0, 10.0, 10.0));
    }

    #[test]
    fn cell_at_matches_bounds_scan() {
        let layout = GridLayout::fit(Size::new(320.0, 480.0), &config(7, 9, 30.0, 3.0));
        let cells = layout.cell_bounds();
        for &(x, y) in &[(100.0, 200.0), (33.3, 250.1), (250.0, 310.0), (0.0, 0.0)] {
            let p = Point::new(x, y);
            let scanned = cells.iter().find(|c| c.contains(p)).map(|c| c.point);
            assert_eq!(layout.cell_at(p), scanned, "at ({x}, {y})");
        }
    }

    #[test]
    fn dot_rect_is_inset_by_padding() {
        let layout = GridLayout::fit(Size::new(100.0, 100.0), &config(5, 5, 10.0, 5.0));
        let cell = layout.cell_rect(GridPoint::new(1, 1));
        let dot = layout.dot_rect(GridPoint::new(1, 1));
        assert_eq!(dot.x, cell.x + 5.0);
        assert_eq!(dot.width, 10.0);
        assert_eq!(dot.center(), cell.center());
    }
}
