use crate::geometry::{Obstacle, Point};
use tracing::warn;

/// Default edge length of one grid cell, in arena pixels
pub const DEFAULT_CELL_SIZE: f32 = 50.0;

/// Largest grid that will be allocated; anything bigger builds an empty grid
pub const MAX_CELLS: usize = 1 << 24;

/// One unit of the rasterized arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
    pub is_wall: bool,
}

/// Uniform walkability grid sampled from the arena's obstacles.
/// Cells are stored row-major, cell id = col + row * cols.
#[derive(Debug, Clone)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
    pub cell_size: f32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Rasterize the arena into a grid.
    ///
    /// A cell is a wall when its center lies inside any obstacle. Obstacles that
    /// cover no cell center do not show up in the grid at all. Non-positive arena
    /// dimensions (or cell size) produce an empty grid, as does an arena of
    /// more than [`MAX_CELLS`] cells.
    pub fn build(
        arena_width: f32,
        arena_height: f32,
        obstacles: &[Obstacle],
        cell_size: f32,
    ) -> Self {
        if !(arena_width > 0.0 && arena_height > 0.0 && cell_size > 0.0) {
            return Self::empty(cell_size);
        }

        let rows = (arena_height / cell_size).ceil() as i32;
        let cols = (arena_width / cell_size).ceil() as i32;
        let Some(count) = cell_count(rows, cols) else {
            return Self::empty(cell_size);
        };
        let mut cells = Vec::with_capacity(count);

        for row in 0..rows {
            for col in 0..cols {
                let center = center_of(col, row, cell_size);
                let is_wall = obstacles.iter().any(|o| o.contains(center.x, center.y));
                cells.push(Cell { col, row, is_wall });
            }
        }

        Grid { rows, cols, cell_size, cells }
    }

    /// Create a grid with specific wall cells, given by cell id
    pub fn with_walls(rows: i32, cols: i32, cell_size: f32, walls: &[i32]) -> Self {
        let (rows, cols) = (rows.max(0), cols.max(0));
        let Some(count) = cell_count(rows, cols) else {
            return Self::empty(cell_size);
        };
        let mut cells = Vec::with_capacity(count);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell { col, row, is_wall: false });
            }
        }
        for &id in walls {
            if id >= 0 && id < rows * cols {
                cells[id as usize].is_wall = true;
            }
        }
        Grid { rows, cols, cell_size, cells }
    }

    fn empty(cell_size: f32) -> Self {
        Grid { rows: 0, cols: 0, cell_size, cells: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.cols && row >= 0 && row < self.rows
    }

    /// Convert (col, row) to cell id
    pub fn id(&self, col: i32, row: i32) -> i32 {
        col + row * self.cols
    }

    /// Convert cell id to (col, row)
    pub fn coords(&self, id: i32) -> (i32, i32) {
        (id % self.cols, id / self.cols)
    }

    pub fn cell(&self, col: i32, row: i32) -> Option<&Cell> {
        if !self.in_bounds(col, row) {
            return None;
        }
        self.cells.get(self.id(col, row) as usize)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Out of bounds is treated as wall
    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        self.cell(col, row).map_or(true, |c| c.is_wall)
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall).count()
    }

    /// Cell containing an arena point, or None if the point is outside the grid
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(i32, i32)> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let col = (x / self.cell_size).floor() as i32;
        let row = (y / self.cell_size).floor() as i32;
        self.in_bounds(col, row).then_some((col, row))
    }

    pub fn cell_center(&self, col: i32, row: i32) -> Point {
        center_of(col, row, self.cell_size)
    }

    /// Render the grid as text: '■' wall, '□' free, '*' any cell a path point falls in
    pub fn render_ascii(&self, path: &[Point]) -> String {
        let on_path: Vec<(i32, i32)> = path.iter().filter_map(|p| self.cell_at(p.x, p.y)).collect();
        let mut result = String::new();

        for row in 0..self.rows {
            for col in 0..self.cols {
                let symbol = if on_path.contains(&(col, row)) {
                    '*'
                } else if self.is_wall(col, row) {
                    '■'
                } else {
                    '□'
                };
                result.push(symbol);
            }
            result.push('\n');
        }

        result
    }
}

/// Number of cells in a `rows` x `cols` grid, or None past [`MAX_CELLS`]
fn cell_count(rows: i32, cols: i32) -> Option<usize> {
    let count = (rows as usize).checked_mul(cols as usize)?;
    if count > MAX_CELLS {
        warn!(
            "[grid] {}x{} cells exceeds the limit of {}, using an empty grid",
            cols, rows, MAX_CELLS
        );
        return None;
    }
    Some(count)
}

fn center_of(col: i32, row: i32, cell_size: f32) -> Point {
    Point::new(
        col as f32 * cell_size + cell_size / 2.0,
        row as f32 * cell_size + cell_size / 2.0,
    )
}
