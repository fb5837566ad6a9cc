#![allow(dead_code)]

use arenapath::{Grid, DEFAULT_CELL_SIZE};
use std::fs;
use std::path::Path;

/// Parsed text layout: grid plus start and destination cells
pub struct Layout {
    pub grid: Grid,
    pub start: (i32, i32),
    pub dest: (i32, i32),
    pub expect_reachable: bool,
}

/// Parse a layout file
/// Format:
/// - first line: `expect: reachable` or `expect: unreachable`
/// - S: start cell
/// - D: destination cell
/// - ■: wall
/// - □: free cell
pub fn parse_layout(contents: &str) -> Result<Layout, Box<dyn std::error::Error>> {
    let mut lines = contents.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().ok_or("Empty layout")?;
    let expect_reachable = match header.trim() {
        "expect: reachable" => true,
        "expect: unreachable" => false,
        other => return Err(format!("Bad header line: {}", other).into()),
    };

    let grid_lines: Vec<&str> = lines.collect();
    if grid_lines.is_empty() {
        return Err("No grid lines found in layout".into());
    }

    let cols = grid_lines[0].chars().count() as i32;
    let rows = grid_lines.len() as i32;
    let mut walls = Vec::new();
    let mut start = None;
    let mut dest = None;

    for (y, line) in grid_lines.iter().enumerate() {
        if line.chars().count() as i32 != cols {
            return Err(format!("Row {} has the wrong width", y).into());
        }
        for (x, ch) in line.chars().enumerate() {
            let (x, y) = (x as i32, y as i32);
            match ch {
                'S' => start = Some((x, y)),
                'D' => dest = Some((x, y)),
                '■' => walls.push(x + y * cols),
                '□' => {}
                other => return Err(format!("Unknown character '{}'", other).into()),
            }
        }
    }

    Ok(Layout {
        grid: Grid::with_walls(rows, cols, DEFAULT_CELL_SIZE, &walls),
        start: start.ok_or("No start position 'S' found")?,
        dest: dest.ok_or("No destination 'D' found")?,
        expect_reachable,
    })
}

pub fn load_layout(path: &Path) -> Result<Layout, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    parse_layout(&contents)
}

fn flip_layout(layout: &Layout, flip_x: bool, flip_y: bool) -> Layout {
    let grid = &layout.grid;
    let flip = |(x, y): (i32, i32)| {
        (
            if flip_x { grid.cols - 1 - x } else { x },
            if flip_y { grid.rows - 1 - y } else { y },
        )
    };

    let walls: Vec<i32> = grid
        .cells()
        .iter()
        .filter(|c| c.is_wall)
        .map(|c| {
            let (x, y) = flip((c.col, c.row));
            x + y * grid.cols
        })
        .collect();

    Layout {
        grid: Grid::with_walls(grid.rows, grid.cols, grid.cell_size, &walls),
        start: flip(layout.start),
        dest: flip(layout.dest),
        expect_reachable: layout.expect_reachable,
    }
}

/// Mirror left-right
pub fn flip_layout_horizontal(layout: &Layout) -> Layout {
    flip_layout(layout, true, false)
}

/// Mirror top-bottom
pub fn flip_layout_vertical(layout: &Layout) -> Layout {
    flip_layout(layout, false, true)
}

pub fn flip_layout_both(layout: &Layout) -> Layout {
    flip_layout(layout, true, true)
}

/// Check that a cell path starts and ends where it should, moves to a
/// neighboring cell on every step and never enters a wall
pub fn check_cell_path(
    grid: &Grid,
    path: &[i32],
    start: (i32, i32),
    dest: (i32, i32),
) -> Result<(), String> {
    let first = *path.first().ok_or("Path is empty")?;
    let last = *path.last().ok_or("Path is empty")?;
    if grid.coords(first) != start {
        return Err(format!("Path starts at {:?}, expected {:?}", grid.coords(first), start));
    }
    if grid.coords(last) != dest {
        return Err(format!("Path ends at {:?}, expected {:?}", grid.coords(last), dest));
    }

    for pair in path.windows(2) {
        let (ax, ay) = grid.coords(pair[0]);
        let (bx, by) = grid.coords(pair[1]);
        if (ax - bx).abs().max((ay - by).abs()) != 1 {
            return Err(format!("Non-adjacent step ({},{}) -> ({},{})", ax, ay, bx, by));
        }
        if grid.is_wall(bx, by) {
            return Err(format!("Path enters wall at ({},{})", bx, by));
        }
    }

    Ok(())
}

/// Visualize a cell path on a grid
pub fn visualize_path(grid: &Grid, path: &[i32], start: (i32, i32), dest: (i32, i32)) -> String {
    let mut result = String::new();
    for y in 0..grid.rows {
        for x in 0..grid.cols {
            let symbol = if (x, y) == start {
                'S'
            } else if (x, y) == dest {
                'D'
            } else if path.contains(&grid.id(x, y)) {
                '*'
            } else if grid.is_wall(x, y) {
                '■'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}
