use crate::geometry::Point;
use crate::Grid;
use serde::Deserialize;
use tracing::{debug, trace, warn};

/// Neighbor expansion order. Ties on f-score are resolved by open-set
/// insertion order, so this order is observable in the returned paths.
#[rustfmt::skip]
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Remaining-cost estimate, measured in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
}

impl Heuristic {
    pub fn estimate(&self, dx: i32, dy: i32) -> f64 {
        let dx = dx.abs() as f64;
        let dy = dy.abs() as f64;
        match self {
            Heuristic::Euclidean => (dx * dx + dy * dy).sqrt(),
            Heuristic::Manhattan => dx + dy,
            Heuristic::Chebyshev => dx.max(dy),
        }
    }
}

/// Tunables for one search. The default is unit step cost for all eight
/// directions with a Euclidean heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub step_cost: f64,
    pub heuristic: Heuristic,
    pub allow_diagonal: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            step_cost: 1.0,
            heuristic: Heuristic::Euclidean,
            allow_diagonal: true,
        }
    }
}

/// Per-cell search state, indexed by cell id and discarded after each search
#[derive(Debug, Clone, Copy, Default)]
struct SearchNode {
    g: f64,
    h: f64,
    f: f64,
    parent: Option<usize>,
    open: bool,
    closed: bool,
}

/// Find a path between two arena points with the default search parameters.
/// Returns cell centers in start -> end order, or an empty Vec if unreachable.
pub fn find_path(grid: &Grid, start: Point, end: Point) -> Vec<Point> {
    find_path_with(grid, start, end, &SearchParams::default())
}

pub fn find_path_with(grid: &Grid, start: Point, end: Point, params: &SearchParams) -> Vec<Point> {
    if grid.is_empty() {
        debug!("[find_path] empty grid, no path");
        return Vec::new();
    }

    let cells = (grid.cell_at(start.x, start.y), grid.cell_at(end.x, end.y));
    let (start_cell, end_cell) = match cells {
        (Some(s), Some(e)) => (s, e),
        _ => {
            warn!(
                "[find_path] rejected out-of-bounds request ({:.1},{:.1}) -> ({:.1},{:.1})",
                start.x, start.y, end.x, end.y
            );
            return Vec::new();
        }
    };

    find_path_cells(grid, start_cell, end_cell, params)
        .into_iter()
        .map(|id| {
            let (col, row) = grid.coords(id);
            grid.cell_center(col, row)
        })
        .collect()
}

/// A* over cell coordinates, returning the cell ids of the path.
///
/// Every expansion overwrites a neighbor's
/// g and parent even when the neighbor already has a cheaper route, and closed
/// cells are never reopened. A path is always found when one exists, but it is
/// not guaranteed to be the shortest.
pub fn find_path_cells(
    grid: &Grid,
    start: (i32, i32),
    end: (i32, i32),
    params: &SearchParams,
) -> Vec<i32> {
    if !grid.in_bounds(start.0, start.1) || !grid.in_bounds(end.0, end.1) {
        return Vec::new();
    }

    let start_id = grid.id(start.0, start.1) as usize;
    let end_id = grid.id(end.0, end.1) as usize;

    let mut nodes = vec![SearchNode::default(); grid.len()];
    let start_h = params.heuristic.estimate(start.0 - end.0, start.1 - end.1);
    nodes[start_id] = SearchNode {
        g: 0.0,
        h: start_h,
        f: start_h,
        parent: None,
        open: true,
        closed: false,
    };
    let mut open: Vec<usize> = vec![start_id];

    let mut iterations = 0usize;
    while !open.is_empty() {
        iterations += 1;

        // First open entry with the lowest f wins
        let mut best = 0;
        for i in 1..open.len() {
            if nodes[open[i]].f < nodes[open[best]].f {
                best = i;
            }
        }
        let current = open.remove(best);
        nodes[current].open = false;
        nodes[current].closed = true;

        let (col, row) = grid.coords(current as i32);
        trace!(
            "[A*] iteration {}: expanding ({},{}) g={:.2} h={:.2} f={:.2}, open={}",
            iterations, col, row, nodes[current].g, nodes[current].h, nodes[current].f, open.len()
        );

        if current == end_id {
            let path = reconstruct(&nodes, current);
            debug!(
                "[find_path] ({},{}) -> ({},{}): {} cells after {} iterations",
                start.0, start.1, end.0, end.1, path.len(), iterations
            );
            return path;
        }

        for &(dx, dy) in DIRECTIONS.iter() {
            if !params.allow_diagonal && dx != 0 && dy != 0 {
                continue;
            }
            let nx = col + dx;
            let ny = row + dy;
            if grid.is_wall(nx, ny) {
                continue;
            }

            let next = grid.id(nx, ny) as usize;
            if nodes[next].closed {
                continue;
            }

            let g = nodes[current].g + params.step_cost;
            let h = params.heuristic.estimate(nx - end.0, ny - end.1);
            let node = &mut nodes[next];
            node.g = g;
            node.h = h;
            node.f = g + h;
            node.parent = Some(current);

            if !node.open {
                node.open = true;
                open.push(next);
            }
        }
    }

    debug!(
        "[find_path] ({},{}) -> ({},{}): no path after {} iterations",
        start.0, start.1, end.0, end.1, iterations
    );
    Vec::new()
}

fn reconstruct(nodes: &[SearchNode], end: usize) -> Vec<i32> {
    let mut path = vec![end as i32];
    let mut current = end;
    while let Some(parent) = nodes[current].parent {
        path.push(parent as i32);
        current = parent;
    }
    path.reverse();
    path
}

/// Sum of straight-line distances between consecutive waypoints
pub fn path_length(path: &[Point]) -> f32 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

/// Format path for display
pub fn format_path(path: &[Point]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(|p| format!("({},{})", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" -> ")
}
