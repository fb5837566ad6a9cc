use crate::geometry::{Obstacle, Point};
use crate::grid::DEFAULT_CELL_SIZE;
use crate::pathfinding::{find_path_with, SearchParams};
use crate::Grid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A recorded path request with optional expectations, stored as JSON
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub test_name: String,
    pub arena_width: f32,
    pub arena_height: f32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    pub start: Point,
    pub end: Point,
    /// Exact set of wall cell ids the grid must contain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_walls: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_reachable: Option<bool>,
    /// Exact waypoint sequence the search must return
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_path: Option<Vec<Point>>,
}

fn default_cell_size() -> f32 {
    DEFAULT_CELL_SIZE
}

/// Result of running a scenario; `failures` is empty when every expectation held
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub grid: Grid,
    pub path: Vec<Point>,
    pub failures: Vec<String>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ScenarioError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn grid(&self) -> Grid {
        Grid::build(self.arena_width, self.arena_height, &self.obstacles, self.cell_size)
    }

    pub fn run(&self, params: &SearchParams) -> ScenarioOutcome {
        let grid = self.grid();
        let path = find_path_with(&grid, self.start, self.end, params);
        let mut failures = Vec::new();

        if let Some(expected) = &self.expected_walls {
            let mut expected = expected.clone();
            expected.sort_unstable();
            let actual: Vec<i32> = grid
                .cells()
                .iter()
                .filter(|c| c.is_wall)
                .map(|c| grid.id(c.col, c.row))
                .collect();
            if actual != expected {
                failures.push(format!("walls: expected {:?}, got {:?}", expected, actual));
            }
        }

        if let Some(reachable) = self.expected_reachable {
            if reachable == path.is_empty() {
                failures.push(format!(
                    "reachability: expected {}, got a path of {} waypoints",
                    reachable,
                    path.len()
                ));
            }
        }

        if let Some(expected) = &self.expected_path {
            if *expected != path {
                failures.push(format!("path: expected {:?}, got {:?}", expected, path));
            }
        }

        // Past the start cell a path must stay on walkable cells, one cell per step
        for w in path.iter().skip(1) {
            match grid.cell_at(w.x, w.y) {
                Some((col, row)) if !grid.is_wall(col, row) => {}
                _ => failures.push(format!("waypoint ({},{}) is not on a walkable cell", w.x, w.y)),
            }
        }
        for pair in path.windows(2) {
            let (a, b) = (grid.cell_at(pair[0].x, pair[0].y), grid.cell_at(pair[1].x, pair[1].y));
            if let (Some((ax, ay)), Some((bx, by))) = (a, b) {
                if (ax - bx).abs().max((ay - by).abs()) != 1 {
                    failures.push(format!("non-adjacent step ({},{}) -> ({},{})", ax, ay, bx, by));
                }
            }
        }

        ScenarioOutcome { grid, path, failures }
    }
}
