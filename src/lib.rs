pub mod agent;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod pathfinding;
pub mod scenario;
pub mod world;

pub use agent::{Player, Projectile, Seeker};
pub use config::{Config, ConfigError};
pub use geometry::{point_in_polygon, Obstacle, Point, Rect};
pub use grid::{Cell, Grid, DEFAULT_CELL_SIZE};
pub use pathfinding::{find_path, find_path_cells, find_path_with, Heuristic, SearchParams};
pub use scenario::{Scenario, ScenarioError};
pub use world::World;
