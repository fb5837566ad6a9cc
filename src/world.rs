use crate::agent::{Player, Projectile, Seeker};
use crate::config::Config;
use crate::geometry::{sort_by_angle, Obstacle, Point};
use crate::pathfinding::{find_path_with, SearchParams};
use crate::Grid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Running counters over the lifetime of a world
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub ticks: u64,
    pub shots_fired: u64,
    pub seekers_destroyed: u64,
    pub damage_taken: u64,
    pub resets: u64,
}

/// Everything the simulation needs for one arena: the obstacle snapshot the
/// grid is built from, plus the entities moving around in it.
pub struct World {
    pub width: f32,
    pub height: f32,
    pub obstacles: Vec<Obstacle>,
    pub player: Player,
    pub seekers: Vec<Seeker>,
    pub projectiles: Vec<Projectile>,
    pub stats: WorldStats,
    config: Config,
    /// Obstacle generator for random layouts; None keeps the layout on reset
    rng: Option<StdRng>,
}

/// Random polygons with 3 to 5 vertices, confined to the top-left quarter of
/// the arena and ordered by angle so they are never self-intersecting.
pub fn generate_obstacles<R: Rng>(
    rng: &mut R,
    count: usize,
    width: f32,
    height: f32,
) -> Vec<Obstacle> {
    if !(width > 0.0 && height > 0.0) {
        return Vec::new();
    }

    (0..count)
        .map(|_| {
            let vertex_count = rng.gen_range(3..=5);
            let mut vertices: Vec<Point> = (0..vertex_count)
                .map(|_| {
                    Point::new(rng.gen_range(0.0..width * 0.5), rng.gen_range(0.0..height * 0.5))
                })
                .collect();
            sort_by_angle(&mut vertices);
            Obstacle::polygon(vertices)
        })
        .collect()
}

impl World {
    /// World with a random obstacle layout, reproducible when `arena.seed` is set
    pub fn new(config: Config) -> Self {
        let mut rng = match config.arena.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let obstacles = generate_obstacles(
            &mut rng,
            config.arena.obstacle_count,
            config.arena.width,
            config.arena.height,
        );
        Self::assemble(config, obstacles, Some(rng))
    }

    /// World with a fixed obstacle layout that survives resets
    pub fn with_obstacles(config: Config, obstacles: Vec<Obstacle>) -> Self {
        Self::assemble(config, obstacles, None)
    }

    fn assemble(config: Config, obstacles: Vec<Obstacle>, rng: Option<StdRng>) -> Self {
        let width = config.arena.width;
        let height = config.arena.height;
        let mut world = World {
            width,
            height,
            obstacles,
            player: spawn_player(&config),
            seekers: Vec::new(),
            projectiles: Vec::new(),
            stats: WorldStats::default(),
            config,
            rng,
        };
        world.seekers = world.spawn_seekers();
        info!(
            "World created: {}x{} arena, {} obstacles, {} seekers",
            width,
            height,
            world.obstacles.len(),
            world.seekers.len()
        );
        world
    }

    /// Seekers start in the four corners of the arena
    fn spawn_seekers(&self) -> Vec<Seeker> {
        let right = (self.width - 1.0).max(0.0);
        let bottom = (self.height - 1.0).max(0.0);
        let s = &self.config.seekers;
        [(0.0, 0.0), (right, 0.0), (0.0, bottom), (right, bottom)]
            .iter()
            .map(|&(x, y)| Seeker::new(Point::new(x, y), s.size, s.speed, s.health))
            .collect()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn search_params(&self) -> SearchParams {
        self.config.pathfinding.search_params()
    }

    /// Fresh walkability grid for the current obstacle snapshot
    pub fn grid(&self) -> Grid {
        Grid::build(self.width, self.height, &self.obstacles, self.config.pathfinding.cell_size)
    }

    /// Build a grid and search it in one go, the way every path request is served
    pub fn find_path(&self, from: Point, to: Point) -> Vec<Point> {
        find_path_with(&self.grid(), from, to, &self.search_params())
    }

    pub fn is_inside_obstacle(&self, p: Point) -> bool {
        self.obstacles.iter().any(|o| o.contains(p.x, p.y))
    }

    pub fn is_inside_arena(&self, p: Point) -> bool {
        inside_arena(p, self.width, self.height)
    }

    /// Move the player by a direction (e.g. from input), clamped to the arena
    pub fn move_player(&mut self, dx: f32, dy: f32) {
        self.player.update(dx, dy, self.width, self.height);
    }

    /// Advance the simulation by one fixed step
    pub fn tick(&mut self) {
        self.stats.ticks += 1;

        if self.stats.ticks % u64::from(self.config.player.fire_interval_ticks.max(1)) == 0 {
            self.projectiles.push(self.player.shoot(self.config.player.projectile_speed));
            self.stats.shots_fired += 1;
        }

        let params = self.search_params();
        let target = self.player.pos.clamped_to_arena(self.width, self.height);
        for i in 0..self.seekers.len() {
            // Each request gets its own grid snapshot
            let grid = self.grid();
            self.seekers[i].pursue(&grid, target, &params);
        }

        let player_bounds = self.player.bounds();
        let contacts = self
            .seekers
            .iter()
            .filter(|s| s.bounds().intersects(&player_bounds))
            .count() as i32;
        if contacts > 0 {
            self.player.health -= contacts;
            self.stats.damage_taken += contacts as u64;
        }

        self.update_projectiles();

        if self.player.health <= 0 {
            info!("Player destroyed at tick {}, resetting world", self.stats.ticks);
            self.reset();
        }
    }

    fn update_projectiles(&mut self) {
        let (width, height) = (self.width, self.height);
        let obstacles = &self.obstacles;
        let seekers = &mut self.seekers;

        self.projectiles.retain_mut(|shot| {
            shot.update();
            if !inside_arena(shot.pos, width, height)
                || obstacles.iter().any(|o| o.contains(shot.pos.x, shot.pos.y))
            {
                return false;
            }
            let bounds = shot.bounds();
            match seekers.iter_mut().find(|s| s.is_alive() && s.bounds().intersects(&bounds)) {
                Some(seeker) => {
                    seeker.health -= 1;
                    false
                }
                None => true,
            }
        });

        let before = self.seekers.len();
        self.seekers.retain(Seeker::is_alive);
        let destroyed = before - self.seekers.len();
        if destroyed > 0 {
            debug!("{} seeker(s) destroyed at tick {}", destroyed, self.stats.ticks);
            self.stats.seekers_destroyed += destroyed as u64;
        }
    }

    /// Restore the player, respawn seekers, clear projectiles and (for random
    /// layouts) regenerate the obstacles
    pub fn reset(&mut self) {
        if let Some(rng) = self.rng.as_mut() {
            self.obstacles = generate_obstacles(
                rng,
                self.config.arena.obstacle_count,
                self.width,
                self.height,
            );
        }
        self.player = spawn_player(&self.config);
        self.seekers = self.spawn_seekers();
        self.projectiles.clear();
        self.stats.resets += 1;
    }

    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }
}

fn inside_arena(p: Point, width: f32, height: f32) -> bool {
    p.x >= 0.0 && p.x < width && p.y >= 0.0 && p.y < height
}

fn spawn_player(config: &Config) -> Player {
    let p = &config.player;
    Player::new(
        Point::new(config.arena.width / 2.0, config.arena.height / 2.0),
        p.size,
        p.speed,
        p.health,
    )
}
