use crate::geometry::{Point, Rect};
use crate::pathfinding::{find_path_with, SearchParams};
use crate::Grid;

pub const PROJECTILE_SIZE: f32 = 5.0;

/// Move `pos` up to `max_step` towards `target`, snapping when close enough.
/// Returns true once `pos` sits on `target`.
fn step_toward(pos: &mut Point, target: Point, max_step: f32) -> bool {
    let dx = target.x - pos.x;
    let dy = target.y - pos.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance <= max_step {
        *pos = target;
        return true;
    }

    pos.x += dx / distance * max_step;
    pos.y += dy / distance * max_step;
    false
}

/// Enemy that re-plans a grid path to its target every tick and walks it
#[derive(Clone, Debug)]
pub struct Seeker {
    /// Center of the seeker's square
    pub pos: Point,
    pub size: f32,
    /// Pixels travelled per tick
    pub speed: f32,
    pub health: i32,
}

impl Seeker {
    pub fn new(pos: Point, size: f32, speed: f32, health: i32) -> Self {
        Seeker { pos, size, speed, health }
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Waypoint to steer towards. Paths start at the center of the seeker's own
    /// cell; heading back to it every tick would pin the seeker in place, so the
    /// second waypoint is used whenever there is one.
    pub fn next_waypoint(&self, path: &[Point]) -> Option<Point> {
        path.get(1).or_else(|| path.first()).copied()
    }

    /// Plan a path to `target` on `grid` and take one step along it.
    /// Stays put when no path exists. Returns true if the seeker moved.
    pub fn pursue(&mut self, grid: &Grid, target: Point, params: &SearchParams) -> bool {
        let path = find_path_with(grid, self.pos, target, params);
        match self.next_waypoint(&path) {
            Some(waypoint) => {
                step_toward(&mut self.pos, waypoint, self.speed);
                true
            }
            None => false,
        }
    }
}

/// The controllable agent
#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Point,
    pub size: f32,
    pub speed: f32,
    pub health: i32,
}

impl Player {
    pub fn new(pos: Point, size: f32, speed: f32, health: i32) -> Self {
        Player { pos, size, speed, health }
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    /// Move by a direction scaled by speed, staying inside the arena
    pub fn update(&mut self, dx: f32, dy: f32, arena_width: f32, arena_height: f32) {
        let moved = Point::new(self.pos.x + dx * self.speed, self.pos.y + dy * self.speed);
        self.pos = moved.clamped_to_arena(arena_width, arena_height);
    }

    /// Fire a projectile straight up
    pub fn shoot(&self, projectile_speed: f32) -> Projectile {
        Projectile::new(self.pos, Point::new(0.0, -1.0), projectile_speed)
    }
}

/// Straight-moving shot
#[derive(Clone, Debug)]
pub struct Projectile {
    pub pos: Point,
    /// Displacement per tick
    pub velocity: Point,
}

impl Projectile {
    /// `direction` is normalized; a zero direction makes a stationary projectile
    pub fn new(pos: Point, direction: Point, speed: f32) -> Self {
        let len = (direction.x * direction.x + direction.y * direction.y).sqrt();
        let velocity = if len > 0.0 {
            Point::new(direction.x / len * speed, direction.y / len * speed)
        } else {
            Point::default()
        };
        Projectile { pos, velocity }
    }

    pub fn update(&mut self) {
        self.pos.x += self.velocity.x;
        self.pos.y += self.velocity.y;
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, PROJECTILE_SIZE)
    }
}
