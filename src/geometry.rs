use serde::{Deserialize, Serialize};

/// A point in continuous arena coordinates (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Nearest point at least one pixel inside the right and bottom edges of a
    /// `width` x `height` arena, so it always maps to a grid cell
    pub fn clamped_to_arena(&self, width: f32, height: f32) -> Point {
        Point::new(
            self.x.clamp(0.0, (width - 1.0).max(0.0)),
            self.y.clamp(0.0, (height - 1.0).max(0.0)),
        )
    }
}

/// Axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    /// Square of side `size` centered on `center`
    pub fn centered(center: Point, size: f32) -> Self {
        let half = size / 2.0;
        Rect::new(center.x - half, center.y - half, size, size)
    }

    /// Left/top edges are inside, right/bottom edges are not.
    /// Rectangles with no area contain nothing.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Static obstacle in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Obstacle {
    Polygon { vertices: Vec<Point> },
    Rect(Rect),
}

impl Obstacle {
    pub fn polygon(vertices: Vec<Point>) -> Self {
        Obstacle::Polygon { vertices }
    }

    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Obstacle::Rect(Rect::new(x, y, width, height))
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        match self {
            Obstacle::Polygon { vertices } => point_in_polygon(x, y, vertices),
            Obstacle::Rect(rect) => rect.contains(x, y),
        }
    }
}

/// Even-odd ray casting test.
///
/// Casts a horizontal ray from (x, y) towards +x and toggles on every edge it
/// crosses. Polygons with fewer than 3 vertices contain nothing. Points lying
/// exactly on an edge may land on either side.
pub fn point_in_polygon(x: f32, y: f32, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let pi = vertices[i];
        let pj = vertices[j];

        // The straddle check guarantees pi.y != pj.y, so the division is safe
        if (pi.y > y) != (pj.y > y) && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Sort vertices by angle around their centroid so they form a simple polygon
pub fn sort_by_angle(vertices: &mut [Point]) {
    if vertices.is_empty() {
        return;
    }
    let n = vertices.len() as f32;
    let cx = vertices.iter().map(|v| v.x).sum::<f32>() / n;
    let cy = vertices.iter().map(|v| v.y).sum::<f32>() / n;

    vertices.sort_by(|a, b| {
        let angle_a = (a.y - cy).atan2(a.x - cx);
        let angle_b = (b.y - cy).atan2(b.x - cx);
        angle_a.total_cmp(&angle_b)
    });
}
