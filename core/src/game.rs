use crate::catalog::{self, PieceKind};
use crate::state::Target;

pub const SNAP_DISTANCE_DEFAULT: f32 = 50.0;
pub const SNAP_DISTANCE_MIN: f32 = 5.0;
pub const SNAP_DISTANCE_MAX: f32 = 200.0;

pub const ROTATION_TOLERANCE_DEFAULT_DEG: f32 = 30.0;
pub const ROTATION_TOLERANCE_MIN_DEG: f32 = 1.0;
pub const ROTATION_TOLERANCE_MAX_DEG: f32 = 90.0;

pub const MAGNET_DISTANCE_DEFAULT: f32 = 30.0;
pub const MAGNET_DISTANCE_MIN: f32 = 5.0;
pub const MAGNET_DISTANCE_MAX: f32 = 120.0;

pub const MAGNET_ANGLE_TOLERANCE_DEFAULT_DEG: f32 = 15.0;
pub const MAGNET_ANGLE_TOLERANCE_MIN_DEG: f32 = 0.5;
pub const MAGNET_ANGLE_TOLERANCE_MAX_DEG: f32 = 45.0;

/// Candidates at or below this strength never move the dragged piece.
pub const MAGNET_COMMIT_STRENGTH: f32 = 0.7;
pub const MAGNET_HINT_COUNT: usize = 3;

/// Piece unit scale as a fraction of the shorter canvas axis.
pub const PIECE_SCALE_RATIO: f32 = 0.4;

pub const SCATTER_MARGIN_RATIO: f32 = 0.05;

/// Position, rotation, and mirror state of one piece in canvas space.
/// Rotation is stored as given and normalized to [0, 360) for comparisons;
/// the mirror flag only ever carries meaning for the parallelogram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    pub rotation_deg: f32,
    pub mirrored: bool,
}

impl Transform {
    pub fn new(x: f32, y: f32, rotation_deg: f32, mirrored: bool) -> Self {
        Self {
            x,
            y,
            rotation_deg,
            mirrored,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

pub fn normalize_angle(mut angle: f32) -> f32 {
    angle %= 360.0;
    if angle < 0.0 {
        angle += 360.0;
    }
    angle
}

/// Signed shortest rotation from `current` to `target`, in (-180, 180].
pub fn angle_delta(target: f32, current: f32) -> f32 {
    let mut diff = normalize_angle(target - current);
    if diff > 180.0 {
        diff -= 360.0;
    }
    diff
}

/// Unsigned angular distance: min(d, 360 - d) for d = |a - b| mod 360.
pub fn angular_distance(a: f32, b: f32) -> f32 {
    angle_delta(a, b).abs()
}

pub fn angle_matches(a: f32, b: f32, tolerance: f32) -> bool {
    angular_distance(a, b) <= tolerance
}

pub fn rotate_vec(x: f32, y: f32, angle_deg: f32) -> (f32, f32) {
    let theta = angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Canonical vertices carried into canvas space: scale by `unit_size`,
/// mirror (x negation, before rotation), rotate about the canonical origin,
/// then translate to the transform position.
pub fn world_vertices(kind: PieceKind, transform: &Transform, unit_size: f32) -> Vec<(f32, f32)> {
    catalog::canonical_polygon(kind)
        .iter()
        .map(|(vx, vy)| {
            let x = if transform.mirrored {
                -vx * unit_size
            } else {
                vx * unit_size
            };
            let y = vy * unit_size;
            let (rx, ry) = rotate_vec(x, y, transform.rotation_deg);
            (rx + transform.x, ry + transform.y)
        })
        .collect()
}

/// One side of a placed polygon, with the derived quantities the magnetism
/// engine ranks on.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub midpoint: (f32, f32),
    pub angle_deg: f32,
    pub length: f32,
}

/// Consecutive vertex pairs, wrapping from the last vertex back to the first.
pub fn piece_edges(vertices: &[(f32, f32)]) -> Vec<Edge> {
    if vertices.len() < 2 {
        return Vec::new();
    }
    let mut edges = Vec::with_capacity(vertices.len());
    for i in 0..vertices.len() {
        let start = vertices[i];
        let end = vertices[(i + 1) % vertices.len()];
        let dx = end.0 - start.0;
        let dy = end.1 - start.1;
        edges.push(Edge {
            start,
            end,
            midpoint: ((start.0 + end.0) * 0.5, (start.1 + end.1) * 0.5),
            angle_deg: normalize_angle(dy.atan2(dx).to_degrees()),
            length: (dx * dx + dy * dy).sqrt(),
        });
    }
    edges
}

/// Axis-aligned bounding box, the collision proxy for overlap prevention.
/// Intentionally approximate; exact polygon clipping is out of scope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Aabb {
    pub fn from_points(points: &[(f32, f32)]) -> Self {
        let mut aabb = Self {
            min_x: f32::INFINITY,
            min_y: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            max_y: f32::NEG_INFINITY,
        };
        for (x, y) in points {
            aabb.min_x = aabb.min_x.min(*x);
            aabb.min_y = aabb.min_y.min(*y);
            aabb.max_x = aabb.max_x.max(*x);
            aabb.max_y = aabb.max_y.max(*y);
        }
        aabb
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }
}

/// Gameplay snap scan: first free target of the same kind within both
/// thresholds wins, in level order. The order-dependent tie-break is
/// deliberate; do not replace with nearest-match. Occupancy and kind are the
/// only skip conditions; the snap itself adopts the full target pose, mirror
/// flag included.
pub fn find_snap_target(
    kind: PieceKind,
    position: (f32, f32),
    rotation_deg: f32,
    targets: &[Target],
    position_threshold: f32,
    rotation_threshold_deg: f32,
) -> Option<usize> {
    for (index, target) in targets.iter().enumerate() {
        if target.occupied || target.kind != kind {
            continue;
        }
        if distance(position, target.transform.position()) > position_threshold {
            continue;
        }
        if !angle_matches(rotation_deg, target.transform.rotation_deg, rotation_threshold_deg) {
            continue;
        }
        return Some(index);
    }
    None
}

/// Win predicate: every target occupied. Recomputed, never cached.
pub fn is_complete(targets: &[Target]) -> bool {
    targets.iter().all(|target| target.occupied)
}

pub fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

pub fn rand_unit(seed: u32, salt: u32) -> f32 {
    let mixed = splitmix32(seed ^ salt);
    let top = mixed >> 8;
    top as f32 / ((1u32 << 24) as f32)
}

pub fn rand_range(seed: u32, salt: u32, min: f32, max: f32) -> f32 {
    min + (max - min) * rand_unit(seed, salt)
}

/// Deterministic scatter layout: one position per piece inside the canvas,
/// keeping a margin so no piece starts hugging the border. Same seed, same
/// layout.
pub fn scatter_positions(seed: u32, count: usize, width: f32, height: f32) -> Vec<(f32, f32)> {
    let margin = width.min(height) * SCATTER_MARGIN_RATIO;
    let min_x = margin;
    let max_x = (width - margin).max(min_x);
    let min_y = margin;
    let max_y = (height - margin).max(min_y);
    let mut positions = Vec::with_capacity(count);
    for id in 0..count {
        let salt = (id as u32) << 1;
        let x = rand_range(seed, salt, min_x, max_x);
        let y = rand_range(seed, salt + 1, min_y, max_y);
        positions.push((x, y));
    }
    positions
}
