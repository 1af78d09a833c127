use rkyv::{Archive, Deserialize, Serialize};

pub const PIECE_COUNT: usize = 7;

// Canonical polygons live in a 1x1 design space: the seven pieces partition a
// unit square, so large = 2 x medium = 4 x small = 2 x square = 2 x parallelogram.
const SQRT_2: f32 = std::f32::consts::SQRT_2;

const LARGE_TRIANGLE: [(f32, f32); 3] = [(0.0, 0.0), (SQRT_2 * 0.5, 0.0), (0.0, SQRT_2 * 0.5)];
const MEDIUM_TRIANGLE: [(f32, f32); 3] = [(0.0, 0.0), (0.5, 0.0), (0.0, 0.5)];
const SMALL_TRIANGLE: [(f32, f32); 3] = [(0.0, 0.0), (SQRT_2 * 0.25, 0.0), (0.0, SQRT_2 * 0.25)];
const SQUARE: [(f32, f32); 4] = [
    (0.0, 0.0),
    (SQRT_2 * 0.25, 0.0),
    (SQRT_2 * 0.25, SQRT_2 * 0.25),
    (0.0, SQRT_2 * 0.25),
];
const PARALLELOGRAM: [(f32, f32); 4] = [(0.0, 0.0), (0.5, 0.0), (0.75, 0.25), (0.25, 0.25)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    LargeTriangleA,
    LargeTriangleB,
    MediumTriangle,
    SmallTriangleA,
    SmallTriangleB,
    Square,
    Parallelogram,
}

impl PieceKind {
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::LargeTriangleA,
        PieceKind::LargeTriangleB,
        PieceKind::MediumTriangle,
        PieceKind::SmallTriangleA,
        PieceKind::SmallTriangleB,
        PieceKind::Square,
        PieceKind::Parallelogram,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::LargeTriangleA => "large-triangle-a",
            PieceKind::LargeTriangleB => "large-triangle-b",
            PieceKind::MediumTriangle => "medium-triangle",
            PieceKind::SmallTriangleA => "small-triangle-a",
            PieceKind::SmallTriangleB => "small-triangle-b",
            PieceKind::Square => "square",
            PieceKind::Parallelogram => "parallelogram",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PieceKind::LargeTriangleA => "Large Triangle A",
            PieceKind::LargeTriangleB => "Large Triangle B",
            PieceKind::MediumTriangle => "Medium Triangle",
            PieceKind::SmallTriangleA => "Small Triangle A",
            PieceKind::SmallTriangleB => "Small Triangle B",
            PieceKind::Square => "Square",
            PieceKind::Parallelogram => "Parallelogram",
        }
    }

    /// The parallelogram is the only shape whose mirror image is not one of
    /// its own rotations.
    pub fn is_chiral(self) -> bool {
        matches!(self, PieceKind::Parallelogram)
    }
}

pub fn kind_by_name(name: &str) -> Option<PieceKind> {
    let trimmed = name.trim();
    PieceKind::ALL
        .iter()
        .copied()
        .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
}

/// Fixed vertex list for a kind in canonical (unit) space. The two large
/// triangles share geometry, as do the two small ones; they are distinct
/// catalog entries so a level can require both at once.
pub fn canonical_polygon(kind: PieceKind) -> &'static [(f32, f32)] {
    match kind {
        PieceKind::LargeTriangleA | PieceKind::LargeTriangleB => &LARGE_TRIANGLE,
        PieceKind::MediumTriangle => &MEDIUM_TRIANGLE,
        PieceKind::SmallTriangleA | PieceKind::SmallTriangleB => &SMALL_TRIANGLE,
        PieceKind::Square => &SQUARE,
        PieceKind::Parallelogram => &PARALLELOGRAM,
    }
}

pub fn scale_polygon(polygon: &[(f32, f32)], factor: f32) -> Vec<(f32, f32)> {
    polygon
        .iter()
        .map(|(x, y)| (x * factor, y * factor))
        .collect()
}

pub fn centroid(polygon: &[(f32, f32)]) -> (f32, f32) {
    if polygon.is_empty() {
        return (0.0, 0.0);
    }
    let inv = 1.0 / polygon.len() as f32;
    let (sx, sy) = polygon
        .iter()
        .fold((0.0f32, 0.0f32), |(ax, ay), (x, y)| (ax + x, ay + y));
    (sx * inv, sy * inv)
}

/// Shoelace area, sign-free.
pub fn polygon_area(polygon: &[(f32, f32)]) -> f32 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0f32;
    for i in 0..polygon.len() {
        let (x1, y1) = polygon[i];
        let (x2, y2) = polygon[(i + 1) % polygon.len()];
        sum += x1 * y2 - x2 * y1;
    }
    (sum * 0.5).abs()
}
