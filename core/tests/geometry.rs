use proptest::prelude::*;
use tanguramu_core::catalog::{self, PieceKind};
use tanguramu_core::game::{
    Aabb, Transform, angular_distance, normalize_angle, piece_edges, scatter_positions,
    world_vertices,
};
use tanguramu_core::{to_canvas, to_percent};

const EPS: f32 = 1e-4;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

#[test]
fn percent_to_canvas_concrete() {
    assert_eq!(to_canvas(50.0, 50.0, 768.0, 1024.0), (384.0, 512.0));
    assert_eq!(to_canvas(0.0, 100.0, 768.0, 1024.0), (0.0, 1024.0));
}

#[test]
fn percent_round_trip_concrete() {
    let (x, y) = to_percent(to_canvas(15.0, 15.0, 768.0, 1024.0), 768.0, 1024.0);
    assert!(close(x, 15.0));
    assert!(close(y, 15.0));
}

proptest! {
    #[test]
    fn percent_round_trip(
        x in 0.0f32..=100.0,
        y in 0.0f32..=100.0,
        w in 1.0f32..=4096.0,
        h in 1.0f32..=4096.0,
    ) {
        let (px, py) = to_percent(to_canvas(x, y, w, h), w, h);
        prop_assert!((px - x).abs() < 1e-3);
        prop_assert!((py - y).abs() < 1e-3);
    }
}

#[test]
fn canonical_areas_partition_unit_square() {
    let area = |kind| catalog::polygon_area(catalog::canonical_polygon(kind));
    let large = area(PieceKind::LargeTriangleA);
    let medium = area(PieceKind::MediumTriangle);
    let small = area(PieceKind::SmallTriangleA);
    let square = area(PieceKind::Square);
    let parallelogram = area(PieceKind::Parallelogram);

    assert!(close(large, 2.0 * medium));
    assert!(close(large, 4.0 * small));
    assert!(close(large, 2.0 * square));
    assert!(close(large, 2.0 * parallelogram));

    let total: f32 = PieceKind::ALL.iter().map(|kind| area(*kind)).sum();
    assert!(close(total, 1.0));
}

#[test]
fn large_triangle_hypotenuse_spans_unit_square() {
    let polygon = catalog::canonical_polygon(PieceKind::LargeTriangleA);
    let dx = polygon[1].0 - polygon[2].0;
    let dy = polygon[1].1 - polygon[2].1;
    assert!(close((dx * dx + dy * dy).sqrt(), 1.0));
}

#[test]
fn identical_geometry_for_paired_kinds() {
    assert_eq!(
        catalog::canonical_polygon(PieceKind::LargeTriangleA),
        catalog::canonical_polygon(PieceKind::LargeTriangleB)
    );
    assert_eq!(
        catalog::canonical_polygon(PieceKind::SmallTriangleA),
        catalog::canonical_polygon(PieceKind::SmallTriangleB)
    );
}

#[test]
fn only_parallelogram_is_chiral() {
    for kind in PieceKind::ALL {
        assert_eq!(kind.is_chiral(), kind == PieceKind::Parallelogram);
    }
}

#[test]
fn kind_lookup_trims_and_ignores_case() {
    assert_eq!(catalog::kind_by_name(" Square "), Some(PieceKind::Square));
    assert_eq!(
        catalog::kind_by_name("SMALL-TRIANGLE-B"),
        Some(PieceKind::SmallTriangleB)
    );
    assert_eq!(catalog::kind_by_name("pentagon"), None);
}

#[test]
fn scale_and_centroid() {
    let polygon = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
    let scaled = catalog::scale_polygon(&polygon, 0.5);
    assert_eq!(scaled, vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let (cx, cy) = catalog::centroid(&polygon);
    assert!(close(cx, 1.0));
    assert!(close(cy, 1.0));
}

#[test]
fn angular_distance_is_symmetric_across_zero() {
    assert!(close(angular_distance(350.0, 10.0), 20.0));
    assert!(close(angular_distance(10.0, 350.0), 20.0));
    assert!(close(angular_distance(180.0, 0.0), 180.0));
}

#[test]
fn normalize_angle_wraps_negatives() {
    assert!(close(normalize_angle(-90.0), 270.0));
    assert!(close(normalize_angle(720.0), 0.0));
    assert!(close(normalize_angle(359.5), 359.5));
}

#[test]
fn world_vertices_rotate_about_origin_then_translate() {
    let transform = Transform::new(10.0, 20.0, 90.0, false);
    let vertices = world_vertices(PieceKind::MediumTriangle, &transform, 2.0);
    // canonical (0.5, 0) scaled to (1, 0), rotated 90 -> (0, 1), translated.
    assert!(close(vertices[1].0, 10.0));
    assert!(close(vertices[1].1, 21.0));
}

#[test]
fn mirror_negates_x_before_rotation() {
    let mirrored = Transform::new(0.0, 0.0, 90.0, true);
    let vertices = world_vertices(PieceKind::Parallelogram, &mirrored, 1.0);
    // canonical (0.5, 0) mirrors to (-0.5, 0), then rotates 90 -> (0, -0.5).
    assert!(close(vertices[1].0, 0.0));
    assert!(close(vertices[1].1, -0.5));
}

#[test]
fn edges_wrap_and_carry_midpoints() {
    let vertices = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
    let edges = piece_edges(&vertices);
    assert_eq!(edges.len(), 4);
    assert_eq!(edges[0].midpoint, (2.0, 0.0));
    assert!(close(edges[0].angle_deg, 0.0));
    assert!(close(edges[0].length, 4.0));
    // wrapping edge: last vertex back to the first.
    assert_eq!(edges[3].start, (0.0, 4.0));
    assert_eq!(edges[3].end, (0.0, 0.0));
    assert!(close(edges[3].angle_deg, 270.0));
}

#[test]
fn aabb_overlap_is_strict() {
    let a = Aabb::from_points(&[(0.0, 0.0), (10.0, 10.0)]);
    let touching = Aabb::from_points(&[(10.0, 0.0), (20.0, 10.0)]);
    let overlapping = Aabb::from_points(&[(9.0, 9.0), (20.0, 20.0)]);
    let apart = Aabb::from_points(&[(11.0, 11.0), (20.0, 20.0)]);
    assert!(!a.intersects(&touching));
    assert!(a.intersects(&overlapping));
    assert!(!a.intersects(&apart));
}

#[test]
fn scatter_is_deterministic_and_stays_inside() {
    let first = scatter_positions(42, 7, 800.0, 600.0);
    let second = scatter_positions(42, 7, 800.0, 600.0);
    let other = scatter_positions(43, 7, 800.0, 600.0);
    assert_eq!(first, second);
    assert_ne!(first, other);
    let margin = 600.0 * 0.05;
    for (x, y) in first {
        assert!(x >= margin && x <= 800.0 - margin);
        assert!(y >= margin && y <= 600.0 - margin);
    }
}
