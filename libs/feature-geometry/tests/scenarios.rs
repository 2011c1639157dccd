//! End-to-end scenarios over the public API.

use approx::assert_relative_eq;
use feature_geometry::contour::{bulge_to_arc_midpoint, compute_bounds, count_self_intersections, is_closed};
use feature_geometry::placement::resolve_depth;
use feature_geometry::{
    apply_features, CutHandler, FaceLabel, FeatureCategory, FeatureParams, FeatureState,
    GeometryService, HandlerRegistry, NormalizedFeature, ProfileDimensions, ProfileElement,
    ProfileKind,
};
use glam::{DVec2, DVec3};
use profile_mesh::primitives::create_box_between;

fn pts(raw: &[[f64; 2]]) -> Vec<DVec2> {
    raw.iter().map(|p| DVec2::from_array(*p)).collect()
}

fn beam(web_thickness: f64) -> ProfileElement {
    ProfileElement::new(
        "B1",
        ProfileKind::IBeam,
        ProfileDimensions {
            length: 1000.0,
            height: 200.0,
            width: 100.0,
            web_thickness,
            flange_thickness: 15.0,
            root_radius: None,
        },
    )
}

fn cut(id: &str, raw: &[[f64; 2]]) -> NormalizedFeature {
    NormalizedFeature::new(id, FeatureCategory::Cut, "web", FeatureParams::contour(pts(raw)))
}

// =============================================================================
// CONTOUR KERNEL
// =============================================================================

#[test]
fn bounds_of_unit_square() {
    let b = compute_bounds(&pts(&[[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]]));
    assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (0.0, 100.0, 0.0, 100.0));
    assert_eq!((b.width, b.height, b.center_x, b.center_y), (100.0, 100.0, 50.0, 50.0));
}

#[test]
fn bulge_midpoint() {
    let mid = bulge_to_arc_midpoint(DVec2::ZERO, DVec2::new(100.0, 0.0), 0.5).unwrap();
    assert_relative_eq!(mid.x, 50.0, epsilon = 1e-6);
    assert_relative_eq!(mid.y, 25.0, epsilon = 1e-6);
    assert!(bulge_to_arc_midpoint(DVec2::ZERO, DVec2::new(100.0, 0.0), 0.0).is_none());
}

#[test]
fn self_intersections() {
    let square = pts(&[[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]]);
    let bowtie = pts(&[[0.0, 0.0], [100.0, 100.0], [100.0, 0.0], [0.0, 100.0]]);
    assert_eq!(count_self_intersections(&square), 0);
    assert!(count_self_intersections(&bowtie) >= 1);
}

#[test]
fn closure_needs_three_points() {
    assert!(!is_closed(&pts(&[[0.0, 0.0], [0.0, 0.0]]), 1e-6));
    assert!(is_closed(&pts(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 0.0]]), 1e-6));
    assert!(!is_closed(&pts(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]), 1e-6));
}

#[test]
fn face_depths() {
    let dims = beam(10.0).dimensions;
    assert_eq!(resolve_depth(FaceLabel::Web, &dims), 10.0);
    assert_eq!(resolve_depth(FaceLabel::TopFlange, &dims), 15.0);
}

// =============================================================================
// DISPATCH
// =============================================================================

#[test]
fn cut_like_features_always_find_a_handler() {
    let registry = HandlerRegistry::with_default_handlers();
    let element = beam(10.0);
    let shapes: [&[[f64; 2]]; 4] = [
        &[],
        &[[5.0, 5.0]],
        &[[0.0, 0.0], [10.0, 10.0]],
        &[[0.0, 0.0], [100.0, 100.0], [100.0, 0.0], [0.0, 100.0]],
    ];

    for category in [FeatureCategory::Cut, FeatureCategory::Notch, FeatureCategory::Groove] {
        for raw in shapes {
            let feature = NormalizedFeature::new(
                "x",
                category.clone(),
                "nowhere",
                FeatureParams::contour(pts(raw)),
            );
            assert!(
                registry.dispatch(&category, &feature, &element).is_some(),
                "{category} with {} points",
                raw.len()
            );
        }
    }
}

#[test]
fn scenario_a_rectangular_cut_on_web() {
    let registry = HandlerRegistry::with_default_handlers();
    let element = beam(10.0);
    let feature = cut("A", &[[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]]);

    let handler = registry.dispatch(&FeatureCategory::Cut, &feature, &element).unwrap();
    assert_eq!(handler.name(), "rectangular-cut");
    assert!(handler.validate(&feature, &element).is_valid());

    let metadata = handler.generate_metadata(&feature, &element);
    assert_eq!(metadata.summary.depth, 10.0);

    let mesh = handler
        .create_cut_geometry(&feature, &element, &GeometryService::default())
        .unwrap();
    let (min, max) = mesh.bounding_box();
    assert_relative_eq!((min.x + max.x) / 2.0, 50.0, epsilon = 1e-9);
    assert_relative_eq!((min.y + max.y) / 2.0, 50.0, epsilon = 1e-9);
}

const END_NOTCHES: [[f64; 2]; 9] = [
    [0.0, 0.0],
    [1000.0, 0.0],
    [1000.0, 150.0],
    [900.0, 150.0],
    [900.0, 200.0],
    [100.0, 200.0],
    [100.0, 150.0],
    [0.0, 150.0],
    [0.0, 0.0],
];

#[test]
fn scenario_b_partial_notch_beats_generic_notch() {
    let registry = HandlerRegistry::with_default_handlers();
    let element = beam(8.6);
    let feature = cut("B", &END_NOTCHES);

    let handler = registry.dispatch(&FeatureCategory::Cut, &feature, &element).unwrap();
    assert_eq!(handler.name(), "partial-notch");
    assert_eq!(handler.priority(), 100);
    assert_eq!(handler.detected_subtype(&feature, &element), "end-notch-2");

    let mesh = handler
        .create_cut_geometry(&feature, &element, &GeometryService::default())
        .unwrap();
    assert_eq!(mesh.vertex_count(), 16);
    assert_eq!(mesh.triangle_count(), 24);
    assert!(mesh.vertices().iter().all(|v| v.x <= 100.0 + 1e-9 || v.x >= 900.0 - 1e-9));
    assert!(mesh.vertices().iter().any(|v| v.x < 0.0));
    assert!(mesh.vertices().iter().any(|v| v.x > 1000.0));
    assert!(mesh.vertices().iter().all(|v| v.y >= 150.0 - 1e-9));
}

// =============================================================================
// BATCH EXECUTION
// =============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn solid_block(element: &ProfileElement) -> profile_mesh::Mesh {
    let d = element.dimensions;
    create_box_between(
        DVec3::new(0.0, 0.0, -d.width / 2.0),
        DVec3::new(d.length, d.height, d.width / 2.0),
    )
    .unwrap()
}

#[test]
fn notched_beam_loses_both_corners() {
    init_tracing();
    let element = beam(8.6);
    let base = solid_block(&element);
    let before = base.signed_volume();

    let result = apply_features(base, &element, &[cut("B", &END_NOTCHES)]);
    assert_eq!(result.applied_count(), 1);

    // Two 100 x 50 corners through the full width
    let removed = before - result.mesh.signed_volume();
    assert_relative_eq!(removed, 2.0 * 100.0 * 50.0 * 100.0, max_relative = 1e-6);
    assert_eq!(
        result.reports[0].metadata.as_ref().map(|m| m.handler_name.as_str()),
        Some("partial-notch")
    );
}

#[test]
fn one_bad_feature_does_not_stop_the_batch() {
    init_tracing();
    let element = beam(10.0);
    let features = vec![
        cut("good", &[[200.0, 50.0], [260.0, 50.0], [260.0, 110.0], [200.0, 110.0]]),
        NormalizedFeature::new(
            "nan",
            FeatureCategory::Cut,
            "web",
            FeatureParams::contour(pts(&[[0.0, 0.0], [f64::NAN, 1.0], [3.0, 3.0]])),
        ),
        NormalizedFeature::new(
            "hole",
            FeatureCategory::Hole,
            "web",
            FeatureParams::Hole {
                center: DVec2::new(500.0, 100.0),
                diameter: 22.0,
                depth: None,
                elongation: 0.0,
            },
        ),
    ];

    let base = solid_block(&element);
    let before = base.signed_volume();
    let result = apply_features(base, &element, &features);
    assert_eq!(result.reports.len(), 3);
    assert_eq!(result.applied_count(), 2);
    assert!(result.reports[0].is_applied());
    assert!(!result.reports[1].is_applied());
    assert!(result.reports[2].is_applied());
    assert!(matches!(
        result.reports[1].state(),
        FeatureState::Rejected { .. } | FeatureState::Skipped { .. }
    ));
    assert!(result.mesh.signed_volume() < before);
}

#[test]
fn drilled_plate_applies_every_hole() {
    init_tracing();
    let element = ProfileElement::new(
        "P1",
        ProfileKind::Plate,
        ProfileDimensions {
            length: 1000.0,
            height: 200.0,
            width: 10.0,
            web_thickness: 10.0,
            flange_thickness: 10.0,
            root_radius: None,
        },
    );
    let holes: Vec<_> = (0..10)
        .flat_map(|i| [40.0, 80.0, 120.0, 160.0].map(move |y| (i, y)))
        .map(|(i, y)| {
            NormalizedFeature::new(
                format!("h{i}-{y}"),
                FeatureCategory::Hole,
                "web",
                FeatureParams::Hole {
                    center: DVec2::new(50.0 + 100.0 * i as f64, y),
                    diameter: 12.0,
                    depth: None,
                    elongation: 0.0,
                },
            )
        })
        .collect();
    assert_eq!(holes.len(), 40);

    let base = solid_block(&element);
    let before = base.signed_volume();
    let result = apply_features(base, &element, &holes);
    assert_eq!(result.applied_count(), 40);

    // Faceted holes remove slightly less than the round ones
    let removed = before - result.mesh.signed_volume();
    let round = 40.0 * std::f64::consts::PI * 36.0 * 10.0;
    assert!(removed > 0.95 * round && removed < round, "removed {removed}");
    assert!(result.mesh.triangle_count() < 40_000);
}

#[test]
fn reports_serialize_for_downstream() {
    let element = beam(10.0);
    let result = apply_features(
        solid_block(&element),
        &element,
        &[cut("A", &[[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]])],
    );
    let json = serde_json::to_value(&result.reports).unwrap();
    assert_eq!(json[0]["metadata"]["handler_name"], "rectangular-cut");
    assert_eq!(json[0]["metadata"]["detected_subtype"], "rectangular");
    assert_eq!(json[0]["metadata"]["summary"]["face"], "Web");
}
