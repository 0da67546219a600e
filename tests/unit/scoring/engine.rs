use super::*;
use crate::scene::{
    model::Scene,
    part::{Part, PartId},
    transform::{Origin, Transform},
};

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

fn frozen_scene(placements: &[(Transform, f64)]) -> Scene {
    Scene::from_parts(
        placements
            .iter()
            .zip(PartId::ALL)
            .map(|((t, ox), id)| Part::frozen(id, *t, Origin { x: *ox, y: 40.0 }))
            .collect(),
    )
}

fn t(x: f64, y: f64, scale: f64, rotate: f64) -> Transform {
    Transform {
        translate_x: x,
        translate_y: y,
        scale,
        rotate,
    }
}

#[test]
fn identical_parts_score_one_hundred() {
    let same = (t(12.0, -30.0, 2.7, 99.0), 53.0);
    let scene = frozen_scene(&[same; 6]);
    let s = score(scene.frozen().unwrap());
    assert_eq!(s.overall, 100.0);
    for dim in Dimension::ALL {
        approx(s.dimension(dim).unwrap(), 100.0);
    }
}

#[test]
fn single_part_scores_one_hundred() {
    let scene = frozen_scene(&[(t(-64.0, 64.0, 5.5, 359.0), 45.0)]);
    assert_eq!(score(scene.frozen().unwrap()).overall, 100.0);
}

#[test]
fn scoring_is_deterministic() {
    let scene = frozen_scene(&[
        (t(1.0, 2.0, 0.5, 10.0), 50.0),
        (t(-40.0, 22.0, 3.1, 200.0), 55.0),
        (t(63.0, -7.0, 1.9, 300.0), 52.0),
        (t(5.0, 9.0, 4.4, 45.0), 51.0),
    ]);
    let a = score(scene.frozen().unwrap());
    let b = score(scene.frozen().unwrap());
    assert_eq!(a, b);
}

#[test]
fn offsets_score_against_their_median() {
    let s = dimension_score(Dimension::X, &[0.0, 64.0, -64.0]);
    approx(s, (100.0 + 50.0 + 50.0) / 3.0);

    // Even-length series use the mean of the middle pair.
    let s = dimension_score(Dimension::Scale, &[1.0, 2.0, 3.0, 4.0]);
    // median 2.5: distances 1.5, 0.5, 0.5, 1.5 over range 5.
    approx(s, (70.0 + 90.0 + 90.0 + 70.0) / 4.0);
}

#[test]
fn rotation_uses_shortest_angular_distance() {
    // median 10: distances 10, 0, 20 (350 is 20 degrees away, not 340).
    let s = dimension_score(Dimension::Rotation, &[0.0, 10.0, 350.0]);
    let expected = ((100.0 - 10.0 / 1.8) + 100.0 + (100.0 - 20.0 / 1.8)) / 3.0;
    approx(s, expected);

    // Opposite headings are maximally dissimilar.
    approx(dimension_score(Dimension::Rotation, &[0.0, 180.0]), 50.0);
}

#[test]
fn outliers_clamp_at_zero() {
    let components = ScoreComponents {
        x: vec![0.0, 0.0, 300.0],
        ..ScoreComponents::default()
    };
    let s = score_components(&components);
    approx(s.dimension(Dimension::X).unwrap(), 200.0 / 3.0);
    approx(s.dimension(Dimension::Y).unwrap(), 100.0);
    // (66.67 + 4 * 100) / 5 = 93.33
    assert_eq!(s.overall, 93.3);
    for (_, v) in &s.dimensions {
        assert!((0.0..=100.0).contains(v));
    }
}

#[test]
fn farthest_legal_sample_scores_zero_not_negative() {
    approx(dimension_score(Dimension::X, &[-64.0, -64.0, 64.0]), 200.0 / 3.0);
    approx(dimension_score(Dimension::OriginX, &[45.0, 55.0, 55.0]), 200.0 / 3.0);
}

#[test]
fn components_follow_part_order() {
    let scene = frozen_scene(&[(t(1.0, 2.0, 3.0, 4.0), 50.0), (t(5.0, 6.0, 0.5, 8.0), 54.0)]);
    let c = ScoreComponents::from_frozen(scene.frozen().unwrap());
    assert_eq!(c.x, vec![1.0, 5.0]);
    assert_eq!(c.y, vec![2.0, 6.0]);
    assert_eq!(c.scale, vec![3.0, 0.5]);
    assert_eq!(c.rotation, vec![4.0, 8.0]);
    assert_eq!(c.origin_x, vec![50.0, 54.0]);
    assert_eq!(c.series(Dimension::OriginX), &[50.0, 54.0]);
}
