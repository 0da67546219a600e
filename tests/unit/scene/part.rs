use super::*;

#[test]
fn keys_round_trip_and_are_unique() {
    for id in PartId::ALL {
        assert_eq!(PartId::from_key(id.key()), Some(id));
    }
    assert_eq!(PartId::from_key("tail"), None);
    let mut keys: Vec<&str> = PartId::ALL.iter().map(|id| id.key()).collect();
    keys.dedup();
    assert_eq!(keys.len(), PartId::ALL.len());
}

#[test]
fn new_part_is_idle_and_neutral() {
    let p = Part::new(PartId::Nose);
    assert_eq!(p.live(), LiveState::Idle);
    assert_eq!(p.transform(), Transform::IDENTITY);
    assert_eq!(p.origin(), Origin::CENTER);
    assert_eq!(p.stroke(), None);
}

#[test]
fn lifecycle_highlights_then_clears_stroke() {
    let mut p = Part::new(PartId::Body);
    p.activate("hsl(0, 100%, 40%)".to_string());
    assert_eq!(p.live(), LiveState::Animating);
    assert_eq!(p.stroke(), Some("hsl(0, 100%, 40%)"));

    let frame = crate::animation::waveform::WaveformState::new(0, 0, 0, 0, 0).render();
    p.apply(frame);
    assert_eq!(p.transform(), frame.transform);
    assert_eq!(p.origin(), frame.origin);

    p.freeze();
    assert_eq!(p.live(), LiveState::Frozen);
    assert_eq!(p.stroke(), None);
    assert_eq!(p.transform(), frame.transform);
}
