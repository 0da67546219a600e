use super::*;
use crate::scene::part::LiveState;

fn session(seed: u64) -> Session {
    Session::new(SessionConfig::default(), seed)
}

fn play_through(s: &mut Session, ticks_per_part: usize) -> Score {
    loop {
        for _ in 0..ticks_per_part {
            s.tick();
        }
        if let Advance::Completed { score, .. } = s.advance() {
            return score;
        }
        assert!(s.scene().animating_count() <= 1);
    }
}

#[test]
fn first_click_starts_first_part() {
    let mut s = session(1);
    assert_eq!(s.phase(), SessionPhase::NotStarted);
    assert_eq!(s.status_text(), START_TEXT);
    assert_eq!(s.tick(), None);

    assert_eq!(s.advance(), Advance::Started(PartId::Body));
    assert_eq!(s.phase(), SessionPhase::InProgress);
    assert_eq!(s.active_part(), Some(PartId::Body));
    assert_eq!(s.status_text(), "Body");
    assert_eq!(s.active_ticks(), Some(1));

    let body = s.scene().get(PartId::Body).unwrap();
    assert_eq!(body.live(), LiveState::Animating);
    assert_eq!(body.stroke(), Some(s.accent_color().as_str()));
}

#[test]
fn clicks_walk_parts_in_order() {
    let mut s = session(2);
    s.advance();
    for pair in PartId::ALL.windows(2) {
        assert_eq!(
            s.advance(),
            Advance::Switched {
                frozen: pair[0],
                active: pair[1]
            }
        );
        assert_eq!(s.scene().animating_count(), 1);
    }
    match s.advance() {
        Advance::Completed { frozen, score } => {
            assert_eq!(frozen, PartId::RightEye);
            assert!((0.0..=100.0).contains(&score.overall));
        }
        other => panic!("expected completion, got {other:?}"),
    }
    assert_eq!(s.phase(), SessionPhase::Complete);
    assert_eq!(s.status_text(), FINISH_TEXT);
    assert_eq!(s.scene().frozen_count(), PartId::ALL.len());
    assert_eq!(s.advance(), Advance::AlreadyComplete);
}

#[test]
fn ticks_move_only_the_active_part() {
    let mut s = session(3);
    s.advance();
    let before = s.scene().clone();
    let frame = s.tick().unwrap();
    assert_eq!(s.scene().get(PartId::Body).unwrap().transform(), frame.transform);
    for (a, b) in before.parts().iter().zip(s.scene().parts()).skip(1) {
        assert_eq!(a, b);
    }
}

#[test]
fn frozen_parts_never_move_again() {
    let mut s = session(4);
    s.advance();
    for _ in 0..17 {
        s.tick();
    }
    s.advance();
    let body = s.scene().get(PartId::Body).unwrap().clone();
    assert_eq!(body.live(), LiveState::Frozen);
    assert_eq!(body.stroke(), None);
    for _ in 0..50 {
        s.tick();
    }
    assert_eq!(s.scene().get(PartId::Body).unwrap(), &body);
}

#[test]
fn at_most_one_part_animates_for_any_click_sequence() {
    let mut s = session(5);
    let mut rng = Rng64::new(99);
    for _ in 0..200 {
        match rng.below(4) {
            0 => {
                s.advance();
            }
            1 => s.reset(),
            _ => {
                s.tick();
            }
        }
        assert!(s.scene().animating_count() <= 1);
    }
}

#[test]
fn same_seed_same_play_same_score() {
    let a = play_through(&mut session(6), 11);
    let b = play_through(&mut session(6), 11);
    assert_eq!(a, b);
}

#[test]
fn reset_starts_over_with_idle_parts() {
    let mut s = session(7);
    play_through(&mut s, 5);
    s.reset();
    assert_eq!(s.phase(), SessionPhase::NotStarted);
    assert_eq!(s.score(), None);
    assert_eq!(s.active_part(), None);
    for part in s.scene().parts() {
        assert_eq!(part.live(), LiveState::Idle);
        assert_eq!(part.transform(), crate::scene::transform::Transform::IDENTITY);
        assert_eq!(part.stroke(), None);
    }
}

#[test]
fn reset_mid_play_drops_the_active_task() {
    let mut s = session(8);
    s.advance();
    s.advance();
    s.reset();
    assert_eq!(s.tick(), None);
    assert_eq!(s.scene().animating_count(), 0);
    assert_eq!(s.advance(), Advance::Started(PartId::Body));
}

#[test]
fn accent_is_offset_from_background() {
    let s = session(9);
    let expected = Hue::new(i64::from(s.hue().degrees()) - 90);
    assert_eq!(s.accent_hue(), expected);
    assert_eq!(
        s.background_color(),
        format!("hsl({}, 100%, 70%)", s.hue())
    );
    assert_eq!(s.accent_color(), format!("hsl({expected}, 100%, 40%)"));
}

#[test]
fn restore_reproduces_scene_and_score() {
    let mut s = session(10);
    let score = play_through(&mut s, 23);
    let link = s.share_link().unwrap();

    let restored = Session::restore(SessionConfig::default(), &link, 77).unwrap();
    assert_eq!(restored.phase(), SessionPhase::Complete);
    assert_eq!(restored.hue(), s.hue());
    assert_eq!(restored.scene(), s.scene());
    assert_eq!(restored.score(), Some(&score));
    assert_eq!(restored.background_color(), s.background_color());
}

#[test]
fn reset_after_restore_draws_from_the_given_seed() {
    let mut s = session(13);
    play_through(&mut s, 9);
    let link = s.share_link().unwrap();

    for seed in [1, 2, 3] {
        let mut restored = Session::restore(SessionConfig::default(), &link, seed).unwrap();
        restored.reset();
        let expected = Session::new(SessionConfig::default(), Rng64::new(seed).next_u64());
        assert_eq!(restored.hue(), expected.hue());
        assert_eq!(restored.phase(), SessionPhase::NotStarted);
        assert_eq!(restored.advance(), Advance::Started(PartId::Body));
    }
}

#[test]
fn restoring_a_malformed_stroke_still_renders() {
    let link = "https://example.com/?body%3Astroke=%23%C3%A91&hue=10";
    let restored = Session::restore(SessionConfig::default(), link, 1).unwrap();
    assert_eq!(restored.scene().get(PartId::Body).unwrap().stroke(), None);
    let doc = restored.document();
    assert_eq!(doc.root.find_by_class("body").unwrap().attr("stroke"), None);
    restored.snapshot().unwrap();
}

#[test]
fn snapshot_uses_configured_canvas() {
    let cfg = SessionConfig {
        canvas: crate::foundation::core::Canvas::new(50, 40).unwrap(),
        ..SessionConfig::default()
    };
    let mut s = Session::new(cfg, 11);
    s.advance();
    let snap = s.snapshot().unwrap();
    assert_eq!((snap.width, snap.height), (50, 40));
}

#[test]
fn pending_snapshot_survives_reset() {
    let mut s = session(12);
    play_through(&mut s, 3);
    let expected = s.snapshot().unwrap();
    let pending = s.spawn_snapshot();
    s.reset();
    assert_eq!(pending.wait().unwrap(), expected);
}
