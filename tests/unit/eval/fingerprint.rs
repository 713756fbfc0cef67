use super::*;
use crate::{
    eval::evaluator::SceneFrame,
    foundation::core::{FrameIndex, Vec2},
};

fn element(opacity: f64) -> ElementFrame {
    ElementFrame {
        id: "pin".to_string(),
        kind: "marker",
        opacity,
        translate: Vec2::ZERO,
        scale: 1.0,
        position: Point::new(10.0, 20.0),
        color: None,
        style: None,
        text: None,
        asset: None,
        radius: None,
        dash: None,
        value: None,
        display: None,
        blur: None,
        gradient_angle: None,
        drift: None,
        rotation: None,
        reveal: None,
        particles: Vec::new(),
        arc: None,
    }
}

fn frame(index: u64, opacity: f64) -> FrameOutput {
    FrameOutput {
        frame: FrameIndex(index),
        scenes: vec![SceneFrame {
            id: "map".to_string(),
            z: 0,
            opacity: 1.0,
            elements: vec![element(opacity)],
        }],
    }
}

#[test]
fn identical_content_on_different_frames_matches() {
    assert_eq!(
        fingerprint_frame(&frame(1, 0.5)),
        fingerprint_frame(&frame(99, 0.5))
    );
}

#[test]
fn any_channel_change_changes_fingerprint() {
    let base = fingerprint_frame(&frame(1, 0.5));
    assert_ne!(base, fingerprint_frame(&frame(1, 0.6)));

    let mut f = frame(1, 0.5);
    f.scenes[0].elements[0].radius = Some(8.0);
    assert_ne!(base, fingerprint_frame(&f));

    let mut f = frame(1, 0.5);
    f.scenes[0].elements[0].text = Some(String::new());
    assert_ne!(base, fingerprint_frame(&f));

    let mut f = frame(1, 0.5);
    f.scenes.clear();
    assert_ne!(base, fingerprint_frame(&f));
}

#[test]
fn halves_are_independent() {
    let fp = fingerprint_frame(&frame(1, 0.5));
    assert_ne!(fp.hi, fp.lo);
}
