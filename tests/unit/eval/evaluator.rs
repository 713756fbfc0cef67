use super::*;
use crate::composition::model::Reel;

const REEL: &str = r##"{
    "video": {
        "canvas": {"width": 1920, "height": 1080},
        "fps": {"num": 30, "den": 1},
        "duration": 600
    },
    "brand": {
        "colors": {"red": "#E1000F", "gold": "#F59E0B"},
        "typography": {"stat": {"font_size": 72, "font_weight": 800}}
    },
    "timing": {
        "scenes": {"open": {"start": 0, "end": 300}, "map": {"start": 285, "end": 600}},
        "cues": {"pin": 330, "count": 300}
    },
    "content": {
        "pins": [{"country": "Egypt", "lat": 30.04, "lng": 31.24}],
        "hub": {"lat": 24.0, "lng": 48.0}
    },
    "assets": {"hero": "photos\\hero.jpg"},
    "map": {"projection": {"kind": "equirectangular", "width": 1920, "height": 1080}},
    "seed": 7,
    "scenes": [
        {
            "id": "map",
            "range": "map",
            "fade_in": 15,
            "z": 1,
            "elements": [
                {
                    "id": "egypt",
                    "kind": {"type": "marker", "color": "red"},
                    "anchor": {"at": "pin", "country": "Egypt"},
                    "appear": "pin",
                    "motions": [{"kind": "pin_drop", "start": "pin"}]
                },
                {
                    "id": "arc",
                    "kind": {"type": "arc", "to": {"at": "pin", "country": "Egypt"}, "color": "gold"},
                    "anchor": {"at": "hub"},
                    "motions": [{"kind": "stroke_draw", "start": 400, "duration": 40}]
                },
                {
                    "id": "share",
                    "kind": {"type": "counter", "style": "stat", "color": "gold", "suffix": "%"},
                    "motions": [{"kind": "counter", "start": "count", "target": 54, "duration": 45}]
                }
            ]
        },
        {
            "id": "open",
            "range": "open",
            "fade_out": 15,
            "elements": [
                {"id": "photo", "kind": {"type": "photo", "asset": "hero"},
                 "motions": [{"kind": "ken_burns", "start": 0, "duration": 300, "mode": "zoom_in"}]},
                {"id": "dust", "kind": {"type": "particles", "color": "gold"}}
            ]
        }
    ]
}"##;

fn reel() -> Reel {
    Reel::from_json_str(REEL).unwrap()
}

#[test]
fn frame_out_of_bounds_is_error() {
    let r = reel();
    assert!(matches!(
        Evaluator::eval_frame(&r, FrameIndex(600)),
        Err(ReelError::Evaluation(_))
    ));
}

#[test]
fn invalid_reel_fails_before_evaluation() {
    let mut r = reel();
    r.timing.cues.remove("pin");
    assert!(matches!(
        Evaluator::eval_frame(&r, FrameIndex(0)),
        Err(ReelError::Validation(_))
    ));
}

#[test]
fn crossfade_overlap_orders_scenes_by_z_then_index() {
    let r = reel();
    let out = Evaluator::eval_frame(&r, FrameIndex(285)).unwrap();
    let ids: Vec<&str> = out.scenes.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["open", "map"]);

    let open = &out.scenes[0];
    let map = &out.scenes[1];
    assert_eq!(open.opacity, 1.0);
    assert!((map.opacity - 1.0).abs() < 1e-12);

    let mid = Evaluator::eval_frame(&r, FrameIndex(292)).unwrap();
    let open_mid = mid.scenes.iter().find(|s| s.id == "open").unwrap();
    assert!((open_mid.opacity - 8.0 / 15.0).abs() < 1e-12);
}

#[test]
fn scene_fades_in_before_its_start() {
    let r = reel();
    let out = Evaluator::eval_frame(&r, FrameIndex(270)).unwrap();
    let map = out.scenes.iter().find(|s| s.id == "map").unwrap();
    assert_eq!(map.opacity, 0.0);
    let out = Evaluator::eval_frame(&r, FrameIndex(269)).unwrap();
    assert!(out.scenes.iter().all(|s| s.id != "map"));
}

#[test]
fn elements_respect_appear_frames() {
    let r = reel();
    let before = Evaluator::eval_frame(&r, FrameIndex(329)).unwrap();
    let map = before.scenes.iter().find(|s| s.id == "map").unwrap();
    assert!(map.elements.iter().all(|e| e.id != "egypt"));

    let at = Evaluator::eval_frame(&r, FrameIndex(330)).unwrap();
    let egypt = at.scenes[0]
        .elements
        .iter()
        .find(|e| e.id == "egypt")
        .unwrap();
    assert_eq!(egypt.opacity, 0.0);
    assert_eq!(egypt.translate.y, -60.0);
    assert_eq!(egypt.scale, 1.3);
    assert_eq!(egypt.color, Some(Rgba8::rgb(0xE1, 0x00, 0x0F)));
}

#[test]
fn counters_carry_value_and_display() {
    let r = reel();
    let out = Evaluator::eval_frame(&r, FrameIndex(345)).unwrap();
    let share = out.scenes.iter().find(|s| s.id == "map").unwrap().elements
        .iter()
        .find(|e| e.id == "share")
        .unwrap();
    assert_eq!(share.value, Some(54.0));
    assert_eq!(share.display.as_deref(), Some("54%"));
    assert_eq!(share.style.as_deref(), Some("stat"));
}

#[test]
fn arcs_use_estimated_length_for_dashes() {
    let r = reel();
    let out = Evaluator::eval_frame(&r, FrameIndex(400)).unwrap();
    let arc = out.scenes[0].elements.iter().find(|e| e.id == "arc").unwrap();
    let geometry = arc.arc.as_ref().unwrap();
    let dash = arc.dash.unwrap();
    assert_eq!(dash.dash_array, geometry.length);
    assert_eq!(dash.dash_offset, geometry.length);
    assert!(geometry.d.starts_with('M'));
    assert_eq!(geometry.from, arc.position);
}

#[test]
fn photos_resolve_normalized_paths_and_particles_are_seeded() {
    let r = reel();
    let out = Evaluator::eval_frame(&r, FrameIndex(150)).unwrap();
    let open = &out.scenes[0];
    let photo = open.elements.iter().find(|e| e.id == "photo").unwrap();
    assert_eq!(photo.asset.as_deref(), Some("photos/hero.jpg"));
    assert!((photo.scale - 1.04).abs() < 1e-12);

    let dust = open.elements.iter().find(|e| e.id == "dust").unwrap();
    assert!(!dust.particles.is_empty());

    let again = Evaluator::eval_frame(&r, FrameIndex(150)).unwrap();
    assert_eq!(out, again);
}
