use super::*;

const REEL: &str = r##"{
    "video": {
        "canvas": {"width": 1920, "height": 1080},
        "fps": {"num": 30, "den": 1},
        "duration": 900
    },
    "brand": {
        "colors": {"red": "#E1000F", "white": "#F1F5F9"},
        "typography": {"hero": {"font_size": 84, "font_weight": 700}}
    },
    "timing": {
        "scenes": {"map": {"start": 100, "end": 600}},
        "cues": {"pin": 150}
    },
    "content": {
        "pins": [{"country": "Egypt", "lat": 30.04, "lng": 31.24}],
        "texts": {"title": "This is the GCC."},
        "hub": {"lat": 24.0, "lng": 48.0}
    },
    "assets": {"world": "geo/world-110m.json", "hero": "photos/hero.jpg"},
    "map": {
        "projection": {"kind": "equirectangular", "width": 1920, "height": 1080},
        "topology": "world"
    },
    "scenes": [
        {
            "id": "map",
            "range": "map",
            "fade_in": 20,
            "fade_out": 15,
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
                    "kind": {"type": "arc", "to": {"at": "pin", "country": "Egypt"}, "color": "red"},
                    "anchor": {"at": "hub"},
                    "motions": [{"kind": "stroke_draw", "start": {"cue": "pin", "offset": 10}}]
                },
                {
                    "id": "title",
                    "kind": {"type": "text", "text": {"key": "title"}, "style": "hero", "color": "white"}
                }
            ]
        },
        {
            "id": "hero",
            "range": {"start": 0, "end": 120},
            "elements": [
                {"id": "photo", "kind": {"type": "photo", "asset": "hero"}}
            ]
        }
    ]
}"##;

fn reel() -> Reel {
    Reel::from_json_str(REEL).unwrap()
}

#[test]
fn parses_and_validates() {
    let r = reel();
    r.validate().unwrap();
    assert_eq!(r.scenes.len(), 2);
    assert_eq!(r.timeline().len_frames(), 900);
}

#[test]
fn named_and_inline_ranges_resolve() {
    let r = reel();
    let map = r.scene_range(&r.scenes[0]).unwrap();
    assert_eq!((map.start, map.end), (FrameIndex(100), FrameIndex(600)));
    let window = r.scene_window(&r.scenes[0]).unwrap();
    assert_eq!(window.start, FrameIndex(80));
    assert_eq!(
        r.scene_range(&r.scenes[1]).unwrap().end,
        FrameIndex(120)
    );
}

#[test]
fn anchors_resolve_through_the_map() {
    let r = reel();
    assert_eq!(r.resolve_anchor(&Anchor::Center).unwrap(), Point::new(960.0, 540.0));
    let hub = r.resolve_anchor(&Anchor::Hub).unwrap();
    assert!((hub.x - (48.0 + 180.0) / 360.0 * 1920.0).abs() < 1e-9);
    assert!((hub.y - (90.0 - 24.0) / 180.0 * 1080.0).abs() < 1e-9);
    assert!(
        r.resolve_anchor(&Anchor::Pin {
            country: "Peru".to_string()
        })
        .is_err()
    );
}

#[test]
fn geo_anchors_need_a_map() {
    let mut r = reel();
    r.map = None;
    let err = r.validate().unwrap_err().to_string();
    assert!(err.contains("requires a reel map"), "{err}");
}

#[test]
fn unknown_references_fail_at_startup() {
    let mut r = reel();
    r.timing.cues.clear();
    let err = r.validate().unwrap_err().to_string();
    assert!(err.contains("unknown timing cue 'pin'"), "{err}");

    let mut r = reel();
    r.brand.colors.remove("red");
    assert!(r.validate().is_err());

    let mut r = reel();
    r.assets.0.remove("hero");
    let err = r.validate().unwrap_err().to_string();
    assert!(err.contains("missing asset key 'hero'"), "{err}");

    let mut r = reel();
    r.content.texts.clear();
    assert!(r.validate().is_err());
}

#[test]
fn scene_bounds_and_ids_are_checked() {
    let mut r = reel();
    r.video.duration = FrameIndex(500);
    let err = r.validate().unwrap_err().to_string();
    assert!(err.contains("exceeds reel duration"), "{err}");

    let mut r = reel();
    r.scenes[1].id = "map".to_string();
    assert!(r.validate().is_err());

    let mut r = reel();
    r.scenes[1].fade_out = 500;
    assert!(r.validate().is_err());

    let mut r = reel();
    r.scenes[0].elements[1].id = "egypt".to_string();
    assert!(r.validate().is_err());
}

#[test]
fn appear_after_disappear_is_rejected() {
    let mut r = reel();
    r.scenes[0].elements[0].disappear = Some(FrameRef::Frame(140));
    let err = r.validate().unwrap_err().to_string();
    assert!(err.contains("element 'egypt'"), "{err}");
}

#[test]
fn unknown_element_kind_is_a_parse_error() {
    let doc = REEL.replace(r#""type": "photo""#, r#""type": "video""#);
    assert!(matches!(Reel::from_json_str(&doc), Err(ReelError::Serde(_))));
}

#[test]
fn from_path_reports_missing_files() {
    let err = Reel::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("open reel"), "{err}");
}

#[test]
fn counter_decimals_are_bounded() {
    let counter = |decimals| Element {
        id: "stat".to_string(),
        kind: ElementKind::Counter {
            style: "hero".to_string(),
            color: "red".to_string(),
            decimals,
            suffix: "+".to_string(),
        },
        anchor: Anchor::Center,
        appear: None,
        disappear: None,
        motions: Vec::new(),
    };

    let mut r = reel();
    r.scenes[0].elements.push(counter(MAX_COUNTER_DECIMALS));
    r.validate().unwrap();

    let mut r = reel();
    r.scenes[0].elements.push(counter(7));
    let err = r.validate().unwrap_err().to_string();
    assert!(err.contains("counter decimals must be <= 6"), "{err}");
}
