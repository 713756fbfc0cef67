use super::*;
use crate::foundation::core::FrameIndex;

fn table() -> TimingTable {
    let mut t = TimingTable::default();
    t.scenes.insert(
        "map".to_string(),
        FrameRange::new(FrameIndex(660), FrameIndex(2010)).unwrap(),
    );
    t.cues.insert("ksa_pin_drop".to_string(), 765);
    t
}

#[test]
fn resolves_literal_cue_and_offset_refs() {
    let t = table();
    assert_eq!(t.resolve(&FrameRef::Frame(12)).unwrap(), 12);
    assert_eq!(t.resolve(&"ksa_pin_drop".into()).unwrap(), 765);
    assert_eq!(t.resolve(&FrameRef::offset("ksa_pin_drop", 15)).unwrap(), 780);
    assert_eq!(t.resolve(&FrameRef::offset("ksa_pin_drop", -800)).unwrap(), -35);
}

#[test]
fn unknown_names_are_validation_errors() {
    let t = table();
    assert!(matches!(
        t.resolve(&"nope".into()),
        Err(ReelError::Validation(_))
    ));
    assert!(t.scene("nope").is_err());
    assert_eq!(t.scene("map").unwrap().len_frames(), 1350);
}

#[test]
fn frame_refs_deserialize_from_all_forms() {
    let refs: Vec<FrameRef> =
        serde_json::from_str(r#"[765, "ksa_pin_drop", {"cue": "ksa_pin_drop", "offset": 9}]"#)
            .unwrap();
    assert_eq!(
        refs,
        vec![
            FrameRef::Frame(765),
            FrameRef::Cue("ksa_pin_drop".to_string()),
            FrameRef::offset("ksa_pin_drop", 9),
        ]
    );
}

#[test]
fn inverted_scene_ranges_fail_validation() {
    let mut t = table();
    assert!(t.validate().is_ok());
    t.scenes.insert(
        "broken".to_string(),
        FrameRange {
            start: FrameIndex(10),
            end: FrameIndex(5),
        },
    );
    assert!(t.validate().is_err());
}
