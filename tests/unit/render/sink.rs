use super::*;

fn empty(frame: u64) -> FrameOutput {
    FrameOutput {
        frame: FrameIndex(frame),
        scenes: Vec::new(),
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        canvas: Canvas {
            width: 16,
            height: 9,
        },
        fps: Fps::new(30, 1).unwrap(),
        range: FrameRange::new(FrameIndex(0), FrameIndex(3)).unwrap(),
    }
}

#[test]
fn json_lines_writes_one_object_per_frame() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &empty(0)).unwrap();
    sink.push_repeat(FrameIndex(1), FrameIndex(0), &empty(1)).unwrap();
    sink.push_frame(FrameIndex(2), &empty(2)).unwrap();
    sink.end().unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"frame":0,"scenes":[]}"#,
            r#"{"frame":1,"repeat_of":0}"#,
            r#"{"frame":2,"scenes":[]}"#,
        ]
    );
}

#[test]
fn json_lines_rejects_out_of_order_frames() {
    let mut sink = JsonLinesSink::new(Vec::new());
    assert!(sink.push_frame(FrameIndex(0), &empty(0)).is_err());
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(1), &empty(1)).unwrap();
    assert!(sink.push_frame(FrameIndex(1), &empty(1)).is_err());
}

#[test]
fn in_memory_sink_expands_repeats() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &empty(0)).unwrap();
    sink.push_repeat(FrameIndex(1), FrameIndex(0), &empty(1)).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].1.frame, FrameIndex(1));
}
