use super::*;
use crate::{
    animation::anim::Motion,
    composition::{
        dsl::{ElementBuilder, ReelBuilder, SceneBuilder},
        model::ElementKind,
    },
    config::{brand::Brand, timing::FrameRef},
    foundation::core::{Canvas, Fps, Rgba8},
    render::sink::InMemorySink,
};

fn reel() -> Reel {
    let mut brand = Brand::default();
    brand.colors.insert("gold".to_string(), Rgba8::rgb(0xF5, 0x9E, 0x0B));

    let ring = ElementBuilder::new(
        "ring",
        ElementKind::Ring {
            color: "gold".to_string(),
        },
    )
    .motion(Motion::FadeIn {
        start: FrameRef::Frame(10),
        duration: 10.0,
    })
    .motion(Motion::PulseRing {
        start: FrameRef::Frame(10),
        loop_duration: 60.0,
        min_radius: 6.0,
        max_radius: 22.0,
    })
    .disappear(FrameRef::Frame(40))
    .build()
    .unwrap();

    let dust = ElementBuilder::new(
        "dust",
        ElementKind::Particles {
            color: "gold".to_string(),
            field: Default::default(),
        },
    )
    .appear(FrameRef::Frame(50))
    .build()
    .unwrap();

    let scene = SceneBuilder::new(
        "s",
        FrameRange::new(FrameIndex(0), FrameIndex(100)).unwrap(),
    )
    .element(ring)
    .element(dust)
    .build()
    .unwrap();

    ReelBuilder::new(
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 640,
            height: 360,
        },
        FrameIndex(100),
    )
    .seed(9)
    .brand(brand)
    .scene(scene)
    .build()
    .unwrap()
}

fn range(a: u64, b: u64) -> FrameRange {
    FrameRange::new(FrameIndex(a), FrameIndex(b)).unwrap()
}

#[test]
fn serial_and_parallel_produce_identical_frames() {
    let r = reel();
    let (serial, s_stats) = eval_frames(&r, range(0, 100), &EvalThreading::default()).unwrap();
    let (parallel, p_stats) = eval_frames(
        &r,
        range(0, 100),
        &EvalThreading {
            parallel: true,
            chunk_size: 7,
            threads: Some(3),
            static_frame_elision: false,
        },
    )
    .unwrap();
    assert_eq!(serial, parallel);
    assert_eq!(s_stats, p_stats);
    assert_eq!(s_stats.frames_total, 100);
    let frames: Vec<u64> = serial.iter().map(|f| f.frame.0).collect();
    assert_eq!(frames, (0..100).collect::<Vec<_>>());
}

#[test]
fn static_frames_are_counted_as_elided() {
    let r = reel();
    let (_, stats) = eval_frames(
        &r,
        range(0, 10),
        &EvalThreading {
            static_frame_elision: true,
            ..EvalThreading::default()
        },
    )
    .unwrap();
    // Before the fade starts every frame is identical.
    assert_eq!(stats.frames_total, 10);
    assert_eq!(stats.frames_distinct, 1);
    assert_eq!(stats.frames_elided, 9);
}

#[test]
fn range_bounds_are_checked() {
    let r = reel();
    assert!(eval_frames(&r, range(5, 5), &EvalThreading::default()).is_err());
    assert!(eval_frames(&r, range(0, 101), &EvalThreading::default()).is_err());
    let zero_threads = EvalThreading {
        parallel: true,
        threads: Some(0),
        ..EvalThreading::default()
    };
    assert!(eval_frames(&r, range(0, 10), &zero_threads).is_err());
}

#[test]
fn sink_receives_frames_in_order_with_config() {
    let r = reel();
    let mut sink = InMemorySink::new();
    let stats = eval_to_sink(
        &r,
        range(20, 60),
        &EvalThreading {
            parallel: true,
            chunk_size: 16,
            threads: Some(2),
            static_frame_elision: true,
        },
        &mut sink,
    )
    .unwrap();
    assert_eq!(stats.frames_total, 40);
    assert_eq!(sink.frames().len(), 40);
    assert_eq!(sink.config().unwrap().range, range(20, 60));
    for (i, (idx, frame)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, 20 + i as u64);
        assert_eq!(frame.frame, *idx);
    }
}

#[test]
fn without_elision_every_frame_is_distinct() {
    let r = reel();
    let (frames, stats) = eval_frames(&r, range(0, 10), &EvalThreading::default()).unwrap();
    assert_eq!(frames.len(), 10);
    assert_eq!(stats.frames_distinct, 10);
    assert_eq!(stats.frames_elided, 0);
}
