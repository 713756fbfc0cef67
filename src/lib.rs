//! gcc-reel is a deterministic, frame-driven motion-timing engine for branded promo reels.
//!
//! A reel document declares the video format, brand tables, a timing table, content records and
//! scenes made of elements with declarative motions. Evaluation is a pure function of the frame
//! number: `Reel + FrameIndex -> FrameOutput`, a list of per-element visual properties
//! (opacity, translation, scale, stroke dashes, counter values, projected map positions) that an
//! external compositor draws.
//!
//! # Layers
//!
//! 1. **Motion math**: easing, interpolation, damped springs and the motion helpers
//!    ([`fade_in`], [`make_spring`], [`pin_drop`], [`pulse_ring`], ...). All total and pure.
//! 2. **Geography**: [`Equirectangular`], [`NaturalEarth1`] and [`EqualEarth`] projections and
//!    bowed connection [`Arc`]s.
//! 3. **Reel model**: [`Reel`] with startup validation of every name and frame reference.
//! 4. **Evaluation**: [`Evaluator::eval_frame`] and the range pipeline ([`eval_frames`],
//!    [`eval_to_sink`]) with optional `rayon` parallelism.
//!
//! No pixels are produced and no assets are loaded; asset paths are only validated.
#![forbid(unsafe_code)]

mod animation;
mod composition;
mod config;
mod eval;
mod foundation;
mod geo;
mod render;

pub use animation::anim::{
    Channel, DEFAULT_PATH_LENGTH, ElementState, Motion, SampleCtx, SpringSource, sample_motions,
};
pub use animation::ease::Ease;
pub use animation::interpolate::{Extrapolate, InterpolateOpts, interpolate, ramp};
pub use animation::motion::{
    CIRCULAR_REVEAL_MAX_RADIUS, KenBurns, KenBurnsMode, MAX_COUNTER_DECIMALS, PinDrop, PulseRing,
    ScreenShake, StrokeDash, animated_gradient_angle, blur_transition, circular_reveal,
    counter_animate, crossfade, drifting_orb, fade_in, fade_out, format_counter, ken_burns,
    pin_drop, pulse_ring, scale_in, scale_pulse, screen_shake, slide_up_in, staggered_start,
    stroke_draw, twinkle,
};
pub use animation::particles::{PARTICLE_REST_FRAMES, Particle, ParticleField};
pub use animation::spring::{
    SPRING_REST_THRESHOLD, SpringConfig, SpringOpts, SpringPreset, make_spring, measure_spring,
    spring, spring_with,
};
pub use composition::dsl::{ElementBuilder, ReelBuilder, SceneBuilder};
pub use composition::model::{
    Anchor, Element, ElementKind, MapSpec, Reel, Scene, SceneRange, TextSource, VideoSpec,
};
pub use config::assets::{AssetCatalog, normalize_rel_path};
pub use config::brand::{Brand, TypeStyle};
pub use config::content::{Content, Country, NationalityPin, SummaryStat, TeamMember};
pub use config::timing::{FrameRef, TimingTable};
pub use eval::evaluator::{ArcFrame, ElementFrame, Evaluator, FrameOutput, SceneFrame};
pub use eval::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rgba8, Vec2};
pub use foundation::error::{ReelError, ReelResult};
pub use foundation::math::{clamp01, inverse_lerp, lerp};
pub use geo::arc::{ARC_BOW, ARC_LENGTH_FACTOR, Arc};
pub use geo::projection::{
    EqualEarth, Equirectangular, LatLng, NaturalEarth1, Projection, ProjectionSpec,
};
pub use render::pipeline::{EvalStats, EvalThreading, eval_frames, eval_to_sink};
pub use render::sink::{FrameSink, InMemorySink, JsonLinesSink, SinkConfig};
