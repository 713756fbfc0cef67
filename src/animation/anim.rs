use crate::{
    animation::{
        ease::Ease,
        interpolate::{Extrapolate, InterpolateOpts, interpolate},
        motion::{self, KenBurnsMode, StrokeDash},
        spring::{SpringConfig, SpringOpts, SpringPreset, spring_with},
    },
    config::timing::{FrameRef, TimingTable},
    foundation::{
        core::{FrameIndex, Fps, Point, Vec2},
        error::{ReelError, ReelResult},
    },
};

/// Path length assumed by `stroke_draw` when neither the motion nor the element supplies one.
pub const DEFAULT_PATH_LENGTH: f64 = 1000.0;

#[derive(Clone, Copy, Debug)]
pub struct SampleCtx {
    pub frame: FrameIndex,
    pub fps: Fps,
    /// Position inside the scene; phases twinkles and offsets staggered springs.
    pub element_index: u32,
    /// Estimated length of an arc element's path.
    pub path_length: Option<f64>,
}

/// Accumulated visual state of one element at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementState {
    pub opacity: f64,
    pub translate: Vec2,
    pub scale: f64,
    pub radius: Option<f64>,
    pub dash: Option<StrokeDash>,
    pub value: Option<f64>,
    pub blur: Option<f64>,
    pub gradient_angle: Option<f64>,
    pub drift: Option<Point>,
    /// Degrees.
    pub rotation: Option<f64>,
    /// Clip-circle radius in percent of the element box.
    pub reveal: Option<f64>,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate: Vec2::ZERO,
            scale: 1.0,
            radius: None,
            dash: None,
            value: None,
            blur: None,
            gradient_angle: None,
            drift: None,
            rotation: None,
            reveal: None,
        }
    }
}

impl ElementState {
    fn apply_channel(&mut self, channel: Channel, v: f64) {
        match channel {
            Channel::Opacity => self.opacity *= v,
            Channel::Scale => self.scale *= v,
            Channel::TranslateX => self.translate.x += v,
            Channel::TranslateY => self.translate.y += v,
            Channel::Radius => self.radius = Some(v),
            Channel::Blur => self.blur = Some(v),
            Channel::Value => self.value = Some(v),
        }
    }
}

/// Element property targeted by the generic `spring` and `keyframes` motions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Opacity,
    Scale,
    TranslateX,
    TranslateY,
    Radius,
    Blur,
    Value,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum SpringSource {
    Preset(SpringPreset),
    Config(SpringConfig),
}

impl Default for SpringSource {
    fn default() -> Self {
        Self::Preset(SpringPreset::default())
    }
}

impl SpringSource {
    pub fn config(&self) -> SpringConfig {
        match self {
            Self::Preset(p) => p.config(),
            Self::Config(c) => *c,
        }
    }
}

/// Declarative form of the motion helpers, as written in a reel document.
///
/// Frames are absolute timeline frames. Applying several motions to one element composes them:
/// opacities and scales multiply, translations add, every other channel is overwritten by the
/// last motion that sets it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Motion {
    FadeIn {
        start: FrameRef,
        #[serde(default = "default_fade")]
        duration: f64,
    },
    FadeOut {
        start: FrameRef,
        #[serde(default = "default_fade")]
        duration: f64,
    },
    SlideUpIn {
        start: FrameRef,
        #[serde(default = "default_slide_distance")]
        distance: f64,
        #[serde(default)]
        preset: SpringPreset,
        /// Frames added to `start` per element index in the scene.
        #[serde(default)]
        stagger: f64,
    },
    ScaleIn {
        start: FrameRef,
        #[serde(default = "default_scale_from")]
        from: f64,
        #[serde(default)]
        preset: SpringPreset,
        #[serde(default)]
        stagger: f64,
    },
    ScalePulse {
        start: FrameRef,
        #[serde(default = "default_pulse_duration")]
        duration: f64,
        #[serde(default = "default_pulse_peak")]
        peak: f64,
    },
    KenBurns {
        start: FrameRef,
        duration: f64,
        #[serde(default)]
        mode: KenBurnsMode,
    },
    PinDrop {
        start: FrameRef,
        #[serde(default)]
        stagger: f64,
    },
    StrokeDraw {
        start: FrameRef,
        #[serde(default = "default_stroke_duration")]
        duration: f64,
        #[serde(default)]
        path_length: Option<f64>,
    },
    PulseRing {
        start: FrameRef,
        #[serde(default = "default_ring_loop")]
        loop_duration: f64,
        #[serde(default = "default_ring_min")]
        min_radius: f64,
        #[serde(default = "default_ring_max")]
        max_radius: f64,
    },
    Twinkle {
        #[serde(default = "default_twinkle_speed")]
        speed: f64,
        #[serde(default = "default_twinkle_min")]
        min: f64,
        #[serde(default = "default_twinkle_max")]
        max: f64,
        #[serde(default)]
        index: Option<u32>,
    },
    Counter {
        start: FrameRef,
        target: f64,
        #[serde(default = "default_counter_duration")]
        duration: f64,
    },
    Blur {
        start: FrameRef,
        #[serde(default = "default_fade")]
        duration: f64,
        #[serde(default = "default_max_blur")]
        max_blur: f64,
    },
    GradientSweep {
        start: FrameRef,
        end: FrameRef,
        #[serde(default = "default_angle_from")]
        from_angle: f64,
        #[serde(default = "default_angle_to")]
        to_angle: f64,
    },
    Drift {
        #[serde(default = "default_drift_speed")]
        speed: f64,
        #[serde(default = "default_drift_amplitude")]
        amplitude: f64,
        #[serde(default = "default_drift_base_x")]
        base_x: f64,
        #[serde(default = "default_drift_base_y")]
        base_y: f64,
    },
    Spring {
        channel: Channel,
        start: FrameRef,
        #[serde(default)]
        spring: SpringSource,
        #[serde(default)]
        from: f64,
        #[serde(default = "default_one")]
        to: f64,
        #[serde(default)]
        duration_in_frames: Option<f64>,
        #[serde(default)]
        stagger: f64,
    },
    ScreenShake {
        start: FrameRef,
        #[serde(default = "default_fade")]
        duration: f64,
        #[serde(default = "default_shake_intensity")]
        intensity: f64,
    },
    CircularReveal {
        start: FrameRef,
        #[serde(default = "default_reveal_spring")]
        spring: SpringSource,
        #[serde(default)]
        stagger: f64,
    },
    Keyframes {
        channel: Channel,
        start: FrameRef,
        /// Frames relative to `start`.
        input: Vec<f64>,
        output: Vec<f64>,
        #[serde(default)]
        ease: Ease,
        #[serde(default = "default_clamp")]
        extrapolate: Extrapolate,
    },
}

fn default_fade() -> f64 {
    15.0
}
fn default_slide_distance() -> f64 {
    40.0
}
fn default_scale_from() -> f64 {
    0.85
}
fn default_pulse_duration() -> f64 {
    20.0
}
fn default_pulse_peak() -> f64 {
    1.05
}
fn default_stroke_duration() -> f64 {
    40.0
}
fn default_ring_loop() -> f64 {
    60.0
}
fn default_ring_min() -> f64 {
    8.0
}
fn default_ring_max() -> f64 {
    30.0
}
fn default_twinkle_speed() -> f64 {
    0.15
}
fn default_twinkle_min() -> f64 {
    0.6
}
fn default_twinkle_max() -> f64 {
    1.0
}
fn default_counter_duration() -> f64 {
    45.0
}
fn default_max_blur() -> f64 {
    8.0
}
fn default_angle_from() -> f64 {
    120.0
}
fn default_angle_to() -> f64 {
    160.0
}
fn default_drift_speed() -> f64 {
    0.008
}
fn default_drift_amplitude() -> f64 {
    15.0
}
fn default_drift_base_x() -> f64 {
    30.0
}
fn default_drift_base_y() -> f64 {
    40.0
}
fn default_shake_intensity() -> f64 {
    10.0
}
fn default_reveal_spring() -> SpringSource {
    SpringSource::Config(SpringConfig {
        damping: 20.0,
        mass: 0.8,
        stiffness: 100.0,
        overshoot_clamping: false,
    })
}
fn default_one() -> f64 {
    1.0
}
fn default_clamp() -> Extrapolate {
    Extrapolate::Clamp
}

fn check_finite(name: &str, v: f64) -> ReelResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ReelError::animation(format!("{name} must be finite")))
    }
}

impl Motion {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::FadeIn { .. } => "fade_in",
            Self::FadeOut { .. } => "fade_out",
            Self::SlideUpIn { .. } => "slide_up_in",
            Self::ScaleIn { .. } => "scale_in",
            Self::ScalePulse { .. } => "scale_pulse",
            Self::KenBurns { .. } => "ken_burns",
            Self::PinDrop { .. } => "pin_drop",
            Self::StrokeDraw { .. } => "stroke_draw",
            Self::PulseRing { .. } => "pulse_ring",
            Self::Twinkle { .. } => "twinkle",
            Self::Counter { .. } => "counter",
            Self::Blur { .. } => "blur",
            Self::GradientSweep { .. } => "gradient_sweep",
            Self::Drift { .. } => "drift",
            Self::Spring { .. } => "spring",
            Self::ScreenShake { .. } => "screen_shake",
            Self::CircularReveal { .. } => "circular_reveal",
            Self::Keyframes { .. } => "keyframes",
        }
    }

    fn frame_refs(&self) -> Vec<&FrameRef> {
        match self {
            Self::FadeIn { start, .. }
            | Self::FadeOut { start, .. }
            | Self::SlideUpIn { start, .. }
            | Self::ScaleIn { start, .. }
            | Self::ScalePulse { start, .. }
            | Self::KenBurns { start, .. }
            | Self::PinDrop { start, .. }
            | Self::StrokeDraw { start, .. }
            | Self::PulseRing { start, .. }
            | Self::Counter { start, .. }
            | Self::Blur { start, .. }
            | Self::Spring { start, .. }
            | Self::ScreenShake { start, .. }
            | Self::CircularReveal { start, .. }
            | Self::Keyframes { start, .. } => vec![start],
            Self::GradientSweep { start, end, .. } => vec![start, end],
            Self::Twinkle { .. } | Self::Drift { .. } => Vec::new(),
        }
    }

    /// Resolves every frame reference and checks numeric parameters.
    pub fn validate(&self, timing: &TimingTable) -> ReelResult<()> {
        for r in self.frame_refs() {
            timing.resolve(r)?;
        }
        if let Some(stagger) = self.stagger()
            && !(stagger.is_finite() && stagger >= 0.0)
        {
            return Err(ReelError::animation("stagger must be finite and >= 0"));
        }
        match self {
            Self::FadeIn { duration, .. }
            | Self::FadeOut { duration, .. }
            | Self::ScalePulse { duration, .. }
            | Self::KenBurns { duration, .. }
            | Self::Counter { duration, .. }
            | Self::Blur { duration, .. } => check_finite("motion duration", *duration),
            Self::SlideUpIn { distance, .. } => check_finite("slide distance", *distance),
            Self::ScreenShake {
                duration,
                intensity,
                ..
            } => {
                check_finite("motion duration", *duration)?;
                check_finite("screen_shake intensity", *intensity)
            }
            Self::CircularReveal { spring, .. } => spring.config().validate(),
            Self::ScaleIn { from, .. } => check_finite("scale_in from", *from),
            Self::StrokeDraw {
                duration,
                path_length,
                ..
            } => {
                check_finite("motion duration", *duration)?;
                if let Some(len) = path_length
                    && !(len.is_finite() && *len >= 0.0)
                {
                    return Err(ReelError::animation(
                        "stroke_draw path_length must be finite and >= 0",
                    ));
                }
                Ok(())
            }
            Self::PulseRing {
                loop_duration,
                min_radius,
                max_radius,
                ..
            } => {
                check_finite("pulse_ring loop_duration", *loop_duration)?;
                check_finite("pulse_ring min_radius", *min_radius)?;
                check_finite("pulse_ring max_radius", *max_radius)
            }
            Self::Twinkle { speed, min, max, .. } => {
                check_finite("twinkle speed", *speed)?;
                if !(min.is_finite() && max.is_finite() && min <= max) {
                    return Err(ReelError::animation("twinkle requires finite min <= max"));
                }
                Ok(())
            }
            Self::GradientSweep {
                start,
                end,
                from_angle,
                to_angle,
            } => {
                if timing.resolve(start)? > timing.resolve(end)? {
                    return Err(ReelError::animation("gradient_sweep start must be <= end"));
                }
                check_finite("gradient_sweep from_angle", *from_angle)?;
                check_finite("gradient_sweep to_angle", *to_angle)
            }
            Self::Drift {
                speed,
                amplitude,
                base_x,
                base_y,
            } => {
                check_finite("drift speed", *speed)?;
                check_finite("drift amplitude", *amplitude)?;
                check_finite("drift base_x", *base_x)?;
                check_finite("drift base_y", *base_y)
            }
            Self::Spring {
                spring,
                from,
                to,
                duration_in_frames,
                ..
            } => {
                spring.config().validate()?;
                check_finite("spring from", *from)?;
                check_finite("spring to", *to)?;
                if let Some(d) = duration_in_frames
                    && !(d.is_finite() && *d > 0.0)
                {
                    return Err(ReelError::animation(
                        "spring duration_in_frames must be finite and > 0",
                    ));
                }
                Ok(())
            }
            Self::Keyframes {
                input,
                output,
                ease,
                extrapolate,
                ..
            } => {
                let opts = keyframe_opts(*ease, *extrapolate);
                let first = input.first().copied().unwrap_or(0.0);
                interpolate(first, input, output, opts).map(|_| ())
            }
            Self::PinDrop { .. } => Ok(()),
        }
    }

    fn stagger(&self) -> Option<f64> {
        match self {
            Self::SlideUpIn { stagger, .. }
            | Self::ScaleIn { stagger, .. }
            | Self::PinDrop { stagger, .. }
            | Self::Spring { stagger, .. }
            | Self::CircularReveal { stagger, .. } => Some(*stagger),
            _ => None,
        }
    }

    /// Samples this motion at `ctx.frame` and folds it into `state`.
    pub fn apply(
        &self,
        ctx: &SampleCtx,
        timing: &TimingTable,
        state: &mut ElementState,
    ) -> ReelResult<()> {
        let frame = ctx.frame.as_f64();
        let fps = ctx.fps.as_f64();
        let at = |r: &FrameRef| -> ReelResult<f64> { Ok(timing.resolve(r)? as f64) };
        let staggered = |r: &FrameRef, stagger: f64| -> ReelResult<f64> {
            Ok(motion::staggered_start(at(r)?, ctx.element_index, stagger))
        };

        match self {
            Self::FadeIn { start, duration } => {
                state.opacity *= motion::fade_in(frame, at(start)?, *duration);
            }
            Self::FadeOut { start, duration } => {
                state.opacity *= motion::fade_out(frame, at(start)?, *duration);
            }
            Self::SlideUpIn {
                start,
                distance,
                preset,
                stagger,
            } => {
                let s = staggered(start, *stagger)?;
                state.translate.y += motion::slide_up_in(frame, fps, s, *distance, *preset);
            }
            Self::ScaleIn {
                start,
                from,
                preset,
                stagger,
            } => {
                let s = staggered(start, *stagger)?;
                state.scale *= motion::scale_in(frame, fps, s, *from, *preset);
            }
            Self::ScalePulse {
                start,
                duration,
                peak,
            } => {
                state.scale *= motion::scale_pulse(frame, at(start)?, *duration, *peak);
            }
            Self::KenBurns {
                start,
                duration,
                mode,
            } => {
                let kb = motion::ken_burns(frame, at(start)?, *duration, *mode);
                state.scale *= kb.scale;
                state.translate += Vec2::new(kb.translate_x, kb.translate_y);
            }
            Self::PinDrop { start, stagger } => {
                let pin = motion::pin_drop(frame, fps, staggered(start, *stagger)?);
                state.opacity *= pin.opacity;
                state.translate.y += pin.translate_y;
                state.scale *= pin.scale;
            }
            Self::StrokeDraw {
                start,
                duration,
                path_length,
            } => {
                let len = path_length
                    .or(ctx.path_length)
                    .unwrap_or(DEFAULT_PATH_LENGTH);
                state.dash = Some(motion::stroke_draw(frame, at(start)?, *duration, len));
            }
            Self::PulseRing {
                start,
                loop_duration,
                min_radius,
                max_radius,
            } => {
                let ring =
                    motion::pulse_ring(frame, at(start)?, *loop_duration, *min_radius, *max_radius);
                state.radius = Some(ring.radius);
                state.opacity *= ring.opacity;
            }
            Self::Twinkle {
                speed,
                min,
                max,
                index,
            } => {
                let i = index.unwrap_or(ctx.element_index);
                state.opacity *= motion::twinkle(frame, i, *speed, *min, *max);
            }
            Self::Counter {
                start,
                target,
                duration,
            } => {
                state.value = Some(motion::counter_animate(frame, at(start)?, *target, *duration));
            }
            Self::Blur {
                start,
                duration,
                max_blur,
            } => {
                state.blur = Some(motion::blur_transition(frame, at(start)?, *duration, *max_blur));
            }
            Self::GradientSweep {
                start,
                end,
                from_angle,
                to_angle,
            } => {
                state.gradient_angle = Some(motion::animated_gradient_angle(
                    frame,
                    at(start)?,
                    at(end)?,
                    *from_angle,
                    *to_angle,
                ));
            }
            Self::Drift {
                speed,
                amplitude,
                base_x,
                base_y,
            } => {
                let orb = motion::drifting_orb(frame, *speed, *amplitude, *base_x, *base_y);
                state.drift = Some(orb);
            }
            Self::Spring {
                channel,
                start,
                spring,
                from,
                to,
                duration_in_frames,
                stagger,
            } => {
                let opts = SpringOpts {
                    config: spring.config(),
                    from: *from,
                    to: *to,
                    delay: f64::from(ctx.element_index) * stagger,
                    duration_in_frames: *duration_in_frames,
                };
                let v = spring_with(frame - at(start)?, fps, &opts)?;
                state.apply_channel(*channel, v);
            }
            Self::ScreenShake {
                start,
                duration,
                intensity,
            } => {
                let shake = motion::screen_shake(frame, at(start)?, *duration, *intensity);
                state.translate += Vec2::new(shake.translate_x, shake.translate_y);
                state.rotation = Some(state.rotation.unwrap_or(0.0) + shake.rotation);
            }
            Self::CircularReveal {
                start,
                spring,
                stagger,
            } => {
                let s = staggered(start, *stagger)?;
                state.reveal = Some(motion::circular_reveal(frame, fps, s, &spring.config()));
            }
            Self::Keyframes {
                channel,
                start,
                input,
                output,
                ease,
                extrapolate,
            } => {
                let local = frame - at(start)?;
                let v = interpolate(local, input, output, keyframe_opts(*ease, *extrapolate))?;
                state.apply_channel(*channel, v);
            }
        }
        Ok(())
    }
}

fn keyframe_opts(ease: Ease, extrapolate: Extrapolate) -> InterpolateOpts {
    InterpolateOpts {
        ease,
        left: extrapolate,
        right: extrapolate,
    }
}

/// Folds `motions` in order over a default state.
pub fn sample_motions(
    motions: &[Motion],
    ctx: &SampleCtx,
    timing: &TimingTable,
) -> ReelResult<ElementState> {
    let mut state = ElementState::default();
    for m in motions {
        m.apply(ctx, timing, &mut state)?;
    }
    Ok(state)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
