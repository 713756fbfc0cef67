//! Frame-driven motion helpers.
//!
//! Every helper is a pure function of the frame number and its parameters. Durations below one
//! frame are treated as one frame so no helper ever divides by zero.

use std::str::FromStr;

use crate::{
    animation::{
        ease::Ease,
        interpolate::ramp,
        spring::{SpringConfig, SpringPreset, make_spring, spring},
    },
    foundation::{
        core::Point,
        error::{ReelError, ReelResult},
        math::lerp,
    },
};

fn guard_duration(duration: f64) -> f64 {
    if duration.is_nan() || duration < 1.0 {
        1.0
    } else {
        duration
    }
}

/// Linear `0 -> 1` over `[start, start + duration]`, clamped outside.
pub fn fade_in(frame: f64, start: f64, duration: f64) -> f64 {
    let d = guard_duration(duration);
    ramp(frame, start, start + d, 0.0, 1.0, Ease::Linear)
}

/// Linear `1 -> 0` over `[start, start + duration]`, clamped outside.
pub fn fade_out(frame: f64, start: f64, duration: f64) -> f64 {
    let d = guard_duration(duration);
    ramp(frame, start, start + d, 1.0, 0.0, Ease::Linear)
}

/// Vertical offset in pixels sliding from `distance` to rest on a spring.
pub fn slide_up_in(frame: f64, fps: f64, start: f64, distance: f64, preset: SpringPreset) -> f64 {
    let s = make_spring(frame, fps, start, preset);
    lerp(distance, 0.0, s)
}

/// Scale factor growing from `from` to `1` on a spring.
pub fn scale_in(frame: f64, fps: f64, start: f64, from: f64, preset: SpringPreset) -> f64 {
    let s = make_spring(frame, fps, start, preset);
    lerp(from, 1.0, s)
}

/// Triangular `1 -> peak -> 1` pulse over `[start, start + duration]`.
pub fn scale_pulse(frame: f64, start: f64, duration: f64, peak: f64) -> f64 {
    let d = guard_duration(duration);
    let mid = start + d / 2.0;
    if frame < start {
        return 1.0;
    }
    if frame < mid {
        return ramp(frame, start, mid, 1.0, peak, Ease::Linear);
    }
    ramp(frame, mid, start + d, peak, 1.0, Ease::Linear)
}

/// Counter value easing out from `0` to `target`.
///
/// Exactly `0` at `start` and exactly `target` from `start + duration` on.
pub fn counter_animate(frame: f64, start: f64, target: f64, duration: f64) -> f64 {
    if frame < start {
        return 0.0;
    }
    let d = guard_duration(duration);
    ramp(frame, start, start + d, 0.0, target, Ease::OutCubic)
}

/// Largest `decimals` accepted for counter text.
pub const MAX_COUNTER_DECIMALS: u32 = 6;

/// Text shown for a counter value.
///
/// Whole numbers round half up (`-2.5` shows as `-2`). `decimals` is capped at
/// [`MAX_COUNTER_DECIMALS`].
pub fn format_counter(value: f64, decimals: u32, suffix: &str) -> String {
    let decimals = decimals.min(MAX_COUNTER_DECIMALS);
    if decimals > 0 {
        format!("{value:.prec$}{suffix}", prec = decimals as usize)
    } else {
        format!("{}{suffix}", (value + 0.5).floor() as i64)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KenBurnsMode {
    #[default]
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
}

impl FromStr for KenBurnsMode {
    type Err = ReelError;

    fn from_str(s: &str) -> ReelResult<Self> {
        match s {
            "zoom_in" => Ok(Self::ZoomIn),
            "zoom_out" => Ok(Self::ZoomOut),
            "pan_left" => Ok(Self::PanLeft),
            "pan_right" => Ok(Self::PanRight),
            other => Err(ReelError::validation(format!(
                "unknown ken burns mode '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KenBurns {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

const KEN_BURNS_ZOOM: f64 = 0.08;
const KEN_BURNS_PAN_SCALE: f64 = 1.02;
const KEN_BURNS_PAN_PX: f64 = 15.0;

/// Slow camera move over a still photo.
pub fn ken_burns(frame: f64, start: f64, duration: f64, mode: KenBurnsMode) -> KenBurns {
    let d = guard_duration(duration);
    let p = ramp(frame, start, start + d, 0.0, 1.0, Ease::Linear);
    match mode {
        KenBurnsMode::ZoomIn => KenBurns {
            scale: 1.0 + p * KEN_BURNS_ZOOM,
            translate_x: 0.0,
            translate_y: 0.0,
        },
        KenBurnsMode::ZoomOut => KenBurns {
            scale: 1.0 + KEN_BURNS_ZOOM - p * KEN_BURNS_ZOOM,
            translate_x: 0.0,
            translate_y: 0.0,
        },
        KenBurnsMode::PanRight => KenBurns {
            scale: KEN_BURNS_PAN_SCALE,
            translate_x: p * KEN_BURNS_PAN_PX,
            translate_y: 0.0,
        },
        KenBurnsMode::PanLeft => KenBurns {
            scale: KEN_BURNS_PAN_SCALE,
            translate_x: -p * KEN_BURNS_PAN_PX,
            translate_y: 0.0,
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinDrop {
    pub opacity: f64,
    pub translate_y: f64,
    pub scale: f64,
}

/// Map marker dropping in from above with a bouncy landing.
pub fn pin_drop(frame: f64, fps: f64, start: f64) -> PinDrop {
    let s = make_spring(frame, fps, start, SpringPreset::Bouncy);
    PinDrop {
        opacity: fade_in(frame, start, 5.0),
        translate_y: lerp(-60.0, 0.0, s),
        scale: lerp(1.3, 1.0, s),
    }
}

/// SVG-style dash parameters for progressively drawing a path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeDash {
    pub dash_array: f64,
    pub dash_offset: f64,
}

impl StrokeDash {
    /// Fraction of the path currently drawn.
    pub fn drawn_fraction(&self) -> f64 {
        if self.dash_array <= 0.0 {
            return 1.0;
        }
        (1.0 - self.dash_offset / self.dash_array).clamp(0.0, 1.0)
    }
}

pub fn stroke_draw(frame: f64, start: f64, duration: f64, path_length: f64) -> StrokeDash {
    let d = guard_duration(duration);
    StrokeDash {
        dash_array: path_length,
        dash_offset: ramp(frame, start, start + d, path_length, 0.0, Ease::OutCubic),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PulseRing {
    pub radius: f64,
    pub opacity: f64,
}

const PULSE_RING_PEAK_OPACITY: f64 = 0.6;

/// Expanding, fading ring that restarts every `loop_duration` frames once started.
pub fn pulse_ring(
    frame: f64,
    start: f64,
    loop_duration: f64,
    min_radius: f64,
    max_radius: f64,
) -> PulseRing {
    if frame < start {
        return PulseRing {
            radius: min_radius,
            opacity: 0.0,
        };
    }
    let period = guard_duration(loop_duration);
    let phase = (frame - start).rem_euclid(period) / period;
    PulseRing {
        radius: lerp(min_radius, max_radius, phase),
        opacity: lerp(PULSE_RING_PEAK_OPACITY, 0.0, phase),
    }
}

/// Sine opacity in `[min, max]`, phase-shifted by `index` so neighbours desynchronise.
pub fn twinkle(frame: f64, index: u32, speed: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    min + range * (0.5 + 0.5 * (frame * speed + f64::from(index) * 2.5).sin())
}

/// Blur radius ramping from `0` to `max_blur`.
pub fn blur_transition(frame: f64, start: f64, duration: f64, max_blur: f64) -> f64 {
    let d = guard_duration(duration);
    ramp(frame, start, start + d, 0.0, max_blur, Ease::Linear)
}

/// Gradient angle (degrees) sweeping between two frames.
pub fn animated_gradient_angle(
    frame: f64,
    start: f64,
    end: f64,
    start_angle: f64,
    end_angle: f64,
) -> f64 {
    ramp(frame, start, end, start_angle, end_angle, Ease::Linear)
}

/// Slowly wandering position (percent units) for background gradient orbs.
pub fn drifting_orb(frame: f64, speed: f64, amplitude: f64, base_x: f64, base_y: f64) -> Point {
    Point::new(
        base_x + (frame * speed).sin() * amplitude,
        base_y + (frame * speed * 0.75).cos() * (amplitude * 0.67),
    )
}

/// Start frame of the `index`-th element in a staggered group.
pub fn staggered_start(start: f64, index: u32, stagger: f64) -> f64 {
    start + f64::from(index) * stagger
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenShake {
    pub translate_x: f64,
    pub translate_y: f64,
    /// Degrees.
    pub rotation: f64,
}

const SHAKE_MAX_ROTATION: f64 = 0.5;

/// Jitter decaying linearly to rest over `[start, start + duration]`; at rest outside it.
pub fn screen_shake(frame: f64, start: f64, duration: f64, intensity: f64) -> ScreenShake {
    let d = guard_duration(duration);
    let t = frame - start;
    if !(0.0..=d).contains(&t) {
        return ScreenShake::default();
    }
    let decay = ramp(t, 0.0, d, 1.0, 0.0, Ease::Linear);
    ScreenShake {
        translate_x: (t * 3.0).sin() * intensity * decay,
        translate_y: (t * 4.0).cos() * intensity * decay,
        rotation: (t * 5.0).sin() * SHAKE_MAX_ROTATION * decay,
    }
}

/// Final clip-circle radius of [`circular_reveal`], in percent of the element box.
pub const CIRCULAR_REVEAL_MAX_RADIUS: f64 = 150.0;

/// Clip-circle radius opening from `0` on a spring.
pub fn circular_reveal(frame: f64, fps: f64, start: f64, config: &SpringConfig) -> f64 {
    lerp(0.0, CIRCULAR_REVEAL_MAX_RADIUS, spring(frame - start, fps, config))
}

/// Opacity of a block visible on `[start, end)` that fades in over the `fade_in` frames before
/// `start` and out over the last `fade_out` frames before `end`.
///
/// A zero-length fade is a hard cut.
pub fn crossfade(
    frame: f64,
    start: f64,
    end: f64,
    fade_in_frames: f64,
    fade_out_frames: f64,
) -> f64 {
    let incoming = if fade_in_frames <= 0.0 {
        if frame >= start { 1.0 } else { 0.0 }
    } else {
        fade_in(frame, start - fade_in_frames, fade_in_frames)
    };
    let outgoing = if fade_out_frames <= 0.0 {
        if frame < end { 1.0 } else { 0.0 }
    } else {
        fade_out(frame, end - fade_out_frames, fade_out_frames)
    };
    incoming * outgoing
}

#[cfg(test)]
#[path = "../../tests/unit/animation/motion.rs"]
mod tests;
