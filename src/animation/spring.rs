//! Damped-harmonic-oscillator progress curves.
//!
//! Progress runs from `0` at the start frame towards `1`, optionally overshooting before it
//! settles. The curve is evaluated in closed form at `t = frame_offset / fps`, so sampling any
//! frame costs the same and never depends on previously sampled frames.

use std::str::FromStr;

use crate::foundation::error::{ReelError, ReelResult};

/// Default settle threshold used by [`measure_spring`] when time-stretching.
pub const SPRING_REST_THRESHOLD: f64 = 0.005;

const MAX_MEASURE_FRAMES: u64 = 1_000_000;
const SETTLED_CONFIRM_FRAMES: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringConfig {
    pub damping: f64,
    pub mass: f64,
    pub stiffness: f64,
    #[serde(default)]
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            mass: 1.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    pub fn validate(&self) -> ReelResult<()> {
        for (name, v) in [
            ("damping", self.damping),
            ("mass", self.mass),
            ("stiffness", self.stiffness),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ReelError::validation(format!(
                    "spring {name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// Undamped angular frequency `ω₀ = sqrt(k / m)`.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness.max(f64::MIN_POSITIVE) / self.mass.max(f64::MIN_POSITIVE)).sqrt()
    }

    /// Damping ratio `ζ = c / (2 sqrt(k m))`.
    pub fn damping_ratio(&self) -> f64 {
        let km = (self.stiffness * self.mass).max(f64::MIN_POSITIVE);
        self.damping.max(0.0) / (2.0 * km.sqrt())
    }

    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0
    }
}

/// Named spring configurations shared by every scene.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SpringPreset {
    #[default]
    Snappy,
    Gentle,
    Bouncy,
    #[serde(alias = "slow_reveal")]
    SlowReveal,
    Cinematic,
}

impl SpringPreset {
    pub const ALL: [SpringPreset; 5] = [
        SpringPreset::Snappy,
        SpringPreset::Gentle,
        SpringPreset::Bouncy,
        SpringPreset::SlowReveal,
        SpringPreset::Cinematic,
    ];

    pub fn config(self) -> SpringConfig {
        let (damping, mass, stiffness, overshoot_clamping) = match self {
            Self::Snappy => (15.0, 0.4, 200.0, false),
            Self::Gentle => (14.0, 0.6, 120.0, false),
            Self::Bouncy => (8.0, 0.8, 150.0, false),
            Self::SlowReveal => (20.0, 1.0, 80.0, true),
            Self::Cinematic => (22.0, 1.2, 60.0, true),
        };
        SpringConfig {
            damping,
            mass,
            stiffness,
            overshoot_clamping,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Snappy => "snappy",
            Self::Gentle => "gentle",
            Self::Bouncy => "bouncy",
            Self::SlowReveal => "slowReveal",
            Self::Cinematic => "cinematic",
        }
    }
}

impl FromStr for SpringPreset {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snappy" => Ok(Self::Snappy),
            "gentle" => Ok(Self::Gentle),
            "bouncy" => Ok(Self::Bouncy),
            "slowReveal" | "slow_reveal" => Ok(Self::SlowReveal),
            "cinematic" => Ok(Self::Cinematic),
            other => Err(ReelError::validation(format!(
                "unknown spring preset '{other}'"
            ))),
        }
    }
}

/// Spring progress `frame_offset` frames after the spring started.
///
/// Offsets at or before zero yield exactly `0`.
pub fn spring(frame_offset: f64, fps: f64, config: &SpringConfig) -> f64 {
    if fps.is_nan() || fps <= 0.0 || frame_offset.is_nan() || frame_offset <= 0.0 {
        return 0.0;
    }
    let x = spring_unclamped(frame_offset / fps, config);
    if config.overshoot_clamping {
        x.min(1.0)
    } else {
        x
    }
}

/// Spring progress for a preset started at `start_frame`.
pub fn make_spring(frame: f64, fps: f64, start_frame: f64, preset: SpringPreset) -> f64 {
    spring(frame - start_frame, fps, &preset.config())
}

fn spring_unclamped(t: f64, config: &SpringConfig) -> f64 {
    let omega0 = config.natural_frequency();
    let zeta = config.damping_ratio();
    if zeta < 1.0 {
        let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega0 * t).exp();
        1.0 - envelope * ((omega_d * t).cos() + (zeta * omega0 / omega_d) * (omega_d * t).sin())
    } else {
        // Over-damped presets settle on the critically damped curve.
        let envelope = (-omega0 * t).exp();
        1.0 - envelope * (1.0 + omega0 * t)
    }
}

/// Number of frames until the spring stays within `threshold` of rest.
pub fn measure_spring(fps: f64, config: &SpringConfig, threshold: f64) -> ReelResult<u64> {
    config.validate()?;
    if !fps.is_finite() || fps <= 0.0 {
        return Err(ReelError::animation("spring fps must be finite and > 0"));
    }
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(ReelError::animation(
            "spring rest threshold must be finite and > 0",
        ));
    }

    let distance = |frame: u64| (1.0 - spring_unclamped(frame as f64 / fps, config)).abs();

    let mut frame = 0u64;
    while distance(frame) >= threshold {
        frame += 1;
        if frame > MAX_MEASURE_FRAMES {
            return Err(ReelError::animation("spring does not settle"));
        }
    }

    let mut finished = frame;
    let mut settled = 0u32;
    while settled < SETTLED_CONFIRM_FRAMES {
        frame += 1;
        if distance(frame) >= threshold {
            settled = 0;
            finished = frame + 1;
        } else {
            settled += 1;
        }
    }
    Ok(finished)
}

/// Full spring parameterisation: output range, delay and optional time-stretching.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringOpts {
    pub config: SpringConfig,
    #[serde(default)]
    pub from: f64,
    #[serde(default = "default_to")]
    pub to: f64,
    #[serde(default)]
    pub delay: f64,
    /// Stretch the natural settle time to exactly this many frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_frames: Option<f64>,
}

fn default_to() -> f64 {
    1.0
}

impl SpringOpts {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            from: 0.0,
            to: 1.0,
            delay: 0.0,
            duration_in_frames: None,
        }
    }
}

pub fn spring_with(frame: f64, fps: f64, opts: &SpringOpts) -> ReelResult<f64> {
    opts.config.validate()?;
    let mut offset = frame - opts.delay;
    if let Some(duration) = opts.duration_in_frames {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ReelError::animation(
                "spring duration_in_frames must be finite and > 0",
            ));
        }
        let natural = measure_spring(fps, &opts.config, SPRING_REST_THRESHOLD)?;
        offset /= duration / (natural.max(1) as f64);
    }
    let progress = spring(offset, fps, &opts.config);
    Ok(opts.from + (opts.to - opts.from) * progress)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
