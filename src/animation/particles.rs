//! Seeded ambient particle field: dots rising from the lower edge, fading in and out on loop.

use crate::{
    animation::{ease::Ease, interpolate::ramp},
    foundation::{
        core::Vec2,
        math::{lerp, unit_hash},
    },
};

/// Frames a particle stays hidden between two lives.
pub const PARTICLE_REST_FRAMES: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticleField {
    pub count: u32,
    pub max_opacity: f64,
    /// Window over which particle birth delays are spread.
    pub duration: f64,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self {
            count: 15,
            max_opacity: 0.4,
            duration: 300.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Particle {
    pub index: u32,
    /// Horizontal position in percent of the canvas width.
    pub x_percent: f64,
    pub size: f64,
    pub opacity: f64,
    pub translate: Vec2,
}

#[derive(Clone, Copy, Debug)]
struct ParticleSeed {
    x_percent: f64,
    size: f64,
    delay: f64,
    life: f64,
    drift: f64,
    travel: f64,
}

fn particle_seed(seed: u64, i: u32, duration: f64) -> ParticleSeed {
    let r = |salt: u8| unit_hash(seed, u64::from(i), salt);
    ParticleSeed {
        x_percent: r(0) * 100.0,
        size: lerp(3.0, 6.0, r(1)),
        delay: (r(2) * duration * 0.7).floor(),
        life: 90.0 + (r(3) * 60.0).floor(),
        drift: lerp(5.0, 15.0, r(4)),
        travel: lerp(100.0, 200.0, r(5)),
    }
}

impl ParticleField {
    /// Live particles at `frame`; particles not yet born or resting are omitted.
    pub fn sample(&self, frame: f64, start: f64, seed: u64) -> Vec<Particle> {
        let mut out = Vec::new();
        for i in 0..self.count {
            let p = particle_seed(seed, i, self.duration.max(0.0));
            let local = frame - start - p.delay;
            if local < 0.0 {
                continue;
            }
            let t = local.rem_euclid(p.life + PARTICLE_REST_FRAMES);
            if t > p.life {
                continue;
            }

            let opacity = if t < p.life * 0.2 {
                ramp(t, 0.0, p.life * 0.2, 0.0, self.max_opacity, Ease::Linear)
            } else if t <= p.life * 0.8 {
                self.max_opacity
            } else {
                ramp(t, p.life * 0.8, p.life, self.max_opacity, 0.0, Ease::Linear)
            };

            out.push(Particle {
                index: i,
                x_percent: p.x_percent,
                size: p.size,
                opacity,
                translate: Vec2::new(
                    (t * 0.05).sin() * p.drift,
                    ramp(t, 0.0, p.life, 0.0, -p.travel, Ease::Linear),
                ),
            });
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/particles.rs"]
mod tests;
