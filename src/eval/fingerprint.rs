use crate::{
    eval::evaluator::{ElementFrame, FrameOutput},
    foundation::{core::Point, math::Fnv1a64},
};

/// 128-bit content hash of an evaluated frame, independent of the frame number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

struct PairHasher {
    a: Fnv1a64,
    b: Fnv1a64,
}

impl PairHasher {
    fn new() -> Self {
        Self {
            a: Fnv1a64::new_default(),
            b: Fnv1a64::new(0x9ae16a3b2f90404f),
        }
    }

    fn u8(&mut self, v: u8) {
        self.a.write_u8(v);
        self.b.write_u8(v);
    }

    fn u64(&mut self, v: u64) {
        self.a.write_u64(v);
        self.b.write_u64(v);
    }

    fn f64(&mut self, v: f64) {
        self.a.write_f64(v);
        self.b.write_f64(v);
    }

    fn str(&mut self, s: &str) {
        self.a.write_str(s);
        self.b.write_str(s);
    }

    fn point(&mut self, p: Point) {
        self.f64(p.x);
        self.f64(p.y);
    }

    fn opt_f64(&mut self, v: Option<f64>) {
        match v {
            Some(x) => {
                self.u8(1);
                self.f64(x);
            }
            None => self.u8(0),
        }
    }

    fn opt_str(&mut self, v: Option<&str>) {
        match v {
            Some(s) => {
                self.u8(1);
                self.str(s);
            }
            None => self.u8(0),
        }
    }

    fn finish(self) -> FrameFingerprint {
        FrameFingerprint {
            hi: self.a.finish(),
            lo: self.b.finish(),
        }
    }
}

pub fn fingerprint_frame(frame: &FrameOutput) -> FrameFingerprint {
    let mut h = PairHasher::new();
    h.u64(frame.scenes.len() as u64);
    for scene in &frame.scenes {
        h.str(&scene.id);
        h.u64(i64::from(scene.z) as u64);
        h.f64(scene.opacity);
        h.u64(scene.elements.len() as u64);
        for el in &scene.elements {
            hash_element(&mut h, el);
        }
    }
    h.finish()
}

fn hash_element(h: &mut PairHasher, el: &ElementFrame) {
    h.str(&el.id);
    h.str(el.kind);
    h.f64(el.opacity);
    h.f64(el.translate.x);
    h.f64(el.translate.y);
    h.f64(el.scale);
    h.point(el.position);
    match el.color {
        Some(c) => {
            h.u8(1);
            for v in [c.r, c.g, c.b, c.a] {
                h.u8(v);
            }
        }
        None => h.u8(0),
    }
    h.opt_str(el.style.as_deref());
    h.opt_str(el.text.as_deref());
    h.opt_str(el.asset.as_deref());
    h.opt_f64(el.radius);
    h.opt_f64(el.dash.map(|d| d.dash_array));
    h.opt_f64(el.dash.map(|d| d.dash_offset));
    h.opt_f64(el.value);
    h.opt_str(el.display.as_deref());
    h.opt_f64(el.blur);
    h.opt_f64(el.gradient_angle);
    h.opt_f64(el.drift.map(|p| p.x));
    h.opt_f64(el.drift.map(|p| p.y));
    h.opt_f64(el.rotation);
    h.opt_f64(el.reveal);
    h.u64(el.particles.len() as u64);
    for p in &el.particles {
        h.u64(u64::from(p.index));
        h.f64(p.x_percent);
        h.f64(p.size);
        h.f64(p.opacity);
        h.f64(p.translate.x);
        h.f64(p.translate.y);
    }
    match &el.arc {
        Some(a) => {
            h.u8(1);
            h.point(a.from);
            h.point(a.control);
            h.point(a.to);
            h.f64(a.length);
        }
        None => h.u8(0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
