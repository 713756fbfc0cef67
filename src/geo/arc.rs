use kurbo::{BezPath, ParamCurve, ParamCurveArclen, QuadBez};

use crate::{
    animation::motion::{StrokeDash, stroke_draw},
    foundation::core::Point,
};

/// Control-point lift as a fraction of the horizontal distance between endpoints.
pub const ARC_BOW: f64 = 0.3;
/// Ratio between the estimated arc length and the straight chord.
pub const ARC_LENGTH_FACTOR: f64 = 1.5;

/// Curved connection line between two projected points.
///
/// The control point sits above the chord midpoint (screen y up is negative), so arcs bow
/// upward regardless of direction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Arc {
    pub from: Point,
    pub control: Point,
    pub to: Point,
}

impl Arc {
    pub fn between(from: Point, to: Point) -> Self {
        Self::with_bow(from, to, ARC_BOW)
    }

    pub fn with_bow(from: Point, to: Point, bow: f64) -> Self {
        let mid = from.midpoint(to);
        let lift = (to.x - from.x).abs() * bow;
        Self {
            from,
            control: Point::new(mid.x, mid.y - lift),
            to,
        }
    }

    fn quad(&self) -> QuadBez {
        QuadBez::new(self.from, self.control, self.to)
    }

    pub fn chord(&self) -> f64 {
        self.from.distance(self.to)
    }

    /// Cheap length used for dash animation.
    pub fn estimated_length(&self) -> f64 {
        self.chord() * ARC_LENGTH_FACTOR
    }

    /// True arc length within `accuracy`.
    pub fn sampled_length(&self, accuracy: f64) -> f64 {
        self.quad().arclen(accuracy)
    }

    pub fn point_at(&self, t: f64) -> Point {
        self.quad().eval(t.clamp(0.0, 1.0))
    }

    pub fn reveal(&self, frame: f64, start: f64, duration: f64) -> StrokeDash {
        stroke_draw(frame, start, duration, self.estimated_length())
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.from);
        path.quad_to(self.control, self.to);
        path
    }

    /// SVG `d` attribute for the arc.
    pub fn svg_path(&self) -> String {
        self.to_path().to_svg()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geo/arc.rs"]
mod tests;
