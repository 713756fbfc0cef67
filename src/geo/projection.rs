//! Geographic projections from latitude/longitude to canvas pixels.

use crate::foundation::{
    core::{Point, Vec2},
    error::{ReelError, ReelResult},
};

/// Latitude/longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn validate(self) -> ReelResult<()> {
        if !(self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat)) {
            return Err(ReelError::validation(format!(
                "latitude {} out of [-90, 90]",
                self.lat
            )));
        }
        if !(self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng)) {
            return Err(ReelError::validation(format!(
                "longitude {} out of [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

pub trait Projection {
    fn project(&self, p: LatLng) -> Point;
}

/// Plate carrée stretched over a `width x height` canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Equirectangular {
    pub width: f64,
    pub height: f64,
}

impl Equirectangular {
    pub fn invert(&self, p: Point) -> LatLng {
        LatLng {
            lat: 90.0 - p.y / self.height * 180.0,
            lng: p.x / self.width * 360.0 - 180.0,
        }
    }
}

impl Projection for Equirectangular {
    fn project(&self, p: LatLng) -> Point {
        Point::new(
            (p.lng + 180.0) / 360.0 * self.width,
            (90.0 - p.lat) / 180.0 * self.height,
        )
    }
}

/// Natural Earth I pseudo-cylindrical projection.
///
/// Unit-sphere coordinates are scaled by `scale` and offset so `(0, 0)` lands on `translate`;
/// screen y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NaturalEarth1 {
    pub scale: f64,
    pub translate: Vec2,
}

impl NaturalEarth1 {
    pub fn raw(lambda: f64, phi: f64) -> (f64, f64) {
        let phi2 = phi * phi;
        let phi4 = phi2 * phi2;
        let x = lambda
            * (0.8707 - 0.131979 * phi2
                + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4)));
        let y = phi
            * (1.007226
                + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)));
        (x, y)
    }
}

impl Projection for NaturalEarth1 {
    fn project(&self, p: LatLng) -> Point {
        let (x, y) = Self::raw(p.lng.to_radians(), p.lat.to_radians());
        Point::new(
            self.translate.x + self.scale * x,
            self.translate.y - self.scale * y,
        )
    }
}

/// Equal Earth equal-area projection (Šavrič, Patterson, Jenny 2018).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EqualEarth {
    pub scale: f64,
    pub translate: Vec2,
}

const EE_A1: f64 = 1.340264;
const EE_A2: f64 = -0.081106;
const EE_A3: f64 = 0.000893;
const EE_A4: f64 = 0.003796;

impl EqualEarth {
    pub fn raw(lambda: f64, phi: f64) -> (f64, f64) {
        let m = 3.0_f64.sqrt() / 2.0;
        let l = (m * phi.sin()).asin();
        let l2 = l * l;
        let l6 = l2 * l2 * l2;
        let dy = EE_A1 + 3.0 * EE_A2 * l2 + l6 * (7.0 * EE_A3 + 9.0 * EE_A4 * l2);
        let x = lambda * l.cos() / (m * dy);
        let y = l * (EE_A1 + EE_A2 * l2 + l6 * (EE_A3 + EE_A4 * l2));
        (x, y)
    }
}

impl Projection for EqualEarth {
    fn project(&self, p: LatLng) -> Point {
        let (x, y) = Self::raw(p.lng.to_radians(), p.lat.to_radians());
        Point::new(
            self.translate.x + self.scale * x,
            self.translate.y - self.scale * y,
        )
    }
}

/// Projection selection as written in a reel document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionSpec {
    Equirectangular(Equirectangular),
    NaturalEarth1(NaturalEarth1),
    EqualEarth(EqualEarth),
}

impl ProjectionSpec {
    pub fn validate(&self) -> ReelResult<()> {
        let ok = match self {
            Self::Equirectangular(p) => {
                p.width.is_finite() && p.height.is_finite() && p.width > 0.0 && p.height > 0.0
            }
            Self::NaturalEarth1(NaturalEarth1 { scale, translate })
            | Self::EqualEarth(EqualEarth { scale, translate }) => {
                scale.is_finite()
                    && *scale > 0.0
                    && translate.x.is_finite()
                    && translate.y.is_finite()
            }
        };
        if ok {
            Ok(())
        } else {
            Err(ReelError::validation(
                "projection dimensions must be finite and positive",
            ))
        }
    }
}

impl Projection for ProjectionSpec {
    fn project(&self, p: LatLng) -> Point {
        match self {
            Self::Equirectangular(proj) => proj.project(p),
            Self::NaturalEarth1(proj) => proj.project(p),
            Self::EqualEarth(proj) => proj.project(p),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geo/projection.rs"]
mod tests;
