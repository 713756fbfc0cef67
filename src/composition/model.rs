use std::{collections::BTreeSet, io::Read, path::Path};

use anyhow::Context;

use crate::{
    animation::{anim::Motion, motion::MAX_COUNTER_DECIMALS, particles::ParticleField},
    config::{
        assets::AssetCatalog,
        brand::Brand,
        content::Content,
        timing::{FrameRef, TimingTable},
    },
    foundation::{
        core::{Canvas, Fps, FrameIndex, FrameRange, Point},
        error::{ReelError, ReelResult},
    },
    geo::projection::{LatLng, Projection, ProjectionSpec},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Output format of the reel.
pub struct VideoSpec {
    pub canvas: Canvas,
    pub fps: Fps,
    /// Total length in frames.
    pub duration: FrameIndex,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// World map shared by every geo-anchored element.
pub struct MapSpec {
    pub projection: ProjectionSpec,
    /// Asset key of the country topology drawn underneath.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete promo reel.
///
/// Pure data: built with [`crate::ReelBuilder`] or loaded from JSON, validated once, then
/// evaluated frame by frame with [`crate::Evaluator`].
pub struct Reel {
    pub video: VideoSpec,
    #[serde(default)]
    pub brand: Brand,
    #[serde(default)]
    pub timing: TimingTable,
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub assets: AssetCatalog,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<MapSpec>,
    pub scenes: Vec<Scene>,
    /// Seed for particle fields and other deterministic randomness.
    #[serde(default)]
    pub seed: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Scene interval, either inline or a name in the timing table.
pub enum SceneRange {
    Inline(FrameRange),
    Named(String),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub id: String,
    pub range: SceneRange,
    /// Frames before `range.start` over which the scene fades in.
    #[serde(default)]
    pub fade_in: u64,
    /// Last frames of `range` over which the scene fades out.
    #[serde(default)]
    pub fade_out: u64,
    #[serde(default)]
    pub z: i32,
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    #[serde(default)]
    pub anchor: Anchor,
    /// First visible frame; visible from scene start when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appear: Option<FrameRef>,
    /// First hidden frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disappear: Option<FrameRef>,
    #[serde(default)]
    pub motions: Vec<Motion>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TextSource {
    /// Key into `content.texts`.
    Key { key: String },
    Literal(String),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// What an element draws. Colors and styles are brand table names.
pub enum ElementKind {
    Text {
        text: TextSource,
        style: String,
        color: String,
    },
    Photo {
        asset: String,
    },
    Marker {
        color: String,
    },
    Ring {
        color: String,
    },
    /// Curve from the element anchor to `to`.
    Arc {
        to: Anchor,
        color: String,
    },
    Counter {
        style: String,
        color: String,
        #[serde(default)]
        decimals: u32,
        #[serde(default)]
        suffix: String,
    },
    Particles {
        color: String,
        #[serde(default)]
        field: ParticleField,
    },
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Photo { .. } => "photo",
            Self::Marker { .. } => "marker",
            Self::Ring { .. } => "ring",
            Self::Arc { .. } => "arc",
            Self::Counter { .. } => "counter",
            Self::Particles { .. } => "particles",
        }
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            Self::Text { color, .. }
            | Self::Marker { color }
            | Self::Ring { color }
            | Self::Arc { color, .. }
            | Self::Counter { color, .. }
            | Self::Particles { color, .. } => Some(color),
            Self::Photo { .. } => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "at", rename_all = "snake_case")]
/// Where an element sits on the canvas.
pub enum Anchor {
    #[default]
    Center,
    Px {
        x: f64,
        y: f64,
    },
    /// Projected through the reel map.
    Geo {
        lat: f64,
        lng: f64,
    },
    /// Nationality pin from `content.pins`, projected through the reel map.
    Pin {
        country: String,
    },
    /// `content.hub`, projected through the reel map.
    Hub,
}

impl Reel {
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_reader(r: impl Read) -> ReelResult<Self> {
        Ok(serde_json::from_reader(r)?)
    }

    /// Load a reel document from disk. The result is not validated.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open reel '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn timeline(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: self.video.duration,
        }
    }

    pub fn scene_range(&self, scene: &Scene) -> ReelResult<FrameRange> {
        match &scene.range {
            SceneRange::Inline(r) => Ok(*r),
            SceneRange::Named(name) => self.timing.scene(name),
        }
    }

    /// Frames on which `scene` contributes: its range plus the fade-in lead.
    pub fn scene_window(&self, scene: &Scene) -> ReelResult<FrameRange> {
        let r = self.scene_range(scene)?;
        Ok(FrameRange {
            start: FrameIndex(r.start.0.saturating_sub(scene.fade_in)),
            end: r.end,
        })
    }

    fn project(&self, ll: LatLng, what: &str) -> ReelResult<Point> {
        let map = self.map.as_ref().ok_or_else(|| {
            ReelError::validation(format!("{what} anchor requires a reel map"))
        })?;
        Ok(map.projection.project(ll))
    }

    /// Canvas position of an anchor.
    pub fn resolve_anchor(&self, anchor: &Anchor) -> ReelResult<Point> {
        match anchor {
            Anchor::Center => Ok(self.video.canvas.center()),
            Anchor::Px { x, y } => Ok(Point::new(*x, *y)),
            Anchor::Geo { lat, lng } => {
                let ll = LatLng::new(*lat, *lng);
                ll.validate()?;
                self.project(ll, "geo")
            }
            Anchor::Pin { country } => {
                let ll = self.content.pin(country)?.lat_lng();
                self.project(ll, "pin")
            }
            Anchor::Hub => {
                let hub = self
                    .content
                    .hub
                    .ok_or_else(|| ReelError::validation("hub anchor requires content.hub"))?;
                self.project(hub, "hub")
            }
        }
    }

    /// Validate every cross-reference and numeric invariant of the reel.
    ///
    /// Evaluation of a validated reel only fails on frames outside the timeline.
    pub fn validate(&self) -> ReelResult<()> {
        if self.video.fps.num == 0 || self.video.fps.den == 0 {
            return Err(ReelError::validation("fps must have num>0 and den>0"));
        }
        if self.video.canvas.width == 0 || self.video.canvas.height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        if self.video.duration.0 == 0 {
            return Err(ReelError::validation("duration must be > 0 frames"));
        }

        self.timing.validate()?;
        self.brand.validate()?;
        self.content.validate()?;
        self.assets.validate()?;

        if let Some(map) = &self.map {
            map.projection.validate()?;
            if let Some(key) = &map.topology {
                self.require_asset(key, "map topology")?;
            }
        }
        for m in &self.content.team {
            self.require_asset(&m.headshot, &format!("team member '{}' headshot", m.name))?;
        }

        let mut scene_ids = BTreeSet::new();
        for scene in &self.scenes {
            if scene.id.trim().is_empty() {
                return Err(ReelError::validation("scene id must be non-empty"));
            }
            if !scene_ids.insert(scene.id.as_str()) {
                return Err(ReelError::validation(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }
            self.validate_scene(scene)?;
        }

        tracing::debug!(scenes = self.scenes.len(), "reel validated");
        Ok(())
    }

    fn require_asset(&self, key: &str, what: &str) -> ReelResult<()> {
        if self.assets.contains(key) {
            Ok(())
        } else {
            Err(ReelError::validation(format!(
                "{what} references missing asset key '{key}'"
            )))
        }
    }

    fn validate_scene(&self, scene: &Scene) -> ReelResult<()> {
        let range = self.scene_range(scene)?;
        if !range.is_ordered() {
            return Err(ReelError::validation(format!(
                "scene '{}' has invalid range (start > end)",
                scene.id
            )));
        }
        if range.end.0 > self.video.duration.0 {
            return Err(ReelError::validation(format!(
                "scene '{}' range exceeds reel duration",
                scene.id
            )));
        }
        if scene.fade_out > range.len_frames() {
            return Err(ReelError::validation(format!(
                "scene '{}' fade_out is longer than the scene",
                scene.id
            )));
        }

        let mut element_ids = BTreeSet::new();
        for el in &scene.elements {
            if el.id.trim().is_empty() {
                return Err(ReelError::validation(format!(
                    "scene '{}' has an element with an empty id",
                    scene.id
                )));
            }
            if !element_ids.insert(el.id.as_str()) {
                return Err(ReelError::validation(format!(
                    "scene '{}' has duplicate element id '{}'",
                    scene.id, el.id
                )));
            }
            self.validate_element(el)
                .map_err(|e| e.with_prefix(&format!("element '{}'", el.id)))?;
        }
        Ok(())
    }

    fn validate_element(&self, el: &Element) -> ReelResult<()> {
        self.resolve_anchor(&el.anchor)?;
        if let Some(color) = el.kind.color() {
            self.brand.color(color)?;
        }
        match &el.kind {
            ElementKind::Text { text, style, .. } => {
                self.brand.style(style)?;
                if let TextSource::Key { key } = text {
                    self.content.text(key)?;
                }
            }
            ElementKind::Photo { asset } => self.require_asset(asset, "photo")?,
            ElementKind::Counter {
                style, decimals, ..
            } => {
                self.brand.style(style)?;
                if *decimals > MAX_COUNTER_DECIMALS {
                    return Err(ReelError::validation(format!(
                        "counter decimals must be <= {MAX_COUNTER_DECIMALS}"
                    )));
                }
            }
            ElementKind::Arc { to, .. } => {
                self.resolve_anchor(to)?;
            }
            ElementKind::Particles { field, .. } => {
                if !(field.max_opacity.is_finite() && (0.0..=1.0).contains(&field.max_opacity)) {
                    return Err(ReelError::validation(
                        "particle max_opacity must be in [0, 1]",
                    ));
                }
                if !(field.duration.is_finite() && field.duration >= 0.0) {
                    return Err(ReelError::validation(
                        "particle duration must be finite and >= 0",
                    ));
                }
            }
            ElementKind::Marker { .. } | ElementKind::Ring { .. } => {}
        }

        let appear = el.appear.as_ref().map(|r| self.timing.resolve(r)).transpose()?;
        let disappear = el
            .disappear
            .as_ref()
            .map(|r| self.timing.resolve(r))
            .transpose()?;
        if let (Some(a), Some(d)) = (appear, disappear)
            && a > d
        {
            return Err(ReelError::validation("appear must be <= disappear"));
        }

        for m in &el.motions {
            m.validate(&self.timing)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
