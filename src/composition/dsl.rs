use crate::{
    animation::anim::Motion,
    composition::model::{
        Anchor, Element, ElementKind, MapSpec, Reel, Scene, SceneRange, VideoSpec,
    },
    config::{
        assets::AssetCatalog,
        brand::Brand,
        content::Content,
        timing::{FrameRef, TimingTable},
    },
    foundation::{
        core::{Canvas, Fps, FrameIndex, FrameRange},
        error::{ReelError, ReelResult},
    },
};

pub struct ReelBuilder {
    video: VideoSpec,
    seed: u64,
    brand: Brand,
    timing: TimingTable,
    content: Content,
    assets: AssetCatalog,
    map: Option<MapSpec>,
    scenes: Vec<Scene>,
}

impl ReelBuilder {
    pub fn new(fps: Fps, canvas: Canvas, duration: FrameIndex) -> Self {
        Self {
            video: VideoSpec {
                canvas,
                fps,
                duration,
            },
            seed: 0,
            brand: Brand::default(),
            timing: TimingTable::default(),
            content: Content::default(),
            assets: AssetCatalog::default(),
            map: None,
            scenes: Vec::new(),
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn brand(mut self, brand: Brand) -> Self {
        self.brand = brand;
        self
    }

    pub fn content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    pub fn map(mut self, map: MapSpec) -> Self {
        self.map = Some(map);
        self
    }

    pub fn timing_scene(mut self, name: impl Into<String>, range: FrameRange) -> ReelResult<Self> {
        let name = name.into();
        if self.timing.scenes.contains_key(&name) {
            return Err(ReelError::validation(format!(
                "duplicate timing scene '{name}'"
            )));
        }
        self.timing.scenes.insert(name, range);
        Ok(self)
    }

    pub fn cue(mut self, name: impl Into<String>, frame: i64) -> ReelResult<Self> {
        let name = name.into();
        if self.timing.cues.contains_key(&name) {
            return Err(ReelError::validation(format!("duplicate cue '{name}'")));
        }
        self.timing.cues.insert(name, frame);
        Ok(self)
    }

    pub fn asset(mut self, key: impl Into<String>, path: impl Into<String>) -> ReelResult<Self> {
        let key = key.into();
        if self.assets.contains(&key) {
            return Err(ReelError::validation(format!(
                "duplicate asset key '{key}'"
            )));
        }
        self.assets.insert(key, path);
        Ok(self)
    }

    pub fn scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    pub fn build(self) -> ReelResult<Reel> {
        let reel = Reel {
            video: self.video,
            brand: self.brand,
            timing: self.timing,
            content: self.content,
            assets: self.assets,
            map: self.map,
            scenes: self.scenes,
            seed: self.seed,
        };
        reel.validate()?;
        Ok(reel)
    }
}

pub struct SceneBuilder {
    id: String,
    range: SceneRange,
    fade_in: u64,
    fade_out: u64,
    z: i32,
    elements: Vec<Element>,
}

impl SceneBuilder {
    pub fn new(id: impl Into<String>, range: FrameRange) -> Self {
        Self::with_range(id, SceneRange::Inline(range))
    }

    /// Scene whose interval comes from the timing table.
    pub fn named(id: impl Into<String>, timing_name: impl Into<String>) -> Self {
        Self::with_range(id, SceneRange::Named(timing_name.into()))
    }

    fn with_range(id: impl Into<String>, range: SceneRange) -> Self {
        Self {
            id: id.into(),
            range,
            fade_in: 0,
            fade_out: 0,
            z: 0,
            elements: Vec::new(),
        }
    }

    pub fn fades(mut self, fade_in: u64, fade_out: u64) -> Self {
        self.fade_in = fade_in;
        self.fade_out = fade_out;
        self
    }

    pub fn z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn build(self) -> ReelResult<Scene> {
        if self.id.trim().is_empty() {
            return Err(ReelError::validation("scene id must be non-empty"));
        }
        Ok(Scene {
            id: self.id,
            range: self.range,
            fade_in: self.fade_in,
            fade_out: self.fade_out,
            z: self.z,
            elements: self.elements,
        })
    }
}

pub struct ElementBuilder {
    id: String,
    kind: ElementKind,
    anchor: Anchor,
    appear: Option<FrameRef>,
    disappear: Option<FrameRef>,
    motions: Vec<Motion>,
}

impl ElementBuilder {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            anchor: Anchor::Center,
            appear: None,
            disappear: None,
            motions: Vec::new(),
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn appear(mut self, at: impl Into<FrameRef>) -> Self {
        self.appear = Some(at.into());
        self
    }

    pub fn disappear(mut self, at: impl Into<FrameRef>) -> Self {
        self.disappear = Some(at.into());
        self
    }

    pub fn motion(mut self, m: Motion) -> Self {
        self.motions.push(m);
        self
    }

    pub fn build(self) -> ReelResult<Element> {
        if self.id.trim().is_empty() {
            return Err(ReelError::validation("element id must be non-empty"));
        }
        Ok(Element {
            id: self.id,
            kind: self.kind,
            anchor: self.anchor,
            appear: self.appear,
            disappear: self.disappear,
            motions: self.motions,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
