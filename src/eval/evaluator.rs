use crate::{
    animation::{
        anim::{SampleCtx, sample_motions},
        motion::{StrokeDash, crossfade, format_counter},
        particles::Particle,
    },
    composition::model::{Element, ElementKind, Reel, Scene, TextSource},
    foundation::{
        core::{FrameIndex, Point, Rgba8, Vec2},
        error::{ReelError, ReelResult},
        math::{clamp01, stable_hash64},
    },
    geo::arc::Arc,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Every visual property the compositor needs for one frame.
pub struct FrameOutput {
    pub frame: FrameIndex,
    /// Visible scenes in painter's order.
    pub scenes: Vec<SceneFrame>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneFrame {
    pub id: String,
    pub z: i32,
    /// Crossfade opacity applied on top of each element's own opacity.
    pub opacity: f64,
    pub elements: Vec<ElementFrame>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Evaluated element. Optional channels are omitted when no motion or kind sets them.
pub struct ElementFrame {
    pub id: String,
    pub kind: &'static str,
    /// Element opacity in `[0, 1]`, before scene opacity.
    pub opacity: f64,
    pub translate: Vec2,
    pub scale: f64,
    /// Anchor position plus `translate`.
    pub position: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<StrokeDash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub particles: Vec<Particle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arc: Option<ArcFrame>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ArcFrame {
    pub from: Point,
    pub control: Point,
    pub to: Point,
    pub length: f64,
    /// SVG path data.
    pub d: String,
}

/// Stateless evaluator from reel timeline to frame output.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(reel))]
    /// Validate the reel, then evaluate one frame.
    pub fn eval_frame(reel: &Reel, frame: FrameIndex) -> ReelResult<FrameOutput> {
        reel.validate()?;
        Self::eval_frame_unchecked(reel, frame)
    }

    /// Evaluate one frame of a reel already known to be valid.
    pub(crate) fn eval_frame_unchecked(reel: &Reel, frame: FrameIndex) -> ReelResult<FrameOutput> {
        if frame.0 >= reel.video.duration.0 {
            return Err(ReelError::evaluation(format!(
                "frame {} is out of bounds (duration {})",
                frame.0, reel.video.duration.0
            )));
        }

        let mut scenes_with_key: Vec<((i32, usize), SceneFrame)> = Vec::new();
        for (scene_index, scene) in reel.scenes.iter().enumerate() {
            if !reel.scene_window(scene)?.contains(frame) {
                continue;
            }
            let sf = eval_scene(reel, scene, frame)?;
            scenes_with_key.push(((scene.z, scene_index), sf));
        }

        scenes_with_key.sort_by(|a, b| a.0.cmp(&b.0));
        let scenes = scenes_with_key.into_iter().map(|(_, s)| s).collect();

        Ok(FrameOutput { frame, scenes })
    }
}

fn eval_scene(reel: &Reel, scene: &Scene, frame: FrameIndex) -> ReelResult<SceneFrame> {
    let range = reel.scene_range(scene)?;
    let opacity = crossfade(
        frame.as_f64(),
        range.start.as_f64(),
        range.end.as_f64(),
        scene.fade_in as f64,
        scene.fade_out as f64,
    );

    let mut elements = Vec::with_capacity(scene.elements.len());
    for (index, el) in scene.elements.iter().enumerate() {
        if !is_visible(reel, el, frame)? {
            continue;
        }
        let ef = eval_element(reel, el, index, frame, range.start.as_f64())
            .map_err(|e| e.with_prefix(&format!("scene '{}' element '{}'", scene.id, el.id)))?;
        elements.push(ef);
    }

    Ok(SceneFrame {
        id: scene.id.clone(),
        z: scene.z,
        opacity,
        elements,
    })
}

fn is_visible(reel: &Reel, el: &Element, frame: FrameIndex) -> ReelResult<bool> {
    let f = i64::try_from(frame.0).unwrap_or(i64::MAX);
    if let Some(appear) = &el.appear
        && f < reel.timing.resolve(appear)?
    {
        return Ok(false);
    }
    if let Some(disappear) = &el.disappear
        && f >= reel.timing.resolve(disappear)?
    {
        return Ok(false);
    }
    Ok(true)
}

fn eval_element(
    reel: &Reel,
    el: &Element,
    index: usize,
    frame: FrameIndex,
    scene_start: f64,
) -> ReelResult<ElementFrame> {
    let anchor = reel.resolve_anchor(&el.anchor)?;
    let arc = match &el.kind {
        ElementKind::Arc { to, .. } => Some(Arc::between(anchor, reel.resolve_anchor(to)?)),
        _ => None,
    };

    let ctx = SampleCtx {
        frame,
        fps: reel.video.fps,
        element_index: u32::try_from(index).unwrap_or(u32::MAX),
        path_length: arc.map(|a| a.estimated_length()),
    };
    let state = sample_motions(&el.motions, &ctx, &reel.timing)?;

    let color = el.kind.color().map(|c| reel.brand.color(c)).transpose()?;
    let mut out = ElementFrame {
        id: el.id.clone(),
        kind: el.kind.name(),
        opacity: clamp01(state.opacity),
        translate: state.translate,
        scale: state.scale,
        position: anchor + state.translate,
        color,
        style: None,
        text: None,
        asset: None,
        radius: state.radius,
        dash: state.dash,
        value: state.value,
        display: None,
        blur: state.blur,
        gradient_angle: state.gradient_angle,
        drift: state.drift,
        rotation: state.rotation,
        reveal: state.reveal,
        particles: Vec::new(),
        arc: arc.map(|a| ArcFrame {
            from: a.from,
            control: a.control,
            to: a.to,
            length: a.estimated_length(),
            d: a.svg_path(),
        }),
    };

    match &el.kind {
        ElementKind::Text { text, style, .. } => {
            out.style = Some(style.clone());
            out.text = Some(match text {
                TextSource::Literal(s) => s.clone(),
                TextSource::Key { key } => reel.content.text(key)?.to_string(),
            });
        }
        ElementKind::Photo { asset } => {
            out.asset = Some(reel.assets.path(asset)?);
        }
        ElementKind::Counter {
            style,
            decimals,
            suffix,
            ..
        } => {
            let v = state.value.unwrap_or(0.0);
            out.style = Some(style.clone());
            out.value = Some(v);
            out.display = Some(format_counter(v, *decimals, suffix));
        }
        ElementKind::Particles { field, .. } => {
            let seed = stable_hash64(reel.seed, &el.id);
            out.particles = field.sample(frame.as_f64(), scene_start, seed);
        }
        ElementKind::Arc { .. } => {
            // Undrawn arcs without a stroke motion are shown complete.
            if out.dash.is_none()
                && let Some(a) = &out.arc
            {
                out.dash = Some(StrokeDash {
                    dash_array: a.length,
                    dash_offset: 0.0,
                });
            }
        }
        ElementKind::Marker { .. } | ElementKind::Ring { .. } => {}
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
