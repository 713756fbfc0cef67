use std::collections::BTreeMap;

use crate::foundation::{
    core::FrameRange,
    error::{ReelError, ReelResult},
};

/// A frame number written either literally or through the timing table.
///
/// JSON forms: `765`, `"ksa_pin_drop"`, `{ "cue": "pin_cascade", "offset": 27 }`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FrameRef {
    Frame(i64),
    Cue(String),
    Offset { cue: String, offset: i64 },
}

impl From<i64> for FrameRef {
    fn from(f: i64) -> Self {
        Self::Frame(f)
    }
}

impl From<&str> for FrameRef {
    fn from(cue: &str) -> Self {
        Self::Cue(cue.to_string())
    }
}

impl FrameRef {
    pub fn offset(cue: impl Into<String>, offset: i64) -> Self {
        Self::Offset {
            cue: cue.into(),
            offset,
        }
    }
}

/// Named scene intervals and appear-frame cues for one reel.
///
/// Intervals may overlap on purpose (crossfades); only `start <= end` is enforced.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingTable {
    #[serde(default)]
    pub scenes: BTreeMap<String, FrameRange>,
    #[serde(default)]
    pub cues: BTreeMap<String, i64>,
}

impl TimingTable {
    pub fn validate(&self) -> ReelResult<()> {
        for (name, range) in &self.scenes {
            if name.trim().is_empty() {
                return Err(ReelError::validation("timing scene name must be non-empty"));
            }
            if !range.is_ordered() {
                return Err(ReelError::validation(format!(
                    "timing scene '{name}' has start > end"
                )));
            }
        }
        if self.cues.keys().any(|k| k.trim().is_empty()) {
            return Err(ReelError::validation("timing cue name must be non-empty"));
        }
        Ok(())
    }

    pub fn cue(&self, name: &str) -> ReelResult<i64> {
        self.cues
            .get(name)
            .copied()
            .ok_or_else(|| ReelError::validation(format!("unknown timing cue '{name}'")))
    }

    pub fn scene(&self, name: &str) -> ReelResult<FrameRange> {
        self.scenes
            .get(name)
            .copied()
            .ok_or_else(|| ReelError::validation(format!("unknown timing scene '{name}'")))
    }

    pub fn resolve(&self, r: &FrameRef) -> ReelResult<i64> {
        match r {
            FrameRef::Frame(f) => Ok(*f),
            FrameRef::Cue(name) => self.cue(name),
            FrameRef::Offset { cue, offset } => Ok(self.cue(cue)?.saturating_add(*offset)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/timing.rs"]
mod tests;
