use std::collections::BTreeMap;

use crate::foundation::{
    core::Rgba8,
    error::{ReelError, ReelResult},
};

/// One row of the typography scale.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypeStyle {
    pub font_size: f64,
    pub font_weight: u16,
    #[serde(default)]
    pub letter_spacing: f64,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
}

fn default_line_height() -> f64 {
    1.2
}

impl TypeStyle {
    fn validate(&self, name: &str) -> ReelResult<()> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ReelError::validation(format!(
                "type style '{name}' font_size must be finite and > 0"
            )));
        }
        if !(1..=1000).contains(&self.font_weight) {
            return Err(ReelError::validation(format!(
                "type style '{name}' font_weight must be in 1..=1000"
            )));
        }
        if !self.letter_spacing.is_finite()
            || !(self.line_height.is_finite() && self.line_height > 0.0)
        {
            return Err(ReelError::validation(format!(
                "type style '{name}' spacing values must be finite"
            )));
        }
        Ok(())
    }
}

/// Brand palette, type scale and spacing constants.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Brand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default)]
    pub colors: BTreeMap<String, Rgba8>,
    #[serde(default)]
    pub typography: BTreeMap<String, TypeStyle>,
    #[serde(default)]
    pub spacing: BTreeMap<String, f64>,
}

impl Brand {
    pub fn validate(&self) -> ReelResult<()> {
        if self
            .colors
            .keys()
            .chain(self.typography.keys())
            .chain(self.spacing.keys())
            .any(|k| k.trim().is_empty())
        {
            return Err(ReelError::validation("brand table keys must be non-empty"));
        }
        for (name, style) in &self.typography {
            style.validate(name)?;
        }
        for (name, v) in &self.spacing {
            if !v.is_finite() {
                return Err(ReelError::validation(format!(
                    "spacing '{name}' must be finite"
                )));
            }
        }
        Ok(())
    }

    pub fn color(&self, name: &str) -> ReelResult<Rgba8> {
        self.colors
            .get(name)
            .copied()
            .ok_or_else(|| ReelError::validation(format!("unknown brand color '{name}'")))
    }

    pub fn style(&self, name: &str) -> ReelResult<&TypeStyle> {
        self.typography
            .get(name)
            .ok_or_else(|| ReelError::validation(format!("unknown type style '{name}'")))
    }

    pub fn spacing(&self, name: &str) -> ReelResult<f64> {
        self.spacing
            .get(name)
            .copied()
            .ok_or_else(|| ReelError::validation(format!("unknown spacing '{name}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/brand.rs"]
mod tests;
