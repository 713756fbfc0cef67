use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::error::{ReelError, ReelResult},
    geo::projection::LatLng,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Country {
    pub order: u32,
    pub name: String,
    pub code: String,
    pub flag: String,
    pub sob_percent: f64, // share of business
    pub population: String,
    pub ppp_capita: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub nationality: String,
    pub flag: String,
    /// Asset key of the portrait.
    pub headshot: String,
    pub grid_row: u32,
    pub grid_col: u32,
    pub reveal_order: u32,
    #[serde(default)]
    pub spotlight: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NationalityPin {
    pub country: String,
    pub lat: f64,
    pub lng: f64,
}

impl NationalityPin {
    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SummaryStat {
    pub value: f64,
    #[serde(default)]
    pub suffix: String,
    pub label: String,
}

/// Copy and data records shown by the reel.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Content {
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub team: Vec<TeamMember>,
    #[serde(default)]
    pub pins: Vec<NationalityPin>,
    #[serde(default)]
    pub stats: BTreeMap<String, Vec<SummaryStat>>,
    #[serde(default)]
    pub texts: BTreeMap<String, String>,
    /// Origin of the closing nationality arcs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub: Option<LatLng>,
}

fn ensure_unique<'a>(what: &str, keys: impl IntoIterator<Item = &'a str>) -> ReelResult<()> {
    let mut seen = BTreeSet::new();
    for k in keys {
        if k.trim().is_empty() {
            return Err(ReelError::validation(format!("{what} key must be non-empty")));
        }
        if !seen.insert(k) {
            return Err(ReelError::validation(format!("duplicate {what} '{k}'")));
        }
    }
    Ok(())
}

impl Content {
    pub fn validate(&self) -> ReelResult<()> {
        ensure_unique("country code", self.countries.iter().map(|c| c.code.as_str()))?;
        ensure_unique("team member", self.team.iter().map(|m| m.name.as_str()))?;
        ensure_unique("pin country", self.pins.iter().map(|p| p.country.as_str()))?;

        for c in &self.countries {
            if !(c.sob_percent.is_finite() && (0.0..=100.0).contains(&c.sob_percent)) {
                return Err(ReelError::validation(format!(
                    "country '{}' sob_percent must be in [0, 100]",
                    c.code
                )));
            }
        }

        let mut cells = BTreeSet::new();
        let mut orders = BTreeSet::new();
        for m in &self.team {
            if !cells.insert((m.grid_row, m.grid_col)) {
                return Err(ReelError::validation(format!(
                    "team member '{}' shares grid cell ({}, {})",
                    m.name, m.grid_row, m.grid_col
                )));
            }
            if !orders.insert(m.reveal_order) {
                return Err(ReelError::validation(format!(
                    "team member '{}' reuses reveal_order {}",
                    m.name, m.reveal_order
                )));
            }
        }

        for p in &self.pins {
            p.lat_lng()
                .validate()
                .map_err(|e| e.with_prefix(&format!("pin '{}'", p.country)))?;
        }
        if let Some(hub) = self.hub {
            hub.validate()?;
        }
        for (group, stats) in &self.stats {
            if stats.iter().any(|s| !s.value.is_finite()) {
                return Err(ReelError::validation(format!(
                    "stat group '{group}' has a non-finite value"
                )));
            }
        }
        Ok(())
    }

    pub fn country(&self, code: &str) -> ReelResult<&Country> {
        self.countries
            .iter()
            .find(|c| c.code == code)
            .ok_or_else(|| ReelError::validation(format!("unknown country code '{code}'")))
    }

    pub fn member(&self, name: &str) -> ReelResult<&TeamMember> {
        self.team
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| ReelError::validation(format!("unknown team member '{name}'")))
    }

    pub fn pin(&self, country: &str) -> ReelResult<&NationalityPin> {
        self.pins
            .iter()
            .find(|p| p.country == country)
            .ok_or_else(|| ReelError::validation(format!("unknown nationality pin '{country}'")))
    }

    pub fn stat(&self, group: &str, index: usize) -> ReelResult<&SummaryStat> {
        self.stats
            .get(group)
            .and_then(|g| g.get(index))
            .ok_or_else(|| ReelError::validation(format!("unknown stat '{group}[{index}]'")))
    }

    pub fn text(&self, key: &str) -> ReelResult<&str> {
        self.texts
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ReelError::validation(format!("unknown text key '{key}'")))
    }

    /// Team members in reveal order.
    pub fn reveal_sequence(&self) -> Vec<&TeamMember> {
        let mut v: Vec<&TeamMember> = self.team.iter().collect();
        v.sort_by_key(|m| m.reveal_order);
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/content.rs"]
mod tests;
