//! Selection → view model.
//!
//! Pure data transformation with no markup involved, so every ordering and
//! deduplication rule can be tested against fixture catalogs.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{Catalog, Tier};
use crate::render::natural::natural_cmp;

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Unknown role '{0}'")]
    UnknownRole(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Selection
// ────────────────────────────────────────────────────────────────────────────

/// The chosen role names, in selection order, without repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    roles: Vec<String>,
}

impl Selection {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let roles = roles
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| seen.insert(name.clone()))
            .collect();
        Self { roles }
    }

    /// Collects every `role` pair out of a decoded query string.
    pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
        Self::new(
            pairs
                .iter()
                .filter(|(key, _)| key == "role")
                .map(|(_, value)| value.as_str()),
        )
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// View model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleDescription {
    pub name: String,
    pub description: String,
}

/// `text` is `None` when the id is missing from the responsibilities table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsibilityItem {
    pub id: String,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRow {
    pub id: String,
    pub desc: Option<String>,
    pub relevance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierSection {
    pub tier: Tier,
    pub rows: Vec<SkillRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoleView {
    pub descriptions: Vec<RoleDescription>,
    pub responsibilities: Vec<ResponsibilityItem>,
    /// Non-empty tiers only, in `Tier::ALL` order.
    pub tiers: Vec<TierSection>,
}

impl RoleView {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

/// Ordered union: first occurrence wins, later repeats are dropped.
fn push_unique<'a>(out: &mut Vec<&'a str>, seen: &mut HashSet<&'a str>, id: &'a str) {
    if seen.insert(id) {
        out.push(id);
    }
}

pub fn build_view(catalog: &Catalog, selection: &Selection) -> Result<RoleView, RenderError> {
    if selection.is_empty() {
        return Ok(RoleView::empty());
    }

    let roles = selection
        .roles()
        .iter()
        .map(|name| {
            catalog
                .role(name)
                .map(|role| (name.as_str(), role))
                .ok_or_else(|| RenderError::UnknownRole(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let descriptions = roles
        .iter()
        .map(|(name, role)| RoleDescription {
            name: name.to_string(),
            description: role.description.clone(),
        })
        .collect();

    let mut responsibility_ids = Vec::new();
    let mut seen = HashSet::new();
    for (_, role) in &roles {
        for id in &role.responsibilities {
            push_unique(&mut responsibility_ids, &mut seen, id);
        }
    }
    let responsibilities = responsibility_ids
        .into_iter()
        .map(|id| ResponsibilityItem {
            id: id.to_string(),
            text: catalog.responsibility(id).map(str::to_string),
        })
        .collect();

    let mut tiers = Vec::new();
    for tier in Tier::ALL {
        let mut ids = Vec::new();
        let mut seen = HashSet::new();
        for (_, role) in &roles {
            for id in role.skills_for(tier) {
                push_unique(&mut ids, &mut seen, id);
            }
        }
        if ids.is_empty() {
            continue;
        }
        ids.sort_by(|a, b| natural_cmp(a, b));

        let rows = ids
            .into_iter()
            .map(|id| {
                let skill = catalog.skill(id);
                SkillRow {
                    id: id.to_string(),
                    desc: skill.map(|s| s.desc.clone()),
                    relevance: skill.map(|s| s.relevance.clone()),
                }
            })
            .collect();
        tiers.push(TierSection { tier, rows });
    }

    Ok(RoleView {
        descriptions,
        responsibilities,
        tiers,
    })
}
