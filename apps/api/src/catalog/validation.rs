use std::fmt;
use std::str::FromStr;

use crate::catalog::{Catalog, Tier};

/// How the loader treats identifiers a role references but the tables lack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferencePolicy {
    /// Log each gap and render a visible placeholder in its place.
    #[default]
    Placeholder,
    /// Refuse to load a document with any gap.
    Reject,
}

impl FromStr for ReferencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(ReferencePolicy::Placeholder),
            "reject" => Ok(ReferencePolicy::Reject),
            other => Err(format!(
                "unknown reference policy '{other}' (expected 'placeholder' or 'reject')"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReference {
    Responsibility { role: String, id: String },
    Skill { role: String, tier: Tier, id: String },
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReference::Responsibility { role, id } => {
                write!(f, "role '{role}' references unknown responsibility '{id}'")
            }
            UnresolvedReference::Skill { role, tier, id } => {
                write!(f, "role '{role}' references unknown {tier} skill '{id}'")
            }
        }
    }
}

/// Lists every identifier referenced by a role that is absent from its table.
///
/// Order: roles in document order; within a role, responsibilities first, then
/// skills tier by tier.
pub fn find_unresolved(catalog: &Catalog) -> Vec<UnresolvedReference> {
    let mut unresolved = Vec::new();

    for (name, role) in catalog.roles() {
        for id in &role.responsibilities {
            if catalog.responsibility(id).is_none() {
                unresolved.push(UnresolvedReference::Responsibility {
                    role: name.to_string(),
                    id: id.clone(),
                });
            }
        }

        for tier in Tier::ALL {
            for id in role.skills_for(tier) {
                if catalog.skill(id).is_none() {
                    unresolved.push(UnresolvedReference::Skill {
                        role: name.to_string(),
                        tier,
                        id: id.clone(),
                    });
                }
            }
        }
    }

    unresolved
}
