//! Role/skill catalog: the static document of skills, responsibilities and roles.
//!
//! Loaded once at startup (see `loader`) and never mutated afterwards. Handlers
//! share it behind an `Arc`.

pub mod loader;
pub mod validation;

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Tiers
// ────────────────────────────────────────────────────────────────────────────

/// Proficiency tier used to bucket a role's skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Basic,
    Intermediate,
    Advanced,
}

impl Tier {
    /// Fixed render order.
    pub const ALL: [Tier; 3] = [Tier::Basic, Tier::Intermediate, Tier::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Basic => "Basic",
            Tier::Intermediate => "Intermediate",
            Tier::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document tables
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Skill {
    pub desc: String,
    pub relevance: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Role {
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub skills: HashMap<Tier, Vec<String>>,
}

impl Role {
    /// Skill ids listed for `tier`, empty when the role omits the tier.
    pub fn skills_for(&self, tier: Tier) -> &[String] {
        self.skills.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// String-keyed table that keeps the key order of the source document.
///
/// A repeated key keeps its first position and takes the last value, which is
/// how `JSON.parse` treats duplicates.
#[derive(Debug, Clone)]
pub struct OrderedTable<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedTable<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> OrderedTable<V> {
    pub fn insert(&mut self, key: String, value: V) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

struct OrderedTableVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedTableVisitor<V> {
    type Value = OrderedTable<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = OrderedTable::default();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            table.insert(key, value);
        }
        Ok(table)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedTable<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedTableVisitor(PhantomData))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog
// ────────────────────────────────────────────────────────────────────────────

/// The complete document: skills, responsibilities and roles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    skills: OrderedTable<Skill>,
    #[serde(default)]
    responsibilities: OrderedTable<String>,
    #[serde(default)]
    roles: OrderedTable<Role>,
}

impl Catalog {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn responsibility(&self, id: &str) -> Option<&str> {
        self.responsibilities.get(id).map(String::as_str)
    }

    /// Role names in document order.
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles.keys()
    }

    pub fn roles(&self) -> impl Iterator<Item = (&str, &Role)> {
        self.roles.iter()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn responsibility_count(&self) -> usize {
        self.responsibilities.len()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}
