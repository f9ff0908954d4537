// src/groups.rs
//! Static registry of named preset delegate groups
use serde::Deserialize;

/// A named, predefined list of delegate usernames selectable as a unit.
/// Member lists may overlap between groups.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetGroup {
    pub name: String,
    pub members: Vec<String>,
}

/// Load-time-provided mapping of group name to ordered member list.
///
/// The registry is read-only input: it is built once (typically from a
/// bundled JSON file) and never mutated afterwards. Registration order is
/// preserved so that active-set re-derivation is deterministic.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct GroupRegistry {
    groups: Vec<PresetGroup>,
}

impl GroupRegistry {
    pub fn new(groups: Vec<PresetGroup>) -> Self {
        Self { groups }
    }

    pub fn builder() -> GroupRegistryBuilder {
        GroupRegistryBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&PresetGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn members(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(|g| g.members.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PresetGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Builder for assembling a registry in code (tests, embedded defaults)
#[derive(Debug, Default)]
pub struct GroupRegistryBuilder {
    groups: Vec<PresetGroup>,
}

impl GroupRegistryBuilder {
    pub fn group<S, I, M>(mut self, name: S, members: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        self.groups.push(PresetGroup {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn build(self) -> GroupRegistry {
        GroupRegistry::new(self.groups)
    }
}
