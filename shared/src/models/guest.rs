//! Guest Model
//!
//! Guests are owned by the external guest directory. The seating core only
//! reads identity and attributes and writes back the assignment fields.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Which side of the couple the guest belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestSide {
    Bride,
    Groom,
    Both,
}

impl GuestSide {
    /// Bride and groom sides oppose each other; `Both` opposes nobody
    pub fn opposes(&self, other: &GuestSide) -> bool {
        matches!(
            (self, other),
            (GuestSide::Bride, GuestSide::Groom) | (GuestSide::Groom, GuestSide::Bride)
        )
    }
}

/// Dietary requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dietary {
    Vegetarian,
    Vegan,
    GlutenFree,
    Halal,
    Kosher,
    #[serde(other)]
    Other,
}

/// Maximum number of free-form extension entries per guest
pub const MAX_EXTENSION_ENTRIES: usize = 16;

/// Extension map is full
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("extension map holds at most {MAX_EXTENSION_ENTRIES} entries")]
pub struct ExtensionMapFull;

/// Bounded string map for attributes without a named field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct ExtensionMap(BTreeMap<String, String>);

impl ExtensionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; new keys are refused once the map is full
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, ExtensionMapFull> {
        let key = key.into();
        if !self.0.contains_key(&key) && self.0.len() >= MAX_EXTENSION_ENTRIES {
            return Err(ExtensionMapFull);
        }
        Ok(self.0.insert(key, value.into()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl TryFrom<BTreeMap<String, String>> for ExtensionMap {
    type Error = ExtensionMapFull;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if map.len() > MAX_EXTENSION_ENTRIES {
            return Err(ExtensionMapFull);
        }
        Ok(Self(map))
    }
}

impl From<ExtensionMap> for BTreeMap<String, String> {
    fn from(map: ExtensionMap) -> Self {
        map.0
    }
}

/// Fixed-schema guest attributes used by scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuestAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<GuestSide>,
    /// Family / friend group identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub vip: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<Dietary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergens: Vec<String>,
    /// Lowercase free tags
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "ExtensionMap::is_empty")]
    pub extra: ExtensionMap,
}

impl GuestAttributes {
    /// VIP flag, a `vip` tag, or a group whose name mentions vip
    pub fn is_vip(&self) -> bool {
        self.vip
            || self.tags.iter().any(|t| t.eq_ignore_ascii_case("vip"))
            || self
                .group_id
                .as_deref()
                .is_some_and(|g| g.to_ascii_lowercase().contains("vip"))
    }

    /// Tags shared with `other`, ignoring the vip marker
    pub fn shared_tags<'a>(&'a self, other: &'a GuestAttributes) -> impl Iterator<Item = &'a str> {
        self.tags
            .intersection(&other.tags)
            .filter(|t| !t.eq_ignore_ascii_case("vip"))
            .map(String::as_str)
    }
}

/// Guest as seen by the seating core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    /// Additional people arriving with this guest (+1s, children)
    #[serde(default)]
    pub companion_count: u32,
    #[serde(default)]
    pub attributes: GuestAttributes,
    /// Active banquet table assignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    /// Active ceremony seat assignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_id: Option<i64>,
}

impl Guest {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            companion_count: 0,
            attributes: GuestAttributes::default(),
            table_id: None,
            seat_id: None,
        }
    }

    pub fn with_companions(mut self, companion_count: u32) -> Self {
        self.companion_count = companion_count;
        self
    }

    pub fn with_attributes(mut self, attributes: GuestAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// People occupying table places: the guest plus companions
    pub fn party_size(&self) -> u32 {
        1 + self.companion_count
    }

    pub fn is_vip(&self) -> bool {
        self.attributes.is_vip()
    }

    pub fn assignment(&self) -> AssignmentRef {
        AssignmentRef {
            table_id: self.table_id,
            seat_id: self.seat_id,
        }
    }
}

/// Assignment fields written back to the guest directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRef {
    pub table_id: Option<i64>,
    pub seat_id: Option<i64>,
}
