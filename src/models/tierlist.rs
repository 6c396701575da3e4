//! Tierlist payload model.
//!
//! A tierlist is an ordered list of tiers; each tier may carry a nested
//! list of ranked entries. The nested list is homogeneous: all characters
//! or all weapons, never mixed. That constraint is enforced by the
//! untagged [`TierEntries`] union, so a mixed array fails to deserialize
//! and never reaches the store.

use serde::{Deserialize, Serialize};

use crate::entities::tierlists;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Character,
    Weapon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub weapon_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    /// Reference to the weapon this character wields.
    pub weapon: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub nested: Vec<Weapon>,
}

/// One variant per tier: deserialization tries characters first, then
/// weapons. A mixed array satisfies neither arm and is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TierEntries {
    Characters(Vec<Character>),
    Weapons(Vec<Weapon>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<TierEntries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tierlist {
    pub tiers: Vec<Tier>,
}

/// A persisted tierlist with its generated id and owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTierlist {
    pub id: String,
    pub user_id: String,
    pub tiers: Vec<Tier>,
}

impl TryFrom<tierlists::Model> for SavedTierlist {
    type Error = serde_json::Error;

    fn try_from(model: tierlists::Model) -> Result<Self, Self::Error> {
        let tiers = serde_json::from_value(model.tiers)?;
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            tiers,
        })
    }
}
