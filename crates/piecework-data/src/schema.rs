//! Serde data file structs for custom piece definitions.
//!
//! These structs define the on-disk format of a `pieces` data file. They are
//! deserialized from RON, JSON, or TOML and then turned into
//! [`PieceConfig`]s by the loader.

use piecework_core::component::Sprite;
use piecework_core::config::{PieceConfig, RequirementConfig};
use serde::{Deserialize, Deserializer};

// ===========================================================================
// Requirements
// ===========================================================================

/// A crafting material entry, supporting both the short tuple form and the
/// full form with per-level amount and recovery flag.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RequirementData {
    /// Short form: `("item_name", amount)`, recoverable, no per-level cost.
    Short(String, u32),
    /// Full form with explicit fields.
    Full {
        item: String,
        #[serde(default = "default_amount")]
        amount: u32,
        #[serde(default)]
        amount_per_level: u32,
        #[serde(default = "default_true")]
        recover: bool,
    },
}

fn default_amount() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl RequirementData {
    pub fn to_config(&self) -> RequirementConfig {
        match self {
            RequirementData::Short(item, amount) => RequirementConfig::new(item.clone(), *amount),
            RequirementData::Full {
                item,
                amount,
                amount_per_level,
                recover,
            } => RequirementConfig {
                item: item.clone(),
                amount: *amount,
                amount_per_level: *amount_per_level,
                recover: *recover,
            },
        }
    }
}

// ===========================================================================
// Pieces
// ===========================================================================

/// A custom piece definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct PieceData {
    pub name: String,
    /// Prefab to clone the piece from.
    #[serde(default, deserialize_with = "non_empty")]
    pub base: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub allowed_in_dungeons: bool,
    #[serde(default, deserialize_with = "non_empty")]
    pub piece_table: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub crafting_station: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub extend_station: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub icon: Option<String>,
    #[serde(default)]
    pub requirements: Vec<RequirementData>,
}

/// Read a plain string field, treating `""` as unset.
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok((!value.is_empty()).then_some(value))
}

impl PieceData {
    pub fn to_config(&self) -> PieceConfig {
        PieceConfig {
            description: self.description.clone(),
            enabled: self.enabled,
            allowed_in_dungeons: self.allowed_in_dungeons,
            piece_table: self.piece_table.clone(),
            crafting_station: self.crafting_station.clone(),
            extend_station: self.extend_station.clone(),
            icon: self.icon.clone().map(Sprite),
            requirements: self
                .requirements
                .iter()
                .map(RequirementData::to_config)
                .collect(),
        }
    }
}

// ===========================================================================
// TOML wrapper
// ===========================================================================

/// Wrapper for a list of pieces in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlPieces {
    pub pieces: Vec<PieceData>,
}

// ===========================================================================
// Tests
// ===========================================================================
