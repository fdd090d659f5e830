//! Declarative piece settings and their application onto a prefab.
//!
//! A [`PieceConfig`] is a plain settings bag. [`PieceConfig::apply`] copies
//! it onto the [`Piece`] component of an existing prefab, resolving station
//! and item names through the [`MockRegistry`] so they can be bound after
//! every prefab has been loaded.

use crate::component::{Piece, Requirement, Sprite};
use crate::id::PrefabId;
use crate::mock::{MockKind, MockRegistry};
use crate::prefab::{PrefabError, PrefabStore};

// ---------------------------------------------------------------------------
// RequirementConfig
// ---------------------------------------------------------------------------

/// One crafting material of a piece, by item name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementConfig {
    /// Name of the item prefab.
    pub item: String,
    pub amount: u32,
    pub amount_per_level: u32,
    /// Whether the item is returned when the piece is deconstructed.
    pub recover: bool,
}

impl RequirementConfig {
    pub fn new(item: impl Into<String>, amount: u32) -> Self {
        Self {
            item: item.into(),
            amount,
            ..Default::default()
        }
    }

    /// Convert into the component representation. The item becomes a
    /// placeholder bound later.
    pub fn to_requirement(&self, mocks: &mut MockRegistry) -> Requirement {
        Requirement {
            item: mocks.create(MockKind::ItemDrop, &self.item),
            amount: self.amount,
            amount_per_level: self.amount_per_level,
            recover: self.recover,
        }
    }
}

impl Default for RequirementConfig {
    fn default() -> Self {
        Self {
            item: String::new(),
            amount: 1,
            amount_per_level: 0,
            recover: true,
        }
    }
}

// ---------------------------------------------------------------------------
// PieceConfig
// ---------------------------------------------------------------------------

/// Settings for a custom piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceConfig {
    pub description: String,
    /// Whether the piece is buildable.
    pub enabled: bool,
    pub allowed_in_dungeons: bool,
    /// Name of the piece table prefab this piece is added to.
    pub piece_table: Option<String>,
    /// Name of the station prefab required in close proximity.
    pub crafting_station: Option<String>,
    /// Name of the station prefab this piece upgrades.
    pub extend_station: Option<String>,
    /// Icon override. `None` keeps the prefab's icon.
    pub icon: Option<Sprite>,
    pub requirements: Vec<RequirementConfig>,
}

impl Default for PieceConfig {
    fn default() -> Self {
        Self {
            description: String::new(),
            enabled: true,
            allowed_in_dungeons: false,
            piece_table: None,
            crafting_station: None,
            extend_station: None,
            icon: None,
            requirements: Vec::new(),
        }
    }
}

/// What [`PieceConfig::apply`] did to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied {
        /// A station extension was attached by this call.
        attached_extension: bool,
    },
    /// The target has no piece component; nothing was changed.
    MissingPiece,
}

impl PieceConfig {
    /// Convert every requirement, preserving order and length.
    pub fn convert_requirements(&self, mocks: &mut MockRegistry) -> Vec<Requirement> {
        self.requirements
            .iter()
            .map(|r| r.to_requirement(mocks))
            .collect()
    }

    /// Apply these settings onto the piece component of `target`.
    ///
    /// A target without a piece is logged and left untouched. The
    /// requirement list is always replaced, even by an empty one, while the
    /// icon is only replaced when set. A station extension is attached when
    /// `extend_station` is set and the target does not carry one yet. An
    /// empty station name counts as unset.
    pub fn apply(
        &self,
        prefabs: &mut PrefabStore,
        mocks: &mut MockRegistry,
        target: PrefabId,
    ) -> Result<ApplyOutcome, PrefabError> {
        if !prefabs.contains(target) {
            return Err(PrefabError::NotFound(target));
        }
        if prefabs.piece(target).is_none() {
            log::warn!(
                "prefab '{}' has no piece component",
                prefabs.name(target).unwrap_or_default()
            );
            return Ok(ApplyOutcome::MissingPiece);
        }

        let resources = self.convert_requirements(mocks);
        let station = self
            .crafting_station
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| mocks.create(MockKind::CraftingStation, name));

        let piece: &mut Piece = prefabs
            .piece_mut(target)
            .ok_or(PrefabError::NotFound(target))?;
        piece.enabled = self.enabled;
        piece.allowed_in_dungeons = self.allowed_in_dungeons;
        if let Some(icon) = &self.icon {
            piece.icon = Some(icon.clone());
        }
        piece.resources = resources;
        if station.is_some() {
            piece.crafting_station = station;
        }

        let mut attached_extension = false;
        if let Some(name) = self.extend_station.as_deref().filter(|n| !n.is_empty()) {
            let station = mocks.create(MockKind::CraftingStation, name);
            if prefabs.station_extension(target).is_none() {
                prefabs.attach_station_extension(target)?;
                attached_extension = true;
            }
            if let Some(extension) = prefabs.station_extension_mut(target) {
                extension.crafting_station = Some(station);
            }
        }

        Ok(ApplyOutcome::Applied { attached_extension })
    }
}
