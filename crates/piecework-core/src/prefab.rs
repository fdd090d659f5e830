//! Prefab store: named object templates and their components.
//!
//! Prefabs live in a `SlotMap` with a unique-name index. Components are kept
//! in a [`ComponentStorage`] keyed by the same [`PrefabId`], so removing a
//! prefab removes every component it carried.

use crate::component::*;
use crate::id::PrefabId;
use slotmap::SlotMap;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during prefab operations.
#[derive(Debug, thiserror::Error)]
pub enum PrefabError {
    #[error("prefab not found: {0:?}")]
    NotFound(PrefabId),
    #[error("no prefab named '{0}'")]
    NameNotFound(String),
    #[error("duplicate prefab name '{0}'")]
    DuplicateName(String),
}

// ---------------------------------------------------------------------------
// Core data structures
// ---------------------------------------------------------------------------

/// Per-prefab data stored in the prefab store.
#[derive(Debug, Clone)]
pub struct PrefabData {
    pub name: String,
}

/// All known prefabs plus their components.
#[derive(Debug, Clone, Default)]
pub struct PrefabStore {
    prefabs: SlotMap<PrefabId, PrefabData>,
    name_to_id: HashMap<String, PrefabId>,
    components: ComponentStorage,
}

impl PrefabStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty prefab with a unique name.
    pub fn create(&mut self, name: &str) -> Result<PrefabId, PrefabError> {
        if self.name_to_id.contains_key(name) {
            return Err(PrefabError::DuplicateName(name.to_string()));
        }
        let id = self.prefabs.insert(PrefabData {
            name: name.to_string(),
        });
        self.name_to_id.insert(name.to_string(), id);
        Ok(id)
    }

    /// Create a new prefab carrying copies of every component of `base`.
    pub fn clone_prefab(&mut self, base: &str, new_name: &str) -> Result<PrefabId, PrefabError> {
        let source = self.require(base)?;
        let id = self.create(new_name)?;
        self.components.copy_prefab(source, id);
        Ok(id)
    }

    /// Remove a prefab and all of its components.
    pub fn remove(&mut self, id: PrefabId) -> Result<PrefabData, PrefabError> {
        let data = self.prefabs.remove(id).ok_or(PrefabError::NotFound(id))?;
        self.name_to_id.remove(&data.name);
        self.components.remove_prefab(id);
        Ok(data)
    }

    pub fn find(&self, name: &str) -> Option<PrefabId> {
        self.name_to_id.get(name).copied()
    }

    /// Like [`find`](Self::find), but a missing name is an error.
    pub fn require(&self, name: &str) -> Result<PrefabId, PrefabError> {
        self.find(name)
            .ok_or_else(|| PrefabError::NameNotFound(name.to_string()))
    }

    pub fn name(&self, id: PrefabId) -> Option<&str> {
        self.prefabs.get(id).map(|p| p.name.as_str())
    }

    pub fn contains(&self, id: PrefabId) -> bool {
        self.prefabs.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrefabId, &PrefabData)> {
        self.prefabs.iter()
    }

    pub fn components(&self) -> &ComponentStorage {
        &self.components
    }

    pub(crate) fn components_mut(&mut self) -> &mut ComponentStorage {
        &mut self.components
    }

    fn check(&self, id: PrefabId) -> Result<(), PrefabError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(PrefabError::NotFound(id))
        }
    }

    // -----------------------------------------------------------------------
    // Piece
    // -----------------------------------------------------------------------

    pub fn piece(&self, id: PrefabId) -> Option<&Piece> {
        self.components.pieces.get(id)
    }

    pub fn piece_mut(&mut self, id: PrefabId) -> Option<&mut Piece> {
        self.components.pieces.get_mut(id)
    }

    pub fn insert_piece(&mut self, id: PrefabId, piece: Piece) -> Result<(), PrefabError> {
        self.check(id)?;
        self.components.pieces.insert(id, piece);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Station extension
    // -----------------------------------------------------------------------

    pub fn station_extension(&self, id: PrefabId) -> Option<&StationExtension> {
        self.components.station_extensions.get(id)
    }

    pub fn station_extension_mut(&mut self, id: PrefabId) -> Option<&mut StationExtension> {
        self.components.station_extensions.get_mut(id)
    }

    /// Attach a fresh station extension. Replaces an existing one, so callers
    /// check [`station_extension`](Self::station_extension) first.
    pub fn attach_station_extension(
        &mut self,
        id: PrefabId,
    ) -> Result<&mut StationExtension, PrefabError> {
        self.check(id)?;
        self.components
            .station_extensions
            .insert(id, StationExtension::default());
        self.components
            .station_extensions
            .get_mut(id)
            .ok_or(PrefabError::NotFound(id))
    }

    // -----------------------------------------------------------------------
    // Stations, items, piece tables
    // -----------------------------------------------------------------------

    pub fn crafting_station(&self, id: PrefabId) -> Option<&CraftingStation> {
        self.components.crafting_stations.get(id)
    }

    pub fn insert_crafting_station(
        &mut self,
        id: PrefabId,
        station: CraftingStation,
    ) -> Result<(), PrefabError> {
        self.check(id)?;
        self.components.crafting_stations.insert(id, station);
        Ok(())
    }

    pub fn item_drop(&self, id: PrefabId) -> Option<&ItemDrop> {
        self.components.item_drops.get(id)
    }

    pub fn insert_item_drop(&mut self, id: PrefabId, item: ItemDrop) -> Result<(), PrefabError> {
        self.check(id)?;
        self.components.item_drops.insert(id, item);
        Ok(())
    }

    pub fn piece_table(&self, id: PrefabId) -> Option<&PieceTable> {
        self.components.piece_tables.get(id)
    }

    pub fn piece_table_mut(&mut self, id: PrefabId) -> Option<&mut PieceTable> {
        self.components.piece_tables.get_mut(id)
    }

    pub fn insert_piece_table(
        &mut self,
        id: PrefabId,
        table: PieceTable,
    ) -> Result<(), PrefabError> {
        self.check(id)?;
        self.components.piece_tables.insert(id, table);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_find() {
        let mut store = PrefabStore::new();
        let id = store.create("forge").unwrap();
        assert_eq!(store.find("forge"), Some(id));
        assert_eq!(store.name(id), Some("forge"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn duplicate_name_fails() {
        let mut store = PrefabStore::new();
        store.create("forge").unwrap();
        let result = store.create("forge");
        assert!(matches!(result, Err(PrefabError::DuplicateName(ref n)) if n == "forge"));
    }

    #[test]
    fn require_missing_name_fails() {
        let store = PrefabStore::new();
        match store.require("forge") {
            Err(PrefabError::NameNotFound(name)) => assert_eq!(name, "forge"),
            other => panic!("expected NameNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn remove_cleans_name_and_components() {
        let mut store = PrefabStore::new();
        let id = store.create("wood_wall").unwrap();
        store.insert_piece(id, Piece::new("wood_wall")).unwrap();
        store.remove(id).unwrap();
        assert!(store.find("wood_wall").is_none());
        assert!(store.piece(id).is_none());
        assert!(store.is_empty());
        // The name is free again.
        assert!(store.create("wood_wall").is_ok());
    }

    #[test]
    fn remove_unknown_fails() {
        let mut store = PrefabStore::new();
        let id = store.create("tmp").unwrap();
        store.remove(id).unwrap();
        assert!(matches!(store.remove(id), Err(PrefabError::NotFound(_))));
    }

    #[test]
    fn clone_prefab_copies_components() {
        let mut store = PrefabStore::new();
        let base = store.create("wood_wall").unwrap();
        store.insert_piece(base, Piece::new("wood_wall")).unwrap();
        let copy = store.clone_prefab("wood_wall", "stone_wall").unwrap();
        assert_ne!(base, copy);
        assert_eq!(store.piece(copy).unwrap().name, "wood_wall");

        store.piece_mut(copy).unwrap().enabled = false;
        assert!(store.piece(base).unwrap().enabled);
    }

    #[test]
    fn clone_unknown_base_fails() {
        let mut store = PrefabStore::new();
        let result = store.clone_prefab("missing", "copy");
        assert!(matches!(result, Err(PrefabError::NameNotFound(_))));
        assert!(store.find("copy").is_none());
    }

    #[test]
    fn attach_station_extension_to_removed_prefab_fails() {
        let mut store = PrefabStore::new();
        let id = store.create("tmp").unwrap();
        store.remove(id).unwrap();
        assert!(matches!(
            store.attach_station_extension(id),
            Err(PrefabError::NotFound(_))
        ));
    }

    #[test]
    fn attach_station_extension_creates_component() {
        let mut store = PrefabStore::new();
        let id = store.create("forge_cooler").unwrap();
        assert!(store.station_extension(id).is_none());
        store.attach_station_extension(id).unwrap();
        assert_eq!(
            store.station_extension(id),
            Some(&StationExtension::default())
        );
    }

    #[test]
    fn insert_components_on_unknown_prefab_fails() {
        let mut store = PrefabStore::new();
        let id = store.create("tmp").unwrap();
        store.remove(id).unwrap();
        assert!(store.insert_piece(id, Piece::new("tmp")).is_err());
        assert!(store.insert_piece_table(id, PieceTable::default()).is_err());
        assert!(
            store
                .insert_item_drop(
                    id,
                    ItemDrop {
                        name: "Wood".to_string()
                    }
                )
                .is_err()
        );
    }
}
