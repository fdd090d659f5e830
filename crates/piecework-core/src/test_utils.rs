//! Shared test helpers for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests and, via the `test-utils` feature, in other
//! crates' tests.

use crate::component::*;
use crate::id::PrefabId;
use crate::prefab::PrefabStore;

// ===========================================================================
// Vanilla prefab names
// ===========================================================================

pub const WORKBENCH: &str = "piece_workbench";
pub const FORGE: &str = "forge";
pub const WOOD: &str = "Wood";
pub const STONE: &str = "Stone";
pub const HAMMER_TABLE: &str = "_HammerPieceTable";
pub const WOOD_WALL: &str = "wood_wall";
pub const WOOD_WALL_ICON: &str = "woodwall_icon";

// ===========================================================================
// Constructors
// ===========================================================================

pub fn add_station(store: &mut PrefabStore, name: &str) -> PrefabId {
    let id = store.create(name).unwrap();
    store
        .insert_crafting_station(
            id,
            CraftingStation {
                name: format!("${name}"),
            },
        )
        .unwrap();
    id
}

pub fn add_item(store: &mut PrefabStore, name: &str) -> PrefabId {
    let id = store.create(name).unwrap();
    store
        .insert_item_drop(
            id,
            ItemDrop {
                name: format!("$item_{}", name.to_lowercase()),
            },
        )
        .unwrap();
    id
}

pub fn add_piece_prefab(store: &mut PrefabStore, name: &str) -> PrefabId {
    let id = store.create(name).unwrap();
    store.insert_piece(id, Piece::new(name)).unwrap();
    id
}

/// A store with two stations, two items, the hammer piece table and a
/// `wood_wall` piece carrying an icon.
pub fn vanilla_prefabs() -> PrefabStore {
    let mut store = PrefabStore::new();
    add_station(&mut store, WORKBENCH);
    add_station(&mut store, FORGE);
    add_item(&mut store, WOOD);
    add_item(&mut store, STONE);

    let hammer = store.create(HAMMER_TABLE).unwrap();
    store
        .insert_piece_table(hammer, PieceTable::default())
        .unwrap();

    let wall = add_piece_prefab(&mut store, WOOD_WALL);
    if let Some(piece) = store.piece_mut(wall) {
        piece.icon = Some(Sprite::new(WOOD_WALL_ICON));
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanilla_prefabs_are_complete() {
        let store = vanilla_prefabs();
        assert_eq!(store.len(), 6);
        let forge = store.find(FORGE).unwrap();
        assert!(store.crafting_station(forge).is_some());
        let wood = store.find(WOOD).unwrap();
        assert_eq!(store.item_drop(wood).unwrap().name, "$item_wood");
        let wall = store.find(WOOD_WALL).unwrap();
        assert_eq!(
            store.piece(wall).unwrap().icon,
            Some(Sprite::new(WOOD_WALL_ICON))
        );
    }
}
