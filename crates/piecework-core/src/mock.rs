//! Named forward references to prefabs that may not be loaded yet.
//!
//! A config names its dependencies ("forge", "Wood") long before the game
//! has created them. [`MockRegistry::create`] hands out a [`Ref::Mock`]
//! placeholder for such a name; a later binding pass
//! ([`MockRegistry::bind`] then [`MockRegistry::fix_references`]) looks the
//! names up in the [`PrefabStore`] and rewrites every placeholder held by a
//! component into a [`Ref::Resolved`] handle.

use crate::component::Requirement;
use crate::id::{MockId, PrefabId};
use crate::prefab::PrefabStore;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised by the binding pass.
#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("unresolved {kind} reference '{name}'")]
    Unresolved { kind: MockKind, name: String },
    #[error("{kind} reference '{name}' used before binding")]
    Unbound { kind: MockKind, name: String },
    #[error("placeholder {id:?} belongs to another mock registry")]
    Foreign { id: MockId },
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// The component a mocked prefab must carry to satisfy the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockKind {
    CraftingStation,
    ItemDrop,
}

impl fmt::Display for MockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockKind::CraftingStation => f.write_str("crafting station"),
            MockKind::ItemDrop => f.write_str("item"),
        }
    }
}

/// A reference from a component to another prefab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ref {
    /// Placeholder, resolved during the binding pass.
    Mock(MockId),
    Resolved(PrefabId),
}

impl Ref {
    pub fn is_mock(&self) -> bool {
        matches!(self, Ref::Mock(_))
    }
}

#[derive(Debug, Clone)]
struct MockEntry {
    kind: MockKind,
    name: String,
    bound: Option<PrefabId>,
}

// ---------------------------------------------------------------------------
// MockRegistry
// ---------------------------------------------------------------------------

static NEXT_REGISTRY: AtomicU32 = AtomicU32::new(0);

/// Indirection table from (kind, name) to the prefab it eventually names.
///
/// Every registry stamps its own id into the [`MockId`]s it hands out, so a
/// placeholder is only ever looked up in the registry that created it.
#[derive(Debug, Clone)]
pub struct MockRegistry {
    id: u32,
    entries: Vec<MockEntry>,
    index: HashMap<(MockKind, String), MockId>,
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRegistry {
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn entry(&self, id: MockId) -> Option<&MockEntry> {
        if id.registry != self.id {
            return None;
        }
        self.entries.get(id.index as usize)
    }

    /// Whether `id` was handed out by this registry.
    pub fn owns(&self, id: MockId) -> bool {
        self.entry(id).is_some()
    }

    /// Return the placeholder for `name`. Requesting the same (kind, name)
    /// twice yields the same [`MockId`]. No lookup happens here.
    pub fn create(&mut self, kind: MockKind, name: &str) -> Ref {
        if let Some(&id) = self.index.get(&(kind, name.to_string())) {
            return Ref::Mock(id);
        }
        let id = MockId {
            registry: self.id,
            index: self.entries.len() as u32,
        };
        self.entries.push(MockEntry {
            kind,
            name: name.to_string(),
            bound: None,
        });
        self.index.insert((kind, name.to_string()), id);
        Ref::Mock(id)
    }

    pub fn name(&self, id: MockId) -> Option<&str> {
        self.entry(id).map(|e| e.name.as_str())
    }

    pub fn kind(&self, id: MockId) -> Option<MockKind> {
        self.entry(id).map(|e| e.kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of placeholders still waiting for a binding pass.
    pub fn unbound_count(&self) -> usize {
        self.entries.iter().filter(|e| e.bound.is_none()).count()
    }

    /// The prefab a reference points at, if it is known yet.
    pub fn resolve(&self, r: Ref) -> Option<PrefabId> {
        match r {
            Ref::Resolved(id) => Some(id),
            Ref::Mock(id) => self.entry(id).and_then(|e| e.bound),
        }
    }

    /// Binding pass, part one: look up every unbound placeholder by prefab
    /// name. The prefab must carry the component matching the mock's kind.
    /// Stops at the first failure in creation order. Returns how many
    /// placeholders were newly bound.
    pub fn bind(&mut self, prefabs: &PrefabStore) -> Result<usize, MockError> {
        let mut bound = 0;
        for entry in self.entries.iter_mut().filter(|e| e.bound.is_none()) {
            let target = prefabs.find(&entry.name).filter(|&id| match entry.kind {
                MockKind::CraftingStation => prefabs.crafting_station(id).is_some(),
                MockKind::ItemDrop => prefabs.item_drop(id).is_some(),
            });
            match target {
                Some(id) => {
                    entry.bound = Some(id);
                    bound += 1;
                }
                None => {
                    return Err(MockError::Unresolved {
                        kind: entry.kind,
                        name: entry.name.clone(),
                    });
                }
            }
        }
        Ok(bound)
    }

    /// Binding pass, part two: replace every placeholder held by a piece or
    /// station extension with its bound prefab. Returns the number of
    /// references rewritten. A placeholder created by another registry is
    /// [`MockError::Foreign`].
    pub fn fix_references(&self, prefabs: &mut PrefabStore) -> Result<usize, MockError> {
        let components = prefabs.components_mut();
        let mut fixed = 0;

        for piece in components.pieces.values_mut() {
            if let Some(station) = piece.crafting_station.as_mut() {
                fixed += self.fix(station)?;
            }
            for Requirement { item, .. } in piece.resources.iter_mut() {
                fixed += self.fix(item)?;
            }
        }
        for extension in components.station_extensions.values_mut() {
            if let Some(station) = extension.crafting_station.as_mut() {
                fixed += self.fix(station)?;
            }
        }

        Ok(fixed)
    }

    fn fix(&self, r: &mut Ref) -> Result<usize, MockError> {
        let Ref::Mock(id) = *r else {
            return Ok(0);
        };
        let entry = self.entry(id).ok_or(MockError::Foreign { id })?;
        match entry.bound {
            Some(prefab) => {
                *r = Ref::Resolved(prefab);
                Ok(1)
            }
            None => Err(MockError::Unbound {
                kind: entry.kind,
                name: entry.name.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{CraftingStation, ItemDrop, Piece};

    fn store_with_forge() -> (PrefabStore, PrefabId) {
        let mut store = PrefabStore::new();
        let forge = store.create("forge").unwrap();
        store
            .insert_crafting_station(
                forge,
                CraftingStation {
                    name: "$piece_forge".to_string(),
                },
            )
            .unwrap();
        (store, forge)
    }

    #[test]
    fn same_name_yields_same_mock() {
        let mut mocks = MockRegistry::new();
        let a = mocks.create(MockKind::CraftingStation, "forge");
        let b = mocks.create(MockKind::CraftingStation, "forge");
        assert_eq!(a, b);
        assert_eq!(mocks.len(), 1);
    }

    #[test]
    fn kind_separates_mocks() {
        let mut mocks = MockRegistry::new();
        let a = mocks.create(MockKind::CraftingStation, "forge");
        let b = mocks.create(MockKind::ItemDrop, "forge");
        assert_ne!(a, b);
        assert_eq!(mocks.len(), 2);
    }

    #[test]
    fn create_records_name_and_kind() {
        let mut mocks = MockRegistry::new();
        let Ref::Mock(id) = mocks.create(MockKind::ItemDrop, "Wood") else {
            panic!("expected a mock");
        };
        assert_eq!(mocks.name(id), Some("Wood"));
        assert_eq!(mocks.kind(id), Some(MockKind::ItemDrop));
        assert_eq!(mocks.unbound_count(), 1);
    }

    #[test]
    fn bind_resolves_names() {
        let (store, forge) = store_with_forge();
        let mut mocks = MockRegistry::new();
        let r = mocks.create(MockKind::CraftingStation, "forge");
        assert_eq!(mocks.resolve(r), None);

        assert_eq!(mocks.bind(&store).unwrap(), 1);
        assert_eq!(mocks.resolve(r), Some(forge));
        assert_eq!(mocks.unbound_count(), 0);
        // Already bound entries are not counted again.
        assert_eq!(mocks.bind(&store).unwrap(), 0);
    }

    #[test]
    fn bind_unknown_name_fails() {
        let (store, _) = store_with_forge();
        let mut mocks = MockRegistry::new();
        mocks.create(MockKind::CraftingStation, "blackforge");
        match mocks.bind(&store) {
            Err(MockError::Unresolved { kind, name }) => {
                assert_eq!(kind, MockKind::CraftingStation);
                assert_eq!(name, "blackforge");
            }
            other => panic!("expected Unresolved, got: {other:?}"),
        }
    }

    #[test]
    fn bind_requires_matching_component() {
        let (store, _) = store_with_forge();
        let mut mocks = MockRegistry::new();
        // "forge" exists but is a station, not an item.
        mocks.create(MockKind::ItemDrop, "forge");
        assert!(matches!(
            mocks.bind(&store),
            Err(MockError::Unresolved { kind: MockKind::ItemDrop, .. })
        ));
    }

    #[test]
    fn fix_references_rewrites_pieces() {
        let (mut store, forge) = store_with_forge();
        let wood = store.create("Wood").unwrap();
        store
            .insert_item_drop(
                wood,
                ItemDrop {
                    name: "$item_wood".to_string(),
                },
            )
            .unwrap();
        let bench = store.create("bench").unwrap();

        let mut mocks = MockRegistry::new();
        let mut piece = Piece::new("bench");
        piece.crafting_station = Some(mocks.create(MockKind::CraftingStation, "forge"));
        piece.resources.push(Requirement {
            item: mocks.create(MockKind::ItemDrop, "Wood"),
            amount: 2,
            amount_per_level: 0,
            recover: true,
        });
        store.insert_piece(bench, piece).unwrap();

        mocks.bind(&store).unwrap();
        assert_eq!(mocks.fix_references(&mut store).unwrap(), 2);

        let piece = store.piece(bench).unwrap();
        assert_eq!(piece.crafting_station, Some(Ref::Resolved(forge)));
        assert_eq!(piece.resources[0].item, Ref::Resolved(wood));
        // Second pass has nothing left to do.
        assert_eq!(mocks.fix_references(&mut store).unwrap(), 0);
    }

    #[test]
    fn fix_references_before_bind_fails() {
        let (mut store, _) = store_with_forge();
        let bench = store.create("bench").unwrap();
        let mut mocks = MockRegistry::new();
        let mut piece = Piece::new("bench");
        piece.crafting_station = Some(mocks.create(MockKind::CraftingStation, "forge"));
        store.insert_piece(bench, piece).unwrap();

        assert!(matches!(
            mocks.fix_references(&mut store),
            Err(MockError::Unbound { .. })
        ));
    }

    #[test]
    fn ids_are_scoped_to_their_registry() {
        let mut a = MockRegistry::new();
        let mut b = MockRegistry::new();
        let Ref::Mock(from_a) = a.create(MockKind::CraftingStation, "forge") else {
            panic!("expected a mock");
        };
        b.create(MockKind::CraftingStation, "forge");
        // Same position in creation order, different registry.
        assert_eq!(from_a.index(), 0);
        assert!(a.owns(from_a));
        assert!(!b.owns(from_a));
        assert_eq!(b.name(from_a), None);
        assert_eq!(b.kind(from_a), None);
    }

    #[test]
    fn fix_references_rejects_placeholder_from_smaller_registry() {
        let (mut store, _) = store_with_forge();
        let bench = store.create("bench").unwrap();
        let mut foreign = MockRegistry::new();
        let mut piece = Piece::new("bench");
        let station = foreign.create(MockKind::CraftingStation, "forge");
        piece.crafting_station = Some(station);
        store.insert_piece(bench, piece).unwrap();

        // Empty registry: the foreign index is out of range.
        let mocks = MockRegistry::new();
        assert!(matches!(
            mocks.fix_references(&mut store),
            Err(MockError::Foreign { .. })
        ));
        assert_eq!(store.piece(bench).unwrap().crafting_station, Some(station));
    }

    #[test]
    fn fix_references_does_not_rebind_foreign_placeholder() {
        let (mut store, _) = store_with_forge();
        let workbench = store.create("piece_workbench").unwrap();
        store
            .insert_crafting_station(
                workbench,
                CraftingStation {
                    name: "$piece_workbench".to_string(),
                },
            )
            .unwrap();
        let bench = store.create("bench").unwrap();

        let mut foreign = MockRegistry::new();
        let mut piece = Piece::new("bench");
        let station = foreign.create(MockKind::CraftingStation, "forge");
        piece.crafting_station = Some(station);
        store.insert_piece(bench, piece).unwrap();

        // Index 0 here is bound to a different station.
        let mut mocks = MockRegistry::new();
        mocks.create(MockKind::CraftingStation, "piece_workbench");
        mocks.bind(&store).unwrap();
        match mocks.fix_references(&mut store) {
            Err(MockError::Foreign { id }) => assert!(foreign.owns(id)),
            other => panic!("expected Foreign, got: {other:?}"),
        }
        assert_eq!(store.piece(bench).unwrap().crafting_station, Some(station));
        assert_eq!(mocks.resolve(station), None);
    }

    #[test]
    fn error_display_messages() {
        let e = MockError::Unresolved {
            kind: MockKind::CraftingStation,
            name: "forge".to_string(),
        };
        let msg = format!("{e}");
        assert!(msg.contains("crafting station"), "got: {msg}");
        assert!(msg.contains("forge"), "got: {msg}");

        let e = MockError::Unbound {
            kind: MockKind::ItemDrop,
            name: "Wood".to_string(),
        };
        assert!(format!("{e}").contains("before binding"));

        let mut foreign = MockRegistry::new();
        let Ref::Mock(id) = foreign.create(MockKind::ItemDrop, "Wood") else {
            panic!("expected a mock");
        };
        let e = MockError::Foreign { id };
        assert!(format!("{e}").contains("another mock registry"));
    }
}
