use crate::id::PrefabId;
use crate::mock::Ref;
use slotmap::SecondaryMap;

/// Icon asset reference, by sprite name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sprite(pub String);

impl Sprite {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A single resource cost of a piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// The item prefab consumed by building the piece.
    pub item: Ref,
    pub amount: u32,
    /// Extra amount per upgrade level.
    pub amount_per_level: u32,
    /// Whether the resource is returned when the piece is deconstructed.
    pub recover: bool,
}

/// Buildable piece component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub name: String,
    pub description: String,
    /// Whether the piece is selectable for building.
    pub enabled: bool,
    pub allowed_in_dungeons: bool,
    pub icon: Option<Sprite>,
    pub resources: Vec<Requirement>,
    /// Station which must be nearby to build this piece.
    pub crafting_station: Option<Ref>,
}

impl Piece {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            enabled: true,
            allowed_in_dungeons: false,
            icon: None,
            resources: Vec::new(),
            crafting_station: None,
        }
    }
}

/// Marks a piece as an upgrade of a crafting station.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationExtension {
    pub crafting_station: Option<Ref>,
}

/// Crafting station component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftingStation {
    pub name: String,
}

/// Resource item component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDrop {
    pub name: String,
}

/// A named build category, carried by tool prefabs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceTable {
    pub pieces: Vec<PrefabId>,
}

impl PieceTable {
    /// Append a piece unless it is already listed. Returns whether it was added.
    pub fn add(&mut self, piece: PrefabId) -> bool {
        if self.pieces.contains(&piece) {
            return false;
        }
        self.pieces.push(piece);
        true
    }
}

/// SoA component storage. Each component type has its own SecondaryMap
/// keyed by PrefabId.
#[derive(Debug, Clone)]
pub struct ComponentStorage {
    pub pieces: SecondaryMap<PrefabId, Piece>,
    pub station_extensions: SecondaryMap<PrefabId, StationExtension>,
    pub crafting_stations: SecondaryMap<PrefabId, CraftingStation>,
    pub item_drops: SecondaryMap<PrefabId, ItemDrop>,
    pub piece_tables: SecondaryMap<PrefabId, PieceTable>,
}

impl ComponentStorage {
    pub fn new() -> Self {
        Self {
            pieces: SecondaryMap::new(),
            station_extensions: SecondaryMap::new(),
            crafting_stations: SecondaryMap::new(),
            item_drops: SecondaryMap::new(),
            piece_tables: SecondaryMap::new(),
        }
    }

    /// Remove all components for a given prefab.
    pub fn remove_prefab(&mut self, prefab: PrefabId) {
        self.pieces.remove(prefab);
        self.station_extensions.remove(prefab);
        self.crafting_stations.remove(prefab);
        self.item_drops.remove(prefab);
        self.piece_tables.remove(prefab);
    }

    /// Copy every component of `from` onto `to`.
    pub fn copy_prefab(&mut self, from: PrefabId, to: PrefabId) {
        if let Some(c) = self.pieces.get(from).cloned() {
            self.pieces.insert(to, c);
        }
        if let Some(c) = self.station_extensions.get(from).cloned() {
            self.station_extensions.insert(to, c);
        }
        if let Some(c) = self.crafting_stations.get(from).cloned() {
            self.crafting_stations.insert(to, c);
        }
        if let Some(c) = self.item_drops.get(from).cloned() {
            self.item_drops.insert(to, c);
        }
        if let Some(c) = self.piece_tables.get(from).cloned() {
            self.piece_tables.insert(to, c);
        }
    }
}

impl Default for ComponentStorage {
    fn default() -> Self {
        Self::new()
    }
}
