//! Register two custom pieces against a small vanilla prefab set.
//!
//! Builds a workbench, a forge, two items and the hammer piece table, adds
//! a cloned wall and a forge upgrade, runs the registration pass and prints
//! the resolved result.
//!
//! Run with: `RUST_LOG=debug cargo run -p piecework-core --example register_pieces`

use piecework_core::component::{CraftingStation, ItemDrop, Piece, PieceTable, Sprite};
use piecework_core::config::{PieceConfig, RequirementConfig};
use piecework_core::custom_piece::CustomPiece;
use piecework_core::manager::{ManagerError, PieceManager};
use piecework_core::mock::{MockRegistry, Ref};
use piecework_core::prefab::PrefabStore;

fn main() -> Result<(), ManagerError> {
    env_logger::init();

    // --- Step 1: Vanilla prefabs ---

    let mut prefabs = PrefabStore::new();
    for station in ["piece_workbench", "forge"] {
        let id = prefabs.create(station)?;
        prefabs.insert_crafting_station(
            id,
            CraftingStation {
                name: format!("${station}"),
            },
        )?;
    }
    for item in ["Wood", "Stone", "Copper"] {
        let id = prefabs.create(item)?;
        prefabs.insert_item_drop(
            id,
            ItemDrop {
                name: format!("$item_{}", item.to_lowercase()),
            },
        )?;
    }
    let hammer = prefabs.create("_HammerPieceTable")?;
    prefabs.insert_piece_table(hammer, PieceTable::default())?;
    let wall = prefabs.create("wood_wall")?;
    prefabs.insert_piece(wall, Piece::new("$piece_woodwall"))?;

    // --- Step 2: Custom pieces ---

    let mut mocks = MockRegistry::new();
    let mut manager = PieceManager::new();

    manager.add_piece(CustomPiece::from_clone(
        &mut prefabs,
        "stone_wall_thin",
        "wood_wall",
        PieceConfig {
            piece_table: Some("_HammerPieceTable".to_string()),
            crafting_station: Some("piece_workbench".to_string()),
            icon: Some(Sprite::new("stonewall_icon")),
            requirements: vec![RequirementConfig::new("Stone", 4)],
            ..Default::default()
        },
    )?)?;

    manager.add_piece(CustomPiece::empty(
        &mut prefabs,
        "forge_bellows",
        PieceConfig {
            description: "Upgrades the forge".to_string(),
            piece_table: Some("_HammerPieceTable".to_string()),
            extend_station: Some("forge".to_string()),
            requirements: vec![
                RequirementConfig::new("Wood", 5),
                RequirementConfig::new("Copper", 3),
            ],
            ..Default::default()
        },
    )?)?;

    // --- Step 3: Register ---

    let report = manager.register_all(&mut prefabs, &mut mocks)?;
    println!("{report:?}");

    // --- Step 4: Inspect ---

    let name_of = |r: Option<Ref>| match r.and_then(|r| mocks.resolve(r)) {
        Some(id) => prefabs.name(id).unwrap_or("?").to_string(),
        None => "-".to_string(),
    };
    for piece in manager.iter() {
        let Some(component) = prefabs.piece(piece.prefab) else {
            continue;
        };
        let extends = prefabs
            .station_extension(piece.prefab)
            .and_then(|e| e.crafting_station);
        let resources: Vec<String> = component
            .resources
            .iter()
            .map(|r| format!("{} x{}", name_of(Some(r.item)), r.amount))
            .collect();
        println!(
            "{:<16} station={:<16} extends={:<8} resources=[{}]",
            piece.name,
            name_of(component.crafting_station),
            name_of(extends),
            resources.join(", ")
        );
    }

    Ok(())
}
