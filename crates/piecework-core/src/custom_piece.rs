use crate::component::Piece;
use crate::config::PieceConfig;
use crate::id::PrefabId;
use crate::prefab::{PrefabError, PrefabStore};

/// A prefab paired with the settings that will be applied to it.
#[derive(Debug, Clone)]
pub struct CustomPiece {
    pub prefab: PrefabId,
    pub name: String,
    pub config: PieceConfig,
}

impl CustomPiece {
    /// Wrap an already existing prefab.
    pub fn from_prefab(
        prefabs: &PrefabStore,
        name: &str,
        config: PieceConfig,
    ) -> Result<Self, PrefabError> {
        let prefab = prefabs.require(name)?;
        Ok(Self {
            prefab,
            name: name.to_string(),
            config,
        })
    }

    /// Clone `base` into a new prefab named `name`.
    pub fn from_clone(
        prefabs: &mut PrefabStore,
        name: &str,
        base: &str,
        config: PieceConfig,
    ) -> Result<Self, PrefabError> {
        let prefab = prefabs.clone_prefab(base, name)?;
        Ok(Self {
            prefab,
            name: name.to_string(),
            config,
        })
    }

    /// Create a new prefab carrying a fresh piece named after it, described
    /// by `config.description`.
    pub fn empty(
        prefabs: &mut PrefabStore,
        name: &str,
        config: PieceConfig,
    ) -> Result<Self, PrefabError> {
        let prefab = prefabs.create(name)?;
        let mut piece = Piece::new(name);
        piece.description = config.description.clone();
        prefabs.insert_piece(prefab, piece)?;
        Ok(Self {
            prefab,
            name: name.to_string(),
            config,
        })
    }

    pub fn piece_table(&self) -> Option<&str> {
        self.config.piece_table.as_deref()
    }
}
