//! Reads piece definition files and turns them into custom pieces.
//!
//! A data directory holds one `pieces.{ron,json,toml}` file. [`DataFile`]
//! finds it and decodes it by extension; [`load_pieces`] then resolves every
//! definition against a [`PrefabStore`] and collects the result in a
//! [`PieceManager`].

use crate::schema::{PieceData, TomlPieces};
use piecework_core::custom_piece::CustomPiece;
use piecework_core::manager::{ManagerError, PieceManager};
use piecework_core::prefab::{PrefabError, PrefabStore};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Base name of the piece definition file inside a data directory.
pub const PIECES_FILE: &str = "pieces";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a data directory.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("no {base}.ron, {base}.json or {base}.toml in {dir}")]
    MissingFile { base: &'static str, dir: PathBuf },

    #[error("unsupported data file extension: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// The same base name exists in more than one format.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A piece names a base prefab the store does not have.
    #[error("piece '{piece}' in {file} clones unknown prefab '{base}'")]
    UnknownBase {
        file: PathBuf,
        piece: String,
        base: String,
    },

    #[error("piece '{name}' is defined twice in {file}")]
    DuplicatePiece { file: PathBuf, name: String },

    #[error(transparent)]
    Prefab(#[from] PrefabError),

    #[error(transparent)]
    Manager(#[from] ManagerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Data files
// ===========================================================================

/// Encoding of a data file, chosen by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Json,
    Toml,
}

impl Format {
    const ALL: [(Format, &'static str); 3] = [
        (Format::Ron, "ron"),
        (Format::Json, "json"),
        (Format::Toml, "toml"),
    ];

    pub fn from_path(path: &Path) -> Result<Self, DataLoadError> {
        let ext = path.extension().and_then(|e| e.to_str());
        Self::ALL
            .iter()
            .find(|(_, known)| ext == Some(*known))
            .map(|&(format, _)| format)
            .ok_or_else(|| DataLoadError::UnsupportedFormat {
                file: path.to_path_buf(),
            })
    }
}

/// A located data file and its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    pub path: PathBuf,
    pub format: Format,
}

impl DataFile {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DataLoadError> {
        let path = path.into();
        let format = Format::from_path(&path)?;
        Ok(Self { path, format })
    }

    /// Look for `{base}.ron`, `{base}.json` or `{base}.toml` in `dir`. More
    /// than one of them is an error.
    pub fn locate(dir: &Path, base: &str) -> Result<Option<Self>, DataLoadError> {
        let mut found: Option<Self> = None;
        for (format, ext) in Format::ALL {
            let path = dir.join(format!("{base}.{ext}"));
            if !path.is_file() {
                continue;
            }
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.path,
                    b: path,
                });
            }
            found = Some(Self { path, format });
        }
        Ok(found)
    }

    /// Decode the piece list. TOML files keep it under a `pieces` array.
    pub fn read_pieces(&self) -> Result<Vec<PieceData>, DataLoadError> {
        let content = std::fs::read_to_string(&self.path)?;
        let parsed = match self.format {
            Format::Ron => ron::from_str(&content).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str::<TomlPieces>(&content)
                .map(|wrapper| wrapper.pieces)
                .map_err(|e| e.to_string()),
        };
        parsed.map_err(|detail| DataLoadError::Parse {
            file: self.path.clone(),
            detail,
        })
    }
}

// ===========================================================================
// Pieces
// ===========================================================================

/// Find the pieces file of `dir`, decode it and reject duplicate names.
/// Returns the file that was read alongside its definitions.
fn read_piece_file(dir: &Path) -> Result<(DataFile, Vec<PieceData>), DataLoadError> {
    let file = DataFile::locate(dir, PIECES_FILE)?.ok_or_else(|| DataLoadError::MissingFile {
        base: PIECES_FILE,
        dir: dir.to_path_buf(),
    })?;
    let pieces = file.read_pieces()?;

    let mut seen = HashSet::new();
    for piece in &pieces {
        if !seen.insert(piece.name.as_str()) {
            return Err(DataLoadError::DuplicatePiece {
                file: file.path.clone(),
                name: piece.name.clone(),
            });
        }
    }
    log::debug!(
        "read {} piece definitions from {}",
        pieces.len(),
        file.path.display()
    );
    Ok((file, pieces))
}

/// Read and validate the piece definitions of a data directory.
pub fn read_pieces(dir: &Path) -> Result<Vec<PieceData>, DataLoadError> {
    read_piece_file(dir).map(|(_, pieces)| pieces)
}

/// Load a data directory into a [`PieceManager`].
///
/// A definition with a `base` clones that prefab; otherwise an existing
/// prefab of the same name is wrapped, and failing that an empty piece
/// prefab is created.
pub fn load_pieces(dir: &Path, prefabs: &mut PrefabStore) -> Result<PieceManager, DataLoadError> {
    let (file, pieces) = read_piece_file(dir)?;
    let mut manager = PieceManager::new();

    for data in pieces {
        let config = data.to_config();
        let piece = match data.base.as_deref() {
            Some(base) if prefabs.find(base).is_none() => {
                return Err(DataLoadError::UnknownBase {
                    file: file.path,
                    piece: data.name,
                    base: base.to_string(),
                });
            }
            Some(base) => CustomPiece::from_clone(prefabs, &data.name, base, config)?,
            None if prefabs.find(&data.name).is_some() => {
                CustomPiece::from_prefab(prefabs, &data.name, config)?
            }
            None => CustomPiece::empty(prefabs, &data.name, config)?,
        };
        manager.add_piece(piece)?;
    }

    Ok(manager)
}

// ===========================================================================
// Tests
// ===========================================================================
