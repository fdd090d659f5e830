//! Registration pipeline for custom pieces.
//!
//! Pieces are collected with [`PieceManager::add_piece`] while mods load.
//! [`PieceManager::register_all`] then applies every config, adds each piece
//! to its piece table and runs the binding pass of the [`MockRegistry`].

use crate::config::ApplyOutcome;
use crate::custom_piece::CustomPiece;
use crate::mock::{MockError, MockRegistry};
use crate::prefab::{PrefabError, PrefabStore};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error(transparent)]
    Prefab(#[from] PrefabError),
    #[error(transparent)]
    Mock(#[from] MockError),
    #[error("piece '{0}' is already registered")]
    DuplicatePiece(String),
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Counters from one [`PieceManager::register_all`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterReport {
    pub applied: usize,
    /// Pieces whose prefab had no piece component.
    pub skipped: usize,
    pub added_to_tables: usize,
    /// Pieces naming a piece table that does not exist.
    pub missing_tables: usize,
    pub bound_mocks: usize,
    pub fixed_references: usize,
}

// ---------------------------------------------------------------------------
// PieceManager
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PieceManager {
    pieces: Vec<CustomPiece>,
    name_to_index: HashMap<String, usize>,
}

impl PieceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_piece(&mut self, piece: CustomPiece) -> Result<(), ManagerError> {
        if self.name_to_index.contains_key(&piece.name) {
            return Err(ManagerError::DuplicatePiece(piece.name));
        }
        self.name_to_index
            .insert(piece.name.clone(), self.pieces.len());
        self.pieces.push(piece);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CustomPiece> {
        self.name_to_index.get(name).map(|&i| &self.pieces[i])
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomPiece> {
        self.pieces.iter()
    }

    /// Apply every piece in insertion order, add it to its piece table, then
    /// bind all mocks and rewrite the references.
    pub fn register_all(
        &self,
        prefabs: &mut PrefabStore,
        mocks: &mut MockRegistry,
    ) -> Result<RegisterReport, ManagerError> {
        let mut report = RegisterReport::default();

        for piece in &self.pieces {
            match piece.config.apply(prefabs, mocks, piece.prefab)? {
                ApplyOutcome::MissingPiece => {
                    report.skipped += 1;
                    continue;
                }
                ApplyOutcome::Applied { .. } => report.applied += 1,
            }
            log::debug!("applied piece config to '{}'", piece.name);

            let Some(table_name) = piece.piece_table() else {
                continue;
            };
            let table = match prefabs.find(table_name) {
                Some(id) => prefabs.piece_table_mut(id),
                None => None,
            };
            match table {
                Some(table) => {
                    if table.add(piece.prefab) {
                        report.added_to_tables += 1;
                    }
                }
                None => {
                    log::warn!(
                        "piece table '{}' for piece '{}' not found",
                        table_name,
                        piece.name
                    );
                    report.missing_tables += 1;
                }
            }
        }

        report.bound_mocks = mocks.bind(prefabs)?;
        report.fixed_references = mocks.fix_references(prefabs)?;

        log::info!(
            "registered {} pieces ({} skipped), bound {} references",
            report.applied,
            report.skipped,
            report.fixed_references
        );
        Ok(report)
    }
}
