//! Piecework Core -- declarative custom pieces for moddable build systems.
//!
//! A mod describes a buildable object with a [`config::PieceConfig`] and has
//! it applied onto an existing prefab at load time. This crate provides the
//! config types, a small prefab/component model for them to act on, and the
//! deferred name resolution that lets a config refer to prefabs which are
//! not loaded yet.
//!
//! # Registration Pipeline
//!
//! 1. **Collect** -- Wrap each config in a [`custom_piece::CustomPiece`] and
//!    add it to a [`manager::PieceManager`].
//! 2. **Apply** -- Copy every config onto its prefab's piece component;
//!    station and item names become [`mock::Ref::Mock`] placeholders.
//! 3. **Table** -- Append each piece to the piece table it names.
//! 4. **Bind** -- Resolve placeholders by prefab name and rewrite them into
//!    [`mock::Ref::Resolved`] handles.
//!
//! ```rust,ignore
//! let piece = CustomPiece::from_clone(&mut prefabs, "stone_bench", "bench", config)?;
//! manager.add_piece(piece)?;
//! let report = manager.register_all(&mut prefabs, &mut mocks)?;
//! ```
//!
//! # Key Types
//!
//! - [`config::PieceConfig`] -- Settings bag with `apply`.
//! - [`prefab::PrefabStore`] -- Named prefabs and their components.
//! - [`mock::MockRegistry`] -- Named forward references and the binding pass.
//! - [`manager::PieceManager`] -- Ordered registration of custom pieces.

pub mod component;
pub mod config;
pub mod custom_piece;
pub mod id;
pub mod manager;
pub mod mock;
pub mod prefab;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
