//! # castgender-core
//!
//! Core types for the castgender workspace: shared data structures used across all crates.
//!
//! This crate provides:
//! - **Names**: `RootName` and the variant normalizer (`normalize`)
//! - **Casts**: `CastEntry`, `CastId`, `Roster`, `Gender`, `GenderLabel`
//! - **Matching state**: `CandidateMap`, `Assignment`
//! - **Demographics**: `NameScoreTable` and its builder
//!
//! All other crates in the workspace depend on `castgender-core` so that
//! candidate maps built by one crate can be resolved by another.

#![warn(missing_docs)]

pub mod candidates;
pub mod cast;
pub mod error;
pub mod name;
pub mod table;

pub use candidates::{Assignment, CandidateMap};
pub use cast::{CastEntry, CastId, Gender, GenderLabel, Roster};
pub use error::{Error, Result};
pub use name::{normalize, RootName};
pub use table::{NameScoreTable, NameScoreTableBuilder, DEFAULT_YEAR_RANGE};
