//! # castgender-coalesce
//!
//! Coalesce ambiguous script-name ↔ roster correspondences into one
//! assignment per name.
//!
//! # Example
//!
//! ```
//! use castgender_coalesce::Resolver;
//! use castgender_core::{CandidateMap, CastEntry, CastId, Gender, RootName, Roster};
//!
//! let roster = Roster::new(vec![
//!     CastEntry::new("carol ross", "C.B.", Some(Gender::Female)),
//!     CastEntry::new("therese belivet", "R.M.", Some(Gender::Female)),
//! ]);
//! let mut candidates = CandidateMap::new();
//! candidates.push(&RootName::normalize("carol"), CastId(0));
//! candidates.push(&RootName::normalize("therese"), CastId(1));
//!
//! let assignment = Resolver::hard()
//!     .resolve(candidates, &roster)
//!     .into_assignment()
//!     .unwrap();
//! assert_eq!(assignment.get("therese"), Some(CastId(1)));
//! ```

#![warn(missing_docs)]

pub mod resolver;

pub use resolver::{Resolution, ResolvePolicy, Resolver};
