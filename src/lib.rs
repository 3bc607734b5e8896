//! # castgender
//!
//! Gender labels for the speaking characters of a movie script.
//!
//! Two noisy sources are reconciled:
//!
//! - **The credited cast**: script names are aligned with roster character
//!   names, ambiguous correspondences are resolved, and the portrayer's
//!   gender is taken over.
//! - **Name statistics**: titles (`mrs`, `uncle`) and historical first-name
//!   frequencies give a score for names the roster cannot explain.
//!
//! ## Quick Start
//!
//! ```rust
//! use castgender::prelude::*;
//! use std::sync::Arc;
//!
//! let roster = castgender::loader::parse_roster(
//!     "Carol Aird | Cate Blanchett (F), Therese Belivet | Rooney Mara (F)",
//! )?;
//! let mut movie = Movie::new(Some(2015), roster);
//! movie.add_line("CAROL", 9);
//! movie.add_line("THERESE (V.O.)", 3);
//! movie.add_line("MRS. ROBINSON", 4);
//!
//! let config = PredictConfig::new().with_resolver(ResolverKind::Hard);
//! let predictor = Predictor::new(config, Arc::new(NameScoreTable::default()))?;
//! let prediction = predictor.predict(&movie);
//!
//! assert_eq!(prediction["carol"], GenderLabel::Female);
//! assert_eq!(prediction["therese"], GenderLabel::Female);
//! assert_eq!(prediction["mrs robinson"], GenderLabel::Female);
//! # Ok::<(), castgender::Error>(())
//! ```
//!
//! ## Layout
//!
//! | Crate / module | Role |
//! |----------------|------|
//! | `castgender-core` | names, rosters, candidate maps, name tables |
//! | `castgender-coalesce` | the assignment resolver |
//! | [`align`] | script name ↔ roster name alignment |
//! | [`demographic`] | title and name-statistics scoring |
//! | [`merge`] | reconciling two predictions |
//! | [`predict`] | the per-movie pipeline |
//! | [`loader`] | name lists and roster credit parsing |
//!
//! ## Feature Flags
//!
//! - `parallel`: [`Predictor::predict_all`] processes movies with rayon.

#![warn(missing_docs)]

pub mod align;
pub mod config;
pub mod demographic;
mod error;
pub mod loader;
pub mod merge;
pub mod predict;
pub mod similarity;

pub use align::{build_candidates, AlignStrategy, DEFAULT_THRESHOLD};
pub use config::{MergePriority, PredictConfig, ResolverKind};
pub use demographic::{classify, ClassifyMode, DemographicScorer};
pub use error::{Error, Result};
pub use merge::{merge, Prediction};
pub use predict::{Character, Movie, Predictor};

pub use castgender_coalesce::{Resolution, ResolvePolicy, Resolver};
pub use castgender_core::{
    normalize, Assignment, CandidateMap, CastEntry, CastId, Gender, GenderLabel, NameScoreTable,
    RootName, Roster,
};

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use castgender::prelude::*;
    //!
    //! let name = RootName::normalize("CAROL (V.O.)");
    //! assert_eq!(name.as_str(), "carol");
    //! ```
    pub use crate::align::AlignStrategy;
    pub use crate::config::{MergePriority, PredictConfig, ResolverKind};
    pub use crate::demographic::ClassifyMode;
    pub use crate::error::{Error, Result};
    pub use crate::merge::Prediction;
    pub use crate::predict::{Character, Movie, Predictor};
    pub use castgender_core::{CastEntry, Gender, GenderLabel, NameScoreTable, RootName, Roster};
}
