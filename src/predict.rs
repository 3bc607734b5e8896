//! The end-to-end prediction pipeline for one movie at a time.
//!
//! ```text
//! Movie ──► build_candidates ──► Resolver ──► roster prediction ──┐
//!   │                                                             ├─► merge
//!   └────► DemographicScorer ──────────────► demographic prediction ┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use castgender::{Movie, PredictConfig, Predictor};
//! use castgender::loader::parse_roster;
//! use castgender_core::{GenderLabel, NameScoreTable};
//! use std::sync::Arc;
//!
//! let roster = parse_roster("Carol Aird | Cate Blanchett (F), Harge Aird | Kyle Chandler (M)")?;
//! let mut movie = Movie::new(Some(2015), roster);
//! movie.add_line("CAROL", 12);
//! movie.add_line("HARGE (V.O.)", 4);
//!
//! let predictor = Predictor::new(PredictConfig::new(), Arc::new(NameScoreTable::default()))?;
//! let prediction = predictor.predict(&movie);
//! assert_eq!(prediction["carol"], GenderLabel::Female);
//! assert_eq!(prediction["harge"], GenderLabel::Male);
//! # Ok::<(), castgender::Error>(())
//! ```

use crate::align::build_candidates;
use crate::config::{MergePriority, PredictConfig};
use crate::demographic::DemographicScorer;
use crate::error::Result;
use crate::merge::{merge, Prediction};
use castgender_coalesce::{Resolution, Resolver};
use castgender_core::{GenderLabel, NameScoreTable, RootName, Roster};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// A speaking character, identified by its root name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Canonical name.
    pub name: RootName,
    /// Word count of each spoken line, in script order.
    pub line_data: Vec<usize>,
    /// Predicted label, once attached.
    pub gender: Option<GenderLabel>,
}

impl Character {
    /// Create a character with no lines.
    pub fn new(name: impl Into<RootName>) -> Self {
        Self {
            name: name.into(),
            line_data: Vec::new(),
            gender: None,
        }
    }

    /// Number of spoken lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_data.len()
    }

    /// Total words spoken.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.line_data.iter().sum()
    }
}

/// One movie: its release year, speaking characters and credited cast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Release year, if known.
    pub year: Option<i32>,
    /// Characters in first-encounter order.
    pub characters: Vec<Character>,
    /// Credited cast in billing order.
    pub roster: Roster,
}

impl Movie {
    /// Create a movie with no characters yet.
    pub fn new(year: Option<i32>, roster: Roster) -> Self {
        Self {
            year,
            characters: Vec::new(),
            roster,
        }
    }

    /// Record a spoken line under the root of `raw_variant`.
    ///
    /// Variants that normalize to the same root accumulate on one
    /// character. Returns the root the line was filed under.
    pub fn add_line(&mut self, raw_variant: &str, words: usize) -> &RootName {
        let name = RootName::normalize(raw_variant);
        let idx = match self.position(&name) {
            Some(idx) => idx,
            None => {
                self.characters.push(Character::new(name));
                self.characters.len() - 1
            }
        };
        let character = &mut self.characters[idx];
        character.line_data.push(words);
        &character.name
    }

    /// Add a whole character, merging its lines into an existing one with
    /// the same root.
    pub fn add_character(&mut self, character: Character) {
        match self.position(&character.name) {
            Some(idx) => {
                let existing = &mut self.characters[idx];
                existing.line_data.extend(character.line_data);
                if existing.gender.is_none() {
                    existing.gender = character.gender;
                }
            }
            None => self.characters.push(character),
        }
    }

    /// Look up a character by name; the name is normalized first.
    #[must_use]
    pub fn character(&self, name: &str) -> Option<&Character> {
        let name = RootName::normalize(name);
        self.position(&name).map(|idx| &self.characters[idx])
    }

    /// Root names of all characters.
    pub fn names(&self) -> impl Iterator<Item = &RootName> {
        self.characters.iter().map(|c| &c.name)
    }

    /// Write labels from `prediction` onto the characters. Characters the
    /// prediction does not mention keep their current label.
    pub fn attach(&mut self, prediction: &Prediction) {
        for character in &mut self.characters {
            if let Some(label) = prediction.get(&character.name) {
                character.gender = Some(*label);
            }
        }
    }

    fn position(&self, name: &RootName) -> Option<usize> {
        self.characters.iter().position(|c| &c.name == name)
    }
}

/// Runs both prediction sources and reconciles them.
#[derive(Debug, Clone)]
pub struct Predictor {
    config: PredictConfig,
    scorer: DemographicScorer,
}

impl Predictor {
    /// Create a predictor. Fails if `config` does not validate.
    pub fn new(config: PredictConfig, table: Arc<NameScoreTable>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scorer: DemographicScorer::new(table),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &PredictConfig {
        &self.config
    }

    /// The demographic scorer.
    pub fn scorer(&self) -> &DemographicScorer {
        &self.scorer
    }

    /// Labels derived from the credited cast.
    ///
    /// Only names assigned to an entry with a known portrayer gender get a
    /// label; a character credited twice takes the later credit's gender.
    /// An unresolvable roster yields an empty prediction.
    pub fn predict_roster(&self, movie: &Movie) -> Prediction {
        let roster = match self.config.max_roster_entries {
            Some(n) if n < movie.roster.len() => Cow::Owned(movie.roster.top_billed(n)),
            _ => Cow::Borrowed(&movie.roster),
        };
        let candidates = build_candidates(movie.names(), &roster, self.config.alignment);

        let mut resolver = Resolver::new(self.config.resolver.policy());
        if let Some(steps) = self.config.step_budget {
            resolver = resolver.with_step_budget(steps);
        }

        let assignment = match resolver.resolve(candidates, &roster) {
            Resolution::Resolved(assignment) => assignment,
            other => {
                log::debug!(
                    "No roster prediction for {} characters: {:?}",
                    movie.characters.len(),
                    other
                );
                return Prediction::new();
            }
        };

        assignment
            .iter()
            .filter_map(|(name, id)| {
                let gender = roster.credited_gender(id)?;
                Some((name.clone(), gender.label()))
            })
            .collect()
    }

    /// Labels derived from names alone, one per character.
    pub fn predict_demographic(&self, movie: &Movie) -> Prediction {
        movie
            .characters
            .iter()
            .map(|c| {
                let label = self.scorer.label(
                    c.name.as_str(),
                    movie.year,
                    self.config.check_decade,
                    self.config.classify_mode,
                );
                (c.name.clone(), label)
            })
            .collect()
    }

    /// Merged prediction for `movie`.
    pub fn predict(&self, movie: &Movie) -> Prediction {
        let roster = self.predict_roster(movie);
        let demographic = self.predict_demographic(movie);
        let demographic_trumps = self.config.priority == MergePriority::Demographic;
        merge(&demographic, &roster, demographic_trumps)
    }

    /// Predict every movie independently, in input order.
    #[cfg(feature = "parallel")]
    pub fn predict_all(&self, movies: &[Movie]) -> Vec<Prediction> {
        use rayon::prelude::*;
        movies.par_iter().map(|movie| self.predict(movie)).collect()
    }

    /// Predict every movie independently, in input order.
    #[cfg(not(feature = "parallel"))]
    pub fn predict_all(&self, movies: &[Movie]) -> Vec<Prediction> {
        movies.iter().map(|movie| self.predict(movie)).collect()
    }
}
