//! Roster-independent gender scoring from names alone.
//!
//! Used as the fallback when the cast roster has nothing to say about a
//! character. Two signals, in priority order:
//!
//! 1. **Titles and kinship terms** (`mrs`, `father`, `princess`...) decide
//!    outright: 1.0 for female-coded, 0.0 for male-coded.
//! 2. **Historical first-name statistics**: the female fraction of births
//!    with that name, averaged over the decade before the movie's release.
//!
//! ```text
//! "mrs robinson"  → title "mrs"              → 1.0
//! "john"  (1955)  → mean(1946..=1955) = 0.02 → M (hard)
//! "bonnie and clyde" → F + M                 → BOTH
//! ```
//!
//! # Gender Bias Warning
//!
//! Name statistics reflect naming conventions of a particular population,
//! not facts about any character. Scores are a proxy, which is why the
//! hard classification mode refuses to label anything below 90% agreement.

use castgender_core::{GenderLabel, NameScoreTable};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Female-coded titles and kinship terms.
pub const FEMALE_TITLES: &[&str] = &[
    "ms",
    "miss",
    "mrs",
    "mother",
    "mom",
    "momma",
    "sister",
    "aunt",
    "grandma",
    "grandmother",
    "lady",
    "mistress",
    "duchess",
    "madam",
    "madame",
    "princess",
    "girl",
    "woman",
    "waitress",
];

/// Male-coded titles and kinship terms.
pub const MALE_TITLES: &[&str] = &[
    "mr",
    "mister",
    "father",
    "dad",
    "brother",
    "uncle",
    "grandpa",
    "grandfather",
    "master",
    "duke",
    "prince",
    "boy",
    "man",
];

static FEMALE: Lazy<HashSet<&'static str>> = Lazy::new(|| FEMALE_TITLES.iter().copied().collect());
static MALE: Lazy<HashSet<&'static str>> = Lazy::new(|| MALE_TITLES.iter().copied().collect());

const CONJUNCTION: &str = " and ";

/// Thresholds for turning a score into a label.
///
/// | Mode | `F` when | `M` when | otherwise |
/// |------|----------|----------|-----------|
/// | `Hard` | > 0.9 | < 0.1 | `UNK` |
/// | `Soft` | > 0.5 | < 0.5 | `UNK` (exactly 0.5) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifyMode {
    /// Confident labels only.
    #[default]
    Hard,
    /// Majority labels.
    Soft,
}

impl ClassifyMode {
    /// `(female_above, male_below)` bounds for this mode.
    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Self::Hard => (0.9, 0.1),
            Self::Soft => (0.5, 0.5),
        }
    }
}

/// Label a female-fraction score. NaN is `UNK`.
#[must_use]
pub fn classify(score: f64, mode: ClassifyMode) -> GenderLabel {
    let (female_above, male_below) = mode.bounds();
    if score > female_above {
        GenderLabel::Female
    } else if score < male_below {
        GenderLabel::Male
    } else {
        GenderLabel::Unknown
    }
}

/// Split a name into lower-case tokens; `/` separates tokens too.
#[must_use]
pub fn tokenize(name: &str) -> Vec<String> {
    name.replace('/', " ")
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Score from the first title token, if any token is a title.
#[must_use]
pub fn title_score<S: AsRef<str>>(tokens: &[S]) -> Option<f64> {
    tokens.iter().find_map(|tok| {
        let tok = tok.as_ref();
        if FEMALE.contains(tok) {
            Some(1.0)
        } else if MALE.contains(tok) {
            Some(0.0)
        } else {
            None
        }
    })
}

/// Name-based gender scorer backed by a shared [`NameScoreTable`].
#[derive(Debug, Clone)]
pub struct DemographicScorer {
    table: Arc<NameScoreTable>,
}

impl DemographicScorer {
    /// Create a scorer over `table`.
    pub fn new(table: Arc<NameScoreTable>) -> Self {
        Self { table }
    }

    /// The underlying table.
    pub fn table(&self) -> &NameScoreTable {
        &self.table
    }

    /// Female-fraction score for `name`, or `None` if nothing is known.
    ///
    /// With `check_decade` and a known `year`, statistics are averaged over
    /// `year - 9 ..= year`; otherwise over the table's full supported range.
    /// Tokens are tried in order and the first with any data wins; scores of
    /// several tokens are never combined.
    pub fn score(&self, name: &str, year: Option<i32>, check_decade: bool) -> Option<f64> {
        let tokens = tokenize(name);
        if let Some(score) = title_score(&tokens) {
            return Some(score);
        }

        let range = match year {
            Some(year) if check_decade => year.saturating_sub(9)..=year,
            _ => self.table.supported_range(),
        };
        tokens
            .iter()
            .find_map(|tok| self.table.mean_score(tok, range.clone()))
    }

    /// Label `name`, splitting conjoined names (`"x and y"`).
    ///
    /// For a conjunction, each part is labelled on its own: any `UNK` part
    /// makes the whole `UNK`, agreeing parts give their shared label, and
    /// disagreeing parts give `BOTH`.
    pub fn label(
        &self,
        name: &str,
        year: Option<i32>,
        check_decade: bool,
        mode: ClassifyMode,
    ) -> GenderLabel {
        let lowered = name.to_lowercase();
        if !lowered.contains(CONJUNCTION) {
            return self.label_single(&lowered, year, check_decade, mode);
        }

        let mut combined: Option<GenderLabel> = None;
        for part in lowered.split(CONJUNCTION) {
            let label = self.label_single(part, year, check_decade, mode);
            combined = match (combined, label) {
                (_, GenderLabel::Unknown) => return GenderLabel::Unknown,
                (None, label) => Some(label),
                (Some(prev), label) if prev == label => Some(prev),
                (Some(_), _) => Some(GenderLabel::Both),
            };
        }
        combined.unwrap_or(GenderLabel::Unknown)
    }

    fn label_single(
        &self,
        name: &str,
        year: Option<i32>,
        check_decade: bool,
        mode: ClassifyMode,
    ) -> GenderLabel {
        self.score(name, year, check_decade)
            .map_or(GenderLabel::Unknown, |score| classify(score, mode))
    }
}
