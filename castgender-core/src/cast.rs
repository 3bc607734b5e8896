//! Cast rosters and gender labels.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Gender
// =============================================================================

/// Gender tag of a portrayer, as reported by the roster source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Tagged `M`.
    Male,
    /// Tagged `F`.
    Female,
}

impl Gender {
    /// Parse a roster tag. Anything other than `M`/`F` (e.g. `?`) is unknown.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "M" | "m" => Some(Self::Male),
            "F" | "f" => Some(Self::Female),
            _ => None,
        }
    }

    /// The confident label for this gender.
    #[must_use]
    pub fn label(self) -> GenderLabel {
        match self {
            Self::Male => GenderLabel::Male,
            Self::Female => GenderLabel::Female,
        }
    }
}

/// Inferred gender of a speaking character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderLabel {
    /// `M`
    Male,
    /// `F`
    Female,
    /// `BOTH`: a conjoined name ("x and y") whose parts disagree.
    Both,
    /// `UNK`: no confident inference.
    Unknown,
}

impl GenderLabel {
    /// Only `M` and `F` count as confident predictions.
    #[must_use]
    pub fn is_confident(self) -> bool {
        matches!(self, Self::Male | Self::Female)
    }

    /// Short tag used in reports.
    #[must_use]
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Both => "BOTH",
            Self::Unknown => "UNK",
        }
    }
}

impl fmt::Display for GenderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for GenderLabel {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            "BOTH" => Ok(Self::Both),
            "UNK" => Ok(Self::Unknown),
            _ => Err(Error::parse(format!("Unknown gender label: {}", s))),
        }
    }
}

impl From<Gender> for GenderLabel {
    fn from(gender: Gender) -> Self {
        gender.label()
    }
}

// =============================================================================
// Roster
// =============================================================================

/// One credited role: who is played, by whom, and the portrayer's gender.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastEntry {
    /// Character name as credited.
    pub character: String,
    /// Portrayer name.
    pub portrayer: String,
    /// Portrayer gender, `None` when the source had no tag.
    pub gender: Option<Gender>,
}

impl CastEntry {
    /// Create a new entry.
    pub fn new(
        character: impl Into<String>,
        portrayer: impl Into<String>,
        gender: Option<Gender>,
    ) -> Self {
        Self {
            character: character.into(),
            portrayer: portrayer.into(),
            gender,
        }
    }

    /// Lower-cased character name used for alignment.
    #[must_use]
    pub fn key(&self) -> String {
        self.character.to_lowercase()
    }
}

/// Billing position of an entry within its [`Roster`] (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CastId(pub usize);

impl fmt::Display for CastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A movie's credited cast in billing order.
///
/// Billing order is preserved everywhere: iteration, truncation and
/// candidate building all walk entries front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    entries: Vec<CastEntry>,
}

impl Roster {
    /// Create a roster from entries in billing order.
    #[must_use]
    pub fn new(entries: Vec<CastEntry>) -> Self {
        Self { entries }
    }

    /// Number of credited entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is credited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by billing position.
    #[must_use]
    pub fn get(&self, id: CastId) -> Option<&CastEntry> {
        self.entries.get(id.0)
    }

    /// Append an entry at the bottom of the billing.
    pub fn push(&mut self, entry: CastEntry) -> CastId {
        self.entries.push(entry);
        CastId(self.entries.len() - 1)
    }

    /// Entries with their billing positions, top billing first.
    pub fn iter(&self) -> impl Iterator<Item = (CastId, &CastEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (CastId(i), entry))
    }

    /// Entries offered as alignment candidates.
    ///
    /// An entry whose lower-cased character name repeats an earlier-billed
    /// entry is skipped, so every candidate key is unique.
    pub fn distinct(&self) -> impl Iterator<Item = (CastId, &CastEntry)> {
        let mut seen = std::collections::HashSet::new();
        self.iter().filter(move |(_, entry)| seen.insert(entry.key()))
    }

    /// Portrayer gender credited to the character at `id`.
    ///
    /// When the lower-cased character name is credited more than once, the
    /// last-billed credit decides, while [`Roster::distinct`] keeps the
    /// first position.
    #[must_use]
    pub fn credited_gender(&self, id: CastId) -> Option<Gender> {
        let key = self.get(id)?.key();
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key() == key)
            .and_then(|entry| entry.gender)
    }

    /// A roster holding only the first `n` billed entries.
    #[must_use]
    pub fn top_billed(&self, n: usize) -> Self {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }
}

impl FromIterator<CastEntry> for Roster {
    fn from_iter<I: IntoIterator<Item = CastEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
