//! Alignment of script names with roster character names.
//!
//! An alignment is a yes/no judgement that a script name (the needle) and a
//! roster character name (the haystack) denote the same character.
//!
//! | Strategy | Aligned when |
//! |----------|--------------|
//! | `Inclusion` | the script name occurs inside the roster name |
//! | `Threshold` | the longest shared run is at least `min_len` characters |
//! | `Blended` | `Inclusion`, falling back to `Threshold` |
//!
//! ```text
//! roster "carol ross", script "carol"   → Inclusion ✓
//! roster "mr john smith", script "smithy" → Inclusion ✗, Threshold(5) ✓ ("smith")
//! ```

use crate::similarity::{contains_ignore_case, longest_common_substring};
use castgender_core::{CandidateMap, RootName, Roster};
use serde::{Deserialize, Serialize};

/// Minimum shared run for the threshold strategies.
pub const DEFAULT_THRESHOLD: usize = 5;

/// How script names are matched against roster names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignStrategy {
    /// Script name is a substring of the roster name.
    #[default]
    Inclusion,
    /// Longest common substring reaches `min_len`.
    Threshold {
        /// Minimum shared run, in characters.
        min_len: usize,
    },
    /// Inclusion first, then the threshold test.
    Blended {
        /// Minimum shared run, in characters.
        min_len: usize,
    },
}

impl AlignStrategy {
    /// Threshold strategy with [`DEFAULT_THRESHOLD`].
    #[must_use]
    pub fn threshold() -> Self {
        Self::Threshold {
            min_len: DEFAULT_THRESHOLD,
        }
    }

    /// Blended strategy with [`DEFAULT_THRESHOLD`].
    #[must_use]
    pub fn blended() -> Self {
        Self::Blended {
            min_len: DEFAULT_THRESHOLD,
        }
    }

    /// Threshold used by this strategy, if any.
    #[must_use]
    pub fn min_len(&self) -> Option<usize> {
        match self {
            Self::Inclusion => None,
            Self::Threshold { min_len } | Self::Blended { min_len } => Some(*min_len),
        }
    }

    /// Decide whether `root_name` plausibly denotes `roster_name`.
    #[must_use]
    pub fn aligns(&self, roster_name: &str, root_name: &str) -> bool {
        match *self {
            Self::Inclusion => contains_ignore_case(roster_name, root_name),
            Self::Threshold { min_len } => {
                longest_common_substring(root_name, roster_name) >= min_len
            }
            Self::Blended { min_len } => {
                contains_ignore_case(roster_name, root_name)
                    || longest_common_substring(root_name, roster_name) >= min_len
            }
        }
    }
}

/// Build the candidate map for one movie.
///
/// For every name in order, every distinct roster entry in billing order is
/// tested; aligned entries are appended to that name's list. Names with no
/// aligned entry are left out of the map.
pub fn build_candidates<'a, I>(names: I, roster: &Roster, strategy: AlignStrategy) -> CandidateMap
where
    I: IntoIterator<Item = &'a RootName>,
{
    let mut candidates = CandidateMap::new();
    for name in names {
        for (id, entry) in roster.distinct() {
            if strategy.aligns(&entry.character, name.as_str()) {
                candidates.push(name, id);
            }
        }
    }
    log::debug!(
        "{} script names aligned against {} roster entries ({:?})",
        candidates.len(),
        roster.len(),
        strategy
    );
    candidates
}
