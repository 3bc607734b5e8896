//! Candidate maps and assignments.
//!
//! A [`CandidateMap`] records, for every script name, which roster entries
//! it plausibly denotes. An [`Assignment`] is what remains after resolving
//! that ambiguity down to one entry per name.
//!
//! ```text
//! CandidateMap                       Assignment
//! ─────────────                      ──────────
//! carol   → [#0 carol ross]          carol   → #0
//! therese → [#1 therese belivet]     therese → #1
//! ```
//!
//! Both keep insertion order, so iteration is deterministic and follows the
//! order in which characters (and roster entries) were encountered.

use crate::cast::CastId;
use crate::name::RootName;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered mapping from script name to aligned roster entries.
///
/// Candidate lists hold each [`CastId`] at most once and keep roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMap {
    entries: Vec<(RootName, Vec<CastId>)>,
}

impl CandidateMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `candidate` to `name`'s list, creating the list on first use.
    ///
    /// Returns `false` if the candidate was already listed.
    pub fn push(&mut self, name: &RootName, candidate: CastId) -> bool {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, list)) => {
                if list.contains(&candidate) {
                    false
                } else {
                    list.push(candidate);
                    true
                }
            }
            None => {
                self.entries.push((name.clone(), vec![candidate]));
                true
            }
        }
    }

    /// Register `name` without adding a candidate.
    ///
    /// A declared name with an empty list still takes part in resolution,
    /// where it can never be satisfied.
    pub fn declare(&mut self, name: &RootName) {
        if !self.entries.iter().any(|(n, _)| n == name) {
            self.entries.push((name.clone(), Vec::new()));
        }
    }

    /// Candidates listed for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[CastId]> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, list)| list.as_slice())
    }

    /// Number of script names with at least one candidate list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no script name has a candidate list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Script names in encounter order.
    pub fn names(&self) -> impl Iterator<Item = &RootName> {
        self.entries.iter().map(|(n, _)| n)
    }

    /// `(name, candidates)` pairs in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&RootName, &[CastId])> {
        self.entries.iter().map(|(n, list)| (n, list.as_slice()))
    }

    /// Consume into `(name, candidates)` pairs in encounter order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(RootName, Vec<CastId>)> {
        self.entries
    }
}

impl FromIterator<(RootName, CastId)> for CandidateMap {
    fn from_iter<I: IntoIterator<Item = (RootName, CastId)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, candidate) in iter {
            map.push(&name, candidate);
        }
        map
    }
}

/// Mapping from script name to the single roster entry it was resolved to.
///
/// Entries are kept in the order they were assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    entries: Vec<(RootName, CastId)>,
}

impl Assignment {
    /// Create an empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `name` to `candidate`, replacing any earlier choice.
    pub fn insert(&mut self, name: RootName, candidate: CastId) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = candidate,
            None => self.entries.push((name, candidate)),
        }
    }

    /// The entry `name` was resolved to.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<CastId> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, id)| *id)
    }

    /// Number of assigned names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, entry)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&RootName, CastId)> {
        self.entries.iter().map(|(n, id)| (n, *id))
    }

    /// True if no two names share a roster entry.
    #[must_use]
    pub fn is_injective(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.entries.len());
        self.entries.iter().all(|(_, id)| seen.insert(*id))
    }
}

impl FromIterator<(RootName, CastId)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (RootName, CastId)>>(iter: I) -> Self {
        let mut assignment = Self::new();
        for (name, candidate) in iter {
            assignment.insert(name, candidate);
        }
        assignment
    }
}
