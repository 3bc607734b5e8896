//! Historical first-name frequency table.
//!
//! For every year, maps a lower-case first name to the fraction of recorded
//! births with that name that were female:
//!
//! ```text
//! score = female / (female + male)        ∈ [0.0, 1.0]
//!
//! 1955 ─┬─ john  → 0.004
//!       ├─ mary  → 0.997
//!       └─ leslie → 0.71
//! ```
//!
//! The table is built once and never mutated afterwards; share it behind an
//! `Arc` across scorers and threads.

use crate::cast::Gender;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;

/// Years covered by the demographic source when nothing else is known.
pub const DEFAULT_YEAR_RANGE: RangeInclusive<i32> = 1880..=2017;

/// Immutable year → name → female-fraction table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameScoreTable {
    years: BTreeMap<i32, HashMap<String, f64>>,
    first_year: Option<i32>,
    last_year: Option<i32>,
}

impl NameScoreTable {
    /// Start building a table.
    #[must_use]
    pub fn builder() -> NameScoreTableBuilder {
        NameScoreTableBuilder::default()
    }

    /// Female fraction for `name` in `year`, if recorded.
    #[must_use]
    pub fn score(&self, year: i32, name: &str) -> Option<f64> {
        self.years.get(&year).and_then(|names| names.get(name)).copied()
    }

    /// Average female fraction for `name` over the recorded years in `range`.
    ///
    /// Years without data for `name` are skipped rather than counted as zero.
    /// Returns `None` if no year in the range records the name.
    #[must_use]
    pub fn mean_score(&self, name: &str, range: RangeInclusive<i32>) -> Option<f64> {
        if range.start() > range.end() {
            return None;
        }
        let (sum, years) = self
            .years
            .range(range)
            .filter_map(|(_, names)| names.get(name))
            .fold((0.0, 0usize), |(sum, n), score| (sum + score, n + 1));
        if years == 0 {
            None
        } else {
            Some(sum / years as f64)
        }
    }

    /// Full range of years lookups fall back to when no movie year applies.
    ///
    /// An explicitly configured range wins; otherwise the span of recorded
    /// years; otherwise [`DEFAULT_YEAR_RANGE`].
    #[must_use]
    pub fn supported_range(&self) -> RangeInclusive<i32> {
        let first = self
            .first_year
            .or_else(|| self.years.keys().next().copied())
            .unwrap_or(*DEFAULT_YEAR_RANGE.start());
        let last = self
            .last_year
            .or_else(|| self.years.keys().next_back().copied())
            .unwrap_or(*DEFAULT_YEAR_RANGE.end());
        first..=last
    }

    /// Recorded years, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    /// Number of names recorded for `year`.
    #[must_use]
    pub fn name_count(&self, year: i32) -> usize {
        self.years.get(&year).map_or(0, HashMap::len)
    }

    /// True if no year has any data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.values().all(HashMap::is_empty)
    }
}

/// Accumulates birth counts or precomputed scores into a [`NameScoreTable`].
#[derive(Debug, Clone, Default)]
pub struct NameScoreTableBuilder {
    counts: BTreeMap<i32, HashMap<String, (u64, u64)>>,
    scores: BTreeMap<i32, HashMap<String, f64>>,
    range: Option<RangeInclusive<i32>>,
}

impl NameScoreTableBuilder {
    /// Record `count` births of `name` with `gender` in `year`.
    ///
    /// Names are lower-cased; repeated calls accumulate.
    pub fn add_count(&mut self, year: i32, name: &str, gender: Gender, count: u64) -> &mut Self {
        let slot = self
            .counts
            .entry(year)
            .or_default()
            .entry(name.to_lowercase())
            .or_insert((0, 0));
        match gender {
            Gender::Female => slot.0 += count,
            Gender::Male => slot.1 += count,
        }
        self
    }

    /// Record a precomputed female fraction, overriding any counts for the name.
    pub fn insert_score(&mut self, year: i32, name: &str, score: f64) -> Result<&mut Self> {
        if !(0.0..=1.0).contains(&score) {
            return Err(Error::table(format!(
                "score for '{}' in {} out of range: {}",
                name, year, score
            )));
        }
        self.scores
            .entry(year)
            .or_default()
            .insert(name.to_lowercase(), score);
        Ok(self)
    }

    /// Fix the range used for lookups that have no movie year.
    pub fn supported_range(&mut self, range: RangeInclusive<i32>) -> &mut Self {
        self.range = Some(range);
        self
    }

    /// Finish the table.
    #[must_use]
    pub fn build(&self) -> NameScoreTable {
        let mut years: BTreeMap<i32, HashMap<String, f64>> = BTreeMap::new();
        for (&year, names) in &self.counts {
            let scored = years.entry(year).or_default();
            for (name, &(female, male)) in names {
                let total = female + male;
                if total > 0 {
                    scored.insert(name.clone(), female as f64 / total as f64);
                }
            }
        }
        for (&year, names) in &self.scores {
            let scored = years.entry(year).or_default();
            for (name, &score) in names {
                scored.insert(name.clone(), score);
            }
        }
        NameScoreTable {
            years,
            first_year: self.range.as_ref().map(|r| *r.start()),
            last_year: self.range.as_ref().map(|r| *r.end()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_become_female_fractions() {
        let table = NameScoreTable::builder()
            .add_count(1990, "Leslie", Gender::Female, 3)
            .add_count(1990, "leslie", Gender::Male, 1)
            .add_count(1990, "Mary", Gender::Female, 10)
            .build();
        assert_eq!(table.score(1990, "leslie"), Some(0.75));
        assert_eq!(table.score(1990, "mary"), Some(1.0));
        assert_eq!(table.score(1991, "mary"), None);
        assert_eq!(table.name_count(1990), 2);
    }

    #[test]
    fn mean_skips_years_without_the_name() {
        let mut builder = NameScoreTable::builder();
        builder.insert_score(1950, "john", 0.0).unwrap();
        builder.insert_score(1952, "john", 0.04).unwrap();
        builder.insert_score(1951, "mary", 1.0).unwrap();
        let table = builder.build();

        let mean = table.mean_score("john", 1946..=1955).unwrap();
        assert!((mean - 0.02).abs() < 1e-9);
        assert_eq!(table.mean_score("john", 1960..=1969), None);
        assert_eq!(table.mean_score("zed", 1880..=2017), None);
    }

    #[test]
    fn rejects_out_of_range_scores() {
        let mut builder = NameScoreTable::builder();
        assert!(builder.insert_score(1950, "x", 1.5).is_err());
        assert!(builder.insert_score(1950, "x", -0.1).is_err());
    }

    #[test]
    fn supported_range_resolution() {
        assert_eq!(NameScoreTable::default().supported_range(), DEFAULT_YEAR_RANGE);

        let table = NameScoreTable::builder()
            .add_count(1901, "ada", Gender::Female, 1)
            .add_count(1999, "ada", Gender::Female, 1)
            .build();
        assert_eq!(table.supported_range(), 1901..=1999);

        let table = NameScoreTable::builder()
            .add_count(1901, "ada", Gender::Female, 1)
            .supported_range(1880..=2017)
            .build();
        assert_eq!(table.supported_range(), 1880..=2017);
    }

    #[test]
    fn zero_counts_are_not_recorded() {
        let table = NameScoreTable::builder()
            .add_count(2000, "ghost", Gender::Male, 0)
            .build();
        assert_eq!(table.score(2000, "ghost"), None);
        assert!(table.is_empty());
    }
}
