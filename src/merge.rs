//! Reconciling predictions from two sources.
//!
//! ```text
//!             a        b        a_trumps=true   a_trumps=false
//! carol       F        -        F               F
//! harge       -        M        M               M
//! rindy       F        M        F               M
//! abby        UNK      F        F               F
//! ```
//!
//! Only `M` and `F` are confident; `BOTH` and `UNK` count as absent.

use castgender_core::{GenderLabel, RootName};
use std::collections::BTreeMap;

/// Per-character labels for one movie, ordered by name.
pub type Prediction = BTreeMap<RootName, GenderLabel>;

/// Merge two predictions. On conflict the source selected by `a_trumps` wins.
#[must_use]
pub fn merge(a: &Prediction, b: &Prediction, a_trumps: bool) -> Prediction {
    let (winner, loser) = if a_trumps { (a, b) } else { (b, a) };
    let mut merged: Prediction = confident(loser).collect();
    merged.extend(confident(winner));
    merged
}

fn confident(prediction: &Prediction) -> impl Iterator<Item = (RootName, GenderLabel)> + '_ {
    prediction
        .iter()
        .filter(|(_, label)| label.is_confident())
        .map(|(name, label)| (name.clone(), *label))
}
