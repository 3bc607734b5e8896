//! Character name normalization.
//!
//! Screenplay markup spells the same speaker many ways:
//!
//! ```text
//! CAROL            → carol
//! CAROL (V.O.)     → carol
//! Carol:           → carol
//! MR. WANG         → mr wang
//! CATE'S VOICE     → cate
//! CHRIS' VOICE     → chris
//! HAL VOICE-OVER   → hal
//! ```
//!
//! Every variant is folded into a [`RootName`], the key used by alignment,
//! assignment and demographic scoring.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Canonical lower-case identity of a speaking character.
///
/// A `RootName` can only be obtained through normalization, so holding one
/// means the text is already canonical. Normalizing a `RootName` again
/// yields the same value.
///
/// # Example
///
/// ```rust
/// use castgender_core::RootName;
///
/// let root = RootName::normalize("WILLY (V.O.)");
/// assert_eq!(root.as_str(), "willy");
/// assert_eq!(RootName::normalize(root.as_str()), root);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct RootName(String);

impl RootName {
    /// Normalize a raw name variant into its root.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// The canonical text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if normalization left nothing (punctuation-only input).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the canonical text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RootName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RootName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RootName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RootName {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<String> for RootName {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<RootName> for String {
    fn from(root: RootName) -> Self {
        root.into_string()
    }
}

/// Transform a variant of a character name to its root.
///
/// Never fails; punctuation-only input may normalize to the empty string.
///
/// Steps, in order:
/// 1. lower-case
/// 2. drop everything from the first `" ("` (delivery notes such as `(v.o.)`)
/// 3. trim `:` from both ends
/// 4. collapse abbreviation periods (`"mr. wang"` → `"mr wang"`)
/// 5. strip voice-over markers, keeping only the name part
///
/// The steps are reapplied until the text stops changing, which makes the
/// function idempotent even for inputs like `"bob: voice"`.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut current = normalize_pass(raw);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_pass(var: &str) -> String {
    let lowered = var.to_lowercase();
    let unannotated = match lowered.split_once(" (") {
        Some((head, _)) => head,
        None => lowered.as_str(),
    };
    let name = unannotated.trim_matches(':').replace(". ", " ");

    if name.contains("'s voice") {
        head_before(&name, "'s")
    } else if name.contains("s' voice") || name.contains("z' voice") {
        head_before(&name, "'")
    } else if name.contains(" voice") {
        head_before(&name, " voice")
    } else {
        name
    }
}

fn head_before(text: &str, marker: &str) -> String {
    match text.split_once(marker) {
        Some((head, _)) => head.to_string(),
        None => text.to_string(),
    }
}
