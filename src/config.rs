//! Configuration for the prediction pipeline.

use crate::align::AlignStrategy;
use crate::demographic::ClassifyMode;
use crate::error::{Error, Result};
use castgender_coalesce::ResolvePolicy;
use serde::{Deserialize, Serialize};

/// Which resolver policy turns candidates into an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Mutually exclusive, backtracking.
    Hard,
    /// Greedy, entries may be shared.
    #[default]
    Soft,
}

impl ResolverKind {
    /// The resolver policy for this kind.
    pub fn policy(self) -> ResolvePolicy {
        match self {
            Self::Hard => ResolvePolicy::HARD,
            Self::Soft => ResolvePolicy::SOFT,
        }
    }
}

/// Which source wins when roster and demographic predictions disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePriority {
    /// Name statistics win.
    #[default]
    Demographic,
    /// The cast roster wins.
    Roster,
}

/// Pipeline configuration.
///
/// Defaults: inclusion alignment, soft resolver, hard classification,
/// decade check on, demographic prediction wins conflicts, uncapped roster,
/// unbounded search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictConfig {
    /// Alignment strategy for script names against roster names.
    pub alignment: AlignStrategy,
    /// Resolver policy.
    pub resolver: ResolverKind,
    /// Classification thresholds for demographic scores.
    pub classify_mode: ClassifyMode,
    /// Restrict name statistics to the decade before release.
    pub check_decade: bool,
    /// Conflict priority when merging.
    pub priority: MergePriority,
    /// Only consider the first `n` billed roster entries.
    pub max_roster_entries: Option<usize>,
    /// Bound on tentative assignments per movie.
    pub step_budget: Option<usize>,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            alignment: AlignStrategy::Inclusion,
            resolver: ResolverKind::Soft,
            classify_mode: ClassifyMode::Hard,
            check_decade: true,
            priority: MergePriority::Demographic,
            max_roster_entries: None,
            step_budget: None,
        }
    }
}

impl PredictConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alignment strategy.
    pub fn with_alignment(mut self, alignment: AlignStrategy) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the resolver policy.
    pub fn with_resolver(mut self, resolver: ResolverKind) -> Self {
        self.resolver = resolver;
        self
    }

    /// Set the classification mode.
    pub fn with_classify_mode(mut self, mode: ClassifyMode) -> Self {
        self.classify_mode = mode;
        self
    }

    /// Enable or disable the decade restriction.
    pub fn with_check_decade(mut self, check: bool) -> Self {
        self.check_decade = check;
        self
    }

    /// Set which source wins conflicts.
    pub fn with_priority(mut self, priority: MergePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Cap the roster at the first `n` billed entries.
    pub fn with_max_roster_entries(mut self, n: usize) -> Self {
        self.max_roster_entries = Some(n);
        self
    }

    /// Bound the resolver search.
    pub fn with_step_budget(mut self, steps: usize) -> Self {
        self.step_budget = Some(steps);
        self
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that can never produce a prediction.
    pub fn validate(&self) -> Result<()> {
        if self.alignment.min_len() == Some(0) {
            return Err(Error::invalid_config(
                "alignment threshold must be at least 1",
            ));
        }
        if self.max_roster_entries == Some(0) {
            return Err(Error::invalid_config("max_roster_entries must be at least 1"));
        }
        if self.step_budget == Some(0) {
            return Err(Error::invalid_config("step_budget must be at least 1"));
        }
        Ok(())
    }
}
