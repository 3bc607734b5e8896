//! Assignment of script names to roster entries.
//!
//! Resolution is a small constraint-satisfaction search. Every script name
//! in the [`CandidateMap`] is a variable whose domain is its candidate list.
//!
//! # Search order
//!
//! ```text
//! 1. pick the name with the MOST remaining candidates
//!    (first such name in encounter order on ties)
//! 2. try its candidates rarest-first: ascending by how many other
//!    unresolved names also list them
//!    (ties: roster character name, then billing position)
//! ```
//!
//! Step 1 inverts the usual minimum-remaining-values rule. Downstream
//! fixtures depend on the exact choice it makes under ambiguity, so it is
//! kept as is.
//!
//! # Policies
//!
//! | Policy | Pruning | Backtracking | Result |
//! |--------|---------|--------------|--------|
//! | [`ResolvePolicy::HARD`] | yes | yes | injective, or `Infeasible` |
//! | [`ResolvePolicy::SOFT`] | no  | no  | may reuse an entry |
//!
//! The search runs on an explicit stack. Each branch owns a copy of the
//! pool it was opened on, so pruning in one branch never leaks into another.

use castgender_core::{Assignment, CandidateMap, CastId, RootName, Roster};
use serde::{Deserialize, Serialize};

type Pool = Vec<(RootName, Vec<CastId>)>;

/// How the resolver treats conflicts between names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvePolicy {
    /// Remove an assigned entry from every other name's candidates.
    pub prune: bool,
    /// On a dead end, retry earlier choices instead of giving up.
    pub backtrack: bool,
}

impl ResolvePolicy {
    /// Mutually exclusive assignment with full backtracking.
    pub const HARD: Self = Self {
        prune: true,
        backtrack: true,
    };

    /// Greedy assignment; repeated entries are discouraged, not forbidden.
    pub const SOFT: Self = Self {
        prune: false,
        backtrack: false,
    };
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        Self::HARD
    }
}

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Every name received an entry.
    Resolved(Assignment),
    /// No assignment satisfies the policy.
    Infeasible,
    /// The step budget ran out before the search finished.
    BudgetExhausted,
}

impl Resolution {
    /// True for [`Resolution::Resolved`].
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The assignment, if resolution succeeded.
    #[must_use]
    pub fn into_assignment(self) -> Option<Assignment> {
        match self {
            Self::Resolved(assignment) => Some(assignment),
            Self::Infeasible | Self::BudgetExhausted => None,
        }
    }
}

/// Resolver for candidate maps.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    policy: ResolvePolicy,
    step_budget: Option<usize>,
}

impl Resolver {
    /// Create a resolver with the given policy and no step budget.
    pub fn new(policy: ResolvePolicy) -> Self {
        Self {
            policy,
            step_budget: None,
        }
    }

    /// Resolver using [`ResolvePolicy::HARD`].
    pub fn hard() -> Self {
        Self::new(ResolvePolicy::HARD)
    }

    /// Resolver using [`ResolvePolicy::SOFT`].
    pub fn soft() -> Self {
        Self::new(ResolvePolicy::SOFT)
    }

    /// Bound the number of tentative assignments the search may make.
    pub fn with_step_budget(mut self, steps: usize) -> Self {
        self.step_budget = Some(steps);
        self
    }

    /// The configured policy.
    pub fn policy(&self) -> ResolvePolicy {
        self.policy
    }

    /// Resolve `candidates` to one roster entry per name.
    ///
    /// `roster` supplies the names used to break ties between equally rare
    /// candidates. An empty candidate map resolves to an empty assignment.
    pub fn resolve(&self, candidates: CandidateMap, roster: &Roster) -> Resolution {
        let names = candidates.len();
        let mut stack = match Branch::open(candidates.into_entries(), roster) {
            Opened::Complete => return Resolution::Resolved(Assignment::new()),
            Opened::DeadEnd => return Resolution::Infeasible,
            Opened::Branch(branch) => vec![branch],
        };
        let mut assigned: Vec<(RootName, CastId)> = Vec::with_capacity(names);
        let mut steps = 0usize;

        while let Some(branch) = stack.last_mut() {
            // Undo this branch's previous attempt before trying the next one.
            if branch.attempted {
                assigned.pop();
            }
            let Some(candidate) = branch.options.get(branch.next).copied() else {
                stack.pop();
                continue;
            };

            steps += 1;
            if self.step_budget.is_some_and(|budget| steps > budget) {
                log::warn!(
                    "Step budget of {} exhausted resolving {} names",
                    steps - 1,
                    names
                );
                return Resolution::BudgetExhausted;
            }

            branch.next += 1;
            branch.attempted = true;
            let name = branch.pool[branch.chosen].0.clone();
            let reduced = branch.reduce(candidate, self.policy.prune);
            assigned.push((name, candidate));

            match Branch::open(reduced, roster) {
                Opened::Complete => {
                    log::debug!("Resolved {} names in {} steps", names, steps);
                    return Resolution::Resolved(assigned.into_iter().collect());
                }
                Opened::DeadEnd => {
                    if !self.policy.backtrack {
                        log::debug!("Dead end after {} steps; policy forbids backtracking", steps);
                        return Resolution::Infeasible;
                    }
                }
                Opened::Branch(next) => stack.push(next),
            }
        }

        log::debug!("No assignment for {} names after {} steps", names, steps);
        Resolution::Infeasible
    }
}

/// One decision point: a chosen name and its ordered candidates.
struct Branch {
    pool: Pool,
    chosen: usize,
    options: Vec<CastId>,
    next: usize,
    attempted: bool,
}

enum Opened {
    Complete,
    DeadEnd,
    Branch(Branch),
}

impl Branch {
    fn open(pool: Pool, roster: &Roster) -> Opened {
        if pool.is_empty() {
            return Opened::Complete;
        }
        let chosen = most_remaining(&pool);
        if pool[chosen].1.is_empty() {
            return Opened::DeadEnd;
        }
        let options = rarest_first(&pool, chosen, roster);
        Opened::Branch(Self {
            pool,
            chosen,
            options,
            next: 0,
            attempted: false,
        })
    }

    /// The pool left after assigning `candidate` to the chosen name.
    fn reduce(&self, candidate: CastId, prune: bool) -> Pool {
        let mut pool = self.pool.clone();
        pool.remove(self.chosen);
        if prune {
            for (_, list) in &mut pool {
                list.retain(|&id| id != candidate);
            }
        }
        pool
    }
}

/// Index of the first name with the largest candidate list.
fn most_remaining(pool: &Pool) -> usize {
    let mut best = 0;
    for (i, (_, list)) in pool.iter().enumerate().skip(1) {
        if list.len() > pool[best].1.len() {
            best = i;
        }
    }
    best
}

fn rarest_first(pool: &Pool, chosen: usize, roster: &Roster) -> Vec<CastId> {
    let mut ranked: Vec<(usize, String, CastId)> = pool[chosen]
        .1
        .iter()
        .map(|&id| {
            let shared = pool
                .iter()
                .enumerate()
                .filter(|(i, (_, list))| *i != chosen && list.contains(&id))
                .count();
            let key = roster.get(id).map(|entry| entry.key()).unwrap_or_default();
            (shared, key, id)
        })
        .collect();
    ranked.sort();
    ranked.into_iter().map(|(_, _, id)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use castgender_core::{CastEntry, Gender};

    fn root(s: &str) -> RootName {
        RootName::normalize(s)
    }

    fn roster(names: &[&str]) -> Roster {
        names
            .iter()
            .map(|n| CastEntry::new(*n, "someone", Some(Gender::Female)))
            .collect()
    }

    fn map(pairs: &[(&str, &[usize])]) -> CandidateMap {
        let mut map = CandidateMap::new();
        for (name, ids) in pairs {
            map.declare(&root(name));
            for &id in *ids {
                map.push(&root(name), CastId(id));
            }
        }
        map
    }

    #[test]
    fn empty_map_resolves_to_empty_assignment() {
        let roster = roster(&["a"]);
        for resolver in [Resolver::hard(), Resolver::soft()] {
            let resolution = resolver.resolve(CandidateMap::new(), &roster);
            assert_eq!(resolution, Resolution::Resolved(Assignment::new()));
        }
    }

    #[test]
    fn disjoint_candidates_agree_across_policies() {
        let roster = roster(&["carol ross", "therese belivet", "abby gerhard"]);
        let candidates = map(&[("carol", &[0]), ("therese", &[1]), ("abby", &[2])]);

        let hard = Resolver::hard().resolve(candidates.clone(), &roster);
        let soft = Resolver::soft().resolve(candidates, &roster);
        let hard = hard.into_assignment().unwrap();
        let soft = soft.into_assignment().unwrap();

        for name in ["carol", "therese", "abby"] {
            assert_eq!(hard.get(name), soft.get(name));
        }
        assert!(hard.is_injective());
    }

    #[test]
    fn hard_backtracks_out_of_a_dead_end() {
        // x is picked first and tries #0 ("a" sorts before "b"), which
        // starves y. Only after exhausting w does the search retry x.
        let roster = roster(&["a", "b", "c"]);
        let candidates = map(&[("x", &[0, 1]), ("y", &[0]), ("w", &[1, 2])]);
        let assignment = Resolver::hard()
            .resolve(candidates, &roster)
            .into_assignment()
            .unwrap();
        assert_eq!(assignment.get("x"), Some(CastId(1)));
        assert_eq!(assignment.get("y"), Some(CastId(0)));
        assert_eq!(assignment.get("w"), Some(CastId(2)));
        assert!(assignment.is_injective());
    }

    #[test]
    fn soft_keeps_the_first_choice_on_the_same_map() {
        let roster = roster(&["a", "b", "c"]);
        let candidates = map(&[("x", &[0, 1]), ("y", &[0]), ("w", &[1, 2])]);
        let assignment = Resolver::soft()
            .resolve(candidates, &roster)
            .into_assignment()
            .unwrap();
        assert_eq!(assignment.get("x"), Some(CastId(0)));
        assert_eq!(assignment.get("y"), Some(CastId(0)));
        assert_eq!(assignment.get("w"), Some(CastId(1)));
        assert!(!assignment.is_injective());
    }

    #[test]
    fn hard_reports_infeasible_pigeonholes() {
        let roster = roster(&["a", "b"]);
        let candidates = map(&[("x", &[0, 1]), ("y", &[0, 1]), ("z", &[0])]);
        assert_eq!(
            Resolver::hard().resolve(candidates, &roster),
            Resolution::Infeasible
        );
    }

    #[test]
    fn hard_fails_when_two_names_compete_for_one_entry() {
        let roster = roster(&["mr john smith"]);
        let candidates = map(&[("mr smith", &[0]), ("smith", &[0])]);
        assert_eq!(
            Resolver::hard().resolve(candidates, &roster),
            Resolution::Infeasible
        );
    }

    #[test]
    fn soft_reuses_a_shared_entry() {
        let roster = roster(&["mr john smith"]);
        let candidates = map(&[("mr smith", &[0]), ("smith", &[0])]);
        let assignment = Resolver::soft()
            .resolve(candidates, &roster)
            .into_assignment()
            .unwrap();
        assert_eq!(assignment.get("mr smith"), Some(CastId(0)));
        assert_eq!(assignment.get("smith"), Some(CastId(0)));
        assert!(!assignment.is_injective());
    }

    #[test]
    fn soft_aborts_on_a_name_without_candidates() {
        let roster = roster(&["carol ross"]);
        let candidates = map(&[("carol", &[0]), ("stranger", &[])]);
        assert_eq!(
            Resolver::soft().resolve(candidates, &roster),
            Resolution::Infeasible
        );
    }

    #[test]
    fn selection_prefers_most_candidates_then_encounter_order() {
        let roster = roster(&["a", "b"]);
        let pool: Pool = vec![
            (root("one"), vec![CastId(0)]),
            (root("two"), vec![CastId(0), CastId(1)]),
            (root("three"), vec![CastId(1), CastId(0)]),
        ];
        assert_eq!(most_remaining(&pool), 1);
        assert_eq!(rarest_first(&pool, 1, &roster), vec![CastId(1), CastId(0)]);
    }

    #[test]
    fn equally_rare_candidates_order_by_roster_name() {
        let roster = roster(&["zed", "amy"]);
        let pool: Pool = vec![(root("x"), vec![CastId(0), CastId(1)])];
        assert_eq!(rarest_first(&pool, 0, &roster), vec![CastId(1), CastId(0)]);
    }

    #[test]
    fn soft_greedy_choice_follows_rarity() {
        // x is chosen first; #1 is unshared so x takes it, y then takes #0.
        let roster = roster(&["a", "b"]);
        let candidates = map(&[("x", &[0, 1]), ("y", &[0])]);
        let assignment = Resolver::soft()
            .resolve(candidates, &roster)
            .into_assignment()
            .unwrap();
        assert_eq!(assignment.get("x"), Some(CastId(1)));
        assert_eq!(assignment.get("y"), Some(CastId(0)));
    }

    #[test]
    fn step_budget_bounds_the_search() {
        let roster = roster(&["a", "b", "c"]);
        // Four names over three entries: infeasible, and hard must explore.
        let candidates = map(&[
            ("p", &[0, 1, 2]),
            ("q", &[0, 1, 2]),
            ("r", &[0, 1, 2]),
            ("s", &[0, 1, 2]),
        ]);
        let unbounded = Resolver::hard().resolve(candidates.clone(), &roster);
        assert_eq!(unbounded, Resolution::Infeasible);
        assert!(!unbounded.is_resolved());

        let bounded = Resolver::hard().with_step_budget(2);
        assert_eq!(bounded.policy(), ResolvePolicy::HARD);
        let outcome = bounded.resolve(candidates.clone(), &roster);
        assert_eq!(outcome, Resolution::BudgetExhausted);
        assert!(!outcome.is_resolved());

        // A budget large enough for the first descent lets an easy map through.
        let easy = map(&[("p", &[0]), ("q", &[1])]);
        assert!(bounded.resolve(easy, &roster).is_resolved());
    }
}
