//! Randomized sampling of the cross product.
//!
//! Each attempt draws one combination per course uniformly at random and
//! keeps the selection if it is conflict-free and new. When the cross
//! product is no larger than `exhaustive_tracking_limit`, every drawn
//! selection is remembered and the search ends as soon as all of them have
//! been seen, which makes small spaces converge to the same set the
//! systematic search finds. Larger spaces run until the solution cap or the
//! time limit.

use super::budget::{BudgetMonitor, SearchBudget, SearchCommand};
use super::strategy::{SearchSpace, SearchStrategy};
use super::types::{SearchOutcome, SearchStats, TerminationReason};
use crate::config::SearchConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RandomSearch {
    rng: StdRng,
    clock_check_interval: u64,
    exhaustive_tracking_limit: usize,
}

impl RandomSearch {
    /// Seeds from `config.seed` when set, otherwise from OS entropy.
    pub fn new(config: &SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            clock_check_interval: config.clock_check_interval,
            exhaustive_tracking_limit: config.exhaustive_tracking_limit,
        }
    }
}

impl Default for RandomSearch {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl SearchStrategy for RandomSearch {
    fn name(&self) -> &str {
        "random"
    }

    fn search(&mut self, space: &SearchSpace, budget: &SearchBudget) -> SearchOutcome {
        if let Some(reason) = space.trivially_empty() {
            return SearchOutcome::empty(reason);
        }

        let sizes: Vec<usize> = space
            .courses()
            .iter()
            .map(|c| c.combinations.len())
            .collect();
        let tracked_total = space
            .product_size()
            .filter(|&total| total <= self.exhaustive_tracking_limit);

        let mut monitor = BudgetMonitor::new(*budget, self.clock_check_interval);
        let mut stats = SearchStats::default();
        let mut schedules = Vec::new();
        let mut seen: HashSet<Vec<usize>> = HashSet::new();
        let mut accepted: HashSet<Vec<usize>> = HashSet::new();

        let termination = loop {
            monitor.on_step();
            stats.attempts += 1;
            if let SearchCommand::Terminate(reason) = monitor.search_command(schedules.len()) {
                break reason;
            }

            let picks: Vec<usize> = sizes.iter().map(|&n| self.rng.gen_range(0..n)).collect();

            if tracked_total.is_some() && !seen.insert(picks.clone()) {
                continue;
            }

            if space.is_feasible(&picks) {
                if accepted.insert(picks.clone()) {
                    schedules.push(space.materialize(&picks));
                }
            } else {
                stats.pruned += 1;
            }

            if tracked_total == Some(seen.len()) {
                break if schedules.len() >= budget.max_solutions {
                    TerminationReason::SolutionLimit
                } else {
                    TerminationReason::Exhausted
                };
            }
        };

        stats.solutions = schedules.len();
        stats.elapsed = monitor.elapsed();
        debug!(
            "Random search over {} courses stopped ({}): {} attempts, {} rejected, {} schedules",
            sizes.len(),
            termination,
            stats.attempts,
            stats.pruned,
            stats.solutions
        );

        SearchOutcome {
            schedules,
            stats,
            termination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tests::{budget, course, disjoint_space, space_from};

    fn seeded(seed: u64) -> RandomSearch {
        RandomSearch::new(&SearchConfig {
            seed: Some(seed),
            ..SearchConfig::default()
        })
    }

    #[test]
    fn test_small_space_is_exhausted() {
        let space = space_from(vec![
            course("A", vec![vec![("Mon", "0810", "0930")], vec![("Tue", "0810", "0930")]]),
            course("B", vec![vec![("Mon", "0900", "1000")], vec![("Wed", "0810", "0930")]]),
        ]);
        let outcome = seeded(7).search(&space, &budget(10));

        assert_eq!(outcome.termination, TerminationReason::Exhausted);
        assert_eq!(outcome.schedules.len(), 3);
    }

    #[test]
    fn test_respects_solution_cap_without_duplicates() {
        let space = disjoint_space(3, 4);
        let outcome = seeded(11).search(&space, &budget(20));

        assert_eq!(outcome.termination, TerminationReason::SolutionLimit);
        assert_eq!(outcome.schedules.len(), 20);
        let distinct: HashSet<_> = outcome.schedules.iter().collect();
        assert_eq!(distinct.len(), 20);
    }

    #[test]
    fn test_same_seed_same_order() {
        let space = disjoint_space(2, 5);
        let first = seeded(42).search(&space, &budget(8));
        let second = seeded(42).search(&space, &budget(8));
        assert_eq!(first.schedules, second.schedules);
    }

    #[test]
    fn test_untracked_space_stops_on_time_limit() {
        let space = space_from(vec![
            course("A", vec![vec![("Mon", "0810", "0930")]]),
            course("B", vec![vec![("Mon", "0900", "1000")]]),
        ]);
        let mut search = RandomSearch::new(&SearchConfig {
            seed: Some(1),
            exhaustive_tracking_limit: 0,
            ..SearchConfig::default()
        });
        let budget = SearchBudget::new(std::time::Duration::from_millis(20), 5).unwrap();
        let outcome = search.search(&space, &budget);

        assert_eq!(outcome.termination, TerminationReason::TimeLimit);
        assert!(outcome.schedules.is_empty());
        assert!(outcome.stats.attempts > 1);
    }
}
