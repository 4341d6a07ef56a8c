//! Exhaustive depth-first search over courses.
//!
//! Courses are assigned in request order. A running union mask per depth
//! holds everything chosen so far, so a candidate overlapping it is pruned
//! before any deeper course is tried. Results come out in a fixed order:
//! course order, then each course's enumeration order.

use super::budget::{BudgetMonitor, SearchBudget, SearchCommand};
use super::strategy::{SearchSpace, SearchStrategy};
use super::types::{SearchOutcome, SearchStats, TerminationReason};
use crate::config::SearchConfig;
use crate::time::WeeklyTimeMask;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SystematicSearch {
    clock_check_interval: u64,
}

impl SystematicSearch {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            clock_check_interval: config.clock_check_interval,
        }
    }
}

impl Default for SystematicSearch {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl SearchStrategy for SystematicSearch {
    fn name(&self) -> &str {
        "systematic"
    }

    fn search(&mut self, space: &SearchSpace, budget: &SearchBudget) -> SearchOutcome {
        if let Some(reason) = space.trivially_empty() {
            return SearchOutcome::empty(reason);
        }

        let courses = space.courses();
        let depth_count = courses.len();
        let mut monitor = BudgetMonitor::new(*budget, self.clock_check_interval);
        let mut stats = SearchStats::default();
        let mut schedules = Vec::new();

        // cursor[d]: next candidate to try at depth d
        // running[d]: union of the picks at depths 0..d
        let mut cursor = vec![0usize; depth_count];
        let mut running = vec![WeeklyTimeMask::EMPTY; depth_count + 1];
        let mut picks = vec![0usize; depth_count];
        let mut depth = 0usize;

        let termination = loop {
            if depth == depth_count {
                schedules.push(space.materialize(&picks));
                if schedules.len() >= budget.max_solutions {
                    break TerminationReason::SolutionLimit;
                }
                depth -= 1;
                continue;
            }

            let combinations = &courses[depth].combinations;
            if cursor[depth] == combinations.len() {
                if depth == 0 {
                    break TerminationReason::Exhausted;
                }
                cursor[depth] = 0;
                depth -= 1;
                continue;
            }

            monitor.on_step();
            stats.attempts += 1;
            if let SearchCommand::Terminate(reason) = monitor.search_command(schedules.len()) {
                break reason;
            }

            let candidate = cursor[depth];
            cursor[depth] += 1;

            let mask = combinations[candidate].mask();
            if mask.overlaps(&running[depth]) {
                stats.pruned += 1;
                continue;
            }

            picks[depth] = candidate;
            running[depth + 1] = running[depth] | *mask;
            depth += 1;
        };

        stats.solutions = schedules.len();
        stats.elapsed = monitor.elapsed();
        debug!(
            "Systematic search over {} courses stopped ({}): {} attempts, {} pruned, {} schedules",
            depth_count, termination, stats.attempts, stats.pruned, stats.solutions
        );

        SearchOutcome {
            schedules,
            stats,
            termination,
        }
    }
}
