//! The search space handed to strategies, and the strategy trait itself.

use super::budget::SearchBudget;
use super::random::RandomSearch;
use super::systematic::SystematicSearch;
use super::types::{Schedule, SearchOutcome, StrategyKind, TerminationReason};
use crate::combination::Combination;
use crate::config::SearchConfig;
use crate::time::WeeklyTimeMask;

/// Valid combinations of one requested course.
#[derive(Debug, Clone)]
pub struct CourseCombinations {
    pub course_code: String,
    pub combinations: Vec<Combination>,
}

/// Per-course combination lists for one term, in request order.
///
/// Strategies address combinations by `(course index, combination index)`
/// and only build a [`Schedule`] once a selection is fully validated.
#[derive(Debug, Clone)]
pub struct SearchSpace {
    term: String,
    courses: Vec<CourseCombinations>,
}

impl SearchSpace {
    pub fn new(term: impl Into<String>, courses: Vec<CourseCombinations>) -> Self {
        Self {
            term: term.into(),
            courses,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn courses(&self) -> &[CourseCombinations] {
        &self.courses
    }

    /// Number of full selections in the cross product, or `None` on overflow.
    pub fn product_size(&self) -> Option<usize> {
        self.courses
            .iter()
            .try_fold(1usize, |acc, c| acc.checked_mul(c.combinations.len()))
    }

    /// First course whose combination list is empty.
    pub fn first_empty_course(&self) -> Option<&str> {
        self.courses
            .iter()
            .find(|c| c.combinations.is_empty())
            .map(|c| c.course_code.as_str())
    }

    /// The termination reason for a space in which no selection can exist.
    pub(crate) fn trivially_empty(&self) -> Option<TerminationReason> {
        if self.courses.is_empty() {
            return Some(TerminationReason::NoCourses);
        }
        self.first_empty_course()
            .map(|course_code| TerminationReason::EmptyCombinationSpace {
                course_code: course_code.to_string(),
            })
    }

    /// Returns true if the selected combinations (one index per course) are
    /// pairwise non-overlapping.
    pub fn is_feasible(&self, picks: &[usize]) -> bool {
        let mut running = WeeklyTimeMask::EMPTY;
        for (course, &pick) in self.courses.iter().zip(picks) {
            let mask = course.combinations[pick].mask();
            if mask.overlaps(&running) {
                return false;
            }
            running |= *mask;
        }
        true
    }

    pub(crate) fn materialize(&self, picks: &[usize]) -> Schedule {
        let combinations = self
            .courses
            .iter()
            .zip(picks)
            .map(|(course, &pick)| course.combinations[pick].clone())
            .collect();
        Schedule::new(self.term.clone(), combinations)
    }
}

/// A way of searching the cross product of per-course combinations.
///
/// Every implementation must only return pairwise non-overlapping
/// schedules, never more than `budget.max_solutions`, never the same
/// selection twice, and must stop once `budget.time_limit` has elapsed.
pub trait SearchStrategy {
    fn name(&self) -> &str;

    fn search(&mut self, space: &SearchSpace, budget: &SearchBudget) -> SearchOutcome;
}

impl StrategyKind {
    /// Builds the strategy selected by this kind.
    pub fn build(&self, config: &SearchConfig) -> Box<dyn SearchStrategy> {
        match self {
            StrategyKind::Systematic => Box::new(SystematicSearch::new(config)),
            StrategyKind::Random => Box::new(RandomSearch::new(config)),
        }
    }
}
