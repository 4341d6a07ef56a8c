/// Cross-course schedule search
mod budget;
mod random;
mod strategy;
mod systematic;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use budget::{BudgetMonitor, SearchBudget, SearchCommand, MAX_CLOCK_CHECK_INTERVAL};
pub use random::RandomSearch;
pub use strategy::{CourseCombinations, SearchSpace, SearchStrategy};
pub use systematic::SystematicSearch;
pub use types::*;

use crate::catalog::{Section, SectionSnapshot};
use crate::combination::CombinationEnumerator;
use crate::config::SearchConfig;
use crate::error::ScheduleError;
use crate::filter::SectionFilters;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs searches: validates the request, enumerates combinations per
/// course, then hands the space to the selected strategy.
#[derive(Debug, Clone, Default)]
pub struct ScheduleSearcher {
    config: SearchConfig,
}

impl ScheduleSearcher {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Searches for conflict-free schedules covering every requested course.
    ///
    /// The clock starts before combinations are enumerated, so enumeration
    /// time counts against `budget.time_limit`; the strategy only gets what
    /// is left.
    ///
    /// # Arguments
    /// * `term` - Term the sections belong to
    /// * `course_codes` - Requested courses; duplicates are ignored
    /// * `sections_by_course` - Section pool keyed by course code; a missing
    ///   course counts as having no sections
    /// * `budget` - Time limit and solution cap
    /// * `strategy` - Which search strategy to run
    ///
    /// # Returns
    /// * `Ok(SearchOutcome)` - Schedules found (possibly none) and why the
    ///   search stopped
    /// * `Err(InvalidBudget)` - If the budget has a zero time limit or cap
    pub fn search<S: AsRef<str>>(
        &self,
        term: &str,
        course_codes: &[S],
        sections_by_course: &HashMap<String, Vec<Section>>,
        budget: &SearchBudget,
        strategy: StrategyKind,
    ) -> Result<SearchOutcome, ScheduleError> {
        budget.validate()?;
        let started = Instant::now();

        let mut distinct = HashSet::new();
        let mut courses = Vec::with_capacity(course_codes.len());
        for code in course_codes.iter().map(|c| c.as_ref()) {
            if distinct.insert(code) {
                courses.push(code);
            } else {
                warn!("Ignoring duplicate course code {} in request", code);
            }
        }

        if courses.is_empty() {
            warn!("Schedule search for term {} requested no courses", term);
            return Ok(SearchOutcome::empty(TerminationReason::NoCourses));
        }

        let mut space_courses = Vec::with_capacity(courses.len());
        for code in courses {
            let sections = sections_by_course
                .get(code)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let combinations = CombinationEnumerator::new(term, code).enumerate(sections);
            debug!(
                "{}: {} sections, {} combinations",
                code,
                sections.len(),
                combinations.len()
            );

            if combinations.is_empty() {
                info!(
                    "No valid combination for {} in term {}; no schedule possible",
                    code, term
                );
                return Ok(SearchOutcome::empty(
                    TerminationReason::EmptyCombinationSpace {
                        course_code: code.to_string(),
                    },
                ));
            }

            space_courses.push(CourseCombinations {
                course_code: code.to_string(),
                combinations,
            });
        }

        let remaining = budget.time_limit.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            warn!(
                "Time limit of {:?} used up while enumerating combinations for term {}",
                budget.time_limit, term
            );
            let mut outcome = SearchOutcome::empty(TerminationReason::TimeLimit);
            outcome.stats.elapsed = started.elapsed();
            return Ok(outcome);
        }

        let space = SearchSpace::new(term, space_courses);
        let strategy_budget = SearchBudget {
            time_limit: remaining,
            ..*budget
        };
        let mut outcome = self.search_space(&space, &strategy_budget, strategy);
        outcome.stats.elapsed = started.elapsed();
        Ok(outcome)
    }

    /// Runs a strategy over an already enumerated space.
    ///
    /// The budget is assumed valid; [`ScheduleSearcher::search`] checks it.
    pub fn search_space(
        &self,
        space: &SearchSpace,
        budget: &SearchBudget,
        strategy: StrategyKind,
    ) -> SearchOutcome {
        let mut strategy = strategy.build(&self.config);
        info!(
            "Searching {} courses in term {} with {} strategy (limit {:?}, max {} schedules, {:?} candidate selections)",
            space.courses().len(),
            space.term(),
            strategy.name(),
            budget.time_limit,
            budget.max_solutions,
            space.product_size()
        );

        let outcome = strategy.search(space, budget);
        info!(
            "Found {} schedules in {:.3}s ({})",
            outcome.schedules.len(),
            outcome.stats.elapsed.as_secs_f64(),
            outcome.termination
        );
        outcome
    }

    /// Filters a term snapshot, then searches it.
    pub fn generate<S: AsRef<str>>(
        &self,
        snapshot: &SectionSnapshot,
        course_codes: &[S],
        filters: &SectionFilters,
        budget: &SearchBudget,
        strategy: StrategyKind,
    ) -> Result<SearchOutcome, ScheduleError> {
        let grouped = if filters.is_noop() {
            snapshot.sections_by_course()
        } else {
            snapshot.filtered(filters).sections_by_course()
        };
        self.search(snapshot.term(), course_codes, &grouped, budget, strategy)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
