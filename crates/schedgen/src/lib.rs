//! Conflict-free timetable generation.
//!
//! Sections of a term are grouped per course into valid component
//! combinations (one lecture, one lab, ... with no internal clash), and a
//! search then picks one combination per requested course such that no two
//! overlap in the week. Occupancy is tracked with [`WeeklyTimeMask`], a
//! fixed-width bit-set of one-minute slots.

pub mod catalog;
pub mod combination;
pub mod config;
pub mod error;
pub mod filter;
pub mod search;
pub mod time;

pub use catalog::{ComponentType, MeetingBlock, Section, SectionSnapshot};
pub use combination::{Combination, CombinationEnumerator, ComponentPick};
pub use config::SearchConfig;
pub use error::ScheduleError;
pub use filter::{is_after, is_before, is_closed, is_downtown, SectionFilters};
pub use search::{
    Schedule, ScheduleSearcher, SearchBudget, SearchOutcome, SearchStats, StrategyKind,
    TerminationReason,
};
pub use time::{TimeOfDay, WeeklyTimeMask, Weekday};

use std::collections::HashMap;
use std::time::Duration;

/// Builds the mask for one meeting from `"HHMM"` start and end times.
///
/// # Returns
/// * `Err(InvalidTimeRange)` - If either time is malformed or `start >= end`
pub fn build_mask(start: &str, end: &str, day: Weekday) -> Result<WeeklyTimeMask, ScheduleError> {
    WeeklyTimeMask::from_interval(start.parse()?, end.parse()?, day)
}

pub fn mask_union(a: &WeeklyTimeMask, b: &WeeklyTimeMask) -> WeeklyTimeMask {
    a.union(b)
}

pub fn masks_overlap(a: &WeeklyTimeMask, b: &WeeklyTimeMask) -> bool {
    a.overlaps(b)
}

/// All valid combinations of `course_code`'s sections in `term`.
pub fn enumerate_combinations(term: &str, course_code: &str, sections: &[Section]) -> Vec<Combination> {
    CombinationEnumerator::new(term, course_code).enumerate(sections)
}

/// Searches for up to `max_solutions` conflict-free schedules within
/// `time_limit`, using the default [`SearchConfig`].
///
/// # Arguments
/// * `term` - Term the sections belong to
/// * `course_codes` - Courses every schedule must cover
/// * `sections_by_course` - Section pool keyed by course code
/// * `time_limit` - Wall-clock limit for the search
/// * `max_solutions` - Cap on the number of schedules returned
/// * `strategy` - Random sampling or systematic search
///
/// # Returns
/// * `Ok(Vec<Schedule>)` - Possibly empty list of distinct schedules
/// * `Err(InvalidBudget)` - If `time_limit` or `max_solutions` is zero
pub fn search_schedules<S: AsRef<str>>(
    term: &str,
    course_codes: &[S],
    sections_by_course: &HashMap<String, Vec<Section>>,
    time_limit: Duration,
    max_solutions: usize,
    strategy: StrategyKind,
) -> Result<Vec<Schedule>, ScheduleError> {
    let budget = SearchBudget::new(time_limit, max_solutions)?;
    let outcome =
        ScheduleSearcher::default().search(term, course_codes, sections_by_course, &budget, strategy)?;
    Ok(outcome.schedules)
}

/// Filters a term snapshot and searches it for schedules covering
/// `course_codes`.
pub fn generate_schedules<S: AsRef<str>>(
    snapshot: &SectionSnapshot,
    course_codes: &[S],
    filters: &SectionFilters,
    budget: &SearchBudget,
    strategy: StrategyKind,
    config: &SearchConfig,
) -> Result<SearchOutcome, ScheduleError> {
    ScheduleSearcher::new(config.clone()).generate(snapshot, course_codes, filters, budget, strategy)
}
