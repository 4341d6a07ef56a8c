/// Types for schedule search results
use crate::combination::Combination;
use crate::error::ScheduleError;
use crate::time::WeeklyTimeMask;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// One fully validated, conflict-free timetable: a combination for every
/// requested course, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schedule {
    term: String,
    combinations: Vec<Combination>,
}

impl Schedule {
    /// Only the search engine creates schedules, after checking that no two
    /// combinations overlap.
    pub(crate) fn new(term: String, combinations: Vec<Combination>) -> Self {
        Self { term, combinations }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    /// The combination chosen for `course_code`.
    pub fn get(&self, course_code: &str) -> Option<&Combination> {
        self.combinations
            .iter()
            .find(|c| c.course_code() == course_code)
    }

    pub fn course_codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.combinations.iter().map(Combination::course_code)
    }

    /// Number of courses in the schedule.
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Union of every chosen combination's mask.
    pub fn mask(&self) -> WeeklyTimeMask {
        self.combinations.iter().map(|c| *c.mask()).collect()
    }
}

/// Serialized as `{"COURSE": ["crn", ...], ...}`.
impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.combinations.len()))?;
        for combination in &self.combinations {
            let crns: Vec<&str> = combination.crns().collect();
            map.serialize_entry(combination.course_code(), &crns)?;
        }
        map.end()
    }
}

/// Which search strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Uniform random sampling of the cross product
    Random,
    /// Exhaustive backtracking with a running-union prune
    #[default]
    #[serde(alias = "cp")]
    Systematic,
}

impl FromStr for StrategyKind {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(StrategyKind::Random),
            "systematic" | "cp" => Ok(StrategyKind::Systematic),
            _ => Err(ScheduleError::UnknownStrategy {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Random => f.write_str("random"),
            StrategyKind::Systematic => f.write_str("systematic"),
        }
    }
}

/// Why a search stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TerminationReason {
    /// Every candidate was considered
    Exhausted,
    /// `max_solutions` schedules were collected
    SolutionLimit,
    /// The wall-clock budget ran out
    TimeLimit,
    /// A course has no conflict-free combination, so no schedule can exist
    EmptyCombinationSpace { course_code: String },
    /// No course codes were requested
    NoCourses,
}

impl TerminationReason {
    /// Returns true if the reported schedules are every schedule there is
    /// (up to the solution cap for `SolutionLimit`).
    pub fn is_complete(&self) -> bool {
        !matches!(self, TerminationReason::TimeLimit)
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::Exhausted => f.write_str("search space exhausted"),
            TerminationReason::SolutionLimit => f.write_str("solution limit reached"),
            TerminationReason::TimeLimit => f.write_str("time limit reached"),
            TerminationReason::EmptyCombinationSpace { course_code } => {
                write!(f, "no valid combination for {course_code}")
            }
            TerminationReason::NoCourses => f.write_str("no courses requested"),
        }
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidate combinations (systematic) or sampled tuples (random) examined
    pub attempts: u64,
    /// Candidates rejected for overlapping the current selection
    pub pruned: u64,
    pub solutions: usize,
    pub elapsed: Duration,
}

/// Result of a search: the schedules plus how the search went.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub schedules: Vec<Schedule>,
    pub stats: SearchStats,
    pub termination: TerminationReason,
}

impl SearchOutcome {
    pub(crate) fn empty(termination: TerminationReason) -> Self {
        Self {
            schedules: Vec::new(),
            stats: SearchStats::default(),
            termination,
        }
    }
}
