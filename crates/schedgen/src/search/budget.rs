//! Search budgets and the cooperative monitor that enforces them.
//!
//! Strategies call [`BudgetMonitor::on_step`] once per candidate attempt
//! and ask [`BudgetMonitor::search_command`] whether to keep going. The
//! wall clock is only read every `clock_check_interval` steps (clamped to
//! [`MAX_CLOCK_CHECK_INTERVAL`], rounded up to a power of two and applied as
//! a bitmask) to keep the check cheap.

use super::types::TerminationReason;
use crate::error::ScheduleError;
use std::time::{Duration, Instant};

/// Largest number of steps allowed between two wall-clock reads.
pub const MAX_CLOCK_CHECK_INTERVAL: u64 = 1 << 20;

/// Wall-clock and solution-count limits for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    pub time_limit: Duration,
    pub max_solutions: usize,
}

impl SearchBudget {
    /// Creates a validated budget.
    pub fn new(time_limit: Duration, max_solutions: usize) -> Result<Self, ScheduleError> {
        let budget = Self {
            time_limit,
            max_solutions,
        };
        budget.validate()?;
        Ok(budget)
    }

    /// Creates a budget from a time limit in (possibly fractional) seconds.
    ///
    /// # Returns
    /// * `Err(InvalidBudget)` - If `seconds` is not a positive finite number
    ///   or `max_solutions` is zero
    pub fn from_secs_f64(seconds: f64, max_solutions: usize) -> Result<Self, ScheduleError> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(ScheduleError::budget(format!(
                "time limit must be positive, got {seconds}s"
            )));
        }
        Self::new(Duration::from_secs_f64(seconds), max_solutions)
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.time_limit.is_zero() {
            return Err(ScheduleError::budget("time limit must be positive"));
        }
        if self.max_solutions == 0 {
            return Err(ScheduleError::budget("max_solutions must be positive"));
        }
        Ok(())
    }
}

impl Default for SearchBudget {
    /// Three seconds, five schedules.
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(3),
            max_solutions: 5,
        }
    }
}

/// What a strategy should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    Continue,
    Terminate(TerminationReason),
}

/// Tracks elapsed time and step counts against a [`SearchBudget`].
#[derive(Debug, Clone)]
pub struct BudgetMonitor {
    budget: SearchBudget,
    clock_check_mask: u64,
    steps: u64,
    start_time: Instant,
    timed_out: bool,
}

impl BudgetMonitor {
    /// Starts the clock.
    ///
    /// `clock_check_interval` of 0 or 1 checks the clock on every step;
    /// values above [`MAX_CLOCK_CHECK_INTERVAL`] are clamped to it.
    pub fn new(budget: SearchBudget, clock_check_interval: u64) -> Self {
        let interval = clock_check_interval
            .clamp(1, MAX_CLOCK_CHECK_INTERVAL)
            .checked_next_power_of_two()
            .unwrap_or(MAX_CLOCK_CHECK_INTERVAL);
        Self {
            budget,
            clock_check_mask: interval - 1,
            steps: 0,
            start_time: Instant::now(),
            timed_out: false,
        }
    }

    #[inline(always)]
    pub fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    /// Decides whether the search may continue, given how many solutions
    /// have been collected so far.
    pub fn search_command(&mut self, solutions_found: usize) -> SearchCommand {
        if solutions_found >= self.budget.max_solutions {
            return SearchCommand::Terminate(TerminationReason::SolutionLimit);
        }

        if !self.timed_out
            && (self.steps & self.clock_check_mask) == 0
            && self.start_time.elapsed() >= self.budget.time_limit
        {
            self.timed_out = true;
        }

        if self.timed_out {
            SearchCommand::Terminate(TerminationReason::TimeLimit)
        } else {
            SearchCommand::Continue
        }
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn budget(&self) -> &SearchBudget {
        &self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_validation() {
        assert!(SearchBudget::new(Duration::from_secs(3), 5).is_ok());
        assert!(matches!(
            SearchBudget::new(Duration::ZERO, 5),
            Err(ScheduleError::InvalidBudget { .. })
        ));
        assert!(SearchBudget::new(Duration::from_secs(1), 0).is_err());
        assert!(SearchBudget::from_secs_f64(-1.0, 5).is_err());
        assert!(SearchBudget::from_secs_f64(f64::NAN, 5).is_err());
        assert_eq!(
            SearchBudget::from_secs_f64(0.5, 2).unwrap().time_limit,
            Duration::from_millis(500)
        );
        assert!(SearchBudget::default().validate().is_ok());
    }

    #[test]
    fn test_solution_limit_terminates() {
        let budget = SearchBudget::new(Duration::from_secs(60), 2).unwrap();
        let mut monitor = BudgetMonitor::new(budget, 1);

        monitor.on_step();
        assert_eq!(monitor.search_command(1), SearchCommand::Continue);
        assert_eq!(
            monitor.search_command(2),
            SearchCommand::Terminate(TerminationReason::SolutionLimit)
        );
    }

    #[test]
    fn test_huge_clock_interval_is_clamped() {
        let budget = SearchBudget::new(Duration::from_nanos(1), 10).unwrap();
        let mut monitor = BudgetMonitor::new(budget, u64::MAX);
        std::thread::sleep(Duration::from_millis(2));

        let mut command = SearchCommand::Continue;
        for _ in 0..MAX_CLOCK_CHECK_INTERVAL {
            monitor.on_step();
            command = monitor.search_command(0);
            if command != SearchCommand::Continue {
                break;
            }
        }
        assert_eq!(command, SearchCommand::Terminate(TerminationReason::TimeLimit));
        assert_eq!(monitor.steps(), MAX_CLOCK_CHECK_INTERVAL);

        let mut every_step = BudgetMonitor::new(budget, 0);
        std::thread::sleep(Duration::from_millis(2));
        every_step.on_step();
        assert_eq!(
            every_step.search_command(0),
            SearchCommand::Terminate(TerminationReason::TimeLimit)
        );
    }

    #[test]
    fn test_time_limit_is_checked_on_mask_boundaries() {
        let budget = SearchBudget::new(Duration::from_nanos(1), 10).unwrap();
        let mut monitor = BudgetMonitor::new(budget, 4);
        std::thread::sleep(Duration::from_millis(2));

        // steps 1..=3 skip the clock
        for _ in 0..3 {
            monitor.on_step();
            assert_eq!(monitor.search_command(0), SearchCommand::Continue);
        }
        monitor.on_step();
        assert_eq!(
            monitor.search_command(0),
            SearchCommand::Terminate(TerminationReason::TimeLimit)
        );

        // stays terminated
        monitor.on_step();
        assert_eq!(
            monitor.search_command(0),
            SearchCommand::Terminate(TerminationReason::TimeLimit)
        );
        assert_eq!(monitor.steps(), 5);
    }
}
