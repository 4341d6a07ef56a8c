//! Section filters.
//!
//! Pure predicates over a single [`Section`], plus [`SectionFilters`] which
//! ANDs the enabled ones together to prune a section pool before
//! combinations are enumerated.

use crate::catalog::Section;
use crate::time::TimeOfDay;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Campus designation treated as downtown.
pub const DOWNTOWN_CAMPUS: &str = "Downtown Oshawa";

/// Returns true if any meeting block is held on the downtown campus.
pub fn is_downtown(section: &Section) -> bool {
    is_on_campus(section, DOWNTOWN_CAMPUS)
}

fn is_on_campus(section: &Section, campus: &str) -> bool {
    section.meetings.iter().any(|m| m.campus() == campus)
}

/// Returns true if every meeting block ends at or before `cutoff`.
pub fn is_before(section: &Section, cutoff: TimeOfDay) -> bool {
    section.meetings.iter().all(|m| m.end() <= cutoff)
}

/// Returns true if every meeting block starts at or after `cutoff`.
pub fn is_after(section: &Section, cutoff: TimeOfDay) -> bool {
    section.meetings.iter().all(|m| m.start() >= cutoff)
}

/// Returns true if no seats remain.
pub fn is_closed(section: &Section) -> bool {
    section.enrolled >= section.capacity
}

/// Filter settings applied to a section pool.
///
/// Every enabled criterion must hold for a section to be kept. The default
/// keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionFilters {
    /// Keep only sections meeting on the downtown campus
    pub downtown_only: bool,
    /// Campus name used by `downtown_only` instead of [`DOWNTOWN_CAMPUS`]
    pub downtown_campus: Option<String>,
    /// Keep only sections starting at or after this time
    pub not_before: Option<TimeOfDay>,
    /// Keep only sections ending at or before this time
    pub not_after: Option<TimeOfDay>,
    /// Drop sections with no seats remaining
    pub exclude_closed: bool,
}

impl SectionFilters {
    /// Returns true if `section` passes every enabled filter.
    pub fn accepts(&self, section: &Section) -> bool {
        if self.downtown_only {
            let campus = self.downtown_campus.as_deref().unwrap_or(DOWNTOWN_CAMPUS);
            if !is_on_campus(section, campus) {
                trace!("Dropping {}: not on campus {}", section.crn, campus);
                return false;
            }
        }

        if let Some(cutoff) = self.not_before {
            if !is_after(section, cutoff) {
                trace!("Dropping {}: starts before {}", section.crn, cutoff);
                return false;
            }
        }

        if let Some(cutoff) = self.not_after {
            if !is_before(section, cutoff) {
                trace!("Dropping {}: ends after {}", section.crn, cutoff);
                return false;
            }
        }

        if self.exclude_closed && is_closed(section) {
            trace!("Dropping {}: closed", section.crn);
            return false;
        }

        true
    }

    /// Returns the accepted sections, in their original order.
    pub fn apply(&self, sections: &[Section]) -> Vec<Section> {
        sections
            .iter()
            .filter(|s| self.accepts(s))
            .cloned()
            .collect()
    }

    /// Returns true if no filter is enabled.
    pub fn is_noop(&self) -> bool {
        !self.downtown_only
            && self.not_before.is_none()
            && self.not_after.is_none()
            && !self.exclude_closed
    }
}
