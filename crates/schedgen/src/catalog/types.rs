/// Types for catalog section data
use crate::error::ScheduleError;
use crate::time::{TimeOfDay, WeeklyTimeMask};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a section plays within a course (lecture, lab, ...).
///
/// Catalog data uses short codes such as `"LEC"` or `"LAB"`; any code not
/// known here is kept, trimmed and upper-cased, as [`ComponentType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentType {
    Lecture,
    Lab,
    Tutorial,
    Seminar,
    Other(String),
}

impl ComponentType {
    pub fn code(&self) -> &str {
        match self {
            ComponentType::Lecture => "LEC",
            ComponentType::Lab => "LAB",
            ComponentType::Tutorial => "TUT",
            ComponentType::Seminar => "SEM",
            ComponentType::Other(code) => code,
        }
    }
}

impl From<String> for ComponentType {
    fn from(value: String) -> Self {
        let code = value.trim().to_ascii_uppercase();
        match code.as_str() {
            "LEC" | "LECTURE" => ComponentType::Lecture,
            "LAB" | "LABORATORY" => ComponentType::Lab,
            "TUT" | "TUTORIAL" => ComponentType::Tutorial,
            "SEM" | "SEMINAR" => ComponentType::Seminar,
            _ => ComponentType::Other(code),
        }
    }
}

impl From<&str> for ComponentType {
    fn from(value: &str) -> Self {
        ComponentType::from(value.to_string())
    }
}

impl From<ComponentType> for String {
    fn from(value: ComponentType) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Wire shape of a meeting block, validated into [`MeetingBlock`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawMeetingBlock {
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
    #[serde(default)]
    campus: String,
}

/// One recurring weekly meeting of a section.
///
/// Always satisfies `start < end`; the occupancy mask is computed once on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMeetingBlock", into = "RawMeetingBlock")]
pub struct MeetingBlock {
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
    campus: String,
    mask: WeeklyTimeMask,
}

impl MeetingBlock {
    pub fn new(
        day: Weekday,
        start: TimeOfDay,
        end: TimeOfDay,
        campus: impl Into<String>,
    ) -> Result<Self, ScheduleError> {
        let mask = WeeklyTimeMask::from_interval(start, end, day)?;
        Ok(Self {
            day,
            start,
            end,
            campus: campus.into(),
            mask,
        })
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn campus(&self) -> &str {
        &self.campus
    }

    pub fn mask(&self) -> WeeklyTimeMask {
        self.mask
    }
}

impl TryFrom<RawMeetingBlock> for MeetingBlock {
    type Error = ScheduleError;

    fn try_from(raw: RawMeetingBlock) -> Result<Self, Self::Error> {
        MeetingBlock::new(raw.day, raw.start, raw.end, raw.campus)
    }
}

impl From<MeetingBlock> for RawMeetingBlock {
    fn from(block: MeetingBlock) -> Self {
        RawMeetingBlock {
            day: block.day,
            start: block.start,
            end: block.end,
            campus: block.campus,
        }
    }
}

/// One schedulable offering of a course component, identified within a
/// term by its course reference number (CRN).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Filled from the enclosing snapshot when omitted in catalog data; an
    /// empty term matches whatever term a search asks for
    #[serde(default)]
    pub term: String,
    pub crn: String,
    pub course_code: String,
    pub component: ComponentType,
    #[serde(default)]
    pub title: Option<String>,
    /// Empty for sections without scheduled meetings (e.g. asynchronous online)
    #[serde(default)]
    pub meetings: Vec<MeetingBlock>,
    pub enrolled: u32,
    pub capacity: u32,
}

impl Section {
    /// Union of the masks of every meeting block.
    pub fn time_mask(&self) -> WeeklyTimeMask {
        self.meetings.iter().map(MeetingBlock::mask).collect()
    }

    pub fn seats_remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.enrolled)
    }
}
