/// Types for per-course section combinations
use crate::catalog::ComponentType;
use crate::time::WeeklyTimeMask;
use serde::Serialize;

/// The section chosen for one component type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ComponentPick {
    pub component: ComponentType,
    pub crn: String,
}

/// One internally conflict-free selection of sections for a single course:
/// exactly one section per required component type.
///
/// Picks are ordered by component group (first appearance in the catalog).
/// The merged mask is the union of every member section's mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Combination {
    course_code: String,
    picks: Vec<ComponentPick>,
    #[serde(skip)]
    mask: WeeklyTimeMask,
}

impl Combination {
    pub(crate) fn new(course_code: String, picks: Vec<ComponentPick>, mask: WeeklyTimeMask) -> Self {
        Self {
            course_code,
            picks,
            mask,
        }
    }

    pub fn course_code(&self) -> &str {
        &self.course_code
    }

    pub fn picks(&self) -> &[ComponentPick] {
        &self.picks
    }

    /// Reference numbers of the member sections, in pick order.
    pub fn crns(&self) -> impl Iterator<Item = &str> + '_ {
        self.picks.iter().map(|p| p.crn.as_str())
    }

    /// The section picked for `component`, if that component is required.
    pub fn section_for(&self, component: &ComponentType) -> Option<&str> {
        self.picks
            .iter()
            .find(|p| &p.component == component)
            .map(|p| p.crn.as_str())
    }

    pub fn mask(&self) -> &WeeklyTimeMask {
        &self.mask
    }

    /// Returns true if this combination meets at the same time as `other`.
    pub fn overlaps(&self, other: &Combination) -> bool {
        self.mask.overlaps(&other.mask)
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}
