//! Enumeration of valid section combinations for a single course.

use super::types::{Combination, ComponentPick};
use crate::catalog::{ComponentType, Section};
use crate::time::WeeklyTimeMask;
use tracing::debug;

/// Sections of one component type, each with its precomputed mask.
struct ComponentGroup<'a> {
    component: &'a ComponentType,
    members: Vec<(&'a Section, WeeklyTimeMask)>,
}

/// Enumerates the combinations of one course in one term.
///
/// The required component types are the distinct types present among the
/// course's sections. Candidates are built depth-first across component
/// groups with a running union mask, so a partial selection is dropped as
/// soon as one of its sections overlaps the ones already chosen.
pub struct CombinationEnumerator<'a> {
    term: &'a str,
    course_code: &'a str,
}

impl<'a> CombinationEnumerator<'a> {
    pub fn new(term: &'a str, course_code: &'a str) -> Self {
        Self { term, course_code }
    }

    /// Enumerates every conflict-free combination.
    ///
    /// Sections from other terms or courses are ignored; a section with an
    /// empty term is taken to belong to this one. The result follows
    /// Cartesian-product order: component groups in order of first
    /// appearance, sections within a group in input order.
    ///
    /// # Arguments
    /// * `sections` - Candidate section pool (typically already filtered)
    ///
    /// # Returns
    /// * Combinations in enumeration order; empty if the course has no
    ///   sections or no conflict-free selection exists
    pub fn enumerate(&self, sections: &[Section]) -> Vec<Combination> {
        let groups = self.group_sections(sections);
        if groups.is_empty() {
            debug!(
                "No sections for {} in term {}; no combination possible",
                self.course_code, self.term
            );
            return Vec::new();
        }

        let mut out = Vec::new();
        let mut picks = Vec::with_capacity(groups.len());
        let mut pruned = 0usize;
        self.extend(&groups, WeeklyTimeMask::EMPTY, &mut picks, &mut out, &mut pruned);

        debug!(
            "{} ({}): {} component groups, {} combinations, {} partial selections pruned",
            self.course_code,
            self.term,
            groups.len(),
            out.len(),
            pruned
        );

        out
    }

    fn in_term(&self, section: &Section) -> bool {
        section.term.is_empty() || section.term == self.term
    }

    fn group_sections<'s>(&self, sections: &'s [Section]) -> Vec<ComponentGroup<'s>> {
        let mut groups: Vec<ComponentGroup<'s>> = Vec::new();

        for section in sections
            .iter()
            .filter(|s| self.in_term(s) && s.course_code == self.course_code)
        {
            let mask = section.time_mask();
            match groups.iter_mut().find(|g| *g.component == section.component) {
                Some(group) => group.members.push((section, mask)),
                None => groups.push(ComponentGroup {
                    component: &section.component,
                    members: vec![(section, mask)],
                }),
            }
        }

        groups
    }

    fn extend<'s>(
        &self,
        groups: &[ComponentGroup<'s>],
        running: WeeklyTimeMask,
        picks: &mut Vec<&'s Section>,
        out: &mut Vec<Combination>,
        pruned: &mut usize,
    ) {
        let depth = picks.len();
        let Some(group) = groups.get(depth) else {
            out.push(self.build(picks, running));
            return;
        };

        for &(section, mask) in &group.members {
            if mask.overlaps(&running) {
                *pruned += 1;
                continue;
            }
            picks.push(section);
            self.extend(groups, running | mask, picks, out, pruned);
            picks.pop();
        }
    }

    fn build(&self, picks: &[&Section], mask: WeeklyTimeMask) -> Combination {
        let picks = picks
            .iter()
            .map(|s| ComponentPick {
                component: s.component.clone(),
                crn: s.crn.clone(),
            })
            .collect();
        Combination::new(self.course_code.to_string(), picks, mask)
    }
}
