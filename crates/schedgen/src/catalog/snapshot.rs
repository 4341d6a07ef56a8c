//! Read-only snapshot of every section offered in one term.

use super::types::Section;
use crate::error::ScheduleError;
use crate::filter::SectionFilters;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Serialized snapshot as produced by the catalog refresh step.
#[derive(Debug, Deserialize)]
struct RawSnapshot {
    term: String,
    sections: Vec<Section>,
}

/// All sections of a term, indexed by course reference number.
///
/// Sections keep their catalog order, which is also the order used when
/// enumerating combinations.
#[derive(Debug, Clone)]
pub struct SectionSnapshot {
    term: String,
    sections: Vec<Section>,
    by_crn: HashMap<String, usize>,
}

impl SectionSnapshot {
    /// Builds a snapshot, filling in missing section terms.
    ///
    /// # Returns
    /// * `Err(InvalidSnapshot)` - If a section belongs to another term or a
    ///   CRN appears twice
    pub fn new(term: impl Into<String>, sections: Vec<Section>) -> Result<Self, ScheduleError> {
        let term = term.into();
        let mut by_crn = HashMap::with_capacity(sections.len());
        let mut sections = sections;

        for (index, section) in sections.iter_mut().enumerate() {
            if section.term.is_empty() {
                section.term = term.clone();
            } else if section.term != term {
                return Err(ScheduleError::InvalidSnapshot {
                    message: format!(
                        "section {} belongs to term {}, not {}",
                        section.crn, section.term, term
                    ),
                });
            }

            if by_crn.insert(section.crn.clone(), index).is_some() {
                return Err(ScheduleError::InvalidSnapshot {
                    message: format!("duplicate CRN {} in term {}", section.crn, term),
                });
            }
        }

        Ok(Self {
            term,
            sections,
            by_crn,
        })
    }

    /// Parses a snapshot from its JSON form: `{"term": ..., "sections": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self, ScheduleError> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Self::new(raw.term, raw.sections)
    }

    /// Loads a snapshot previously materialized to disk.
    pub fn load_from_path(path: &Path) -> Result<Self, ScheduleError> {
        let content = fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&content)?;
        info!(
            "Loaded {} sections for term {} from {}",
            snapshot.len(),
            snapshot.term,
            path.display()
        );
        Ok(snapshot)
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Looks up a section by course reference number.
    pub fn find(&self, crn: &str) -> Option<&Section> {
        self.by_crn.get(crn).map(|&i| &self.sections[i])
    }

    /// Distinct course codes, sorted.
    pub fn course_codes(&self) -> BTreeSet<&str> {
        self.sections.iter().map(|s| s.course_code.as_str()).collect()
    }

    /// Sections of one course in catalog order.
    pub fn sections_for_course<'a>(
        &'a self,
        course_code: &'a str,
    ) -> impl Iterator<Item = &'a Section> + 'a {
        self.sections
            .iter()
            .filter(move |s| s.course_code == course_code)
    }

    /// Groups the snapshot by course code, preserving catalog order within
    /// each course.
    pub fn sections_by_course(&self) -> HashMap<String, Vec<Section>> {
        let mut grouped: HashMap<String, Vec<Section>> = HashMap::new();
        for section in &self.sections {
            grouped
                .entry(section.course_code.clone())
                .or_default()
                .push(section.clone());
        }
        grouped
    }

    /// Returns a new snapshot holding only the sections accepted by `filters`.
    pub fn filtered(&self, filters: &SectionFilters) -> SectionSnapshot {
        let sections = filters.apply(&self.sections);
        debug!(
            "Filters kept {} of {} sections for term {}",
            sections.len(),
            self.sections.len(),
            self.term
        );

        let by_crn = sections
            .iter()
            .enumerate()
            .map(|(i, s)| (s.crn.clone(), i))
            .collect();

        SectionSnapshot {
            term: self.term.clone(),
            sections,
            by_crn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "term": "202309",
        "sections": [
            {"crn": "1", "course_code": "A100", "component": "LEC",
             "meetings": [{"day": "Mon", "start": "0810", "end": "0930"}],
             "enrolled": 5, "capacity": 5},
            {"crn": "2", "course_code": "A100", "component": "LAB",
             "enrolled": 0, "capacity": 20},
            {"crn": "3", "course_code": "B200", "component": "LEC",
             "enrolled": 1, "capacity": 20}
        ]
    }"#;

    #[test]
    fn test_parse_and_lookup() {
        let snapshot = SectionSnapshot::from_json_str(SNAPSHOT).unwrap();

        assert_eq!(snapshot.term(), "202309");
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.find("2").unwrap().course_code, "A100");
        assert_eq!(snapshot.find("2").unwrap().term, "202309");
        assert!(snapshot.find("99").is_none());
        assert_eq!(
            snapshot.course_codes().into_iter().collect::<Vec<_>>(),
            vec!["A100", "B200"]
        );
        assert_eq!(snapshot.sections_for_course("A100").count(), 2);
        assert_eq!(snapshot.sections_by_course()["B200"].len(), 1);
    }

    #[test]
    fn test_rejects_duplicate_crn_and_foreign_term() {
        let dup = r#"{"term": "202309", "sections": [
            {"crn": "1", "course_code": "A", "component": "LEC", "enrolled": 0, "capacity": 1},
            {"crn": "1", "course_code": "B", "component": "LEC", "enrolled": 0, "capacity": 1}
        ]}"#;
        assert!(matches!(
            SectionSnapshot::from_json_str(dup),
            Err(ScheduleError::InvalidSnapshot { .. })
        ));

        let foreign = r#"{"term": "202309", "sections": [
            {"term": "202401", "crn": "1", "course_code": "A", "component": "LEC", "enrolled": 0, "capacity": 1}
        ]}"#;
        assert!(SectionSnapshot::from_json_str(foreign).is_err());
    }

    #[test]
    fn test_filtered_reindexes() {
        let snapshot = SectionSnapshot::from_json_str(SNAPSHOT).unwrap();
        let filters = SectionFilters {
            exclude_closed: true,
            ..SectionFilters::default()
        };

        let open = snapshot.filtered(&filters);
        assert_eq!(open.len(), 2);
        assert!(open.find("1").is_none());
        assert_eq!(open.find("3").unwrap().crn, "3");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SectionSnapshot::load_from_path(Path::new("/nonexistent/202309.json")).unwrap_err();
        assert!(matches!(err, ScheduleError::Io { .. }));
    }
}
