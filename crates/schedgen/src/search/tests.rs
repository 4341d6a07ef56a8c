//! Fixtures shared by the strategy tests, and checks that both strategies
//! agree on the same spaces.

use super::*;
use crate::catalog::ComponentType;
use crate::combination::{Combination, ComponentPick};
use crate::time::{TimeOfDay, WeeklyTimeMask, Weekday};
use std::collections::HashSet;
use std::time::Duration;

pub(crate) fn budget(max_solutions: usize) -> SearchBudget {
    SearchBudget::new(Duration::from_secs(5), max_solutions).unwrap()
}

/// A course whose i-th combination is a single lecture `"{code}-{i+1}"`
/// meeting at the given `(day, start, end)` blocks.
pub(crate) fn course(code: &str, combinations: Vec<Vec<(&str, &str, &str)>>) -> CourseCombinations {
    let combinations = combinations
        .into_iter()
        .enumerate()
        .map(|(i, blocks)| {
            let mask = blocks
                .iter()
                .map(|(day, start, end)| {
                    WeeklyTimeMask::from_interval(
                        start.parse().unwrap(),
                        end.parse().unwrap(),
                        day.parse::<Weekday>().unwrap(),
                    )
                    .unwrap()
                })
                .collect();
            Combination::new(
                code.to_string(),
                vec![ComponentPick {
                    component: ComponentType::Lecture,
                    crn: format!("{code}-{}", i + 1),
                }],
                mask,
            )
        })
        .collect();

    CourseCombinations {
        course_code: code.to_string(),
        combinations,
    }
}

pub(crate) fn space_from(courses: Vec<CourseCombinations>) -> SearchSpace {
    SearchSpace::new("202309", courses)
}

/// `course_count` courses with `per_course` combinations each, every
/// combination in its own ten minutes on Monday, so every selection is valid.
pub(crate) fn disjoint_space(course_count: usize, per_course: usize) -> SearchSpace {
    assert!(course_count * per_course <= 144);
    let courses = (0..course_count)
        .map(|c| {
            let combinations = (0..per_course)
                .map(|k| {
                    let minute = (c * per_course + k) as u32 * 10;
                    let start = TimeOfDay::from_hm(minute / 60, minute % 60).unwrap();
                    let end = TimeOfDay::from_hm(minute / 60, minute % 60 + 5).unwrap();
                    Combination::new(
                        format!("C{c}"),
                        vec![ComponentPick {
                            component: ComponentType::Lecture,
                            crn: format!("C{c}-{k}"),
                        }],
                        WeeklyTimeMask::from_interval(start, end, Weekday::Mon).unwrap(),
                    )
                })
                .collect();
            CourseCombinations {
                course_code: format!("C{c}"),
                combinations,
            }
        })
        .collect();
    SearchSpace::new("202309", courses)
}

fn run_both(space: &SearchSpace, max_solutions: usize) -> (SearchOutcome, SearchOutcome) {
    let config = SearchConfig {
        seed: Some(2023),
        ..SearchConfig::default()
    };
    let systematic = StrategyKind::Systematic
        .build(&config)
        .search(space, &budget(max_solutions));
    let random = StrategyKind::Random
        .build(&config)
        .search(space, &budget(max_solutions));
    (systematic, random)
}

fn assert_valid(space: &SearchSpace, outcome: &SearchOutcome, max_solutions: usize) {
    assert!(outcome.schedules.len() <= max_solutions);

    let distinct: HashSet<&Schedule> = outcome.schedules.iter().collect();
    assert_eq!(distinct.len(), outcome.schedules.len(), "duplicate schedule");

    for schedule in &outcome.schedules {
        assert_eq!(schedule.len(), space.courses().len());
        let combos = schedule.combinations();
        for (i, a) in combos.iter().enumerate() {
            for b in &combos[i + 1..] {
                assert!(!a.overlaps(b), "overlapping combinations in a schedule");
            }
        }
    }
}

#[test]
fn test_all_pairs_overlap_gives_nothing() {
    let space = space_from(vec![
        course("BIOL1000U", vec![vec![("Mon", "0810", "0930"), ("Wed", "0810", "0930")]]),
        course(
            "EAP1000E",
            vec![
                vec![("Mon", "0900", "1200")],
                vec![("Wed", "0700", "0820")],
                vec![("Mon", "0810", "0930"), ("Fri", "0810", "0930")],
            ],
        ),
    ]);

    let (systematic, random) = run_both(&space, 5);
    assert!(systematic.schedules.is_empty());
    assert!(random.schedules.is_empty());
    assert_eq!(systematic.termination, TerminationReason::Exhausted);
    assert_eq!(random.termination, TerminationReason::Exhausted);
}

#[test]
fn test_two_feasible_pairings_found_by_both() {
    let space = space_from(vec![
        course(
            "BIOL1000U",
            vec![
                vec![("Mon", "0810", "0930")],
                vec![("Tue", "0810", "0930")],
            ],
        ),
        course(
            "CRMN1000U",
            vec![
                vec![("Mon", "0900", "1000"), ("Tue", "0900", "1000")],
                vec![("Tue", "0700", "0900")],
                vec![("Mon", "0700", "0815")],
            ],
        ),
    ]);

    let (systematic, random) = run_both(&space, 5);
    assert_valid(&space, &systematic, 5);
    assert_valid(&space, &random, 5);
    assert_eq!(systematic.schedules.len(), 2);
    assert_eq!(random.schedules.len(), 2);

    let as_set = |o: &SearchOutcome| o.schedules.iter().cloned().collect::<HashSet<_>>();
    assert_eq!(as_set(&systematic), as_set(&random));
}

#[test]
fn test_strategies_agree_on_disjoint_space() {
    let space = disjoint_space(3, 3);
    let (systematic, random) = run_both(&space, 100);

    assert_valid(&space, &systematic, 100);
    assert_valid(&space, &random, 100);
    assert_eq!(systematic.schedules.len(), 27);
    assert_eq!(
        systematic.schedules.iter().collect::<HashSet<_>>(),
        random.schedules.iter().collect::<HashSet<_>>()
    );
}

#[test]
fn test_enumeration_time_counts_against_the_limit() {
    let sections: Vec<Section> = serde_json::from_str(
        r#"[{"crn": "1", "course_code": "A100", "component": "LEC",
             "meetings": [{"day": "Mon", "start": "0810", "end": "0930"}],
             "enrolled": 0, "capacity": 10}]"#,
    )
    .unwrap();
    let by_course = HashMap::from([("A100".to_string(), sections)]);
    let searcher = ScheduleSearcher::default();

    let tiny = SearchBudget::new(Duration::from_nanos(1), 5).unwrap();
    let outcome = searcher
        .search("202309", &["A100"], &by_course, &tiny, StrategyKind::Systematic)
        .unwrap();
    assert_eq!(outcome.termination, TerminationReason::TimeLimit);
    assert!(outcome.schedules.is_empty());

    let outcome = searcher
        .search("202309", &["A100"], &by_course, &budget(5), StrategyKind::Systematic)
        .unwrap();
    assert_eq!(outcome.schedules.len(), 1);
    assert!(outcome.stats.elapsed < Duration::from_secs(5));
}

#[test]
fn test_searcher_rejects_bad_budget() {
    let searcher = ScheduleSearcher::default();
    let sections: HashMap<String, Vec<Section>> = HashMap::new();
    let bad = SearchBudget {
        time_limit: Duration::ZERO,
        max_solutions: 5,
    };

    let err = searcher
        .search("202309", &["BIOL1000U"], &sections, &bad, StrategyKind::Systematic)
        .unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidBudget { .. }));
}

#[test]
fn test_searcher_handles_missing_and_empty_requests() {
    let searcher = ScheduleSearcher::default();
    let sections: HashMap<String, Vec<Section>> = HashMap::new();

    let outcome = searcher
        .search("202309", &["NOPE1000U"], &sections, &budget(5), StrategyKind::Random)
        .unwrap();
    assert!(outcome.schedules.is_empty());
    assert_eq!(
        outcome.termination,
        TerminationReason::EmptyCombinationSpace {
            course_code: "NOPE1000U".to_string()
        }
    );

    let none: [&str; 0] = [];
    let outcome = searcher
        .search("202309", &none, &sections, &budget(5), StrategyKind::Systematic)
        .unwrap();
    assert_eq!(outcome.termination, TerminationReason::NoCourses);
}
