//! Pass/fail classification and merit ranking of exam results.
//!
//! A student passes only if every subject passes. Passing students are
//! ranked within their cohort (same class, exam type and year) by total marks
//! using standard competition ranking: equal totals share a rank and the next
//! distinct total skips ahead (90, 75, 75, 60 -> 1, 2, 2, 4).

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::database::models::result::{MarkSheet, RawSubjectMark, ResultRecord};
use crate::types::compare_rolls;

/// Minimum written mark when the subject also has an MCQ part.
pub const WRITTEN_PASS_WITH_MCQ: u32 = 24;
/// Minimum MCQ mark.
pub const MCQ_PASS: u32 = 10;
/// Minimum written mark for written-only subjects.
pub const WRITTEN_PASS_ONLY: u32 = 33;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeritError {
    /// Subject name -> reason, for every subject that cannot be scored.
    #[error("Malformed marks for subject(s): {}", subject_list(.0))]
    MalformedMarks(BTreeMap<String, String>),

    #[error("Roll {0} appears more than once in its cohort")]
    DuplicateRoll(String),

    #[error("Roll {0} passed but is missing from its cohort")]
    NotInCohort(String),
}

fn subject_list(malformed: &BTreeMap<String, String>) -> String {
    malformed.keys().cloned().collect::<Vec<_>>().join(", ")
}

/// A validated subject mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectMark {
    WrittenOnly { written: u32 },
    WithMcq { written: u32, mcq: u32 },
}

impl SubjectMark {
    /// Validate a stored mark. A missing written component is never scored as zero.
    pub fn from_raw(raw: &RawSubjectMark) -> Result<Self, &'static str> {
        match (raw.written, raw.mcq) {
            (Some(written), None) => Ok(Self::WrittenOnly { written }),
            (Some(written), Some(mcq)) => Ok(Self::WithMcq { written, mcq }),
            (None, Some(_)) => Err("written mark is missing"),
            (None, None) => Err("written and mcq marks are both missing"),
        }
    }

    pub fn sub_total(&self) -> u32 {
        match *self {
            Self::WrittenOnly { written } => written,
            Self::WithMcq { written, mcq } => written.saturating_add(mcq),
        }
    }

    pub fn passed(&self) -> bool {
        match *self {
            Self::WrittenOnly { written } => written >= WRITTEN_PASS_ONLY,
            Self::WithMcq { written, mcq } => written >= WRITTEN_PASS_WITH_MCQ && mcq >= MCQ_PASS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectOutcome {
    pub sub_total: u32,
    pub passed: bool,
}

pub fn evaluate_subject(mark: &SubjectMark) -> SubjectOutcome {
    SubjectOutcome {
        sub_total: mark.sub_total(),
        passed: mark.passed(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentOutcome {
    /// Sum over all subjects, failed ones included.
    pub total_marks: u32,
    pub failed: bool,
}

/// Check every subject of a mark sheet and report all unscoreable ones together.
pub fn validate_marks(marks: &MarkSheet) -> Result<Vec<SubjectMark>, MeritError> {
    let mut valid = Vec::with_capacity(marks.len());
    let mut malformed = BTreeMap::new();

    for (subject, raw) in marks {
        match SubjectMark::from_raw(raw) {
            Ok(mark) => valid.push(mark),
            Err(reason) => {
                malformed.insert(subject.clone(), reason.to_string());
            }
        }
    }

    if malformed.is_empty() {
        Ok(valid)
    } else {
        Err(MeritError::MalformedMarks(malformed))
    }
}

pub fn evaluate_student(marks: &MarkSheet) -> Result<StudentOutcome, MeritError> {
    let outcome = validate_marks(marks)?.iter().map(evaluate_subject).fold(
        StudentOutcome {
            total_marks: 0,
            failed: false,
        },
        |acc, subject| StudentOutcome {
            total_marks: acc.total_marks.saturating_add(subject.sub_total),
            failed: acc.failed || !subject.passed,
        },
    );

    Ok(outcome)
}

/// A student's standing in the cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeritPosition {
    Rank(u32),
    Fail,
}

impl MeritPosition {
    pub fn rank(&self) -> Option<u32> {
        match self {
            Self::Rank(rank) => Some(*rank),
            Self::Fail => None,
        }
    }
}

// Serialized as a bare number or the literal "Fail".
impl Serialize for MeritPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Rank(rank) => serializer.serialize_u32(*rank),
            Self::Fail => serializer.serialize_str("Fail"),
        }
    }
}

/// Passing totals of a cohort, sorted descending.
struct PassingTotals(Vec<u32>);

impl PassingTotals {
    fn new(outcomes: &[StudentOutcome]) -> Self {
        let mut totals: Vec<u32> = outcomes
            .iter()
            .filter(|o| !o.failed)
            .map(|o| o.total_marks)
            .collect();
        totals.sort_unstable_by(|a, b| b.cmp(a));
        Self(totals)
    }

    /// 1 + number of passing totals strictly greater than `total`.
    fn rank_of(&self, total: u32) -> u32 {
        let greater = self.0.partition_point(|&t| t > total);
        greater as u32 + 1
    }
}

fn evaluate_cohort(cohort: &[ResultRecord]) -> Result<Vec<StudentOutcome>, MeritError> {
    cohort.iter().map(|r| evaluate_student(&r.marks)).collect()
}

/// Merit position of `target` within `cohort`.
///
/// `cohort` must be every result sharing the target's class, exam type and
/// year. A failed target is `Fail` without looking at the cohort.
pub fn rank_cohort(
    target: &ResultRecord,
    cohort: &[ResultRecord],
) -> Result<MeritPosition, MeritError> {
    if evaluate_student(&target.marks)?.failed {
        return Ok(MeritPosition::Fail);
    }

    let occurrences = cohort.iter().filter(|r| r.roll == target.roll).count();
    if occurrences > 1 {
        return Err(MeritError::DuplicateRoll(target.roll.clone()));
    }

    let outcomes = evaluate_cohort(cohort)?;
    let passing = PassingTotals::new(&outcomes);

    let own = cohort
        .iter()
        .zip(&outcomes)
        .find(|(r, o)| r.roll == target.roll && !o.failed)
        .map(|(_, o)| *o)
        .ok_or_else(|| MeritError::NotInCohort(target.roll.clone()))?;

    Ok(MeritPosition::Rank(passing.rank_of(own.total_marks)))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeritEntry {
    pub roll: String,
    pub student_name: String,
    pub total_marks: u32,
    pub merit_position: MeritPosition,
}

/// Every cohort member with its position: ranked students first by rank then
/// roll, failed students after them by roll.
pub fn merit_list(cohort: &[ResultRecord]) -> Result<Vec<MeritEntry>, MeritError> {
    let outcomes = evaluate_cohort(cohort)?;
    let passing = PassingTotals::new(&outcomes);

    let mut entries: Vec<MeritEntry> = cohort
        .iter()
        .zip(&outcomes)
        .map(|(record, outcome)| MeritEntry {
            roll: record.roll.clone(),
            student_name: record.student_name.clone(),
            total_marks: outcome.total_marks,
            merit_position: if outcome.failed {
                MeritPosition::Fail
            } else {
                MeritPosition::Rank(passing.rank_of(outcome.total_marks))
            },
        })
        .collect();

    entries.sort_by(|a, b| {
        let key = |e: &MeritEntry| e.merit_position.rank().unwrap_or(u32::MAX);
        key(a)
            .cmp(&key(b))
            .then_with(|| compare_rolls(&a.roll, &b.roll))
    });

    Ok(entries)
}
