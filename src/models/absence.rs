// src/models/absence.rs
use serde::Serialize;

use crate::error::Result;

/// What the absence was from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AbsenceKind {
    /// Lessons not attended.
    Physical,
    /// Written assignments not handed in.
    Assignment,
}

/// Date range a figure covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AbsencePeriod {
    /// Start of the school year up to today ("opgjort").
    SoFar,
    /// Projected over the whole school year.
    WholeYear,
}

/// `absent` out of `total` lessons (or assignment hours), as the portal counts them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AbsenceCount {
    pub absent: f64,
    pub total: f64,
    pub percentage: f64,
}

/// The four figures shown per row. A figure the portal leaves blank is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AbsenceFigures {
    pub physical_so_far: Option<AbsenceCount>,
    pub physical_whole_year: Option<AbsenceCount>,
    pub assignment_so_far: Option<AbsenceCount>,
    pub assignment_whole_year: Option<AbsenceCount>,
}

impl AbsenceFigures {
    pub fn get(&self, kind: AbsenceKind, period: AbsencePeriod) -> Option<AbsenceCount> {
        match (kind, period) {
            (AbsenceKind::Physical, AbsencePeriod::SoFar) => self.physical_so_far,
            (AbsenceKind::Physical, AbsencePeriod::WholeYear) => self.physical_whole_year,
            (AbsenceKind::Assignment, AbsencePeriod::SoFar) => self.assignment_so_far,
            (AbsenceKind::Assignment, AbsencePeriod::WholeYear) => self.assignment_whole_year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAbsence {
    /// Team name as linked, e.g. `3g Ma`.
    pub subject: String,
    /// `holdelementid` of the team.
    pub group_id: u32,
    pub figures: AbsenceFigures,
}

/// Absence overview for one student, aggregated per subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsenceReport {
    pub student_id: u32,
    pub subjects: Vec<SubjectAbsence>,
    pub total: AbsenceFigures,
}

impl AbsenceReport {
    pub fn subject(&self, name: &str) -> Option<&SubjectAbsence> {
        self.subjects.iter().find(|s| s.subject == name)
    }

    /// Absent lessons summed over subjects for one kind/period; blank figures count as zero.
    pub fn absent_sum(&self, kind: AbsenceKind, period: AbsencePeriod) -> f64 {
        self.subjects
            .iter()
            .filter_map(|s| s.figures.get(kind, period))
            .map(|c| c.absent)
            .sum()
    }

    /// `{"student_id": .., "subjects": [...], "total": {...}}`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(absent: f64, total: f64) -> Option<AbsenceCount> {
        Some(AbsenceCount { absent, total, percentage: absent / total * 100.0 })
    }

    fn report() -> AbsenceReport {
        let row = |name: &str, id, a| SubjectAbsence {
            subject: s!(name),
            group_id: id,
            figures: AbsenceFigures { physical_so_far: count(a, 40.0), ..Default::default() },
        };
        AbsenceReport {
            student_id: 7,
            subjects: vec![row("3g Ma", 11, 2.0), row("3g Da", 12, 1.5)],
            total: AbsenceFigures { physical_so_far: count(3.5, 80.0), ..Default::default() },
        }
    }

    #[test]
    fn sums_skip_blank_figures() {
        let r = report();
        assert_eq!(r.absent_sum(AbsenceKind::Physical, AbsencePeriod::SoFar), 3.5);
        assert_eq!(r.absent_sum(AbsenceKind::Assignment, AbsencePeriod::SoFar), 0.0);
        assert_eq!(r.subject("3g Da").map(|s| s.group_id), Some(12));
    }

    #[test]
    fn json_has_subjects_and_total() {
        let json = report().to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["subjects"].as_array().unwrap().len(), 2);
        assert_eq!(v["total"]["physical_so_far"]["absent"], 3.5);
        assert!(v["total"]["assignment_so_far"].is_null());
    }
}
