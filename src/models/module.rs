// src/models/module.rs
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModuleStatus {
    Normal,
    Changed,
    Cancelled,
}

/// One lesson or event from a schedule lookup. A snapshot; nothing here talks to the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Free-text description, only present on some modules.
    pub title: Option<String>,
    /// The "Hold" line: team/subject, e.g. `1.a Da`. Comma separated when several.
    pub subject: Option<String>,
    /// Teacher line as printed, comma separated when several.
    pub teacher: Option<String>,
    /// Room line as printed, comma separated when several.
    pub room: Option<String>,
    /// Homework and notes following the labelled lines.
    pub extra_info: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: ModuleStatus,
    /// Absolute link to the module's detail page.
    pub url: Option<String>,
}

impl Module {
    pub fn is_cancelled(&self) -> bool {
        self.status == ModuleStatus::Cancelled
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when `at` falls inside `[start, end)`.
    pub fn covers(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }

    pub fn subjects(&self) -> Vec<&str> {
        split_list(self.subject.as_deref())
    }

    pub fn teachers(&self) -> Vec<&str> {
        split_list(self.teacher.as_deref())
    }

    /// Raw room tokens; resolve them through `School::resolve_rooms`.
    pub fn rooms(&self) -> Vec<&str> {
        split_list(self.room.as_deref())
    }
}

fn split_list(s: Option<&str>) -> Vec<&str> {
    s.map(|s| s.split(',').map(str::trim).filter(|t| !t.is_empty()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn module() -> Module {
        Module {
            title: None,
            subject: Some(s!("1.a Da, 1.b Da")),
            teacher: Some(s!("abc")),
            room: Some(s!("0.015 ,  1.12")),
            extra_info: None,
            start: at(8, 15),
            end: at(9, 45),
            status: ModuleStatus::Normal,
            url: None,
        }
    }

    #[test]
    fn multi_value_lines_split_on_commas() {
        let m = module();
        assert_eq!(m.subjects(), vec!["1.a Da", "1.b Da"]);
        assert_eq!(m.teachers(), vec!["abc"]);
        assert_eq!(m.rooms(), vec!["0.015", "1.12"]);
    }

    #[test]
    fn covers_is_half_open() {
        let m = module();
        assert_eq!(m.duration(), Duration::minutes(90));
        assert!(m.covers(at(8, 15)));
        assert!(m.covers(at(9, 44)));
        assert!(!m.covers(at(9, 45)));
    }
}
