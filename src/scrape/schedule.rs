// src/scrape/schedule.rs
use std::time::Instant;

use chrono::{NaiveDateTime, NaiveTime};

use crate::config::consts::{SCHEDULE_LIST_TYPE, SCHEDULE_PAGE};
use crate::core::net::Session;
use crate::error::{Error, Result};
use crate::log::fmt_elapsed;
use crate::models::Module;
use crate::specs::schedule::{self, ScheduleLayout};

/// Whose schedule to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOwner {
    Student(u32),
    Teacher(u32),
    Room(u32),
}

impl ScheduleOwner {
    fn param(self) -> (&'static str, u32) {
        match self {
            ScheduleOwner::Student(id) => ("studentsel", id),
            ScheduleOwner::Teacher(id) => ("teachersel", id),
            ScheduleOwner::Room(id) => ("lokalesel", id),
        }
    }
}

const ISO_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Query for `SkemaAvanceret.aspx`, in the order the portal itself builds it.
pub fn schedule_params(
    owner: ScheduleOwner,
    start: NaiveDateTime,
    end: NaiveDateTime,
    strip_time: bool,
) -> Result<Vec<(&'static str, String)>> {
    // Whole days only compare by date.
    let reversed = if strip_time { end.date() < start.date() } else { end < start };
    if reversed {
        return Err(Error::InvalidArgument(format!("schedule range ends {end} before it starts {start}")));
    }

    let (start, end) = if strip_time {
        let next_day = end
            .date()
            .succ_opt()
            .ok_or_else(|| Error::InvalidArgument(format!("no day after {end}")))?;
        (start.date().and_time(NaiveTime::MIN), next_day.and_time(NaiveTime::MIN))
    } else {
        (start, end)
    };

    let (key, id) = owner.param();
    Ok(vec![
        ("type", s!(SCHEDULE_LIST_TYPE)),
        ("starttime", start.format(ISO_SECONDS).to_string()),
        ("endtime", end.format(ISO_SECONDS).to_string()),
        ("dagsbemaerk", s!("0")),
        (key, id.to_string()),
    ])
}

/// Modules of `owner` between `start` and `end`, in page order.
pub fn collect_schedule(
    session: &Session,
    owner: ScheduleOwner,
    start: NaiveDateTime,
    end: NaiveDateTime,
    strip_time: bool,
) -> Result<Vec<Module>> {
    let params = schedule_params(owner, start, end, strip_time)?;
    let doc = session.fetch(SCHEDULE_PAGE, &params)?;

    let t0 = Instant::now();
    let out = schedule::parse(&doc, &ScheduleLayout::default(), &session.options().origin)?;
    logd!(
        ?owner,
        modules = out.records.len(),
        skipped = out.skipped,
        elapsed = %fmt_elapsed(t0.elapsed()),
        "schedule parsed"
    );
    Ok(out.records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn plain_range_keeps_times() {
        let p = schedule_params(ScheduleOwner::Student(7), at(2, 8, 15), at(2, 9, 45), false).unwrap();
        assert_eq!(p, vec![
            ("type", s!("ShowListAll")),
            ("starttime", s!("2024-09-02T08:15:00")),
            ("endtime", s!("2024-09-02T09:45:00")),
            ("dagsbemaerk", s!("0")),
            ("studentsel", s!("7")),
        ]);
    }

    #[test]
    fn strip_time_covers_whole_end_day() {
        let p = schedule_params(ScheduleOwner::Room(3), at(2, 13, 0), at(6, 10, 30), true).unwrap();
        assert_eq!(p[1].1, "2024-09-02T00:00:00");
        assert_eq!(p[2].1, "2024-09-07T00:00:00");
        assert_eq!(p[4], ("lokalesel", s!("3")));
    }

    #[test]
    fn strip_time_same_day_ignores_clock_order() {
        let p = schedule_params(ScheduleOwner::Student(1), at(2, 12, 0), at(2, 9, 0), true).unwrap();
        assert_eq!(p[1].1, "2024-09-02T00:00:00");
        assert_eq!(p[2].1, "2024-09-03T00:00:00");

        let err = schedule_params(ScheduleOwner::Student(1), at(2, 12, 0), at(2, 9, 0), false).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = schedule_params(ScheduleOwner::Teacher(1), at(3, 8, 0), at(2, 8, 0), true).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
