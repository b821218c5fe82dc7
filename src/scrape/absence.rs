// src/scrape/absence.rs
use std::time::Instant;

use crate::config::consts::ABSENCE_PAGE;
use crate::core::net::Session;
use crate::error::Result;
use crate::log::fmt_elapsed;
use crate::models::AbsenceReport;
use crate::specs::absence::{self, AbsenceLayout};

pub fn collect_absences(session: &Session, student_id: u32) -> Result<AbsenceReport> {
    let doc = session.fetch(ABSENCE_PAGE, &[("elevid", student_id.to_string())])?;

    let t0 = Instant::now();
    let (subjects, total) = absence::parse(&doc, &AbsenceLayout::default())?;
    logd!(
        student_id,
        subjects = subjects.records.len(),
        skipped = subjects.skipped,
        elapsed = %fmt_elapsed(t0.elapsed()),
        "absence parsed"
    );
    Ok(AbsenceReport { student_id, subjects: subjects.records, total })
}
