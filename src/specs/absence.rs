// src/specs/absence.rs
//! Absence overview (`subnav/fravaerelev.aspx?elevid=N`).
//!
//! One row per team plus a bold totals row. After the subject cell come four
//! (percentage, `absent/total`) pairs:
//!
//! | cells | figure                     |
//! |-------|----------------------------|
//! | 1, 2  | physical, so far           |
//! | 3, 4  | physical, whole year       |
//! | 5, 6  | assignments, so far        |
//! | 7, 8  | assignments, whole year    |
//!
//! A pair without a `%` is a blank figure.

use scraper::{ElementRef, Html};

use crate::config::consts::ABSENCE_PAGE;
use crate::core::html::{self, text_of};
use crate::core::sanitize::{parse_fraction, parse_percentage, query_number};
use crate::error::{Error, Result};
use crate::models::{AbsenceCount, AbsenceFigures, SubjectAbsence};
use super::Extraction;

#[derive(Debug, Clone)]
pub struct AbsenceLayout {
    pub table: &'static str,
    /// Link in the first cell that marks a subject row.
    pub subject_link: &'static str,
    /// Query parameter of that link holding the team id.
    pub group_param: &'static str,
}

impl Default for AbsenceLayout {
    fn default() -> Self {
        Self {
            table: "#s_m_Content_Content_SFTabStudentAbsenceDataTable",
            subject_link: "a[href*='holdelementid']",
            group_param: "holdelementid",
        }
    }
}

const FIGURE_CELLS: usize = 9;

/// Subject rows plus the totals row.
pub fn parse(doc: &str, layout: &AbsenceLayout) -> Result<(Extraction<SubjectAbsence>, AbsenceFigures)> {
    let dom = Html::parse_document(doc);
    let table_sel = html::selector(ABSENCE_PAGE, layout.table)?;
    let link_sel = html::selector(ABSENCE_PAGE, layout.subject_link)?;

    let table = html::first(&dom, &table_sel)
        .ok_or_else(|| Error::parse(ABSENCE_PAGE, "absence table not found"))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut total = None;

    for row in table.select(sel!("tr")) {
        let cells: Vec<ElementRef<'_>> = row.select(sel!("td")).collect();
        let Some(first) = cells.first() else { continue };

        if let Some(link) = html::first_in(*first, &link_sel) {
            match subject_row(link, &cells, layout) {
                Some(r) => records.push(r),
                None => skipped += 1,
            }
        } else if is_total_row(&cells) {
            // Last one wins; there is only one on the live page.
            total = figures(&cells).or(total);
        }
    }

    if skipped > 0 {
        logd!(page = ABSENCE_PAGE, skipped, "unrecognised absence rows");
    }
    let total = total.ok_or_else(|| Error::parse(ABSENCE_PAGE, "totals row not found"))?;
    Ok((Extraction::settle(ABSENCE_PAGE, "subject", records, skipped)?, total))
}

fn subject_row(link: ElementRef<'_>, cells: &[ElementRef<'_>], layout: &AbsenceLayout) -> Option<SubjectAbsence> {
    let group_id = query_number(link.value().attr("href")?, layout.group_param)?;
    let subject = text_of(link);
    if subject.is_empty() {
        return None;
    }
    Some(SubjectAbsence { subject, group_id, figures: figures(cells)? })
}

fn is_total_row(cells: &[ElementRef<'_>]) -> bool {
    cells.len() >= FIGURE_CELLS && cells[1..].iter().any(|c| c.select(sel!("b")).next().is_some())
}

/// The four figures of a row, or `None` when the row is malformed.
fn figures(cells: &[ElementRef<'_>]) -> Option<AbsenceFigures> {
    if cells.len() < FIGURE_CELLS {
        return None;
    }
    let at = |i: usize| pair(&text_of(cells[i]), &text_of(cells[i + 1]));
    Some(AbsenceFigures {
        physical_so_far: at(1)?,
        physical_whole_year: at(3)?,
        assignment_so_far: at(5)?,
        assignment_whole_year: at(7)?,
    })
}

/// `Some(None)` for a blank figure, `None` when a percentage has no usable fraction.
fn pair(percentage: &str, fraction: &str) -> Option<Option<AbsenceCount>> {
    let Some(percentage) = parse_percentage(percentage) else {
        return Some(None);
    };
    let (absent, total) = parse_fraction(fraction)?;
    Some(Some(AbsenceCount { absent, total, percentage }))
}
