// src/specs/school.rs
//! Advanced schedule search (`FindSkemaAdv.aspx`): the whole directory in three `<select>`s.
//!
//! Option shapes:
//! - students `<option value="S123">Jens Hansen (1x 12)</option>`
//! - teachers `<option value="T45">Anne Berg (abc)</option>`
//! - rooms    `<option value="RE67">0.015</option>`

use scraper::{ElementRef, Html, Selector};

use crate::config::consts::SCHOOL_PAGE;
use crate::core::html::{self, lines_of, text_of};
use crate::error::{Error, Result};
use super::Extraction;

#[derive(Debug, Clone)]
pub struct SchoolLayout {
    pub name: &'static str,
    pub students: &'static str,
    pub teachers: &'static str,
    pub rooms: &'static str,
}

impl Default for SchoolLayout {
    fn default() -> Self {
        Self {
            name: "#m_masterleftDiv",
            students: "#m_Content_StudentMC_totalSet",
            teachers: "#m_Content_TeacherMC_totalSet",
            rooms: "#m_Content_RoomMC_totalSet",
        }
    }
}

/// One `<option>`: numeric id, display name, and the parenthesised detail (class or initials).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: u32,
    pub name: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    pub name: String,
    pub students: Extraction<DirectoryEntry>,
    pub teachers: Extraction<DirectoryEntry>,
    pub rooms: Extraction<DirectoryEntry>,
}

pub fn parse(doc: &str, layout: &SchoolLayout) -> Result<Directory> {
    let dom = Html::parse_document(doc);

    let name_sel = html::selector(SCHOOL_PAGE, layout.name)?;
    let name = html::first(&dom, &name_sel)
        .and_then(|el| lines_of(el).into_iter().next())
        .ok_or_else(|| Error::parse(SCHOOL_PAGE, "school name not found"))?;

    Ok(Directory {
        name,
        students: options(&dom, layout.students, "student", true)?,
        teachers: options(&dom, layout.teachers, "teacher", true)?,
        rooms: options(&dom, layout.rooms, "room", false)?,
    })
}

fn options(dom: &Html, select: &'static str, what: &str, has_detail: bool) -> Result<Extraction<DirectoryEntry>> {
    let select_sel: Selector = html::selector(SCHOOL_PAGE, select)?;
    let list = html::first(dom, &select_sel)
        .ok_or_else(|| Error::parse(SCHOOL_PAGE, format!("{what} list not found")))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for opt in list.select(sel!("option")) {
        match entry(opt, has_detail) {
            Some(e) => records.push(e),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        logd!(page = SCHOOL_PAGE, skipped, what, "unrecognised directory options");
    }
    Extraction::settle(SCHOOL_PAGE, what, records, skipped)
}

fn entry(opt: ElementRef<'_>, has_detail: bool) -> Option<DirectoryEntry> {
    // Type prefix ("S", "T", "RE") then the id.
    let id = opt.value().attr("value")?
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .parse()
        .ok()?;
    let text = text_of(opt);
    let (name, detail) = match text.split_once(" (") {
        Some((name, rest)) if has_detail => (s!(name), Some(s!(rest.trim_end_matches(')')))),
        _ => (text.clone(), None),
    };
    if name.is_empty() {
        return None;
    }
    Some(DirectoryEntry { id, name, detail })
}
