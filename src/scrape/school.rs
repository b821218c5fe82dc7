// src/scrape/school.rs
use std::rc::Rc;
use std::time::Instant;

use crate::config::consts::{LETTER_INDEX_PAGE, SCHOOL_PAGE};
use crate::core::net::Session;
use crate::error::{Error, Result};
use crate::log::fmt_elapsed;
use crate::models::{Room, School, User, UserDetails, UserKind};
use crate::specs::letter_index::{self, LetterIndexLayout};
use crate::specs::school::{self, DirectoryEntry, SchoolLayout};

/// The whole directory from the advanced search page.
pub fn collect_school(session: &Rc<Session>) -> Result<School> {
    let doc = session.fetch(SCHOOL_PAGE, &[])?;

    let t0 = Instant::now();
    let dir = school::parse(&doc, &SchoolLayout::default())?;
    logd!(
        students = dir.students.records.len(),
        teachers = dir.teachers.records.len(),
        rooms = dir.rooms.records.len(),
        elapsed = %fmt_elapsed(t0.elapsed()),
        "directory parsed"
    );

    let students = dir.students.records
        .into_iter()
        .map(|e| directory_user(session, UserKind::Student, e))
        .collect();
    let teachers = dir.teachers.records
        .into_iter()
        .map(|e| directory_user(session, UserKind::Teacher, e))
        .collect();
    let rooms = dir.rooms.records
        .into_iter()
        .map(|e| Room::new(Rc::clone(session), e.id, e.name))
        .collect();

    Ok(School::new(dir.name, students, teachers, rooms))
}

/// Students whose name starts with `letter`. Entries carry names only; `User::refresh` fills in the rest.
pub fn students_by_letter(session: &Rc<Session>, letter: char) -> Result<Vec<User>> {
    if !letter.is_alphabetic() {
        return Err(Error::InvalidArgument(format!("{letter:?} is not a letter")));
    }
    let letter: String = letter.to_uppercase().collect();

    let doc = session.fetch(LETTER_INDEX_PAGE, &[("type", s!("elev")), ("forbogstav", letter)])?;
    let out = letter_index::parse(&doc, &LetterIndexLayout::default())?;

    Ok(out.records
        .into_iter()
        .map(|(id, name)| {
            User::new(Rc::clone(session), id, UserKind::Student, UserDetails { name, ..Default::default() })
        })
        .collect())
}

fn directory_user(session: &Rc<Session>, kind: UserKind, e: DirectoryEntry) -> User {
    let details = match kind {
        UserKind::Teacher => UserDetails { name: e.name, initials: e.detail, ..Default::default() },
        _ => UserDetails { name: e.name, class_name: e.detail, ..Default::default() },
    };
    User::new(Rc::clone(session), e.id, kind, details)
}
