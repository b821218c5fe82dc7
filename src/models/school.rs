// src/models/school.rs
use std::fmt;

use crate::error::{Error, Result};
use crate::models::{Module, Room, User, UserKind};

/// The institution's directory as listed on the advanced schedule search page.
#[derive(Clone, PartialEq)]
pub struct School {
    name: String,
    students: Vec<User>,
    teachers: Vec<User>,
    rooms: Vec<Room>,
}

impl School {
    pub(crate) fn new(name: String, students: Vec<User>, teachers: Vec<User>, rooms: Vec<Room>) -> Self {
        Self { name, students, teachers, rooms }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn students(&self) -> &[User] { &self.students }
    pub fn teachers(&self) -> &[User] { &self.teachers }
    pub fn rooms(&self) -> &[Room] { &self.rooms }

    /// Look a user up by id, optionally restricted to one list.
    pub fn get_user_by_id(&self, id: u32, kind: Option<UserKind>) -> Result<&User> {
        let students = matches!(kind, None | Some(UserKind::Student));
        let teachers = matches!(kind, None | Some(UserKind::Teacher));

        students.then(|| self.students.iter().find(|u| u.id() == id)).flatten()
            .or_else(|| teachers.then(|| self.teachers.iter().find(|u| u.id() == id)).flatten())
            .ok_or(Error::UserNotFound { id })
    }

    /// Case-insensitive substring match on student names.
    pub fn search_students<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a User> + 'a {
        let q = query.to_lowercase();
        self.students.iter().filter(move |u| u.name().to_lowercase().contains(&q))
    }

    pub fn search_teachers_by_name<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a User> + 'a {
        let q = query.to_lowercase();
        self.teachers.iter().filter(move |u| u.name().to_lowercase().contains(&q))
    }

    pub fn search_teachers_by_initials<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a User> + 'a {
        let q = query.to_lowercase();
        self.teachers
            .iter()
            .filter(move |u| u.initials().is_some_and(|i| i.to_lowercase().contains(&q)))
    }

    /// Students first, then teachers.
    pub fn search_users<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a User> + 'a {
        self.search_students(query).chain(self.search_teachers_by_name(query))
    }

    pub fn room_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.matches(name))
    }

    /// Rooms named on a module. Tokens with no directory entry are left out.
    pub fn resolve_rooms(&self, module: &Module) -> Vec<&Room> {
        module.rooms().into_iter().filter_map(|t| self.room_by_name(t)).collect()
    }
}

impl fmt::Debug for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("School")
            .field("name", &self.name)
            .field("students", &self.students.len())
            .field("teachers", &self.teachers.len())
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
