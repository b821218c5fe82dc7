// src/models/user.rs
use std::fmt;
use std::rc::Rc;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::core::net::Session;
use crate::error::{Error, Result};
use crate::models::{AbsenceReport, Module};
use crate::scrape::{self, ScheduleOwner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UserKind {
    Student,
    Teacher,
    /// Logged-in accounts the portal does not file under either list (guardians, staff).
    Other,
}

impl UserKind {
    /// `type=` value on user pages.
    pub fn page_type(self) -> Option<&'static str> {
        match self {
            UserKind::Student => Some("elev"),
            UserKind::Teacher => Some("laerer"),
            UserKind::Other => None,
        }
    }

    /// Id parameter on user pages, e.g. `elevid`.
    pub fn id_param(self) -> Option<&'static str> {
        match self {
            UserKind::Student => Some("elevid"),
            UserKind::Teacher => Some("laererid"),
            UserKind::Other => None,
        }
    }

    /// Inverse of [`UserKind::id_param`]; unknown parameter names map to `Other`.
    pub fn from_id_param(param: &str) -> Self {
        match param {
            "elevid" => UserKind::Student,
            "laererid" => UserKind::Teacher,
            _ => UserKind::Other,
        }
    }
}

/// Fields read from a user's page header (or a directory listing).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDetails {
    pub name: String,
    pub initials: Option<String>,
    pub class_name: Option<String>,
    pub picture_url: Option<String>,
}

/// A portal user as seen at fetch time. Navigation methods go back to the portal every call.
#[derive(Clone)]
pub struct User {
    session: Rc<Session>,
    id: u32,
    kind: UserKind,
    details: UserDetails,
}

impl User {
    pub(crate) fn new(session: Rc<Session>, id: u32, kind: UserKind, details: UserDetails) -> Self {
        Self { session, id, kind, details }
    }

    pub fn id(&self) -> u32 { self.id }
    pub fn kind(&self) -> UserKind { self.kind }
    pub fn name(&self) -> &str { &self.details.name }
    pub fn inst_id(&self) -> u32 { self.session.inst_id() }

    /// Teachers only.
    pub fn initials(&self) -> Option<&str> { self.details.initials.as_deref() }

    /// Students only.
    pub fn class_name(&self) -> Option<&str> { self.details.class_name.as_deref() }

    pub fn picture_url(&self) -> Option<&str> { self.details.picture_url.as_deref() }

    /// Modules between `start` and `end`.
    ///
    /// With `strip_time`, both ends are cut to midnight and the end day is included.
    pub fn get_schedule(&self, start: NaiveDateTime, end: NaiveDateTime, strip_time: bool) -> Result<Vec<Module>> {
        let owner = match self.kind {
            UserKind::Student => ScheduleOwner::Student(self.id),
            UserKind::Teacher => ScheduleOwner::Teacher(self.id),
            UserKind::Other => {
                return Err(Error::InvalidArgument(format!("user {} has no schedule", self.id)));
            }
        };
        scrape::collect_schedule(&self.session, owner, start, end, strip_time)
    }

    pub fn get_absences(&self) -> Result<AbsenceReport> {
        if self.kind != UserKind::Student {
            return Err(Error::InvalidArgument(format!("absence is only kept for students, user {} is not one", self.id)));
        }
        scrape::collect_absences(&self.session, self.id)
    }

    /// A freshly fetched copy with the full header (directory entries carry names only).
    pub fn refresh(&self) -> Result<User> {
        scrape::fetch_user(&self.session, self.id, self.kind)
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.inst_id() == other.inst_id()
            && self.id == other.id
            && self.kind == other.kind
            && self.details == other.details
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.details.name)
            .field("initials", &self.details.initials)
            .field("class_name", &self.details.class_name)
            .finish()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.details.initials, &self.details.class_name) {
            (UserKind::Teacher, Some(ini), _) => write!(f, "{} ({ini})", self.details.name),
            (UserKind::Student, _, Some(class)) => write!(f, "{}, {class}", self.details.name),
            _ => f.write_str(&self.details.name),
        }
    }
}
