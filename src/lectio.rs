// src/lectio.rs
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use chrono::NaiveDateTime;
use tracing::info_span;

use crate::config::ClientOptions;
use crate::core::net::{Credentials, Session};
use crate::error::{Error, Result};
use crate::models::{AbsenceReport, Module, School, User, UserKind};
use crate::scrape::{self, ScheduleOwner};

/// Entry point: one institution, one account.
///
/// Logs in on the first call that needs the portal and keeps that session.
/// A failed login is returned and not remembered, so the next call tries again.
pub struct Lectio {
    inst_id: u32,
    credentials: Credentials,
    options: ClientOptions,
    session: OnceCell<Rc<Session>>,
}

impl Lectio {
    pub fn new(inst_id: u32, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_options(inst_id, username, password, ClientOptions::default())
    }

    pub fn with_options(
        inst_id: u32,
        username: impl Into<String>,
        password: impl Into<String>,
        options: ClientOptions,
    ) -> Self {
        Self {
            inst_id,
            credentials: Credentials::new(username, password),
            options,
            session: OnceCell::new(),
        }
    }

    pub fn inst_id(&self) -> u32 {
        self.inst_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.get().is_some()
    }

    /// The live session, logging in first if there is none yet.
    pub fn session(&self) -> Result<&Rc<Session>> {
        if let Some(s) = self.session.get() {
            return Ok(s);
        }
        let _span = info_span!("authenticate", inst_id = self.inst_id).entered();
        let session = Session::authenticate(self.options.clone(), self.inst_id, self.credentials.clone())?;
        Ok(self.session.get_or_init(|| Rc::new(session)))
    }

    /// Id and kind of the logged-in account.
    pub fn get_user_id(&self) -> Result<(u32, UserKind)> {
        let _span = info_span!("get_user_id", inst_id = self.inst_id).entered();
        scrape::current_user_id(self.session()?)
    }

    /// The logged-in user with the full page header.
    pub fn get_user(&self) -> Result<User> {
        let _span = info_span!("get_user", inst_id = self.inst_id).entered();
        let session = self.session()?;
        let (id, kind) = scrape::current_user_id(session)?;
        scrape::fetch_user(session, id, kind)
    }

    /// The logged-in user's modules; whole days from `start` through `end`.
    pub fn get_schedule(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Module>> {
        let _span = info_span!("get_schedule", inst_id = self.inst_id, %start, %end).entered();
        let session = self.session()?;
        let owner = match scrape::current_user_id(session)? {
            (id, UserKind::Student) => ScheduleOwner::Student(id),
            (id, UserKind::Teacher) => ScheduleOwner::Teacher(id),
            (id, UserKind::Other) => return Err(Error::InvalidArgument(format!("user {id} has no schedule"))),
        };
        scrape::collect_schedule(session, owner, start, end, true)
    }

    pub fn get_absences(&self) -> Result<AbsenceReport> {
        let _span = info_span!("get_absences", inst_id = self.inst_id).entered();
        let session = self.session()?;
        match scrape::current_user_id(session)? {
            (id, UserKind::Student) => scrape::collect_absences(session, id),
            (id, _) => Err(Error::InvalidArgument(format!("absence is only kept for students, user {id} is not one"))),
        }
    }

    /// Any student or teacher by id, header included.
    pub fn get_user_by_id(&self, id: u32, kind: UserKind) -> Result<User> {
        let _span = info_span!("get_user_by_id", inst_id = self.inst_id, id, ?kind).entered();
        scrape::fetch_user(self.session()?, id, kind)
    }

    pub fn get_school(&self) -> Result<School> {
        let _span = info_span!("get_school", inst_id = self.inst_id).entered();
        scrape::collect_school(self.session()?)
    }

    pub fn find_students_by_letter(&self, letter: char) -> Result<Vec<User>> {
        let _span = info_span!("find_students_by_letter", inst_id = self.inst_id, %letter).entered();
        scrape::students_by_letter(self.session()?, letter)
    }

    /// Drop the session. Records fetched before keep the old one and now see
    /// `SessionExpired`; the next call here logs in again.
    pub fn log_out(&mut self) -> Result<()> {
        let _span = info_span!("log_out", inst_id = self.inst_id).entered();
        match self.session.take() {
            Some(s) => s.log_out(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Lectio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lectio")
            .field("inst_id", &self.inst_id)
            .field("credentials", &self.credentials)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_does_not_log_in() {
        let l = Lectio::new(123, "anne", "hunter2");
        assert!(!l.is_authenticated());
        assert!(!format!("{l:?}").contains("hunter2"));
    }
}
