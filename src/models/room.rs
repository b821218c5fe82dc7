// src/models/room.rs
use std::fmt;
use std::rc::Rc;

use chrono::{Duration, NaiveDateTime};

use crate::core::net::Session;
use crate::error::Result;
use crate::models::Module;
use crate::scrape::{self, ScheduleOwner};

#[derive(Clone)]
pub struct Room {
    session: Rc<Session>,
    id: u32,
    name: String,
}

impl Room {
    pub(crate) fn new(session: Rc<Session>, id: u32, name: String) -> Self {
        Self { session, id, name }
    }

    pub fn id(&self) -> u32 { self.id }
    pub fn name(&self) -> &str { &self.name }

    /// Modules booked in this room.
    ///
    /// The portal returns nothing for ranges much longer than a month.
    pub fn get_schedule(&self, start: NaiveDateTime, end: NaiveDateTime, strip_time: bool) -> Result<Vec<Module>> {
        scrape::collect_schedule(&self.session, ScheduleOwner::Room(self.id), start, end, strip_time)
    }

    /// Free at `at` when nothing is booked or every booking is cancelled.
    pub fn is_available(&self, at: NaiveDateTime) -> Result<bool> {
        let booked = self.get_schedule(at, at + Duration::seconds(1), false)?;
        Ok(booked.iter().all(Module::is_cancelled))
    }

    /// Whether a module's raw room token names this room.
    pub fn matches(&self, token: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(token.trim())
    }
}

impl PartialEq for Room {
    fn eq(&self, other: &Self) -> bool {
        self.session.inst_id() == other.session.inst_id() && self.id == other.id && self.name == other.name
    }
}

impl fmt::Debug for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Room").field("id", &self.id).field("name", &self.name).finish()
    }
}
