// src/models/mod.rs
//! Typed, read-only records.
//!
//! `Module` and the absence types are plain values. `User`, `Room` and `School`
//! keep an `Rc<Session>` so they can walk to related data; every such walk is a
//! new request and a new parse.

mod absence;
mod module;
mod room;
mod school;
mod user;

pub use absence::{AbsenceCount, AbsenceFigures, AbsenceKind, AbsencePeriod, AbsenceReport, SubjectAbsence};
pub use module::{Module, ModuleStatus};
pub use room::Room;
pub use school::School;
pub use user::{User, UserDetails, UserKind};
