// src/scrape/mod.rs
//! Fetch a page through the session, hand it to its extractor, wrap the result.
//!
//! Everything here is one request and one parse per call; nothing is cached.
mod absence;
mod schedule;
mod school;
mod users;

pub use absence::collect_absences;
pub use schedule::{collect_schedule, schedule_params, ScheduleOwner};
pub use school::{collect_school, students_by_letter};
pub use users::{current_user_id, fetch_user};
