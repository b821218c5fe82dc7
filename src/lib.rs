// src/lib.rs
//! Blocking scraping client for the Lectio school portal.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use lectio_scrape::Lectio;
//!
//! let lectio = Lectio::new(123, "username", "password");
//! let day = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! for module in lectio.get_schedule(day, day)? {
//!     println!("{} {:?}", module.start, module.subject);
//! }
//! # Ok::<(), lectio_scrape::Error>(())
//! ```

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod lectio;
pub mod models;
pub mod scrape;
pub mod specs;

pub use config::ClientOptions;
pub use core::net::{Credentials, Session};
pub use error::{AuthFailure, Error, Result};
pub use lectio::Lectio;
pub use models::*;
