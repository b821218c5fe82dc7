// src/specs/mod.rs
//! # Page extractors
//!
//! One module per portal page. Each one knows *where the data lives in the markup*
//! and turns it into records. They are pure: markup (and a layout) in, records out,
//! no network, no logging side effects beyond `logd!`.
//!
//! ## Layouts
//! Table-shaped pages take a small `*Layout` struct of CSS selectors and attribute
//! names. `Default` matches the live site; tests and callers can swap selectors
//! without touching the parsing code.
//!
//! ## Tolerance policy
//! - Rows that do not look like what we expect are **skipped and counted**
//!   (`Extraction::skipped`).
//! - A missing container (table, select, header) is a [`Error::Parse`].
//! - Candidate rows present but **none** recognised is a [`Error::Parse`]: the page
//!   layout moved and partial output would be wrong output.
//! - An empty container is an empty result (a day without lessons is not an error).
//!
//! ## Typical call chain
//! ```text
//! Lectio facade → scrape::collect_* → Session::fetch → specs::<page>::parse
//! ```

pub mod absence;
pub mod front;
pub mod letter_index;
pub mod login;
pub mod school;
pub mod schedule;
pub mod user;

use crate::error::{Error, Result};

/// Records pulled from one page plus the number of rows that were passed over.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Extraction<T> {
    /// Apply the "none recognised" rule.
    pub(crate) fn settle(page: &'static str, what: &str, records: Vec<T>, skipped: usize) -> Result<Self> {
        if records.is_empty() && skipped > 0 {
            return Err(Error::parse(page, format!("{skipped} {what} row(s) present, none recognised")));
        }
        Ok(Self { records, skipped })
    }
}
