// src/config/options.rs
use std::time::Duration;

use super::consts::*;
use crate::core::html::absolute_url;

/// Knobs for the HTTP side of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientOptions {
    /// Scheme + host, no trailing slash. Tests point this at a mock portal.
    pub origin: String,
    /// Flat per-request timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            origin: s!(ORIGIN),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: s!(USER_AGENT),
        }
    }
}

impl ClientOptions {
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        self.origin = s!(origin.trim_end_matches('/'));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `https://www.lectio.dk/lectio/<inst>/`
    pub fn institution_base(&self, inst_id: u32) -> String {
        format!("{}{}{}/", self.origin, PREFIX, inst_id)
    }

    /// Absolute URL for a site-relative href such as `/lectio/123/aktivitet/...`.
    pub fn absolute(&self, href: &str) -> String {
        absolute_url(&self.origin, href)
    }
}
