// src/core/net.rs
//
// Cookie-bearing blocking HTTPS session against one institution on the portal.

use std::cell::RefCell;
use std::fmt;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use url::Url;

use crate::config::consts::*;
use crate::config::ClientOptions;
use crate::error::{AuthFailure, Error, Result};
use crate::specs::login;

/// Username and password for one institution. The password never shows up in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated connection state. Only obtainable through [`Session::authenticate`].
///
/// Not meant for concurrent use; records hold it through `Rc`.
pub struct Session {
    inst_id: u32,
    credentials: Credentials,
    options: ClientOptions,
    base: Url,
    http: RefCell<Client>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("inst_id", &self.inst_id)
            .field("username", &self.credentials.username)
            .field("base", &self.base.as_str())
            .finish()
    }
}

impl Session {
    /// Log in and hand back a session whose cookies carry the authentication.
    pub fn authenticate(options: ClientOptions, inst_id: u32, credentials: Credentials) -> Result<Session> {
        let base_str = options.institution_base(inst_id);
        let base = Url::parse(&base_str)
            .map_err(|e| Error::InvalidArgument(format!("bad portal origin {base_str:?}: {e}")))?;
        let http = build_client(&options)?;

        let session = Session { inst_id, credentials, options, base, http: RefCell::new(http) };
        session.log_in()?;
        logf!(inst_id, username = %session.credentials.username, "authenticated");
        Ok(session)
    }

    pub fn inst_id(&self) -> u32 {
        self.inst_id
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// GET an institution page and return its markup.
    ///
    /// A silent bounce to the login page is reported as [`Error::SessionExpired`];
    /// nothing is retried.
    pub fn fetch(&self, page: &str, params: &[(&str, String)]) -> Result<String> {
        let url = self.page_url(page, params)?;
        logd!(%url, "GET");
        let resp = self.client()
            .get(url.clone())
            .send()
            .map_err(|source| Error::Network { url: s!(url.as_str()), source })?;
        self.read_page(page, resp)
    }

    /// Drop every cookie. Later fetches surface `SessionExpired`.
    pub fn log_out(&self) -> Result<()> {
        *self.http.borrow_mut() = build_client(&self.options)?;
        logf!(inst_id = self.inst_id, "logged out");
        Ok(())
    }

    fn client(&self) -> Client {
        self.http.borrow().clone()
    }

    fn page_url(&self, page: &str, params: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base
            .join(page)
            .map_err(|e| Error::InvalidArgument(format!("bad page path {page:?}: {e}")))?;
        if !params.is_empty() {
            let mut q = url.query_pairs_mut();
            for (k, v) in params {
                q.append_pair(k, v);
            }
        }
        Ok(url)
    }

    fn read_page(&self, page: &str, resp: Response) -> Result<String> {
        let final_url = s!(resp.url().as_str());
        if self.is_login_bounce(&final_url) {
            logw!(page, %final_url, "redirected to login");
            return Err(Error::SessionExpired { page: s!(page) });
        }

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { url: final_url, status: status.as_u16() });
        }

        let body = resp
            .text()
            .map_err(|source| Error::Network { url: final_url.clone(), source })?;

        // Some pages render the login form in place instead of redirecting.
        if login::is_login_page(&body) {
            logw!(page, "login form served in place of page");
            return Err(Error::SessionExpired { page: s!(page) });
        }
        Ok(body)
    }

    fn is_login_bounce(&self, url: &str) -> bool {
        url.contains(&format!("{}/{}", self.inst_id, EXPIRED_MARKER))
    }

    fn auth_error(&self, reason: AuthFailure) -> Error {
        Error::Auth { inst_id: self.inst_id, reason }
    }

    fn log_in(&self) -> Result<()> {
        let login_url = self.page_url(LOGIN_PAGE, &[])?;
        let client = self.client();

        // 1) Login page: hidden WebForms state, or a 404 for an unknown institution
        let resp = client
            .get(login_url.clone())
            .send()
            .map_err(|source| Error::Network { url: s!(login_url.as_str()), source })?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(self.auth_error(AuthFailure::UnknownInstitution));
        }
        if !resp.status().is_success() {
            return Err(Error::Status { url: s!(login_url.as_str()), status: resp.status().as_u16() });
        }
        let page = resp
            .text()
            .map_err(|source| Error::Network { url: s!(login_url.as_str()), source })?;
        let form = login::extract_form(&page)?;

        // 2) Postback with credentials
        let params = form.postback(LOGIN_EVENT_TARGET, &[
            ("time", "0"),
            ("__EVENTARGUMENT", ""),
            ("__SCROLLPOSITION", ""),
            ("__VIEWSTATEY_KEY", ""),
            ("__VIEWSTATE", ""),
            (USERNAME_FIELD, self.credentials.username.as_str()),
            (PASSWORD_FIELD, self.credentials.password.as_str()),
        ]);
        let resp = client
            .post(login_url.clone())
            .form(&params)
            .send()
            .map_err(|source| Error::Network { url: s!(login_url.as_str()), source })?;
        if !resp.status().is_success() {
            return Err(Error::Status { url: s!(resp.url().as_str()), status: resp.status().as_u16() });
        }

        // No status code tells us the outcome; a successful login leaves the login page.
        let still_on_login = resp.url().path().ends_with(LOGIN_PAGE);
        let body = resp
            .text()
            .map_err(|source| Error::Network { url: s!(login_url.as_str()), source })?;
        if still_on_login || login::is_login_page(&body) {
            return Err(self.auth_error(AuthFailure::InvalidCredentials));
        }

        // 3) The front page must now be reachable
        match self.fetch(FRONT_PAGE, &[]) {
            Ok(_) => Ok(()),
            Err(Error::SessionExpired { .. }) => Err(self.auth_error(AuthFailure::InvalidCredentials)),
            Err(e) => Err(e),
        }
    }
}

fn build_client(options: &ClientOptions) -> Result<Client> {
    Client::builder()
        .cookie_store(true)
        .timeout(options.timeout)
        .user_agent(options.user_agent.as_str())
        .build()
        .map_err(|source| Error::Network { url: options.origin.clone(), source })
}
