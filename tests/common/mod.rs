// tests/common/mod.rs
//
// Mock portal for one institution. The client under test is blocking, so it
// runs on its own plain thread while wiremock serves from the test runtime.
#![allow(dead_code)]

use std::thread;

use lectio_scrape::{ClientOptions, Lectio};
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const INST: u32 = 123;
pub const USERNAME: &str = "jens";
pub const PASSWORD: &str = "rigtig-kode";
pub const SESSION_COOKIE: &str = "ASP.NET_SessionId=fixture-session";

pub const LOGIN: &str = include_str!("../fixtures/login.html");
pub const FORSIDE: &str = include_str!("../fixtures/forside.html");
pub const SKEMA_NY: &str = include_str!("../fixtures/skemany.html");
pub const SKEMA: &str = include_str!("../fixtures/skema_avanceret.html");
pub const SKEMA_TOM: &str = include_str!("../fixtures/skema_tom.html");
pub const SKEMA_BRUDT: &str = include_str!("../fixtures/skema_brudt.html");
pub const FRAVAER: &str = include_str!("../fixtures/fravaer.html");
pub const FIND_SKEMA_ADV: &str = include_str!("../fixtures/find_skema_adv.html");
pub const FIND_SKEMA_A: &str = include_str!("../fixtures/find_skema_a.html");

pub fn page(name: &str) -> String {
    format!("/lectio/{INST}/{name}")
}

pub fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_owned(), "text/html; charset=utf-8")
}

pub fn redirect(to: &str) -> ResponseTemplate {
    ResponseTemplate::new(302).insert_header("Location", to)
}

/// Login page, credential check and front page.
///
/// The right password redirects to the front page; anything else re-renders
/// the login form at the login URL, as the portal does.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(page("login.aspx")))
        .respond_with(html(LOGIN))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(page("login.aspx")))
        .and(body_string_contains(format!("m%24Content%24password={PASSWORD}")))
        .respond_with(
            redirect(&page("forside.aspx"))
                .insert_header("Set-Cookie", format!("{SESSION_COOKIE}; path=/; HttpOnly").as_str()),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(page("login.aspx")))
        .and(body_string_contains("m%24Content%24password=forkert"))
        .respond_with(html(LOGIN))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(page("forside.aspx")))
        .respond_with(html(FORSIDE))
        .mount(server)
        .await;
}

/// Serve `body` for GETs of `name`, whatever the query.
pub async fn mount_page(server: &MockServer, name: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page(name)))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Answer GETs of `name` the way the portal answers a dead session.
pub async fn mount_expired(server: &MockServer, name: &str) {
    Mock::given(method("GET"))
        .and(path(page(name)))
        .respond_with(redirect(&format!("{}?prevurl={name}", page("login.aspx"))))
        .mount(server)
        .await;
}

/// Serve `body` only to requests carrying the login cookie; everyone else is
/// bounced to the login page like a dead session.
pub async fn mount_session_page(server: &MockServer, name: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page(name)))
        .and(header_regex("cookie", SESSION_COOKIE))
        .respond_with(html(body))
        .with_priority(1)
        .mount(server)
        .await;
    mount_expired(server, name).await;
}

/// Facade pointed at the mock. Build it inside [`blocking`]; it is not `Send`.
pub fn lectio(origin: &str, password: &str) -> Lectio {
    let options = ClientOptions::default().with_origin(origin);
    Lectio::with_options(INST, USERNAME, password, options)
}

/// Run blocking client code off the async runtime.
pub fn blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    thread::spawn(f).join().expect("client thread panicked")
}
