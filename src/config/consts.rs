// src/config/consts.rs

// Net config
pub const ORIGIN: &str = "https://www.lectio.dk";
pub const PREFIX: &str = "/lectio/";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("lectio_scrape/", env!("CARGO_PKG_VERSION"));

// Pages, relative to /lectio/<inst>/
pub const LOGIN_PAGE: &str = "login.aspx";
pub const FRONT_PAGE: &str = "forside.aspx";
pub const USER_PAGE: &str = "SkemaNy.aspx";
pub const SCHEDULE_PAGE: &str = "SkemaAvanceret.aspx";
pub const ABSENCE_PAGE: &str = "subnav/fravaerelev.aspx";
pub const SCHOOL_PAGE: &str = "FindSkemaAdv.aspx";
pub const LETTER_INDEX_PAGE: &str = "FindSkema.aspx";

// Login form (ASP.NET WebForms)
pub const LOGIN_EVENT_TARGET: &str = "m$Content$submitbtn2";
pub const USERNAME_FIELD: &str = "m$Content$username";
pub const PASSWORD_FIELD: &str = "m$Content$password";
pub const VIEWSTATE_X: &str = "__VIEWSTATEX";
pub const EVENT_VALIDATION: &str = "__EVENTVALIDATION";

// Where the portal bounces unauthenticated requests
pub const EXPIRED_MARKER: &str = "login.aspx?prevurl=";

// Schedule query
pub const SCHEDULE_LIST_TYPE: &str = "ShowListAll";
pub const PICTURE_SUFFIX: &str = "&fullsize=1";
