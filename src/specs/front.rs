// src/specs/front.rs
//! Front page (`forside.aspx`): who is logged in.
//!
//! The pinned-site meta tag carries the start URL with the user's id, e.g.
//! `<meta name="msapplication-starturl" content="/lectio/123/forside.aspx?elevid=456">`.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::config::consts::FRONT_PAGE;
use crate::error::{Error, Result};
use crate::models::UserKind;

static START_URL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]*id)=([0-9]+)\s*$").expect("start url regex"));

/// `(user id, kind)` of the logged-in account.
pub fn parse(doc: &str) -> Result<(u32, UserKind)> {
    let dom = Html::parse_document(doc);
    let content = dom
        .select(sel!(r#"meta[name="msapplication-starturl"]"#))
        .next()
        .and_then(|m| m.value().attr("content"))
        .ok_or_else(|| Error::parse(FRONT_PAGE, "start url meta tag not found"))?;

    let caps = START_URL_ID
        .captures(content)
        .ok_or_else(|| Error::parse(FRONT_PAGE, format!("no user id in start url {content:?}")))?;
    let id = caps[2]
        .parse()
        .map_err(|_| Error::parse(FRONT_PAGE, format!("user id out of range in {content:?}")))?;

    Ok((id, UserKind::from_id_param(&caps[1].to_ascii_lowercase())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(content: &str) -> String {
        format!(r#"<html><head><meta name="msapplication-starturl" content="{content}" /></head><body></body></html>"#)
    }

    #[test]
    fn student_and_teacher_ids() {
        assert_eq!(parse(&page("/lectio/123/forside.aspx?elevid=4567")).unwrap(), (4567, UserKind::Student));
        assert_eq!(parse(&page("/lectio/123/forside.aspx?laererid=89")).unwrap(), (89, UserKind::Teacher));
    }

    #[test]
    fn other_accounts_fall_back() {
        assert_eq!(parse(&page("/lectio/123/forside.aspx?id=5")).unwrap(), (5, UserKind::Other));
    }

    #[test]
    fn missing_meta_is_parse_error() {
        assert!(matches!(parse("<html></html>"), Err(Error::Parse { page: "forside.aspx", .. })));
        assert!(matches!(parse(&page("/lectio/123/forside.aspx")), Err(Error::Parse { .. })));
    }
}
