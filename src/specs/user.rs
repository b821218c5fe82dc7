// src/specs/user.rs
//! User schedule page (`SkemaNy.aspx?type=elev&elevid=N`): the header names the user.
//!
//! Header shapes after the leading word ("Eleven", "Læreren") is dropped:
//! - student: `Jens Hansen, 1x - Skema`
//! - teacher: `abc - Anne Berg - Skema`

use scraper::Html;

use crate::config::consts::USER_PAGE;
use crate::core::html::{self, text_of};
use crate::error::{Error, Result};
use crate::models::{UserDetails, UserKind};

#[derive(Debug, Clone)]
pub struct UserLayout {
    pub title: &'static str,
    pub picture: &'static str,
}

impl Default for UserLayout {
    fn default() -> Self {
        Self {
            title: "#s_m_HeaderContent_MainTitle",
            picture: "#s_m_HeaderContent_picctrlthumbimage",
        }
    }
}

/// Header fields. `picture_url` is the raw `src` (site-relative); the caller makes it absolute.
pub fn parse(doc: &str, kind: UserKind, layout: &UserLayout) -> Result<UserDetails> {
    let dom = Html::parse_document(doc);
    let title_sel = html::selector(USER_PAGE, layout.title)?;
    let picture_sel = html::selector(USER_PAGE, layout.picture)?;

    let title = html::first(&dom, &title_sel)
        .map(text_of)
        .ok_or_else(|| Error::parse(USER_PAGE, "user header not found"))?;

    let mut details = split_title(&title, kind)?;
    details.picture_url = html::first(&dom, &picture_sel)
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string);
    Ok(details)
}

fn split_title(title: &str, kind: UserKind) -> Result<UserDetails> {
    let rest = title
        .split_once(' ')
        .map(|(_, r)| r.trim())
        .filter(|r| !r.is_empty())
        .ok_or_else(|| Error::parse(USER_PAGE, format!("unexpected user header {title:?}")))?;

    match kind {
        UserKind::Teacher => {
            let mut parts = rest.split(" - ").map(str::trim);
            match (parts.next(), parts.next()) {
                (Some(initials), Some(name)) if !initials.is_empty() && !name.is_empty() => Ok(UserDetails {
                    name: s!(name),
                    initials: Some(s!(initials)),
                    ..Default::default()
                }),
                _ => Err(Error::parse(USER_PAGE, format!("teacher header without initials {title:?}"))),
            }
        }
        UserKind::Student => {
            let (name, class_name) = match rest.split_once(", ") {
                Some((name, tail)) => {
                    let class = tail.split(" - ").next().unwrap_or_default().trim();
                    (name, (!class.is_empty()).then(|| s!(class)))
                }
                None => (rest.split(" - ").next().unwrap_or_default(), None),
            };
            Ok(UserDetails { name: s!(name.trim()), class_name, ..Default::default() })
        }
        UserKind::Other => Ok(UserDetails {
            name: s!(rest.split(" - ").next().unwrap_or_default().trim()),
            ..Default::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str) -> String {
        format!(
            r#"<div id="s_m_HeaderContent_MainTitle">{title}</div>
               <img id="s_m_HeaderContent_picctrlthumbimage" src="/lectio/123/GetImage.aspx?pictureid=77" />"#
        )
    }

    #[test]
    fn student_header() {
        let d = parse(&page("Eleven Jens  Hansen, 1x - Skema"), UserKind::Student, &UserLayout::default()).unwrap();
        assert_eq!(d.name, "Jens Hansen");
        assert_eq!(d.class_name.as_deref(), Some("1x"));
        assert_eq!(d.initials, None);
        assert_eq!(d.picture_url.as_deref(), Some("/lectio/123/GetImage.aspx?pictureid=77"));
    }

    #[test]
    fn teacher_header() {
        let d = parse(&page("Læreren abc - Anne Berg - Skema"), UserKind::Teacher, &UserLayout::default()).unwrap();
        assert_eq!(d.name, "Anne Berg");
        assert_eq!(d.initials.as_deref(), Some("abc"));
        assert_eq!(d.class_name, None);
    }

    #[test]
    fn missing_header_is_parse_error() {
        let err = parse("<html></html>", UserKind::Student, &UserLayout::default()).unwrap_err();
        assert!(matches!(err, Error::Parse { page: "SkemaNy.aspx", .. }));
    }

    #[test]
    fn teacher_header_needs_two_parts() {
        let err = parse(&page("Læreren Anne"), UserKind::Teacher, &UserLayout::default()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
