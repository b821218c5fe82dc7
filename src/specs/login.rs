// src/specs/login.rs
//! Login page: WebForms state to round-trip, and recognising the page when it shows
//! up where another page was expected.

use scraper::Html;

use crate::config::consts::{EVENT_VALIDATION, LOGIN_PAGE, VIEWSTATE_X};
use crate::core::form::FormFields;
use crate::error::{Error, Result};

/// True when the markup carries the username box of the login form.
pub fn is_login_page(doc: &str) -> bool {
    // Cheap pre-check before building a DOM for every fetched page.
    if !doc.contains("m$Content$username") {
        return false;
    }
    let dom = Html::parse_document(doc);
    dom.select(sel!(r#"input[name="m$Content$username"]"#)).next().is_some()
}

/// All postable inputs of the login form.
///
/// Buttons are left out (only sent when clicked), as are unchecked radios and boxes.
pub fn extract_form(doc: &str) -> Result<FormFields> {
    let dom = Html::parse_document(doc);
    let mut fields = Vec::new();

    for input in dom.select(sel!("input")) {
        let name = match input.value().attr("name") {
            Some(n) if !n.is_empty() => n,
            _ => continue,
        };
        let input_type = input.value().attr("type").unwrap_or("text").to_ascii_lowercase();
        if matches!(input_type.as_str(), "submit" | "image" | "button") {
            continue;
        }
        if matches!(input_type.as_str(), "radio" | "checkbox") && input.value().attr("checked").is_none() {
            continue;
        }
        fields.push((s!(name), s!(input.value().attr("value").unwrap_or_default())));
    }

    let form = FormFields(fields);
    for required in [VIEWSTATE_X, EVENT_VALIDATION] {
        if !form.has(required) {
            return Err(Error::parse(LOGIN_PAGE, format!("{required} missing from login form")));
        }
    }
    Ok(form)
}
