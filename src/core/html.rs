// src/core/html.rs
use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};
use super::sanitize::normalize_ws;

/// Compile a layout selector. A bad selector is reported against the page it was meant for.
pub fn selector(page: &'static str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::parse(page, format!("bad selector {css:?}: {e}")))
}

/// Whitespace-normalised text content.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Text content with line breaks kept (one entry per non-empty line).
pub fn lines_of(el: ElementRef<'_>) -> Vec<String> {
    el.text()
        .collect::<String>()
        .lines()
        .map(normalize_ws)
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn first<'a>(doc: &'a Html, sel: &Selector) -> Option<ElementRef<'a>> {
    doc.select(sel).next()
}

pub fn first_in<'a>(el: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    el.select(sel).next()
}

/// Absolute URL for an href found on a page of `origin` (scheme + host, no trailing slash).
pub fn absolute_url(origin: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        s!(href)
    } else if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}
