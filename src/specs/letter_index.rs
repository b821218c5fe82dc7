// src/specs/letter_index.rs
//! Student index by first letter (`FindSkema.aspx?type=elev&forbogstav=A`).
//! One link per student; the id is the last query value of the href.

use scraper::Html;

use crate::config::consts::LETTER_INDEX_PAGE;
use crate::core::html::{self, text_of};
use crate::error::{Error, Result};
use super::Extraction;

#[derive(Debug, Clone)]
pub struct LetterIndexLayout {
    pub list: &'static str,
}

impl Default for LetterIndexLayout {
    fn default() -> Self {
        Self { list: "ul.ls-columnlist" }
    }
}

/// `(id, name)` pairs in page order.
pub fn parse(doc: &str, layout: &LetterIndexLayout) -> Result<Extraction<(u32, String)>> {
    let dom = Html::parse_document(doc);
    let list_sel = html::selector(LETTER_INDEX_PAGE, layout.list)?;
    let list = html::first(&dom, &list_sel)
        .ok_or_else(|| Error::parse(LETTER_INDEX_PAGE, "student list not found"))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for a in list.select(sel!("li a")) {
        let id = a.value().attr("href")
            .and_then(|h| h.rsplit('=').next())
            .and_then(|v| v.parse::<u32>().ok());
        let name = text_of(a);
        match id {
            Some(id) if !name.is_empty() => records.push((id, name)),
            _ => skipped += 1,
        }
    }
    Extraction::settle(LETTER_INDEX_PAGE, "student", records, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_to_ids() {
        let doc = r#"<ul class="ls-columnlist mod-onechild">
            <li><a href="/lectio/1/SkemaNy.aspx?type=elev&amp;elevid=31">Aase Holm</a></li>
            <li><a href="/lectio/1/SkemaNy.aspx?type=elev&amp;elevid=32">Adam Ny</a></li>
        </ul>"#;
        let out = parse(doc, &LetterIndexLayout::default()).unwrap();
        assert_eq!(out.records, vec![(31, s!("Aase Holm")), (32, s!("Adam Ny"))]);
    }

    #[test]
    fn empty_letter_is_empty() {
        let out = parse(r#"<ul class="ls-columnlist"></ul>"#, &LetterIndexLayout::default()).unwrap();
        assert!(out.records.is_empty());
    }
}
