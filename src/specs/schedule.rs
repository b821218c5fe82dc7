// src/specs/schedule.rs
//! Advanced schedule list (`SkemaAvanceret.aspx?type=ShowListAll&...`).
//!
//! The list view is one `table.lf-grid`; every lesson is a class-less `<tr>` whose
//! anchor carries a `data-additionalinfo` tooltip. The tooltip is the ground truth:
//!
//! ```text
//! Ændret!                          optional status line (Aflyst! = cancelled)
//! Fysik forsøg                     optional title
//! 2/9-2024 08:15 til 09:45         time; the end may carry its own date (multi-day)
//! Hold: 1.a Fy                     optional labelled lines, any order
//! Lærer: abc
//! Lokale: 0.015
//!                                  blank separator
//! Lektier: ...                     the rest is extra info
//! ```

use std::collections::VecDeque;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::config::consts::SCHEDULE_PAGE;
use crate::core::html::{self, absolute_url, has_class};
use crate::error::Result;
use crate::models::{Module, ModuleStatus};
use super::Extraction;

#[derive(Debug, Clone)]
pub struct ScheduleLayout {
    /// The list table.
    pub table: &'static str,
    /// Lesson rows inside the table (headers carry a class).
    pub row: &'static str,
    /// Anchor holding the tooltip and the detail link.
    pub anchor: &'static str,
    pub info_attr: &'static str,
    /// Fallback status markers on the anchor when the tooltip has no status line.
    pub cancelled_class: &'static str,
    pub changed_class: &'static str,
}

impl Default for ScheduleLayout {
    fn default() -> Self {
        Self {
            table: "table.lf-grid",
            row: "tr:not([class])",
            anchor: "a[data-additionalinfo]",
            info_attr: "data-additionalinfo",
            cancelled_class: "s2cancelled",
            changed_class: "s2changed",
        }
    }
}

static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})-(\d{4}) (\d{1,2}):(\d{2})$").expect("date-time regex")
});
static TIME_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("time regex"));
static STARTS_WITH_DATE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}-\d{4} \d{1,2}:\d{2}").expect("time line regex"));

/// Lessons in table order. `origin` makes the detail links absolute.
pub fn parse(doc: &str, layout: &ScheduleLayout, origin: &str) -> Result<Extraction<Module>> {
    let dom = Html::parse_document(doc);
    let table_sel = html::selector(SCHEDULE_PAGE, layout.table)?;
    let row_sel = html::selector(SCHEDULE_PAGE, layout.row)?;
    let anchor_sel = html::selector(SCHEDULE_PAGE, layout.anchor)?;

    let table = html::first(&dom, &table_sel)
        .ok_or_else(|| crate::error::Error::parse(SCHEDULE_PAGE, "schedule table not found"))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in table.select(&row_sel) {
        let cells = row.select(sel!("td")).count();
        let anchor = html::first_in(row, &anchor_sel);

        // A lone cell without any link is the "no activities" notice of an empty range.
        if cells <= 1 && row.select(sel!("a")).next().is_none() {
            continue;
        }

        match anchor.and_then(|a| module_from_anchor(a, layout, origin)) {
            Some(m) => records.push(m),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        logd!(page = SCHEDULE_PAGE, skipped, "unrecognised schedule rows");
    }
    Extraction::settle(SCHEDULE_PAGE, "lesson", records, skipped)
}

fn module_from_anchor(a: ElementRef<'_>, layout: &ScheduleLayout, origin: &str) -> Option<Module> {
    let info = a.value().attr(layout.info_attr)?;
    let mut module = parse_additional_info(info)?;

    if module.status == ModuleStatus::Normal {
        if has_class(a, layout.cancelled_class) {
            module.status = ModuleStatus::Cancelled;
        } else if has_class(a, layout.changed_class) {
            module.status = ModuleStatus::Changed;
        }
    }
    module.url = a.value().attr("href").filter(|h| !h.is_empty()).map(|h| absolute_url(origin, h));
    Some(module)
}

/// One tooltip to a module. `None` when there is no recognisable time line.
pub fn parse_additional_info(info: &str) -> Option<Module> {
    let mut lines: VecDeque<&str> = info.lines().map(str::trim).collect();

    // Status
    let status = match lines.front().copied() {
        Some("Ændret!") => { lines.pop_front(); ModuleStatus::Changed }
        Some("Aflyst!") => { lines.pop_front(); ModuleStatus::Cancelled }
        _ => ModuleStatus::Normal,
    };

    // Title: anything that is not already the time line
    let mut title = None;
    if let Some(first) = lines.front() {
        if !STARTS_WITH_DATE_TIME.is_match(first) {
            title = Some(s!(*first)).filter(|t| !t.is_empty());
            lines.pop_front();
        }
    }

    let (start, end) = parse_time_line(lines.pop_front()?)?;

    // Labelled lines
    let (mut subject, mut teacher, mut room) = (None, None, None);
    while let Some(line) = lines.front() {
        let value = |prefix: &str| line.strip_prefix(prefix).map(|v| s!(v.trim()));
        if let Some(v) = value("Hold:") {
            subject = Some(v);
        } else if let Some(v) = value("Lærere:").or_else(|| value("Lærer:")) {
            teacher = Some(v);
        } else if let Some(v) = value("Lokaler:").or_else(|| value("Lokale:")) {
            room = Some(v);
        } else {
            break;
        }
        lines.pop_front();
    }

    // Everything after the blank separator
    while lines.front().is_some_and(|l| l.is_empty()) {
        lines.pop_front();
    }
    let extra = lines.into_iter().collect::<Vec<_>>().join("\n");
    let extra_info = Some(s!(extra.trim())).filter(|e| !e.is_empty());

    Some(Module { title, subject, teacher, room, extra_info, start, end, status, url: None })
}

/// `2/9-2024 08:15 til 09:45` or `2/9-2024 08:15 til 3/9-2024 10:00`.
fn parse_time_line(line: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let (from, to) = line.split_once(" til ")?;
    let start = parse_date_time(from.trim())?;
    let to = to.trim();
    let end = match TIME_ONLY.captures(to) {
        Some(c) => start.date().and_hms_opt(c[1].parse().ok()?, c[2].parse().ok()?, 0)?,
        None => parse_date_time(to)?,
    };
    Some((start, end))
}

/// Portal format `d/m-YYYY HH:MM`.
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let c = DATE_TIME.captures(s)?;
    let date = NaiveDate::from_ymd_opt(c[3].parse().ok()?, c[2].parse().ok()?, c[1].parse().ok()?)?;
    date.and_hms_opt(c[4].parse().ok()?, c[5].parse().ok()?, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const ORIGIN: &str = "https://www.lectio.dk";

    fn dt(d: u32, m: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    fn table(rows: &str) -> String {
        format!(
            r#"<html><body><table class="list texttop lf-grid">
                 <tr class="noprint"><th>Tid</th><th>Aktivitet</th></tr>
                 {rows}
               </table></body></html>"#
        )
    }

    fn row(info: &str, class: &str) -> String {
        format!(
            r#"<tr><td>x</td><td><a class="s2skemabrik {class}" href="/lectio/123/aktivitet/aktivitetforside2.aspx?absid=1" data-additionalinfo="{info}">m</a></td></tr>"#
        )
    }

    #[test]
    fn tooltip_with_everything() {
        let info = "Ændret!\nFysik forsøg\n2/9-2024 08:15 til 09:45\nHold: 1.a Fy\nLærere: abc, def\nLokale: 0.015\n\nLektier:\nSide 12-14";
        let m = parse_additional_info(info).unwrap();
        assert_eq!(m.status, ModuleStatus::Changed);
        assert_eq!(m.title.as_deref(), Some("Fysik forsøg"));
        assert_eq!((m.start, m.end), (dt(2, 9, 8, 15), dt(2, 9, 9, 45)));
        assert_eq!(m.subject.as_deref(), Some("1.a Fy"));
        assert_eq!(m.teachers(), vec!["abc", "def"]);
        assert_eq!(m.room.as_deref(), Some("0.015"));
        assert_eq!(m.extra_info.as_deref(), Some("Lektier:\nSide 12-14"));
    }

    #[test]
    fn tooltip_minimal_and_multi_day() {
        let m = parse_additional_info("Aflyst!\n30/9-2024 23:00 til 1/10-2024 01:30\nHold: Studietur").unwrap();
        assert_eq!(m.status, ModuleStatus::Cancelled);
        assert_eq!(m.title, None);
        assert_eq!((m.start, m.end), (dt(30, 9, 23, 0), dt(1, 10, 1, 30)));
        assert_eq!(m.teacher, None);
        assert_eq!(m.extra_info, None);
    }

    #[test]
    fn tooltip_without_time_is_rejected() {
        assert!(parse_additional_info("Hold: 1.a Da").is_none());
        assert!(parse_additional_info("Titel\n32/9-2024 08:00 til 09:00").is_none());
    }

    #[test]
    fn one_module_per_row_in_order() {
        let doc = table(&[
            row("2/9-2024 08:15 til 09:45&#10;Hold: 1.a Da", ""),
            row("2/9-2024 10:00 til 11:30&#10;Hold: 1.a Ma", "s2cancelled"),
            row("3/9-2024 08:15 til 09:45&#10;Hold: 1.a En", ""),
        ].concat());
        let out = parse(&doc, &ScheduleLayout::default(), ORIGIN).unwrap();
        assert_eq!(out.skipped, 0);
        let subjects: Vec<_> = out.records.iter().map(|m| m.subject.as_deref().unwrap()).collect();
        assert_eq!(subjects, vec!["1.a Da", "1.a Ma", "1.a En"]);
        assert_eq!(out.records[1].status, ModuleStatus::Cancelled);
        assert_eq!(
            out.records[0].url.as_deref(),
            Some("https://www.lectio.dk/lectio/123/aktivitet/aktivitetforside2.aspx?absid=1")
        );
    }

    #[test]
    fn reparse_is_idempotent() {
        let doc = table(&row("2/9-2024 08:15 til 09:45&#10;Hold: 1.a Da&#10;Lokale: 12", ""));
        let a = parse(&doc, &ScheduleLayout::default(), ORIGIN).unwrap();
        let b = parse(&doc, &ScheduleLayout::default(), ORIGIN).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_day_is_empty_not_error() {
        let out = parse(&table(""), &ScheduleLayout::default(), ORIGIN).unwrap();
        assert!(out.records.is_empty());

        let notice = table(r#"<tr><td colspan="5">Ingen aktiviteter</td></tr>"#);
        let out = parse(&notice, &ScheduleLayout::default(), ORIGIN).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.skipped, 0);
    }

    #[test]
    fn bad_rows_are_skipped_and_counted() {
        let doc = table(&[
            row("2/9-2024 08:15 til 09:45", ""),
            row("no time here", ""),
        ].concat());
        let out = parse(&doc, &ScheduleLayout::default(), ORIGIN).unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn unexpected_layout_is_parse_error() {
        // rows present, tooltip attribute renamed
        let doc = table(r#"<tr><td>8:15</td><td><a data-tooltip="2/9-2024 08:15 til 09:45">Da</a></td></tr>"#);
        let err = parse(&doc, &ScheduleLayout::default(), ORIGIN).unwrap_err();
        assert!(matches!(err, Error::Parse { page: "SkemaAvanceret.aspx", .. }));

        // single-cell rows whose link lost its tooltip
        let lone = r#"<tr><td><a data-tooltip="2/9-2024 08:15 til 09:45">Da</a></td></tr>"#;
        let err = parse(&table(&lone.repeat(2)), &ScheduleLayout::default(), ORIGIN).unwrap_err();
        assert!(matches!(err, Error::Parse { page: "SkemaAvanceret.aspx", .. }));

        // table gone
        let err = parse("<html><body><div>Skema</div></body></html>", &ScheduleLayout::default(), ORIGIN).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
