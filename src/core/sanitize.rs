// src/core/sanitize.rs

/// Collapse runs of whitespace (including `&nbsp;` once decoded) into single spaces.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() || ch == '\u{a0}' {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Danish number text to `f64`: `"12,5"`, `" 3 "`, `"1.234,5"`.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let t = normalize_ws(s).replace(' ', "");
    if t.is_empty() { return None; }
    let t = if t.contains(',') { t.replace('.', "").replace(',', ".") } else { t };
    t.parse().ok()
}

/// `"12,5%"` → `12.5`. None when there is no percent sign.
pub fn parse_percentage(s: &str) -> Option<f64> {
    let t = normalize_ws(s);
    let body = t.strip_suffix('%')?;
    parse_decimal(body)
}

/// `"3/24"` → `(3.0, 24.0)`.
pub fn parse_fraction(s: &str) -> Option<(f64, f64)> {
    let t = normalize_ws(s);
    let (a, b) = t.split_once('/')?;
    Some((parse_decimal(a)?, parse_decimal(b)?))
}

/// Trailing digits after `key=` in a query string: `("...?elevid=42", "elevid")` → 42.
pub fn query_number(s: &str, key: &str) -> Option<u32> {
    let needle = format!("{key}=");
    let at = s.find(&needle)? + needle.len();
    let digits: String = s[at..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
