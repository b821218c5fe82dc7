// src/core/form.rs
//
// ASP.NET WebForms postbacks: the hidden fields of the page go back with every POST.

/// Name/value pairs of a page's form inputs, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(pub Vec<(String, String)>);

impl FormFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Clone the fields, set `__EVENTTARGET`, then apply overrides (added when missing).
    pub fn postback(&self, event_target: &str, overrides: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut params = self.0.clone();
        set_or_push(&mut params, "__EVENTTARGET", event_target);
        for &(key, val) in overrides {
            set_or_push(&mut params, key, val);
        }
        params
    }
}

fn set_or_push(params: &mut Vec<(String, String)>, key: &str, val: &str) {
    match params.iter_mut().find(|(n, _)| n == key) {
        Some(existing) => existing.1 = s!(val),
        None => params.push((s!(key), s!(val))),
    }
}
