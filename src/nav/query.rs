//! Query-string builders for browse screens (sorting, filtering, pagination).
//!
//! Builders return a [`ParamUpdate`]: `Some(value)` sets a key, `None` removes it
//! when merged into a URL with [`apply_params`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type ParamUpdate = BTreeMap<String, Option<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort by `field`. Re-clicking the current field flips a known order; anything
/// else sorts descending.
pub fn sort_params(field: &str, current_field: Option<&str>, current_order: Option<SortOrder>) -> ParamUpdate {
    let order = match current_order {
        Some(order) if current_field == Some(field) => order.toggled(),
        _ => SortOrder::Desc,
    };

    let mut params = ParamUpdate::new();
    params.insert(String::from("sort"), Some(field.to_string()));
    params.insert(String::from("order"), Some(order.as_str().to_string()));
    params
}

pub fn filter_param(key: &str, value: Option<&str>) -> ParamUpdate {
    let mut params = ParamUpdate::new();
    params.insert(key.to_string(), value.map(str::to_string));
    params
}

pub fn page_params(page: u32) -> ParamUpdate {
    let mut params = ParamUpdate::new();
    params.insert(String::from("page"), Some(page.to_string()));
    params
}

pub fn clear_params() -> ParamUpdate {
    ["sort", "order", "page"]
        .into_iter()
        .map(|key| (key.to_string(), None))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseState {
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
    pub page: Option<u32>,
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

/// Full parameter set for a browse screen. Page 1 is implied and left out.
pub fn build_browse_params(state: &BrowseState) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    if let Some(sort) = &state.sort {
        params.insert(String::from("sort"), sort.clone());
    }
    if let Some(order) = state.order {
        params.insert(String::from("order"), order.as_str().to_string());
    }
    if let Some(page) = state.page.filter(|page| *page != 1) {
        params.insert(String::from("page"), page.to_string());
    }
    for (key, value) in &state.filters {
        params.insert(key.clone(), value.clone());
    }
    params
}

/// Merge `update` into the query string of `url`.
pub fn apply_params(url: &str, update: &ParamUpdate) -> String {
    let (path, query) = match url.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (url, None),
    };

    let mut params = parse_query(query);
    for (key, value) in update {
        match value {
            Some(value) => {
                params.insert(key.clone(), value.clone());
            }
            None => {
                params.remove(key);
            }
        }
    }

    let query = to_query_string(&params);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

pub fn to_query_string(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn parse_query(query: Option<&str>) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    let Some(query) = query else {
        return params;
    };

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        params.insert(percent_decode(key), percent_decode(value));
    }

    params
}

// Console query values carry free-text filters and ids with spaces, `&` and
// `=`, so everything outside the RFC 3986 unreserved set is escaped. Spaces
// go out as `%20`; `+` is only understood on the way in.
fn percent_encode(input: &str) -> String {
    let mut out = String::new();
    for b in input.as_bytes() {
        match *b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(*b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

fn percent_decode(input: &str) -> String {
    let raw = input.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        match raw[i] {
            b'%' => {
                let decoded = raw
                    .get(i + 1..i + 3)
                    .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match decoded {
                    Some(byte) => {
                        bytes.push(byte);
                        i += 3;
                        continue;
                    }
                    None => bytes.push(b'%'),
                }
            }
            b'+' => bytes.push(b' '),
            b => bytes.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
