//! Tenant (account) prefix handling for concrete console URLs.
//!
//! A URL like `/acme/apps/system/access` carries the tenant `acme` as its first
//! segment. Any first segment that is not a reserved top-level segment is taken
//! to be a tenant id.

/// Top-level segments that can never be a tenant id.
pub const RESERVED_SEGMENTS: &[&str] = &[
    "pages",
    "apps",
    "system",
    "auth",
    "errors",
    "assets",
    "api",
    "dashboards",
    "dev",
    "landing",
    "information",
];

pub fn is_reserved(segment: &str) -> bool {
    RESERVED_SEGMENTS.contains(&segment)
}

/// Drop any `?query` or `#fragment` suffix.
pub fn path_only(raw_url: &str) -> &str {
    let end = raw_url.find(|c: char| c == '?' || c == '#').unwrap_or(raw_url.len());
    &raw_url[..end]
}

fn segments(raw_url: &str) -> Vec<&str> {
    path_only(raw_url)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

pub fn has_tenant_prefix(raw_url: &str) -> bool {
    match segments(raw_url).first() {
        Some(first) => !is_reserved(first),
        None => false,
    }
}

/// Slash-trimmed path with the tenant segment removed.
pub fn strip_tenant_prefix(raw_url: &str) -> String {
    let segments = segments(raw_url);
    let skip = match segments.first() {
        Some(first) if !is_reserved(first) => 1,
        _ => 0,
    };
    segments[skip..].join("/")
}

/// Re-add the tenant prefix to `path` when the current location carries one.
pub fn build_url(path: &str, tenant_id: &str, current_location: &str) -> String {
    let path = path.trim_start_matches('/');
    if has_tenant_prefix(current_location) && !tenant_id.is_empty() {
        if path.is_empty() {
            format!("/{}", tenant_id)
        } else {
            format!("/{}/{}", tenant_id, path)
        }
    } else {
        format!("/{}", path)
    }
}
