use serde::Serialize;

use super::index::TreeIndex;
use super::tenant::strip_tenant_prefix;
use super::tree::{HUB_ICON, HUB_LABEL_DEFAULT, HUB_LABEL_KEY, HUB_PATH};

/// Leading segments that are containers, never pages of their own.
pub const SKIPPED_LEADING_SEGMENTS: &[&str] = &["apps", "system", "auth", "errors", "pages", "dev"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    pub label: String,
    pub label_key: Option<String>,
    pub path: String,
    pub icon: Option<String>,
    pub active: bool,
}

impl BreadcrumbItem {
    fn home() -> Self {
        Self {
            label: HUB_LABEL_DEFAULT.to_string(),
            label_key: Some(HUB_LABEL_KEY.to_string()),
            path: HUB_PATH.to_string(),
            icon: Some(HUB_ICON.to_string()),
            active: false,
        }
    }
}

pub fn build(current_raw_path: &str, index: &TreeIndex, include_home: bool) -> Vec<BreadcrumbItem> {
    let mut items = Vec::new();
    if include_home {
        items.push(BreadcrumbItem::home());
    }

    let current_path = strip_tenant_prefix(current_raw_path);
    let segments = current_path
        .split('/')
        .filter(|segment| !segment.is_empty() && !segment.starts_with(':'));

    let mut accumulated_path = String::new();
    for (i, segment) in segments.enumerate() {
        if !accumulated_path.is_empty() {
            accumulated_path.push('/');
        }
        accumulated_path.push_str(segment);

        if i == 0 && SKIPPED_LEADING_SEGMENTS.contains(&segment) {
            continue;
        }

        let item = match index.find_node_for_path(&accumulated_path) {
            Some(entry) => BreadcrumbItem {
                label: entry.node.label_default.clone(),
                label_key: Some(entry.node.label_key.clone()),
                path: accumulated_path.clone(),
                icon: entry.node.icon.clone(),
                active: false,
            },
            None => BreadcrumbItem {
                label: format_segment(segment),
                label_key: None,
                path: accumulated_path.clone(),
                icon: None,
                active: false,
            },
        };
        items.push(item);
    }

    if let Some(last) = items.last_mut() {
        last.active = true;
    }
    items
}

/// `star-systems` -> `Star Systems`.
pub fn format_segment(segment: &str) -> String {
    segment
        .split(|c: char| c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::tree::default_tree;

    fn labels(items: &[BreadcrumbItem]) -> Vec<&str> {
        items.iter().map(|item| item.label.as_str()).collect()
    }

    #[test]
    fn formats_unregistered_segments() {
        assert_eq!(format_segment("star-systems"), "Star Systems");
        assert_eq!(format_segment("audit_log"), "Audit Log");
        assert_eq!(format_segment("emb_001"), "Emb 001");
    }

    #[test]
    fn trail_uses_tree_labels_and_skips_containers() {
        let index = TreeIndex::build(&default_tree()).expect("build index");
        let items = build("/acme/apps/system/access/embargos/emb_001/edit", &index, true);

        assert_eq!(
            labels(&items),
            vec!["Hub", "System", "Access Control", "Embargos", "Embargo", "Edit"]
        );
        assert_eq!(items[3].path, "apps/system/access/embargos");
        assert_eq!(items[3].label_key.as_deref(), Some("navigation.embargos"));
        assert_eq!(items[1].label_key, None);
        assert!(items.last().is_some_and(|item| item.active));
        assert_eq!(items.iter().filter(|item| item.active).count(), 1);
    }

    #[test]
    fn unknown_pages_get_formatted_labels() {
        let index = TreeIndex::build(&default_tree()).expect("build index");
        let items = build("/acme/star-systems", &index, false);

        assert_eq!(labels(&items), vec!["Star Systems"]);
        assert!(items[0].active);
    }

    #[test]
    fn home_alone_is_active() {
        let index = TreeIndex::build(&default_tree()).expect("build index");
        let items = build("/apps", &index, true);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, HUB_PATH);
        assert!(items[0].active);
    }

    #[test]
    fn placeholder_text_is_ignored() {
        let index = TreeIndex::build(&default_tree()).expect("build index");
        let items = build("/dashboards/:id", &index, false);

        assert_eq!(labels(&items), vec!["Dashboards"]);
    }
}
