use serde::Serialize;

use super::breadcrumbs::format_segment;
use super::history::HistoryTracker;
use super::index::{materialize, normalize, IndexedNode, TreeIndex};
use super::node::NavType;
use super::tenant::strip_tenant_prefix;
use super::tree::{HUB_LABEL_DEFAULT, HUB_LABEL_KEY, HUB_PATH};

/// Where the user is, where they logically belong, and where they actually came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationContext {
    pub current_path: String,
    pub current_node: Option<IndexedNode>,
    pub parent_node: Option<IndexedNode>,
    pub parent_path: Option<String>,
    pub parent_label_key: Option<String>,
    pub parent_label_default: Option<String>,
    pub historical_previous: Option<String>,
    pub is_hyperjumped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogicalParent {
    pub path: String,
    pub label_key: Option<String>,
    pub label_default: String,
    pub nav_type: Option<NavType>,
}

impl LogicalParent {
    pub fn hub() -> Self {
        Self {
            path: HUB_PATH.to_string(),
            label_key: Some(HUB_LABEL_KEY.to_string()),
            label_default: HUB_LABEL_DEFAULT.to_string(),
            nav_type: Some(NavType::Hub),
        }
    }
}

pub fn resolve(current_raw_path: &str, history: &HistoryTracker, index: &TreeIndex) -> NavigationContext {
    let current_path = strip_tenant_prefix(current_raw_path);
    let entry = index.find_node_for_path(&current_path);

    let (parent_path, parent_node) = match entry {
        Some(entry) => match entry.parent {
            Some(parent) => (
                Some(materialize(&parent.full_path, &current_path)),
                Some(parent.clone()),
            ),
            None => {
                let parent_path = truncate_last_segment(&current_path);
                let parent_node = parent_path
                    .as_deref()
                    .and_then(|path| index.find_node_for_path(path))
                    .map(|found| found.node.clone());
                (parent_path, parent_node)
            }
        },
        None => (None, None),
    };

    let historical_previous = history.previous().map(|entry| entry.path.clone());
    let is_hyperjumped = check_hyperjump(historical_previous.as_deref(), parent_path.as_deref());

    tracing::debug!(
        "resolved {} -> parent {:?} (previous {:?}, hyperjump {})",
        current_path,
        parent_path,
        historical_previous,
        is_hyperjumped
    );

    NavigationContext {
        current_node: entry.map(|entry| entry.node.clone()),
        parent_label_key: parent_node.as_ref().map(|node| node.label_key.clone()),
        parent_label_default: parent_node.as_ref().map(|node| node.label_default.clone()),
        parent_node,
        parent_path,
        historical_previous,
        is_hyperjumped,
        current_path,
    }
}

/// Parent by path arithmetic, for root-level nodes the tree cannot answer for.
fn truncate_last_segment(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() > 1 {
        Some(segments[..segments.len() - 1].join("/"))
    } else {
        None
    }
}

/// True when the user's actual previous page is neither the logical parent nor
/// one of its ancestors.
pub fn check_hyperjump(historical_previous: Option<&str>, parent_path: Option<&str>) -> bool {
    let (Some(previous), Some(parent)) = (historical_previous, parent_path) else {
        return false;
    };

    let previous = normalize(previous);
    let parent = normalize(parent);
    if previous == parent {
        return false;
    }
    if parent.starts_with(&format!("{}/", previous)) {
        return false;
    }
    true
}

/// The logical parent of `context`, falling back to the hub.
pub fn logical_parent(context: &NavigationContext) -> LogicalParent {
    let Some(path) = context.parent_path.clone() else {
        return LogicalParent::hub();
    };

    match &context.parent_node {
        Some(node) => LogicalParent {
            path,
            label_key: Some(node.label_key.clone()),
            label_default: node.label_default.clone(),
            nav_type: node.nav_type,
        },
        None => {
            let label_default = path.rsplit('/').next().map(format_segment).unwrap_or_default();
            LogicalParent {
                path,
                label_key: None,
                label_default,
                nav_type: None,
            }
        }
    }
}
