use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, NavResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavType {
    Hub,
    Browse,
    Read,
    Add,
    Edit,
    Delete,
}

impl NavType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hub => "hub",
            Self::Browse => "browse",
            Self::Read => "read",
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }

    /// Pages that should not stay reachable through "back" once the user leaves them.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Add | Self::Edit | Self::Delete)
    }
}

impl std::fmt::Display for NavType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One logical location class in the console hierarchy.
///
/// Nodes are immutable once built; full paths live in the index side-table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationNode {
    #[serde(default)]
    pub path_segment: String,
    pub label_key: String,
    pub label_default: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub nav_type: Option<NavType>,
    #[serde(default)]
    pub children: Vec<NavigationNode>,
}

impl NavigationNode {
    pub fn new(
        path_segment: impl Into<String>,
        label_key: impl Into<String>,
        label_default: impl Into<String>,
    ) -> Self {
        Self {
            path_segment: path_segment.into(),
            label_key: label_key.into(),
            label_default: label_default.into(),
            icon: None,
            nav_type: None,
            children: vec![],
        }
    }

    pub fn with_nav_type(mut self, nav_type: NavType) -> Self {
        self.nav_type = Some(nav_type);
        self
    }

    pub fn with_children(mut self, children: Vec<NavigationNode>) -> Self {
        self.children = children;
        self
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(NavigationNode::count).sum::<usize>()
    }

    pub fn from_toml_file(path: &Path) -> NavResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| NavError::TreeFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| NavError::TreeParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Static authoring form of a node, used for trees compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct NodeDef {
    pub segment: &'static str,
    pub label_key: &'static str,
    pub label_default: &'static str,
    pub icon: Option<&'static str>,
    pub nav_type: Option<NavType>,
    pub children: &'static [NodeDef],
}

impl From<&NodeDef> for NavigationNode {
    fn from(def: &NodeDef) -> Self {
        Self {
            path_segment: def.segment.to_string(),
            label_key: def.label_key.to_string(),
            label_default: def.label_default.to_string(),
            icon: def.icon.map(str::to_string),
            nav_type: def.nav_type,
            children: def.children.iter().map(NavigationNode::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tree_from_toml() {
        let tree = NavigationNode::from_toml_str(
            r#"
            label_key = "nav.root"
            label_default = "Root"

            [[children]]
            path_segment = "apps/system/access"
            label_key = "nav.access"
            label_default = "Access"
            nav_type = "hub"

            [[children.children]]
            path_segment = "embargos"
            label_key = "nav.embargos"
            label_default = "Embargos"
            icon = "block"
            nav_type = "browse"
            "#,
        )
        .expect("parse tree");

        assert_eq!(tree.path_segment, "");
        assert_eq!(tree.count(), 3);
        let embargos = &tree.children[0].children[0];
        assert_eq!(embargos.nav_type, Some(NavType::Browse));
        assert_eq!(embargos.icon.as_deref(), Some("block"));
    }

    #[test]
    fn transient_nav_types() {
        assert!(NavType::Edit.is_transient());
        assert!(NavType::Add.is_transient());
        assert!(NavType::Delete.is_transient());
        assert!(!NavType::Read.is_transient());
        assert!(!NavType::Hub.is_transient());
    }
}
