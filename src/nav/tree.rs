use super::node::{NavType, NavigationNode, NodeDef};

pub const HUB_PATH: &str = "apps/system/hub";
pub const HUB_LABEL_KEY: &str = "navigation.hub";
pub const HUB_LABEL_DEFAULT: &str = "Hub";
pub const HUB_ICON: &str = "home";

macro_rules! node {
    ($segment:expr, $key:expr, $label:expr, $icon:expr, $nav_type:ident, $children:expr $(,)?) => {
        NodeDef {
            segment: $segment,
            label_key: $key,
            label_default: $label,
            icon: $icon,
            nav_type: Some(NavType::$nav_type),
            children: $children,
        }
    };
}

static ROOT: NodeDef = NodeDef {
    segment: "",
    label_key: "navigation.root",
    label_default: "Console",
    icon: None,
    nav_type: None,
    children: &[
        node!(HUB_PATH, HUB_LABEL_KEY, HUB_LABEL_DEFAULT, Some(HUB_ICON), Hub, &[]),
        node!(
            "apps/system/access",
            "navigation.access",
            "Access Control",
            Some("shield"),
            Hub,
            ACCESS,
        ),
        node!(
            "apps/system/settings",
            "navigation.settings",
            "Settings",
            Some("settings"),
            Hub,
            SETTINGS,
        ),
        node!(
            "apps/spike",
            "navigation.spike",
            "Spike",
            Some("science"),
            Hub,
            &[],
        ),
        node!(
            "dashboards",
            "navigation.dashboards",
            "Dashboards",
            Some("dashboard"),
            Browse,
            &[node!(
                ":id",
                "navigation.dashboard",
                "Dashboard",
                None,
                Read,
                &[],
            )],
        ),
    ],
};

const ACCESS: &[NodeDef] = &[
    node!(
        "embargos",
        "navigation.embargos",
        "Embargos",
        Some("block"),
        Browse,
        &[
            node!("new", "navigation.embargo_new", "New Embargo", Some("add"), Add, &[]),
            node!(
                ":id",
                "navigation.embargo",
                "Embargo",
                None,
                Read,
                &[
                    node!("edit", "navigation.edit", "Edit", Some("edit"), Edit, &[]),
                    node!("delete", "navigation.delete", "Delete", Some("delete"), Delete, &[]),
                ],
            ),
        ],
    ),
    node!(
        "users",
        "navigation.users",
        "Users",
        Some("people"),
        Browse,
        &[
            node!("invite", "navigation.user_invite", "Invite User", Some("person_add"), Add, &[]),
            node!(
                ":id",
                "navigation.user",
                "User",
                None,
                Read,
                &[node!("edit", "navigation.edit", "Edit", Some("edit"), Edit, &[])],
            ),
        ],
    ),
    node!(
        "roles",
        "navigation.roles",
        "Roles",
        Some("badge"),
        Browse,
        &[node!(":id", "navigation.role", "Role", None, Read, &[])],
    ),
];

const SETTINGS: &[NodeDef] = &[
    node!("theme", "navigation.theme", "Theme", Some("palette"), Edit, &[]),
    node!("account", "navigation.account", "Account", Some("business"), Edit, &[]),
    node!(
        "integrations",
        "navigation.integrations",
        "Integrations",
        Some("extension"),
        Browse,
        &[node!(
            ":id",
            "navigation.integration",
            "Integration",
            None,
            Read,
            &[],
        )],
    ),
];

/// The console's built-in hierarchy.
pub fn default_tree() -> NavigationNode {
    NavigationNode::from(&ROOT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tree_is_anchored_at_virtual_root() {
        let tree = default_tree();
        assert!(tree.path_segment.is_empty());
        assert!(tree.children.iter().any(|child| child.path_segment == HUB_PATH));
        assert!(tree.count() > 20);
    }
}
