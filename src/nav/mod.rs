pub mod breadcrumbs;
pub mod context;
pub mod history;
pub mod index;
pub mod node;
pub mod query;
pub mod tenant;
pub mod tree;

pub use breadcrumbs::BreadcrumbItem;
pub use context::{LogicalParent, NavigationContext};
pub use history::{HistoryEntry, HistoryTracker};
pub use index::{IndexedNode, TreeIndex, TreeIndexEntry};
pub use node::{NavType, NavigationNode, NodeDef};
pub use query::{
    build_browse_params, clear_params, filter_param, page_params, sort_params, BrowseState,
    ParamUpdate, SortOrder,
};
