use std::sync::Arc;

use tokio::sync::watch;

use crate::event::RouterEvent;
use crate::host::{LocationSource, NavigateOptions, Router, TenantProvider};
use crate::nav::breadcrumbs::{self, BreadcrumbItem};
use crate::nav::context::{self, LogicalParent, NavigationContext};
use crate::nav::history::{HistoryTracker, DEFAULT_HISTORY_LIMIT};
use crate::nav::index::TreeIndex;
use crate::nav::tenant;

/// Ties the tree index, the history log and the host collaborators together.
///
/// History is the only state carried between navigations; every query is
/// recomputed from it and the current location.
pub struct NavigationTreeService {
    index: TreeIndex,
    history: HistoryTracker,
    router: Arc<dyn Router>,
    tenants: Arc<dyn TenantProvider>,
    location: Arc<dyn LocationSource>,
    breadcrumbs_tx: watch::Sender<Vec<BreadcrumbItem>>,
}

impl NavigationTreeService {
    pub fn new(
        index: TreeIndex,
        router: Arc<dyn Router>,
        tenants: Arc<dyn TenantProvider>,
        location: Arc<dyn LocationSource>,
    ) -> Self {
        let (breadcrumbs_tx, _) = watch::channel(Vec::new());
        Self {
            index,
            history: HistoryTracker::new(DEFAULT_HISTORY_LIMIT),
            router,
            tenants,
            location,
            breadcrumbs_tx,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = HistoryTracker::new(limit);
        self
    }

    pub fn handle_event(&mut self, event: RouterEvent) {
        match event {
            RouterEvent::NavigationEnd { url } => self.record_navigation(&url),
        }
    }

    pub fn record_navigation(&mut self, url: &str) {
        let path = tenant::strip_tenant_prefix(url);
        if self.history.record(&path) {
            tracing::debug!("history: recorded {} ({} entries)", path, self.history.len());
        }
        self.breadcrumbs_tx
            .send_replace(breadcrumbs::build(url, &self.index, true));
    }

    pub fn navigation_context(&self) -> NavigationContext {
        context::resolve(&self.location.current_path(), &self.history, &self.index)
    }

    pub fn logical_parent(&self) -> LogicalParent {
        context::logical_parent(&self.navigation_context())
    }

    pub fn is_hyperjumped(&self) -> bool {
        self.navigation_context().is_hyperjumped
    }

    /// Go to the logical parent. With `replace`, the current page is dropped
    /// from the browser history.
    pub fn navigate_up(&self, replace: bool) -> bool {
        let parent = self.logical_parent();
        let options = if replace {
            NavigateOptions::replace()
        } else {
            NavigateOptions::push()
        };
        self.navigate(&parent.path, options)
    }

    /// Follow a link to an already tenant-qualified URL.
    pub fn navigate_to(&self, url: &str) -> bool {
        self.dispatch(url, NavigateOptions::push())
    }

    /// Go where the user actually came from, or up when there is no such page.
    pub fn navigate_back(&self) -> bool {
        match self.history.previous() {
            Some(previous) => self.navigate(&previous.path, NavigateOptions::push()),
            None => self.navigate_up(false),
        }
    }

    /// Leave the current page. Add, edit and delete pages are replaced so
    /// "back" cannot return to them.
    pub fn navigate_cancel(&self) -> bool {
        let transient = self
            .navigation_context()
            .current_node
            .and_then(|node| node.nav_type)
            .is_some_and(|nav_type| nav_type.is_transient());
        self.navigate_up(transient)
    }

    pub fn breadcrumbs(&self, include_home: bool) -> Vec<BreadcrumbItem> {
        breadcrumbs::build(&self.location.current_path(), &self.index, include_home)
    }

    /// Trail (home included) republished after every recorded navigation.
    pub fn subscribe_breadcrumbs(&self) -> watch::Receiver<Vec<BreadcrumbItem>> {
        self.breadcrumbs_tx.subscribe()
    }

    pub fn current_path_without_account(&self) -> String {
        tenant::strip_tenant_prefix(&self.location.current_path())
    }

    /// Tenant-aware URL for a stripped path.
    pub fn build_url(&self, path: &str) -> String {
        tenant::build_url(
            path,
            &self.tenants.current_tenant_id(),
            &self.location.current_path(),
        )
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    fn navigate(&self, path: &str, options: NavigateOptions) -> bool {
        self.dispatch(&self.build_url(path), options)
    }

    fn dispatch(&self, url: &str, options: NavigateOptions) -> bool {
        tracing::debug!("navigate to {} (replace: {})", url, options.replace);
        match self.router.navigate(url, options) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("navigation to {} failed: {}", url, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryBrowser, RouterError, RouterResult};
    use crate::nav::node::NavType;
    use crate::nav::tree::{default_tree, HUB_PATH};
    use tokio::sync::mpsc;

    fn service_at(location: &str) -> (NavigationTreeService, Arc<MemoryBrowser>, mpsc::UnboundedReceiver<RouterEvent>) {
        let (browser, rx) = MemoryBrowser::new("acme", location);
        let browser = Arc::new(browser);
        let index = TreeIndex::build(&default_tree()).expect("build index");
        let mut service =
            NavigationTreeService::new(index, browser.clone(), browser.clone(), browser.clone());
        service.record_navigation(location);
        (service, browser, rx)
    }

    fn drain(service: &mut NavigationTreeService, rx: &mut mpsc::UnboundedReceiver<RouterEvent>) {
        while let Ok(event) = rx.try_recv() {
            service.handle_event(event);
        }
    }

    fn go(
        service: &mut NavigationTreeService,
        browser: &MemoryBrowser,
        rx: &mut mpsc::UnboundedReceiver<RouterEvent>,
        url: &str,
    ) {
        browser.navigate(url, NavigateOptions::push()).expect("navigate");
        drain(service, rx);
    }

    #[test]
    fn edit_page_parent_is_the_record() {
        let (service, _browser, _rx) = service_at("/acme/apps/system/access/embargos/emb_001/edit");

        let parent = service.logical_parent();
        assert_eq!(parent.path, "apps/system/access/embargos/emb_001");
        assert_eq!(parent.nav_type, Some(NavType::Read));
    }

    #[test]
    fn arriving_from_elsewhere_is_a_hyperjump() {
        let (mut service, browser, mut rx) = service_at("/acme/apps/spike");
        go(&mut service, &browser, &mut rx, "/acme/apps/system/access/embargos/emb_001");

        let context = service.navigation_context();
        assert_eq!(context.historical_previous.as_deref(), Some("apps/spike"));
        assert_eq!(context.parent_path.as_deref(), Some("apps/system/access/embargos"));
        assert!(service.is_hyperjumped());
    }

    #[test]
    fn drilling_down_is_not_a_hyperjump() {
        let (mut service, browser, mut rx) = service_at("/acme/apps/system/access/embargos");
        go(&mut service, &browser, &mut rx, "/acme/apps/system/access/embargos/emb_001");

        assert!(!service.is_hyperjumped());
    }

    #[test]
    fn unknown_single_segment_resolves_to_hub() {
        let (service, _browser, _rx) = service_at("/acme/star-systems");
        assert_eq!(service.logical_parent(), LogicalParent::hub());
    }

    #[test]
    fn navigate_up_keeps_tenant_prefix() {
        let (mut service, browser, mut rx) = service_at("/acme/apps/system/access/embargos/emb_001");

        assert!(service.navigate_up(false));
        drain(&mut service, &mut rx);

        assert_eq!(browser.current_path(), "/acme/apps/system/access/embargos");
        assert_eq!(service.current_path_without_account(), "apps/system/access/embargos");
        assert_eq!(service.history().len(), 2);
    }

    #[test]
    fn navigate_up_without_tenant_prefix() {
        let (service, browser, _rx) = service_at("/apps/system/access/embargos");

        assert!(service.navigate_up(false));
        assert_eq!(browser.current_path(), "/apps/system/access");
    }

    #[test]
    fn cancel_replaces_edit_pages() {
        let (mut service, browser, mut rx) = service_at("/acme/apps/system/access/embargos/emb_001");
        go(&mut service, &browser, &mut rx, "/acme/apps/system/access/embargos/emb_001/edit");

        assert!(service.navigate_cancel());
        drain(&mut service, &mut rx);

        assert_eq!(
            browser.snapshot().entries,
            vec![
                "/acme/apps/system/access/embargos/emb_001",
                "/acme/apps/system/access/embargos/emb_001",
            ]
        );
    }

    #[test]
    fn cancel_pushes_from_read_pages() {
        let (service, browser, _rx) = service_at("/acme/apps/system/access/embargos/emb_001");

        assert!(service.navigate_cancel());
        assert_eq!(browser.snapshot().entries.len(), 2);
        assert_eq!(browser.current_path(), "/acme/apps/system/access/embargos");
    }

    #[test]
    fn navigate_to_uses_the_url_as_given() {
        let (mut service, _browser, mut rx) = service_at("/acme/apps/spike");

        assert!(service.navigate_to("/globex/apps/system/access"));
        drain(&mut service, &mut rx);

        assert_eq!(service.current_path_without_account(), "apps/system/access");
        assert_eq!(
            service.history().current().map(|entry| entry.path.as_str()),
            Some("apps/system/access")
        );
        assert!(!service.navigate_to("apps/relative"));
    }

    #[test]
    fn back_returns_to_historical_previous() {
        let (mut service, browser, mut rx) = service_at("/acme/apps/spike");
        go(&mut service, &browser, &mut rx, "/acme/apps/system/access/embargos/emb_001");

        assert!(service.navigate_back());
        assert_eq!(browser.current_path(), "/acme/apps/spike");
    }

    #[test]
    fn back_without_history_goes_up() {
        let (service, browser, _rx) = service_at("/acme/apps/system/access/roles");

        assert!(service.navigate_back());
        assert_eq!(browser.current_path(), "/acme/apps/system/access");
    }

    #[test]
    fn back_to_hub_when_nothing_is_known() {
        let (service, browser, _rx) = service_at("/acme/star-systems");

        assert!(service.navigate_back());
        assert_eq!(browser.current_path(), format!("/acme/{}", HUB_PATH));
    }

    struct RejectingRouter;

    impl Router for RejectingRouter {
        fn navigate(&self, _url: &str, _options: NavigateOptions) -> RouterResult<()> {
            Err(RouterError::Rejected("guard".to_string()))
        }
    }

    #[test]
    fn router_failure_reports_false() {
        let (browser, _rx) = MemoryBrowser::new("acme", "/acme/apps/spike");
        let browser = Arc::new(browser);
        let index = TreeIndex::build(&default_tree()).expect("build index");
        let service =
            NavigationTreeService::new(index, Arc::new(RejectingRouter), browser.clone(), browser);

        assert!(!service.navigate_up(false));
        assert!(!service.navigate_back());
    }

    #[test]
    fn history_limit_is_applied() {
        let (browser, _rx) = MemoryBrowser::new("acme", "/");
        let browser = Arc::new(browser);
        let index = TreeIndex::build(&default_tree()).expect("build index");
        let mut service =
            NavigationTreeService::new(index, browser.clone(), browser.clone(), browser)
                .with_history_limit(3);

        for i in 0..5 {
            service.record_navigation(&format!("/acme/apps/page-{}", i));
        }
        assert_eq!(service.history().len(), 3);
    }

    #[tokio::test]
    async fn breadcrumbs_are_pushed_on_navigation() {
        let (mut service, browser, mut rx) = service_at("/acme/apps/system/access");
        let mut crumbs = service.subscribe_breadcrumbs();

        go(&mut service, &browser, &mut rx, "/acme/apps/system/access/users");

        crumbs.changed().await.expect("breadcrumbs published");
        let trail = crumbs.borrow_and_update().clone();
        let labels: Vec<&str> = trail.iter().map(|item| item.label.as_str()).collect();
        assert_eq!(labels, vec!["Hub", "System", "Access Control", "Users"]);
        assert_eq!(trail, service.breadcrumbs(true));
    }
}
