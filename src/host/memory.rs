use tokio::sync::{mpsc, watch};

use super::traits::{LocationSource, NavigateOptions, Router, RouterError, RouterResult, TenantProvider};
use crate::event::RouterEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState {
    pub location: String,
    pub entries: Vec<String>,
}

/// A browser stand-in: keeps a session history stack and reports every
/// completed navigation on an event channel, as a real router would.
pub struct MemoryBrowser {
    tenant: String,
    state: watch::Sender<BrowserState>,
    events: mpsc::UnboundedSender<RouterEvent>,
}

impl MemoryBrowser {
    pub fn new(
        tenant: impl Into<String>,
        location: impl Into<String>,
    ) -> (Self, mpsc::UnboundedReceiver<RouterEvent>) {
        let location = location.into();
        let (state, _) = watch::channel(BrowserState {
            location: location.clone(),
            entries: vec![location],
        });
        let (events, rx) = mpsc::unbounded_channel();
        let browser = Self {
            tenant: tenant.into(),
            state,
            events,
        };
        (browser, rx)
    }

    pub fn snapshot(&self) -> BrowserState {
        self.state.borrow().clone()
    }
}

impl Router for MemoryBrowser {
    fn navigate(&self, url: &str, options: NavigateOptions) -> RouterResult<()> {
        if !url.starts_with('/') {
            return Err(RouterError::Rejected(format!("not an absolute path: {}", url)));
        }

        self.state.send_modify(|state| {
            if options.replace {
                state.entries.pop();
            }
            state.entries.push(url.to_string());
            state.location = url.to_string();
        });

        self.events
            .send(RouterEvent::NavigationEnd {
                url: url.to_string(),
            })
            .map_err(|_| RouterError::Unavailable)
    }
}

impl TenantProvider for MemoryBrowser {
    fn current_tenant_id(&self) -> String {
        self.tenant.clone()
    }
}

impl LocationSource for MemoryBrowser {
    fn current_path(&self) -> String {
        self.state.borrow().location.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_replace_update_the_stack() {
        let (browser, mut rx) = MemoryBrowser::new("acme", "/acme/apps/system/hub");

        browser
            .navigate("/acme/apps/system/access", NavigateOptions::push())
            .expect("push");
        browser
            .navigate("/acme/apps/system/access/embargos", NavigateOptions::replace())
            .expect("replace");

        let state = browser.snapshot();
        assert_eq!(
            state.entries,
            vec!["/acme/apps/system/hub", "/acme/apps/system/access/embargos"]
        );
        assert_eq!(browser.current_path(), "/acme/apps/system/access/embargos");

        assert_eq!(
            rx.try_recv().ok(),
            Some(RouterEvent::NavigationEnd {
                url: "/acme/apps/system/access".to_string()
            })
        );
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn relative_urls_are_rejected() {
        let (browser, _rx) = MemoryBrowser::new("acme", "/");
        assert!(matches!(
            browser.navigate("apps/spike", NavigateOptions::push()),
            Err(RouterError::Rejected(_))
        ));
        assert_eq!(browser.snapshot().entries.len(), 1);
    }

    #[test]
    fn closed_event_channel_is_reported() {
        let (browser, rx) = MemoryBrowser::new("acme", "/");
        drop(rx);
        assert!(matches!(
            browser.navigate("/apps/spike", NavigateOptions::push()),
            Err(RouterError::Unavailable)
        ));
    }
}
