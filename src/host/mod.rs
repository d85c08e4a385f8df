mod memory;
mod traits;

pub use memory::{BrowserState, MemoryBrowser};
pub use traits::{LocationSource, NavigateOptions, Router, RouterError, RouterResult, TenantProvider};
