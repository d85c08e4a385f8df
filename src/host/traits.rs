use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("navigation rejected: {0}")]
    Rejected(String),
    #[error("router unavailable")]
    Unavailable,
}

pub type RouterResult<T> = Result<T, RouterError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    pub fn push() -> Self {
        Self { replace: false }
    }

    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// The application router. Emits "navigation completed" events elsewhere.
pub trait Router: Send + Sync {
    fn navigate(&self, url: &str, options: NavigateOptions) -> RouterResult<()>;
}

pub trait TenantProvider: Send + Sync {
    fn current_tenant_id(&self) -> String;
}

/// Read-only snapshot of the browser's current path.
pub trait LocationSource: Send + Sync {
    fn current_path(&self) -> String;
}
