pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod input;
pub mod nav;
pub mod service;

pub use error::{NavError, NavResult};
pub use service::NavigationTreeService;
