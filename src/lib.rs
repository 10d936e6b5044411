pub mod api;
pub mod config;
pub mod error;
pub mod navigation;
pub mod notify;
pub mod sections;
pub mod session;

pub use error::{Error, Result};
