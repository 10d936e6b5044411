mod client;
mod types;

pub use client::{ApiClient, fallback_message};
pub use types::{Body, Envelope, Method, Query, Reply, Request};
