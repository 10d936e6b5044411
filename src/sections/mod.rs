pub mod dashboard;
pub mod instructions;
mod panel;
mod router;
pub mod settings;
pub mod subscriptions;
mod types;
pub mod system;
pub mod users;

pub use panel::{Panel, PanelState};
pub use router::{Activation, SectionKind, SectionRouter};
pub use types::*;

use crate::{
    Error, Result,
    api::{ApiClient, Envelope},
    notify::NotificationKind,
};
use async_trait::async_trait;

/// Fetches the data one section shows.
#[async_trait]
pub trait Loader: Send + Sync {
    type Output: Send;

    async fn load(&self, api: &ApiClient) -> Result<Self::Output>;
}

/// Shows a form validation problem and returns it as an error; no request is made.
pub(crate) fn reject(api: &ApiClient, message: &str) -> Error {
    api.notify(message, NotificationKind::Error);
    Error::validation(message)
}

/// Shows the server's confirmation text, if it sent one.
pub(crate) fn announce(api: &ApiClient, envelope: &Envelope) {
    if let Some(message) = envelope.message() {
        api.notify(message, NotificationKind::Success);
    }
}
