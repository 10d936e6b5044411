use crate::{
    Result,
    api::{ApiClient, Query},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const CURRENT_ADMIN_PATH: &str = "/admin/current";
pub const LOGOUT_QUESTION: &str = "Вы уверены, что хотите выйти?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Deserialize)]
struct CurrentAdminResponse {
    admin: CurrentAdmin,
}

/// Yes/no question put to the operator.
pub trait Prompt: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}

impl<F> Prompt for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

/// Probes the session once at start-up. A rejected session has already been
/// sent to the login route when this returns `Err(AuthRequired)`.
pub async fn guard(api: &ApiClient) -> Result<CurrentAdmin> {
    let envelope = match api.get(CURRENT_ADMIN_PATH, Query::new()).await?.into_result() {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("Session check failed, page will not be rendered");
            return Err(e);
        }
    };

    let response: CurrentAdminResponse = envelope.decode_or_notify(api)?;
    info!(
        "Signed in as {} ({})",
        response.admin.name, response.admin.role
    );
    Ok(response.admin)
}

/// Navigates to the logout route once the operator confirms.
pub fn logout(api: &ApiClient, prompt: &dyn Prompt) -> bool {
    if !prompt.confirm(LOGOUT_QUESTION) {
        return false;
    }
    api.navigator().navigate(&api.config().logout_route);
    true
}
