use super::{Loader, SystemHealth};
use crate::{
    Error, Result,
    api::{ApiClient, Query},
    notify::NotificationKind,
};
use async_trait::async_trait;
use tracing::{debug, warn};

pub const HEALTH_PATH: &str = "/system/health";
pub const TEST_DB_PATH: &str = "/test-db";

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHealthLoader;

#[async_trait]
impl Loader for SystemHealthLoader {
    type Output = SystemHealth;

    async fn load(&self, api: &ApiClient) -> Result<SystemHealth> {
        api.get(HEALTH_PATH, Query::new())
            .await?
            .into_result()?
            .decode_or_notify(api)
    }
}

/// Probes the health endpoint and the database check together and reports
/// the combined outcome as a banner.
pub async fn test_connections(api: &ApiClient) -> Result<SystemHealth> {
    api.notify("Проверка всех соединений...", NotificationKind::Info);

    let (health, db) = tokio::join!(
        SystemHealthLoader.load(api),
        api.get(TEST_DB_PATH, Query::new())
    );

    match (health, db.and_then(|reply| reply.into_result())) {
        (Ok(health), Ok(_)) => {
            api.notify("Все проверки завершены", NotificationKind::Success);
            Ok(health)
        }
        (Err(Error::AuthRequired), _) | (_, Err(Error::AuthRequired)) => {
            debug!("Connection check interrupted by login redirect");
            Err(Error::AuthRequired)
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!("Connection check failed: {}", e);
            api.notify("Ошибка при проверке системы", NotificationKind::Error);
            Err(e)
        }
    }
}
