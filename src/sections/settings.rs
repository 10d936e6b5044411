use super::{Loader, Settings, SettingsResponse, announce};
use crate::{
    Result,
    api::{ApiClient, Body, Envelope, Query},
};
use async_trait::async_trait;

pub const SETTINGS_PATH: &str = "/settings";

#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsLoader;

#[async_trait]
impl Loader for SettingsLoader {
    type Output = Settings;

    async fn load(&self, api: &ApiClient) -> Result<Settings> {
        let response: SettingsResponse = api
            .get(SETTINGS_PATH, Query::new())
            .await?
            .into_result()?
            .decode_or_notify(api)?;
        Ok(response.settings)
    }
}

pub async fn save(api: &ApiClient, settings: &Settings) -> Result<Envelope> {
    let settings = Settings {
        bot_token: settings.bot_token.trim().to_string(),
        admin_ids: settings.admin_ids.trim().to_string(),
        ..settings.clone()
    };

    let envelope = api
        .post(SETTINGS_PATH, Body::json(&settings)?)
        .await?
        .into_result()?;
    announce(api, &envelope);
    Ok(envelope)
}
