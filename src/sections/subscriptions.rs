use super::{Loader, SubscriptionsPage, announce, reject};
use crate::{
    Result,
    api::{ApiClient, Envelope, Query},
};
use async_trait::async_trait;
use serde_json::json;

pub const SUBSCRIPTIONS_PATH: &str = "/subscriptions";
pub const INVALID_DAYS: &str = "Введите корректное количество дней";

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionsView {
    pub page: u32,
    pub filter: String,
    pub data: Option<SubscriptionsPage>,
}

impl Default for SubscriptionsView {
    fn default() -> Self {
        Self {
            page: 1,
            filter: "active".to_string(),
            data: None,
        }
    }
}

impl SubscriptionsView {
    pub fn query(&self, page: u32) -> SubscriptionsQuery {
        SubscriptionsQuery {
            page,
            filter: self.filter.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionsQuery {
    pub page: u32,
    pub filter: String,
}

#[async_trait]
impl Loader for SubscriptionsQuery {
    type Output = SubscriptionsPage;

    async fn load(&self, api: &ApiClient) -> Result<SubscriptionsPage> {
        let query = Query::new()
            .param("page", self.page)
            .param("filter", &self.filter);
        api.get(SUBSCRIPTIONS_PATH, query)
            .await?
            .into_result()?
            .decode_or_notify(api)
    }
}

/// Extends the user's subscription by `days`, which must be positive.
pub async fn extend(api: &ApiClient, user_id: i64, days: i64) -> Result<Envelope> {
    if days <= 0 {
        return Err(reject(api, INVALID_DAYS));
    }

    let body = json!({
        "action": "extend",
        "days": days,
    });
    let envelope = api
        .post(&format!("/user/{}/subscription", user_id), body)
        .await?
        .into_result()?;
    announce(api, &envelope);
    Ok(envelope)
}
