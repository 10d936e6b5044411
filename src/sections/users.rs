use super::{Loader, UserDetail, UsersPage};
use crate::{
    Result,
    api::{ApiClient, Query},
};
use async_trait::async_trait;

pub const USERS_PATH: &str = "/users";
pub const PAGE_SIZE: u32 = 20;

/// State of the users table between loads.
#[derive(Debug, Clone, PartialEq)]
pub struct UsersView {
    pub page: u32,
    pub search: String,
    pub filter: String,
    pub data: Option<UsersPage>,
}

impl Default for UsersView {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            filter: String::new(),
            data: None,
        }
    }
}

impl UsersView {
    pub fn query(&self, page: u32) -> UsersQuery {
        UsersQuery {
            page,
            limit: PAGE_SIZE,
            search: self.search.clone(),
            filter: self.filter.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub filter: String,
}

impl UsersQuery {
    pub fn to_query(&self) -> Query {
        Query::new()
            .param("page", self.page)
            .param("limit", self.limit)
            .param("search", &self.search)
            .param("filter", &self.filter)
    }
}

#[async_trait]
impl Loader for UsersQuery {
    type Output = UsersPage;

    async fn load(&self, api: &ApiClient) -> Result<UsersPage> {
        api.get(USERS_PATH, self.to_query())
            .await?
            .into_result()?
            .decode_or_notify(api)
    }
}

pub async fn detail(api: &ApiClient, user_id: i64) -> Result<UserDetail> {
    api.get(&format!("/user/{}", user_id), Query::new())
        .await?
        .into_result()?
        .decode_or_notify(api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_sends_every_field_in_order() {
        let view = UsersView {
            search: "ivan".to_string(),
            ..UsersView::default()
        };
        let query = view.query(3).to_query();
        let pairs: Vec<_> = query.pairs().collect();

        assert_eq!(
            pairs,
            vec![("page", "3"), ("limit", "20"), ("search", "ivan"), ("filter", "")]
        );
    }
}
