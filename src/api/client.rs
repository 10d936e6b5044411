use super::types::*;
use crate::{
    Error, Result,
    config::ApiConfig,
    navigation::Navigator,
    notify::{NotificationId, NotificationKind, Notifier},
};
use reqwest::{StatusCode, Url, header::CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Message used when a failed response carries no `error` field.
pub fn fallback_message(status: u16) -> String {
    format!("Ошибка {}", status)
}

/// JSON client for the panel API. Every failure is shown as an error banner
/// before it is returned; a 401 navigates to the login route instead.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ApiConfig>,
    notifier: Notifier,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        notifier: Notifier,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        debug!(
            "Created API client for {}{}",
            config.origin, config.base_path
        );

        Ok(Self {
            http,
            config: Arc::new(config),
            notifier,
            navigator,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        self.notifier.notify(message, kind)
    }

    pub async fn get(&self, path: &str, query: Query) -> Result<Reply> {
        self.send(Request::get(path, query)).await
    }

    pub async fn post(&self, path: &str, body: impl Into<Body>) -> Result<Reply> {
        self.send(Request::post(path, body)).await
    }

    pub async fn put(&self, path: &str, body: impl Into<Body>) -> Result<Reply> {
        self.send(Request::put(path, body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Reply> {
        self.send(Request::delete(path)).await
    }

    pub async fn send(&self, request: Request) -> Result<Reply> {
        let method = request.method;
        let path = request.path.clone();

        match self.dispatch(request).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                error!("API error on {} {}: {}", method, path, e);
                self.notifier.error(e.user_message());
                Err(e)
            }
        }
    }

    /// `origin + base_path + path`, followed by the form-encoded query when
    /// there is one.
    pub fn url_for(&self, path: &str, query: &Query) -> Result<Url> {
        let raw = format!("{}{}{}", self.config.origin, self.config.base_path, path);
        let mut url = Url::parse(&raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }

        Ok(url)
    }

    async fn dispatch(&self, request: Request) -> Result<Reply> {
        let url = self.url_for(&request.path, &request.query)?;
        debug!("{} {}", request.method, url);

        let mut builder = self.http.request(request.method.into(), url);
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(&value)?),
            Body::Multipart(form) => builder.multipart(form),
            Body::Bytes(bytes) => builder.body(bytes),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Error::network(e.to_string()))?;
        let status = response.status();
        debug!("{} {} -> {}", request.method, request.path, status);

        if status == StatusCode::UNAUTHORIZED {
            warn!(
                "Session rejected on {} {}, redirecting to {}",
                request.method, request.path, self.config.login_route
            );
            self.navigator.navigate(&self.config.login_route);
            return Ok(Reply::Redirected);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::network(e.to_string()))?;

        classify(status, &bytes).map(Reply::Envelope)
    }
}

fn classify(status: StatusCode, bytes: &[u8]) -> Result<Envelope> {
    let parsed = serde_json::from_slice::<Value>(bytes);

    if !status.is_success() {
        let message = parsed
            .ok()
            .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| fallback_message(status.as_u16()));
        return Err(Error::server(status.as_u16(), message));
    }

    let envelope = Envelope::new(parsed.map_err(|e| Error::malformed(e.to_string()))?);
    if !envelope.is_success() {
        let message = envelope
            .error()
            .map(str::to_string)
            .unwrap_or_else(|| fallback_message(status.as_u16()));
        return Err(Error::server(status.as_u16(), message));
    }

    Ok(envelope)
}
