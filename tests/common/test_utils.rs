use admin_panel_client::{
    api::ApiClient,
    config::{ApiConfig, DisplayPolicy, NotificationConfig},
    navigation::RecordingNavigator,
    notify::{MemorySurface, NotificationKind, Notifier},
};
use serde_json::Value;
use std::sync::Arc;
use wiremock::{MockServer, ResponseTemplate};

/// An origin nothing listens on.
pub const UNREACHABLE_ORIGIN: &str = "http://127.0.0.1:1";

/// Client wired to an in-memory surface and a recording navigator.
pub struct TestClient {
    pub api: ApiClient,
    pub surface: Arc<MemorySurface>,
    pub navigator: Arc<RecordingNavigator>,
}

impl TestClient {
    pub fn new(origin: &str) -> Self {
        Self::with_policy(origin, DisplayPolicy::Unbounded)
    }

    pub fn with_policy(origin: &str, policy: DisplayPolicy) -> Self {
        let surface = Arc::new(MemorySurface::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let notifier = Notifier::new(
            surface.clone(),
            &NotificationConfig {
                ttl_ms: 5000,
                policy,
            },
        );
        let api = ApiClient::new(ApiConfig::new(origin), notifier, navigator.clone())
            .expect("Failed to build API client");

        Self {
            api,
            surface,
            navigator,
        }
    }

    /// `(kind, message)` of every banner currently shown.
    pub fn banners(&self) -> Vec<(NotificationKind, String)> {
        self.surface
            .visible()
            .into_iter()
            .map(|n| (n.kind, n.message))
            .collect()
    }
}

pub async fn create_test_server() -> (MockServer, TestClient) {
    let server = MockServer::start().await;
    let client = TestClient::new(&server.uri());
    (server, client)
}

pub fn json_response(status: u16, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
api:
  origin: "http://127.0.0.1:5000"
  base_path: "/api"
  login_route: "/login"
  logout_route: "/logout"
  timeout_secs: 10

notifications:
  ttl_ms: 5000
  policy:
    kind: bounded
    max: 3

logs:
  level: "debug"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
api:
  base_path: 42
notifications:
  ttl_ms: "soon"
"#;
