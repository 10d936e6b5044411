use admin_panel_client::{
    Error,
    api::{Body, Query, Reply},
    error::{MALFORMED_RESPONSE, SERVER_NOT_RESPONDING},
    notify::NotificationKind,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{body_json, header, header_regex, method, path, query_param},
};

mod common;
use common::{TestClient, UNREACHABLE_ORIGIN, create_test_server, json_response};

#[tokio::test]
async fn test_success_envelope_is_returned_unchanged() {
    let (server, client) = create_test_server().await;
    let body = json!({
        "success": true,
        "users": [{"id": 7, "telegram_id": 123456, "username": "ivan"}],
        "total": 1,
        "total_pages": 1
    });

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .respond_with(json_response(200, body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client
        .api
        .get("/users", Query::new().param("page", 1).param("limit", 20))
        .await
        .unwrap();

    let envelope = reply.envelope().expect("expected an envelope");
    assert_eq!(envelope.into_inner(), body);
    assert!(client.banners().is_empty());
    assert!(client.navigator.visited().is_empty());
}

#[tokio::test]
async fn test_unauthorized_redirects_to_login_without_error() {
    let (server, client) = create_test_server().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(json_response(
            401,
            json!({"success": false, "error": "Требуется авторизация"}),
        ))
        .mount(&server)
        .await;

    let reply = client.api.get("/dashboard/stats", Query::new()).await.unwrap();

    assert_eq!(reply, Reply::Redirected);
    assert_eq!(client.navigator.visited(), vec!["/login".to_string()]);
    assert!(client.banners().is_empty());
}

#[tokio::test]
async fn test_unauthorized_with_unparseable_body_still_redirects() {
    let (server, client) = create_test_server().await;

    Mock::given(method("POST"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(401).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let reply = client.api.post("/settings", json!({})).await.unwrap();

    assert!(reply.is_redirected());
    assert_eq!(client.navigator.last().as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_server_error_shows_envelope_message_once() {
    let (server, client) = create_test_server().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .respond_with(json_response(500, json!({"error": "DB down"})))
        .mount(&server)
        .await;

    let err = client
        .api
        .get("/users", Query::new().param("page", 1).param("limit", 20))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Server { status: 500, .. }));
    assert_eq!(err.user_message(), "DB down");
    assert_eq!(
        client.banners(),
        vec![(NotificationKind::Error, "DB down".to_string())]
    );
}

#[tokio::test]
async fn test_server_error_without_message_uses_fallback() {
    let (server, client) = create_test_server().await;

    Mock::given(method("DELETE"))
        .and(path("/api/instructions/4"))
        .respond_with(json_response(404, json!({"success": false})))
        .mount(&server)
        .await;

    let err = client.api.delete("/instructions/4").await.unwrap_err();

    assert_eq!(err.user_message(), "Ошибка 404");
    assert_eq!(
        client.banners(),
        vec![(NotificationKind::Error, "Ошибка 404".to_string())]
    );
}

#[tokio::test]
async fn test_explicit_failure_flag_on_ok_status_fails() {
    let (server, client) = create_test_server().await;

    Mock::given(method("PUT"))
        .and(path("/api/settings"))
        .respond_with(json_response(
            200,
            json!({"success": false, "error": "Неверные данные"}),
        ))
        .mount(&server)
        .await;

    let err = client.api.put("/settings", json!({"bot_token": ""})).await.unwrap_err();

    assert!(matches!(err, Error::Server { status: 200, .. }));
    assert_eq!(client.banners().len(), 1);
    assert_eq!(client.banners()[0].1, "Неверные данные");
}

#[tokio::test]
async fn test_connection_refused_shows_not_responding() {
    let client = TestClient::new(UNREACHABLE_ORIGIN);

    let err = client.api.get("/system/health", Query::new()).await.unwrap_err();

    assert!(matches!(err, Error::Network(_)));
    assert_eq!(
        client.banners(),
        vec![(NotificationKind::Error, SERVER_NOT_RESPONDING.to_string())]
    );
    assert_ne!(client.banners()[0].1, "Ошибка 0");
}

#[tokio::test]
async fn test_invalid_json_is_malformed_response() {
    let (server, client) = create_test_server().await;

    Mock::given(method("GET"))
        .and(path("/api/instructions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = client.api.get("/instructions", Query::new()).await.unwrap_err();

    assert!(matches!(err, Error::MalformedResponse(_)));
    assert_eq!(
        client.banners(),
        vec![(NotificationKind::Error, MALFORMED_RESPONSE.to_string())]
    );
}

#[tokio::test]
async fn test_json_body_is_sent_with_content_type() {
    let (server, client) = create_test_server().await;
    let payload = json!({"action": "extend", "days": 30});

    Mock::given(method("POST"))
        .and(path("/api/user/5/subscription"))
        .and(header("content-type", "application/json"))
        .and(body_json(payload.clone()))
        .respond_with(json_response(200, json!({"success": true, "message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client.api.post("/user/5/subscription", payload).await.unwrap();
    assert_eq!(reply.envelope().unwrap().message(), Some("ok"));
}

#[tokio::test]
async fn test_multipart_body_keeps_transport_content_type() {
    let (server, client) = create_test_server().await;

    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(json_response(200, json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let form = reqwest::multipart::Form::new().text("title", "backup");
    client.api.post("/upload", Body::Multipart(form)).await.unwrap();
}

#[tokio::test]
async fn test_raw_bytes_are_passed_through_without_content_type() {
    let (server, client) = create_test_server().await;

    Mock::given(method("POST"))
        .and(path("/api/import"))
        .respond_with(json_response(200, json!({"success": true})))
        .mount(&server)
        .await;

    client
        .api
        .post("/import", Body::Bytes(b"id;name\n1;ivan".to_vec()))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, b"id;name\n1;ivan".to_vec());
    assert!(requests[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_no_retry_after_failure() {
    let (server, client) = create_test_server().await;

    Mock::given(method("GET"))
        .and(path("/api/system/health"))
        .respond_with(json_response(503, json!({"error": "busy"})))
        .expect(1)
        .mount(&server)
        .await;

    let _ = client.api.get("/system/health", Query::new()).await;
}

#[tokio::test]
async fn test_concurrent_requests_each_write_their_own_target() {
    let (server, client) = create_test_server().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(
            json_response(200, json!({"success": true, "value": "stats"}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/recent-activity"))
        .respond_with(json_response(200, json!({"success": true, "value": "activity"})))
        .mount(&server)
        .await;

    let page: Arc<Mutex<HashMap<&str, String>>> = Arc::new(Mutex::new(HashMap::new()));
    let arrivals: Arc<Mutex<Vec<&str>>> = Arc::new(Mutex::new(Vec::new()));

    let load = |route: &'static str, node: &'static str| {
        let api = client.api.clone();
        let page = page.clone();
        let arrivals = arrivals.clone();
        async move {
            let envelope = api.get(route, Query::new()).await.unwrap().envelope().unwrap();
            arrivals.lock().unwrap().push(node);
            let value = envelope.field("value").unwrap().as_str().unwrap().to_string();
            page.lock().unwrap().insert(node, value);
        }
    };

    // Issued first, answered last.
    tokio::join!(
        load("/dashboard/stats", "total-users"),
        load("/dashboard/recent-activity", "recent-activity-body")
    );

    assert_eq!(
        *arrivals.lock().unwrap(),
        vec!["recent-activity-body", "total-users"]
    );
    let page = page.lock().unwrap();
    assert_eq!(page["total-users"], "stats");
    assert_eq!(page["recent-activity-body"], "activity");
}

#[tokio::test]
async fn test_unguarded_writes_to_same_target_keep_last_arrival() {
    let (server, client) = create_test_server().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("page", "1"))
        .respond_with(
            json_response(200, json!({"success": true, "page": 1}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("page", "2"))
        .respond_with(json_response(200, json!({"success": true, "page": 2})))
        .mount(&server)
        .await;

    let table = Arc::new(Mutex::new(None::<i64>));
    let load = |page: u32| {
        let api = client.api.clone();
        let table = table.clone();
        async move {
            let envelope = api
                .get("/users", Query::new().param("page", page))
                .await
                .unwrap()
                .envelope()
                .unwrap();
            *table.lock().unwrap() = envelope.field("page").and_then(|p| p.as_i64());
        }
    };

    tokio::join!(load(1), load(2));

    // Page 1 was requested first but answered last.
    assert_eq!(*table.lock().unwrap(), Some(1));
}
