//! End-to-end tests for the agent HTTP API
//!
//! Each test binds a real listener on an ephemeral port and drives the
//! server with reqwest.

use agent_lifecycle::{AgentServer, AgentService, AgentStore, ServerConfig};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::oneshot;

// ============================================================================
// TEST HELPERS
// ============================================================================

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let service = Arc::new(AgentService::new(Arc::new(AgentStore::new())));
        let server = AgentServer::new(ServerConfig::default(), service);
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            server
                .serve_with_shutdown(listener, async {
                    let _ = rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::new(),
            shutdown: Some(tx),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = self.client.request(method, self.url(path));
        if let Some(user) = user {
            req = req.header("x-user-id", user);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req.send().await.unwrap();
        let status = resp.status();
        let json = resp.json::<Value>().await.unwrap_or(Value::Null);
        (status, json)
    }

    async fn stop(self) {
        let TestServer {
            client,
            shutdown,
            handle,
            ..
        } = self;
        // Close pooled keep-alive connections so shutdown does not wait on them
        drop(client);
        if let Some(tx) = shutdown {
            let _ = tx.send(());
        }
        handle.await.unwrap();
    }
}

fn bot1() -> Value {
    json!({
        "name": "bot1",
        "config": {"model_type": "neural_net", "learning_rate": 0.01}
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[tokio::test]
async fn test_agent_lifecycle_scenario() {
    use reqwest::Method;
    let server = TestServer::start().await;

    // Create as U1
    let (status, json) = server
        .send(Method::POST, "/api/agents/create", Some("U1"), Some(bot1()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status"], "inactive");
    assert_eq!(json["data"]["owner_id"], "U1");
    let id = json["data"]["id"].as_str().unwrap().to_string();
    let control = format!("/api/agents/{}/control", id);

    // Start
    let (status, json) = server
        .send(
            Method::POST,
            &control,
            Some("U1"),
            Some(json!({"action": "start"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "active");

    // Start again: already active
    let (status, json) = server
        .send(
            Method::POST,
            &control,
            Some("U1"),
            Some(json!({"action": "start"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CONFLICT");

    // Control as someone else
    let (status, _) = server
        .send(
            Method::POST,
            &control,
            Some("U2"),
            Some(json!({"action": "stop"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Delete as owner
    let agent_path = format!("/api/agents/{}", id);
    let (status, json) = server
        .send(Method::DELETE, &agent_path, Some("U1"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Agent deleted successfully");

    // Gone for everyone
    let (status, _) = server.send(Method::GET, &agent_path, Some("U1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = server
        .send(
            Method::GET,
            &format!("/api/agents/{}/monitor", id),
            Some("U2"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_unauthenticated_requests_rejected() {
    use reqwest::Method;
    let server = TestServer::start().await;

    let (status, json) = server
        .send(Method::POST, "/api/agents/create", None, Some(bot1()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Unauthorized access");

    let (status, _) = server
        .send(Method::GET, "/api/agents/list", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = server
        .send(Method::GET, "/api/agents/anything", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    server.stop().await;
}

#[tokio::test]
async fn test_ownership_isolation_in_listing() {
    use reqwest::Method;
    let server = TestServer::start().await;

    for user in ["U1", "U1", "U2"] {
        let (status, _) = server
            .send(Method::POST, "/api/agents/create", Some(user), Some(bot1()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, json) = server
        .send(Method::GET, "/api/agents/list", Some("U2"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["owner_id"], "U2");

    let (_, json) = server
        .send(Method::GET, "/api/agents/list", Some("U1"), None)
        .await;
    assert_eq!(json["count"], 2);

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_creates() {
    use reqwest::Method;
    let server = TestServer::start().await;

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let client = server.client.clone();
            let url = server.url("/api/agents/create");
            tokio::spawn(async move {
                let user = if i % 2 == 0 { "U1" } else { "U2" };
                client
                    .post(url)
                    .header("x-user-id", user)
                    .json(&bot1())
                    .send()
                    .await
                    .unwrap()
                    .status()
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::CREATED);
    }

    for user in ["U1", "U2"] {
        let (_, json) = server
            .send(Method::GET, "/api/agents/list", Some(user), None)
            .await;
        assert_eq!(json["count"], 10);
    }

    server.stop().await;
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::start().await;
    let resp = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "OK");
    server.stop().await;
}
