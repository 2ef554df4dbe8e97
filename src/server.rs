//! Agent HTTP Server
//!
//! Wires the agent API into an axum application:
//! ```text
//! TraceLayer -> CorsLayer -> RequestBodyLimitLayer
//!  ├── GET /health
//!  └── /api/agents/*  (identity middleware -> handlers -> AgentService)
//! ```

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::AgentService;
use crate::api;
use crate::config::{ConfigError, ServerConfig};

// ============================================================================
// /health ENDPOINT
// ============================================================================

pub async fn health_check() -> &'static str {
    "OK"
}

// ============================================================================
// SERVER
// ============================================================================

pub struct AgentServer {
    config: ServerConfig,
    service: Arc<AgentService>,
}

impl AgentServer {
    pub fn new(config: ServerConfig, service: Arc<AgentService>) -> Self {
        Self { config, service }
    }

    /// Full application router with tower-http layers applied.
    pub fn router(&self) -> Result<Router, ConfigError> {
        self.config.validate()?;
        let identity_header = self.config.identity_header_name()?;

        Ok(Router::new()
            .route("/health", get(health_check))
            .merge(api::agent_router(
                Arc::clone(&self.service),
                identity_header,
            ))
            .layer(RequestBodyLimitLayer::new(self.config.max_body_bytes))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TraceLayer::new_for_http()))
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve_with_shutdown<F>(
        &self,
        listener: tokio::net::TcpListener,
        shutdown: F,
    ) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.router()?;
        let addr = listener.local_addr()?;

        info!("╔══════════════════════════════════════════════════════════════╗");
        info!("║                 Agent Lifecycle Server                       ║");
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!("║  Listening on: {:45} ║", addr.to_string());
        info!("║  Identity header: {:42} ║", self.config.identity_header);
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!("║  Endpoints:                                                  ║");
        info!("║    POST   /api/agents/create      - Create agent             ║");
        info!("║    GET    /api/agents/list        - List own agents          ║");
        info!("║    GET    /api/agents/:id         - Agent details            ║");
        info!("║    POST   /api/agents/:id/control - Start / stop / restart   ║");
        info!("║    GET    /api/agents/:id/monitor - Status snapshot          ║");
        info!("║    DELETE /api/agents/:id         - Delete agent             ║");
        info!("╚══════════════════════════════════════════════════════════════╝");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Agent server stopped");
        Ok(())
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn start(&self) -> anyhow::Result<()> {
        let addr = self.config.listen_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        self.serve_with_shutdown(listener, shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
