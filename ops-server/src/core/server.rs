//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::core::{Config, Result, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for sharing with tests/tools)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        // Create application state if not provided
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        // Register background tasks
        let mut tasks = BackgroundTasks::new();
        state.sync.start_listener(&mut tasks);
        spawn_task_health_check(&mut tasks);
        tasks.log_summary();

        let app = crate::api::router(state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(TimeoutLayer::new(Duration::from_millis(
                self.config.request_timeout_ms,
            )));

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Harbor Ops Server listening on {}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        // Stop background tasks after the HTTP server has drained
        tasks.shutdown().await;

        Ok(())
    }
}

/// 周期性检查后台任务健康状态
fn spawn_task_health_check(tasks: &mut BackgroundTasks) {
    let token = tasks.shutdown_token();
    tasks.spawn("task_health_check", TaskKind::Periodic, async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {
                    tracing::trace!("background task heartbeat");
                }
            }
        }
    });
}
