//! Server lifecycle.
//!
//! `Constructed -> Running -> Stopped` is encoded in the types: [`LinkedInMcpServer`] is consumed
//! by a `start_*` method, which yields a [`RunningServer`], which is consumed by
//! [`RunningServer::stop`]. Starting twice or stopping before starting does not compile.

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::gateway::ToolGateway;
use axum::Json;
use axum::routing::get;
use linkedin_mcp_client::{LinkedInApi, LinkedInClient};
use rmcp::RoleServer;
use rmcp::ServiceExt as _;
use rmcp::transport::IntoTransport;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

/// A configured server that has not started serving yet.
pub struct LinkedInMcpServer<A: ?Sized = LinkedInClient> {
    gateway: ToolGateway<A>,
}

impl LinkedInMcpServer<LinkedInClient> {
    /// Build the production server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::MissingCredential`] when no access token is configured and
    /// [`ServerError::Client`] when the HTTP client cannot be built.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let token = config
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ServerError::MissingCredential)?;
        let client = LinkedInClient::new(token, &config.api_base_url, config.request_timeout)
            .map_err(ServerError::Client)?;
        Ok(Self::with_api(Arc::new(client)))
    }
}

impl<A> LinkedInMcpServer<A>
where
    A: LinkedInApi + ?Sized + 'static,
{
    /// Build a server around any [`LinkedInApi`] implementation.
    pub fn with_api(api: Arc<A>) -> Self {
        Self {
            gateway: ToolGateway::new(api),
        }
    }

    pub fn gateway(&self) -> &ToolGateway<A> {
        &self.gateway
    }

    /// Serve MCP over the process's stdin/stdout.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] if the MCP handshake fails.
    pub async fn start_stdio(self) -> Result<RunningServer> {
        self.start(rmcp::transport::stdio()).await
    }

    /// Serve MCP over an arbitrary transport (a byte stream, a reader/writer pair, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] if the MCP handshake fails.
    pub async fn start<T, E, M>(self, transport: T) -> Result<RunningServer>
    where
        T: IntoTransport<RoleServer, E, M>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let in_flight = self.gateway.in_flight().clone();
        let shutdown = CancellationToken::new();

        let service = self
            .gateway
            .serve_with_ct(transport, shutdown.clone())
            .await
            .map_err(|e| ServerError::Transport(e.to_string()))?;

        let task = tokio::spawn(async move {
            let reason = service
                .waiting()
                .await
                .map_err(|e| ServerError::Transport(e.to_string()))?;
            info!(?reason, "MCP session ended");
            Ok(())
        });

        info!(transport = "stream", "LinkedIn MCP server started");
        Ok(RunningServer {
            shutdown,
            task: Some(task),
            in_flight,
            local_addr: None,
        })
    }

    /// Serve MCP streamable HTTP at `/mcp`, plus `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Io`] if the address cannot be bound.
    pub async fn start_streamable_http(self, addr: SocketAddr) -> Result<RunningServer> {
        let in_flight = self.gateway.in_flight().clone();
        let shutdown = CancellationToken::new();

        let mut mcp_config = StreamableHttpServerConfig::default();
        mcp_config.cancellation_token = shutdown.child_token();

        let gateway = self.gateway;
        let mcp = StreamableHttpService::new(
            move || Ok(gateway.clone()),
            LocalSessionManager::default().into(),
            mcp_config,
        );
        let app = axum::Router::new()
            .route("/health", get(health))
            .nest_service("/mcp", mcp);

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        let signal = shutdown.clone();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(signal.cancelled_owned())
                .await
                .map_err(ServerError::Io)
        });

        info!(transport = "streamable-http", %local_addr, "LinkedIn MCP server started");
        Ok(RunningServer {
            shutdown,
            task: Some(task),
            in_flight,
            local_addr: Some(local_addr),
        })
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// A server that is accepting calls.
pub struct RunningServer {
    shutdown: CancellationToken,
    task: Option<JoinHandle<Result<()>>>,
    in_flight: TaskTracker,
    local_addr: Option<SocketAddr>,
}

impl RunningServer {
    /// Bound address of the HTTP transport; `None` for stream transports.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Resolve when the transport ends on its own (for stdio: the peer closed the stream).
    ///
    /// # Errors
    ///
    /// Returns the transport's failure, if it ended with one.
    pub async fn closed(&mut self) -> Result<()> {
        match self.task.as_mut() {
            Some(task) => {
                let joined = task.await;
                self.task = None;
                flatten(joined)
            }
            None => Ok(()),
        }
    }

    /// Wait for in-flight tool calls to finish, then shut the transport down.
    ///
    /// # Errors
    ///
    /// Returns the transport's failure, if it ended with one.
    pub async fn stop(mut self) -> Result<()> {
        self.in_flight.close();
        self.in_flight.wait().await;

        self.shutdown.cancel();
        let result = match self.task.take() {
            Some(task) => flatten(task.await),
            None => Ok(()),
        };
        if let Err(err) = &result {
            warn!(error = %err, "transport ended with an error");
        }
        info!("LinkedIn MCP server stopped");
        result
    }
}

fn flatten(joined: std::result::Result<Result<()>, tokio::task::JoinError>) -> Result<()> {
    joined.map_err(|e| ServerError::Transport(e.to_string()))?
}
