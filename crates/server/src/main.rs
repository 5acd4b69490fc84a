use anyhow::Context as _;
use clap::Parser as _;
use linkedin_mcp_server::{Cli, LinkedInMcpServer, ServerConfig, TransportKind};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = linkedin_mcp_server::config::load_dotenv();
    let config = ServerConfig::from(Cli::parse());
    linkedin_mcp_server::telemetry::init(config.log_level, config.log_format);
    if let Some(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    config.validate()?;
    let server = LinkedInMcpServer::new(&config)?;

    let mut running = match config.transport {
        TransportKind::Stdio => server.start_stdio().await?,
        TransportKind::StreamableHttp => {
            let addr = config.bind_addr()?;
            server
                .start_streamable_http(addr)
                .await
                .with_context(|| format!("serve streamable HTTP on {addr}"))?
        }
    };

    tokio::select! {
        () = shutdown_signal() => info!("shutdown signal received"),
        closed = running.closed() => {
            closed?;
            info!("transport closed by peer");
        }
    }

    running.stop().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
