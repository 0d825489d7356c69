use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use pack_config::Config;
use pack_sizing::PackSizeRegistry;
use tokio::{net::TcpListener, signal};

const DEFAULT_LISTEN_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080);

/// Start parameters for the server.
pub struct ServerConfig {
    /// The listen address. Overrides the one in the configuration file.
    pub listen_addr: Option<SocketAddr>,
    /// The service configuration.
    pub config: Config,
}

/// Starts the server and serves requests until a termination signal arrives.
///
/// The pack size registry is created here from the configured defaults and
/// lives as long as the server.
pub async fn serve(ServerConfig { listen_addr, config }: ServerConfig) -> crate::Result<()> {
    let registry = Arc::new(PackSizeRegistry::new(config.pack_sizes.defaults.iter().copied()));

    tracing::debug!(sizes = ?registry.sizes(), "pack size registry initialized");

    let router = crate::router(&config, registry);

    let addr = listen_addr
        .or(config.network.listen_address)
        .unwrap_or(DEFAULT_LISTEN_ADDRESS);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| crate::Error::Bind { addr, source })?;

    let local_addr = listener.local_addr().map_err(crate::Error::Server)?;
    tracing::info!("Pack API exposed at http://{local_addr}{}", config.api.path);

    axum::serve(listener, router)
        .with_graceful_shutdown(graceful_shutdown())
        .await
        .map_err(crate::Error::Server)?;

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. In-flight requests finish before the server stops.
async fn graceful_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gracefully...");
}
