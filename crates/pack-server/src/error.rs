/// The pack server error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cannot bind the listen address
    #[error("binding {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// Cannot start the HTTP server
    #[error("starting server: {0}")]
    Server(#[source] std::io::Error),
}
