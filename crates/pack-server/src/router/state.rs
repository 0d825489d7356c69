use std::sync::Arc;

use pack_sizing::PackSizeRegistry;

pub(super) struct ServerStateInner {
    /// The pack sizes shared by every request.
    pub registry: Arc<PackSizeRegistry>,
    /// Largest order quantity handed to the optimizer.
    pub max_order_quantity: u64,
    /// Largest pack size the registry accepts.
    pub max_pack_size: u64,
}

#[derive(Clone)]
pub(super) struct ServerState {
    inner: Arc<ServerStateInner>,
}

impl ServerState {
    pub(super) fn new(registry: Arc<PackSizeRegistry>, max_order_quantity: u64, max_pack_size: u64) -> Self {
        Self {
            inner: Arc::new(ServerStateInner {
                registry,
                max_order_quantity,
                max_pack_size,
            }),
        }
    }
}

impl std::ops::Deref for ServerState {
    type Target = ServerStateInner;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}
