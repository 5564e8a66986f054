use std::net::SocketAddr;

use coinwatch_core::StoreConfig;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    pub store: StoreConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            store: StoreConfig::default(),
        }
    }
}
