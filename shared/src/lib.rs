pub mod types;
pub mod principal;
pub mod error;
pub mod config;
pub mod store;
pub mod policy;
pub mod users;
pub mod tasks;
pub mod polls;
pub mod tickets;
pub mod reports;

use std::sync::Arc;

use crate::config::Config;
use crate::store::Store;

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config) -> Arc<Self> {
        Arc::new(Self { store, config })
    }
}
