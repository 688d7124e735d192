use crate::config::Backend;
use crate::kv::KvClient;
use crate::storage::LocalStore;
use crate::store::{DayStore, PlanningStore};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub store: PlanningStore,
}

impl AppState {
    pub fn new(store: PlanningStore) -> Self {
        Self { store }
    }

    pub async fn from_backend(backend: &Backend) -> Self {
        let day_store: Arc<dyn DayStore> = match backend {
            Backend::Local { data_path } => {
                info!("using data file {}", data_path.display());
                Arc::new(LocalStore::open(data_path.clone()).await)
            }
            Backend::Kv { base_url, token } => {
                info!("using key-value store at {base_url}");
                Arc::new(KvClient::new(base_url.clone(), token.clone()))
            }
        };
        Self::new(PlanningStore::new(day_store))
    }
}
