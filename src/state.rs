use std::sync::Arc;

use crate::{
    config::Config,
    database::{ProductStore, init_store},
    uploads::UploadStore,
};

/// Process-wide resources, built once at startup and injected into every
/// handler. The store connection lives here rather than in ambient state.
pub struct AppState {
    pub config: Config,
    pub products: ProductStore,
    pub uploads: UploadStore,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let products = init_store(&config).await;
        let uploads = UploadStore::new(&config.uploads_dir).expect("Uploads misconfigured!");

        Arc::new(Self {
            config,
            products,
            uploads,
        })
    }
}
