use std::sync::Arc;

use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::database::Database;
use crate::uploads::UploadStore;

/// Shared handler state. Cheap to clone; the pool and keys are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtKeys>,
    pub uploads: UploadStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database, jwt: JwtKeys) -> Self {
        let uploads = UploadStore::new(config.uploads.dir.clone());
        Self {
            db,
            jwt: Arc::new(jwt),
            uploads,
            config: Arc::new(config),
        }
    }
}
