use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::video::VideoMetadataProvider;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    /// Live video metadata source; `None` when no API key is configured.
    pub video: Option<Arc<dyn VideoMetadataProvider>>,
}
