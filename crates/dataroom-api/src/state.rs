//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use dataroom_auth::IdentityProvider;
use dataroom_core::config::AppConfig;
use dataroom_database::HierarchyStore;
use dataroom_service::{DocumentService, FolderService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Transactional folder/document store
    pub store: Arc<dyn HierarchyStore>,
    /// Bearer token authentication
    pub identity: Arc<dyn IdentityProvider>,
    /// Folder hierarchy service
    pub folder_service: Arc<FolderService>,
    /// Document attachment service
    pub document_service: Arc<DocumentService>,
}

impl AppState {
    /// Wire services over the given store and identity provider.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn HierarchyStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&store),
            config.hierarchy.clone(),
        ));
        let document_service = Arc::new(DocumentService::new(Arc::clone(&store)));

        Self {
            config: Arc::new(config),
            store,
            identity,
            folder_service,
            document_service,
        }
    }
}
