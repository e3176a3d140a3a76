//! Application state wiring the routine app to its concrete adapters.
//!
//! `RoutineApp` is generic over the key-value store and the assistant
//! transport; AppState pins it to the infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use routinely_core::assistant::client::AssistantClient;
use routinely_core::routine::RoutineApp;
use routinely_infra::assistant::HttpAssistantTransport;
use routinely_infra::catalog::AnyCatalogSource;
use routinely_infra::config::load_app_config;
use routinely_infra::filesystem::resolve_data_dir;
use routinely_infra::storage::json_file::JsonFileKvStore;
use routinely_types::config::AppConfig;

/// Concrete application type pinned to infra implementations.
pub type ConcreteApp = RoutineApp<JsonFileKvStore, HttpAssistantTransport>;

/// Command-line overrides applied on top of `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct StateOptions {
    pub data_dir: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub catalog: Option<String>,
}

/// Whether the catalog has been fetched for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    NotLoaded,
    Loaded(usize),
    Failed(String),
}

pub struct AppState {
    pub app: ConcreteApp,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    catalog_source: AnyCatalogSource,
    catalog_status: CatalogStatus,
}

impl AppState {
    /// Resolve the data directory, load config, and restore persisted state.
    ///
    /// The catalog is not fetched here; commands that need it call
    /// [`AppState::ensure_catalog`].
    pub async fn init(options: StateOptions) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir(options.data_dir.as_deref());

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let mut config = load_app_config(&data_dir).await;
        if let Some(endpoint) = options.endpoint {
            config.endpoint_url = endpoint;
        }
        if let Some(catalog) = options.catalog {
            config.catalog = catalog;
        }

        let timeout = config.request_timeout_secs.map(Duration::from_secs);
        let transport = HttpAssistantTransport::new(config.endpoint_url.clone(), timeout)?;
        let assistant = AssistantClient::new(transport, config.system_prompt.clone());

        let store = Arc::new(JsonFileKvStore::new(&data_dir));
        let app = RoutineApp::restore(store, assistant).await;

        let catalog_source = AnyCatalogSource::from_location(&config.catalog, &data_dir)?;

        tracing::debug!(
            data_dir = %data_dir.display(),
            endpoint = %config.endpoint_url,
            catalog = %config.catalog,
            "Application state initialized"
        );

        Ok(Self {
            app,
            config,
            data_dir,
            catalog_source,
            catalog_status: CatalogStatus::NotLoaded,
        })
    }

    /// Fetch the catalog once per invocation. Returns `false` when it failed
    /// to load; the failure has already been logged.
    pub async fn ensure_catalog(&mut self) -> bool {
        if self.catalog_status == CatalogStatus::NotLoaded {
            self.catalog_status = match self.app.load_catalog(&self.catalog_source).await {
                Ok(count) => CatalogStatus::Loaded(count),
                Err(e) => CatalogStatus::Failed(e.to_string()),
            };
        }
        matches!(self.catalog_status, CatalogStatus::Loaded(_))
    }

    pub fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog_status
    }

    pub fn catalog_location(&self) -> &str {
        use routinely_core::catalog::store::CatalogSource;
        self.catalog_source.location()
    }
}
