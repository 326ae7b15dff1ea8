//! Command implementations.

pub mod auth;
pub mod categories;
pub mod customers;
pub mod orders;
pub mod plans;
pub mod products;
pub mod stats;

use thiserror::Error;

use caphe_client::config::STORAGE_PREFIX;
use caphe_client::demo::DemoStore;
use caphe_client::validation::ValidationErrors;
use caphe_client::{ApiClient, ApiError, ClientConfig, ConfigError, StorageService};

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Cấu hình không hợp lệ: {0}")]
    Config(#[from] ConfigError),

    /// The backend rejected the request or was unreachable.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The form failed client-side validation; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Invalid email address.
    #[error("Email không hợp lệ: {0}")]
    Email(#[from] caphe_core::EmailError),

    /// Local file problem (e.g. the image to upload).
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Invalid command input.
    #[error("{0}")]
    Invalid(String),
}

/// Build the API client from the environment.
pub fn client() -> Result<ApiClient, CommandError> {
    let config = ClientConfig::from_env()?;
    Ok(ApiClient::new(config))
}

/// Open the offline demo store over the same state directory the client
/// uses.
pub fn demo_store() -> Result<DemoStore, CommandError> {
    let config = ClientConfig::from_env()?;
    Ok(DemoStore::new(StorageService::new(
        config.state_dir,
        STORAGE_PREFIX,
    )))
}

/// Shared `page x/y (n items)` footer line.
pub(crate) fn page_footer<T>(page: &caphe_client::collection::Page<T>) {
    tracing::info!(
        "Trang {}/{} ({} mục)",
        page.page,
        page.total_pages,
        page.total_items
    );
}
